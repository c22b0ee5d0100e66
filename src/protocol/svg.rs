//! Region extraction from an SVG map document.
//!
//! The map asset is scanned once for `<path>` elements. A path is a region
//! when it sits inside a group whose class list contains the configured
//! group class (`state` by default), or anywhere in the document when no
//! group class is configured. Each region's identifier comes from its `id`
//! attribute, falling back to the first token of its `class` attribute.
//!
//! This is a tag scanner, not a full XML parser: it understands elements,
//! quoted attributes, comments, processing instructions, CDATA sections and
//! declarations, which is everything a map document needs.

use std::collections::HashSet;

use thiserror::Error;

/// Errors that make a map document unreadable as a whole.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map asset {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unterminated {what} starting at byte {offset}")]
    Unterminated { what: &'static str, offset: usize },

    #[error("malformed tag at byte {offset}: {reason}")]
    MalformedTag { offset: usize, reason: String },
}

/// A region element with a resolved identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    /// Byte offset of the element's `<` in the document.
    pub offset: usize,
}

/// Why a candidate element did not become a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither an `id` nor a usable `class` attribute.
    NoIdentifier,
    /// An earlier element already claimed this identifier.
    DuplicateId(String),
}

/// A candidate element that was left out of the region list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRegion {
    pub offset: usize,
    pub reason: SkipReason,
}

/// Outcome of scanning a document: regions in document order, plus skips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionScan {
    pub regions: Vec<Region>,
    pub skipped: Vec<SkippedRegion>,
}

/// Resolves a region identifier from an element's `id` and `class` attributes.
///
/// The `id` wins when it is non-blank; otherwise the first class token is
/// used. Returns None when neither yields an identifier.
pub fn region_id(id_attr: Option<&str>, class_attr: Option<&str>) -> Option<String> {
    if let Some(id) = id_attr.map(str::trim).filter(|s| !s.is_empty()) {
        return Some(id.to_string());
    }
    class_attr
        .and_then(|c| c.split_whitespace().next())
        .map(str::to_string)
}

/// Scans `doc` for region elements.
///
/// `group_class` restricts regions to paths nested inside an element whose
/// class list contains it; `None` accepts every path.
pub fn extract_regions(doc: &str, group_class: Option<&str>) -> Result<RegionScan, MapError> {
    let mut scan = RegionScan::default();
    let mut seen: HashSet<String> = HashSet::new();
    // Open elements: (name, inside a region group).
    let mut stack: Vec<(&str, bool)> = Vec::new();
    let mut pos = 0;

    while let Some(rel) = doc[pos..].find('<') {
        let start = pos + rel;
        let rest = &doc[start..];

        if let Some(skip) = skip_markup(rest, start)? {
            pos = start + skip;
            continue;
        }

        let end = find_tag_end(rest).ok_or(MapError::Unterminated {
            what: "tag",
            offset: start,
        })?;
        let tag = parse_tag(&rest[1..end], start)?;
        pos = start + end + 1;

        if tag.kind == TagKind::Close {
            if let Some(i) = stack.iter().rposition(|(name, _)| *name == tag.name) {
                stack.truncate(i);
            }
            continue;
        }

        let in_group = stack.last().is_some_and(|(_, g)| *g);
        if local_name(tag.name) == "path" && (group_class.is_none() || in_group) {
            match region_id(tag.attr("id"), tag.attr("class")) {
                Some(id) if seen.contains(&id) => scan.skipped.push(SkippedRegion {
                    offset: start,
                    reason: SkipReason::DuplicateId(id),
                }),
                Some(id) => {
                    seen.insert(id.clone());
                    scan.regions.push(Region { id, offset: start });
                }
                None => scan.skipped.push(SkippedRegion {
                    offset: start,
                    reason: SkipReason::NoIdentifier,
                }),
            }
        }

        if tag.kind == TagKind::Open {
            let opens_group = group_class.is_some_and(|cls| {
                tag.attr("class")
                    .is_some_and(|c| c.split_whitespace().any(|t| t == cls))
            });
            stack.push((tag.name, in_group || opens_group));
        }
    }

    Ok(scan)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
    SelfClosing,
}

#[derive(Debug)]
struct Tag<'a> {
    name: &'a str,
    kind: TagKind,
    attrs: Vec<(&'a str, String)>,
}

impl<'a> Tag<'a> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Strips an `svg:`-style namespace prefix.
fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Returns the length of a comment, CDATA section, processing instruction or
/// declaration at the start of `rest`, or None if `rest` starts an element tag.
fn skip_markup(rest: &str, offset: usize) -> Result<Option<usize>, MapError> {
    let (open, close, what) = if rest.starts_with("<!--") {
        ("<!--", "-->", "comment")
    } else if rest.starts_with("<![CDATA[") {
        ("<![CDATA[", "]]>", "CDATA section")
    } else if rest.starts_with("<?") {
        ("<?", "?>", "processing instruction")
    } else if rest.starts_with("<!") {
        ("<!", ">", "declaration")
    } else {
        return Ok(None);
    };
    match rest[open.len()..].find(close) {
        Some(i) => Ok(Some(open.len() + i + close.len())),
        None => Err(MapError::Unterminated { what, offset }),
    }
}

/// Finds the `>` closing the tag at the start of `rest`, ignoring any inside quotes.
fn find_tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in rest.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

/// Parses the text between `<` and `>`.
fn parse_tag(body: &str, offset: usize) -> Result<Tag<'_>, MapError> {
    let malformed = |reason: &str| MapError::MalformedTag {
        offset,
        reason: reason.to_string(),
    };

    if let Some(close) = body.strip_prefix('/') {
        let name = close.trim();
        if name.is_empty() {
            return Err(malformed("closing tag without a name"));
        }
        return Ok(Tag {
            name,
            kind: TagKind::Close,
            attrs: Vec::new(),
        });
    }

    let (body, kind) = match body.trim_end().strip_suffix('/') {
        Some(b) => (b, TagKind::SelfClosing),
        None => (body, TagKind::Open),
    };

    let name_end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    let name = &body[..name_end];
    if name.is_empty() {
        return Err(malformed("tag without a name"));
    }

    let attrs = parse_attrs(&body[name_end..]).map_err(|reason| malformed(reason.as_str()))?;
    Ok(Tag { name, kind, attrs })
}

/// Parses `name="value"` pairs. Attributes without a value get an empty one.
fn parse_attrs(mut s: &str) -> Result<Vec<(&str, String)>, String> {
    let mut attrs = Vec::new();
    loop {
        s = s.trim_start();
        if s.is_empty() {
            return Ok(attrs);
        }

        let name_end = s
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(s.len());
        let name = &s[..name_end];
        if name.is_empty() {
            return Err(format!("unexpected '{}'", &s[..1]));
        }
        s = s[name_end..].trim_start();

        let Some(after_eq) = s.strip_prefix('=') else {
            attrs.push((name, String::new()));
            continue;
        };
        s = after_eq.trim_start();

        let value = match s.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let close = s[1..]
                    .find(q)
                    .ok_or_else(|| format!("unterminated value for attribute '{}'", name))?;
                let raw = &s[1..1 + close];
                s = &s[close + 2..];
                raw
            }
            Some(_) => {
                let end = s.find(char::is_whitespace).unwrap_or(s.len());
                let raw = &s[..end];
                s = &s[end..];
                raw
            }
            None => return Err(format!("missing value for attribute '{}'", name)),
        };
        attrs.push((name, decode_entities(value)));
    }
}

/// Replaces the predefined XML entities and numeric character references.
/// Unknown references are kept verbatim.
fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let ch = match &rest[1..semi] {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                ent => ent
                    .strip_prefix("#x")
                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                    .or_else(|| ent.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
