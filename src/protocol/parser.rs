//! Session command parser.
//!
//! Parses incoming command lines from raw text into structured `Command`
//! variants that the main loop can dispatch on.

use tracing::warn;

use crate::board::country::CountryId;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read the map asset at the given path and populate provinces.
    Load { path: String },

    /// Try to unlock editing with a credential (everything after `unlock`).
    Unlock { credential: String },

    /// Lock editing and clear the current mode.
    Lock,

    /// Enter editing mode for a country.
    Select { country: CountryId },

    /// Enter territory-removal mode.
    Remove,

    /// A region was clicked.
    Click { province: String },

    /// Print the current fill of every province.
    Colors,

    /// Print each country's owned territories.
    Owners,

    /// Print the last status message.
    Status,

    /// Print the lock indicator.
    LockState,

    /// Terminate the process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "lock" => Some(Command::Lock),
        "remove" => Some(Command::Remove),
        "colors" => Some(Command::Colors),
        "owners" => Some(Command::Owners),
        "status" => Some(Command::Status),
        "lockstate" => Some(Command::LockState),
        "quit" => Some(Command::Quit),

        "load" => parse_load(&tokens, trimmed),
        "unlock" => Some(parse_unlock(trimmed)),
        "select" => parse_select(&tokens),
        "click" => parse_click(&tokens),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `load <path>`. The path is the rest of the line, so it may contain spaces.
fn parse_load(tokens: &[&str], full_line: &str) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed load: expected 'load <path>'");
        return None;
    }
    let path = rest_after(full_line, "load");
    Some(Command::Load { path })
}

/// Parses `unlock [credential]`. A missing credential is passed on as empty
/// so the session can report it.
fn parse_unlock(full_line: &str) -> Command {
    Command::Unlock {
        credential: rest_after(full_line, "unlock"),
    }
}

/// Parses `select <country id>`.
fn parse_select(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed select: expected 'select <country id>'");
        return None;
    }
    match tokens[1].parse::<u32>() {
        Ok(id) => Some(Command::Select {
            country: CountryId(id),
        }),
        Err(_) => {
            warn!("invalid country id: '{}'", tokens[1]);
            None
        }
    }
}

/// Parses `click <province id>`.
fn parse_click(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!("malformed click: expected 'click <province id>'");
        return None;
    }
    Some(Command::Click {
        province: tokens[1].to_string(),
    })
}

/// Everything after the leading keyword, trimmed.
fn rest_after(full_line: &str, keyword: &str) -> String {
    full_line
        .trim()
        .strip_prefix(keyword)
        .unwrap_or("")
        .trim()
        .to_string()
}
