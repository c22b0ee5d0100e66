//! Interactive session state.
//!
//! A `Session` owns the map state, the editing mode, the advisory lock and
//! the status line, and routes user actions to the assignment engine. Every
//! action, accepted or rejected, leaves a human-readable message in the
//! status line; every accepted click or map load is followed by a full
//! render pass.
//!
//! The lock is a convenience switch for a shared screen. The secret sits in
//! plain text in the configuration and anyone able to run the binary can
//! read it.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::assign::{assign, unassign, AssignError, Assignment, Release};
use crate::board::color::Color;
use crate::board::country::CountryId;
use crate::board::state::MapState;
use crate::config::{ConfigError, SessionConfig};
use crate::protocol::svg::{extract_regions, MapError, SkipReason, SkippedRegion};
use crate::render::{self, FillTable, Painter};

/// Which operation a region click triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    NoneSelected,
    EditingCountry(CountryId),
    RemovingTerritories,
}

/// Rejected actions. The `Display` text is what the status line shows.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Edits are locked. Enter the password to unlock.")]
    Locked,

    #[error("Enter a password to unlock edits.")]
    EmptyCredential,

    #[error("Incorrect password.")]
    IncorrectCredential,

    #[error("Pick a country (or Remove Territories) first.")]
    NoModeSelected,

    #[error("Select a valid country first (no country {0}).")]
    UnknownCountry(CountryId),

    #[error("Cannot update map: {0}.")]
    Assign(#[from] AssignError),

    #[error("Map already loaded.")]
    MapAlreadyLoaded,

    #[error("Failed to load map SVG: {0}.")]
    MapLoad(#[from] MapError),
}

/// What an accepted click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Assigned(Assignment),
    Unassigned(Release),
}

/// Result of a successful map load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRegion>,
}

/// One user's editing session over one map.
pub struct Session<P: Painter = FillTable> {
    state: MapState,
    mode: Mode,
    unlocked: bool,
    map_loaded: bool,
    secret: String,
    neutral: Color,
    region_group_class: Option<String>,
    status: String,
    painter: P,
}

impl Session<FillTable> {
    /// Creates a locked session with no map, painting into a `FillTable`.
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        Session::with_painter(config, FillTable::new())
    }
}

impl<P: Painter> Session<P> {
    /// Creates a locked session with no map, painting into `painter`.
    pub fn with_painter(config: &SessionConfig, painter: P) -> Result<Self, ConfigError> {
        let countries = config.country_registry()?;
        Ok(Session {
            state: MapState::new(countries),
            mode: Mode::NoneSelected,
            unlocked: false,
            map_loaded: false,
            secret: config.secret.clone(),
            neutral: config.neutral_color.clone(),
            region_group_class: config.region_group_class.clone(),
            status: String::new(),
            painter,
        })
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Edit controls (country selectors, remove, region clicks) are live only while unlocked.
    pub fn controls_enabled(&self) -> bool {
        self.unlocked
    }

    /// Lock indicator text.
    pub fn lock_label(&self) -> &'static str {
        if self.unlocked {
            "Unlocked"
        } else {
            "Locked"
        }
    }

    /// The outcome of the last action.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn neutral_color(&self) -> &Color {
        &self.neutral
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// Populates provinces from an SVG document and paints the initial (all-neutral) map.
    pub fn load_map(&mut self, doc: &str) -> Result<LoadReport, SessionError> {
        let result = self.try_load(doc);
        self.finish(result, describe_load)
    }

    /// Reads the map asset at `path` and loads it. A read failure leaves the session without provinces.
    pub fn load_map_file(&mut self, path: &Path) -> Result<LoadReport, SessionError> {
        let result = fs::read_to_string(path)
            .map_err(|source| {
                SessionError::from(MapError::Read {
                    path: path.display().to_string(),
                    source,
                })
            })
            .and_then(|doc| self.try_load(&doc));
        self.finish(result, describe_load)
    }

    /// Unlocks editing if the trimmed credential matches the configured secret exactly.
    pub fn unlock(&mut self, credential: &str) -> Result<(), SessionError> {
        let credential = credential.trim();
        let result = if credential.is_empty() {
            Err(SessionError::EmptyCredential)
        } else if credential == self.secret {
            self.unlocked = true;
            info!("edits unlocked");
            Ok(())
        } else {
            Err(SessionError::IncorrectCredential)
        };
        self.finish(result, |_, _| String::from("Edits unlocked."))
    }

    /// Locks editing and clears the mode. Always succeeds.
    pub fn lock(&mut self) {
        self.unlocked = false;
        self.mode = Mode::NoneSelected;
        info!("edits locked");
        self.status = String::from("Edits locked.");
    }

    /// Switches to editing mode for `country`.
    pub fn select_country(&mut self, country: CountryId) -> Result<(), SessionError> {
        let result = self.ensure_unlocked().and_then(|()| {
            if self.state.countries.contains(country) {
                self.mode = Mode::EditingCountry(country);
                info!(%country, "editing country");
                Ok(())
            } else {
                Err(SessionError::UnknownCountry(country))
            }
        });
        self.finish(result, |s, _| match s.state.countries.get(country) {
            Some(c) => format!("Editing country {} ({})", country, c.name()),
            None => format!("Editing country {}", country),
        })
    }

    /// Switches to territory-removal mode.
    pub fn select_remove(&mut self) -> Result<(), SessionError> {
        let result = self.ensure_unlocked().map(|()| {
            self.mode = Mode::RemovingTerritories;
            info!("removing territories");
        });
        self.finish(result, |_, _| String::from("Removing territories"))
    }

    /// Handles a click on a region according to the current mode.
    pub fn click(&mut self, province: &str) -> Result<ClickOutcome, SessionError> {
        let result = self.dispatch_click(province);
        if result.is_ok() {
            self.repaint();
        }
        self.finish(result, |s, outcome| describe_click(s, province, *outcome))
    }

    fn dispatch_click(&mut self, province: &str) -> Result<ClickOutcome, SessionError> {
        self.ensure_unlocked()?;
        match self.mode {
            Mode::NoneSelected => Err(SessionError::NoModeSelected),
            Mode::EditingCountry(country) => {
                let outcome = assign(&mut self.state, province, country)?;
                Ok(ClickOutcome::Assigned(outcome))
            }
            Mode::RemovingTerritories => {
                let outcome = unassign(&mut self.state, province)?;
                Ok(ClickOutcome::Unassigned(outcome))
            }
        }
    }

    fn try_load(&mut self, doc: &str) -> Result<LoadReport, SessionError> {
        if self.map_loaded {
            return Err(SessionError::MapAlreadyLoaded);
        }
        let scan = extract_regions(doc, self.region_group_class.as_deref())?;
        for skip in &scan.skipped {
            match &skip.reason {
                SkipReason::NoIdentifier => {
                    warn!(offset = skip.offset, "skipping region without an identifier")
                }
                SkipReason::DuplicateId(id) => {
                    warn!(offset = skip.offset, id = %id, "skipping region with duplicate id")
                }
            }
        }
        for region in &scan.regions {
            self.state.provinces.insert(&region.id);
        }
        self.map_loaded = true;
        info!(
            provinces = scan.regions.len(),
            skipped = scan.skipped.len(),
            "map loaded"
        );
        self.repaint();
        Ok(LoadReport {
            loaded: scan.regions.len(),
            skipped: scan.skipped,
        })
    }

    fn ensure_unlocked(&self) -> Result<(), SessionError> {
        if self.unlocked {
            Ok(())
        } else {
            Err(SessionError::Locked)
        }
    }

    fn repaint(&mut self) {
        render::sync(&self.state, &self.neutral, &mut self.painter);
    }

    /// Records the status message for an action's result and passes the result through.
    fn finish<T>(
        &mut self,
        result: Result<T, SessionError>,
        describe: impl FnOnce(&Self, &T) -> String,
    ) -> Result<T, SessionError> {
        self.status = match &result {
            Ok(value) => describe(self, value),
            Err(e) => {
                warn!(error = %e, "action rejected");
                e.to_string()
            }
        };
        result
    }
}

fn describe_load<P: Painter>(_: &Session<P>, report: &LoadReport) -> String {
    if report.skipped.is_empty() {
        format!("Loaded {} provinces.", report.loaded)
    } else {
        format!(
            "Loaded {} provinces ({} elements skipped).",
            report.loaded,
            report.skipped.len()
        )
    }
}

fn describe_click<P: Painter>(session: &Session<P>, province: &str, outcome: ClickOutcome) -> String {
    let name = |id: CountryId| {
        session
            .state
            .countries
            .get(id)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| id.to_string())
    };
    match outcome {
        ClickOutcome::Assigned(Assignment::Unchanged { owner }) => {
            format!("{} already belongs to {}", province, name(owner))
        }
        ClickOutcome::Assigned(a) => format!("Set {} owner to {}", province, name(a.owner())),
        ClickOutcome::Unassigned(Release::Released { from }) => {
            format!("Removed {} from {}", province, name(from))
        }
        ClickOutcome::Unassigned(Release::AlreadyNeutral) => {
            format!("{} has no owner", province)
        }
    }
}
