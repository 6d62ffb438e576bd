use crate::cell::Coord;
use crate::engine::{active_set_from, ActiveSet};
use regex::Regex;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};
use thiserror::Error;
use tracing::{debug, warn};

pub(crate) const DEFAULT_SEED: &str = "[(7, 6), (7, 7), (7, 8), (6, 7), (5, 8)]";

#[derive(Debug, Error)]
pub(crate) enum SeedError {
    #[error("no valid (x, y) coordinates found in the initial state")]
    BadFormat,
    #[error("could not read initial state from {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn pair_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\((-?\d+),\s*(-?\d+)\)").expect("coordinate pattern is valid")
    })
}

/// Scans `text` for `(x, y)` pairs. Anything between pairs is ignored.
pub(crate) fn parse(text: &str) -> Result<ActiveSet, SeedError> {
    let mut coords = Vec::new();
    for caps in pair_pattern().captures_iter(text) {
        let (raw_x, raw_y) = (&caps[1], &caps[2]);
        match (raw_x.parse::<i64>(), raw_y.parse::<i64>()) {
            (Ok(x), Ok(y)) => coords.push(Coord::new(x, y)),
            (Err(e), _) | (_, Err(e)) => {
                warn!(pair = &caps[0], error = %e, "skipping unusable coordinate pair");
            }
        }
    }

    let active = active_set_from(coords);
    if active.is_empty() {
        return Err(SeedError::BadFormat);
    }
    debug!(cells = active.len(), "parsed initial state");
    Ok(active)
}

pub(crate) fn load(path: &Path) -> Result<ActiveSet, SeedError> {
    let text = fs::read_to_string(path).map_err(|source| SeedError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

pub(crate) fn default_active_set() -> ActiveSet {
    parse(DEFAULT_SEED).unwrap_or_default()
}

/// Loads `path`, substituting the default pattern on either failure kind.
pub(crate) fn load_or_default(path: &Path) -> ActiveSet {
    match load(path) {
        Ok(active) => active,
        Err(SeedError::BadFormat) => {
            warn!(
                path = %path.display(),
                "initial state has a bad format, using the default cell coordinates"
            );
            default_active_set()
        }
        Err(SeedError::SourceUnavailable { path, source }) => {
            warn!(
                path = %path.display(),
                error = %source,
                "could not find the initial state file, using the default cell coordinates"
            );
            default_active_set()
        }
    }
}
