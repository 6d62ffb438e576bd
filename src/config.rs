use crate::surface::Glyphs;
use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, warn};

#[derive(Parser, Debug, Clone)]
#[command(name = "sparselife")]
#[command(about = "Conway's Game of Life on an unbounded plane, in the terminal", long_about = None)]
pub(crate) struct Args {
    /// File with the initial live cells, e.g. [(x1, y1), (x2, y2), ..., (xn, yn)]
    #[arg(short, long)]
    pub(crate) file: PathBuf,

    /// cells of padding kept around the population
    #[arg(long)]
    pub(crate) offset: Option<u32>,

    /// ms between generations
    #[arg(long)]
    pub(crate) delay_ms: Option<u64>,

    /// stop after N generations
    #[arg(long)]
    pub(crate) generations: Option<u64>,

    /// print plain text frames to stdout instead of drawing on the terminal
    #[arg(long, default_value_t = false)]
    pub(crate) headless: bool,

    /// disable colors
    #[arg(long, default_value_t = false)]
    pub(crate) no_color: bool,

    /// settings file (defaults to the platform config dir)
    #[arg(long)]
    pub(crate) settings: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) offset: u32,
    pub(crate) delay_ms: u64,
    pub(crate) enable_color: bool,
    pub(crate) alive_glyph: char,
    pub(crate) dead_glyph: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            offset: 5,
            delay_ms: 500,
            enable_color: true,
            alive_glyph: 'O',
            dead_glyph: '+',
        }
    }
}

pub(crate) fn default_settings_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("io", "sparselife", "sparselife")?;
    Some(proj.config_dir().join("settings.json"))
}

/// Missing file means defaults. A file that exists but does not parse is reported and ignored.
pub(crate) fn load_settings(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(s) => match serde_json::from_str::<Settings>(&s) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
                Settings::default()
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file");
            Settings::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read settings file");
            Settings::default()
        }
    }
}

/// Everything a run needs, after CLI flags have been layered over the settings file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) seed_path: PathBuf,
    pub(crate) offset: u32,
    pub(crate) delay: Duration,
    pub(crate) generations: Option<u64>,
    pub(crate) headless: bool,
    pub(crate) enable_color: bool,
    pub(crate) glyphs: Glyphs,
}

impl Config {
    pub(crate) fn resolve(args: Args, settings: Settings) -> Self {
        Self {
            seed_path: args.file,
            offset: args.offset.unwrap_or(settings.offset),
            delay: Duration::from_millis(args.delay_ms.unwrap_or(settings.delay_ms)),
            generations: args.generations,
            headless: args.headless,
            enable_color: settings.enable_color && !args.no_color,
            glyphs: Glyphs {
                alive: settings.alive_glyph,
                dead: settings.dead_glyph,
            },
        }
    }

    pub(crate) fn load(args: Args) -> Self {
        let settings = args
            .settings
            .clone()
            .or_else(default_settings_path)
            .map(|p| load_settings(&p))
            .unwrap_or_default();
        Self::resolve(args, settings)
    }
}
