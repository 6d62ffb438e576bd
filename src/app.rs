use crate::config::{Args, Config};
use crate::input::{wait_for_key, KeyboardPacer};
use crate::render::Terminal;
use crate::seed::load_or_default;
use crate::sim::{Outcome, Simulation, Sleeper};
use crate::surface::TextSurface;
use anyhow::Result;
use clap::Parser;
use std::io;
use tracing::info;

pub(crate) fn run() -> Result<()> {
    let cfg = Config::load(Args::parse());
    let active = load_or_default(&cfg.seed_path);
    info!(
        cells = active.len(),
        offset = cfg.offset,
        delay_ms = cfg.delay.as_millis() as u64,
        "starting simulation"
    );

    let mut sim = Simulation::new(active, cfg.offset);
    if cfg.headless {
        run_headless(&mut sim, &cfg)
    } else {
        run_interactive(&mut sim, &cfg)
    }
}

fn run_headless(sim: &mut Simulation, cfg: &Config) -> Result<()> {
    let mut surface = TextSurface::new(io::stdout().lock(), cfg.glyphs);
    let mut pacer = Sleeper { delay: cfg.delay };
    let outcome = sim.run(&mut surface, &mut pacer, cfg.generations)?;
    log_finish(sim, outcome);
    Ok(())
}

fn run_interactive(sim: &mut Simulation, cfg: &Config) -> Result<()> {
    let mut term = Terminal::begin(cfg.glyphs, cfg.enable_color)?;
    let mut pacer = KeyboardPacer { delay: cfg.delay };
    let outcome = sim.run(&mut term, &mut pacer, cfg.generations)?;

    match outcome {
        Outcome::Extinct { generation } => {
            term.status(&format!(
                "population extinct at generation {generation}  [any key] exit"
            ))?;
            wait_for_key()?;
        }
        Outcome::LimitReached { generation } => {
            term.status(&format!(
                "stopped at generation {generation}, population {}  [any key] exit",
                sim.population()
            ))?;
            wait_for_key()?;
        }
        Outcome::Stopped { .. } => {}
    }

    term.end()?;
    log_finish(sim, outcome);
    Ok(())
}

fn log_finish(sim: &Simulation, outcome: Outcome) {
    let vp = sim.viewport();
    info!(
        ?outcome,
        generation = sim.generation(),
        population = sim.population(),
        width = vp.width(),
        height = vp.height(),
        "simulation finished"
    );
}
