use crate::engine::{step, ActiveSet};
use crate::surface::Surface;
use crate::viewport::Viewport;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Control {
    Continue,
    Stop,
}

/// The wait between generations. Also the only place a run can be cancelled.
pub(crate) trait Pacer {
    fn pause(&mut self) -> Result<Control>;
}

/// Plain fixed delay, never cancels.
pub(crate) struct Sleeper {
    pub(crate) delay: Duration,
}

impl Pacer for Sleeper {
    fn pause(&mut self) -> Result<Control> {
        std::thread::sleep(self.delay);
        Ok(Control::Continue)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Extinct { generation: u64 },
    LimitReached { generation: u64 },
    Stopped { generation: u64 },
}

pub(crate) struct Simulation {
    active: ActiveSet,
    viewport: Viewport,
    generation: u64,
}

impl Simulation {
    pub(crate) fn new(active: ActiveSet, offset: u32) -> Self {
        let mut viewport = Viewport::new(offset);
        viewport.expand(&active);
        Self {
            active,
            viewport,
            generation: 0,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn population(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Draws the current generation. Returns `true` when it has no live cells.
    pub(crate) fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<bool> {
        self.viewport.expand(&self.active);
        self.viewport.render(&self.active, self.generation, surface)?;
        Ok(self.active.is_empty())
    }

    pub(crate) fn advance(&mut self) {
        let next = step(&self.active);
        debug!(
            generation = self.generation,
            before = self.active.len(),
            after = next.len(),
            "stepped"
        );
        self.active = next;
        self.generation += 1;
    }

    /// Runs until extinction, until generation `limit` has been drawn, or until the
    /// pacer stops it. Every frame but the last is followed by one pause.
    pub(crate) fn run<S, P>(
        &mut self,
        surface: &mut S,
        pacer: &mut P,
        limit: Option<u64>,
    ) -> Result<Outcome>
    where
        S: Surface + ?Sized,
        P: Pacer + ?Sized,
    {
        loop {
            if self.draw(surface)? {
                info!(generation = self.generation, "population extinct");
                return Ok(Outcome::Extinct {
                    generation: self.generation,
                });
            }
            if limit.is_some_and(|l| self.generation >= l) {
                return Ok(Outcome::LimitReached {
                    generation: self.generation,
                });
            }
            if pacer.pause()? == Control::Stop {
                return Ok(Outcome::Stopped {
                    generation: self.generation,
                });
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Coord;
    use crate::engine::active_set_from;
    use crate::surface::{Glyphs, TextSurface};

    struct NoWait;

    impl Pacer for NoWait {
        fn pause(&mut self) -> Result<Control> {
            Ok(Control::Continue)
        }
    }

    struct StopAfter(u32);

    impl Pacer for StopAfter {
        fn pause(&mut self) -> Result<Control> {
            if self.0 == 0 {
                return Ok(Control::Stop);
            }
            self.0 -= 1;
            Ok(Control::Continue)
        }
    }

    #[derive(Default)]
    struct Counting {
        pauses: usize,
    }

    impl Pacer for Counting {
        fn pause(&mut self) -> Result<Control> {
            self.pauses += 1;
            Ok(Control::Continue)
        }
    }

    fn set(coords: &[(i64, i64)]) -> ActiveSet {
        active_set_from(coords.iter().copied().map(Coord::from))
    }

    fn frames(text: &str) -> Vec<&str> {
        text.split("\n\n").filter(|f| !f.is_empty()).collect()
    }

    #[test]
    fn lone_cell_renders_twice_then_goes_extinct() {
        let mut sim = Simulation::new(set(&[(0, 0)]), 2);
        let mut surface = TextSurface::new(Vec::new(), Glyphs::default());
        let outcome = sim.run(&mut surface, &mut NoWait, None).unwrap();
        assert_eq!(outcome, Outcome::Extinct { generation: 1 });

        let text = String::from_utf8(surface.into_inner()).unwrap();
        let frames = frames(&text);
        assert_eq!(frames.len(), 2);
        assert!(frames[0].starts_with("generation 0  population 1"));
        assert!(frames[1].starts_with("generation 1  population 0"));
        // window is frozen for the extinct frame
        let body = |f: &str| f.lines().skip(1).map(str::len).collect::<Vec<_>>();
        assert_eq!(body(frames[0]), body(frames[1]));
        assert!(!frames[1].contains('O'));
    }

    #[test]
    fn block_runs_until_the_limit() {
        let mut sim = Simulation::new(set(&[(0, 0), (1, 0), (0, 1), (1, 1)]), 1);
        let mut surface = TextSurface::new(Vec::new(), Glyphs::default());
        let outcome = sim.run(&mut surface, &mut NoWait, Some(3)).unwrap();
        assert_eq!(outcome, Outcome::LimitReached { generation: 3 });
        assert_eq!(sim.population(), 4);

        let text = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(frames(&text).len(), 4);
    }

    #[test]
    fn pacer_can_stop_the_run() {
        let mut sim = Simulation::new(set(&[(1, 0), (1, 1), (1, 2)]), 1);
        let mut surface = TextSurface::new(Vec::new(), Glyphs::default());
        let outcome = sim.run(&mut surface, &mut StopAfter(2), None).unwrap();
        assert_eq!(outcome, Outcome::Stopped { generation: 2 });
        assert_eq!(sim.generation(), 2);

        let text = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(frames(&text).len(), 3);
    }

    #[test]
    fn every_frame_but_the_last_is_followed_by_a_pause() {
        let cases: [(&[(i64, i64)], Option<u64>); 3] = [
            (&[(0, 0), (1, 0), (0, 1), (1, 1)], Some(3)),
            (&[(0, 0)], None),
            (&[(1, 0), (1, 1), (1, 2)], Some(5)),
        ];
        for (cells, limit) in cases {
            let mut sim = Simulation::new(set(cells), 1);
            let mut surface = TextSurface::new(Vec::new(), Glyphs::default());
            let mut pacer = Counting::default();
            sim.run(&mut surface, &mut pacer, limit).unwrap();
            let text = String::from_utf8(surface.into_inner()).unwrap();
            assert_eq!(pacer.pauses, frames(&text).len() - 1, "limit {limit:?}");
        }
    }

    #[test]
    fn zero_limit_draws_only_the_seed() {
        let mut sim = Simulation::new(set(&[(1, 0), (1, 1), (1, 2)]), 1);
        let mut surface = TextSurface::new(Vec::new(), Glyphs::default());
        let mut pacer = Counting::default();
        let outcome = sim.run(&mut surface, &mut pacer, Some(0)).unwrap();
        assert_eq!(outcome, Outcome::LimitReached { generation: 0 });
        assert_eq!(pacer.pauses, 0);

        let text = String::from_utf8(surface.into_inner()).unwrap();
        let frames = frames(&text);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].starts_with("generation 0  population 3"));
    }

    #[test]
    fn viewport_follows_a_glider_without_shrinking() {
        let mut sim = Simulation::new(set(&[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]), 3);
        let mut surface = TextSurface::new(std::io::sink(), Glyphs::default());
        let start = *sim.viewport();
        sim.run(&mut surface, &mut NoWait, Some(40)).unwrap();
        let end = *sim.viewport();
        assert_eq!(end.top, start.top);
        assert_eq!(end.left, start.left);
        assert!(end.right >= start.right + 10);
        assert!(end.bottom >= start.bottom + 10);
    }
}
