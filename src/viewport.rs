use crate::cell::Coord;
use crate::engine::{bounds, ActiveSet};
use crate::surface::{FrameInfo, Surface};

/// Rendered window onto the plane. Bounds are inclusive and only ever move outwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Viewport {
    pub(crate) top: i64,
    pub(crate) right: i64,
    pub(crate) bottom: i64,
    pub(crate) left: i64,
    offset: i64,
}

impl Viewport {
    pub(crate) fn new(offset: u32) -> Self {
        let offset = i64::from(offset);
        Self {
            top: offset,
            right: offset,
            bottom: offset,
            left: offset,
            offset,
        }
    }

    /// Grows the window to cover `active` plus padding. An empty set leaves it frozen.
    pub(crate) fn expand(&mut self, active: &ActiveSet) {
        let Some((x_min, x_max, y_min, y_max)) = bounds(active) else {
            return;
        };
        self.top = self.top.min(y_min.saturating_sub(self.offset));
        self.bottom = self.bottom.max(y_max.saturating_add(self.offset));
        self.left = self.left.min(x_min.saturating_sub(self.offset));
        self.right = self.right.max(x_max.saturating_add(self.offset));
    }

    pub(crate) fn width(&self) -> u64 {
        self.right.abs_diff(self.left).saturating_add(1)
    }

    pub(crate) fn height(&self) -> u64 {
        self.bottom.abs_diff(self.top).saturating_add(1)
    }

    pub(crate) fn render<S: Surface + ?Sized>(
        &self,
        active: &ActiveSet,
        generation: u64,
        surface: &mut S,
    ) -> anyhow::Result<()> {
        surface.begin_frame(&FrameInfo {
            generation,
            population: active.len(),
            width: self.width(),
            height: self.height(),
        });
        for y in self.top..=self.bottom {
            for x in self.left..=self.right {
                if active.contains_key(&Coord::new(x, y)) {
                    surface.active();
                } else {
                    surface.dead();
                }
            }
            surface.end_row();
        }
        surface.end_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{active_set_from, step};
    use crate::surface::{Glyphs, TextSurface};

    fn set(coords: &[(i64, i64)]) -> ActiveSet {
        active_set_from(coords.iter().copied().map(Coord::from))
    }

    fn rendered_rows(vp: &Viewport, active: &ActiveSet) -> Vec<String> {
        let mut s = TextSurface::new(Vec::new(), Glyphs::default());
        vp.render(active, 0, &mut s).unwrap();
        let text = String::from_utf8(s.into_inner()).unwrap();
        text.lines()
            .skip(1)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn starts_as_a_single_cell_at_offset() {
        let vp = Viewport::new(5);
        assert_eq!((vp.top, vp.right, vp.bottom, vp.left), (5, 5, 5, 5));
        assert_eq!((vp.width(), vp.height()), (1, 1));
    }

    #[test]
    fn expand_pads_default_seed_by_offset() {
        let mut vp = Viewport::new(5);
        vp.expand(&set(&[(7, 6), (7, 7), (7, 8), (6, 7), (5, 8)]));
        assert_eq!(vp.top, 1);
        assert_eq!(vp.bottom, 13);
        assert_eq!(vp.left, 0);
        assert_eq!(vp.right, 12);
    }

    #[test]
    fn expand_with_empty_set_keeps_window() {
        let mut vp = Viewport::new(2);
        vp.expand(&set(&[(10, -3)]));
        let before = vp;
        vp.expand(&ActiveSet::new());
        assert_eq!(vp, before);
    }

    #[test]
    fn window_never_shrinks() {
        let mut vp = Viewport::new(1);
        let frames: [&[(i64, i64)]; 5] = [
            &[(0, 0)],
            &[(20, 20)],
            &[(3, 3)],
            &[(-15, 4), (2, -9)],
            &[],
        ];
        let mut prev = vp;
        for f in frames {
            vp.expand(&set(f));
            assert!(vp.top <= prev.top);
            assert!(vp.left <= prev.left);
            assert!(vp.bottom >= prev.bottom);
            assert!(vp.right >= prev.right);
            prev = vp;
        }
        assert_eq!((vp.top, vp.right, vp.bottom, vp.left), (-10, 21, 21, -16));
    }

    #[test]
    fn render_is_row_major_top_first() {
        let mut vp = Viewport::new(0);
        let active = set(&[(0, 0), (2, 1)]);
        vp.expand(&active);
        assert_eq!(rendered_rows(&vp, &active), vec!["O++", "++O"]);
    }

    #[test]
    fn extinct_frame_keeps_last_window() {
        let mut vp = Viewport::new(1);
        let lone = set(&[(4, 4)]);
        vp.expand(&lone);
        let alive = rendered_rows(&vp, &lone);

        let extinct = step(&lone);
        vp.expand(&extinct);
        let dead = rendered_rows(&vp, &extinct);

        assert_eq!(alive.len(), dead.len());
        for (a, d) in alive.iter().zip(&dead) {
            assert_eq!(a.chars().count(), d.chars().count());
            assert!(d.chars().all(|c| c == '+'));
        }
    }

    #[test]
    fn saturates_at_the_integer_edge() {
        let mut vp = Viewport::new(5);
        vp.expand(&set(&[(i64::MIN, i64::MAX)]));
        assert_eq!(vp.left, i64::MIN);
        assert_eq!(vp.bottom, i64::MAX);
    }
}
