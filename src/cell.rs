/// A point on the unbounded plane. `y` grows downwards when rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Coord {
    pub(crate) x: i64,
    pub(crate) y: i64,
}

impl Coord {
    pub(crate) const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub(crate) fn offset_by(self, dx: i64, dy: i64) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) position: Coord,
    pub(crate) is_active: bool,
    pub(crate) neighbor_count: u8,
}

impl Cell {
    pub(crate) fn active(position: Coord) -> Self {
        Self {
            position,
            is_active: true,
            neighbor_count: 0,
        }
    }

    pub(crate) fn candidate(position: Coord) -> Self {
        Self {
            position,
            is_active: false,
            neighbor_count: 0,
        }
    }

    /// Classic B3/S23.
    pub(crate) fn transition(&mut self) {
        self.is_active = match (self.is_active, self.neighbor_count) {
            (true, 2 | 3) => true,
            (true, _) => false,
            (false, 3) => true,
            (false, _) => false,
        };
    }
}
