use crate::cell::{Cell, Coord};
use std::collections::HashMap;

pub(crate) type ActiveSet = HashMap<Coord, Cell>;

const MOORE: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The 8 surrounding coordinates. Neighbours past the integer range are skipped.
pub(crate) fn neighbors(c: Coord) -> impl Iterator<Item = Coord> {
    MOORE.iter().filter_map(move |&(dx, dy)| c.offset_by(dx, dy))
}

pub(crate) fn active_set_from<I>(coords: I) -> ActiveSet
where
    I: IntoIterator<Item = Coord>,
{
    coords.into_iter().map(|c| (c, Cell::active(c))).collect()
}

/// Returns `(x_min, x_max, y_min, y_max)`, or `None` for an empty set.
pub(crate) fn bounds(active: &ActiveSet) -> Option<(i64, i64, i64, i64)> {
    let mut keys = active.keys();
    let first = keys.next()?;
    let init = (first.x, first.x, first.y, first.y);
    Some(keys.fold(init, |(x0, x1, y0, y1), c| {
        (x0.min(c.x), x1.max(c.x), y0.min(c.y), y1.max(c.y))
    }))
}

/// Advances one generation. `active` is only read; the result is a new map.
pub(crate) fn step(active: &ActiveSet) -> ActiveSet {
    // reset
    let mut current: ActiveSet = active
        .iter()
        .map(|(&pos, cell)| {
            (
                pos,
                Cell {
                    neighbor_count: 0,
                    ..*cell
                },
            )
        })
        .collect();
    let mut candidates: HashMap<Coord, Cell> = HashMap::new();

    // count live neighbours of active cells, collect dead neighbours as candidates
    for &pos in active.keys() {
        for n in neighbors(pos) {
            match current.get_mut(&n) {
                Some(neighbor) => neighbor.neighbor_count += 1,
                None => {
                    candidates.entry(n).or_insert_with(|| Cell::candidate(n));
                }
            }
        }
    }

    // candidates are only counted against the active set; no further discovery
    for (&pos, cand) in candidates.iter_mut() {
        cand.neighbor_count = neighbors(pos).filter(|n| active.contains_key(n)).count() as u8;
    }

    for cell in current.values_mut().chain(candidates.values_mut()) {
        cell.transition();
    }

    current.retain(|_, c| c.is_active);
    candidates.retain(|_, c| c.is_active);

    for (pos, born) in candidates {
        current.entry(pos).or_insert(born);
    }

    for cell in current.values_mut() {
        cell.neighbor_count = 0;
    }
    current
}
