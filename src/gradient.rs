//! Following a finished distance map downhill (towards the sources) or uphill (away from them).
//!
//! Only resolved cells are considered; a cell that was never written or read is skipped.
use crate::error::Result;
use crate::grid::Grid;

fn best_neighbor<F>(dist: &Grid, x: u16, y: u16, better: F) -> Result<Option<(u16, u16)>>
where
    F: Fn(f64, f64) -> bool,
{
    let Some(mut best_value) = dist.cached(x, y)? else {
        return Ok(None);
    };
    let mut best = None;
    for n in dist.neighbors(x, y) {
        if let Some(value) = dist.cached(n.x, n.y)? {
            if better(value, best_value) {
                best_value = value;
                best = Some((n.x, n.y));
            }
        }
    }
    Ok(best)
}

/// The neighbor of `(x, y)` with the lowest distance, if it is strictly lower than that of
/// `(x, y)` itself. Returns [None] at a local minimum such as a source.
pub fn downhill_step(dist: &Grid, x: u16, y: u16) -> Result<Option<(u16, u16)>> {
    best_neighbor(dist, x, y, |value, best| value < best)
}

/// The neighbor of `(x, y)` with the highest distance below `maxcost`, if it is strictly higher
/// than that of `(x, y)` itself. Used to flee from the sources of the map.
pub fn uphill_step(dist: &Grid, x: u16, y: u16, maxcost: f64) -> Result<Option<(u16, u16)>> {
    best_neighbor(dist, x, y, |value, best| value > best && value < maxcost)
}

/// Walks downhill from `(x, y)` for at most `max_steps` steps. The path starts with `(x, y)` and
/// ends at a local minimum unless the step limit is hit first.
pub fn downhill_path(dist: &Grid, x: u16, y: u16, max_steps: usize) -> Result<Vec<(u16, u16)>> {
    let mut path = vec![(x, y)];
    let mut current = (x, y);
    for _ in 0..max_steps {
        match downhill_step(dist, current.0, current.1)? {
            Some(next) => {
                path.push(next);
                current = next;
            }
            None => break,
        }
    }
    Ok(path)
}
