//! Dijkstra flood fill producing distance maps.
//!
//! Costs are read from one [Grid] and distances accumulated in another. A cell can sit in the
//! queue several times with different costs; only the first pop that improves on the recorded
//! distance is expanded and later ones are dropped as stale.
use itertools::iproduct;
use log::{debug, trace, warn};
use std::time::Instant;

use crate::error::{DistanceMapError, Result};
use crate::grid::{neighbors, Grid};
use crate::queue::{PriorityQueue, QueueElement};
use crate::DIAGONAL_PENALTY;

/// Counters of a single flood fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloodStats {
    pub pushes: usize,
    pub pops: usize,
    pub stale: usize,
}

/// Computes distance maps over 8-connected grids. Moving onto a cell costs the value the cost grid
/// holds for it, plus [diagonal_penalty](DijkstraMapper::diagonal_penalty) for diagonal steps.
#[derive(Clone, Debug)]
pub struct DijkstraMapper {
    /// Added to every diagonal step so that straight paths win ties against zig-zagging ones.
    /// Keep it below the smallest difference between real path costs.
    pub diagonal_penalty: f64,
}

impl Default for DijkstraMapper {
    fn default() -> DijkstraMapper {
        DijkstraMapper {
            diagonal_penalty: DIAGONAL_PENALTY,
        }
    }
}

impl DijkstraMapper {
    pub fn new() -> DijkstraMapper {
        DijkstraMapper::default()
    }

    /// Computes the distance from `(x, y)` to every cell of `cost`. Cells that cannot be reached
    /// for less than `maxcost` are left at `maxcost`.
    pub fn single_source_distance_map(
        &self,
        cost: &mut Grid,
        x: u16,
        y: u16,
        maxcost: f64,
    ) -> Result<Grid<'static>> {
        let start = Instant::now();
        let mut dist = Grid::filled(cost.width(), cost.height(), maxcost)?;
        if !dist.in_bounds(x, y) {
            return Err(DistanceMapError::OutOfBounds {
                x,
                y,
                width: dist.width(),
                height: dist.height(),
            });
        }
        let mut pq = PriorityQueue::new();
        pq.push(QueueElement::new(0.0, x, y));
        let stats = self.flood(&mut pq, cost, &mut dist)?;
        debug!(
            "Distance map of {}x{} from ({}, {}) done in {:?}: {:?}",
            dist.width(),
            dist.height(),
            x,
            y,
            start.elapsed(),
            stats
        );
        Ok(dist)
    }

    /// Treats every cell of `dist` holding a finite value below `maxcost` as a source starting at
    /// that value and fills `dist` with the cheapest total over all sources, capped at `maxcost`.
    /// The grid is handed back on success.
    pub fn multi_source_distance_map<'d>(
        &self,
        cost: &mut Grid,
        mut dist: Grid<'d>,
        maxcost: f64,
    ) -> Result<Grid<'d>> {
        if cost.dimensions() != dist.dimensions() {
            return Err(DistanceMapError::DimensionMismatch {
                cost: cost.dimensions(),
                dist: dist.dimensions(),
            });
        }
        let start = Instant::now();
        let mut pq = PriorityQueue::new();
        // Sources are reset too, their value is committed when their entry pops
        for (y, x) in iproduct!(1..=dist.height() as u16, 1..=dist.width() as u16) {
            let value = dist.read(x, y)?;
            if value.is_finite() && value < maxcost {
                pq.push(QueueElement::new(value, x, y));
            }
            dist.write(x, y, maxcost)?;
        }
        let sources = pq.len();
        if sources == 0 {
            warn!("No cell below {} to start from, distance map is left at maxcost", maxcost);
        }
        let stats = self.flood(&mut pq, cost, &mut dist)?;
        debug!(
            "Distance map of {}x{} from {} sources done in {:?}: {:?}",
            dist.width(),
            dist.height(),
            sources,
            start.elapsed(),
            stats
        );
        Ok(dist)
    }

    fn flood(&self, pq: &mut PriorityQueue, cost: &mut Grid, dist: &mut Grid) -> Result<FloodStats> {
        let mut stats = FloodStats {
            pushes: pq.len(),
            ..FloodStats::default()
        };
        while !pq.is_empty() {
            let node = pq.pop()?;
            stats.pops += 1;
            if node.f >= dist.read(node.x, node.y)? {
                stats.stale += 1;
                continue;
            }
            dist.write(node.x, node.y, node.f)?;
            trace!("Settled ({}, {}) at {}", node.x, node.y, node.f);

            for n in neighbors(dist.width(), dist.height(), node.x, node.y) {
                let mut candidate = node.f + cost.read(n.x, n.y)?;
                if n.diagonal {
                    candidate += self.diagonal_penalty;
                }
                if candidate < dist.read(n.x, n.y)? {
                    pq.push(QueueElement::new(candidate, n.x, n.y));
                    stats.pushes += 1;
                }
            }
        }
        Ok(stats)
    }
}

/// [DijkstraMapper::single_source_distance_map] with the default diagonal penalty.
pub fn single_source_distance_map(
    cost: &mut Grid,
    x: u16,
    y: u16,
    maxcost: f64,
) -> Result<Grid<'static>> {
    DijkstraMapper::default().single_source_distance_map(cost, x, y, maxcost)
}

/// [DijkstraMapper::multi_source_distance_map] with the default diagonal penalty.
pub fn multi_source_distance_map<'d>(
    cost: &mut Grid,
    dist: Grid<'d>,
    maxcost: f64,
) -> Result<Grid<'d>> {
    DijkstraMapper::default().multi_source_distance_map(cost, dist, maxcost)
}
