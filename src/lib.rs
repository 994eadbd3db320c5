//! # grid_distance_map
//!
//! Weighted [Dijkstra maps](http://www.roguebasin.com/index.php/The_Incredible_Power_of_Dijkstra_Maps)
//! over 8-connected grids, for movement logic that follows distance gradients.
//!
//! Tile costs are not copied up front. A cost [Grid] is bound to a [TileSource], for instance a
//! scripting host's tile table, and reads each cell from it the first time the flood fill needs
//! it. The fill itself ([DijkstraMapper]) expands cells in order of accumulated cost using a
//! binary heap ([PriorityQueue]) that tolerates duplicate entries instead of supporting
//! decrease-key. Diagonal steps carry a small [DIAGONAL_PENALTY] so that straight paths are
//! preferred over zig-zagging ones of equal cost.
pub mod dijkstra;
pub mod error;
pub mod gradient;
pub mod grid;
pub mod queue;
pub mod source;

use log::debug;
use std::time::Instant;

pub use crate::dijkstra::{
    multi_source_distance_map, single_source_distance_map, DijkstraMapper, FloodStats,
};
pub use crate::error::{DistanceMapError, Result};
pub use crate::gradient::{downhill_path, downhill_step, uphill_step};
pub use crate::grid::{Grid, Neighbor};
pub use crate::queue::{PriorityQueue, QueueElement};
pub use crate::source::{FieldSelector, Tile, TileSource, TileTable, TileValue};

/// Extra cost of a diagonal step, small enough to only ever break ties.
pub const DIAGONAL_PENALTY: f64 = 0.001;
/// Cost of a tile whose cost field is `true`.
pub const IMPASSABLE_COST: f64 = 999999.0;
/// Largest supported width or height; coordinates are stored as [u16].
pub const MAX_DIMENSION: usize = u16::MAX as usize;
/// Tile field read by [dijkstra_map].
pub const DEFAULT_COST_FIELD: &str = "solid";
pub(crate) const INITIAL_QUEUE_CAPACITY: usize = 48;

/// Computes the distance from `(x, y)` to every tile of `tiles`, reading the cost of each tile from
/// its [DEFAULT_COST_FIELD] field (absent fields cost nothing). Tiles that cannot be reached for
/// less than `maxcost` hold `maxcost`. The result is indexed `[x - 1][y - 1]`.
pub fn dijkstra_map(
    tiles: &dyn TileSource,
    x: u16,
    y: u16,
    maxcost: f64,
) -> Result<Vec<Vec<Option<f64>>>> {
    let start = Instant::now();
    let mut cost = Grid::bound_to_source(tiles, FieldSelector::default(), 0.0)?;
    let dist = single_source_distance_map(&mut cost, x, y, maxcost)?;
    debug!("dijkstra_map done in {:?}", start.elapsed());
    Ok(dist.export())
}
