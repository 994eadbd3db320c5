//! The tile data a cost [Grid](crate::grid::Grid) reads through to.
//!
//! A [TileSource] is any 1-indexed 2D collection of tiles that can answer point queries. The
//! crate only ever performs random-access reads on it, one per distinct cell at most.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;

use crate::error::{DistanceMapError, Result};
use crate::MAX_DIMENSION;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// The value of a tile, or of one field of a tile record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileValue {
    Bool(bool),
    Number(f64),
}

impl From<bool> for TileValue {
    fn from(b: bool) -> TileValue {
        TileValue::Bool(b)
    }
}

impl From<f64> for TileValue {
    fn from(n: f64) -> TileValue {
        TileValue::Number(n)
    }
}

/// Selects what part of a tile supplies the cost.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldSelector {
    /// The tile itself is the value.
    Whole,
    /// A named field of a tile record.
    Key(String),
}

impl FieldSelector {
    pub fn key(key: impl Into<String>) -> FieldSelector {
        FieldSelector::Key(key.into())
    }
}

impl Default for FieldSelector {
    fn default() -> FieldSelector {
        FieldSelector::Key(crate::DEFAULT_COST_FIELD.to_owned())
    }
}

/// Read access to externally owned tile data, addressed from `(1, 1)` to `(width, height)`.
pub trait TileSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Looks up the tile at `(x, y)` through `selector`. [None] means the entry is absent,
    /// which includes coordinates the source does not cover.
    fn lookup(&self, x: u16, y: u16, selector: &FieldSelector) -> Option<TileValue>;
}

impl<T: TileSource + ?Sized> TileSource for &T {
    fn width(&self) -> usize {
        (**self).width()
    }
    fn height(&self) -> usize {
        (**self).height()
    }
    fn lookup(&self, x: u16, y: u16, selector: &FieldSelector) -> Option<TileValue> {
        (**self).lookup(x, y, selector)
    }
}

/// A single entry of a [TileTable].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Tile {
    #[default]
    Empty,
    Value(TileValue),
    Record(FxIndexMap<String, TileValue>),
}

impl Tile {
    /// Builds a record tile from `(field, value)` pairs.
    pub fn record<K, V, I>(fields: I) -> Tile
    where
        K: Into<String>,
        V: Into<TileValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Tile::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
    fn select(&self, selector: &FieldSelector) -> Option<TileValue> {
        match (self, selector) {
            (Tile::Value(v), FieldSelector::Whole) => Some(*v),
            (Tile::Record(fields), FieldSelector::Key(key)) => fields.get(key).copied(),
            _ => None,
        }
    }
}

/// In-memory tile table stored column by column, the layout of a host's `tiles[x][y]` table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileTable {
    columns: Vec<Vec<Tile>>,
    height: usize,
}

impl TileTable {
    /// A table of `width` by `height` [Tile::Empty] tiles.
    pub fn new(width: usize, height: usize) -> Result<TileTable> {
        check_dimensions(width, height)?;
        Ok(TileTable {
            columns: vec![vec![Tile::Empty; height]; width],
            height,
        })
    }
    /// Builds a table from columns, `columns[x - 1][y - 1]` being the tile at `(x, y)`. The height
    /// is that of the first column; shorter columns read as absent past their end.
    pub fn from_columns(columns: Vec<Vec<Tile>>) -> Result<TileTable> {
        let height = columns.first().map_or(0, Vec::len);
        check_dimensions(columns.len(), height)?;
        Ok(TileTable { columns, height })
    }
    /// Builds a table of bare values from a row-major slice, as one would write a map by hand.
    pub fn from_rows<V: Into<TileValue> + Copy>(rows: &[Vec<V>]) -> Result<TileTable> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut table = TileTable::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, v) in row.iter().enumerate().take(width) {
                table.columns[x][y] = Tile::Value((*v).into());
            }
        }
        Ok(table)
    }
    pub fn get(&self, x: u16, y: u16) -> Option<&Tile> {
        let (x, y) = (x as usize, y as usize);
        if x == 0 || y == 0 {
            return None;
        }
        self.columns.get(x - 1)?.get(y - 1)
    }
    pub fn set(&mut self, x: u16, y: u16, tile: Tile) -> Result<()> {
        let (width, height) = (self.width(), self.height);
        let slot = (x as usize)
            .checked_sub(1)
            .zip((y as usize).checked_sub(1))
            .filter(|&(_, yi)| yi < height)
            .and_then(|(xi, yi)| {
                let column = self.columns.get_mut(xi)?;
                if column.len() <= yi {
                    column.resize(yi + 1, Tile::Empty);
                }
                column.get_mut(yi)
            })
            .ok_or(DistanceMapError::OutOfBounds {
                x,
                y,
                width,
                height,
            })?;
        *slot = tile;
        Ok(())
    }
}

impl TileSource for TileTable {
    fn width(&self) -> usize {
        self.columns.len()
    }
    fn height(&self) -> usize {
        self.height
    }
    fn lookup(&self, x: u16, y: u16, selector: &FieldSelector) -> Option<TileValue> {
        self.get(x, y)?.select(selector)
    }
}

pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        Err(DistanceMapError::DimensionOverflow { width, height })
    } else {
        Ok(())
    }
}
