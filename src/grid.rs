use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;

use crate::error::{DistanceMapError, Result};
use crate::source::{check_dimensions, FieldSelector, TileSource, TileValue};
use crate::IMPASSABLE_COST;

/// The tile source a read-through [Grid] resolves its cells from.
#[derive(Clone)]
struct Binding<'s> {
    source: &'s dyn TileSource,
    selector: FieldSelector,
    default_value: f64,
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Binding")
            .field("selector", &self.selector)
            .field("default_value", &self.default_value)
            .finish_non_exhaustive()
    }
}

/// Turns a raw tile value into a cost: `true` is impassable, `false` costs 1, absent entries take
/// the default and numbers pass through.
pub fn resolve_tile_value(value: Option<TileValue>, default_value: f64) -> f64 {
    match value {
        Some(TileValue::Bool(true)) => IMPASSABLE_COST,
        Some(TileValue::Bool(false)) => 1.0,
        Some(TileValue::Number(n)) => n,
        None => default_value,
    }
}

/// A cell adjacent to another one, and whether the step to it is diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub x: u16,
    pub y: u16,
    pub diagonal: bool,
}

/// The cells of the 8-neighborhood of `(x, y)` that lie within `[1, width] x [1, height]`.
pub fn neighbors(width: usize, height: usize, x: u16, y: u16) -> impl Iterator<Item = Neighbor> {
    let (width, height) = (width as i32, height as i32);
    let center = Point::new(x as i32, y as i32);
    center
        .moore_neighborhood()
        .into_iter()
        .filter(move |p| p.x >= 1 && p.y >= 1 && p.x <= width && p.y <= height)
        .map(move |p| Neighbor {
            x: p.x as u16,
            y: p.y as u16,
            diagonal: p.x != center.x && p.y != center.y,
        })
}

/// A `width` by `height` grid of [f64] cells addressed from `(1, 1)` to `(width, height)`.
///
/// A grid is either self-contained, with every cell filled at construction, or bound to a
/// [TileSource], in which case every cell starts uncached and is looked up in the source the
/// first time it is [read](Grid::read). A resolved cell is never looked up again.
#[derive(Clone, Debug)]
pub struct Grid<'s> {
    width: usize,
    height: usize,
    cells: Vec<Option<f64>>,
    binding: Option<Binding<'s>>,
}

impl Grid<'static> {
    /// A self-contained grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Result<Grid<'static>> {
        check_dimensions(width, height)?;
        Ok(Grid {
            width,
            height,
            cells: vec![Some(value); width * height],
            binding: None,
        })
    }
}

impl<'s> Grid<'s> {
    /// A read-through grid over `source`. Cells are resolved lazily through `selector`, with
    /// `default_value` standing in for absent entries.
    pub fn bound_to(
        source: &'s dyn TileSource,
        selector: FieldSelector,
        width: usize,
        height: usize,
        default_value: f64,
    ) -> Result<Grid<'s>> {
        check_dimensions(width, height)?;
        Ok(Grid {
            width,
            height,
            cells: vec![None; width * height],
            binding: Some(Binding {
                source,
                selector,
                default_value,
            }),
        })
    }
    /// Like [bound_to](Grid::bound_to), sized after the source itself.
    pub fn bound_to_source(
        source: &'s dyn TileSource,
        selector: FieldSelector,
        default_value: f64,
    ) -> Result<Grid<'s>> {
        Grid::bound_to(
            source,
            selector,
            source.width(),
            source.height(),
            default_value,
        )
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x >= 1 && y >= 1 && x as usize <= self.width && y as usize <= self.height
    }
    /// The in-bounds cells of the 8-neighborhood of `(x, y)`.
    pub fn neighbors(&self, x: u16, y: u16) -> impl Iterator<Item = Neighbor> {
        neighbors(self.width, self.height, x, y)
    }
    fn index(&self, x: u16, y: u16) -> Result<usize> {
        if self.in_bounds(x, y) {
            Ok((x as usize - 1) + (y as usize - 1) * self.width)
        } else {
            Err(DistanceMapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Returns the value at `(x, y)`, resolving and caching it from the tile source on first access.
    pub fn read(&mut self, x: u16, y: u16) -> Result<f64> {
        let ix = self.index(x, y)?;
        if let Some(value) = self.cells[ix] {
            return Ok(value);
        }
        let binding = self
            .binding
            .as_ref()
            .ok_or(DistanceMapError::UnboundGridRead { x, y })?;
        let value = resolve_tile_value(
            binding.source.lookup(x, y, &binding.selector),
            binding.default_value,
        );
        self.cells[ix] = Some(value);
        Ok(value)
    }
    /// Overwrites the value at `(x, y)`, whether or not the grid is bound.
    pub fn write(&mut self, x: u16, y: u16, value: f64) -> Result<()> {
        let ix = self.index(x, y)?;
        self.cells[ix] = Some(value);
        Ok(())
    }
    /// The value at `(x, y)` if it is resolved, without consulting the tile source.
    pub fn cached(&self, x: u16, y: u16) -> Result<Option<f64>> {
        Ok(self.cells[self.index(x, y)?])
    }
    pub fn is_cached(&self, x: u16, y: u16) -> bool {
        matches!(self.cached(x, y), Ok(Some(_)))
    }

    /// Copies the grid out column by column: `export()[x - 1][y - 1]` holds the value at `(x, y)`,
    /// with [None] for cells that were never resolved.
    pub fn export(&self) -> Vec<Vec<Option<f64>>> {
        (0..self.width)
            .map(|xi| {
                (0..self.height)
                    .map(|yi| self.cells[xi + yi * self.width])
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line = row
                .iter()
                .map(|cell| match cell {
                    Some(v) => format!("{v}"),
                    None => "-".to_owned(),
                })
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
