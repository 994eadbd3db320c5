use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, DistanceMapError>;

/// Errors raised by the queue, the grids and the flood fill. None of these are transient:
/// they signal either malformed input or a logic error in the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceMapError {
    #[error("pop from empty queue")]
    EmptyQueuePop,

    /// An uncached cell was read on a grid without a tile source.
    #[error("cell ({x}, {y}) read on a grid without a tile source")]
    UnboundGridRead { x: u16, y: u16 },

    #[error("grids larger than {max}x{max} are unsupported (got {width}x{height})", max = crate::MAX_DIMENSION)]
    DimensionOverflow { width: usize, height: usize },

    #[error("cost grid is {}x{} but distance grid is {}x{}", .cost.0, .cost.1, .dist.0, .dist.1)]
    DimensionMismatch {
        cost: (usize, usize),
        dist: (usize, usize),
    },

    #[error("({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        x: u16,
        y: u16,
        width: usize,
        height: usize,
    },
}
