//! Error taxonomy for engine construction and cell access.

/// Errors raised by the engine and its seeds.
///
/// All of these indicate caller error rather than a transient condition,
/// so none of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Grid dimensions {rows}x{cols} are zero or too large")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("Seed grid is absent or empty")]
    NullSeed,
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Seed row {row} has {found} cells, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unexpected character {ch:?} on pattern line {line}")]
    InvalidPattern { line: usize, ch: char },
    #[error("Engine driver is no longer running")]
    DriverStopped,
}
