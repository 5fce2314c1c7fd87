use crate::cover::Line;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("the cell `({row}, {col})` is out of range for a matrix of size {n}")]
    IndexOutOfRange { row: usize, col: usize, n: usize },
    #[error("the line {line:?} is out of range for a matrix of size {n}")]
    LineOutOfRange { line: Line, n: usize },
    #[error("row {row} has {len} entries but the matrix has {n} rows")]
    NonSquareInput { row: usize, len: usize, n: usize },
    #[error("a cost matrix must have at least one row")]
    EmptyMatrix,
    #[error("the cost at `({row}, {col})` is negative: {value}")]
    NegativeCost { row: usize, col: usize, value: i64 },
    #[error("invalid value range: {low} > {high}")]
    InvalidRange { low: i64, high: i64 },
    #[error("no complete assignment could be extracted; unassigned agents: {unassigned:?}")]
    IncompleteAssignment { unassigned: Vec<usize> },
    #[error("no assignment found within {limit} zero-creation passes")]
    ExcessiveIterations { limit: usize },
    #[error("every cell is covered; no zeros can be created")]
    NoUncoveredCells,
    #[error("integer overflow while adjusting costs")]
    Overflow,
}
