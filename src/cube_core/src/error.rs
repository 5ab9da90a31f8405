use thiserror::Error;

use crate::Face;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("Invalid cube state: {0}")]
    InvalidCubeState(#[from] InvariantViolation),
    #[error("Cell ({row}, {col}) is out of range, row and column must be in range [0, {size})")]
    IndexOutOfRange { row: usize, col: usize, size: usize },
    #[error("Slice offset {offset} must be in range [1, {max}]")]
    InvalidSliceRange { offset: usize, max: usize },
    #[error("Slice size {slice_size} at offset {offset} must be in range [1, {max_size}]")]
    InvalidSliceSize {
        offset: usize,
        slice_size: usize,
        max_size: usize,
    },
}

/// The invariant a cube state failed to uphold
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("expected 6 faces but got {0}")]
    WrongFaceCount(usize),
    #[error("face {face} has {len} cells, which is not a square number")]
    NotSquare { face: Face, len: usize },
    #[error("cube size must be at least 2 but got {0}")]
    TooSmall(usize),
    #[error("cube size {0} is too large, a face would have more than usize::MAX cells")]
    TooLarge(usize),
    #[error("face {face} has {actual} cells but every face must have {expected}")]
    MismatchedFaceSize {
        face: Face,
        expected: usize,
        actual: usize,
    },
    #[error("face {face} has the value {value} at index {index}, expected a value between 1 and 6")]
    CellOutOfRange { face: Face, index: usize, value: u8 },
    #[error("the value {value} appears {actual} times, expected {expected}")]
    UnbalancedValues {
        value: u8,
        expected: usize,
        actual: usize,
    },
    #[error("expected a cube of size {expected} but got {actual}")]
    UnexpectedSize { expected: usize, actual: usize },
}
