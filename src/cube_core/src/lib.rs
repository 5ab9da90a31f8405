//! The cube model and the geometry of turning it.
//!
//! A `CubeState` is an immutable value; every operation returns a new state.
//! `Action` is the only way to change a cube, and `apply_action` is the single
//! entry point that checks the cube invariants around every change.

#![warn(clippy::pedantic)]

mod action;
mod engine;
mod error;
mod face;
mod state;

pub use action::{Action, apply_all};
pub use engine::{refocus_cube, rotate_face, rotate_internal_slice, rotate_slice_from_face};
pub use error::{CubeError, InvariantViolation};
pub use face::{Axis, Direction, Edge, Face, FaceLayer, RotationAmount};
pub use state::{Cell, CubeState, FaceView};

/// Build a solved cube of side length `size`.
///
/// # Errors
///
/// If `size` is smaller than 2
pub fn create_solved_cube(size: usize) -> Result<CubeState, CubeError> {
    CubeState::new_solved(size)
}

/// Apply one action to a cube, returning the new state.
///
/// # Errors
///
/// See `Action::apply`
pub fn apply_action(cube: &CubeState, action: &Action) -> Result<CubeState, CubeError> {
    action.apply(cube)
}

pub fn cube_size(cube: &CubeState) -> usize {
    cube.size()
}

/// # Errors
///
/// `CubeError::IndexOutOfRange` if `row` or `col` is not in `[0, size)`
pub fn cell_at(cube: &CubeState, face: Face, row: usize, col: usize) -> Result<Cell, CubeError> {
    cube.cell_at(face, row, col)
}
