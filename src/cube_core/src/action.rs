use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    Axis, CubeError, CubeState, Face, RotationAmount,
    engine::{refocus_cube, rotate_face, rotate_internal_slice},
};

/// A single operation on a cube. This is the only way to change a cube, and
/// the vocabulary the notation compiler translates moves into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Spin one face and the ring of cells bordering it
    RotateFace { face: Face, turns: RotationAmount },
    /// Spin internal layers of an axis, leaving every face grid alone
    RotateSlice {
        axis: Axis,
        offset_index: usize,
        offset_size: usize,
        turns: RotationAmount,
    },
    /// Relabel the faces so that `focus_face` becomes Front
    RotateCube { focus_face: Face },
}

impl Action {
    /// Apply the action, checking the cube invariants before and after.
    ///
    /// # Errors
    ///
    /// `InvalidCubeState` if the input or output breaks an invariant, or any
    /// parameter error of the underlying operation.
    pub fn apply(&self, cube: &CubeState) -> Result<CubeState, CubeError> {
        cube.validate(None)?;

        let next = match *self {
            Action::RotateFace { face, turns } => rotate_face(cube, face, turns),
            Action::RotateSlice {
                axis,
                offset_index,
                offset_size,
                turns,
            } => rotate_internal_slice(cube, axis, offset_index, offset_size, turns)?,
            Action::RotateCube { focus_face } => refocus_cube(cube, focus_face),
        };

        next.validate(Some(cube.size()))?;

        Ok(next)
    }

    /// The action that undoes this one
    #[must_use]
    pub fn inverse(&self) -> Action {
        match *self {
            Action::RotateFace { face, turns } => Action::RotateFace {
                face,
                turns: turns.reversed(),
            },
            Action::RotateSlice {
                axis,
                offset_index,
                offset_size,
                turns,
            } => Action::RotateSlice {
                axis,
                offset_index,
                offset_size,
                turns: turns.reversed(),
            },
            Action::RotateCube { focus_face } => Action::RotateCube {
                focus_face: focus_face.restoring_focus(),
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::RotateFace { face, turns } => write!(f, "face {face} {turns:?}"),
            Action::RotateSlice {
                axis,
                offset_index,
                offset_size,
                turns,
            } => write!(
                f,
                "slice {axis:?} [{offset_index}, {}) {turns:?}",
                offset_index + offset_size
            ),
            Action::RotateCube { focus_face } => write!(f, "focus {focus_face}"),
        }
    }
}

/// Apply `actions` strictly in order. Stops at the first failure.
///
/// # Errors
///
/// The first error returned by `Action::apply`
pub fn apply_all<'a>(
    cube: &CubeState,
    actions: impl IntoIterator<Item = &'a Action>,
) -> Result<CubeState, CubeError> {
    let mut cube = cube.clone();

    for (i, action) in actions.into_iter().enumerate() {
        trace!("Applying action {i}: {action}");
        cube = action.apply(&cube)?;
    }

    Ok(cube)
}
