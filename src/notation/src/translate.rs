use cube_core::{Action, Edge, Face, RotationAmount};
use log::{debug, trace};
use thiserror::Error;

use crate::{
    algorithm::{Algorithm, Move, MoveKind},
    parsing::{ParseFailure, Rule},
    span::{Span, mk_error},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("The notation does not match: {}", .0.description)]
    NoMatch(#[from] ParseFailure),
    #[error(
        "`{span:?}` turns {depth} inner layers, a cube of size {size} allows at most {max}"
    )]
    DepthOutOfRange {
        span: Span,
        depth: usize,
        max: usize,
        size: usize,
    },
    #[error("`{span:?}` turns the internal layers, a cube of size 2 has none")]
    NoInternalLayers { span: Span },
}

impl CompileError {
    /// A pest style report pointing at the offending move
    pub fn diagnostic(&self) -> String {
        match self {
            CompileError::NoMatch(failure) => failure.rendered.clone(),
            CompileError::DepthOutOfRange { span, .. } | CompileError::NoInternalLayers { span } => {
                mk_error::<Rule>(self.to_string(), span).to_string()
            }
        }
    }
}

impl Algorithm {
    /// Resolve every move against a cube of side length `size`. Slices are
    /// addressed by absolute layer index, so the same algorithm compiles
    /// differently for different sizes.
    ///
    /// # Errors
    ///
    /// `DepthOutOfRange` if a wide move drags more layers than the cube has
    /// inside, or `NoInternalLayers` for a slice move on a cube of size 2.
    pub fn to_actions(&self, size: usize) -> Result<Vec<Action>, CompileError> {
        let mut actions = Vec::with_capacity(self.len());

        for mv in self.moves() {
            let start = actions.len();
            translate(**mv, mv.span(), size, &mut actions)?;
            trace!("Compiled `{:?}` into {:?}", mv.span(), &actions[start..]);
        }

        debug!(
            "Compiled {} moves into {} actions for size {size}",
            self.len(),
            actions.len()
        );

        Ok(actions)
    }
}

fn translate(
    mv: Move,
    span: &Span,
    size: usize,
    actions: &mut Vec<Action>,
) -> Result<(), CompileError> {
    let inner_layers = size.saturating_sub(2);
    let turns = mv.turns;

    match mv.kind {
        MoveKind::Face(face) => actions.push(Action::RotateFace { face, turns }),
        MoveKind::Wide { face, depth } => {
            if depth > inner_layers {
                return Err(CompileError::DepthOutOfRange {
                    span: span.clone(),
                    depth,
                    max: inner_layers,
                    size,
                });
            }

            let layer = face.layer();
            let offset_index = match layer.edge {
                Edge::First => 1,
                Edge::Last => size - 1 - depth,
            };

            actions.push(Action::RotateFace { face, turns });
            actions.push(Action::RotateSlice {
                axis: layer.axis,
                offset_index,
                offset_size: depth,
                turns: layer.axis_turns(turns),
            });
        }
        MoveKind::Slice(slice) => {
            if inner_layers == 0 {
                return Err(CompileError::NoInternalLayers { span: span.clone() });
            }

            actions.push(internal_layers(slice.follows(), size, turns));
        }
        MoveKind::Rotation(rotation) => {
            let face = rotation.follows();

            actions.push(Action::RotateFace { face, turns });
            if inner_layers > 0 {
                actions.push(internal_layers(face, size, turns));
            }
            actions.push(Action::RotateFace {
                face: face.opposite(),
                turns: turns.reversed(),
            });
        }
    }

    Ok(())
}

/// Every layer strictly between `face` and its opposite, turned like `face`
fn internal_layers(face: Face, size: usize, turns: RotationAmount) -> Action {
    let layer = face.layer();

    Action::RotateSlice {
        axis: layer.axis,
        offset_index: 1,
        offset_size: size - 2,
        turns: layer.axis_turns(turns),
    }
}
