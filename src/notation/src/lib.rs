//! Standard cube move notation: a pest grammar that matches text into an
//! `Algorithm`, and a translation of that algorithm into `cube_core` actions
//! for a cube of a given size.

#![warn(clippy::pedantic)]

mod algorithm;
mod parsing;
mod span;
mod translate;

use cube_core::Action;

pub use algorithm::{Algorithm, CubeRotation, Move, MoveKind, SliceMove};
pub use parsing::{ParseFailure, parse_algorithm};
pub use span::{Span, WithSpan};
pub use translate::CompileError;

/// Parse `text` and translate it for a cube of side length `size`.
///
/// # Errors
///
/// `CompileError::NoMatch` if the text is not valid notation, or a
/// translation error if a move does not fit the cube.
pub fn compile_notation(text: &str, size: usize) -> Result<Vec<Action>, CompileError> {
    parse_algorithm(text)?.to_actions(size)
}
