use std::fmt;

use cube_core::{Face, RotationAmount};
use itertools::Itertools;

use crate::span::WithSpan;

/// A middle layer turn, independent of the cube size
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SliceMove {
    M,
    E,
    S,
}

/// A reorientation of the whole cube
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CubeRotation {
    X,
    Y,
    Z,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// The outer layer of a face
    Face(Face),
    /// A face together with the `depth` internal layers behind it
    Wide { face: Face, depth: usize },
    Slice(SliceMove),
    Rotation(CubeRotation),
}

/// One parsed move, before it is resolved against a cube size
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub kind: MoveKind,
    pub turns: RotationAmount,
}

/// A sequence of moves matched by the notation grammar. This is the match
/// result of `parse_algorithm`; it does not depend on any cube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Algorithm {
    moves: Vec<WithSpan<Move>>,
}

impl SliceMove {
    pub const ALL: [SliceMove; 3] = [SliceMove::M, SliceMove::E, SliceMove::S];

    pub fn letter(self) -> char {
        match self {
            SliceMove::M => 'M',
            SliceMove::E => 'E',
            SliceMove::S => 'S',
        }
    }

    pub fn from_letter(letter: char) -> Option<SliceMove> {
        SliceMove::ALL
            .into_iter()
            .find(|slice| slice.letter() == letter)
    }

    /// The face whose turning direction the slice copies
    pub fn follows(self) -> Face {
        match self {
            SliceMove::M => Face::Left,
            SliceMove::E => Face::Bottom,
            SliceMove::S => Face::Front,
        }
    }
}

impl CubeRotation {
    pub const ALL: [CubeRotation; 3] = [CubeRotation::X, CubeRotation::Y, CubeRotation::Z];

    pub fn letter(self) -> char {
        match self {
            CubeRotation::X => 'x',
            CubeRotation::Y => 'y',
            CubeRotation::Z => 'z',
        }
    }

    /// Accepts either case
    pub fn from_letter(letter: char) -> Option<CubeRotation> {
        let letter = letter.to_ascii_lowercase();

        CubeRotation::ALL
            .into_iter()
            .find(|rotation| rotation.letter() == letter)
    }

    /// The face whose turning direction the whole cube copies
    pub fn follows(self) -> Face {
        match self {
            CubeRotation::X => Face::Right,
            CubeRotation::Y => Face::Top,
            CubeRotation::Z => Face::Front,
        }
    }
}

impl Move {
    #[must_use]
    pub fn inverse(self) -> Move {
        Move {
            kind: self.kind,
            turns: self.turns.reversed(),
        }
    }
}

impl Algorithm {
    pub(crate) fn new(moves: Vec<WithSpan<Move>>) -> Algorithm {
        Algorithm { moves }
    }

    pub fn moves(&self) -> &[WithSpan<Move>] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The algorithm that undoes this one. Moves keep the spans they were
    /// parsed from.
    #[must_use]
    pub fn inverse(&self) -> Algorithm {
        Algorithm {
            moves: self
                .moves
                .iter()
                .rev()
                .map(|mv| mv.clone().map(Move::inverse))
                .collect(),
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MoveKind::Face(face) => write!(f, "{}", face.letter()),
            MoveKind::Wide { face, depth: 1 } => write!(f, "{}w", face.letter()),
            MoveKind::Wide { face, depth } => write!(f, "{depth}{}w", face.letter()),
            MoveKind::Slice(slice) => write!(f, "{}", slice.letter()),
            MoveKind::Rotation(rotation) => write!(f, "{}", rotation.letter()),
        }
    }
}

/// A move that does not turn renders as nothing
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.turns {
            RotationAmount::None => Ok(()),
            RotationAmount::Clockwise => write!(f, "{}", self.kind),
            RotationAmount::Halfway => write!(f, "{}2", self.kind),
            RotationAmount::CounterClockwise => write!(f, "{}'", self.kind),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves = self
            .moves
            .iter()
            .filter(|mv| !mv.turns.is_none())
            .map(|mv| mv.value);

        write!(f, "{}", moves.format(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_algorithm;

    #[test]
    fn letters_round_trip() {
        for slice in SliceMove::ALL {
            assert_eq!(SliceMove::from_letter(slice.letter()), Some(slice));
        }

        for rotation in CubeRotation::ALL {
            assert_eq!(CubeRotation::from_letter(rotation.letter()), Some(rotation));
            assert_eq!(
                CubeRotation::from_letter(rotation.letter().to_ascii_uppercase()),
                Some(rotation)
            );
        }

        assert_eq!(SliceMove::from_letter('m'), None);
        assert_eq!(CubeRotation::from_letter('w'), None);
    }

    #[test_log::test]
    fn displays_canonical_notation() {
        let algorithm = parse_algorithm("  R   U' 2Rw2 R_1 f E2 X'\n").unwrap();

        assert_eq!(algorithm.to_string(), "R U' 2Rw2 Rw Fw E2 x'");
        assert_eq!(parse_algorithm(&algorithm.to_string()).unwrap(), algorithm);
    }

    #[test_log::test]
    fn inverse_reverses_order_and_turns() {
        let algorithm = parse_algorithm("R U2 3Fw' M").unwrap();
        let inverse = algorithm.inverse();

        assert_eq!(inverse.to_string(), "M' 3Fw U2 R'");
        assert_eq!(inverse.moves()[0].span().slice(), "M");
        assert_eq!(inverse.inverse(), algorithm);
    }
}
