use std::{fmt, ops::Add};

use serde::{Deserialize, Serialize};

/// One of the six faces of the cube. The discriminants are the values that
/// fill a solved face, and the ordering is the iteration order of a
/// `CubeState`.
///
/// The faces are laid out as a cross: Top above Front, Bottom below Front, and
/// Left, Front, Right, Back forming a horizontal band.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Face {
    Left = 1,
    Front = 2,
    Right = 3,
    Back = 4,
    Top = 5,
    Bottom = 6,
}

/// One of the three global rotation axes. Each axis cycles four faces and
/// leaves the remaining two alone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Which end of an axis a face sits on, expressed as a layer index of the
/// axis' reference face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Edge {
    First,
    Last,
}

/// How a face turn drives the layers of its axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceLayer {
    pub axis: Axis,
    pub edge: Edge,
    /// Whether a clockwise turn of the face is a negative turn of the axis
    pub reversed: bool,
}

/// An on-screen direction to drag a slice in, relative to the face in view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A number of clockwise quarter turns, normalized into `[0, 3]`.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum RotationAmount {
    #[default]
    None = 0,
    Clockwise = 1,
    Halfway = 2,
    CounterClockwise = 3,
}

impl Face {
    /// Every face in identifier order
    pub const ALL: [Face; 6] = {
        use Face::*;
        let v = [Left, Front, Right, Back, Top, Bottom];

        let mut i = 0;
        while i < v.len() {
            assert!(i + 1 == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The cell value that fills this face when the cube is solved
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Position of the face in a six element array
    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn from_value(value: u8) -> Option<Face> {
        match value {
            1..=6 => Some(Face::ALL[usize::from(value) - 1]),
            _ => None,
        }
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Left => Face::Right,
            Face::Front => Face::Back,
            Face::Right => Face::Left,
            Face::Back => Face::Front,
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
        }
    }

    /// The axis, edge and sign that a turn of this face drags its ring along.
    pub fn layer(self) -> FaceLayer {
        let (axis, edge, reversed) = match self {
            Face::Left => (Axis::Y, Edge::First, true),
            Face::Right => (Axis::Y, Edge::Last, false),
            Face::Front => (Axis::Z, Edge::Last, false),
            Face::Back => (Axis::Z, Edge::First, true),
            Face::Top => (Axis::X, Edge::First, false),
            Face::Bottom => (Axis::X, Edge::Last, true),
        };

        FaceLayer {
            axis,
            edge,
            reversed,
        }
    }

    /// The focus face that undoes a refocus onto `self`, i.e. where the
    /// previous Front ends up afterwards.
    pub fn restoring_focus(self) -> Face {
        match self {
            Face::Front | Face::Back => self,
            Face::Left | Face::Right | Face::Top | Face::Bottom => self.opposite(),
        }
    }

    /// Standard move notation letter
    pub fn letter(self) -> char {
        match self {
            Face::Left => 'L',
            Face::Front => 'F',
            Face::Right => 'R',
            Face::Back => 'B',
            Face::Top => 'U',
            Face::Bottom => 'D',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The four faces a turn of this axis moves cells between, in cycle
    /// order: each face takes its cells from the next one on a positive turn.
    pub fn cycled_faces(self) -> [Face; 4] {
        match self {
            Axis::X => [Face::Left, Face::Front, Face::Right, Face::Back],
            Axis::Y => [Face::Front, Face::Bottom, Face::Back, Face::Top],
            Axis::Z => [Face::Left, Face::Bottom, Face::Right, Face::Top],
        }
    }

    /// The two faces parallel to this axis' layers
    pub fn untouched_faces(self) -> [Face; 2] {
        match self {
            Axis::X => [Face::Top, Face::Bottom],
            Axis::Y => [Face::Left, Face::Right],
            Axis::Z => [Face::Front, Face::Back],
        }
    }
}

impl Edge {
    pub fn index(self, size: usize) -> usize {
        match self {
            Edge::First => 0,
            Edge::Last => size - 1,
        }
    }
}

impl FaceLayer {
    /// Converts a face turn into the turn of its axis
    pub fn axis_turns(self, turns: RotationAmount) -> RotationAmount {
        if self.reversed {
            turns.reversed()
        } else {
            turns
        }
    }
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

impl RotationAmount {
    /// A half turn is its own reverse; the name is kept for callers that
    /// spell out both directions.
    pub const HALFWAY_REVERSE: RotationAmount = RotationAmount::Halfway;

    /// Normalize any signed number of clockwise quarter turns
    pub fn from_quarter_turns(quarter_turns: i64) -> RotationAmount {
        match quarter_turns.rem_euclid(4) {
            0 => RotationAmount::None,
            1 => RotationAmount::Clockwise,
            2 => RotationAmount::Halfway,
            _ => RotationAmount::CounterClockwise,
        }
    }

    pub fn quarter_turns(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn reversed(self) -> RotationAmount {
        RotationAmount::from_quarter_turns(-i64::from(self as u8))
    }

    pub fn is_none(self) -> bool {
        self == RotationAmount::None
    }
}

impl Add for RotationAmount {
    type Output = RotationAmount;

    fn add(self, rhs: RotationAmount) -> RotationAmount {
        RotationAmount::from_quarter_turns(i64::from(self as u8) + i64::from(rhs as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_values_follow_identifier_order() {
        for (i, face) in Face::ALL.into_iter().enumerate() {
            assert_eq!(face.index(), i);
            assert_eq!(Face::from_value(face.value()), Some(face));
            assert_eq!(Face::from_letter(face.letter()), Some(face));
        }

        assert_eq!(Face::from_value(0), None);
        assert_eq!(Face::from_value(7), None);
        assert_eq!(Face::from_letter('Q'), None);
    }

    #[test]
    fn axes_partition_the_faces() {
        for axis in Axis::ALL {
            let mut faces = axis
                .cycled_faces()
                .into_iter()
                .chain(axis.untouched_faces())
                .collect::<Vec<_>>();
            faces.sort();
            assert_eq!(faces, Face::ALL);

            for face in axis.untouched_faces() {
                assert_eq!(face.layer().axis, axis);
            }
        }
    }

    #[test]
    fn opposite_faces_share_an_axis_on_different_edges() {
        for face in Face::ALL {
            let (a, b) = (face.layer(), face.opposite().layer());
            assert_eq!(a.axis, b.axis);
            assert_ne!(a.edge, b.edge);
            assert_ne!(a.reversed, b.reversed);
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn rotation_amounts_normalize() {
        assert_eq!(RotationAmount::from_quarter_turns(5), RotationAmount::Clockwise);
        assert_eq!(
            RotationAmount::from_quarter_turns(-1),
            RotationAmount::CounterClockwise
        );
        assert_eq!(RotationAmount::from_quarter_turns(-8), RotationAmount::None);
        assert_eq!(RotationAmount::HALFWAY_REVERSE, RotationAmount::Halfway);
        assert_eq!(RotationAmount::Halfway.reversed(), RotationAmount::Halfway);
        assert_eq!(
            RotationAmount::Clockwise.reversed(),
            RotationAmount::CounterClockwise
        );
        assert_eq!(
            RotationAmount::CounterClockwise + RotationAmount::Halfway,
            RotationAmount::Clockwise
        );
    }
}
