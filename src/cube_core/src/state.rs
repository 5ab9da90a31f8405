use std::{fmt, ops::ControlFlow, sync::Arc};

use itertools::Itertools;

use crate::{CubeError, Face, InvariantViolation};

/// The value of a single cell: the identifier of the face whose color it
/// carried when the cube was solved.
pub type Cell = u8;

/// An immutable cube of side length `size`. Each face is a row-major grid of
/// `size * size` cells seen from outside the cube.
///
/// Faces are reference counted; operations copy only the faces they write,
/// so cloning a state and holding on to old states is cheap and an old state
/// never observes a later operation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    size: usize,
    faces: [Arc<Vec<Cell>>; 6],
}

/// A borrowed view of one face of a `CubeState`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FaceView<'a> {
    face: Face,
    size: usize,
    cells: &'a [Cell],
}

impl CubeState {
    /// Create a solved cube, with every face filled with its own value.
    ///
    /// # Errors
    ///
    /// If `size` is smaller than 2, or a face of that size cannot be addressed
    pub fn new_solved(size: usize) -> Result<CubeState, CubeError> {
        if size < 2 {
            return Err(InvariantViolation::TooSmall(size).into());
        }

        let cells = size
            .checked_mul(size)
            .ok_or(InvariantViolation::TooLarge(size))?;

        Ok(CubeState {
            size,
            faces: Face::ALL.map(|face| Arc::new(vec![face.value(); cells])),
        })
    }

    /// Create a cube from six row-major face grids in identifier order.
    ///
    /// # Errors
    ///
    /// If the grids break any of the cube invariants. See `InvariantViolation`.
    pub fn from_faces(faces: Vec<Vec<Cell>>) -> Result<CubeState, CubeError> {
        let size = check_invariants(&faces, None)?;

        let faces: [Vec<Cell>; 6] = faces
            .try_into()
            .map_err(|faces: Vec<Vec<Cell>>| InvariantViolation::WrongFaceCount(faces.len()))?;

        Ok(CubeState {
            size,
            faces: faces.map(Arc::new),
        })
    }

    /// The side length of the cube
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check every invariant of the state, and optionally its size.
    ///
    /// # Errors
    ///
    /// `CubeError::InvalidCubeState` naming the first broken invariant
    pub fn validate(&self, expected_size: Option<usize>) -> Result<(), CubeError> {
        let size = check_invariants(
            &self.faces.each_ref().map(|face| face.as_slice()),
            expected_size,
        )?;

        if size != self.size {
            return Err(InvariantViolation::UnexpectedSize {
                expected: self.size,
                actual: size,
            }
            .into());
        }

        Ok(())
    }

    pub fn face(&self, face: Face) -> FaceView<'_> {
        FaceView {
            face,
            size: self.size,
            cells: &self.faces[face.index()],
        }
    }

    /// # Errors
    ///
    /// `CubeError::IndexOutOfRange` if `row` or `col` is not in `[0, size)`
    pub fn cell_at(&self, face: Face, row: usize, col: usize) -> Result<Cell, CubeError> {
        self.face(face).cell(row, col)
    }

    /// Iterate over the faces in identifier order. The iterator is lazy and
    /// calling this again starts over.
    pub fn faces(&self) -> impl Iterator<Item = FaceView<'_>> + '_ {
        Face::ALL.into_iter().map(|face| self.face(face))
    }

    /// Visit the faces in identifier order until the visitor breaks. Returns
    /// `ControlFlow::Break` if the traversal was interrupted.
    pub fn for_each_face<B>(
        &self,
        mut visitor: impl FnMut(FaceView<'_>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        self.faces().try_for_each(|face| visitor(face))
    }

    /// How many times each value appears, indexed by `Face::index`
    pub fn value_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];

        for face in &self.faces {
            for &cell in face.iter() {
                if let Some(face) = Face::from_value(cell) {
                    counts[face.index()] += 1;
                }
            }
        }

        counts
    }

    /// Whether every face shows a single value. A refocused solved cube is
    /// still solved.
    pub fn is_solved(&self) -> bool {
        self.faces().all(|face| face.cells.iter().all_equal())
    }

    pub(crate) fn get(&self, face: Face, index: usize) -> Cell {
        self.faces[face.index()][index]
    }

    pub(crate) fn set(&mut self, face: Face, index: usize, value: Cell) {
        Arc::make_mut(&mut self.faces[face.index()])[index] = value;
    }

    pub(crate) fn face_handle(&self, face: Face) -> &Arc<Vec<Cell>> {
        &self.faces[face.index()]
    }

    pub(crate) fn replace_face(&mut self, face: Face, cells: Arc<Vec<Cell>>) {
        self.faces[face.index()] = cells;
    }
}

/// Returns the size implied by `faces` if every invariant holds
fn check_invariants<F: AsRef<[Cell]>>(
    faces: &[F],
    expected_size: Option<usize>,
) -> Result<usize, InvariantViolation> {
    if faces.len() != 6 {
        return Err(InvariantViolation::WrongFaceCount(faces.len()));
    }

    let first = faces[0].as_ref().len();
    let size = first.isqrt();

    if size * size != first {
        return Err(InvariantViolation::NotSquare {
            face: Face::Left,
            len: first,
        });
    }

    if size < 2 {
        return Err(InvariantViolation::TooSmall(size));
    }

    if let Some(expected) = expected_size {
        if expected != size {
            return Err(InvariantViolation::UnexpectedSize {
                expected,
                actual: size,
            });
        }
    }

    let mut counts = [0; 6];

    for (face, cells) in Face::ALL.into_iter().zip(faces) {
        let cells = cells.as_ref();

        if cells.len() != first {
            return Err(InvariantViolation::MismatchedFaceSize {
                face,
                expected: first,
                actual: cells.len(),
            });
        }

        for (index, &value) in cells.iter().enumerate() {
            let Some(value_face) = Face::from_value(value) else {
                return Err(InvariantViolation::CellOutOfRange { face, index, value });
            };

            counts[value_face.index()] += 1;
        }
    }

    for (face, actual) in Face::ALL.into_iter().zip(counts) {
        if actual != first {
            return Err(InvariantViolation::UnbalancedValues {
                value: face.value(),
                expected: first,
                actual,
            });
        }
    }

    Ok(size)
}

impl<'a> FaceView<'a> {
    pub fn face(&self) -> Face {
        self.face
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The raw row-major cells
    pub fn as_slice(&self) -> &'a [Cell] {
        self.cells
    }

    /// # Errors
    ///
    /// `CubeError::IndexOutOfRange` if `row` or `col` is not in `[0, size)`
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, CubeError> {
        if row >= self.size || col >= self.size {
            return Err(CubeError::IndexOutOfRange {
                row,
                col,
                size: self.size,
            });
        }

        Ok(self.cells[row * self.size + col])
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [Cell]> + 'a {
        self.cells.chunks_exact(self.size)
    }

    /// Iterate over `(row, col, value)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + 'a {
        let size = self.size;

        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &value)| (i / size, i % size, value))
    }

    /// Visit the cells in row-major order until the visitor breaks. Returns
    /// `ControlFlow::Break` if the traversal was interrupted.
    pub fn for_each_cell<B>(
        &self,
        mut visitor: impl FnMut(usize, usize, Cell) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        self.cells()
            .try_for_each(|(row, col, value)| visitor(row, col, value))
    }
}

impl fmt::Debug for FaceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.face, self.cells)
    }
}

impl fmt::Debug for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.faces()).finish()
    }
}

/// One block per face: the face name followed by its rows as digits
impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in self.faces().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }

            writeln!(f, "{}", face.face())?;

            for row in face.rows() {
                writeln!(f, "  {}", row.iter().join(" "))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;

    fn solved_faces(size: usize) -> Vec<Vec<Cell>> {
        Face::ALL
            .into_iter()
            .map(|face| vec![face.value(); size * size])
            .collect()
    }

    #[test]
    fn solved_cube_is_valid() {
        for size in 2..=9 {
            let cube = CubeState::new_solved(size).unwrap();
            assert_eq!(cube.size(), size);
            assert_eq!(cube.validate(Some(size)), Ok(()));
            assert!(cube.is_solved());
            assert_eq!(cube.value_counts(), [size * size; 6]);
        }
    }

    #[test]
    fn face_area_overflow_is_rejected() {
        for size in [1 << (usize::BITS / 2), usize::MAX] {
            assert_eq!(
                CubeState::new_solved(size),
                Err(CubeError::InvalidCubeState(InvariantViolation::TooLarge(size)))
            );
        }
    }

    #[test]
    fn too_small() {
        assert_eq!(
            CubeState::new_solved(1),
            Err(CubeError::InvalidCubeState(InvariantViolation::TooSmall(1)))
        );
    }

    #[test]
    fn from_faces_checks_every_invariant() {
        assert_eq!(
            CubeState::from_faces(solved_faces(3)[..5].to_vec()),
            Err(InvariantViolation::WrongFaceCount(5).into())
        );

        let mut faces = solved_faces(3);
        faces[0].pop();
        assert_eq!(
            CubeState::from_faces(faces),
            Err(InvariantViolation::NotSquare {
                face: Face::Left,
                len: 8
            }
            .into())
        );

        let mut faces = solved_faces(3);
        faces[2] = vec![3; 16];
        assert_eq!(
            CubeState::from_faces(faces),
            Err(InvariantViolation::MismatchedFaceSize {
                face: Face::Right,
                expected: 9,
                actual: 16
            }
            .into())
        );

        let mut faces = solved_faces(2);
        faces[4][3] = 7;
        assert_eq!(
            CubeState::from_faces(faces),
            Err(InvariantViolation::CellOutOfRange {
                face: Face::Top,
                index: 3,
                value: 7
            }
            .into())
        );

        let mut faces = solved_faces(2);
        faces[1][0] = 1;
        assert_eq!(
            CubeState::from_faces(faces),
            Err(InvariantViolation::UnbalancedValues {
                value: 1,
                expected: 4,
                actual: 5
            }
            .into())
        );

        let mut faces = solved_faces(3);
        faces[1].swap(0, 1);
        faces[1][0] = 5;
        faces[4][0] = 2;
        let cube = CubeState::from_faces(faces).unwrap();
        assert_eq!(cube.validate(Some(3)), Ok(()));
        assert_eq!(
            cube.validate(Some(4)),
            Err(InvariantViolation::UnexpectedSize {
                expected: 4,
                actual: 3
            }
            .into())
        );
    }

    #[test]
    fn cell_access() {
        let mut faces = solved_faces(3);
        faces[1][5] = 5;
        faces[4][0] = 2;
        let cube = CubeState::from_faces(faces).unwrap();

        assert_eq!(cube.cell_at(Face::Front, 1, 2), Ok(5));
        assert_eq!(cube.cell_at(Face::Top, 0, 0), Ok(2));
        assert_eq!(
            cube.cell_at(Face::Front, 3, 0),
            Err(CubeError::IndexOutOfRange {
                row: 3,
                col: 0,
                size: 3
            })
        );
        assert_eq!(
            cube.cell_at(Face::Front, 0, 3).unwrap_err().to_string(),
            "Cell (0, 3) is out of range, row and column must be in range [0, 3)"
        );
    }

    #[test]
    fn traversal_order_and_interruption() {
        let cube = CubeState::new_solved(2).unwrap();

        let order = cube.faces().map(|face| face.face()).collect::<Vec<_>>();
        assert_eq!(order, Face::ALL);
        // Restartable
        assert_eq!(cube.faces().count(), 6);

        let mut visited = vec![];
        let flow = cube.for_each_face(|face| {
            visited.push(face.face());
            if face.face() == Face::Right {
                ControlFlow::Break(face.face())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(Face::Right));
        assert_eq!(visited, [Face::Left, Face::Front, Face::Right]);

        let cells = cube.face(Face::Back).cells().collect::<Vec<_>>();
        assert_eq!(cells, [(0, 0, 4), (0, 1, 4), (1, 0, 4), (1, 1, 4)]);

        let mut seen = 0;
        let flow = cube.face(Face::Back).for_each_cell(|_, _, _| {
            seen += 1;
            ControlFlow::<()>::Continue(())
        });
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(seen, 4);
    }

    #[test]
    fn display_dumps_rows() {
        let cube = CubeState::new_solved(2).unwrap();
        let dump = cube.to_string();

        assert!(dump.starts_with("Left\n  1 1\n  1 1\n\nFront\n  2 2\n"));
        assert_eq!(dump.lines().count(), 6 * 4 - 1);
    }
}
