//! Face turns, slice turns and refocusing. Every operation takes a state by
//! reference and returns a new one; the input is never modified.
//!
//! Both a face spinning in place and a layer moving around an axis are built
//! from the same primitive: four cells that each take the value of the next
//! one, repeated once per quarter turn.

use std::{ops::Range, sync::Arc};

use log::trace;

use crate::{Axis, Cell, CubeError, CubeState, Direction, Face, RotationAmount};

/// The address of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sticker {
    face: Face,
    index: usize,
}

/// Each cell of `quad` takes the value of the cell after it, `turns` times.
fn cycle_four(cube: &mut CubeState, quad: [Sticker; 4], turns: RotationAmount) {
    let turns = turns.quarter_turns();
    if turns == 0 {
        return;
    }

    let values: [Cell; 4] = quad.map(|sticker| cube.get(sticker.face, sticker.index));

    for (i, sticker) in quad.into_iter().enumerate() {
        cube.set(sticker.face, sticker.index, values[(i + turns) % 4]);
    }
}

/// Rotate a face's own grid clockwise as seen from outside, one concentric
/// layer at a time. Neighboring faces are left alone.
fn spin_face(cube: &mut CubeState, face: Face, turns: RotationAmount) {
    let size = cube.size();
    let at = |row: usize, col: usize| Sticker {
        face,
        index: row * size + col,
    };

    for layer in 0..size / 2 {
        let last = size - 1 - layer;

        for i in 0..last - layer {
            // top <- left <- bottom <- right <- top
            cycle_four(
                cube,
                [
                    at(layer, layer + i),
                    at(last - i, layer),
                    at(last, last - i),
                    at(layer + i, last),
                ],
                turns,
            );
        }
    }
}

/// The four cells at position `k` along layer `layer` of `axis`, ordered like
/// `Axis::cycled_faces`.
///
/// X layers are rows of the band faces counted from Top. Y layers are columns
/// of Front counted from Left; Back is seen from the other side so it is point
/// mirrored. Z layers are columns of Left counted from Back; Right is point
/// mirrored and Top/Bottom are seen rotated a quarter turn.
fn ring(axis: Axis, layer: usize, k: usize, size: usize) -> [Sticker; 4] {
    let (j, m) = (layer, size - 1);

    let positions = match axis {
        Axis::X => [(j, k), (j, k), (j, k), (j, k)],
        Axis::Y => [(k, j), (k, j), (m - k, m - j), (k, j)],
        Axis::Z => [(k, j), (m - j, k), (m - k, m - j), (j, m - k)],
    };
    let faces = axis.cycled_faces();

    std::array::from_fn(|i| {
        let (row, col) = positions[i];
        Sticker {
            face: faces[i],
            index: row * size + col,
        }
    })
}

/// Move `layers` of `axis` around the four cycled faces with no bounds
/// checks. The two untouched faces are not spun.
fn turn_layers(cube: &mut CubeState, axis: Axis, layers: Range<usize>, turns: RotationAmount) {
    let size = cube.size();

    for layer in layers {
        for k in 0..size {
            cycle_four(cube, ring(axis, layer, k, size), turns);
        }
    }
}

/// Turn a face clockwise (as seen from outside) `turns` times, dragging the
/// bordering cells of the four neighboring faces along with it.
pub fn rotate_face(cube: &CubeState, face: Face, turns: RotationAmount) -> CubeState {
    trace!("Rotating face: face={face:?} turns={turns:?}");

    let mut next = cube.clone();
    spin_face(&mut next, face, turns);

    let layer = face.layer();
    let edge = layer.edge.index(cube.size());
    turn_layers(&mut next, layer.axis, edge..edge + 1, layer.axis_turns(turns));

    next
}

fn check_slice(size: usize, offset: usize, slice_size: usize) -> Result<(), CubeError> {
    let max = size - 2;

    if offset < 1 || offset > max {
        return Err(CubeError::InvalidSliceRange { offset, max });
    }

    let max_size = size - 1 - offset;

    if slice_size < 1 || slice_size > max_size {
        return Err(CubeError::InvalidSliceSize {
            offset,
            slice_size,
            max_size,
        });
    }

    Ok(())
}

/// Turn the internal layers `[offset, offset + slice_size)` of `axis`. The
/// outer layers belong to face turns and are rejected, so a 2x2x2 has no
/// valid internal slice.
///
/// # Errors
///
/// `InvalidSliceRange` if `offset` is not in `[1, size - 2]`, and
/// `InvalidSliceSize` if the slice would reach the last layer.
pub fn rotate_internal_slice(
    cube: &CubeState,
    axis: Axis,
    offset: usize,
    slice_size: usize,
    turns: RotationAmount,
) -> Result<CubeState, CubeError> {
    check_slice(cube.size(), offset, slice_size)?;

    trace!(
        "Rotating slice: axis={axis:?} offset={offset} slice_size={slice_size} turns={turns:?}"
    );

    let mut next = cube.clone();
    turn_layers(&mut next, axis, offset..offset + slice_size, turns);

    Ok(next)
}

/// How dragging a slice on a face maps onto an axis.
struct SliceMapping {
    axis: Axis,
    /// Whether the face counts its slices from the opposite end of the axis
    mirrored: bool,
    /// Whether dragging up (or left) is a negative turn of the axis
    reversed: bool,
}

fn slice_mapping(face: Face, vertical: bool) -> SliceMapping {
    let (axis, mirrored, reversed) = if vertical {
        match face {
            Face::Front | Face::Top | Face::Bottom => (Axis::Y, false, false),
            Face::Back => (Axis::Y, true, true),
            Face::Left => (Axis::Z, false, false),
            Face::Right => (Axis::Z, true, true),
        }
    } else {
        match face {
            Face::Left | Face::Front | Face::Right | Face::Back => (Axis::X, false, false),
            Face::Top => (Axis::Z, false, true),
            Face::Bottom => (Axis::Z, true, false),
        }
    };

    SliceMapping {
        axis,
        mirrored,
        reversed,
    }
}

/// Drag internal slices of the face in view. Up and Down move the columns
/// `[slice_index, slice_index + slice_size)` of `face`; Left and Right move
/// its rows.
///
/// # Errors
///
/// The same as `rotate_internal_slice`, with the bounds stated in the face's
/// own coordinates.
pub fn rotate_slice_from_face(
    cube: &CubeState,
    face: Face,
    direction: Direction,
    slice_index: usize,
    slice_size: usize,
    turns: RotationAmount,
) -> Result<CubeState, CubeError> {
    let size = cube.size();
    check_slice(size, slice_index, slice_size)?;

    let mapping = slice_mapping(face, direction.is_vertical());

    let offset = if mapping.mirrored {
        size - slice_index - slice_size
    } else {
        slice_index
    };

    let mut turns = match direction {
        Direction::Up | Direction::Left => turns,
        Direction::Down | Direction::Right => turns.reversed(),
    };
    if mapping.reversed {
        turns = turns.reversed();
    }

    rotate_internal_slice(cube, mapping.axis, offset, slice_size, turns)
}

/// For a refocus onto Top or Bottom: which face moves into each slot (in
/// identifier order) and how far it spins to match the new viewpoint.
fn vertical_refocus(focus: Face) -> [(Face, RotationAmount); 6] {
    use Face::*;
    use RotationAmount::{Clockwise as Cw, CounterClockwise as Ccw, Halfway, None as Keep};

    match focus {
        Top => [
            (Left, Cw),
            (Top, Keep),
            (Right, Ccw),
            (Bottom, Halfway),
            (Back, Halfway),
            (Front, Keep),
        ],
        Bottom => [
            (Left, Ccw),
            (Bottom, Keep),
            (Right, Cw),
            (Top, Halfway),
            (Front, Keep),
            (Back, Halfway),
        ],
        Left | Front | Right | Back => Face::ALL.map(|face| (face, Keep)),
    }
}

/// Relabel the faces so that `focus` becomes Front. The physical cube is
/// unchanged: only which face sits in which slot, and the orientation of
/// faces that are now seen from a different angle.
pub fn refocus_cube(cube: &CubeState, focus: Face) -> CubeState {
    trace!("Refocusing cube: focus={focus:?}");

    let mut next = cube.clone();

    match focus {
        Face::Front => {}
        Face::Left | Face::Right | Face::Back => {
            let (shift, spin) = match focus {
                Face::Right => (1, RotationAmount::Clockwise),
                Face::Back => (2, RotationAmount::Halfway),
                _ => (3, RotationAmount::CounterClockwise),
            };

            let band = Axis::X.cycled_faces();
            for (i, slot) in band.into_iter().enumerate() {
                let source = band[(i + shift) % 4];
                next.replace_face(slot, Arc::clone(cube.face_handle(source)));
            }

            spin_face(&mut next, Face::Top, spin);
            spin_face(&mut next, Face::Bottom, spin.reversed());
        }
        Face::Top | Face::Bottom => {
            for (slot, (source, spin)) in Face::ALL.into_iter().zip(vertical_refocus(focus)) {
                next.replace_face(slot, Arc::clone(cube.face_handle(source)));
                spin_face(&mut next, slot, spin);
            }
        }
    }

    next
}
