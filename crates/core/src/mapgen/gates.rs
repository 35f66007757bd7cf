//! Gate corridors linking every room to the skeleton lattice.

use rand_chacha::rand_core::Rng;

use crate::config::DungeonConfig;
use crate::grid::Grid;
use crate::types::{Axis, Cell, Direction, Pos};

use super::layout::Panel;
use super::random::random_below;

/// Carves one gate per panel side that faces another panel, in the order
/// west, east, north, south.
pub(super) fn carve_gates<R: Rng>(
    grid: &mut Grid,
    panels: &[Panel],
    config: &DungeonConfig,
    rng: &mut R,
) -> usize {
    let mut carved_cells = 0;
    for panel in panels {
        for direction in [Direction::West, Direction::East, Direction::North, Direction::South] {
            if !has_neighbor(grid, panel, direction) {
                continue;
            }
            let start = gate_start(panel, direction, config, rng);
            carved_cells += walk_to_corridor(grid, start, direction);
        }
    }
    carved_cells
}

fn has_neighbor(grid: &Grid, panel: &Panel, direction: Direction) -> bool {
    let bounds = panel.bounds;
    match direction {
        Direction::West => bounds.x > 0,
        Direction::East => bounds.x + bounds.width < grid.width(),
        Direction::North => bounds.y > 0,
        Direction::South => bounds.y + bounds.height < grid.height(),
    }
}

/// First cell outside the room on the `direction` side.
fn gate_start<R: Rng>(
    panel: &Panel,
    direction: Direction,
    config: &DungeonConfig,
    rng: &mut R,
) -> Pos {
    let room = panel.room;
    let along = match direction {
        Direction::West | Direction::East => Axis::Y,
        Direction::North | Direction::South => Axis::X,
    };
    let offset = pick_gate_offset(
        room.origin(along),
        room.extent(along),
        config.wall_margin,
        config.corridor_margin,
        rng,
    );

    match direction {
        Direction::West => Pos::new(room.x - 1, offset),
        Direction::East => Pos::new(room.right() + 1, offset),
        Direction::North => Pos::new(offset, room.y - 1),
        Direction::South => Pos::new(offset, room.bottom() + 1),
    }
}

/// Chooses a coordinate on a room edge that is a multiple of `corridor_margin`
/// and at least `wall_margin` away from both corners. Narrow rooms relax the
/// corner margin first, then the alignment.
fn pick_gate_offset<R: Rng>(
    room_start: usize,
    room_extent: usize,
    wall_margin: usize,
    corridor_margin: usize,
    rng: &mut R,
) -> usize {
    let room_end = room_start + room_extent - 1;
    let inner = (wall_margin <= room_end)
        .then(|| (room_start + wall_margin, room_end - wall_margin))
        .filter(|(low, high)| low <= high);

    for (low, high) in inner.into_iter().chain([(room_start, room_end)]) {
        let first = low.div_ceil(corridor_margin) * corridor_margin;
        if first > high {
            continue;
        }
        let choices = (high - first) / corridor_margin + 1;
        return first + random_below(rng, choices) * corridor_margin;
    }
    room_start
}

/// Marks cells as corridor from `start` onward until an existing corridor or
/// the grid edge is reached. Returns the number of cells carved.
fn walk_to_corridor(grid: &mut Grid, start: Pos, direction: Direction) -> usize {
    let mut pos = start;
    let mut carved = 0;
    while grid.in_bounds(pos) && grid.get(pos) != Cell::Corridor {
        grid.set(pos, Cell::Corridor);
        carved += 1;
        pos = pos.step(direction);
    }
    carved
}
