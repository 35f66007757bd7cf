//! Room placement inside panels and rasterization of skeleton lines and rooms.

use rand_chacha::rand_core::Rng;
use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::grid::Grid;
use crate::types::{Axis, Cell, Pos, RoomId};

use super::random::random_inclusive;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn origin(self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn extent(self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    pub(super) fn set_span(&mut self, axis: Axis, origin: usize, extent: usize) {
        match axis {
            Axis::X => {
                self.x = origin;
                self.width = extent;
            }
            Axis::Y => {
                self.y = origin;
                self.height = extent;
            }
        }
    }

    /// The axis with the larger extent; ties resolve to `X`.
    pub fn longer_axis(self) -> Axis {
        if self.width < self.height { Axis::Y } else { Axis::X }
    }

    pub fn longest_extent(self) -> usize {
        self.width.max(self.height)
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) >= self.x
            && (pos.x as usize) <= self.right()
            && (pos.y as usize) >= self.y
            && (pos.y as usize) <= self.bottom()
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }
}

/// A partition cell together with the room placed inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub bounds: Rect,
    pub room: Rect,
}

impl Panel {
    pub fn room_id(index: usize) -> RoomId {
        RoomId(index as u32)
    }
}

pub(super) fn place_rooms<R: Rng>(
    panel_bounds: &[Rect],
    config: &DungeonConfig,
    rng: &mut R,
) -> Vec<Panel> {
    panel_bounds
        .iter()
        .map(|&bounds| {
            let mut room = bounds;
            for axis in [Axis::X, Axis::Y] {
                let (origin, extent) =
                    place_room_span(bounds.origin(axis), bounds.extent(axis), config, rng);
                room.set_span(axis, origin, extent);
            }
            Panel { bounds, room }
        })
        .collect()
}

/// Picks a room span along one axis, keeping `corridor_margin` empty cells
/// between the room and both skeleton lines bounding the panel. The far side
/// gets the same gap as the near one rather than `corridor_margin + 1`, which
/// lets a room grow to `panel_extent - 2 * corridor_margin - 1` cells.
fn place_room_span<R: Rng>(
    panel_origin: usize,
    panel_extent: usize,
    config: &DungeonConfig,
    rng: &mut R,
) -> (usize, usize) {
    let margin = config.corridor_margin;
    let available = panel_extent - 2 * margin - 1;
    let size = random_inclusive(rng, config.room_size_min, config.room_size_max.min(available));
    let offset = random_inclusive(rng, margin + 1, panel_extent - margin - size);
    (panel_origin + offset, size)
}

/// Marks each panel's origin row and column as corridor, then clears row 0 and column 0.
pub(super) fn draw_skeleton(grid: &mut Grid, panels: &[Panel]) {
    for panel in panels {
        let bounds = panel.bounds;
        for x in bounds.x..=bounds.right() {
            grid.set(Pos::new(x, bounds.y), Cell::Corridor);
        }
        for y in bounds.y..=bounds.bottom() {
            grid.set(Pos::new(bounds.x, y), Cell::Corridor);
        }
    }

    for x in 0..grid.width() {
        grid.set(Pos::new(x, 0), Cell::Empty);
    }
    for y in 0..grid.height() {
        grid.set(Pos::new(0, y), Cell::Empty);
    }
}

pub(super) fn stamp_rooms(grid: &mut Grid, panels: &[Panel]) {
    for (index, panel) in panels.iter().enumerate() {
        let room = panel.room;
        for x in room.x..=room.right() {
            for y in room.y..=room.bottom() {
                grid.set(Pos::new(x, y), Cell::Room(Panel::room_id(index)));
            }
        }
    }
}
