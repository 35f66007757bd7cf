//! Cell-classification store shared by every generation stage.

use std::collections::{BTreeSet, VecDeque};
use std::hash::Hasher;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use crate::types::{Cell, Direction, Pos, RoomId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::Empty; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Panics when `pos` is outside the grid.
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Panics when `pos` is outside the grid.
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    pub fn cell_at(&self, pos: Pos) -> Option<Cell> {
        self.in_bounds(pos).then(|| self.cells[self.index(pos)])
    }

    pub fn is_corridor(&self, pos: Pos) -> bool {
        self.cell_at(pos) == Some(Cell::Corridor)
    }

    /// Number of 4-neighbours of `pos` that are corridor.
    pub fn corridor_degree(&self, pos: Pos) -> usize {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.is_corridor(pos.step(direction)))
            .count()
    }

    /// Every cell in x-major, y-minor order.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).map(move |y| {
                let pos = Pos::new(x, y);
                (pos, self.get(pos))
            })
        })
    }

    pub fn room_ids(&self) -> BTreeSet<RoomId> {
        self.cells.iter().filter_map(|cell| cell.room_id()).collect()
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_walkable()).count()
    }

    /// True when all non-empty cells form one 4-connected region.
    pub fn is_single_region(&self) -> bool {
        let Some(start) = self.cells().find(|(_, cell)| cell.is_walkable()).map(|(pos, _)| pos)
        else {
            return true;
        };

        let mut seen = vec![false; self.cells.len()];
        seen[self.index(start)] = true;
        let mut open = VecDeque::from([start]);
        let mut reached = 1_usize;
        while let Some(pos) = open.pop_front() {
            for direction in Direction::ALL {
                let next = pos.step(direction);
                if !self.cell_at(next).is_some_and(Cell::is_walkable) {
                    continue;
                }
                let idx = self.index(next);
                if seen[idx] {
                    continue;
                }
                seen[idx] = true;
                reached += 1;
                open.push_back(next);
            }
        }

        reached == self.walkable_count()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.cells.len() * 5);
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for cell in &self.cells {
            match cell {
                Cell::Empty => bytes.push(0),
                Cell::Corridor => bytes.push(1),
                Cell::Room(id) => {
                    bytes.push(2);
                    bytes.extend(id.0.to_le_bytes());
                }
            }
        }
        bytes
    }

    /// Stable hash of the grid contents, identical across runs and platforms.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(&self.canonical_bytes());
        hasher.finish()
    }

    fn index(&self, pos: Pos) -> usize {
        assert!(self.in_bounds(pos), "grid access out of bounds at {pos:?}");
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// Builds a grid from text rows: `#` empty, `.` corridor, digits are room ids.
#[cfg(test)]
pub(crate) fn grid_from_rows(rows: &[&str]) -> Grid {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.len());
    let mut grid = Grid::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, symbol) in row.chars().enumerate() {
            let cell = match symbol {
                '.' => Cell::Corridor,
                '#' => Cell::Empty,
                digit => Cell::Room(RoomId(digit.to_digit(10).expect("room digit"))),
            };
            grid.set(Pos::new(x, y), cell);
        }
    }
    grid
}
