//! Text renderings of a generated dungeon.

use clap::ValueEnum;
use dungeon::{Cell, GeneratedDungeon, GenerationStats, Grid, Pos, RoomId};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Plain portable bitmap: `1` for empty cells, `0` for walkable ones.
    Pbm,
    /// `#` empty, `.` corridor, one letter per room.
    Ascii,
    Json,
}

const ROOM_SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Serialize)]
struct RoomExport {
    id: u32,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct DungeonExport<'a> {
    width: usize,
    height: usize,
    seed: u64,
    fingerprint: String,
    rooms: Vec<RoomExport>,
    stats: &'a GenerationStats,
    rows: Vec<String>,
}

pub fn render(
    dungeon: &GeneratedDungeon,
    format: Format,
    seed: u64,
) -> serde_json::Result<String> {
    match format {
        Format::Pbm => Ok(to_pbm(&dungeon.grid)),
        Format::Ascii => Ok(ascii_rows(&dungeon.grid).into_iter().map(|row| row + "\n").collect()),
        Format::Json => to_json(dungeon, seed),
    }
}

pub fn to_pbm(grid: &Grid) -> String {
    let mut out = format!("P1\n{} {}\n", grid.width(), grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push(if grid.get(Pos::new(x, y)) == Cell::Empty { '1' } else { '0' });
        }
        out.push('\n');
    }
    out
}

pub fn room_symbol(id: RoomId) -> char {
    char::from(ROOM_SYMBOLS[id.0 as usize % ROOM_SYMBOLS.len()])
}

pub fn ascii_rows(grid: &Grid) -> Vec<String> {
    (0..grid.height())
        .map(|y| {
            (0..grid.width())
                .map(|x| match grid.get(Pos::new(x, y)) {
                    Cell::Empty => '#',
                    Cell::Corridor => '.',
                    Cell::Room(id) => room_symbol(id),
                })
                .collect()
        })
        .collect()
}

fn to_json(dungeon: &GeneratedDungeon, seed: u64) -> serde_json::Result<String> {
    let rooms = dungeon
        .panels
        .iter()
        .enumerate()
        .map(|(index, panel)| RoomExport {
            id: index as u32,
            x: panel.room.x,
            y: panel.room.y,
            width: panel.room.width,
            height: panel.room.height,
        })
        .collect();
    let export = DungeonExport {
        width: dungeon.grid.width(),
        height: dungeon.grid.height(),
        seed,
        fingerprint: format!("{:016x}", dungeon.fingerprint()),
        rooms,
        stats: &dungeon.stats,
        rows: ascii_rows(&dungeon.grid),
    };
    serde_json::to_string_pretty(&export)
}
