//! Structural checks over a finished dungeon, shared by tests and the fuzz tool.

use crate::error::InvariantViolation;
use crate::types::{Cell, Direction, Pos};

use super::graph::NodeKind;
use super::layout::Panel;
use super::model::GeneratedDungeon;
use super::random::seeded_rng;

/// Verifies room placement and separation, connectivity, node degrees, the absence of
/// reachable loops and that elimination is already at its fixed point.
pub fn audit(dungeon: &GeneratedDungeon) -> Result<(), InvariantViolation> {
    let grid = &dungeon.grid;

    let room_ids = grid.room_ids();
    for index in 0..dungeon.panels.len() {
        let id = Panel::room_id(index);
        if !room_ids.contains(&id) {
            return Err(InvariantViolation::MissingRoom { id });
        }
    }

    for (index, panel) in dungeon.panels.iter().enumerate() {
        let room = panel.room;
        let corners = [Pos::new(room.x, room.y), Pos::new(room.right(), room.bottom())];
        if !corners.into_iter().all(|corner| panel.bounds.contains(corner)) {
            return Err(InvariantViolation::RoomOutsidePanel { id: Panel::room_id(index) });
        }
    }

    for (first, a) in dungeon.panels.iter().enumerate() {
        for (second, b) in dungeon.panels.iter().enumerate().skip(first + 1) {
            if a.room.intersects(&b.room) {
                return Err(InvariantViolation::RoomsOverlap {
                    first: Panel::room_id(first),
                    second: Panel::room_id(second),
                });
            }
        }
    }

    for (pos, cell) in grid.cells() {
        let Some(id) = cell.room_id() else {
            continue;
        };
        let touches_other = Direction::ALL.into_iter().any(|direction| {
            grid.cell_at(pos.step(direction))
                .and_then(Cell::room_id)
                .is_some_and(|other| other != id)
        });
        if touches_other {
            return Err(InvariantViolation::RoomsTouch { pos });
        }
    }

    if !grid.is_single_region() {
        return Err(InvariantViolation::Disconnected);
    }

    let graph = &dungeon.graph;
    for (id, node) in graph.live_nodes() {
        let degree = node.degree();
        let connected = match node.kind {
            NodeKind::Cross => degree >= 2,
            NodeKind::Room(_) => degree >= 1,
            NodeKind::Unused => true,
        };
        if !connected {
            return Err(InvariantViolation::UnderConnectedNode {
                pos: node.pos,
                kind: node.kind,
                degree,
            });
        }
        if graph.find_loop(id).is_some() {
            return Err(InvariantViolation::LoopRemains { pos: node.pos });
        }
    }

    let mut grid = grid.clone();
    let mut graph = graph.clone();
    let rerun = graph.eliminate_loops(&mut grid, &mut seeded_rng(0));
    if rerun.eliminated > 0 {
        return Err(InvariantViolation::NotAtFixedPoint { eliminated: rerun.eliminated });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DungeonConfig;
    use crate::mapgen::generate_dungeon;
    use crate::mapgen::graph::CorridorGraph;
    use crate::mapgen::graph::tests::ring_around_room;
    use crate::mapgen::model::GenerationStats;
    use crate::types::RoomId;

    #[test]
    fn generated_dungeons_pass() {
        for seed in [1_u64, 42, 777] {
            let dungeon = generate_dungeon(DungeonConfig::default(), seed).expect("generate");
            assert_eq!(audit(&dungeon), Ok(()), "seed {seed}");
        }
    }

    #[test]
    fn room_spilling_out_of_its_panel_is_reported() {
        let mut dungeon = generate_dungeon(DungeonConfig::default(), 9).expect("generate");
        let bounds = dungeon.panels[2].bounds;
        dungeon.panels[2].room.width = bounds.width + 1;
        assert_eq!(audit(&dungeon), Err(InvariantViolation::RoomOutsidePanel { id: RoomId(2) }));
    }

    #[test]
    fn overlapping_room_rects_are_reported() {
        let mut dungeon = generate_dungeon(DungeonConfig::default(), 9).expect("generate");
        assert!(dungeon.panels.len() >= 2);
        dungeon.panels[1] = dungeon.panels[0];
        assert_eq!(
            audit(&dungeon),
            Err(InvariantViolation::RoomsOverlap { first: RoomId(0), second: RoomId(1) })
        );
    }

    #[test]
    fn stray_corridor_cell_is_reported_as_disconnected() {
        let mut dungeon = generate_dungeon(DungeonConfig::default(), 5).expect("generate");
        dungeon.grid.set(Pos::new(0, 0), Cell::Corridor);
        assert_eq!(audit(&dungeon), Err(InvariantViolation::Disconnected));
    }

    #[test]
    fn uneliminated_ring_is_reported() {
        let grid = ring_around_room();
        let graph = CorridorGraph::extract(&grid, 64).expect("extract");
        let dungeon =
            GeneratedDungeon { grid, panels: Vec::new(), graph, stats: GenerationStats::default() };
        assert_eq!(audit(&dungeon), Err(InvariantViolation::LoopRemains { pos: Pos::new(3, 5) }));
    }
}
