//! Junction graph over the corridor network and its tombstoning node pool.

use std::collections::BTreeMap;

use slotmap::{SlotMap, new_key_type};

use crate::error::GenerateError;
use crate::grid::Grid;
use crate::types::{Cell, Direction, Pos, RoomId};

new_key_type! {
    pub struct NodeId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Corridor junction or dead end.
    Cross,
    /// Gate cell touching the given room.
    Room(RoomId),
    /// Deleted; the slot stays in the pool so pool order never changes.
    Unused,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub pos: Pos,
    edges: [Option<NodeId>; 4],
}

impl Node {
    fn new(kind: NodeKind, pos: Pos) -> Self {
        Self { kind, pos, edges: [None; 4] }
    }

    pub fn is_live(&self) -> bool {
        self.kind != NodeKind::Unused
    }

    pub fn edge(&self, direction: Direction) -> Option<NodeId> {
        self.edges[direction.slot()]
    }

    /// Occupied edge slots in slot order.
    pub fn edges(&self) -> impl Iterator<Item = (Direction, NodeId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.edge(direction).map(|id| (direction, id)))
    }

    pub fn degree(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    fn should_collapse(&self) -> bool {
        match self.kind {
            NodeKind::Cross => self.degree() < 2,
            NodeKind::Room(_) => self.degree() == 0,
            NodeKind::Unused => false,
        }
    }
}

/// Corridor cells strictly between two nodes, with the heading on arrival.
struct Run {
    cells: Vec<Pos>,
    end: Pos,
    arrival: Direction,
}

#[derive(Clone, Debug)]
pub struct CorridorGraph {
    nodes: SlotMap<NodeId, Node>,
    positions: BTreeMap<Pos, NodeId>,
}

impl CorridorGraph {
    /// Registers every dead end and junction in x-major raster order, then links
    /// each node to the nodes at the far end of its corridor runs.
    pub fn extract(grid: &Grid, capacity: usize) -> Result<Self, GenerateError> {
        let mut graph = Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            positions: BTreeMap::new(),
        };

        for (pos, cell) in grid.cells() {
            if cell != Cell::Corridor {
                continue;
            }
            let degree = grid.corridor_degree(pos);
            if matches!(degree, 0 | 2) {
                continue;
            }
            if graph.nodes.len() >= capacity {
                return Err(GenerateError::NodePoolExhausted { capacity });
            }
            let kind = classify(grid, pos, degree);
            let id = graph.nodes.insert(Node::new(kind, pos));
            graph.positions.insert(pos, id);
        }

        let ids: Vec<NodeId> = graph.nodes.keys().collect();
        for id in ids {
            graph.link_runs(grid, id);
        }

        log::debug!(
            "extracted {} corridor nodes and {} edges",
            graph.nodes.len(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Deletes cross nodes that lead nowhere, cascading through whatever they
    /// leave behind. Returns the number of nodes deleted.
    pub fn prune_dead_ends(&mut self, grid: &mut Grid) -> usize {
        let stubs: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.kind == NodeKind::Cross && node.should_collapse())
            .map(|(id, _)| id)
            .collect();

        let mut removed = 0;
        for id in stubs {
            removed += self.delete_node(grid, id);
        }
        removed
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Every registered node in pool order, tombstones included.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter()
    }

    pub fn live_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().filter(|(_, node)| node.is_live())
    }

    pub fn registered_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes.get(id).map_or(0, Node::degree)
    }

    /// Live node registered at `pos`, if any.
    pub fn node_at(&self, pos: Pos) -> Option<NodeId> {
        self.positions.get(&pos).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.live_nodes().map(|(_, node)| node.degree()).sum::<usize>() / 2
    }

    /// Removes one edge between `a` and `b`, erases its corridor run and
    /// collapses any endpoint left without purpose. Returns the number of nodes
    /// deleted by the cascade.
    pub(crate) fn remove_edge(&mut self, grid: &mut Grid, a: NodeId, b: NodeId) -> usize {
        let edge = self.nodes.get(a).and_then(|node| node.edges().find(|&(_, id)| id == b));
        let Some((direction, _)) = edge else {
            log::warn!("no edge between {a:?} and {b:?}");
            return 0;
        };
        self.unlink(grid, a, direction);
        self.collapse(grid, vec![a, b])
    }

    fn link_runs(&mut self, grid: &Grid, id: NodeId) {
        let start = self.nodes[id].pos;
        for direction in Direction::ALL {
            let positions = &self.positions;
            let Some(run) = trace_run(grid, start, direction, |pos| positions.contains_key(&pos))
            else {
                continue;
            };
            let far = self.positions[&run.end];
            self.nodes[id].edges[direction.slot()] = Some(far);
            self.nodes[far].edges[run.arrival.opposite().slot()] = Some(id);
        }
    }

    /// Clears the edge leaving `id` through `direction` on both endpoints and
    /// empties the run cells between them.
    fn unlink(&mut self, grid: &mut Grid, id: NodeId, direction: Direction) -> Option<NodeId> {
        let far = self.nodes[id].edges[direction.slot()].take()?;
        let start = self.nodes[id].pos;
        let target = self.nodes[far].pos;

        match trace_run(grid, start, direction, |pos| pos == target) {
            Some(run) => {
                for cell in run.cells {
                    grid.set(cell, Cell::Empty);
                }
                let back = &mut self.nodes[far].edges[run.arrival.opposite().slot()];
                if *back == Some(id) {
                    *back = None;
                }
            }
            None => {
                log::warn!("lost corridor run from {start:?} toward {target:?}");
                for slot in &mut self.nodes[far].edges {
                    if *slot == Some(id) {
                        *slot = None;
                        break;
                    }
                }
            }
        }
        Some(far)
    }

    fn delete_node(&mut self, grid: &mut Grid, id: NodeId) -> usize {
        self.collapse(grid, vec![id])
    }

    /// Worklist deletion: every candidate that should collapse loses its
    /// remaining edges and its cell, and its neighbours become candidates.
    fn collapse(&mut self, grid: &mut Grid, mut pending: Vec<NodeId>) -> usize {
        let mut removed = 0;
        while let Some(id) = pending.pop() {
            if !self.nodes.get(id).is_some_and(Node::should_collapse) {
                continue;
            }
            for direction in Direction::ALL {
                if let Some(far) = self.unlink(grid, id, direction)
                    && far != id
                {
                    pending.push(far);
                }
            }

            let node = &mut self.nodes[id];
            node.kind = NodeKind::Unused;
            grid.set(node.pos, Cell::Empty);
            self.positions.remove(&node.pos);
            removed += 1;
        }
        removed
    }
}

fn classify(grid: &Grid, pos: Pos, degree: usize) -> NodeKind {
    if degree != 1 || on_outer_edge(grid, pos) {
        return NodeKind::Cross;
    }
    Direction::ALL
        .into_iter()
        .find_map(|direction| grid.cell_at(pos.step(direction)).and_then(Cell::room_id))
        .map_or(NodeKind::Cross, NodeKind::Room)
}

/// Row 0 and column 0 are never carved, so the usable border starts at 1.
fn on_outer_edge(grid: &Grid, pos: Pos) -> bool {
    pos.x <= 1
        || pos.y <= 1
        || pos.x as usize == grid.width() - 1
        || pos.y as usize == grid.height() - 1
}

/// Follows the corridor leaving `start` through `direction` until `is_end`
/// accepts a cell. Interior cells have exactly two corridor neighbours, so the
/// walk keeps straight when it can and otherwise takes the only turn.
fn trace_run(
    grid: &Grid,
    start: Pos,
    direction: Direction,
    is_end: impl Fn(Pos) -> bool,
) -> Option<Run> {
    let mut heading = direction;
    let mut pos = start.step(heading);
    let mut cells = Vec::new();
    let step_limit = grid.width() * grid.height();

    while grid.is_corridor(pos) {
        if is_end(pos) {
            return Some(Run { cells, end: pos, arrival: heading });
        }
        if cells.len() >= step_limit {
            break;
        }
        cells.push(pos);
        heading = [heading, heading.turn_left(), heading.turn_right()]
            .into_iter()
            .find(|&next| grid.is_corridor(pos.step(next)))?;
        pos = pos.step(heading);
    }
    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::grid::grid_from_rows;

    /// Room 0 has gates on both sides joined by a corridor ring; room 1 hangs
    /// off the bottom of the ring.
    pub(crate) fn ring_around_room() -> Grid {
        grid_from_rows(&[
            "#############",
            "#############",
            "##.........##",
            "##.#######.##",
            "##.#00000#.##",
            "##..00000..##",
            "##.#00000#.##",
            "##.#######.##",
            "##.........##",
            "######.######",
            "####11111####",
            "####11111####",
            "#############",
        ])
    }

    fn id_at(graph: &CorridorGraph, x: usize, y: usize) -> NodeId {
        graph.node_at(Pos::new(x, y)).expect("node registered")
    }

    #[test]
    fn extraction_classifies_gates_and_junctions() {
        let graph = CorridorGraph::extract(&ring_around_room(), 64).expect("extract");
        let kinds: Vec<(Pos, NodeKind)> =
            graph.nodes().map(|(_, node)| (node.pos, node.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (Pos::new(2, 5), NodeKind::Cross),
                (Pos::new(3, 5), NodeKind::Room(RoomId(0))),
                (Pos::new(6, 8), NodeKind::Cross),
                (Pos::new(6, 9), NodeKind::Room(RoomId(1))),
                (Pos::new(9, 5), NodeKind::Room(RoomId(0))),
                (Pos::new(10, 5), NodeKind::Cross),
            ]
        );
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn runs_follow_turns_and_link_both_endpoints() {
        let graph = CorridorGraph::extract(&ring_around_room(), 64).expect("extract");
        let west = id_at(&graph, 2, 5);
        let east = id_at(&graph, 10, 5);
        let bottom = id_at(&graph, 6, 8);

        let west_node = graph.node(west).expect("live");
        assert_eq!(west_node.edge(Direction::North), Some(east));
        assert_eq!(west_node.edge(Direction::South), Some(bottom));
        assert_eq!(graph.node(east).expect("live").edge(Direction::North), Some(west));
        assert_eq!(graph.node(bottom).expect("live").edge(Direction::West), Some(west));
        assert_eq!(graph.degree(west), 3);
        assert_eq!(graph.degree(id_at(&graph, 6, 9)), 1);
    }

    #[test]
    fn removing_an_edge_erases_exactly_its_run() {
        let mut grid = ring_around_room();
        let mut graph = CorridorGraph::extract(&grid, 64).expect("extract");
        let west = id_at(&graph, 2, 5);
        let east = id_at(&graph, 10, 5);

        let walkable = grid.walkable_count();
        assert_eq!(graph.remove_edge(&mut grid, west, east), 0);

        assert_eq!(grid.walkable_count(), walkable - 13);
        assert_eq!(grid.get(Pos::new(6, 2)), Cell::Empty);
        assert_eq!(grid.get(Pos::new(2, 3)), Cell::Empty);
        assert_eq!(grid.get(Pos::new(10, 4)), Cell::Empty);
        assert_eq!(grid.get(Pos::new(2, 5)), Cell::Corridor);
        assert_eq!(graph.degree(west), 2);
        assert_eq!(graph.degree(east), 2);
        assert!(grid.is_single_region());
    }

    #[test]
    fn removing_a_gate_edge_retires_the_gate() {
        let mut grid = ring_around_room();
        let mut graph = CorridorGraph::extract(&grid, 64).expect("extract");
        let junction = id_at(&graph, 2, 5);
        let gate = id_at(&graph, 3, 5);

        assert_eq!(graph.remove_edge(&mut grid, gate, junction), 1);
        assert_eq!(graph.node(gate).map(|node| node.kind), Some(NodeKind::Unused));
        assert_eq!(graph.node_at(Pos::new(3, 5)), None);
        assert_eq!(grid.get(Pos::new(3, 5)), Cell::Empty);
        assert_eq!(graph.degree(junction), 2);
        assert_eq!(graph.nodes().count(), 6);
    }

    #[test]
    fn pruning_cascades_through_stubs() {
        let mut grid = grid_from_rows(&[
            "########", //
            "#.######", //
            "#.......", //
            "####.###", //
            "###000##", //
            "########",
        ]);
        let mut graph = CorridorGraph::extract(&grid, 16).expect("extract");
        let kinds: Vec<NodeKind> = graph.nodes().map(|(_, node)| node.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Cross, NodeKind::Cross, NodeKind::Room(RoomId(0)), NodeKind::Cross]
        );

        assert_eq!(graph.prune_dead_ends(&mut grid), 4);
        assert_eq!(graph.live_nodes().count(), 0);
        assert_eq!(grid.walkable_count(), 3);
        assert!(grid.is_single_region());
    }

    #[test]
    fn pruning_keeps_well_connected_junctions() {
        let mut grid = ring_around_room();
        let mut graph = CorridorGraph::extract(&grid, 64).expect("extract");
        assert_eq!(graph.prune_dead_ends(&mut grid), 0);
        assert_eq!(graph.live_nodes().count(), 6);
    }

    #[test]
    fn node_pool_exhaustion_is_reported() {
        let result = CorridorGraph::extract(&ring_around_room(), 3);
        assert_eq!(result.err(), Some(GenerateError::NodePoolExhausted { capacity: 3 }));
    }
}
