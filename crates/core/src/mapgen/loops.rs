//! Bounded cycle search over corridor junctions and random edge removal.

use std::collections::VecDeque;

use rand_chacha::rand_core::Rng;
use serde::Serialize;
use slotmap::SecondaryMap;

use crate::grid::Grid;

use super::graph::{CorridorGraph, NodeId, NodeKind};
use super::random::random_below;

/// Deepest distance from the root that is still expanded. Cross nodes are
/// recorded up to one hop further, so a loop path has at most
/// `SEARCH_DEPTH + 2` hops.
pub const SEARCH_DEPTH: usize = 8;

/// Chain of nodes from a search root to a second gate of the same room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopPath {
    nodes: Vec<NodeId>,
}

impl LoopPath {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn root(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn goal(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.nodes.len() - 1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    pub passes: usize,
    pub eliminated: usize,
    pub nodes_removed: usize,
}

struct Visit {
    distance: usize,
    predecessor: Option<NodeId>,
}

impl CorridorGraph {
    /// Breadth-first search from a room gate through cross nodes only. A loop
    /// exists when another gate of the same room touches a reached cross node.
    pub fn find_loop(&self, root: NodeId) -> Option<LoopPath> {
        let root_kind = self.node(root)?.kind;
        if !matches!(root_kind, NodeKind::Room(_)) {
            return None;
        }

        let mut visits = SecondaryMap::new();
        visits.insert(root, Visit { distance: 0, predecessor: None });
        let mut open = VecDeque::from([root]);

        while let Some(current) = open.pop_front() {
            let distance = visits[current].distance;
            if distance > SEARCH_DEPTH {
                continue;
            }
            let Some(node) = self.node(current) else {
                continue;
            };
            for (_, next) in node.edges() {
                let is_cross = self.node(next).is_some_and(|n| n.kind == NodeKind::Cross);
                if !is_cross || visits.contains_key(next) {
                    continue;
                }
                visits.insert(next, Visit { distance: distance + 1, predecessor: Some(current) });
                open.push_back(next);
            }
        }

        let reached =
            |id: NodeId| visits.get(id).is_some_and(|visit| visit.predecessor.is_some());
        let (goal, via) = self
            .nodes()
            .filter(|&(id, node)| id != root && node.kind == root_kind)
            .find_map(|(id, node)| {
                let (_, via) = node.edges().find(|&(_, next)| reached(next))?;
                Some((id, via))
            })?;

        let mut nodes = vec![goal];
        let mut cursor = Some(via);
        while let Some(id) = cursor {
            nodes.push(id);
            cursor = visits.get(id).and_then(|visit| visit.predecessor);
        }
        nodes.reverse();
        Some(LoopPath { nodes })
    }

    /// Removes one random edge of every loop found, pass after pass, until a
    /// full pass over the pool finds none.
    pub fn eliminate_loops<R: Rng>(&mut self, grid: &mut Grid, rng: &mut R) -> LoopStats {
        let mut stats = LoopStats::default();
        loop {
            stats.passes += 1;
            let mut eliminated = 0;

            let roots: Vec<NodeId> = self.nodes().map(|(id, _)| id).collect();
            for root in roots {
                let Some(path) = self.find_loop(root) else {
                    continue;
                };
                let back = random_below(rng, path.hops());
                let index = path.hops() - back;
                let (near, far) = (path.nodes[index], path.nodes[index - 1]);
                log::trace!("cutting {near:?}-{far:?} on a {}-hop loop", path.hops());
                stats.nodes_removed += self.remove_edge(grid, near, far);
                eliminated += 1;
            }

            log::debug!("loop pass {} removed {eliminated} edges", stats.passes);
            stats.eliminated += eliminated;
            if eliminated == 0 {
                break;
            }
        }
        stats
    }
}
