//! Public data models for a finished dungeon and its generation counters.

use serde::Serialize;

use crate::grid::Grid;

use super::graph::CorridorGraph;
use super::layout::Panel;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub panels: usize,
    pub gate_cells: usize,
    pub nodes_registered: usize,
    pub nodes_pruned: usize,
    pub loop_passes: usize,
    pub loops_eliminated: usize,
    pub nodes_removed_by_loops: usize,
    pub live_nodes: usize,
    pub live_edges: usize,
}

#[derive(Clone, Debug)]
pub struct GeneratedDungeon {
    pub grid: Grid,
    /// Panels in creation order; a panel's index is the id of its room.
    pub panels: Vec<Panel>,
    pub graph: CorridorGraph,
    pub stats: GenerationStats,
}

impl GeneratedDungeon {
    pub fn fingerprint(&self) -> u64 {
        self.grid.fingerprint()
    }
}
