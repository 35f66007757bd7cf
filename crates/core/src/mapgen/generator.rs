//! High-level dungeon generation orchestration over the pipeline stages.

use rand_chacha::rand_core::Rng;

use crate::config::DungeonConfig;
use crate::error::{ConfigError, GenerateError};
use crate::grid::Grid;

use super::gates::carve_gates;
use super::graph::CorridorGraph;
use super::layout::{draw_skeleton, place_rooms, stamp_rooms};
use super::model::{GeneratedDungeon, GenerationStats};
use super::partition::partition_panels;

#[derive(Clone, Debug)]
pub struct DungeonGenerator {
    config: DungeonConfig,
}

impl DungeonGenerator {
    pub fn new(config: DungeonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs every stage against one random stream. The same config and stream
    /// state always produce the same dungeon.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<GeneratedDungeon, GenerateError> {
        let config = &self.config;

        let bounds = partition_panels(config, config.panel_capacity(), rng);
        let panels = place_rooms(&bounds, config, rng);
        log::debug!(
            "partitioned {}x{} grid into {} panels",
            config.width,
            config.height,
            panels.len()
        );

        let mut grid = Grid::new(config.width, config.height);
        draw_skeleton(&mut grid, &panels);
        stamp_rooms(&mut grid, &panels);
        let gate_cells = carve_gates(&mut grid, &panels, config, rng);
        log::debug!("carved {gate_cells} gate cells");

        let mut graph = CorridorGraph::extract(&grid, config.node_capacity(panels.len()))?;
        let nodes_registered = graph.registered_count();
        let nodes_pruned = graph.prune_dead_ends(&mut grid);
        log::debug!("pruned {nodes_pruned} of {nodes_registered} corridor nodes");

        let loops = graph.eliminate_loops(&mut grid, rng);
        log::debug!(
            "eliminated {} loops in {} passes ({} nodes retired)",
            loops.eliminated,
            loops.passes,
            loops.nodes_removed
        );

        let stats = GenerationStats {
            panels: panels.len(),
            gate_cells,
            nodes_registered,
            nodes_pruned,
            loop_passes: loops.passes,
            loops_eliminated: loops.eliminated,
            nodes_removed_by_loops: loops.nodes_removed,
            live_nodes: graph.live_nodes().count(),
            live_edges: graph.edge_count(),
        };
        Ok(GeneratedDungeon { grid, panels, graph, stats })
    }
}
