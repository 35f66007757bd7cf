//! Procedural dungeon generation split into one submodule per pipeline stage.

mod audit;
mod gates;
mod generator;
mod graph;
mod layout;
mod loops;
mod model;
mod partition;
mod random;

use rand_chacha::rand_core::Rng;

use crate::config::DungeonConfig;
use crate::error::GenerateError;
use crate::grid::Grid;

pub use audit::audit;
pub use generator::DungeonGenerator;
pub use graph::{CorridorGraph, Node, NodeId, NodeKind};
pub use layout::{Panel, Rect};
pub use loops::{LoopPath, LoopStats, SEARCH_DEPTH};
pub use model::{GeneratedDungeon, GenerationStats};
pub use random::seeded_rng;

pub fn generate_dungeon(
    config: DungeonConfig,
    seed: u64,
) -> Result<GeneratedDungeon, GenerateError> {
    DungeonGenerator::new(config)?.generate(&mut seeded_rng(seed))
}

/// Only the finished cell grid, drawn from a caller-seeded stream.
pub fn generate_grid<R: Rng>(config: DungeonConfig, rng: &mut R) -> Result<Grid, GenerateError> {
    Ok(DungeonGenerator::new(config)?.generate(rng)?.grid)
}

#[cfg(test)]
mod tests {
    use super::{DungeonConfig, DungeonGenerator, generate_grid, seeded_rng};

    #[test]
    fn generate_dungeon_matches_generator_output() {
        let config = DungeonConfig::default();
        let seed = 123_u64;

        let from_helper = super::generate_dungeon(config, seed).expect("helper");
        let from_generator = DungeonGenerator::new(config)
            .expect("valid")
            .generate(&mut seeded_rng(seed))
            .expect("generator");

        assert_eq!(from_helper.grid, from_generator.grid);
        assert_eq!(from_helper.stats, from_generator.stats);
    }

    #[test]
    fn generate_grid_returns_the_dungeon_grid() {
        let config = DungeonConfig::with_size(64, 40);
        let grid = generate_grid(config, &mut seeded_rng(9)).expect("grid");
        let dungeon = super::generate_dungeon(config, 9).expect("dungeon");
        assert_eq!(grid, dungeon.grid);
        assert_eq!((grid.width(), grid.height()), (64, 40));
    }
}
