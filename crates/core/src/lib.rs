pub mod config;
pub mod error;
pub mod grid;
pub mod mapgen;
pub mod types;

pub use config::{DungeonConfig, NODES_PER_PANEL};
pub use error::{ConfigError, GenerateError, InvariantViolation};
pub use grid::Grid;
pub use mapgen::{
    CorridorGraph, DungeonGenerator, GeneratedDungeon, GenerationStats, LoopPath, LoopStats, Node,
    NodeId, NodeKind, Panel, Rect, SEARCH_DEPTH, audit, generate_dungeon, generate_grid,
    seeded_rng,
};
pub use types::*;
