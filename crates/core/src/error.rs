//! Typed failures for configuration validation and generation.

use thiserror::Error;

use crate::mapgen::NodeKind;
use crate::types::{Pos, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("corridor_margin must be at least 1")]
    ZeroCorridorMargin,
    #[error("room_size_min must be at least 1")]
    ZeroRoomSize,
    #[error("room_size_max ({max}) is smaller than room_size_min ({min})")]
    InvertedRoomSizeRange { min: usize, max: usize },
    #[error(
        "panel_size_min ({panel_size_min}) must be at least room_size_min + 2 * corridor_margin + 1 ({required})"
    )]
    PanelTooSmall { panel_size_min: usize, required: usize },
    #[error("grid {width}x{height} is smaller than panel_size_min ({panel_size_min}) on some axis")]
    GridTooSmall { width: usize, height: usize, panel_size_min: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("corridor node pool exhausted (capacity {capacity})")]
    NodePoolExhausted { capacity: usize },
}

/// A generated dungeon that breaks one of the structural guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("walkable cells form more than one region")]
    Disconnected,
    #[error("room {id:?} has no cells on the grid")]
    MissingRoom { id: RoomId },
    #[error("room {id:?} reaches outside its panel")]
    RoomOutsidePanel { id: RoomId },
    #[error("rooms {first:?} and {second:?} overlap")]
    RoomsOverlap { first: RoomId, second: RoomId },
    #[error("two different rooms touch at {pos:?}")]
    RoomsTouch { pos: Pos },
    #[error("{kind:?} node at {pos:?} is left with {degree} edges")]
    UnderConnectedNode { pos: Pos, kind: NodeKind, degree: usize },
    #[error("loop through the gate at {pos:?} survived elimination")]
    LoopRemains { pos: Pos },
    #[error("re-running loop elimination removed {eliminated} more edges")]
    NotAtFixedPoint { eliminated: usize },
}
