//! Generation parameters and their validity preconditions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound of graph nodes a single panel can contribute: four gate dead ends,
/// four gate/skeleton junctions and four skeleton junctions or line ends.
pub const NODES_PER_PANEL: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: usize,
    pub height: usize,
    pub panel_size_min: usize,
    pub room_size_min: usize,
    pub room_size_max: usize,
    pub corridor_margin: usize,
    pub wall_margin: usize,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 50,
            panel_size_min: 12,
            room_size_min: 5,
            room_size_max: 10,
            corridor_margin: 2,
            wall_margin: 1,
        }
    }
}

impl DungeonConfig {
    pub fn with_size(width: usize, height: usize) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corridor_margin == 0 {
            return Err(ConfigError::ZeroCorridorMargin);
        }
        if self.room_size_min == 0 {
            return Err(ConfigError::ZeroRoomSize);
        }
        if self.room_size_max < self.room_size_min {
            return Err(ConfigError::InvertedRoomSizeRange {
                min: self.room_size_min,
                max: self.room_size_max,
            });
        }

        let required = self.minimum_panel_size();
        if self.panel_size_min < required {
            return Err(ConfigError::PanelTooSmall {
                panel_size_min: self.panel_size_min,
                required,
            });
        }
        if self.width < self.panel_size_min || self.height < self.panel_size_min {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                panel_size_min: self.panel_size_min,
            });
        }
        Ok(())
    }

    /// Smallest panel extent that still fits a minimum room plus its corridor gaps.
    pub fn minimum_panel_size(&self) -> usize {
        self.room_size_min + 2 * self.corridor_margin + 1
    }

    /// Soft cap on the number of panels the partitioner may create.
    pub fn panel_capacity(&self) -> usize {
        let side = self.panel_size_min.saturating_sub(1).max(1);
        (self.width * self.height / (side * side)).max(1)
    }

    pub fn node_capacity(&self, panel_count: usize) -> usize {
        NODES_PER_PANEL * panel_count.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> DungeonConfig {
        DungeonConfig {
            width: 20,
            height: 20,
            panel_size_min: 6,
            room_size_min: 3,
            room_size_max: 5,
            corridor_margin: 1,
            wall_margin: 1,
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(DungeonConfig::default().validate(), Ok(()));
        assert_eq!(small().validate(), Ok(()));
    }

    #[test]
    fn panel_must_fit_room_and_corridor_gaps() {
        let config = DungeonConfig { panel_size_min: 5, ..small() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PanelTooSmall { panel_size_min: 5, required: 6 })
        );
    }

    #[test]
    fn rejects_degenerate_margins_and_ranges() {
        assert_eq!(
            DungeonConfig { corridor_margin: 0, ..small() }.validate(),
            Err(ConfigError::ZeroCorridorMargin)
        );
        assert_eq!(
            DungeonConfig { room_size_min: 0, ..small() }.validate(),
            Err(ConfigError::ZeroRoomSize)
        );
        assert_eq!(
            DungeonConfig { room_size_max: 2, ..small() }.validate(),
            Err(ConfigError::InvertedRoomSizeRange { min: 3, max: 2 })
        );
    }

    #[test]
    fn grid_must_hold_at_least_one_panel() {
        let config = DungeonConfig { width: 5, ..small() };
        assert!(matches!(config.validate(), Err(ConfigError::GridTooSmall { width: 5, .. })));
    }

    #[test]
    fn panel_capacity_follows_area_over_shrunk_panel_square() {
        assert_eq!(small().panel_capacity(), 400 / 25);
        assert_eq!(DungeonConfig::default().panel_capacity(), 5000 / 121);
    }

    #[test]
    fn partial_documents_fall_back_to_defaults() {
        let config: DungeonConfig =
            serde_json::from_str(r#"{ "width": 40, "corridor_margin": 1 }"#).expect("parse");
        assert_eq!(config.width, 40);
        assert_eq!(config.corridor_margin, 1);
        assert_eq!(config.height, DungeonConfig::default().height);
    }
}
