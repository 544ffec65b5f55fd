use std::{fs, path::Path};

use anyhow::{Context, Result};
use hideseek_core::{GenerationError, LayoutRequest};
use hideseek_mission::MissionSettings;
use serde::Deserialize;

/// Contents of an arena configuration file.
///
/// ```toml
/// seed = 7
///
/// [layout]
/// arena_size = 12
/// num_blocks = 4
///
/// [layout.room_strategy]
/// strategy = "parallel"
/// room_count = 3
///
/// [mission]
/// seekers = 1
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Seed of the random generator; drawn at startup when omitted.
    pub seed: Option<u64>,
    /// Arena to generate.
    pub layout: LayoutRequest,
    /// Mission rendering settings.
    pub mission: MissionSettings,
}

impl CliConfig {
    /// Loads a configuration from a TOML file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read arena config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load arena config at {}", path.display()))
    }

    /// Parses configuration contents; malformed or unknown settings surface
    /// as [`GenerationError::InvalidParameters`].
    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|error| GenerationError::InvalidParameters(error.message().to_owned()))
            .context("failed to parse arena config toml contents")
    }
}

#[cfg(test)]
mod tests {
    use hideseek_core::{Corner, QuadrantParams, RoomStrategy};

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = CliConfig::parse("").expect("empty config parses");
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.layout.arena_size, 10);
    }

    #[test]
    fn strategy_tables_select_the_room_shape() {
        let config = CliConfig::parse(
            r#"
            seed = 99

            [layout]
            arena_size = 16
            is_closed_arena = false

            [layout.room_strategy]
            strategy = "quadrant"
            corner = "top_right"
            door_count = 2

            [layout.item_rules]
            stairs_inside = false
            "#,
        )
        .expect("config parses");

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.layout.arena_size, 16);
        assert!(!config.layout.is_closed_arena);
        assert_eq!(
            config.layout.room_strategy,
            RoomStrategy::Quadrant(QuadrantParams {
                corner: Some(Corner::TopRight),
                room_size: None,
                door_count: Some(2),
            })
        );
        assert!(!config.layout.item_rules.stairs_inside);
        assert!(config.layout.item_rules.blocks_inside);
    }

    #[test]
    fn divider_strategies_take_a_room_count() {
        let config = CliConfig::parse(
            r#"
            [layout.room_strategy]
            strategy = "sequential"
            room_count = 4
            "#,
        )
        .expect("config parses");
        assert_eq!(
            config.layout.room_strategy,
            RoomStrategy::Sequential { room_count: 4 }
        );
    }

    #[test]
    fn unknown_strategies_are_rejected() {
        let error = CliConfig::parse(
            r#"
            [layout.room_strategy]
            strategy = "spiral"
            "#,
        )
        .expect_err("unknown strategy");
        assert!(format!("{error:#}").contains("spiral"));
        assert!(matches!(
            error.downcast_ref::<GenerationError>(),
            Some(GenerationError::InvalidParameters(_))
        ));
    }

    #[test]
    fn unknown_settings_are_invalid_parameters() {
        let error = CliConfig::parse(
            r#"
            sead = 12
            "#,
        )
        .expect_err("misspelt key");
        assert!(matches!(
            error.downcast_ref::<GenerationError>(),
            Some(GenerationError::InvalidParameters(message)) if message.contains("sead")
        ));
    }
}
