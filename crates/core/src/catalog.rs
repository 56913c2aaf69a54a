//! Level catalog - difficulty curve for the campaign
//!
//! Every level number maps to a [`LevelConfig`]. The lookup is total: level 0
//! plays as level 1 and anything past the last campaign level reuses the
//! hardest shape.

use crate::error::ConfigurationError;
use crate::types::{
    PatternId, CAMPAIGN_LEVELS, MAX_GRID_SIZE, MAX_TILE_TYPES, MIN_GRID_SIZE, MIN_TILE_TYPES,
};

/// Immutable description of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelConfig {
    pub level: u32,
    pub grid_size: u8,
    pub tile_types: u8,
    pub time_limit_seconds: u32,
    pub pattern: PatternId,
    /// Number of random legal swaps used to scramble the solved grid.
    pub shuffle_complexity: u32,
    /// Moves under this count earn an efficiency bonus.
    pub move_target: u32,
}

impl LevelConfig {
    /// Check that the engine can build and play this level.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let level = self.level;
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigurationError::GridSize {
                level,
                size: self.grid_size,
            });
        }
        if !(MIN_TILE_TYPES..=MAX_TILE_TYPES).contains(&self.tile_types) {
            return Err(ConfigurationError::TileTypes {
                level,
                tile_types: self.tile_types,
            });
        }
        if self.time_limit_seconds == 0 {
            return Err(ConfigurationError::TimeLimit { level });
        }
        if self.shuffle_complexity == 0 {
            return Err(ConfigurationError::ShuffleComplexity { level });
        }
        Ok(())
    }

    pub fn time_limit(&self) -> f64 {
        self.time_limit_seconds as f64
    }
}

/// Pattern assigned to each campaign level (index 0 = level 1).
const LEVEL_PATTERNS: [PatternId; CAMPAIGN_LEVELS as usize] = [
    PatternId::Checkerboard,
    PatternId::Stripes,
    PatternId::Corners,
    PatternId::Diagonal,
    PatternId::DiagonalStripes,
    PatternId::Cross,
    PatternId::Spiral,
    PatternId::Diamond,
    PatternId::ComplexMandala,
    PatternId::ComplexMandala,
];

/// Look up the configuration for a level number.
///
/// # Examples
///
/// ```
/// use tile_swap_core::catalog::get_config;
///
/// let first = get_config(1);
/// assert_eq!(first.grid_size, 3);
/// assert_eq!(first.time_limit_seconds, 60);
///
/// // Past the campaign the hardest shape is reused.
/// let endless = get_config(25);
/// assert_eq!(endless.level, 25);
/// assert_eq!(endless.grid_size, get_config(10).grid_size);
/// ```
pub fn get_config(level: u32) -> LevelConfig {
    let requested = level.max(1);
    let shape = requested.min(CAMPAIGN_LEVELS);

    let (grid_size, tile_types, time_limit_seconds) = match shape {
        1 => (3, 3, 60),
        2 => (3, 3, 55),
        3 => (3, 4, 50),
        4 | 5 => (4, 5, 45),
        n => (
            5,
            (3 + n - 1).min(MAX_TILE_TYPES as u32) as u8,
            70u32.saturating_sub(4 * n).max(30),
        ),
    };

    let shuffle_complexity = 10 + 5 * (shape - 1);

    LevelConfig {
        level: requested,
        grid_size,
        tile_types,
        time_limit_seconds,
        pattern: LEVEL_PATTERNS[(shape - 1) as usize],
        shuffle_complexity,
        move_target: shuffle_complexity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_early_levels_use_small_grids() {
        for level in 1..=3 {
            assert_eq!(get_config(level).grid_size, 3);
        }
        assert_eq!(get_config(1).tile_types, 3);
        assert_eq!(get_config(3).tile_types, 4);
        assert_eq!(get_config(1).time_limit_seconds, 60);
        assert_eq!(get_config(3).time_limit_seconds, 50);
        assert_eq!(get_config(1).shuffle_complexity, 10);
        assert_eq!(get_config(3).shuffle_complexity, 20);
    }

    #[test]
    fn test_mid_levels() {
        for level in 4..=5 {
            let config = get_config(level);
            assert_eq!(config.grid_size, 4);
            assert_eq!(config.tile_types, 5);
            assert_eq!(config.time_limit_seconds, 45);
        }
    }

    #[test]
    fn test_late_levels_follow_formula() {
        for level in 6..=10u32 {
            let config = get_config(level);
            assert_eq!(config.grid_size, 5);
            assert_eq!(config.tile_types as u32, (3 + level - 1).min(7));
            assert_eq!(config.time_limit_seconds, (70 - 4 * level).max(30));
        }
        assert_eq!(get_config(6).time_limit_seconds, 46);
        assert_eq!(get_config(10).time_limit_seconds, 30);
    }

    #[test]
    fn test_patterns_follow_campaign_order() {
        assert_eq!(get_config(1).pattern, PatternId::Checkerboard);
        assert_eq!(get_config(6).pattern, PatternId::Cross);
        assert_eq!(get_config(9).pattern, PatternId::ComplexMandala);
    }

    #[test]
    fn test_saturates_beyond_campaign() {
        let last = get_config(CAMPAIGN_LEVELS);
        let beyond = get_config(CAMPAIGN_LEVELS + 7);
        assert_eq!(beyond.level, CAMPAIGN_LEVELS + 7);
        assert_eq!(
            LevelConfig {
                level: last.level,
                ..beyond
            },
            last
        );
    }

    #[test]
    fn test_level_zero_plays_as_level_one() {
        assert_eq!(get_config(0), get_config(1));
    }

    #[test]
    fn test_every_catalog_entry_validates() {
        for level in 1..=CAMPAIGN_LEVELS + 2 {
            assert_eq!(get_config(level).validate(), Ok(()));
        }
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        let base = get_config(1);
        assert_eq!(
            LevelConfig { grid_size: 6, ..base }.validate(),
            Err(ConfigurationError::GridSize { level: 1, size: 6 })
        );
        assert_eq!(
            LevelConfig { tile_types: 2, ..base }.validate(),
            Err(ConfigurationError::TileTypes {
                level: 1,
                tile_types: 2
            })
        );
        assert_eq!(
            LevelConfig {
                time_limit_seconds: 0,
                ..base
            }
            .validate(),
            Err(ConfigurationError::TimeLimit { level: 1 })
        );
        assert_eq!(
            LevelConfig {
                shuffle_complexity: 0,
                ..base
            }
            .validate(),
            Err(ConfigurationError::ShuffleComplexity { level: 1 })
        );
    }
}
