//! Engine tuning.

use thiserror::Error;

use crate::types::{BASE_DROP_INTERVAL_MS, DROP_HEIGHT, DROP_INTERVAL_FLOOR_MS, MS_PER_POINT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("drop interval floor {floor_ms}ms is above the base interval {base_ms}ms")]
    FloorAboveBase { floor_ms: u32, base_ms: u32 },
    #[error("drop interval floor must be positive")]
    ZeroFloor,
    #[error("drop height must not be negative (got {0})")]
    NegativeDropHeight(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Drop interval at zero score.
    pub base_interval_ms: u32,
    /// Lower bound on the drop interval.
    pub floor_interval_ms: u32,
    /// Interval reduction per point of total score.
    pub ms_per_point: u32,
    /// Preview pieces spawn `drop_height / 2` steps up the fall axis.
    pub drop_height: i32,
    /// Run cluster elimination after ring elimination.
    pub cluster_elimination: bool,
}

impl EngineConfig {
    pub fn with_base_interval_ms(mut self, ms: u32) -> Self {
        self.base_interval_ms = ms;
        self
    }

    pub fn with_floor_interval_ms(mut self, ms: u32) -> Self {
        self.floor_interval_ms = ms;
        self
    }

    pub fn with_ms_per_point(mut self, ms: u32) -> Self {
        self.ms_per_point = ms;
        self
    }

    pub fn with_drop_height(mut self, height: i32) -> Self {
        self.drop_height = height;
        self
    }

    pub fn with_cluster_elimination(mut self, enabled: bool) -> Self {
        self.cluster_elimination = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floor_interval_ms == 0 {
            return Err(ConfigError::ZeroFloor);
        }
        if self.floor_interval_ms > self.base_interval_ms {
            return Err(ConfigError::FloorAboveBase {
                floor_ms: self.floor_interval_ms,
                base_ms: self.base_interval_ms,
            });
        }
        if self.drop_height < 0 {
            return Err(ConfigError::NegativeDropHeight(self.drop_height));
        }
        Ok(())
    }

    /// `max(base - ms_per_point * score, floor)`.
    pub fn drop_interval_for(&self, score: u32) -> u32 {
        let reduction = self.ms_per_point.saturating_mul(score);
        self.base_interval_ms
            .saturating_sub(reduction)
            .max(self.floor_interval_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: BASE_DROP_INTERVAL_MS,
            floor_interval_ms: DROP_INTERVAL_FLOOR_MS,
            ms_per_point: MS_PER_POINT,
            drop_height: DROP_HEIGHT,
            cluster_elimination: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert!(!config.cluster_elimination);
        assert_eq!(config.drop_height, 30);
    }

    #[test]
    fn interval_shrinks_with_score_down_to_floor() {
        let config = EngineConfig::default();
        assert_eq!(config.drop_interval_for(0), 1250);
        assert_eq!(config.drop_interval_for(12), 1214);
        assert_eq!(config.drop_interval_for(316), 302);
        assert_eq!(config.drop_interval_for(317), 300);
        assert_eq!(config.drop_interval_for(u32::MAX), 300);
    }

    #[test]
    fn builders_and_validation() {
        let config = EngineConfig::default()
            .with_base_interval_ms(200)
            .with_floor_interval_ms(300);
        assert_eq!(
            config.validate(),
            Err(ConfigError::FloorAboveBase {
                floor_ms: 300,
                base_ms: 200
            })
        );

        let config = EngineConfig::default().with_drop_height(-2);
        assert_eq!(config.validate(), Err(ConfigError::NegativeDropHeight(-2)));

        let config = EngineConfig::default().with_floor_interval_ms(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroFloor));

        let config = EngineConfig::default()
            .with_ms_per_point(5)
            .with_cluster_elimination(true);
        assert_eq!(config.drop_interval_for(10), 1200);
        assert!(config.cluster_elimination);
    }

    #[test]
    fn error_messages_name_values() {
        let err = ConfigError::NegativeDropHeight(-4);
        assert!(err.to_string().contains("-4"));
    }
}
