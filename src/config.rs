//! Construction-time tuning for leaf size and tree depth
//!
//! Both values can be loaded from a TOML table:
//!
//! ```toml
//! chunk_threshold = 1024
//! rebalance_factor = 2
//! ```

use crate::error::ConfigError;
use serde::Deserialize;

/// Default leaf size limit for constructed text
pub const CHUNK_THRESHOLD: usize = 1024;

/// Default multiplier on `ceil(log2(len))` before a subtree is rebuilt
pub const REBALANCE_FACTOR: u32 = 2;

/// Tuning carried by every buffer and inherited by buffers derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct RopeConfig {
    chunk_threshold: usize,
    rebalance_factor: u32,
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    chunk_threshold: usize,
    rebalance_factor: u32,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            chunk_threshold: CHUNK_THRESHOLD,
            rebalance_factor: REBALANCE_FACTOR,
        }
    }
}

impl TryFrom<RawConfig> for RopeConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::new(raw.chunk_threshold, raw.rebalance_factor)
    }
}

impl Default for RopeConfig {
    fn default() -> Self {
        Self {
            chunk_threshold: CHUNK_THRESHOLD,
            rebalance_factor: REBALANCE_FACTOR,
        }
    }
}

impl RopeConfig {
    /// A factor below 2 is rejected: a rebuilt subtree could then exceed the
    /// bound it was rebuilt to satisfy.
    pub fn new(chunk_threshold: usize, rebalance_factor: u32) -> Result<Self, ConfigError> {
        if chunk_threshold == 0 {
            return Err(ConfigError::ChunkThreshold(chunk_threshold));
        }
        if rebalance_factor < 2 {
            return Err(ConfigError::RebalanceFactor(rebalance_factor));
        }
        Ok(Self {
            chunk_threshold,
            rebalance_factor,
        })
    }

    /// Parse a TOML table; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(source)?;
        Self::try_from(raw)
    }

    pub fn chunk_threshold(&self) -> usize {
        self.chunk_threshold
    }

    pub fn rebalance_factor(&self) -> u32 {
        self.rebalance_factor
    }

    /// Largest height allowed for a subtree holding `len` bytes
    pub fn max_height(&self, len: usize) -> usize {
        self.rebalance_factor as usize * ceil_log2(len)
    }
}

#[inline]
fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(1024), 10);
        assert_eq!(ceil_log2(1025), 11);
    }

    #[test]
    fn test_default_config() {
        let config = RopeConfig::default();
        assert_eq!(config.chunk_threshold(), 1024);
        assert_eq!(config.rebalance_factor(), 2);
        assert_eq!(config.max_height(1), 0);
        assert_eq!(config.max_height(1024), 20);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            RopeConfig::new(0, 2),
            Err(ConfigError::ChunkThreshold(0))
        ));
        assert!(matches!(
            RopeConfig::new(64, 1),
            Err(ConfigError::RebalanceFactor(1))
        ));
        assert!(RopeConfig::new(1, 2).is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = RopeConfig::from_toml_str("chunk_threshold = 16\nrebalance_factor = 3\n")
            .expect("valid config");
        assert_eq!(config.chunk_threshold(), 16);
        assert_eq!(config.rebalance_factor(), 3);

        // Missing keys fall back to defaults
        let config = RopeConfig::from_toml_str("chunk_threshold = 8").expect("valid config");
        assert_eq!(config.rebalance_factor(), REBALANCE_FACTOR);

        let config = RopeConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, RopeConfig::default());
    }

    #[test]
    fn test_from_toml_errors() {
        assert!(matches!(
            RopeConfig::from_toml_str("chunk_threshold = 0"),
            Err(ConfigError::ChunkThreshold(0))
        ));
        assert!(matches!(
            RopeConfig::from_toml_str("unknown = 1"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RopeConfig::from_toml_str("chunk_threshold = \"big\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
