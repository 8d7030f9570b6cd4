//! Engine configuration

use crate::domain::{Domain, MAX_SUPPORTED_LEVEL};
use crate::error::{LatticeError, Result};
use serde::{Deserialize, Serialize};

/// Deepest resolution level accepted by default
///
/// Level `r` holds `(2^r + 1)^3` points, 35 937 at level 5.
pub const DEFAULT_MAX_LEVEL: u32 = 5;

/// Default resolution of the fill-space grid
pub const DEFAULT_FILL_RESOLUTION: u32 = 2;

/// Settings for a [`ColorSpaceEngine`](crate::ColorSpaceEngine)
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```
/// use color_space_lattice::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "max_level": 3 }"#).unwrap();
/// assert_eq!(config.max_level, 3);
/// assert_eq!(config.domain_min, -100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub domain_min: f64,
    pub domain_max: f64,
    pub max_level: u32,
    pub fill_resolution: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            domain_min: -100.0,
            domain_max: 100.0,
            max_level: DEFAULT_MAX_LEVEL,
            fill_resolution: DEFAULT_FILL_RESOLUTION,
        }
    }
}

impl EngineConfig {
    /// Check the settings and derive the domain
    pub fn validate(&self) -> Result<Domain> {
        let domain = Domain::new(self.domain_min, self.domain_max)?;
        if self.max_level == 0 || self.max_level > MAX_SUPPORTED_LEVEL {
            return Err(LatticeError::InvalidLevel {
                level: self.max_level,
                max: MAX_SUPPORTED_LEVEL,
            });
        }
        if self.fill_resolution == 0 || self.fill_resolution > self.max_level {
            return Err(LatticeError::InvalidLevel {
                level: self.fill_resolution,
                max: self.max_level,
            });
        }
        Ok(domain)
    }

}
