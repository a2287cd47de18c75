//! Policy configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::threat::ThreatConfig;

/// Where to go when no other rule asks for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackTarget {
    /// The center of the static map.
    #[default]
    MapCenter,
    /// The opponent's current position.
    Opponent,
}

/// How to react when the closing boundary presses on the tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryResponse {
    /// Step straight inward from the pressing edge(s).
    #[default]
    Nudge,
    /// Back away from the opponent, staying inside the closing area.
    StandOff,
}

/// Tunables for the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PolicyConfig {
    /// Opponents within this distance get shot at (default: 300).
    pub engagement_range: f64,
    /// Bearing fired along when the wall-tie signal holds (default: 0).
    pub forward_bearing: f64,
    /// Idle movement target (default: map center).
    pub fallback: FallbackTarget,
    /// Reaction to boundary pressure (default: nudge).
    pub boundary_response: BoundaryResponse,
    /// How far to back away from the opponent in stand-off mode (default: 150).
    pub standoff_distance: f64,
    /// Threat model distances.
    pub threat: ThreatConfig,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            engagement_range: 300.0,
            forward_bearing: 0.0,
            fallback: FallbackTarget::default(),
            boundary_response: BoundaryResponse::default(),
            standoff_distance: 150.0,
            threat: ThreatConfig::default(),
        }
    }
}

impl PolicyConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, has unknown keys, or holds
    /// an out-of-range value.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails [`Self::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check that every distance is finite and non-negative and the bearing
    /// is finite.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let distances = [
            ("engagement-range", self.engagement_range),
            ("standoff-distance", self.standoff_distance),
            ("threat.wall-buffer", self.threat.wall_buffer),
            ("threat.boundary-margin", self.threat.boundary_margin),
            ("threat.nudge-distance", self.threat.nudge_distance),
        ];
        for (field, value) in distances {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
            if value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }
        if !self.forward_bearing.is_finite() {
            return Err(ConfigError::Invalid {
                field: "forward-bearing",
                reason: "must be finite",
            });
        }
        Ok(())
    }
}
