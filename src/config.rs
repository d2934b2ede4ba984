//! Tuning for the event reducer, optionally read from a RON file.
//!
//! Every field has a default, so a file only needs to name what it changes:
//!
//! ```text
//! (
//!     scale_left: (0, 2, 4, 7),
//!     hit_mode: Velocity,
//!     diff_threshold: 40.0,
//! )
//! ```

use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, fs, path::Path};

/// Where hit events come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum HitMode {
    /// The boards' own `hit0..hit3` tags, at a fixed velocity.
    Events,
    /// Sudden drops in distance, with a velocity proportional to the drop.
    Velocity,
}

/// What moves the key around the circle of fifths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum KeyChangeTrigger {
    /// Any LIDAR channel on either board becoming engaged.
    AnyLidar,
    /// Elevation on either board becoming engaged.
    Elevation,
}

/// Reducer settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReducerConfig {
    /// Notes for channels `l0..l3` of the left board.
    pub scale_left: [u8; 4],
    /// Notes for channels `l0..l3` of the right board.
    pub scale_right: [u8; 4],
    #[allow(missing_docs)]
    pub hit_mode: HitMode,
    #[allow(missing_docs)]
    pub key_change: KeyChangeTrigger,
    /// Velocity of hits in [HitMode::Events].
    pub hit_velocity: f64,
    /// Minimum distance drop between frames that counts as a hit in
    /// [HitMode::Velocity].
    pub diff_threshold: f64,
    /// A drop of this size gives velocity 1.
    pub velocity_divisor: f64,
    /// Distances are clipped to `[0, dist_max]`.
    pub dist_max: f64,
    /// Elevations are reported as `(1 - val) * elevation_scale`.
    pub elevation_scale: f64,
    /// Pitch and roll are reported as `val * angle_scale`.
    pub angle_scale: f64,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            scale_left: [0, 2, 4, 7],
            scale_right: [9, 12, 14, 16],
            hit_mode: HitMode::Events,
            key_change: KeyChangeTrigger::AnyLidar,
            hit_velocity: 0.25,
            diff_threshold: 50.0,
            velocity_divisor: 800.0,
            dist_max: 512.0,
            elevation_scale: 1023.0,
            angle_scale: 512.0,
        }
    }
}

/// Returned when a config file cannot be loaded.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    IoError(std::io::Error),
    /// The file is not valid RON for a [ReducerConfig].
    RonSpannedError(ron::de::SpannedError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            ConfigError::IoError(error) => Cow::from(format!("io error: {}", error)),
            ConfigError::RonSpannedError(error) => Cow::from(format!("ron error: {}", error)),
        };
        write!(f, "{}", msg)
    }
}

impl std::error::Error for ConfigError {}

impl ReducerConfig {
    /// Read a config from the path provided.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::IoError)?;
        text.parse()
    }
}

impl std::str::FromStr for ReducerConfig {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ron::from_str(s).map_err(ConfigError::RonSpannedError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_is_default() {
        let config: ReducerConfig = "()".parse().unwrap();
        assert_eq!(config, ReducerConfig::default());
    }

    #[test]
    fn partial_config_overrides() {
        let config: ReducerConfig = "(hit_mode: Velocity, scale_right: (1, 3, 5, 8), diff_threshold: 40.0)"
            .parse()
            .unwrap();
        assert_eq!(config.hit_mode, HitMode::Velocity);
        assert_eq!(config.scale_right, [1, 3, 5, 8]);
        assert_eq!(config.diff_threshold, 40.0);
        assert_eq!(config.scale_left, [0, 2, 4, 7]);
        assert_eq!(config.key_change, KeyChangeTrigger::AnyLidar);
    }

    #[test]
    fn read_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(key_change: Elevation, hit_velocity: 0.5)").unwrap();
        let config = ReducerConfig::from_path(file.path()).unwrap();
        assert_eq!(config.key_change, KeyChangeTrigger::Elevation);
        assert_eq!(config.hit_velocity, 0.5);
    }

    #[test]
    fn bad_configs_are_errors() {
        assert!(matches!(
            "(hit_mode: Sometimes)".parse::<ReducerConfig>(),
            Err(ConfigError::RonSpannedError(_))
        ));
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ReducerConfig::from_path(dir.path().join("missing.ron")),
            Err(ConfigError::IoError(_))
        ));
    }
}
