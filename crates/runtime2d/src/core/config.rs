//! Configuration system.
//!
//! Injected once at startup by the (external) driver; nothing in the
//! core reads configuration from globals. Files may be TOML or RON,
//! dispatched on extension.

use crate::foundation::math::Vec2;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Configuration trait: file-backed load/save for config types.
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load configuration from a `.toml` or `.ron` file.
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a `.toml` or `.ron` file.
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Fixed-timestep physics tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Seconds per physics sub-step.
    pub fixed_timestep: f32,
    /// World gravity in units per second squared, applied through each
    /// rigid body's gravity scale.
    pub gravity: Vec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 120.0,
            gravity: Vec2::new(0.0, -980.0),
        }
    }
}

/// UI coordinate space. Objects on the `UI` visibility layer persist
/// their transforms normalized to `[0, 1]`; the scene codec rescales
/// them by this reference resolution on load and back on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Reference width in pixels.
    pub reference_width: f32,
    /// Reference height in pixels.
    pub reference_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            reference_width: 1280.0,
            reference_height: 720.0,
        }
    }
}

/// Top-level core configuration, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Physics sub-step tuning.
    pub physics: PhysicsConfig,
    /// UI coordinate rescaling.
    pub ui: UiConfig,
    /// Where the tag/layer registries persist between sessions.
    pub registry_path: String,
}

impl Config for CoreConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_config_roundtrip_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core.toml");
        let path = path.to_str().unwrap();

        let mut config = CoreConfig::default();
        config.physics.gravity = Vec2::new(0.0, -500.0);
        config.save_to_file(path).unwrap();

        let loaded = CoreConfig::load_from_file(path).unwrap();
        assert_relative_eq!(loaded.physics.gravity.y, -500.0);
        assert_relative_eq!(loaded.ui.reference_width, 1280.0);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let config = CoreConfig::default();
        assert!(matches!(
            config.save_to_file("core.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
