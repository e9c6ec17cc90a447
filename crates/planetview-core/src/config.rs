//! Viewer configuration
//!
//! Defaults come from an embedded TOML document; URL query parameters
//! override a small set of keys at startup.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::animation::AnimationStart;
use crate::error::{AnimationStartError, ConfigError, ViewerError};
use crate::rotation::RotationLimits;
use crate::sizing::ScalePolicy;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// GLTF asset to display
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// Id of the element whose client size drives model scaling
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// CSS selector of the canvas the renderer draws into
    #[serde(default = "default_canvas")]
    pub canvas: String,
    /// Background color as linear RGB (0.0-1.0)
    #[serde(default)]
    pub clear_color: [f32; 3],
    /// Maximum tracing level ("error", "warn", "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Show a small unlit cube at the origin to check camera and lights
    #[serde(default)]
    pub debug_cube: bool,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub rotation: RotationLimits,
    #[serde(default)]
    pub scale: ScalePolicy,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    /// Vertical field of view
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Frame to start every clip at, out of `total_frames`
    #[serde(default)]
    pub start_frame: Option<u32>,
    #[serde(default = "default_total_frames")]
    pub total_frames: u32,
    /// Alternative to `start_frame`: fraction of the clip duration
    #[serde(default)]
    pub start_fraction: Option<f32>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start_frame: None,
            total_frames: default_total_frames(),
            start_fraction: None,
        }
    }
}

fn default_model_path() -> String {
    "Images/planet2.gltf".to_string()
}

fn default_container_id() -> String {
    "container".to_string()
}

fn default_canvas() -> String {
    "#planet-canvas".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 1.0, 10.0]
}

fn default_fov() -> f32 {
    75.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    1000.0
}

fn default_total_frames() -> u32 {
    62_627
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            container_id: default_container_id(),
            canvas: default_canvas(),
            clear_color: [0.0, 0.0, 0.0],
            log_level: default_log_level(),
            debug_cube: false,
            camera: CameraConfig::default(),
            rotation: RotationLimits::default(),
            scale: ScalePolicy::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Build the session configuration from the embedded TOML document and
    /// URL query overrides. Invalid input is logged and replaced by defaults.
    pub fn resolve<I, K, V>(embedded: &str, query: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = match Self::from_toml(embedded) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using built-in defaults", e);
                Self::default()
            }
        };

        let base = config.clone();
        if let Err(e) = config.apply_query_pairs(query) {
            warn!("Ignoring URL overrides: {}", e);
            config = base.clone();
        }

        if let Err(e) = config.validate() {
            warn!("{}; falling back to defaults", e);
            return if base.validate().is_ok() { base } else { Self::default() };
        }

        config
    }

    /// Apply `?key=value` overrides. Unknown keys belong to the page and are skipped.
    pub fn apply_query_pairs<I, K, V>(&mut self, pairs: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "model" => {
                    if value.is_empty() {
                        return Err(invalid(key, value));
                    }
                    self.model_path = value.to_string();
                }
                "start_frame" => {
                    self.animation.start_frame = Some(value.parse().map_err(|_| invalid(key, value))?);
                }
                "total_frames" => {
                    self.animation.total_frames = value.parse().map_err(|_| invalid(key, value))?;
                }
                "start" => {
                    self.animation.start_fraction = Some(value.parse().map_err(|_| invalid(key, value))?);
                }
                "debug_cube" => {
                    self.debug_cube = parse_flag(value).ok_or_else(|| invalid(key, value))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        self.scale.validate()?;
        self.rotation.validate()?;
        self.animation_start()?;
        Ok(())
    }

    /// Validated animation start. A configured frame takes precedence over a fraction.
    pub fn animation_start(&self) -> Result<AnimationStart, AnimationStartError> {
        match (self.animation.start_frame, self.animation.start_fraction) {
            (Some(frame), _) => AnimationStart::frame(frame, self.animation.total_frames),
            (None, Some(fraction)) => AnimationStart::fraction(fraction),
            (None, None) => Ok(AnimationStart::Beginning),
        }
    }

    pub fn max_log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_QUERY: [(&str, &str); 0] = [];

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = ViewerConfig::from_toml("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.model_path, "Images/planet2.gltf");
        assert_eq!(config.camera.position, [0.0, 1.0, 10.0]);
        assert_eq!(config.animation.total_frames, 62_627);
        assert_eq!(config.scale, ScalePolicy::default());
    }

    #[test]
    fn test_partial_document() {
        let toml = r#"
model_path = "models/moon.glb"
debug_cube = true

[rotation]
sensitivity = 0.01

[scale]
reference_extent = 800.0
"#;
        let config = ViewerConfig::from_toml(toml).unwrap();
        assert_eq!(config.model_path, "models/moon.glb");
        assert!(config.debug_cube);
        assert_eq!(config.rotation.sensitivity, 0.01);
        // Unset keys within a table keep their defaults
        assert_eq!(config.rotation.max_x, RotationLimits::default().max_x);
        assert_eq!(config.scale.reference_extent, 800.0);
        assert_eq!(config.scale.mobile_base, 0.35);
    }

    #[test]
    fn test_query_overrides() {
        let mut config = ViewerConfig::default();
        config
            .apply_query_pairs([
                ("model", "Images/other.gltf"),
                ("start_frame", "1200"),
                ("debug_cube", "1"),
                ("utm_source", "newsletter"),
            ])
            .unwrap();
        assert_eq!(config.model_path, "Images/other.gltf");
        assert_eq!(config.animation.start_frame, Some(1200));
        assert!(config.debug_cube);
    }

    #[test]
    fn test_bad_query_value() {
        let mut config = ViewerConfig::default();
        let err = config.apply_query_pairs([("start_frame", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "start_frame"));
    }

    #[test]
    fn test_animation_start_precedence() {
        let mut config = ViewerConfig::default();
        assert_eq!(config.animation_start().unwrap(), AnimationStart::Beginning);

        config.animation.start_fraction = Some(0.5);
        assert_eq!(config.animation_start().unwrap(), AnimationStart::Fraction(0.5));

        config.animation.start_frame = Some(10);
        assert!(matches!(config.animation_start().unwrap(), AnimationStart::Frame { frame: 10, .. }));
    }

    #[test]
    fn test_resolve_falls_back_on_parse_error() {
        let config = ViewerConfig::resolve("model_path = [", NO_QUERY);
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_resolve_drops_invalid_overrides() {
        let embedded = r#"model_path = "Images/planet2.gltf""#;

        // Unparseable value: all overrides are discarded
        let config = ViewerConfig::resolve(embedded, [("model", "a.gltf"), ("total_frames", "x")]);
        assert_eq!(config.model_path, "Images/planet2.gltf");

        // Parseable but out of range: validation rejects it
        let config = ViewerConfig::resolve(embedded, [("start_frame", "99999999")]);
        assert_eq!(config.animation.start_frame, None);

        let config = ViewerConfig::resolve(embedded, [("start", "0.75")]);
        assert_eq!(config.animation.start_fraction, Some(0.75));
    }

    #[test]
    fn test_log_level() {
        let mut config = ViewerConfig::default();
        assert_eq!(config.max_log_level(), tracing::Level::INFO);
        config.log_level = "warn".to_string();
        assert_eq!(config.max_log_level(), tracing::Level::WARN);
        config.log_level = "loud".to_string();
        assert_eq!(config.max_log_level(), tracing::Level::INFO);
    }
}
