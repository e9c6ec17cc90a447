//! Error types shared by the viewer crates

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to load model '{path}': {reason}")]
    AssetLoad { path: String, reason: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    AnimationStart(#[from] AnimationStartError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse viewer config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },
    #[error("Scale reference extent must be positive, got {0}")]
    ReferenceExtent(f32),
    #[error("Scale base factors must be non-negative, got mobile={mobile} desktop={desktop}")]
    BaseFactor { mobile: f32, desktop: f32 },
    #[error("Rotation limits are inverted: min_x={min_x} > max_x={max_x}")]
    RotationLimits { min_x: f32, max_x: f32 },
    #[error("Rotation sensitivity must be finite, got {0}")]
    Sensitivity(f32),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationStartError {
    #[error("Total frame count must be greater than zero")]
    ZeroTotalFrames,
    #[error("Start frame {frame} is beyond the total of {total_frames} frames")]
    FrameOutOfRange { frame: u32, total_frames: u32 },
    #[error("Start fraction {0} is outside [0, 1]")]
    FractionOutOfRange(f32),
}
