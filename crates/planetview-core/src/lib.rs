//! Planetview Core - Engine-independent viewer logic
//!
//! This crate holds the decisions the browser frontend makes about the
//! displayed model:
//! - Viewport sizing policy (uniform scale from container size and device class)
//! - Pointer rotation controller (drag deltas to clamped X/Y rotation)
//! - Viewer session gating every model mutation behind a completed load
//! - Animation start offset and viewer configuration

pub mod animation;
pub mod config;
pub mod device;
pub mod error;
pub mod features;
pub mod handle;
pub mod rotation;
pub mod session;
pub mod sizing;

pub use animation::AnimationStart;
pub use config::ViewerConfig;
pub use device::{DeviceClass, InputFamily};
pub use error::{AnimationStartError, ConfigError, ViewerError};
pub use features::ModelFeatures;
pub use handle::ModelHandle;
pub use rotation::{DragState, PointerEvent, PointerPosition, RotationController, RotationLimits, RotationState};
pub use session::{LoadPhase, ViewerSession};
pub use sizing::{compute_scale, ScalePolicy};
