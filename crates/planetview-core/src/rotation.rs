//! Pointer rotation controller
//!
//! Converts a mouse drag or single-finger touch drag into incremental rotation
//! of the model about its local X and Y axes. X (tilt) is clamped to an
//! asymmetric range, Y (spin) is free.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Pointer coordinates in screen space (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Input event after translation from the active input family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Mouse button down or touch start
    Press(PointerPosition),
    /// Mouse or touch moved
    Move(PointerPosition),
    /// Mouse button up or touch end
    Release,
}

/// Drag session state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Last observed pointer position
        last: PointerPosition,
    },
}

impl DragState {
    pub fn is_active(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Accumulated model orientation in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub angle_x: f32,
    pub angle_y: f32,
}

/// Tilt limits and drag sensitivity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationLimits {
    /// Radians of rotation per pixel of pointer travel
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Lower bound for X rotation (down-tilt)
    #[serde(default = "default_min_x")]
    pub min_x: f32,
    /// Upper bound for X rotation (up-tilt)
    #[serde(default = "default_max_x")]
    pub max_x: f32,
}

fn default_sensitivity() -> f32 {
    0.005
}

fn default_min_x() -> f32 {
    -PI / 7.5
}

fn default_max_x() -> f32 {
    PI / 6.0
}

impl Default for RotationLimits {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
            min_x: default_min_x(),
            max_x: default_max_x(),
        }
    }
}

impl RotationLimits {
    pub fn clamp_x(&self, angle_x: f32) -> f32 {
        angle_x.clamp(self.min_x, self.max_x)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sensitivity.is_finite() {
            return Err(ConfigError::Sensitivity(self.sensitivity));
        }
        // Also rejects NaN bounds, which would make clamp panic
        if !(self.min_x <= self.max_x) {
            return Err(ConfigError::RotationLimits {
                min_x: self.min_x,
                max_x: self.max_x,
            });
        }
        Ok(())
    }
}

/// Idle/Dragging state machine that owns the rotation state
#[derive(Debug, Clone, Default)]
pub struct RotationController {
    state: DragState,
    rotation: RotationState,
    limits: RotationLimits,
}

impl RotationController {
    pub fn new(limits: RotationLimits) -> Self {
        Self {
            state: DragState::Idle,
            rotation: RotationState::default(),
            limits,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Start a drag session at `position`. Rotation carries over from earlier sessions.
    pub fn press(&mut self, position: PointerPosition) {
        self.state = DragState::Dragging { last: position };
    }

    /// Apply pointer movement. Returns the new rotation while dragging,
    /// `None` when idle.
    pub fn drag_to(&mut self, position: PointerPosition) -> Option<RotationState> {
        let DragState::Dragging { last } = self.state else {
            return None;
        };

        let dx = position.x - last.x;
        let dy = position.y - last.y;

        self.rotation.angle_x += dy * self.limits.sensitivity;
        self.rotation.angle_y += dx * self.limits.sensitivity;
        self.rotation.angle_x = self.limits.clamp_x(self.rotation.angle_x);

        self.state = DragState::Dragging { last: position };
        Some(self.rotation)
    }

    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }
}
