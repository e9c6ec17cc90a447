//! Viewer session - the explicit context passed to every input and resize handler
//!
//! The session owns the rotation controller and the device classification,
//! and tracks whether the model has finished loading. Every operation that
//! would touch the model is a no-op until the phase is `Ready`.

use tracing::{debug, error, info};

use crate::device::{DeviceClass, InputFamily};
use crate::error::ViewerError;
use crate::handle::ModelHandle;
use crate::rotation::{PointerEvent, PointerPosition, RotationController, RotationLimits, RotationState};
use crate::sizing::ScalePolicy;

/// Model load progress
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ViewerSession {
    device: DeviceClass,
    policy: ScalePolicy,
    controller: RotationController,
    phase: LoadPhase,
}

impl ViewerSession {
    pub fn new(device: DeviceClass, policy: ScalePolicy, limits: RotationLimits) -> Self {
        Self {
            device,
            policy,
            controller: RotationController::new(limits),
            phase: LoadPhase::Loading,
        }
    }

    pub fn input_family(&self) -> InputFamily {
        self.device.input_family()
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn rotation(&self) -> RotationState {
        self.controller.rotation()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.state().is_active()
    }

    /// Scale for the given container size under this session's device class
    pub fn scale_for(&self, width: f32, height: f32) -> f32 {
        self.policy.scale_for(width, height, self.device)
    }

    /// Mark the model as loaded and apply the initial scale.
    ///
    /// Only the first completed load counts; later calls are ignored.
    pub fn model_loaded(&mut self, width: f32, height: f32, model: &mut impl ModelHandle) {
        if self.phase != LoadPhase::Loading {
            return;
        }
        self.phase = LoadPhase::Ready;
        let scale = self.scale_for(width, height);
        info!("Model ready, initial scale {:.4} for {}x{} container", scale, width, height);
        model.set_scale(scale);
    }

    /// Record a load failure. The viewport keeps showing the empty scene.
    pub fn model_failed(&mut self, err: &ViewerError) {
        if self.phase != LoadPhase::Loading {
            return;
        }
        error!("{}", err);
        self.phase = LoadPhase::Failed(err.to_string());
    }

    /// Recompute and apply the scale after a container resize
    pub fn resize(&mut self, width: f32, height: f32, model: &mut impl ModelHandle) {
        if !self.is_ready() {
            return;
        }
        let scale = self.scale_for(width, height);
        debug!("Resize to {}x{}, scale {:.4}", width, height, scale);
        model.set_scale(scale);
    }

    pub fn press(&mut self, position: PointerPosition) {
        self.controller.press(position);
    }

    /// Apply a pointer move; the model's orientation is updated while dragging.
    /// Before the model is ready, the move is dropped without touching the
    /// drag reference point.
    pub fn drag_to(&mut self, position: PointerPosition, model: &mut impl ModelHandle) {
        if !self.is_ready() {
            return;
        }
        if let Some(rotation) = self.controller.drag_to(position) {
            model.set_orientation(rotation.angle_x, rotation.angle_y);
        }
    }

    pub fn release(&mut self) {
        self.controller.release();
    }

    /// Dispatch a translated input event
    pub fn handle_pointer(&mut self, event: PointerEvent, model: &mut impl ModelHandle) {
        match event {
            PointerEvent::Press(position) => self.press(position),
            PointerEvent::Move(position) => self.drag_to(position, model),
            PointerEvent::Release => self.release(),
        }
    }
}
