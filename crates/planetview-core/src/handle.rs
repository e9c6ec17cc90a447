//! Capability exposed by the loaded model to the viewer session

/// Mutable access to the displayed model's transform.
///
/// The frontend implements this over the model entity's `Transform`; tests
/// use a recording fake.
pub trait ModelHandle {
    /// Set a uniform scale on all three axes
    fn set_scale(&mut self, factor: f32);

    /// Set the model's local rotation about X and Y (radians)
    fn set_orientation(&mut self, angle_x: f32, angle_y: f32);
}

/// An absent model ignores every call
impl<H: ModelHandle> ModelHandle for Option<H> {
    fn set_scale(&mut self, factor: f32) {
        if let Some(handle) = self {
            handle.set_scale(factor);
        }
    }

    fn set_orientation(&mut self, angle_x: f32, angle_y: f32) {
        if let Some(handle) = self {
            handle.set_orientation(angle_x, angle_y);
        }
    }
}
