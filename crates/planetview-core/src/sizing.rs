//! Viewport sizing policy - uniform model scale from container dimensions

use serde::{Deserialize, Serialize};

use crate::device::DeviceClass;
use crate::error::ConfigError;

/// Base factors and reference extent used to derive the model scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePolicy {
    /// Base factor on mobile devices (models appear slightly larger)
    #[serde(default = "default_mobile_base")]
    pub mobile_base: f32,
    /// Base factor on desktop devices
    #[serde(default = "default_desktop_base")]
    pub desktop_base: f32,
    /// Container extent in pixels at which the base factor applies unchanged
    #[serde(default = "default_reference_extent")]
    pub reference_extent: f32,
}

fn default_mobile_base() -> f32 {
    0.35
}

fn default_desktop_base() -> f32 {
    0.30
}

fn default_reference_extent() -> f32 {
    500.0
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self {
            mobile_base: default_mobile_base(),
            desktop_base: default_desktop_base(),
            reference_extent: default_reference_extent(),
        }
    }
}

impl ScalePolicy {
    pub fn base(&self, device: DeviceClass) -> f32 {
        match device {
            DeviceClass::Mobile => self.mobile_base,
            DeviceClass::Desktop => self.desktop_base,
        }
    }

    /// Scale for a container of the given pixel size.
    ///
    /// A zero-sized container yields a zero scale; callers are expected to
    /// avoid collapsing the model themselves.
    pub fn scale_for(&self, width: f32, height: f32, device: DeviceClass) -> f32 {
        self.base(device) * width.min(height) / self.reference_extent
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.reference_extent > 0.0) {
            return Err(ConfigError::ReferenceExtent(self.reference_extent));
        }
        if !(self.mobile_base >= 0.0 && self.desktop_base >= 0.0) {
            return Err(ConfigError::BaseFactor {
                mobile: self.mobile_base,
                desktop: self.desktop_base,
            });
        }
        Ok(())
    }
}

/// Scale with the default policy: `base * min(width, height) / 500`
pub fn compute_scale(container_width: f32, container_height: f32, is_mobile: bool) -> f32 {
    ScalePolicy::default().scale_for(
        container_width,
        container_height,
        DeviceClass::from_is_mobile(is_mobile),
    )
}
