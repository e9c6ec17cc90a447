//! Summary of what a loaded model contains

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelFeatures {
    /// At least one skinned mesh (skeletal animation)
    pub has_skeleton: bool,
    /// At least one mesh with morph target weights
    pub has_morph_targets: bool,
    pub animation_count: usize,
}

impl ModelFeatures {
    pub fn describe(&self) -> Vec<String> {
        vec![
            if self.has_skeleton {
                "Model contains a skeleton for skeletal animation".to_string()
            } else {
                "Model does not contain a skeleton".to_string()
            },
            if self.has_morph_targets {
                "Model contains morph targets".to_string()
            } else {
                "Model does not contain morph targets".to_string()
            },
            if self.animation_count > 0 {
                format!("Model contains {} animation clip(s)", self.animation_count)
            } else {
                "Model does not contain animations".to_string()
            },
        ]
    }

    pub fn log(&self) {
        for line in self.describe() {
            info!("{}", line);
        }
    }
}
