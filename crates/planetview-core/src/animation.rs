//! Animation start offset
//!
//! Clips can start part-way through, expressed either as a fraction of the
//! clip duration or as a frame index out of a known total frame count.

use crate::error::AnimationStartError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnimationStart {
    #[default]
    Beginning,
    /// Fraction of the clip duration in `[0, 1]`
    Fraction(f32),
    /// Frame index out of `total_frames`
    Frame { frame: u32, total_frames: u32 },
}

impl AnimationStart {
    pub fn fraction(fraction: f32) -> Result<Self, AnimationStartError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(AnimationStartError::FractionOutOfRange(fraction));
        }
        Ok(AnimationStart::Fraction(fraction))
    }

    pub fn frame(frame: u32, total_frames: u32) -> Result<Self, AnimationStartError> {
        if total_frames == 0 {
            return Err(AnimationStartError::ZeroTotalFrames);
        }
        if frame > total_frames {
            return Err(AnimationStartError::FrameOutOfRange { frame, total_frames });
        }
        Ok(AnimationStart::Frame { frame, total_frames })
    }

    /// Position in `[0, 1]` within the clip
    pub fn progress(&self) -> f32 {
        match *self {
            AnimationStart::Beginning => 0.0,
            AnimationStart::Fraction(f) => f,
            AnimationStart::Frame { frame, total_frames } => {
                (frame as f64 / total_frames as f64) as f32
            }
        }
    }

    /// Seek time in seconds for a clip of `duration` seconds
    pub fn offset_for(&self, duration: f32) -> f32 {
        self.progress() * duration
    }
}
