//! Compiled animation: ordered frames plus timing configuration

use super::frame::Frame;
use serde::{Deserialize, Serialize};

/// Ordered frame sequence with playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Frames in playback order, one per state-changing move
    pub frames: Vec<Frame>,
    /// Delay between frames in milliseconds
    pub interval_ms: u32,
    /// Restart from the first frame after the last one
    pub looped: bool,
}

impl Animation {
    /// Create an animation without frames
    pub fn new(interval_ms: u32, looped: bool) -> Self {
        Animation {
            frames: Vec::new(),
            interval_ms,
            looped,
        }
    }

    /// Append a frame
    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when nothing was emitted
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Playback length of one pass in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.frames.len() as u64 * u64::from(self.interval_ms)
    }
}
