//! Pack configuration.
//!
//! [`PackOptions`] is a builder that carries the target output size, the
//! quality code, the frame budget, and operational settings (progress
//! callbacks, batching) through the pack pipeline without polluting every
//! function signature.
//!
//! # Example
//!
//! ```
//! use ugoira_pack::PackOptions;
//!
//! let options = PackOptions::new()
//!     .with_long_edge(1280)
//!     .with_quality_code(5)
//!     .with_batch_size(10);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::progress::{NoOpProgress, ProgressCallback};
use crate::sampler::DEFAULT_FRAME_TARGET;

/// Configuration for a pack operation.
///
/// All fields have defaults matching the original service: a 960-pixel long
/// edge, quality code 3, and a 150-frame budget.
#[derive(Clone)]
pub struct PackOptions {
    /// Target size in pixels for the long edge of each output frame.
    pub(crate) long_edge: u32,
    /// Quality code (FFmpeg-style qscale; lower is better).
    pub(crate) quality_code: u8,
    /// Frame budget: both the target used to derive the sample rate and the
    /// hard cap on emitted frames.
    pub(crate) frame_target: u32,
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// How often to fire the progress callback (every N frames).
    pub(crate) batch_size: u64,
}

impl Debug for PackOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PackOptions")
            .field("long_edge", &self.long_edge)
            .field("quality_code", &self.quality_code)
            .field("frame_target", &self.frame_target)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Default for PackOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl PackOptions {
    /// Create a new configuration with default settings.
    ///
    /// Defaults: long edge 960, quality code 3, frame target 150, no
    /// progress callback, batch size 1.
    pub fn new() -> Self {
        Self {
            long_edge: 960,
            quality_code: 3,
            frame_target: DEFAULT_FRAME_TARGET,
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }

    /// Set the target size in pixels for the long edge of each output frame.
    ///
    /// The short edge is computed to preserve the source aspect ratio.
    /// Clamped to a minimum of 1.
    #[must_use]
    pub fn with_long_edge(mut self, pixels: u32) -> Self {
        self.long_edge = pixels.max(1);
        self
    }

    /// Set the quality code (FFmpeg-style qscale; lower is better).
    ///
    /// See [`quality_label`](crate::quality_label) for the mapping to visual
    /// quality percentages.
    #[must_use]
    pub fn with_quality_code(mut self, code: u8) -> Self {
        self.quality_code = code;
        self
    }

    /// Set the frame budget.
    ///
    /// The budget is used twice: the sample rate is `ceil(budget / duration)`
    /// and the emitted frame count never exceeds the budget. Defaults to
    /// [`DEFAULT_FRAME_TARGET`].
    #[must_use]
    pub fn with_frame_target(mut self, target: u32) -> Self {
        self.frame_target = target;
        self
    }

    /// Attach a progress callback.
    ///
    /// The callback is invoked every [`batch_size`](PackOptions::with_batch_size)
    /// frames during sampling and archive assembly.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires.
    ///
    /// A value of 1 means every frame; 10 means every 10th frame. Clamped to
    /// a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// The configured quality code.
    pub fn quality_code(&self) -> u8 {
        self.quality_code
    }

    /// Resolve the output dimensions for a source frame size.
    ///
    /// The long edge of the result equals the configured target size; the
    /// short edge preserves the source aspect ratio (rounded, minimum 1).
    ///
    /// # Example
    ///
    /// ```
    /// use ugoira_pack::PackOptions;
    ///
    /// let options = PackOptions::new().with_long_edge(960);
    /// assert_eq!(options.target_dimensions(1920, 1080), (960, 540));
    /// assert_eq!(options.target_dimensions(1080, 1920), (540, 960));
    /// ```
    pub fn target_dimensions(&self, source_width: u32, source_height: u32) -> (u32, u32) {
        if source_width == 0 || source_height == 0 {
            return (self.long_edge, self.long_edge);
        }

        if source_width >= source_height {
            let ratio = self.long_edge as f64 / source_width as f64;
            let height = (source_height as f64 * ratio).round() as u32;
            (self.long_edge, height.max(1))
        } else {
            let ratio = self.long_edge as f64 / source_height as f64;
            let width = (source_width as f64 * ratio).round() as u32;
            (width.max(1), self.long_edge)
        }
    }
}
