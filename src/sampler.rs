//! Frame sampling.
//!
//! This module provides [`SamplePlan`], the deterministic schedule derived
//! from the source duration and the frame budget, and [`FrameSampler`], the
//! decode pass that emits JPEG-encoded frames according to that schedule.
//!
//! The sampling model is a constant-frame-rate resampler: output ticks sit at
//! `k / sample_rate` seconds and each tick takes the most recent decoded
//! frame at or before it, duplicating frames when the sample rate exceeds the
//! source frame rate.

use std::sync::Arc;
use std::time::Duration;

use ffmpeg_next::{
    Rational,
    codec::context::Context as CodecContext,
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::{
    configuration::PackOptions,
    conversion,
    error::PackError,
    progress::{OperationType, ProgressTracker},
    quality,
    source::VideoSource,
};

/// Default frame budget: both the target used to derive the sample rate and
/// the hard cap on emitted frames.
pub const DEFAULT_FRAME_TARGET: u32 = 150;

/// The deterministic sampling schedule for a video of known duration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use ugoira_pack::SamplePlan;
///
/// // A 7-second video sampled against a 150-frame budget.
/// let plan = SamplePlan::for_duration(Duration::from_secs(7), 150).unwrap();
/// assert_eq!(plan.sample_rate, 22); // ceil(150 / 7)
/// assert_eq!(plan.raw_count, 154); // ceil(7 * 22)
/// assert_eq!(plan.emit_count, 150);
/// assert!(plan.truncated);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct SamplePlan {
    /// Output frames per second: `ceil(frame_target / duration)`.
    pub sample_rate: u32,
    /// Number of output ticks the schedule produces before the cap:
    /// `ceil(duration * sample_rate)`.
    pub raw_count: u64,
    /// Number of frames actually emitted: `min(raw_count, frame_target)`.
    pub emit_count: u64,
    /// `true` iff `raw_count` exceeds the frame budget, meaning the output
    /// was cut to the first `emit_count` frames.
    pub truncated: bool,
}

impl SamplePlan {
    /// Derive the schedule for a source of the given duration.
    ///
    /// # Errors
    ///
    /// - [`PackError::InvalidFrameTarget`] if `frame_target` is zero.
    /// - [`PackError::InvalidDuration`] if the duration is zero.
    pub fn for_duration(duration: Duration, frame_target: u32) -> Result<Self, PackError> {
        if frame_target == 0 {
            return Err(PackError::InvalidFrameTarget);
        }

        let seconds = duration.as_secs_f64();
        if seconds <= 0.0 {
            return Err(PackError::InvalidDuration);
        }

        let sample_rate = (f64::from(frame_target) / seconds).ceil().max(1.0) as u32;
        let raw_count = ((seconds * f64::from(sample_rate)).ceil() as u64).max(1);
        let target = u64::from(frame_target);

        Ok(Self {
            sample_rate,
            raw_count,
            emit_count: raw_count.min(target),
            truncated: raw_count > target,
        })
    }

    /// The timestamp of output tick `index`, in seconds.
    pub(crate) fn tick_seconds(&self, index: u64) -> f64 {
        index as f64 / f64::from(self.sample_rate)
    }
}

/// One JPEG-encoded output frame.
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    /// Frame file name (`frame_NNN.jpg`, 1-based, zero-padded).
    pub name: String,
    /// Encoded JPEG bytes.
    pub data: Vec<u8>,
}

/// The result of a sampling pass: encoded frames plus the plan that
/// produced them.
#[derive(Debug, Clone)]
#[must_use]
pub struct FrameSet {
    /// Emitted frames, in emission (and name) order.
    pub frames: Vec<EncodedFrame>,
    /// The schedule the frames were emitted against.
    pub plan: SamplePlan,
}

impl FrameSet {
    /// Number of emitted frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if no frames were emitted.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Sum of the encoded frame sizes in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.frames.iter().map(|frame| frame.data.len() as u64).sum()
    }

    /// `true` iff the schedule produced more outputs than the frame budget.
    pub fn truncated(&self) -> bool {
        self.plan.truncated
    }
}

/// Frame sampling operations.
///
/// Obtained via [`VideoSource::sampler`]. The sampling pass creates a fresh
/// decoder and scaler, decodes the stream once from the start, and emits
/// frames per the [`SamplePlan`]. The decoder is dropped when the method
/// returns.
pub struct FrameSampler<'a> {
    pub(crate) source: &'a mut VideoSource,
}

impl FrameSampler<'_> {
    /// Decode the video and collect the sampled, JPEG-encoded frames.
    ///
    /// Frames are scaled so their long edge equals the configured target
    /// size (aspect ratio preserved) and encoded at the quality derived from
    /// the configured quality code. At most `frame_target` frames are
    /// emitted; [`FrameSet::truncated`] reports whether the schedule was cut.
    ///
    /// # Errors
    ///
    /// - [`PackError::NoVideoStream`] if the file has no video.
    /// - [`PackError::InvalidDuration`] if the container duration is zero.
    /// - [`PackError::VideoDecodeError`] if decoding fails or the stream
    ///   yields no frames.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ugoira_pack::{PackOptions, VideoSource};
    ///
    /// let mut source = VideoSource::open("input.mp4")?;
    /// let options = PackOptions::new().with_long_edge(640).with_quality_code(5);
    /// let frames = source.sampler().collect(&options)?;
    /// assert!(frames.len() <= 150);
    /// # Ok::<(), ugoira_pack::PackError>(())
    /// ```
    pub fn collect(&mut self, options: &PackOptions) -> Result<FrameSet, PackError> {
        let video_stream_index = self
            .source
            .video_stream_index
            .ok_or(PackError::NoVideoStream)?;

        let video_metadata = self
            .source
            .metadata
            .video
            .as_ref()
            .ok_or(PackError::NoVideoStream)?
            .clone();

        let plan = SamplePlan::for_duration(self.source.metadata.duration, options.frame_target)?;
        let (target_width, target_height) =
            options.target_dimensions(video_metadata.width, video_metadata.height);
        let jpeg_quality = quality::jpeg_quality(options.quality_code);

        log::debug!(
            "Sampling {} frames at {} fps ({}x{} -> {}x{}, jpeg quality {})",
            plan.emit_count,
            plan.sample_rate,
            video_metadata.width,
            video_metadata.height,
            target_width,
            target_height,
            jpeg_quality,
        );

        // Build a fresh decoder from the stream parameters.
        let stream = self
            .source
            .input_context
            .stream(video_stream_index)
            .ok_or(PackError::NoVideoStream)?;
        let time_base = stream.time_base();
        let codec_parameters = stream.parameters();
        let decoder_context = CodecContext::from_parameters(codec_parameters)?;
        let mut decoder = decoder_context.decoder().video()?;

        // Pixel-format converter: source format → RGB24 at the target size.
        let mut scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            target_width,
            target_height,
            ScalingFlags::BILINEAR,
        )?;

        let mut tracker = ProgressTracker::new(
            OperationType::FrameSampling,
            Some(plan.emit_count),
            options.batch_size,
            Arc::clone(&options.progress),
        );

        let mut frames: Vec<EncodedFrame> = Vec::with_capacity(plan.emit_count as usize);
        // The most recently decoded frame, scaled. JPEG bytes are encoded
        // lazily, once per unique frame, and reused for duplicate emissions.
        let mut held_image: Option<RgbImage> = None;
        let mut held_encoded: Option<Vec<u8>> = None;

        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();

        'packets: for (stream, packet) in self.source.input_context.packets() {
            if stream.index() != video_stream_index {
                continue;
            }

            decoder.send_packet(&packet)?;

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                let pts = decoded_frame.pts().unwrap_or(0);
                let seconds = pts_to_seconds(pts, time_base);

                // Serve every tick before this frame with the held frame.
                emit_pending(
                    &plan,
                    Some(seconds),
                    held_image.as_ref(),
                    &mut held_encoded,
                    jpeg_quality,
                    &mut frames,
                    &mut tracker,
                )?;

                if frames.len() as u64 >= plan.emit_count {
                    break 'packets;
                }

                scaler.run(&decoded_frame, &mut rgb_frame)?;
                held_image = Some(conversion::frame_to_image(
                    &rgb_frame,
                    target_width,
                    target_height,
                )?);
                held_encoded = None;
            }
        }

        // Flush the decoder.
        if (frames.len() as u64) < plan.emit_count {
            decoder.send_eof()?;
            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                let pts = decoded_frame.pts().unwrap_or(0);
                let seconds = pts_to_seconds(pts, time_base);

                emit_pending(
                    &plan,
                    Some(seconds),
                    held_image.as_ref(),
                    &mut held_encoded,
                    jpeg_quality,
                    &mut frames,
                    &mut tracker,
                )?;

                if frames.len() as u64 >= plan.emit_count {
                    break;
                }

                scaler.run(&decoded_frame, &mut rgb_frame)?;
                held_image = Some(conversion::frame_to_image(
                    &rgb_frame,
                    target_width,
                    target_height,
                )?);
                held_encoded = None;
            }
        }

        // Fill the remaining ticks with the final frame.
        emit_pending(
            &plan,
            None,
            held_image.as_ref(),
            &mut held_encoded,
            jpeg_quality,
            &mut frames,
            &mut tracker,
        )?;

        if frames.is_empty() {
            return Err(PackError::VideoDecodeError(
                "No frames decoded from the video stream".to_string(),
            ));
        }

        Ok(FrameSet { frames, plan })
    }
}

/// Emit the held frame for each pending tick.
///
/// Emits while the next tick lies strictly before `boundary` (pass `None` to
/// fill every remaining tick) and the emit cap has not been reached. Does
/// nothing before the first frame has been decoded.
#[allow(clippy::too_many_arguments)]
fn emit_pending(
    plan: &SamplePlan,
    boundary: Option<f64>,
    held_image: Option<&RgbImage>,
    held_encoded: &mut Option<Vec<u8>>,
    jpeg_quality: u8,
    frames: &mut Vec<EncodedFrame>,
    tracker: &mut ProgressTracker,
) -> Result<(), PackError> {
    let Some(image) = held_image else {
        return Ok(());
    };

    while (frames.len() as u64) < plan.emit_count {
        let tick = plan.tick_seconds(frames.len() as u64);
        if let Some(boundary) = boundary {
            if tick >= boundary {
                break;
            }
        }

        let data = match held_encoded {
            Some(data) => data.clone(),
            None => {
                let encoded = conversion::encode_jpeg(image, jpeg_quality)?;
                *held_encoded = Some(encoded.clone());
                encoded
            }
        };

        frames.push(EncodedFrame {
            name: frame_name(frames.len() as u64 + 1),
            data,
        });
        tracker.record();
    }

    Ok(())
}

/// Output frame file name: 1-based, zero-padded to three digits.
fn frame_name(number: u64) -> String {
    format!("frame_{number:03}.jpg")
}

/// Rescale a PTS value from stream time base to seconds.
fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}
