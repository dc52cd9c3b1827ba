//! Core [`VideoSource`] implementation.
//!
//! `VideoSource` is the main entry point for the crate. It opens a video
//! file, extracts and caches metadata, and provides access to
//! [`FrameSampler`] for the sampling pass.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{codec::context::Context as CodecContext, format::context::Input, media::Type};

use crate::{
    error::PackError,
    metadata::{SourceMetadata, VideoStreamMetadata},
    sampler::FrameSampler,
};

/// An opened video file.
///
/// Created via [`VideoSource::open`], this struct holds the demuxer context
/// and cached metadata. Use [`sampler()`](VideoSource::sampler) to obtain the
/// frame sampling handle.
///
/// # Example
///
/// ```no_run
/// use ugoira_pack::{PackOptions, VideoSource};
///
/// let mut source = VideoSource::open("input.mp4").unwrap();
/// println!("Duration: {:?}", source.metadata().duration);
///
/// let frames = source.sampler().collect(&PackOptions::new()).unwrap();
/// println!("Sampled {} frames", frames.len());
/// ```
pub struct VideoSource {
    /// The opened FFmpeg input (demuxer) context.
    pub(crate) input_context: Input,
    /// Cached metadata extracted at open time.
    pub(crate) metadata: SourceMetadata,
    /// Index of the best video stream, if one exists.
    pub(crate) video_stream_index: Option<usize>,
    /// Path to the opened file (kept for error messages).
    pub(crate) file_path: PathBuf,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file for frame sampling.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, locates the best
    /// video stream, and caches its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::FileOpen`] if the file cannot be opened or its
    /// video stream parameters cannot be read.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ugoira_pack::{PackError, VideoSource};
    ///
    /// let source = VideoSource::open("video.mp4")?;
    /// # Ok::<(), PackError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PackError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        // Initialise ffmpeg (safe to call multiple times).
        ffmpeg_next::init().map_err(|error| PackError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| PackError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let video_stream_index = input_context
            .streams()
            .best(Type::Video)
            .map(|stream| stream.index());

        // Container-level duration, reported in AV_TIME_BASE (microseconds).
        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let format = input_context.format().name().to_string();

        let video = match video_stream_index {
            Some(index) => Some(read_video_stream_metadata(
                &input_context,
                index,
                duration,
                &file_path,
            )?),
            None => None,
        };

        let metadata = SourceMetadata {
            video,
            duration,
            format,
        };

        log::debug!(
            "Opened {} ({}, {:?})",
            file_path.display(),
            metadata.format,
            metadata.duration,
        );

        Ok(Self {
            input_context,
            metadata,
            video_stream_index,
            file_path,
        })
    }

    /// The cached metadata for this source.
    pub fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    /// Obtain the frame sampling handle.
    pub fn sampler(&mut self) -> FrameSampler<'_> {
        FrameSampler { source: self }
    }
}

/// Read dimensions, frame rate, frame count, and codec for a video stream.
fn read_video_stream_metadata(
    input_context: &Input,
    stream_index: usize,
    duration: Duration,
    file_path: &Path,
) -> Result<VideoStreamMetadata, PackError> {
    let stream = input_context
        .stream(stream_index)
        .ok_or(PackError::NoVideoStream)?;

    let codec_parameters = stream.parameters();
    let decoder_context =
        CodecContext::from_parameters(codec_parameters).map_err(|error| PackError::FileOpen {
            path: file_path.to_path_buf(),
            reason: format!("Failed to read video codec parameters: {error}"),
        })?;
    let video_decoder = decoder_context
        .decoder()
        .video()
        .map_err(|error| PackError::FileOpen {
            path: file_path.to_path_buf(),
            reason: format!("Failed to create video decoder: {error}"),
        })?;

    let width = video_decoder.width();
    let height = video_decoder.height();
    let codec = video_decoder
        .codec()
        .map(|codec| codec.name().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    // Prefer the stream's average frame rate, falling back to the raw rate
    // for containers that do not record an average.
    let frame_rate = stream.avg_frame_rate();
    let frames_per_second = if frame_rate.denominator() != 0 {
        frame_rate.numerator() as f64 / frame_rate.denominator() as f64
    } else {
        let rate = stream.rate();
        if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        }
    };

    let reported_frames = stream.frames();
    let frame_count = if reported_frames > 0 {
        reported_frames as u64
    } else {
        (duration.as_secs_f64() * frames_per_second) as u64
    };

    Ok(VideoStreamMetadata {
        width,
        height,
        frames_per_second,
        frame_count,
        codec,
    })
}
