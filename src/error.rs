//! Error types for the `ugoira-pack` crate.
//!
//! This module defines [`PackError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry enough context (file paths,
//! upstream messages) to diagnose a failure without extra logging at the call
//! site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;
use zip::result::ZipError;

/// The unified error type for all `ugoira-pack` operations.
///
/// Every public method that can fail returns `Result<T, PackError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PackError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// The container reports a zero or unknown duration, so a sample rate
    /// cannot be derived from the frame target.
    #[error("Video duration is zero or unknown; cannot derive a sample rate")]
    InvalidDuration,

    /// A frame target of zero was requested.
    #[error("Frame target must be greater than zero")]
    InvalidFrameTarget,

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// Archive assembly was requested for an empty frame set.
    #[error("No frames to pack into an archive")]
    EmptyFrameSet,

    /// The ZIP writer reported an error.
    #[error("Archive error: {0}")]
    ArchiveError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate during frame encoding or probing.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for PackError {
    fn from(error: FfmpegError) -> Self {
        PackError::FfmpegError(error.to_string())
    }
}

impl From<ZipError> for PackError {
    fn from(error: ZipError) -> Self {
        PackError::ArchiveError(error.to_string())
    }
}
