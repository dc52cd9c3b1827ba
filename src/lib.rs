//! # ugoira-pack
//!
//! Split a video into a bounded set of JPEG frames and pack them into a
//! ugoira-style ZIP archive.
//!
//! `ugoira-pack` opens a video (MP4 or anything FFmpeg can read), derives a
//! sample rate from the source duration and a fixed frame budget, decodes
//! and scales frames so their long edge matches a target size, encodes them
//! as JPEG at a configurable quality, and assembles a deterministically
//! named ZIP archive of `frame_NNN.jpg` entries. Decoding is powered by
//! FFmpeg via the [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)
//! crate; encoding by [`image`]; archiving by
//! [`zip`](https://crates.io/crates/zip).
//!
//! ## Quick Start
//!
//! ```no_run
//! use ugoira_pack::{PackOptions, pack_file};
//!
//! let options = PackOptions::new().with_long_edge(960).with_quality_code(3);
//! let outcome = pack_file("input.mp4", "out", &options).unwrap();
//! println!(
//!     "{} frames ({}x{}, {}) -> {}",
//!     outcome.summary.frame_count,
//!     outcome.summary.width,
//!     outcome.summary.height,
//!     outcome.summary.quality_label,
//!     outcome.archive_path.display(),
//! );
//! ```
//!
//! ## Stepwise API
//!
//! The pipeline stages are also exposed individually, which is useful for
//! guards (e.g. refusing to overwrite) or for keeping the archive in memory:
//!
//! ```no_run
//! use ugoira_pack::{FrameArchive, PackOptions, VideoSource};
//!
//! let options = PackOptions::new();
//! let mut source = VideoSource::open("input.mp4").unwrap();
//! let frames = source.sampler().collect(&options).unwrap();
//! if frames.truncated() {
//!     eprintln!("output was cut to {} frames", frames.len());
//! }
//! let archive = FrameArchive::assemble(&frames, &options).unwrap();
//! let path = archive.write_to("out").unwrap();
//! println!("{}", path.display());
//! ```
//!
//! ## Behavior
//!
//! - **Sample rate** — `ceil(budget / duration)` frames per second, where
//!   the budget defaults to [`DEFAULT_FRAME_TARGET`] (150). The output
//!   never exceeds the budget; when the schedule produces more, the first
//!   150 frames (name order) are kept and the result is flagged truncated.
//! - **Scaling** — the long edge of each output equals the configured
//!   target size; aspect ratio is preserved.
//! - **Quality** — codes are FFmpeg-style qscale values with a fixed label
//!   table (`2 → 100%`, `3 → 92%`, `5 → 80%`, `10 → 60%`, `15 → 50%`) and a
//!   `100 - 5 × code` fallback.
//! - **Naming** — archives are named
//!   `ugoira_spv2_<width>x<height>_<quality>_<sizeMB>MB.zip`, where the
//!   dimensions come from decoding the first frame and the size is the sum
//!   of the encoded frame bytes in MiB, rounded to two decimals.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system for
//! `ffmpeg-next` to link against.

pub mod archive;
pub mod configuration;
mod conversion;
pub mod error;
pub mod ffmpeg;
pub mod metadata;
pub mod pack;
pub mod progress;
pub mod quality;
pub mod sampler;
pub mod source;

pub use archive::{FrameArchive, PackSummary, PackedArchive, archive_file_name};
pub use configuration::PackOptions;
pub use error::PackError;
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use metadata::{SourceMetadata, VideoStreamMetadata};
pub use pack::{PackOutcome, pack_file};
pub use progress::{OperationType, ProgressCallback, ProgressInfo};
pub use quality::{QUALITY_CODE_MAX, QUALITY_CODE_MIN, jpeg_quality, quality_label};
pub use sampler::{DEFAULT_FRAME_TARGET, EncodedFrame, FrameSampler, FrameSet, SamplePlan};
pub use source::VideoSource;
