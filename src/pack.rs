//! One-shot pack operation.
//!
//! [`pack_file`] runs the full pipeline — open, plan, sample, assemble,
//! write — and returns the written path plus the derived summary. This is
//! the operation the CLI invokes.

use std::path::{Path, PathBuf};

use crate::{
    archive::{FrameArchive, PackSummary},
    configuration::PackOptions,
    error::PackError,
    source::VideoSource,
};

/// The result of a completed pack operation.
#[derive(Debug, Clone)]
#[must_use]
pub struct PackOutcome {
    /// Derived metadata for the written archive.
    pub summary: PackSummary,
    /// Path of the written archive.
    pub archive_path: PathBuf,
}

/// Extract, encode, and pack a video's frames into a ZIP archive.
///
/// Opens `input`, samples frames per `options`, assembles the archive, and
/// writes it into `output_dir` under its derived name (overwriting any
/// existing file with the same name; callers that need an overwrite guard
/// should assemble and write the steps separately).
///
/// # Errors
///
/// Propagates any [`PackError`] from the pipeline stages: open, sampling,
/// assembly, or the final write.
///
/// # Example
///
/// ```no_run
/// use ugoira_pack::{PackOptions, pack_file};
///
/// let options = PackOptions::new().with_long_edge(960).with_quality_code(3);
/// let outcome = pack_file("input.mp4", "out", &options)?;
/// println!(
///     "{} frames -> {}",
///     outcome.summary.frame_count,
///     outcome.archive_path.display(),
/// );
/// # Ok::<(), ugoira_pack::PackError>(())
/// ```
pub fn pack_file<P, Q>(input: P, output_dir: Q, options: &PackOptions) -> Result<PackOutcome, PackError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut source = VideoSource::open(input)?;
    let frames = source.sampler().collect(options)?;

    if frames.truncated() {
        log::warn!(
            "Sampling produced {} outputs; kept the first {}",
            frames.plan.raw_count,
            frames.len(),
        );
    }

    let archive = FrameArchive::assemble(&frames, options)?;
    let archive_path = archive.write_to(output_dir)?;

    Ok(PackOutcome {
        summary: archive.summary,
        archive_path,
    })
}
