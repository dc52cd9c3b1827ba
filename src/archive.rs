//! Archive assembly and naming.
//!
//! This module packs a [`FrameSet`] into a ZIP archive and derives the
//! archive's deterministic file name from the output's measurable properties:
//! the first frame's pixel dimensions, the quality label, and the total
//! encoded byte size.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{
    configuration::PackOptions,
    error::PackError,
    progress::{OperationType, ProgressTracker},
    quality,
    sampler::{EncodedFrame, FrameSet},
};

/// Derived metadata for a packed archive.
///
/// This is the result descriptor shown to the user: frame count, image
/// dimensions, quality label, total size, and the archive file name.
#[derive(Debug, Clone)]
#[must_use]
pub struct PackSummary {
    /// Number of frames in the archive.
    pub frame_count: usize,
    /// Width of the first frame, in pixels.
    pub width: u32,
    /// Height of the first frame, in pixels.
    pub height: u32,
    /// Visual-quality label (e.g. `"92%"`).
    pub quality_label: String,
    /// Sum of the encoded frame sizes in bytes.
    pub total_bytes: u64,
    /// Archive file name, derived from the fields above.
    pub archive_name: String,
    /// `true` iff the sampling schedule was cut to the frame budget.
    pub truncated: bool,
}

impl PackSummary {
    /// Total encoded size in mebibytes.
    pub fn size_megabytes(&self) -> f64 {
        self.total_bytes as f64 / 1024.0 / 1024.0
    }
}

/// A fully assembled archive, ready to be written to disk.
#[derive(Debug, Clone)]
#[must_use]
pub struct PackedArchive {
    /// The complete ZIP file contents.
    pub bytes: Vec<u8>,
    /// Derived metadata for the archive.
    pub summary: PackSummary,
}

impl PackedArchive {
    /// Write the archive into `directory` under its derived file name.
    ///
    /// Creates the directory if needed and overwrites an existing file with
    /// the same name. Returns the path of the written archive.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::IoError`] if the directory cannot be created or
    /// the file cannot be written.
    pub fn write_to<P: AsRef<Path>>(&self, directory: P) -> Result<PathBuf, PackError> {
        let directory = directory.as_ref();
        std::fs::create_dir_all(directory)?;

        let path = directory.join(&self.summary.archive_name);
        std::fs::write(&path, &self.bytes)?;

        log::info!(
            "Wrote {} ({} frames, {:.2} MB)",
            path.display(),
            self.summary.frame_count,
            self.summary.size_megabytes(),
        );

        Ok(path)
    }
}

/// Archive assembly operations.
///
/// Stateless; [`assemble`](FrameArchive::assemble) consumes a [`FrameSet`]
/// reference and produces an in-memory [`PackedArchive`].
pub struct FrameArchive;

impl FrameArchive {
    /// Pack the frame set into a ZIP archive.
    ///
    /// Frames are inserted in name order under their original names. The
    /// total byte size is the sum of the encoded frame lengths, and the
    /// first frame's dimensions are determined by decoding its encoded
    /// bytes.
    ///
    /// # Errors
    ///
    /// - [`PackError::EmptyFrameSet`] if the set contains no frames.
    /// - [`PackError::ImageError`] if the first frame cannot be decoded.
    /// - [`PackError::ArchiveError`] if the ZIP writer fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ugoira_pack::{FrameArchive, PackOptions, VideoSource};
    ///
    /// let options = PackOptions::new();
    /// let mut source = VideoSource::open("input.mp4")?;
    /// let frames = source.sampler().collect(&options)?;
    ///
    /// let archive = FrameArchive::assemble(&frames, &options)?;
    /// let path = archive.write_to(".")?;
    /// println!("{}", path.display());
    /// # Ok::<(), ugoira_pack::PackError>(())
    /// ```
    pub fn assemble(
        frame_set: &FrameSet,
        options: &PackOptions,
    ) -> Result<PackedArchive, PackError> {
        if frame_set.is_empty() {
            return Err(PackError::EmptyFrameSet);
        }

        let mut ordered: Vec<&EncodedFrame> = frame_set.frames.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));

        let total_bytes: u64 = ordered.iter().map(|frame| frame.data.len() as u64).sum();

        // The archive name embeds the first frame's true pixel dimensions,
        // read back from the encoded bytes.
        let (width, height) = ImageReader::new(Cursor::new(&ordered[0].data))
            .with_guessed_format()?
            .into_dimensions()?;

        let quality_label = quality::quality_label(options.quality_code());
        let archive_name = archive_file_name(width, height, &quality_label, total_bytes);

        log::debug!(
            "Assembling {} ({} frames, {} bytes)",
            archive_name,
            ordered.len(),
            total_bytes,
        );

        let mut tracker = ProgressTracker::new(
            OperationType::ArchiveAssembly,
            Some(ordered.len() as u64),
            options.batch_size,
            Arc::clone(&options.progress),
        );

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let entry_options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for frame in &ordered {
            writer.start_file(frame.name.as_str(), entry_options)?;
            writer.write_all(&frame.data)?;
            tracker.record();
        }

        let bytes = writer.finish()?.into_inner();

        Ok(PackedArchive {
            bytes,
            summary: PackSummary {
                frame_count: ordered.len(),
                width,
                height,
                quality_label,
                total_bytes,
                archive_name,
                truncated: frame_set.truncated(),
            },
        })
    }
}

/// The deterministic archive file name.
///
/// # Example
///
/// ```
/// use ugoira_pack::archive_file_name;
///
/// let name = archive_file_name(960, 540, "92%", 3 * 1024 * 1024);
/// assert_eq!(name, "ugoira_spv2_960x540_92%_3.00MB.zip");
/// ```
pub fn archive_file_name(width: u32, height: u32, quality_label: &str, total_bytes: u64) -> String {
    let megabytes = total_bytes as f64 / 1024.0 / 1024.0;
    format!("ugoira_spv2_{width}x{height}_{quality_label}_{megabytes:.2}MB.zip")
}
