//! Archive assembly and naming tests.
//!
//! These tests build frame sets from synthetic JPEGs (encoded with the
//! `image` crate), so they need no media fixtures.

use std::io::{Cursor, Read};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use image::{Rgb, RgbImage, codecs::jpeg::JpegEncoder};
use ugoira_pack::{
    DEFAULT_FRAME_TARGET, EncodedFrame, FrameArchive, FrameSet, OperationType, PackOptions,
    ProgressCallback, ProgressInfo, SamplePlan, archive_file_name,
};

fn jpeg_frame(name: &str, width: u32, height: u32) -> EncodedFrame {
    let image = RgbImage::from_pixel(width, height, Rgb([40, 90, 160]));
    let mut data = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut data, 90);
    encoder
        .encode_image(&image)
        .expect("Failed to encode test JPEG");
    EncodedFrame {
        name: name.to_string(),
        data,
    }
}

fn frame_set(frames: Vec<EncodedFrame>, duration_seconds: u64) -> FrameSet {
    let plan = SamplePlan::for_duration(
        Duration::from_secs(duration_seconds),
        DEFAULT_FRAME_TARGET,
    )
    .expect("Failed to derive plan");
    FrameSet { frames, plan }
}

// ── Naming ───────────────────────────────────────────────────────

#[test]
fn archive_name_embeds_dimensions_label_and_size() {
    assert_eq!(
        archive_file_name(960, 540, "92%", 3 * 1024 * 1024),
        "ugoira_spv2_960x540_92%_3.00MB.zip",
    );
    assert_eq!(
        archive_file_name(320, 180, "80%", 2_621_440),
        "ugoira_spv2_320x180_80%_2.50MB.zip",
    );
    assert_eq!(
        archive_file_name(1280, 720, "100%", 0),
        "ugoira_spv2_1280x720_100%_0.00MB.zip",
    );
}

// ── Assembly ────────────────────────────────────────────────────

#[test]
fn assemble_reports_counts_dimensions_and_total_size() {
    let frames = vec![
        jpeg_frame("frame_001.jpg", 8, 4),
        jpeg_frame("frame_002.jpg", 8, 4),
        jpeg_frame("frame_003.jpg", 8, 4),
    ];
    let expected_total: u64 = frames.iter().map(|frame| frame.data.len() as u64).sum();

    let set = frame_set(frames, 10);
    let archive =
        FrameArchive::assemble(&set, &PackOptions::new()).expect("Failed to assemble archive");

    let summary = &archive.summary;
    assert_eq!(summary.frame_count, 3);
    assert_eq!((summary.width, summary.height), (8, 4));
    assert_eq!(summary.quality_label, "92%");
    assert_eq!(summary.total_bytes, expected_total);
    assert!(!summary.truncated);
    assert_eq!(
        summary.archive_name,
        archive_file_name(8, 4, "92%", expected_total),
    );
    assert!(summary.archive_name.starts_with("ugoira_spv2_8x4_92%_"));
}

#[test]
fn archive_round_trips_through_zip_reader() {
    let frames = vec![
        jpeg_frame("frame_001.jpg", 8, 4),
        jpeg_frame("frame_002.jpg", 8, 4),
    ];
    let originals: Vec<Vec<u8>> = frames.iter().map(|frame| frame.data.clone()).collect();

    let set = frame_set(frames, 10);
    let archive =
        FrameArchive::assemble(&set, &PackOptions::new()).expect("Failed to assemble archive");

    let mut reader =
        zip::ZipArchive::new(Cursor::new(archive.bytes)).expect("Failed to read archive back");
    assert_eq!(reader.len(), 2);

    for (index, expected) in originals.iter().enumerate() {
        let mut entry = reader.by_index(index).expect("Failed to open entry");
        assert_eq!(entry.name(), format!("frame_{:03}.jpg", index + 1));

        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .expect("Failed to read entry");
        assert_eq!(&contents, expected, "entry {index} should round-trip");
    }
}

#[test]
fn frames_are_inserted_in_name_order() {
    // Deliberately shuffled, with a differently-sized first-by-name frame.
    let frames = vec![
        jpeg_frame("frame_003.jpg", 16, 8),
        jpeg_frame("frame_001.jpg", 8, 4),
        jpeg_frame("frame_002.jpg", 16, 8),
    ];

    let set = frame_set(frames, 10);
    let archive =
        FrameArchive::assemble(&set, &PackOptions::new()).expect("Failed to assemble archive");

    // Dimensions come from the first frame in name order, not input order.
    assert_eq!((archive.summary.width, archive.summary.height), (8, 4));

    let mut reader =
        zip::ZipArchive::new(Cursor::new(archive.bytes)).expect("Failed to read archive back");
    let names: Vec<String> = (0..reader.len())
        .map(|index| {
            reader
                .by_index(index)
                .expect("Failed to open entry")
                .name()
                .to_string()
        })
        .collect();
    assert_eq!(names, ["frame_001.jpg", "frame_002.jpg", "frame_003.jpg"]);
}

#[test]
fn empty_frame_set_is_an_error() {
    let set = frame_set(Vec::new(), 10);
    let result = FrameArchive::assemble(&set, &PackOptions::new());
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("No frames"),
        "Error should mention the empty set: {error_message}",
    );
}

#[test]
fn truncation_flag_propagates_to_summary() {
    // A 7-second plan is truncated (154 raw outputs against a 150 budget).
    let set = frame_set(
        vec![
            jpeg_frame("frame_001.jpg", 8, 4),
            jpeg_frame("frame_002.jpg", 8, 4),
        ],
        7,
    );
    assert!(set.truncated());

    let archive =
        FrameArchive::assemble(&set, &PackOptions::new()).expect("Failed to assemble archive");
    assert!(archive.summary.truncated);
}

// ── Writing ─────────────────────────────────────────────────────

#[test]
fn write_to_writes_the_named_file() {
    let set = frame_set(vec![jpeg_frame("frame_001.jpg", 8, 4)], 10);
    let archive =
        FrameArchive::assemble(&set, &PackOptions::new()).expect("Failed to assemble archive");

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = archive
        .write_to(directory.path())
        .expect("Failed to write archive");

    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some(archive.summary.archive_name.as_str()),
    );
    let written = std::fs::read(&path).expect("Failed to read written archive");
    assert_eq!(written, archive.bytes);
}

// ── Progress ────────────────────────────────────────────────────

#[derive(Default)]
struct CountingProgress {
    calls: AtomicU64,
    last_current: AtomicU64,
    last_operation: Mutex<Option<OperationType>>,
}

impl ProgressCallback for CountingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_current.store(info.current, Ordering::SeqCst);
        *self.last_operation.lock().expect("poisoned lock") = Some(info.operation);
    }
}

#[test]
fn assemble_reports_progress_per_frame() {
    let progress = std::sync::Arc::new(CountingProgress::default());
    let options = PackOptions::new().with_progress(progress.clone());

    let set = frame_set(
        vec![
            jpeg_frame("frame_001.jpg", 8, 4),
            jpeg_frame("frame_002.jpg", 8, 4),
            jpeg_frame("frame_003.jpg", 8, 4),
        ],
        10,
    );
    FrameArchive::assemble(&set, &options).expect("Failed to assemble archive");

    assert_eq!(progress.calls.load(Ordering::SeqCst), 3);
    assert_eq!(progress.last_current.load(Ordering::SeqCst), 3);
    assert_eq!(
        *progress.last_operation.lock().expect("poisoned lock"),
        Some(OperationType::ArchiveAssembly),
    );
}

#[test]
fn batched_progress_still_fires_on_the_final_frame() {
    let progress = std::sync::Arc::new(CountingProgress::default());
    let options = PackOptions::new()
        .with_progress(progress.clone())
        .with_batch_size(2);

    let set = frame_set(
        vec![
            jpeg_frame("frame_001.jpg", 8, 4),
            jpeg_frame("frame_002.jpg", 8, 4),
            jpeg_frame("frame_003.jpg", 8, 4),
        ],
        10,
    );
    FrameArchive::assemble(&set, &options).expect("Failed to assemble archive");

    // Fires at 2 (batch) and 3 (final).
    assert_eq!(progress.calls.load(Ordering::SeqCst), 2);
    assert_eq!(progress.last_current.load(Ordering::SeqCst), 3);
}
