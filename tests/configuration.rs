//! PackOptions builder and dimension resolution tests.

use ugoira_pack::PackOptions;

// ── Builder ──────────────────────────────────────────────────────

#[test]
fn options_defaults() {
    let options = PackOptions::new();
    let debug = format!("{options:?}");
    assert!(debug.contains("PackOptions"));
    assert!(debug.contains("long_edge: 960"));
    assert!(debug.contains("quality_code: 3"));
    assert!(debug.contains("frame_target: 150"));
    assert!(debug.contains("batch_size: 1"));
}

#[test]
fn options_with_values() {
    let options = PackOptions::new()
        .with_long_edge(1280)
        .with_quality_code(5)
        .with_frame_target(60)
        .with_batch_size(10);
    let debug = format!("{options:?}");
    assert!(debug.contains("long_edge: 1280"));
    assert!(debug.contains("quality_code: 5"));
    assert!(debug.contains("frame_target: 60"));
    assert!(debug.contains("batch_size: 10"));
}

#[test]
fn batch_size_clamps_zero() {
    let options = PackOptions::new().with_batch_size(0);
    let debug = format!("{options:?}");
    assert!(debug.contains("batch_size: 1"));
}

#[test]
fn long_edge_clamps_zero() {
    let options = PackOptions::new().with_long_edge(0);
    let debug = format!("{options:?}");
    assert!(debug.contains("long_edge: 1"));
}

// ── Dimension resolution ─────────────────────────────────────────

#[test]
fn landscape_scales_by_width() {
    let options = PackOptions::new().with_long_edge(960);
    assert_eq!(options.target_dimensions(1920, 1080), (960, 540));
    assert_eq!(options.target_dimensions(1280, 720), (960, 540));
}

#[test]
fn portrait_scales_by_height() {
    let options = PackOptions::new().with_long_edge(960);
    assert_eq!(options.target_dimensions(1080, 1920), (540, 960));
    assert_eq!(options.target_dimensions(720, 1280), (540, 960));
}

#[test]
fn square_sources_stay_square() {
    let options = PackOptions::new().with_long_edge(640);
    assert_eq!(options.target_dimensions(512, 512), (640, 640));
}

#[test]
fn short_edge_is_rounded() {
    let options = PackOptions::new().with_long_edge(960);
    // 480 * 960 / 853 = 540.21 -> 540
    assert_eq!(options.target_dimensions(853, 480), (960, 540));
}

#[test]
fn upscaling_is_allowed() {
    let options = PackOptions::new().with_long_edge(1920);
    assert_eq!(options.target_dimensions(640, 360), (1920, 1080));
}

#[test]
fn degenerate_source_dimensions_fall_back_to_square() {
    let options = PackOptions::new().with_long_edge(320);
    assert_eq!(options.target_dimensions(0, 0), (320, 320));
}
