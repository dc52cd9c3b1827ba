//! Quality code mapping.
//!
//! Quality codes are FFmpeg-style qscale values: small integers where lower
//! means better quality. The codes the original service exposed map to
//! approximate visual-quality percentages via a fixed table; any other code
//! falls back to a linear formula.

/// Lowest accepted quality code (best quality).
pub const QUALITY_CODE_MIN: u8 = 1;

/// Highest accepted quality code (worst quality).
pub const QUALITY_CODE_MAX: u8 = 31;

/// Human-readable visual-quality label for a quality code.
///
/// Exact for codes 2, 3, 5, 10, and 15; every other code falls back to
/// `100 - 5 * code` percent. The fallback is unclamped; codes past 20
/// produce negative labels.
///
/// # Example
///
/// ```
/// use ugoira_pack::quality_label;
///
/// assert_eq!(quality_label(3), "92%");
/// assert_eq!(quality_label(4), "80%");
/// ```
pub fn quality_label(code: u8) -> String {
    match code {
        2 => "100%".to_string(),
        3 => "92%".to_string(),
        5 => "80%".to_string(),
        10 => "60%".to_string(),
        15 => "50%".to_string(),
        other => format!("{}%", 100 - 5 * i32::from(other)),
    }
}

/// JPEG encoder quality (1–100) for a quality code.
///
/// Uses the same percentage as [`quality_label`], clamped to the encoder's
/// valid range.
pub fn jpeg_quality(code: u8) -> u8 {
    let percent = match code {
        2 => 100,
        3 => 92,
        5 => 80,
        10 => 60,
        15 => 50,
        other => 100 - 5 * i32::from(other),
    };
    percent.clamp(1, 100) as u8
}
