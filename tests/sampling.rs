//! SamplePlan tests.
//!
//! The sampling schedule is pure math over the source duration and frame
//! budget, so these tests need no media fixtures.

use std::time::Duration;

use ugoira_pack::{DEFAULT_FRAME_TARGET, SamplePlan};

fn plan_for_secs(seconds: u64) -> SamplePlan {
    SamplePlan::for_duration(Duration::from_secs(seconds), DEFAULT_FRAME_TARGET)
        .expect("plan should derive for a positive duration")
}

#[test]
fn sample_rate_is_ceil_of_target_over_duration() {
    assert_eq!(plan_for_secs(1).sample_rate, 150);
    assert_eq!(plan_for_secs(2).sample_rate, 75);
    assert_eq!(plan_for_secs(7).sample_rate, 22); // ceil(150 / 7) = ceil(21.43)
    assert_eq!(plan_for_secs(10).sample_rate, 15);
    assert_eq!(plan_for_secs(30).sample_rate, 5);
    assert_eq!(plan_for_secs(150).sample_rate, 1);
    // Long videos floor out at 1 fps.
    assert_eq!(plan_for_secs(300).sample_rate, 1);
    assert_eq!(plan_for_secs(600).sample_rate, 1);
}

#[test]
fn emit_count_never_exceeds_budget() {
    for seconds in [1, 3, 7, 10, 42, 150, 151, 600, 3600] {
        let plan = plan_for_secs(seconds);
        assert!(
            plan.emit_count <= u64::from(DEFAULT_FRAME_TARGET),
            "duration {seconds}s emitted {}",
            plan.emit_count,
        );
    }
}

#[test]
fn truncated_iff_raw_count_exceeds_budget() {
    // 10s at 15 fps is exactly 150 outputs: no truncation.
    let exact = plan_for_secs(10);
    assert_eq!(exact.raw_count, 150);
    assert_eq!(exact.emit_count, 150);
    assert!(!exact.truncated);

    // 7s at 22 fps is 154 outputs: cut to 150 with the flag set.
    let cut = plan_for_secs(7);
    assert_eq!(cut.raw_count, 154);
    assert_eq!(cut.emit_count, 150);
    assert!(cut.truncated);

    // 300s at 1 fps is 300 outputs: cut to 150.
    let long = plan_for_secs(300);
    assert_eq!(long.raw_count, 300);
    assert_eq!(long.emit_count, 150);
    assert!(long.truncated);
}

#[test]
fn fractional_durations() {
    // Half a second needs 300 fps to reach the budget; exactly 150 outputs.
    let plan = SamplePlan::for_duration(Duration::from_millis(500), DEFAULT_FRAME_TARGET)
        .expect("plan for 0.5s");
    assert_eq!(plan.sample_rate, 300);
    assert_eq!(plan.raw_count, 150);
    assert!(!plan.truncated);

    // 7.5s: ceil(150 / 7.5) = 20 fps, exactly 150 outputs.
    let plan = SamplePlan::for_duration(Duration::from_millis(7_500), DEFAULT_FRAME_TARGET)
        .expect("plan for 7.5s");
    assert_eq!(plan.sample_rate, 20);
    assert_eq!(plan.raw_count, 150);
    assert!(!plan.truncated);
}

#[test]
fn custom_frame_target() {
    let plan = SamplePlan::for_duration(Duration::from_secs(10), 60).expect("plan for target 60");
    assert_eq!(plan.sample_rate, 6);
    assert_eq!(plan.raw_count, 60);
    assert_eq!(plan.emit_count, 60);
    assert!(!plan.truncated);

    let plan = SamplePlan::for_duration(Duration::from_secs(7), 60).expect("plan for target 60");
    assert_eq!(plan.sample_rate, 9); // ceil(60 / 7)
    assert_eq!(plan.raw_count, 63);
    assert_eq!(plan.emit_count, 60);
    assert!(plan.truncated);
}

#[test]
fn zero_duration_is_an_error() {
    let result = SamplePlan::for_duration(Duration::ZERO, DEFAULT_FRAME_TARGET);
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("duration"),
        "Error should mention the duration: {error_message}",
    );
}

#[test]
fn zero_frame_target_is_an_error() {
    let result = SamplePlan::for_duration(Duration::from_secs(10), 0);
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Frame target"),
        "Error should mention the frame target: {error_message}",
    );
}
