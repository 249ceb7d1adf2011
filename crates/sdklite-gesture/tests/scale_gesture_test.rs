//! Scale detector driven by scripted pinch input.

use sdklite_gesture::{Point, PointerSample, ScaleGestureDetector};
use sdklite_gesture_testing::prelude::*;

fn pinch_start() -> FrameScript {
    FrameScript::new().down(0.0, 0.0).down(4.0, 0.0)
}

#[test]
fn test_doubling_span_reports_scale_two() {
    let frames = pinch_start().move_to(&[(0.0, 0.0), (8.0, 0.0)]).build();
    let mut detector = ScaleGestureDetector::new(ScaleRecorder::new());
    detector.feed_all(&frames);

    let updates: Vec<ScaleCall> = detector.listener().updates().copied().collect();
    assert_count(&updates, 1, "scale updates");
    assert_approx_eq(updates[0].scale_factor, 2.0, EPSILON, "scale factor");
    assert_eq!(updates[0].previous_span, 4.0);
    assert_eq!(updates[0].current_span, 8.0);
    assert_eq!(updates[0].focus, Point::new(4.0, 0.0));
    assert_eq!(updates[0].time_delta, FRAME_INTERVAL_MS);
}

#[test]
fn test_begin_measures_frame_against_itself() {
    let frames = pinch_start().build();
    let mut detector = ScaleGestureDetector::new(ScaleRecorder::new());
    detector.feed_all(&frames);

    let begin = detector.listener().calls[0];
    assert_eq!(begin.phase, Phase::Begin);
    assert_eq!(begin.scale_factor, 1.0);
    assert_eq!(begin.current_span, 4.0);
    assert_eq!(begin.time_delta, 0);
    assert!(detector.is_in_progress());
}

#[test]
fn test_low_pressure_frame_is_filtered_and_keeps_baseline() {
    let lifting = [
        PointerSample::new(0.0, 0.0).with_pressure(0.2),
        PointerSample::new(6.0, 0.0).with_pressure(1.0),
    ];
    let pressed = [PointerSample::new(0.0, 0.0), PointerSample::new(12.0, 0.0)];
    let frames = pinch_start()
        .move_samples(&lifting)
        .move_samples(&pressed)
        .build();
    let mut detector = ScaleGestureDetector::new(ScaleRecorder::new());
    detector.feed_all(&frames);

    let updates: Vec<ScaleCall> = detector.listener().updates().copied().collect();
    assert_count(&updates, 1, "updates past the pressure filter");
    assert_eq!(updates[0].previous_span, 4.0);
    assert_approx_eq(updates[0].scale_factor, 3.0, EPSILON, "scale against kept baseline");
    assert_eq!(updates[0].time_delta, 2 * FRAME_INTERVAL_MS);
}

#[test]
fn test_pressure_ratio_at_threshold_is_filtered() {
    // 0.34 + 1.0 against 2.0 is exactly 0.67.
    let borderline = [
        PointerSample::new(0.0, 0.0).with_pressure(0.34),
        PointerSample::new(8.0, 0.0).with_pressure(1.0),
    ];
    let frames = pinch_start().move_samples(&borderline).build();
    let mut detector = ScaleGestureDetector::new(ScaleRecorder::new());
    detector.feed_all(&frames);

    assert_eq!(detector.listener().updates().count(), 0);
}

#[test]
fn test_declining_updates_measures_from_begin() {
    let frames = pinch_start()
        .move_to(&[(0.0, 0.0), (6.0, 0.0)])
        .move_to(&[(0.0, 0.0), (8.0, 0.0)])
        .build();
    let mut detector =
        ScaleGestureDetector::new(ScaleRecorder::with_responses(Responses::rejecting_updates()));
    detector.feed_all(&frames);

    let factors: Vec<f32> = detector
        .listener()
        .updates()
        .map(|call| call.scale_factor)
        .collect();
    assert_eq!(factors, vec![1.5, 2.0]);
}

#[test]
fn test_accepted_updates_rebase_each_frame() {
    let frames = pinch_start()
        .move_to(&[(0.0, 0.0), (8.0, 0.0)])
        .move_to(&[(0.0, 0.0), (16.0, 0.0)])
        .move_to(&[(0.0, 0.0), (16.0, 0.0)])
        .build();
    let mut detector = ScaleGestureDetector::new(ScaleRecorder::new());
    detector.feed_all(&frames);

    let factors: Vec<f32> = detector
        .listener()
        .updates()
        .map(|call| call.scale_factor)
        .collect();
    assert_eq!(factors, vec![2.0, 2.0, 1.0]);
}

#[test]
fn test_per_finger_tracking_follows_begin_roles() {
    let frames = FrameScript::new()
        .down(50.0, 200.0)
        .down(50.0, 100.0)
        .move_to(&[(40.0, 210.0), (60.0, 80.0)])
        .build();
    let mut detector = ScaleGestureDetector::new(ScaleRecorder::new());
    detector.feed_all(&frames);

    let gesture = detector.gesture();
    assert_eq!(gesture.top_finger(), Point::new(60.0, 80.0));
    assert_eq!(gesture.bottom_finger(), Point::new(40.0, 210.0));
    assert_eq!(gesture.top_finger_delta(), Point::new(10.0, -20.0));
    assert_eq!(gesture.bottom_finger_delta(), Point::new(-10.0, 10.0));
    assert_eq!(gesture.top_finger_x(), 60.0);
    assert_eq!(gesture.bottom_finger_delta_y(), 10.0);
}

#[test]
fn test_lifting_tracked_finger_ends_without_cancel() {
    let frames = pinch_start()
        .move_to(&[(0.0, 0.0), (8.0, 0.0)])
        .up(1)
        .build();
    let mut detector = ScaleGestureDetector::new(ScaleRecorder::new());
    detector.feed_all(&frames);

    let ends: Vec<ScaleCall> = detector.listener().ends().copied().collect();
    assert_count(&ends, 1, "scale ends");
    assert_eq!(ends[0].phase, Phase::End { cancelled: false });
    // Focus snaps to the finger that stays down.
    assert_eq!(ends[0].focus, Point::new(0.0, 0.0));
    assert!(!detector.is_in_progress());
}

#[test]
fn test_cancel_ends_once_with_cancel_flag() {
    let frames = pinch_start()
        .move_to(&[(0.0, 0.0), (8.0, 0.0)])
        .cancel()
        .cancel()
        .build();
    let mut detector = ScaleGestureDetector::new(ScaleRecorder::new());
    detector.feed_all(&frames);

    let ends: Vec<ScaleCall> = detector.listener().ends().copied().collect();
    assert_count(&ends, 1, "scale ends");
    assert_eq!(ends[0].phase, Phase::End { cancelled: true });
}

#[test]
fn test_rejected_begin_is_silent_until_next_pinch() {
    let frames = pinch_start()
        .move_to(&[(0.0, 0.0), (8.0, 0.0)])
        .release_all()
        .build();
    let mut detector =
        ScaleGestureDetector::new(ScaleRecorder::with_responses(Responses::rejecting_begin()));
    detector.feed_all(&frames);

    let phases: Vec<Phase> = detector.listener().calls.iter().map(|call| call.phase).collect();
    assert_eq!(phases, vec![Phase::Begin]);
    assert!(!detector.is_in_progress());
    assert_eq!(detector.scale_factor(), 1.0);
}
