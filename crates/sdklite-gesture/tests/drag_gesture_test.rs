//! Drag detector driven by scripted multi-finger input.

use sdklite_gesture::{DragGestureDetector, Point};
use sdklite_gesture_testing::prelude::*;

#[test]
fn test_stationary_pointers_report_zero_delta() {
    let frames = FrameScript::new()
        .down(0.0, 0.0)
        .down(10.0, 0.0)
        .hold()
        .hold()
        .hold()
        .build();

    let mut detector = DragGestureDetector::new(DragRecorder::new());
    detector.feed_all(&frames);

    let updates: Vec<_> = detector.listener().updates().copied().collect();
    assert_count(&updates, 2, "updates after the begin frame");
    for call in updates {
        assert_eq!(call.delta, Point::ZERO);
    }
    assert_eq!(detector.delta_x(), 0.0);
    assert_eq!(detector.delta_y(), 0.0);
}

#[test]
fn test_pair_moving_together_moves_centroid() {
    let frames = FrameScript::new()
        .down(0.0, 0.0)
        .down(10.0, 0.0)
        .hold()
        .move_by(5.0, 5.0)
        .build();

    let mut detector = DragGestureDetector::new(DragRecorder::new());
    detector.feed_all(&frames);

    let calls = &detector.listener().calls;
    assert_eq!(calls[0].phase, Phase::Begin);
    assert_eq!(calls[0].focus, Some(Point::new(5.0, 0.0)));
    assert_eq!(calls[1].phase, Phase::Update);
    assert_point_approx_eq(calls[1].delta, Point::new(5.0, 5.0), EPSILON, "centroid delta");
    assert_eq!(calls[1].focus, Some(Point::new(10.0, 5.0)));
}

#[test]
fn test_release_ends_once_with_cancel_flag() {
    let frames = FrameScript::new()
        .down(0.0, 0.0)
        .down(10.0, 0.0)
        .move_by(1.0, 0.0)
        .move_by(1.0, 0.0)
        .release_all()
        .build();

    let mut detector = DragGestureDetector::new(DragRecorder::new());
    detector.feed_all(&frames);

    let ends: Vec<_> = detector.listener().ends().copied().collect();
    assert_count(&ends, 1, "drag ends");
    assert_eq!(ends[0].phase, Phase::End { cancelled: true });
    assert_eq!(ends[0].delta, Point::ZERO);
    assert!(!detector.is_in_progress());
}

#[test]
fn test_finger_leaving_does_not_move_focus() {
    let frames = FrameScript::new()
        .down(0.0, 0.0)
        .down(20.0, 0.0)
        .hold()
        .up(1)
        .hold()
        .move_by(3.0, 0.0)
        .build();

    let mut detector = DragGestureDetector::new(DragRecorder::new());
    detector.feed_all(&frames);

    let deltas: Vec<Point> = detector.listener().updates().map(|call| call.delta).collect();
    assert_eq!(deltas, vec![Point::ZERO, Point::new(3.0, 0.0)]);
}

#[test]
fn test_update_limit_stops_updates_but_not_end() {
    let frames = FrameScript::new()
        .down(0.0, 0.0)
        .move_by(1.0, 0.0)
        .move_by(1.0, 0.0)
        .move_by(1.0, 0.0)
        .move_by(1.0, 0.0)
        .release_all()
        .build();

    let responses = Responses {
        update_limit: Some(2),
        ..Responses::default()
    };
    let mut detector = DragGestureDetector::new(DragRecorder::with_responses(responses));
    let consumed = detector.feed_all(&frames);

    assert_eq!(detector.listener().updates().count(), 2);
    assert_eq!(detector.listener().ends().count(), 1);
    // begin + first update; the second update declined.
    assert_eq!(consumed, 2);
}

#[test]
fn test_rejected_begin_gets_nothing_else() {
    let frames = FrameScript::new()
        .down(0.0, 0.0)
        .move_by(1.0, 0.0)
        .move_by(1.0, 0.0)
        .release_all()
        .build();

    let mut detector =
        DragGestureDetector::new(DragRecorder::with_responses(Responses::rejecting_begin()));
    assert_eq!(detector.feed_all(&frames), 0);

    let phases: Vec<Phase> = detector.listener().calls.iter().map(|call| call.phase).collect();
    assert_eq!(phases, vec![Phase::Begin]);
}
