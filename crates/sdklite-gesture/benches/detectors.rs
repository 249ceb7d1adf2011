use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sdklite_gesture::{
    DragGestureDetector, PointerFrame, PointerSample, RotateGestureDetector,
    ScaleGestureDetector, SimpleScaleGestureListener,
};
use sdklite_gesture_testing::{DragRecorder, FrameScript, FrameSink, RotateRecorder};

/// A two-finger session of `steps` moves that pinches, pans and twists.
fn session(steps: usize) -> Vec<PointerFrame> {
    let mut script = FrameScript::new().down(100.0, 300.0).down(300.0, 100.0);
    for step in 0..steps {
        let t = step as f32 / steps as f32;
        let angle = t * std::f32::consts::FRAC_PI_2;
        let radius = 150.0 + 100.0 * t;
        let (cx, cy) = (200.0 + 50.0 * t, 200.0 - 20.0 * t);
        script = script.move_samples(&[
            PointerSample::new(cx - radius * angle.cos(), cy + radius * angle.sin()),
            PointerSample::new(cx + radius * angle.cos(), cy - radius * angle.sin()),
        ]);
    }
    script.release_all().build()
}

fn bench_detectors(c: &mut Criterion) {
    let frames = session(240);

    c.bench_function("drag_session", |b| {
        b.iter(|| {
            let mut detector = DragGestureDetector::new(DragRecorder::new());
            black_box(detector.feed_all(black_box(&frames)))
        })
    });

    c.bench_function("rotate_session", |b| {
        b.iter(|| {
            let mut detector = RotateGestureDetector::new(RotateRecorder::new());
            black_box(detector.feed_all(black_box(&frames)))
        })
    });

    c.bench_function("scale_session", |b| {
        b.iter(|| {
            let mut detector = ScaleGestureDetector::new(SimpleScaleGestureListener);
            black_box(detector.feed_all(black_box(&frames)))
        })
    });
}

criterion_group!(benches, bench_detectors);
criterion_main!(benches);
