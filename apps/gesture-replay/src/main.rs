//! Replays canned touch sessions through all three detectors and logs what
//! each of them reports.
//!
//! Usage: `gesture-replay [pan|pinch|twist|all]` (default `all`).
//! Set `RUST_LOG=trace` to also see the detectors' own traces.

use anyhow::{bail, Context, Result};
use sdklite_gesture::prelude::*;

struct PanLogger;

impl DragGestureListener for PanLogger {
    fn on_drag_begin(&mut self, gesture: &DragGesture) -> bool {
        log::info!("drag   begin  focus={:?}", gesture.focus());
        true
    }

    fn on_drag(&mut self, gesture: &DragGesture) -> bool {
        log::info!(
            "drag   move   dx={:+.1} dy={:+.1}",
            gesture.delta_x(),
            gesture.delta_y()
        );
        true
    }

    fn on_drag_end(&mut self, _gesture: &DragGesture, cancelled: bool) {
        log::info!("drag   end    cancelled={}", cancelled);
    }
}

struct TwistLogger {
    total: f32,
}

impl RotateGestureListener for TwistLogger {
    fn on_rotate_begin(&mut self, gesture: &RotateGesture) -> bool {
        self.total = 0.0;
        log::info!("rotate begin  pivot={:?}", gesture.pivot());
        true
    }

    fn on_rotate(&mut self, gesture: &RotateGesture) -> bool {
        self.total += gesture.delta_rotation();
        log::info!(
            "rotate move   delta={:+.2} total={:+.2}",
            gesture.delta_rotation(),
            self.total
        );
        true
    }

    fn on_rotate_end(&mut self, _gesture: &RotateGesture) {
        log::info!("rotate end    total={:+.2}", self.total);
    }
}

/// Accumulates a zoom level, only re-basing once the change is noticeable.
struct ZoomLogger {
    zoom: f32,
}

impl ScaleGestureListener for ZoomLogger {
    fn on_scale_begin(&mut self, gesture: &ScaleGesture) -> bool {
        log::info!(
            "scale  begin  span={:.1} top={:?} bottom={:?}",
            gesture.current_span(),
            gesture.top_finger(),
            gesture.bottom_finger()
        );
        true
    }

    fn on_scale(&mut self, gesture: &ScaleGesture) -> bool {
        let factor = gesture.scale_factor();
        if (factor - 1.0).abs() < 0.05 {
            return false;
        }
        self.zoom *= factor;
        log::info!(
            "scale  move   factor={:.3} zoom={:.3} focus=({:.1}, {:.1}) dt={}ms",
            factor,
            self.zoom,
            gesture.focus_x(),
            gesture.focus_y(),
            gesture.time_delta()
        );
        true
    }

    fn on_scale_end(&mut self, gesture: &ScaleGesture, cancelled: bool) {
        log::info!(
            "scale  end    zoom={:.3} cancelled={} top moved {:?}",
            self.zoom,
            cancelled,
            gesture.top_finger_delta()
        );
    }
}

/// Per-pointer events for one canned session.
fn session(name: &str) -> Result<Vec<PointerEvent>> {
    let mut events = Vec::new();
    let mut time = 0;
    let mut push = |id, kind, x: f32, y: f32| {
        events.push(PointerEvent::new(id, kind, Point::new(x, y)).at_time(time));
        time += 16;
    };

    match name {
        "pan" => {
            push(1, PointerEventKind::Down, 100.0, 100.0);
            for step in 1..=10 {
                let step = step as f32;
                push(1, PointerEventKind::Move, 100.0 + 12.0 * step, 100.0 + 4.0 * step);
            }
            push(1, PointerEventKind::Up, 220.0, 140.0);
        }
        "pinch" => {
            push(1, PointerEventKind::Down, 200.0, 150.0);
            push(2, PointerEventKind::Down, 200.0, 250.0);
            for step in 1..=10 {
                let spread = 10.0 * step as f32;
                push(1, PointerEventKind::Move, 200.0, 150.0 - spread);
                push(2, PointerEventKind::Move, 200.0, 250.0 + spread);
            }
            push(2, PointerEventKind::Up, 200.0, 350.0);
            push(1, PointerEventKind::Up, 200.0, 50.0);
        }
        "twist" => {
            push(1, PointerEventKind::Down, 100.0, 200.0);
            push(2, PointerEventKind::Down, 300.0, 200.0);
            for step in 1..=9 {
                let angle = (10.0 * step as f32).to_radians();
                let (dx, dy) = (100.0 * angle.cos(), 100.0 * angle.sin());
                push(1, PointerEventKind::Move, 200.0 - dx, 200.0 - dy);
                push(2, PointerEventKind::Move, 200.0 + dx, 200.0 + dy);
            }
            push(1, PointerEventKind::Cancel, 0.0, 0.0);
        }
        other => bail!("unknown session '{other}', expected pan, pinch, twist or all"),
    }

    Ok(events)
}

fn replay(name: &str) -> Result<()> {
    println!("--- {name} ---");
    let mut tracker = PointerFrameTracker::new();
    let mut drag = DragGestureDetector::new(PanLogger);
    let mut rotate = RotateGestureDetector::new(TwistLogger { total: 0.0 });
    let mut scale = ScaleGestureDetector::new(ZoomLogger { zoom: 1.0 });

    for event in session(name)? {
        let frame = tracker
            .dispatch(event)
            .with_context(|| format!("replaying {name}: {event:?}"))?;
        drag.feed(&frame);
        rotate.feed(&frame);
        scale.feed(&frame);
    }

    println!(
        "final zoom {:.3}, rotation {:+.2} deg",
        scale.listener().zoom,
        rotate.listener().total
    );
    Ok(())
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let requested = std::env::args().nth(1).unwrap_or_else(|| "all".to_string());
    let sessions: Vec<&str> = match requested.as_str() {
        "all" => vec!["pan", "pinch", "twist"],
        other => vec![other],
    };

    for name in sessions {
        replay(name)?;
    }
    Ok(())
}
