//! Pinch-scale gesture recogniser.
//!
//! Tracks the fingers in slots 0 and 1 from the moment the second finger
//! touches down. Every move is measured against a baseline snapshot: the
//! frame at gesture start, replaced by a later frame whenever the listener
//! accepts it as the new baseline. Frames whose combined pressure drops
//! sharply relative to the baseline are treated as a finger lifting and are
//! not reported.
//!
//! Besides the span and scale factor, the detector reports each finger by
//! its on-screen role. The finger that was higher up (smaller y) when the
//! gesture started is the *top* finger for the whole gesture, even if the
//! fingers cross afterwards.

use crate::geometry::Point;
use crate::gesture_constants::{NEUTRAL_SCALE_FACTOR, PRESSURE_THRESHOLD};
use crate::input::{EventTime, FrameTransition, PointerFrame, SlotIndex};
use std::cell::Cell;

/// Callbacks for [`ScaleGestureDetector`].
///
/// Every method has a default body, so a listener only overrides what it
/// needs: begin is accepted, every update becomes the new baseline and the
/// end is ignored.
pub trait ScaleGestureListener {
    /// The second finger touched down. Returning false ignores this pinch.
    fn on_scale_begin(&mut self, _gesture: &ScaleGesture) -> bool {
        true
    }

    /// A move passed the pressure filter. Returning true makes this frame
    /// the baseline for the next measurement; returning false keeps
    /// measuring against the current baseline, which lets a listener wait
    /// until the change is large enough to act on.
    fn on_scale(&mut self, _gesture: &ScaleGesture) -> bool {
        true
    }

    /// A tracked finger lifted, or the input was cancelled.
    fn on_scale_end(&mut self, _gesture: &ScaleGesture, _cancelled: bool) {}
}

/// Listener that keeps every default: useful when only the detector's
/// getters are read after each frame.
#[derive(Default, Debug, Clone, Copy)]
pub struct SimpleScaleGestureListener;

impl ScaleGestureListener for SimpleScaleGestureListener {}

/// Tuning for [`ScaleGestureDetector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleGestureConfig {
    /// Minimum current/baseline pressure ratio for a move to be reported.
    pub pressure_threshold: f32,
}

impl Default for ScaleGestureConfig {
    fn default() -> Self {
        Self {
            pressure_threshold: PRESSURE_THRESHOLD,
        }
    }
}

impl ScaleGestureConfig {
    /// Negative thresholds are raised to zero; a non-finite one falls back to
    /// [`PRESSURE_THRESHOLD`].
    pub fn new(pressure_threshold: f32) -> Self {
        let pressure_threshold = if pressure_threshold.is_finite() {
            pressure_threshold.max(0.0)
        } else {
            log::warn!(
                "scale: pressure threshold {pressure_threshold} is not finite, using {PRESSURE_THRESHOLD}"
            );
            PRESSURE_THRESHOLD
        };
        Self { pressure_threshold }
    }
}

/// Measurement state of a pinch, handed to the listener.
#[derive(Default, Debug, Clone)]
pub struct ScaleGesture {
    in_progress: bool,
    /// Baseline snapshot.
    prev_frame: Option<PointerFrame>,
    /// Last measured frame.
    curr_frame: Option<PointerFrame>,
    focus: Point,
    /// Vector from slot 0 to slot 1 in the baseline.
    prev_finger_diff: Point,
    /// Vector from slot 0 to slot 1 in the current frame.
    curr_finger_diff: Point,
    curr_len: Cell<Option<f32>>,
    prev_len: Cell<Option<f32>>,
    scale_factor: Cell<Option<f32>>,
    curr_pressure: f32,
    prev_pressure: f32,
    time_delta: EventTime,
    first_begin: Point,
    second_begin: Point,
    first_cur: Point,
    second_cur: Point,
    /// Slot of the top finger, decided when the gesture began.
    top_slot: SlotIndex,
    first_up: bool,
    second_up: bool,
}

impl ScaleGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// A measurement is available: from begin until the end callback returns.
    fn measuring(&self) -> bool {
        self.curr_frame.is_some()
    }

    pub fn focus(&self) -> Point {
        self.focus
    }

    pub fn focus_x(&self) -> f32 {
        self.focus.x
    }

    pub fn focus_y(&self) -> f32 {
        self.focus.y
    }

    /// Distance between the two tracked fingers in the current frame.
    pub fn current_span(&self) -> f32 {
        if !self.measuring() {
            return 0.0;
        }
        memoized(&self.curr_len, || self.curr_finger_diff.length())
    }

    /// Distance between the two tracked fingers in the baseline.
    pub fn previous_span(&self) -> f32 {
        if !self.measuring() {
            return 0.0;
        }
        memoized(&self.prev_len, || self.prev_finger_diff.length())
    }

    /// `current_span / previous_span`.
    ///
    /// A baseline whose fingers sit on top of each other has no meaningful
    /// ratio; the neutral factor `1.0` is reported instead.
    pub fn scale_factor(&self) -> f32 {
        if !self.measuring() {
            return NEUTRAL_SCALE_FACTOR;
        }
        memoized(&self.scale_factor, || {
            let previous = self.previous_span();
            let factor = self.current_span() / previous;
            if previous > 0.0 && factor.is_finite() {
                factor
            } else {
                log::debug!("scale: degenerate baseline span {previous}, reporting neutral factor");
                NEUTRAL_SCALE_FACTOR
            }
        })
    }

    /// Milliseconds between the baseline and the current frame.
    pub fn time_delta(&self) -> EventTime {
        self.time_delta
    }

    /// Time of the current frame, zero when nothing is measured.
    pub fn event_time(&self) -> EventTime {
        self.curr_frame
            .as_ref()
            .map(PointerFrame::event_time)
            .unwrap_or_default()
    }

    /// Summed pressure of the tracked fingers in the current frame.
    pub fn current_pressure(&self) -> f32 {
        self.curr_pressure
    }

    /// Summed pressure of the tracked fingers in the baseline.
    pub fn previous_pressure(&self) -> f32 {
        self.prev_pressure
    }

    /// Whether the tracked finger in `slot` (0 or 1) has lifted.
    pub fn is_finger_up(&self, slot: SlotIndex) -> bool {
        match slot {
            0 => self.first_up,
            1 => self.second_up,
            _ => false,
        }
    }

    /// Slot of the finger designated as top.
    pub fn top_slot(&self) -> SlotIndex {
        self.top_slot
    }

    pub fn top_finger(&self) -> Point {
        self.finger(self.top_slot)
    }

    pub fn top_finger_x(&self) -> f32 {
        self.top_finger().x
    }

    pub fn top_finger_y(&self) -> f32 {
        self.top_finger().y
    }

    /// Movement of the top finger since the gesture began.
    pub fn top_finger_delta(&self) -> Point {
        self.finger_delta(self.top_slot)
    }

    pub fn top_finger_delta_x(&self) -> f32 {
        self.top_finger_delta().x
    }

    pub fn top_finger_delta_y(&self) -> f32 {
        self.top_finger_delta().y
    }

    pub fn bottom_finger(&self) -> Point {
        self.finger(1 - self.top_slot)
    }

    pub fn bottom_finger_x(&self) -> f32 {
        self.bottom_finger().x
    }

    pub fn bottom_finger_y(&self) -> f32 {
        self.bottom_finger().y
    }

    /// Movement of the bottom finger since the gesture began.
    pub fn bottom_finger_delta(&self) -> Point {
        self.finger_delta(1 - self.top_slot)
    }

    pub fn bottom_finger_delta_x(&self) -> f32 {
        self.bottom_finger_delta().x
    }

    pub fn bottom_finger_delta_y(&self) -> f32 {
        self.bottom_finger_delta().y
    }

    fn finger(&self, slot: SlotIndex) -> Point {
        if !self.measuring() {
            return Point::ZERO;
        }
        if slot == 0 {
            self.first_cur
        } else {
            self.second_cur
        }
    }

    fn finger_delta(&self, slot: SlotIndex) -> Point {
        if !self.measuring() {
            return Point::ZERO;
        }
        if slot == 0 {
            self.first_cur - self.first_begin
        } else {
            self.second_cur - self.second_begin
        }
    }

    /// Starts tracking slots 0 and 1 of `frame` and makes it the baseline.
    fn arm(&mut self, frame: &PointerFrame) -> bool {
        let (Some(first), Some(second)) = (frame.position(0), frame.position(1)) else {
            return false;
        };
        self.reset();
        self.first_begin = first;
        self.second_begin = second;
        self.first_cur = first;
        self.second_cur = second;
        self.top_slot = if second.y < first.y { 1 } else { 0 };
        self.prev_frame = Some(frame.clone());
        self.set_context(frame)
    }

    /// Measures `curr` against the baseline snapshot and makes it current.
    fn set_context(&mut self, curr: &PointerFrame) -> bool {
        let Some(prev) = self.prev_frame.as_ref() else {
            return false;
        };
        let (Some(p0), Some(p1), Some(c0), Some(c1)) = (
            prev.position(0),
            prev.position(1),
            curr.position(0),
            curr.position(1),
        ) else {
            log::warn!("scale: frame without two tracked pointers ignored");
            return false;
        };
        let prev_pressure =
            prev.pressure(0).unwrap_or_default() + prev.pressure(1).unwrap_or_default();
        let prev_time = prev.event_time();

        self.curr_len.set(None);
        self.prev_len.set(None);
        self.scale_factor.set(None);

        self.prev_finger_diff = p1 - p0;
        self.curr_finger_diff = c1 - c0;
        self.focus = c0 + self.curr_finger_diff * 0.5;
        self.time_delta = curr.event_time().saturating_sub(prev_time);
        self.curr_pressure =
            curr.pressure(0).unwrap_or_default() + curr.pressure(1).unwrap_or_default();
        self.prev_pressure = prev_pressure;
        self.first_cur = c0;
        self.second_cur = c1;
        self.curr_frame = Some(curr.clone());
        true
    }

    fn passes_pressure_filter(&self, threshold: f32) -> bool {
        if self.prev_pressure > 0.0 {
            self.curr_pressure / self.prev_pressure > threshold
        } else {
            self.curr_pressure > 0.0
        }
    }
}

fn memoized(cell: &Cell<Option<f32>>, compute: impl FnOnce() -> f32) -> f32 {
    if let Some(value) = cell.get() {
        return value;
    }
    let value = compute();
    cell.set(Some(value));
    value
}

/// Recognises two-finger pinch scaling.
pub struct ScaleGestureDetector<L> {
    gesture: ScaleGesture,
    config: ScaleGestureConfig,
    listener: L,
}

impl<L: ScaleGestureListener> ScaleGestureDetector<L> {
    pub fn new(listener: L) -> Self {
        Self::with_config(listener, ScaleGestureConfig::default())
    }

    pub fn with_config(listener: L, config: ScaleGestureConfig) -> Self {
        Self {
            gesture: ScaleGesture::new(),
            config,
            listener,
        }
    }

    pub fn config(&self) -> &ScaleGestureConfig {
        &self.config
    }

    pub fn gesture(&self) -> &ScaleGesture {
        &self.gesture
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    pub fn is_in_progress(&self) -> bool {
        self.gesture.is_in_progress()
    }

    pub fn scale_factor(&self) -> f32 {
        self.gesture.scale_factor()
    }

    pub fn focus(&self) -> Point {
        self.gesture.focus()
    }

    /// Drops all state without notifying the listener.
    pub fn reset(&mut self) {
        self.gesture.reset();
    }

    /// Processes one frame. Returns true when the frame started, updated
    /// or ended a pinch.
    pub fn feed(&mut self, frame: &PointerFrame) -> bool {
        let transition = frame.transition();

        if !self.gesture.in_progress {
            return match transition {
                FrameTransition::PointerDown(slot) if slot < 2 => self.begin(frame),
                _ => false,
            };
        }

        match transition {
            FrameTransition::PointerUp(slot) if slot < 2 => self.lift(frame, Some(slot)),
            FrameTransition::LastUp => self.lift(frame, None),
            // A fresh touch means the end of the previous one was lost.
            FrameTransition::Cancel | FrameTransition::FirstDown => {
                self.end(true);
                true
            }
            FrameTransition::Move => self.on_move(frame),
            FrameTransition::PointerDown(_) | FrameTransition::PointerUp(_) => false,
        }
    }

    fn begin(&mut self, frame: &PointerFrame) -> bool {
        if !self.gesture.arm(frame) {
            return false;
        }
        let accepted = self.listener.on_scale_begin(&self.gesture);
        log::trace!(
            "scale begin, span={:.1} accepted={}",
            self.gesture.current_span(),
            accepted
        );
        if accepted {
            self.gesture.in_progress = true;
        } else {
            self.gesture.reset();
        }
        accepted
    }

    fn on_move(&mut self, frame: &PointerFrame) -> bool {
        if !self.gesture.set_context(frame) {
            return false;
        }
        if !self
            .gesture
            .passes_pressure_filter(self.config.pressure_threshold)
        {
            log::trace!(
                "scale: filtered move, pressure {} -> {}",
                self.gesture.prev_pressure,
                self.gesture.curr_pressure
            );
            return true;
        }
        if self.listener.on_scale(&self.gesture) {
            self.gesture.prev_frame = Some(frame.clone());
        }
        true
    }

    /// Ends the pinch because a tracked finger lifted. `lifted` is `None`
    /// when the last pointer went up.
    fn lift(&mut self, frame: &PointerFrame, lifted: Option<SlotIndex>) -> bool {
        match lifted {
            Some(0) => self.gesture.first_up = true,
            Some(_) => self.gesture.second_up = true,
            None => {
                self.gesture.first_up = true;
                self.gesture.second_up = true;
            }
        }

        if frame.pointer_count() >= 2 {
            self.gesture.set_context(frame);
        }
        let remaining = match lifted {
            Some(0) => frame.position(1),
            _ => frame.position(0),
        };
        if let Some(position) = remaining {
            self.gesture.focus = position;
        }

        self.end(false);
        true
    }

    fn end(&mut self, cancelled: bool) {
        log::trace!("scale end, cancelled={}", cancelled);
        self.listener.on_scale_end(&self.gesture, cancelled);
        self.gesture.reset();
    }
}
