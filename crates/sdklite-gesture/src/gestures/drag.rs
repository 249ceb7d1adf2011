//! Drag (pan) gesture recogniser.
//!
//! Follows the focus point, the centroid of every pointer that is down, and
//! reports how far it moved since the last frame the listener accepted.
//! Adding or lifting a finger re-bases the focus so the centroid jump caused
//! by the pointer set changing is never reported as movement.

use crate::geometry::Point;
use crate::input::{FrameTransition, PointerFrame};

/// Callbacks for [`DragGestureDetector`].
pub trait DragGestureListener {
    /// The first move after a touch. Returning false rejects the drag: no
    /// further callbacks are made until the next touch.
    fn on_drag_begin(&mut self, gesture: &DragGesture) -> bool;

    /// A move during an accepted drag. Returning false stops updates; the
    /// drag still ends with [`on_drag_end`](Self::on_drag_end).
    fn on_drag(&mut self, gesture: &DragGesture) -> bool;

    /// All pointers lifted or the input was cancelled.
    fn on_drag_end(&mut self, _gesture: &DragGesture, _cancelled: bool) {}
}

/// Measurement state of a drag, handed to the listener.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    /// Focus the next delta is measured from.
    focus_prev: Option<Point>,
    /// Focus at the last move.
    focus_cur: Option<Point>,
    pointer_active: bool,
    in_progress: bool,
    /// Last begin/update answer.
    accepted: bool,
    /// Begin was accepted, so an end is owed.
    began: bool,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// A touch is down and moves are being tracked.
    pub fn is_pointer_active(&self) -> bool {
        self.pointer_active
    }

    /// Current focus point while a drag is in progress.
    pub fn focus(&self) -> Option<Point> {
        if !self.in_progress {
            return None;
        }
        self.focus_cur
    }

    /// Focus movement since the last accepted frame, zero when idle.
    pub fn delta(&self) -> Point {
        if !self.in_progress {
            return Point::ZERO;
        }
        match (self.focus_prev, self.focus_cur) {
            (Some(prev), Some(cur)) => cur - prev,
            _ => Point::ZERO,
        }
    }

    pub fn delta_x(&self) -> f32 {
        self.delta().x
    }

    pub fn delta_y(&self) -> f32 {
        self.delta().y
    }
}

/// Recognises one- or multi-finger panning.
pub struct DragGestureDetector<L> {
    gesture: DragGesture,
    listener: L,
}

impl<L: DragGestureListener> DragGestureDetector<L> {
    pub fn new(listener: L) -> Self {
        Self {
            gesture: DragGesture::new(),
            listener,
        }
    }

    pub fn gesture(&self) -> &DragGesture {
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

    pub fn delta_x(&self) -> f32 {
        self.gesture.delta_x()
    }

    pub fn delta_y(&self) -> f32 {
        self.gesture.delta_y()
    }

    /// Drops all state without notifying the listener.
    pub fn reset(&mut self) {
        self.gesture.reset();
    }

    /// Processes one frame. Returns true when a move was consumed by an
    /// accepted drag.
    pub fn feed(&mut self, frame: &PointerFrame) -> bool {
        match frame.transition() {
            FrameTransition::Cancel | FrameTransition::LastUp => {
                self.finish();
                false
            }
            FrameTransition::FirstDown => {
                self.finish();
                self.gesture.pointer_active = true;
                false
            }
            FrameTransition::PointerDown(_) => {
                if let Some(focus) = frame.focus() {
                    self.gesture.focus_prev = Some(focus);
                }
                false
            }
            FrameTransition::PointerUp(slot) => {
                match frame.focus_excluding(slot) {
                    Some(focus) => {
                        self.gesture.focus_prev = Some(focus);
                        self.gesture.focus_cur = Some(focus);
                    }
                    None => log::warn!("drag: pointer-up frame leaves no pointer to focus on"),
                }
                false
            }
            FrameTransition::Move => self.on_move(frame),
        }
    }

    fn on_move(&mut self, frame: &PointerFrame) -> bool {
        if !self.gesture.pointer_active {
            return false;
        }
        let Some(focus) = frame.focus() else {
            log::warn!("drag: move frame without pointers ignored");
            return false;
        };
        self.gesture.focus_cur = Some(focus);

        if !self.gesture.in_progress {
            self.gesture.in_progress = true;
            self.gesture.accepted = self.listener.on_drag_begin(&self.gesture);
            self.gesture.began = self.gesture.accepted;
            log::trace!("drag begin at {:?}, accepted={}", focus, self.gesture.accepted);
            if self.gesture.accepted {
                self.gesture.focus_prev = Some(focus);
            }
        } else if self.gesture.accepted {
            self.gesture.accepted = self.listener.on_drag(&self.gesture);
            if self.gesture.accepted {
                self.gesture.focus_prev = Some(focus);
            }
        }

        self.gesture.in_progress && self.gesture.accepted
    }

    fn finish(&mut self) {
        let owes_end = self.gesture.in_progress && self.gesture.began;
        self.gesture.in_progress = false;
        self.gesture.accepted = false;
        self.gesture.began = false;
        if owes_end {
            log::trace!("drag end");
            self.listener.on_drag_end(&self.gesture, true);
        }
        self.gesture.focus_prev = None;
        self.gesture.focus_cur = None;
        self.gesture.pointer_active = false;
    }
}
