//! Two-finger rotation recogniser.
//!
//! Rotation is the direction of the vector from the finger in slot 1 to
//! the finger in slot 0. The detector arms whenever a pointer transition
//! leaves exactly two fingers down, and freezes the pivot (their midpoint)
//! at that moment.

use crate::geometry::{wrap_degrees, Point};
use crate::input::{FrameTransition, PointerFrame, SlotIndex};

/// Callbacks for [`RotateGestureDetector`].
pub trait RotateGestureListener {
    /// First move with two fingers armed. Returning false rejects the
    /// rotation for the rest of the touch.
    fn on_rotate_begin(&mut self, gesture: &RotateGesture) -> bool;

    /// A move during an accepted rotation. Returning false stops updates.
    fn on_rotate(&mut self, gesture: &RotateGesture) -> bool;

    /// The touch ended or was cancelled.
    fn on_rotate_end(&mut self, _gesture: &RotateGesture) {}
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct RotateGesture {
    pivot: Option<Point>,
    fingers_ready: bool,
    /// Angle the next delta is measured from, in degrees.
    rotation_prev: f32,
    rotation_cur: f32,
    in_progress: bool,
    accepted: bool,
    began: bool,
}

impl RotateGesture {
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

    /// Exactly two fingers are down and moves are measured.
    pub fn is_armed(&self) -> bool {
        self.fingers_ready
    }

    /// Rotation in degrees since the last accepted frame, in `(-180, 180]`.
    pub fn delta_rotation(&self) -> f32 {
        if !self.in_progress {
            return 0.0;
        }
        wrap_degrees(self.rotation_cur - self.rotation_prev)
    }

    /// Current angle of the finger vector in degrees.
    pub fn rotation(&self) -> f32 {
        if !self.in_progress {
            return 0.0;
        }
        self.rotation_cur
    }

    /// Midpoint of the two fingers when the detector armed.
    pub fn pivot(&self) -> Option<Point> {
        if !self.in_progress {
            return None;
        }
        self.pivot
    }
}

/// Recognises two-finger rotation around a fixed pivot.
pub struct RotateGestureDetector<L> {
    gesture: RotateGesture,
    listener: L,
}

impl<L: RotateGestureListener> RotateGestureDetector<L> {
    pub fn new(listener: L) -> Self {
        Self {
            gesture: RotateGesture::new(),
            listener,
        }
    }

    pub fn gesture(&self) -> &RotateGesture {
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

    pub fn delta_rotation(&self) -> f32 {
        self.gesture.delta_rotation()
    }

    pub fn pivot(&self) -> Option<Point> {
        self.gesture.pivot()
    }

    /// Drops all state without notifying the listener.
    pub fn reset(&mut self) {
        self.gesture.reset();
    }

    /// Processes one frame. Returns true for moves measured while armed
    /// and for a cancel that ended a rotation.
    pub fn feed(&mut self, frame: &PointerFrame) -> bool {
        match frame.transition() {
            FrameTransition::Cancel => self.cancel(),
            FrameTransition::FirstDown | FrameTransition::LastUp => {
                self.finish();
                false
            }
            FrameTransition::PointerDown(_) => {
                self.gesture.fingers_ready = frame.pointer_count() == 2;
                if self.gesture.fingers_ready {
                    self.arm(frame, None);
                }
                false
            }
            FrameTransition::PointerUp(slot) => {
                self.gesture.fingers_ready = frame.pointer_count() == 3;
                if self.gesture.fingers_ready {
                    self.arm(frame, Some(slot));
                }
                false
            }
            FrameTransition::Move => self.on_move(frame),
        }
    }

    fn arm(&mut self, frame: &PointerFrame, lifted: Option<SlotIndex>) {
        let mut remaining = frame
            .pointers()
            .iter()
            .enumerate()
            .filter(|(slot, _)| Some(*slot) != lifted)
            .map(|(_, sample)| sample.position);
        let (Some(first), Some(second)) = (remaining.next(), remaining.next()) else {
            self.gesture.fingers_ready = false;
            return;
        };
        let rotation = (first - second).angle_degrees();
        self.gesture.rotation_prev = rotation;
        self.gesture.rotation_cur = rotation;
        self.gesture.pivot = Some(first.midpoint(second));
        log::trace!("rotate armed at {:.1} deg", rotation);
    }

    fn on_move(&mut self, frame: &PointerFrame) -> bool {
        if !self.gesture.fingers_ready {
            return false;
        }
        let (Some(first), Some(second)) = (frame.position(0), frame.position(1)) else {
            log::warn!("rotate: armed move frame has fewer than two pointers");
            return false;
        };
        self.gesture.rotation_cur = (first - second).angle_degrees();

        if !self.gesture.in_progress {
            self.gesture.in_progress = true;
            self.gesture.accepted = self.listener.on_rotate_begin(&self.gesture);
            self.gesture.began = self.gesture.accepted;
            log::trace!("rotate begin, accepted={}", self.gesture.accepted);
        } else if self.gesture.accepted {
            self.gesture.accepted = self.listener.on_rotate(&self.gesture);
        }

        if self.gesture.accepted {
            self.gesture.rotation_prev = self.gesture.rotation_cur;
        }

        true
    }

    fn cancel(&mut self) -> bool {
        let cancelled = self.gesture.in_progress;
        self.finish();
        cancelled
    }

    fn finish(&mut self) {
        let owes_end = self.gesture.in_progress && self.gesture.began;
        self.gesture.in_progress = false;
        self.gesture.accepted = false;
        if owes_end {
            log::trace!("rotate end");
            self.listener.on_rotate_end(&self.gesture);
        }
        self.gesture.reset();
    }
}
