//! Scripted pointer input.
//!
//! A [`FrameScript`] keeps the set of pointers that are down and emits one
//! frame per step, advancing the clock by a fixed interval. Steps address
//! pointers by slot, exactly as the detectors see them.

use sdklite_gesture::{
    DragGestureDetector, DragGestureListener, EventTime, PointerAction, PointerFrame,
    PointerSample, RotateGestureDetector, RotateGestureListener, ScaleGestureDetector,
    ScaleGestureListener, SlotIndex,
};

/// Default spacing between scripted frames, one 60 Hz vsync.
pub const FRAME_INTERVAL_MS: EventTime = 16;

/// Builder for a sequence of pointer frames.
#[derive(Clone, Debug)]
pub struct FrameScript {
    pointers: Vec<PointerSample>,
    frames: Vec<PointerFrame>,
    time: EventTime,
    interval: EventTime,
}

impl Default for FrameScript {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScript {
    pub fn new() -> Self {
        Self {
            pointers: Vec::new(),
            frames: Vec::new(),
            time: 0,
            interval: FRAME_INTERVAL_MS,
        }
    }

    /// Sets the clock increment applied after every frame.
    pub fn with_interval(mut self, interval: EventTime) -> Self {
        self.interval = interval;
        self
    }

    /// Adds a pointer at the end of the slot list.
    pub fn down(self, x: f32, y: f32) -> Self {
        self.down_sample(PointerSample::new(x, y))
    }

    pub fn down_sample(mut self, sample: PointerSample) -> Self {
        self.pointers.push(sample);
        let slot = self.pointers.len() - 1;
        self.push(PointerAction::PointerDown(slot))
    }

    /// Moves every pointer to the given positions, one per slot.
    pub fn move_to(mut self, positions: &[(f32, f32)]) -> Self {
        assert_eq!(
            positions.len(),
            self.pointers.len(),
            "move_to needs one position per active pointer"
        );
        for (sample, &(x, y)) in self.pointers.iter_mut().zip(positions) {
            sample.position.x = x;
            sample.position.y = y;
        }
        self.push(PointerAction::Move)
    }

    /// Replaces every pointer sample, pressure included.
    pub fn move_samples(mut self, samples: &[PointerSample]) -> Self {
        assert_eq!(
            samples.len(),
            self.pointers.len(),
            "move_samples needs one sample per active pointer"
        );
        self.pointers.copy_from_slice(samples);
        self.push(PointerAction::Move)
    }

    /// Translates every pointer by `(dx, dy)`.
    pub fn move_by(mut self, dx: f32, dy: f32) -> Self {
        for sample in &mut self.pointers {
            sample.position.x += dx;
            sample.position.y += dy;
        }
        self.push(PointerAction::Move)
    }

    /// Repeats the current positions in a new move frame.
    pub fn hold(self) -> Self {
        self.push(PointerAction::Move)
    }

    /// Lifts the pointer in `slot`. Lifting the last pointer emits `End`.
    pub fn up(mut self, slot: SlotIndex) -> Self {
        assert!(slot < self.pointers.len(), "no pointer in slot {slot}");
        let action = if self.pointers.len() == 1 {
            PointerAction::End
        } else {
            PointerAction::PointerUp(slot)
        };
        self = self.push(action);
        self.pointers.remove(slot);
        self
    }

    /// Lifts every remaining pointer, highest slot first.
    pub fn release_all(mut self) -> Self {
        while !self.pointers.is_empty() {
            let slot = self.pointers.len() - 1;
            self = self.up(slot);
        }
        self
    }

    pub fn cancel(mut self) -> Self {
        self.frames.push(PointerFrame::cancel(self.time));
        self.time += self.interval;
        self.pointers.clear();
        self
    }

    pub fn frames(&self) -> &[PointerFrame] {
        &self.frames
    }

    pub fn build(self) -> Vec<PointerFrame> {
        self.frames
    }

    fn push(mut self, action: PointerAction) -> Self {
        let frame = PointerFrame::new(action, self.pointers.iter().copied(), self.time)
            .unwrap_or_else(|err| panic!("scripted frame {action:?} is invalid: {err}"));
        log::trace!("scripted {:?} at {}ms", action, self.time);
        self.frames.push(frame);
        self.time += self.interval;
        self
    }
}

/// Anything that consumes pointer frames.
pub trait FrameSink {
    fn feed_frame(&mut self, frame: &PointerFrame) -> bool;

    /// Feeds every frame and returns how many were consumed.
    fn feed_all(&mut self, frames: &[PointerFrame]) -> usize {
        frames
            .iter()
            .filter(|frame| self.feed_frame(frame))
            .count()
    }
}

impl<L: DragGestureListener> FrameSink for DragGestureDetector<L> {
    fn feed_frame(&mut self, frame: &PointerFrame) -> bool {
        self.feed(frame)
    }
}

impl<L: RotateGestureListener> FrameSink for RotateGestureDetector<L> {
    fn feed_frame(&mut self, frame: &PointerFrame) -> bool {
        self.feed(frame)
    }
}

impl<L: ScaleGestureListener> FrameSink for ScaleGestureDetector<L> {
    fn feed_frame(&mut self, frame: &PointerFrame) -> bool {
        self.feed(frame)
    }
}
