use crate::error::GestureError;
use crate::geometry::{centroid, Point};
use crate::gesture_constants::{DEFAULT_PRESSURE, INLINE_POINTERS};
use smallvec::SmallVec;

/// Stable identity a platform assigns to a finger for the length of a touch.
pub type PointerId = u64;

/// Position of a pointer within a frame's pointer list.
pub type SlotIndex = usize;

/// Monotonic event time in milliseconds.
pub type EventTime = i64;

/// One pointer in a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub position: Point,
    pub pressure: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            pressure: DEFAULT_PRESSURE,
        }
    }

    pub fn at(position: Point) -> Self {
        Self {
            position,
            pressure: DEFAULT_PRESSURE,
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = pressure;
        self
    }
}

/// What happened in a frame.
///
/// For `PointerDown` the new pointer is already part of the frame; for
/// `PointerUp` and `End` the lifted pointer is still part of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    PointerDown(SlotIndex),
    PointerUp(SlotIndex),
    Move,
    Cancel,
    /// The last pointer left the surface.
    End,
}

/// Normalized action, taking the pointer count into account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameTransition {
    /// The first pointer touched down.
    FirstDown,
    /// Another pointer joined the ones already down.
    PointerDown(SlotIndex),
    /// A pointer lifted while others stay down.
    PointerUp(SlotIndex),
    /// The last pointer lifted.
    LastUp,
    Move,
    Cancel,
}

pub type PointerSamples = SmallVec<[PointerSample; INLINE_POINTERS]>;

/// One step of pointer input: every active pointer plus the action that
/// produced the step.
///
/// Frames are validated on construction and immutable afterwards, so the
/// detectors can keep copies of them as measurement snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerFrame {
    action: PointerAction,
    pointers: PointerSamples,
    event_time: EventTime,
}

impl PointerFrame {
    pub fn new<I>(action: PointerAction, pointers: I, event_time: EventTime) -> Result<Self, GestureError>
    where
        I: IntoIterator<Item = PointerSample>,
    {
        let pointers: PointerSamples = pointers.into_iter().collect();
        validate(action, &pointers)?;
        Ok(Self {
            action,
            pointers,
            event_time,
        })
    }

    pub fn down<I>(slot: SlotIndex, pointers: I, event_time: EventTime) -> Result<Self, GestureError>
    where
        I: IntoIterator<Item = PointerSample>,
    {
        Self::new(PointerAction::PointerDown(slot), pointers, event_time)
    }

    pub fn up<I>(slot: SlotIndex, pointers: I, event_time: EventTime) -> Result<Self, GestureError>
    where
        I: IntoIterator<Item = PointerSample>,
    {
        Self::new(PointerAction::PointerUp(slot), pointers, event_time)
    }

    pub fn moved<I>(pointers: I, event_time: EventTime) -> Result<Self, GestureError>
    where
        I: IntoIterator<Item = PointerSample>,
    {
        Self::new(PointerAction::Move, pointers, event_time)
    }

    pub fn end<I>(pointers: I, event_time: EventTime) -> Result<Self, GestureError>
    where
        I: IntoIterator<Item = PointerSample>,
    {
        Self::new(PointerAction::End, pointers, event_time)
    }

    /// A cancel frame carries no pointers.
    pub fn cancel(event_time: EventTime) -> Self {
        Self {
            action: PointerAction::Cancel,
            pointers: SmallVec::new(),
            event_time,
        }
    }

    pub fn action(&self) -> PointerAction {
        self.action
    }

    pub fn event_time(&self) -> EventTime {
        self.event_time
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointers(&self) -> &[PointerSample] {
        &self.pointers
    }

    pub fn sample(&self, slot: SlotIndex) -> Option<&PointerSample> {
        self.pointers.get(slot)
    }

    pub fn position(&self, slot: SlotIndex) -> Option<Point> {
        self.pointers.get(slot).map(|sample| sample.position)
    }

    pub fn pressure(&self, slot: SlotIndex) -> Option<f32> {
        self.pointers.get(slot).map(|sample| sample.pressure)
    }

    pub fn transition(&self) -> FrameTransition {
        let count = self.pointers.len();
        match self.action {
            PointerAction::PointerDown(_) if count == 1 => FrameTransition::FirstDown,
            PointerAction::PointerDown(slot) => FrameTransition::PointerDown(slot),
            PointerAction::PointerUp(_) if count <= 1 => FrameTransition::LastUp,
            PointerAction::PointerUp(slot) => FrameTransition::PointerUp(slot),
            PointerAction::End => FrameTransition::LastUp,
            PointerAction::Move => FrameTransition::Move,
            PointerAction::Cancel => FrameTransition::Cancel,
        }
    }

    /// Centroid of every pointer in the frame.
    pub fn focus(&self) -> Option<Point> {
        centroid(self.pointers.iter().map(|sample| sample.position))
    }

    /// Centroid of every pointer except the one in `ignored`.
    pub fn focus_excluding(&self, ignored: SlotIndex) -> Option<Point> {
        centroid(
            self.pointers
                .iter()
                .enumerate()
                .filter(|(slot, _)| *slot != ignored)
                .map(|(_, sample)| sample.position),
        )
    }
}

fn validate(action: PointerAction, pointers: &[PointerSample]) -> Result<(), GestureError> {
    if pointers.is_empty() && action != PointerAction::Cancel {
        return Err(GestureError::EmptyFrame);
    }
    if let PointerAction::PointerDown(slot) | PointerAction::PointerUp(slot) = action {
        if slot >= pointers.len() {
            return Err(GestureError::SlotOutOfRange {
                slot,
                len: pointers.len(),
            });
        }
    }
    for (slot, sample) in pointers.iter().enumerate() {
        if !sample.position.is_finite() {
            return Err(GestureError::NonFinitePosition { slot });
        }
        if !(0.0..=1.0).contains(&sample.pressure) {
            return Err(GestureError::PressureOutOfRange {
                slot,
                pressure: sample.pressure,
            });
        }
    }
    Ok(())
}
