//! Builds [`PointerFrame`]s out of per-pointer platform events.
//!
//! Platforms report touches one pointer at a time, keyed by a pointer id
//! that stays stable while the finger is down. The detectors instead want
//! the whole set of active pointers per step, addressed by slot. The
//! tracker keeps the active set in touch-down order and compacts it when a
//! pointer lifts, so slot 0 is always the oldest finger still down.

use super::types::{
    EventTime, PointerAction, PointerFrame, PointerId, PointerSample, SlotIndex,
};
use crate::error::GestureError;
use crate::geometry::Point;
use crate::gesture_constants::{DEFAULT_PRESSURE, INLINE_POINTERS};
use smallvec::SmallVec;
use web_time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single-pointer event as a platform delivers it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub pressure: f32,
    /// Event time in milliseconds; stamped by the tracker when absent.
    pub time_ms: Option<EventTime>,
}

impl PointerEvent {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            pressure: DEFAULT_PRESSURE,
            time_ms: None,
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn at_time(mut self, time_ms: EventTime) -> Self {
        self.time_ms = Some(time_ms);
        self
    }
}

/// Turns platform pointer events into frames the detectors can consume.
pub struct PointerFrameTracker {
    /// Active pointers ordered by touch-down time. The index is the slot.
    pointers: SmallVec<[(PointerId, PointerSample); INLINE_POINTERS]>,
    origin: Instant,
}

impl PointerFrameTracker {
    pub fn new() -> Self {
        Self {
            pointers: SmallVec::new(),
            origin: Instant::now(),
        }
    }

    /// Number of pointers currently down.
    pub fn active_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Slot currently held by `id`.
    pub fn slot_of(&self, id: PointerId) -> Option<SlotIndex> {
        self.pointers.iter().position(|(pointer, _)| *pointer == id)
    }

    /// Forgets every active pointer without producing a frame.
    pub fn reset(&mut self) {
        self.pointers.clear();
    }

    /// Milliseconds since the tracker was created.
    pub fn elapsed_ms(&self) -> EventTime {
        self.origin.elapsed().as_millis() as EventTime
    }

    /// Applies `event` and returns the frame describing the resulting step.
    ///
    /// On error the active set is left untouched.
    pub fn dispatch(&mut self, event: PointerEvent) -> Result<PointerFrame, GestureError> {
        let time = event.time_ms.unwrap_or_else(|| self.elapsed_ms());
        let sample = PointerSample::at(event.position).with_pressure(clamp_pressure(event.pressure));

        match event.kind {
            PointerEventKind::Down => {
                if self.slot_of(event.id).is_some() {
                    return Err(GestureError::DuplicatePointer { id: event.id });
                }
                let slot = self.pointers.len();
                let frame = PointerFrame::down(slot, self.samples().chain([sample]), time)?;
                self.pointers.push((event.id, sample));
                log::trace!("pointer {} down in slot {}", event.id, slot);
                Ok(frame)
            }
            PointerEventKind::Move => {
                let slot = self
                    .slot_of(event.id)
                    .ok_or(GestureError::UnknownPointer { id: event.id })?;
                let frame = PointerFrame::moved(
                    self.samples()
                        .enumerate()
                        .map(|(index, current)| if index == slot { sample } else { current }),
                    time,
                )?;
                self.pointers[slot].1 = sample;
                Ok(frame)
            }
            PointerEventKind::Up => {
                let slot = self
                    .slot_of(event.id)
                    .ok_or(GestureError::UnknownPointer { id: event.id })?;
                let lifted = self.samples().enumerate().map(|(index, current)| {
                    if index == slot {
                        sample
                    } else {
                        current
                    }
                });
                let action = if self.pointers.len() == 1 {
                    PointerAction::End
                } else {
                    PointerAction::PointerUp(slot)
                };
                let frame = PointerFrame::new(action, lifted, time)?;
                self.pointers.remove(slot);
                log::trace!("pointer {} up from slot {}", event.id, slot);
                Ok(frame)
            }
            PointerEventKind::Cancel => {
                self.pointers.clear();
                Ok(PointerFrame::cancel(time))
            }
        }
    }

    fn samples(&self) -> impl Iterator<Item = PointerSample> + '_ {
        self.pointers.iter().map(|(_, sample)| *sample)
    }
}

impl Default for PointerFrameTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_pressure(pressure: f32) -> f32 {
    // Some digitizers report pressure above 1.0.
    if pressure.is_nan() {
        pressure
    } else {
        pressure.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FrameTransition;

    fn event(id: PointerId, kind: PointerEventKind, x: f32, y: f32, time: EventTime) -> PointerEvent {
        PointerEvent::new(id, kind, Point::new(x, y)).at_time(time)
    }

    #[test]
    fn assigns_slots_in_touch_order() {
        let mut tracker = PointerFrameTracker::new();

        let first = tracker
            .dispatch(event(7, PointerEventKind::Down, 1.0, 1.0, 0))
            .unwrap();
        assert_eq!(first.transition(), FrameTransition::FirstDown);

        let second = tracker
            .dispatch(event(3, PointerEventKind::Down, 5.0, 5.0, 1))
            .unwrap();
        assert_eq!(second.transition(), FrameTransition::PointerDown(1));
        assert_eq!(second.pointer_count(), 2);
        assert_eq!(tracker.slot_of(7), Some(0));
        assert_eq!(tracker.slot_of(3), Some(1));
    }

    #[test]
    fn lifting_compacts_slots() {
        let mut tracker = PointerFrameTracker::new();
        tracker.dispatch(event(1, PointerEventKind::Down, 0.0, 0.0, 0)).unwrap();
        tracker.dispatch(event(2, PointerEventKind::Down, 1.0, 0.0, 1)).unwrap();
        tracker.dispatch(event(3, PointerEventKind::Down, 2.0, 0.0, 2)).unwrap();

        let up = tracker.dispatch(event(1, PointerEventKind::Up, 0.0, 0.0, 3)).unwrap();
        assert_eq!(up.transition(), FrameTransition::PointerUp(0));
        assert_eq!(up.pointer_count(), 3);

        assert_eq!(tracker.slot_of(2), Some(0));
        assert_eq!(tracker.slot_of(3), Some(1));
        assert_eq!(tracker.active_count(), 2);
    }

    #[test]
    fn last_up_becomes_end() {
        let mut tracker = PointerFrameTracker::new();
        tracker.dispatch(event(1, PointerEventKind::Down, 0.0, 0.0, 0)).unwrap();
        let up = tracker.dispatch(event(1, PointerEventKind::Up, 4.0, 4.0, 9)).unwrap();

        assert_eq!(up.action(), PointerAction::End);
        assert_eq!(up.position(0), Some(Point::new(4.0, 4.0)));
        assert!(tracker.is_empty());
    }

    #[test]
    fn move_replaces_only_the_moving_pointer() {
        let mut tracker = PointerFrameTracker::new();
        tracker.dispatch(event(1, PointerEventKind::Down, 0.0, 0.0, 0)).unwrap();
        tracker.dispatch(event(2, PointerEventKind::Down, 10.0, 0.0, 1)).unwrap();

        let frame = tracker.dispatch(event(2, PointerEventKind::Move, 20.0, 5.0, 2)).unwrap();
        assert_eq!(frame.position(0), Some(Point::new(0.0, 0.0)));
        assert_eq!(frame.position(1), Some(Point::new(20.0, 5.0)));
        assert_eq!(frame.event_time(), 2);
    }

    #[test]
    fn unknown_and_duplicate_pointers_are_errors() {
        let mut tracker = PointerFrameTracker::new();
        assert_eq!(
            tracker.dispatch(event(4, PointerEventKind::Move, 0.0, 0.0, 0)),
            Err(GestureError::UnknownPointer { id: 4 })
        );

        tracker.dispatch(event(4, PointerEventKind::Down, 0.0, 0.0, 0)).unwrap();
        assert_eq!(
            tracker.dispatch(event(4, PointerEventKind::Down, 0.0, 0.0, 1)),
            Err(GestureError::DuplicatePointer { id: 4 })
        );
        assert_eq!(tracker.active_count(), 1);
    }

    #[test]
    fn rejected_event_leaves_state_untouched() {
        let mut tracker = PointerFrameTracker::new();
        tracker.dispatch(event(1, PointerEventKind::Down, 0.0, 0.0, 0)).unwrap();

        let err = tracker
            .dispatch(event(1, PointerEventKind::Move, f32::INFINITY, 0.0, 1))
            .unwrap_err();
        assert_eq!(err, GestureError::NonFinitePosition { slot: 0 });

        let frame = tracker.dispatch(event(1, PointerEventKind::Move, 2.0, 2.0, 2)).unwrap();
        assert_eq!(frame.position(0), Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn cancel_clears_and_pressure_is_clamped() {
        let mut tracker = PointerFrameTracker::new();
        let frame = tracker
            .dispatch(
                PointerEvent::new(1, PointerEventKind::Down, Point::ZERO)
                    .with_pressure(1.8)
                    .at_time(0),
            )
            .unwrap();
        assert_eq!(frame.pressure(0), Some(1.0));

        let cancel = tracker
            .dispatch(event(1, PointerEventKind::Cancel, 0.0, 0.0, 5))
            .unwrap();
        assert_eq!(cancel.transition(), FrameTransition::Cancel);
        assert!(tracker.is_empty());
    }

    #[test]
    fn stamps_events_without_time() {
        let mut tracker = PointerFrameTracker::new();
        let frame = tracker
            .dispatch(PointerEvent::new(1, PointerEventKind::Down, Point::ZERO))
            .unwrap();
        assert!(frame.event_time() >= 0);
    }
}
