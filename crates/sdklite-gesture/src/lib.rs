//! Multi-touch gesture detectors.
//!
//! Three independent recognisers consume the same stream of
//! [`PointerFrame`]s and report their own begin/update/end callbacks:
//!
//! - [`DragGestureDetector`] follows the centroid of every pointer.
//! - [`RotateGestureDetector`] follows the angle between two pointers.
//! - [`ScaleGestureDetector`] follows the distance between two pointers.
//!
//! Detectors do not coordinate with each other. Feed each of them every
//! frame and combine their output as the application needs.
//! [`PointerFrameTracker`] builds frames out of per-pointer platform events.

pub mod error;
pub mod geometry;
pub mod gesture_constants;
pub mod gestures;
pub mod input;

pub use error::GestureError;
pub use geometry::Point;
pub use gestures::*;
pub use input::{
    EventTime, FrameTransition, PointerAction, PointerEvent, PointerEventKind, PointerFrame,
    PointerFrameTracker, PointerId, PointerSample, SlotIndex,
};

pub mod prelude {
    pub use crate::error::GestureError;
    pub use crate::geometry::Point;
    pub use crate::gestures::{
        DragGesture, DragGestureDetector, DragGestureListener, RotateGesture,
        RotateGestureDetector, RotateGestureListener, ScaleGesture, ScaleGestureConfig,
        ScaleGestureDetector, ScaleGestureListener, SimpleScaleGestureListener,
    };
    pub use crate::input::prelude::*;
}
