pub mod tracker;
pub mod types;

pub use tracker::{PointerEvent, PointerEventKind, PointerFrameTracker};
pub use types::{
    EventTime, FrameTransition, PointerAction, PointerFrame, PointerId, PointerSample,
    PointerSamples, SlotIndex,
};

pub mod prelude {
    pub use super::tracker::{PointerEvent, PointerEventKind, PointerFrameTracker};
    pub use super::types::{
        EventTime, FrameTransition, PointerAction, PointerFrame, PointerId, PointerSample,
        SlotIndex,
    };
}
