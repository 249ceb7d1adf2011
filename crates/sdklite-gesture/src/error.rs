use crate::input::{PointerId, SlotIndex};

/// Errors raised while building pointer frames.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureError {
    /// A non-cancel frame with no pointers in it.
    EmptyFrame,
    /// The action refers to a slot the frame does not contain.
    SlotOutOfRange { slot: SlotIndex, len: usize },
    NonFinitePosition { slot: SlotIndex },
    PressureOutOfRange { slot: SlotIndex, pressure: f32 },
    UnknownPointer { id: PointerId },
    DuplicatePointer { id: PointerId },
}

impl std::fmt::Display for GestureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureError::EmptyFrame => write!(f, "frame has no pointers"),
            GestureError::SlotOutOfRange { slot, len } => {
                write!(f, "slot {slot} out of range for frame of {len} pointers")
            }
            GestureError::NonFinitePosition { slot } => {
                write!(f, "pointer in slot {slot} has a non-finite position")
            }
            GestureError::PressureOutOfRange { slot, pressure } => {
                write!(f, "pointer in slot {slot} has pressure {pressure} outside [0, 1]")
            }
            GestureError::UnknownPointer { id } => write!(f, "pointer {id} is not down"),
            GestureError::DuplicatePointer { id } => write!(f, "pointer {id} is already down"),
        }
    }
}

impl std::error::Error for GestureError {}
