pub mod drag;
pub mod rotate;
pub mod scale;

pub use drag::{DragGesture, DragGestureDetector, DragGestureListener};
pub use rotate::{RotateGesture, RotateGestureDetector, RotateGestureListener};
pub use scale::{
    ScaleGesture, ScaleGestureConfig, ScaleGestureDetector, ScaleGestureListener,
    SimpleScaleGestureListener,
};
