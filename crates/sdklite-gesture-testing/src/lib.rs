//! Testing utilities and harness for sdklite-gesture

pub mod assertions;
pub mod recorder;
pub mod script;

pub use assertions::{assert_approx_eq, assert_count, assert_point_approx_eq, EPSILON};
pub use recorder::{
    DragCall, DragRecorder, Phase, Responses, RotateCall, RotateRecorder, ScaleCall,
    ScaleRecorder,
};
pub use script::{FrameScript, FrameSink, FRAME_INTERVAL_MS};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::recorder::*;
    pub use crate::script::*;
}
