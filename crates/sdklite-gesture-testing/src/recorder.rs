//! Listeners that record every callback together with the values the
//! detector exposed at that moment.

use sdklite_gesture::{
    DragGesture, DragGestureListener, Point, RotateGesture, RotateGestureListener, ScaleGesture,
    ScaleGestureListener,
};

/// Lifecycle phase of a recorded callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Begin,
    Update,
    End { cancelled: bool },
}

/// How a recording listener answers begin and update callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Responses {
    pub accept_begin: bool,
    pub accept_update: bool,
    /// Stop accepting updates once this many were seen.
    pub update_limit: Option<usize>,
}

impl Default for Responses {
    fn default() -> Self {
        Self {
            accept_begin: true,
            accept_update: true,
            update_limit: None,
        }
    }
}

impl Responses {
    pub fn rejecting_begin() -> Self {
        Self {
            accept_begin: false,
            ..Self::default()
        }
    }

    pub fn rejecting_updates() -> Self {
        Self {
            accept_update: false,
            ..Self::default()
        }
    }

    fn answer_update(&self, seen: usize) -> bool {
        match self.update_limit {
            Some(limit) if seen >= limit => false,
            _ => self.accept_update,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragCall {
    pub phase: Phase,
    pub delta: Point,
    pub focus: Option<Point>,
}

#[derive(Default, Debug)]
pub struct DragRecorder {
    pub responses: Responses,
    pub calls: Vec<DragCall>,
}

impl DragRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Responses) -> Self {
        Self {
            responses,
            calls: Vec::new(),
        }
    }

    pub fn updates(&self) -> impl Iterator<Item = &DragCall> {
        self.calls.iter().filter(|call| call.phase == Phase::Update)
    }

    pub fn ends(&self) -> impl Iterator<Item = &DragCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call.phase, Phase::End { .. }))
    }

    fn record(&mut self, phase: Phase, gesture: &DragGesture) {
        self.calls.push(DragCall {
            phase,
            delta: gesture.delta(),
            focus: gesture.focus(),
        });
    }
}

impl DragGestureListener for DragRecorder {
    fn on_drag_begin(&mut self, gesture: &DragGesture) -> bool {
        self.record(Phase::Begin, gesture);
        self.responses.accept_begin
    }

    fn on_drag(&mut self, gesture: &DragGesture) -> bool {
        let seen = self.updates().count();
        self.record(Phase::Update, gesture);
        self.responses.answer_update(seen + 1)
    }

    fn on_drag_end(&mut self, gesture: &DragGesture, cancelled: bool) {
        self.record(Phase::End { cancelled }, gesture);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateCall {
    pub phase: Phase,
    pub delta_rotation: f32,
    pub pivot: Option<Point>,
}

#[derive(Default, Debug)]
pub struct RotateRecorder {
    pub responses: Responses,
    pub calls: Vec<RotateCall>,
}

impl RotateRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Responses) -> Self {
        Self {
            responses,
            calls: Vec::new(),
        }
    }

    pub fn updates(&self) -> impl Iterator<Item = &RotateCall> {
        self.calls.iter().filter(|call| call.phase == Phase::Update)
    }

    pub fn ends(&self) -> impl Iterator<Item = &RotateCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call.phase, Phase::End { .. }))
    }

    fn record(&mut self, phase: Phase, gesture: &RotateGesture) {
        self.calls.push(RotateCall {
            phase,
            delta_rotation: gesture.delta_rotation(),
            pivot: gesture.pivot(),
        });
    }
}

impl RotateGestureListener for RotateRecorder {
    fn on_rotate_begin(&mut self, gesture: &RotateGesture) -> bool {
        self.record(Phase::Begin, gesture);
        self.responses.accept_begin
    }

    fn on_rotate(&mut self, gesture: &RotateGesture) -> bool {
        let seen = self.updates().count();
        self.record(Phase::Update, gesture);
        self.responses.answer_update(seen + 1)
    }

    fn on_rotate_end(&mut self, gesture: &RotateGesture) {
        // Rotation ends carry no cancel flag.
        self.record(Phase::End { cancelled: false }, gesture);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleCall {
    pub phase: Phase,
    pub scale_factor: f32,
    pub current_span: f32,
    pub previous_span: f32,
    pub focus: Point,
    pub top_finger: Point,
    pub bottom_finger: Point,
    pub time_delta: i64,
}

#[derive(Default, Debug)]
pub struct ScaleRecorder {
    pub responses: Responses,
    pub calls: Vec<ScaleCall>,
}

impl ScaleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Responses) -> Self {
        Self {
            responses,
            calls: Vec::new(),
        }
    }

    pub fn updates(&self) -> impl Iterator<Item = &ScaleCall> {
        self.calls.iter().filter(|call| call.phase == Phase::Update)
    }

    pub fn ends(&self) -> impl Iterator<Item = &ScaleCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call.phase, Phase::End { .. }))
    }

    fn record(&mut self, phase: Phase, gesture: &ScaleGesture) {
        self.calls.push(ScaleCall {
            phase,
            scale_factor: gesture.scale_factor(),
            current_span: gesture.current_span(),
            previous_span: gesture.previous_span(),
            focus: gesture.focus(),
            top_finger: gesture.top_finger(),
            bottom_finger: gesture.bottom_finger(),
            time_delta: gesture.time_delta(),
        });
    }
}

impl ScaleGestureListener for ScaleRecorder {
    fn on_scale_begin(&mut self, gesture: &ScaleGesture) -> bool {
        self.record(Phase::Begin, gesture);
        self.responses.accept_begin
    }

    fn on_scale(&mut self, gesture: &ScaleGesture) -> bool {
        let seen = self.updates().count();
        self.record(Phase::Update, gesture);
        self.responses.answer_update(seen + 1)
    }

    fn on_scale_end(&mut self, gesture: &ScaleGesture, cancelled: bool) {
        self.record(Phase::End { cancelled }, gesture);
    }
}
