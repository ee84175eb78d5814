//! Per-frame input snapshots

use std::time::Duration;

/// Input event delivered by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    /// Escape key pressed
    Escape,
    /// Primary pointer button pressed at a screen position
    PrimaryPress { x: i32, y: i32 },
}

/// Everything the session needs to know about one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInput {
    /// Monotonic time since the session started
    pub now: Duration,
    /// Pointer position in screen pixels
    pub pointer: (i32, i32),
    /// Events since the previous frame, in arrival order
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    pub fn idle(now: Duration, pointer: (i32, i32)) -> Self {
        Self {
            now,
            pointer,
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Press at a position, which is also where the pointer rests
    pub fn press(now: Duration, at: (i32, i32)) -> Self {
        Self::idle(now, at).with_event(InputEvent::PrimaryPress { x: at.0, y: at.1 })
    }
}
