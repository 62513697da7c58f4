use std::collections::VecDeque;

use tracing::trace;

use super::EditorSession;
use crate::interaction::InputEvent;

/// Input collected between frames.
///
/// Events are applied strictly in arrival order. None are dropped or
/// coalesced, so every intermediate pointer position reaches the session.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<InputEvent>) {
        self.events.push_back(event.into());
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Applies every queued event to `session`. Returns whether a redraw
    /// is needed.
    pub fn flush(&mut self, session: &mut EditorSession) -> bool {
        let count = self.events.len();
        let mut redraw = false;
        while let Some(event) = self.events.pop_front() {
            redraw |= session.handle_event(event).needs_redraw();
        }
        if count > 0 {
            trace!("Flushed {} input events (redraw: {})", count, redraw);
        }
        redraw
    }
}
