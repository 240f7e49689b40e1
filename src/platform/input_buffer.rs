//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame store for pointer input on the platform thread.
//
// - `discrete`: button transitions, in arrival order
// - `continuous`: cursor position, coalesced (last position wins)
//
// Drained on every `RedrawRequested` and sent to the core thread as one
// `PlatformEvent::Inputs` batch.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 32;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Buffering --------------------------------------------------------

    /// Replaces any earlier cursor event from this frame.
    ///
    /// Every `MouseMoved` hashes and compares equal, so the set holds at
    /// most one.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    /// Appends a button transition. An exact repeat of the previous event
    /// is dropped, since the OS occasionally double-reports a transition.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes this frame's events, or `None` if nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::MouseButton;

    fn down() -> InputEvent {
        InputEvent::MouseButtonDown { button: MouseButton::Left }
    }

    fn up() -> InputEvent {
        InputEvent::MouseButtonUp { button: MouseButton::Left }
    }

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    #[test]
    fn repeated_transition_is_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(down());
        buffer.push_discrete(down());
        buffer.push_discrete(up());
        buffer.push_discrete(down());

        let (discrete, _) = buffer.drain().unwrap();
        assert_eq!(discrete, vec![down(), up(), down()]);
    }

    #[test]
    fn cursor_moves_coalesce_to_latest() {
        let mut buffer = InputBuffer::new();
        buffer.push_continuous(mouse_move(10.0, 10.0));
        buffer.push_continuous(mouse_move(20.0, 30.0));

        let (_, continuous) = buffer.drain().unwrap();
        assert_eq!(continuous.len(), 1);
        match continuous[0] {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (20.0, 30.0)),
            other => panic!("Expected MouseMoved, found {:?}", other),
        }
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());

        buffer.push_discrete(down());
        buffer.push_continuous(mouse_move(5.0, 5.0));

        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }
}
