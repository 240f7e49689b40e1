//=========================================================================
// Pointer Tracker
//=========================================================================
//
// Low-level pointer state tracking with per-frame transitions.
//
// Architecture:
//   InputEvent → process_events() → held / pressed / released → sample()
//
// Frame lifecycle: clear() → process_events() → sample()
//
// A frame ends at the first release. If a tick's events hold more than
// one gesture (`[up, down]` from two platform batches), the caller runs
// one sample per segment so transitions keep their order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, MouseButton, PointerSample};
use crate::core::camera::Viewport;

//=== PointerTracker ======================================================

/// Tracks the gesture button across frames and turns raw events into one
/// [`PointerSample`] per tick.
///
/// Only the configured primary button participates; other buttons are
/// ignored.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    primary: MouseButton,

    //--- Persistent State (survives frame boundary) ----------------------
    held: bool,
    position: Vec2,

    //--- Frame Transitions (reset each frame via clear()) ---------------
    pressed_this_frame: bool,
    released_this_frame: bool,
}

impl PointerTracker {
    /// Creates a tracker following `primary`.
    pub fn new(primary: MouseButton) -> Self {
        Self {
            primary,
            held: false,
            position: Vec2::ZERO,
            pressed_this_frame: false,
            released_this_frame: false,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific transitions.
    pub fn clear(&mut self) {
        self.pressed_this_frame = false;
        self.released_this_frame = false;
    }

    /// Processes events in order, stopping after the first release.
    ///
    /// Returns how many events were consumed. Anything left over belongs
    /// to the next frame segment, so a press can never be reported
    /// alongside a release that happened before it.
    pub fn process_events(&mut self, events: &[InputEvent]) -> usize {
        for (index, event) in events.iter().enumerate() {
            self.process_event(event);
            if self.released_this_frame {
                return index + 1;
            }
        }
        events.len()
    }

    /// Forgets a held button without reporting a release.
    ///
    /// Called when the window loses focus and the release may never be
    /// delivered.
    pub fn release_all(&mut self) {
        self.held = false;
        self.pressed_this_frame = false;
        self.released_this_frame = false;
    }

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::MouseButtonDown { button } if button == self.primary => {
                // Only mark as pressed if it wasn't already down
                if !self.held {
                    self.held = true;
                    self.pressed_this_frame = true;
                }
            }

            InputEvent::MouseButtonUp { button } if button == self.primary => {
                // Only mark as released if it was actually down
                if self.held {
                    self.held = false;
                    self.released_this_frame = true;
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.position = Vec2::new(x, y);
            }

            _ => {}
        }
    }

    //--- Sampling ---------------------------------------------------------

    /// Builds this frame's sample, converting the pointer to world space
    /// through `viewport`.
    pub fn sample<V>(&self, viewport: &V, dt: Duration) -> PointerSample
    where
        V: Viewport + ?Sized,
    {
        PointerSample {
            position: viewport.screen_to_world(self.position),
            screen_position: self.position,
            is_down: self.pressed_this_frame,
            is_up: self.released_this_frame,
            dt,
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` if the button went UP → DOWN this frame.
    pub fn is_pressed(&self) -> bool {
        self.pressed_this_frame
    }

    /// Returns `true` while the button is held.
    pub fn is_down(&self) -> bool {
        self.held
    }

    /// Returns `true` if the button went DOWN → UP this frame.
    pub fn is_released(&self) -> bool {
        self.released_this_frame
    }

    /// Pointer position in screen coordinates (pixels, top-left origin).
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn primary_button(&self) -> MouseButton {
        self.primary
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(MouseButton::Left)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::OrthographicViewport;

    //--- Test Helpers -----------------------------------------------------

    fn mouse_down(button: MouseButton) -> InputEvent {
        InputEvent::MouseButtonDown { button }
    }

    fn mouse_up(button: MouseButton) -> InputEvent {
        InputEvent::MouseButtonUp { button }
    }

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    fn frame(tracker: &mut PointerTracker, events: &[InputEvent]) -> usize {
        tracker.clear();
        tracker.process_events(events)
    }

    //=====================================================================
    // Transition Tests
    //=====================================================================

    #[test]
    fn press_is_reported_on_transition_frame_only() {
        let mut tracker = PointerTracker::default();

        frame(&mut tracker, &[mouse_down(MouseButton::Left)]);
        assert!(tracker.is_pressed());
        assert!(tracker.is_down());

        frame(&mut tracker, &[]);
        assert!(!tracker.is_pressed());
        assert!(tracker.is_down());
    }

    #[test]
    fn release_is_reported_on_transition_frame_only() {
        let mut tracker = PointerTracker::default();
        frame(&mut tracker, &[mouse_down(MouseButton::Left)]);

        frame(&mut tracker, &[mouse_up(MouseButton::Left)]);
        assert!(tracker.is_released());
        assert!(!tracker.is_down());

        frame(&mut tracker, &[]);
        assert!(!tracker.is_released());
    }

    #[test]
    fn repeated_down_does_not_retrigger() {
        let mut tracker = PointerTracker::default();
        frame(&mut tracker, &[mouse_down(MouseButton::Left)]);
        frame(&mut tracker, &[mouse_down(MouseButton::Left)]);
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = PointerTracker::default();
        frame(&mut tracker, &[mouse_up(MouseButton::Left)]);
        assert!(!tracker.is_released());
    }

    #[test]
    fn tap_within_one_frame_reports_both_transitions() {
        let mut tracker = PointerTracker::default();
        frame(&mut tracker, &[mouse_down(MouseButton::Left), mouse_up(MouseButton::Left)]);
        assert!(tracker.is_pressed());
        assert!(tracker.is_released());
        assert!(!tracker.is_down());
    }

    #[test]
    fn frame_stops_after_release() {
        let mut tracker = PointerTracker::default();
        frame(&mut tracker, &[mouse_down(MouseButton::Left)]);

        let events = [
            mouse_up(MouseButton::Left),
            mouse_move(5.0, 5.0),
            mouse_down(MouseButton::Left),
        ];
        assert_eq!(frame(&mut tracker, &events), 1);
        assert!(tracker.is_released());
        assert!(!tracker.is_pressed());

        // The rest is a segment of its own
        assert_eq!(frame(&mut tracker, &events[1..]), 2);
        assert!(tracker.is_pressed());
        assert_eq!(tracker.position(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn double_tap_splits_into_two_segments() {
        let mut tracker = PointerTracker::default();
        let events = [
            mouse_down(MouseButton::Left),
            mouse_up(MouseButton::Left),
            mouse_down(MouseButton::Left),
            mouse_up(MouseButton::Left),
        ];

        assert_eq!(frame(&mut tracker, &events), 2);
        assert!(tracker.is_pressed() && tracker.is_released());

        assert_eq!(frame(&mut tracker, &events[2..]), 2);
        assert!(tracker.is_pressed() && tracker.is_released());
    }

    #[test]
    fn non_primary_buttons_are_ignored() {
        let mut tracker = PointerTracker::default();
        frame(&mut tracker, &[mouse_down(MouseButton::Right)]);
        assert!(!tracker.is_pressed());

        let mut middle = PointerTracker::new(MouseButton::Middle);
        frame(&mut middle, &[mouse_down(MouseButton::Middle)]);
        assert!(middle.is_pressed());
    }

    #[test]
    fn release_all_drops_held_button() {
        let mut tracker = PointerTracker::default();
        frame(&mut tracker, &[mouse_down(MouseButton::Left)]);

        tracker.release_all();
        assert!(!tracker.is_down());

        // The late release is then ignored
        frame(&mut tracker, &[mouse_up(MouseButton::Left)]);
        assert!(!tracker.is_released());
    }

    //=====================================================================
    // Position Tests
    //=====================================================================

    #[test]
    fn last_move_wins_and_persists() {
        let mut tracker = PointerTracker::default();
        frame(&mut tracker, &[mouse_move(10.0, 10.0)]);
        frame(&mut tracker, &[mouse_move(12.0, 11.0), mouse_move(15.0, 14.0)]);
        assert_eq!(tracker.position(), Vec2::new(15.0, 14.0));

        frame(&mut tracker, &[]);
        assert_eq!(tracker.position(), Vec2::new(15.0, 14.0));
    }

    #[test]
    fn sample_converts_to_world_space() {
        let viewport = OrthographicViewport::new(10.0, 800, 400);
        let mut tracker = PointerTracker::default();
        frame(&mut tracker, &[mouse_move(400.0, 200.0), mouse_down(MouseButton::Left)]);

        let sample = tracker.sample(&viewport, Duration::from_millis(16));
        assert_eq!(sample.position, Vec2::ZERO);
        assert_eq!(sample.screen_position, Vec2::new(400.0, 200.0));
        assert!(sample.is_down);
        assert!(!sample.is_up);
        assert_eq!(sample.dt, Duration::from_millis(16));
    }
}
