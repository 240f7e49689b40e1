//=========================================================================
// Input System
//=========================================================================
//
// Pointer input from raw platform events to click / drag gestures.
//
// Architecture:
//   InputEvent → PointerTracker → PointerSample → GestureRecognizer
//                                                     ↓
//                                               GestureEvent
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod gesture;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{
    GestureEvent, GestureFilter, GestureKind, InputEvent, MouseButton, PointerSample,
};
pub use gesture::{GestureConfig, GestureRecognizer, GestureState, NoUi, UiOcclusion, UiRegions};
pub use state_tracker::PointerTracker;
