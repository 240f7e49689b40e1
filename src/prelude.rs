//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use canvas_pan::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::PlatformError;

// Systems and configuration
pub use crate::core::command::{CanvasHandle, HandleError};
pub use crate::core::config::CanvasConfig;
pub use crate::core::systems::{CanvasSystems, FrameContext};

// Gestures
pub use crate::core::gesture_bus::{GestureBus, Subscription, SubscriptionId};
pub use crate::core::input::{
    GestureConfig, GestureEvent, GestureFilter, GestureKind, GestureRecognizer, GestureState,
    MouseButton, NoUi, PointerSample, UiOcclusion, UiRegions,
};

// Camera
pub use crate::core::camera::{
    AlwaysPan, BoundedPanner, FollowSystem, OrthographicViewport, PanGate, SharedPanGate,
    SmoothFollow, Viewport,
};

// Math
pub use crate::core::math::{Bounds2, Vec2};
