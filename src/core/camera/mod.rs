//=========================================================================
// Camera System
//=========================================================================
//
// Bounded panning of a 2D orthographic camera.
//
// Architecture:
//   Drag deltas → BoundedPanner (follow target, clamped)
//                     ↓
//               FollowSystem (smooths the real camera toward the target)
//                     ↓
//               Viewport (screen ↔ world, visible extent)
//
//=========================================================================

//=== Module Declarations =================================================

mod follow;
mod panner;
mod viewport;

//=== Public API ==========================================================

pub use follow::{FollowSystem, SmoothFollow};
pub use panner::{AlwaysPan, BoundedPanner, PanGate, SharedPanGate};
pub use viewport::{OrthographicViewport, Viewport};
