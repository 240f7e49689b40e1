//=========================================================================
// Math
//=========================================================================
//
// 2D geometry helpers shared by the input and camera systems.
//
// All positions, deltas and sizes are `glam::Vec2` in world units unless
// a type states otherwise (screen space is pixels, top-left origin).
//
//=========================================================================

//=== Module Declarations =================================================

mod bounds;

//=== Public API ==========================================================

pub use bounds::Bounds2;
pub use glam::Vec2;
