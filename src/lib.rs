//=========================================================================
// Canvas Pan: Library Root
//=========================================================================
//
// Click vs. drag gesture recognition and bounded camera panning for 2D
// canvas applications.
//
// Layout:
// - `core`: platform-independent systems (gestures, panner, camera,
//   gesture bus) and the core thread that drives them
// - `platform`: Winit window and pointer polling (private)
// - `engine`: builder and runtime facade
//
// Typical usage:
// ```no_run
// use canvas_pan::prelude::*;
//
// fn main() -> Result<(), PlatformError> {
//     EngineBuilder::new().build().run()
// }
// ```
//
//=========================================================================

//=== Modules =============================================================

pub mod core;
pub mod prelude;

mod engine;
mod platform;

//=== Public Exports ======================================================

pub use crate::core::platform_bridge::PlatformError;
pub use engine::{Engine, EngineBuilder};
