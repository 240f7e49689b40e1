//=========================================================================
// Canvas Configuration
//=========================================================================
//
// Plain configuration values, assembled by `EngineBuilder` and handed to
// the systems at construction.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::input::{GestureConfig, MouseButton};

//=== CanvasConfig ========================================================

/// Runtime configuration for the canvas systems and host.
///
/// # Default Values
///
/// - **TPS**: 60.0
/// - **Channel capacity**: 128 events
/// - **Click-to-drag**: 200 ms
/// - **Primary button**: Left
/// - **Bounds margin**: 1.0 world unit on every side
/// - **Orthographic size**: 5.0 (half the visible world height)
/// - **Follow damping**: 0.1 s
/// - **Window**: "Canvas", 800x600
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Logic ticks per second on the core thread.
    pub tps: f64,

    /// Platform → core channel capacity.
    pub channel_capacity: usize,

    /// Click vs. drag timing.
    pub gesture: GestureConfig,

    /// Button that drives gestures.
    pub primary_button: MouseButton,

    /// Extra room added around content bounds before computing the pan
    /// region.
    pub bounds_margin: f32,

    /// Half of the visible world height.
    pub orthographic_size: f32,

    /// Follow camera time constant in seconds (0 = no smoothing).
    pub follow_damping: f32,

    pub window_title: String,
    pub window_size: (u32, u32),
}

impl CanvasConfig {
    /// Fixed timestep implied by `tps`.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tps)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            gesture: GestureConfig::default(),
            primary_button: MouseButton::Left,
            bounds_margin: 1.0,
            orthographic_size: 5.0,
            follow_damping: 0.1,
            window_title: "Canvas".to_string(),
            window_size: (800, 600),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
