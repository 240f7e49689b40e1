//=========================================================================
// Canvas Engine
//=========================================================================
//
// Main entry point: configures the systems, spawns the core thread and
// runs the platform event loop.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ init(|systems| ...)
//         ├─ with_click_to_drag()    ├─ handle() → CanvasHandle
//         └─ with_bounds_margin()    └─ run(): spawns core thread,
//                                        runs platform, joins
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::command::{CanvasCommand, CanvasHandle};
use crate::core::config::CanvasConfig;
use crate::core::input::{GestureConfig, MouseButton};
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::systems::CanvasSystems;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::{Platform, WindowSettings};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// Every setter validates its argument and panics on nonsense values, so
/// a built engine always holds a usable configuration. See
/// [`CanvasConfig`] for the defaults.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use canvas_pan::prelude::*;
///
/// let engine = EngineBuilder::new()
///     .with_tps(120.0)
///     .with_click_to_drag(Duration::from_millis(150))
///     .with_bounds_margin(2.0)
///     .build()
///     .init(|systems| {
///         systems.set_content_bounds(Bounds2::new(Vec2::ZERO, Vec2::new(64.0, 32.0)));
///     });
///
/// engine.run()?;
/// # Ok::<(), PlatformError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    config: CanvasConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: CanvasConfig::default(),
        }
    }

    /// Sets the target ticks per second for the core thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    /// Sets how long the pointer must stay down before a press becomes a
    /// drag.
    ///
    /// # Panics
    ///
    /// Panics if `threshold` is zero.
    pub fn with_click_to_drag(mut self, threshold: Duration) -> Self {
        assert!(!threshold.is_zero(), "Click-to-drag threshold must be positive");
        self.config.gesture = GestureConfig {
            click_to_drag: threshold,
        };
        self
    }

    /// Sets the button that drives gestures. Default: left.
    pub fn with_primary_button(mut self, button: MouseButton) -> Self {
        self.config.primary_button = button;
        self
    }

    /// Sets the margin added around content bounds (world units).
    ///
    /// # Panics
    ///
    /// Panics if `margin` is negative or not finite.
    pub fn with_bounds_margin(mut self, margin: f32) -> Self {
        assert!(
            margin.is_finite() && margin >= 0.0,
            "Bounds margin must be finite and non-negative, got {}",
            margin
        );
        self.config.bounds_margin = margin;
        self
    }

    /// Sets half the visible world height.
    ///
    /// # Panics
    ///
    /// Panics if `size <= 0.0`.
    pub fn with_orthographic_size(mut self, size: f32) -> Self {
        assert!(size > 0.0, "Orthographic size must be positive, got {}", size);
        self.config.orthographic_size = size;
        self
    }

    /// Sets the follow camera time constant in seconds. 0 disables
    /// smoothing.
    ///
    /// # Panics
    ///
    /// Panics if `damping` is negative or not finite.
    pub fn with_follow_damping(mut self, damping: f32) -> Self {
        assert!(
            damping.is_finite() && damping >= 0.0,
            "Follow damping must be finite and non-negative, got {}",
            damping
        );
        self.config.follow_damping = damping;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.config.window_title = title.into();
        self
    }

    /// Sets the initial window size (logical pixels).
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero");
        self.config.window_size = (width, height);
        self
    }

    /// Builds the engine and all of its systems.
    pub fn build(self) -> Engine {
        info!(
            target: "engine",
            "Building engine (TPS: {}, channel: {}, click-to-drag: {:?})",
            self.config.tps,
            self.config.channel_capacity,
            self.config.gesture.click_to_drag
        );

        let (command_tx, command_rx) = unbounded();

        Engine {
            systems: CanvasSystems::new(&self.config),
            config: self.config,
            command_tx,
            command_rx,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Canvas runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Core Thread @ TPS)
///   │     └─► CanvasSystems
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Pointer Polling
///
/// Channels: PlatformEvent (bounded), CanvasCommand (unbounded)
/// ```
pub struct Engine {
    systems: CanvasSystems,
    config: CanvasConfig,
    command_tx: Sender<CanvasCommand>,
    command_rx: Receiver<CanvasCommand>,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures the systems before they move to the core thread:
    /// content bounds, UI occlusion, pan gate, update hook, subscriptions.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut CanvasSystems),
    {
        info!(target: "engine", "Initializing canvas systems");
        init_fn(&mut self.systems);
        self
    }

    /// Returns a handle for steering the canvas from other threads.
    ///
    /// Commands sent before [`Engine::run`] are applied on the first tick.
    pub fn handle(&self) -> CanvasHandle {
        CanvasHandle::new(self.command_tx.clone())
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    //--- Execution --------------------------------------------------------

    /// Runs the canvas and blocks until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → core channel
    /// 2. Spawns the core thread at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Joins the core thread
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop fails. The core thread
    /// is still joined first.
    pub fn run(self) -> Result<(), PlatformError> {
        let Engine {
            systems,
            config,
            command_tx,
            command_rx,
        } = self;

        info!(target: "engine", "Starting engine runtime (TPS: {})", config.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(config.channel_capacity);

        // Only user handles keep the command channel open from here on
        drop(command_tx);

        //--- 2. Spawn the core thread -------------------------------------
        let core_handle = CoreSystemsOrchestrator::new(systems).spawn_core_thread(
            rx,
            command_rx,
            config.frame_duration(),
        );

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(
            tx,
            WindowSettings {
                title: config.window_title.clone(),
                size: config.window_size,
            },
        );
        let result = platform.run();

        if let Err(e) = &result {
            error!(target: "engine", "Platform error: {}", e);
        }

        //--- 4. Cleanup ---------------------------------------------------
        // The platform's sender is gone by now, so the core thread sees a
        // disconnect even if WindowClosed never made it through.
        match core_handle.join() {
            Ok(()) => info!(target: "engine", "Core thread terminated cleanly"),
            Err(e) => error!(target: "engine", "Core thread panicked: {:?}", e),
        }

        info!(target: "engine", "Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
