//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Runs the canvas systems on the logic (non-platform) thread.
//
// Responsibilities:
// - Drain platform events and host commands once per tick
// - Drive `CanvasSystems::tick` with the measured frame time
// - Keep a fixed tick rate (TPS)
//
// The orchestrator never touches the window. Everything it learns about
// the platform arrives through the crossbeam channel.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod camera;
pub mod command;
pub mod config;
pub mod gesture_bus;
pub mod input;
pub mod math;
pub(crate) mod platform_bridge;
pub mod systems;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use command::CanvasCommand;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use systems::CanvasSystems;

//=== CoreSystemsOrchestrator =============================================

/// Owns the systems until the core thread takes them over.
pub(crate) struct CoreSystemsOrchestrator {
    systems: CanvasSystems,
}

impl CoreSystemsOrchestrator {
    pub(crate) fn new(systems: CanvasSystems) -> Self {
        Self { systems }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects platform events (exit on close or disconnect)
    //  2. Applies resize, focus loss and queued commands
    //  3. Ticks the systems with the time since the previous tick
    //  4. Sleeps to maintain fixed pacing
    //
    pub(crate) fn spawn_core_thread(
        self,
        platform: Receiver<PlatformEvent>,
        commands: Receiver<CanvasCommand>,
        frame_duration: Duration,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            let mut systems = self.systems;
            let mut collector = EventCollector::new(platform);
            let mut last_tick = Instant::now();
            let mut ticks: u64 = 0;

            info!(target: "core", "Core thread started ({:?} per tick)", frame_duration);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    break;
                }

                //--- Step 2: Host state ------------------------------------
                if let Some((width, height)) = collector.resized() {
                    systems.resize(width, height);
                }

                if collector.focus_lost() {
                    debug!(target: "core", "Focus lost, abandoning gesture");
                    systems.focus_lost();
                }

                for command in commands.try_iter() {
                    systems.apply_command(command);
                }

                //--- Step 3: Tick ------------------------------------------
                let dt = frame_start.duration_since(last_tick);
                last_tick = frame_start;
                systems.tick(collector.input_events(), dt);
                ticks += 1;

                //--- Step 4: Maintain pacing -------------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            info!(target: "core", "Core thread exiting after {} ticks", ticks);
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
