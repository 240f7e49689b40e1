//=========================================================================
// Gesture Recognizer
//=========================================================================
//
// Turns per-frame pointer samples into click / drag gestures.
//
// State Machine:
// ```text
//            down (not over UI)
//   Idle ─────────────────────────→ PendingClick { held, anchor }
//    ↑                                   │            │
//    │ up: Click + PointerUp             │            │ held >= click_to_drag
//    ├───────────────────────────────────┘            │ (late phase)
//    │                                                ↓
//    │ up: DragEnd + PointerUp              Dragging { last_position }
//    └────────────────────────────────────────────────┘
// ```
//
// Tick Phases:
//   1. on_frame()      : main phase, before game logic: down/up transitions
//   2. on_late_frame() : late phase, after game logic: Drag deltas, then
//                        hold-time accumulation and drag promotion
//
// Because the main phase runs first, a release always resolves against
// the state the gesture had at the start of the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::event::{GestureEvent, PointerSample};
use crate::core::math::Bounds2;

//=== UiOcclusion =========================================================

/// Host query telling whether the pointer is over a UI element.
///
/// Checked once per pointer-down. A press that lands on UI starts no
/// gesture, and its matching release is swallowed too.
pub trait UiOcclusion {
    fn is_pointer_over_ui(&self, sample: &PointerSample) -> bool;
}

impl<F: Fn(&PointerSample) -> bool> UiOcclusion for F {
    fn is_pointer_over_ui(&self, sample: &PointerSample) -> bool {
        self(sample)
    }
}

/// No UI: every press starts a gesture.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUi;

impl UiOcclusion for NoUi {
    fn is_pointer_over_ui(&self, _sample: &PointerSample) -> bool {
        false
    }
}

/// UI described as a set of screen-space rectangles (pixels, top-left
/// origin).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiRegions {
    regions: Vec<Bounds2>,
}

impl UiRegions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, region: Bounds2) {
        self.regions.push(region);
    }
}

impl UiOcclusion for UiRegions {
    fn is_pointer_over_ui(&self, sample: &PointerSample) -> bool {
        self.regions
            .iter()
            .any(|region| region.contains(sample.screen_position))
    }
}

//=== GestureConfig =======================================================

/// Tuning for the click/drag decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    /// How long the pointer must stay down before a press becomes a drag.
    pub click_to_drag: Duration,
}

impl GestureConfig {
    pub const DEFAULT_CLICK_TO_DRAG: Duration = Duration::from_millis(200);
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            click_to_drag: Self::DEFAULT_CLICK_TO_DRAG,
        }
    }
}

//=== GestureState ========================================================

/// Where the recognizer is within the current gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// No gesture in progress.
    Idle,

    /// Pointer is down but has not been held long enough to drag.
    PendingClick { held: Duration, anchor: Vec2 },

    /// Pointer is dragging; `last_position` is the previous late-phase
    /// sample.
    Dragging { last_position: Vec2 },
}

//=== GestureRecognizer ===================================================

/// Time-windowed click vs. drag recognizer.
///
/// Emits events synchronously from the phase that detects them; nothing
/// is queued between ticks.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    state: GestureState,
    suppressed: bool,
}

impl GestureRecognizer {
    //--- Construction -----------------------------------------------------

    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
            suppressed: false,
        }
    }

    //--- Main Phase -------------------------------------------------------

    /// Handles this frame's down/up transitions.
    ///
    /// A sample carrying both a press and a release is handled press
    /// first, so a sub-frame tap still yields a full click.
    pub fn on_frame<U>(&mut self, sample: &PointerSample, ui: &U) -> Vec<GestureEvent>
    where
        U: UiOcclusion + ?Sized,
    {
        let mut events = Vec::new();

        if sample.is_down {
            self.press(sample, ui, &mut events);
        }

        if sample.is_up {
            self.release(sample.position, &mut events);
        }

        events
    }

    fn press<U>(&mut self, sample: &PointerSample, ui: &U, events: &mut Vec<GestureEvent>)
    where
        U: UiOcclusion + ?Sized,
    {
        if self.state != GestureState::Idle {
            warn!(target: "gesture", "Pointer down during {:?}, restarting gesture", self.state);
        }

        if ui.is_pointer_over_ui(sample) {
            debug!(target: "gesture", "Pointer down over UI at {:?}, gesture suppressed", sample.screen_position);
            self.state = GestureState::Idle;
            self.suppressed = true;
            return;
        }

        self.suppressed = false;
        self.state = GestureState::PendingClick {
            held: Duration::ZERO,
            anchor: sample.position,
        };
        events.push(GestureEvent::PointerDown(sample.position));

        trace!(target: "gesture", "Pointer down at {:?}", sample.position);
    }

    fn release(&mut self, position: Vec2, events: &mut Vec<GestureEvent>) {
        if std::mem::take(&mut self.suppressed) {
            trace!(target: "gesture", "Release of suppressed gesture swallowed");
            return;
        }

        match self.state {
            GestureState::Dragging { .. } => {
                events.push(GestureEvent::DragEnd(position));
                debug!(target: "gesture", "Drag ended at {:?}", position);
            }
            GestureState::PendingClick { .. } | GestureState::Idle => {
                events.push(GestureEvent::Click(position));
                debug!(target: "gesture", "Click at {:?}", position);
            }
        }

        events.push(GestureEvent::PointerUp(position));
        self.state = GestureState::Idle;
    }

    //--- Late Phase -------------------------------------------------------

    /// Emits drag deltas and promotes long presses to drags.
    ///
    /// `pointer_position` is the latest pointer position in a world frame
    /// that stays fixed for the whole gesture. A frame that moves with the
    /// camera would feed the pan back into the next delta.
    /// The drag delta is evaluated before promotion, so the tick that
    /// emits `DragStart` never also emits `Drag`.
    pub fn on_late_frame(&mut self, pointer_position: Vec2, dt: Duration) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        match self.state {
            GestureState::Idle => {}

            GestureState::Dragging { last_position } => {
                events.push(GestureEvent::Drag(last_position - pointer_position));
                self.state = GestureState::Dragging {
                    last_position: pointer_position,
                };
            }

            GestureState::PendingClick { held, anchor } => {
                let held = held + dt;

                if held >= self.config.click_to_drag {
                    events.push(GestureEvent::DragStart(anchor));
                    self.state = GestureState::Dragging {
                        last_position: pointer_position,
                    };
                    debug!(target: "gesture", "Drag started at {:?} after {:?}", anchor, held);
                } else {
                    self.state = GestureState::PendingClick { held, anchor };
                }
            }
        }

        events
    }

    //--- Control ----------------------------------------------------------

    /// Abandons any gesture in progress without emitting events.
    ///
    /// Used when the host loses the pointer (window focus loss), since
    /// the matching release will never arrive.
    pub fn reset(&mut self) {
        if self.state != GestureState::Idle {
            debug!(target: "gesture", "Gesture reset from {:?}", self.state);
        }
        self.state = GestureState::Idle;
        self.suppressed = false;
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
