//=========================================================================
// Canvas Systems
//=========================================================================
//
// Container for the gesture and camera systems plus the per-tick driver.
//
// Tick Pipeline (fixed order, the only driver of the recognizer):
// ```text
//   1. Pointer      InputEvents → PointerTracker → PointerSample
//   2. Main phase   GestureRecognizer::on_frame()      → panner, bus
//   3. Game logic   update hook (sees main-phase events)
//   4. Late phase   GestureRecognizer::on_late_frame() → panner, bus
//   5. Camera       SmoothFollow chases the follow target → viewport
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::command::CanvasCommand;
use super::config::CanvasConfig;
use super::gesture_bus::{GestureBus, Subscription};
use crate::core::camera::{
    AlwaysPan, BoundedPanner, OrthographicViewport, PanGate, SmoothFollow, Viewport,
};
use crate::core::input::{
    GestureEvent, GestureFilter, GestureRecognizer, GestureState, InputEvent, NoUi,
    PointerSample, PointerTracker, UiOcclusion,
};
use crate::core::math::Bounds2;

//=== FrameContext ========================================================

/// Read-only view of the current tick handed to the game-logic hook.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// This tick's pointer sample.
    pub sample: PointerSample,

    /// Events emitted by the main phase of this tick.
    pub events: &'a [GestureEvent],

    /// Recognizer state after the main phase.
    pub gesture_state: GestureState,

    /// Panner follow target (before the late phase applies drags).
    pub follow_target: Vec2,

    /// Camera position from the previous tick.
    pub camera_position: Vec2,
}

type UpdateHook = Box<dyn FnMut(&FrameContext<'_>) + Send>;

//=== CanvasSystems =======================================================

/// Owns every canvas system and runs them in phase order.
///
/// Construct once at startup, configure through [`crate::Engine::init`]
/// (or directly in tests), then drive with [`CanvasSystems::tick`].
pub struct CanvasSystems {
    /// Raw pointer state.
    pub pointer: PointerTracker,

    /// Click vs. drag recognizer.
    pub gestures: GestureRecognizer,

    /// Follow-target confiner.
    pub panner: BoundedPanner,

    /// Orthographic view used for screen → world conversion.
    pub viewport: OrthographicViewport,

    /// Smoothing follow camera.
    pub follow: SmoothFollow,

    /// Gesture event fan-out.
    pub bus: GestureBus,

    ui: Box<dyn UiOcclusion + Send>,
    gate: Box<dyn PanGate + Send>,
    update_hook: Option<UpdateHook>,
    bounds_margin: f32,
    frame_events: Vec<GestureEvent>,

    /// Camera position when the current gesture was pressed.
    gesture_camera: Option<Vec2>,
}

impl CanvasSystems {
    /// Creates all systems from `config`. No UI, panning always allowed.
    pub fn new(config: &CanvasConfig) -> Self {
        let (width, height) = config.window_size;

        Self {
            pointer: PointerTracker::new(config.primary_button),
            gestures: GestureRecognizer::new(config.gesture),
            panner: BoundedPanner::new(),
            viewport: OrthographicViewport::new(config.orthographic_size, width, height),
            follow: SmoothFollow::new(config.follow_damping),
            bus: GestureBus::new(),
            ui: Box::new(NoUi),
            gate: Box::new(AlwaysPan),
            update_hook: None,
            bounds_margin: config.bounds_margin,
            frame_events: Vec::with_capacity(8),
            gesture_camera: None,
        }
    }

    //--- Collaborators ----------------------------------------------------

    /// Installs the UI-occlusion query consulted at every pointer-down.
    pub fn set_ui_occlusion<U>(&mut self, ui: U)
    where
        U: UiOcclusion + Send + 'static,
    {
        self.ui = Box::new(ui);
    }

    /// Installs the predicate deciding whether drags pan the camera.
    pub fn set_pan_gate<G>(&mut self, gate: G)
    where
        G: PanGate + Send + 'static,
    {
        self.gate = Box::new(gate);
    }

    /// Installs the game-logic hook run between the main and late phases.
    pub fn on_update<F>(&mut self, hook: F)
    where
        F: FnMut(&FrameContext<'_>) + Send + 'static,
    {
        self.update_hook = Some(Box::new(hook));
    }

    /// Registers a gesture subscriber. Release it with
    /// [`GestureBus::unsubscribe`] or by dropping the subscription.
    pub fn subscribe(&mut self, filter: GestureFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    //--- Layout -----------------------------------------------------------

    /// Applies new content bounds using the current viewport extent.
    pub fn set_content_bounds(&mut self, content: Bounds2) {
        self.panner.set_content_bounds(
            content,
            self.viewport.extent(),
            self.bounds_margin,
            &mut self.follow,
        );
        self.viewport.set_position(self.follow.position());
    }

    /// Snaps the camera to the origin without smoothing.
    pub fn recenter(&mut self) {
        self.panner.recenter_immediately(&mut self.follow);
        self.viewport.set_position(self.follow.position());
    }

    /// Updates the viewport surface size and rebuilds the pan region.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        if self.panner.refresh_viewport(self.viewport.extent(), &mut self.follow) {
            self.viewport.set_position(self.follow.position());
        }
        debug!(target: "core", "Viewport resized to {}x{}, extent {:?}", width, height, self.viewport.extent());
    }

    /// Drops any gesture in progress after the pointer was lost.
    pub fn focus_lost(&mut self) {
        self.pointer.release_all();
        self.gestures.reset();
        self.gesture_camera = None;
    }

    pub fn apply_command(&mut self, command: CanvasCommand) {
        match command {
            CanvasCommand::SetContentBounds(bounds) => self.set_content_bounds(bounds),
            CanvasCommand::Recenter => self.recenter(),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one frame and returns every gesture event it emitted.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Pointer**: folds `input` into the tracker and samples it
    /// 2. **Main phase**: press/release handling, once per input segment
    ///    (a segment ends at a release, so `[up, down]` stays in order)
    /// 3. **Game logic**: the update hook, if installed
    /// 4. **Late phase**: drag deltas and drag promotion
    /// 5. **Camera**: follow smoothing, viewport placement
    pub fn tick(&mut self, input: &[InputEvent], dt: Duration) -> &[GestureEvent] {
        self.frame_events.clear();

        //--- 1-2. Pointer segments and main phase -------------------------
        let mut remaining = input;
        let sample = loop {
            self.pointer.clear();
            let consumed = self.pointer.process_events(remaining);
            remaining = &remaining[consumed..];

            let sample = self.pointer.sample(&self.viewport, dt);
            let main_events = self.gestures.on_frame(&sample, &*self.ui);
            self.track_gesture_camera(&main_events);
            self.dispatch(main_events);

            if remaining.is_empty() {
                break sample;
            }
        };

        //--- 3. Game logic ------------------------------------------------
        if let Some(hook) = self.update_hook.as_mut() {
            hook(&FrameContext {
                sample,
                events: &self.frame_events,
                gesture_state: self.gestures.state(),
                follow_target: self.panner.follow_target(),
                camera_position: self.follow.position(),
            });
        }

        //--- 4. Late phase ------------------------------------------------
        let drag_position = self.gesture_position(sample.screen_position);
        let late_events = self.gestures.on_late_frame(drag_position, dt);
        self.dispatch(late_events);

        //--- 5. Camera ----------------------------------------------------
        self.follow.update(self.panner.follow_target(), dt);
        self.viewport.set_position(self.follow.position());

        &self.frame_events
    }

    /// Freezes the camera position at pointer-down, forgets it once the
    /// gesture is over.
    fn track_gesture_camera(&mut self, events: &[GestureEvent]) {
        if events.iter().any(|e| matches!(e, GestureEvent::PointerDown(_))) {
            self.gesture_camera = Some(self.viewport.position());
        }
        if self.gestures.state() == GestureState::Idle {
            self.gesture_camera = None;
        }
    }

    /// World position of `screen` seen through the camera as it stood at
    /// pointer-down. Camera motion caused by the drag itself never shows
    /// up in the next drag delta.
    fn gesture_position(&self, screen: Vec2) -> Vec2 {
        match self.gesture_camera {
            Some(camera) => {
                let mut frozen = self.viewport;
                frozen.set_position(camera);
                frozen.screen_to_world(screen)
            }
            None => self.viewport.screen_to_world(screen),
        }
    }

    /// Routes events to the panner (through the gate) and the bus.
    fn dispatch(&mut self, events: Vec<GestureEvent>) {
        if events.is_empty() {
            return;
        }

        for event in &events {
            self.panner.handle_gesture(event, &*self.gate);
        }

        self.bus.publish(&events);
        self.frame_events.extend(events);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::SharedPanGate;
    use crate::core::input::{GestureKind, MouseButton, UiRegions};
    use std::sync::{Arc, Mutex};

    //--- Test Helpers -----------------------------------------------------

    const DT: Duration = Duration::from_millis(50);

    /// 800x400 window, 10 units tall → 40x20 world units, no smoothing.
    fn systems() -> CanvasSystems {
        smoothed_systems(0.0)
    }

    fn smoothed_systems(follow_damping: f32) -> CanvasSystems {
        let config = CanvasConfig {
            window_size: (800, 400),
            orthographic_size: 10.0,
            follow_damping,
            bounds_margin: 5.0,
            ..CanvasConfig::default()
        };
        CanvasSystems::new(&config)
    }

    fn content() -> Bounds2 {
        Bounds2::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 50.0))
    }

    fn down() -> InputEvent {
        InputEvent::MouseButtonDown { button: MouseButton::Left }
    }

    fn up() -> InputEvent {
        InputEvent::MouseButtonUp { button: MouseButton::Left }
    }

    fn move_to(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    fn kinds(events: &[GestureEvent]) -> Vec<GestureKind> {
        events.iter().map(GestureEvent::kind).collect()
    }

    //=====================================================================
    // Gesture Pipeline Tests
    //=====================================================================

    #[test]
    fn click_flows_through_tick() {
        let mut s = systems();

        let events = s.tick(&[move_to(400.0, 200.0), down()], DT).to_vec();
        assert_eq!(events, vec![GestureEvent::PointerDown(Vec2::ZERO)]);

        let events = s.tick(&[up()], DT).to_vec();
        assert_eq!(kinds(&events), vec![GestureKind::Click, GestureKind::PointerUp]);
    }

    #[test]
    fn held_press_becomes_drag() {
        let mut s = systems();
        let mut all = Vec::new();

        all.extend_from_slice(s.tick(&[move_to(400.0, 200.0), down()], DT));
        for _ in 0..5 {
            all.extend_from_slice(s.tick(&[], DT));
        }
        all.extend_from_slice(s.tick(&[up()], DT));

        assert_eq!(
            kinds(&all),
            vec![
                GestureKind::PointerDown,
                GestureKind::DragStart,
                GestureKind::Drag,
                GestureKind::Drag,
                GestureKind::DragEnd,
                GestureKind::PointerUp,
            ]
        );
    }

    #[test]
    fn subscribers_receive_tick_events() {
        let mut s = systems();
        let sub = s.subscribe(GestureFilter::CLICKS);

        s.tick(&[down()], DT);
        s.tick(&[up()], DT);

        assert_eq!(
            kinds(&sub.drain()),
            vec![GestureKind::PointerDown, GestureKind::Click, GestureKind::PointerUp]
        );
    }

    #[test]
    fn ui_occlusion_blocks_gestures() {
        let mut s = systems();
        let mut toolbar = UiRegions::new();
        toolbar.push(Bounds2::new(Vec2::ZERO, Vec2::new(800.0, 50.0)));
        s.set_ui_occlusion(toolbar);

        assert!(s.tick(&[move_to(100.0, 20.0), down()], DT).is_empty());
        assert!(s.tick(&[], Duration::from_secs(1)).is_empty());
        assert!(s.tick(&[up()], DT).is_empty());
    }

    #[test]
    fn hook_runs_between_phases() {
        let mut s = systems();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        s.on_update(move |ctx| {
            log.lock().unwrap().push((kinds(ctx.events), ctx.gesture_state));
        });

        s.tick(&[move_to(400.0, 200.0), down()], Duration::from_millis(250));

        let seen = seen.lock().unwrap();
        // Hook saw the main-phase PointerDown but not the late-phase DragStart
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, vec![GestureKind::PointerDown]);
        assert!(matches!(seen[0].1, GestureState::PendingClick { .. }));
    }

    #[test]
    fn release_then_press_in_one_tick_stay_ordered() {
        let mut s = systems();
        let mut all = Vec::new();

        all.extend_from_slice(s.tick(&[down()], DT));
        all.extend_from_slice(s.tick(&[], Duration::from_millis(300)));
        all.extend_from_slice(s.tick(&[], DT));
        all.extend_from_slice(s.tick(&[up(), down()], DT));
        all.extend_from_slice(s.tick(&[], DT));
        all.extend_from_slice(s.tick(&[up()], DT));

        assert_eq!(
            kinds(&all),
            vec![
                GestureKind::PointerDown,
                GestureKind::DragStart,
                GestureKind::Drag,
                GestureKind::DragEnd,
                GestureKind::PointerUp,
                GestureKind::PointerDown,
                GestureKind::Click,
                GestureKind::PointerUp,
            ]
        );
    }

    #[test]
    fn double_tap_in_one_tick_is_two_clicks() {
        let mut s = systems();

        let events = s.tick(&[down(), up(), down(), up()], DT).to_vec();

        assert_eq!(
            kinds(&events),
            vec![
                GestureKind::PointerDown,
                GestureKind::Click,
                GestureKind::PointerUp,
                GestureKind::PointerDown,
                GestureKind::Click,
                GestureKind::PointerUp,
            ]
        );
        assert_eq!(s.gestures.state(), GestureState::Idle);
    }

    #[test]
    fn focus_loss_abandons_gesture() {
        let mut s = systems();
        s.tick(&[down()], DT);
        s.focus_lost();

        assert_eq!(s.gestures.state(), GestureState::Idle);
        assert!(s.tick(&[], Duration::from_secs(1)).is_empty());
    }

    //=====================================================================
    // Panning Tests
    //=====================================================================

    /// Presses at screen centre and holds until the drag starts.
    fn start_drag(s: &mut CanvasSystems) {
        s.tick(&[move_to(400.0, 200.0), down()], DT);
        s.tick(&[], Duration::from_millis(200));
        assert!(s.gestures.is_dragging());
    }

    #[test]
    fn content_bounds_use_viewport_extent() {
        let mut s = systems();
        s.set_content_bounds(content());

        assert_eq!(s.panner.region().min, Vec2::ZERO);
        assert_eq!(s.panner.region().max, Vec2::new(85.0, 45.0));
        assert_eq!(s.panner.follow_target(), Vec2::ZERO);
    }

    #[test]
    fn dragging_left_pans_target_right() {
        let mut s = systems();
        s.set_content_bounds(content());
        start_drag(&mut s);

        // 100 px left = 5 world units left; delta points against movement
        s.tick(&[move_to(300.0, 200.0)], DT);
        assert_eq!(s.panner.follow_target(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn held_pointer_keeps_target_still() {
        let mut s = systems();
        s.set_content_bounds(content());
        start_drag(&mut s);
        s.tick(&[move_to(300.0, 200.0)], DT);

        for _ in 0..6 {
            s.tick(&[], DT);
            assert_eq!(s.panner.follow_target(), Vec2::new(5.0, 0.0));
            assert_eq!(s.viewport.position(), Vec2::new(5.0, 0.0));
        }
    }

    #[test]
    fn smoothed_drag_pans_full_pointer_distance() {
        let mut s = smoothed_systems(0.1);
        s.set_content_bounds(content());
        start_drag(&mut s);
        s.tick(&[move_to(300.0, 200.0)], DT);

        // 3 s of holding still while the camera catches up
        for _ in 0..60 {
            s.tick(&[], DT);
        }

        assert_eq!(s.panner.follow_target(), Vec2::new(5.0, 0.0));
        assert!(s.follow.position().distance(Vec2::new(5.0, 0.0)) < 1e-3);
    }

    #[test]
    fn drag_continues_from_moved_camera() {
        let mut s = smoothed_systems(0.1);
        s.set_content_bounds(content());
        start_drag(&mut s);
        s.tick(&[move_to(300.0, 200.0)], DT);
        for _ in 0..10 {
            s.tick(&[], DT);
        }
        s.tick(&[up()], DT);

        // Second drag starts with the camera away from the origin
        s.tick(&[move_to(400.0, 200.0), down()], DT);
        s.tick(&[], Duration::from_millis(200));
        s.tick(&[move_to(300.0, 200.0)], DT);
        for _ in 0..10 {
            s.tick(&[], DT);
        }

        assert_eq!(s.panner.follow_target(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn dragging_right_at_origin_is_clamped() {
        let mut s = systems();
        s.set_content_bounds(content());
        start_drag(&mut s);

        s.tick(&[move_to(500.0, 200.0)], DT);
        assert_eq!(s.panner.follow_target(), Vec2::ZERO);
    }

    #[test]
    fn closed_gate_blocks_panning() {
        let mut s = systems();
        let gate = SharedPanGate::new(false);
        s.set_pan_gate(gate.clone());
        s.set_content_bounds(content());
        start_drag(&mut s);

        let events = s.tick(&[move_to(300.0, 200.0)], DT).to_vec();
        assert_eq!(kinds(&events), vec![GestureKind::Drag]);
        assert_eq!(s.panner.follow_target(), Vec2::ZERO);
    }

    #[test]
    fn resize_rebuilds_region_and_recenters() {
        let mut s = systems();
        s.set_content_bounds(content());
        start_drag(&mut s);
        s.tick(&[move_to(300.0, 200.0)], DT);

        // Twice as wide: 80x20 world units
        s.resize(1600, 400);

        assert_eq!(s.panner.region().max, Vec2::new(65.0, 45.0));
        assert_eq!(s.panner.follow_target(), Vec2::ZERO);
        assert_eq!(s.viewport.position(), Vec2::ZERO);
    }

    #[test]
    fn recenter_command_snaps_camera() {
        let config = CanvasConfig {
            window_size: (800, 400),
            orthographic_size: 10.0,
            follow_damping: 0.5,
            ..CanvasConfig::default()
        };
        let mut s = CanvasSystems::new(&config);
        s.set_content_bounds(content());
        s.panner.on_drag(Vec2::new(30.0, 10.0));
        for _ in 0..10 {
            s.tick(&[], DT);
        }
        assert_ne!(s.follow.position(), Vec2::ZERO);

        s.apply_command(CanvasCommand::Recenter);

        assert_eq!(s.panner.follow_target(), Vec2::ZERO);
        assert_eq!(s.follow.position(), Vec2::ZERO);
        assert_eq!(s.viewport.position(), Vec2::ZERO);
    }
}
