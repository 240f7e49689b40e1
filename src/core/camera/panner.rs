//=========================================================================
// Bounded Panner
//=========================================================================
//
// Owns the camera follow target and keeps it inside the pan-bound region.
//
// Architecture:
// ```text
//   content bounds ─┐
//   viewport size  ─┼─ set_content_bounds() → BoundRegion → recenter
//   margin         ─┘
//
//   GestureEvent::Drag(delta) → PanGate? → on_drag() → clamp → follow target
// ```
//
// The region is the legal displacement of the follow target from the
// origin. It is zero on any axis where the (margin-expanded) content
// already fits the viewport, and otherwise spans exactly the overflow:
//
//   region.min = min(0, content.min − viewport.min)
//   region.max = max(0, content.max − viewport.max)
//
// which guarantees region.min <= region.max on both axes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec2;
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::follow::FollowSystem;
use crate::core::input::GestureEvent;
use crate::core::math::Bounds2;

//=== PanGate =============================================================

/// Game-state predicate deciding whether drags may pan the camera.
///
/// When the gate is closed a drag is skipped entirely: the follow target
/// is not even re-clamped. Typical use is suppressing panning while the
/// player is dragging something else (e.g. wiring two nodes together).
pub trait PanGate {
    fn panning_allowed(&self) -> bool;
}

impl<F: Fn() -> bool> PanGate for F {
    fn panning_allowed(&self) -> bool {
        self()
    }
}

/// Gate that never blocks panning.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPan;

impl PanGate for AlwaysPan {
    fn panning_allowed(&self) -> bool {
        true
    }
}

/// Thread-safe gate flag shared between game logic and the core thread.
///
/// Cloning yields another handle to the same flag.
#[derive(Debug, Clone)]
pub struct SharedPanGate {
    allowed: Arc<AtomicBool>,
}

impl SharedPanGate {
    pub fn new(allowed: bool) -> Self {
        Self {
            allowed: Arc::new(AtomicBool::new(allowed)),
        }
    }

    pub fn set_allowed(&self, allowed: bool) {
        self.allowed.store(allowed, Ordering::Release);
    }
}

impl Default for SharedPanGate {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PanGate for SharedPanGate {
    fn panning_allowed(&self) -> bool {
        self.allowed.load(Ordering::Acquire)
    }
}

//=== ContentLayout =======================================================

/// Last content bounds handed to the panner, kept so the region can be
/// rebuilt when only the viewport changes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ContentLayout {
    bounds: Bounds2,
    margin: f32,
}

//=== BoundedPanner =======================================================

/// Camera follow-target confiner.
///
/// The follow target is the single point the external follow system
/// chases every frame. The panner is its only writer.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedPanner {
    region: Bounds2,
    follow_target: Vec2,
    layout: Option<ContentLayout>,
}

impl BoundedPanner {
    /// Creates a panner with a zero region and the target at the origin.
    pub fn new() -> Self {
        Self {
            region: Bounds2::ZERO,
            follow_target: Vec2::ZERO,
            layout: None,
        }
    }

    //--- Bounds -----------------------------------------------------------

    /// Rebuilds the pan-bound region for new content and recenters.
    ///
    /// `content` is grown by `margin` on every side to make panning up to
    /// the edges comfortable. The viewport is assumed centred on the
    /// origin with size `viewport_size`.
    pub fn set_content_bounds<F>(
        &mut self,
        content: Bounds2,
        viewport_size: Vec2,
        margin: f32,
        follow: &mut F,
    ) where
        F: FollowSystem + ?Sized,
    {
        self.layout = Some(ContentLayout { bounds: content, margin });
        self.region = Self::compute_region(content, viewport_size, margin);

        debug!(
            target: "camera",
            "Pan region set to [{:?}, {:?}] (content [{:?}, {:?}], viewport {:?}, margin {})",
            self.region.min,
            self.region.max,
            content.min,
            content.max,
            viewport_size,
            margin
        );

        self.recenter_immediately(follow);
    }

    /// Rebuilds the region from the last content bounds after the
    /// viewport changed size.
    ///
    /// Returns `false` (and does nothing) if no content bounds were set.
    pub fn refresh_viewport<F>(&mut self, viewport_size: Vec2, follow: &mut F) -> bool
    where
        F: FollowSystem + ?Sized,
    {
        match self.layout {
            Some(layout) => {
                self.set_content_bounds(layout.bounds, viewport_size, layout.margin, follow);
                true
            }
            None => false,
        }
    }

    fn compute_region(content: Bounds2, viewport_size: Vec2, margin: f32) -> Bounds2 {
        let content = content.expand(margin);
        let viewport = Bounds2::from_center_size(Vec2::ZERO, viewport_size);

        Bounds2 {
            min: (content.min - viewport.min).min(Vec2::ZERO),
            max: (content.max - viewport.max).max(Vec2::ZERO),
        }
    }

    //--- Panning ----------------------------------------------------------

    /// Moves the follow target by `delta`, clamped to the region.
    ///
    /// Callers are expected to have consulted the [`PanGate`] already;
    /// see [`BoundedPanner::handle_gesture`].
    pub fn on_drag(&mut self, delta: Vec2) -> Vec2 {
        self.follow_target = self.region.closest_point(self.follow_target + delta);
        trace!(target: "camera", "Follow target → {:?}", self.follow_target);
        self.follow_target
    }

    /// Routes a gesture event to the panner.
    ///
    /// Only `Drag` moves the target, and only while `gate` allows it.
    /// Returns `true` if the event was applied.
    pub fn handle_gesture<G>(&mut self, event: &GestureEvent, gate: &G) -> bool
    where
        G: PanGate + ?Sized,
    {
        match *event {
            GestureEvent::Drag(delta) => {
                if !gate.panning_allowed() {
                    trace!(target: "camera", "Drag ignored, panning gated");
                    return false;
                }
                self.on_drag(delta);
                true
            }
            _ => false,
        }
    }

    /// Puts the follow target back on the origin and tells the follow
    /// system to jump there without smoothing.
    pub fn recenter_immediately<F>(&mut self, follow: &mut F)
    where
        F: FollowSystem + ?Sized,
    {
        let warp_delta = -self.follow_target;
        self.follow_target = Vec2::ZERO;
        follow.set_position_without_interpolation(self.follow_target, warp_delta);

        debug!(target: "camera", "Recentered (warp {:?})", warp_delta);
    }

    //--- Queries ----------------------------------------------------------

    pub fn follow_target(&self) -> Vec2 {
        self.follow_target
    }

    pub fn region(&self) -> Bounds2 {
        self.region
    }
}

impl Default for BoundedPanner {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
