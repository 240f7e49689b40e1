//=========================================================================
// Follow System
//=========================================================================
//
// Moves the real camera toward the panner's follow target.
//
// Architecture:
//   BoundedPanner (follow target) → FollowSystem::update() → camera position
//
// Smoothing is what makes panning feel soft, but it also means a target
// that jumps produces a visible glide. `set_position_without_interpolation`
// is the escape hatch: the camera lands on the target in the same update.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;
use log::trace;

//=== FollowSystem Trait ==================================================

/// Camera-follow collaborator driven by the panner.
pub trait FollowSystem {
    /// Places the camera on `target` with no interpolation for this update.
    ///
    /// `warp_delta` is how far the target moved (new − old), for systems
    /// that keep framing state relative to the target. A system that lands
    /// exactly on the target can ignore it.
    fn set_position_without_interpolation(&mut self, target: Vec2, warp_delta: Vec2);
}

//=== SmoothFollow ========================================================

/// Exponentially damped follow camera.
///
/// `damping` is the time constant: after `damping` seconds the camera has
/// covered ~63% of the remaining distance. A damping of zero follows the
/// target exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothFollow {
    position: Vec2,
    damping: f32,
    smoothing_enabled: bool,
}

impl SmoothFollow {
    /// Creates a follow camera at the origin.
    ///
    /// # Panics
    ///
    /// Panics if `damping` is negative or not finite.
    pub fn new(damping: f32) -> Self {
        assert!(
            damping.is_finite() && damping >= 0.0,
            "Follow damping must be finite and non-negative, got {}",
            damping
        );

        Self {
            position: Vec2::ZERO,
            damping,
            smoothing_enabled: true,
        }
    }

    /// Advances the camera toward `target` by one frame.
    pub fn update(&mut self, target: Vec2, dt: Duration) {
        if !self.smoothing_enabled || self.damping == 0.0 {
            self.position = target;
            return;
        }

        let t = 1.0 - (-dt.as_secs_f32() / self.damping).exp();
        self.position += (target - self.position) * t;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }
}

impl FollowSystem for SmoothFollow {
    /// Snaps onto `target`. `SmoothFollow` keeps no offset from the target,
    /// so the snap already covers `warp_delta`.
    fn set_position_without_interpolation(&mut self, target: Vec2, warp_delta: Vec2) {
        self.smoothing_enabled = false;
        self.update(target, Duration::ZERO);
        self.smoothing_enabled = true;

        trace!(target: "camera", "Follow camera warped by {:?} to {:?}", warp_delta, target);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn smoothing_moves_partway() {
        let mut follow = SmoothFollow::new(0.25);
        follow.update(Vec2::new(10.0, 0.0), FRAME);

        let x = follow.position().x;
        assert!(x > 0.0 && x < 10.0, "Expected partial progress, got {}", x);
    }

    #[test]
    fn smoothing_converges() {
        let mut follow = SmoothFollow::new(0.1);
        let target = Vec2::new(10.0, -4.0);
        for _ in 0..600 {
            follow.update(target, FRAME);
        }
        assert!(follow.position().distance(target) < 1e-3);
    }

    #[test]
    fn zero_damping_follows_exactly() {
        let mut follow = SmoothFollow::new(0.0);
        follow.update(Vec2::new(3.0, 4.0), FRAME);
        assert_eq!(follow.position(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn warp_lands_on_target_and_restores_smoothing() {
        let mut follow = SmoothFollow::new(0.5);
        follow.update(Vec2::new(8.0, 8.0), FRAME);

        follow.set_position_without_interpolation(Vec2::ZERO, Vec2::new(-8.0, -8.0));
        assert_eq!(follow.position(), Vec2::ZERO);

        // Smoothing is active again after the warp
        follow.update(Vec2::new(10.0, 0.0), FRAME);
        assert!(follow.position().x < 10.0);
    }

    #[test]
    fn warp_from_lagging_camera_lands_exactly() {
        let mut follow = SmoothFollow::new(0.5);
        follow.update(Vec2::new(30.0, 10.0), FRAME);
        assert_ne!(follow.position(), Vec2::new(30.0, 10.0));

        // The delta describes the target's jump, not the camera's
        follow.set_position_without_interpolation(Vec2::new(2.0, 1.0), Vec2::new(-28.0, -9.0));
        assert_eq!(follow.position(), Vec2::new(2.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "Follow damping must be finite and non-negative")]
    fn negative_damping_panics() {
        SmoothFollow::new(-1.0);
    }
}
