//=========================================================================
// Viewport
//=========================================================================
//
// Screen-to-world conversion and visible-extent queries.
//
// Coordinate Spaces:
// ```text
//   Screen (pixels)              World (units)
//   (0,0) ┌──────────┐           ┌──────────┐ (+x,+y)
//         │    ·     │   ──→     │    · ← camera position
//         └──────────┘ (w,h)     └──────────┘
//   y grows downward             y grows upward
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Viewport Trait ======================================================

/// Host-provided view onto the world.
///
/// The gesture and camera systems never talk to the renderer directly;
/// they only need to convert pointer positions and know how much of the
/// world is visible.
pub trait Viewport {
    /// Converts a screen position (pixels, top-left origin) to world space.
    fn screen_to_world(&self, screen_position: Vec2) -> Vec2;

    /// Visible world size (width, height), derived from zoom and aspect.
    fn extent(&self) -> Vec2;
}

//=== OrthographicViewport ================================================

/// Orthographic 2D camera view.
///
/// `orthographic_size` is half of the visible world height; the visible
/// width follows from the aspect ratio of the pixel surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicViewport {
    orthographic_size: f32,
    screen_size: Vec2,
    position: Vec2,
}

impl OrthographicViewport {
    //--- Construction -----------------------------------------------------

    /// Creates a viewport centred on the world origin.
    ///
    /// # Panics
    ///
    /// Panics if `orthographic_size <= 0.0`.
    pub fn new(orthographic_size: f32, screen_width: u32, screen_height: u32) -> Self {
        assert!(
            orthographic_size > 0.0,
            "Orthographic size must be positive, got {}",
            orthographic_size
        );

        let mut viewport = Self {
            orthographic_size,
            screen_size: Vec2::ONE,
            position: Vec2::ZERO,
        };
        viewport.resize(screen_width, screen_height);
        viewport
    }

    //--- Mutation ---------------------------------------------------------

    /// Updates the pixel surface size. Zero dimensions are clamped to 1 so
    /// the aspect ratio stays finite while a window is minimized.
    pub fn resize(&mut self, screen_width: u32, screen_height: u32) {
        self.screen_size = Vec2::new(screen_width.max(1) as f32, screen_height.max(1) as f32);
    }

    /// Moves the camera centre to `position` (world space).
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    //--- Queries ----------------------------------------------------------

    pub fn aspect(&self) -> f32 {
        self.screen_size.x / self.screen_size.y
    }

    pub fn orthographic_size(&self) -> f32 {
        self.orthographic_size
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }
}

impl Viewport for OrthographicViewport {
    fn screen_to_world(&self, screen_position: Vec2) -> Vec2 {
        let normalized = screen_position / self.screen_size;
        let extent = self.extent();
        Vec2::new(
            self.position.x + (normalized.x - 0.5) * extent.x,
            self.position.y + (0.5 - normalized.y) * extent.y,
        )
    }

    fn extent(&self) -> Vec2 {
        let height = self.orthographic_size * 2.0;
        Vec2::new(height * self.aspect(), height)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
