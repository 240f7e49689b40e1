//=========================================================================
// Bounds2
//=========================================================================
//
// Axis-aligned 2D box described by its `min` and `max` corners.
//
// Used for content bounds, viewport bounds and the pan-bound region.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Bounds2 =============================================================

/// Axis-aligned box in 2D world space.
///
/// A box is well formed when `min <= max` on both axes. [`Bounds2::new`]
/// does not reorder its corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds2 {
    /// Zero-sized box at the origin.
    pub const ZERO: Self = Self {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    //--- Construction -----------------------------------------------------

    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Builds a box of `size` centred on `center`.
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns `true` if `point` lies inside or on the edge of the box.
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns the point of the box closest to `point`.
    ///
    /// Each axis is clamped independently, which is the Euclidean closest
    /// point for an axis-aligned box. Points already inside are returned
    /// unchanged.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    //--- Transformations --------------------------------------------------

    /// Grows the box by `margin` on every side.
    ///
    /// A margin of 5 turns `[(0,0),(100,50)]` into `[(-5,-5),(105,55)]`.
    pub fn expand(&self, margin: f32) -> Self {
        let margin = Vec2::splat(margin);
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self::ZERO
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
