//=========================================================================
// Input Event Types
//=========================================================================
//
// Engine-side representation of pointer input, from raw platform events
// up to semantic gestures.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (raw: button down/up, cursor moved)
//         ↓
//    PointerTracker → PointerSample (one per frame, world space)
//         ↓
//    GestureRecognizer → GestureEvent (click / drag lifecycle)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::hash::{Hash, Hasher};
use std::time::Duration;

use glam::Vec2;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// Abstracts platform-specific button representations into a stable,
/// portable enum. The `Other` variant covers side and macro buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button.
    Other,
}

//=== InputEvent ==========================================================

/// Low-level pointer event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Events compare by type + button. `MouseMoved` events are equal
/// regardless of coordinates so a `HashSet` keeps only the latest one
/// (last position wins).
///
/// ```text
/// MouseButtonDown{Left} == MouseButtonDown{Left}   ✓
/// MouseButtonDown{Left} == MouseButtonUp{Left}     ✗
/// MouseMoved{...}       == MouseMoved{...}         ✓ (always equal)
/// ```
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Mouse button pressed.
    MouseButtonDown { button: MouseButton },

    /// Mouse button released.
    MouseButtonUp { button: MouseButton },

    /// Cursor moved. Screen space (pixels, top-left origin).
    MouseMoved { x: f32, y: f32 },
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (MouseButtonDown { button: a }, MouseButtonDown { button: b }) => a == b,
            (MouseButtonUp { button: a }, MouseButtonUp { button: b }) => a == b,
            // MouseMoved: coordinates ignored, always equal
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes discriminant + button. Coordinates are NOT hashed for
/// `MouseMoved` (consistent with equality).
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::MouseButtonDown { button } | Self::MouseButtonUp { button } => {
                button.hash(state);
            }
            _ => {}
        }
    }
}

//=== PointerSample =======================================================

/// One frame of pointer input as seen by the gesture recognizer.
///
/// Produced once per tick by the host input layer and never stored.
/// `is_down` / `is_up` are transitions that happened this frame, not the
/// held state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Pointer position in world space.
    pub position: Vec2,

    /// Pointer position in screen space (pixels, top-left origin).
    pub screen_position: Vec2,

    /// Primary button went down this frame.
    pub is_down: bool,

    /// Primary button went up this frame.
    pub is_up: bool,

    /// Time elapsed since the previous sample.
    pub dt: Duration,
}

impl PointerSample {
    /// A sample with no button transitions, screen position zero.
    pub fn idle(position: Vec2, dt: Duration) -> Self {
        Self {
            position,
            screen_position: Vec2::ZERO,
            is_down: false,
            is_up: false,
            dt,
        }
    }

    /// A sample where the primary button went down.
    pub fn pressed(position: Vec2, dt: Duration) -> Self {
        Self {
            is_down: true,
            ..Self::idle(position, dt)
        }
    }

    /// A sample where the primary button went up.
    pub fn released(position: Vec2, dt: Duration) -> Self {
        Self {
            is_up: true,
            ..Self::idle(position, dt)
        }
    }

    pub fn with_screen_position(mut self, screen_position: Vec2) -> Self {
        self.screen_position = screen_position;
        self
    }
}

//=== GestureEvent ========================================================

/// Semantic pointer gesture emitted by the recognizer.
///
/// Every gesture produces exactly one of two sequences:
///
/// ```text
/// PointerDown → Click → PointerUp
/// PointerDown → DragStart → Drag* → DragEnd → PointerUp
/// ```
///
/// All positions are world space. `Drag` carries a delta that points
/// against the pointer movement (previous − current), so adding it to a
/// camera follow target pans the content along with the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PointerDown(Vec2),
    Click(Vec2),
    PointerUp(Vec2),
    DragStart(Vec2),
    Drag(Vec2),
    DragEnd(Vec2),
}

impl GestureEvent {
    /// Returns the payload-free kind of this event.
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::PointerDown(_) => GestureKind::PointerDown,
            Self::Click(_) => GestureKind::Click,
            Self::PointerUp(_) => GestureKind::PointerUp,
            Self::DragStart(_) => GestureKind::DragStart,
            Self::Drag(_) => GestureKind::Drag,
            Self::DragEnd(_) => GestureKind::DragEnd,
        }
    }

    /// Position or delta carried by the event.
    pub fn vector(&self) -> Vec2 {
        match *self {
            Self::PointerDown(v)
            | Self::Click(v)
            | Self::PointerUp(v)
            | Self::DragStart(v)
            | Self::Drag(v)
            | Self::DragEnd(v) => v,
        }
    }
}

//=== GestureKind =========================================================

/// Discriminant of a [`GestureEvent`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    PointerDown,
    Click,
    PointerUp,
    DragStart,
    Drag,
    DragEnd,
}

impl GestureKind {
    const fn bit(self) -> u8 {
        match self {
            Self::PointerDown => 1 << 0,
            Self::Click => 1 << 1,
            Self::PointerUp => 1 << 2,
            Self::DragStart => 1 << 3,
            Self::Drag => 1 << 4,
            Self::DragEnd => 1 << 5,
        }
    }
}

//=== GestureFilter =======================================================

/// Set of gesture kinds a subscriber wants to receive.
///
/// Pre-defined sets cover the common consumers; build others with
/// [`GestureFilter::only`] or [`GestureFilter::with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GestureFilter {
    bits: u8,
}

impl GestureFilter {
    /// Receives nothing.
    pub const NONE: Self = Self { bits: 0 };

    /// Receives every gesture event.
    pub const ALL: Self = Self { bits: 0b11_1111 };

    /// Click lifecycle: PointerDown, Click, PointerUp.
    pub const CLICKS: Self = Self {
        bits: GestureKind::PointerDown.bit() | GestureKind::Click.bit() | GestureKind::PointerUp.bit(),
    };

    /// Drag lifecycle: DragStart, Drag, DragEnd.
    pub const DRAGS: Self = Self {
        bits: GestureKind::DragStart.bit() | GestureKind::Drag.bit() | GestureKind::DragEnd.bit(),
    };

    /// Builds a filter from an explicit list of kinds.
    pub fn only(kinds: &[GestureKind]) -> Self {
        kinds.iter().fold(Self::NONE, |filter, kind| filter.with(*kind))
    }

    /// Returns a copy of the filter that also accepts `kind`.
    pub const fn with(self, kind: GestureKind) -> Self {
        Self {
            bits: self.bits | kind.bit(),
        }
    }

    pub const fn accepts(&self, kind: GestureKind) -> bool {
        self.bits & kind.bit() != 0
    }
}

impl Default for GestureFilter {
    fn default() -> Self {
        Self::ALL
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    //--- Test Helpers -----------------------------------------------------

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    //=====================================================================
    // InputEvent Tests
    //=====================================================================

    #[test]
    fn mouse_moved_events_are_equal_regardless_of_position() {
        let a = InputEvent::MouseMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::MouseMoved { x: 300.0, y: 400.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn button_events_compare_by_type_and_button() {
        let down_left = InputEvent::MouseButtonDown { button: MouseButton::Left };
        let down_right = InputEvent::MouseButtonDown { button: MouseButton::Right };
        let up_left = InputEvent::MouseButtonUp { button: MouseButton::Left };

        assert_eq!(down_left, InputEvent::MouseButtonDown { button: MouseButton::Left });
        assert_ne!(down_left, down_right);
        assert_ne!(down_left, up_left);
    }

    #[test]
    fn hash_set_coalesces_mouse_moves() {
        let mut set = HashSet::new();
        set.replace(InputEvent::MouseMoved { x: 1.0, y: 1.0 });
        set.replace(InputEvent::MouseMoved { x: 9.0, y: 9.0 });

        assert_eq!(set.len(), 1);
        match set.iter().next() {
            Some(InputEvent::MouseMoved { x, y }) => assert_eq!((*x, *y), (9.0, 9.0)),
            other => panic!("Expected MouseMoved, got {:?}", other),
        }
    }

    //=====================================================================
    // GestureEvent Tests
    //=====================================================================

    #[test]
    fn gesture_event_kind_and_vector() {
        let event = GestureEvent::Drag(Vec2::new(-1.0, 2.0));
        assert_eq!(event.kind(), GestureKind::Drag);
        assert_eq!(event.vector(), Vec2::new(-1.0, 2.0));
    }

    #[test]
    fn filter_presets_partition_kinds() {
        for kind in [GestureKind::PointerDown, GestureKind::Click, GestureKind::PointerUp] {
            assert!(GestureFilter::CLICKS.accepts(kind));
            assert!(!GestureFilter::DRAGS.accepts(kind));
        }
        for kind in [GestureKind::DragStart, GestureKind::Drag, GestureKind::DragEnd] {
            assert!(GestureFilter::DRAGS.accepts(kind));
            assert!(!GestureFilter::CLICKS.accepts(kind));
            assert!(GestureFilter::ALL.accepts(kind));
        }
    }

    #[test]
    fn filter_only_accepts_listed_kinds() {
        let filter = GestureFilter::only(&[GestureKind::Drag]);
        assert!(filter.accepts(GestureKind::Drag));
        assert!(!filter.accepts(GestureKind::DragStart));
        assert!(!GestureFilter::NONE.accepts(GestureKind::Drag));
    }
}
