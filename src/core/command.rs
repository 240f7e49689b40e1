//=========================================================================
// Canvas Commands
//=========================================================================
//
// Requests from application code to the core thread.
//
// Architecture:
//   CanvasHandle (any thread) ──Sender<CanvasCommand>──→ core thread
//                                                         ↓
//                                              CanvasSystems::apply_command()
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;

//=== Internal Dependencies ===============================================

use crate::core::math::Bounds2;

//=== CanvasCommand =======================================================

/// Content layout changes applied at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasCommand {
    /// New content bounds; rebuilds the pan region and recenters.
    SetContentBounds(Bounds2),

    /// Snap the camera back to the origin without smoothing.
    Recenter,
}

//=== HandleError =========================================================

/// Errors returned by [`CanvasHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    /// The core thread has exited; the command was not delivered.
    Disconnected,
}

impl std::fmt::Display for HandleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "Core thread is no longer running"),
        }
    }
}

impl std::error::Error for HandleError {}

//=== CanvasHandle ========================================================

/// Cloneable, thread-safe handle for steering the running canvas.
#[derive(Debug, Clone)]
pub struct CanvasHandle {
    sender: Sender<CanvasCommand>,
}

impl CanvasHandle {
    pub(crate) fn new(sender: Sender<CanvasCommand>) -> Self {
        Self { sender }
    }

    /// Sets new content bounds (world space).
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::Disconnected`] if the core thread is gone.
    pub fn set_content_bounds(&self, bounds: Bounds2) -> Result<(), HandleError> {
        self.send(CanvasCommand::SetContentBounds(bounds))
    }

    /// Recenters the camera immediately.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::Disconnected`] if the core thread is gone.
    pub fn recenter(&self) -> Result<(), HandleError> {
        self.send(CanvasCommand::Recenter)
    }

    fn send(&self, command: CanvasCommand) -> Result<(), HandleError> {
        self.sender
            .send(command)
            .map_err(|_| HandleError::Disconnected)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
