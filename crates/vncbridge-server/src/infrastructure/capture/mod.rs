//! Screen capture collaborator.
//!
//! Pixel capture itself lives outside this crate.  The coordinator only needs
//! to ask a capture source for the display geometry, start it with a target
//! size plus a way to announce finished frames, and stop it again.  That
//! contract is the [`CaptureSource`] trait.
//!
//! A source announces frames through a [`CaptureSink`], which posts
//! `CaptureReady` events to the process event queue.  The announcement is
//! processed on the queue's consumer thread like every other lifecycle event.

mod static_source;

pub use static_source::StaticCapture;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::trace;

use vncbridge_core::{Event, EventQueue, FrameInfo};

/// Error type for capture sources.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The capture pipeline could not be started.
    #[error("capture unavailable: {0}")]
    Unavailable(String),
    /// The display geometry could not be determined.
    #[error("cannot query display geometry: {0}")]
    Geometry(String),
}

/// Size and orientation of a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGeometry {
    pub width: u32,
    pub height: u32,
    /// `true` when the panel is turned 90° or 270° from its native
    /// orientation.
    pub rotated: bool,
}

impl DisplayGeometry {
    pub fn new(width: u32, height: u32, rotated: bool) -> Self {
        Self {
            width,
            height,
            rotated,
        }
    }

    /// Width and height as the viewer sees them: swapped when rotated.
    pub fn oriented_size(&self) -> (u32, u32) {
        if self.rotated {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// Handle a capture source uses to announce new frames.
#[derive(Clone)]
pub struct CaptureSink {
    queue: Arc<EventQueue>,
}

impl CaptureSink {
    pub fn new(queue: Arc<EventQueue>) -> Self {
        Self { queue }
    }

    /// Posts a `CaptureReady` event for `frame`.
    ///
    /// Returns `false` once the queue has shut down; the frame is dropped.
    pub fn frame_ready(&self, frame: FrameInfo) -> bool {
        match self.queue.enqueue(Event::capture_ready(frame)) {
            Ok(()) => true,
            Err(e) => {
                trace!(sequence = frame.sequence, "frame dropped: {e}");
                false
            }
        }
    }
}

impl fmt::Debug for CaptureSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSink")
            .field("pending", &self.queue.len())
            .finish()
    }
}

/// The display capture collaborator driven by the session coordinator.
///
/// Implementations must be safe to call from the event consumer thread while
/// their own capture threads run.
#[cfg_attr(test, mockall::automock)]
pub trait CaptureSource: Send + Sync {
    /// Reports the native size and orientation of the captured display.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Geometry`] if the display cannot be queried.
    fn display_geometry(&self) -> Result<DisplayGeometry, CaptureError>;

    /// Starts producing frames of `target` size, announcing each on `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Unavailable`] if capture cannot start.
    fn start_capture(
        &self,
        target: DisplayGeometry,
        sink: CaptureSink,
    ) -> Result<(), CaptureError>;

    /// Stops producing frames.  Safe to call when not capturing.
    fn stop_capture(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_geometry_swaps_dimensions() {
        assert_eq!(DisplayGeometry::new(1080, 1920, true).oriented_size(), (1920, 1080));
        assert_eq!(DisplayGeometry::new(1080, 1920, false).oriented_size(), (1080, 1920));
    }

    #[test]
    fn test_sink_posts_capture_ready_event() {
        // Arrange
        let queue = Arc::new(EventQueue::new());
        let sink = CaptureSink::new(Arc::clone(&queue));
        let frame = FrameInfo {
            width: 640,
            height: 480,
            sequence: 7,
        };

        // Act
        let accepted = sink.frame_ready(frame);

        // Assert
        assert!(accepted);
        let event = queue.await_next().unwrap();
        assert_eq!(event.frame(), Some(frame));
    }

    #[test]
    fn test_sink_reports_dropped_frame_after_shutdown() {
        let queue = Arc::new(EventQueue::new());
        let sink = CaptureSink::new(Arc::clone(&queue));
        queue.shutdown();

        assert!(!sink.frame_ready(FrameInfo {
            width: 1,
            height: 1,
            sequence: 0,
        }));
        assert!(queue.is_empty());
    }
}
