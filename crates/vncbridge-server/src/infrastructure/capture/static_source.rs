//! A headless capture source with a fixed display.
//!
//! `StaticCapture` reports a configured geometry and, when started, announces
//! one blank frame so the transport pushes an initial framebuffer update.  It
//! is the default source when no compositor capture is wired in.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use vncbridge_core::FrameInfo;

use super::{CaptureError, CaptureSink, CaptureSource, DisplayGeometry};

pub struct StaticCapture {
    geometry: DisplayGeometry,
    sink: Mutex<Option<CaptureSink>>,
    sequence: AtomicU64,
}

impl StaticCapture {
    pub fn new(geometry: DisplayGeometry) -> Self {
        Self {
            geometry,
            sink: Mutex::new(None),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Announces another frame of the current target size.  Returns `false`
    /// when not capturing.
    pub fn refresh(&self, width: u32, height: u32) -> bool {
        let guard = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sink) = guard.as_ref() else {
            return false;
        };
        sink.frame_ready(FrameInfo {
            width,
            height,
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
        })
    }
}

impl CaptureSource for StaticCapture {
    fn display_geometry(&self) -> Result<DisplayGeometry, CaptureError> {
        if self.geometry.width == 0 || self.geometry.height == 0 {
            return Err(CaptureError::Geometry(format!(
                "display reports {}x{}",
                self.geometry.width, self.geometry.height
            )));
        }
        Ok(self.geometry)
    }

    fn start_capture(
        &self,
        target: DisplayGeometry,
        sink: CaptureSink,
    ) -> Result<(), CaptureError> {
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(sink);
        info!(width = target.width, height = target.height, "static capture started");
        self.refresh(target.width, target.height);
        Ok(())
    }

    fn stop_capture(&self) {
        if self.sink.lock().unwrap_or_else(PoisonError::into_inner).take().is_some() {
            debug!("static capture stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vncbridge_core::{EventKind, EventQueue};

    #[test]
    fn test_start_announces_initial_frame() {
        // Arrange
        let queue = Arc::new(EventQueue::new());
        let capture = StaticCapture::new(DisplayGeometry::new(800, 600, false));

        // Act
        capture
            .start_capture(
                DisplayGeometry::new(800, 600, false),
                CaptureSink::new(Arc::clone(&queue)),
            )
            .unwrap();

        // Assert
        let event = queue.await_next().unwrap();
        assert_eq!(event.kind(), EventKind::CaptureReady);
        assert_eq!(
            event.frame(),
            Some(FrameInfo {
                width: 800,
                height: 600,
                sequence: 0
            })
        );
        assert!(capture.is_capturing());
    }

    #[test]
    fn test_refresh_after_stop_is_ignored() {
        let queue = Arc::new(EventQueue::new());
        let capture = StaticCapture::new(DisplayGeometry::new(800, 600, false));
        capture
            .start_capture(
                DisplayGeometry::new(800, 600, false),
                CaptureSink::new(Arc::clone(&queue)),
            )
            .unwrap();
        capture.stop_capture();

        assert!(!capture.refresh(800, 600));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_zero_sized_display_is_a_geometry_error() {
        let capture = StaticCapture::new(DisplayGeometry::new(0, 600, false));
        assert!(matches!(capture.display_geometry(), Err(CaptureError::Geometry(_))));
    }
}
