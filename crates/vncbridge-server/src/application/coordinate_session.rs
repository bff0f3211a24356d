//! SessionCoordinator: starts and stops capture and input with the viewer count.
//!
//! The coordinator is the event queue's listener, so every lifecycle event is
//! handled on the single consumer thread in enqueue order.  Only the 0→1 and
//! 1→0 edges of the viewer count have side effects:
//!
//! ```text
//! 0→1  capture.start_capture(target)  then  injector.start(w, h)
//! 1→0  injector.stop()                then  capture.stop_capture()
//! ```
//!
//! A failed activation never refuses the viewer.  Whatever did start is rolled
//! back, the failure is logged, and the session is reported as degraded until
//! the last viewer leaves.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, info, trace, warn};

use vncbridge_core::{
    ClientId, Event, EventKind, EventListener, FrameInfo, SessionState, SessionTransition,
};

use crate::application::inject_input::InputInjector;
use crate::infrastructure::capture::{CaptureError, CaptureSink, CaptureSource, DisplayGeometry};

/// Receives `CaptureReady` notifications while a session is active.
///
/// The transport implements this to mark its framebuffer dirty.
pub trait FrameObserver: Send + Sync {
    fn frame_ready(&self, frame: FrameInfo);
}

/// Explicit target size; unset dimensions come from the capture source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeOverride {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Point-in-time view of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub connected_clients: usize,
    pub active: bool,
    /// Active, but capture or input failed to start.
    pub degraded: bool,
    pub capture_running: bool,
    pub input_running: bool,
    /// Number of 0→1 edges handled.
    pub activations: u64,
    /// Number of 1→0 edges handled.
    pub deactivations: u64,
}

#[derive(Debug, Default)]
struct CoordinatorState {
    clients: SessionState,
    capture_running: bool,
    input_running: bool,
    activations: u64,
    deactivations: u64,
}

pub struct SessionCoordinator {
    capture: Arc<dyn CaptureSource>,
    injector: Arc<InputInjector>,
    sink: CaptureSink,
    size_override: SizeOverride,
    frames: Option<Arc<dyn FrameObserver>>,
    state: Mutex<CoordinatorState>,
}

impl SessionCoordinator {
    pub fn new(
        capture: Arc<dyn CaptureSource>,
        injector: Arc<InputInjector>,
        sink: CaptureSink,
    ) -> Self {
        Self {
            capture,
            injector,
            sink,
            size_override: SizeOverride::default(),
            frames: None,
            state: Mutex::new(CoordinatorState::default()),
        }
    }

    pub fn with_size_override(mut self, size_override: SizeOverride) -> Self {
        self.size_override = size_override;
        self
    }

    pub fn with_frame_observer(mut self, observer: Arc<dyn FrameObserver>) -> Self {
        self.frames = Some(observer);
        self
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        let active = state.clients.is_active();
        SessionSnapshot {
            connected_clients: state.clients.connected_clients(),
            active,
            degraded: active && !(state.capture_running && state.input_running),
            capture_running: state.capture_running,
            input_running: state.input_running,
            activations: state.activations,
            deactivations: state.deactivations,
        }
    }

    /// Size the session runs at: the display's oriented size, with any
    /// configured dimension taking precedence.
    ///
    /// # Errors
    ///
    /// Returns the capture source's error when it cannot report geometry and
    /// the override does not cover both dimensions.
    pub fn target_geometry(&self) -> Result<DisplayGeometry, CaptureError> {
        if let SizeOverride {
            width: Some(width),
            height: Some(height),
        } = self.size_override
        {
            let rotated = self.capture.display_geometry().map(|g| g.rotated).unwrap_or(false);
            return Ok(DisplayGeometry::new(width, height, rotated));
        }

        let display = self.capture.display_geometry()?;
        let (width, height) = display.oriented_size();
        Ok(DisplayGeometry::new(
            self.size_override.width.unwrap_or(width),
            self.size_override.height.unwrap_or(height),
            display.rotated,
        ))
    }

    /// Handles one lifecycle event.  Called on the queue consumer thread.
    pub fn handle(&self, event: Event) {
        match event.kind() {
            EventKind::ClientConnected => self.client_connected(event.client_id()),
            EventKind::ClientDisconnected => self.client_disconnected(event.client_id()),
            EventKind::CaptureReady => self.capture_ready(event.frame()),
        }
    }

    /// Tears the session down and forgets every counted viewer.  Used when
    /// the process exits with the transport still holding connections.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        if state.clients.is_active() || state.capture_running || state.input_running {
            info!(
                clients = state.clients.connected_clients(),
                "stopping active session on shutdown"
            );
            self.deactivate(&mut state);
            state.clients = SessionState::new();
        }
    }

    fn client_connected(&self, id: Option<ClientId>) {
        let mut state = self.lock();
        let transition = state.clients.client_connected(id);
        let clients = state.clients.connected_clients();
        match transition {
            SessionTransition::Activate => {
                info!(clients, "client connected, activating session");
                self.activate(&mut state);
            }
            SessionTransition::Anomaly(anomaly) => {
                warn!(?id, ?anomaly, clients, "ignoring connect notification");
            }
            SessionTransition::Unchanged | SessionTransition::Deactivate => {
                info!(clients, "client connected");
            }
        }
    }

    fn client_disconnected(&self, id: Option<ClientId>) {
        let mut state = self.lock();
        let transition = state.clients.client_disconnected(id);
        let clients = state.clients.connected_clients();
        match transition {
            SessionTransition::Deactivate => {
                info!(clients, "last client disconnected, deactivating session");
                self.deactivate(&mut state);
            }
            SessionTransition::Anomaly(anomaly) => {
                warn!(?id, ?anomaly, clients, "ignoring disconnect notification");
            }
            SessionTransition::Unchanged | SessionTransition::Activate => {
                info!(clients, "client disconnected");
            }
        }
    }

    fn capture_ready(&self, frame: Option<FrameInfo>) {
        let state = self.lock();
        let (Some(frame), true) = (frame, state.capture_running) else {
            trace!("capture-ready outside an active capture, dropped");
            return;
        };
        drop(state);
        if let Some(observer) = &self.frames {
            observer.frame_ready(frame);
        }
    }

    fn activate(&self, state: &mut CoordinatorState) {
        state.activations += 1;

        let target = match self.target_geometry() {
            Ok(target) => target,
            Err(e) => {
                error!("session degraded, no capture or input: {e}");
                return;
            }
        };

        if let Err(e) = self.capture.start_capture(target, self.sink.clone()) {
            error!("session degraded, capture failed to start: {e}");
            return;
        }
        state.capture_running = true;

        if let Err(e) = self.injector.start(target.width, target.height) {
            error!("session degraded, input device failed to start: {e}");
            self.capture.stop_capture();
            state.capture_running = false;
            return;
        }
        state.input_running = true;

        info!(
            width = target.width,
            height = target.height,
            rotated = target.rotated,
            "session active"
        );
    }

    fn deactivate(&self, state: &mut CoordinatorState) {
        state.deactivations += 1;
        if state.input_running {
            self.injector.stop();
            state.input_running = false;
        }
        if state.capture_running {
            self.capture.stop_capture();
            state.capture_running = false;
        }
        info!("session idle");
    }
}

impl EventListener for SessionCoordinator {
    fn on_event(&self, event: Event) {
        self.handle(event);
    }
}
