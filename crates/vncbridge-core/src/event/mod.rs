//! Lifecycle events and the blocking queue that serializes them.
//!
//! Transport threads (one per viewer connection, or a shared acceptor) and the
//! capture source produce [`Event`]s from arbitrary threads.  A single consumer
//! thread drains the [`EventQueue`] and hands each event to the registered
//! [`EventListener`], which is how lifecycle transitions end up strictly
//! ordered without any lock being held across a transition by a producer.
//!
//! ```text
//! transport thread ─┐
//! transport thread ─┼─► EventQueue (FIFO) ─► consumer thread ─► EventListener
//! capture thread   ─┘
//! ```

pub mod queue;

pub use queue::{EventQueue, QueueError};

use uuid::Uuid;

/// Unique identifier for a connected viewer, derived from UUID v4.
pub type ClientId = Uuid;

/// The kind of lifecycle notification carried by an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A viewer completed its connection handshake.
    ClientConnected,
    /// A viewer connection closed.
    ClientDisconnected,
    /// The capture source has a new frame available.
    CaptureReady,
}

/// Metadata describing a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Monotonic frame sequence number assigned by the capture source.
    pub sequence: u64,
}

/// Optional data attached to an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// The viewer the event refers to.
    Client(ClientId),
    /// The frame that became ready.
    Frame(FrameInfo),
}

/// A single lifecycle notification.
///
/// Events are immutable once constructed and are consumed exactly once: the
/// type is deliberately not `Clone`, and the queue moves each one into the
/// listener.
#[derive(Debug, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    payload: Option<EventPayload>,
}

impl Event {
    /// Creates an event with no payload.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    /// Creates an event carrying `payload`.
    pub fn with_payload(kind: EventKind, payload: EventPayload) -> Self {
        Self {
            kind,
            payload: Some(payload),
        }
    }

    /// A `ClientConnected` event for an identified viewer.
    pub fn client_connected(id: ClientId) -> Self {
        Self::with_payload(EventKind::ClientConnected, EventPayload::Client(id))
    }

    /// A `ClientDisconnected` event for an identified viewer.
    pub fn client_disconnected(id: ClientId) -> Self {
        Self::with_payload(EventKind::ClientDisconnected, EventPayload::Client(id))
    }

    /// A `CaptureReady` event describing `frame`.
    pub fn capture_ready(frame: FrameInfo) -> Self {
        Self::with_payload(EventKind::CaptureReady, EventPayload::Frame(frame))
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn payload(&self) -> Option<&EventPayload> {
        self.payload.as_ref()
    }

    /// Returns the client id if the payload identifies a viewer.
    pub fn client_id(&self) -> Option<ClientId> {
        match self.payload {
            Some(EventPayload::Client(id)) => Some(id),
            _ => None,
        }
    }

    /// Returns the frame metadata if the payload describes a frame.
    pub fn frame(&self) -> Option<FrameInfo> {
        match self.payload {
            Some(EventPayload::Frame(frame)) => Some(frame),
            _ => None,
        }
    }
}

/// Observer that receives drained events on the consumer thread.
///
/// At most one listener is registered on a queue at a time.
pub trait EventListener: Send + Sync {
    /// Handles one event.  Called only from the consumer thread.
    fn on_event(&self, event: Event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_new_has_no_payload() {
        let event = Event::new(EventKind::ClientConnected);
        assert_eq!(event.kind(), EventKind::ClientConnected);
        assert!(event.payload().is_none());
        assert!(event.client_id().is_none());
    }

    #[test]
    fn test_client_connected_carries_client_id() {
        let id = Uuid::new_v4();
        let event = Event::client_connected(id);
        assert_eq!(event.kind(), EventKind::ClientConnected);
        assert_eq!(event.client_id(), Some(id));
        assert!(event.frame().is_none());
    }

    #[test]
    fn test_capture_ready_carries_frame_info() {
        let frame = FrameInfo {
            width: 720,
            height: 1280,
            sequence: 7,
        };
        let event = Event::capture_ready(frame);
        assert_eq!(event.frame(), Some(frame));
        assert!(event.client_id().is_none());
    }
}
