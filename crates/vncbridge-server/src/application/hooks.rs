//! Entry points handed to the remote-framebuffer transport.
//!
//! The transport owns connections and decodes viewer messages.  It reports
//! what it sees through [`TransportHooks`]: lifecycle changes become queue
//! events for the coordinator, while key and pointer input go straight to the
//! injector on the transport's own thread.
//!
//! Hooks never fail back into the transport.  Input that cannot be injected
//! is logged and dropped so a viewer with an exotic keyboard, or one typing
//! while the input device is down, cannot stall the protocol loop.

use std::sync::Arc;

use tracing::{debug, error, warn};

use vncbridge_core::{ClientId, Event, EventQueue};

use crate::application::inject_input::{InjectError, InputInjector};

/// Callbacks a transport invokes for every connection and input message.
pub trait TransportHooks: Send + Sync {
    /// A viewer connected.  Must be called before any input from it is routed.
    fn on_client_connected(&self, client: ClientId);

    fn on_client_gone(&self, client: ClientId);

    fn on_key_event(&self, down: bool, keysym: u32);

    /// `button_mask` uses RFB bit order: bit 0 is the left button.
    fn on_pointer_event(&self, button_mask: u8, x: i32, y: i32);
}

/// The hooks implementation wired to the event queue and the injector.
pub struct SessionHooks {
    queue: Arc<EventQueue>,
    injector: Arc<InputInjector>,
}

impl SessionHooks {
    pub fn new(queue: Arc<EventQueue>, injector: Arc<InputInjector>) -> Self {
        Self { queue, injector }
    }

    fn post(&self, event: Event) {
        if let Err(e) = self.queue.enqueue(event) {
            debug!("lifecycle event dropped: {e}");
        }
    }

    fn report(&self, result: Result<(), InjectError>) {
        match result {
            Ok(()) => {}
            Err(InjectError::UnknownSymbol(keysym)) => {
                warn!("dropping key with no mapping: {keysym:#06x}");
            }
            Err(InjectError::NotStarted) => debug!("input outside an active session dropped"),
            Err(InjectError::Device(e)) => error!("input injection failed: {e}"),
        }
    }
}

impl TransportHooks for SessionHooks {
    fn on_client_connected(&self, client: ClientId) {
        debug!(%client, "transport reported new client");
        self.post(Event::client_connected(client));
    }

    fn on_client_gone(&self, client: ClientId) {
        debug!(%client, "transport reported client gone");
        self.post(Event::client_disconnected(client));
    }

    fn on_key_event(&self, down: bool, keysym: u32) {
        self.report(self.injector.key_event(down, keysym));
    }

    fn on_pointer_event(&self, button_mask: u8, x: i32, y: i32) {
        self.report(self.injector.pointer_event(button_mask, x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::inject_input::InjectorSettings;
    use crate::infrastructure::input_device::mock::MockDeviceBackend;
    use uuid::Uuid;
    use vncbridge_core::{EventKind, Keymap};

    fn make_hooks() -> (SessionHooks, Arc<EventQueue>, Arc<InputInjector>, Arc<MockDeviceBackend>) {
        let queue = Arc::new(EventQueue::new());
        let backend = Arc::new(MockDeviceBackend::new());
        let injector = Arc::new(InputInjector::new(
            Arc::clone(&backend) as Arc<dyn vncbridge_core::DeviceBackend>,
            Arc::new(Keymap::default()),
            InjectorSettings::default(),
        ));
        let hooks = SessionHooks::new(Arc::clone(&queue), Arc::clone(&injector));
        (hooks, queue, injector, backend)
    }

    #[test]
    fn test_connection_hooks_enqueue_events_in_order() {
        // Arrange
        let (hooks, queue, _, _) = make_hooks();
        let id = Uuid::new_v4();

        // Act
        hooks.on_client_connected(id);
        hooks.on_client_gone(id);

        // Assert
        let first = queue.await_next().unwrap();
        let second = queue.await_next().unwrap();
        assert_eq!(first.kind(), EventKind::ClientConnected);
        assert_eq!(first.client_id(), Some(id));
        assert_eq!(second.kind(), EventKind::ClientDisconnected);
    }

    #[test]
    fn test_connect_after_queue_shutdown_does_not_panic() {
        let (hooks, queue, _, _) = make_hooks();
        queue.shutdown();
        hooks.on_client_connected(Uuid::new_v4());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_input_is_routed_to_injector() {
        let (hooks, _, injector, backend) = make_hooks();
        injector.start(640, 480).unwrap();

        hooks.on_key_event(true, 'x' as u32);
        hooks.on_pointer_event(0, 1, 1);

        assert_eq!(backend.events().len(), 5);
    }

    #[test]
    fn test_unroutable_input_is_swallowed() {
        let (hooks, _, injector, backend) = make_hooks();

        hooks.on_key_event(true, 'x' as u32); // not started
        injector.start(640, 480).unwrap();
        hooks.on_key_event(true, 0x0200_0000); // unknown keysym

        assert!(backend.events().is_empty());
    }
}
