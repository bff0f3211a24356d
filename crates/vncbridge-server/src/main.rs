//! VNCBridge entry point.
//!
//! Wires together configuration, logging, the event queue, the session
//! coordinator and the input injector, then runs until Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()                    -- TOML + defaults
//!  └─ EventQueue::spawn_consumer()     -- "vncbridge-events" thread
//!       └─ SessionCoordinator::on_event
//!            ├─ 0→1 viewers  -> capture start, InputInjector::start
//!            └─ 1→0 viewers  -> InputInjector::stop, capture stop
//!  └─ SessionHooks                     -- handed to the transport
//!  └─ ctrl_c -> queue.shutdown() -> await_termination()
//! ```

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vncbridge_core::{DeviceBackend, EventListener, EventQueue, Keymap};
use vncbridge_server::application::coordinate_session::SessionCoordinator;
use vncbridge_server::application::hooks::{SessionHooks, TransportHooks};
use vncbridge_server::application::inject_input::InputInjector;
use vncbridge_server::infrastructure::capture::{CaptureSink, StaticCapture};
use vncbridge_server::infrastructure::input_device::mock::MockDeviceBackend;
use vncbridge_server::infrastructure::storage::config::{load_config, AppConfig, BackendKind};

fn device_backend(kind: BackendKind) -> Arc<dyn DeviceBackend> {
    match kind {
        #[cfg(target_os = "linux")]
        BackendKind::Uinput => {
            Arc::new(vncbridge_server::infrastructure::input_device::uinput::UinputBackend::new())
        }
        #[cfg(not(target_os = "linux"))]
        BackendKind::Uinput => {
            warn!("uinput is only available on Linux; viewer input will be discarded");
            Arc::new(MockDeviceBackend::discarding())
        }
        BackendKind::Mock => Arc::new(MockDeviceBackend::discarding()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.bridge.log_level)),
        )
        .init();

    if let Some(e) = config_error {
        warn!("falling back to default configuration: {e}");
    }
    info!(
        layout = %config.input.keyboard_layout,
        backend = ?config.input.backend,
        "VNCBridge starting"
    );

    // ── Session engine ────────────────────────────────────────────────────────
    let queue = Arc::new(EventQueue::new());
    let injector = Arc::new(InputInjector::new(
        device_backend(config.input.backend),
        Arc::new(Keymap::new(config.input.keyboard_layout)),
        config.input.injector_settings(),
    ));
    let capture = Arc::new(StaticCapture::new(config.display.source_geometry()));
    let sink = CaptureSink::new(Arc::clone(&queue));
    let coordinator = Arc::new(
        SessionCoordinator::new(capture, Arc::clone(&injector), sink)
            .with_size_override(config.display.size_override()),
    );

    queue.add_listener(Arc::clone(&coordinator) as Arc<dyn EventListener>)?;
    let consumer = queue.spawn_consumer()?;

    // The remote-framebuffer transport attaches here: it is handed `hooks`
    // and calls them for every connection and input message.  No transport
    // is linked into this binary yet, so the engine idles until Ctrl-C.
    let hooks: Arc<dyn TransportHooks> =
        Arc::new(SessionHooks::new(Arc::clone(&queue), Arc::clone(&injector)));
    info!("VNCBridge ready; waiting for a transport to attach");

    // ── Shutdown ──────────────────────────────────────────────────────────────
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    drop(hooks);

    queue.shutdown();
    let waiter = Arc::clone(&queue);
    tokio::task::spawn_blocking(move || waiter.await_termination()).await?;
    if consumer.join().is_err() {
        error!("event consumer thread panicked");
    }

    coordinator.shutdown();
    queue.remove_listener();

    info!("VNCBridge stopped");
    Ok(())
}
