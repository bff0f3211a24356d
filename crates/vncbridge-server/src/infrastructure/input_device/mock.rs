//! Recording device backend for tests.
//!
//! The real backend creates a kernel uinput device, which needs
//! `/dev/uinput` write access and injects input into the test machine's own
//! session.  `MockDeviceBackend` hands out devices that push every event into
//! a shared log instead, so tests can assert on the exact event stream and on
//! how often a device was opened and destroyed.
//!
//! ```ignore
//! let backend = Arc::new(MockDeviceBackend::new());
//! let injector = InputInjector::new(backend.clone(), keymap, settings);
//! injector.start(1920, 1080)?;
//! injector.key_event(true, 'a' as u32)?;
//! assert_eq!(backend.events(), vec![DeviceEvent::press(KEY_A), DeviceEvent::Sync]);
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use vncbridge_core::{DeviceBackend, DeviceCapabilities, DeviceError, DeviceEvent, VirtualDevice};

#[derive(Default)]
struct Shared {
    events: Mutex<Vec<DeviceEvent>>,
    capabilities: Mutex<Vec<DeviceCapabilities>>,
    opens: AtomicUsize,
    closes: AtomicUsize,
    /// Writes still allowed before every write fails; `None` is unlimited.
    writes_left: Mutex<Option<usize>>,
    discard: AtomicBool,
}

/// A backend whose devices record events in memory.
#[derive(Default)]
pub struct MockDeviceBackend {
    shared: Arc<Shared>,
    /// When `true`, `open` returns `DeviceError::Unavailable`.
    pub fail_open: AtomicBool,
}

impl MockDeviceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend on which every `open` fails.
    pub fn failing() -> Self {
        let backend = Self::default();
        backend.fail_open.store(true, Ordering::SeqCst);
        backend
    }

    /// A backend that accepts every event and keeps none of them.  Used when
    /// the bridge runs without a real input device.
    pub fn discarding() -> Self {
        let backend = Self::default();
        backend.shared.discard.store(true, Ordering::SeqCst);
        backend
    }

    /// Makes every subsequent device write fail with `DeviceError::Closed`,
    /// or lifts the failure again.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.shared.writes_left.lock().unwrap_or_else(PoisonError::into_inner) =
            fail.then_some(0);
    }

    /// Lets `count` more writes through, then fails every write after them.
    pub fn fail_writes_after(&self, count: usize) {
        *self.shared.writes_left.lock().unwrap_or_else(PoisonError::into_inner) = Some(count);
    }

    /// Every event written so far, across all devices.
    pub fn events(&self) -> Vec<DeviceEvent> {
        self.shared.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns and clears the event log.
    pub fn take_events(&self) -> Vec<DeviceEvent> {
        std::mem::take(&mut *self.shared.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Capabilities passed to each successful `open`, in order.
    pub fn opened_with(&self) -> Vec<DeviceCapabilities> {
        self.shared
            .capabilities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn open_count(&self) -> usize {
        self.shared.opens.load(Ordering::SeqCst)
    }

    /// Number of devices that have been dropped.
    pub fn close_count(&self) -> usize {
        self.shared.closes.load(Ordering::SeqCst)
    }
}

impl DeviceBackend for MockDeviceBackend {
    fn open(
        &self,
        capabilities: &DeviceCapabilities,
    ) -> Result<Box<dyn VirtualDevice>, DeviceError> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(DeviceError::Unavailable("mock backend configured to fail".to_string()));
        }
        self.shared.opens.fetch_add(1, Ordering::SeqCst);
        self.shared
            .capabilities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(capabilities.clone());
        Ok(Box::new(MockDevice {
            shared: Arc::clone(&self.shared),
        }))
    }
}

struct MockDevice {
    shared: Arc<Shared>,
}

impl VirtualDevice for MockDevice {
    fn write(&mut self, event: DeviceEvent) -> Result<(), DeviceError> {
        {
            let mut left = self
                .shared
                .writes_left
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match left.as_mut() {
                Some(0) => return Err(DeviceError::Closed),
                Some(n) => *n -= 1,
                None => {}
            }
        }
        if self.shared.discard.load(Ordering::Relaxed) {
            return Ok(());
        }
        self.shared
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.shared.closes.fetch_add(1, Ordering::SeqCst);
    }
}
