//! Linux uinput backend built on the `evdev` crate.
//!
//! Each [`UinputBackend::open`] registers a fresh `/dev/uinput` device with
//! exactly the capabilities the injector asked for.  The kernel removes the
//! device when the handle is dropped.
//!
//! `evdev::uinput::VirtualDevice::emit` appends its own `SYN_REPORT`, so
//! events are buffered until [`DeviceEvent::Sync`] arrives and then written
//! as one batch.  The resulting stream on the device node is identical to
//! writing each event and the report one by one.

use evdev::uinput::{VirtualDevice as EvdevDevice, VirtualDeviceBuilder};
use evdev::{
    AbsInfo, AbsoluteAxisType, AttributeSet, EventType, InputEvent, Key, RelativeAxisType,
    UinputAbsSetup,
};
use tracing::{debug, info};

use vncbridge_core::{DeviceBackend, DeviceCapabilities, DeviceError, DeviceEvent, VirtualDevice};

/// Creates uinput devices.
#[derive(Debug, Default, Clone, Copy)]
pub struct UinputBackend;

impl UinputBackend {
    pub fn new() -> Self {
        Self
    }
}

fn unavailable(e: std::io::Error) -> DeviceError {
    DeviceError::Unavailable(format!("uinput: {e}"))
}

impl DeviceBackend for UinputBackend {
    fn open(
        &self,
        capabilities: &DeviceCapabilities,
    ) -> Result<Box<dyn VirtualDevice>, DeviceError> {
        let mut keys = AttributeSet::<Key>::new();
        for &code in &capabilities.keys {
            keys.insert(Key::new(code));
        }

        let mut builder = VirtualDeviceBuilder::new()
            .map_err(unavailable)?
            .name(&capabilities.name)
            .with_keys(&keys)
            .map_err(unavailable)?;

        if !capabilities.relative_axes.is_empty() {
            let mut axes = AttributeSet::<RelativeAxisType>::new();
            for &axis in &capabilities.relative_axes {
                axes.insert(RelativeAxisType(axis));
            }
            builder = builder.with_relative_axes(&axes).map_err(unavailable)?;
        }

        for &(axis, max) in &capabilities.absolute_axes {
            let info = AbsInfo::new(0, 0, max, 0, 0, 0);
            let setup = UinputAbsSetup::new(AbsoluteAxisType(axis), info);
            builder = builder.with_absolute_axis(&setup).map_err(unavailable)?;
        }

        let device = builder.build().map_err(unavailable)?;
        info!(
            name = %capabilities.name,
            keys = capabilities.keys.len(),
            "uinput device registered"
        );
        Ok(Box::new(UinputDevice {
            device,
            pending: Vec::new(),
        }))
    }
}

struct UinputDevice {
    device: EvdevDevice,
    pending: Vec<InputEvent>,
}

impl VirtualDevice for UinputDevice {
    fn write(&mut self, event: DeviceEvent) -> Result<(), DeviceError> {
        if event == DeviceEvent::Sync {
            let batch = std::mem::take(&mut self.pending);
            self.device.emit(&batch)?;
            return Ok(());
        }
        let (kind, code, value) = event.raw();
        self.pending.push(InputEvent::new(EventType(kind), code, value));
        Ok(())
    }
}

impl Drop for UinputDevice {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            debug!(dropped = self.pending.len(), "discarding unsynced uinput events");
        }
        debug!("uinput device destroyed");
    }
}
