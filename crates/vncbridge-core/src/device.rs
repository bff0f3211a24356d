//! Virtual input device model.
//!
//! [`DeviceEvent`] is the vocabulary the input injector speaks: key and button
//! state changes, pointer motion, and the [`DeviceEvent::Sync`] marker that
//! tells the kernel a batch is complete.  [`DeviceBackend`] opens a
//! [`VirtualDevice`] for a declared [`DeviceCapabilities`] set; the Linux
//! implementation lives in the server crate's infrastructure layer.
//!
//! Capabilities must be declared before the first event is written: a uinput
//! device silently drops codes it was not created with.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::keymap::evdev_codes::{EV_ABS, EV_KEY, EV_REL, EV_SYN, SYN_REPORT};

/// Errors raised by a virtual input device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device node could not be opened or configured.
    #[error("virtual input device unavailable: {0}")]
    Unavailable(String),

    /// Writing an event failed.
    #[error("virtual input device I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device has already been closed.
    #[error("virtual input device is closed")]
    Closed,
}

/// One low-level input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceEvent {
    /// Key or button state change (`EV_KEY`).
    Key { code: u16, pressed: bool },
    /// Absolute axis position (`EV_ABS`).
    Absolute { axis: u16, value: i32 },
    /// Relative axis displacement (`EV_REL`).
    Relative { axis: u16, delta: i32 },
    /// `SYN_REPORT`: apply everything since the previous sync.
    Sync,
}

impl DeviceEvent {
    pub const fn press(code: u16) -> Self {
        DeviceEvent::Key {
            code,
            pressed: true,
        }
    }

    pub const fn release(code: u16) -> Self {
        DeviceEvent::Key {
            code,
            pressed: false,
        }
    }

    /// The `(type, code, value)` triple written to the kernel.
    pub fn raw(&self) -> (u16, u16, i32) {
        match *self {
            DeviceEvent::Key { code, pressed } => (EV_KEY, code, i32::from(pressed)),
            DeviceEvent::Absolute { axis, value } => (EV_ABS, axis, value),
            DeviceEvent::Relative { axis, delta } => (EV_REL, axis, delta),
            DeviceEvent::Sync => (EV_SYN, SYN_REPORT, 0),
        }
    }
}

/// Everything a device must advertise at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceCapabilities {
    /// Name shown by `evtest` / `libinput list-devices`.
    pub name: String,
    /// Key and button codes (`KEY_*`, `BTN_*`).
    pub keys: BTreeSet<u16>,
    /// Relative axes (`REL_*`).
    pub relative_axes: BTreeSet<u16>,
    /// Absolute axes with their inclusive `[0, max]` range.
    pub absolute_axes: Vec<(u16, i32)>,
}

/// An open virtual input device.  Dropping it destroys the device.
pub trait VirtualDevice: Send {
    /// Writes one event.
    fn write(&mut self, event: DeviceEvent) -> Result<(), DeviceError>;
}

/// Factory for virtual input devices.
pub trait DeviceBackend: Send + Sync {
    /// Creates a device advertising `capabilities`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Unavailable`] if the device node is missing or
    /// not writable, or if registration is rejected.
    fn open(
        &self,
        capabilities: &DeviceCapabilities,
    ) -> Result<Box<dyn VirtualDevice>, DeviceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::evdev_codes::{ABS_X, KEY_A, REL_WHEEL};

    #[test]
    fn test_raw_triples_match_kernel_encoding() {
        assert_eq!(DeviceEvent::press(KEY_A).raw(), (EV_KEY, KEY_A, 1));
        assert_eq!(DeviceEvent::release(KEY_A).raw(), (EV_KEY, KEY_A, 0));
        assert_eq!(
            DeviceEvent::Absolute {
                axis: ABS_X,
                value: 42
            }
            .raw(),
            (EV_ABS, ABS_X, 42)
        );
        assert_eq!(
            DeviceEvent::Relative {
                axis: REL_WHEEL,
                delta: -1
            }
            .raw(),
            (EV_REL, REL_WHEEL, -1)
        );
        assert_eq!(DeviceEvent::Sync.raw(), (EV_SYN, SYN_REPORT, 0));
    }
}
