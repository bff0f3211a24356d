//! Virtual input device backends.
//!
//! The uinput backend is only built on Linux.  `MockDeviceBackend` is always
//! available so integration tests can drive the injector anywhere.

pub mod mock;

#[cfg(target_os = "linux")]
pub mod uinput;
