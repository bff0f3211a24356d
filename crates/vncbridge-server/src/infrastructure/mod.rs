//! Infrastructure layer: adapters for the outside world.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `vncbridge_core`, but MUST NOT be imported by the core crate.
//!
//! # Sub-modules
//!
//! - **`capture`** – the `CaptureSource` contract for the display capture
//!   collaborator, and `StaticCapture`, a headless source with a fixed
//!   geometry.
//!
//! - **`input_device`** – `DeviceBackend` implementations: uinput on Linux,
//!   plus an in-memory recorder for tests and headless runs.
//!
//! - **`storage`** – TOML configuration loading.

pub mod capture;
pub mod input_device;
pub mod storage;
