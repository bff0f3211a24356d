//! # vncbridge-core
//!
//! Shared foundation for VNCBridge: the lifecycle event queue, viewer session
//! bookkeeping, pointer tracking, keysym translation tables and the virtual
//! input device model.
//!
//! This crate has no OS dependencies.  The server crate supplies the uinput
//! device, the capture source and the threads that drive everything here.
//!
//! - **`event`** – [`Event`]s and the blocking [`EventQueue`] that serializes
//!   them from many producer threads into one consumer.
//! - **`domain`** – [`SessionState`] (when to activate and deactivate) and
//!   [`PointerState`] (which moves and button edges a pointer report means).
//! - **`keymap`** – [`Keymap`]: X11 KeySym → Linux key code plus the Shift /
//!   AltGr modifiers needed, per [`KeyboardLayout`].
//! - **`device`** – [`DeviceEvent`] and the [`DeviceBackend`] /
//!   [`VirtualDevice`] traits.

pub mod device;
pub mod domain;
pub mod event;
pub mod keymap;

pub use device::{DeviceBackend, DeviceCapabilities, DeviceError, DeviceEvent, VirtualDevice};
pub use domain::pointer::{ButtonChange, ButtonMask, PointerButton, PointerState, PointerUpdate};
pub use domain::session::{SessionAnomaly, SessionState, SessionTransition};
pub use event::{
    ClientId, Event, EventKind, EventListener, EventPayload, EventQueue, FrameInfo, QueueError,
};
pub use keymap::{KeyMapping, Keymap, KeyboardLayout};
