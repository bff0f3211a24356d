//! vncbridge-server library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the bridge do? (for beginners)
//!
//! A remote-framebuffer server (the *transport*) lets viewers on other
//! machines see and control this machine's screen.  The transport speaks the
//! wire protocol; this crate does the rest:
//!
//! 1. Counts connected viewers.  The first one to arrive starts screen
//!    capture and creates a virtual keyboard/mouse; the last one to leave
//!    tears both down.
//! 2. Translates each key symbol a viewer types into the physical key (plus
//!    Shift or AltGr) that produces it on the local keyboard layout.
//! 3. Replays pointer motion and buttons, clamped to the screen.
//!
//! Lifecycle notifications travel through a single event queue so they are
//! handled one at a time, in order, on one thread.

/// Application layer: injector, coordinator and transport hooks.
pub mod application;

/// Infrastructure layer: capture, input devices and configuration.
pub mod infrastructure;
