//! Domain entities for VNCBridge.
//!
//! Pure bookkeeping with no infrastructure dependencies: the viewer session
//! counter that decides when capture and input injection are switched on and
//! off, and the pointer state that decides which motion and button events a
//! viewer's pointer message turns into.  Both are plain values; the server
//! crate wraps them in the locks it needs.

/// Viewer session bookkeeping and its activation edges.
pub mod session;

/// Pointer position and button-mask tracking.
pub mod pointer;
