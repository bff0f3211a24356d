//! Application layer: the session engine.
//!
//! - **`inject_input`** – `InputInjector`, which owns the virtual input device
//!   and turns viewer key symbols and pointer reports into ordered device
//!   events.
//!
//! - **`coordinate_session`** – `SessionCoordinator`, the event queue listener
//!   that counts viewers and starts capture and input on the first connect,
//!   stopping them on the last disconnect.
//!
//! - **`hooks`** – `TransportHooks`, the callbacks a remote-framebuffer
//!   transport invokes, and `SessionHooks`, which routes them to the queue and
//!   the injector.

pub mod coordinate_session;
pub mod hooks;
pub mod inject_input;
