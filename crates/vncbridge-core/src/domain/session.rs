//! Viewer session bookkeeping.
//!
//! [`SessionState`] counts connected viewers and reports the edge each
//! connect/disconnect produces.  Only the 0→1 and 1→0 edges carry side effects
//! (activating and deactivating capture and input injection); everything else
//! is bookkeeping.
//!
//! ```text
//!            ClientConnected (0→1) ─► Activate
//!   Idle ──────────────────────────────────────► Active
//!        ◄──────────────────────────────────────
//!            ClientDisconnected (1→0) ─► Deactivate
//! ```
//!
//! Viewers may be anonymous (the transport does not identify connections) or
//! identified by a [`ClientId`].  The two populations are counted separately so
//! that a duplicate notification for an identified viewer can be recognised
//! and ignored instead of corrupting the count.

use std::collections::HashSet;

use crate::event::ClientId;

/// What a connect or disconnect did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTransition {
    /// First viewer arrived: capture and input must be started.
    Activate,
    /// Last viewer left: input and capture must be stopped.
    Deactivate,
    /// The count changed but the session stayed in the same state.
    Unchanged,
    /// The notification did not match any tracked viewer and was ignored.
    Anomaly(SessionAnomaly),
}

/// Why a notification was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAnomaly {
    /// A disconnect arrived while no matching viewer was counted.
    Underflow,
    /// A connect arrived for an identified viewer that is already counted.
    DuplicateConnect,
}

/// Connected-viewer bookkeeping.
///
/// Invariant: `is_active() == (connected_clients() > 0)`.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    anonymous: usize,
    identified: HashSet<ClientId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of viewers currently counted.
    pub fn connected_clients(&self) -> usize {
        self.anonymous + self.identified.len()
    }

    pub fn is_active(&self) -> bool {
        self.connected_clients() > 0
    }

    /// Returns `true` if `id` is currently counted.
    pub fn is_connected(&self, id: ClientId) -> bool {
        self.identified.contains(&id)
    }

    /// Records a viewer arriving.
    pub fn client_connected(&mut self, id: Option<ClientId>) -> SessionTransition {
        let was_active = self.is_active();
        match id {
            Some(id) => {
                if !self.identified.insert(id) {
                    return SessionTransition::Anomaly(SessionAnomaly::DuplicateConnect);
                }
            }
            None => self.anonymous += 1,
        }
        if was_active {
            SessionTransition::Unchanged
        } else {
            SessionTransition::Activate
        }
    }

    /// Records a viewer leaving.  The count is clamped at zero: a disconnect
    /// with no matching viewer is reported as [`SessionAnomaly::Underflow`].
    pub fn client_disconnected(&mut self, id: Option<ClientId>) -> SessionTransition {
        let removed = match id {
            Some(id) => self.identified.remove(&id),
            None if self.anonymous > 0 => {
                self.anonymous -= 1;
                true
            }
            None => false,
        };
        if !removed {
            return SessionTransition::Anomaly(SessionAnomaly::Underflow);
        }
        if self.is_active() {
            SessionTransition::Unchanged
        } else {
            SessionTransition::Deactivate
        }
    }
}
