//! Thread-safe, ordered, blocking mailbox for lifecycle [`Event`]s.
//!
//! The queue is a `Mutex<VecDeque>` paired with two condition variables: one
//! that wakes the consumer when an event arrives or shutdown is requested, and
//! one that wakes threads waiting in [`EventQueue::await_termination`] once the
//! consumer loop has exited.
//!
//! # Shutdown semantics
//!
//! [`EventQueue::shutdown`] is idempotent and callable from any thread.  After
//! it is called, new events are refused, but everything already queued is still
//! delivered: [`EventQueue::await_next`] only reports
//! [`QueueError::Shutdown`] once the queue has drained.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::{debug, trace, warn};

use super::{Event, EventListener};

/// Name given to the consumer thread spawned by [`EventQueue::spawn_consumer`].
const CONSUMER_THREAD_NAME: &str = "vncbridge-events";

/// Errors returned by [`EventQueue`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The queue has been shut down (and, for consumers, fully drained).
    /// This is the normal termination signal, not a failure.
    #[error("event queue has been shut down")]
    Shutdown,

    /// A listener is already registered; the queue has a single consumer.
    #[error("an event listener is already registered")]
    ListenerAlreadyRegistered,

    /// A consumer loop is already draining this queue.
    #[error("a consumer loop is already running")]
    ConsumerAlreadyRunning,
}

#[derive(Default)]
struct QueueState {
    events: VecDeque<Event>,
    shutdown: bool,
    consumer_running: bool,
}

/// FIFO queue shared by any number of producers and a single consumer.
#[derive(Default)]
pub struct EventQueue {
    state: Mutex<QueueState>,
    available: Condvar,
    terminated: Condvar,
    listener: Mutex<Option<Arc<dyn EventListener>>>,
}

impl EventQueue {
    /// Creates an empty, running queue.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_state(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listener(&self) -> MutexGuard<'_, Option<Arc<dyn EventListener>>> {
        self.listener.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `event` to the tail and wakes one waiting consumer.
    ///
    /// Never blocks beyond the short critical section that pushes the event.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Shutdown`] if the queue has been shut down; the
    /// event is dropped.
    pub fn enqueue(&self, event: Event) -> Result<(), QueueError> {
        {
            let mut state = self.lock_state();
            if state.shutdown {
                trace!(kind = ?event.kind(), "event refused after shutdown");
                return Err(QueueError::Shutdown);
            }
            state.events.push_back(event);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Blocks until an event is available and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Shutdown`] once [`shutdown`](Self::shutdown) has
    /// been called and every previously queued event has been returned.
    pub fn await_next(&self) -> Result<Event, QueueError> {
        let mut state = self.lock_state();
        loop {
            if let Some(event) = state.events.pop_front() {
                return Ok(event);
            }
            if state.shutdown {
                return Err(QueueError::Shutdown);
            }
            state = self
                .available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Registers the observer that receives drained events.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ListenerAlreadyRegistered`] if another listener
    /// is active.  Call [`remove_listener`](Self::remove_listener) first.
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) -> Result<(), QueueError> {
        let mut slot = self.lock_listener();
        if slot.is_some() {
            return Err(QueueError::ListenerAlreadyRegistered);
        }
        *slot = Some(listener);
        Ok(())
    }

    /// Unregisters the current observer, returning it if one was set.
    ///
    /// Events drained while no listener is registered are discarded.
    pub fn remove_listener(&self) -> Option<Arc<dyn EventListener>> {
        self.lock_listener().take()
    }

    /// Requests termination of the consumer loop.
    ///
    /// Already-queued events are still delivered.  Any thread blocked in
    /// [`await_next`](Self::await_next) is released.  Idempotent.
    pub fn shutdown(&self) {
        {
            let mut state = self.lock_state();
            if state.shutdown {
                return;
            }
            state.shutdown = true;
            debug!(pending = state.events.len(), "event queue shutdown requested");
        }
        self.available.notify_all();
        self.terminated.notify_all();
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.lock_state().shutdown
    }

    /// Number of events waiting to be drained.
    pub fn len(&self) -> usize {
        self.lock_state().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the consumer loop on the calling thread until shutdown has drained
    /// the queue.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ConsumerAlreadyRunning`] if another thread is
    /// already consuming this queue.
    pub fn run(&self) -> Result<(), QueueError> {
        self.begin_consumer()?;
        self.drain();
        Ok(())
    }

    /// Spawns a dedicated consumer thread running [`run`](Self::run).
    ///
    /// The consumer is marked as running before this returns, so a
    /// [`shutdown`](Self::shutdown) issued immediately afterwards still waits
    /// for the spawned loop to drain.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::ConsumerAlreadyRunning`] if a consumer exists, or
    /// an I/O error wrapped in `std::io::Error` if the thread cannot be spawned.
    pub fn spawn_consumer(self: &Arc<Self>) -> std::io::Result<JoinHandle<()>> {
        self.begin_consumer()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::AlreadyExists, e))?;

        let queue = Arc::clone(self);
        thread::Builder::new()
            .name(CONSUMER_THREAD_NAME.to_string())
            .spawn(move || queue.drain())
            .map_err(|e| {
                self.lock_state().consumer_running = false;
                self.terminated.notify_all();
                e
            })
    }

    /// Blocks until shutdown has been requested and the consumer loop (if any
    /// was started) has exited.
    pub fn await_termination(&self) {
        let mut state = self.lock_state();
        while !(state.shutdown && !state.consumer_running) {
            state = self
                .terminated
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn begin_consumer(&self) -> Result<(), QueueError> {
        let mut state = self.lock_state();
        if state.consumer_running {
            return Err(QueueError::ConsumerAlreadyRunning);
        }
        state.consumer_running = true;
        Ok(())
    }

    fn drain(&self) {
        // Clears `consumer_running` even if a listener panics.
        let _exit = ConsumerExit { queue: self };

        while let Ok(event) = self.await_next() {
            let listener = self.lock_listener().clone();
            match listener {
                Some(listener) => listener.on_event(event),
                None => warn!(kind = ?event.kind(), "no listener registered; event dropped"),
            }
        }
        debug!("event consumer loop exited");
    }
}

struct ConsumerExit<'a> {
    queue: &'a EventQueue,
}

impl Drop for ConsumerExit<'_> {
    fn drop(&mut self) {
        self.queue.lock_state().consumer_running = false;
        self.queue.terminated.notify_all();
    }
}
