//! Observable device-link flag.
//!
//! One [`LinkState`] exists per user session. The preference store owns it
//! and flips it; bridges hold a [`LinkListener`] to read it and be told about
//! every transition, in order. Dropping a listener deregisters it.

use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::mpsc;
use tracing::{debug, error};

#[derive(Debug)]
struct Inner {
    enabled: Arc<AtomicBool>,
    listeners: Mutex<Vec<mpsc::UnboundedSender<bool>>>,
}

/// Whether remote linking is currently enabled.
#[derive(Debug, Clone)]
pub struct LinkState {
    inner: Arc<Inner>,
}

impl LinkState {
    /// Create the flag with its persisted initial value.
    pub fn new(enabled: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                enabled: Arc::new(AtomicBool::new(enabled)),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Current value of the flag.
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::SeqCst)
    }

    /// Update the flag. Every listener receives each actual change.
    ///
    /// Returns `true` if the value changed.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        // Held across the swap so concurrent setters deliver in flag order.
        let mut listeners = self.listeners();

        if self.inner.enabled.swap(enabled, Ordering::SeqCst) == enabled {
            return false;
        }

        listeners.retain(|tx| tx.send(enabled).is_ok());
        debug!(enabled, listeners = listeners.len(), "Device link state changed");

        true
    }

    /// Register a change listener.
    pub fn subscribe(&self) -> LinkListener {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners().push(tx);

        LinkListener {
            enabled: Arc::clone(&self.inner.enabled),
            rx,
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        let mut listeners = self.listeners();
        listeners.retain(|tx| !tx.is_closed());
        listeners.len()
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<mpsc::UnboundedSender<bool>>> {
        self.inner.listeners.lock().unwrap_or_else(|e| {
            error!("Link listener lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

/// Registered listener on a [`LinkState`].
#[derive(Debug)]
pub struct LinkListener {
    enabled: Arc<AtomicBool>,
    rx: mpsc::UnboundedReceiver<bool>,
}

impl LinkListener {
    /// Current value of the flag.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Wait for the next transition and return the value it set.
    ///
    /// Returns `None` once every [`LinkState`] handle has been dropped and
    /// all pending transitions were delivered.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.recv().await
    }
}
