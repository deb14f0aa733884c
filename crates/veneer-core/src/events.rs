//! Multicast dispatcher
//!
//! [`Multicast`] fans an [`Args`] container out to an ordered set of
//! handlers. A fault in one handler is isolated: it never aborts the
//! remaining handlers and surfaces through the side-channel error observer,
//! which receives the failing handler and its fault. With no observer
//! registered, faults are silently swallowed — the one documented swallow
//! in the library.

use std::fmt;
use std::sync::Arc;
use veneer_types::Args;

/// Failure raised by a handler
pub type HandlerFault = Box<dyn std::error::Error + Send + Sync>;

/// A multicast handler: receives the argument container, reports failure
/// by returning `Err`.
pub type Handler = Arc<dyn Fn(&Args) -> Result<(), HandlerFault> + Send + Sync>;

type FaultObserver = Box<dyn Fn(&Handler, &HandlerFault) + Send + Sync>;

/// Wrap a closure as a [`Handler`] handle.
///
/// Handler identity is the handle itself (`Arc` pointer equality): adding
/// two clones of one handle registers it once, while two separately
/// wrapped closures are distinct handlers even if textually identical.
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Args) -> Result<(), HandlerFault> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Ordered multicast handler set with per-handler fault isolation
#[derive(Default)]
pub struct Multicast {
    handlers: Vec<Handler>,
    observer: Option<FaultObserver>,
}

impl Multicast {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; insertion order is execution order, duplicate
    /// handles are suppressed by identity.
    pub fn add(&mut self, handler: Handler) {
        if !self.handlers.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            self.handlers.push(handler);
        }
    }

    /// Remove a handler by identity; removing an absent handler is a no-op.
    pub fn remove(&mut self, handler: &Handler) {
        if let Some(index) = self.handlers.iter().position(|h| Arc::ptr_eq(h, handler)) {
            self.handlers.remove(index);
        }
    }

    /// Remove all handlers
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Register the error observer receiving `(failing handler, fault)`
    pub fn on_error<F>(&mut self, observer: F)
    where
        F: Fn(&Handler, &HandlerFault) + Send + Sync + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Invoke every handler in registration order with the container.
    ///
    /// A handler fault is caught individually and reported through the
    /// error observer; the remaining handlers still run.
    pub fn execute(&self, args: &Args) {
        for handler in &self.handlers {
            if let Err(fault) = handler(args) {
                if let Some(observer) = &self.observer {
                    observer(handler, &fault);
                }
            }
        }
    }
}

impl fmt::Debug for Multicast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multicast")
            .field("handlers", &self.handlers.len())
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}
