//! Topology-change observers.
//!
//! A layout solver or renderer registers a [`GraphListener`] and is told,
//! synchronously and in registration order, whenever an edge is added or
//! removed or a node is detached. Listeners get no handle to the graph, so
//! they cannot re-enter a mutating call while a notification is in flight.

use std::fmt;

/// Receives topology-changed notifications from a [`Graph`](crate::Graph).
pub trait GraphListener {
    /// Called after an edge-affecting mutation has completed.
    fn graph_changed(&mut self);
}

impl<F> GraphListener for F
where
    F: FnMut(),
{
    fn graph_changed(&mut self) {
        self()
    }
}

/// Ordered listener list. Duplicates are allowed and each one is called.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<Box<dyn GraphListener>>,
}

impl Listeners {
    pub(crate) fn push(&mut self, listener: Box<dyn GraphListener>) {
        self.entries.push(listener);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self) {
        tracing::trace!(listeners = self.entries.len(), "graph changed");
        for listener in &mut self.entries {
            listener.graph_changed();
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
