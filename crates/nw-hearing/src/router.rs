//! `NoiseRouter`: synchronous fan-out to registered listeners.

use nw_core::AgentId;

use crate::NoiseEvent;

/// Receives one delivery per registered listener.
///
/// Any `FnMut(AgentId, &NoiseEvent)` closure is a sink.
pub trait NoiseSink {
    fn deliver(&mut self, listener: AgentId, event: &NoiseEvent);
}

impl<F> NoiseSink for F
where
    F: FnMut(AgentId, &NoiseEvent),
{
    #[inline]
    fn deliver(&mut self, listener: AgentId, event: &NoiseEvent) {
        self(listener, event)
    }
}

/// Ordered set of listening agents.
///
/// Delivery order is registration order.  Nothing is filtered or dropped
/// here: every listener sees every event.
#[derive(Clone, Debug, Default)]
pub struct NoiseRouter {
    listeners: Vec<AgentId>,
}

impl NoiseRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start delivering events to `listener`.  Returns `false` if it was
    /// already registered (its position in the order is unchanged).
    pub fn register(&mut self, listener: AgentId) -> bool {
        if self.listeners.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Stop delivering to `listener`.  Returns `false` if it was not
    /// registered.
    pub fn unregister(&mut self, listener: AgentId) -> bool {
        match self.listeners.iter().position(|&l| l == listener) {
            Some(i) => {
                self.listeners.remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_registered(&self, listener: AgentId) -> bool {
        self.listeners.contains(&listener)
    }

    pub fn listeners(&self) -> &[AgentId] {
        &self.listeners
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to every listener, returning how many were reached.
    pub fn broadcast<S: NoiseSink + ?Sized>(&self, event: &NoiseEvent, sink: &mut S) -> usize {
        tracing::trace!(
            source = %event.source,
            radius = event.radius,
            loudness = event.loudness,
            listeners = self.listeners.len(),
            "noise broadcast"
        );
        for &listener in &self.listeners {
            sink.deliver(listener, event);
        }
        self.listeners.len()
    }
}
