/// Callback registry for viewer events.
///
/// Subscriptions are keyed by a slot-map id, so removing one never
/// invalidates the ids of the others.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by `subscribe`, used to unsubscribe
    pub struct SubscriptionId;
}

type Callback<E> = Box<dyn FnMut(&E)>;

pub struct Subscribers<E> {
    callbacks: SlotMap<SubscriptionId, Callback<E>>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self { callbacks: SlotMap::with_key() }
    }
}

impl<E> std::fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

impl<E> Subscribers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        self.callbacks.insert(Box::new(callback))
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.callbacks.remove(id).is_some()
    }

    /// Call every subscriber, in slot order.
    pub fn emit(&mut self, event: &E) {
        for callback in self.callbacks.values_mut() {
            callback(event);
        }
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
