use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slots<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// Listeners notified on every state change.
pub struct ListenerRegistry<T> {
    slots: Arc<Mutex<Slots<T>>>,
}

impl<T> Clone for ListenerRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

fn lock<T>(slots: &Mutex<Slots<T>>) -> MutexGuard<'_, Slots<T>> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: 'static> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut slots = lock(&self.slots);
            let id = slots.next_id;
            slots.next_id += 1;
            slots.entries.push((id, Arc::new(listener)));
            id
        };

        let weak: Weak<Mutex<Slots<T>>> = Arc::downgrade(&self.slots);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    lock(&slots).entries.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    /// Calls every listener with `value`. Listeners may subscribe or drop
    /// subscriptions while being called.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = lock(&self.slots)
            .entries
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in snapshot {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.slots).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle of a registered listener; dropping it unregisters the listener.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn emit_reaches_every_live_listener() {
        let registry = ListenerRegistry::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = Arc::clone(&seen);
            registry.subscribe(move |v| seen.lock().unwrap().push(("first", *v)))
        };
        let second = {
            let seen = Arc::clone(&seen);
            registry.subscribe(move |v| seen.lock().unwrap().push(("second", *v)))
        };
        registry.emit(&1);
        drop(first);
        registry.emit(&2);

        assert_eq!(
            *seen.lock().unwrap(),
            [("first", 1), ("second", 1), ("second", 2)]
        );
        assert_eq!(registry.len(), 1);
        drop(second);
        assert!(registry.is_empty());
    }

    #[test]
    fn subscription_may_outlive_registry() {
        let registry = ListenerRegistry::<u32>::new();
        let subscription = registry.subscribe(|_| {});
        drop(registry);
        drop(subscription);
    }

    #[test]
    fn listener_can_unsubscribe_itself_during_emit() {
        let registry = ListenerRegistry::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let subscription = {
            let calls = Arc::clone(&calls);
            let slot = Arc::clone(&slot);
            registry.subscribe(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                slot.lock().unwrap().take();
            })
        };
        *slot.lock().unwrap() = Some(subscription);

        registry.emit(&1);
        registry.emit(&2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }
}
