// events/bus/event_bus.rs
//
// Core event bus implementation.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers execute immediately in subscription order
// 2. Deterministic - same events → same result
// 3. Observable - every emission is logged
// 4. Type-safe - events are strongly typed
// 5. No magic - explicit, straightforward code

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::events::types::DomainEvent;

/// Type-erased event handler function
/// Takes a reference to Any (downcasted to concrete event type inside)
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

struct HandlerEntry {
    id: u64,
    handler: EventHandler,
}

struct BusInner {
    /// Map from event TypeId to list of handlers
    handlers: RwLock<HashMap<TypeId, Vec<HandlerEntry>>>,

    /// Source of handler ids, used to remove handlers on unsubscribe
    next_handler_id: AtomicU64,
}

/// The Event Bus
///
/// Central coordination point for all in-process signals. Services emit
/// events and views subscribe to them without direct dependencies on each
/// other.
///
/// Key characteristics:
/// - Synchronous execution (no async, no threads)
/// - Handlers execute in subscription order
/// - Type-safe through generics
/// - Subscriptions are RAII: dropping the returned `Subscription` removes
///   the handler, so a torn-down view cannot leak listeners
pub struct EventBus {
    inner: Arc<BusInner>,
}

/// Handle to a registered handler.
///
/// The handler stays registered for as long as this value is alive; views
/// must keep it for their lifetime and drop it on teardown.
#[must_use = "dropping the subscription immediately unregisters the handler"]
pub struct Subscription {
    bus: Weak<BusInner>,
    type_id: TypeId,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            let mut handlers = inner.handlers.write().unwrap();
            if let Some(entries) = handlers.get_mut(&self.type_id) {
                entries.retain(|entry| entry.id != self.id);
            }
        }
    }
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BusInner {
                handlers: RwLock::new(HashMap::new()),
                next_handler_id: AtomicU64::new(1),
            }),
        }
    }

    /// Subscribe to a specific event type
    ///
    /// Generic parameter E must implement DomainEvent + 'static
    /// The handler function receives a reference to the concrete event.
    /// Handlers are executed in the order they are subscribed.
    ///
    /// Example:
    /// ```ignore
    /// let sub = bus.subscribe::<PreferenceListChanged, _>(|event| {
    ///     println!("changed: {}", event.list);
    /// });
    /// // handler active until `sub` is dropped
    /// ```
    pub fn subscribe<E, F>(&self, handler: F) -> Subscription
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();
        let id = self.inner.next_handler_id.fetch_add(1, Ordering::SeqCst);

        // Wrap the typed handler in a type-erased closure
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.inner.handlers.write().unwrap();
        handlers
            .entry(type_id)
            .or_insert_with(Vec::new)
            .push(HandlerEntry {
                id,
                handler: wrapped,
            });

        Subscription {
            bus: Arc::downgrade(&self.inner),
            type_id,
            id,
        }
    }

    /// Emit an event
    ///
    /// Executes all handlers for this event type in subscription order and
    /// returns immediately (synchronous). If a handler panics, the panic is
    /// caught and logged, and the remaining handlers still execute.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let type_id = TypeId::of::<E>();

        let handlers = self.inner.handlers.read().unwrap();
        let event_handlers = handlers.get(&type_id);
        let handler_count = event_handlers.map(|h| h.len()).unwrap_or(0);

        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            event.event_type(),
            event.event_id(),
            handler_count
        );

        if let Some(entries) = event_handlers {
            for entry in entries {
                // Catch panics to prevent one handler from breaking others
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    (entry.handler)(&event as &dyn Any);
                }));

                if let Err(e) = result {
                    log::error!(
                        "Handler {} for {} panicked: {:?}",
                        entry.id,
                        event.event_type(),
                        e
                    );
                }
            }
        }
    }

    /// Get the number of subscribers for a specific event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let type_id = TypeId::of::<E>();
        let handlers = self.inner.handlers.read().unwrap();
        handlers.get(&type_id).map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Make EventBus cloneable (shared reference)
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
