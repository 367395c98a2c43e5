//! DOM Events
//!
//! Element event listeners and document-level custom events.

use crate::NodeId;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Element event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    DblClick,
    MouseDown,
    MouseUp,
    Focus,
    Blur,
}

impl EventType {
    /// Check if this event type can bubble
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventType::Focus | EventType::Blur)
    }

    pub fn cancelable(&self) -> bool {
        !matches!(self, EventType::Focus | EventType::Blur)
    }
}

/// Listener registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Element listener. Shared so one closure can serve many elements.
pub type Listener = Rc<dyn Fn(&mut Event)>;

/// Document-level custom event listener
pub type CustomListener = Rc<dyn Fn(&CustomEvent)>;

/// Element event being dispatched
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    /// Node the event was dispatched to
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    /// Virtual clock time at dispatch (ms)
    pub timestamp: u64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: EventType, target: NodeId, timestamp: u64) -> Self {
        Self {
            event_type,
            target,
            current_target: target,
            bubbles: event_type.bubbles(),
            cancelable: event_type.cancelable(),
            timestamp,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Named event carrying an arbitrary payload, dispatched on the document
#[derive(Clone)]
pub struct CustomEvent {
    name: String,
    detail: Rc<dyn Any>,
}

impl CustomEvent {
    pub fn new(name: impl Into<String>, detail: impl Any) -> Self {
        Self {
            name: name.into(),
            detail: Rc::new(detail),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Payload, if it has type `T`
    pub fn detail<T: Any>(&self) -> Option<&T> {
        self.detail.downcast_ref::<T>()
    }
}

impl fmt::Debug for CustomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomEvent")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

struct Registered {
    id: ListenerId,
    event_type: EventType,
    listener: Listener,
}

/// Listener storage for one document
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    /// Map of node ID -> registered listeners, in registration order
    listeners: HashMap<NodeId, Vec<Registered>>,
    /// Map of custom event name -> listeners
    custom: HashMap<String, Vec<(ListenerId, CustomListener)>>,
    next_id: u64,
}

impl ListenerRegistry {
    fn next_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    pub fn add(&mut self, node: NodeId, event_type: EventType, listener: Listener) -> ListenerId {
        let id = self.next_id();
        self.listeners.entry(node).or_default().push(Registered {
            id,
            event_type,
            listener,
        });
        id
    }

    pub fn remove(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(registered) = self.listeners.get_mut(&node) else {
            return false;
        };
        let before = registered.len();
        registered.retain(|r| r.id != id);
        let removed = registered.len() != before;
        if registered.is_empty() {
            self.listeners.remove(&node);
        }
        removed
    }

    /// Snapshot of listeners for dispatch
    pub fn listeners_for(&self, node: NodeId, event_type: EventType) -> Vec<Listener> {
        self.listeners
            .get(&node)
            .map(|registered| {
                registered
                    .iter()
                    .filter(|r| r.event_type == event_type)
                    .map(|r| Rc::clone(&r.listener))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn count(&self, node: NodeId) -> usize {
        self.listeners.get(&node).map_or(0, Vec::len)
    }

    pub fn add_custom(&mut self, name: &str, listener: CustomListener) -> ListenerId {
        let id = self.next_id();
        self.custom
            .entry(name.to_string())
            .or_default()
            .push((id, listener));
        id
    }

    pub fn remove_custom(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        for listeners in self.custom.values_mut() {
            let before = listeners.len();
            listeners.retain(|(lid, _)| *lid != id);
            removed |= listeners.len() != before;
        }
        self.custom.retain(|_, listeners| !listeners.is_empty());
        removed
    }

    pub fn custom_listeners(&self, name: &str) -> Vec<CustomListener> {
        self.custom
            .get(name)
            .map(|listeners| listeners.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default()
    }
}
