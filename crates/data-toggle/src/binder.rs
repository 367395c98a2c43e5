//! Event binding
//!
//! Tracks which listener this instance attached to which trigger so every
//! attachment can be undone. The table is private to one instance.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use toggle_dom::{Document, DomError, EventType, Listener, ListenerId, NodeId};

#[derive(Debug, Default)]
pub(crate) struct EventBinder {
    handlers: RefCell<HashMap<NodeId, ListenerId>>,
}

impl EventBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listener` to every element matching `selector`, replacing
    /// any listener this binder attached earlier. Returns the match count.
    pub fn bind(
        &self,
        document: &Document,
        selector: &str,
        listener: &Listener,
    ) -> Result<usize, DomError> {
        let elements = document.query_selector_all(selector)?;
        let mut handlers = self.handlers.borrow_mut();

        // Triggers no longer in the document are dropped from the table
        handlers.retain(|&element, &mut id| {
            let connected = document.contains(element);
            if !connected {
                document.remove_event_listener(element, id);
            }
            connected
        });

        for &element in &elements {
            if let Some(previous) = handlers.remove(&element) {
                document.remove_event_listener(element, previous);
            }
            let id = document.add_event_listener(element, EventType::Click, Rc::clone(listener));
            handlers.insert(element, id);
        }

        Ok(elements.len())
    }

    /// Detach everything this binder attached. Returns the number detached.
    pub fn unbind(&self, document: &Document) -> usize {
        let handlers: Vec<_> = self.handlers.borrow_mut().drain().collect();
        for &(element, id) in &handlers {
            document.remove_event_listener(element, id);
        }
        handlers.len()
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_bound(&self, element: NodeId) -> bool {
        self.handlers.borrow().contains_key(&element)
    }
}
