//! Document - High-level document API
//!
//! `Document` is a cheap, cloneable handle. Internal borrows are released
//! before any listener or timer task runs, so callbacks may call back into
//! the document freely.

use crate::events::ListenerRegistry;
use crate::{
    CustomEvent, DomError, DomTree, Event, EventType, Listener, ListenerId, NodeId, SelectorList,
    TimerId, TimerQueue,
};
use std::cell::RefCell;
use std::rc::Rc;

/// HTML Document
#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

struct DocumentInner {
    tree: RefCell<DomTree>,
    listeners: RefCell<ListenerRegistry>,
    timers: RefCell<TimerQueue>,
    /// Cached reference to <html> element
    html_element: Option<NodeId>,
    head_element: Option<NodeId>,
    body_element: Option<NodeId>,
}

impl Document {
    /// Create a document with `<html><head></head><body></body></html>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let structure = [(NodeId::ROOT, html), (html, head), (html, body)];
        for (parent, child) in structure {
            let linked = tree.append_child(parent, child);
            debug_assert!(linked.is_ok());
        }

        Self::from_parts(tree, Some(html), Some(head), Some(body))
    }

    /// Create an empty document (no structure)
    pub fn empty() -> Self {
        Self::from_parts(DomTree::new(), None, None, None)
    }

    fn from_parts(
        tree: DomTree,
        html_element: Option<NodeId>,
        head_element: Option<NodeId>,
        body_element: Option<NodeId>,
    ) -> Self {
        Self {
            inner: Rc::new(DocumentInner {
                tree: RefCell::new(tree),
                listeners: RefCell::new(ListenerRegistry::default()),
                timers: RefCell::new(TimerQueue::new()),
                html_element,
                head_element,
                body_element,
            }),
        }
    }

    /// Whether two handles refer to the same document
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.inner.html_element
    }

    pub fn head(&self) -> Option<NodeId> {
        self.inner.head_element
    }

    pub fn body(&self) -> Option<NodeId> {
        self.inner.body_element
    }

    /// Read-only access to the tree
    pub fn with_tree<R>(&self, f: impl FnOnce(&DomTree) -> R) -> R {
        f(&self.inner.tree.borrow())
    }

    // --- tree mutation ---

    pub fn create_element(&self, tag_name: &str) -> NodeId {
        self.inner.tree.borrow_mut().create_element(tag_name)
    }

    pub fn create_text(&self, content: &str) -> NodeId {
        self.inner.tree.borrow_mut().create_text(content)
    }

    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.inner.tree.borrow_mut().append_child(parent, child)
    }

    /// Detach a node from its parent. Listeners stay registered, so a node
    /// appended again elsewhere keeps responding to events.
    pub fn remove(&self, node: NodeId) -> Result<(), DomError> {
        if node == NodeId::ROOT {
            return Err(DomError::HierarchyRequest {
                parent: NodeId::NONE,
                child: node,
            });
        }
        let mut tree = self.inner.tree.borrow_mut();
        if tree.get(node).is_none() {
            return Err(DomError::UnknownNode(node));
        }
        tree.detach(node);
        tracing::debug!(?node, "removed node");
        Ok(())
    }

    /// Whether the node is attached to this document
    pub fn contains(&self, node: NodeId) -> bool {
        self.inner.tree.borrow().is_connected(node)
    }

    // --- element accessors ---

    /// Lowercase tag name, `None` for non-elements
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.inner
            .tree
            .borrow()
            .element(node)
            .map(|e| e.tag_name().to_string())
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.inner
            .tree
            .borrow()
            .element(node)
            .and_then(|e| e.get_attr(name))
            .map(str::to_string)
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.inner
            .tree
            .borrow()
            .element(node)
            .is_some_and(|e| e.has_attr(name))
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.inner
            .tree
            .borrow_mut()
            .element_mut(node)?
            .set_attr(name, value);
        Ok(())
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.inner.tree.borrow_mut().element_mut(node)?.remove_attr(name))
    }

    // --- class list ---

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.inner
            .tree
            .borrow()
            .element(node)
            .is_some_and(|e| e.classes().contains(class))
    }

    pub fn add_class(&self, node: NodeId, class: &str) -> Result<bool, DomError> {
        Ok(self
            .inner
            .tree
            .borrow_mut()
            .element_mut(node)?
            .update_classes(|c| c.add(class)))
    }

    pub fn remove_class(&self, node: NodeId, class: &str) -> Result<bool, DomError> {
        Ok(self
            .inner
            .tree
            .borrow_mut()
            .element_mut(node)?
            .update_classes(|c| c.remove(class)))
    }

    /// Flip class membership, returns the new state
    pub fn toggle_class(&self, node: NodeId, class: &str) -> Result<bool, DomError> {
        Ok(self
            .inner
            .tree
            .borrow_mut()
            .element_mut(node)?
            .update_classes(|c| c.toggle(class, None)))
    }

    /// Serialized class list ("" for non-elements)
    pub fn class_name(&self, node: NodeId) -> String {
        self.inner
            .tree
            .borrow()
            .element(node)
            .map(|e| e.classes().value())
            .unwrap_or_default()
    }

    // --- queries ---

    /// First connected element matching `selector`, in document order
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector = SelectorList::parse(selector)?;
        let tree = self.inner.tree.borrow();
        Ok(tree
            .descendants(tree.root())
            .into_iter()
            .find(|&id| selector.matches(&tree, id)))
    }

    /// All connected elements matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = SelectorList::parse(selector)?;
        let tree = self.inner.tree.borrow();
        Ok(tree
            .descendants(tree.root())
            .into_iter()
            .filter(|&id| selector.matches(&tree, id))
            .collect())
    }

    pub fn matches(&self, node: NodeId, selector: &str) -> Result<bool, DomError> {
        let selector = SelectorList::parse(selector)?;
        Ok(selector.matches(&self.inner.tree.borrow(), node))
    }

    // --- element events ---

    pub fn add_event_listener(
        &self,
        node: NodeId,
        event_type: EventType,
        listener: Listener,
    ) -> ListenerId {
        self.inner
            .listeners
            .borrow_mut()
            .add(node, event_type, listener)
    }

    pub fn remove_event_listener(&self, node: NodeId, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().remove(node, id)
    }

    /// Number of listeners of any type on a node
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.inner.listeners.borrow().count(node)
    }

    /// Dispatch an event at `target`, bubbling toward the document node when
    /// the type bubbles. Returns false if a listener prevented the default.
    pub fn dispatch_event(&self, target: NodeId, event_type: EventType) -> bool {
        let path = {
            let tree = self.inner.tree.borrow();
            let mut path = vec![target];
            if event_type.bubbles() {
                let mut current = tree.parent(target);
                while let Some(id) = current {
                    path.push(id);
                    current = tree.parent(id);
                }
            }
            path
        };

        let mut event = Event::new(event_type, target, self.now_ms());
        tracing::trace!(?target, ?event_type, "dispatching event");

        for node in path {
            let listeners = self.inner.listeners.borrow().listeners_for(node, event_type);
            event.current_target = node;
            for listener in listeners {
                listener(&mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        !event.is_default_prevented()
    }

    /// Simulate a user click
    pub fn click(&self, target: NodeId) -> bool {
        self.dispatch_event(target, EventType::Click)
    }

    // --- custom events ---

    pub fn add_custom_listener(
        &self,
        name: &str,
        listener: impl Fn(&CustomEvent) + 'static,
    ) -> ListenerId {
        self.inner
            .listeners
            .borrow_mut()
            .add_custom(name, Rc::new(listener))
    }

    pub fn remove_custom_listener(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().remove_custom(id)
    }

    /// Synchronously run every listener for the event's name; returns how many ran
    pub fn dispatch_custom_event(&self, event: &CustomEvent) -> usize {
        let listeners = self.inner.listeners.borrow().custom_listeners(event.name());
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    // --- timers ---

    pub fn set_timeout(&self, delay_ms: u64, task: impl FnOnce() + 'static) -> TimerId {
        self.inner
            .timers
            .borrow_mut()
            .set_timeout(delay_ms, Box::new(task))
    }

    pub fn clear_timeout(&self, id: TimerId) -> bool {
        self.inner.timers.borrow_mut().clear_timeout(id)
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.timers.borrow().now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.timers.borrow().pending()
    }

    /// Advance the virtual clock, running every timer that falls due
    /// (including ones scheduled by tasks run along the way). Returns how
    /// many tasks ran.
    pub fn advance_time(&self, delta_ms: u64) -> usize {
        let target = self.now_ms().saturating_add(delta_ms);
        let mut ran = 0;
        loop {
            let next = self.inner.timers.borrow_mut().pop_due(target);
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        self.inner.timers.borrow_mut().advance_to(target);
        tracing::trace!(delta_ms, ran, now_ms = target, "advanced clock");
        ran
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.inner.tree.borrow().len())
            .field("now_ms", &self.now_ms())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_basic_structure() {
        let doc = Document::new();
        let html = doc.document_element().unwrap();
        assert_eq!(doc.tag_name(html).as_deref(), Some("html"));
        assert_eq!(doc.query_selector("body").unwrap(), doc.body());
        assert!(Document::empty().document_element().is_none());
    }

    #[test]
    fn test_listener_may_reenter_document() {
        let doc = Document::new();
        let body = doc.body().unwrap();
        let button = doc.create_element("button");
        doc.append_child(body, button).unwrap();

        let handle = doc.clone();
        doc.add_event_listener(
            button,
            EventType::Click,
            Rc::new(move |event: &mut Event| {
                handle.toggle_class(event.current_target, "open").unwrap();
                handle.set_timeout(0, || {});
            }),
        );

        assert!(doc.click(button));
        assert!(doc.has_class(button, "open"));
        assert_eq!(doc.pending_timers(), 1);
    }

    #[test]
    fn test_timer_scheduled_by_timer_runs_in_same_advance() {
        let doc = Document::new();
        let hits = Rc::new(Cell::new(0));

        let inner_doc = doc.clone();
        let inner_hits = Rc::clone(&hits);
        doc.set_timeout(10, move || {
            inner_hits.set(inner_hits.get() + 1);
            let again = Rc::clone(&inner_hits);
            inner_doc.set_timeout(10, move || again.set(again.get() + 1));
        });

        assert_eq!(doc.advance_time(25), 2);
        assert_eq!(hits.get(), 2);
        assert_eq!(doc.now_ms(), 25);
    }
}
