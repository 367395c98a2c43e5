//! `datatoggle` notifications

use toggle_dom::{CustomEvent, Document, ListenerId, NodeId};

/// Name of the custom event dispatched on the document after every toggle
pub const TOGGLE_EVENT: &str = "datatoggle";

/// Payload of a `datatoggle` event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleEvent {
    pub class_name: String,
    /// Element whose class list changed
    pub target: NodeId,
    /// Trigger that was clicked, `None` for programmatic toggles
    pub trigger: Option<NodeId>,
    /// Whether the class is present after the toggle
    pub active: bool,
}

impl ToggleEvent {
    pub fn into_custom(self) -> CustomEvent {
        CustomEvent::new(TOGGLE_EVENT, self)
    }

    pub fn from_custom(event: &CustomEvent) -> Option<&ToggleEvent> {
        if event.name() != TOGGLE_EVENT {
            return None;
        }
        event.detail::<ToggleEvent>()
    }
}

/// Subscribe to `datatoggle` events on a document
pub fn on_toggle(document: &Document, listener: impl Fn(&ToggleEvent) + 'static) -> ListenerId {
    document.add_custom_listener(TOGGLE_EVENT, move |event| {
        if let Some(toggle) = ToggleEvent::from_custom(event) {
            listener(toggle);
        }
    })
}
