//! Document-level tests for toggle-dom
//!
//! Queries, class mutation, event dispatch and timers through the public
//! `Document` handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use toggle_dom::{CustomEvent, Document, DomError, Event, EventType, NodeId};

fn append(doc: &Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let el = doc.create_element(tag);
    for (name, value) in attrs {
        doc.set_attribute(el, name, value).unwrap();
    }
    doc.append_child(parent, el).unwrap();
    el
}

#[test]
fn test_query_selector_document_order() {
    let doc = Document::new();
    let body = doc.body().unwrap();
    let nav = append(&doc, body, "nav", &[("class", "menu")]);
    let first = append(&doc, nav, "button", &[("data-toggle", "open")]);
    let second = append(&doc, body, "a", &[("data-toggle", "dark")]);

    assert_eq!(doc.query_selector("[data-toggle]").unwrap(), Some(first));
    assert_eq!(
        doc.query_selector_all("[data-toggle]").unwrap(),
        vec![first, second]
    );
    assert_eq!(doc.query_selector(".menu > button").unwrap(), Some(first));
    assert_eq!(doc.query_selector("body a[data-toggle=dark]").unwrap(), Some(second));
    assert_eq!(doc.query_selector(".missing").unwrap(), None);
}

#[test]
fn test_detached_elements_are_not_queried() {
    let doc = Document::new();
    let body = doc.body().unwrap();
    let el = append(&doc, body, "div", &[("class", "sidebar")]);
    let orphan = doc.create_element("div");
    doc.set_attribute(orphan, "class", "sidebar").unwrap();

    assert_eq!(doc.query_selector_all(".sidebar").unwrap(), vec![el]);
    doc.remove(el).unwrap();
    assert!(doc.query_selector_all(".sidebar").unwrap().is_empty());
    assert!(!doc.contains(el));
}

#[test]
fn test_invalid_selector_is_an_error() {
    let doc = Document::new();
    assert!(matches!(
        doc.query_selector_all("[data-toggle"),
        Err(DomError::InvalidSelector { .. })
    ));
}

#[test]
fn test_class_mutation_updates_attribute() {
    let doc = Document::new();
    let html = doc.document_element().unwrap();

    assert!(doc.toggle_class(html, "dark").unwrap());
    assert_eq!(doc.get_attribute(html, "class").as_deref(), Some("dark"));
    assert!(doc.matches(html, "html.dark").unwrap());

    assert!(!doc.toggle_class(html, "dark").unwrap());
    assert_eq!(doc.class_name(html), "");
}

#[test]
fn test_class_mutation_on_text_node_fails() {
    let doc = Document::new();
    let text = doc.create_text("hello");
    assert_eq!(doc.toggle_class(text, "x"), Err(DomError::NotAnElement(text)));
}

#[test]
fn test_click_bubbles_with_current_target() {
    let doc = Document::new();
    let body = doc.body().unwrap();
    let button = append(&doc, body, "button", &[]);
    let seen = Rc::new(RefCell::new(Vec::new()));

    for node in [button, body] {
        let seen = Rc::clone(&seen);
        doc.add_event_listener(
            node,
            EventType::Click,
            Rc::new(move |event: &mut Event| {
                seen.borrow_mut().push((event.target, event.current_target));
            }),
        );
    }

    assert!(doc.click(button));
    assert_eq!(*seen.borrow(), vec![(button, button), (button, body)]);
}

#[test]
fn test_stop_propagation_and_prevent_default() {
    let doc = Document::new();
    let body = doc.body().unwrap();
    let link = append(&doc, body, "a", &[("href", "#")]);
    let body_hits = Rc::new(Cell::new(0));

    doc.add_event_listener(
        link,
        EventType::Click,
        Rc::new(|event: &mut Event| {
            event.prevent_default();
            event.stop_propagation();
        }),
    );
    let hits = Rc::clone(&body_hits);
    doc.add_event_listener(
        body,
        EventType::Click,
        Rc::new(move |_: &mut Event| hits.set(hits.get() + 1)),
    );

    assert!(!doc.click(link));
    assert_eq!(body_hits.get(), 0);
}

#[test]
fn test_remove_listener() {
    let doc = Document::new();
    let body = doc.body().unwrap();
    let div = append(&doc, body, "div", &[]);
    let hits = Rc::new(Cell::new(0));

    let counter = Rc::clone(&hits);
    let id = doc.add_event_listener(
        div,
        EventType::Click,
        Rc::new(move |_: &mut Event| counter.set(counter.get() + 1)),
    );
    doc.click(div);
    assert!(doc.remove_event_listener(div, id));
    assert!(!doc.remove_event_listener(div, id));
    doc.click(div);

    assert_eq!(hits.get(), 1);
    assert_eq!(doc.listener_count(div), 0);
}

#[test]
fn test_moved_node_keeps_listeners() {
    let doc = Document::new();
    let body = doc.body().unwrap();
    let wrapper = append(&doc, body, "div", &[]);
    let inner = append(&doc, wrapper, "button", &[]);
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    doc.add_event_listener(
        inner,
        EventType::Click,
        Rc::new(move |_: &mut Event| counter.set(counter.get() + 1)),
    );

    doc.remove(wrapper).unwrap();
    assert!(!doc.contains(inner));
    assert_eq!(doc.listener_count(inner), 1);

    let other = append(&doc, body, "section", &[]);
    doc.append_child(other, inner).unwrap();
    doc.click(inner);
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_custom_events() {
    let doc = Document::new();
    let received = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&received);
    let id = doc.add_custom_listener("ping", move |event| {
        if let Some(value) = event.detail::<&'static str>() {
            sink.borrow_mut().push(*value);
        }
    });

    assert_eq!(doc.dispatch_custom_event(&CustomEvent::new("ping", "one")), 1);
    assert_eq!(doc.dispatch_custom_event(&CustomEvent::new("pong", "ignored")), 0);
    assert!(doc.remove_custom_listener(id));
    doc.dispatch_custom_event(&CustomEvent::new("ping", "two"));

    assert_eq!(*received.borrow(), vec!["one"]);
}

#[test]
fn test_virtual_clock() {
    let doc = Document::new();
    let fired = Rc::new(Cell::new(false));

    let flag = Rc::clone(&fired);
    doc.set_timeout(50, move || flag.set(true));

    assert_eq!(doc.advance_time(49), 0);
    assert!(!fired.get());
    assert_eq!(doc.advance_time(1), 1);
    assert!(fired.get());
    assert_eq!(doc.now_ms(), 50);
    assert_eq!(doc.pending_timers(), 0);
}
