//! Toggle engine and its public handle

use crate::binder::EventBinder;
use crate::config::{ToggleConfig, ToggleOptions};
use crate::debounce::Debouncer;
use crate::error::ToggleError;
use crate::event::ToggleEvent;
use crate::target::TargetResolver;
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};
use toggle_dom::{Document, Event, Listener, NodeId};

const LOG_TARGET: &str = "data_toggle";

/// Handle to one toggle instance.
///
/// Clones share the instance. Bound listeners keep the instance alive, so
/// dropping every handle does not unbind it; only [`destroy`](Self::destroy)
/// detaches the listeners.
#[derive(Clone)]
pub struct DataToggle {
    inner: Rc<Inner>,
}

struct Inner {
    document: Document,
    config: ToggleConfig,
    destroyed: Cell<bool>,
    binder: EventBinder,
}

/// Public operation, used to word diagnostics
#[derive(Debug, Clone, Copy)]
enum Operation {
    Toggle,
    IsActive,
    Refresh,
}

impl DataToggle {
    /// Resolve `options` against `document` and bind every trigger found
    pub fn new(document: &Document, options: ToggleOptions) -> Self {
        let config = ToggleConfig::resolve(options, document.document_element());
        let inner = Rc::new(Inner {
            document: document.clone(),
            config,
            destroyed: Cell::new(false),
            binder: EventBinder::new(),
        });
        inner.bind_events();
        Self { inner }
    }

    /// Detach all of this instance's listeners and freeze it
    pub fn destroy(&self) {
        let inner = &self.inner;
        if inner.destroyed.get() {
            inner.log(format_args!("Instance already destroyed"));
            return;
        }
        inner.unbind_events();
        inner.destroyed.set(true);
        inner.log(format_args!("Instance destroyed - all event listeners removed"));
    }

    /// Flip `class_name` on the element matching `element_selector`, or on
    /// the default target. Failures are logged, never returned.
    pub fn toggle(&self, class_name: &str, element_selector: Option<&str>) {
        if let Err(err) = self.try_toggle(class_name, element_selector) {
            self.inner.report(Operation::Toggle, &err);
        }
    }

    /// Like [`toggle`](Self::toggle), returning the new state or the reason
    /// nothing changed
    pub fn try_toggle(
        &self,
        class_name: &str,
        element_selector: Option<&str>,
    ) -> Result<bool, ToggleError> {
        self.inner.ensure_live()?;
        let class_name = validate_class_name(class_name)?;
        let target = self.inner.resolver().for_selector(element_selector)?;
        let active = self.inner.flip(class_name, target, None)?;
        self.inner.log(format_args!(
            "Programmatically toggled \"{class_name}\" on {target:?} {}",
            on_off(active)
        ));
        Ok(active)
    }

    /// Whether the resolved target currently has `class_name`. Returns
    /// false when destroyed or when the selector matches nothing.
    pub fn is_active(&self, class_name: &str, element_selector: Option<&str>) -> bool {
        self.try_is_active(class_name, element_selector)
            .unwrap_or_else(|err| {
                self.inner.report(Operation::IsActive, &err);
                false
            })
    }

    /// Like [`is_active`](Self::is_active), returning why the check failed
    pub fn try_is_active(
        &self,
        class_name: &str,
        element_selector: Option<&str>,
    ) -> Result<bool, ToggleError> {
        self.inner.ensure_live()?;
        let target = self.inner.resolver().for_selector(element_selector)?;
        Ok(self.inner.document.has_class(target, class_name.trim()))
    }

    /// Rescan the document so newly added triggers respond to clicks
    pub fn refresh(&self) {
        let inner = &self.inner;
        if let Err(err) = inner.ensure_live() {
            inner.report(Operation::Refresh, &err);
            return;
        }
        inner.log(format_args!(
            "Refreshing instance - rescanning for new toggle elements"
        ));
        inner.unbind_events();
        inner.bind_events();
    }

    /// Whether [`destroy`](Self::destroy) has run
    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.get()
    }

    /// Number of triggers currently bound by this instance
    pub fn bound_count(&self) -> usize {
        self.inner.binder.len()
    }

    /// Whether this instance has a listener on `element`
    pub fn is_bound(&self, element: NodeId) -> bool {
        self.inner.binder.is_bound(element)
    }

    /// Resolved configuration of this instance
    pub fn config(&self) -> &ToggleConfig {
        &self.inner.config
    }

    pub fn document(&self) -> &Document {
        &self.inner.document
    }
}

impl fmt::Debug for DataToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataToggle")
            .field("selector", &self.inner.config.selector)
            .field("bound", &self.inner.binder.len())
            .field("destroyed", &self.inner.destroyed.get())
            .finish()
    }
}

impl Inner {
    /// Informational diagnostics, only with `debug` enabled
    fn log(&self, message: fmt::Arguments<'_>) {
        if self.config.debug {
            tracing::info!(target: LOG_TARGET, "{message}");
        }
    }

    fn ensure_live(&self) -> Result<(), ToggleError> {
        if self.destroyed.get() {
            return Err(ToggleError::Destroyed);
        }
        Ok(())
    }

    fn resolver(&self) -> TargetResolver<'_> {
        TargetResolver::new(&self.document, &self.config)
    }

    fn report(&self, operation: Operation, err: &ToggleError) {
        match (err, operation) {
            (ToggleError::Destroyed, Operation::Toggle) => {
                tracing::warn!(target: LOG_TARGET, "Cannot toggle on destroyed instance")
            }
            (ToggleError::Destroyed, Operation::IsActive) => {
                tracing::warn!(target: LOG_TARGET, "Cannot check state on destroyed instance")
            }
            (ToggleError::Destroyed, Operation::Refresh) => {
                tracing::warn!(target: LOG_TARGET, "Cannot refresh destroyed instance")
            }
            (ToggleError::InvalidClassName, _) => {
                tracing::warn!(target: LOG_TARGET, "Invalid class name provided")
            }
            (ToggleError::TargetNotFound { selector }, _) => {
                tracing::warn!(target: LOG_TARGET, "Element not found for selector: {selector}")
            }
            (ToggleError::MissingDefaultTarget, _) => {
                tracing::error!(target: LOG_TARGET, "Default target element not found")
            }
            (ToggleError::Dom(dom), _) => {
                tracing::warn!(target: LOG_TARGET, error = %dom, ?operation, "DOM operation failed")
            }
        }
    }

    fn bind_events(self: &Rc<Self>) {
        if self.config.default_target.is_none() {
            tracing::error!(target: LOG_TARGET, "Default target element not found");
            return;
        }

        let listener = self.click_listener();
        match self
            .binder
            .bind(&self.document, &self.config.selector, &listener)
        {
            Ok(0) => self.log(format_args!(
                "No toggle elements found with selector: {}",
                self.config.selector
            )),
            Ok(count) => self.log(format_args!("Bound events to {count} elements")),
            Err(err) => {
                tracing::error!(target: LOG_TARGET, error = %err, "Error binding events")
            }
        }
    }

    fn unbind_events(&self) {
        let count = self.binder.unbind(&self.document);
        self.log(format_args!("Unbound all events ({count} elements)"));
    }

    /// One listener per bind pass, shared by every trigger it attaches to.
    /// Each listener holds the instance strongly until it is unbound.
    fn click_listener(self: &Rc<Self>) -> Listener {
        let inner = Rc::clone(self);

        if self.config.is_debounced() {
            let deferred: Weak<Inner> = Rc::downgrade(self);
            let debouncer = Debouncer::new(
                self.document.clone(),
                self.config.debounce_delay_ms,
                move |trigger: NodeId| {
                    if let Some(inner) = deferred.upgrade() {
                        inner.toggle_from_trigger(trigger);
                    }
                },
            );
            return Rc::new(move |event: &mut Event| {
                if inner.accept_click(event) {
                    debouncer.call(event.current_target);
                }
            });
        }

        Rc::new(move |event: &mut Event| {
            if inner.accept_click(event) {
                inner.toggle_from_trigger(event.current_target);
            }
        })
    }

    /// Synchronous part of a click: guards and the prevent-default policy.
    /// Returns whether the toggle should run.
    fn accept_click(&self, event: &mut Event) -> bool {
        if self.destroyed.get() {
            return false;
        }
        let trigger = event.current_target;
        if self.class_name_of(trigger).is_none() {
            return false;
        }

        let tag_name = self.document.tag_name(trigger).unwrap_or_default();
        if self.config.prevent_default.should_prevent(&tag_name) {
            event.prevent_default();
        }
        true
    }

    /// Class name from the trigger's toggle attribute, logging when blank
    fn class_name_of(&self, trigger: NodeId) -> Option<String> {
        let raw = self
            .document
            .get_attribute(trigger, &self.config.toggle_attribute);
        match raw.as_deref().map(validate_class_name) {
            Some(Ok(class_name)) => Some(class_name.to_string()),
            _ => {
                self.log(format_args!(
                    "No class name found in {} attribute",
                    self.config.toggle_attribute
                ));
                None
            }
        }
    }

    fn toggle_from_trigger(&self, trigger: NodeId) {
        if self.destroyed.get() {
            return;
        }
        let Some(class_name) = self.class_name_of(trigger) else {
            return;
        };

        let target = match self.resolver().for_trigger(trigger) {
            Ok(target) => target,
            Err(ToggleError::TargetNotFound { selector }) => {
                tracing::warn!(target: LOG_TARGET, "Target element not found for selector: {selector}");
                return;
            }
            Err(err) => {
                self.report(Operation::Toggle, &err);
                return;
            }
        };

        match self.flip(&class_name, target, Some(trigger)) {
            Ok(active) => self.log(format_args!(
                "Toggled class \"{class_name}\" on {target:?} {}",
                on_off(active)
            )),
            Err(err) => self.report(Operation::Toggle, &err),
        }
    }

    /// Flip membership and broadcast the new state
    fn flip(
        &self,
        class_name: &str,
        target: NodeId,
        trigger: Option<NodeId>,
    ) -> Result<bool, ToggleError> {
        let active = self.document.toggle_class(target, class_name)?;
        let event = ToggleEvent {
            class_name: class_name.to_string(),
            target,
            trigger,
            active,
        };
        self.document.dispatch_custom_event(&event.into_custom());
        Ok(active)
    }
}

/// Trimmed class name; blank names and names containing whitespace are rejected
fn validate_class_name(class_name: &str) -> Result<&str, ToggleError> {
    let trimmed = class_name.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return Err(ToggleError::InvalidClassName);
    }
    Ok(trimmed)
}

fn on_off(active: bool) -> &'static str {
    if active { "ON" } else { "OFF" }
}
