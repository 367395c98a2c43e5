//! data-toggle
//!
//! Declarative class toggling: elements carrying a `data-toggle="<class>"`
//! attribute flip that class on a target element when clicked.
//!
//! # Example
//! ```rust
//! use data_toggle::{DataToggle, ToggleOptions};
//! use toggle_dom::Document;
//!
//! let doc = Document::new();
//! let button = doc.create_element("button");
//! doc.set_attribute(button, "data-toggle", "menu-open").unwrap();
//! doc.append_child(doc.body().unwrap(), button).unwrap();
//!
//! let toggle = DataToggle::new(&doc, ToggleOptions::default());
//! doc.click(button);
//! assert!(toggle.is_active("menu-open", None));
//! ```
//!
//! A trigger may name its own target with `data-toggle-element="<selector>"`.
//! Every change is announced with a `datatoggle` custom event on the
//! document (see [`on_toggle`]).

mod binder;
mod config;
mod debounce;
mod engine;
mod error;
mod event;
mod target;

pub use config::{
    PreventDefault, ToggleConfig, ToggleOptions, DEFAULT_ELEMENT_ATTRIBUTE, DEFAULT_SELECTOR,
    DEFAULT_TOGGLE_ATTRIBUTE,
};
pub use debounce::{Debouncer, Scheduler};
pub use engine::DataToggle;
pub use error::{ConfigError, ToggleError};
pub use event::{on_toggle, ToggleEvent, TOGGLE_EVENT};

/// Re-export of the document model the engine runs on
pub use toggle_dom as dom;

/// Create a toggle instance bound to `document`
pub fn create_data_toggle(document: &toggle_dom::Document, options: ToggleOptions) -> DataToggle {
    DataToggle::new(document, options)
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
