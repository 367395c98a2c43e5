//! Toggle Configuration
//!
//! `ToggleOptions` is what callers supply (every field optional, loadable
//! from JSON); `ToggleConfig` is the fully-resolved record an instance
//! runs with.

use crate::error::ConfigError;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use toggle_dom::NodeId;

/// Trigger selector used when neither a selector nor a custom attribute is given
pub const DEFAULT_SELECTOR: &str = "[data-toggle]";
/// Attribute holding the class name to toggle
pub const DEFAULT_TOGGLE_ATTRIBUTE: &str = "data-toggle";
/// Attribute holding a per-trigger target selector
pub const DEFAULT_ELEMENT_ATTRIBUTE: &str = "data-toggle-element";

/// Whether a trigger click suppresses the browser's default action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreventDefault {
    Always,
    Never,
    /// Only for `<a>` and `<button>` triggers
    #[default]
    Auto,
}

impl PreventDefault {
    /// Evaluate the policy for a trigger's tag name
    pub fn should_prevent(self, tag_name: &str) -> bool {
        match self {
            PreventDefault::Always => true,
            PreventDefault::Never => false,
            PreventDefault::Auto => {
                tag_name.eq_ignore_ascii_case("a") || tag_name.eq_ignore_ascii_case("button")
            }
        }
    }
}

impl From<bool> for PreventDefault {
    fn from(prevent: bool) -> Self {
        if prevent {
            PreventDefault::Always
        } else {
            PreventDefault::Never
        }
    }
}

// Accepts `true`, `false` or `"auto"`
impl<'de> Deserialize<'de> for PreventDefault {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Keyword(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(flag) => Ok(flag.into()),
            Repr::Keyword(keyword) if keyword.eq_ignore_ascii_case("auto") => {
                Ok(PreventDefault::Auto)
            }
            Repr::Keyword(other) => Err(de::Error::invalid_value(
                de::Unexpected::Str(&other),
                &"true, false or \"auto\"",
            )),
        }
    }
}

/// Caller-supplied partial configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToggleOptions {
    /// Selector for trigger elements
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub toggle_attribute: Option<String>,
    #[serde(default)]
    pub element_attribute: Option<String>,
    /// Element mutated when a trigger names no target (defaults to `<html>`)
    #[serde(skip)]
    pub default_target: Option<NodeId>,
    #[serde(default)]
    pub default_element_selector: Option<String>,
    #[serde(default)]
    pub prevent_default: Option<PreventDefault>,
    #[serde(default)]
    pub debug: Option<bool>,
    /// Milliseconds; 0 disables debouncing
    #[serde(default)]
    pub debounce_delay: Option<u64>,
}

impl ToggleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object using the camelCase option names
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn toggle_attribute(mut self, name: impl Into<String>) -> Self {
        self.toggle_attribute = Some(name.into());
        self
    }

    pub fn element_attribute(mut self, name: impl Into<String>) -> Self {
        self.element_attribute = Some(name.into());
        self
    }

    pub fn default_target(mut self, target: NodeId) -> Self {
        self.default_target = Some(target);
        self
    }

    pub fn default_element_selector(mut self, selector: impl Into<String>) -> Self {
        self.default_element_selector = Some(selector.into());
        self
    }

    pub fn prevent_default(mut self, policy: impl Into<PreventDefault>) -> Self {
        self.prevent_default = Some(policy.into());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn debounce_delay(mut self, delay_ms: u64) -> Self {
        self.debounce_delay = Some(delay_ms);
        self
    }
}

/// Resolved configuration, fixed for the lifetime of an instance
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleConfig {
    pub selector: String,
    pub toggle_attribute: String,
    pub element_attribute: String,
    pub default_target: Option<NodeId>,
    pub default_element_selector: Option<String>,
    pub prevent_default: PreventDefault,
    pub debug: bool,
    pub debounce_delay_ms: u64,
}

impl ToggleConfig {
    /// Layer `options` over the defaults. Empty strings count as unset.
    pub fn resolve(options: ToggleOptions, document_element: Option<NodeId>) -> Self {
        let custom_attribute = non_empty(options.toggle_attribute);
        let selector = match (non_empty(options.selector), &custom_attribute) {
            (Some(selector), _) => selector,
            (None, Some(attribute)) => format!("[{attribute}]"),
            (None, None) => DEFAULT_SELECTOR.to_string(),
        };

        Self {
            selector,
            toggle_attribute: custom_attribute
                .unwrap_or_else(|| DEFAULT_TOGGLE_ATTRIBUTE.to_string()),
            element_attribute: non_empty(options.element_attribute)
                .unwrap_or_else(|| DEFAULT_ELEMENT_ATTRIBUTE.to_string()),
            default_target: options.default_target.or(document_element),
            default_element_selector: non_empty(options.default_element_selector),
            prevent_default: options.prevent_default.unwrap_or_default(),
            debug: options.debug.unwrap_or(false),
            debounce_delay_ms: options.debounce_delay.unwrap_or(0),
        }
    }

    pub fn is_debounced(&self) -> bool {
        self.debounce_delay_ms > 0
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
