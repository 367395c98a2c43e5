//! Target resolution
//!
//! Precedence for a trigger: its own element attribute, then the
//! configured default element selector, then the default target. An
//! element attribute that matches nothing is a failure, not a fallthrough.

use crate::config::ToggleConfig;
use crate::error::ToggleError;
use toggle_dom::{Document, NodeId};

pub(crate) struct TargetResolver<'a> {
    document: &'a Document,
    config: &'a ToggleConfig,
}

impl<'a> TargetResolver<'a> {
    pub fn new(document: &'a Document, config: &'a ToggleConfig) -> Self {
        Self { document, config }
    }

    /// Element a trigger click mutates
    pub fn for_trigger(&self, trigger: NodeId) -> Result<NodeId, ToggleError> {
        let own_selector = self
            .document
            .get_attribute(trigger, &self.config.element_attribute)
            .filter(|s| !s.trim().is_empty());
        if let Some(selector) = own_selector {
            // An unparsable selector counts as no match on the click path
            return match self.document.query_selector(&selector) {
                Ok(Some(element)) => Ok(element),
                _ => Err(ToggleError::TargetNotFound { selector }),
            };
        }

        if let Some(selector) = &self.config.default_element_selector {
            if let Ok(Some(element)) = self.document.query_selector(selector) {
                return Ok(element);
            }
        }

        self.default_target()
    }

    /// Element a programmatic call operates on
    pub fn for_selector(&self, selector: Option<&str>) -> Result<NodeId, ToggleError> {
        match selector.filter(|s| !s.trim().is_empty()) {
            Some(selector) => self.lookup(selector),
            None => self.default_target(),
        }
    }

    fn lookup(&self, selector: &str) -> Result<NodeId, ToggleError> {
        self.document
            .query_selector(selector)?
            .ok_or_else(|| ToggleError::TargetNotFound {
                selector: selector.to_string(),
            })
    }

    fn default_target(&self) -> Result<NodeId, ToggleError> {
        self.config
            .default_target
            .ok_or(ToggleError::MissingDefaultTarget)
    }
}
