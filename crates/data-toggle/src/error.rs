//! Error types

use toggle_dom::DomError;

/// Why a toggle operation did not mutate anything
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    #[error("instance has been destroyed")]
    Destroyed,
    #[error("invalid class name provided")]
    InvalidClassName,
    #[error("element not found for selector: {selector}")]
    TargetNotFound { selector: String },
    #[error("default target element not found")]
    MissingDefaultTarget,
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Options could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid toggle options: {0}")]
    Json(#[from] serde_json::Error),
}
