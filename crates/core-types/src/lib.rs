use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the engine crates. Per-crate error enums convert into it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutofillError {
    #[error("{message}")]
    Message { message: String },
    #[error("profile unavailable: {0}")]
    Profile(String),
    #[error("page unavailable: {0}")]
    Page(String),
}

impl AutofillError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    pub fn profile(message: impl Into<String>) -> Self {
        Self::Profile(message.into())
    }

    pub fn page(message: impl Into<String>) -> Self {
        Self::Page(message.into())
    }
}

/// Identifies one autofill pass over a page.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PassId(pub String);

impl PassId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for PassId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What caused a pass to run.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TriggerSource {
    Manual,
    Shortcut,
    PageLoad,
    DomMutation,
}

impl TriggerSource {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerSource::Manual => "manual",
            TriggerSource::Shortcut => "shortcut",
            TriggerSource::PageLoad => "page-load",
            TriggerSource::DomMutation => "dom-mutation",
        }
    }
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
