use std::time::Duration;

use page_dom::NodeId;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The question has no control of the expected shape.
    NoControl,
    AlreadyFilled,
    NoMatchingOption,
    UnparsableValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "kebab-case")]
pub enum FillStatus {
    Filled,
    Skipped(SkipReason),
}

/// A blur the caller must fire once `delay` has passed, giving an
/// autocomplete widget time to accept the typed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredBlur {
    pub target: NodeId,
    pub delay: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillOutcome {
    pub status: FillStatus,
    pub deferred: Option<DeferredBlur>,
}

impl FillOutcome {
    pub fn filled() -> Self {
        Self {
            status: FillStatus::Filled,
            deferred: None,
        }
    }

    pub fn skipped(reason: SkipReason) -> Self {
        Self {
            status: FillStatus::Skipped(reason),
            deferred: None,
        }
    }

    pub fn with_deferred(mut self, blur: DeferredBlur) -> Self {
        self.deferred = Some(blur);
        self
    }

    pub fn is_filled(&self) -> bool {
        matches!(self.status, FillStatus::Filled)
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self.status {
            FillStatus::Skipped(reason) => Some(reason),
            FillStatus::Filled => None,
        }
    }
}
