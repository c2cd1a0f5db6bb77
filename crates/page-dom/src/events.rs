use serde::Serialize;

use crate::NodeId;

/// Events the engine synthesizes after writing a control. All of them bubble.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    Focus,
    Input { data: Option<String> },
    Change,
    Blur,
    Click,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Focus => "focus",
            EventKind::Input { .. } => "input",
            EventKind::Change => "change",
            EventKind::Blur => "blur",
            EventKind::Click => "click",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DispatchedEvent {
    pub target: NodeId,
    pub kind: EventKind,
}
