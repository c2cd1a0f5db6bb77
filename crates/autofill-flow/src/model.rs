use autofiller_core_types::{PassId, TriggerSource};
use field_catalog::SemanticField;
use serde::Serialize;
use widget_fillers::SkipReason;

/// Reply to "run autofill now".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub success: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "kebab-case")]
pub enum QuestionStatus {
    Filled,
    Skipped(SkipReason),
    NoLabel,
    Unresolved,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    pub label: Option<String>,
    pub field: Option<SemanticField>,
    #[serde(flatten)]
    pub status: QuestionStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldFailure {
    pub label: String,
    pub field: Option<SemanticField>,
    pub error: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PassReport {
    pub pass_id: PassId,
    pub trigger: TriggerSource,
    /// Questions filled plus direct fallback fills. Side questions are not
    /// counted.
    pub filled: usize,
    pub direct_filled: usize,
    pub side_answered: usize,
    pub questions: Vec<QuestionRecord>,
    pub failures: Vec<FieldFailure>,
}

impl PassReport {
    pub fn new(trigger: TriggerSource) -> Self {
        Self {
            pass_id: PassId::new(),
            trigger,
            filled: 0,
            direct_filled: 0,
            side_answered: 0,
            questions: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn question_filled(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| q.status == QuestionStatus::Filled)
            .count()
    }
}
