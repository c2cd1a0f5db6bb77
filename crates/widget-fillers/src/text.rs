use page_dom::{Document, NodeId};
use tracing::debug;

use crate::commit::{control_empty, write_text};
use crate::errors::FillError;
use crate::model::{FillOutcome, SkipReason};

/// First text-like input or textarea inside `question`.
pub fn locate(doc: &Document, question: NodeId) -> Option<NodeId> {
    doc.find(question, |doc, id| doc.is_text_like(id))
}

pub fn fill(doc: &mut Document, question: NodeId, value: &str) -> Result<FillOutcome, FillError> {
    match locate(doc, question) {
        Some(control) => fill_control(doc, control, value),
        None => Ok(FillOutcome::skipped(SkipReason::NoControl)),
    }
}

/// Writes `value` into a specific control when it is empty.
pub fn fill_control(
    doc: &mut Document,
    control: NodeId,
    value: &str,
) -> Result<FillOutcome, FillError> {
    if !control_empty(doc, control)? {
        debug!(?control, "text control already populated");
        return Ok(FillOutcome::skipped(SkipReason::AlreadyFilled));
    }
    write_text(doc, control, value)?;
    Ok(FillOutcome::filled())
}
