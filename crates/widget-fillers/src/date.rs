use page_dom::{Document, NodeId};

use crate::errors::FillError;
use crate::model::{FillOutcome, SkipReason};
use crate::text::fill_control;

/// An input whose placeholder asks for `MM/DD`, or whose name or id
/// mentions a date.
pub fn is_date_shaped(doc: &Document, id: NodeId) -> bool {
    doc.is_tag(id, "input")
        && (doc.attr_contains(id, "placeholder", "mm/dd")
            || doc.attr_contains(id, "name", "date")
            || doc.attr_contains(id, "id", "date"))
}

pub fn locate(doc: &Document, question: NodeId) -> Option<NodeId> {
    doc.find(question, is_date_shaped)
}

pub fn fill(doc: &mut Document, question: NodeId, value: &str) -> Result<FillOutcome, FillError> {
    match locate(doc, question) {
        Some(input) => fill_control(doc, input, value),
        None => Ok(FillOutcome::skipped(SkipReason::NoControl)),
    }
}
