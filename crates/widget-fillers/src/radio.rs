use field_catalog::AliasTable;
use page_dom::{Document, NodeId};
use tracing::debug;

use crate::commit::commit;
use crate::errors::FillError;
use crate::matching::{match_radio, radio_candidates};
use crate::model::{FillOutcome, SkipReason};
use crate::policy::FillPolicy;

/// A radio group counts as answered once any of its radios is checked.
pub fn group_answered(doc: &Document, question: NodeId) -> bool {
    doc.find(question, |doc, id| doc.is_radio(id) && doc.checked(id))
        .is_some()
}

pub fn fill(
    doc: &mut Document,
    question: NodeId,
    value: &str,
    aliases: Option<AliasTable>,
    policy: &FillPolicy,
) -> Result<FillOutcome, FillError> {
    let candidates = radio_candidates(doc, question);
    if candidates.is_empty() {
        return Ok(FillOutcome::skipped(SkipReason::NoControl));
    }
    if group_answered(doc, question) {
        return Ok(FillOutcome::skipped(SkipReason::AlreadyFilled));
    }
    let Some(radio) = match_radio(&candidates, value, aliases, policy.reverse_match_min_len) else {
        debug!(value, radios = candidates.len(), "no radio matched");
        return Ok(FillOutcome::skipped(SkipReason::NoMatchingOption));
    };
    check(doc, radio)?;
    Ok(FillOutcome::filled())
}

/// Checks one radio exclusively and commits it.
pub fn check(doc: &mut Document, radio: NodeId) -> Result<(), FillError> {
    doc.set_checked(radio, true)?;
    commit(doc, radio)?;
    Ok(())
}
