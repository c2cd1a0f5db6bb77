use field_catalog::AliasTable;
use page_dom::{Document, NodeId};
use tracing::debug;

use crate::commit::{commit, select_populated};
use crate::errors::FillError;
use crate::matching::{match_option, option_candidates};
use crate::model::{FillOutcome, SkipReason};
use crate::policy::FillPolicy;

pub fn locate(doc: &Document, question: NodeId) -> Option<NodeId> {
    doc.find(question, |doc, id| doc.is_tag(id, "select"))
}

pub fn fill(
    doc: &mut Document,
    question: NodeId,
    value: &str,
    aliases: Option<AliasTable>,
    policy: &FillPolicy,
) -> Result<FillOutcome, FillError> {
    match locate(doc, question) {
        Some(select) => fill_select(doc, select, value, aliases, policy),
        None => Ok(FillOutcome::skipped(SkipReason::NoControl)),
    }
}

/// Selects the option matching `value` on a specific `<select>`. An
/// unmatched value leaves the current selection untouched.
pub fn fill_select(
    doc: &mut Document,
    select: NodeId,
    value: &str,
    aliases: Option<AliasTable>,
    policy: &FillPolicy,
) -> Result<FillOutcome, FillError> {
    if select_populated(doc, select) {
        return Ok(FillOutcome::skipped(SkipReason::AlreadyFilled));
    }
    let candidates = option_candidates(doc, select);
    let Some(option) = match_option(&candidates, value, aliases, policy.reverse_match_min_len)
    else {
        debug!(value, options = candidates.len(), "no option matched");
        return Ok(FillOutcome::skipped(SkipReason::NoMatchingOption));
    };
    doc.select_option(select, option)?;
    commit(doc, select)?;
    Ok(FillOutcome::filled())
}
