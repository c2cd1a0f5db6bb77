use page_dom::{Document, NodeId};

use crate::errors::FillError;
use crate::matching::radio_candidates;
use crate::model::{FillOutcome, SkipReason};
use crate::radio::{check, group_answered};

const AFFIRMATIVE: &[&str] = &["agree", "acknowledge", "accept", "consent", "yes"];
const NEGATIVE: &[&str] = &[
    "disagree",
    "not in full agreement",
    "do not",
    "don't",
    "decline",
];

/// Affirmative answer wording that carries no negation.
pub fn is_affirmative(label: &str) -> bool {
    AFFIRMATIVE.iter().any(|p| label.contains(p)) && !NEGATIVE.iter().any(|p| label.contains(p))
}

/// Chooses the agree option of a radio group. A lone checkbox is checked
/// when unchecked.
pub fn fill(doc: &mut Document, question: NodeId) -> Result<FillOutcome, FillError> {
    let radios = radio_candidates(doc, question);
    if !radios.is_empty() {
        if group_answered(doc, question) {
            return Ok(FillOutcome::skipped(SkipReason::AlreadyFilled));
        }
        return match radios.iter().find(|c| is_affirmative(&c.label)) {
            Some(agree) => {
                check(doc, agree.node)?;
                Ok(FillOutcome::filled())
            }
            None => Ok(FillOutcome::skipped(SkipReason::NoMatchingOption)),
        };
    }
    match doc.find(question, |doc, id| doc.is_checkbox(id)) {
        Some(checkbox) if doc.checked(checkbox) => {
            Ok(FillOutcome::skipped(SkipReason::AlreadyFilled))
        }
        Some(checkbox) => {
            click_checkbox(doc, checkbox)?;
            Ok(FillOutcome::filled())
        }
        None => Ok(FillOutcome::skipped(SkipReason::NoControl)),
    }
}

/// Checks a checkbox the way a user click would: `click` then `change`.
pub fn click_checkbox(doc: &mut Document, checkbox: NodeId) -> Result<(), FillError> {
    doc.set_checked(checkbox, true)?;
    doc.dispatch(checkbox, page_dom::EventKind::Click)?;
    doc.dispatch(checkbox, page_dom::EventKind::Change)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_picks_disagreement() {
        let mut doc = Document::parse_html(
            r#"<div id="q">
              <label><input type="radio" name="a" value="1">I am not in full agreement</label>
              <label><input type="radio" name="a" value="2">I disagree</label>
              <label><input type="radio" name="a" value="3">I agree with the statement</label></div>"#,
        );
        let q = doc.element_by_id("q").unwrap();
        assert!(fill(&mut doc, q).unwrap().is_filled());
        let checked = doc
            .find(q, |doc, id| doc.is_radio(id) && doc.checked(id))
            .unwrap();
        assert_eq!(doc.attr(checked, "value"), Some("3"));
    }

    #[test]
    fn affirmative_wording() {
        assert!(is_affirmative("i acknowledge and consent"));
        assert!(is_affirmative("yes"));
        assert!(!is_affirmative("i do not agree"));
        assert!(!is_affirmative("no"));
    }

    #[test]
    fn checkbox_is_checked_once() {
        let mut doc = Document::parse_html(
            r#"<div id="q"><label><input type="checkbox" name="ack">I attest</label></div>"#,
        );
        let q = doc.element_by_id("q").unwrap();
        assert!(fill(&mut doc, q).unwrap().is_filled());
        assert_eq!(
            fill(&mut doc, q).unwrap().skip_reason(),
            Some(SkipReason::AlreadyFilled)
        );
    }
}
