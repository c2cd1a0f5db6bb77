//! Multi-row day/time dropdown pairs.

use field_catalog::AvailabilitySlot;
use page_dom::{Document, NodeId};
use tracing::debug;

use crate::commit::{commit, select_populated};
use crate::errors::FillError;
use crate::matching::{option_candidates, Candidate};
use crate::model::{FillOutcome, SkipReason};

const DAY_WORDS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "weekday",
    "weekdays",
    "weekend",
    "weekends",
];

const TIME_WORDS: &[&str] = &[
    "morning",
    "mornings",
    "afternoon",
    "afternoons",
    "evening",
    "evenings",
    "night",
    "nights",
    "overnight",
    "anytime",
    "am",
    "pm",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownRole {
    Day,
    Time,
    Other,
}

fn words(label: &str) -> impl Iterator<Item = &str> {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

/// Classifies a select by the vocabulary of its option labels.
pub fn classify(doc: &Document, select: NodeId) -> DropdownRole {
    let mut days = 0usize;
    let mut times = 0usize;
    for option in option_candidates(doc, select) {
        if words(&option.label).any(|w| DAY_WORDS.contains(&w)) {
            days += 1;
        } else if words(&option.label).any(|w| TIME_WORDS.contains(&w))
            || option.label.contains(":00")
        {
            times += 1;
        }
    }
    match (days, times) {
        (0, 0) => DropdownRole::Other,
        (d, t) if d >= t => DropdownRole::Day,
        _ => DropdownRole::Time,
    }
}

/// Adjacent (day, time) selects in document order.
pub fn pairs(doc: &Document, scope: NodeId) -> Vec<(NodeId, NodeId)> {
    let selects = doc.elements_by_tag(scope, "select");
    let roles: Vec<DropdownRole> = selects.iter().map(|s| classify(doc, *s)).collect();
    let mut out = Vec::new();
    let mut idx = 0;
    while idx + 1 < selects.len() {
        if roles[idx] == DropdownRole::Day && roles[idx + 1] == DropdownRole::Time {
            out.push((selects[idx], selects[idx + 1]));
            idx += 2;
        } else {
            idx += 1;
        }
    }
    out
}

fn find_option(candidates: &[Candidate], wanted: &str) -> Option<NodeId> {
    let wanted = wanted.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    let real = || candidates.iter().filter(|c| !c.value.trim().is_empty());
    real()
        .find(|c| c.label == wanted || c.value.to_lowercase() == wanted)
        .or_else(|| real().find(|c| c.label.contains(wanted.as_str())))
        .or_else(|| real().find(|c| c.label.len() >= 3 && wanted.contains(c.label.as_str())))
        .map(|c| c.node)
}

/// Returns whether a write happened.
fn fill_one(doc: &mut Document, select: NodeId, wanted: &str) -> Result<bool, FillError> {
    if select_populated(doc, select) {
        return Ok(false);
    }
    let candidates = option_candidates(doc, select);
    match find_option(&candidates, wanted) {
        Some(option) => {
            doc.select_option(select, option)?;
            commit(doc, select)?;
            Ok(true)
        }
        None => {
            debug!(wanted, "no availability option matched");
            Ok(false)
        }
    }
}

/// Pair `i` receives slot `i`. Slots beyond the available pairs are dropped
/// and pairs beyond the slots are left untouched.
pub fn fill(
    doc: &mut Document,
    scope: NodeId,
    slots: &[AvailabilitySlot],
) -> Result<FillOutcome, FillError> {
    let pairs = pairs(doc, scope);
    if pairs.is_empty() {
        return Ok(FillOutcome::skipped(SkipReason::NoControl));
    }
    if slots.len() > pairs.len() {
        debug!(
            slots = slots.len(),
            pairs = pairs.len(),
            "dropping availability slots without a dropdown pair"
        );
    }
    if pairs
        .iter()
        .all(|(day, time)| select_populated(doc, *day) && select_populated(doc, *time))
    {
        return Ok(FillOutcome::skipped(SkipReason::AlreadyFilled));
    }
    let mut wrote = false;
    for ((day, time), slot) in pairs.iter().zip(slots) {
        wrote |= fill_one(doc, *day, &slot.day)?;
        wrote |= fill_one(doc, *time, &slot.time)?;
    }
    Ok(if wrote {
        FillOutcome::filled()
    } else {
        FillOutcome::skipped(SkipReason::NoMatchingOption)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize) -> String {
        format!(
            r#"<select name="day{n}"><option value="">Day</option><option value="mon">Monday</option>
                 <option value="tue">Tuesday</option><option value="wed">Wednesday</option></select>
               <select name="time{n}"><option value="">Time</option><option value="m">Morning</option>
                 <option value="a">Afternoon</option><option value="e">Evening</option></select>"#
        )
    }

    fn selected(doc: &Document, name: &str) -> String {
        let select = doc
            .find(doc.root(), |doc, id| doc.attr(id, "name") == Some(name))
            .unwrap();
        doc.value(select).unwrap()
    }

    #[test]
    fn selects_are_classified_by_vocabulary() {
        let doc = Document::parse_html(&format!(r#"<div id="q">{}</div>"#, row(0)));
        let selects = doc.elements_by_tag(doc.root(), "select");
        assert_eq!(classify(&doc, selects[0]), DropdownRole::Day);
        assert_eq!(classify(&doc, selects[1]), DropdownRole::Time);
    }

    #[test]
    fn extra_slots_are_dropped() {
        let mut doc =
            Document::parse_html(&format!(r#"<div id="q">{}{}</div>"#, row(0), row(1)));
        let q = doc.element_by_id("q").unwrap();
        let slots = vec![
            AvailabilitySlot::new("Monday", "Morning"),
            AvailabilitySlot::new("Tuesday", "Evening"),
            AvailabilitySlot::new("Wednesday", "Afternoon"),
        ];
        assert!(fill(&mut doc, q, &slots).unwrap().is_filled());
        assert_eq!(selected(&doc, "day0"), "mon");
        assert_eq!(selected(&doc, "time0"), "m");
        assert_eq!(selected(&doc, "day1"), "tue");
        assert_eq!(selected(&doc, "time1"), "e");
    }

    #[test]
    fn extra_pairs_are_untouched() {
        let mut doc =
            Document::parse_html(&format!(r#"<div id="q">{}{}</div>"#, row(0), row(1)));
        let q = doc.element_by_id("q").unwrap();
        let slots = vec![AvailabilitySlot::new("wed", "afternoon")];
        fill(&mut doc, q, &slots).unwrap();
        assert_eq!(selected(&doc, "day0"), "wed");
        assert_eq!(selected(&doc, "time0"), "a");
        let day1 = doc
            .find(q, |doc, id| doc.attr(id, "name") == Some("day1"))
            .unwrap();
        assert_eq!(doc.selected_option(day1), None);
    }

    #[test]
    fn second_pass_finds_everything_filled() {
        let mut doc = Document::parse_html(&format!(r#"<div id="q">{}</div>"#, row(0)));
        let q = doc.element_by_id("q").unwrap();
        let slots = vec![AvailabilitySlot::new("Monday", "Morning")];
        assert!(fill(&mut doc, q, &slots).unwrap().is_filled());
        assert_eq!(
            fill(&mut doc, q, &slots).unwrap().skip_reason(),
            Some(SkipReason::AlreadyFilled)
        );
    }
}
