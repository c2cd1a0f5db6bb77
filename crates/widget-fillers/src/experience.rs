//! Years-of-experience questions rendered as ranged choices.

use page_dom::{Document, NodeId};
use tracing::debug;

use crate::commit::{commit, select_populated};
use crate::errors::FillError;
use crate::matching::{option_candidates, radio_candidates, Candidate};
use crate::model::{FillOutcome, SkipReason};
use crate::radio::{check, group_answered};
use crate::text::fill_control;

/// What a range option label claims about a year count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeBand {
    /// "None", "No experience", "0".
    Zero,
    /// "Less than N": strictly below N.
    LessThan(u32),
    /// "N+", "N or more": at or above N.
    AtLeast(u32),
    /// "N-M", "N–M", "N to M", or a bare "N years": inclusive.
    Between(u32, u32),
}

impl RangeBand {
    pub fn parse(label: &str) -> Option<RangeBand> {
        let label = label.to_lowercase();
        let nums = numbers(&label);
        let first = nums.first().copied();

        if label.contains("less than") || label.contains("under ") || label.contains('<') {
            return first.map(RangeBand::LessThan);
        }
        if let Some(n) = first {
            if label.contains('+')
                || label.contains("or more")
                || label.contains("at least")
                || label.contains("or above")
            {
                return Some(RangeBand::AtLeast(n));
            }
            if label.contains("more than") {
                return Some(RangeBand::AtLeast(n.saturating_add(1)));
            }
            if nums.len() >= 2
                && (label.contains('-') || label.contains('–') || label.contains(" to "))
            {
                return Some(RangeBand::Between(nums[0], nums[1]));
            }
            return Some(if n == 0 {
                RangeBand::Zero
            } else {
                RangeBand::Between(n, n)
            });
        }
        if label.contains("none") || label.contains("no experience") {
            return Some(RangeBand::Zero);
        }
        None
    }

    pub fn contains(&self, years: u32) -> bool {
        match *self {
            RangeBand::Zero => years == 0,
            RangeBand::LessThan(n) => years < n,
            RangeBand::AtLeast(n) => years >= n,
            RangeBand::Between(lo, hi) => (lo..=hi).contains(&years),
        }
    }

    fn lower_bound(&self) -> u32 {
        match *self {
            RangeBand::Zero | RangeBand::LessThan(_) => 0,
            RangeBand::AtLeast(n) => n,
            RangeBand::Between(lo, _) => lo,
        }
    }
}

fn numbers(label: &str) -> Vec<u32> {
    label
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse().ok())
        .collect()
}

/// Leading whole number of a profile answer: `"5"`, `"5 years"`, `"2.5"`.
pub fn parse_years(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Picks the option for `years`.
///
/// Zero prefers a literal none/0 option. Otherwise, among options whose band
/// contains `years`, the one with the greatest lower bound wins (first on
/// ties), so `5` lands on "5+" rather than "3-5". With nothing matching and
/// `years > 0`, the highest "N+" option is used.
pub fn choose(labels: &[String], years: u32) -> Option<usize> {
    let bands: Vec<Option<RangeBand>> = labels.iter().map(|l| RangeBand::parse(l)).collect();

    if years == 0 {
        if let Some(idx) = bands.iter().position(|b| *b == Some(RangeBand::Zero)) {
            return Some(idx);
        }
    }

    let mut best: Option<(usize, u32)> = None;
    for (idx, band) in bands.iter().enumerate() {
        let Some(band) = band else { continue };
        if !band.contains(years) {
            continue;
        }
        let bound = band.lower_bound();
        if best.map(|(_, b)| bound > b).unwrap_or(true) {
            best = Some((idx, bound));
        }
    }
    if let Some((idx, _)) = best {
        return Some(idx);
    }

    if years > 0 {
        let mut top: Option<(usize, u32)> = None;
        for (idx, band) in bands.iter().enumerate() {
            if let Some(RangeBand::AtLeast(n)) = band {
                if top.map(|(_, t)| *n > t).unwrap_or(true) {
                    top = Some((idx, *n));
                }
            }
        }
        return top.map(|(idx, _)| idx);
    }
    None
}

fn pick(candidates: &[Candidate], years: u32) -> Option<NodeId> {
    let labels: Vec<String> = candidates.iter().map(|c| c.label.clone()).collect();
    choose(&labels, years).map(|idx| candidates[idx].node)
}

/// Fills a radio group, else a select, else a free-text or number input
/// with the raw answer.
pub fn fill(doc: &mut Document, question: NodeId, value: &str) -> Result<FillOutcome, FillError> {
    let Some(years) = parse_years(value) else {
        debug!(value, "experience answer is not a number");
        return Ok(FillOutcome::skipped(SkipReason::UnparsableValue));
    };

    let radios = radio_candidates(doc, question);
    if !radios.is_empty() {
        if group_answered(doc, question) {
            return Ok(FillOutcome::skipped(SkipReason::AlreadyFilled));
        }
        return match pick(&radios, years) {
            Some(radio) => {
                check(doc, radio)?;
                Ok(FillOutcome::filled())
            }
            None => Ok(FillOutcome::skipped(SkipReason::NoMatchingOption)),
        };
    }

    if let Some(select) = doc.find(question, |doc, id| doc.is_tag(id, "select")) {
        if select_populated(doc, select) {
            return Ok(FillOutcome::skipped(SkipReason::AlreadyFilled));
        }
        let options: Vec<Candidate> = option_candidates(doc, select)
            .into_iter()
            .filter(|c| !c.value.trim().is_empty())
            .collect();
        return match pick(&options, years) {
            Some(option) => {
                doc.select_option(select, option)?;
                commit(doc, select)?;
                Ok(FillOutcome::filled())
            }
            None => Ok(FillOutcome::skipped(SkipReason::NoMatchingOption)),
        };
    }

    match doc.find(question, |doc, id| doc.is_text_like(id)) {
        Some(input) => fill_control(doc, input, &years.to_string()),
        None => Ok(FillOutcome::skipped(SkipReason::NoControl)),
    }
}
