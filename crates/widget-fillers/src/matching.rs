use field_catalog::AliasTable;
use page_dom::{normalize_text, Document, NodeId};

/// A choosable control: a radio button or a select option.
#[derive(Clone, Debug)]
pub(crate) struct Candidate {
    pub node: NodeId,
    pub value: String,
    /// Normalized (lowercase) label text.
    pub label: String,
}

pub(crate) fn radio_candidates(doc: &Document, question: NodeId) -> Vec<Candidate> {
    doc.find_all(question, |doc, id| doc.is_radio(id))
        .into_iter()
        .map(|node| Candidate {
            node,
            value: doc.attr(node, "value").unwrap_or_default().to_string(),
            label: doc.label_text(node),
        })
        .collect()
}

pub(crate) fn option_candidates(doc: &Document, select: NodeId) -> Vec<Candidate> {
    doc.options(select)
        .into_iter()
        .map(|opt| Candidate {
            node: opt.node,
            value: opt.value,
            label: normalize_text(&opt.label),
        })
        .collect()
}

fn reverse_contains(candidate: &Candidate, target_lower: &str, min_len: usize) -> bool {
    candidate.label.len() >= min_len && target_lower.contains(candidate.label.as_str())
}

fn alias_match(candidates: &[Candidate], target: &str, aliases: Option<AliasTable>) -> Option<NodeId> {
    let phrase = aliases?.alias_for(target)?;
    candidates
        .iter()
        .find(|c| phrase.matches(&c.label))
        .map(|c| c.node)
}

/// Option lookup, one pass per rule: exact value, value ignoring case,
/// label containing the value, label contained in the value, alias phrases.
/// A demographic code or name goes to the alias phrases before any label
/// rule, so "male" never lands on "female".
pub(crate) fn match_option(
    candidates: &[Candidate],
    target: &str,
    aliases: Option<AliasTable>,
    min_len: usize,
) -> Option<NodeId> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    let lower = target.to_lowercase();
    let real: Vec<Candidate> = candidates
        .iter()
        .filter(|c| !c.value.trim().is_empty())
        .cloned()
        .collect();
    let by_value = real
        .iter()
        .find(|c| c.value == target)
        .or_else(|| real.iter().find(|c| c.value.eq_ignore_ascii_case(target)))
        .map(|c| c.node);
    if by_value.is_some() {
        return by_value;
    }
    let by_label = || {
        real.iter()
            .find(|c| c.label.contains(lower.as_str()))
            .or_else(|| real.iter().find(|c| reverse_contains(c, &lower, min_len)))
            .map(|c| c.node)
    };
    if is_coded(target, aliases) {
        alias_match(&real, target, aliases).or_else(by_label)
    } else {
        by_label().or_else(|| alias_match(&real, target, aliases))
    }
}

fn is_coded(target: &str, aliases: Option<AliasTable>) -> bool {
    aliases.and_then(|table| table.alias_for(target)).is_some()
}

fn is_yes_no(lower: &str) -> bool {
    lower == "yes" || lower == "no"
}

/// `label` is the answer word itself or starts with it ("no, i do not").
fn leads_with(label: &str, word: &str) -> bool {
    label == word
        || label
            .strip_prefix(word)
            .and_then(|rest| rest.chars().next())
            .map(|next| !next.is_alphanumeric())
            .unwrap_or(false)
}

/// Radio lookup: a direct pass over value and label, then alias phrases,
/// then an exact raw-value match.
///
/// When the target is a demographic code or name of the question's alias
/// table the alias phrases run first and the direct pass ignores raw values,
/// since page values do not follow the profile's encoding.
pub(crate) fn match_radio(
    candidates: &[Candidate],
    target: &str,
    aliases: Option<AliasTable>,
    min_len: usize,
) -> Option<NodeId> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    let lower = target.to_lowercase();
    let coded = is_coded(target, aliases);
    if coded {
        if let Some(node) = alias_match(candidates, target, aliases) {
            return Some(node);
        }
    }

    let direct = candidates.iter().find(|c| {
        if !coded && c.value.eq_ignore_ascii_case(target) {
            return true;
        }
        if is_yes_no(&lower) {
            return c.value.eq_ignore_ascii_case(&lower) || leads_with(&c.label, &lower);
        }
        c.label.contains(lower.as_str()) || reverse_contains(c, &lower, min_len)
    });

    direct
        .map(|c| c.node)
        .or_else(|| (!coded).then(|| alias_match(candidates, target, aliases)).flatten())
        .or_else(|| {
            target
                .parse::<f64>()
                .ok()
                .and_then(|_| candidates.iter().find(|c| c.value == target))
                .map(|c| c.node)
        })
}
