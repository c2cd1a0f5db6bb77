//! Opt-in side questions outside the question wrappers.

use field_catalog::Settings;
use page_dom::{Document, NodeId};
use tracing::{debug, warn};
use widget_fillers::{agreement, radio, FillError};

const TEXT_CONSENT_PHRASES: &[&str] = &["text message", "receive text"];
const PRIVACY_PHRASES: &[&str] = &["read and agree", "acknowledge and consent"];

fn label_has(doc: &Document, control: NodeId, phrases: &[&str]) -> bool {
    let label = doc.label_text(control);
    phrases.iter().any(|phrase| label.contains(phrase))
}

fn unchecked<F>(doc: &Document, kind: F, phrases: &[&str]) -> Vec<NodeId>
where
    F: Fn(&Document, NodeId) -> bool,
{
    doc.find_all(doc.root(), |doc, id| {
        kind(doc, id) && !doc.checked(id) && label_has(doc, id, phrases)
    })
}

/// Answers the text-message consent checkbox and the privacy acknowledgement
/// radio when the matching settings are on. Returns how many were answered.
pub(crate) fn answer_side_questions(doc: &mut Document, settings: &Settings) -> usize {
    let mut answered = 0;
    if settings.text_opt_in {
        for checkbox in unchecked(doc, Document::is_checkbox, TEXT_CONSENT_PHRASES) {
            answered += record(agreement::click_checkbox(doc, checkbox), "text opt-in");
        }
    }
    if settings.privacy_policy {
        for choice in unchecked(doc, Document::is_radio, PRIVACY_PHRASES) {
            // An earlier radio of the same group may have been checked already.
            if doc.checked(choice) {
                continue;
            }
            answered += record(radio::check(doc, choice), "privacy policy");
        }
    }
    answered
}

fn record(result: Result<(), FillError>, question: &'static str) -> usize {
    match result {
        Ok(()) => {
            debug!(question, "side question answered");
            1
        }
        Err(err) => {
            warn!(question, error = %err, "side question failed");
            0
        }
    }
}
