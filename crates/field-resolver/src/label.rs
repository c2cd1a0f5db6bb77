//! Label Extractor.
//!
//! Sources are tried in a fixed order:
//! 1. TestId - an element whose `data-testid` contains `-label`, read through
//!    its `safe-markup` child when present
//! 2. AriaLabelledBy - the element referenced by an `aria-labelledby` inside
//!    the question
//! 3. Label - `<label>` text, preferring its `safe-markup` child; labels of
//!    individual radio or checkbox options are not question prompts
//! 4. Legend - the `<legend>` of a grouped control
//! 5. CheckboxLabel - the label of a lone checkbox, for consent-style
//!    questions that carry no other prompt

use page_dom::{normalize_text, Document, NodeId};
use serde::Serialize;
use tracing::trace;

const SAFE_MARKUP: &str = "safe-markup";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelSource {
    TestId,
    AriaLabelledBy,
    Label,
    Legend,
    CheckboxLabel,
}

impl LabelSource {
    pub fn fallback_chain() -> [LabelSource; 5] {
        [
            LabelSource::TestId,
            LabelSource::AriaLabelledBy,
            LabelSource::Label,
            LabelSource::Legend,
            LabelSource::CheckboxLabel,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LabelSource::TestId => "test-id",
            LabelSource::AriaLabelledBy => "aria-labelledby",
            LabelSource::Label => "label",
            LabelSource::Legend => "legend",
            LabelSource::CheckboxLabel => "checkbox-label",
        }
    }

    /// Candidate texts from this source, in document order.
    fn candidates(&self, doc: &Document, question: NodeId) -> Vec<String> {
        match self {
            LabelSource::TestId => doc
                .find_all(question, |doc, id| {
                    doc.attr(id, "data-testid")
                        .map(|testid| testid.contains("-label"))
                        .unwrap_or(false)
                })
                .into_iter()
                .map(|holder| safe_markup_text(doc, holder).unwrap_or_else(|| doc.text_content(holder)))
                .collect(),
            LabelSource::AriaLabelledBy => doc
                .find_all(question, |doc, id| doc.attr(id, "aria-labelledby").is_some())
                .into_iter()
                .filter_map(|node| doc.attr(node, "aria-labelledby"))
                .flat_map(|ids| ids.split_whitespace().collect::<Vec<_>>())
                .filter_map(|id_attr| doc.element_by_id(id_attr))
                .map(|target| doc.text_content(target))
                .collect(),
            LabelSource::Label => {
                let labels: Vec<NodeId> = doc
                    .elements_by_tag(question, "label")
                    .into_iter()
                    .filter(|label| !is_option_label(doc, *label))
                    .collect();
                let marked = labels
                    .iter()
                    .filter_map(|label| safe_markup_text(doc, *label));
                let plain = labels.iter().map(|label| doc.text_content(*label));
                marked.chain(plain).collect()
            }
            LabelSource::Legend => doc
                .elements_by_tag(question, "legend")
                .into_iter()
                .map(|legend| doc.text_content(legend))
                .collect(),
            LabelSource::CheckboxLabel => {
                let boxes = doc.find_all(question, |doc, id| doc.is_checkbox(id));
                match boxes.as_slice() {
                    [only] => vec![doc.label_text(*only)],
                    _ => Vec::new(),
                }
            }
        }
    }
}

fn is_choice(doc: &Document, id: NodeId) -> bool {
    doc.is_radio(id) || doc.is_checkbox(id)
}

fn is_option_label(doc: &Document, label: NodeId) -> bool {
    let targets_choice = doc
        .attr(label, "for")
        .and_then(|target| doc.element_by_id(target))
        .map(|target| is_choice(doc, target))
        .unwrap_or(false);
    targets_choice || doc.find(label, is_choice).is_some()
}

fn safe_markup_text(doc: &Document, holder: NodeId) -> Option<String> {
    doc.find(holder, |doc, id| doc.attr(id, "data-testid") == Some(SAFE_MARKUP))
        .map(|markup| doc.text_content(markup))
}

/// Normalized prompt text for a question node, `None` when no source yields
/// any text.
pub fn extract_label(doc: &Document, question: NodeId) -> Option<(LabelSource, String)> {
    for source in LabelSource::fallback_chain() {
        let found = source
            .candidates(doc, question)
            .iter()
            .map(|raw| normalize_text(raw))
            .find(|text| !text.is_empty());
        if let Some(text) = found {
            trace!(source = source.name(), label = %text, "label extracted");
            return Some((source, text));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(markup: &str) -> (Document, NodeId) {
        let doc = Document::parse_html(markup);
        let node = doc
            .find(doc.root(), |doc, id| doc.class_contains(id, "Questions-item"))
            .unwrap();
        (doc, node)
    }

    #[test]
    fn test_id_label_wins() {
        let (doc, node) = question(
            r#"<div class="ia-Questions-item">
                 <label>Fallback</label>
                 <div data-testid="input-q_1-label"><span data-testid="safe-markup">  What is your
                   Phone Number? </span><span>*</span></div>
               </div>"#,
        );
        let (source, text) = extract_label(&doc, node).unwrap();
        assert_eq!(source, LabelSource::TestId);
        assert_eq!(text, "what is your phone number?");
    }

    #[test]
    fn aria_labelledby_is_followed() {
        let (doc, node) = question(
            r#"<div class="Questions-item">
                 <span id="q7">Veteran Status</span>
                 <div role="radiogroup" aria-labelledby="q7"></div>
               </div>"#,
        );
        assert_eq!(
            extract_label(&doc, node),
            Some((LabelSource::AriaLabelledBy, "veteran status".to_string()))
        );
    }

    #[test]
    fn label_prefers_safe_markup_then_plain_text() {
        let (doc, node) = question(
            r#"<div class="Questions-item">
                 <label for="a">City <span data-testid="safe-markup">City, State</span></label>
               </div>"#,
        );
        assert_eq!(extract_label(&doc, node).unwrap().1, "city, state");

        let (doc, node) = question(
            r#"<div class="Questions-item"><label for="b">  Zip Code </label></div>"#,
        );
        assert_eq!(extract_label(&doc, node).unwrap().1, "zip code");
    }

    #[test]
    fn legend_for_grouped_controls() {
        let (doc, node) = question(
            r#"<div class="Questions-item"><fieldset><legend>Gender</legend>
                 <input type="radio" name="g" value="1"></fieldset></div>"#,
        );
        assert_eq!(
            extract_label(&doc, node),
            Some((LabelSource::Legend, "gender".to_string()))
        );
    }

    #[test]
    fn option_labels_are_not_prompts() {
        let (doc, node) = question(
            r#"<div class="Questions-item"><fieldset>
                 <legend>Do you require sponsorship?</legend>
                 <label><input type="radio" name="s" value="1">Yes</label>
                 <input type="radio" name="s" id="s-no" value="0"><label for="s-no">No</label>
               </fieldset></div>"#,
        );
        assert_eq!(
            extract_label(&doc, node),
            Some((LabelSource::Legend, "do you require sponsorship?".to_string()))
        );
    }

    #[test]
    fn empty_sources_are_skipped() {
        let (doc, node) = question(
            r#"<div class="Questions-item"><label>   </label><legend>Email</legend></div>"#,
        );
        assert_eq!(extract_label(&doc, node).unwrap().1, "email");

        let (doc, node) = question(
            r#"<div class="Questions-item"><label><input type="checkbox">I Agree to the terms</label></div>"#,
        );
        assert_eq!(
            extract_label(&doc, node),
            Some((LabelSource::CheckboxLabel, "i agree to the terms".to_string()))
        );

        let (doc, node) = question(r#"<div class="Questions-item"><input></div>"#);
        assert_eq!(extract_label(&doc, node), None);
    }
}
