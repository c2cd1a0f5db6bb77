use page_dom::{Document, EventKind, NodeId};

use crate::commit::control_empty;
use crate::errors::FillError;
use crate::model::{DeferredBlur, FillOutcome, SkipReason};
use crate::policy::FillPolicy;

/// The autocomplete input: `role="combobox"` or `aria-autocomplete` first,
/// otherwise the first text-like input.
pub fn locate(doc: &Document, question: NodeId) -> Option<NodeId> {
    doc.find(question, |doc, id| {
        doc.is_text_like(id)
            && (doc.attr(id, "role") == Some("combobox") || doc.attr(id, "aria-autocomplete").is_some())
    })
    .or_else(|| doc.find(question, |doc, id| doc.is_text_like(id)))
}

/// Types `value` into the combobox: native write, `focus`, then an `input`
/// event carrying the text. The closing `blur` is returned as deferred so the
/// widget's suggestion list can settle first.
pub fn fill(
    doc: &mut Document,
    question: NodeId,
    value: &str,
    policy: &FillPolicy,
) -> Result<FillOutcome, FillError> {
    let Some(input) = locate(doc, question) else {
        return Ok(FillOutcome::skipped(SkipReason::NoControl));
    };
    if !control_empty(doc, input)? {
        return Ok(FillOutcome::skipped(SkipReason::AlreadyFilled));
    }
    doc.set_value(input, value)?;
    doc.dispatch(input, EventKind::Focus)?;
    doc.dispatch(
        input,
        EventKind::Input {
            data: Some(value.to_string()),
        },
    )?;
    Ok(FillOutcome::filled().with_deferred(DeferredBlur {
        target: input,
        delay: policy.combobox_blur_delay(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn blur_is_deferred() {
        let mut doc = Document::parse_html(
            r#"<div id="q"><label>City, State</label>
               <input name="loc" role="combobox" aria-autocomplete="list"></div>"#,
        );
        let q = doc.element_by_id("q").unwrap();
        let outcome = fill(&mut doc, q, "Austin, TX", &FillPolicy::default()).unwrap();
        assert!(outcome.is_filled());
        let blur = outcome.deferred.unwrap();
        assert_eq!(blur.delay, Duration::from_millis(150));
        assert_eq!(doc.value(blur.target).unwrap(), "Austin, TX");
        let kinds: Vec<&str> = doc.events().iter().map(|e| e.kind.name()).collect();
        assert_eq!(kinds, vec!["focus", "input"]);
        assert_eq!(
            doc.events()[1].kind,
            EventKind::Input {
                data: Some("Austin, TX".to_string())
            }
        );
    }

    #[test]
    fn typed_value_is_kept() {
        let mut doc = Document::parse_html(
            r#"<div id="q"><input role="combobox" value="Dallas, TX"></div>"#,
        );
        let q = doc.element_by_id("q").unwrap();
        let outcome = fill(&mut doc, q, "Austin, TX", &FillPolicy::default()).unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::AlreadyFilled));
        assert!(outcome.deferred.is_none());
    }
}
