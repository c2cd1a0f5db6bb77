use page_dom::{Document, NodeId};

use crate::errors::FillError;
use crate::model::FillOutcome;
use crate::policy::FillPolicy;
use crate::{radio, select, text};

/// Fills whatever the question renders: a select, else a radio group, else
/// a text input.
pub fn fill(
    doc: &mut Document,
    question: NodeId,
    value: &str,
    policy: &FillPolicy,
) -> Result<FillOutcome, FillError> {
    if select::locate(doc, question).is_some() {
        return select::fill(doc, question, value, None, policy);
    }
    if doc.find(question, |doc, id| doc.is_radio(id)).is_some() {
        return radio::fill(doc, question, value, None, policy);
    }
    text::fill(doc, question, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hear_about_us_select_picks_indeed() {
        let mut doc = Document::parse_html(
            r#"<div id="q"><select><option value="">Select</option>
               <option value="li">LinkedIn</option><option value="in">Indeed</option>
               <option value="ref">Referral</option></select></div>"#,
        );
        let q = doc.element_by_id("q").unwrap();
        assert!(fill(&mut doc, q, "Indeed.com", &FillPolicy::default())
            .unwrap()
            .is_filled());
        let select = select::locate(&doc, q).unwrap();
        assert_eq!(doc.value(select).unwrap(), "in");
    }

    #[test]
    fn radio_then_text() {
        let mut doc = Document::parse_html(
            r#"<div id="q"><label><input type="radio" name="w" value="r">Remote</label>
               <label><input type="radio" name="w" value="n">No preference</label></div>
               <div id="t"><input type="text"></div>"#,
        );
        let q = doc.element_by_id("q").unwrap();
        fill(&mut doc, q, "no preference", &FillPolicy::default()).unwrap();
        let checked = doc
            .find(q, |doc, id| doc.is_radio(id) && doc.checked(id))
            .unwrap();
        assert_eq!(doc.attr(checked, "value"), Some("n"));

        let t = doc.element_by_id("t").unwrap();
        assert!(fill(&mut doc, t, "Indeed.com", &FillPolicy::default())
            .unwrap()
            .is_filled());
    }
}
