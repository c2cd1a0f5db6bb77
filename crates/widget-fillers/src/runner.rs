use field_catalog::WidgetKind;
use field_resolver::{Resolution, ResolvedValue};
use page_dom::{Document, NodeId};
use tracing::{debug, instrument};

use crate::errors::FillError;
use crate::model::FillOutcome;
use crate::policy::FillPolicy;
use crate::{agreement, availability, choice, combobox, date, experience, radio, select, text};

fn text_value<'a>(widget: &WidgetKind, value: &'a ResolvedValue) -> Result<&'a str, FillError> {
    value.as_text().ok_or(FillError::ValueShape {
        widget: widget.label(),
        found: "slot list",
    })
}

/// Dispatches a resolved question to the filler for its widget kind.
#[instrument(skip_all, fields(field = %resolution.field(), widget = resolution.widget().label()))]
pub fn fill(
    doc: &mut Document,
    question: NodeId,
    resolution: &Resolution,
    policy: &FillPolicy,
) -> Result<FillOutcome, FillError> {
    let widget = resolution.widget();
    let value = &resolution.value;
    let outcome = match widget {
        WidgetKind::Text => text::fill(doc, question, text_value(&widget, value)?)?,
        WidgetKind::Select(aliases) => {
            select::fill(doc, question, text_value(&widget, value)?, aliases, policy)?
        }
        WidgetKind::Radio(aliases) => {
            radio::fill(doc, question, text_value(&widget, value)?, aliases, policy)?
        }
        WidgetKind::Date => date::fill(doc, question, text_value(&widget, value)?)?,
        WidgetKind::Combobox => combobox::fill(doc, question, text_value(&widget, value)?, policy)?,
        WidgetKind::ExperienceRange => {
            experience::fill(doc, question, text_value(&widget, value)?)?
        }
        WidgetKind::AvailabilityPairs => match value {
            ResolvedValue::Slots(slots) => availability::fill(doc, question, slots)?,
            ResolvedValue::Text(_) => {
                return Err(FillError::ValueShape {
                    widget: widget.label(),
                    found: "text",
                })
            }
        },
        WidgetKind::Agreement => agreement::fill(doc, question)?,
        WidgetKind::Choice => choice::fill(doc, question, text_value(&widget, value)?, policy)?,
    };
    debug!(status = ?outcome.status, "fill finished");
    Ok(outcome)
}
