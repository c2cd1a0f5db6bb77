//! Direct Field Fallback: bare controls matched by `name`/`id` hints.

use field_catalog::{ProfileRecord, SemanticField, Settings};
use field_resolver::FieldResolver;
use page_dom::{Document, NodeId};
use tracing::{debug, warn};
use widget_fillers::{select, text, FillError, FillOutcome, FillPolicy};

use crate::model::FieldFailure;

struct DirectRule {
    hints: &'static [&'static str],
    exclude: &'static [&'static str],
    field: SemanticField,
    select_only: bool,
}

const RULES: &[DirectRule] = &[
    DirectRule {
        hints: &["phone"],
        exclude: &[],
        field: SemanticField::Phone,
        select_only: false,
    },
    DirectRule {
        hints: &["address"],
        exclude: &["email"],
        field: SemanticField::Address,
        select_only: false,
    },
    DirectRule {
        hints: &["city"],
        exclude: &["ethnicity"],
        field: SemanticField::City,
        select_only: false,
    },
    DirectRule {
        hints: &["state"],
        exclude: &[],
        field: SemanticField::State,
        select_only: true,
    },
    DirectRule {
        hints: &["zip", "postal"],
        exclude: &[],
        field: SemanticField::ZipCode,
        select_only: false,
    },
    DirectRule {
        hints: &["yourname", "your_name"],
        exclude: &[],
        field: SemanticField::FullName,
        select_only: false,
    },
    DirectRule {
        hints: &["todaydate", "today_date"],
        exclude: &[],
        field: SemanticField::TodayDate,
        select_only: false,
    },
];

impl DirectRule {
    fn applies(&self, doc: &Document, control: NodeId) -> bool {
        if self.select_only && !doc.is_tag(control, "select") {
            return false;
        }
        let names: Vec<String> = ["name", "id"]
            .iter()
            .filter_map(|attr| doc.attr(control, attr))
            .map(str::to_ascii_lowercase)
            .collect();
        names
            .iter()
            .any(|name| self.hints.iter().any(|hint| name.contains(hint)))
            && !names
                .iter()
                .any(|name| self.exclude.iter().any(|ex| name.contains(ex)))
    }

    fn value(
        &self,
        profile: &ProfileRecord,
        settings: &Settings,
        resolver: &FieldResolver,
    ) -> Option<String> {
        match self.field {
            SemanticField::FullName if !settings.fill_demographics => None,
            SemanticField::TodayDate => settings.auto_fill_date.then(|| resolver.today()),
            field => profile.field_text(field),
        }
    }
}

/// Controls the fallback may write: selects, textareas and text-like inputs.
fn fillable(doc: &Document, id: NodeId) -> bool {
    doc.is_tag(id, "select") || doc.is_text_like(id)
}

fn apply(
    doc: &mut Document,
    control: NodeId,
    value: &str,
    policy: &FillPolicy,
) -> Result<FillOutcome, FillError> {
    if doc.is_tag(control, "select") {
        select::fill_select(doc, control, value, None, policy)
    } else {
        text::fill_control(doc, control, value)
    }
}

/// Returns the number of controls filled. Only empty controls are touched.
pub(crate) fn fill_direct_fields(
    doc: &mut Document,
    profile: &ProfileRecord,
    resolver: &FieldResolver,
    policy: &FillPolicy,
    failures: &mut Vec<FieldFailure>,
) -> usize {
    let settings = profile.settings();
    let controls = doc.find_all(doc.root(), fillable);
    let mut filled = 0;
    for control in controls {
        let rules: Vec<&DirectRule> = RULES
            .iter()
            .filter(|rule| rule.applies(doc, control))
            .collect();
        for rule in rules {
            let Some(value) = rule.value(profile, &settings, resolver) else {
                continue;
            };
            match apply(doc, control, &value, policy) {
                Ok(outcome) if outcome.is_filled() => {
                    debug!(field = %rule.field, ?control, "direct field filled");
                    filled += 1;
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(field = %rule.field, error = %err, "direct field fill failed");
                    failures.push(FieldFailure {
                        label: doc
                            .attr(control, "name")
                            .or_else(|| doc.attr(control, "id"))
                            .unwrap_or_default()
                            .to_string(),
                        field: Some(rule.field),
                        error: err.to_string(),
                    });
                    break;
                }
            }
        }
    }
    filled
}
