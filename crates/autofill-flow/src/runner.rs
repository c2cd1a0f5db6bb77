use autofiller_core_types::TriggerSource;
use field_catalog::ProfileRecord;
use field_resolver::extract_label;
use page_dom::{Document, EventKind, NodeId};
use tracing::{debug, info, instrument, warn};
use widget_fillers::{DeferredBlur, FillStatus};

use crate::api::AutofillEngine;
use crate::model::{FieldFailure, PassReport, QuestionRecord, QuestionStatus};
use crate::{direct, side};

/// Question wrappers in document order. A wrapper nested inside another
/// matching node wins over its container.
pub(crate) fn question_nodes(doc: &Document, markers: &[String]) -> Vec<NodeId> {
    let marked = |doc: &Document, id: NodeId| {
        markers
            .iter()
            .any(|marker| doc.class_contains(id, marker))
    };
    let all = doc.find_all(doc.root(), marked);
    all.iter()
        .copied()
        .filter(|node| {
            !all.iter()
                .any(|other| other != node && doc.has_ancestor(*other, *node))
        })
        .collect()
}

pub(crate) async fn run_pass(engine: &AutofillEngine, trigger: TriggerSource) -> PassReport {
    execute(engine, PassReport::new(trigger)).await
}

#[instrument(skip_all, fields(pass = %report.pass_id, trigger = %report.trigger))]
async fn execute(engine: &AutofillEngine, mut report: PassReport) -> PassReport {
    let profile = match engine.profile.snapshot().await {
        Ok(profile) => profile,
        Err(err) => {
            warn!(error = %err, "profile unavailable, nothing filled");
            report.failures.push(FieldFailure {
                label: String::new(),
                field: None,
                error: err.to_string(),
            });
            return report;
        }
    };
    let settings = profile.settings();

    let mut deferred = Vec::new();
    {
        let mut doc = engine.page.lock();
        let questions = question_nodes(&doc, &engine.policy.question_markers);
        debug!(questions = questions.len(), "question nodes collected");
        for question in questions {
            let record = fill_question(
                engine,
                &mut doc,
                question,
                &profile,
                &mut report.failures,
                &mut deferred,
            );
            report.questions.push(record);
        }
        report.direct_filled = direct::fill_direct_fields(
            &mut doc,
            &profile,
            &engine.resolver,
            &engine.policy.fill,
            &mut report.failures,
        );
        report.side_answered = side::answer_side_questions(&mut doc, &settings);
    }

    if let Some(delay) = deferred.iter().map(|blur| blur.delay).max() {
        tokio::time::sleep(delay).await;
        let mut doc = engine.page.lock();
        for blur in &deferred {
            if let Err(err) = doc.dispatch(blur.target, EventKind::Blur) {
                warn!(error = %err, "deferred blur failed");
            }
        }
    }

    report.filled = report.question_filled() + report.direct_filled;
    info!(
        filled = report.filled,
        questions = report.questions.len(),
        direct = report.direct_filled,
        side = report.side_answered,
        failures = report.failures.len(),
        "autofill pass finished"
    );
    if settings.show_notification && report.filled > 0 {
        engine.notifier.notify(report.filled).await;
    }
    report
}

fn fill_question(
    engine: &AutofillEngine,
    doc: &mut Document,
    question: NodeId,
    profile: &ProfileRecord,
    failures: &mut Vec<FieldFailure>,
    deferred: &mut Vec<DeferredBlur>,
) -> QuestionRecord {
    let Some((source, label)) = extract_label(doc, question) else {
        debug!(?question, "question has no label");
        return QuestionRecord {
            label: None,
            field: None,
            status: QuestionStatus::NoLabel,
        };
    };
    let Some(resolution) = engine.resolver.resolve(&label, profile) else {
        debug!(label = %label, source = source.name(), "no catalog entry with a value");
        return QuestionRecord {
            label: Some(label),
            field: None,
            status: QuestionStatus::Unresolved,
        };
    };
    let field = resolution.field();
    let status = match widget_fillers::fill(doc, question, &resolution, &engine.policy.fill) {
        Ok(outcome) => {
            deferred.extend(outcome.deferred);
            match outcome.status {
                FillStatus::Filled => QuestionStatus::Filled,
                FillStatus::Skipped(reason) => QuestionStatus::Skipped(reason),
            }
        }
        Err(err) => {
            warn!(label = %label, field = %field, error = %err, "question fill failed");
            failures.push(FieldFailure {
                label: label.clone(),
                field: Some(field),
                error: err.to_string(),
            });
            QuestionStatus::Failed
        }
    };
    QuestionRecord {
        label: Some(label),
        field: Some(field),
        status,
    }
}
