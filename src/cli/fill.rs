use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use autofill_flow::{AutofillEngine, PassReport, QuestionStatus};
use autofiller_core_types::TriggerSource;
use clap::Args;
use page_dom::Document;
use parking_lot::Mutex;
use tracing::{info, warn};
use url::Url;

use super::context::CliContext;
use super::output::{print_json, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct FillArgs {
    /// Saved application page (HTML)
    #[arg(long, value_name = "FILE")]
    pub page: PathBuf,

    /// Profile file (JSON or YAML); defaults to the configured profile
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Where to write the page with the filled-in state
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// URL the page was saved from
    #[arg(long)]
    pub url: Option<String>,

    /// Render the fill-count toast into the written page
    #[arg(long)]
    pub toast: bool,
}

pub async fn cmd_fill(args: FillArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let markup = tokio::fs::read_to_string(&args.page)
        .await
        .with_context(|| format!("Failed to read page {}", args.page.display()))?;
    let mut document = Document::parse_html(&markup);

    let policy = ctx.config().policy();
    if let Some(raw) = &args.url {
        let url = Url::parse(raw).with_context(|| format!("Invalid page URL {raw}"))?;
        if !url.host_str().map(|h| policy.host_supported(h)).unwrap_or(false) {
            warn!(url = %url, "page host is not in supported_hosts; filling anyway");
        }
        document.set_url(url.as_str());
    }

    let profile = ctx.profile_store(args.profile.as_deref());
    // An explicit profile that cannot be read is an error, not an empty pass.
    if args.profile.is_some() {
        profile.snapshot().await.context("Failed to load profile")?;
    }

    let page = Arc::new(Mutex::new(document));
    let mut builder = AutofillEngine::builder(page.clone(), profile).with_policy(policy);
    if args.toast {
        builder = builder.with_page_toast();
    }
    let engine = builder.build();
    let report = engine.run_pass(TriggerSource::Manual).await;

    if let Some(out) = &args.out {
        let html = page.lock().to_html();
        tokio::fs::write(out, html)
            .await
            .with_context(|| format!("Failed to write {}", out.display()))?;
        info!(path = %out.display(), "filled page written");
    }

    match output {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Human => {
            print_human(&report);
            Ok(())
        }
    }
}

fn status_label(status: &QuestionStatus) -> String {
    match status {
        QuestionStatus::Filled => "filled".to_string(),
        QuestionStatus::Skipped(reason) => format!("skipped ({reason:?})"),
        QuestionStatus::NoLabel => "no label".to_string(),
        QuestionStatus::Unresolved => "unresolved".to_string(),
        QuestionStatus::Failed => "failed".to_string(),
    }
}

fn print_human(report: &PassReport) {
    println!(
        "Filled {} field(s): {} question(s), {} direct; {} side question(s) answered",
        report.filled,
        report.question_filled(),
        report.direct_filled,
        report.side_answered
    );
    for question in &report.questions {
        let label = question.label.as_deref().unwrap_or("<no label>");
        match question.field {
            Some(field) => println!("  {:<14} {label} -> {field}", status_label(&question.status)),
            None => println!("  {:<14} {label}", status_label(&question.status)),
        }
    }
    for failure in &report.failures {
        println!("  error          {}: {}", failure.label, failure.error);
    }
}
