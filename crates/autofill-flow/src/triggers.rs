//! What starts a pass: the explicit "run now" call, the keyboard command,
//! page load/navigation after a settle delay and debounced DOM mutations.

use std::sync::Arc;

use autofiller_core_types::{AutofillError, TriggerSource};
use autofiller_event_bus::{Debouncer, EventBus, InMemoryBus};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::AutofillEngine;
use crate::model::{Ack, PassReport};

/// Keyboard command name bound to a manual pass.
pub const TRIGGER_COMMAND: &str = "trigger-autofill";

const REPORT_CAPACITY: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageEvent {
    /// A keyboard command fired while `url` was the active page.
    Shortcut { command: String, url: String },
    PageLoaded { url: String },
    /// In-page navigation (history push, SPA route change).
    Navigated { url: String },
    /// Nodes carrying these class attributes were inserted.
    DomMutated { classes: Vec<String> },
}

pub struct AutofillHandle {
    engine: Arc<AutofillEngine>,
    events: Arc<InMemoryBus<PageEvent>>,
    reports: Arc<InMemoryBus<PassReport>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl AutofillHandle {
    /// Runs a pass right away and acknowledges once it is done.
    pub async fn autofill_now(&self) -> Ack {
        let report = self.engine.run_pass(TriggerSource::Manual).await;
        publish_report(&self.reports, report);
        Ack { success: true }
    }

    pub async fn publish(&self, event: PageEvent) -> Result<(), AutofillError> {
        self.events.publish(event).await
    }

    pub fn subscribe_reports(&self) -> broadcast::Receiver<PassReport> {
        self.reports.subscribe()
    }

    /// Stop the trigger loop and wait for it to finish.
    pub async fn shutdown(mut self) -> Result<(), tokio::task::JoinError> {
        self.cancel.cancel();
        match self.task.take() {
            Some(task) => match task.await {
                Ok(()) => Ok(()),
                Err(err) if err.is_cancelled() => Ok(()),
                Err(err) => Err(err),
            },
            None => Ok(()),
        }
    }
}

impl Drop for AutofillHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn publish_report(reports: &InMemoryBus<PassReport>, report: PassReport) {
    let pass = report.pass_id.clone();
    if !reports.publish_if_observed(report) {
        debug!(pass = %pass, "pass report not observed");
    }
}

struct TriggerLoop {
    engine: Arc<AutofillEngine>,
    reports: Arc<InMemoryBus<PassReport>>,
    current_url: Option<String>,
    settle: Debouncer,
    mutation: Debouncer,
}

impl TriggerLoop {
    async fn auto_fill_on_load(&self) -> bool {
        match self.engine.profile.snapshot().await {
            Ok(profile) => profile.settings().auto_fill_on_load,
            Err(err) => {
                warn!(error = %err, "profile unavailable, automatic pass skipped");
                false
            }
        }
    }

    fn host_supported(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => parsed
                .host_str()
                .map(|host| self.engine.policy.host_supported(host))
                .unwrap_or(false),
            Err(err) => {
                debug!(url, error = %err, "unparsable page url");
                false
            }
        }
    }

    fn is_dynamic(&self, classes: &[String]) -> bool {
        classes.iter().any(|class| {
            self.engine
                .policy
                .dynamic_markers
                .iter()
                .any(|marker| class.contains(marker.as_str()))
        })
    }

    async fn on_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Shortcut { command, url } => {
                if command != TRIGGER_COMMAND {
                    debug!(command, "ignoring unknown command");
                } else if self.host_supported(&url) {
                    self.run(TriggerSource::Shortcut).await;
                } else {
                    debug!(url, "shortcut on unsupported host");
                }
            }
            PageEvent::PageLoaded { url } => {
                self.current_url = Some(url);
                self.schedule_settle().await;
            }
            PageEvent::Navigated { url } => {
                if self.current_url.as_deref() == Some(url.as_str()) {
                    debug!(url, "navigation to the current url ignored");
                    return;
                }
                self.current_url = Some(url);
                self.schedule_settle().await;
            }
            PageEvent::DomMutated { classes } => {
                if self.is_dynamic(&classes) && self.auto_fill_on_load().await {
                    self.mutation.poke();
                }
            }
        }
    }

    async fn schedule_settle(&mut self) {
        if self.auto_fill_on_load().await {
            let delay = self.engine.policy.settle_delay();
            self.settle.schedule_in(delay);
        }
    }

    async fn run(&self, trigger: TriggerSource) {
        let report = self.engine.run_pass(trigger).await;
        publish_report(&self.reports, report);
    }
}

/// Starts the trigger loop over `events`. Passes it runs are published to
/// [`AutofillHandle::subscribe_reports`].
pub fn spawn_triggers(
    engine: Arc<AutofillEngine>,
    events: Arc<InMemoryBus<PageEvent>>,
) -> AutofillHandle {
    let policy = engine.policy.clone();
    let reports = InMemoryBus::new(REPORT_CAPACITY);
    let mut rx = events.subscribe();
    let cancel = CancellationToken::new();
    let loop_token = cancel.clone();
    let mut state = TriggerLoop {
        engine: Arc::clone(&engine),
        reports: Arc::clone(&reports),
        current_url: None,
        settle: Debouncer::new(policy.settle_delay()),
        mutation: Debouncer::new(policy.mutation_debounce()),
    };

    let task = tokio::spawn(async move {
        info!("autofill triggers started");
        loop {
            tokio::select! {
                _ = loop_token.cancelled() => break,
                received = rx.recv() => match received {
                    Ok(event) => state.on_event(event).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "page events lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = state.settle.fired() => state.run(TriggerSource::PageLoad).await,
                _ = state.mutation.fired() => state.run(TriggerSource::DomMutation).await,
            }
        }
        debug!("autofill triggers stopped");
    });

    AutofillHandle {
        engine,
        events,
        reports,
        cancel,
        task: Some(task),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MemoryProfileStore;
    use field_catalog::ProfileRecord;
    use page_dom::Document;
    use parking_lot::Mutex;
    use std::time::Duration;
    use tokio::time::{timeout, Instant};

    const FORM: &str =
        r#"<div class="ia-Questions-item"><label>Phone number</label><input></div>"#;

    fn handle(profile: ProfileRecord) -> AutofillHandle {
        let page = Arc::new(Mutex::new(Document::parse_html(FORM)));
        let engine =
            AutofillEngine::builder(page, Arc::new(MemoryProfileStore::new(profile))).build();
        spawn_triggers(engine, InMemoryBus::new(16))
    }

    fn on_load() -> ProfileRecord {
        ProfileRecord::new()
            .with("phone", "555-0100")
            .with("autoFillOnLoad", true)
    }

    async fn next_report(rx: &mut broadcast::Receiver<PassReport>) -> Option<PassReport> {
        timeout(Duration::from_secs(10), rx.recv()).await.ok()?.ok()
    }

    #[tokio::test(start_paused = true)]
    async fn run_now_acknowledges() {
        let handle = handle(ProfileRecord::new().with("phone", "555-0100"));
        let mut reports = handle.subscribe_reports();
        assert_eq!(handle.autofill_now().await, Ack { success: true });
        let report = next_report(&mut reports).await.unwrap();
        assert_eq!(report.trigger, TriggerSource::Manual);
        assert_eq!(report.filled, 1);
        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn shortcut_is_host_checked() {
        let handle = handle(ProfileRecord::new().with("phone", "555-0100"));
        let mut reports = handle.subscribe_reports();

        for (command, url) in [
            (TRIGGER_COMMAND, "https://example.org/apply"),
            ("open-settings", "https://www.indeed.com/apply"),
        ] {
            handle
                .publish(PageEvent::Shortcut {
                    command: command.into(),
                    url: url.into(),
                })
                .await
                .unwrap();
        }
        assert!(next_report(&mut reports).await.is_none());

        handle
            .publish(PageEvent::Shortcut {
                command: TRIGGER_COMMAND.into(),
                url: "https://smartapply.indeed.com/beta/apply".into(),
            })
            .await
            .unwrap();
        let report = next_report(&mut reports).await.unwrap();
        assert_eq!(report.trigger, TriggerSource::Shortcut);
    }

    #[tokio::test(start_paused = true)]
    async fn load_waits_for_the_settle_delay() {
        let handle = handle(on_load());
        let mut reports = handle.subscribe_reports();
        let start = Instant::now();
        handle
            .publish(PageEvent::PageLoaded {
                url: "https://www.indeed.com/apply".into(),
            })
            .await
            .unwrap();
        let report = next_report(&mut reports).await.unwrap();
        assert_eq!(report.trigger, TriggerSource::PageLoad);
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn load_without_the_setting_does_nothing() {
        let handle = handle(ProfileRecord::new().with("phone", "555-0100"));
        let mut reports = handle.subscribe_reports();
        handle
            .publish(PageEvent::PageLoaded {
                url: "https://www.indeed.com/apply".into(),
            })
            .await
            .unwrap();
        assert!(next_report(&mut reports).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn same_url_navigation_is_ignored() {
        let handle = handle(on_load());
        let mut reports = handle.subscribe_reports();
        let url = "https://www.indeed.com/apply/step-1";
        handle
            .publish(PageEvent::PageLoaded { url: url.into() })
            .await
            .unwrap();
        assert!(next_report(&mut reports).await.is_some());

        handle
            .publish(PageEvent::Navigated { url: url.into() })
            .await
            .unwrap();
        assert!(next_report(&mut reports).await.is_none());

        handle
            .publish(PageEvent::Navigated {
                url: "https://www.indeed.com/apply/step-2".into(),
            })
            .await
            .unwrap();
        let report = next_report(&mut reports).await.unwrap();
        assert_eq!(report.trigger, TriggerSource::PageLoad);
        assert_eq!(report.filled, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn mutation_bursts_collapse_into_one_pass() {
        let handle = handle(on_load());
        let mut reports = handle.subscribe_reports();

        handle
            .publish(PageEvent::DomMutated {
                classes: vec!["css-1x2y3z".into()],
            })
            .await
            .unwrap();
        for _ in 0..3 {
            handle
                .publish(PageEvent::DomMutated {
                    classes: vec!["ia-Questions-item css-abc".into()],
                })
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        let report = next_report(&mut reports).await.unwrap();
        assert_eq!(report.trigger, TriggerSource::DomMutation);
        assert!(next_report(&mut reports).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_loop() {
        let handle = handle(on_load());
        let mut reports = handle.subscribe_reports();
        let events = Arc::clone(&handle.events);
        handle.shutdown().await.unwrap();
        let _ = events
            .publish(PageEvent::PageLoaded {
                url: "https://www.indeed.com/apply".into(),
            })
            .await;
        assert!(next_report(&mut reports).await.is_none());
    }
}
