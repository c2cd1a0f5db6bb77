use std::sync::Arc;

use autofiller_core_types::TriggerSource;
use field_resolver::FieldResolver;
use page_dom::Document;
use parking_lot::Mutex;

use crate::model::PassReport;
use crate::notify::ToastNotifier;
use crate::policy::AutofillPolicy;
use crate::ports::{Notifier, NoopNotifier, ProfileStore};
use crate::runner;

/// The live page shared between the engine, the notifier and the host.
/// Guards are only held for synchronous stretches, never across an await.
pub type SharedPage = Arc<Mutex<Document>>;

pub struct AutofillEngine {
    pub(crate) page: SharedPage,
    pub(crate) profile: Arc<dyn ProfileStore>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) resolver: FieldResolver,
    pub(crate) policy: AutofillPolicy,
}

impl AutofillEngine {
    pub fn builder(page: SharedPage, profile: Arc<dyn ProfileStore>) -> AutofillEngineBuilder {
        AutofillEngineBuilder::new(page, profile)
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    pub fn policy(&self) -> &AutofillPolicy {
        &self.policy
    }

    pub fn profile(&self) -> &Arc<dyn ProfileStore> {
        &self.profile
    }

    /// One full pass. Never fails: problems degrade into skipped questions
    /// and entries in [`PassReport::failures`].
    pub async fn run_pass(&self, trigger: TriggerSource) -> PassReport {
        runner::run_pass(self, trigger).await
    }
}

pub struct AutofillEngineBuilder {
    page: SharedPage,
    profile: Arc<dyn ProfileStore>,
    notifier: Option<Arc<dyn Notifier>>,
    page_toast: bool,
    resolver: Option<FieldResolver>,
    policy: AutofillPolicy,
}

impl AutofillEngineBuilder {
    pub fn new(page: SharedPage, profile: Arc<dyn ProfileStore>) -> Self {
        Self {
            page,
            profile,
            notifier: None,
            page_toast: false,
            resolver: None,
            policy: AutofillPolicy::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Report each pass with a [`ToastNotifier`] on the shared page, shown
    /// for the policy's `toast_duration_ms`. An explicit notifier wins.
    pub fn with_page_toast(mut self) -> Self {
        self.page_toast = true;
        self
    }

    pub fn with_resolver(mut self, resolver: FieldResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_policy(mut self, policy: AutofillPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Arc<AutofillEngine> {
        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None if self.page_toast => Arc::new(ToastNotifier::new(
                self.page.clone(),
                self.policy.toast_duration(),
            )),
            None => Arc::new(NoopNotifier),
        };
        Arc::new(AutofillEngine {
            page: self.page,
            profile: self.profile,
            notifier,
            resolver: self.resolver.unwrap_or_default(),
            policy: self.policy,
        })
    }
}
