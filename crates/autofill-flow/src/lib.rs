//! Autofill Orchestrator.
//!
//! [`AutofillEngine::run_pass`] walks every question node on the page
//! (label, resolve, fill), then the Direct Field Fallback, then the opt-in
//! side questions, and finally reports the count through a [`Notifier`].
//! [`spawn_triggers`] wires the engine to page events: shortcuts,
//! load/navigation with a settle delay, and debounced DOM mutations.

pub mod api;
pub mod model;
pub mod policy;
pub mod ports;

mod direct;
mod notify;
mod runner;
mod side;
mod triggers;

pub use api::{AutofillEngine, AutofillEngineBuilder, SharedPage};
pub use model::{Ack, FieldFailure, PassReport, QuestionRecord, QuestionStatus};
pub use notify::{toast_message, ToastNotifier, TOAST_CLASS};
pub use policy::AutofillPolicy;
pub use ports::{MemoryProfileStore, Notifier, NoopNotifier, ProfileStore};
pub use triggers::{spawn_triggers, AutofillHandle, PageEvent, TRIGGER_COMMAND};
