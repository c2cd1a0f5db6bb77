//! Host page model for the autofiller engine.
//!
//! The engine never talks to a live browser directly; it reads and writes a
//! [`Document`]: an arena of element and text nodes with form-control state
//! (`value`, `checked`, option selection) and a log of the events the engine
//! synthesized so the host page's reactive layer would pick the writes up.

pub mod errors;
mod events;
mod load;
mod node;
mod query;
mod serialize;

pub use errors::DomError;
pub use events::{DispatchedEvent, EventKind};
pub use node::{Document, NodeId, OptionInfo};
pub use query::normalize_text;
