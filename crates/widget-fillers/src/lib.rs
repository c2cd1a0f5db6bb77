//! Widget Fillers.
//!
//! One module per [`WidgetKind`](field_catalog::WidgetKind). Every filler
//! leaves a populated control alone and, after a write, synthesizes the
//! `input`/`change`/`blur` sequence the host page listens for.

pub mod errors;
pub mod model;
pub mod policy;

pub mod agreement;
pub mod availability;
pub mod choice;
pub mod combobox;
pub mod date;
pub mod experience;
pub mod radio;
pub mod select;
pub mod text;

mod commit;
mod matching;
mod runner;

pub use commit::{commit, write_text};
pub use errors::FillError;
pub use model::{DeferredBlur, FillOutcome, FillStatus, SkipReason};
pub use policy::FillPolicy;
pub use runner::fill;
