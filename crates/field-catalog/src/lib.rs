//! Declarative knowledge base for the autofiller engine.
//!
//! - [`SemanticField`]: the stable logical names a question can map to.
//! - [`WidgetKind`]: the closed set of fill strategies, each carrying the
//!   alias table it needs.
//! - [`CATALOG`]: the ordered `(pattern, field, widget, gating, fixed value)`
//!   table. Order is part of the contract: the first entry whose pattern is
//!   contained in a label and that yields a value wins.
//! - [`ProfileRecord`]: the read-only snapshot of the user's saved answers.

mod catalog;
pub mod demographics;
mod field;
pub mod profile;
mod widget;

pub use catalog::{Catalog, CatalogEntry, CATALOG};
pub use demographics::{
    AliasPhrase, DemographicCode, DisabilityStatus, Ethnicity, Gender, VeteranStatus,
};
pub use field::SemanticField;
pub use profile::{AvailabilitySlot, ProfileError, ProfileRecord, ProfileValue, Settings};
pub use widget::{AliasTable, WidgetKind};
