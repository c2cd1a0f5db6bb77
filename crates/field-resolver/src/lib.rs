//! Label Extractor and Field Resolver.
//!
//! A question node yields a normalized label through a fixed chain of
//! [`LabelSource`]s; the label is then matched against the ordered catalog by
//! [`FieldResolver`], which returns the first entry that both matches and
//! produces a usable value.

pub mod label;
pub mod ports;
pub mod resolver;

pub use label::{extract_label, LabelSource};
pub use ports::{format_date, Clock, FixedClock, SystemClock};
pub use resolver::{FieldResolver, Resolution, ResolvedValue};
