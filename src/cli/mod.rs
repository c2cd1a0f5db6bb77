pub mod app;
pub mod catalog;
pub mod commands;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod fill;
pub mod output;
pub mod resolve;
pub mod runtime;

pub use catalog::cmd_catalog;
pub use fill::{cmd_fill, FillArgs};
pub use resolve::{cmd_resolve, ResolveArgs};
