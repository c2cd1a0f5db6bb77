use clap::Subcommand;

use super::fill::FillArgs;
use super::resolve::ResolveArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Run one autofill pass over a saved HTML page
    Fill(FillArgs),

    /// Show which catalog entry and value a question label resolves to
    Resolve(ResolveArgs),

    /// List the label catalog in match order
    Catalog,
}
