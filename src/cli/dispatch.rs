use super::catalog::cmd_catalog;
use super::env::CliArgs;
use super::fill::cmd_fill;
use super::resolve::cmd_resolve;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Fill(args) => cmd_fill(args, ctx, cli.output.clone()).await,
        Commands::Resolve(args) => cmd_resolve(args, ctx, cli.output.clone()).await,
        Commands::Catalog => cmd_catalog(cli.output.clone()),
    }
}
