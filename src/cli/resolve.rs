use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use field_resolver::{FieldResolver, ResolvedValue};
use serde_json::json;

use super::context::CliContext;
use super::output::{print_json, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct ResolveArgs {
    /// Question label as shown on the page
    pub label: String,

    /// Profile file (JSON or YAML); defaults to the configured profile
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,
}

pub async fn cmd_resolve(args: ResolveArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let profile = ctx.load_profile(args.profile.as_deref()).await?;
    let resolution = FieldResolver::default().resolve(&args.label, &profile);

    match output {
        OutputFormat::Json => print_json(&json!({
            "label": args.label,
            "resolution": resolution,
        })),
        OutputFormat::Human => {
            match resolution {
                Some(resolution) => {
                    let value = match &resolution.value {
                        ResolvedValue::Text(text) => text.clone(),
                        ResolvedValue::Slots(slots) => slots
                            .iter()
                            .map(|slot| format!("{}: {}", slot.day, slot.time))
                            .collect::<Vec<_>>()
                            .join("; "),
                    };
                    println!("pattern: {}", resolution.entry.pattern);
                    println!("field:   {}", resolution.field());
                    println!("widget:  {}", resolution.widget().label());
                    println!("value:   {value}");
                }
                None => println!("no catalog entry yields a value for {:?}", args.label),
            }
            Ok(())
        }
    }
}
