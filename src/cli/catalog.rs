use anyhow::Result;
use field_catalog::CATALOG;

use super::output::{print_json, OutputFormat};

pub fn cmd_catalog(output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => print_json(&CATALOG.entries()),
        OutputFormat::Human => {
            for (idx, entry) in CATALOG.entries().iter().enumerate() {
                let mut notes = Vec::new();
                if entry.demographic {
                    notes.push("demographic".to_string());
                }
                if let Some(fixed) = entry.fixed_value {
                    notes.push(format!("fixed={fixed}"));
                }
                println!(
                    "{idx:>3}  {:<32} {:<28} {:<18} {}",
                    entry.pattern,
                    entry.field.to_string(),
                    entry.widget.label(),
                    notes.join(" ")
                );
            }
            Ok(())
        }
    }
}
