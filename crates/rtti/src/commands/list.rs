//! List command - show the catalog roots

use anyhow::Result;
use clap::Args;

use crate::catalog::CATALOG;
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ListArgs {}

pub fn run(_args: ListArgs, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for entry in CATALOG {
                println!("{:<24} {}", entry.name, (entry.fully_qualified_name)());
            }
        }
        OutputFormat::Json => {
            let roots: Vec<_> = CATALOG
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "name": entry.name,
                        "fullyQualifiedName": (entry.fully_qualified_name)(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&roots)?);
        }
    }
    Ok(())
}
