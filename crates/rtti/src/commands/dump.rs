//! Dump command - print every structure reached from the catalog

use std::io::{self, Write};
use std::rc::Rc;

use anyhow::{anyhow, bail, Result};
use clap::Args;
use rtti_builder::{Builder, FeatureFlags};
use rtti_schema::Structure;

use super::encoder;
use crate::catalog::{self, CatalogEntry, CATALOG};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Catalog roots to reflect, by simple or fully-qualified name (default: all)
    pub roots: Vec<String>,

    /// Fail if any member still has an unknown type
    #[arg(long)]
    pub strict: bool,
}

fn select_roots(names: &[String]) -> Result<Vec<&'static CatalogEntry>> {
    if names.is_empty() {
        return Ok(CATALOG.iter().collect());
    }
    names
        .iter()
        .map(|name| catalog::find(name).ok_or_else(|| anyhow!("Unknown catalog root: {}", name)))
        .collect()
}

/// Members with unknown types, as `Structure.member` strings.
fn audit(structures: &[Rc<Structure>]) -> Vec<String> {
    structures
        .iter()
        .flat_map(|s| {
            s.unknown_members()
                .into_iter()
                .map(move |member| format!("{}.{}", s.fully_qualified_name, member))
        })
        .collect()
}

pub fn run(args: DumpArgs, format: OutputFormat, flags: FeatureFlags) -> Result<()> {
    let roots = select_roots(&args.roots)?;

    let mut builder = Builder::new(flags);
    log::debug!(
        "dumping with features: {:?}",
        builder.config().iter().collect::<Vec<_>>()
    );
    catalog::reflect(&mut builder, roots);
    let structures = builder.symbols().sorted();
    log::info!("{} structures reflected", structures.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    encoder(format, &mut out).encode_all(&structures)?;
    out.flush()?;

    if args.strict {
        let unknown = audit(&structures);
        if !unknown.is_empty() {
            for member in &unknown {
                log::error!("unknown type in {}", member);
            }
            bail!("{} members have unknown types", unknown.len());
        }
    }

    Ok(())
}
