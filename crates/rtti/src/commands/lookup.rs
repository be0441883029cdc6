//! Lookup command - print one structure by fully-qualified name

use std::io::{self, Write};

use anyhow::{anyhow, Result};
use clap::Args;
use rtti_builder::{Builder, FeatureFlags};

use super::encoder;
use crate::catalog::{self, CATALOG};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Fully-qualified name, e.g. rtti::catalog::SnapshotInfo
    pub name: String,
}

pub fn run(args: LookupArgs, format: OutputFormat, flags: FeatureFlags) -> Result<()> {
    let mut builder = Builder::new(flags);
    catalog::reflect(&mut builder, CATALOG);

    let structure = builder
        .lookup(&args.name)
        .ok_or_else(|| anyhow!("No structure named {}", args.name))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    encoder(format, &mut out).encode_structure(&structure)?;
    out.flush()?;
    Ok(())
}
