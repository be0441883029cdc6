//! CLI command implementations

pub mod dump;
pub mod list;
pub mod lookup;

use std::io::Write;

use rtti_encoder::{JsonEncoder, SchemaEncoder, TextEncoder};

use crate::OutputFormat;

/// Encoder for the selected output format.
fn encoder<'w, W: Write + 'w>(format: OutputFormat, writer: W) -> Box<dyn SchemaEncoder + 'w> {
    match format {
        OutputFormat::Text => Box::new(TextEncoder::new(writer)),
        OutputFormat::Json => Box::new(JsonEncoder::new(writer).pretty(true)),
    }
}
