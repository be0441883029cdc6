//! Schema encoders for different output formats.

use std::io::Write;
use std::rc::Rc;

use rtti_schema::{Structure, Type};
use thiserror::Error;

use crate::text::{structure_to_text, type_to_text};

/// Errors raised while writing an encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to write encoded schema: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize schema as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for writing schema values in various formats.
pub trait SchemaEncoder {
    /// Encode a single type.
    fn encode_type(&mut self, ty: &Type) -> Result<(), EncodeError>;

    /// Encode a single structure.
    fn encode_structure(&mut self, structure: &Structure) -> Result<(), EncodeError>;

    /// Encode several structures, in the given order.
    fn encode_all(&mut self, structures: &[Rc<Structure>]) -> Result<(), EncodeError> {
        for structure in structures {
            self.encode_structure(structure)?;
        }
        Ok(())
    }
}

/// Canonical text output, one value per line.
pub struct TextEncoder<W: Write> {
    writer: W,
}

impl<W: Write> TextEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SchemaEncoder for TextEncoder<W> {
    fn encode_type(&mut self, ty: &Type) -> Result<(), EncodeError> {
        writeln!(self.writer, "{}", type_to_text(ty))?;
        Ok(())
    }

    fn encode_structure(&mut self, structure: &Structure) -> Result<(), EncodeError> {
        writeln!(self.writer, "{}", structure_to_text(structure))?;
        Ok(())
    }
}

/// JSON output for tooling.
pub struct JsonEncoder<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonEncoder<W> {
    /// Create a JSON encoder writing one compact document per value.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Indent the output.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_value<T: serde::Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> SchemaEncoder for JsonEncoder<W> {
    fn encode_type(&mut self, ty: &Type) -> Result<(), EncodeError> {
        self.write_value(ty)
    }

    fn encode_structure(&mut self, structure: &Structure) -> Result<(), EncodeError> {
        self.write_value(structure)
    }

    /// Written as one JSON array so the output stays a single document.
    fn encode_all(&mut self, structures: &[Rc<Structure>]) -> Result<(), EncodeError> {
        self.write_value(structures)
    }
}
