//! Encodings of the rtti schema tree.
//!
//! - [`TextEncoder`]: the canonical text form used for golden tests and by
//!   the declaration generator, one value per line
//! - [`JsonEncoder`]: serde_json rendering with the same field names
//!
//! # Example
//!
//! ```
//! use rtti_encoder::{SchemaEncoder, TextEncoder};
//! use rtti_schema::Type;
//!
//! let mut out = Vec::new();
//! let mut encoder = TextEncoder::new(&mut out);
//! encoder.encode_type(&Type::number("i32")).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "(number = (name = \"i32\"))\n");
//! ```

pub mod encoder;
pub mod text;

pub use encoder::{EncodeError, JsonEncoder, SchemaEncoder, TextEncoder};
pub use text::{structure_to_text, type_to_text};
