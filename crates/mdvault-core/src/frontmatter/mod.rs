//! Frontmatter model and codec
//!
//! A note is a `---` delimited YAML block followed by free text. This module
//! owns the value model and the
//! conversion to and from `serde_yaml` values.

mod codec;
mod value;

pub use codec::{parse_document, serialize_document, NoteDocument};
pub use value::{FrontmatterValue, Metadata};
