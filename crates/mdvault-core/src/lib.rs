//! Content model for Markdown vaults
//!
//! This crate holds the pure, deterministic parts of note handling:
//!
//! - [`frontmatter`]: parse and serialize `---` delimited YAML metadata
//! - [`timestamp`]: promote ISO-8601 strings to unquoted YAML timestamps
//! - [`markdown`]: heading scanner, section appender, checkbox toggling
//! - [`links`]: wikilink / Markdown link extraction and graph queries
//! - [`vault`]: path containment and note enumeration
//! - [`editor`]: the read, transform, stamp, write pipeline
//!
//! Everything is synchronous. Callers that share a vault between writers are
//! responsible for serializing writes to the same note.

pub mod clock;
pub mod editor;
pub mod error;
pub mod frontmatter;
pub mod links;
pub mod markdown;
pub mod timestamp;
pub mod vault;

pub use clock::{Clock, FixedClock, SystemClock};
pub use editor::{NoteEditor, CREATED_KEY, UPDATED_KEY};
pub use error::{FrontmatterError, ValidationError, VaultError, VaultResult};
pub use frontmatter::{parse_document, serialize_document, FrontmatterValue, Metadata, NoteDocument};
pub use links::{extract_links, LinkGraph, NoteIndex, OutgoingLink, RelatedNote};
pub use markdown::{append_to_section, set_task_status, AppendOutcome, TaskToggle};
pub use timestamp::{coerce, parse_iso8601, ParsedTimestamp, Timestamp};
pub use vault::Vault;
