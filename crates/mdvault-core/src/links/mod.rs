//! Link extraction and link graph queries

mod extract;
mod graph;

pub use extract::{extract_links, normalize_target};
pub use graph::{resolve_links, LinkGraph, NoteIndex, OutgoingLink, RelatedNote};
