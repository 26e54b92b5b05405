//! Link extraction from raw note text
//!
//! Recognises two syntaxes:
//! - Wikilinks: `[[note]]` and `[[note|alias]]`
//! - Markdown links to vault notes: `[label](path/to/note.md)`
//!
//! Markdown links with an `http://`, `https://` or `/` target are treated as
//! external and skipped. Targets are trimmed and lose a trailing `.md`.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static WIKILINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").expect("wikilink regex"));

static MARKDOWN_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+\.md)\)").expect("markdown link regex"));

const EXTERNAL_PREFIXES: [&str; 3] = ["http://", "https://", "/"];

/// Strip surrounding whitespace and a trailing `.md`
pub fn normalize_target(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_suffix(".md").unwrap_or(trimmed)
}

/// Extract the set of normalized link targets from `text`
///
/// Duplicate targets collapse; the result does not depend on link order.
pub fn extract_links(text: &str) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    for cap in WIKILINK_REGEX.captures_iter(text) {
        if let Some(target) = cap.get(1) {
            insert_target(&mut links, target.as_str());
        }
    }

    for cap in MARKDOWN_LINK_REGEX.captures_iter(text) {
        let Some(path) = cap.get(2) else { continue };
        let path = path.as_str().trim();
        if EXTERNAL_PREFIXES.iter().any(|p| path.starts_with(p)) {
            continue;
        }
        insert_target(&mut links, path);
    }

    links
}

fn insert_target(links: &mut BTreeSet<String>, raw: &str) {
    let target = normalize_target(raw);
    if !target.is_empty() {
        links.insert(target.to_string());
    }
}
