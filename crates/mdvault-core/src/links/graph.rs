//! Link graph queries over a vault
//!
//! The graph is rebuilt from current file contents for every query and is
//! never cached. Notes are identified by vault-relative paths with `/`
//! separators (`Zettel/attention.md`).

use super::extract::extract_links;
use crate::error::VaultResult;
use crate::vault::Vault;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Name lookup over the vault's note paths
#[derive(Debug, Clone, Default)]
pub struct NoteIndex {
    paths: BTreeSet<String>,
}

impl NoteIndex {
    /// Index every note in the vault
    pub fn build(vault: &Vault) -> VaultResult<Self> {
        let paths = vault
            .notes(None)?
            .iter()
            .map(|path| vault.relative(path))
            .collect();
        Ok(Self { paths })
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Find the note a link target refers to
    ///
    /// Tries `name` (or `name.md`) as a vault-relative path first, then the
    /// first note in path order whose file name is `name.md` or whose stem is
    /// `name`.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let name = name.trim().trim_start_matches("./");
        if name.is_empty() {
            return None;
        }
        let file_name = if name.ends_with(".md") {
            name.to_string()
        } else {
            format!("{name}.md")
        };

        if let Some(direct) = self.paths.get(file_name.as_str()) {
            return Some(direct.as_str());
        }

        let stem = name.strip_suffix(".md").unwrap_or(name);
        self.paths
            .iter()
            .find(|path| {
                let (base, _) = split_final_segment(path);
                base == file_name || note_stem(path) == stem
            })
            .map(String::as_str)
    }
}

/// Resolution of one outgoing link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutgoingLink {
    Resolved { link: String, path: String },
    NotFound { link: String },
}

impl OutgoingLink {
    pub fn link(&self) -> &str {
        match self {
            Self::Resolved { link, .. } | Self::NotFound { link } => link,
        }
    }
}

/// A note sharing links with another
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedNote {
    pub path: String,
    pub shared: usize,
    pub shared_links: Vec<String>,
}

/// Outgoing link sets for every readable note in a vault
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    index: NoteIndex,
    links: BTreeMap<String, BTreeSet<String>>,
}

impl LinkGraph {
    /// Read every note and extract its links
    ///
    /// Notes that cannot be read are left out of the link map but stay in the
    /// index, so links to them still resolve.
    pub fn build(vault: &Vault) -> VaultResult<Self> {
        let mut paths = BTreeSet::new();
        let mut links = BTreeMap::new();
        for path in vault.notes(None)? {
            let relative = vault.relative(&path);
            match vault.read_text(&path) {
                Ok(text) => {
                    links.insert(relative.clone(), extract_links(&text));
                }
                Err(e) => debug!("Skipping note in link scan: {}", e),
            }
            paths.insert(relative);
        }
        Ok(Self {
            index: NoteIndex { paths },
            links,
        })
    }

    /// Build a graph from (relative path, text) pairs
    pub fn from_notes<I, P, T>(notes: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<String>,
        T: AsRef<str>,
    {
        let links: BTreeMap<String, BTreeSet<String>> = notes
            .into_iter()
            .map(|(path, text)| (path.into(), extract_links(text.as_ref())))
            .collect();
        let index = NoteIndex::from_paths(links.keys().cloned());
        Self { index, links }
    }

    pub fn index(&self) -> &NoteIndex {
        &self.index
    }

    pub fn links_of(&self, note: &str) -> Option<&BTreeSet<String>> {
        self.links.get(note)
    }

    /// Notes whose links point at `target`, sorted, excluding `target` itself
    ///
    /// A link matches when its final path segment equals the target's stem,
    /// or when it equals the target's relative path without extension.
    pub fn backlinks(&self, target: &str) -> Vec<String> {
        let target_stem = note_stem(target);
        let target_name = target.strip_suffix(".md").unwrap_or(target);

        self.links
            .iter()
            .filter(|(source, _)| source.as_str() != target)
            .filter(|(_, links)| {
                links.iter().any(|link| {
                    split_final_segment(link).0 == target_stem || link == target_name
                })
            })
            .map(|(source, _)| source.clone())
            .collect()
    }

    /// Resolve each link of `note` against the index, in link order
    pub fn outgoing_links(&self, note: &str) -> Vec<OutgoingLink> {
        self.links_of(note)
            .map(|links| resolve_links(&self.index, links))
            .unwrap_or_default()
    }

    /// Notes with no outgoing links that no other note links to
    ///
    /// `scope` limits which notes are candidates; incoming links are counted
    /// across the whole vault.
    pub fn orphans(&self, scope: Option<&str>) -> Vec<String> {
        let mut linked: BTreeSet<&str> = BTreeSet::new();
        for (source, links) in &self.links {
            for link in links {
                if let Some(target) = self.index.resolve(link) {
                    if target != source {
                        linked.insert(target);
                    }
                }
            }
        }

        let prefix = scope
            .map(|s| s.trim().trim_matches('/'))
            .filter(|s| !s.is_empty())
            .map(|s| format!("{s}/"));

        self.links
            .iter()
            .filter(|(path, _)| prefix.as_ref().map_or(true, |p| path.starts_with(p.as_str())))
            .filter(|(path, links)| links.is_empty() && !linked.contains(path.as_str()))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Other notes ranked by how many link targets they share with `note`
    ///
    /// Notes sharing nothing are left out. Ties are ordered by path.
    pub fn related_notes(&self, note: &str, limit: usize) -> Vec<RelatedNote> {
        let Some(own) = self.links_of(note) else {
            return Vec::new();
        };

        let mut related: Vec<RelatedNote> = self
            .links
            .iter()
            .filter(|(path, _)| path.as_str() != note)
            .filter_map(|(path, links)| {
                let shared_links: Vec<String> = own.intersection(links).cloned().collect();
                (!shared_links.is_empty()).then(|| RelatedNote {
                    path: path.clone(),
                    shared: shared_links.len(),
                    shared_links,
                })
            })
            .collect();

        related.sort_by(|a, b| b.shared.cmp(&a.shared).then_with(|| a.path.cmp(&b.path)));
        related.truncate(limit);
        related
    }
}

/// Resolve a set of link targets against an index
pub fn resolve_links(index: &NoteIndex, links: &BTreeSet<String>) -> Vec<OutgoingLink> {
    links
        .iter()
        .map(|link| match index.resolve(link) {
            Some(path) => OutgoingLink::Resolved {
                link: link.clone(),
                path: path.to_string(),
            },
            None => OutgoingLink::NotFound { link: link.clone() },
        })
        .collect()
}

fn split_final_segment(path: &str) -> (&str, &str) {
    match path.rsplit_once('/') {
        Some((dir, base)) => (base, dir),
        None => (path, ""),
    }
}

fn note_stem(path: &str) -> &str {
    let (base, _) = split_final_segment(path);
    base.strip_suffix(".md").unwrap_or(base)
}
