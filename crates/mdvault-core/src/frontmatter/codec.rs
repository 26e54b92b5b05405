//! Split documents into (metadata, body) and join them back together

use super::value::{FrontmatterValue, Metadata};
use crate::error::FrontmatterError;
use crate::timestamp::coerce;
use serde_yaml::{Mapping, Value as YamlValue};

const DELIMITER: &str = "---";

/// A parsed note: frontmatter metadata plus the body text after it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDocument {
    pub metadata: Metadata,
    pub body: String,
}

impl NoteDocument {
    pub fn new(metadata: Metadata, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }

    pub fn parse(text: &str) -> Result<Self, FrontmatterError> {
        parse_document(text)
    }

    pub fn to_text(&self) -> Result<String, FrontmatterError> {
        serialize_document(&self.metadata, &self.body)
    }
}

/// Split the first line from the rest, returning (line without EOL, rest)
fn split_line(text: &str) -> (&str, &str) {
    match text.find('\n') {
        Some(idx) => (text[..idx].trim_end_matches('\r'), &text[idx + 1..]),
        None => (text.trim_end_matches('\r'), ""),
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Parse a document into metadata and body
///
/// A document whose first line is not `---` has no frontmatter and the whole
/// text is the body. The body is everything after the closing delimiter
/// line, byte for byte. Values are routed through timestamp coercion so a
/// parsed document compares equal to its re-parsed serialization.
pub fn parse_document(text: &str) -> Result<NoteDocument, FrontmatterError> {
    let (first, mut rest) = split_line(text);
    if !is_delimiter(first) {
        return Ok(NoteDocument::new(Metadata::new(), text));
    }

    let yaml_start = rest;
    let mut yaml_len = 0;
    loop {
        if rest.is_empty() {
            return Err(FrontmatterError::Unterminated);
        }
        let (line, after) = split_line(rest);
        if is_delimiter(line) {
            let yaml = &yaml_start[..yaml_len];
            let metadata = parse_yaml_block(yaml)?;
            return Ok(NoteDocument::new(metadata, after));
        }
        yaml_len += rest.len() - after.len();
        rest = after;
    }
}

fn parse_yaml_block(yaml: &str) -> Result<Metadata, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Metadata::new());
    }
    let value: YamlValue =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::Yaml(e.to_string()))?;
    match value {
        YamlValue::Null => Ok(Metadata::new()),
        YamlValue::Mapping(mapping) => Ok(mapping
            .into_iter()
            .map(|(key, value)| (yaml_key(key), coerce(from_yaml(value))))
            .collect()),
        other => Err(FrontmatterError::NotAMapping(yaml_kind(&other).to_string())),
    }
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a list",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn from_yaml(value: YamlValue) -> FrontmatterValue {
    match value {
        YamlValue::Null => FrontmatterValue::Null,
        YamlValue::Bool(b) => FrontmatterValue::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FrontmatterValue::Integer(i)
            } else if let Some(u) = n.as_u64() {
                FrontmatterValue::Unsigned(u)
            } else {
                FrontmatterValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        YamlValue::String(s) => FrontmatterValue::String(s),
        YamlValue::Sequence(items) => {
            FrontmatterValue::List(items.into_iter().map(from_yaml).collect())
        }
        YamlValue::Mapping(mapping) => FrontmatterValue::Map(
            mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), from_yaml(value)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn to_yaml(value: &FrontmatterValue) -> YamlValue {
    match value {
        FrontmatterValue::Null => YamlValue::Null,
        FrontmatterValue::Bool(b) => YamlValue::Bool(*b),
        FrontmatterValue::Integer(i) => YamlValue::Number((*i).into()),
        FrontmatterValue::Unsigned(u) => YamlValue::Number((*u).into()),
        FrontmatterValue::Float(f) => YamlValue::Number((*f).into()),
        FrontmatterValue::String(s) => YamlValue::String(s.clone()),
        FrontmatterValue::Date(d) => YamlValue::String(d.format("%Y-%m-%d").to_string()),
        FrontmatterValue::DateTime(ts) => YamlValue::String(ts.to_string()),
        FrontmatterValue::List(items) => YamlValue::Sequence(items.iter().map(to_yaml).collect()),
        FrontmatterValue::Map(map) => YamlValue::Mapping(to_mapping(map.iter())),
    }
}

fn to_mapping<'a>(entries: impl Iterator<Item = (&'a str, &'a FrontmatterValue)>) -> Mapping {
    entries
        .map(|(key, value)| (YamlValue::String(key.to_string()), to_yaml(value)))
        .collect()
}

/// Serialize metadata and body back into document text
///
/// Every value is coerced before emission. Empty metadata produces the body
/// alone, unless the body itself opens with a delimiter line, in which case
/// an empty block is written so the body is not mistaken for frontmatter.
pub fn serialize_document(metadata: &Metadata, body: &str) -> Result<String, FrontmatterError> {
    if metadata.is_empty() {
        if is_delimiter(split_line(body).0) {
            return Ok(format!("{DELIMITER}\n{DELIMITER}\n{body}"));
        }
        return Ok(body.to_string());
    }

    let coerced: Vec<(&str, FrontmatterValue)> = metadata
        .iter()
        .map(|(key, value)| (key, coerce(value.clone())))
        .collect();
    let mapping = to_mapping(coerced.iter().map(|(key, value)| (*key, value)));
    let yaml = serde_yaml::to_string(&YamlValue::Mapping(mapping))
        .map_err(|e| FrontmatterError::Emit(e.to_string()))?;

    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}
