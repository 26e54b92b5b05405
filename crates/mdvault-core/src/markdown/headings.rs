//! Line-oriented ATX heading scanner
//!
//! Recognises `#`..`######` headings line by line. There is no block
//! structure here: a `#` line inside a fenced code block still counts.

/// A heading line located in a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Number of leading `#` characters (1-6)
    pub level: usize,
    /// Heading text, trimmed
    pub text: &'a str,
    /// Byte offset of the start of the heading line
    pub start: usize,
    /// Byte offset just past the heading line, including its newline
    pub end: usize,
}

/// Parse a single line (without its newline) as a heading
///
/// Returns the level and trimmed text. The hashes must start the line and be
/// followed by a space, tab, or the end of the line.
pub fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let line = line.trim_end_matches('\r');
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    match rest.chars().next() {
        None => Some((level, "")),
        Some(' ' | '\t') => Some((level, rest.trim())),
        Some(_) => None,
    }
}

/// Iterate over every heading in `body`, starting at byte offset `from`
///
/// `from` must be a line start.
pub fn headings_from(body: &str, from: usize) -> impl Iterator<Item = Heading<'_>> {
    let mut offset = from;
    body[from..].split_inclusive('\n').filter_map(move |raw| {
        let start = offset;
        offset += raw.len();
        let (level, text) = parse_heading(raw.trim_end_matches('\n'))?;
        Some(Heading {
            level,
            text,
            start,
            end: offset,
        })
    })
}

/// First heading anywhere in `body` whose trimmed text equals `target`
///
/// Comparison is exact and case-sensitive; the target is never interpreted
/// as a pattern.
pub fn find_heading<'a>(body: &'a str, target: &str) -> Option<Heading<'a>> {
    let target = target.trim();
    headings_from(body, 0).find(|h| h.text == target)
}

/// Byte offset where the section opened by `heading` ends
///
/// That is the start of the next heading of equal or shallower depth, or the
/// end of the body.
pub fn section_end(body: &str, heading: &Heading<'_>) -> usize {
    headings_from(body, heading.end)
        .find(|h| h.level <= heading.level)
        .map_or(body.len(), |h| h.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading_levels() {
        assert_eq!(parse_heading("# Title"), Some((1, "Title")));
        assert_eq!(parse_heading("###### Deep  "), Some((6, "Deep")));
        assert_eq!(parse_heading("##\tTabbed"), Some((2, "Tabbed")));
        assert_eq!(parse_heading("##"), Some((2, "")));
        assert_eq!(parse_heading("## Logs\r"), Some((2, "Logs")));
    }

    #[test]
    fn test_parse_heading_rejects_non_headings() {
        assert_eq!(parse_heading("####### Seven"), None);
        assert_eq!(parse_heading("#hashtag"), None);
        assert_eq!(parse_heading(" # indented"), None);
        assert_eq!(parse_heading("plain text"), None);
        assert_eq!(parse_heading(""), None);
    }

    #[test]
    fn test_find_heading_is_exact() {
        let body = "# Notes\n## Logs archive\n## Logs\ntext\n";
        let heading = find_heading(body, "Logs").unwrap();
        assert_eq!(heading.level, 2);
        assert_eq!(&body[heading.start..heading.end], "## Logs\n");
        assert!(find_heading(body, "logs").is_none());
    }

    #[test]
    fn test_find_heading_treats_target_literally() {
        let body = "## Q&A (2026) [draft]?\nbody\n## Q\n";
        let heading = find_heading(body, "Q&A (2026) [draft]?").unwrap();
        assert_eq!(heading.start, 0);
        assert!(find_heading(body, ".*").is_none());
    }

    #[test]
    fn test_section_end_stops_at_same_or_shallower_level() {
        let body = "## A\nx\n### A.1\ny\n## B\nz\n";
        let a = find_heading(body, "A").unwrap();
        assert_eq!(&body[section_end(body, &a)..], "## B\nz\n");

        let sub = find_heading(body, "A.1").unwrap();
        assert_eq!(&body[section_end(body, &sub)..], "## B\nz\n");

        let b = find_heading(body, "B").unwrap();
        assert_eq!(section_end(body, &b), body.len());
    }
}
