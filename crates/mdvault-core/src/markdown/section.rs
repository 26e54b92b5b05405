//! Append content under a named heading

use super::headings::{find_heading, section_end};

/// Result of [`append_to_section`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub body: String,
    /// A new `## <heading>` section was added at the end of the body
    pub created_section: bool,
}

/// Insert `content` into `body`
///
/// Without a target heading the content goes at the end. With one, it goes
/// at the end of that heading's section; if the heading does not exist a new
/// level-2 section is appended. Existing blank lines are never removed, only
/// missing separators are added.
pub fn append_to_section(body: &str, content: &str, heading: Option<&str>) -> AppendOutcome {
    let target = heading.map(str::trim).filter(|h| !h.is_empty());
    let Some(target) = target else {
        let mut out = body.to_string();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(content);
        return AppendOutcome {
            body: out,
            created_section: false,
        };
    };

    let Some(found) = find_heading(body, target) else {
        let mut out = body.to_string();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        if !out.is_empty() && !out.ends_with("\n\n") {
            out.push('\n');
        }
        out.push_str("## ");
        out.push_str(target);
        out.push_str("\n\n");
        out.push_str(content);
        return AppendOutcome {
            body: out,
            created_section: true,
        };
    };

    let insertion = section_end(body, &found);
    let (prefix, suffix) = body.split_at(insertion);

    let mut insert = String::with_capacity(content.len() + 4);
    if !prefix.ends_with("\n\n") {
        insert.push_str(if prefix.ends_with('\n') { "\n" } else { "\n\n" });
    }
    insert.push_str(content);
    if !suffix.is_empty() {
        if !insert.ends_with('\n') {
            insert.push('\n');
        }
        if !insert.ends_with("\n\n") {
            insert.push('\n');
        }
    }

    AppendOutcome {
        body: format!("{prefix}{insert}{suffix}"),
        created_section: false,
    }
}
