//! Checkbox task toggling

use crate::error::{VaultError, VaultResult};
use regex::Regex;
use serde::Serialize;

/// The task line that was changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskToggle {
    /// 1-based line number in the body
    pub line: usize,
    /// Task text after the checkbox, trimmed
    pub text: String,
    /// Whether the box was ticked before the change
    pub was_completed: bool,
}

fn task_regex(pattern: &str, lenient: bool) -> VaultResult<Regex> {
    let filler = if lenient { "[^\\n]*?" } else { "" };
    let source = format!(
        r"(?m)^([ \t]*[-*][ \t]*)\[([ xX])\]([ \t]+{filler}{}[^\n]*?)\r?$",
        regex::escape(pattern)
    );
    Regex::new(&source).map_err(|e| VaultError::invalid_input(format!("task pattern: {e}")))
}

/// Tick or untick the first checkbox task matching `pattern`
///
/// Tasks whose text starts with `pattern` are preferred; otherwise the first
/// task containing it anywhere is used. Returns `NotFound` when no task
/// matches, leaving the caller free to skip the write.
pub fn set_task_status(
    body: &str,
    pattern: &str,
    completed: bool,
) -> VaultResult<(String, TaskToggle)> {
    if pattern.trim().is_empty() {
        return Err(VaultError::invalid_input("task pattern must not be empty"));
    }

    let strict = task_regex(pattern, false)?;
    let caps = match strict.captures(body) {
        Some(caps) => caps,
        None => task_regex(pattern, true)?
            .captures(body)
            .ok_or_else(|| VaultError::not_found(format!("No task found matching: {pattern}")))?,
    };

    let (Some(marker), Some(state), Some(text)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return Err(VaultError::not_found(format!("No task found matching: {pattern}")));
    };

    let toggle = TaskToggle {
        line: body[..marker.start()].matches('\n').count() + 1,
        text: text.as_str().trim().to_string(),
        was_completed: !state.as_str().trim().is_empty(),
    };

    let mut out = String::with_capacity(body.len());
    out.push_str(&body[..state.start()]);
    out.push(if completed { 'x' } else { ' ' });
    out.push_str(&body[state.end()..]);
    Ok((out, toggle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "# Tasks\n\n- [ ] Write report draft\n* [x] Email Bob about report\n  - [ ] review notes\n";

    #[test]
    fn test_marks_task_completed() {
        let (body, toggle) = set_task_status(BODY, "Write report", true).unwrap();
        assert!(body.contains("- [x] Write report draft\n"));
        assert_eq!(toggle.line, 3);
        assert_eq!(toggle.text, "Write report draft");
        assert!(!toggle.was_completed);
    }

    #[test]
    fn test_marks_task_incomplete() {
        let (body, toggle) = set_task_status(BODY, "Email Bob", false).unwrap();
        assert!(body.contains("* [ ] Email Bob about report\n"));
        assert!(toggle.was_completed);
    }

    #[test]
    fn test_prefix_match_wins_over_substring_match() {
        let body = "- [ ] review the plan\n- [ ] plan review\n";
        let (out, toggle) = set_task_status(body, "plan", true).unwrap();
        assert_eq!(toggle.line, 2);
        assert_eq!(out, "- [ ] review the plan\n- [x] plan review\n");
    }

    #[test]
    fn test_falls_back_to_substring_match() {
        let (_, toggle) = set_task_status(BODY, "report", true).unwrap();
        assert_eq!(toggle.line, 3);

        let (_, toggle) = set_task_status(BODY, "review", true).unwrap();
        assert_eq!(toggle.line, 5);
        assert_eq!(toggle.text, "review notes");
    }

    #[test]
    fn test_pattern_is_literal() {
        let body = "- [ ] fix (a+b)*c\n";
        let (out, _) = set_task_status(body, "(a+b)*c", true).unwrap();
        assert_eq!(out, "- [x] fix (a+b)*c\n");
    }

    #[test]
    fn test_does_not_cross_lines() {
        let body = "- [ ]\nWrite report\n";
        assert!(set_task_status(body, "Write report", true).is_err());
    }

    #[test]
    fn test_missing_task_is_not_found() {
        let err = set_task_status(BODY, "Nonexistent", true).unwrap_err();
        assert_eq!(err.to_string(), "No task found matching: Nonexistent");
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_preserves_crlf() {
        let body = "- [ ] one\r\n- [ ] two\r\n";
        let (out, toggle) = set_task_status(body, "two", true).unwrap();
        assert_eq!(out, "- [ ] one\r\n- [x] two\r\n");
        assert_eq!(toggle.text, "two");
    }
}
