//! Delegated notes CLI
//!
//! Task/project lifecycle, templated note creation and reporting are owned by
//! an external executable. [`CommandRunner`] is the seam: [`MdvCli`] spawns
//! the real binary, tests substitute a recorder.

use crate::error::DelegateError;
use mdvault_config::{VaultConfig, VAULT_PATH_ENV};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

/// Runs one invocation of the notes CLI and returns its trimmed stdout
pub trait CommandRunner: Send + Sync {
    fn run(&self, args: &[String]) -> Result<String, DelegateError>;

    /// Executable name used in messages
    fn name(&self) -> &str {
        "mdv"
    }
}

/// Spawns the configured notes CLI as a child process
#[derive(Debug, Clone)]
pub struct MdvCli {
    executable: String,
    vault_path: PathBuf,
}

impl MdvCli {
    pub fn new(executable: impl Into<String>, vault_path: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            vault_path: vault_path.into(),
        }
    }

    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(config.cli.executable.clone(), config.vault_path.clone())
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }
}

impl CommandRunner for MdvCli {
    fn run(&self, args: &[String]) -> Result<String, DelegateError> {
        let mut command = Command::new(&self.executable);
        command.args(args);
        if std::env::var_os(VAULT_PATH_ENV).is_none() {
            command.env(VAULT_PATH_ENV, &self.vault_path);
        }

        let rendered = render_command(&self.executable, args);
        debug!("Running {}", rendered);

        let output = command.output().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                DelegateError::ExecutableNotFound {
                    executable: self.executable.clone(),
                }
            } else {
                DelegateError::Spawn {
                    executable: self.executable.clone(),
                    source,
                }
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!("{} exited with {}", rendered, output.status);
        Err(DelegateError::Failed {
            command: rendered,
            status: output.status.code(),
            stderr,
            stdout,
        })
    }

    fn name(&self) -> &str {
        &self.executable
    }
}

/// `program arg1 arg2`, for messages
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Argument list builder for notes CLI invocations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MdvArgs(Vec<String>);

impl MdvArgs {
    pub fn new<I, S>(base: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(base.into_iter().map(Into::into).collect())
    }

    /// Positional argument
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.0.push(value.into());
        self
    }

    /// Positional argument, skipped when absent or blank
    pub fn arg_opt(self, value: Option<&str>) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => self.arg(value),
            None => self,
        }
    }

    /// `--flag`
    pub fn flag(self, flag: &str) -> Self {
        self.arg(flag)
    }

    /// `--flag value`, skipped when the value is absent or blank
    pub fn opt(self, flag: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => self.arg(flag).arg(value),
            None => self,
        }
    }

    /// `--var key=value`, skipped when the value is absent or blank
    pub fn var(self, key: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => self.arg("--var").arg(format!("{key}={value}")),
            None => self,
        }
    }

    /// `--var key=value` for each pair, in order
    pub fn vars<'a, I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        for (key, value) in vars {
            self = self.arg("--var").arg(format!("{key}={value}"));
        }
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Parse `key=value` template variables
pub fn parse_var(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

/// Active focus reported by `focus --json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusContext {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FocusContext {
    /// Parse CLI output; empty output or a null project means no focus
    pub fn parse(command: &str, output: &str) -> Result<Option<Self>, DelegateError> {
        let output = output.trim();
        if output.is_empty() || output == "null" {
            return Ok(None);
        }
        let focus: Self =
            serde_json::from_str(output).map_err(|e| DelegateError::InvalidOutput {
                command: command.to_string(),
                reason: e.to_string(),
            })?;
        Ok(focus.project.is_some().then_some(focus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_skip_blank_values() {
        let args = MdvArgs::new(["new", "task", "Write docs"])
            .flag("--batch")
            .var("project", Some("docs"))
            .var("due_date", None)
            .var("priority", Some("  "))
            .vars(&[("owner".to_string(), "me".to_string())])
            .into_vec();
        assert_eq!(
            args,
            vec![
                "new",
                "task",
                "Write docs",
                "--batch",
                "--var",
                "project=docs",
                "--var",
                "owner=me"
            ]
        );
    }

    #[test]
    fn test_opt_and_positional() {
        let args = MdvArgs::new(["project", "list"])
            .opt("--status", Some("open"))
            .opt("--project", None)
            .arg_opt(None)
            .into_vec();
        assert_eq!(args, vec!["project", "list", "--status", "open"]);
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(
            parse_var("url=https://x.org/?a=b").unwrap(),
            ("url".to_string(), "https://x.org/?a=b".to_string())
        );
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=v").is_err());
    }

    #[test]
    fn test_focus_context_parse() {
        let focus = FocusContext::parse("focus --json", r#"{"project":"site","note":"a.md","since":"x"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(focus.project.as_deref(), Some("site"));
        assert_eq!(focus.note.as_deref(), Some("a.md"));
        assert!(focus.extra.contains_key("since"));

        assert_eq!(FocusContext::parse("focus --json", "").unwrap(), None);
        assert_eq!(FocusContext::parse("focus --json", r#"{"project":null}"#).unwrap(), None);
        assert!(matches!(
            FocusContext::parse("focus --json", "not json"),
            Err(DelegateError::InvalidOutput { .. })
        ));
    }

    #[test]
    fn test_missing_executable() {
        let cli = MdvCli::new("mdvault-test-no-such-binary", "/tmp");
        let err = cli.run(&["today".to_string()]).unwrap_err();
        assert!(matches!(err, DelegateError::ExecutableNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Error: 'mdvault-test-no-such-binary' executable not found in PATH."
        );
    }

    #[test]
    fn test_render_command() {
        assert_eq!(
            render_command("mdv", &["task".into(), "list".into()]),
            "mdv task list"
        );
    }
}
