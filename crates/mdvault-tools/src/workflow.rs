//! Projects, tasks, focus, context, reporting and macros
//!
//! All of these are owned by the notes CLI. This module only builds argument
//! lists, validates what can be checked locally and shapes the replies.

use crate::delegate::{render_command, CommandRunner, FocusContext, MdvArgs};
use crate::error::{DelegateError, ToolError, ToolResult};
use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, LazyLock};

static MONTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid month regex"));

static WEEK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-W(0[1-9]|[1-4]\d|5[0-3])$").expect("valid week regex"));

/// Default look-back window for `context note`
pub const DEFAULT_ACTIVITY_DAYS: u32 = 7;

/// Parameters for a new project
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectParams {
    pub title: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub extra_vars: Vec<(String, String)>,
}

/// Parameters for a new task
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskParams {
    pub title: String,
    /// Project name; the CLI falls back to the active focus
    #[serde(default)]
    pub project: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub extra_vars: Vec<(String, String)>,
}

/// Reporting period for an activity report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportPeriod {
    /// `YYYY-MM`
    Month(String),
    /// `YYYY-Wxx`
    Week(String),
}

impl ReportPeriod {
    /// Exactly one of `month` and `week`, in the expected format
    pub fn from_options(month: Option<&str>, week: Option<&str>) -> ToolResult<Self> {
        let month = month.map(str::trim).filter(|m| !m.is_empty());
        let week = week.map(str::trim).filter(|w| !w.is_empty());
        match (month, week) {
            (Some(_), Some(_)) => Err(ToolError::invalid_params(
                "Cannot specify both 'month' and 'week'. Choose one.",
            )),
            (None, None) => Err(ToolError::invalid_params(
                "Must specify either 'month' (YYYY-MM) or 'week' (YYYY-Wxx).",
            )),
            (Some(month), None) if MONTH_REGEX.is_match(month) => Ok(Self::Month(month.into())),
            (Some(month), None) => Err(ToolError::invalid_params(format!(
                "Invalid month '{month}', expected YYYY-MM"
            ))),
            (None, Some(week)) if WEEK_REGEX.is_match(week) => Ok(Self::Week(week.into())),
            (None, Some(week)) => Err(ToolError::invalid_params(format!(
                "Invalid week '{week}', expected YYYY-Wxx"
            ))),
        }
    }
}

pub struct WorkflowTools {
    runner: Arc<dyn CommandRunner>,
}

impl WorkflowTools {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn run(&self, args: MdvArgs) -> ToolResult<String> {
        Ok(self.runner.run(args.as_slice())?)
    }

    // Focus

    pub fn set_focus(&self, project: &str, note: Option<&str>) -> ToolResult<String> {
        if project.trim().is_empty() {
            return Err(ToolError::invalid_params("project must not be empty"));
        }
        self.run(MdvArgs::new(["focus", project]).opt("--note", note))
    }

    pub fn clear_focus(&self) -> ToolResult<String> {
        self.run(MdvArgs::new(["focus", "--clear"]))
    }

    /// Active focus, or `None` when nothing is focused
    pub fn active_focus(&self) -> ToolResult<Option<FocusContext>> {
        let args = MdvArgs::new(["focus", "--json"]);
        let output = self.runner.run(args.as_slice())?;
        let command = render_command(self.runner.name(), args.as_slice());
        Ok(FocusContext::parse(&command, &output)?)
    }

    // Projects

    pub fn list_projects(&self, status: Option<&str>) -> ToolResult<String> {
        self.run(MdvArgs::new(["project", "list"]).opt("--status", status))
    }

    pub fn project_status(&self, name: &str) -> ToolResult<String> {
        self.run(MdvArgs::new(["project", "status", name]))
    }

    pub fn project_progress(&self, name: Option<&str>) -> ToolResult<String> {
        self.run(MdvArgs::new(["project", "progress"]).arg_opt(name))
    }

    pub fn create_project(&self, params: &ProjectParams) -> ToolResult<String> {
        self.run(
            MdvArgs::new(["new", "project", params.title.as_str(), "--batch"])
                .var("context", params.context.as_deref())
                .var("status", params.status.as_deref())
                .vars(&params.extra_vars),
        )
    }

    // Tasks

    pub fn list_tasks(&self, project: Option<&str>, status: Option<&str>) -> ToolResult<String> {
        self.run(
            MdvArgs::new(["task", "list"])
                .opt("--project", project)
                .opt("--status", status),
        )
    }

    pub fn task_details(&self, task_id: &str) -> ToolResult<String> {
        self.run(MdvArgs::new(["task", "status", task_id]))
    }

    pub fn create_task(&self, params: &TaskParams) -> ToolResult<String> {
        self.run(
            MdvArgs::new(["new", "task", params.title.as_str(), "--batch"])
                .var("project", params.project.as_deref())
                .var("due_date", params.due_date.as_deref())
                .var("priority", params.priority.as_deref())
                .var("status", params.status.as_deref())
                .vars(&params.extra_vars),
        )
    }

    pub fn complete_task(&self, task_path: &str, summary: Option<&str>) -> ToolResult<String> {
        self.run(MdvArgs::new(["task", "done", task_path]).arg_opt(summary))
    }

    // Capture

    pub fn capture(
        &self,
        name: &str,
        text: &str,
        extra_vars: &[(String, String)],
    ) -> ToolResult<String> {
        self.run(
            MdvArgs::new(["capture", name, "--batch", "--var"])
                .arg(format!("text={text}"))
                .vars(extra_vars),
        )
    }

    // Context

    pub fn context_day(&self, date: Option<&str>) -> ToolResult<String> {
        let date = date.filter(|d| !d.trim().is_empty()).unwrap_or("today");
        self.run(MdvArgs::new(["context", "day", date, "--format", "json"]))
    }

    pub fn context_week(&self, week: Option<&str>) -> ToolResult<String> {
        self.run(
            MdvArgs::new(["context", "week"])
                .arg_opt(week)
                .arg("--format")
                .arg("json"),
        )
    }

    pub fn context_note(&self, note_path: &str, activity_days: u32) -> ToolResult<String> {
        self.run(
            MdvArgs::new(["context", "note", note_path, "--format", "json", "--activity-days"])
                .arg(activity_days.to_string()),
        )
    }

    pub fn context_focus(&self) -> ToolResult<String> {
        self.run(MdvArgs::new(["context", "focus", "--format", "json"]))
    }

    // Reporting

    pub fn activity_report(&self, period: &ReportPeriod) -> ToolResult<String> {
        let args = match period {
            ReportPeriod::Month(month) => MdvArgs::new(["report", "--month", month.as_str()]),
            ReportPeriod::Week(week) => MdvArgs::new(["report", "--week", week.as_str()]),
        };
        self.run(args)
    }

    // Macros

    pub fn run_macro(
        &self,
        name: &str,
        args: &[String],
        variables: &[(String, String)],
    ) -> ToolResult<String> {
        let mut cmd = MdvArgs::new(["macro", name, "--batch"]).vars(variables);
        for arg in args {
            cmd = cmd.arg(arg.as_str());
        }
        match self.runner.run(cmd.as_slice()) {
            Ok(output) => Ok(format!("Macro '{name}' executed successfully.\n\n{output}")),
            Err(DelegateError::Failed { stderr, stdout, .. }) => {
                Err(DelegateError::MacroFailed {
                    name: name.to_string(),
                    stderr,
                    stdout,
                }
                .into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
