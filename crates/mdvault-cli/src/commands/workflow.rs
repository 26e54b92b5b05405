use crate::cli::{ContextCommand, FocusCommand, ProjectCommand};
use anyhow::Result;
use mdvault_core::Clock;
use mdvault_tools::{ProjectParams, ReportPeriod, TaskParams, VaultTools};

pub fn focus<C: Clock>(tools: &VaultTools<C>, command: FocusCommand) -> Result<String> {
    let output = match command {
        FocusCommand::Set { project, note } => {
            tools.workflow.set_focus(&project, note.as_deref())?
        }
        FocusCommand::Clear => tools.workflow.clear_focus()?,
        FocusCommand::Show => match tools.workflow.active_focus()? {
            Some(focus) => serde_json::to_string_pretty(&focus)?,
            None => "No active focus".to_string(),
        },
    };
    Ok(output)
}

pub fn project<C: Clock>(tools: &VaultTools<C>, command: ProjectCommand) -> Result<String> {
    let workflow = &tools.workflow;
    let output = match command {
        ProjectCommand::List { status } => workflow.list_projects(status.as_deref())?,
        ProjectCommand::Status { name } => workflow.project_status(&name)?,
        ProjectCommand::Progress { name } => workflow.project_progress(name.as_deref())?,
        ProjectCommand::New {
            title,
            context,
            status,
            vars,
        } => workflow.create_project(&ProjectParams {
            title,
            context,
            status,
            extra_vars: vars.vars,
        })?,
        ProjectCommand::Tasks { project, status } => {
            workflow.list_tasks(project.as_deref(), status.as_deref())?
        }
        ProjectCommand::TaskStatus { id } => workflow.task_details(&id)?,
        ProjectCommand::AddTask {
            title,
            project,
            due_date,
            priority,
            status,
            vars,
        } => workflow.create_task(&TaskParams {
            title,
            project,
            due_date,
            priority,
            status,
            extra_vars: vars.vars,
        })?,
        ProjectCommand::Done { path, summary } => {
            workflow.complete_task(&path, summary.as_deref())?
        }
    };
    Ok(output)
}

pub fn context<C: Clock>(tools: &VaultTools<C>, command: ContextCommand) -> Result<String> {
    let workflow = &tools.workflow;
    let output = match command {
        ContextCommand::Day { date } => workflow.context_day(date.as_deref())?,
        ContextCommand::Week { week } => workflow.context_week(week.as_deref())?,
        ContextCommand::Note {
            path,
            activity_days,
        } => workflow.context_note(&path, activity_days)?,
        ContextCommand::Focus => workflow.context_focus()?,
    };
    Ok(output)
}

pub fn report<C: Clock>(
    tools: &VaultTools<C>,
    month: Option<String>,
    week: Option<String>,
) -> Result<String> {
    let period = ReportPeriod::from_options(month.as_deref(), week.as_deref())?;
    Ok(tools.workflow.activity_report(&period)?)
}
