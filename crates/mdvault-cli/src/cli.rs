use clap::{Args, Parser, Subcommand, ValueEnum};
use mdvault_tools::{parse_var, DEFAULT_ACTIVITY_DAYS, DEFAULT_RELATED_LIMIT};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors (default)
    Warn,
    /// Informational messages, including every note written
    Info,
    /// Debug messages, including skipped files
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "mdn")]
#[command(about = "mdn - read, edit and query a Markdown vault")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root (overrides MARKDOWN_VAULT_PATH and the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub vault: Option<PathBuf>,

    /// Config file path (defaults to ~/.config/mdvault/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Effective log level: explicit level, then --verbose, then warn
    pub fn level_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a note
    Read {
        path: String,
        /// Only the first N lines
        #[arg(long, value_name = "N")]
        max_lines: Option<usize>,
    },

    /// Print a note's frontmatter as JSON
    Meta { path: String },

    /// List notes, optionally under a folder
    List { folder: Option<String> },

    /// List immediate sub-folders
    Folders { folder: Option<String> },

    /// Case-insensitive text search
    Search {
        query: String,
        #[arg(long)]
        folder: Option<String>,
        /// Lines of context around each match (0 prints paths only)
        #[arg(short = 'c', long, default_value = "0")]
        context: usize,
    },

    /// Merge a JSON object into a note's frontmatter
    #[command(name = "set-meta")]
    SetMeta {
        path: String,
        /// e.g. '{"status": "done"}'
        json: String,
    },

    /// Append content to a note, optionally under a heading
    Append {
        path: String,
        content: String,
        #[arg(short, long)]
        subsection: Option<String>,
    },

    /// Tick (or untick) a checkbox task
    Task {
        path: String,
        /// Start of the task text, or any part of it
        pattern: String,
        /// Mark the task incomplete instead
        #[arg(long)]
        undo: bool,
    },

    /// Daily notes
    #[command(subcommand)]
    Daily(DailyCommand),

    /// Notes linking to a note
    Backlinks { path: String },

    /// Outgoing links of a note
    Links { path: String },

    /// Notes with no links in or out
    Orphans {
        #[arg(long)]
        folder: Option<String>,
    },

    /// Notes sharing link targets with a note
    Related {
        path: String,
        #[arg(short = 'n', long, default_value_t = DEFAULT_RELATED_LIMIT)]
        limit: usize,
    },

    /// Zettel and literature notes
    #[command(subcommand)]
    Zettel(ZettelCommand),

    /// Active project focus
    #[command(subcommand)]
    Focus(FocusCommand),

    /// Projects and their tasks
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Context summaries as JSON
    #[command(subcommand)]
    Context(ContextCommand),

    /// Quick capture through a capture template
    Capture {
        name: String,
        text: String,
        #[command(flatten)]
        vars: TemplateVars,
    },

    /// Activity report for a month or a week
    Report {
        /// YYYY-MM
        #[arg(long)]
        month: Option<String>,
        /// YYYY-Wxx
        #[arg(long)]
        week: Option<String>,
    },

    /// Run a macro
    Macro {
        name: String,
        /// Positional arguments for the macro
        args: Vec<String>,
        #[command(flatten)]
        vars: TemplateVars,
    },
}

/// Repeated `--var key=value` template variables
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateVars {
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,
}

#[derive(Subcommand)]
pub enum DailyCommand {
    /// Append to today's daily note, creating it if needed
    Add {
        content: String,
        #[arg(short, long)]
        subsection: Option<String>,
    },
    /// Create a daily note from its template
    New {
        #[arg(long)]
        date: Option<String>,
        #[command(flatten)]
        vars: TemplateVars,
    },
    /// Today's dashboard
    Today,
}

#[derive(Subcommand)]
pub enum ZettelCommand {
    /// Create a zettel
    New {
        title: String,
        #[arg(long)]
        short_title: String,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        body: Option<String>,
        /// Related note, repeatable
        #[arg(long = "connect", value_name = "LINK")]
        connections: Vec<String>,
        #[command(flatten)]
        vars: TemplateVars,
    },
    /// Create a literature note
    Literature {
        title: String,
        #[arg(long)]
        short_title: String,
        #[arg(long)]
        authors: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        source_type: Option<String>,
        #[command(flatten)]
        vars: TemplateVars,
    },
}

#[derive(Subcommand)]
pub enum FocusCommand {
    /// Focus on a project
    Set {
        project: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Clear the focus
    Clear,
    /// Show the active focus
    Show,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// List projects
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one project
    Status { name: String },
    /// Progress of one or all projects
    Progress { name: Option<String> },
    /// Create a project
    New {
        title: String,
        #[arg(long)]
        context: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        vars: TemplateVars,
    },
    /// List tasks
    Tasks {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one task
    TaskStatus { id: String },
    /// Create a task
    AddTask {
        title: String,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        due_date: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        vars: TemplateVars,
    },
    /// Mark a task done
    Done {
        path: String,
        summary: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ContextCommand {
    /// One day (default today)
    Day { date: Option<String> },
    /// One week (default current)
    Week { week: Option<String> },
    /// One note and its recent activity
    Note {
        path: String,
        #[arg(long, default_value_t = DEFAULT_ACTIVITY_DAYS)]
        activity_days: u32,
    },
    /// The focused project
    Focus,
}
