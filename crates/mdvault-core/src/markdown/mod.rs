//! Line-level Markdown structure: headings, sections and checkbox tasks

pub mod headings;
mod section;
mod tasks;

pub use headings::{find_heading, parse_heading, section_end, Heading};
pub use section::{append_to_section, AppendOutcome};
pub use tasks::{set_task_status, TaskToggle};
