//! Shared fixtures for tools integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use mdvault_core::{FixedClock, Vault};
use mdvault_tools::{CommandRunner, DelegateError, VaultTools};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

type Responder = Box<dyn Fn(&[String]) -> Result<String, DelegateError> + Send + Sync>;

/// Records every invocation and answers with a canned response
pub struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    respond: Responder,
}

impl RecordingRunner {
    pub fn replying(output: &str) -> Arc<Self> {
        let output = output.to_string();
        Self::with(move |_| Ok(output.clone()))
    }

    pub fn with<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&[String]) -> Result<String, DelegateError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Vec<String> {
        self.calls().last().cloned().unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, args: &[String]) -> Result<String, DelegateError> {
        self.calls.lock().unwrap().push(args.to_vec());
        (self.respond)(args)
    }
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2026, 2, 18)
            .unwrap()
            .and_hms_opt(17, 5, 9)
            .unwrap(),
    )
}

pub fn write(root: &Path, name: &str, text: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

pub fn tools(dir: &TempDir, runner: Arc<RecordingRunner>) -> VaultTools<FixedClock> {
    VaultTools::new(
        Vault::open(dir.path()).unwrap(),
        "Journal/Daily/%Y-%m-%d.md",
        runner,
        fixed_clock(),
    )
}

pub fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
