//! Append-only event log for pipeline runs.
//!
//! Events are stored in NDJSON format (one JSON object per line), by default in
//! `.quill/events.ndjson` under the working directory.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `stage_started`, `validation_verdict`, `stage_completed`, `stage_failed`
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `stage`: Optional stage name
//! - `details`: Freeform object with action-specific details
//!
//! The log is an audit trail, not pipeline state: a failed append is reported
//! as a warning and never fails the stage that produced it.

use crate::error::{QuillError, Result};
use crate::pipeline::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// A stage read its input and is about to resolve credentials.
    StageStarted,
    /// The validate stage received its verdict reply.
    ValidationVerdict,
    /// A stage wrote its output artifact.
    StageCompleted,
    /// A stage aborted; no output artifact was written.
    StageFailed,
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,

    pub action: EventAction,

    /// The actor who ran the pipeline (e.g., `user@HOST`).
    pub actor: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,

    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            stage: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| QuillError::Artifact(format!("failed to serialize event to JSON: {}", e)))
    }
}

fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append one event line to `path`, creating the file and its directory.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            QuillError::Artifact(format!(
                "failed to create events directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            QuillError::Artifact(format!(
                "failed to open events file '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        QuillError::Artifact(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Where a run records its events. A disabled log drops them.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append `event`, downgrading failures to a warning.
    pub fn record(&self, event: Event) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = append_event(path, &event) {
            warn!(error = %e, action = ?event.action, "could not record pipeline event");
        }
    }
}
