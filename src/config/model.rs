//! Config struct definitions.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Everything a pipeline run needs, built once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory connection settings from the environment.
    pub directory: DirectorySettings,

    /// Pipeline settings from `quill.yaml` (or defaults).
    pub pipeline: PipelineConfig,

    /// Directory holding the artifacts.
    pub work_dir: PathBuf,
}

/// Connection settings for the entity directory.
#[derive(Clone, PartialEq, Eq)]
pub struct DirectorySettings {
    pub api_key: String,
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub supervisor_entity_id: String,
}

impl fmt::Debug for DirectorySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectorySettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("supervisor_entity_id", &self.supervisor_entity_id)
            .finish()
    }
}

/// Contents of the optional `quill.yaml` pipeline file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Agent runtime region (default: "us-west-2").
    #[serde(default = "default_region")]
    pub region: String,

    /// Overrides `https://bedrock-agentcore.<region>.amazonaws.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_base_url: Option<String>,

    /// NDJSON event log path relative to the working directory; `null` disables it.
    #[serde(default = "default_event_log")]
    pub event_log: Option<String>,

    /// Artifact file names.
    #[serde(default)]
    pub artifacts: ArtifactNames,

    #[serde(default)]
    pub draft: StageSettings,

    #[serde(default)]
    pub validate: StageSettings,

    #[serde(default)]
    pub polish: StageSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            runtime_base_url: None,
            event_log: default_event_log(),
            artifacts: ArtifactNames::default(),
            draft: StageSettings::default(),
            validate: StageSettings::default(),
            polish: StageSettings::default(),
        }
    }
}

/// Per-stage overrides. Unset fields fall back to the stage's built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    /// Directory role (`data.agenttype`) to resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Runtime endpoint (agent ARN), used when the entity has no `data.agentarn`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Prompt template; for the validate stage this is the verdict check prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Rewrite prompt template (validate stage only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite_prompt: Option<String>,
}
