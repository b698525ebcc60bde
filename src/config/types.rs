//! Configuration constants and defaults.

use crate::pipeline::ArtifactKind;
use serde::{Deserialize, Serialize};

/// Directory API key.
pub const API_KEY_ENV: &str = "FUSIONAUTH_API_KEY";
/// Directory base URL, e.g. `https://auth.example.com`.
pub const BASE_URL_ENV: &str = "FUSIONAUTH_BASE_URL";
/// Entity id of the supervisor identity whose credentials are exchanged for grants.
pub const SUPERVISOR_ENV: &str = "SUPERVISOR_ENTITY_ID";
/// Optional region override.
pub const REGION_ENV: &str = "QUILL_REGION";

/// Pipeline file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "quill.yaml";

pub(crate) fn default_region() -> String {
    "us-west-2".to_string()
}

pub(crate) fn default_event_log() -> Option<String> {
    Some(".quill/events.ndjson".to_string())
}

/// File names for each artifact, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactNames {
    pub outline: String,
    pub drafted: String,
    pub validated: String,
    pub polished: String,
}

impl ArtifactNames {
    /// File name configured for `kind`.
    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Outline => &self.outline,
            ArtifactKind::Drafted => &self.drafted,
            ArtifactKind::Validated => &self.validated,
            ArtifactKind::Polished => &self.polished,
        }
    }
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            outline: ArtifactKind::Outline.default_file_name().to_string(),
            drafted: ArtifactKind::Drafted.default_file_name().to_string(),
            validated: ArtifactKind::Validated.default_file_name().to_string(),
            polished: ArtifactKind::Polished.default_file_name().to_string(),
        }
    }
}
