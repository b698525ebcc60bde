//! Pipeline stages and the artifacts they exchange.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A text artifact produced or consumed by a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Hand-written input to the whole pipeline.
    Outline,
    /// Output of the draft stage.
    Drafted,
    /// Output of the validate stage.
    Validated,
    /// Final output of the polish stage.
    Polished,
}

impl ArtifactKind {
    /// Default file name for this artifact in the working directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            ArtifactKind::Outline => "outline.md",
            ArtifactKind::Drafted => "drafted.md",
            ArtifactKind::Validated => "validated.md",
            ArtifactKind::Polished => "polished.md",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Outline => write!(f, "outline"),
            ArtifactKind::Drafted => write!(f, "drafted"),
            ArtifactKind::Validated => write!(f, "validated"),
            ArtifactKind::Polished => write!(f, "polished"),
        }
    }
}

/// One step of the content pipeline, in run order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Draft,
    Validate,
    Polish,
}

impl Stage {
    /// All stages in the order the orchestrator runs them.
    pub const ALL: [Stage; 3] = [Stage::Draft, Stage::Validate, Stage::Polish];

    /// Directory role (`data.agenttype`) used when the pipeline file does not override it.
    pub fn default_role(self) -> &'static str {
        match self {
            Stage::Draft => "draftcontent",
            Stage::Validate => "validatecontent",
            Stage::Polish => "polishcontent",
        }
    }

    /// Artifact this stage reads.
    pub fn input(self) -> ArtifactKind {
        match self {
            Stage::Draft => ArtifactKind::Outline,
            Stage::Validate => ArtifactKind::Drafted,
            Stage::Polish => ArtifactKind::Validated,
        }
    }

    /// Artifact this stage writes.
    pub fn output(self) -> ArtifactKind {
        match self {
            Stage::Draft => ArtifactKind::Drafted,
            Stage::Validate => ArtifactKind::Validated,
            Stage::Polish => ArtifactKind::Polished,
        }
    }

    /// This stage and every stage after it.
    pub fn remaining(self) -> &'static [Stage] {
        match self {
            Stage::Draft => &[Stage::Draft, Stage::Validate, Stage::Polish],
            Stage::Validate => &[Stage::Validate, Stage::Polish],
            Stage::Polish => &[Stage::Polish],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Draft => write!(f, "draft"),
            Stage::Validate => write!(f, "validate"),
            Stage::Polish => write!(f, "polish"),
        }
    }
}
