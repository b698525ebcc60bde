//! Config loading, validation, and lookups.

use super::model::{Config, DirectorySettings, PipelineConfig, StageSettings};
use super::types::*;
use crate::error::{QuillError, Result};
use crate::pipeline::{ArtifactKind, Stage};
use crate::prompt::{CONTENT_VAR, check_template, defaults};
use std::path::{Path, PathBuf};

impl Config {
    /// Build the run configuration from the process environment and the pipeline file.
    ///
    /// `config_path` defaults to `quill.yaml` inside `work_dir`; a missing default
    /// file means all defaults, a missing explicit file is an error.
    pub fn load(work_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok();
        let directory = DirectorySettings::from_lookup(lookup)?;

        let mut pipeline = match config_path {
            Some(path) => PipelineConfig::load(path)?,
            None => {
                let default_path = work_dir.join(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    PipelineConfig::load(&default_path)?
                } else {
                    PipelineConfig::default()
                }
            }
        };

        if let Some(region) = lookup(REGION_ENV).filter(|r| !r.trim().is_empty()) {
            pipeline.region = region.trim().to_string();
        }
        pipeline.validate()?;

        Ok(Self {
            directory,
            pipeline,
            work_dir: work_dir.to_path_buf(),
        })
    }

    /// Path of the event log, if enabled.
    pub fn event_log_path(&self) -> Option<PathBuf> {
        self.pipeline
            .event_log
            .as_deref()
            .map(|log| self.work_dir.join(log))
    }
}

impl DirectorySettings {
    /// Read directory settings through `lookup` (normally `std::env::var`).
    ///
    /// Empty values count as missing. All missing names are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = read(API_KEY_ENV);
        let base_url = read(BASE_URL_ENV);
        let supervisor_entity_id = read(SUPERVISOR_ENV);

        match (api_key, base_url, supervisor_entity_id) {
            (Some(api_key), Some(base_url), Some(supervisor_entity_id)) => Ok(Self {
                api_key,
                base_url: base_url.trim().trim_end_matches('/').to_string(),
                supervisor_entity_id: supervisor_entity_id.trim().to_string(),
            }),
            (api_key, base_url, supervisor) => {
                let missing: Vec<&str> = [
                    (API_KEY_ENV, api_key.is_none()),
                    (BASE_URL_ENV, base_url.is_none()),
                    (SUPERVISOR_ENV, supervisor.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, is_missing)| is_missing.then_some(name))
                .collect();

                Err(QuillError::Config(format!(
                    "{}, {}, and {} must be set in the environment or a .env file (missing: {})",
                    API_KEY_ENV,
                    BASE_URL_ENV,
                    SUPERVISOR_ENV,
                    missing.join(", ")
                )))
            }
        }
    }
}

/// A stage's settings with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStage<'a> {
    pub stage: Stage,
    pub role: &'a str,
    pub endpoint: Option<&'a str>,
    pub prompt: &'a str,
    /// Only meaningful for the validate stage.
    pub rewrite_prompt: &'a str,
}

impl PipelineConfig {
    /// Load the pipeline file from YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            QuillError::Config(format!(
                "failed to read pipeline file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate pipeline settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)
            .map_err(|e| QuillError::Config(format!("failed to parse pipeline YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate settings.
    ///
    /// Validation rules:
    /// - `region` must be non-empty
    /// - `runtime_base_url`, when set, must be an http(s) URL
    /// - artifact names and stage roles must be non-empty
    /// - prompt templates must be well-formed and only reference `{content}`
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(QuillError::Config(
                "pipeline validation failed: region must not be empty".to_string(),
            ));
        }

        if let Some(base) = &self.runtime_base_url
            && !(base.starts_with("https://") || base.starts_with("http://"))
        {
            return Err(QuillError::Config(format!(
                "pipeline validation failed: runtime_base_url must start with http:// or https:// (found '{}')",
                base
            )));
        }

        for kind in [
            ArtifactKind::Outline,
            ArtifactKind::Drafted,
            ArtifactKind::Validated,
            ArtifactKind::Polished,
        ] {
            if self.artifacts.get(kind).trim().is_empty() {
                return Err(QuillError::Config(format!(
                    "pipeline validation failed: artifacts.{} must not be empty",
                    kind
                )));
            }
        }

        for stage in Stage::ALL {
            let resolved = self.stage(stage);
            if resolved.role.trim().is_empty() {
                return Err(QuillError::Config(format!(
                    "pipeline validation failed: {}.role must not be empty",
                    stage
                )));
            }

            let mut templates = vec![("prompt", resolved.prompt)];
            if stage == Stage::Validate {
                templates.push(("rewrite_prompt", resolved.rewrite_prompt));
            }
            for (field, template) in templates {
                check_template(template, &[CONTENT_VAR]).map_err(|e| {
                    QuillError::Config(format!(
                        "pipeline validation failed: {}.{}: {}",
                        stage, field, e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Settings for `stage` with defaults applied.
    pub fn stage(&self, stage: Stage) -> ResolvedStage<'_> {
        let settings = self.stage_settings(stage);
        let default_prompt = match stage {
            Stage::Draft => defaults::DRAFT_PROMPT,
            Stage::Validate => defaults::VALIDATE_CHECK_PROMPT,
            Stage::Polish => defaults::POLISH_PROMPT,
        };

        ResolvedStage {
            stage,
            role: settings.role.as_deref().unwrap_or(stage.default_role()),
            endpoint: settings.endpoint.as_deref().filter(|e| !e.trim().is_empty()),
            prompt: settings.prompt.as_deref().unwrap_or(default_prompt),
            rewrite_prompt: settings
                .rewrite_prompt
                .as_deref()
                .unwrap_or(defaults::VALIDATE_REWRITE_PROMPT),
        }
    }

    fn stage_settings(&self, stage: Stage) -> &StageSettings {
        match stage {
            Stage::Draft => &self.draft,
            Stage::Validate => &self.validate,
            Stage::Polish => &self.polish,
        }
    }
}
