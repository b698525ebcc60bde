//! Stage execution and orchestration.

use super::{ArtifactStore, Stage, ValidationVerdict};
use crate::config::{PipelineConfig, ResolvedStage};
use crate::error::{QuillError, Result};
use crate::events::{Event, EventAction, EventLog};
use crate::prompt::render_stage_prompt;
use crate::resolver::{CredentialSource, ResolvedAgent};
use crate::runtime::{AgentInvoker, InvocationRequest, InvocationSession};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info, info_span, warn};

/// Characters of a verdict reply kept in the event log.
const VERDICT_REPLY_PREVIEW: usize = 200;

/// What a completed stage did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub output_path: PathBuf,
    pub bytes: usize,
    /// Remote calls made by the stage (2 when validation asked for a rewrite).
    pub invocations: usize,
    /// Set for the validate stage only.
    pub verdict: Option<ValidationVerdict>,
}

/// Runs stages against an artifact store, a credential source and an invoker.
pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    store: &'a ArtifactStore,
    credentials: &'a dyn CredentialSource,
    invoker: &'a dyn AgentInvoker,
    events: &'a EventLog,
}

/// A resolved agent bound to the endpoint and region it is invoked at.
struct AgentBinding<'s> {
    agent: ResolvedAgent,
    endpoint_id: String,
    region: &'s str,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a PipelineConfig,
        store: &'a ArtifactStore,
        credentials: &'a dyn CredentialSource,
        invoker: &'a dyn AgentInvoker,
        events: &'a EventLog,
    ) -> Self {
        Self {
            config,
            store,
            credentials,
            invoker,
            events,
        }
    }

    /// Run every stage from `start` to the end, stopping at the first failure.
    pub fn run_from(&self, start: Stage) -> Result<Vec<StageReport>> {
        let mut reports = Vec::new();
        for stage in start.remaining() {
            reports.push(self.run_stage(*stage)?);
        }
        Ok(reports)
    }

    /// Run a single stage.
    pub fn run_stage(&self, stage: Stage) -> Result<StageReport> {
        let _span = info_span!("stage", %stage).entered();
        self.events
            .record(Event::new(EventAction::StageStarted).with_stage(stage));

        match self.execute(self.config.stage(stage)) {
            Ok(report) => {
                info!(
                    output = %report.output_path.display(),
                    bytes = report.bytes,
                    invocations = report.invocations,
                    "stage completed"
                );
                self.events.record(
                    Event::new(EventAction::StageCompleted)
                        .with_stage(stage)
                        .with_details(json!({
                            "output": report.output_path.display().to_string(),
                            "bytes": report.bytes,
                            "invocations": report.invocations,
                        })),
                );
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "stage failed; no output written");
                self.events.record(
                    Event::new(EventAction::StageFailed)
                        .with_stage(stage)
                        .with_details(json!({ "error": e.to_string() })),
                );
                Err(e)
            }
        }
    }

    fn execute(&self, settings: ResolvedStage<'_>) -> Result<StageReport> {
        let stage = settings.stage;
        let content = self.store.read(stage.input())?;
        let binding = self.bind(&settings)?;

        let (output, invocations, verdict) = match stage {
            Stage::Draft | Stage::Polish => {
                let prompt = render(settings.prompt, &content, stage, "prompt")?;
                let output = self.call(&binding, &prompt)?;
                (non_empty(output, stage)?, 1, None)
            }
            Stage::Validate => {
                let (output, invocations, verdict) = self.validate(&binding, &settings, content)?;
                (output, invocations, Some(verdict))
            }
        };

        if self.store.exists(stage.output()) {
            debug!(artifact = %stage.output(), "replacing existing artifact");
        }
        let output_path = self.store.write(stage.output(), &output)?;
        Ok(StageReport {
            stage,
            output_path,
            bytes: output.len(),
            invocations,
            verdict,
        })
    }

    /// Check the content, and rewrite it unless the reply is exactly `valid`.
    fn validate(
        &self,
        binding: &AgentBinding<'_>,
        settings: &ResolvedStage<'_>,
        content: String,
    ) -> Result<(String, usize, ValidationVerdict)> {
        let check_prompt = render(settings.prompt, &content, Stage::Validate, "prompt")?;
        let reply = self.call(binding, &check_prompt)?;
        let verdict = ValidationVerdict::from_reply(&reply);

        self.events.record(
            Event::new(EventAction::ValidationVerdict)
                .with_stage(Stage::Validate)
                .with_details(json!({
                    "verdict": verdict,
                    "reply": reply.chars().take(VERDICT_REPLY_PREVIEW).collect::<String>(),
                })),
        );

        match verdict {
            ValidationVerdict::Valid => {
                info!("content looks valid");
                Ok((content, 1, verdict))
            }
            ValidationVerdict::NeedsRewrite => {
                info!(reply = ?reply, "content has invalid claims; requesting rewrite");
                let rewrite_prompt = render(
                    settings.rewrite_prompt,
                    &content,
                    Stage::Validate,
                    "rewrite_prompt",
                )?;
                let rewritten = self.call(binding, &rewrite_prompt)?;
                Ok((non_empty(rewritten, Stage::Validate)?, 2, verdict))
            }
        }
    }

    /// Resolve the stage role and pick its endpoint: the entity's recorded
    /// endpoint first, then the pipeline file.
    fn bind(&self, settings: &ResolvedStage<'_>) -> Result<AgentBinding<'a>> {
        let agent = self.credentials.resolve(settings.role)?;
        let endpoint_id = agent
            .role
            .endpoint_id
            .clone()
            .or_else(|| settings.endpoint.map(str::to_string))
            .ok_or_else(|| {
                QuillError::Config(format!(
                    "no runtime endpoint for role '{}': set data.agentarn on the entity or {}.endpoint in the pipeline file",
                    settings.role, settings.stage
                ))
            })?;

        Ok(AgentBinding {
            agent,
            endpoint_id,
            region: &self.config.region,
        })
    }

    fn call(&self, binding: &AgentBinding<'_>, prompt: &str) -> Result<String> {
        let request = InvocationRequest {
            endpoint_id: &binding.endpoint_id,
            region: binding.region,
            system_prompt: &binding.agent.role.system_prompt,
            prompt,
            model: binding.agent.role.model.as_deref(),
        };
        self.invoker
            .invoke(&request, &InvocationSession::new(), &binding.agent.grant)
    }
}

fn render(template: &str, content: &str, stage: Stage, field: &str) -> Result<String> {
    render_stage_prompt(template, content)
        .map_err(|e| QuillError::Config(format!("{}.{}: {}", stage, field, e)))
}

/// Refuse to turn an empty agent reply into an artifact.
fn non_empty(output: String, stage: Stage) -> Result<String> {
    if output.trim().is_empty() {
        return Err(QuillError::Invocation(format!(
            "{} agent returned empty content",
            stage
        )));
    }
    Ok(output)
}
