//! Implementation of the `quill resolve` command.
//!
//! Runs the same credential resolution a stage performs, without invoking the
//! agent. Useful to check directory setup before spending a pipeline run.

use crate::config::{Config, PipelineConfig};
use crate::error::Result;
use crate::pipeline::Stage;
use crate::resolver::{CredentialResolver, CredentialSource, ResolvedAgent};

/// Execute `quill resolve <role>`.
pub fn cmd_resolve(config: &Config, role_name: &str) -> Result<()> {
    let resolver = CredentialResolver::from_config(config)?;
    let agent = resolver.resolve(role_name)?;
    let configured = configured_endpoint(&config.pipeline, role_name);

    print!("{}", describe(&agent, configured));
    Ok(())
}

/// Endpoint set in the pipeline file for the first stage using `role_name`.
fn configured_endpoint<'a>(
    pipeline: &'a PipelineConfig,
    role_name: &str,
) -> Option<(Stage, &'a str)> {
    Stage::ALL.iter().find_map(|stage| {
        let settings = pipeline.stage(*stage);
        match settings.endpoint {
            Some(endpoint) if settings.role == role_name => Some((*stage, endpoint)),
            _ => None,
        }
    })
}

fn describe(agent: &ResolvedAgent, configured: Option<(Stage, &str)>) -> String {
    let role = &agent.role;
    let endpoint = match (&role.endpoint_id, configured) {
        (Some(arn), _) => format!("{} (data.agentarn)", arn),
        (None, Some((stage, endpoint))) => format!("{} ({}.endpoint)", endpoint, stage),
        (None, None) => "<not set>".to_string(),
    };
    let token = if agent.grant.token().is_empty() {
        "missing"
    } else {
        "issued"
    };

    let mut out = String::new();
    out.push_str(&format!("Role:     {}\n", role.name));
    out.push_str(&format!("Endpoint: {}\n", endpoint));
    out.push_str(&format!(
        "Model:    {}\n",
        role.model.as_deref().unwrap_or("<runtime default>")
    ));
    out.push_str(&format!("Token:    {}\n", token));
    out.push('\n');
    out.push_str("System prompt:\n");
    for line in role.system_prompt.lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out
}
