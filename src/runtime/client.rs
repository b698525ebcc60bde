//! Blocking HTTP client for the agent runtime.

use super::{AgentInvoker, InvocationRequest, InvocationSession, SESSION_HEADER, TRACE_HEADER};
use crate::config::PipelineConfig;
use crate::error::{QuillError, Result};
use crate::resolver::AccessGrant;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Bytes of an unexpected response body echoed into the log.
const UNEXPECTED_BODY_PREVIEW: usize = 500;

#[derive(Serialize)]
struct InvocationBody<'a> {
    system_prompt: &'a str,
    prompt: &'a str,
    model: Option<&'a str>,
}

/// Agent runtime client.
#[derive(Debug, Clone)]
pub struct RuntimeClient {
    http: Client,
    /// Replaces the per-region default base URL when set.
    base_url: Option<String>,
}

impl RuntimeClient {
    pub fn new(base_url: Option<String>) -> Result<Self> {
        // Agent runs regularly outlast reqwest's 30 second blocking default.
        let http = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| {
                QuillError::Invocation(format!("failed to build runtime HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: base_url.map(|b| b.trim_end_matches('/').to_string()),
        })
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Self::new(config.runtime_base_url.clone())
    }

    fn base_url_for(&self, region: &str) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| default_base_url(region))
    }
}

impl AgentInvoker for RuntimeClient {
    fn invoke(
        &self,
        request: &InvocationRequest<'_>,
        session: &InvocationSession,
        grant: &AccessGrant,
    ) -> Result<String> {
        let url = invocation_url(&self.base_url_for(request.region), request.endpoint_id);
        info!(
            endpoint = request.endpoint_id,
            trace_id = %session.trace_id,
            session_id = %session.session_id,
            "invoking agent"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(grant.token())
            .header(TRACE_HEADER, session.trace_id.to_string())
            .header(SESSION_HEADER, session.session_id.to_string())
            .json(&InvocationBody {
                system_prompt: request.system_prompt,
                prompt: request.prompt,
                model: request.model,
            })
            .send()
            .map_err(|e| QuillError::Invocation(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            QuillError::Invocation(format!("failed to read agent runtime response: {}", e))
        })?;

        if status == StatusCode::OK {
            let text = extract_result_text(&body)?;
            debug!(chars = text.chars().count(), "agent replied");
            return Ok(text);
        }

        if status.as_u16() >= 400 {
            error!(status = status.as_u16(), body = %body, "agent runtime returned an error");
            return Err(QuillError::InvocationStatus {
                status: status.as_u16(),
                body,
            });
        }

        let preview: String = body.chars().take(UNEXPECTED_BODY_PREVIEW).collect();
        warn!(status = status.as_u16(), body = %preview, "unexpected status from agent runtime");
        Err(QuillError::Invocation(format!(
            "unexpected status {} from agent runtime",
            status.as_u16()
        )))
    }
}

/// `https://bedrock-agentcore.<region>.amazonaws.com`
pub fn default_base_url(region: &str) -> String {
    format!("https://bedrock-agentcore.{}.amazonaws.com", region)
}

/// Invocation URL for an endpoint. Every byte of the endpoint id outside
/// `A-Z a-z 0-9 - _ . ~` is percent-encoded, so ARNs fit in one path segment.
pub fn invocation_url(base_url: &str, endpoint_id: &str) -> String {
    format!(
        "{}/runtimes/{}/invocations?qualifier=DEFAULT",
        base_url.trim_end_matches('/'),
        urlencoding::encode(endpoint_id)
    )
}

/// The reply text at `result.content[0].text`.
fn extract_result_text(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        QuillError::Invocation(format!("agent runtime returned invalid JSON: {}", e))
    })?;

    value
        .pointer("/result/content/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            QuillError::Invocation(
                "agent runtime response has no result.content[0].text".to_string(),
            )
        })
}
