//! Remote agent invocation.
//!
//! One call is one blocking HTTPS POST:
//!
//! ```text
//! POST {base}/runtimes/{percent-encoded endpoint id}/invocations?qualifier=DEFAULT
//! Authorization: Bearer <token>
//! X-Amzn-Trace-Id: <uuid>
//! X-Amzn-Bedrock-AgentCore-Runtime-Session-Id: <uuid>
//!
//! {"system_prompt": "...", "prompt": "...", "model": "..." | null}
//! ```
//!
//! A 200 response carries the agent's reply at `result.content[0].text`.
//! Anything else is an error; there is no retry.

mod client;


pub use client::{RuntimeClient, default_base_url, invocation_url};

use crate::error::Result;
use crate::resolver::AccessGrant;
use uuid::Uuid;

/// Header carrying the per-call trace id.
pub const TRACE_HEADER: &str = "X-Amzn-Trace-Id";
/// Header carrying the runtime session id.
pub const SESSION_HEADER: &str = "X-Amzn-Bedrock-AgentCore-Runtime-Session-Id";

/// Everything the runtime needs for one call, apart from credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationRequest<'a> {
    pub endpoint_id: &'a str,
    pub region: &'a str,
    pub system_prompt: &'a str,
    pub prompt: &'a str,
    pub model: Option<&'a str>,
}

/// Correlation ids for a single call. Carries no state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSession {
    pub trace_id: Uuid,
    pub session_id: Uuid,
}

impl InvocationSession {
    /// Fresh ids for one call.
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
        }
    }
}

impl Default for InvocationSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends prompts to a remote agent and returns its text reply.
pub trait AgentInvoker {
    fn invoke(
        &self,
        request: &InvocationRequest<'_>,
        session: &InvocationSession,
        grant: &AccessGrant,
    ) -> Result<String>;
}
