//! Role descriptors and access grants.

use std::fmt;

/// What a stage needs to know about the agent behind a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRole {
    /// Directory `data.agenttype` value.
    pub name: String,
    pub system_prompt: String,
    /// Model identifier; `None` lets the runtime pick its default.
    pub model: Option<String>,
    /// Runtime endpoint from `data.agentarn`, if the entity records one.
    pub endpoint_id: Option<String>,
}

/// A short-lived bearer token. Never persisted, never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessGrant {
    token: String,
}

impl AccessGrant {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AccessGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGrant")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A role descriptor together with the grant to invoke it.
#[derive(Debug, Clone)]
pub struct ResolvedAgent {
    pub role: AgentRole,
    pub grant: AccessGrant,
}

/// Scope requested when invoking the entity with `client_id`.
pub fn invoke_scope(client_id: &str) -> String {
    format!("target-entity:{}:invoke", client_id)
}
