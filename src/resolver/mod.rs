//! Credential resolution for agent roles.
//!
//! Resolving a role name (for example `draftcontent`) takes three directory
//! round-trips:
//!
//! 1. Retrieve the supervisor entity and read its client id/secret.
//! 2. Search for the entity tagged `data.agenttype:<role>` and read its client
//!    id, `systemprompt`, optional `model` and optional `agentarn`.
//! 3. Exchange the supervisor credentials for a token scoped to
//!    `target-entity:<client id>:invoke`.
//!
//! Every failure is fatal to the calling stage. Nothing is cached: each stage
//! resolves its own role and receives a fresh grant.

mod types;


pub use types::{AccessGrant, AgentRole, ResolvedAgent, invoke_scope};

use crate::config::Config;
use crate::directory::{DirectoryClient, Entity};
use crate::error::{QuillError, Result};
use tracing::{debug, info, warn};

/// Anything that can turn a role name into a role descriptor plus access grant.
pub trait CredentialSource {
    fn resolve(&self, role_name: &str) -> Result<ResolvedAgent>;
}

/// Resolves roles against the entity directory on behalf of the supervisor.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    directory: DirectoryClient,
    supervisor_entity_id: String,
}

impl CredentialResolver {
    pub fn new(directory: DirectoryClient, supervisor_entity_id: impl Into<String>) -> Self {
        Self {
            directory,
            supervisor_entity_id: supervisor_entity_id.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let directory = DirectoryClient::new(&config.directory)?;
        Ok(Self::new(
            directory,
            config.directory.supervisor_entity_id.clone(),
        ))
    }

    /// The supervisor's own client id and secret.
    fn supervisor_credentials(&self) -> Result<(String, String)> {
        let entity = self
            .directory
            .retrieve_entity(&self.supervisor_entity_id)?;

        match (entity.client_id, entity.client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Ok((id, secret)),
            _ => Err(QuillError::Auth(format!(
                "supervisor entity '{}' has no client credentials",
                self.supervisor_entity_id
            ))),
        }
    }

    /// The first entity tagged with `role_name`.
    fn find_role_entity(&self, role_name: &str) -> Result<Entity> {
        let query = format!("data.agenttype:{}", role_name);
        let mut entities = self.directory.search_entities(&query)?;

        if entities.len() > 1 {
            warn!(
                role = role_name,
                matches = entities.len(),
                "multiple entities share this agenttype; using the first"
            );
        }

        if entities.is_empty() {
            return Err(QuillError::RoleNotFound(role_name.to_string()));
        }
        Ok(entities.swap_remove(0))
    }
}

impl CredentialSource for CredentialResolver {
    fn resolve(&self, role_name: &str) -> Result<ResolvedAgent> {
        let (supervisor_id, supervisor_secret) = self.supervisor_credentials()?;
        debug!(supervisor = %supervisor_id, "supervisor credentials retrieved");

        let entity = self.find_role_entity(role_name)?;
        let target_client_id = entity
            .client_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                QuillError::Directory(format!(
                    "entity for agenttype '{}' has no clientId",
                    role_name
                ))
            })?;
        let system_prompt = entity.data_str("systemprompt").ok_or_else(|| {
            QuillError::Directory(format!(
                "entity for agenttype '{}' has no data.systemprompt",
                role_name
            ))
        })?;

        let role = AgentRole {
            name: role_name.to_string(),
            system_prompt: system_prompt.to_string(),
            model: entity.data_str("model").map(str::to_string),
            endpoint_id: entity.data_str("agentarn").map(str::to_string),
        };

        let scope = invoke_scope(&target_client_id);
        let token = self.directory.client_credentials_grant(
            &supervisor_id,
            &supervisor_secret,
            &scope,
        )?;
        if token.access_token.is_empty() {
            return Err(QuillError::Auth(format!(
                "token endpoint returned an empty access token for scope '{}'",
                scope
            )));
        }

        info!(
            role = role_name,
            target = %target_client_id,
            model = role.model.as_deref().unwrap_or("<runtime default>"),
            "resolved agent role"
        );

        Ok(ResolvedAgent {
            role,
            grant: AccessGrant::new(token.access_token),
        })
    }
}
