//! Wire types for directory responses.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// A directory entity. Only the fields quill reads are modeled.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    pub client_secret: Option<String>,

    /// Free-form entity data (`agenttype`, `systemprompt`, `model`, `agentarn`).
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Entity {
    /// A string field from `data`, treating empty strings as absent.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("data", &self.data)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct EntityResponse {
    pub entity: Entity,
}

#[derive(Debug, Deserialize)]
pub(super) struct EntitySearchResponse {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// Successful client-credentials grant.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,

    #[serde(default)]
    pub expires_in: Option<u64>,

    #[serde(default)]
    pub scope: Option<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}
