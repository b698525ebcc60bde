//! Blocking HTTP client for the entity directory.

use super::types::{Entity, EntityResponse, EntitySearchResponse, TokenResponse};
use crate::config::DirectorySettings;
use crate::error::{QuillError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error};

/// Client for entity lookups and client-credentials grants.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl DirectoryClient {
    pub fn new(settings: &DirectorySettings) -> Result<Self> {
        let http = Client::builder().build().map_err(|e| {
            QuillError::Directory(format!("failed to build directory HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    /// Retrieve an entity by id.
    pub fn retrieve_entity(&self, entity_id: &str) -> Result<Entity> {
        let url = format!(
            "{}/api/entity/{}",
            self.base_url,
            urlencoding::encode(entity_id)
        );
        debug!(entity_id, "retrieving entity");

        let request = self.http.get(url).header(AUTHORIZATION, &self.api_key);
        let response: EntityResponse =
            self.execute(request, "entity retrieval", QuillError::Directory)?;
        Ok(response.entity)
    }

    /// Search entities with a query string such as `data.agenttype:draftcontent`.
    pub fn search_entities(&self, query: &str) -> Result<Vec<Entity>> {
        let url = format!("{}/api/entity/search", self.base_url);
        debug!(query, "searching entities");

        let request = self
            .http
            .post(url)
            .header(AUTHORIZATION, &self.api_key)
            .json(&json!({ "search": { "queryString": query } }));
        let response: EntitySearchResponse =
            self.execute(request, "entity search", QuillError::Directory)?;
        Ok(response.entities)
    }

    /// Exchange client credentials for an access token limited to `scope`.
    pub fn client_credentials_grant(
        &self,
        client_id: &str,
        client_secret: &str,
        scope: &str,
    ) -> Result<TokenResponse> {
        let url = format!("{}/oauth2/token", self.base_url);
        debug!(client_id, scope, "requesting client credentials grant");

        let request = self.http.post(url).form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", scope),
        ]);
        self.execute(request, "client credentials grant", QuillError::Auth)
    }

    /// Send a request and decode a successful JSON body.
    ///
    /// Transport failures are always `Directory` errors; non-success statuses and
    /// undecodable bodies use `to_error`.
    fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
        to_error: fn(String) -> QuillError,
    ) -> Result<T> {
        let response = request.send().map_err(|e| {
            QuillError::Directory(format!("{} could not reach the directory: {}", operation, e))
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            QuillError::Directory(format!("{} response could not be read: {}", operation, e))
        })?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "{} failed", operation);
            return Err(to_error(format!(
                "{} returned HTTP {}: {}",
                operation,
                status.as_u16(),
                body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            to_error(format!(
                "{} returned an unexpected response body: {}",
                operation, e
            ))
        })
    }
}
