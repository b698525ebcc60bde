//! Entity directory client.
//!
//! A thin blocking client for the three directory calls quill needs:
//!
//! - `GET  /api/entity/{id}`: retrieve an entity (supervisor credentials)
//! - `POST /api/entity/search`: find entities by `data.<field>:<value>` query
//! - `POST /oauth2/token`: client-credentials grant for a scoped token
//!
//! Non-success responses are logged with their body and returned as errors;
//! nothing is retried.

mod client;
mod types;


pub use client::DirectoryClient;
pub use types::{Entity, TokenResponse};
