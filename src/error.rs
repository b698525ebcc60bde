//! Error types for the quill CLI.
//!
//! Uses thiserror for derive macros. Every failure is fatal to the stage that
//! hit it; the variant only decides the message and the process exit code.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for quill operations.
#[derive(Error, Debug)]
pub enum QuillError {
    /// Missing environment variables, invalid pipeline file, or bad templates.
    #[error("configuration error: {0}")]
    Config(String),

    /// A stage input artifact is missing or an artifact could not be read or written.
    #[error("artifact error: {0}")]
    Artifact(String),

    /// The entity directory was unreachable or answered with a non-success status.
    #[error("directory request failed: {0}")]
    Directory(String),

    /// No directory entity is tagged with the requested role.
    #[error("no agent entity found with agenttype '{0}'")]
    RoleNotFound(String),

    /// Supervisor credentials or token issuance failed.
    #[error("authorization failed: {0}")]
    Auth(String),

    /// The agent runtime answered with an error status.
    #[error("agent runtime returned HTTP {status}: {body}")]
    InvocationStatus {
        /// HTTP status code returned by the runtime.
        status: u16,
        /// Response body exactly as received.
        body: String,
    },

    /// Transport failure or a response that does not carry a text result.
    #[error("agent invocation failed: {0}")]
    Invocation(String),
}

impl QuillError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            QuillError::Config(_) => exit_codes::CONFIG_ERROR,
            QuillError::Artifact(_) => exit_codes::ARTIFACT_FAILURE,
            QuillError::Directory(_) | QuillError::RoleNotFound(_) | QuillError::Auth(_) => {
                exit_codes::DIRECTORY_FAILURE
            }
            QuillError::InvocationStatus { .. } | QuillError::Invocation(_) => {
                exit_codes::INVOCATION_FAILURE
            }
        }
    }
}

/// Result type alias for quill operations.
pub type Result<T> = std::result::Result<T, QuillError>;
