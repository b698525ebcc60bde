//! Exit code constants for the quill CLI.
//!
//! - 0: Success
//! - 1: Configuration error (missing environment, bad pipeline file)
//! - 2: Artifact error (missing input, unreadable or unwritable file)
//! - 3: Directory or authorization failure
//! - 4: Agent invocation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Configuration error: missing environment variables, invalid YAML or templates.
pub const CONFIG_ERROR: i32 = 1;

/// Artifact error: a stage input is missing or an artifact could not be read or written.
pub const ARTIFACT_FAILURE: i32 = 2;

/// Directory failure: entity lookup, role search, or token issuance failed.
pub const DIRECTORY_FAILURE: i32 = 3;

/// Invocation failure: the remote agent runtime rejected or garbled a call.
pub const INVOCATION_FAILURE: i32 = 4;
