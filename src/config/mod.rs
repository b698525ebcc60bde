//! Configuration for quill.
//!
//! Two sources are combined once at startup into a [`Config`] that is passed by
//! reference to every component:
//!
//! - Environment (optionally seeded from `.env`): directory API key, base URL and
//!   supervisor entity id. All three are mandatory.
//! - An optional `quill.yaml` pipeline file: region, runtime base URL, artifact
//!   file names, per-stage roles, endpoints and prompt templates. Unknown fields
//!   are ignored and every field has a default.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

pub use model::{Config, DirectorySettings, PipelineConfig, StageSettings};
pub use operations::ResolvedStage;
pub use types::{
    API_KEY_ENV, ArtifactNames, BASE_URL_ENV, DEFAULT_CONFIG_FILE, REGION_ENV, SUPERVISOR_ENV,
};
