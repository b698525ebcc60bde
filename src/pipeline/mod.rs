//! The content pipeline: draft, validate (with rewrite), polish.
//!
//! Stages run strictly in order, one blocking remote call at a time. Each
//! stage reads its input artifact, resolves a fresh grant for its role,
//! invokes the role's agent, and only then writes its output artifact, so a
//! failed stage leaves no output behind. Artifacts from earlier stages stay on
//! disk and a later run can start from any stage.

mod artifacts;
mod runner;
mod stage;
mod verdict;


pub use artifacts::ArtifactStore;
pub use runner::{Pipeline, StageReport};
pub use stage::{ArtifactKind, Stage};
pub use verdict::{VALID_REPLY, ValidationVerdict};
