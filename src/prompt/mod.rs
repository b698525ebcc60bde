//! Prompt construction for pipeline stages.
//!
//! Each stage prompt is a template with a `{content}` placeholder that is
//! replaced by the stage's input artifact. Use `{{` and `}}` for literal braces.
//!
//! ```text
//! please polish this content ...
//!
//! {content}
//! ```

pub mod defaults;
mod template;

pub use template::{TemplateError, check_template, render_template, vars};

/// The only variable stage templates may reference.
pub const CONTENT_VAR: &str = "content";

/// Render a stage prompt by substituting the artifact content.
pub fn render_stage_prompt(template: &str, content: &str) -> Result<String, TemplateError> {
    render_template(template, &vars([(CONTENT_VAR, content)]))
}
