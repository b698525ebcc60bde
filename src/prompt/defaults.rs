//! Built-in prompt templates, used when the pipeline file does not override them.

/// Draft stage: turn the outline into a full post.
pub const DRAFT_PROMPT: &str = "please write a blog post based on the following outline. \
Target 1500-3000 words. Please mimic the style found on https://fusionauth.io/blog, which is \
friendly and precise. The audience is engineering leaders. Please return just the content, \
not the outline or any other commentary.\n\n{content}";

/// Validate stage, first call: the agent must answer with a bare verdict.
pub const VALIDATE_CHECK_PROMPT: &str = "please validate this blog post from a technical point \
of view. please return the single string 'valid' if it is a valid blog post, or the single \
string 'invalid' if there are any technical errors or inconsistencies that would require \
rewriting. Please do not return any other text. ignore any typos or grammar errors in your \
evaluation.\n\n{content}";

/// Validate stage, second call: only issued when the verdict was not `valid`.
pub const VALIDATE_REWRITE_PROMPT: &str = "please validate this blog post from a technical \
point of view. if it has incorrect statements, please rewrite it. Please return only the \
content, no preface or other commentary.\n\n{content}";

/// Polish stage: style guide compliance rewrite.
pub const POLISH_PROMPT: &str = "please polish this content to make sure it meets with the \
voice and content guidelines that FusionAuth upholds. You can find those here: \
https://github.com/FusionAuth/fusionauth-site/blob/main/DocsDevREADME.md . Please return just \
the content, not the outline or any other commentary.\n\n{content}";
