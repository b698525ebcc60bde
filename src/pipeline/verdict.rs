//! Validation verdicts.
//!
//! The validate stage moves through `checking -> valid -> done` or
//! `checking -> rewriting -> done`. The branch is decided by comparing the
//! check reply against [`VALID_REPLY`] exactly: case-sensitive, no trimming,
//! no punctuation stripping. `Valid`, `valid.` and `valid\n` all trigger a
//! rewrite.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The only reply that lets content pass through unchanged.
pub const VALID_REPLY: &str = "valid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationVerdict {
    /// Content passes through unchanged.
    Valid,
    /// Content goes back to the agent with the rewrite prompt.
    NeedsRewrite,
}

impl ValidationVerdict {
    pub fn from_reply(reply: &str) -> Self {
        if reply == VALID_REPLY {
            ValidationVerdict::Valid
        } else {
            ValidationVerdict::NeedsRewrite
        }
    }
}

impl fmt::Display for ValidationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationVerdict::Valid => write!(f, "valid"),
            ValidationVerdict::NeedsRewrite => write!(f, "needs rewrite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_reply_is_valid() {
        assert_eq!(ValidationVerdict::from_reply("valid"), ValidationVerdict::Valid);
    }

    #[test]
    fn near_misses_need_rewrite() {
        for reply in [
            "Valid", "VALID", "valid.", " valid", "valid\n", "'valid'", "invalid", "", "valid!",
        ] {
            assert_eq!(
                ValidationVerdict::from_reply(reply),
                ValidationVerdict::NeedsRewrite,
                "reply {:?}",
                reply
            );
        }
    }
}
