use serde::{Deserialize, Serialize};

pub const COMMENT_MAX_LENGTH: usize = 1000;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CommentRequest {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub comment: String,
}

impl CommentRequest {
    /// The comment without surrounding whitespace, or a message explaining
    /// why it cannot be posted.
    pub fn validate(&self) -> Result<&str, String> {
        let comment = self.comment.trim();

        if comment.is_empty() {
            return Err("Comment cannot be empty.".to_string());
        }

        if comment.chars().count() > COMMENT_MAX_LENGTH {
            return Err(format!(
                "Comment must be max {COMMENT_MAX_LENGTH} characters long."
            ));
        }

        Ok(comment)
    }
}
