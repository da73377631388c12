//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::search::asciify;

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Slug (file name without extension)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub published_at: DateTime<Utc>,

    /// Raw markdown body
    pub content: String,

    /// Short description shown in listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Post {
    /// Whether the title, body or summary contains an already folded search term
    pub fn matches(&self, folded_term: &str) -> bool {
        asciify(&self.title).contains(folded_term)
            || asciify(&self.content).contains(folded_term)
            || self
                .summary
                .as_deref()
                .is_some_and(|summary| asciify(summary).contains(folded_term))
    }
}

/// One page of a post listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total_pages: usize,
}
