//! Post reader - loads a single post document by slug

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::frontmatter::FrontMatterError;
use super::{FrontMatter, Post};

/// Why a post could not be loaded
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

/// Reads `<slug>.<extension>` documents from a posts directory
#[derive(Debug, Clone)]
pub struct PostReader {
    posts_dir: PathBuf,
    extension: String,
}

impl PostReader {
    /// Create a reader over `posts_dir` for files ending in `.{extension}`
    pub fn new(posts_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            posts_dir: posts_dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the document backing `slug`. The slug is not sanitized.
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.posts_dir.join(format!("{}.{}", slug, self.extension))
    }

    /// Load a post, reporting why it could not be read or parsed
    pub async fn load(&self, slug: &str) -> Result<Post, ReadError> {
        let path = self.path_for(slug);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(source) => return Err(ReadError::Io { path, source }),
        };

        parse_post(slug, &text).map_err(|source| ReadError::FrontMatter { path, source })
    }

    /// Load a post, or `None` when the document is missing, unreadable or malformed.
    /// Failures are logged and never returned.
    pub async fn get_post(&self, slug: &str) -> Option<Post> {
        match self.load(slug).await {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!(slug, error = %e, "Failed to load post");
                None
            }
        }
    }
}

/// Build a post from a document's text. The slug always comes from the caller.
pub fn parse_post(slug: &str, text: &str) -> Result<Post, FrontMatterError> {
    let (fm, body) = FrontMatter::extract(text)?;
    let title = fm.title()?.to_string();
    let published_at = fm.published_at()?;

    Ok(Post {
        slug: slug.to_string(),
        title,
        published_at,
        content: body.to_string(),
        summary: fm.summary,
    })
}
