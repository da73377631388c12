//! postshelf: a markdown-backed blog post service
//!
//! Posts are markdown documents with a YAML front-matter header stored in a
//! single directory. This crate reads them into typed records, searches and
//! paginates them, and serves them over HTTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod server;

use std::path::{Path, PathBuf};

use content::{Post, PostCatalog, PostPage, PostQuery, PostReader};
use error::Result;

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding post documents
    pub posts_dir: PathBuf,
}

impl Blog {
    /// Create a new blog from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);

        Self {
            config,
            base_dir,
            posts_dir,
        }
    }

    /// A reader over the configured posts directory
    pub fn reader(&self) -> PostReader {
        PostReader::new(&self.posts_dir, &self.config.post_extension)
    }

    /// A catalog over the configured posts directory
    pub fn catalog(&self) -> PostCatalog {
        PostCatalog::new(self.reader())
    }

    /// A listing query using the configured page size
    pub fn query(
        &self,
        page: Option<usize>,
        per_page: Option<usize>,
        search: Option<&str>,
    ) -> PostQuery {
        PostQuery::new(
            page.unwrap_or(1),
            per_page.unwrap_or(self.config.per_page),
            search.unwrap_or_default(),
        )
    }

    /// Load a single post by slug
    pub async fn get_post(&self, slug: &str) -> Option<Post> {
        self.reader().get_post(slug).await
    }

    /// List posts newest first
    pub async fn get_posts(
        &self,
        page: Option<usize>,
        per_page: Option<usize>,
        search: Option<&str>,
    ) -> Result<PostPage> {
        self.catalog()
            .get_posts(&self.query(page, per_page, search))
            .await
    }
}
