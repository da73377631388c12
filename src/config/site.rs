//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub url: String,

    // Content
    /// Directory holding post documents, relative to the base directory
    pub posts_dir: String,
    /// File extension of post documents (without the dot)
    pub post_extension: String,

    // Pagination
    pub per_page: usize,

    // Rendering
    pub highlight_theme: String,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "postshelf".to_string(),
            description: String::new(),
            url: "http://localhost:4000".to_string(),

            posts_dir: "content/posts".to_string(),
            post_extension: "md".to_string(),

            per_page: 10,

            highlight_theme: "base16-ocean.dark".to_string(),

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Compose a page title: `"{title} ▲ {site}"`, or the site title alone
    pub fn page_title(&self, title: Option<&str>) -> String {
        match title {
            Some(title) if !title.is_empty() => format!("{} ▲ {}", title, self.title),
            _ => self.title.clone(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 4000,
        }
    }
}
