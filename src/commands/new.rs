//! Create a new post

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Write a new post document with a front-matter scaffold and return its path
pub fn create_post(
    blog: &Blog,
    title: &str,
    slug: Option<&str>,
    summary: Option<&str>,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title: {:?}", title);
    }

    fs::create_dir_all(&blog.posts_dir)?;
    let file_path = blog.reader().path_for(&slug);

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut content = format!(
        "---\ntitle: {}\npublishedAt: {}\n",
        yaml_string(title),
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    );
    if let Some(summary) = summary {
        content.push_str(&format!("summary: {}\n", yaml_string(summary)));
    }
    content.push_str("---\n");

    fs::write(&file_path, content)?;
    tracing::debug!("Created post {} at {:?}", slug, file_path);

    Ok(file_path)
}

/// Quote a scalar so titles with `:` or `#` stay strings
fn yaml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Run the new command
pub fn run(blog: &Blog, title: &str, slug: Option<&str>, summary: Option<&str>) -> Result<()> {
    let path = create_post(blog, title, slug, summary, Utc::now())?;
    println!("Created: {:?}", path);
    Ok(())
}
