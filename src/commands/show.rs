//! Show a single post

use anyhow::Result;

use crate::content::Post;
use crate::Blog;

pub async fn run(blog: &Blog, slug: &str) -> Result<()> {
    match blog.get_post(slug).await {
        Some(post) => {
            print!("{}", render(&post));
            Ok(())
        }
        None => anyhow::bail!("Post not found: {}", slug),
    }
}

fn render(post: &Post) -> String {
    let mut out = format!(
        "{}\n{}\n",
        post.title,
        post.published_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(summary) = &post.summary {
        out.push_str(&format!("\n{}\n", summary));
    }
    out.push('\n');
    out.push_str(&post.content);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    #[test]
    fn test_render_post() {
        let post = Post {
            slug: "s".to_string(),
            title: "Title".to_string(),
            published_at: Utc.with_ymd_and_hms(2022, 11, 4, 15, 0, 0).unwrap(),
            content: "Body\n".to_string(),
            summary: Some("Short".to_string()),
        };

        assert_eq!(
            render(&post),
            "Title\n2022-11-04 15:00:00 UTC\n\nShort\n\nBody\n"
        );
    }

    #[tokio::test]
    async fn test_missing_post() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let err = run(&blog, "ghost").await.unwrap_err();
        assert_eq!(err.to_string(), "Post not found: ghost");
    }
}
