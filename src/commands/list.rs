//! List posts

use anyhow::Result;

use crate::content::PostPage;
use crate::Blog;

/// Print one page of posts, newest first
pub async fn run(
    blog: &Blog,
    page: Option<usize>,
    per_page: Option<usize>,
    search: Option<&str>,
) -> Result<()> {
    let query = blog.query(page, per_page, search);
    let result = blog.catalog().get_posts(&query).await?;
    print!("{}", render(&result, query.page));
    Ok(())
}

/// Format a listing as `date  slug  title` lines plus a page footer
pub fn render(result: &PostPage, page: usize) -> String {
    let mut out = String::new();
    if result.posts.is_empty() {
        out.push_str("No posts found.\n");
    }
    for post in &result.posts {
        out.push_str(&format!(
            "  {}  {}  {}\n",
            post.published_at.format("%Y-%m-%d"),
            post.slug,
            post.title
        ));
    }
    out.push_str(&format!("Page {} of {}\n", page, result.total_pages));
    out
}
