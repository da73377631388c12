//! Post catalog - searchable, date-sorted, paginated view over all posts

use tokio::task::JoinSet;
use walkdir::WalkDir;

use super::search::asciify;
use super::{Post, PostPage, PostReader};
use crate::error::{Error, Result};

/// Listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
    /// Raw search term; empty means no filtering
    pub search: String,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            search: String::new(),
        }
    }
}

impl PostQuery {
    pub fn new(page: usize, per_page: usize, search: impl Into<String>) -> Self {
        Self {
            page,
            per_page,
            search: search.into(),
        }
    }

    /// Reject page sizes and page numbers below one
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            return Err(Error::bad_request("per_page must be at least 1"));
        }
        if self.page == 0 {
            return Err(Error::bad_request("page must be at least 1"));
        }
        Ok(())
    }
}

/// Lists every post in the reader's directory
#[derive(Debug, Clone)]
pub struct PostCatalog {
    reader: PostReader,
}

impl PostCatalog {
    pub fn new(reader: PostReader) -> Self {
        Self { reader }
    }

    /// Slugs of all post documents, in file name order
    pub fn slugs(&self) -> Result<Vec<String>> {
        let posts_dir = self.reader.posts_dir();

        let mut slugs = Vec::new();
        for entry in WalkDir::new(posts_dir)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // A missing or unreadable directory is an error, not an empty listing
                Err(e) if e.depth() == 0 => return Err(std::io::Error::from(e).into()),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if entry.depth() == 0 {
                if !entry.file_type().is_dir() {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("{:?} is not a directory", path),
                    )
                    .into());
                }
                continue;
            }

            let has_extension = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == self.reader.extension());
            if !entry.file_type().is_file() || !has_extension {
                tracing::debug!("Skipping non-post entry {:?}", path);
                continue;
            }

            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => slugs.push(stem.to_string()),
                None => tracing::debug!("Skipping post with non UTF-8 name {:?}", path),
            }
        }

        Ok(slugs)
    }

    /// Return one page of posts, newest first, optionally filtered by a search term.
    ///
    /// Posts that fail to load are left out. `total_pages` counts the filtered
    /// set, so a page past the end is empty but still reports the page count.
    pub async fn get_posts(&self, query: &PostQuery) -> Result<PostPage> {
        query.validate()?;

        let slugs = self.slugs()?;
        let found = slugs.len();
        let mut posts = self.load_all(slugs).await;
        let loaded = posts.len();

        if !query.search.is_empty() {
            let term = asciify(&query.search);
            posts.retain(|post| post.matches(&term));
        }

        // Stable: equal dates keep file name order
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        tracing::debug!(
            found,
            loaded,
            matched = posts.len(),
            page = query.page,
            "Listed posts"
        );

        Ok(paginate(posts, query.page, query.per_page))
    }

    /// Read all slugs concurrently, keeping their original order
    async fn load_all(&self, slugs: Vec<String>) -> Vec<Post> {
        let mut tasks = JoinSet::new();
        for (index, slug) in slugs.into_iter().enumerate() {
            let reader = self.reader.clone();
            tasks.spawn(async move { (index, reader.get_post(&slug).await) });
        }

        let mut loaded = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => loaded.push(entry),
                Err(e) => tracing::warn!("Post loading task failed: {}", e),
            }
        }

        loaded.sort_by_key(|(index, _)| *index);
        loaded.into_iter().filter_map(|(_, post)| post).collect()
    }
}

/// Slice a sorted list to `page`, counting pages over the whole list
fn paginate(posts: Vec<Post>, page: usize, per_page: usize) -> PostPage {
    let total_pages = posts.len().div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page);
    let posts = posts.into_iter().skip(start).take(per_page).collect();

    PostPage { posts, total_pages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn doc(title: &str, date: &str, summary: Option<&str>, body: &str) -> String {
        let summary = summary
            .map(|s| format!("summary: {}\n", s))
            .unwrap_or_default();
        format!(
            "---\ntitle: {}\npublishedAt: {}\n{}---\n{}",
            title, date, summary, body
        )
    }

    fn catalog_with(files: &[(&str, String)]) -> (TempDir, PostCatalog) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let catalog = PostCatalog::new(PostReader::new(dir.path(), "md"));
        (dir, catalog)
    }

    fn three_posts() -> (TempDir, PostCatalog) {
        catalog_with(&[
            ("alpha.md", doc("Alpha", "2022-11-01", None, "First body")),
            ("beta.md", doc("Beta", "2022-11-04", None, "Second body")),
            ("gamma.md", doc("Gamma", "2022-11-03", None, "Third body")),
        ])
    }

    fn titles(page: &PostPage) -> Vec<&str> {
        page.posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_first_page_newest_first() {
        let (_dir, catalog) = three_posts();

        let page = catalog
            .get_posts(&PostQuery::new(1, 2, ""))
            .await
            .unwrap();
        assert_eq!(titles(&page), vec!["Beta", "Gamma"]);
        assert_eq!(page.total_pages, 2);

        let page = catalog
            .get_posts(&PostQuery::new(2, 2, ""))
            .await
            .unwrap();
        assert_eq!(titles(&page), vec!["Alpha"]);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let (_dir, catalog) = three_posts();

        let page = catalog
            .get_posts(&PostQuery::new(5, 2, ""))
            .await
            .unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_no_match_yields_zero_pages() {
        let (_dir, catalog) = three_posts();

        let page = catalog
            .get_posts(&PostQuery::new(1, 10, "nonexistent-term"))
            .await
            .unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_search_folds_case_and_diacritics() {
        let (_dir, catalog) = catalog_with(&[
            ("cafe.md", doc("Café Culture", "2022-11-01", None, "Coffee")),
            (
                "istanbul.md",
                doc("Trip", "2022-11-02", Some("Notes from Şişli"), "Walking"),
            ),
            ("other.md", doc("Other", "2022-11-03", None, "Nothing here")),
        ]);

        let page = catalog
            .get_posts(&PostQuery::new(1, 10, "CAFE"))
            .await
            .unwrap();
        assert_eq!(titles(&page), vec!["Café Culture"]);

        let page = catalog
            .get_posts(&PostQuery::new(1, 10, "sisli"))
            .await
            .unwrap();
        assert_eq!(titles(&page), vec!["Trip"]);

        let page = catalog
            .get_posts(&PostQuery::new(1, 10, "nothing"))
            .await
            .unwrap();
        assert_eq!(titles(&page), vec!["Other"]);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_total_pages_counts_filtered_set() {
        let files: Vec<(String, String)> = (1..=7)
            .map(|i| {
                let body = if i % 2 == 0 { "even" } else { "odd" };
                (
                    format!("post-{}.md", i),
                    doc(&format!("Post {}", i), &format!("2022-11-{:02}", i), None, body),
                )
            })
            .collect();
        let files: Vec<(&str, String)> = files
            .iter()
            .map(|(name, content)| (name.as_str(), content.clone()))
            .collect();
        let (_dir, catalog) = catalog_with(&files);

        for per_page in 1..=8 {
            let all = catalog
                .get_posts(&PostQuery::new(1, per_page, ""))
                .await
                .unwrap();
            assert_eq!(all.total_pages, 7usize.div_ceil(per_page));

            let odd = catalog
                .get_posts(&PostQuery::new(1, per_page, "odd"))
                .await
                .unwrap();
            assert_eq!(odd.total_pages, 4usize.div_ceil(per_page));
        }
    }

    #[tokio::test]
    async fn test_order_spans_pages() {
        let (_dir, catalog) = catalog_with(&[
            ("a.md", doc("A", "2021-01-05", None, "")),
            ("b.md", doc("B", "2023-03-01", None, "")),
            ("c.md", doc("C", "2022-06-15T12:00:00Z", None, "")),
            ("d.md", doc("D", "2022-06-15T08:00:00Z", None, "")),
            ("e.md", doc("E", "2020-12-31", None, "")),
        ]);

        let mut all = Vec::new();
        for page in 1..=3 {
            let result = catalog
                .get_posts(&PostQuery::new(page, 2, ""))
                .await
                .unwrap();
            all.extend(result.posts);
        }

        assert_eq!(all.len(), 5);
        assert!(all
            .windows(2)
            .all(|w| w[0].published_at >= w[1].published_at));
    }

    #[tokio::test]
    async fn test_equal_dates_keep_file_name_order() {
        let (_dir, catalog) = catalog_with(&[
            ("b.md", doc("B", "2022-11-01", None, "")),
            ("a.md", doc("A", "2022-11-01", None, "")),
            ("c.md", doc("C", "2022-11-01", None, "")),
        ]);

        let page = catalog.get_posts(&PostQuery::default()).await.unwrap();
        assert_eq!(titles(&page), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_bad_posts_are_skipped() {
        let (dir, catalog) = catalog_with(&[
            ("good.md", doc("Good", "2022-11-01", None, "ok")),
            ("broken.md", "no front matter here".to_string()),
            ("notes.txt", doc("Text", "2022-11-02", None, "ignored")),
        ]);
        fs::create_dir(dir.path().join("drafts.md")).unwrap();

        let page = catalog.get_posts(&PostQuery::default()).await.unwrap();
        assert_eq!(titles(&page), vec!["Good"]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(catalog.slugs().unwrap(), vec!["broken", "good"]);
    }

    #[tokio::test]
    async fn test_zero_per_page_is_rejected() {
        let (_dir, catalog) = three_posts();

        let err = catalog
            .get_posts(&PostQuery::new(1, 0, ""))
            .await
            .unwrap_err();
        assert!(err.is_bad_request());

        let err = catalog
            .get_posts(&PostQuery::new(0, 10, ""))
            .await
            .unwrap_err();
        assert!(err.is_bad_request());
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let catalog = PostCatalog::new(PostReader::new(dir.path().join("missing"), "md"));

        let err = catalog.get_posts(&PostQuery::default()).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_broken_symlink_is_skipped() {
        let (dir, catalog) = catalog_with(&[("good.md", doc("Good", "2022-11-01", None, "ok"))]);
        std::os::unix::fs::symlink(dir.path().join("gone.md"), dir.path().join("dangling.md"))
            .unwrap();

        assert_eq!(catalog.slugs().unwrap(), vec!["good"]);
        let page = catalog.get_posts(&PostQuery::default()).await.unwrap();
        assert_eq!(titles(&page), vec!["Good"]);
    }

    #[test]
    fn test_file_as_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("posts.md");
        fs::write(&file, "not a directory").unwrap();
        let catalog = PostCatalog::new(PostReader::new(&file, "md"));

        assert!(matches!(catalog.slugs(), Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let (_dir, catalog) = catalog_with(&[]);

        let page = catalog.get_posts(&PostQuery::default()).await.unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
