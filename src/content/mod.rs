//! Content module - post documents, reading, searching and listing

mod catalog;
mod frontmatter;
mod markdown;
mod post;
mod reader;
mod search;

pub use catalog::{PostCatalog, PostQuery};
pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterError};
pub use markdown::{html_escape, MarkdownRenderer};
pub use post::{Post, PostPage};
pub use reader::{parse_post, PostReader, ReadError};
pub use search::asciify;
