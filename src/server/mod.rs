//! HTTP server exposing the post catalog

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{html_escape, MarkdownRenderer, Post};
use crate::error::Error;
use crate::Blog;

/// Server state
struct ServerState {
    blog: Blog,
    renderer: MarkdownRenderer,
}

/// Query string of the listing endpoint
#[derive(Debug, Default, Deserialize)]
struct ListParams {
    page: Option<usize>,
    per_page: Option<usize>,
    q: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Request failed: {}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, self.to_string()).into_response()
    }
}

/// Build the application router
pub fn router(blog: Blog) -> Router {
    let renderer = MarkdownRenderer::new(&blog.config.highlight_theme);
    let state = Arc::new(ServerState { blog, renderer });

    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(post_json))
        .route("/posts/:slug", get(post_html))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(blog.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_posts(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ListParams>,
) -> Response {
    match state
        .blog
        .get_posts(params.page, params.per_page, params.q.as_deref())
        .await
    {
        Ok(page) => Json(page).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn post_json(State(state): State<Arc<ServerState>>, Path(slug): Path<String>) -> Response {
    match find_post(&state, &slug).await {
        Some(post) => Json(post).into_response(),
        None => not_found(),
    }
}

async fn post_html(State(state): State<Arc<ServerState>>, Path(slug): Path<String>) -> Response {
    let Some(post) = find_post(&state, &slug).await else {
        return not_found();
    };

    match state.renderer.render(&post.content) {
        Ok(body) => Html(render_page(&state.blog, &post, &body)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Look up a post, refusing slugs that could leave the posts directory
async fn find_post(state: &ServerState, slug: &str) -> Option<Post> {
    if !is_safe_slug(slug) {
        tracing::debug!("Rejected slug {:?}", slug);
        return None;
    }
    state.blog.get_post(slug).await
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\']) && !slug.contains("..")
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Wrap a rendered post body in a minimal HTML document
fn render_page(blog: &Blog, post: &Post, body: &str) -> String {
    let title = blog.config.page_title(Some(&post.title));
    let description = post
        .summary
        .as_deref()
        .unwrap_or(&blog.config.description);
    let canonical = format!(
        "{}/posts/{}",
        blog.config.url.trim_end_matches('/'),
        post.slug
    );

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<meta name="description" content="{description}">
<link rel="canonical" href="{canonical}">
</head>
<body>
<article>
<h1>{heading}</h1>
<time datetime="{datetime}">{date}</time>
{body}
</article>
</body>
</html>
"#,
        title = html_escape(&title),
        description = html_escape(description),
        canonical = html_escape(&canonical),
        heading = html_escape(&post.title),
        datetime = post.published_at.to_rfc3339(),
        date = post.published_at.format("%B %-d, %Y"),
        body = body,
    )
}
