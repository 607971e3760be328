use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in). This covers all listing and aggregate views, the
/// ungated write paths, and the session endpoints that issue and clear the
/// token cookie.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /blogs
        // Lists every blog post, unfiltered and unpaginated.
        .route("/blogs", get(handlers::get_blogs))
        // GET /blogs/sorted
        // The "featured" view: posts ranked by computed long-description
        // length inside the database's aggregation pipeline, capped at 10.
        .route("/blogs/sorted", get(handlers::get_featured_blogs))
        // GET /recent
        // The "recent" view: at most 6 posts, newest postDate first.
        .route("/recent", get(handlers::get_recent_blogs))
        // POST /addblog
        // Submits a new post. No field-completeness validation beyond shape.
        .route("/addblog", post(handlers::create_blog))
        // PUT /blogs/{id}
        // Full overwrite of the fixed field set (upsert enabled).
        .route("/blogs/{id}", put(handlers::update_blog))
        // PUT /blogs/like/{id}
        // Atomic like-counter increment. Not an upsert: a missing id is a 404.
        .route("/blogs/like/{id}", put(handlers::like_blog))
        // GET/POST /comments
        // Lists comments (optional ?blogId= equality filter) and posts new ones.
        .route(
            "/comments",
            get(handlers::get_comments).post(handlers::create_comment),
        )
        // GET /topblogger
        // Owners ranked by post count, at most 3 rows.
        .route("/topblogger", get(handlers::get_top_bloggers))
        // POST /wishlists
        // Adds a wishlist entry. Duplicates permitted.
        .route("/wishlists", post(handlers::add_wishlist))
        // DELETE /wishlists/{id}
        // Removes exactly the addressed entry; no ownership check on this path.
        .route("/wishlists/{id}", delete(handlers::remove_wishlist))
        // POST /jwt and /jwt/logout
        // Issues the 2-hour session cookie and clears it again.
        .route("/jwt", post(handlers::issue_session))
        .route("/jwt/logout", post(handlers::clear_session))
}
