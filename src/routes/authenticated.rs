use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Defines the routes gated by the session cookie. Only two endpoints require
/// a validated token: the single-post detail view and the wishlist listing.
///
/// Access Control Strategy:
/// Every handler in this module relies on the `AuthUser` extractor middleware
/// being present on the router layer above this module. This guarantees that
/// handlers receive a validated identity claim, which `get_wishlist` then
/// compares against the queried owner.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /blogs/{id}
        // Detail view of a single post. Requires a valid session token.
        .route("/blogs/{id}", get(handlers::get_blog_details))
        // GET /wishlists?email=...
        // Lists one owner's wishlist. The handler rejects the request with
        // 403 whenever the queried owner differs from the token identity.
        .route("/wishlists", get(handlers::get_wishlist))
}
