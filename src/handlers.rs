use crate::{
    AppState,
    auth::{self, AuthUser},
    models::{
        self, Blog, Comment, CreateBlogRequest, CreateCommentRequest, CreateWishlistRequest,
        SessionRequest, TopBlogger, UpdateBlogRequest, UpdateReport, WishlistEntry,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{Value, json};

// --- Filter Structs ---

/// CommentFilter
///
/// Defines the accepted query parameters for the comment listing endpoint
/// (GET /comments). Used by Axum's Query extractor to safely bind HTTP query
/// parameters for the optional equality filter.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CommentFilter {
    /// Optional blog post id; when present, only that post's comments return.
    pub blog_id: Option<String>,
}

/// WishlistFilter
///
/// Query parameters for the wishlist listing endpoint (GET /wishlists).
/// The handler compares `email` against the authenticated identity before
/// any data is read.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct WishlistFilter {
    /// Owner identity whose wishlist is requested.
    pub email: Option<String>,
}

// --- Shared Helpers ---

// Fixed-shape error bodies, matching the authorization rejections.
fn bad_id() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "malformed id" })),
    )
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "not found" })),
    )
}

// Path ids arrive as hex strings; a parse failure is a client error, not a
// database error.
fn parse_id(raw: &str) -> Result<ObjectId, (StatusCode, Json<Value>)> {
    ObjectId::parse_str(raw).map_err(|_| bad_id())
}

// --- Blog Handlers ---

/// get_blogs
///
/// [Public Route] Lists every blog post. No pagination exists anywhere in the
/// system, so this is the full collection.
#[utoipa::path(
    get,
    path = "/api/v1/blogs",
    responses((status = 200, description = "All blog posts", body = [Blog]))
)]
pub async fn get_blogs(State(state): State<AppState>) -> Json<Vec<models::Blog>> {
    let blogs = state.repo.get_blogs().await;
    Json(blogs)
}

/// get_featured_blogs
///
/// [Public Route] The "featured" view: posts ranked by the computed length of
/// their long description, at most 10 entries. The ranking runs server-side
/// in the database's aggregation pipeline.
#[utoipa::path(
    get,
    path = "/api/v1/blogs/sorted",
    responses((status = 200, description = "Featured posts by description length", body = [Blog]))
)]
pub async fn get_featured_blogs(State(state): State<AppState>) -> Json<Vec<models::Blog>> {
    let blogs = state.repo.get_featured_blogs().await;
    Json(blogs)
}

/// get_recent_blogs
///
/// [Public Route] The "recent" view: at most 6 posts, newest `postDate` first.
#[utoipa::path(
    get,
    path = "/api/v1/recent",
    responses((status = 200, description = "Most recent posts", body = [Blog]))
)]
pub async fn get_recent_blogs(State(state): State<AppState>) -> Json<Vec<models::Blog>> {
    let blogs = state.repo.get_recent_blogs().await;
    Json(blogs)
}

/// get_blog_details
///
/// [Authenticated Route] Retrieves a single post by id. The id must be valid
/// ObjectId hex; malformed input is answered with 400 rather than reaching
/// the database layer.
#[utoipa::path(
    get,
    path = "/api/v1/blogs/{id}",
    params(("id" = String, Path, description = "Blog post id (ObjectId hex)")),
    responses(
        (status = 200, description = "Found", body = Blog),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_blog_details(
    AuthUser { .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<models::Blog>, (StatusCode, Json<Value>)> {
    let oid = parse_id(&id)?;
    match state.repo.get_blog(oid).await {
        Some(blog) => Ok(Json(blog)),
        None => Err(not_found()),
    }
}

/// create_blog
///
/// [Public Route] Handles the submission of a new post. Beyond JSON shape, no
/// field-completeness validation is performed; the repository zeroes the like
/// counter and assigns the id.
#[utoipa::path(
    post,
    path = "/api/v1/addblog",
    request_body = CreateBlogRequest,
    responses((status = 200, description = "Created", body = Blog))
)]
pub async fn create_blog(
    State(state): State<AppState>,
    Json(payload): Json<models::CreateBlogRequest>,
) -> Json<models::Blog> {
    let blog = state.repo.create_blog(payload).await;
    Json(blog)
}

/// update_blog
///
/// [Public Route] Full overwrite of the fixed field set via an upsert-enabled
/// `$set`. The raw write report (matched/modified/upserted) is returned as
/// the response body.
#[utoipa::path(
    put,
    path = "/api/v1/blogs/{id}",
    params(("id" = String, Path, description = "Blog post id (ObjectId hex)")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Write report", body = UpdateReport),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<models::UpdateBlogRequest>,
) -> Result<Json<models::UpdateReport>, (StatusCode, Json<Value>)> {
    let oid = parse_id(&id)?;
    match state.repo.update_blog(oid, payload).await {
        Some(report) => Ok(Json(report)),
        // The repository already logged the database failure; the client gets
        // no detail beyond the status.
        None => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "update failed" })),
        )),
    }
}

/// like_blog
///
/// [Public Route] Atomically increments the post's like counter.
///
/// *Note*: unlike the update endpoint, this write is **not** an upsert: liking
/// a nonexistent id answers 404 instead of fabricating a counter-only document.
#[utoipa::path(
    put,
    path = "/api/v1/blogs/like/{id}",
    params(("id" = String, Path, description = "Blog post id (ObjectId hex)")),
    responses(
        (status = 200, description = "Incremented"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn like_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let oid = parse_id(&id)?;
    if state.repo.like_blog(oid).await {
        Ok(StatusCode::OK)
    } else {
        Err(not_found())
    }
}

// --- Comment Handlers ---

/// get_comments
///
/// [Public Route] Lists comments, optionally filtered to one blog post.
#[utoipa::path(
    get,
    path = "/api/v1/comments",
    params(CommentFilter),
    responses((status = 200, description = "Comments", body = [Comment]))
)]
pub async fn get_comments(
    State(state): State<AppState>,
    Query(filter): Query<CommentFilter>,
) -> Json<Vec<models::Comment>> {
    let comments = state.repo.get_comments(filter.blog_id).await;
    Json(comments)
}

/// create_comment
///
/// [Public Route] Posts a new comment. The blog reference is stored verbatim
/// and not validated against existing posts.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = CreateCommentRequest,
    responses((status = 200, description = "Created", body = Comment))
)]
pub async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<models::CreateCommentRequest>,
) -> Json<models::Comment> {
    let comment = state.repo.create_comment(payload).await;
    Json(comment)
}

// --- Aggregate View Handlers ---

/// get_top_bloggers
///
/// [Public Route] The top-bloggers view: owners ranked by post count, at most
/// three rows. The `limit` (3) is fixed here, mirroring the aggregate's cap.
#[utoipa::path(
    get,
    path = "/api/v1/topblogger",
    responses((status = 200, description = "Top bloggers by post count", body = [TopBlogger]))
)]
pub async fn get_top_bloggers(State(state): State<AppState>) -> Json<Vec<models::TopBlogger>> {
    let bloggers = state.repo.get_top_bloggers(3).await;
    Json(bloggers)
}

// --- Wishlist Handlers ---

/// get_wishlist
///
/// [Authenticated Route] Lists wishlist entries for one owner.
///
/// *Authorization*: the queried owner must equal the identity resolved from
/// the session token; any mismatch — including an absent `email` query — is
/// rejected with 403 before the database is consulted.
#[utoipa::path(
    get,
    path = "/api/v1/wishlists",
    params(WishlistFilter),
    responses(
        (status = 200, description = "Wishlist entries", body = [WishlistEntry]),
        (status = 403, description = "Requester is not the queried owner")
    )
)]
pub async fn get_wishlist(
    AuthUser { email }: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<WishlistFilter>,
) -> Result<Json<Vec<models::WishlistEntry>>, (StatusCode, Json<Value>)> {
    if filter.email.as_deref() != Some(email.as_str()) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "forbidden access" })),
        ));
    }
    let entries = state.repo.get_wishlist(filter.email).await;
    Ok(Json(entries))
}

/// add_wishlist
///
/// [Public Route] Adds a blog post to a user's wishlist. Duplicates are
/// permitted; no uniqueness constraint exists.
#[utoipa::path(
    post,
    path = "/api/v1/wishlists",
    request_body = CreateWishlistRequest,
    responses((status = 200, description = "Created", body = WishlistEntry))
)]
pub async fn add_wishlist(
    State(state): State<AppState>,
    Json(payload): Json<models::CreateWishlistRequest>,
) -> Json<models::WishlistEntry> {
    let entry = state.repo.add_wishlist(payload).await;
    Json(entry)
}

/// remove_wishlist
///
/// [Public Route] Removes exactly one wishlist entry by its own id. No
/// ownership check is enforced on this path.
#[utoipa::path(
    delete,
    path = "/api/v1/wishlists/{id}",
    params(("id" = String, Path, description = "Wishlist entry id (ObjectId hex)")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove_wishlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let oid = parse_id(&id)?;
    if state.repo.remove_wishlist(oid).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

// --- Session Handlers ---

/// issue_session
///
/// [Public Route] Signs the submitted identity into a 2-hour session token
/// and sets it as the http-only `token` cookie. The cookie carries
/// `SameSite=None; Secure` because the frontend is served from a different
/// origin than the API.
#[utoipa::path(
    post,
    path = "/api/v1/jwt",
    request_body = SessionRequest,
    responses((status = 200, description = "Token issued and cookie set"))
)]
pub async fn issue_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<models::SessionRequest>,
) -> Result<(CookieJar, Json<Value>), (StatusCode, Json<Value>)> {
    let token = auth::issue_token(&payload.email, &state.config.jwt_secret).map_err(|e| {
        tracing::error!("token signing error: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "could not issue token" })),
        )
    })?;

    let cookie = Cookie::build((auth::TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::seconds(auth::TOKEN_TTL_SECS))
        .build();

    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

/// clear_session
///
/// [Public Route] Logs the user out by expiring the `token` cookie. The token
/// itself is never persisted server-side, so removal is purely client-state.
#[utoipa::path(
    post,
    path = "/api/v1/jwt/logout",
    responses((status = 200, description = "Cookie cleared"))
)]
pub async fn clear_session(jar: CookieJar) -> (CookieJar, Json<Value>) {
    // The removal cookie must carry the same attributes as issuance;
    // browsers drop a SameSite=None cookie without Secure, which would
    // leave the live token in place cross-site.
    let removal = Cookie::build((auth::TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build();
    (jar.remove(removal), Json(json!({ "success": true })))
}
