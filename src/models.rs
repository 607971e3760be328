use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Core Application Schemas (Mapped to Collections) ---

/// Blog
///
/// Represents a blog post document from the `blogs` collection.
/// This is the primary data structure for the core business logic.
///
/// The wire format is camelCase JSON, matching the field names stored in the
/// document database so that server-side aggregation stages (`$strLenCP`,
/// `$sort`, `$group`) can address them directly.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Blog {
    /// Document id. `None` until the repository assigns one on insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub title: String,
    pub category: String,
    // URL of the cover image.
    pub photo: String,
    pub short_description: String,
    pub long_description: String,
    /// Client-supplied ISO-8601 date string. Stored verbatim; the "recent"
    /// view sorts it lexicographically, which is correct for ISO dates.
    pub post_date: String,
    /// Owner identity (email). Compared against the session claim on
    /// protected routes.
    pub owner: String,
    pub owner_name: String,
    pub owner_photo: String,
    /// Like counter, incremented atomically by the like endpoint.
    #[serde(default)]
    pub like_count: i64,
}

/// Comment
///
/// Represents a comment document from the `comments` collection. The blog
/// reference is a plain string and is *not* validated against the `blogs`
/// collection (no relational invariants are enforced).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    /// Hex id of the blog post this comment belongs to.
    pub blog_id: String,
    pub comment: String,
    pub user_name: String,
    pub user_photo: String,
}

/// WishlistEntry
///
/// Represents a document from the `wishlists` collection: one saved blog for
/// one user. Duplicate (owner, blog) pairs are permitted; removal addresses
/// the entry by its own `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WishlistEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    /// Owner identity (email).
    pub user_email: String,
    /// Hex id of the saved blog post.
    pub blog_id: String,
}

// --- Request Payloads (Input Schemas) ---

/// CreateBlogRequest
///
/// Input payload for submitting a new blog post (POST /api/v1/addblog).
/// Field completeness beyond JSON shape is not validated; the repository
/// initializes `likeCount` to zero.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateBlogRequest {
    pub title: String,
    pub category: String,
    pub photo: String,
    pub short_description: String,
    pub long_description: String,
    pub post_date: String,
    pub owner: String,
    pub owner_name: String,
    pub owner_photo: String,
}

/// UpdateBlogRequest
///
/// Full-overwrite payload for PUT /api/v1/blogs/{id}. The update writes
/// exactly this fixed field set via `$set`; owner display fields and the
/// like counter are never touched by it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateBlogRequest {
    pub title: String,
    pub category: String,
    pub photo: String,
    pub short_description: String,
    pub long_description: String,
    pub post_date: String,
    pub owner: String,
}

/// CreateCommentRequest
///
/// Input payload for posting a new comment.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateCommentRequest {
    pub blog_id: String,
    pub comment: String,
    pub user_name: String,
    pub user_photo: String,
}

/// CreateWishlistRequest
///
/// Input payload for adding a blog post to a user's wishlist.
/// No uniqueness constraint is enforced: posting the same pair twice
/// produces two entries.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateWishlistRequest {
    pub user_email: String,
    pub blog_id: String,
}

/// SessionRequest
///
/// Input payload for the token-issuing endpoint (POST /api/v1/jwt).
/// The submitted identity is signed as-is; no account lookup is performed.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionRequest {
    pub email: String,
}

// --- Aggregate & Write-Report Schemas (Output) ---

/// TopBlogger
///
/// Output row of the top-bloggers aggregation (GET /api/v1/topblogger):
/// one owner identity with their post count, at most three rows, highest
/// count first.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopBlogger {
    pub owner: String,
    pub owner_name: String,
    pub owner_photo: String,
    pub blog_count: i64,
}

/// UpdateReport
///
/// Output schema for the blog update endpoint, mirroring the write result
/// the document database reports for an upsert-enabled `$set`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateReport {
    pub matched_count: u64,
    pub modified_count: u64,
    /// Present only when the upsert path created a new document.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<ObjectId>,
}
