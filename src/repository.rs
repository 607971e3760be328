use crate::models::{
    Blog, Comment, CreateBlogRequest, CreateCommentRequest, CreateWishlistRequest, TopBlogger,
    UpdateBlogRequest, UpdateReport, WishlistEntry,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
};
use std::sync::Arc;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the core
/// of the Repository Abstraction pattern, allowing the handlers to interact with
/// the data layer without knowing the specific implementation (Mongo, Mock, etc.).
///
/// **Send + Sync + async_trait** are required to make the trait object (`Arc<dyn Repository>`)
/// safely shareable and usable across Axum's asynchronous task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Blog Retrieval ---
    // Full listing, no pagination.
    async fn get_blogs(&self) -> Vec<Blog>;
    // "Featured" view: ranked by computed longDescription length, at most 10 rows.
    async fn get_featured_blogs(&self) -> Vec<Blog>;
    // "Recent" view: postDate descending, at most 6 rows.
    async fn get_recent_blogs(&self) -> Vec<Blog>;
    async fn get_blog(&self, id: ObjectId) -> Option<Blog>;

    // --- Blog Actions ---
    async fn create_blog(&self, req: CreateBlogRequest) -> Blog;
    // Upsert-enabled $set of the fixed field set. Returns the raw write report.
    async fn update_blog(&self, id: ObjectId, req: UpdateBlogRequest) -> Option<UpdateReport>;
    // Atomic counter increment. Returns true only when a document matched;
    // deliberately not an upsert (a miss must never fabricate a document).
    async fn like_blog(&self, id: ObjectId) -> bool;

    // --- Aggregate Views ---
    // Group-by-owner post counts, highest first, at most `limit` rows.
    async fn get_top_bloggers(&self, limit: i64) -> Vec<TopBlogger>;

    // --- Comments ---
    async fn get_comments(&self, blog_id: Option<String>) -> Vec<Comment>;
    async fn create_comment(&self, req: CreateCommentRequest) -> Comment;

    // --- Wishlists ---
    async fn get_wishlist(&self, user_email: Option<String>) -> Vec<WishlistEntry>;
    async fn add_wishlist(&self, req: CreateWishlistRequest) -> WishlistEntry;
    // Deletes exactly the addressed entry. No ownership check at this layer.
    async fn remove_wishlist(&self, id: ObjectId) -> bool;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// MongoRepository
///
/// The concrete implementation of the `Repository` trait, backed by the MongoDB
/// collections `blogs`, `comments`, and `wishlists`.
pub struct MongoRepository {
    blogs: Collection<Blog>,
    comments: Collection<Comment>,
    wishlists: Collection<WishlistEntry>,
}

impl MongoRepository {
    /// Creates a new repository instance over an initialized database handle.
    /// The driver manages its own connection pool behind this handle.
    pub fn new(db: Database) -> Self {
        Self {
            blogs: db.collection("blogs"),
            comments: db.collection("comments"),
            wishlists: db.collection("wishlists"),
        }
    }
}

#[async_trait]
impl Repository for MongoRepository {
    /// get_blogs
    ///
    /// Retrieves every blog post, unfiltered and unpaginated.
    async fn get_blogs(&self) -> Vec<Blog> {
        let cursor = match self.blogs.find(doc! {}).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("get_blogs error: {:?}", e);
                return vec![];
            }
        };
        cursor.try_collect().await.unwrap_or_else(|e| {
            tracing::error!("get_blogs cursor error: {:?}", e);
            vec![]
        })
    }

    /// get_featured_blogs
    ///
    /// Server-side aggregation pipeline: computes the code-point length of
    /// `longDescription` into a transient field, sorts on it descending, and
    /// caps the result at 10 documents. The transient field is ignored by
    /// deserialization into `Blog`.
    async fn get_featured_blogs(&self) -> Vec<Blog> {
        let pipeline = [
            doc! { "$addFields": { "descriptionLength": { "$strLenCP": "$longDescription" } } },
            doc! { "$sort": { "descriptionLength": -1 } },
            doc! { "$limit": 10 },
        ];
        let cursor = match self.blogs.aggregate(pipeline).await {
            Ok(c) => c.with_type::<Blog>(),
            Err(e) => {
                tracing::error!("get_featured_blogs error: {:?}", e);
                return vec![];
            }
        };
        cursor.try_collect().await.unwrap_or_else(|e| {
            tracing::error!("get_featured_blogs cursor error: {:?}", e);
            vec![]
        })
    }

    /// get_recent_blogs
    ///
    /// Retrieves the six most recent posts by `postDate` descending.
    /// The field holds ISO date strings, so the lexicographic sort is correct.
    async fn get_recent_blogs(&self) -> Vec<Blog> {
        let cursor = match self
            .blogs
            .find(doc! {})
            .sort(doc! { "postDate": -1 })
            .limit(6)
            .await
        {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("get_recent_blogs error: {:?}", e);
                return vec![];
            }
        };
        cursor.try_collect().await.unwrap_or_else(|e| {
            tracing::error!("get_recent_blogs cursor error: {:?}", e);
            vec![]
        })
    }

    /// get_blog
    ///
    /// Simple retrieval of a single post by ObjectId.
    async fn get_blog(&self, id: ObjectId) -> Option<Blog> {
        self.blogs
            .find_one(doc! { "_id": id })
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_blog error: {:?}", e);
                None
            })
    }

    /// create_blog
    ///
    /// Inserts a new post with a freshly generated id and a zeroed like
    /// counter, returning the stored document.
    async fn create_blog(&self, req: CreateBlogRequest) -> Blog {
        let blog = Blog {
            id: Some(ObjectId::new()),
            title: req.title,
            category: req.category,
            photo: req.photo,
            short_description: req.short_description,
            long_description: req.long_description,
            post_date: req.post_date,
            owner: req.owner,
            owner_name: req.owner_name,
            owner_photo: req.owner_photo,
            like_count: 0,
        };
        self.blogs
            .insert_one(&blog)
            .await
            .expect("Failed to insert blog");
        blog
    }

    /// update_blog
    ///
    /// Upsert-enabled `$set` of the fixed field set. A miss therefore creates
    /// a new document carrying exactly these fields. Owner display fields and
    /// the like counter are untouched on a match.
    async fn update_blog(&self, id: ObjectId, req: UpdateBlogRequest) -> Option<UpdateReport> {
        let update = doc! {
            "$set": {
                "title": &req.title,
                "category": &req.category,
                "photo": &req.photo,
                "shortDescription": &req.short_description,
                "longDescription": &req.long_description,
                "postDate": &req.post_date,
                "owner": &req.owner,
            }
        };
        match self
            .blogs
            .update_one(doc! { "_id": id }, update)
            .upsert(true)
            .await
        {
            Ok(res) => Some(UpdateReport {
                matched_count: res.matched_count,
                modified_count: res.modified_count,
                upserted_id: res.upserted_id.and_then(|b| b.as_object_id()),
            }),
            Err(e) => {
                tracing::error!("update_blog error: {:?}", e);
                None
            }
        }
    }

    /// like_blog
    ///
    /// Atomically increments the like counter. Runs without upsert so that a
    /// missing id cannot fabricate a counter-only document; the function
    /// returns true only if a document matched.
    async fn like_blog(&self, id: ObjectId) -> bool {
        match self
            .blogs
            .update_one(doc! { "_id": id }, doc! { "$inc": { "likeCount": 1 } })
            .await
        {
            Ok(res) => res.matched_count > 0,
            Err(e) => {
                tracing::error!("like_blog error: {:?}", e);
                false
            }
        }
    }

    /// get_top_bloggers
    ///
    /// Aggregation pipeline: groups posts by the (owner, ownerName, ownerPhoto)
    /// identity triple, counts each group, sorts by count descending, and caps
    /// at `limit` rows. A final projection flattens the composite group key
    /// back into the `TopBlogger` wire shape.
    async fn get_top_bloggers(&self, limit: i64) -> Vec<TopBlogger> {
        let pipeline = [
            doc! { "$group": {
                "_id": {
                    "owner": "$owner",
                    "ownerName": "$ownerName",
                    "ownerPhoto": "$ownerPhoto",
                },
                "blogCount": { "$sum": 1 },
            } },
            doc! { "$sort": { "blogCount": -1 } },
            doc! { "$limit": limit },
            doc! { "$project": {
                "_id": 0,
                "owner": "$_id.owner",
                "ownerName": "$_id.ownerName",
                "ownerPhoto": "$_id.ownerPhoto",
                "blogCount": 1,
            } },
        ];
        let cursor = match self.blogs.aggregate(pipeline).await {
            Ok(c) => c.with_type::<TopBlogger>(),
            Err(e) => {
                tracing::error!("get_top_bloggers error: {:?}", e);
                return vec![];
            }
        };
        cursor.try_collect().await.unwrap_or_else(|e| {
            tracing::error!("get_top_bloggers cursor error: {:?}", e);
            vec![]
        })
    }

    /// get_comments
    ///
    /// Lists comments, optionally restricted to one blog post by string
    /// equality on `blogId`. The reference is not validated against `blogs`.
    async fn get_comments(&self, blog_id: Option<String>) -> Vec<Comment> {
        let filter = match blog_id {
            Some(id) => doc! { "blogId": id },
            None => doc! {},
        };
        let cursor = match self.comments.find(filter).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("get_comments error: {:?}", e);
                return vec![];
            }
        };
        cursor.try_collect().await.unwrap_or_else(|e| {
            tracing::error!("get_comments cursor error: {:?}", e);
            vec![]
        })
    }

    /// create_comment
    ///
    /// Inserts a new comment, returning the stored document.
    async fn create_comment(&self, req: CreateCommentRequest) -> Comment {
        let comment = Comment {
            id: Some(ObjectId::new()),
            blog_id: req.blog_id,
            comment: req.comment,
            user_name: req.user_name,
            user_photo: req.user_photo,
        };
        self.comments
            .insert_one(&comment)
            .await
            .expect("Failed to insert comment");
        comment
    }

    /// get_wishlist
    ///
    /// Lists wishlist entries, optionally restricted to one owner by string
    /// equality on `userEmail`. The requester-identity check lives in the
    /// handler layer.
    async fn get_wishlist(&self, user_email: Option<String>) -> Vec<WishlistEntry> {
        let filter = match user_email {
            Some(email) => doc! { "userEmail": email },
            None => doc! {},
        };
        let cursor = match self.wishlists.find(filter).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("get_wishlist error: {:?}", e);
                return vec![];
            }
        };
        cursor.try_collect().await.unwrap_or_else(|e| {
            tracing::error!("get_wishlist cursor error: {:?}", e);
            vec![]
        })
    }

    /// add_wishlist
    ///
    /// Inserts a wishlist entry. No uniqueness constraint: duplicates are
    /// permitted by design.
    async fn add_wishlist(&self, req: CreateWishlistRequest) -> WishlistEntry {
        let entry = WishlistEntry {
            id: Some(ObjectId::new()),
            user_email: req.user_email,
            blog_id: req.blog_id,
        };
        self.wishlists
            .insert_one(&entry)
            .await
            .expect("Failed to insert wishlist entry");
        entry
    }

    /// remove_wishlist
    ///
    /// Deletes exactly one entry by its own id, leaving every other entry
    /// untouched. Returns true only when a document was removed.
    async fn remove_wishlist(&self, id: ObjectId) -> bool {
        match self.wishlists.delete_one(doc! { "_id": id }).await {
            Ok(res) => res.deleted_count > 0,
            Err(e) => {
                tracing::error!("remove_wishlist error: {:?}", e);
                false
            }
        }
    }
}
