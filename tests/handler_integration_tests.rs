use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use blog_portal::{
    AppState,
    auth::AuthUser,
    config::AppConfig,
    handlers::{self, CommentFilter, WishlistFilter},
    models::{
        Blog, Comment, CreateBlogRequest, CreateCommentRequest, CreateWishlistRequest, TopBlogger,
        UpdateBlogRequest, UpdateReport, WishlistEntry,
    },
    repository::Repository,
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::test;

// --- MOCK REPOSITORY IMPLEMENTATION ---

// This struct is the central control point for testing handler logic.
// Handlers rely on traits, so we mock the trait implementation.
pub struct MockRepoControl {
    // Pre-canned outputs for handler requests
    pub blogs_to_return: Vec<Blog>,
    pub blog_to_return: Option<Blog>,
    pub update_report_to_return: Option<UpdateReport>,
    pub like_result: bool,
    pub remove_result: bool,
    pub comments_to_return: Vec<Comment>,
    pub wishlist_to_return: Vec<WishlistEntry>,
    pub top_bloggers_to_return: Vec<TopBlogger>,
}

impl Default for MockRepoControl {
    fn default() -> Self {
        MockRepoControl {
            blogs_to_return: vec![],
            blog_to_return: Some(Blog::default()),
            update_report_to_return: Some(UpdateReport::default()),
            like_result: true, // Default to success for simpler tests
            remove_result: true,
            comments_to_return: vec![],
            wishlist_to_return: vec![],
            top_bloggers_to_return: vec![],
        }
    }
}

#[async_trait]
impl Repository for MockRepoControl {
    async fn get_blogs(&self) -> Vec<Blog> {
        self.blogs_to_return.clone()
    }
    async fn get_featured_blogs(&self) -> Vec<Blog> {
        self.blogs_to_return.clone()
    }
    async fn get_recent_blogs(&self) -> Vec<Blog> {
        self.blogs_to_return.clone()
    }
    async fn get_blog(&self, _id: ObjectId) -> Option<Blog> {
        self.blog_to_return.clone()
    }
    async fn create_blog(&self, req: CreateBlogRequest) -> Blog {
        // Echo the payload back the way the real repository does, so the
        // handler test can assert field preservation.
        Blog {
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
        }
    }
    async fn update_blog(&self, _id: ObjectId, _req: UpdateBlogRequest) -> Option<UpdateReport> {
        self.update_report_to_return.clone()
    }
    async fn like_blog(&self, _id: ObjectId) -> bool {
        self.like_result
    }
    async fn get_top_bloggers(&self, _limit: i64) -> Vec<TopBlogger> {
        self.top_bloggers_to_return.clone()
    }
    async fn get_comments(&self, _blog_id: Option<String>) -> Vec<Comment> {
        self.comments_to_return.clone()
    }
    async fn create_comment(&self, req: CreateCommentRequest) -> Comment {
        Comment {
            id: Some(ObjectId::new()),
            blog_id: req.blog_id,
            comment: req.comment,
            user_name: req.user_name,
            user_photo: req.user_photo,
        }
    }
    async fn get_wishlist(&self, _user_email: Option<String>) -> Vec<WishlistEntry> {
        self.wishlist_to_return.clone()
    }
    async fn add_wishlist(&self, req: CreateWishlistRequest) -> WishlistEntry {
        WishlistEntry {
            id: Some(ObjectId::new()),
            user_email: req.user_email,
            blog_id: req.blog_id,
        }
    }
    async fn remove_wishlist(&self, _id: ObjectId) -> bool {
        self.remove_result
    }
}

// --- TEST UTILITIES ---

const TEST_EMAIL: &str = "owner@example.com";

// Creates an AppState using the mock repository
fn create_test_state(repo_control: MockRepoControl) -> AppState {
    AppState {
        repo: Arc::new(repo_control),
        config: AppConfig::default(),
    }
}

// Creates AuthUser for handler calls
fn session_user() -> AuthUser {
    AuthUser {
        email: TEST_EMAIL.to_string(),
    }
}

fn valid_hex_id() -> String {
    ObjectId::new().to_hex()
}

// --- HANDLER TESTS ---

#[test]
async fn test_get_blog_details_success() {
    let mock_blog = Blog {
        id: Some(ObjectId::new()),
        title: "Hello".to_string(),
        ..Blog::default()
    };
    let state = create_test_state(MockRepoControl {
        blog_to_return: Some(mock_blog.clone()),
        ..MockRepoControl::default()
    });

    let result =
        handlers::get_blog_details(session_user(), State(state), Path(valid_hex_id())).await;

    assert!(result.is_ok());
    let Json(blog) = result.unwrap();
    assert_eq!(blog.id, mock_blog.id);
    assert_eq!(blog.title, "Hello");
}

#[test]
async fn test_get_blog_details_not_found() {
    let state = create_test_state(MockRepoControl {
        blog_to_return: None,
        ..MockRepoControl::default()
    });

    let result =
        handlers::get_blog_details(session_user(), State(state), Path(valid_hex_id())).await;

    assert!(result.is_err());
    let (status, _body) = result.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
async fn test_get_blog_details_malformed_id() {
    let state = create_test_state(MockRepoControl::default());

    // Not valid ObjectId hex: must be rejected before the repository is hit.
    let result =
        handlers::get_blog_details(session_user(), State(state), Path("not-hex".to_string())).await;

    assert!(result.is_err());
    let (status, _body) = result.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
async fn test_create_blog_preserves_fields() {
    let state = create_test_state(MockRepoControl::default());

    let payload = CreateBlogRequest {
        title: "My Post".to_string(),
        category: "rust".to_string(),
        photo: "https://img.example/p.png".to_string(),
        short_description: "short".to_string(),
        long_description: "a much longer description".to_string(),
        post_date: "2024-06-01".to_string(),
        owner: TEST_EMAIL.to_string(),
        owner_name: "Owner".to_string(),
        owner_photo: "https://img.example/o.png".to_string(),
    };

    let Json(blog) = handlers::create_blog(State(state), Json(payload.clone())).await;

    assert!(blog.id.is_some(), "repository must assign an id on insert");
    assert_eq!(blog.title, payload.title);
    assert_eq!(blog.category, payload.category);
    assert_eq!(blog.long_description, payload.long_description);
    assert_eq!(blog.owner, payload.owner);
    assert_eq!(blog.like_count, 0, "new posts start with a zeroed counter");
}

#[test]
async fn test_update_blog_returns_write_report() {
    let report = UpdateReport {
        matched_count: 1,
        modified_count: 1,
        upserted_id: None,
    };
    let state = create_test_state(MockRepoControl {
        update_report_to_return: Some(report.clone()),
        ..MockRepoControl::default()
    });

    let result = handlers::update_blog(
        State(state),
        Path(valid_hex_id()),
        Json(UpdateBlogRequest::default()),
    )
    .await;

    assert!(result.is_ok());
    let Json(returned) = result.unwrap();
    assert_eq!(returned.matched_count, 1);
    assert_eq!(returned.modified_count, 1);
}

#[test]
async fn test_like_blog_success() {
    let state = create_test_state(MockRepoControl {
        like_result: true,
        ..MockRepoControl::default()
    });

    let result = handlers::like_blog(State(state), Path(valid_hex_id())).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), StatusCode::OK);
}

#[test]
async fn test_like_blog_missing_post_is_not_upserted() {
    // The repository reports no match; the handler must answer 404 instead of
    // silently creating a counter-only document.
    let state = create_test_state(MockRepoControl {
        like_result: false,
        ..MockRepoControl::default()
    });

    let result = handlers::like_blog(State(state), Path(valid_hex_id())).await;

    assert!(result.is_err());
    let (status, _body) = result.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
async fn test_get_wishlist_rejects_mismatched_owner() {
    let state = create_test_state(MockRepoControl {
        // Data exists, but must never be returned on a mismatch.
        wishlist_to_return: vec![WishlistEntry::default()],
        ..MockRepoControl::default()
    });

    let result = handlers::get_wishlist(
        session_user(),
        State(state),
        Query(WishlistFilter {
            email: Some("someone-else@example.com".to_string()),
        }),
    )
    .await;

    assert!(result.is_err());
    let (status, _body) = result.unwrap_err();
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[test]
async fn test_get_wishlist_rejects_missing_owner_query() {
    let state = create_test_state(MockRepoControl::default());

    // No ?email= at all counts as an identity mismatch.
    let result = handlers::get_wishlist(
        session_user(),
        State(state),
        Query(WishlistFilter { email: None }),
    )
    .await;

    assert!(result.is_err());
    let (status, _body) = result.unwrap_err();
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[test]
async fn test_get_wishlist_success_for_owner() {
    let entry = WishlistEntry {
        id: Some(ObjectId::new()),
        user_email: TEST_EMAIL.to_string(),
        blog_id: valid_hex_id(),
    };
    let state = create_test_state(MockRepoControl {
        wishlist_to_return: vec![entry.clone()],
        ..MockRepoControl::default()
    });

    let result = handlers::get_wishlist(
        session_user(),
        State(state),
        Query(WishlistFilter {
            email: Some(TEST_EMAIL.to_string()),
        }),
    )
    .await;

    assert!(result.is_ok());
    let Json(entries) = result.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_email, TEST_EMAIL);
}

#[test]
async fn test_remove_wishlist_success() {
    let state = create_test_state(MockRepoControl {
        remove_result: true,
        ..MockRepoControl::default()
    });

    let result = handlers::remove_wishlist(State(state), Path(valid_hex_id())).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), StatusCode::NO_CONTENT);
}

#[test]
async fn test_remove_wishlist_not_found() {
    let state = create_test_state(MockRepoControl {
        remove_result: false,
        ..MockRepoControl::default()
    });

    let result = handlers::remove_wishlist(State(state), Path(valid_hex_id())).await;

    assert!(result.is_err());
    let (status, _body) = result.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
async fn test_get_comments_passes_filter_through() {
    let comment = Comment {
        id: Some(ObjectId::new()),
        blog_id: valid_hex_id(),
        comment: "nice post".to_string(),
        user_name: "Reader".to_string(),
        user_photo: String::new(),
    };
    let state = create_test_state(MockRepoControl {
        comments_to_return: vec![comment.clone()],
        ..MockRepoControl::default()
    });

    let Json(comments) = handlers::get_comments(
        State(state),
        Query(CommentFilter {
            blog_id: Some(comment.blog_id.clone()),
        }),
    )
    .await;

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment, "nice post");
}

#[test]
async fn test_get_top_bloggers_returns_rows() {
    let state = create_test_state(MockRepoControl {
        top_bloggers_to_return: vec![TopBlogger {
            owner: TEST_EMAIL.to_string(),
            owner_name: "Owner".to_string(),
            owner_photo: String::new(),
            blog_count: 7,
        }],
        ..MockRepoControl::default()
    });

    let Json(bloggers) = handlers::get_top_bloggers(State(state)).await;

    assert_eq!(bloggers.len(), 1);
    assert_eq!(bloggers[0].blog_count, 7);
}

// --- SESSION COOKIE TESTS ---

#[test]
async fn test_issue_session_sets_hardened_cookie() {
    use axum_extra::extract::CookieJar;
    use axum_extra::extract::cookie::SameSite;
    use blog_portal::models::SessionRequest;

    let state = create_test_state(MockRepoControl::default());

    let result = handlers::issue_session(
        State(state),
        CookieJar::new(),
        Json(SessionRequest {
            email: TEST_EMAIL.to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let (jar, _body) = result.unwrap();
    let cookie = jar.get("token").expect("token cookie must be set");

    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::None));
    // 2-hour session window.
    assert_eq!(cookie.max_age(), Some(time::Duration::hours(2)));
}

#[test]
async fn test_clear_session_removes_cookie() {
    use axum_extra::extract::CookieJar;
    use axum_extra::extract::cookie::Cookie;

    let jar = CookieJar::new().add(Cookie::new("token", "some-jwt"));

    let (jar, _body) = handlers::clear_session(jar).await;

    // The jar now carries a removal cookie; the live value is gone.
    let response = jar.into_response();
    let set_cookie = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .expect("removal must emit a Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));
    // The removal must carry the issuance attributes, or cross-site browsers
    // discard it and the live cookie survives.
    assert!(set_cookie.contains("Secure"));
    assert!(set_cookie.contains("SameSite=None"));
    assert!(set_cookie.contains("HttpOnly"));
}
