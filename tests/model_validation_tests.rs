use blog_portal::models::{Blog, TopBlogger, UpdateBlogRequest, WishlistEntry};
use mongodb::bson::{doc, oid::ObjectId};

// --- Tests ---

#[test]
fn test_blog_json_uses_camel_case_wire_format() {
    // The stored document field names double as the JSON wire format, so the
    // camelCase rename must hold for every field the aggregations address.
    let blog = Blog {
        id: Some(ObjectId::new()),
        title: "T".to_string(),
        long_description: "a long description".to_string(),
        post_date: "2024-06-01".to_string(),
        owner_name: "Owner".to_string(),
        ..Blog::default()
    };

    let json_output = serde_json::to_string(&blog).unwrap();

    assert!(json_output.contains(r#""longDescription":"a long description""#));
    assert!(json_output.contains(r#""postDate":"2024-06-01""#));
    assert!(json_output.contains(r#""ownerName":"Owner""#));
    assert!(json_output.contains(r#""likeCount":0"#));
    assert!(!json_output.contains("long_description"));
    assert!(!json_output.contains("post_date"));
}

#[test]
fn test_blog_id_serializes_under_underscore_id() {
    let blog = Blog {
        id: Some(ObjectId::new()),
        ..Blog::default()
    };

    let json_output = serde_json::to_string(&blog).unwrap();
    assert!(
        json_output.contains(r#""_id""#),
        "document id must serialize under the _id key"
    );
}

#[test]
fn test_blog_without_id_omits_the_field() {
    // Pre-insert payloads carry no id; the key must be absent, not null,
    // so the database can assign one.
    let blog = Blog::default();

    let json_output = serde_json::to_string(&blog).unwrap();
    assert!(!json_output.contains("_id"));
}

#[test]
fn test_blog_deserializes_from_aggregation_document() {
    // The featured pipeline adds a transient descriptionLength field; the
    // deserializer must tolerate it, and a document predating the like
    // feature must default its counter to zero.
    let document = doc! {
        "_id": ObjectId::new(),
        "title": "T",
        "category": "rust",
        "photo": "p",
        "shortDescription": "s",
        "longDescription": "lll",
        "postDate": "2024-06-01",
        "owner": "o@example.com",
        "ownerName": "O",
        "ownerPhoto": "op",
        "descriptionLength": 3,
    };

    let blog: Blog = mongodb::bson::from_document(document).unwrap();
    assert_eq!(blog.title, "T");
    assert_eq!(blog.like_count, 0);
}

#[test]
fn test_top_blogger_deserializes_from_projected_group() {
    // Shape produced by the top-bloggers pipeline's final $project stage.
    let document = doc! {
        "owner": "o@example.com",
        "ownerName": "O",
        "ownerPhoto": "op",
        "blogCount": 4_i64,
    };

    let blogger: TopBlogger = mongodb::bson::from_document(document).unwrap();
    assert_eq!(blogger.owner, "o@example.com");
    assert_eq!(blogger.blog_count, 4);
}

#[test]
fn test_update_request_is_the_fixed_field_set() {
    // The update endpoint overwrites exactly these fields; owner display
    // fields and the like counter must not be expressible through it.
    let update = UpdateBlogRequest {
        title: "New".to_string(),
        ..UpdateBlogRequest::default()
    };

    let json_output = serde_json::to_string(&update).unwrap();
    assert!(json_output.contains(r#""title":"New""#));
    assert!(!json_output.contains("ownerName"));
    assert!(!json_output.contains("ownerPhoto"));
    assert!(!json_output.contains("likeCount"));
}

#[test]
fn test_wishlist_entry_round_trips_through_bson() {
    let entry = WishlistEntry {
        id: Some(ObjectId::new()),
        user_email: "o@example.com".to_string(),
        blog_id: ObjectId::new().to_hex(),
    };

    let document = mongodb::bson::to_document(&entry).unwrap();
    assert!(document.contains_key("_id"));
    assert!(document.contains_key("userEmail"));

    let back: WishlistEntry = mongodb::bson::from_document(document).unwrap();
    assert_eq!(back.user_email, entry.user_email);
    assert_eq!(back.blog_id, entry.blog_id);
}
