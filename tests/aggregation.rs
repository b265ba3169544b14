use std::sync::Arc;

use feedline::core::fixture::Snapshot;
use feedline::{CommentCountPolicy, Feed, MemoryRepository, PageRequest};

const JOHN: &str = "f9b3c87d-1a2b-4c3d-8e4f-5a6b7c8d9e0f";
const JANE: &str = "a1b2c3d4-e5f6-7g8h-9i0j-1k2l3m4n5o6p";
const ALEX: &str = "7p8o9i0u-1y2t3r4e-5w6q7a8s-9d0f1g2h";
const NEXTJS_POST: &str = "12037d5d-afe1-4ad5-ad2c-71f430770ef5";
const DESIGN_POST: &str = "f1f918b1-ab23-4f59-8a9a-d13bb7cf43e2";
const NODE_POST: &str = "92cb507c-4358-49e5-937c-18596981f822";

const ORPHANS: &str = r#"{
    "users": [
        { "_id": "u1", "username": "solo", "email": "solo@example.com" }
    ],
    "posts": [
        { "_id": "p1", "user_id": "ghost", "title": "Orphan", "content": "nobody wrote this",
          "created_at": "2025-05-01T00:00:00Z" },
        { "_id": "p2", "user_id": "u1", "title": "Drifted", "content": "stale counter",
          "comment_count": 0, "created_at": "2025-05-02T00:00:00Z" },
        { "_id": "p3", "user_id": "u1", "title": "Inflated", "content": "counter ahead",
          "comment_count": 5, "created_at": "2025-05-03T00:00:00Z" }
    ],
    "comments": [
        { "_id": "c1", "post_id": "p1", "user_id": "ghost", "content": "who?",
          "created_at": "2025-05-01T01:00:00Z" },
        { "_id": "c2", "post_id": "p1", "user_id": "u1", "content": "me",
          "created_at": "2025-05-01T02:00:00Z" },
        { "_id": "c3", "post_id": "p2", "user_id": "u1", "content": "one",
          "created_at": "2025-05-02T01:00:00Z" },
        { "_id": "c4", "post_id": "p2", "user_id": "u1", "content": "two",
          "created_at": "2025-05-02T02:00:00Z" },
        { "_id": "c5", "post_id": "p3", "user_id": "u1", "content": "only one",
          "created_at": "2025-05-03T01:00:00Z" }
    ]
}"#;

fn seed_feed() -> Feed {
    Feed::new(Arc::new(MemoryRepository::new(Snapshot::seed().unwrap())))
}

fn orphan_feed() -> Feed {
    Feed::new(Arc::new(MemoryRepository::new(Snapshot::from_json(ORPHANS).unwrap())))
}

#[tokio::test]
async fn first_page_returns_everything_when_limit_exceeds_total() {
    let page = seed_feed().list_posts(1, 10).await.unwrap();

    assert_eq!(page.items.len(), 4);
    assert!(!page.has_more);

    let first = &page.items[0];
    assert_eq!(first.id, NEXTJS_POST);
    assert_eq!(first.author.id, JOHN);
    assert_eq!(first.author.name, "John Doe");
    assert_eq!(first.author.image, "https://randomuser.me/api/portraits/men/1.jpg");

    let counts: Vec<u32> = page.items.iter().map(|p| p.comment_count).collect();
    assert_eq!(counts, vec![2, 1, 3, 0]);
}

#[tokio::test]
async fn layer_returns_full_content() {
    let page = seed_feed().list_posts(1, 1).await.unwrap();
    assert!(page.items[0].content.chars().count() > 200);
    assert!(!page.items[0].content.ends_with("..."));
}

#[tokio::test]
async fn second_page_of_two_is_the_tail() {
    let page = seed_feed().list_posts(2, 2).await.unwrap();

    let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![DESIGN_POST, NODE_POST]);
    assert!(!page.has_more);
}

#[tokio::test]
async fn bad_pagination_input_is_clamped() {
    let feed = seed_feed();
    let clamped = feed.list_posts(0, -5).await.unwrap();
    let explicit = feed.list_posts(1, 1).await.unwrap();

    assert_eq!(clamped, explicit);
    assert_eq!(clamped.items.len(), 1);
    assert!(clamped.has_more);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let page = seed_feed().list_posts(3, 2).await.unwrap();
    assert!(page.items.is_empty());
    assert!(!page.has_more);
}

#[tokio::test]
async fn page_bounds_hold_for_every_small_input() {
    let feed = seed_feed();
    for page in 1..=5 {
        for limit in 1..=5 {
            let result = feed.list_posts(page, limit).await.unwrap();
            assert!(result.items.len() <= limit as usize);
            assert_eq!(result.has_more, page * limit < 4, "page={} limit={}", page, limit);
        }
    }
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let err = seed_feed().get_post("does-not-exist").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn post_without_comments_keeps_stored_count() {
    let post = seed_feed().get_post(NODE_POST).await.unwrap();

    assert!(post.comments.is_empty());
    assert_eq!(post.comment_count, 0);
    assert_eq!(post.author.name, "Alex Johnson");
}

#[tokio::test]
async fn comments_keep_store_order_and_resolve_authors() {
    let post = seed_feed().get_post(DESIGN_POST).await.unwrap();

    let authors: Vec<&str> = post.comments.iter().map(|c| c.author.id.as_str()).collect();
    assert_eq!(authors, vec![JOHN, ALEX, JANE]);
    assert_eq!(post.comments[2].author.name, "Jane Smith");
    assert!(post.comments.iter().all(|c| c.post_id == DESIGN_POST));
    assert_eq!(post.comment_count, 3);
}

#[tokio::test]
async fn unresolvable_authors_fall_back_to_placeholder() {
    let post = orphan_feed().get_post("p1").await.unwrap();

    assert_eq!(post.author.id, "ghost");
    assert_eq!(post.author.name, "Unknown User");
    assert_eq!(post.author.image, "");

    assert_eq!(post.comments.len(), 2);
    assert_eq!(post.comments[0].author.name, "Unknown User");
    assert_eq!(post.comments[0].author.image, "");
    // Missing display name falls back to the username.
    assert_eq!(post.comments[1].author.name, "solo");
    assert_eq!(post.comment_count, 2);
}

#[tokio::test]
async fn zero_stored_count_defers_to_live_comments_in_detail_only() {
    let post = orphan_feed().get_post("p2").await.unwrap();
    assert_eq!(post.comment_count, 2);

    // Summaries show any stored value, zero included; p1 has none.
    let page = orphan_feed().list_posts(1, 10).await.unwrap();
    let counts: Vec<u32> = page.items.iter().map(|p| p.comment_count).collect();
    assert_eq!(counts, vec![2, 0, 5]);
}

#[tokio::test]
async fn live_policy_ignores_stored_counts() {
    let feed = orphan_feed().with_comment_count_policy(CommentCountPolicy::PreferLive);

    let post = feed.get_post("p3").await.unwrap();
    assert_eq!(post.comment_count, 1);

    let page = feed.list_posts(1, 10).await.unwrap();
    let counts: Vec<u32> = page.items.iter().map(|p| p.comment_count).collect();
    assert_eq!(counts, vec![2, 2, 1]);
}

#[tokio::test]
async fn repeated_calls_are_identical() {
    let feed = seed_feed();

    assert_eq!(feed.list_posts(1, 3).await.unwrap(), feed.list_posts(1, 3).await.unwrap());
    assert_eq!(
        feed.get_post(NEXTJS_POST).await.unwrap(),
        feed.get_post(NEXTJS_POST).await.unwrap()
    );
}

#[tokio::test]
async fn profile_counts_posts_and_follow_edges() {
    let feed = seed_feed();

    let john = feed.get_user_profile(JOHN).await.unwrap();
    assert_eq!(john.user.username, "johndoe");
    assert_eq!(john.post_count, 2);
    assert_eq!(john.follower_count, 1);
    assert_eq!(john.following_count, 1);

    let jane = feed.get_user_profile(JANE).await.unwrap();
    assert_eq!(jane.follower_count, 2);

    assert!(feed.get_user_profile("nobody").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn profile_derives_missing_post_count() {
    let profile = orphan_feed().get_user_profile("u1").await.unwrap();
    assert_eq!(profile.post_count, 2);
    assert_eq!(profile.follower_count, 0);
}

#[tokio::test]
async fn user_posts_page_with_author_attached() {
    let feed = seed_feed();

    let page = feed.list_posts_by_user(JOHN, PageRequest::new(1, 1)).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert!(page.has_more);
    assert_eq!(page.items[0].author.name, "John Doe");

    let page = feed.list_posts_by_user(JOHN, PageRequest::new(2, 1)).await.unwrap();
    assert_eq!(page.items[0].title, "The Power of Shadcn UI Components");
    assert!(!page.has_more);

    let err = feed
        .list_posts_by_user("nobody", PageRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn user_comments_and_follow_lists() {
    let feed = seed_feed();

    let comments = feed.list_comments_by_user(JANE, PageRequest::default()).await.unwrap();
    assert_eq!(comments.items.len(), 3);
    assert!(comments.items.iter().all(|c| c.author.id == JANE));

    let followers = feed.followers(JANE).await.unwrap();
    let ids: Vec<&str> = followers.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec![JOHN, ALEX]);

    let following = feed.following(ALEX).await.unwrap();
    assert_eq!(following.len(), 1);
    assert_eq!(following[0].name, "Jane Smith");

    assert!(feed.followers("nobody").await.unwrap_err().is_not_found());
}
