//! Boundary records as they arrive from a fixture file or a remote source.
//!
//! Sources disagree on casing (`_id` vs `id`, `user_id` vs `authorId`,
//! `created_at` vs `timestamp`, ...). Every accepted spelling is listed here
//! so that everything past this module sees exactly one shape.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::models::{AuthorSummary, Comment, Follow, Post, User};

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, alias = "profile_picture_url", alias = "profilePictureUrl")]
    pub image: Option<String>,
    #[serde(default, alias = "post_count")]
    pub post_count: Option<u32>,
    #[serde(default, alias = "join_date")]
    pub join_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "user_id", alias = "author_id")]
    pub author_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(alias = "created_at", alias = "createdAt")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, alias = "comment_count")]
    pub comment_count: Option<u32>,
    #[serde(default)]
    pub author: Option<AuthorSummary>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "post_id")]
    pub post_id: String,
    #[serde(alias = "user_id", alias = "author_id")]
    pub author_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(alias = "created_at", alias = "createdAt")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub author: Option<AuthorSummary>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FollowRecord {
    #[serde(alias = "follower_id")]
    pub follower_id: String,
    #[serde(alias = "following_id")]
    pub following_id: String,
}

/// `{ "data": [...] }` collection envelope.
#[derive(Deserialize, Debug)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

/// `{ "data": [...], "hasMore": bool }` paginated envelope.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default, alias = "has_more")]
    pub has_more: bool,
}

/// Body of a non-2xx response.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        let name = match r.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => r.username.clone(),
        };
        User {
            id: r.id,
            name,
            username: r.username,
            email: r.email,
            bio: r.bio.filter(|b| !b.is_empty()),
            image: r.image.filter(|i| !i.is_empty()),
            post_count: r.post_count,
            join_date: r.join_date,
        }
    }
}

impl From<PostRecord> for Post {
    fn from(r: PostRecord) -> Self {
        Post {
            id: r.id,
            author_id: r.author_id,
            title: r.title,
            content: r.content,
            timestamp: r.timestamp,
            comment_count: r.comment_count,
            author: r.author,
        }
    }
}

impl From<CommentRecord> for Comment {
    fn from(r: CommentRecord) -> Self {
        Comment {
            id: r.id,
            post_id: r.post_id,
            author_id: r.author_id,
            content: r.content,
            timestamp: r.timestamp,
            author: r.author,
        }
    }
}

impl From<FollowRecord> for Follow {
    fn from(r: FollowRecord) -> Self {
        Follow {
            follower_id: r.follower_id,
            following_id: r.following_id,
        }
    }
}
