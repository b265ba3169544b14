use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::UNKNOWN_AUTHOR_NAME;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    /// Stored count; profiles expose the resolved value instead.
    #[serde(skip)]
    pub post_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub comment_count: Option<u32>,
    /// Author summary embedded by the source, if it sent one.
    #[serde(skip)]
    pub author: Option<AuthorSummary>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip)]
    pub author: Option<AuthorSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Follow {
    pub follower_id: String,
    pub following_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

impl AuthorSummary {
    /// Placeholder for an author reference that could not be resolved.
    pub fn unknown(id: &str) -> Self {
        AuthorSummary {
            id: id.to_string(),
            name: UNKNOWN_AUTHOR_NAME.to_string(),
            image: String::new(),
        }
    }
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        AuthorSummary {
            id: user.id.clone(),
            name: user.name.clone(),
            image: user.image.clone().unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPostSummary {
    pub id: String,
    pub title: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author: AuthorSummary,
    pub comment_count: u32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedComment {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author: AuthorSummary,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPost {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author: AuthorSummary,
    pub comments: Vec<EnrichedComment>,
    pub comment_count: u32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub post_count: u32,
    pub follower_count: u32,
    pub following_count: u32,
}

/// One page of a larger ordered collection.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_more: self.has_more,
        }
    }
}
