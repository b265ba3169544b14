use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use crate::models::wire::{CommentRecord, FollowRecord, PostRecord, UserRecord};
use crate::models::{Comment, Follow, Post, User};

const SEED: &str = include_str!("../../fixtures/seed.json");

#[derive(Deserialize)]
struct FixtureFile {
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(default)]
    posts: Vec<PostRecord>,
    #[serde(default)]
    comments: Vec<CommentRecord>,
    #[serde(default)]
    follows: Vec<FollowRecord>,
}

/// Immutable dataset in canonical form. Collection order is the order of
/// the source file and is the order every query returns.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub follows: Vec<Follow>,
}

impl Snapshot {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let file: FixtureFile = serde_json::from_str(raw).context("invalid fixture JSON")?;

        Ok(Snapshot {
            users: file.users.into_iter().map(User::from).collect(),
            posts: file.posts.into_iter().map(Post::from).collect(),
            comments: file.comments.into_iter().map(Comment::from).collect(),
            follows: file.follows.into_iter().map(Follow::from).collect(),
        })
    }

    /// Bundled demo dataset.
    pub fn seed() -> anyhow::Result<Self> {
        Self::from_json(SEED)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        let snapshot = Self::from_json(&raw)
            .with_context(|| format!("failed to parse fixture {}", path.display()))?;
        info!(
            path = %path.display(),
            users = snapshot.users.len(),
            posts = snapshot.posts.len(),
            comments = snapshot.comments.len(),
            "fixture loaded"
        );
        Ok(snapshot)
    }
}
