use std::collections::HashMap;

use async_trait::async_trait;

use super::Repository;
use crate::core::errors::{Entity, RepoError, RepoResult};
use crate::core::fixture::Snapshot;
use crate::core::pagination::{paginate, PageRequest};
use crate::models::{Comment, Page, Post, User};

/// Repository over an immutable in-memory snapshot.
///
/// Nothing here awaits, so every call resolves on its first poll.
pub struct MemoryRepository {
    snapshot: Snapshot,
    users_by_id: HashMap<String, usize>,
    posts_by_id: HashMap<String, usize>,
}

impl MemoryRepository {
    pub fn new(snapshot: Snapshot) -> Self {
        // First occurrence wins on duplicate ids.
        let mut users_by_id = HashMap::with_capacity(snapshot.users.len());
        for (idx, user) in snapshot.users.iter().enumerate() {
            users_by_id.entry(user.id.clone()).or_insert(idx);
        }
        let mut posts_by_id = HashMap::with_capacity(snapshot.posts.len());
        for (idx, post) in snapshot.posts.iter().enumerate() {
            posts_by_id.entry(post.id.clone()).or_insert(idx);
        }

        MemoryRepository {
            snapshot,
            users_by_id,
            posts_by_id,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn user(&self, id: &str) -> Option<&User> {
        self.users_by_id.get(id).map(|&idx| &self.snapshot.users[idx])
    }

    fn users_for<'a>(&self, ids: impl Iterator<Item = &'a str>) -> Vec<User> {
        // Dangling follow edges are skipped.
        ids.filter_map(|id| self.user(id)).cloned().collect()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn get_user_by_id(&self, id: &str) -> RepoResult<User> {
        self.user(id)
            .cloned()
            .ok_or_else(|| RepoError::not_found(Entity::User, id))
    }

    async fn get_post_by_id(&self, id: &str) -> RepoResult<Post> {
        self.posts_by_id
            .get(id)
            .map(|&idx| self.snapshot.posts[idx].clone())
            .ok_or_else(|| RepoError::not_found(Entity::Post, id))
    }

    async fn get_comments_by_post_id(&self, post_id: &str) -> RepoResult<Vec<Comment>> {
        Ok(self
            .snapshot
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn get_posts_by_author_id(&self, author_id: &str) -> RepoResult<Vec<Post>> {
        Ok(self
            .snapshot
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn get_posts_page(&self, req: PageRequest) -> RepoResult<Page<Post>> {
        Ok(paginate(&self.snapshot.posts, req))
    }

    async fn get_comments_by_author_id(&self, author_id: &str) -> RepoResult<Vec<Comment>> {
        Ok(self
            .snapshot
            .comments
            .iter()
            .filter(|c| c.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn get_followers(&self, user_id: &str) -> RepoResult<Vec<User>> {
        Ok(self.users_for(
            self.snapshot
                .follows
                .iter()
                .filter(|f| f.following_id == user_id)
                .map(|f| f.follower_id.as_str()),
        ))
    }

    async fn get_following(&self, user_id: &str) -> RepoResult<Vec<User>> {
        Ok(self.users_for(
            self.snapshot
                .follows
                .iter()
                .filter(|f| f.follower_id == user_id)
                .map(|f| f.following_id.as_str()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOHN: &str = "f9b3c87d-1a2b-4c3d-8e4f-5a6b7c8d9e0f";
    const JANE: &str = "a1b2c3d4-e5f6-7g8h-9i0j-1k2l3m4n5o6p";

    fn repo() -> MemoryRepository {
        MemoryRepository::new(Snapshot::seed().unwrap())
    }

    #[tokio::test]
    async fn point_lookups_distinguish_absence() {
        let repo = repo();
        assert_eq!(repo.get_user_by_id(JOHN).await.unwrap().username, "johndoe");

        let err = repo.get_user_by_id("nobody").await.unwrap_err();
        assert!(err.is_not_found());
        let err = repo.get_post_by_id("nothing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn filters_keep_store_order() {
        let repo = repo();
        let posts = repo.get_posts_by_author_id(JOHN).await.unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Getting Started with Next.js", "The Power of Shadcn UI Components"]
        );

        let comments = repo
            .get_comments_by_post_id("f1f918b1-ab23-4f59-8a9a-d13bb7cf43e2")
            .await
            .unwrap();
        assert_eq!(comments.len(), 3);
        assert!(comments.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        assert!(repo.get_comments_by_post_id("nothing").await.unwrap().is_empty());
        assert!(repo.get_posts_by_author_id("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn follow_edges_resolve_both_directions() {
        let repo = repo();
        let followers = repo.get_followers(JANE).await.unwrap();
        assert_eq!(followers.len(), 2);
        let following = repo.get_following(JANE).await.unwrap();
        assert_eq!(following.len(), 1);
        assert_eq!(following[0].id, JOHN);
    }
}
