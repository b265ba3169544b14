//! Read access to users, posts, comments and follow edges.
//!
//! Point lookups fail with [`RepoError::NotFound`] when the entity does not
//! exist; collection queries return an empty list instead. Every other error
//! means the source could not be reached or could not be understood.

mod memory;
mod remote;

pub use memory::MemoryRepository;
pub use remote::RemoteRepository;

use async_trait::async_trait;

use crate::core::errors::RepoResult;
use crate::core::pagination::PageRequest;
use crate::models::{Comment, Page, Post, User};

#[async_trait]
pub trait Repository: Send + Sync {
    async fn get_user_by_id(&self, id: &str) -> RepoResult<User>;

    async fn get_post_by_id(&self, id: &str) -> RepoResult<Post>;

    /// Comments on `post_id` in store order.
    async fn get_comments_by_post_id(&self, post_id: &str) -> RepoResult<Vec<Comment>>;

    /// Posts written by `author_id` in store order.
    async fn get_posts_by_author_id(&self, author_id: &str) -> RepoResult<Vec<Post>>;

    /// One page of the full ordered post collection.
    async fn get_posts_page(&self, req: PageRequest) -> RepoResult<Page<Post>>;

    async fn get_comments_by_author_id(&self, author_id: &str) -> RepoResult<Vec<Comment>>;

    /// Users following `user_id`.
    async fn get_followers(&self, user_id: &str) -> RepoResult<Vec<User>>;

    /// Users `user_id` follows.
    async fn get_following(&self, user_id: &str) -> RepoResult<Vec<User>>;
}
