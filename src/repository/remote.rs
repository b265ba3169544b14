use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::Repository;
use crate::core::errors::{Entity, RepoError, RepoResult};
use crate::core::helpers::path_segment;
use crate::core::pagination::PageRequest;
use crate::models::wire::{
    CommentRecord, DataEnvelope, ErrorBody, PageEnvelope, PostRecord, UserRecord,
};
use crate::models::{Comment, Page, Post, User};

/// Repository backed by a JSON/HTTP service.
///
/// Each call is one GET bounded by the client's timeout. A 404 on a point
/// lookup maps to `NotFound` for the entity named by the path; every other
/// failure, including a 404 on a collection endpoint, maps to `Timeout` or
/// `Transport`.
#[derive(Clone)]
pub struct RemoteRepository {
    http_client: Client,
    base_url: String,
}

impl RemoteRepository {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http_client, base_url))
    }

    pub fn with_client(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and decode the body as `T`. `subject` names the entity a
    /// 404 refers to; without one a 404 is a transport failure.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        subject: Option<(Entity, &str)>,
    ) -> RepoResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "remote lookup");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some((entity, id)) = subject {
                return Err(RepoError::not_found(entity, id));
            }
        }
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            return Err(RepoError::Transport {
                endpoint: path.to_string(),
                status: Some(status.as_u16()),
                message: body
                    .into_message()
                    .unwrap_or_else(|| format!("request failed with status {}", status.as_u16())),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| transport_error(path, e))
    }
}

fn transport_error(endpoint: &str, err: reqwest::Error) -> RepoError {
    if err.is_timeout() {
        RepoError::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else {
        RepoError::Transport {
            endpoint: endpoint.to_string(),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl Repository for RemoteRepository {
    async fn get_user_by_id(&self, id: &str) -> RepoResult<User> {
        let path = format!("/users/{}", path_segment(id));
        let record: UserRecord = self.fetch(&path, Some((Entity::User, id))).await?;
        Ok(record.into())
    }

    async fn get_post_by_id(&self, id: &str) -> RepoResult<Post> {
        let path = format!("/posts/{}", path_segment(id));
        let record: PostRecord = self.fetch(&path, Some((Entity::Post, id))).await?;
        Ok(record.into())
    }

    async fn get_comments_by_post_id(&self, post_id: &str) -> RepoResult<Vec<Comment>> {
        let path = format!("/posts/{}/comments", path_segment(post_id));
        let envelope: DataEnvelope<CommentRecord> = self.fetch(&path, Some((Entity::Post, post_id))).await?;
        Ok(envelope.data.into_iter().map(Comment::from).collect())
    }

    async fn get_posts_by_author_id(&self, author_id: &str) -> RepoResult<Vec<Post>> {
        let path = format!("/users/{}/posts", path_segment(author_id));
        let envelope: DataEnvelope<PostRecord> = self.fetch(&path, Some((Entity::User, author_id))).await?;
        Ok(envelope.data.into_iter().map(Post::from).collect())
    }

    async fn get_posts_page(&self, req: PageRequest) -> RepoResult<Page<Post>> {
        let path = format!("/posts?page={}&limit={}", req.page(), req.limit());
        let envelope: PageEnvelope<PostRecord> = self.fetch(&path, None).await?;
        Ok(Page {
            items: envelope
                .data
                .into_iter()
                .take(req.limit())
                .map(Post::from)
                .collect(),
            has_more: envelope.has_more,
        })
    }

    async fn get_comments_by_author_id(&self, author_id: &str) -> RepoResult<Vec<Comment>> {
        let path = format!("/users/{}/comments", path_segment(author_id));
        let envelope: DataEnvelope<CommentRecord> = self.fetch(&path, Some((Entity::User, author_id))).await?;
        Ok(envelope.data.into_iter().map(Comment::from).collect())
    }

    async fn get_followers(&self, user_id: &str) -> RepoResult<Vec<User>> {
        let path = format!("/users/{}/followers", path_segment(user_id));
        let envelope: DataEnvelope<UserRecord> = self.fetch(&path, Some((Entity::User, user_id))).await?;
        Ok(envelope.data.into_iter().map(User::from).collect())
    }

    async fn get_following(&self, user_id: &str) -> RepoResult<Vec<User>> {
        let path = format!("/users/{}/following", path_segment(user_id));
        let envelope: DataEnvelope<UserRecord> = self.fetch(&path, Some((Entity::User, user_id))).await?;
        Ok(envelope.data.into_iter().map(User::from).collect())
    }
}
