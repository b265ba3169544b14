//! Aggregation over a [`Repository`]: pagination plus author and comment
//! enrichment. Operations live in `posts` and `users`.
//!
//! Lookups that only decorate a primary record (a post's author, a comment's
//! author, a live comment count) never fail the enclosing call. They fall
//! back to placeholder values and log the cause.

use std::str::FromStr;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::models::{AuthorSummary, Comment, EnrichedComment, EnrichedPostSummary, Post};
use crate::repository::Repository;

/// How `commentCount` is chosen when a post carries a stored count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentCountPolicy {
    /// Summaries show any stored count. Detail views show it when
    /// non-zero and otherwise count the comments they fetched.
    #[default]
    PreferStored,
    /// Always the number of comments actually found.
    PreferLive,
}

impl FromStr for CommentCountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stored" | "prefer_stored" => Ok(CommentCountPolicy::PreferStored),
            "live" | "prefer_live" => Ok(CommentCountPolicy::PreferLive),
            other => Err(format!("unknown comment count policy: {}", other)),
        }
    }
}

impl CommentCountPolicy {
    /// The stored count a summary row shows without looking at comments.
    pub fn summary_stored(self, stored: Option<u32>) -> Option<u32> {
        match self {
            CommentCountPolicy::PreferStored => stored,
            CommentCountPolicy::PreferLive => None,
        }
    }

    /// The stored count a detail view accepts over its comment list.
    pub fn trusted_stored(self, stored: Option<u32>) -> Option<u32> {
        match self {
            CommentCountPolicy::PreferStored => stored.filter(|&n| n > 0),
            CommentCountPolicy::PreferLive => None,
        }
    }

    pub fn resolve(self, stored: Option<u32>, live: usize) -> u32 {
        self.trusted_stored(stored)
            .unwrap_or_else(|| u32::try_from(live).unwrap_or(u32::MAX))
    }
}

/// Request-scoped aggregation over a shared, read-only repository.
#[derive(Clone)]
pub struct Feed {
    repo: Arc<dyn Repository>,
    comment_count_policy: CommentCountPolicy,
}

impl Feed {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Feed {
            repo,
            comment_count_policy: CommentCountPolicy::default(),
        }
    }

    pub fn with_comment_count_policy(mut self, policy: CommentCountPolicy) -> Self {
        self.comment_count_policy = policy;
        self
    }

    pub fn repository(&self) -> &dyn Repository {
        self.repo.as_ref()
    }

    pub fn comment_count_policy(&self) -> CommentCountPolicy {
        self.comment_count_policy
    }

    /// Author summary for `author_id`, preferring one the source embedded.
    pub(crate) async fn resolve_author(
        &self,
        author_id: &str,
        embedded: Option<&AuthorSummary>,
    ) -> AuthorSummary {
        if let Some(author) = embedded {
            return author.clone();
        }

        match self.repo.get_user_by_id(author_id).await {
            Ok(user) => AuthorSummary::from(&user),
            Err(err) if err.is_not_found() => {
                debug!(author_id, "author does not exist, using placeholder");
                AuthorSummary::unknown(author_id)
            }
            Err(err) => {
                warn!(author_id, error = %err, "author lookup failed, using placeholder");
                AuthorSummary::unknown(author_id)
            }
        }
    }

    /// Comment count for a summary row. Only fetches comments when the
    /// policy does not accept the stored value.
    pub(crate) async fn resolve_comment_count(&self, post: &Post) -> u32 {
        if let Some(stored) = self.comment_count_policy.summary_stored(post.comment_count) {
            return stored;
        }

        match self.repo.get_comments_by_post_id(&post.id).await {
            Ok(comments) => u32::try_from(comments.len()).unwrap_or(u32::MAX),
            Err(err) => {
                warn!(post_id = %post.id, error = %err, "live comment count unavailable");
                post.comment_count.unwrap_or(0)
            }
        }
    }

    pub(crate) async fn summarize(&self, post: Post, author: Option<&AuthorSummary>) -> EnrichedPostSummary {
        let embedded = author.or(post.author.as_ref());
        let (author, comment_count) = futures::join!(
            self.resolve_author(&post.author_id, embedded),
            self.resolve_comment_count(&post)
        );

        EnrichedPostSummary {
            id: post.id,
            title: post.title,
            content: post.content,
            timestamp: post.timestamp,
            author,
            comment_count,
        }
    }

    /// Summaries for `posts`, resolved concurrently, in input order.
    pub(crate) async fn summarize_all(
        &self,
        posts: Vec<Post>,
        author: Option<&AuthorSummary>,
    ) -> Vec<EnrichedPostSummary> {
        join_all(posts.into_iter().map(|post| self.summarize(post, author))).await
    }

    pub(crate) async fn enrich_comment(&self, comment: Comment) -> EnrichedComment {
        let author = self
            .resolve_author(&comment.author_id, comment.author.as_ref())
            .await;

        EnrichedComment {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            timestamp: comment.timestamp,
            author,
        }
    }

    /// One author lookup per comment, all issued at once.
    pub(crate) async fn enrich_comments(&self, comments: Vec<Comment>) -> Vec<EnrichedComment> {
        join_all(comments.into_iter().map(|c| self.enrich_comment(c))).await
    }
}
