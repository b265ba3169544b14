use tracing::warn;

use crate::core::errors::RepoResult;
use crate::core::pagination::PageRequest;
use crate::feed::Feed;
use crate::models::{EnrichedPost, EnrichedPostSummary, Page, Post};

impl Feed {
    /// Page of the global post collection with each post's author attached.
    ///
    /// Fails only if the page itself cannot be read; author and comment
    /// count lookups degrade per row.
    pub async fn get_paginated_posts(&self, req: PageRequest) -> RepoResult<Page<EnrichedPostSummary>> {
        let page = self.repository().get_posts_page(req).await?;
        let has_more = page.has_more;
        let items = self.summarize_all(page.items, None).await;

        Ok(Page { items, has_more })
    }

    /// [`Feed::get_paginated_posts`] over raw client input; values below 1
    /// are treated as 1.
    pub async fn list_posts(&self, page: i64, limit: i64) -> RepoResult<Page<EnrichedPostSummary>> {
        self.get_paginated_posts(PageRequest::new(page, limit)).await
    }

    /// Attach the author, every comment (each with its own author) and the
    /// final comment count to `post`.
    ///
    /// The post author and the comment chain run concurrently, and all
    /// comment authors are looked up at once. Nothing here fails: missing or
    /// unreachable pieces become placeholders, and an unreadable comment
    /// list becomes an empty one.
    pub async fn enrich_post_with_details(&self, post: Post) -> EnrichedPost {
        let comments = async {
            match self.repository().get_comments_by_post_id(&post.id).await {
                Ok(comments) => self.enrich_comments(comments).await,
                Err(err) => {
                    warn!(post_id = %post.id, error = %err, "comments unavailable, rendering none");
                    Vec::new()
                }
            }
        };
        let (author, comments) = futures::join!(
            self.resolve_author(&post.author_id, post.author.as_ref()),
            comments
        );

        let comment_count = self
            .comment_count_policy()
            .resolve(post.comment_count, comments.len());

        EnrichedPost {
            id: post.id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            timestamp: post.timestamp,
            author,
            comments,
            comment_count,
        }
    }

    /// Fully enriched post, or `NotFound` if `id` does not exist.
    pub async fn get_post(&self, id: &str) -> RepoResult<EnrichedPost> {
        let post = self.repository().get_post_by_id(id).await?;
        Ok(self.enrich_post_with_details(post).await)
    }
}
