use tracing::warn;

use crate::core::errors::RepoResult;
use crate::core::pagination::{paginate, PageRequest};
use crate::feed::Feed;
use crate::models::{AuthorSummary, EnrichedComment, EnrichedPostSummary, Page, User, UserProfile};

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl Feed {
    /// Profile for `id`: the user plus post, follower and following counts.
    ///
    /// A missing user is `NotFound`. The counts are secondary and fall back
    /// to 0 (or the stored post count) when their lookups fail.
    pub async fn get_user_profile(&self, id: &str) -> RepoResult<UserProfile> {
        let user = self.repository().get_user_by_id(id).await?;

        let post_count = async {
            if let Some(stored) = user.post_count {
                return stored;
            }
            match self.repository().get_posts_by_author_id(id).await {
                Ok(posts) => count(posts.len()),
                Err(err) => {
                    warn!(user_id = id, error = %err, "post count unavailable");
                    0
                }
            }
        };
        let followers = self.repository().get_followers(id);
        let following = self.repository().get_following(id);
        let (post_count, followers, following) = futures::join!(post_count, followers, following);

        let follower_count = followers.map(|f| count(f.len())).unwrap_or_else(|err| {
            warn!(user_id = id, error = %err, "follower count unavailable");
            0
        });
        let following_count = following.map(|f| count(f.len())).unwrap_or_else(|err| {
            warn!(user_id = id, error = %err, "following count unavailable");
            0
        });

        Ok(UserProfile {
            user,
            post_count,
            follower_count,
            following_count,
        })
    }

    /// Page of the posts `id` wrote, each summarised with that user as
    /// author. A missing user is `NotFound`.
    pub async fn list_posts_by_user(&self, id: &str, req: PageRequest) -> RepoResult<Page<EnrichedPostSummary>> {
        let (user, posts) = futures::join!(
            self.repository().get_user_by_id(id),
            self.repository().get_posts_by_author_id(id)
        );
        let author = AuthorSummary::from(&user?);
        let page = paginate(&posts?, req);
        let items = self.summarize_all(page.items, Some(&author)).await;

        Ok(Page {
            items,
            has_more: page.has_more,
        })
    }

    /// Page of the comments `id` wrote, in source order.
    pub async fn list_comments_by_user(&self, id: &str, req: PageRequest) -> RepoResult<Page<EnrichedComment>> {
        let (user, comments) = futures::join!(
            self.repository().get_user_by_id(id),
            self.repository().get_comments_by_author_id(id)
        );
        let author = AuthorSummary::from(&user?);

        Ok(paginate(&comments?, req).map(|comment| EnrichedComment {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            timestamp: comment.timestamp,
            author: author.clone(),
        }))
    }

    pub async fn followers(&self, id: &str) -> RepoResult<Vec<AuthorSummary>> {
        self.repository().get_user_by_id(id).await?;
        let users = self.repository().get_followers(id).await?;
        Ok(summaries(&users))
    }

    pub async fn following(&self, id: &str) -> RepoResult<Vec<AuthorSummary>> {
        self.repository().get_user_by_id(id).await?;
        let users = self.repository().get_following(id).await?;
        Ok(summaries(&users))
    }
}

fn summaries(users: &[User]) -> Vec<AuthorSummary> {
    users.iter().map(AuthorSummary::from).collect()
}
