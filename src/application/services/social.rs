use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

use crate::application::{CallPolicy, PostGenerator};
use crate::domain::{
    ports::SocialPlatform, DomainError, GeneratedPost, PublishedPost, Tweet,
};

/// Largest page the timeline endpoint serves.
pub const PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub post: GeneratedPost,
    pub published: PublishedPost,
    /// The post as read back from the platform, when it could be fetched.
    pub confirmed: Option<Tweet>,
}

/// Generates a post and publishes its body text. Tags are kept for
/// indexing and logging only.
pub struct PublishService {
    generator: Arc<PostGenerator>,
    platform: Arc<dyn SocialPlatform>,
    policy: CallPolicy,
}

impl PublishService {
    pub fn new(
        generator: Arc<PostGenerator>,
        platform: Arc<dyn SocialPlatform>,
        policy: CallPolicy,
    ) -> Self {
        Self {
            generator,
            platform,
            policy,
        }
    }

    #[instrument(skip(self))]
    pub async fn publish(&self, trend_context: &str) -> Result<PublishOutcome, DomainError> {
        let post = self.generator.generate(trend_context).await?;

        // Sent once: a retried POST can duplicate an accepted post.
        let published = self
            .policy
            .run_once("publish post", || self.platform.post(&post.text, &[]))
            .await?;
        tracing::info!(post_id = %published.id, tags = ?post.tags, "post published");

        // A failed read-back does not undo the publish.
        let confirmed = match self
            .policy
            .run("read back post", || self.platform.get(&published.id))
            .await
        {
            Ok(tweet) => tweet,
            Err(e) => {
                tracing::warn!(post_id = %published.id, error = %e, "could not read back post");
                None
            }
        };

        Ok(PublishOutcome {
            post,
            published,
            confirmed,
        })
    }
}

/// Pages through a user's timeline.
pub struct TimelineService {
    platform: Arc<dyn SocialPlatform>,
    policy: CallPolicy,
    page_size: u32,
}

impl TimelineService {
    pub fn new(platform: Arc<dyn SocialPlatform>, policy: CallPolicy) -> Self {
        Self {
            platform,
            policy,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// All posts by `username` created at or after `since`, newest first
    /// as served by the platform.
    #[instrument(skip(self))]
    pub async fn fetch_since(
        &self,
        username: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Tweet>, DomainError> {
        let user_id = self
            .policy
            .run("resolve user", || self.platform.resolve_user_id(username))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("user '{username}'")))?;
        tracing::info!(username, user_id = %user_id, "fetching posts");

        let mut tweets = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let page = self
                .policy
                .run("list user posts", || {
                    self.platform.list_user_posts(
                        &user_id,
                        self.page_size,
                        Some(since),
                        next_token.as_deref(),
                    )
                })
                .await?;

            tweets.extend(page.tweets);
            tracing::info!(total = tweets.len(), "fetched page");

            match page.next_token {
                Some(token) if Some(&token) != next_token.as_ref() => next_token = Some(token),
                Some(_) => {
                    tracing::warn!("platform repeated a page token, stopping");
                    break;
                }
                None => break,
            }
        }

        Ok(tweets)
    }
}
