use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{errors::DomainError, PublishedPost, Tweet, TweetPage};

#[async_trait]
pub trait SocialPlatform: Send + Sync {
    async fn post(&self, text: &str, media_ids: &[String]) -> Result<PublishedPost, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Tweet>, DomainError>;
    async fn resolve_user_id(&self, username: &str) -> Result<Option<String>, DomainError>;
    async fn list_user_posts(
        &self,
        user_id: &str,
        max_results: u32,
        start_time: Option<DateTime<Utc>>,
        page_token: Option<&str>,
    ) -> Result<TweetPage, DomainError>;
}
