use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedPost {
    pub id: String,
    pub text: String,
}

/// One page of a user's timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TweetPage {
    pub tweets: Vec<Tweet>,
    pub next_token: Option<String>,
}

impl TweetPage {
    pub fn new(tweets: Vec<Tweet>, next_token: Option<String>) -> Self {
        Self { tweets, next_token }
    }

    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }
}
