use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{ports::SocialPlatform, DomainError, PublishedPost, Tweet, TweetPage};
use crate::infrastructure::config::{TwitterConfig, TwitterCredentials};
use crate::infrastructure::social::oauth::{percent_encode, OAuth1Signer};

/// X API v2 client. Every request is OAuth 1.0a signed.
pub struct TwitterClient {
    http: reqwest::Client,
    base_url: String,
    signer: OAuth1Signer,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Deserialize)]
struct Meta {
    next_token: Option<String>,
}

#[derive(Deserialize)]
struct User {
    id: String,
}

#[derive(Deserialize)]
struct ApiError {
    detail: Option<String>,
    title: Option<String>,
}

impl TwitterClient {
    pub fn new(
        config: &TwitterConfig,
        credentials: &TwitterCredentials,
    ) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(config.policy.timeout())
            .build()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            signer: OAuth1Signer::new(credentials),
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<Response, DomainError> {
        let url = format!("{}{path}", self.base_url);
        let authorization = self
            .signer
            .authorization_header(method.as_str(), &url, query)?;

        let mut request = self
            .http
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, authorization);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        request
            .send()
            .await
            .map_err(|e| DomainError::external(format!("X API request failed: {e}")))
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, DomainError> {
        response
            .json()
            .await
            .map_err(|e| DomainError::external(format!("invalid X API response: {e}")))
    }
}

/// Maps an unsuccessful response to an error carrying the API's detail.
async fn api_error(action: &str, response: Response) -> DomainError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ApiError>(&body)
        .ok()
        .and_then(|e| e.detail.or(e.title))
        .unwrap_or_else(|| "Unknown error occurred".to_string());

    tracing::error!(action, status = status.as_u16(), detail = %detail, "X API call failed");
    DomainError::external(format!("{action} failed: {status} - {detail}"))
}

#[async_trait]
impl SocialPlatform for TwitterClient {
    async fn post(&self, text: &str, media_ids: &[String]) -> Result<PublishedPost, DomainError> {
        let mut payload = json!({ "text": text });
        if !media_ids.is_empty() {
            payload["media"] = json!({ "media_ids": media_ids });
        }

        let response = self.send(Method::POST, "/tweets", &[], Some(payload)).await?;
        if !response.status().is_success() {
            return Err(api_error("post tweet", response).await);
        }

        let envelope: Envelope<PublishedPost> = Self::decode(response).await?;
        let published = envelope
            .data
            .ok_or_else(|| DomainError::external("post tweet response has no data"))?;
        tracing::info!(tweet_id = %published.id, "tweet posted");
        Ok(published)
    }

    async fn get(&self, id: &str) -> Result<Option<Tweet>, DomainError> {
        let path = format!("/tweets/{}", percent_encode(id));
        let query = [("tweet.fields", "created_at")];
        let response = self.send(Method::GET, &path, &query, None).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(api_error("get tweet", response).await);
        }

        let envelope: Envelope<Tweet> = Self::decode(response).await?;
        Ok(envelope.data)
    }

    async fn resolve_user_id(&self, username: &str) -> Result<Option<String>, DomainError> {
        let handle = username.trim_start_matches('@');
        let path = format!("/users/by/username/{}", percent_encode(handle));
        let response = self.send(Method::GET, &path, &[], None).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(api_error("get user id", response).await);
        }

        let envelope: Envelope<User> = Self::decode(response).await?;
        Ok(envelope.data.map(|u| u.id))
    }

    async fn list_user_posts(
        &self,
        user_id: &str,
        max_results: u32,
        start_time: Option<DateTime<Utc>>,
        page_token: Option<&str>,
    ) -> Result<TweetPage, DomainError> {
        let path = format!("/users/{}/tweets", percent_encode(user_id));
        let max_results = max_results.to_string();
        let start_time = start_time.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true));

        let mut query = vec![
            ("max_results", max_results.as_str()),
            ("tweet.fields", "created_at"),
        ];
        if let Some(start_time) = start_time.as_deref() {
            query.push(("start_time", start_time));
        }
        if let Some(token) = page_token {
            query.push(("pagination_token", token));
        }

        let response = self.send(Method::GET, &path, &query, None).await?;
        if !response.status().is_success() {
            return Err(api_error("fetch user tweets", response).await);
        }

        let envelope: Envelope<Vec<Tweet>> = Self::decode(response).await?;
        Ok(TweetPage::new(
            envelope.data.unwrap_or_default(),
            envelope.meta.and_then(|m| m.next_token),
        ))
    }
}
