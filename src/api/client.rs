//! API client for communicating with the CMS administration REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests against the admin endpoints. The bearer credential is read
//! from the injected `TokenStore` on every request, so the client always
//! reflects the currently persisted session.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::auth::TokenStore;
use crate::models::{Page, Post, Profile};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// API client for the CMS admin API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: TokenStore,
    /// Explicit credential for one-off calls. When set, the store is
    /// never consulted.
    token_override: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given endpoint, reading the
    /// ambient credential from `store`.
    pub fn new(base_url: impl Into<String>, store: TokenStore) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            store,
            token_override: None,
        })
    }

    /// Create a client that sends the supplied credential on every request,
    /// bypassing the token store entirely. Shares the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            store: self.store.clone(),
            token_override: Some(token),
        }
    }

    /// Authenticate against the CMS and return the issued bearer token.
    /// Sent without any ambient credential; the caller decides whether to
    /// persist the result.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let url = format!("{}/api/auth/login", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .context("Failed to send login request")?;

        let response = Self::check_response(&url, response).await?;

        let login: LoginResponse = response
            .json()
            .await
            .context("Failed to parse login response")?;
        Ok(login.token)
    }

    /// Build the headers for an authenticated request. Attaches
    /// `Authorization: Bearer <token>` iff a credential is available: the
    /// override when set, otherwise whatever the store currently holds.
    /// A corrupted stored envelope is an error here, so the request fails
    /// before anything is sent.
    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        let token = match self.token_override {
            Some(ref token) => Some(token.clone()),
            None => self.store.bearer()?,
        };
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    /// Errors are normalized into the `ApiError` taxonomy and surfaced
    /// unchanged - no retry, no refresh-and-retry.
    async fn check_response(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_response(status, url, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(&url, response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(&url, response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Admin API surface =====

    /// Fetch the profile of the currently authenticated user
    pub async fn fetch_profile(&self) -> Result<Profile> {
        self.get("/api/users/me").await
    }

    /// Fetch the post listing
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let url = format!("{}/api/posts", self.base_url);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .context("Failed to fetch posts")?;

        let response = Self::check_response(&url, response).await?;
        let text = response.text().await.context("Failed to read posts response body")?;
        debug!("Posts response received");

        // Try to parse as array directly first, then as wrapped object
        if let Ok(posts) = serde_json::from_str::<Vec<Post>>(&text) {
            return Ok(posts);
        }

        #[derive(Deserialize)]
        struct PostsWrapper {
            #[serde(default)]
            posts: Vec<Post>,
            #[serde(default)]
            data: Vec<Post>,
        }

        let wrapper: PostsWrapper =
            serde_json::from_str(&text).context("Failed to parse posts response")?;
        if !wrapper.posts.is_empty() {
            Ok(wrapper.posts)
        } else {
            Ok(wrapper.data)
        }
    }

    /// Fetch the page listing
    pub async fn list_pages(&self) -> Result<Vec<Page>> {
        self.get("/api/pages").await
    }

    /// Publish a draft post, returning its updated state
    pub async fn publish_post(&self, id: i64) -> Result<Post> {
        self.post(&format!("/api/posts/{}/publish", id), &serde_json::json!({}))
            .await
    }
}
