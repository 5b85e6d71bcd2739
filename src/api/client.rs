//! Portfolio REST API Client
//!
//! Shared request helper used by every service. Attaches the session's
//! bearer token, unwraps the `{status, data, message}` envelope and maps
//! failures onto [`ApiError`].

use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::dto::Envelope;
use super::error::{ApiError, ApiResult};
use super::paths;
use crate::auth::Session;
use crate::config::ApiConfig;

/// HTTP client for the portfolio REST API
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<RwLock<Option<Session>>>,
}

impl ApiClient {
    /// Create a client with the given configuration and no session
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Builder: start with an authenticated session
    pub fn with_session(self, session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(Some(session))),
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace (or clear) the authenticated session
    pub async fn set_session(&self, session: Option<Session>) {
        *self.session.write().await = session;
    }

    /// Current session, if logged in
    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Profile the current user's records belong to
    pub async fn profile_id(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .and_then(|s| s.user.profile_id.clone())
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Check that the API answers
    pub async fn health_check(&self) -> ApiResult<()> {
        let response = self.http.get(self.url(paths::HEALTH)).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Unavailable)
        }
    }

    /// GET and return `data`
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ApiResult<T> {
        let params: Vec<&(String, String)> =
            query.iter().filter(|(_, value)| !value.is_empty()).collect();

        let request = self.request(Method::GET, path).await.query(&params);
        require_data(self.dispatch(request).await?)
    }

    /// POST a JSON body and return `data`
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).await.json(body);
        require_data(self.dispatch(request).await?)
    }

    /// POST a JSON body and return only the server's message
    pub async fn post_for_message<B>(&self, path: &str, body: &B) -> ApiResult<String>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path).await.json(body);
        let envelope: Envelope<serde_json::Value> = self.dispatch(request).await?;
        Ok(envelope.message.unwrap_or_default())
    }

    /// PUT a JSON body and return `data`
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).await.json(body);
        require_data(self.dispatch(request).await?)
    }

    /// DELETE and return the server's message
    pub async fn delete(&self, path: &str) -> ApiResult<String> {
        let request = self.request(Method::DELETE, path).await;
        let envelope: Envelope<serde_json::Value> = self.dispatch(request).await?;
        Ok(envelope.message.unwrap_or_default())
    }

    /// Start a request with the bearer token attached
    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(method = %method, path = %path, "API request");

        let builder = self.http.request(method, self.url(path));
        match self.session.read().await.as_ref() {
            Some(session) => builder.bearer_auth(&session.token),
            None => builder,
        }
    }

    /// Send a request and unwrap the envelope
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<Envelope<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string());

            tracing::warn!(status = status.as_u16(), message = %message, "API request failed");

            return Err(match status.as_u16() {
                401 => ApiError::Unauthorized(message),
                404 => ApiError::NotFound(message),
                code => ApiError::Api {
                    status: code,
                    message,
                },
            });
        }

        if body.is_empty() {
            return Ok(Envelope {
                status: Default::default(),
                data: None,
                message: None,
            });
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body)?;

        if !envelope.status.is_success() {
            let message = envelope.message.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), message = %message, "API reported failure");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(envelope)
    }
}

fn require_data<T>(envelope: Envelope<T>) -> ApiResult<T> {
    envelope
        .data
        .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
}
