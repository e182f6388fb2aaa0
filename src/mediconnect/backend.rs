//! Hosted backend client (Supabase auth + tables).
//!
//! A single [`SupabaseClient`] is configured with the project URL and the public
//! anon key and shared by every form. The key is public by design of the hosted
//! service, but it is still kept in a `SecretString` so it never lands in logs.
//! Passwords and session tokens must never be logged either.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Value, json};
use std::{fmt, time::Duration};
use thiserror::Error;
use tracing::{Instrument, debug, info_span, instrument};
use url::Url;
use uuid::Uuid;

/// Maximum number of error body characters kept from a failed response.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend configuration: {0}")]
    Config(String),
    #[error("unable to reach the backend: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("unexpected backend response: {0}")]
    Parse(String),
}

/// Email/password pair sent to the auth endpoints.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Session returned by the auth service. Its structure belongs to the hosted
/// service; only the user id and the access token are read here.
#[derive(Clone, Default)]
pub struct Session {
    raw: Value,
}

impl Session {
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// User id from `user.id` (session payload) or `id` (unconfirmed sign-up).
    #[must_use]
    pub fn user_id(&self) -> Option<Uuid> {
        self.raw
            .get("user")
            .and_then(|user| user.get("id"))
            .or_else(|| self.raw.get("id"))
            .and_then(Value::as_str)
            .and_then(|id| Uuid::parse_str(id).ok())
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.raw.get("access_token").and_then(Value::as_str)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("user_id", &self.user_id())
            .field("has_access_token", &self.access_token().is_some())
            .finish()
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// # Errors
    /// Returns an error if the request fails or the credentials are rejected.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError>;

    /// # Errors
    /// Returns an error if the request fails or the account cannot be created.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: Option<Value>,
    ) -> Result<Session, BackendError>;

    /// Inserts one row. With a session, the request runs as that user.
    /// # Errors
    /// Returns an error if the request fails or the row is rejected.
    async fn insert(
        &self,
        table: &str,
        row: &Value,
        session: Option<&Session>,
    ) -> Result<(), BackendError>;

    /// Asks the auth service to email a password reset link.
    /// # Errors
    /// Returns an error if the request fails.
    async fn recover(&self, email: &str) -> Result<(), BackendError>;
}

pub struct SupabaseClient {
    client: Client,
    base_url: Url,
    anon_key: SecretString,
}

impl SupabaseClient {
    /// # Errors
    /// Returns an error if the URL is not http(s) or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        anon_key: SecretString,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let base_url = parse_base_url(base_url)?;
        if anon_key.expose_secret().trim().is_empty() {
            return Err(BackendError::Config("missing anon key".to_string()));
        }
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            anon_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| BackendError::Config(format!("invalid endpoint {path}: {err}")))
    }

    fn authorized(&self, builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        let key = self.anon_key.expose_secret();
        builder
            .header("apikey", key)
            .bearer_auth(bearer.unwrap_or(key))
    }

    async fn post_session<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        span: tracing::Span,
    ) -> Result<Session, BackendError> {
        let response = self
            .authorized(self.client.post(url), None)
            .json(body)
            .send()
            .instrument(span)
            .await?;

        let response = check_status(response).await?;
        let raw: Value = response
            .json()
            .await
            .map_err(|err| BackendError::Parse(format!("failed to decode session: {err}")))?;
        Ok(Session::from_value(raw))
    }
}

#[async_trait]
impl Backend for SupabaseClient {
    #[instrument(skip_all)]
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });
        let span = info_span!("supabase.sign_in", http.method = "POST", url = %url);

        let session = self.post_session(url, &body, span).await?;
        debug!("signed in user {:?}", session.user_id());
        Ok(session)
    }

    #[instrument(skip_all)]
    async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: Option<Value>,
    ) -> Result<Session, BackendError> {
        let url = self.endpoint("auth/v1/signup")?;

        let body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
            "data": metadata.unwrap_or_else(|| json!({})),
        });
        let span = info_span!("supabase.sign_up", http.method = "POST", url = %url);

        let session = self.post_session(url, &body, span).await?;
        debug!("signed up user {:?}", session.user_id());
        Ok(session)
    }

    #[instrument(skip(self, row, session))]
    async fn insert(
        &self,
        table: &str,
        row: &Value,
        session: Option<&Session>,
    ) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("rest/v1/{table}"))?;
        let span = info_span!("supabase.insert", http.method = "POST", url = %url);

        let bearer = session.and_then(Session::access_token);
        let response = self
            .authorized(self.client.post(url), bearer)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .instrument(span)
            .await?;

        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn recover(&self, email: &str) -> Result<(), BackendError> {
        let url = self.endpoint("auth/v1/recover")?;
        let span = info_span!("supabase.recover", http.method = "POST", url = %url);

        let response = self
            .authorized(self.client.post(url), None)
            .json(&json!({ "email": email }))
            .send()
            .instrument(span)
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, BackendError> {
    let trimmed = base_url.trim();
    let mut url = Url::parse(trimmed)
        .map_err(|err| BackendError::Config(format!("invalid backend URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(BackendError::Config(format!(
                "unsupported scheme {scheme}"
            )));
        }
    }
    if url.host().is_none() {
        return Err(BackendError::Config("no host specified".to_string()));
    }

    // Url::join replaces the last segment unless the path ends with '/'
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Passes successful responses through and maps the rest to `BackendError::Http`.
async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Http {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Extracts the human readable part of an error body. The auth and table
/// endpoints use different field names for it.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        ["msg", "error_description", "message", "error"]
            .iter()
            .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    let message = from_json.unwrap_or_else(|| body.trim().to_string());
    if message.is_empty() {
        "Request failed.".to_string()
    } else {
        message.chars().take(MAX_ERROR_CHARS).collect()
    }
}
