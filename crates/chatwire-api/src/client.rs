//! REST client.

use chatwire_client::{Credential, CredentialSource, SharedCredentials};
use reqwest::{RequestBuilder, StatusCode};

use crate::{
    error::ApiError,
    types::{AuthRequest, AuthResponse, ChatRecord, CreateChatRequest, ServerConfig},
};

/// Outcome of a join request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// We were added as a participant.
    Joined(ChatRecord),
    /// We were already a participant; the record was fetched separately.
    AlreadyParticipant(ChatRecord),
}

impl JoinOutcome {
    /// The chat record, regardless of how the join resolved.
    pub fn into_record(self) -> ChatRecord {
        match self {
            Self::Joined(record) | Self::AlreadyParticipant(record) => record,
        }
    }
}

/// Client for the chatwire REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and the credential
/// store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    credentials: SharedCredentials,
}

impl ApiClient {
    /// Create a client for the API at `base` (e.g. `http://localhost:8080/api`).
    pub fn new(base: impl Into<String>, credentials: SharedCredentials) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { http: reqwest::Client::new(), base, credentials }
    }

    /// API base URL, normalized without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Register a new account. The server issues no token here; the user
    /// logs in afterwards.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let endpoint = "/auth/register";
        let response = self
            .http
            .post(format!("{}{endpoint}", self.base))
            .json(&AuthRequest { username: username.to_string(), password: password.to_string() })
            .send()
            .await?;

        self.expect_success(endpoint, response.status())
    }

    /// Log in and store the issued credential for subsequent requests and
    /// the streaming connection.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let endpoint = "/auth/login";
        let response = self
            .http
            .post(format!("{}{endpoint}", self.base))
            .json(&AuthRequest { username: username.to_string(), password: password.to_string() })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::FORBIDDEN
        {
            return Err(ApiError::InvalidCredentials);
        }
        self.expect_success(endpoint, response.status())?;

        let auth: AuthResponse = response.json().await?;
        self.credentials.store(Credential::new(auth.token, username));
        tracing::info!(username, "logged in");
        Ok(())
    }

    /// Clear the stored credential.
    pub fn logout(&self) {
        self.credentials.clear();
        tracing::info!("logged out");
    }

    /// Username of the stored credential, if logged in.
    pub fn username(&self) -> Option<String> {
        self.credentials.credential().map(|c| c.username)
    }

    /// Chats the current user participates in.
    pub async fn chats(&self) -> Result<Vec<ChatRecord>, ApiError> {
        let endpoint = "/chats";
        let response = self.get(endpoint).send().await?;
        self.expect_success(endpoint, response.status())?;
        Ok(response.json().await?)
    }

    /// A single chat record by identifier.
    pub async fn chat(&self, chat_id: &str) -> Result<ChatRecord, ApiError> {
        let endpoint = format!("/chats/{chat_id}");
        let response = self.get(&endpoint).send().await?;
        self.expect_success(&endpoint, response.status())?;
        Ok(response.json().await?)
    }

    /// Create a chat with the given caption.
    pub async fn create_chat(&self, caption: &str) -> Result<ChatRecord, ApiError> {
        let endpoint = "/chats";
        let response = self
            .authorized(self.http.post(format!("{}{endpoint}", self.base)))
            .json(&CreateChatRequest { caption: caption.to_string() })
            .send()
            .await?;
        self.expect_success(endpoint, response.status())?;
        Ok(response.json().await?)
    }

    /// Join a chat as a participant.
    ///
    /// The server answers `204 No Content` when we already participate; the
    /// record is then fetched separately so the caller always gets one.
    pub async fn join_chat(&self, chat_id: &str) -> Result<JoinOutcome, ApiError> {
        let endpoint = format!("/chats/{chat_id}/participants");
        let response =
            self.authorized(self.http.post(format!("{}{endpoint}", self.base))).send().await?;

        if response.status() == StatusCode::NO_CONTENT {
            tracing::debug!(chat_id, "already a participant");
            return Ok(JoinOutcome::AlreadyParticipant(self.chat(chat_id).await?));
        }
        self.expect_success(&endpoint, response.status())?;
        Ok(JoinOutcome::Joined(response.json().await?))
    }

    /// Leave a chat.
    pub async fn leave_chat(&self, chat_id: &str) -> Result<(), ApiError> {
        let endpoint = format!("/chats/{chat_id}/participants");
        let response =
            self.authorized(self.http.delete(format!("{}{endpoint}", self.base))).send().await?;
        self.expect_success(&endpoint, response.status())
    }

    /// Server configuration, including the socket endpoint base.
    pub async fn config(&self) -> Result<ServerConfig, ApiError> {
        let endpoint = "/config";
        let response = self.get(endpoint).send().await?;
        self.expect_success(endpoint, response.status())?;
        Ok(response.json().await?)
    }

    fn get(&self, endpoint: &str) -> RequestBuilder {
        self.authorized(self.http.get(format!("{}{endpoint}", self.base)))
    }

    /// Attach the stored bearer token, when one exists. Register and login
    /// bypass this; everything else goes through it.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.credential() {
            Some(credential) => builder.bearer_auth(credential.token),
            None => builder,
        }
    }

    fn expect_success(&self, endpoint: &str, status: StatusCode) -> Result<(), ApiError> {
        if status.is_success() {
            Ok(())
        } else {
            tracing::warn!(endpoint, status = status.as_u16(), "request rejected");
            Err(ApiError::Status { status: status.as_u16(), endpoint: endpoint.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/api/", SharedCredentials::new());
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn username_reflects_credential_store() {
        let credentials = SharedCredentials::new();
        let client = ApiClient::new("http://localhost:8080/api", credentials.clone());
        assert_eq!(client.username(), None);

        credentials.store(Credential::new("jwt", "alice"));
        assert_eq!(client.username(), Some("alice".to_string()));

        client.logout();
        assert_eq!(client.username(), None);
    }
}
