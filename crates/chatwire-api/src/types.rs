//! REST payload types.
//!
//! Field names follow the server's camelCase JSON; the `rename_all`
//! attributes keep the Rust side idiomatic.

use serde::{Deserialize, Serialize};

/// A chat as returned by the chats endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    /// Opaque chat identifier; doubles as the conversation identifier for
    /// the streaming connection.
    pub chat_id: String,
    /// Human-readable chat title.
    pub caption: String,
}

/// Credentials submitted to the register and login endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Token issued by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests and the socket URL.
    pub token: String,
}

/// Body for creating a chat.
#[derive(Debug, Clone, Serialize)]
pub struct CreateChatRequest {
    /// Title of the new chat.
    pub caption: String,
}

/// Client-relevant server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Socket endpoint base, e.g. `ws://chat.example.com:8081`.
    pub websocket_host: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_record_uses_camel_case() {
        let record: ChatRecord = match serde_json::from_str(r#"{"chatId":"c1","caption":"Team"}"#) {
            Ok(record) => record,
            Err(e) => unreachable!("chat record did not decode: {e}"),
        };

        assert_eq!(record, ChatRecord { chat_id: "c1".to_string(), caption: "Team".to_string() });
    }

    #[test]
    fn server_config_uses_camel_case() {
        let config: ServerConfig =
            match serde_json::from_str(r#"{"websocketHost":"ws://localhost:8081"}"#) {
                Ok(config) => config,
                Err(e) => unreachable!("config did not decode: {e}"),
            };

        assert_eq!(config.websocket_host, "ws://localhost:8081");
    }
}
