//! Visitor chat endpoints

use super::{ApiClient, ApiError};
use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, ChatSession, HealthStatus, NewSessionRequest,
    NewSessionResponse,
};

/// Identity sent when a visitor opens a chat session
pub const VISITOR_USER_ID: &str = "visitor";

#[derive(Debug, Clone)]
pub struct ChatService {
    client: ApiClient,
}

impl ChatService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Open a new chat session and return its id.
    pub async fn create_session(&self) -> Result<String, ApiError> {
        let body = NewSessionRequest {
            user_id: VISITOR_USER_ID.to_string(),
        };
        let resp: NewSessionResponse = self
            .client
            .post_json(
                "/api/v1/chat/session",
                Some(&body),
                self.client.timeouts().standard,
            )
            .await?;
        Ok(resp.session_id)
    }

    pub async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.client
            .post_json(
                "/api/v1/chat/session/message",
                Some(request),
                self.client.timeouts().generation,
            )
            .await
    }

    /// Messages of a stored session. Each one carries an id on return.
    pub async fn get_history(&self, session_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        let session: ChatSession = self
            .client
            .get_json(
                &history_path(session_id),
                self.client.timeouts().standard,
            )
            .await?;
        Ok(session.messages.into_iter().map(ChatMessage::with_id).collect())
    }

    /// `true` only when the backend reports `healthy`; any failure is `false`.
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get_json::<HealthStatus>("/api/v1/health", self.client.timeouts().standard)
            .await
        {
            Ok(status) => status.status == "healthy",
            Err(_) => false,
        }
    }
}

fn history_path(session_id: &str) -> String {
    format!("/api/v1/chat/session/{}", super::segment(session_id))
}
