//! API types matching the festival chatbot backend

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============= Chat =============

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A chat message, as exchanged with the backend and shown in the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    pub role: MessageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::local(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::local(MessageRole::Assistant, content)
    }

    /// Give the message a local id if the backend sent none.
    pub fn with_id(mut self) -> Self {
        if self.id.is_none() {
            self.id = Some(uuid::Uuid::new_v4().to_string());
        }
        self
    }

    fn local(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            content: content.into(),
            role,
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
        }
    }
}

/// Chat request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Chat response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Body for creating a chat session
#[derive(Debug, Clone, Serialize)]
pub struct NewSessionRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSessionResponse {
    pub session_id: String,
}

/// Stored conversation
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSession {
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

// ============= Admin =============

/// System statistics for the dashboard
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemStats {
    pub total_sessions: u64,
    pub total_messages: u64,
    pub active_sessions: u64,
    pub uptime: String,
    pub memory_usage: f64,
    pub cpu_usage: f64,
    #[serde(default)]
    pub gpu_usage: Option<Vec<f64>>,
    pub access_count: u64,
}

/// One row of the admin session list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatSessionInfo {
    pub session_id: String,
    pub created_at: String,
    pub last_activity: String,
    pub message_count: u64,
    pub is_active: bool,
}

/// Festival information the chatbot answers from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FestivalData {
    /// Time → event
    #[serde(default)]
    pub schedule: BTreeMap<String, String>,
    /// Place → description
    #[serde(default)]
    pub locations: BTreeMap<String, String>,
    #[serde(default)]
    pub food: Vec<String>,
    /// Method → directions
    #[serde(default)]
    pub access: BTreeMap<String, String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Partial update; omitted sections are left as they are
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FestivalDataUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

impl From<FestivalData> for FestivalDataUpdate {
    fn from(data: FestivalData) -> Self {
        Self {
            schedule: Some(data.schedule),
            locations: Some(data.locations),
            food: Some(data.food),
            access: Some(data.access),
            notes: Some(data.notes),
        }
    }
}

/// Backend runtime settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub max_sessions: u32,
    pub session_timeout: u32,
    pub max_message_length: u32,
    pub enable_logging: bool,
    pub log_level: String,
}

/// Envelope used by admin endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AdminResponse<T = serde_json::Value> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

// ============= LLM =============

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub language: String,
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelStatus {
    pub model_name: String,
    pub is_loaded: bool,
    #[serde(default)]
    pub memory_usage: f64,
    #[serde(default)]
    pub last_used: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LlmRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmResponse {
    pub response: String,
    pub model_name: String,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default)]
    pub processing_time: f64,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentModel {
    pub current_model: String,
    pub is_loaded: bool,
}

/// Result of load/unload/switch
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

// ============= RAG =============

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
}

/// A document (or chunk) in the RAG collection
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RagDocument {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    /// Distance from the query, for search results
    #[serde(default)]
    pub distance: Option<f64>,
}

impl RagDocument {
    pub fn title(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or(&self.id)
    }

    /// Similarity as a percentage, when the backend reported a distance.
    pub fn similarity_percent(&self) -> Option<f64> {
        self.distance.map(|d| (1.0 - d) * 100.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Vec<RagDocument>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteDocumentsRequest {
    pub document_ids: Vec<String>,
}

/// Editable document fields
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentUpdate {
    pub title: String,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
    pub size: u64,
    pub content_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(default)]
    pub document_count: u64,
}

/// Body for search and RAG queries
#[derive(Debug, Clone, Serialize)]
pub struct RagQueryRequest {
    pub query: String,
    pub n_results: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    #[serde(default)]
    pub results: Vec<RagDocument>,
    #[serde(default)]
    pub total_results: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagQueryResponse {
    pub success: bool,
    pub query: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub relevant_documents: Vec<RagDocument>,
    #[serde(default)]
    pub context_length: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionInfo {
    pub success: bool,
    pub collection_name: String,
    pub document_count: u64,
    pub model_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbeddingStatus {
    pub success: bool,
    pub is_loaded: bool,
    pub model_name: Option<String>,
    pub collection_name: String,
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message in the body, if any.
    pub fn into_message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(s)) => return Some(s),
            Some(other) if !other.is_null() => return Some(other.to_string()),
            _ => {}
        }
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_role_wire_format() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"content":"hi","role":"assistant"}"#).unwrap();
        assert_eq!(msg.role, MessageRole::Assistant);
        assert!(msg.id.is_none());

        let json = serde_json::to_value(ChatMessage::user("hello")).unwrap();
        assert_eq!(json["role"], "user");
        assert!(json["id"].is_string());
    }

    #[test]
    fn test_history_without_ids_gets_distinct_ids() {
        let history: Vec<ChatMessage> = serde_json::from_str(
            r#"[{"role":"user","content":"開催時間は？"},{"role":"user","content":"開催時間は？"}]"#,
        )
        .unwrap();
        let ids: Vec<String> = history
            .into_iter()
            .map(ChatMessage::with_id)
            .filter_map(|m| m.id)
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_with_id_keeps_backend_id() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"id":"m-1","role":"assistant","content":"ok"}"#).unwrap();
        assert_eq!(msg.with_id().id.as_deref(), Some("m-1"));
    }

    #[test]
    fn test_festival_update_omits_missing_sections() {
        let update = FestivalDataUpdate {
            food: Some(vec!["Takoyaki".into()]),
            ..Default::default()
        };
        let json = serde_json::to_value(update).unwrap();
        assert_eq!(json, serde_json::json!({ "food": ["Takoyaki"] }));
    }

    #[test]
    fn test_festival_data_defaults_missing_sections() {
        let data: FestivalData = serde_json::from_str(r#"{"food":["Crepes"]}"#).unwrap();
        assert!(data.schedule.is_empty());
        assert_eq!(data.food, vec!["Crepes".to_string()]);
    }

    #[test]
    fn test_admin_response_without_data() {
        let resp: AdminResponse =
            serde_json::from_str(r#"{"success":true,"message":"cleared"}"#).unwrap();
        assert!(resp.success);
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_error_body_prefers_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":"Session not found","message":"x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Session not found"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("boom"));

        assert!(ErrorBody::default().into_message().is_none());
    }

    #[test]
    fn test_similarity_percent() {
        let doc: RagDocument =
            serde_json::from_str(r#"{"id":"d1","text":"t","distance":0.25}"#).unwrap();
        assert_eq!(doc.similarity_percent(), Some(75.0));
        assert_eq!(doc.title(), "d1");
    }
}
