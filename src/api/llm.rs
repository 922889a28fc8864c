//! Model management endpoints

use super::{segment, ApiClient, ApiError};
use crate::types::{ActionResult, CurrentModel, LlmRequest, LlmResponse, ModelInfo, ModelStatus};

/// Model operations exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelAction {
    Load,
    Unload,
    Switch,
}

impl ModelAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Unload => "unload",
            Self::Switch => "switch",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmService {
    client: ApiClient,
}

impl LlmService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn available_models(&self) -> Result<Vec<ModelInfo>, ApiError> {
        self.client
            .get_json("/api/v1/llm/models", self.client.timeouts().standard)
            .await
    }

    pub async fn model_status(&self) -> Result<Vec<ModelStatus>, ApiError> {
        self.client
            .get_json("/api/v1/llm/status", self.client.timeouts().standard)
            .await
    }

    pub async fn current_model(&self) -> Result<CurrentModel, ApiError> {
        self.client
            .get_json("/api/v1/llm/current", self.client.timeouts().standard)
            .await
    }

    pub async fn load_model(&self, name: &str) -> Result<ActionResult, ApiError> {
        self.run(ModelAction::Load, name).await
    }

    pub async fn unload_model(&self, name: &str) -> Result<ActionResult, ApiError> {
        self.run(ModelAction::Unload, name).await
    }

    pub async fn switch_model(&self, name: &str) -> Result<ActionResult, ApiError> {
        self.run(ModelAction::Switch, name).await
    }

    pub async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, ApiError> {
        self.client
            .post_json(
                "/api/v1/llm/generate",
                Some(request),
                self.client.timeouts().generation,
            )
            .await
    }

    /// Model loads can take minutes, so these use the long timeout.
    pub async fn run(&self, action: ModelAction, name: &str) -> Result<ActionResult, ApiError> {
        tracing::info!(action = action.as_str(), model = name, "Model action");
        self.client
            .post_json::<(), _>(
                &action_path(action, name),
                None,
                self.client.timeouts().model_ops,
            )
            .await
    }
}

fn action_path(action: ModelAction, name: &str) -> String {
    format!("/api/v1/llm/{}/{}", action.as_str(), segment(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_paths() {
        assert_eq!(
            action_path(ModelAction::Load, "elyza-7b"),
            "/api/v1/llm/load/elyza-7b"
        );
        assert_eq!(
            action_path(ModelAction::Unload, "elyza-7b"),
            "/api/v1/llm/unload/elyza-7b"
        );
        assert_eq!(
            action_path(ModelAction::Switch, "rinna/youri-7b"),
            "/api/v1/llm/switch/rinna%2Fyouri-7b"
        );
    }

    #[test]
    fn test_generate_request_skips_unset_options() {
        let req = LlmRequest {
            prompt: "hello".into(),
            temperature: Some(0.5),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "prompt": "hello", "temperature": 0.5 })
        );
    }
}
