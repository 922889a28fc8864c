//! Admin dashboard endpoints

use super::{with_query, ApiClient, ApiError};
use crate::types::{
    AdminResponse, ChatSessionInfo, FestivalData, FestivalDataUpdate, SystemConfig, SystemStats,
};

/// Sessions listed when no limit is given
pub const DEFAULT_SESSION_LIMIT: u32 = 50;

/// Age threshold for clearing old sessions
pub const DEFAULT_CLEAR_HOURS: u32 = 24;

#[derive(Debug, Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_system_stats(&self) -> Result<SystemStats, ApiError> {
        self.client
            .get_json("/api/v1/admin/stats", self.client.timeouts().standard)
            .await
    }

    pub async fn get_chat_sessions(&self, limit: u32) -> Result<Vec<ChatSessionInfo>, ApiError> {
        self.client
            .get_json(&sessions_path(limit), self.client.timeouts().standard)
            .await
    }

    /// Delete sessions idle for more than `hours`.
    pub async fn clear_old_sessions(&self, hours: u32) -> Result<AdminResponse, ApiError> {
        self.client
            .delete_json::<(), _>(
                &clear_sessions_path(hours),
                None,
                self.client.timeouts().standard,
            )
            .await
    }

    /// Session list as CSV text.
    pub async fn sessions_csv(&self) -> Result<String, ApiError> {
        self.client
            .get_text(
                "/api/v1/admin/sessions/export",
                self.client.timeouts().standard,
            )
            .await
    }

    pub async fn get_festival_data(&self) -> Result<AdminResponse<FestivalData>, ApiError> {
        self.client
            .get_json(
                "/api/v1/admin/festival-data",
                self.client.timeouts().standard,
            )
            .await
    }

    pub async fn update_festival_data(
        &self,
        update: &FestivalDataUpdate,
    ) -> Result<AdminResponse<FestivalData>, ApiError> {
        self.client
            .put_json(
                "/api/v1/admin/festival-data",
                update,
                self.client.timeouts().standard,
            )
            .await
    }

    pub async fn get_system_config(&self) -> Result<SystemConfig, ApiError> {
        self.client
            .get_json("/api/v1/admin/config", self.client.timeouts().standard)
            .await
    }

    pub async fn update_system_config(
        &self,
        config: &SystemConfig,
    ) -> Result<AdminResponse, ApiError> {
        self.client
            .put_json(
                "/api/v1/admin/config",
                config,
                self.client.timeouts().standard,
            )
            .await
    }
}

fn sessions_path(limit: u32) -> String {
    with_query("/api/v1/admin/sessions", &[("limit", limit.to_string())])
}

fn clear_sessions_path(hours: u32) -> String {
    with_query("/api/v1/admin/sessions/old", &[("hours", hours.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_path() {
        assert_eq!(
            sessions_path(DEFAULT_SESSION_LIMIT),
            "/api/v1/admin/sessions?limit=50"
        );
        assert_eq!(sessions_path(100), "/api/v1/admin/sessions?limit=100");
    }

    #[test]
    fn test_clear_sessions_path() {
        assert_eq!(
            clear_sessions_path(DEFAULT_CLEAR_HOURS),
            "/api/v1/admin/sessions/old?hours=24"
        );
    }
}
