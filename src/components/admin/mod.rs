//! Admin dashboard panels

pub mod documents;
pub mod festival_data;
pub mod models;
pub mod sessions;
pub mod stats;
pub mod system_config;

pub use documents::DocumentManager;
pub use festival_data::FestivalDataEditor;
pub use models::ModelManager;
pub use sessions::SessionList;
pub use stats::SystemStatsPanel;
pub use system_config::SystemConfigPanel;
