//! Reusable UI components

pub mod admin;
pub mod chat_message;
pub mod header;
pub mod loading;
pub mod protected_route;

pub use chat_message::ChatMessageView;
pub use header::Header;
pub use loading::{CheckingAuth, ErrorBanner, LoadingDots, LoadingSpinner, SuccessBanner};
pub use protected_route::ProtectedRoute;
