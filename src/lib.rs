//! Festival chatbot web UI
//!
//! A Leptos front-end for the school festival chatbot: a visitor chat page
//! and a password-protected admin dashboard. Admin sessions are handled by
//! the [`festival_auth`] crate and persisted in the tab's session storage.

pub mod api;
pub mod components;
pub mod config;
pub mod markdown;
pub mod pages;
pub mod state;
pub mod storage;
pub mod types;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use components::{Header, ProtectedRoute};
use config::AppConfig;
use pages::{admin::AdminPage, admin_login::AdminLoginPage, chat::VisitorChatPage};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let app_state = AppState::new(AppConfig::from_build_env());
    let auth = app_state.auth_context();
    auth.initialize();
    provide_context(app_state);
    provide_context(auth);

    view! {
        <Title text="学園祭RAGチャットボット" />
        <Router>
            <Header />
            <main class="min-h-[calc(100vh-4rem)] bg-slate-50 text-slate-800">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=VisitorChatPage />
                    <Route path=path!("/admin/login") view=AdminLoginPage />
                    <Route
                        path=path!("/admin")
                        view=|| view! {
                            <ProtectedRoute>
                                <AdminPage />
                            </ProtectedRoute>
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-[50vh] flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-slate-400 mb-4">"404"</h1>
                <p class="text-xl text-slate-500 mb-8">"ページが見つかりません"</p>
                <a
                    href="/"
                    class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
                >
                    "チャットに戻る"
                </a>
            </div>
        </div>
    }
}
