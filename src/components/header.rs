//! Header component

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::use_auth;

/// Main application header
///
/// Visitors see only the chat link. The admin menu appears once the session
/// is authenticated as admin.
#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();
    let menu_open = RwSignal::new(false);

    let snapshot = auth.snapshot;
    let is_admin = Signal::derive(move || snapshot.get().is_authorized_admin());
    let on_admin_route = {
        let pathname = location.pathname;
        Signal::derive(move || pathname.get().starts_with("/admin"))
    };

    view! {
        <header class="header h-16 sticky top-0 z-40 bg-blue-700 text-white shadow">
            <div class="h-full max-w-7xl mx-auto px-4 flex items-center justify-between">
                <a href="/" class="text-lg font-bold hover:opacity-80 transition-opacity">
                    "学園祭RAGチャットボット（試験版）"
                </a>

                <nav class="flex items-center gap-2">
                    <Show
                        when=move || on_admin_route.get()
                        fallback=|| view! {
                            <a href="/" class="btn btn-ghost">"チャット"</a>
                        }
                    >
                        <span class="px-3 py-1 rounded-full bg-amber-500 text-slate-900 text-xs font-semibold">
                            "管理者モード"
                        </span>
                    </Show>

                    {move || {
                        if !is_admin.get() {
                            return ().into_any();
                        }
                        let auth = auth.clone();
                        let navigate = navigate.clone();
                        view! {
                            <div class="relative">
                                <button
                                    class="btn btn-ghost"
                                    aria-label="管理者メニュー"
                                    on:click=move |_| menu_open.update(|open| *open = !*open)
                                >
                                    "👤"
                                </button>
                                {move || {
                                    let auth = auth.clone();
                                    let navigate = navigate.clone();
                                    let navigate_home = navigate.clone();
                                    menu_open.get().then(|| view! {
                                        <div class="absolute right-0 mt-2 w-40 bg-white text-slate-800 rounded-lg shadow-lg py-1">
                                            <button
                                                class="block w-full text-left px-4 py-2 hover:bg-slate-100"
                                                on:click=move |_| {
                                                    menu_open.set(false);
                                                    navigate("/admin", Default::default());
                                                }
                                            >
                                                "管理画面"
                                            </button>
                                            <button
                                                class="block w-full text-left px-4 py-2 hover:bg-slate-100"
                                                on:click=move |_| {
                                                    auth.logout();
                                                    menu_open.set(false);
                                                    navigate_home("/", Default::default());
                                                }
                                            >
                                                "ログアウト"
                                            </button>
                                        </div>
                                    })
                                }}
                            </div>
                        }.into_any()
                    }}
                </nav>
            </div>
        </header>
    }
}
