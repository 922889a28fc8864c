//! System statistics panel

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::loading::{ErrorBanner, LoadingSpinner};
use crate::state::AppState;
use crate::types::{EmbeddingStatus, SystemStats};

#[component]
pub fn SystemStatsPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let stats = RwSignal::new(Option::<SystemStats>::None);
    let loading = RwSignal::new(true);
    let healthy = RwSignal::new(Option::<bool>::None);
    let embedding = RwSignal::new(Option::<EmbeddingStatus>::None);
    let error = RwSignal::new(Option::<String>::None);

    let load = move || {
        let admin = state.api.admin();
        let chat = state.api.chat();
        let rag = state.api.rag();
        spawn_local(async move {
            loading.set(true);
            error.set(None);
            let (result, health, embed) = futures::join!(
                admin.get_system_stats(),
                chat.health_check(),
                rag.embedding_status()
            );
            match result {
                Ok(data) => stats.set(Some(data)),
                Err(e) => error.set(Some(format!("統計情報の取得に失敗しました: {}", e))),
            }
            healthy.set(Some(health));
            embedding.set(embed.ok());
            loading.set(false);
        });
    };
    load();

    view! {
        <div>
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-lg font-semibold">"システム統計"</h2>
                <button
                    class="btn btn-ghost"
                    disabled=move || loading.get()
                    on:click={
                        let load = load.clone();
                        move |_| load()
                    }
                >
                    "更新"
                </button>
            </div>

            <ErrorBanner message=error />

            <div class="flex flex-wrap gap-2 mb-4 text-xs">
                {move || healthy.get().map(|ok| view! {
                    <span class={if ok { "badge badge-success" } else { "badge badge-danger" }}>
                        {if ok { "バックエンド: 正常" } else { "バックエンド: 応答なし" }}
                    </span>
                })}
                {move || embedding.get().map(|status| {
                    let label = match (status.is_loaded, status.model_name) {
                        (true, Some(model)) => format!("埋め込みモデル: {} ({})", model, status.collection_name),
                        (true, None) => format!("埋め込みモデル: 読み込み済み ({})", status.collection_name),
                        (false, _) => "埋め込みモデル: 未読み込み".to_string(),
                    };
                    view! { <span class="badge">{label}</span> }
                })}
            </div>

            {move || {
                if loading.get() && stats.get().is_none() {
                    return view! {
                        <div class="flex justify-center p-6"><LoadingSpinner size="w-8 h-8" /></div>
                    }.into_any();
                }
                let Some(s) = stats.get() else {
                    return ().into_any();
                };
                view! { <StatGrid stats=s /> }.into_any()
            }}
        </div>
    }
}

#[component]
fn StatGrid(stats: SystemStats) -> impl IntoView {
    let mut cards = vec![
        ("総セッション数", stats.total_sessions.to_string()),
        ("総メッセージ数", stats.total_messages.to_string()),
        ("アクティブセッション", stats.active_sessions.to_string()),
        ("アクセス数", stats.access_count.to_string()),
        ("稼働時間", stats.uptime.clone()),
        ("メモリ使用率", format!("{:.1}%", stats.memory_usage)),
        ("CPU使用率", format!("{:.1}%", stats.cpu_usage)),
    ];
    for (i, usage) in stats.gpu_usage.iter().flatten().enumerate() {
        cards.push(("GPU使用率", format!("GPU{}: {:.1}%", i, usage)));
    }

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {cards.into_iter().map(|(title, value)| view! {
                <div class="card p-4">
                    <p class="text-xs text-slate-500">{title}</p>
                    <p class="text-2xl font-bold text-slate-800 mt-1">{value}</p>
                </div>
            }).collect_view()}
        </div>
    }
}
