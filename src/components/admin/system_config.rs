//! Backend runtime settings

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::loading::{ErrorBanner, SuccessBanner};
use crate::state::AppState;
use crate::types::SystemConfig;

const LOG_LEVELS: [&str; 4] = ["DEBUG", "INFO", "WARNING", "ERROR"];

/// Parse a positive integer field; blank or invalid input is rejected.
pub(crate) fn parse_limit(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

#[component]
pub fn SystemConfigPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let admin = state.api.admin();

    let config = RwSignal::new(Option::<SystemConfig>::None);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let success = RwSignal::new(Option::<String>::None);

    {
        let admin = admin.clone();
        spawn_local(async move {
            match admin.get_system_config().await {
                Ok(c) => config.set(Some(c)),
                Err(e) => error.set(Some(format!("設定の取得に失敗しました: {}", e))),
            }
        });
    }

    let on_save = move |_: MouseEvent| {
        let Some(current) = config.get_untracked() else {
            return;
        };
        let admin = admin.clone();
        spawn_local(async move {
            saving.set(true);
            error.set(None);
            success.set(None);
            match admin.update_system_config(&current).await {
                Ok(resp) if resp.success => success.set(Some("設定を保存しました".to_string())),
                Ok(resp) => error.set(Some(resp.message)),
                Err(e) => error.set(Some(format!("設定の保存に失敗しました: {}", e))),
            }
            saving.set(false);
        });
    };

    let number_field = move |label: &'static str, get: fn(&SystemConfig) -> u32, set: fn(&mut SystemConfig, u32)| {
        view! {
            <label class="flex flex-col gap-1 text-sm">
                <span class="text-slate-500">{label}</span>
                <input
                    type="number"
                    min="1"
                    class="input"
                    prop:value=move || config.get().map(|c| get(&c).to_string()).unwrap_or_default()
                    on:change=move |ev| {
                        if let Some(n) = parse_limit(&event_target_value(&ev)) {
                            config.update(|c| if let Some(c) = c { set(c, n) });
                        }
                    }
                />
            </label>
        }
    };

    view! {
        <section class="card p-4 mt-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-lg font-semibold">"システム設定"</h2>
                <button
                    class="btn btn-primary"
                    disabled=move || saving.get() || config.get().is_none()
                    on:click=on_save
                >
                    {move || if saving.get() { "保存中..." } else { "保存" }}
                </button>
            </div>

            <ErrorBanner message=error />
            <SuccessBanner message=success />

            <div class="grid md:grid-cols-3 gap-4">
                {number_field("最大セッション数", |c| c.max_sessions, |c, n| c.max_sessions = n)}
                {number_field("セッションタイムアウト（秒）", |c| c.session_timeout, |c, n| c.session_timeout = n)}
                {number_field("最大メッセージ長", |c| c.max_message_length, |c, n| c.max_message_length = n)}
            </div>

            <div class="flex items-center gap-6 mt-4 text-sm">
                <label class="flex items-center gap-2">
                    <input
                        type="checkbox"
                        prop:checked=move || config.get().is_some_and(|c| c.enable_logging)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            config.update(|c| if let Some(c) = c { c.enable_logging = checked });
                        }
                    />
                    "ログ出力"
                </label>
                <label class="flex items-center gap-2">
                    <span class="text-slate-500">"ログレベル"</span>
                    <select
                        class="input"
                        on:change=move |ev| {
                            let level = event_target_value(&ev);
                            config.update(|c| if let Some(c) = c { c.log_level = level });
                        }
                    >
                        {LOG_LEVELS.into_iter().map(|level| view! {
                            <option
                                value=level
                                selected=move || config.get().is_some_and(|c| c.log_level == level)
                            >
                                {level}
                            </option>
                        }).collect_view()}
                    </select>
                </label>
            </div>
        </section>
    }
}
