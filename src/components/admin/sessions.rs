//! Chat session list

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::DEFAULT_CLEAR_HOURS;
use crate::components::loading::{ErrorBanner, LoadingSpinner, SuccessBanner};
use crate::state::AppState;
use crate::types::ChatSessionInfo;

/// Sessions shown in the table
const LIST_LIMIT: u32 = 100;

const CSV_FILENAME: &str = "chat_sessions.csv";

#[component]
pub fn SessionList() -> impl IntoView {
    let state = expect_context::<AppState>();
    let sessions = RwSignal::new(Vec::<ChatSessionInfo>::new());
    let loading = RwSignal::new(true);
    let downloading = RwSignal::new(false);
    let confirm_clear = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let notice = RwSignal::new(Option::<String>::None);

    let admin = state.api.admin();

    let load = {
        let admin = admin.clone();
        move || {
            let admin = admin.clone();
            spawn_local(async move {
                loading.set(true);
                error.set(None);
                match admin.get_chat_sessions(LIST_LIMIT).await {
                    Ok(list) => sessions.set(list),
                    Err(e) => error.set(Some(format!("セッション一覧の取得に失敗しました: {}", e))),
                }
                loading.set(false);
            });
        }
    };
    load();

    let on_clear = {
        let admin = admin.clone();
        let load = load.clone();
        move |_: MouseEvent| {
            let admin = admin.clone();
            let load = load.clone();
            confirm_clear.set(false);
            spawn_local(async move {
                match admin.clear_old_sessions(DEFAULT_CLEAR_HOURS).await {
                    Ok(_) => load(),
                    Err(e) => error.set(Some(format!("セッションクリアに失敗しました: {}", e))),
                }
            });
        }
    };

    let on_download = move |_: MouseEvent| {
        let admin = admin.clone();
        spawn_local(async move {
            downloading.set(true);
            let result = match admin.sessions_csv().await {
                Ok(csv) => save_csv(&csv).map_err(|e| format!("{:?}", e)),
                Err(e) => Err(e.to_string()),
            };
            match result {
                Ok(()) => notice.set(Some("CSVファイルのダウンロードが開始されました".to_string())),
                Err(e) => {
                    tracing::warn!(error = %e, "CSV download failed");
                    error.set(Some(format!("CSVダウンロードに失敗しました: {}", e)));
                }
            }
            downloading.set(false);
        });
    };

    view! {
        <div>
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-lg font-semibold">"チャットセッション一覧"</h2>
                <div class="flex gap-2">
                    <button
                        class="btn btn-primary"
                        disabled=move || downloading.get()
                        on:click=on_download
                    >
                        {move || if downloading.get() { "ダウンロード中..." } else { "CSVダウンロード" }}
                    </button>
                    <button class="btn btn-warning" on:click=move |_| confirm_clear.set(true)>
                        "古いセッションをクリア"
                    </button>
                </div>
            </div>

            <ErrorBanner message=error />
            <SuccessBanner message=notice />

            <Show when=move || confirm_clear.get()>
                <div class="card p-4 mb-4 border border-amber-300">
                    <p class="text-sm mb-3">
                        {format!("{}時間以上経過した非アクティブなセッションを削除します。よろしいですか？", DEFAULT_CLEAR_HOURS)}
                    </p>
                    <div class="flex gap-2 justify-end">
                        <button class="btn btn-ghost" on:click=move |_| confirm_clear.set(false)>
                            "キャンセル"
                        </button>
                        <button class="btn btn-warning" on:click=on_clear.clone()>"クリア"</button>
                    </div>
                </div>
            </Show>

            {move || {
                if loading.get() {
                    return view! {
                        <div class="flex justify-center p-6"><LoadingSpinner size="w-8 h-8" /></div>
                    }.into_any();
                }
                let rows = sessions.get();
                if rows.is_empty() {
                    return view! {
                        <p class="text-center text-slate-500 py-6">"セッションがありません"</p>
                    }.into_any();
                }
                view! {
                    <table class="w-full text-sm">
                        <thead>
                            <tr class="text-left text-slate-500 border-b">
                                <th class="py-2">"セッションID"</th>
                                <th>"作成日時"</th>
                                <th>"最終活動"</th>
                                <th>"メッセージ数"</th>
                                <th>"ステータス"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows.into_iter().map(|s| view! { <SessionRow session=s /> }).collect_view()}
                        </tbody>
                    </table>
                }.into_any()
            }}
        </div>
    }
}

#[component]
fn SessionRow(session: ChatSessionInfo) -> impl IntoView {
    let short_id: String = session.session_id.chars().take(8).collect();
    view! {
        <tr class="border-b last:border-0">
            <td class="py-2 font-mono">{format!("{}...", short_id)}</td>
            <td>{format_timestamp(&session.created_at)}</td>
            <td>{format_timestamp(&session.last_activity)}</td>
            <td>{session.message_count}</td>
            <td>
                <span class={if session.is_active { "badge badge-success" } else { "badge" }}>
                    {if session.is_active { "アクティブ" } else { "非アクティブ" }}
                </span>
            </td>
        </tr>
    }
}

/// `yyyy/MM/dd HH:mm` in local time; unparseable input is shown as-is.
pub(crate) fn format_timestamp(raw: &str) -> String {
    let parsed = chrono::DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&chrono::Local).naive_local())
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"));
    match parsed {
        Ok(ts) => ts.format("%Y/%m/%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Hand `csv` to the browser as a file download.
fn save_csv(csv: &str) -> Result<(), wasm_bindgen::JsValue> {
    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(csv));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(CSV_FILENAME);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}
