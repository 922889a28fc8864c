//! Visitor chat page

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::api::ChatService;
use crate::components::{ChatMessageView, ErrorBanner, LoadingDots};
use crate::state::AppState;
use crate::storage::{forget_chat_session, save_chat_session, saved_chat_session};
use crate::types::{ChatMessage, ChatRequest};

/// Suggestions shown before the first message
pub const SAMPLE_QUESTIONS: [&str; 8] = [
    "開催時間は？",
    "会場はどこ？",
    "食べ物はある？",
    "アクセス方法は？",
    "駐車場はある？",
    "雨天時はどうなる？",
    "入場料はかかる？",
    "おすすめのイベントは？",
];

/// Reuse the session stored for this tab, or start a new one.
///
/// A stored session the backend no longer knows is dropped and replaced.
async fn resume_or_create(chat: &ChatService) -> Result<(String, Vec<ChatMessage>), crate::api::ApiError> {
    if let Some(id) = saved_chat_session() {
        match chat.get_history(&id).await {
            Ok(history) => return Ok((id, history)),
            Err(e) => {
                tracing::info!(error = %e, "Stored chat session unavailable, starting a new one");
                forget_chat_session();
            }
        }
    }
    let id = chat.create_session().await?;
    save_chat_session(&id);
    Ok((id, Vec::new()))
}

/// Visitor chat page
#[component]
pub fn VisitorChatPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let chat = state.api.chat();

    let messages = RwSignal::new(Vec::<ChatMessage>::new());
    let input = RwSignal::new(String::new());
    let session_id = RwSignal::new(Option::<String>::None);
    let is_sending = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let show_disclaimer = RwSignal::new(true);
    let messages_end_ref = NodeRef::<leptos::html::Div>::new();

    {
        let chat = chat.clone();
        spawn_local(async move {
            match resume_or_create(&chat).await {
                Ok((id, history)) => {
                    messages.set(history);
                    session_id.set(Some(id));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to initialise chat session");
                    error.set(Some("セッションの初期化に失敗しました".to_string()));
                }
            }
        });
    }

    // Scroll to the newest message
    Effect::new(move |_| {
        messages.track();
        if let Some(el) = messages_end_ref.get() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    let send = move || {
        let text = input.get_untracked().trim().to_string();
        let Some(id) = session_id.get_untracked() else {
            return;
        };
        if text.is_empty() || is_sending.get_untracked() {
            return;
        }

        messages.update(|list| list.push(ChatMessage::user(text.clone())));
        input.set(String::new());
        is_sending.set(true);
        error.set(None);

        let chat = chat.clone();
        spawn_local(async move {
            let request = ChatRequest {
                message: text,
                session_id: Some(id),
            };
            match chat.send_message(&request).await {
                Ok(resp) => {
                    messages.update(|list| list.push(ChatMessage::assistant(resp.response)));
                }
                Err(crate::api::ApiError::Status { .. }) => {
                    error.set(Some("メッセージの送信に失敗しました".to_string()));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Chat request failed");
                    error.set(Some("ネットワークエラーが発生しました".to_string()));
                }
            }
            is_sending.set(false);
        });
    };

    let on_keydown = {
        let send = send.clone();
        move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Enter" && !ev.shift_key() && !ev.is_composing() {
                ev.prevent_default();
                send();
            }
        }
    };

    view! {
        <div class="flex flex-col h-[calc(100vh-4rem)] bg-slate-50">
            <Show when=move || show_disclaimer.get()>
                <div class="bg-amber-100 border-b border-amber-300 px-4 py-1">
                    <div class="max-w-3xl mx-auto flex items-center gap-2 text-xs text-amber-900">
                        <span class="flex-1">
                            "チャット履歴は自動的に保存されます。個人情報は入力しないようご注意ください。"
                        </span>
                        <button on:click=move |_| show_disclaimer.set(false)>"✕"</button>
                    </div>
                </div>
            </Show>

            <div class="flex-1 overflow-y-auto px-4 py-6">
                <div class="max-w-3xl mx-auto flex flex-col gap-4">
                    <Show when=move || messages.with(Vec::is_empty)>
                        <div class="text-center py-8">
                            <h2 class="text-xl font-semibold text-slate-700">"学園祭案内チャット"</h2>
                            <p class="text-sm text-slate-500 mt-1">"学園祭について何でもお聞きください！"</p>
                            <div class="flex flex-wrap justify-center gap-2 mt-6">
                                {SAMPLE_QUESTIONS.iter().map(|q| view! {
                                    <button
                                        class="px-3 py-1 rounded-full border border-blue-300 text-blue-700 text-sm hover:bg-blue-50"
                                        on:click=move |_| input.set(q.to_string())
                                    >
                                        {*q}
                                    </button>
                                }).collect_view()}
                            </div>
                        </div>
                    </Show>

                    <For
                        each=move || messages.get()
                        key=|m| m.id.clone().unwrap_or_default()
                        children=|m| view! { <ChatMessageView message=m /> }
                    />

                    <Show when=move || is_sending.get()>
                        <div class="flex items-center gap-3">
                            <div class="w-8 h-8 rounded-full bg-emerald-500 flex items-center justify-center">"🤖"</div>
                            <LoadingDots />
                        </div>
                    </Show>

                    <div node_ref=messages_end_ref></div>
                </div>
            </div>

            <div class="border-t bg-white px-4 py-3">
                <div class="max-w-3xl mx-auto">
                    <ErrorBanner message=error />
                    <div class="flex gap-2 items-end">
                        <textarea
                            rows="1"
                            class="input flex-1 resize-none"
                            placeholder="メッセージを入力..."
                            prop:value=move || input.get()
                            on:input=move |ev| input.set(event_target_value(&ev))
                            on:keydown=on_keydown
                        ></textarea>
                        <button
                            class="btn btn-primary"
                            disabled=move || {
                                is_sending.get() || session_id.get().is_none() || input.get().trim().is_empty()
                            }
                            on:click=move |_| send()
                        >
                            "送信"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
