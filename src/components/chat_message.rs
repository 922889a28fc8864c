//! Chat message bubble

use leptos::prelude::*;

use crate::markdown::render_markdown;
use crate::types::{ChatMessage, MessageRole};

/// Render a single chat message
///
/// Visitor messages are shown as plain text. Assistant replies are rendered
/// from markdown.
#[component]
pub fn ChatMessageView(message: ChatMessage) -> impl IntoView {
    let is_user = message.role == MessageRole::User;
    let time = message
        .timestamp
        .as_deref()
        .and_then(|ts| chrono::DateTime::parse_from_rfc3339(ts).ok())
        .map(|ts| ts.with_timezone(&chrono::Local).format("%H:%M").to_string());

    let body = if is_user {
        view! { <div class="whitespace-pre-wrap break-words">{message.content}</div> }.into_any()
    } else {
        let html = render_markdown(&message.content);
        view! { <div class="prose prose-sm max-w-none break-words" inner_html=html></div> }.into_any()
    };

    view! {
        <div class=format!(
            "flex items-start gap-3 message-appear {}",
            if is_user { "flex-row-reverse" } else { "" }
        )>
            <div class=format!(
                "w-8 h-8 rounded-full flex items-center justify-center text-white text-sm shrink-0 {}",
                if is_user { "bg-blue-500" } else { "bg-emerald-500" }
            )>
                {if is_user { "👤" } else { "🤖" }}
            </div>

            <div class=format!(
                "flex flex-col gap-1 max-w-[80%] {}",
                if is_user { "items-end" } else { "items-start" }
            )>
                <div class=format!(
                    "px-4 py-3 rounded-2xl {}",
                    if is_user {
                        "bg-blue-600 text-white rounded-tr-sm"
                    } else {
                        "bg-white text-slate-800 border border-slate-200 rounded-tl-sm"
                    }
                )>
                    {body}
                </div>

                {time.map(|t| view! { <span class="text-xs text-slate-400 mt-1">{t}</span> })}
            </div>
        </div>
    }
}
