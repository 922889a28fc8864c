//! LLM model management

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{LlmService, ModelAction};
use crate::components::loading::{ErrorBanner, LoadingSpinner, SuccessBanner};
use crate::state::AppState;
use crate::types::{LlmRequest, ModelInfo, ModelStatus};

/// Memory figure reported in MB, shown in GB above 1024.
pub(crate) fn format_memory_usage(mb: f64) -> String {
    if mb < 1024.0 {
        format!("{:.1} MB", mb)
    } else {
        format!("{:.1} GB", mb / 1024.0)
    }
}

/// Relative "last used" label.
pub(crate) fn format_last_used(last_used: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = last_used else {
        return "未使用".to_string();
    };
    let Ok(ts) = DateTime::parse_from_rfc3339(raw) else {
        return raw.to_string();
    };
    let minutes = (now - ts.with_timezone(&Utc)).num_minutes();
    match minutes {
        m if m < 1 => "今".to_string(),
        m if m < 60 => format!("{}分前", m),
        m if m < 1440 => format!("{}時間前", m / 60),
        _ => ts.format("%Y/%m/%d").to_string(),
    }
}

#[derive(Debug, Clone, Default)]
struct ModelData {
    models: Vec<ModelInfo>,
    statuses: Vec<ModelStatus>,
    current: String,
}

async fn fetch_models(llm: &LlmService) -> Result<ModelData, crate::api::ApiError> {
    let (models, statuses, current) = futures::join!(
        llm.available_models(),
        llm.model_status(),
        llm.current_model()
    );
    Ok(ModelData {
        models: models?,
        statuses: statuses?,
        current: current?.current_model,
    })
}

#[component]
pub fn ModelManager() -> impl IntoView {
    let state = expect_context::<AppState>();
    let llm = state.api.llm();

    let data = RwSignal::new(ModelData::default());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let success = RwSignal::new(Option::<String>::None);

    {
        let llm = llm.clone();
        spawn_local(async move {
            busy.set(true);
            match fetch_models(&llm).await {
                Ok(d) => data.set(d),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load model data");
                    error.set(Some("データの読み込みに失敗しました".to_string()));
                }
            }
            busy.set(false);
        });
    }

    let run = move |action: ModelAction, name: String| {
        let llm = llm.clone();
        spawn_local(async move {
            busy.set(true);
            error.set(None);
            success.set(None);
            match llm.run(action, &name).await {
                Ok(result) if result.success => {
                    success.set(Some(match action {
                        ModelAction::Load => format!("モデル {} を読み込みました", name),
                        ModelAction::Unload => format!("モデル {} をアンロードしました", name),
                        ModelAction::Switch => format!("モデルを {} に切り替えました", name),
                    }));
                    if let Ok(d) = fetch_models(&llm).await {
                        data.set(d);
                    }
                }
                Ok(result) => error.set(Some(result.message)),
                Err(e) => error.set(Some(match action {
                    ModelAction::Load => format!("モデル {} の読み込みに失敗しました: {}", name, e),
                    ModelAction::Unload => format!("モデル {} のアンロードに失敗しました: {}", name, e),
                    ModelAction::Switch => format!("モデル切り替えに失敗しました: {}", e),
                })),
            }
            busy.set(false);
        });
    };

    view! {
        <div>
            <h2 class="text-lg font-semibold mb-4">"AIモデル管理"</h2>
            <ErrorBanner message=error />
            <SuccessBanner message=success />

            {move || {
                let d = data.get();
                if busy.get() && d.models.is_empty() {
                    return view! {
                        <div class="flex justify-center p-6"><LoadingSpinner size="w-8 h-8" /></div>
                    }.into_any();
                }
                let now = Utc::now();
                let run = run.clone();
                view! {
                    <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4">
                        {d.models.into_iter().map(|model| {
                            let status = d.statuses.iter().find(|s| s.model_name == model.name).cloned();
                            let is_current = model.name == d.current;
                            let is_loaded = status.as_ref().is_some_and(|s| s.is_loaded);
                            let run = run.clone();
                            let name = model.name.clone();
                            let available = model.is_available;
                            view! {
                                <div class=format!(
                                    "card p-4 flex flex-col gap-2 {}",
                                    if is_current { "border-2 border-blue-500" } else { "border" }
                                )>
                                    <div class="flex justify-between items-start">
                                        <h3 class="font-semibold">{model.display_name.clone()}</h3>
                                        {is_current.then(|| view! { <span class="badge badge-primary">"現在"</span> })}
                                    </div>
                                    <p class="text-sm text-slate-500">{model.description.clone()}</p>
                                    <div class="flex gap-1 flex-wrap text-xs">
                                        <span class="badge">{model.size.clone()}</span>
                                        <span class="badge">{model.language.clone()}</span>
                                        <span class={if is_loaded { "badge badge-success" } else { "badge" }}>
                                            {if is_loaded { "読み込み済み" } else { "未読み込み" }}
                                        </span>
                                    </div>
                                    {status.map(|s| view! {
                                        <div class="text-sm text-slate-600">
                                            <p>{format!("メモリ: {}", format_memory_usage(s.memory_usage))}</p>
                                            <p>{format!("最終使用: {}", format_last_used(s.last_used.as_deref(), now))}</p>
                                            {s.error_message.map(|m| view! { <p class="text-red-500">{m}</p> })}
                                        </div>
                                    })}
                                    <div class="flex gap-2 mt-auto">
                                        {model_actions(is_loaded, is_current)
                                            .into_iter()
                                            .map(|(action, label)| {
                                                let run = run.clone();
                                                let name = name.clone();
                                                view! {
                                                    <button
                                                        class="btn btn-ghost"
                                                        disabled=move || busy.get() || !available
                                                        on:click=move |_| run(action, name.clone())
                                                    >
                                                        {label}
                                                    </button>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}

            <GenerateTest />
        </div>
    }
}

/// Send a one-off prompt to the current model
#[component]
fn GenerateTest() -> impl IntoView {
    let state = expect_context::<AppState>();
    let llm = state.api.llm();

    let prompt = RwSignal::new(String::new());
    let output = RwSignal::new(Option::<String>::None);
    let generating = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let on_generate = move |_: leptos::ev::MouseEvent| {
        let text = prompt.get_untracked().trim().to_string();
        if text.is_empty() {
            return;
        }
        let llm = llm.clone();
        spawn_local(async move {
            generating.set(true);
            error.set(None);
            let request = LlmRequest {
                prompt: text,
                ..Default::default()
            };
            match llm.generate(&request).await {
                Ok(resp) => output.set(Some(format!(
                    "{}\n\n({} / {} tokens / {:.2}s)",
                    resp.response, resp.model_name, resp.tokens_used, resp.processing_time
                ))),
                Err(e) => error.set(Some(format!("生成に失敗しました: {}", e))),
            }
            generating.set(false);
        });
    };

    view! {
        <section class="card p-4 mt-6 space-y-3">
            <h3 class="font-semibold">"テスト生成"</h3>
            <ErrorBanner message=error />
            <textarea
                rows="3"
                class="input w-full"
                placeholder="プロンプトを入力..."
                prop:value=move || prompt.get()
                on:input=move |ev| prompt.set(event_target_value(&ev))
            ></textarea>
            <button class="btn btn-primary" disabled=move || generating.get() on:click=on_generate>
                {move || if generating.get() { "生成中..." } else { "生成" }}
            </button>
            {move || output.get().map(|text| view! {
                <pre class="text-sm bg-slate-50 p-3 rounded whitespace-pre-wrap">{text}</pre>
            })}
        </section>
    }
}

/// Buttons offered for a model in the given state.
fn model_actions(is_loaded: bool, is_current: bool) -> Vec<(ModelAction, &'static str)> {
    let mut actions = Vec::new();
    if is_loaded {
        actions.push((ModelAction::Unload, "アンロード"));
    } else {
        actions.push((ModelAction::Load, "読み込み"));
    }
    if !is_current {
        actions.push((ModelAction::Switch, "切り替え"));
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_memory_usage() {
        assert_eq!(format_memory_usage(512.0), "512.0 MB");
        assert_eq!(format_memory_usage(2048.0), "2.0 GB");
    }

    #[test]
    fn test_format_last_used() {
        let now = Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap();
        assert_eq!(format_last_used(None, now), "未使用");
        assert_eq!(format_last_used(Some("2024-11-02T11:59:30Z"), now), "今");
        assert_eq!(format_last_used(Some("2024-11-02T11:45:00Z"), now), "15分前");
        assert_eq!(format_last_used(Some("2024-11-02T09:00:00Z"), now), "3時間前");
        assert_eq!(format_last_used(Some("2024-10-01T09:00:00Z"), now), "2024/10/01");
        assert_eq!(format_last_used(Some("garbage"), now), "garbage");
    }

    #[test]
    fn test_model_actions() {
        assert_eq!(
            model_actions(false, false),
            vec![(ModelAction::Load, "読み込み"), (ModelAction::Switch, "切り替え")]
        );
        assert_eq!(model_actions(true, true), vec![(ModelAction::Unload, "アンロード")]);
    }
}
