//! RAG document management

use leptos::html::Input;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{upload_form, DEFAULT_RESULT_COUNT};
use crate::components::loading::{ErrorBanner, LoadingSpinner, SuccessBanner};
use crate::state::AppState;
use crate::types::{CollectionInfo, DocumentUpdate, RagDocument};

/// Case-insensitive match of `term` against title, source and text.
pub(crate) fn matches_filter(doc: &RagDocument, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    let contains = |s: &str| s.to_lowercase().contains(&term);
    doc.metadata.title.as_deref().is_some_and(contains)
        || doc.metadata.source.as_deref().is_some_and(contains)
        || contains(&doc.text)
}

#[component]
pub fn DocumentManager() -> impl IntoView {
    let state = expect_context::<AppState>();
    let rag = state.api.rag();

    let documents = RwSignal::new(Vec::<RagDocument>::new());
    let collection = RwSignal::new(Option::<CollectionInfo>::None);
    let loading = RwSignal::new(false);
    let uploading = RwSignal::new(false);
    let filter = RwSignal::new(String::new());
    let editing = RwSignal::new(Option::<(String, DocumentUpdate)>::None);
    let error = RwSignal::new(Option::<String>::None);
    let success = RwSignal::new(Option::<String>::None);
    let file_input = NodeRef::<Input>::new();

    let refresh = {
        let rag = rag.clone();
        move || {
            let rag = rag.clone();
            spawn_local(async move {
                loading.set(true);
                match rag.list_documents().await {
                    Ok(list) => documents.set(list),
                    Err(e) => error.set(Some(format!("ドキュメントの取得に失敗しました: {}", e))),
                }
                // The info card is optional; a failure here is not shown.
                if let Ok(info) = rag.collection_info().await {
                    collection.set(Some(info));
                }
                loading.set(false);
            });
        }
    };
    refresh();

    let on_upload = {
        let rag = rag.clone();
        let refresh = refresh.clone();
        move |_: MouseEvent| {
            let Some(files) = file_input.get().and_then(|input| input.files()) else {
                return;
            };
            if files.length() == 0 {
                error.set(Some("ファイルを選択してください".to_string()));
                return;
            }
            let form = match upload_form(&files) {
                Ok(form) => form,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };
            if let Some(input) = file_input.get() {
                input.set_value("");
            }
            let rag = rag.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                uploading.set(true);
                error.set(None);
                match rag.upload_documents(form).await {
                    Ok(resp) if resp.success => {
                        success.set(Some(format!(
                            "{}件のファイルをアップロードしました",
                            resp.uploaded_files.len()
                        )));
                        refresh();
                    }
                    Ok(resp) => error.set(Some(resp.message)),
                    Err(e) => error.set(Some(format!("アップロードに失敗しました: {}", e))),
                }
                uploading.set(false);
            });
        }
    };

    let delete = {
        let rag = rag.clone();
        let refresh = refresh.clone();
        move |id: String| {
            let rag = rag.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match rag.delete_documents(vec![id]).await {
                    Ok(_) => {
                        success.set(Some("ドキュメントを削除しました".to_string()));
                        refresh();
                    }
                    Err(e) => error.set(Some(format!("削除に失敗しました: {}", e))),
                }
            });
        }
    };

    let save_edit = {
        let rag = rag.clone();
        let refresh = refresh.clone();
        move |_: MouseEvent| {
            let Some((id, update)) = editing.get_untracked() else {
                return;
            };
            let rag = rag.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match rag.update_document(&id, &update).await {
                    Ok(_) => {
                        editing.set(None);
                        success.set(Some("ドキュメントを更新しました".to_string()));
                        refresh();
                    }
                    Err(e) => error.set(Some(format!("更新に失敗しました: {}", e))),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-lg font-semibold">"ドキュメント管理"</h2>
                <button
                    class="btn btn-ghost"
                    on:click={
                        let refresh = refresh.clone();
                        move |_| refresh()
                    }
                >
                    "更新"
                </button>
            </div>

            <ErrorBanner message=error />
            <SuccessBanner message=success />

            {move || collection.get().map(|info| view! {
                <div class="card p-4 text-sm text-slate-600">
                    {format!(
                        "コレクション: {} / ドキュメント数: {} / 埋め込みモデル: {}",
                        info.collection_name, info.document_count, info.model_name
                    )}
                </div>
            })}

            <div class="card p-4 flex items-center gap-3">
                <input type="file" multiple accept=".txt,.md,.pdf,.docx" node_ref=file_input class="flex-1" />
                <button class="btn btn-primary" disabled=move || uploading.get() on:click=on_upload>
                    {move || if uploading.get() { "アップロード中..." } else { "アップロード" }}
                </button>
            </div>

            {move || editing.get().map(|(id, update)| view! {
                <div class="card p-4 border border-blue-300 space-y-2">
                    <p class="text-xs text-slate-500 font-mono">{format!("ID: {}", id)}</p>
                    <input
                        class="input w-full"
                        placeholder="タイトル"
                        prop:value=update.title.clone()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            editing.update(|e| if let Some((_, u)) = e { u.title = value });
                        }
                    />
                    <input
                        class="input w-full"
                        placeholder="ソース"
                        prop:value=update.source.clone()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            editing.update(|e| if let Some((_, u)) = e { u.source = value });
                        }
                    />
                    <div class="flex justify-end gap-2">
                        <button class="btn btn-ghost" on:click=move |_| editing.set(None)>"キャンセル"</button>
                        <button class="btn btn-primary" on:click=save_edit.clone()>"保存"</button>
                    </div>
                </div>
            })}

            <input
                class="input w-full"
                placeholder="ドキュメントを絞り込み..."
                prop:value=move || filter.get()
                on:input=move |ev| filter.set(event_target_value(&ev))
            />

            {move || {
                if loading.get() && documents.with(Vec::is_empty) {
                    return view! {
                        <div class="flex justify-center p-6"><LoadingSpinner size="w-8 h-8" /></div>
                    }.into_any();
                }
                let term = filter.get();
                let visible: Vec<RagDocument> = documents
                    .get()
                    .into_iter()
                    .filter(|doc| matches_filter(doc, &term))
                    .collect();
                if visible.is_empty() {
                    return view! {
                        <p class="text-center text-slate-500 py-6">"ドキュメントがありません"</p>
                    }.into_any();
                }
                let delete = delete.clone();
                view! {
                    <div class="grid md:grid-cols-2 gap-4">
                        {visible.into_iter().map(|doc| {
                            let delete = delete.clone();
                            let id = doc.id.clone();
                            let edit_target = (
                                doc.id.clone(),
                                DocumentUpdate {
                                    title: doc.metadata.title.clone().unwrap_or_default(),
                                    source: doc.metadata.source.clone().unwrap_or_default(),
                                },
                            );
                            view! {
                                <div class="card p-4 flex flex-col gap-2">
                                    <h3 class="font-semibold">{doc.title().to_string()}</h3>
                                    {doc.metadata.source.clone().map(|s| view! {
                                        <span class="text-xs text-slate-500">{format!("ソース: {}", s)}</span>
                                    })}
                                    <p class="text-sm text-slate-600 line-clamp-3">{doc.text.clone()}</p>
                                    <div class="flex justify-end gap-2 mt-auto">
                                        <button
                                            class="btn btn-ghost"
                                            on:click=move |_| editing.set(Some(edit_target.clone()))
                                        >
                                            "編集"
                                        </button>
                                        <button
                                            class="btn btn-danger"
                                            on:click=move |_| delete(id.clone())
                                        >
                                            "削除"
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}

            <RagSearch />
        </div>
    }
}

/// Similarity search and context retrieval against the collection
#[component]
fn RagSearch() -> impl IntoView {
    let state = expect_context::<AppState>();
    let rag = state.api.rag();

    let query = RwSignal::new(String::new());
    let searching = RwSignal::new(false);
    let results = RwSignal::new(Vec::<RagDocument>::new());
    let context = RwSignal::new(Option::<String>::None);
    let error = RwSignal::new(Option::<String>::None);

    let on_search = {
        let rag = rag.clone();
        move |_: MouseEvent| {
            let q = query.get_untracked().trim().to_string();
            if q.is_empty() {
                return;
            }
            let rag = rag.clone();
            spawn_local(async move {
                searching.set(true);
                error.set(None);
                context.set(None);
                match rag.search(&q, DEFAULT_RESULT_COUNT).await {
                    Ok(resp) => results.set(resp.results),
                    Err(e) => error.set(Some(format!("検索に失敗しました: {}", e))),
                }
                searching.set(false);
            });
        }
    };

    let on_query = move |_: MouseEvent| {
        let q = query.get_untracked().trim().to_string();
        if q.is_empty() {
            return;
        }
        let rag = rag.clone();
        spawn_local(async move {
            searching.set(true);
            error.set(None);
            match rag.query(&q, DEFAULT_RESULT_COUNT).await {
                Ok(resp) => {
                    results.set(resp.relevant_documents);
                    context.set(Some(resp.context));
                }
                Err(e) => error.set(Some(format!("RAGクエリに失敗しました: {}", e))),
            }
            searching.set(false);
        });
    };

    view! {
        <div class="card p-4 space-y-3">
            <h3 class="font-semibold">"検索テスト"</h3>
            <ErrorBanner message=error />
            <div class="flex gap-2">
                <input
                    class="input flex-1"
                    placeholder="質問を入力..."
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" disabled=move || searching.get() on:click=on_search>
                    "検索"
                </button>
                <button class="btn btn-ghost" disabled=move || searching.get() on:click=on_query>
                    "RAGクエリ"
                </button>
            </div>

            {move || context.get().filter(|c| !c.is_empty()).map(|c| view! {
                <pre class="text-xs bg-slate-50 p-3 rounded whitespace-pre-wrap">{c}</pre>
            })}

            <ul class="space-y-2">
                {move || results.get().into_iter().map(|doc| {
                    let similarity = doc
                        .similarity_percent()
                        .map(|p| format!("類似度 {:.1}%", p))
                        .unwrap_or_default();
                    view! {
                        <li class="border rounded p-3">
                            <div class="flex justify-between text-sm font-medium">
                                <span>{doc.title().to_string()}</span>
                                <span class="text-slate-500">{similarity}</span>
                            </div>
                            <p class="text-sm text-slate-600 mt-1">{doc.text.clone()}</p>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentMetadata;

    fn doc(title: Option<&str>, source: Option<&str>, text: &str) -> RagDocument {
        RagDocument {
            id: "doc-1".to_string(),
            text: text.to_string(),
            full_text: None,
            metadata: DocumentMetadata {
                title: title.map(str::to_string),
                source: source.map(str::to_string),
                ..Default::default()
            },
            distance: None,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(matches_filter(&doc(None, None, "x"), "   "));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let d = doc(Some("Festival Map"), None, "");
        assert!(matches_filter(&d, "festival"));
        assert!(matches_filter(&d, "MAP"));
    }

    #[test]
    fn test_filter_checks_source_and_text() {
        let d = doc(None, Some("web_upload"), "模擬店の一覧");
        assert!(matches_filter(&d, "upload"));
        assert!(matches_filter(&d, "模擬店"));
        assert!(!matches_filter(&d, "駐車場"));
    }
}
