//! Festival data editor

use std::collections::BTreeMap;

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::loading::{ErrorBanner, LoadingSpinner, SuccessBanner};
use crate::state::AppState;
use crate::types::{FestivalData, FestivalDataUpdate};

/// Insert `key → value` when both are non-blank. An existing key is overwritten.
pub(crate) fn insert_entry(map: &mut BTreeMap<String, String>, key: &str, value: &str) -> bool {
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return false;
    }
    map.insert(key.to_string(), value.to_string());
    true
}

/// Append `item` when it is non-blank.
pub(crate) fn push_item(list: &mut Vec<String>, item: &str) -> bool {
    let item = item.trim();
    if item.is_empty() {
        return false;
    }
    list.push(item.to_string());
    true
}

#[component]
pub fn FestivalDataEditor() -> impl IntoView {
    let state = expect_context::<AppState>();
    let admin = state.api.admin();

    let schedule = RwSignal::new(BTreeMap::<String, String>::new());
    let locations = RwSignal::new(BTreeMap::<String, String>::new());
    let food = RwSignal::new(Vec::<String>::new());
    let access = RwSignal::new(BTreeMap::<String, String>::new());
    let notes = RwSignal::new(Vec::<String>::new());

    let loading = RwSignal::new(true);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let success = RwSignal::new(Option::<String>::None);

    {
        let admin = admin.clone();
        spawn_local(async move {
            match admin.get_festival_data().await {
                Ok(resp) => {
                    if let Some(data) = resp.data.filter(|_| resp.success) {
                        schedule.set(data.schedule);
                        locations.set(data.locations);
                        food.set(data.food);
                        access.set(data.access);
                        notes.set(data.notes);
                    }
                }
                Err(e) => error.set(Some(format!("学園祭データの取得に失敗しました: {}", e))),
            }
            loading.set(false);
        });
    }

    let on_save = move |_: MouseEvent| {
        let admin = admin.clone();
        let update = FestivalDataUpdate::from(FestivalData {
            schedule: schedule.get_untracked(),
            locations: locations.get_untracked(),
            food: food.get_untracked(),
            access: access.get_untracked(),
            notes: notes.get_untracked(),
        });
        spawn_local(async move {
            saving.set(true);
            error.set(None);
            success.set(None);
            match admin.update_festival_data(&update).await {
                Ok(resp) if resp.success => {
                    tracing::info!("Festival data updated");
                    success.set(Some("学園祭データを正常に更新しました".to_string()));
                }
                Ok(resp) => error.set(Some(resp.message)),
                Err(e) => error.set(Some(format!("学園祭データの更新に失敗しました: {}", e))),
            }
            saving.set(false);
        });
    };

    view! {
        <div>
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-lg font-semibold">"学園祭データ編集"</h2>
                <button class="btn btn-primary" disabled=move || saving.get() on:click=on_save>
                    {move || if saving.get() { "保存中..." } else { "保存" }}
                </button>
            </div>

            <ErrorBanner message=error />
            <SuccessBanner message=success />

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="flex justify-center p-6"><LoadingSpinner size="w-8 h-8" /></div> }
            >
                <div class="grid md:grid-cols-2 gap-4">
                    <KeyValueSection
                        title="スケジュール"
                        key_placeholder="例: 10:00"
                        value_placeholder="例: 開会式"
                        entries=schedule
                    />
                    <KeyValueSection
                        title="会場"
                        key_placeholder="例: 体育館"
                        value_placeholder="例: ステージ発表"
                        entries=locations
                    />
                    <ListSection title="食べ物" placeholder="例: 焼きそば" items=food />
                    <KeyValueSection
                        title="アクセス"
                        key_placeholder="例: 電車"
                        value_placeholder="例: 最寄り駅から徒歩10分"
                        entries=access
                    />
                    <ListSection title="注意事項" placeholder="例: 校内は禁煙です" items=notes />
                </div>
            </Show>
        </div>
    }
}

/// Editable `key: value` list
#[component]
fn KeyValueSection(
    title: &'static str,
    key_placeholder: &'static str,
    value_placeholder: &'static str,
    entries: RwSignal<BTreeMap<String, String>>,
) -> impl IntoView {
    let new_key = RwSignal::new(String::new());
    let new_value = RwSignal::new(String::new());

    let add = move |_: MouseEvent| {
        let added = entries
            .try_update(|map| insert_entry(map, &new_key.get_untracked(), &new_value.get_untracked()))
            .unwrap_or(false);
        if added {
            new_key.set(String::new());
            new_value.set(String::new());
        }
    };

    view! {
        <section class="card p-4">
            <h3 class="font-semibold mb-3">{title}</h3>
            <div class="flex gap-2 mb-3">
                <input
                    class="input w-1/3"
                    placeholder=key_placeholder
                    prop:value=move || new_key.get()
                    on:input=move |ev| new_key.set(event_target_value(&ev))
                />
                <input
                    class="input flex-1"
                    placeholder=value_placeholder
                    prop:value=move || new_value.get()
                    on:input=move |ev| new_value.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" on:click=add>"追加"</button>
            </div>
            <ul class="divide-y">
                {move || entries.get().into_iter().map(|(key, value)| {
                    let label = format!("{}: {}", key, value);
                    view! {
                        <li class="flex justify-between items-center py-2 text-sm">
                            <span>{label}</span>
                            <button
                                class="text-red-500 hover:text-red-700"
                                on:click=move |_| entries.update(|map| {
                                    map.remove(&key);
                                })
                            >
                                "削除"
                            </button>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </section>
    }
}

/// Editable list of strings
#[component]
fn ListSection(
    title: &'static str,
    placeholder: &'static str,
    items: RwSignal<Vec<String>>,
) -> impl IntoView {
    let new_item = RwSignal::new(String::new());

    let add = move |_: MouseEvent| {
        let added = items
            .try_update(|list| push_item(list, &new_item.get_untracked()))
            .unwrap_or(false);
        if added {
            new_item.set(String::new());
        }
    };

    view! {
        <section class="card p-4">
            <h3 class="font-semibold mb-3">{title}</h3>
            <div class="flex gap-2 mb-3">
                <input
                    class="input flex-1"
                    placeholder=placeholder
                    prop:value=move || new_item.get()
                    on:input=move |ev| new_item.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" on:click=add>"追加"</button>
            </div>
            <ul class="divide-y">
                {move || items.get().into_iter().enumerate().map(|(index, item)| view! {
                    <li class="flex justify-between items-center py-2 text-sm">
                        <span>{item}</span>
                        <button
                            class="text-red-500 hover:text-red-700"
                            on:click=move |_| items.update(|list| {
                                if index < list.len() {
                                    list.remove(index);
                                }
                            })
                        >
                            "削除"
                        </button>
                    </li>
                }).collect_view()}
            </ul>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_entry_requires_both_fields() {
        let mut map = BTreeMap::new();
        assert!(!insert_entry(&mut map, "10:00", "  "));
        assert!(!insert_entry(&mut map, "", "開会式"));
        assert!(map.is_empty());

        assert!(insert_entry(&mut map, " 10:00 ", "開会式"));
        assert_eq!(map.get("10:00").map(String::as_str), Some("開会式"));
    }

    #[test]
    fn test_insert_entry_overwrites() {
        let mut map = BTreeMap::new();
        insert_entry(&mut map, "10:00", "開会式");
        insert_entry(&mut map, "10:00", "開場");
        assert_eq!(map.len(), 1);
        assert_eq!(map["10:00"], "開場");
    }

    #[test]
    fn test_push_item() {
        let mut list = Vec::new();
        assert!(!push_item(&mut list, "   "));
        assert!(push_item(&mut list, "焼きそば"));
        assert_eq!(list, vec!["焼きそば".to_string()]);
    }
}
