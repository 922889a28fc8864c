//! Admin dashboard

use leptos::prelude::*;

use crate::components::admin::{
    DocumentManager, FestivalDataEditor, ModelManager, SessionList, SystemConfigPanel,
    SystemStatsPanel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Dashboard,
    Sessions,
    FestivalData,
    Documents,
    Models,
}

impl Tab {
    const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Sessions,
        Tab::FestivalData,
        Tab::Documents,
        Tab::Models,
    ];

    fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "ダッシュボード",
            Tab::Sessions => "セッション管理",
            Tab::FestivalData => "データ編集",
            Tab::Documents => "ドキュメント",
            Tab::Models => "AIモデル",
        }
    }
}

/// Admin dashboard. Mounted behind `ProtectedRoute`.
#[component]
pub fn AdminPage() -> impl IntoView {
    let active = RwSignal::new(Tab::Dashboard);

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8">
            <h1 class="text-2xl font-bold mb-1">"管理画面"</h1>
            <p class="text-slate-500 mb-6">"チャットボットの設定と管理を行います。"</p>

            <div role="tablist" aria-label="管理機能タブ" class="flex gap-1 border-b mb-6">
                {Tab::ALL.into_iter().map(|tab| view! {
                    <button
                        role="tab"
                        aria-selected=move || (active.get() == tab).to_string()
                        class=move || format!(
                            "px-4 py-2 -mb-px border-b-2 {}",
                            if active.get() == tab {
                                "border-blue-600 text-blue-700 font-semibold"
                            } else {
                                "border-transparent text-slate-500 hover:text-slate-700"
                            }
                        )
                        on:click=move |_| active.set(tab)
                    >
                        {tab.label()}
                    </button>
                }).collect_view()}
            </div>

            <div role="tabpanel">
                {move || match active.get() {
                    Tab::Dashboard => view! { <SystemStatsPanel /> <SystemConfigPanel /> }.into_any(),
                    Tab::Sessions => view! { <SessionList /> }.into_any(),
                    Tab::FestivalData => view! { <FestivalDataEditor /> }.into_any(),
                    Tab::Documents => view! { <DocumentManager /> }.into_any(),
                    Tab::Models => view! { <ModelManager /> }.into_any(),
                }}
            </div>
        </div>
    }
}
