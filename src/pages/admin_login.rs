//! Admin login page

use festival_auth::AuthSnapshot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::components::{ErrorBanner, LoadingSpinner};
use crate::state::use_auth;

pub const INCORRECT_PASSWORD: &str = "パスワードが正しくありません。";

const DASHBOARD_PATH: &str = "/admin";

/// Navigation for a visitor who opens the login page while already signed
/// in. Replaces the history entry so Back does not return to the form.
fn arrival_redirect(snapshot: &AuthSnapshot) -> Option<NavigateOptions> {
    snapshot.is_authorized_admin().then(|| NavigateOptions {
        replace: true,
        ..Default::default()
    })
}

/// Admin login page
#[component]
pub fn AdminLoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let snapshot = auth.snapshot;

    // Already signed in on arrival. Untracked: runs once.
    let navigate_for_redirect = navigate.clone();
    Effect::new(move |_| {
        if let Some(options) = arrival_redirect(&snapshot.get_untracked()) {
            navigate_for_redirect(DASHBOARD_PATH, options);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = password.get_untracked();
        if value.trim().is_empty() || snapshot.get_untracked().is_loading {
            return;
        }
        let auth = auth.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            error.set(None);
            if auth.login(&value).await {
                navigate(DASHBOARD_PATH, Default::default());
            } else {
                password.set(String::new());
                error.set(Some(INCORRECT_PASSWORD.to_string()));
            }
        });
    };

    view! {
        <div class="min-h-[calc(100vh-4rem)] flex items-center justify-center bg-slate-50 px-4">
            <div class="w-full max-w-sm card p-8">
                <h1 class="text-2xl font-bold text-center mb-2">"管理者ログイン"</h1>
                <p class="text-sm text-slate-500 text-center mb-6">"管理画面にアクセスするにはパスワードを入力してください"</p>

                <ErrorBanner message=error />

                <form on:submit=on_submit class="flex flex-col gap-4">
                    <input
                        type="password"
                        class="input w-full"
                        placeholder="パスワード"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button
                        type="submit"
                        class="btn btn-primary w-full py-3 flex items-center justify-center gap-2"
                        disabled=move || snapshot.get().is_loading || password.get().trim().is_empty()
                    >
                        <Show when=move || snapshot.get().is_loading>
                            <LoadingSpinner />
                        </Show>
                        "ログイン"
                    </button>
                </form>

                <a href="/" class="block text-center text-sm text-blue-600 hover:underline mt-6">
                    "チャットに戻る"
                </a>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_redirect_only_for_admins() {
        assert!(arrival_redirect(&AuthSnapshot::default()).is_none());
        assert!(arrival_redirect(&AuthSnapshot::booting()).is_none());

        let admin = AuthSnapshot {
            is_authenticated: true,
            is_admin: true,
            is_loading: false,
        };
        let options = arrival_redirect(&admin).expect("admin is redirected");
        assert!(options.replace);
    }
}
