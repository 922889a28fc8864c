//! Route guard component

use festival_auth::GuardDecision;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::components::loading::CheckingAuth;
use crate::state::use_auth;

/// Render `children` only for an authenticated admin.
///
/// While auth state is loading a neutral placeholder is shown. Otherwise
/// non-admins are sent to the login page, replacing the history entry so
/// Back does not return here.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let snapshot = auth.snapshot;
    let guard = auth.guard().clone();
    let decision = Memo::new(move |_| guard.evaluate(&snapshot.get()));

    Effect::new(move |_| {
        if let GuardDecision::Redirect { to, replace } = decision.get() {
            tracing::debug!(to = %to, "Redirecting unauthenticated visitor");
            navigate(
                &to,
                NavigateOptions {
                    replace,
                    ..Default::default()
                },
            );
        }
    });

    move || match decision.get() {
        GuardDecision::Checking => view! { <CheckingAuth /> }.into_any(),
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Redirect { .. } => ().into_any(),
    }
}
