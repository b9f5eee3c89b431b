use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::frontend::AppContext;
use crate::log_err;
use crate::routes::SIGN_IN_PATH;

/// Top bar with the dashboard links. Hidden for visitors.
#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let current = ctx.current;
    let navigate = StoredValue::new(use_navigate());

    let pages_href = move || {
        current
            .with(|s| s.user_id().map(|id| format!("/pages/{}", id)))
            .unwrap_or_else(|| SIGN_IN_PATH.to_string())
    };
    let username = move || {
        current.with(|s| {
            s.user
                .as_ref()
                .map(|u| u.display_name().to_string())
                .unwrap_or_default()
        })
    };

    let on_logout = move |_| {
        if let Err(e) = ctx.session.logout() {
            log_err!(e, "failed to clear stored session");
        }
        ctx.refresh_session();
        navigate.with_value(|nav| nav(SIGN_IN_PATH, Default::default()));
    };

    view! {
        <Show when=move || current.with(|s| s.is_authenticated())>
            <header class="sticky top-0 z-50 flex w-full border-b border-stroke bg-white">
                <div class="flex flex-grow items-center justify-between px-4 py-4 md:px-6">
                    <a href=pages_href class="text-xl font-bold text-primary">"PageCraft Pro"</a>
                    <nav class="flex items-center gap-6">
                        <a href=pages_href>"Pages"</a>
                        <Show when=move || current.with(|s| s.is_admin())>
                            <a href="/users">"Users"</a>
                        </Show>
                        <a href="/subscription">"Subscription"</a>
                        <a href="/profile">{username}</a>
                        <button class="text-danger" on:click=on_logout.clone()>"Log Out"</button>
                    </nav>
                </div>
            </header>
        </Show>
    }
}
