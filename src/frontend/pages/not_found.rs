use leptos::prelude::*;

use crate::routes::SIGN_IN_PATH;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="flex min-h-[60vh] items-center justify-center px-6">
            <div class="text-center">
                <h1 class="mb-4 text-8xl font-bold text-primary">"404"</h1>
                <p class="mb-2 text-2xl font-semibold">"Page not found"</p>
                <p class="mb-8 text-gray-600">
                    "The page you're looking for doesn't exist or has been moved."
                </p>
                <a href=SIGN_IN_PATH class="rounded bg-primary px-6 py-2 text-white">"Go Home"</a>
            </div>
        </div>
    }
}
