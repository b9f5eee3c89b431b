use leptos::prelude::*;

use crate::account::ProfileCard;
use crate::frontend::AppContext;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let current = expect_context::<AppContext>().current;
    let card = move || current.with(|s| s.user.as_ref().map(ProfileCard::from_user));

    move || {
        card().map(|card| {
            view! {
                <div class="mx-auto max-w-xl rounded-lg border bg-white p-8 shadow-md">
                    <h2 class="mb-1 text-2xl font-bold text-gray-800">{card.username}</h2>
                    <p class="mb-6 text-gray-600">{card.email}</p>
                    <dl class="grid grid-cols-2 gap-4">
                        <dt class="font-medium">"Role"</dt>
                        <dd>{card.role}</dd>
                        <dt class="font-medium">"Plan"</dt>
                        <dd>{card.plan}</dd>
                        {card.joined.map(|joined| view! {
                            <dt class="font-medium">"Joined"</dt>
                            <dd>{joined}</dd>
                        })}
                    </dl>
                    <a href="/subscription" class="mt-6 inline-block text-primary">"Manage subscription"</a>
                </div>
            }
        })
    }
}
