use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::builder::{fetch_listing, PageList};
use crate::frontend::components::{ErrorAlert, Spinner};
use crate::frontend::AppContext;

#[component]
pub fn PagesPage(owner_id: String) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = RwSignal::new_local(PageList::new(ctx.page_store(), ctx.users()));

    let viewer = ctx.current.get_untracked().user;
    let Some((store, users)) = list.try_update(|l| {
        l.begin_load(&owner_id);
        (l.store(), l.users())
    }) else {
        return ().into_any();
    };
    spawn_local(async move {
        let result =
            fetch_listing(store.as_ref(), users.as_ref(), &owner_id, viewer.as_ref()).await;
        list.update(|l| l.finish_load(result));
    });

    let on_delete = move |page_id: String| {
        let store = list.with_untracked(|l| l.store());
        spawn_local(async move {
            let deleted = match store.delete(&page_id).await {
                Ok(()) => true,
                Err(e) => {
                    crate::log_err!(e, "failed to delete page {}", page_id);
                    false
                }
            };
            list.update(|l| l.finish_delete(&page_id, deleted));
        });
    };

    view! {
        <div class="container mx-auto px-4 py-8">
            {move || list.with(|l| l.viewing_banner()).map(|banner| view! {
                <p class="mb-4 text-sm text-gray-600">{banner}</p>
            })}

            <div class="mb-8 flex items-center justify-between">
                <h2 class="text-2xl font-bold text-gray-800">{move || list.with(|l| l.heading())}</h2>
                <a
                    href=move || list.with(|l| l.new_page_path())
                    class="rounded-lg bg-primary px-4 py-2 text-white"
                >
                    "Create New Page"
                </a>
            </div>

            {move || {
                if list.with(|l| l.is_loading()) {
                    return view! { <Spinner /> }.into_any();
                }
                if let Some(message) = list.with(|l| l.error().map(str::to_string)) {
                    return view! { <ErrorAlert message=message /> }.into_any();
                }

                let cards = list.with(|l| {
                    l.pages()
                        .iter()
                        .map(|p| (p.id.clone(), p.title.clone(), p.block_summary(), l.edit_path(&p.id)))
                        .collect::<Vec<_>>()
                });
                if cards.is_empty() {
                    return view! {
                        <div class="rounded-lg bg-gray-100 p-8 text-center">
                            <p class="text-lg text-gray-600">
                                "You haven't created any pages yet. Start by creating your first page!"
                            </p>
                        </div>
                    }
                    .into_any();
                }

                view! {
                    <div class="grid grid-cols-1 gap-6 md:grid-cols-2 lg:grid-cols-3">
                        {cards
                            .into_iter()
                            .map(|(id, title, summary, href)| {
                                view! {
                                    <div class="rounded-lg border bg-white p-6 shadow-md">
                                        <div class="mb-4 flex items-center justify-between">
                                            <h3 class="truncate text-lg font-semibold">{title}</h3>
                                            <div class="flex space-x-2">
                                                <a href=href class="text-primary" title="Edit Page">"Edit"</a>
                                                <button
                                                    class="text-red-500"
                                                    title="Delete Page"
                                                    on:click=move |_| on_delete(id.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </div>
                                        </div>
                                        <p class="text-sm text-gray-600">{summary}</p>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
    .into_any()
}
