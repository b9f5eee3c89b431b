use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::account::{role_label, RoleFilter, UserDirectory, LOAD_USERS_MESSAGE};
use crate::builder::pages_path;
use crate::frontend::components::{ErrorAlert, Spinner};
use crate::frontend::AppContext;
use crate::log_err;
use crate::models::Role;

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let directory = RwSignal::new_local(UserDirectory::new(ctx.users()));

    let service = directory.with_untracked(|d| d.service());
    spawn_local(async move {
        let result = service.list().await.map_err(|e| {
            log_err!(e, "failed to fetch users");
            LOAD_USERS_MESSAGE.to_string()
        });
        directory.update(|d| d.finish_load(result));
    });

    let rows = move || {
        directory.with(|d| {
            d.visible()
                .into_iter()
                .map(|u| {
                    (
                        u.id.clone(),
                        u.display_name().to_string(),
                        u.email.clone(),
                        u.role,
                        u.is_banned,
                    )
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="container mx-auto px-4 py-8">
            <h2 class="mb-6 text-2xl font-bold text-gray-800">"Users"</h2>

            <div class="mb-6 flex flex-wrap gap-4">
                <input
                    type="search"
                    placeholder="Search by name or email"
                    class="flex-1 rounded border border-stroke px-4 py-2 outline-none focus:border-primary"
                    on:input=move |ev| {
                        let term = event_target_value(&ev);
                        directory.update(|d| d.set_search(&term));
                    }
                />
                <select
                    class="rounded border border-stroke px-4 py-2"
                    on:change=move |ev| {
                        if let Ok(filter) = event_target_value(&ev).parse::<RoleFilter>() {
                            directory.update(|d| d.set_filter(filter));
                        }
                    }
                >
                    <option value="all">"All Roles"</option>
                    <option value=Role::User.as_str()>"User"</option>
                    <option value=Role::Admin.as_str()>"Admin"</option>
                    <option value=Role::SuperAdmin.as_str()>"Super Admin"</option>
                </select>
            </div>

            {move || {
                if directory.with(|d| d.is_loading()) {
                    return view! { <Spinner /> }.into_any();
                }
                if let Some(message) = directory.with(|d| d.error().map(str::to_string)) {
                    return view! { <ErrorAlert message=message /> }.into_any();
                }

                view! {
                    <table class="w-full table-auto bg-white shadow-md">
                        <thead>
                            <tr class="bg-gray-2 text-left">
                                <th class="px-4 py-3">"Name"</th>
                                <th class="px-4 py-3">"Email"</th>
                                <th class="px-4 py-3">"Role"</th>
                                <th class="px-4 py-3">"Status"</th>
                                <th class="px-4 py-3">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows()
                                .into_iter()
                                .map(|(id, name, email, role, banned)| {
                                    let role_id = id.clone();
                                    let ban_id = id.clone();
                                    let locked = role == Role::SuperAdmin;
                                    view! {
                                        <tr class="border-b border-stroke">
                                            <td class="px-4 py-3">
                                                <a href=pages_path(&id) class="text-primary">{name}</a>
                                            </td>
                                            <td class="px-4 py-3">{email}</td>
                                            <td class="px-4 py-3">{role_label(role)}</td>
                                            <td class="px-4 py-3">{if banned { "Banned" } else { "Active" }}</td>
                                            <td class="space-x-2 px-4 py-3">
                                                <button
                                                    class="text-primary disabled:opacity-50"
                                                    disabled=locked
                                                    on:click=move |_| directory.update(|d| d.toggle_role(&role_id))
                                                >
                                                    {if role == Role::Admin { "Make User" } else { "Make Admin" }}
                                                </button>
                                                <button
                                                    class="text-danger"
                                                    on:click=move |_| directory.update(|d| d.toggle_ban(&ban_id))
                                                >
                                                    {if banned { "Unban" } else { "Ban" }}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any()
            }}
        </div>
    }
}
