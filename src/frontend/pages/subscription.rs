use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::account::{
    sync_session, SubscriptionController, LOAD_FAILED_MESSAGE, UPGRADED_MESSAGE,
    UPGRADE_FAILED_MESSAGE,
};
use crate::frontend::components::{Alert, AlertVariant, Button, ButtonVariant, Spinner};
use crate::frontend::AppContext;
use crate::log_err;
use crate::models::{Plan, SubscriptionStatus};

#[derive(Clone, PartialEq)]
enum Notice {
    Success(&'static str),
    Error(&'static str),
}

#[component]
pub fn SubscriptionPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let (session, current) = (ctx.session, ctx.current);
    let controller = RwSignal::new_local(SubscriptionController::new(ctx.subscriptions()));
    let notice: RwSignal<Option<Notice>> = RwSignal::new(None);
    let user_id = StoredValue::new(
        ctx.current
            .with_untracked(|s| s.user_id().map(str::to_string))
            .unwrap_or_default(),
    );

    let service = controller.with_untracked(|c| c.service());
    controller.update(|c| c.set_busy(true));
    spawn_local(async move {
        let id = user_id.get_value();
        match service.status(&id).await {
            Ok(user) => controller.update(|c| c.apply(&user)),
            Err(e) => {
                log_err!(e, "failed to fetch subscription of {}", id);
                controller.update(|c| c.set_busy(false));
                notice.set(Some(Notice::Error(LOAD_FAILED_MESSAGE)));
            }
        }
    });

    let upgrade = Callback::new(move |status: SubscriptionStatus| {
        let Some(service) = controller.try_update(|c| {
            c.set_busy(true);
            c.service()
        }) else {
            return;
        };
        notice.set(None);

        spawn_local(async move {
            let id = user_id.get_value();
            match service.update(&id, status).await {
                Ok(user) => {
                    controller.update(|c| c.apply(&user));
                    sync_session(session, &user);
                    current.set(session.snapshot());
                    notice.set(Some(Notice::Success(UPGRADED_MESSAGE)));
                }
                Err(e) => {
                    log_err!(e, "failed to update subscription of {}", id);
                    controller.update(|c| c.set_busy(false));
                    notice.set(Some(Notice::Error(UPGRADE_FAILED_MESSAGE)));
                }
            }
        });
    });

    let loading = move || controller.with(|c| c.current().is_none() && c.is_busy());

    view! {
        <div class="container mx-auto px-4 py-8">
            <h2 class="mb-2 text-2xl font-bold text-gray-800">"Subscription Plans"</h2>
            {move || controller.with(|c| c.current()).map(|status| view! {
                <p class="mb-6 text-gray-600">"Current plan: " {status.plan().name}</p>
            })}

            {move || notice.get().map(|n| {
                let (message, variant) = match n {
                    Notice::Success(message) => (message, AlertVariant::Success),
                    Notice::Error(message) => (message, AlertVariant::Error),
                };
                view! { <Alert message=message variant=variant /> }
            })}

            <Show when=move || !loading() fallback=|| view! { <Spinner /> }>
                <div class="grid grid-cols-1 gap-6 md:grid-cols-2">
                    {controller
                        .with_untracked(|c| c.plans())
                        .iter()
                        .map(|plan| view! { <PlanCard plan=plan controller=controller on_choose=upgrade /> })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn PlanCard(
    plan: &'static Plan,
    controller: RwSignal<SubscriptionController, LocalStorage>,
    on_choose: Callback<SubscriptionStatus>,
) -> impl IntoView {
    let is_current = move || controller.with(|c| c.is_current(plan));
    let busy = Signal::derive(move || controller.with(|c| c.is_busy()));
    let disabled = Signal::derive(move || is_current());

    view! {
        <div class="rounded-lg border bg-white p-6 shadow-md" class:border-primary=is_current>
            <h3 class="mb-2 text-xl font-semibold">{plan.name}</h3>
            <p class="mb-4 text-3xl font-bold">
                {format!("${}", plan.price)}
                <span class="text-base font-normal text-gray-500">"/month"</span>
            </p>
            <ul class="mb-6 space-y-2">
                {plan.features.iter().map(|f| view! { <li class="text-gray-600">{*f}</li> }).collect_view()}
            </ul>
            <Show
                when=move || !is_current()
                fallback=|| view! { <p class="font-medium text-success">"Current Plan"</p> }
            >
                <Button
                    variant=ButtonVariant::Primary
                    disabled=disabled
                    loading=busy
                    loading_text="Processing..."
                    on_click=Callback::new(move |()| on_choose.run(plan.status))
                >
                    {format!("Switch to {}", plan.name)}
                </Button>
            </Show>
        </div>
    }
}
