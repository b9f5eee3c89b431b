use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::account::{sign_in, FieldErrors, SignInForm};
use crate::frontend::components::{Button, EmailInput, ErrorAlert, PasswordInput};
use crate::frontend::AppContext;

#[component]
pub fn SignInPage(admin: bool) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let field_errors = RwSignal::new(FieldErrors::default());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading = RwSignal::new(false);

    // Typing into a field clears the previous attempt's errors.
    Effect::new(move |_| {
        email.track();
        password.track();
        field_errors.set(FieldErrors::default());
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let form = SignInForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let ctx = ctx.clone();

        error.set(None);
        loading.set(true);

        spawn_local(async move {
            let result = sign_in(&ctx.auth(), ctx.session, &form).await;
            loading.set(false);
            match result {
                Ok(target) => {
                    ctx.refresh_session();
                    navigate.with_value(|nav| nav(&target, Default::default()));
                }
                Err(e) => {
                    if let Some(errors) = e.field_errors() {
                        field_errors.set(errors.clone());
                    }
                    error.set(e.banner().map(str::to_string));
                }
            }
        });
    };

    let heading = if admin { "Admin Sign In" } else { "Sign In to PageCraft Pro" };

    view! {
        <div class="mx-auto w-full max-w-md rounded-sm border border-stroke bg-white p-8 shadow-default">
            <h2 class="mb-9 text-2xl font-bold text-black">{heading}</h2>

            {move || error.get().map(|message| view! { <ErrorAlert message=message /> })}

            <form on:submit=on_submit>
                <EmailInput
                    value=email
                    error=Signal::derive(move || field_errors.with(|e| e.get("email")))
                />
                <PasswordInput
                    label="Password"
                    name="password"
                    value=password
                    error=Signal::derive(move || field_errors.with(|e| e.get("password")))
                />
                <Button button_type="submit" loading=loading loading_text="Signing in...">
                    "Sign In"
                </Button>
            </form>

            <p class="mt-6 text-center">
                "Don't have an account? "
                <a href="/signup" class="text-primary">"Sign Up"</a>
            </p>
        </div>
    }
}
