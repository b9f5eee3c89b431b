use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::account::{sign_up, FieldErrors, SignUpForm};
use crate::frontend::components::{Button, EmailInput, ErrorAlert, PasswordInput, TextInput};
use crate::frontend::AppContext;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let field_errors = RwSignal::new(FieldErrors::default());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading = RwSignal::new(false);

    let field = move |name: &'static str| {
        Signal::derive(move || field_errors.with(|e| e.get(name)))
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let form = SignUpForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let auth = ctx.auth();

        error.set(None);
        field_errors.set(FieldErrors::default());
        loading.set(true);

        spawn_local(async move {
            let result = sign_up(&auth, &form).await;
            loading.set(false);
            match result {
                Ok(target) => navigate.with_value(|nav| nav(&target, Default::default())),
                Err(e) => {
                    if let Some(errors) = e.field_errors() {
                        field_errors.set(errors.clone());
                    }
                    error.set(e.banner().map(str::to_string));
                }
            }
        });
    };

    view! {
        <div class="mx-auto w-full max-w-md rounded-sm border border-stroke bg-white p-8 shadow-default">
            <h2 class="mb-9 text-2xl font-bold text-black">"Sign Up to PageCraft Pro"</h2>

            {move || error.get().map(|message| view! { <ErrorAlert message=message /> })}

            <form on:submit=on_submit>
                <TextInput
                    label="Name"
                    name="username"
                    placeholder="Enter your full name"
                    value=username
                    error=field("username")
                />
                <EmailInput value=email error=field("email") />
                <PasswordInput
                    label="Password"
                    name="password"
                    value=password
                    error=field("password")
                />
                <PasswordInput
                    label="Re-type Password"
                    name="confirmPassword"
                    value=confirm_password
                    error=field("confirmPassword")
                />
                <Button button_type="submit" loading=loading loading_text="Creating account...">
                    "Create account"
                </Button>
            </form>

            <p class="mt-6 text-center">
                "Already have an account? "
                <a href="/signin" class="text-primary">"Sign in"</a>
            </p>
        </div>
    }
}
