use leptos::prelude::*;

/// Labelled input bound to `value`, with an optional field error below.
#[component]
pub fn TextInput(
    #[prop(into)] label: String,
    #[prop(into)] name: String,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] input_type: String,
    value: RwSignal<String>,
    #[prop(optional, into)] error: Signal<Option<&'static str>>,
) -> impl IntoView {
    let input_type = if input_type.is_empty() {
        "text".to_string()
    } else {
        input_type
    };

    view! {
        <div class="mb-4">
            <label for=name.clone() class="mb-2.5 block font-medium text-black dark:text-white">
                {label}
            </label>
            <input
                type=input_type
                id=name.clone()
                name=name
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class=move || {
                    let border = if error.get().is_some() { "border-red-500" } else { "border-stroke" };
                    format!("w-full rounded-lg border bg-transparent py-3 px-4 outline-none focus:border-primary {}", border)
                }
            />
            {move || error.get().map(|message| view! {
                <p class="mt-1 text-sm text-red-500">{message}</p>
            })}
        </div>
    }
}

#[component]
pub fn EmailInput(
    value: RwSignal<String>,
    #[prop(optional, into)] error: Signal<Option<&'static str>>,
) -> impl IntoView {
    view! {
        <TextInput
            label="Email"
            name="email"
            placeholder="Enter your email"
            input_type="email"
            value=value
            error=error
        />
    }
}

#[component]
pub fn PasswordInput(
    #[prop(into)] label: String,
    #[prop(into)] name: String,
    value: RwSignal<String>,
    #[prop(optional, into)] error: Signal<Option<&'static str>>,
) -> impl IntoView {
    view! {
        <TextInput
            label=label
            name=name
            placeholder="••••••"
            input_type="password"
            value=value
            error=error
        />
    }
}
