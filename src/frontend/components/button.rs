use leptos::prelude::*;

#[derive(Clone, Copy, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Success,
    Danger,
    Ghost,
}

impl ButtonVariant {
    fn classes(&self) -> &'static str {
        match self {
            Self::Primary => "bg-primary text-white hover:bg-opacity-90",
            Self::Success => "bg-success text-white hover:bg-opacity-90",
            Self::Danger => "bg-danger text-white hover:bg-opacity-90",
            Self::Ghost => "border border-stroke text-body hover:bg-gray-2",
        }
    }
}

/// Action button. `loading` disables it and swaps the label.
#[component]
pub fn Button(
    children: Children,
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional, into)] loading: Signal<bool>,
    #[prop(optional, into)] loading_text: String,
    #[prop(optional, into)] button_type: String,
    #[prop(optional)] on_click: Option<Callback<()>>,
) -> impl IntoView {
    let classes = format!(
        "flex justify-center rounded px-6 py-2 font-medium disabled:cursor-not-allowed disabled:bg-opacity-50 {}",
        variant.classes()
    );

    let loading_text = if loading_text.is_empty() {
        "Loading...".to_string()
    } else {
        loading_text
    };

    let button_type = if button_type.is_empty() {
        "button".to_string()
    } else {
        button_type
    };

    let label = children();

    view! {
        <button
            type=button_type
            class=classes
            disabled=move || disabled.get() || loading.get()
            on:click=move |_| {
                if let Some(cb) = on_click {
                    cb.run(());
                }
            }
        >
            <span class:hidden=move || loading.get()>{label}</span>
            <span class:hidden=move || !loading.get()>{loading_text}</span>
        </button>
    }
}
