use leptos::prelude::*;

#[derive(Clone, Copy, Default, PartialEq)]
pub enum AlertVariant {
    #[default]
    Success,
    Error,
    Info,
}

impl AlertVariant {
    fn classes(&self) -> &'static str {
        match self {
            Self::Success => "border-success/30 bg-success/10 text-success",
            Self::Error => "border-danger/30 bg-danger/10 text-danger",
            Self::Info => "border-stroke bg-gray-2 text-body",
        }
    }
}

#[component]
pub fn Alert(
    #[prop(into)] message: String,
    #[prop(optional)] variant: AlertVariant,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div role="alert" class=format!("mb-4 rounded border px-4 py-3 text-sm {}", variant.classes())>
            <p>{message}</p>
            {children.map(|c| view! { <div class="mt-3">{c()}</div> })}
        </div>
    }
}

#[component]
pub fn ErrorAlert(
    #[prop(into)] message: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <Alert message=message variant=AlertVariant::Error>
            {children.map(|c| c())}
        </Alert>
    }
}

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex h-64 items-center justify-center">
            <div class="h-8 w-8 animate-spin rounded-full border-b-2 border-primary"></div>
        </div>
    }
}
