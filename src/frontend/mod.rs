//! Browser dashboard. Views stay thin: state and decisions live in the
//! `builder`, `account` and `routes` modules; components hold them in
//! local signals and drive their async steps with `spawn_local`.

pub mod components;
pub mod pages;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::hooks::use_params_map;
use leptos_router::params::ParamsMap;

use crate::api::{
    ApiClient, AuthApi, HttpPageStore, PageStore, SubscriptionApi, UsersApi,
};
use crate::config::{normalize_base_url, DEFAULT_API_URL};
use crate::log_err;
use crate::routes::{
    redirect_for, route_for, View, ADMIN_SIGN_IN, HOME, NOT_FOUND_TITLE, PAGES, PAGE_BUILDER,
    PROFILE, SIGN_IN, SIGN_UP, SUBSCRIPTION, USERS,
};
use crate::services::{Session, SessionService, SessionStorage};

use components::{ErrorAlert, Header};
use pages::{
    NotFound, PageBuilderPage, PagesPage, ProfilePage, SignInPage, SignUpPage,
    SubscriptionPage, UsersPage,
};

/// Meta tag the HTML shell uses to pass the API base URL.
pub const API_URL_META: &str = "pagecraft-api-url";

/// Collaborators shared by every view.
#[derive(Clone)]
pub struct AppContext {
    pub client: ApiClient,
    pub session: &'static SessionService,
    /// Reactive copy of the session, refreshed after every change.
    pub current: RwSignal<Session>,
}

impl AppContext {
    pub fn page_store(&self) -> Rc<dyn PageStore> {
        Rc::new(HttpPageStore::new(self.client.clone()))
    }

    pub fn subscriptions(&self) -> Rc<SubscriptionApi> {
        Rc::new(SubscriptionApi::new(self.client.clone()))
    }

    pub fn users(&self) -> Rc<UsersApi> {
        Rc::new(UsersApi::new(self.client.clone()))
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.client.clone())
    }

    pub fn refresh_session(&self) {
        self.current.set(self.session.snapshot());
    }
}

fn api_base_url() -> String {
    let selector = format!("meta[name=\"{}\"]", API_URL_META);
    document()
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
        .and_then(|raw| normalize_base_url(&raw))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

#[cfg(target_arch = "wasm32")]
fn session_storage() -> impl SessionStorage {
    crate::services::BrowserStorage
}

#[cfg(not(target_arch = "wasm32"))]
fn session_storage() -> impl SessionStorage {
    crate::services::MemoryStorage::new()
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionService::init(session_storage());
    let client = match ApiClient::new(&api_base_url()) {
        Ok(client) => client.with_session(session),
        Err(e) => {
            log_err!(e, "cannot reach the API");
            return view! { <ErrorAlert message="The dashboard is misconfigured." /> }.into_any();
        }
    };

    provide_context(AppContext {
        client,
        session,
        current: RwSignal::new(session.snapshot()),
    });

    view! {
        <Title text="PageCraft Pro" />
        <Router>
            <Header />
            <main class="mx-auto max-w-screen-xl p-4 md:p-6">
                <Routes fallback=|| view! {
                    <Title text=NOT_FOUND_TITLE />
                    <NotFound />
                }>
                    <Route path=HOME view=|| view! { <Guarded view=View::SignIn /> } />
                    <Route path=SIGN_IN view=|| view! { <Guarded view=View::SignIn /> } />
                    <Route path=ADMIN_SIGN_IN view=|| view! { <Guarded view=View::AdminSignIn /> } />
                    <Route path=SIGN_UP view=|| view! { <Guarded view=View::SignUp /> } />
                    <Route path=PAGES view=|| view! { <Guarded view=View::Pages /> } />
                    <Route path=USERS view=|| view! { <Guarded view=View::Users /> } />
                    <Route path=PROFILE view=|| view! { <Guarded view=View::Profile /> } />
                    <Route path=PAGE_BUILDER view=|| view! { <Guarded view=View::PageBuilder /> } />
                    <Route path=SUBSCRIPTION view=|| view! { <Guarded view=View::Subscription /> } />
                </Routes>
            </main>
        </Router>
    }
    .into_any()
}

/// Applies the entry's access rule for `view`, then renders it with the
/// matched params.
#[component]
fn Guarded(view: View) -> impl IntoView {
    let current = expect_context::<AppContext>().current;
    let params = use_params_map();
    let Some(route) = route_for(view) else {
        return view! { <NotFound /> }.into_any();
    };
    let redirect = Memo::new(move |_| redirect_for(route.access, &current.get()));

    (move || match redirect.get() {
        Some(to) => view! { <Redirect path=to /> }.into_any(),
        None => view! {
            <Title text=route.title />
            {render(view, &params.get())}
        }
        .into_any(),
    })
    .into_any()
}

fn render(view: View, params: &ParamsMap) -> AnyView {
    let param = |name: &str| params.get(name).unwrap_or_default();

    match view {
        View::SignIn => view! { <SignInPage admin=false /> }.into_any(),
        View::AdminSignIn => view! { <SignInPage admin=true /> }.into_any(),
        View::SignUp => view! { <SignUpPage /> }.into_any(),
        View::Pages => view! { <PagesPage owner_id=param("userId") /> }.into_any(),
        View::Users => view! { <UsersPage /> }.into_any(),
        View::Profile => view! { <ProfilePage /> }.into_any(),
        View::PageBuilder => {
            view! { <PageBuilderPage owner_id=param("userId") page_id=param("id") /> }.into_any()
        }
        View::Subscription => view! { <SubscriptionPage /> }.into_any(),
    }
}
