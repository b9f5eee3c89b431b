//! Route table and the access decision made before any view renders.

use leptos_router::params::ParamsMap;
use leptos_router::{path, ParamSegment, PartialPathMatch, PossibleRouteMatch, StaticSegment};

use crate::services::Session;

pub const SIGN_IN_PATH: &str = "/signin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only for visitors; signed-in users are sent to their pages.
    AuthPage,
    /// Only for signed-in users.
    Protected,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    SignIn,
    AdminSignIn,
    SignUp,
    Pages,
    Users,
    Profile,
    PageBuilder,
    Subscription,
}

type Fixed = (StaticSegment<&'static str>,);

pub const HOME: () = path!("/");
pub const SIGN_IN: Fixed = path!("/signin");
pub const ADMIN_SIGN_IN: Fixed = path!("/admin");
pub const SIGN_UP: Fixed = path!("/signup");
pub const PAGES: (StaticSegment<&'static str>, ParamSegment) = path!("/pages/:userId");
pub const USERS: Fixed = path!("/users");
pub const PROFILE: Fixed = path!("/profile");
pub const PAGE_BUILDER: (StaticSegment<&'static str>, ParamSegment, ParamSegment) =
    path!("/page-builder/:userId/:id");
pub const SUBSCRIPTION: Fixed = path!("/subscription");

pub type Matcher = for<'a> fn(&'a str) -> Option<PartialPathMatch<'a>>;

#[derive(Clone, Copy)]
pub struct RouteDef {
    /// Segments of the entry, the same ones the router mounts.
    pub matcher: Matcher,
    pub access: Access,
    pub view: View,
    pub title: &'static str,
}

pub static ROUTES: &[RouteDef] = &[
    RouteDef {
        matcher: |path| HOME.test(path),
        access: Access::AuthPage,
        view: View::SignIn,
        title: "Sign In | PageCraft Pro",
    },
    RouteDef {
        matcher: |path| SIGN_IN.test(path),
        access: Access::AuthPage,
        view: View::SignIn,
        title: "Sign In | PageCraft Pro",
    },
    RouteDef {
        matcher: |path| ADMIN_SIGN_IN.test(path),
        access: Access::AuthPage,
        view: View::AdminSignIn,
        title: "Admin Sign In | PageCraft Pro",
    },
    RouteDef {
        matcher: |path| SIGN_UP.test(path),
        access: Access::AuthPage,
        view: View::SignUp,
        title: "Sign Up | PageCraft Pro",
    },
    RouteDef {
        matcher: |path| PAGES.test(path),
        access: Access::Protected,
        view: View::Pages,
        title: "Pages | PageCraft Pro",
    },
    RouteDef {
        matcher: |path| USERS.test(path),
        access: Access::Protected,
        view: View::Users,
        title: "Users | PageCraft Pro",
    },
    RouteDef {
        matcher: |path| PROFILE.test(path),
        access: Access::Protected,
        view: View::Profile,
        title: "Profile | PageCraft Pro",
    },
    RouteDef {
        matcher: |path| PAGE_BUILDER.test(path),
        access: Access::Protected,
        view: View::PageBuilder,
        title: "Page Builder | PageCraft Pro",
    },
    RouteDef {
        matcher: |path| SUBSCRIPTION.test(path),
        access: Access::Protected,
        view: View::Subscription,
        title: "Subscription | PageCraft Pro",
    },
];

pub const NOT_FOUND_TITLE: &str = "Page Not Found | PageCraft Pro";

/// Finds the entry whose segments consume all of `path`.
pub fn find_route(path: &str) -> Option<(&'static RouteDef, ParamsMap)> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    ROUTES.iter().find_map(|route| {
        let matched = (route.matcher)(path).filter(PartialPathMatch::is_complete)?;
        Some((route, matched.params().into_iter().collect()))
    })
}

/// First entry rendering `view`.
pub fn route_for(view: View) -> Option<&'static RouteDef> {
    ROUTES.iter().find(|route| route.view == view)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Render {
        view: View,
        params: ParamsMap,
        title: &'static str,
    },
    Redirect(String),
    NotFound,
}

/// Where a session must be sent instead of a page with `access`, if
/// anywhere.
pub fn redirect_for(access: Access, session: &Session) -> Option<String> {
    match access {
        Access::AuthPage if session.is_authenticated() => {
            session.user_id().map(|user_id| format!("/pages/{}", user_id))
        }
        Access::Protected if !session.is_authenticated() => Some(SIGN_IN_PATH.to_string()),
        _ => None,
    }
}

/// Decides what `path` shows for `session`.
pub fn decide(path: &str, session: &Session) -> Decision {
    let Some((route, params)) = find_route(path) else {
        return Decision::NotFound;
    };

    match redirect_for(route.access, session) {
        Some(to) => Decision::Redirect(to),
        None => Decision::Render {
            view: route.view,
            params,
            title: route.title,
        },
    }
}
