mod common;

#[cfg(test)]
pub mod routes_tests {
    use pretty_assertions::assert_eq;

    use super::common::*;

    use pagecraft::models::Role;
    use pagecraft::routes::*;
    use pagecraft::services::Session;

    fn signed_in(role: Role) -> Session {
        Session {
            token: Some("token-abc".to_string()),
            user: Some(get_seed_user("u1", role)),
        }
    }

    #[test]
    fn test_protected_routes_redirect_visitors_to_sign_in() {
        for path in ["/pages/u1", "/users", "/profile", "/page-builder/u1/new", "/subscription"] {
            assert_eq!(
                decide(path, &Session::default()),
                Decision::Redirect("/signin".to_string()),
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_auth_pages_redirect_signed_in_users() {
        let session = signed_in(Role::User);
        for path in ["/", "/signin", "/admin", "/signup"] {
            assert_eq!(
                decide(path, &session),
                Decision::Redirect("/pages/u1".to_string()),
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_visitors_see_auth_pages() {
        match decide("/admin", &Session::default()) {
            Decision::Render { view, title, .. } => {
                assert_eq!(view, View::AdminSignIn);
                assert_eq!(title, "Admin Sign In | PageCraft Pro");
            }
            other => panic!("unexpected decision {:?}", other),
        }
    }

    #[test]
    fn test_builder_route_carries_params() {
        match decide("/page-builder/u9/p3", &signed_in(Role::Admin)) {
            Decision::Render { view, params, title } => {
                assert_eq!(view, View::PageBuilder);
                assert_eq!(params.get_str("userId"), Some("u9"));
                assert_eq!(params.get_str("id"), Some("p3"));
                assert_eq!(title, "Page Builder | PageCraft Pro");
            }
            other => panic!("unexpected decision {:?}", other),
        }
    }

    #[test]
    fn test_unknown_paths_are_not_found_for_everyone() {
        assert_eq!(decide("/pages", &Session::default()), Decision::NotFound);
        assert_eq!(decide("/settings", &signed_in(Role::User)), Decision::NotFound);
    }

    #[test]
    fn test_every_route_has_a_titled_entry() {
        assert_eq!(ROUTES.len(), 9);
        assert!(ROUTES.iter().all(|r| r.title.ends_with("| PageCraft Pro")));
    }

    #[test]
    fn test_access_rule_is_shared_by_every_entry() {
        assert_eq!(
            redirect_for(Access::Protected, &Session::default()),
            Some("/signin".to_string())
        );
        assert_eq!(
            redirect_for(Access::AuthPage, &signed_in(Role::User)),
            Some("/pages/u1".to_string())
        );
        assert_eq!(redirect_for(Access::Public, &Session::default()), None);
        assert_eq!(redirect_for(Access::Protected, &signed_in(Role::User)), None);

        for route in ROUTES {
            assert_eq!(route_for(route.view).map(|r| r.access), Some(route.access));
        }
    }

    #[test]
    fn test_trailing_slash_and_query_still_match() {
        match decide("/pages/u4/?sort=asc", &signed_in(Role::User)) {
            Decision::Render { view, params, .. } => {
                assert_eq!(view, View::Pages);
                assert_eq!(params.get_str("userId"), Some("u4"));
            }
            other => panic!("unexpected decision {:?}", other),
        }
        assert_eq!(
            decide("/page-builder/u1", &signed_in(Role::User)),
            Decision::NotFound
        );
    }
}
