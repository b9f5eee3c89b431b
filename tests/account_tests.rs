mod common;

#[cfg(test)]
pub mod account_tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::common::*;

    use pagecraft::account::*;
    use pagecraft::models::*;
    use pagecraft::services::{MemoryStorage, SessionService};

    fn signed_in_session(user: User) -> SessionService {
        let session = SessionService::new(MemoryStorage::new());
        session.login(get_login_response(user)).unwrap();
        session
    }

    #[tokio::test]
    async fn test_sign_in_stores_session_and_targets_pages() {
        let user = get_seed_user("u1", Role::User);
        let auth = MockAuth::new(user.clone(), "secret1");
        let session = SessionService::new(MemoryStorage::new());
        let form = SignInForm {
            email: user.email.clone(),
            password: "secret1".to_string(),
        };

        let target = sign_in(&auth, &session, &form).await.unwrap();

        assert_eq!(target, "/pages/u1");
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("token-abc"));
        assert_eq!(session.current_user(), Some(user));
    }

    #[tokio::test]
    async fn test_sign_in_with_invalid_form_skips_the_server() {
        let auth = MockAuth::new(get_seed_user("u1", Role::User), "secret1");
        let session = SessionService::new(MemoryStorage::new());
        let form = SignInForm {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
        };

        let err = sign_in(&auth, &session, &form).await.unwrap_err();

        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("email"), Some("Please enter a valid email address"));
        assert_eq!(
            fields.get("password"),
            Some("Password must be at least 6 characters long")
        );
        assert_eq!(auth.login_calls.get(), 0);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_sign_in_rejection_shows_server_message() {
        let auth = MockAuth::new(get_seed_user("u1", Role::User), "secret1");
        let session = SessionService::new(MemoryStorage::new());
        let form = SignInForm {
            email: "u1@test.com".to_string(),
            password: "wrong-pass".to_string(),
        };

        let err = sign_in(&auth, &session, &form).await.unwrap_err();

        assert_eq!(err.banner(), Some("Invalid credentials"));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_sign_up_registers_without_signing_in() {
        let auth = MockAuth::new(get_seed_user("u1", Role::User), "secret1");
        let form = SignUpForm {
            username: "Newbie".to_string(),
            email: "new@test.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };

        let target = sign_up(&auth, &form).await.unwrap();

        assert_eq!(target, "/signin");
        let registered = auth.registered.borrow();
        assert_eq!(registered.len(), 1);
        assert_eq!(registered[0].username, "Newbie");
        assert_eq!(auth.login_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_sign_up_mismatched_confirmation() {
        let auth = MockAuth::new(get_seed_user("u1", Role::User), "secret1");
        let form = SignUpForm {
            username: "Newbie".to_string(),
            email: "new@test.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
        };

        let err = sign_up(&auth, &form).await.unwrap_err();

        assert_eq!(
            err.field_errors().and_then(|f| f.get("confirmPassword")),
            Some("Passwords do not match")
        );
        assert!(auth.registered.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email_is_rejected() {
        let auth = MockAuth::new(get_seed_user("u1", Role::User), "secret1");
        let form = SignUpForm {
            username: "Again".to_string(),
            email: "u1@test.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };

        let err = sign_up(&auth, &form).await.unwrap_err();

        assert_eq!(err.banner(), Some("Email already registered"));
    }

    #[tokio::test]
    async fn test_upgrade_syncs_session_user() {
        let user = get_seed_user("u1", Role::User);
        let session = signed_in_session(user.clone());
        let service = Rc::new(MockSubscriptions::new(user));
        let mut controller = SubscriptionController::new(service.clone());

        assert_eq!(controller.load("u1").await, Ok(SubscriptionStatus::Free));
        assert!(controller.is_current(SubscriptionStatus::Free.plan()));

        let upgraded = controller
            .upgrade(&session, "u1", SubscriptionStatus::Paid)
            .await;

        assert_eq!(upgraded, Ok(SubscriptionStatus::Paid));
        assert!(controller.is_current(SubscriptionStatus::Paid.plan()));
        assert!(!controller.is_busy());
        let stored = session.current_user().unwrap();
        assert_eq!(stored.subscription_status, SubscriptionStatus::Paid);
        assert!(stored.subscription_expiry.is_some());
    }

    #[tokio::test]
    async fn test_failed_upgrade_leaves_session_alone() {
        let user = get_seed_user("u1", Role::User);
        let session = signed_in_session(user.clone());
        let service = Rc::new(MockSubscriptions::new(user));
        service.fail_update.set(true);
        let mut controller = SubscriptionController::new(service.clone());

        let result = controller
            .upgrade(&session, "u1", SubscriptionStatus::Paid)
            .await;

        assert_eq!(result, Err(UPGRADE_FAILED_MESSAGE));
        assert_eq!(
            session.current_user().map(|u| u.subscription_status),
            Some(SubscriptionStatus::Free)
        );
    }

    #[test]
    fn test_sync_session_ignores_other_accounts() {
        let session = signed_in_session(get_seed_user("u1", Role::User));
        let mut other = get_seed_user("u2", Role::User);
        other.subscription_status = SubscriptionStatus::Paid;

        sync_session(&session, &other);

        assert_eq!(
            session.current_user().map(|u| u.subscription_status),
            Some(SubscriptionStatus::Free)
        );
    }

    #[tokio::test]
    async fn test_directory_filters_and_toggles() {
        let mut alice = get_seed_user("u1", Role::User);
        alice.username = "Alice".to_string();
        let mut bob = get_seed_user("u2", Role::Admin);
        bob.username = "Bob".to_string();
        let mut root = get_seed_user("u3", Role::SuperAdmin);
        root.username = "Root".to_string();
        let service = Rc::new(MockUsers {
            users: vec![alice, bob, root],
            ..MockUsers::default()
        });

        let mut directory = UserDirectory::new(service.clone());
        directory.load().await;
        assert!(!directory.is_loading());
        assert_eq!(directory.visible().len(), 3);

        directory.set_search("ALI");
        let names: Vec<&str> = directory.visible().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["Alice"]);

        directory.set_search("");
        directory.set_filter("admin".parse().unwrap());
        let names: Vec<&str> = directory.visible().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["Bob"]);

        directory.toggle_role("u1");
        directory.toggle_role("u3");
        directory.toggle_ban("u2");
        let names: Vec<&str> = directory.visible().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert!(directory.users()[1].is_banned);
        assert_eq!(directory.users()[2].role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn test_directory_load_failure() {
        let service = Rc::new(MockUsers::default());
        service.fail.set(true);
        let mut directory = UserDirectory::new(service.clone());

        directory.load().await;

        assert_eq!(directory.error(), Some(LOAD_USERS_MESSAGE));
        assert!(directory.users().is_empty());
    }

    #[test]
    fn test_profile_card_shows_plan_and_join_date() {
        let mut user = get_seed_user("u1", Role::Admin);
        user.subscription_status = SubscriptionStatus::Paid;

        let card = ProfileCard::from_user(&user);

        assert_eq!(card.username, "u1-name");
        assert_eq!(card.role, "Admin");
        assert_eq!(card.plan, "Pro Plan");
        assert_eq!(card.joined.as_deref(), Some("Jan 15, 2024"));
    }
}
