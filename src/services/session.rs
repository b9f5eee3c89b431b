use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock, RwLock};

use crate::common::SessionError;
use crate::log_err;
use crate::models::User;
use crate::types::LoginResponse;

/// Authentication state shared by the whole dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Where the session survives restarts.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<Session>, SessionError>;
    fn save(&self, session: &Session) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Keeps the serialized session in memory. Used by tests and previews.
#[derive(Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: &Session) -> Result<Self, SessionError> {
        let storage = Self::new();
        storage.save(session)?;
        Ok(storage)
    }

    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        match self.raw() {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let raw = serde_json::to_string(session)?;
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

/// Browser `localStorage`, using the `token` and `user` keys.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    const TOKEN_KEY: &'static str = "token";
    const USER_KEY: &'static str = "user";

    fn storage() -> Result<web_sys::Storage, SessionError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| SessionError::Unavailable("localStorage".into()))
    }

    fn js_err(e: wasm_bindgen::JsValue) -> SessionError {
        SessionError::Unavailable(format!("{:?}", e))
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStorage for BrowserStorage {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let storage = Self::storage()?;
        let token = storage.get_item(Self::TOKEN_KEY).map_err(Self::js_err)?;
        let user = match storage.get_item(Self::USER_KEY).map_err(Self::js_err)? {
            Some(raw) => Some(serde_json::from_str(&raw)?),
            None => None,
        };

        if token.is_none() && user.is_none() {
            return Ok(None);
        }
        Ok(Some(Session { token, user }))
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let storage = Self::storage()?;
        match &session.token {
            Some(token) => storage.set_item(Self::TOKEN_KEY, token),
            None => storage.remove_item(Self::TOKEN_KEY),
        }
        .map_err(Self::js_err)?;
        match &session.user {
            Some(user) => storage.set_item(Self::USER_KEY, &serde_json::to_string(user)?),
            None => storage.remove_item(Self::USER_KEY),
        }
        .map_err(Self::js_err)
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.save(&Session::default())
    }
}

/// Process-wide session. Hydrated once from storage, written through on
/// every change, never torn down.
pub struct SessionService {
    storage: Box<dyn SessionStorage>,
    state: RwLock<Session>,
}

static INSTANCE: OnceLock<SessionService> = OnceLock::new();

impl SessionService {
    /// Unshared service with an empty session. `hydrate` loads the stored one.
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            state: RwLock::new(Session::default()),
        }
    }

    /// Initializes the process-wide instance. Later calls return the
    /// existing instance and drop `storage`.
    pub fn init(storage: impl SessionStorage + 'static) -> &'static SessionService {
        INSTANCE.get_or_init(|| {
            let service = Self::new(storage);
            if let Err(e) = service.hydrate() {
                log_err!(e, "discarding unreadable stored session");
            }
            service
        })
    }

    pub fn global() -> Option<&'static SessionService> {
        INSTANCE.get()
    }

    pub fn hydrate(&self) -> Result<(), SessionError> {
        let stored = self.storage.load()?.unwrap_or_default();
        *self.write() = stored;
        Ok(())
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn login(&self, response: LoginResponse) -> Result<(), SessionError> {
        tracing::info!(user_id = %response.user.id, "signed in");
        self.replace(Session {
            token: Some(response.token),
            user: Some(response.user),
        })
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        *self.write() = Session::default();
        self.storage.clear()
    }

    /// Applies `update` to the signed-in user. No-op when signed out.
    pub fn update_user<F>(&self, update: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut User),
    {
        let session = {
            let mut state = self.write();
            match state.user.as_mut() {
                Some(user) => update(user),
                None => return Ok(()),
            }
            state.clone()
        };
        self.storage.save(&session)
    }

    fn replace(&self, session: Session) -> Result<(), SessionError> {
        *self.write() = session.clone();
        self.storage.save(&session)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubscriptionStatus;

    fn login_response() -> LoginResponse {
        serde_json::from_str(
            r#"{"token": "t-1", "user": {"_id": "u1", "username": "ada", "email": "ada@example.com"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn starts_signed_out() {
        let service = SessionService::new(MemoryStorage::new());
        service.hydrate().unwrap();
        assert!(!service.is_authenticated());
        assert_eq!(service.current_user(), None);
    }

    #[test]
    fn login_writes_through_and_logout_clears() {
        let service = SessionService::new(MemoryStorage::new());
        service.login(login_response()).unwrap();

        assert!(service.is_authenticated());
        assert_eq!(service.token().as_deref(), Some("t-1"));
        assert_eq!(service.storage.load().unwrap(), Some(service.snapshot()));

        service.logout().unwrap();
        assert!(!service.is_authenticated());
        assert_eq!(service.storage.load().unwrap(), None);
    }

    #[test]
    fn update_user_persists_changes() {
        let service = SessionService::new(MemoryStorage::new());
        service.login(login_response()).unwrap();
        service
            .update_user(|u| u.subscription_status = SubscriptionStatus::Paid)
            .unwrap();

        let stored = service.storage.load().unwrap().unwrap();
        assert_eq!(
            stored.user.map(|u| u.subscription_status),
            Some(SubscriptionStatus::Paid)
        );
    }

    #[test]
    fn update_user_without_session_is_noop() {
        let storage = MemoryStorage::new();
        let service = SessionService::new(storage);
        service.update_user(|u| u.username = "x".into()).unwrap();
        assert_eq!(service.storage.load().unwrap(), None);
    }

    #[test]
    fn hydrates_from_storage() {
        let stored = Session {
            token: Some("abc".into()),
            user: Some(login_response().user),
        };
        let service = SessionService::new(MemoryStorage::with_session(&stored).unwrap());
        service.hydrate().unwrap();
        assert_eq!(service.snapshot(), stored);
        assert_eq!(service.snapshot().user_id(), Some("u1"));
    }
}
