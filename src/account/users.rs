use std::rc::Rc;

use crate::api::UserService;
use crate::log_err;
use crate::models::{Role, User};

pub const LOAD_USERS_MESSAGE: &str = "Failed to load users";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(role) => role.as_str(),
        }
    }

    pub fn matches(&self, role: Role) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == role,
        }
    }
}

impl std::str::FromStr for RoleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            other => other.parse::<Role>().map(Self::Only),
        }
    }
}

/// Admin listing of all accounts.
///
/// Role and ban toggles change only the local listing; there is no
/// endpoint persisting them.
pub struct UserDirectory {
    service: Rc<dyn UserService>,
    users: Vec<User>,
    search: String,
    filter: RoleFilter,
    loading: bool,
    error: Option<String>,
}

impl UserDirectory {
    pub fn new(service: Rc<dyn UserService>) -> Self {
        Self {
            service,
            users: Vec::new(),
            search: String::new(),
            filter: RoleFilter::All,
            loading: true,
            error: None,
        }
    }

    pub fn service(&self) -> Rc<dyn UserService> {
        Rc::clone(&self.service)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn set_filter(&mut self, filter: RoleFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> RoleFilter {
        self.filter
    }

    /// Users matching the role filter whose username or email contains the
    /// search term, ignoring case.
    pub fn visible(&self) -> Vec<&User> {
        let term = self.search.trim().to_lowercase();
        self.users
            .iter()
            .filter(|u| self.filter.matches(u.role))
            .filter(|u| {
                term.is_empty()
                    || u.username.to_lowercase().contains(&term)
                    || u.email.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn finish_load(&mut self, result: Result<Vec<User>, String>) {
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let result = self.service.list().await.map_err(|e| {
            log_err!(e, "failed to fetch users");
            LOAD_USERS_MESSAGE.to_string()
        });
        self.finish_load(result);
    }

    /// Flips `user` <-> `admin`. Super admins are left alone.
    pub fn toggle_role(&mut self, user_id: &str) {
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.role = match user.role {
                Role::User => Role::Admin,
                Role::Admin => Role::User,
                Role::SuperAdmin => Role::SuperAdmin,
            };
        }
    }

    pub fn toggle_ban(&mut self, user_id: &str) {
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.is_banned = !user.is_banned;
        }
    }
}
