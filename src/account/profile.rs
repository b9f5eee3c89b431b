use chrono::{DateTime, Utc};

use crate::models::{Role, User};

/// "admin" -> "Admin", "super_admin" -> "Super_admin".
pub fn role_label(role: Role) -> String {
    let raw = role.as_str();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn join_date(created_at: Option<DateTime<Utc>>) -> Option<String> {
    created_at.map(|at| at.format("%b %d, %Y").to_string())
}

/// Display fields of the profile card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub username: String,
    pub email: String,
    pub role: String,
    pub plan: &'static str,
    pub joined: Option<String>,
}

impl ProfileCard {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.display_name().to_string(),
            email: user.email.clone(),
            role: role_label(user.role),
            plan: user.subscription_status.plan().name,
            joined: join_date(user.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn capitalizes_role() {
        assert_eq!(role_label(Role::Admin), "Admin");
        assert_eq!(role_label(Role::SuperAdmin), "Super_admin");
    }

    #[test]
    fn formats_join_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(join_date(Some(at)).as_deref(), Some("Mar 05, 2024"));
        assert_eq!(join_date(None), None);
    }
}
