use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::SubscriptionStatus;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(format!("invalid role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
    #[serde(default)]
    pub subscription_expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub is_banned: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Name shown in headers and listings.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

// Some user endpoints return numeric ids.
fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_numeric_and_object_ids() {
        let numeric: User =
            serde_json::from_str(r#"{"id": 42, "email": "a@b.io", "role": "admin"}"#).unwrap();
        assert_eq!(numeric.id, "42");
        assert!(numeric.is_admin());

        let object: User = serde_json::from_str(
            r#"{"_id": "65f0", "username": "ada", "email": "a@b.io", "subscriptionStatus": "paid"}"#,
        )
        .unwrap();
        assert_eq!(object.id, "65f0");
        assert_eq!(object.subscription_status, SubscriptionStatus::Paid);
        assert_eq!(object.role, Role::User);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user: User = serde_json::from_str(r#"{"id": "1", "email": "a@b.io"}"#).unwrap();
        assert_eq!(user.display_name(), "a@b.io");
    }
}
