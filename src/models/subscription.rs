use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Free,
    Paid,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }

    pub fn plan(&self) -> &'static Plan {
        match self {
            Self::Free => &PLANS[0],
            Self::Paid => &PLANS[1],
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for SubscriptionStatus {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "paid" | "pro" => Ok(Self::Paid),
            _ => Err(format!("invalid subscription status: {}", s)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Plan {
    pub status: SubscriptionStatus,
    pub name: &'static str,
    /// Monthly price in whole dollars.
    pub price: u32,
    pub features: &'static [&'static str],
    /// `None` means unlimited.
    pub page_limit: Option<u32>,
}

impl Plan {
    pub fn allows(&self, page_count: u32) -> bool {
        self.page_limit.map_or(true, |limit| page_count < limit)
    }
}

pub const FREE_PAGE_LIMIT: u32 = 10;

pub static PLANS: [Plan; 2] = [
    Plan {
        status: SubscriptionStatus::Free,
        name: "Free Plan",
        price: 0,
        features: &[
            "Up to 10 pages",
            "Basic text editor",
            "Image uploads",
            "Standard support",
        ],
        page_limit: Some(FREE_PAGE_LIMIT),
    },
    Plan {
        status: SubscriptionStatus::Paid,
        name: "Pro Plan",
        price: 2,
        features: &[
            "Unlimited pages",
            "Advanced text editor",
            "Priority image uploads",
            "Priority support",
        ],
        page_limit: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_caps_page_count() {
        let plan = SubscriptionStatus::Free.plan();
        assert!(plan.allows(9));
        assert!(!plan.allows(10));
    }

    #[test]
    fn paid_plan_is_unlimited() {
        assert!(SubscriptionStatus::Paid.plan().allows(10_000));
    }

    #[test]
    fn parses_legacy_pro_identifier() {
        assert_eq!("pro".parse::<SubscriptionStatus>(), Ok(SubscriptionStatus::Paid));
        assert!("gold".parse::<SubscriptionStatus>().is_err());
    }
}
