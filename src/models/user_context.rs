use serde::{Deserialize, Serialize};

/// Billing plan attached to the caller's organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Subscription {
    Pending,
    OneTime,
    MonthlySmall,
    MonthlyMedium,
    Enterprise,
    System,
    Other(i32),
}

impl Subscription {
    pub fn id(&self) -> i32 {
        match self {
            Self::Pending => 1,
            Self::OneTime => 10,
            Self::MonthlySmall => 101,
            Self::MonthlyMedium => 102,
            Self::Enterprise => 1000,
            Self::System => 9999,
            Self::Other(id) => *id,
        }
    }
}

impl From<i32> for Subscription {
    fn from(id: i32) -> Self {
        match id {
            1 => Self::Pending,
            10 => Self::OneTime,
            101 => Self::MonthlySmall,
            102 => Self::MonthlyMedium,
            1000 => Self::Enterprise,
            9999 => Self::System,
            other => Self::Other(other),
        }
    }
}

impl From<Subscription> for i32 {
    fn from(s: Subscription) -> Self {
        s.id()
    }
}

/// Organization status ids that lock the account out of mutating calls.
pub const ORG_STATUS_DISABLED_PENDING_PAYMENT: i32 = 1;
pub const ORG_STATUS_DISABLED_CLOSED: i32 = 2;
pub const ORG_STATUS_DISABLED_LOCKED: i32 = 3;
pub const ORG_STATUS_ACTIVE: i32 = 1000;

/// Identity of the caller as established by the upstream authorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub trace_id: String,
    pub org_id: i32,
    pub org_cid: String,
    pub user_id: i32,
    pub user_cid: String,
    pub roles: Vec<String>,
    pub ip_address: String,
    pub subscription: Subscription,
    pub org_status_id: i32,
}

impl UserContext {
    pub fn account_disabled(&self) -> bool {
        matches!(
            self.org_status_id,
            ORG_STATUS_DISABLED_PENDING_PAYMENT | ORG_STATUS_DISABLED_CLOSED | ORG_STATUS_DISABLED_LOCKED
        )
    }
}
