use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Simulated payment outcome, fixed at order creation.
///
/// Three distinct values on purpose: a declined card and a gateway error are
/// different things even though neither ships a product. Unknown or missing
/// transaction codes land in `Error` rather than being folded into
/// `Declined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Approved,
    Declined,
    Error,
}

impl OrderStatus {
    /// Map the caller-supplied transaction type code to an outcome:
    /// "1" approves, "2" declines, anything else (including "3" and a
    /// missing code) is a gateway error.
    pub fn from_transaction_type(code: Option<&str>) -> Self {
        match code {
            Some("1") => Self::Approved,
            Some("2") => Self::Declined,
            _ => Self::Error,
        }
    }

    pub fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Canonical string form, used for storage and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Declined => "DECLINED",
            Self::Error => "ERROR",
        }
    }

    /// Inverse of [`as_str`](Self::as_str) for decoding stored rows.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "APPROVED" => Some(Self::Approved),
            "DECLINED" => Some(Self::Declined),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate a fresh order number: a random UUIDv4 token, collision-resistant
/// and unguessable, never sequential.
pub fn new_order_number() -> String {
    Uuid::new_v4().to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
