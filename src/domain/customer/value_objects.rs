use serde::{Deserialize, Serialize};

use crate::models::CustomerInput;

// ============================================================================
// Customer Value Objects
// ============================================================================

/// Customer email address, stored trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Normalize a raw address: whitespace trimmed, lower-cased.
    pub fn normalized(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Customer phone number, stored trimmed. Format checks live in the
/// validation layer; by the time one of these exists the input has passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn normalized(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The full normalized snapshot the store persists for an order.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetails {
    pub full_name: String,
    pub email: Email,
    pub phone: PhoneNumber,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl CustomerDetails {
    /// Build the snapshot from validated raw input: every field trimmed,
    /// email lower-cased.
    pub fn from_raw(input: &CustomerInput) -> Self {
        Self {
            full_name: input.full_name.trim().to_string(),
            email: Email::normalized(&input.email),
            phone: PhoneNumber::normalized(&input.phone),
            address: input.address.trim().to_string(),
            city: input.city.trim().to_string(),
            state: input.state.trim().to_string(),
            zip_code: input.zip_code.trim().to_string(),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
