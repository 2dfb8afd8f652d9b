use chrono::{DateTime, Datelike, Utc};

use crate::models::{CustomerInput, PaymentInput};

// ============================================================================
// Validation Layer
// ============================================================================
//
// Pure shape/format checks over raw checkout input. Every rule runs; all
// failures are collected in field order rather than short-circuiting, so the
// caller gets one message per failing field. Nothing here touches a
// collaborator, and the clock is an explicit parameter.
//
// ============================================================================

/// Validate raw customer fields and, when supplied, payment fields.
///
/// Returns the full list of human-readable errors in the order the fields
/// were checked: name, email, phone, address, city, state, zip, then card
/// number, expiry, and CVV. An empty list means the input is valid.
pub fn validate_checkout(
    customer: &CustomerInput,
    payment: Option<&PaymentInput>,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut errors = Vec::new();

    if customer.full_name.trim().is_empty() {
        errors.push("Full name is required".to_string());
    }
    if !is_valid_email(&customer.email) {
        errors.push("Valid email is required".to_string());
    }
    if !is_valid_phone(&customer.phone) {
        errors.push("Valid phone number is required".to_string());
    }
    if customer.address.trim().is_empty() {
        errors.push("Address is required".to_string());
    }
    if customer.city.trim().is_empty() {
        errors.push("City is required".to_string());
    }
    if customer.state.trim().is_empty() {
        errors.push("State is required".to_string());
    }
    if customer.zip_code.trim().is_empty() {
        errors.push("Zip code is required".to_string());
    }

    if let Some(payment) = payment {
        if !is_valid_card_number(&payment.card_number) {
            errors.push("Valid 16-digit card number is required".to_string());
        }
        if !is_valid_expiry(&payment.expiry, now) {
            errors.push("Valid future expiry date is required (MM/YY)".to_string());
        }
        if !is_valid_cvv(&payment.cvv) {
            errors.push("Valid 3-digit CVV is required".to_string());
        }
    }

    errors
}

/// Basic `local@domain.tld` shape: exactly one "@" boundary, at least one
/// "." in the domain part, no whitespace anywhere.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

/// Optional leading "+", then at least 10 characters drawn from digits,
/// whitespace, hyphens, and parentheses.
fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    digits.chars().count() >= 10
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '-' || c == '(' || c == ')')
}

/// Exactly 16 digits once whitespace is stripped.
fn is_valid_card_number(card_number: &str) -> bool {
    let cleaned: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned.chars().count() == 16 && cleaned.chars().all(|c| c.is_ascii_digit())
}

/// `MM/YY` with a real month, and the (year, month) pair must not lie
/// strictly before the current two-digit year and month.
fn is_valid_expiry(expiry: &str, now: DateTime<Utc>) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    let (Ok(month), Ok(year)) = (month.trim().parse::<u32>(), year.trim().parse::<u32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }

    let current_year = now.year() as u32 % 100;
    let current_month = now.month();
    (year, month) >= (current_year, current_month)
}

/// Exactly 3 digits.
fn is_valid_cvv(cvv: &str) -> bool {
    cvv.len() == 3 && cvv.chars().all(|c| c.is_ascii_digit())
}

// ============================================================================
// Unit Tests
// ============================================================================
