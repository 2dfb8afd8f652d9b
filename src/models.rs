use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::order::value_objects::OrderStatus;

// ============================================================================
// Domain Models
// ============================================================================

/// Catalog item. Inventory is only ever mutated by successful fulfillment
/// and can never go negative.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub inventory: i32,
    pub variants: Vec<String>,
}

/// Snapshot of buyer-supplied contact details, captured once per order
/// submission and immutable afterwards. There is deliberately no uniqueness
/// constraint: a repeat buyer gets a fresh row every time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub created_at: DateTime<Utc>,
}

/// The transactional record. Status is fixed at creation time; this system
/// has no post-creation transitions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub product_id: i32,
    pub variant: String,
    pub quantity: i32,
    pub customer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Fields of an Order that the workflow decides; the store fills in
/// identity and timestamp on insert.
#[derive(Clone, Debug)]
pub struct NewOrder {
    pub order_number: String,
    pub status: OrderStatus,
    pub product_id: i32,
    pub variant: String,
    pub quantity: i32,
    pub customer_id: Uuid,
}

/// Composed read model for order confirmation: the order itself with its
/// owned customer snapshot and the referenced product embedded.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub customer: Customer,
    pub product: Product,
}

// ============================================================================
// Wire DTOs
// ============================================================================

/// Raw customer fields as submitted by the client. Normalization happens in
/// the domain layer, validation in `domain::validation`.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Simulated payment fields. Optional on the wire; when present, all three
/// fields are validated.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

/// Body of `POST /orders`.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    pub customer_data: CustomerInput,
    pub product_id: i32,
    pub variant: String,
    pub quantity: i32,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub payment_data: Option<PaymentInput>,
}

/// Successful response of `POST /orders`.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_number: String,
    pub status: OrderStatus,
    pub message: String,
}

// ============================================================================
// Unit Tests
// ============================================================================
