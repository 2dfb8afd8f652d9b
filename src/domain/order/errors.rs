use crate::db::StoreError;

// ============================================================================
// Checkout Business Rule Errors
// ============================================================================
//
// Every expected failure of the submission and lookup workflows. The HTTP
// layer maps each variant to a distinct client-visible response; only the
// store passthrough becomes a generic server error. Notification failures
// are not here on purpose: they are logged and swallowed, never surfaced.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("order input failed validation ({} field(s))", .0.len())]
    Validation(Vec<String>),

    #[error("product {0} not found")]
    ProductNotFound(i32),

    #[error("order {0} not found")]
    OrderNotFound(String),

    #[error("insufficient inventory for product {product_id}: requested {requested}")]
    InsufficientInventory { product_id: i32, requested: i32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CheckoutError {
    /// Short stable label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ProductNotFound(_) => "product_not_found",
            Self::OrderNotFound(_) => "order_not_found",
            Self::InsufficientInventory { .. } => "insufficient_inventory",
            Self::Store(_) => "store",
        }
    }
}
