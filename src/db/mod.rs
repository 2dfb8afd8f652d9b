// ============================================================================
// Persistence Layer
// ============================================================================
//
// The checkout workflow sees one seam: the `CheckoutStore` trait. The real
// implementation (`PgStore`) runs on a sqlx Postgres pool; tests run on the
// in-memory store. The one non-CRUD primitive is the conditional inventory
// decrement, which must be atomic so concurrent submissions can never drive
// stock below zero.
//
// ============================================================================

pub mod store;

#[cfg(test)]
pub mod memory;

pub use store::{CheckoutStore, PgStore};

/// Failures from the persistence collaborator. Anything here that escapes
/// the workflow surfaces as a generic server error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Decode(String),
}
