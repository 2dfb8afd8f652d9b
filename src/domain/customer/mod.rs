// ============================================================================
// Customer Domain - Buyer Snapshot
// ============================================================================
//
// A Customer here is not an account: it is the normalized snapshot of the
// contact and shipping fields a buyer supplied at order time. One row per
// submission, owned by the Order that references it.
//
// ============================================================================

pub mod value_objects;

pub use value_objects::*;
