// Private module declaration
mod server;

// Re-export for public API
pub use server::{routes, run_server};
