pub mod cli;
pub mod core;
pub mod error;
pub mod presenter;
pub mod types;
pub mod utils;
pub mod verifier;

#[cfg(test)]
pub mod tests;

// Re-export commonly used item
pub use error::{FactCheckError, FactCheckResult};
