//! Cross-cutting error types for Solace.
//!
//! Domain-specific errors (`EncodeError`, `ModelError`, ...) are defined in
//! their respective crates. They converge into `anyhow::Error` in `solace-cli`.

use thiserror::Error;

/// Errors that can be raised by any Solace crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A probability outside `[0, 1]` or not finite.
    #[error("Invalid probability: {0} (expected a finite value in [0, 1])")]
    InvalidProbability(f64),
}
