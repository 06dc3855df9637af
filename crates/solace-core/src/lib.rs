//! # solace-core
//!
//! Core value types and error types for Solace.
//!
//! This crate provides the foundational types shared across all Solace crates:
//! - Raw survey input records and their field values
//! - The prediction produced by the classifier
//! - Label, recommendation tier and encoding profile enums
//! - Cross-cutting error types
//! - Response shapes returned by the HTTP endpoint and the CLI

pub mod enums;
pub mod errors;
pub mod input;
pub mod prediction;
pub mod responses;

pub use enums::{EncodingProfile, Label, RecommendationTier};
pub use errors::CoreError;
pub use input::{FieldValue, RawInput};
pub use prediction::Prediction;
