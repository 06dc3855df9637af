//! # solace-encoder
//!
//! Schema-driven feature encoding for Solace.
//!
//! Turns a raw survey record into the numeric row a classifier was trained on:
//!
//! 1. per-field transforms from an [`EncodingSchema`] (passthrough integers,
//!    lookup tables for binary answers, one-hot indicators `{field}_{value}`),
//! 2. derived features (`ln(age + 1)`, weighted sums, conjunction flags),
//! 3. alignment to the [`FeatureList`] artifact: absent columns become 0,
//!    unknown columns are dropped, order follows the list.
//!
//! Unknown categorical answers degrade to 0-valued features. With `strict`
//! enabled the encoder rejects them instead, together with any column the
//! feature list would drop.
//!
//! ```
//! use std::sync::Arc;
//! use solace_core::{EncodingProfile, RawInput};
//! use solace_encoder::{EncodingSchema, FeatureEncoder, FeatureList};
//!
//! let features = FeatureList::new(vec!["Age".into(), "work_interfere_Often".into()]).unwrap();
//! let encoder = FeatureEncoder::new(
//!     EncodingSchema::for_profile(EncodingProfile::Basic),
//!     Arc::new(features),
//!     false,
//! )
//! .unwrap();
//!
//! let input = RawInput::new()
//!     .with("Age", 30)
//!     .with("Gender", "Male")
//!     .with("work_interfere", "Often")
//!     .with("remote_work", "No")
//!     .with("leave", "Don't know")
//!     .with("benefits", "Yes")
//!     .with("anonymity", "Yes");
//! let vector = encoder.encode(&input).unwrap();
//! assert_eq!(vector.values(), [30.0, 1.0]);
//! ```

mod encoder;
pub mod error;
mod feature_list;
mod parse;
pub mod profiles;
mod schema;

pub use encoder::{EncodingReport, FeatureEncoder, UnknownValue};
pub use error::EncodeError;
pub use feature_list::{Alignment, EncodedRow, FeatureList, FeatureVector};
pub use parse::{FieldIssue, IssueKind};
pub use schema::{
    Condition, DerivedFeature, EncodingSchema, FieldEncoding, FieldKind, InputSchema, SchemaField,
    WeightedTerm,
};
