//! Feature encoding configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use solace_core::EncodingProfile;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EncodingConfig {
    /// Built-in encoding schema.
    #[serde(default)]
    pub profile: EncodingProfile,

    /// Reject unknown categories and columns the feature list would drop,
    /// instead of silently zero-filling them.
    #[serde(default)]
    pub strict: bool,

    /// Custom encoding schema (JSON). Takes precedence over `profile`.
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
}

impl EncodingConfig {
    /// Check if a custom schema file replaces the built-in profile.
    pub const fn has_custom_schema(&self) -> bool {
        self.schema_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient_basic() {
        let config = EncodingConfig::default();
        assert_eq!(config.profile, EncodingProfile::Basic);
        assert!(!config.strict);
        assert!(!config.has_custom_schema());
    }
}
