//! Run configuration.

use crate::base::constants::DEFAULT_PROPERTY_ENUM;
use crate::hir::ResolveOptions;

/// Settings for one metadata extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConfig {
    /// Enumeration whose member comments are parsed for titles and annotations.
    pub property_enum: String,
    /// A title longer than this many characters keeps the declared identifier
    /// as the displayed name.
    pub max_title_len: Option<usize>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            property_enum: DEFAULT_PROPERTY_ENUM.to_string(),
            max_title_len: None,
        }
    }
}

impl MetadataConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property_enum(mut self, name: impl Into<String>) -> Self {
        self.property_enum = name.into();
        self
    }

    pub fn with_max_title_len(mut self, max: Option<usize>) -> Self {
        self.max_title_len = max;
        self
    }

    pub(crate) fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            property_enum: self.property_enum.clone(),
            max_title_len: self.max_title_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MetadataConfig::default();
        assert_eq!(config.property_enum, "VehicleProperty");
        assert_eq!(config.max_title_len, None);
        assert_eq!(config.resolve_options(), ResolveOptions::default());
    }

    #[test]
    fn test_builder() {
        let config = MetadataConfig::new()
            .with_property_enum("TestProperty")
            .with_max_title_len(Some(30));

        let options = config.resolve_options();
        assert_eq!(options.property_enum, "TestProperty");
        assert_eq!(options.max_title_len, Some(30));
    }
}
