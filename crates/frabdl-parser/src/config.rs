//! Index construction settings.

/// What to do with a listing entry that fails to decode or merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorPolicy {
    /// Log the entry, record it in [`MediaIndex::skipped`](crate::MediaIndex::skipped)
    /// and keep going.
    #[default]
    Lenient,
    /// Abort the build with [`Error::IndexBuild`](crate::Error::IndexBuild).
    Strict,
}

/// How "best available" picks a file among a talk's variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BestVariantPolicy {
    /// The variant with the most audio languages; first listed wins ties.
    #[default]
    LanguageCount,
    /// The variant with the longest language-combination key string;
    /// first listed wins ties. Compares characters, not languages.
    KeyLength,
}

/// Configuration for building a [`MediaIndex`](crate::MediaIndex).
///
/// ```
/// use frabdl_parser::config::{ErrorPolicy, IndexConfig};
///
/// let config = IndexConfig::builder()
///     .error_policy(ErrorPolicy::Strict)
///     .build();
/// assert!(config.is_strict());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexConfig {
    /// Skip or abort on bad entries.
    /// Default: Lenient
    pub error_policy: ErrorPolicy,

    /// Tie-break used by [`LanguageSelector::BestAvailable`](crate::LanguageSelector::BestAvailable).
    /// Default: LanguageCount
    pub best_variant: BestVariantPolicy,

    /// Accept `event-location-id-...` names where segment 1 is not numeric.
    /// Default: false
    pub location_segment: bool,
}

impl IndexConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with the given strictness.
    pub fn with_strict(strict: bool) -> Self {
        Self {
            error_policy: if strict {
                ErrorPolicy::Strict
            } else {
                ErrorPolicy::Lenient
            },
            ..Self::default()
        }
    }

    /// Create a configuration builder.
    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::default()
    }

    /// Whether bad entries abort the build.
    pub fn is_strict(&self) -> bool {
        self.error_policy == ErrorPolicy::Strict
    }
}

/// Builder for `IndexConfig`.
#[derive(Debug, Clone, Default)]
pub struct IndexConfigBuilder {
    error_policy: Option<ErrorPolicy>,
    best_variant: Option<BestVariantPolicy>,
    location_segment: Option<bool>,
}

impl IndexConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error policy.
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = Some(policy);
        self
    }

    /// Shorthand for `error_policy(ErrorPolicy::Strict)` when `strict` is true.
    pub fn strict(self, strict: bool) -> Self {
        self.error_policy(if strict {
            ErrorPolicy::Strict
        } else {
            ErrorPolicy::Lenient
        })
    }

    /// Set how "best available" chooses between variants.
    ///
    /// Use `KeyLength` to reproduce listings resolved by older tooling.
    pub fn best_variant(mut self, policy: BestVariantPolicy) -> Self {
        self.best_variant = Some(policy);
        self
    }

    /// Allow a location segment between event tag and talk id.
    ///
    /// Default: false
    pub fn location_segment(mut self, enabled: bool) -> Self {
        self.location_segment = Some(enabled);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> IndexConfig {
        IndexConfig {
            error_policy: self.error_policy.unwrap_or_default(),
            best_variant: self.best_variant.unwrap_or_default(),
            location_segment: self.location_segment.unwrap_or(false),
        }
    }
}
