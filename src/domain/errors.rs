// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration composition crate.
//!
//! This module defines the error taxonomy for registration and resolution.
//! All errors use `thiserror`. Unlike most error enums, `ConfigError` is
//! `Clone`: a failed resolution is cached and must re-surface on every
//! subsequent read, so underlying causes are held behind `Arc`.

use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::token::Token;

/// Boxed error type returned by user-supplied value factories.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Shared error cause, cheap to clone alongside the cached failure.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync>;

/// The main error type for registration and resolution operations.
///
/// This enum represents all errors that can occur while registering root or
/// feature configuration and while resolving merged configuration into
/// clients. It is marked `#[non_exhaustive]` to allow future additions
/// without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use featcfg::domain::errors::ConfigError;
///
/// fn check_registration() -> Result<(), ConfigError> {
///     Err(ConfigError::DuplicateFeatureName {
///         scope: "queue".to_string(),
///         feature: "orders".to_string(),
///     })
/// }
/// ```
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A root configuration was registered twice for the same scope.
    #[error("root configuration already registered for scope '{scope}'")]
    DuplicateRootRegistration {
        /// The scope whose root was registered twice
        scope: String,
    },

    /// Two features in the same scope share a feature name.
    #[error("duplicate feature name '{feature}' in scope '{scope}'")]
    DuplicateFeatureName {
        /// The scope the registration was attempted in
        scope: String,
        /// The offending feature name
        feature: String,
    },

    /// A resolution was requested for a feature that was never registered.
    #[error("no feature named '{feature}' is registered in scope '{scope}'")]
    UnknownFeature {
        /// The scope the lookup ran in
        scope: String,
        /// The feature name that was not found
        feature: String,
    },

    /// A deferred value factory failed while resolving a registered entry.
    #[error("failed to resolve configuration '{token}' in scope '{scope}': {source}")]
    ResolutionFailed {
        /// The scope the entry belongs to
        scope: String,
        /// The token of the entry whose resolution failed
        token: Token,
        /// The underlying factory error
        #[source]
        source: SharedError,
    },

    /// A merged configuration failed the client instantiator's validation.
    ///
    /// The core never constructs this variant itself; instantiators raise it
    /// when required fields are missing or malformed, and the factory
    /// propagates it unchanged.
    #[error("invalid configuration for feature '{feature}' in scope '{scope}': missing fields {missing:?}")]
    InvalidConfiguration {
        /// The scope the feature belongs to
        scope: String,
        /// The feature whose merged configuration is invalid
        feature: String,
        /// Names of the missing or malformed fields
        missing: Vec<String>,
    },

    /// A dependency declared by a deferred factory could not be resolved.
    #[error("dependency '{id}' required by '{token}' could not be resolved")]
    MissingDependency {
        /// The token of the entry whose factory declared the dependency
        token: Token,
        /// The dependency identifier that could not be resolved
        id: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error("failed to convert value for field '{key}' to type {target_type}: {source}")]
    TypeConversion {
        /// The field being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        #[source]
        source: SharedError,
    },
}

// Conversions from common parsing errors to TypeConversion
impl ConfigError {
    /// Creates a TypeConversion error from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversion {
            key,
            target_type: "integer".to_string(),
            source: Arc::new(err),
        }
    }

    /// Creates a TypeConversion error from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversion {
            key,
            target_type: "float".to_string(),
            source: Arc::new(err),
        }
    }

    /// Creates a TypeConversion error from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversion {
            key,
            target_type: "boolean".to_string(),
            source: Arc::new(err),
        }
    }
}

/// A specialized Result type for registration and resolution operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_root_registration_error() {
        let error = ConfigError::DuplicateRootRegistration {
            scope: "queue".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "root configuration already registered for scope 'queue'"
        );
    }

    #[test]
    fn test_duplicate_feature_name_error() {
        let error = ConfigError::DuplicateFeatureName {
            scope: "queue".to_string(),
            feature: "orders".to_string(),
        };
        assert!(error.to_string().contains("orders"));
        assert!(error.to_string().contains("queue"));
    }

    #[test]
    fn test_unknown_feature_error() {
        let error = ConfigError::UnknownFeature {
            scope: "queue".to_string(),
            feature: "missing".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "no feature named 'missing' is registered in scope 'queue'"
        );
    }

    #[test]
    fn test_resolution_failed_error() {
        let cause = "bad url".parse::<i32>().unwrap_err();
        let error = ConfigError::ResolutionFailed {
            scope: "queue".to_string(),
            token: Token::feature_options("queue", "orders"),
            source: Arc::new(cause),
        };
        assert!(error.to_string().contains("queue_Feature_Options_orders"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_configuration_error() {
        let error = ConfigError::InvalidConfiguration {
            scope: "queue".to_string(),
            feature: "orders".to_string(),
            missing: vec!["url".to_string()],
        };
        assert!(error.to_string().contains("url"));
        assert!(error.to_string().contains("orders"));
    }

    #[test]
    fn test_missing_dependency_error() {
        let error = ConfigError::MissingDependency {
            token: Token::root("queue"),
            id: "settings".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "dependency 'settings' required by 'queue' could not be resolved"
        );
    }

    #[test]
    fn test_from_parse_int_error() {
        let parse_err = "not_a_number".parse::<i64>().unwrap_err();
        let error = ConfigError::from_parse_int_error("port".to_string(), parse_err);
        assert!(matches!(error, ConfigError::TypeConversion { .. }));
        assert!(error.to_string().contains("integer"));
    }

    #[test]
    fn test_error_clone_preserves_variant() {
        let cause = "x".parse::<bool>().unwrap_err();
        let error = ConfigError::ResolutionFailed {
            scope: "queue".to_string(),
            token: Token::root("queue"),
            source: Arc::new(cause),
        };
        let cloned = error.clone();
        assert!(matches!(cloned, ConfigError::ResolutionFailed { .. }));
        assert_eq!(cloned.to_string(), error.to_string());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
    }
}
