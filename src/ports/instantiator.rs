// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client instantiation seam.
//!
//! The factory's job ends at producing a merged configuration; turning it
//! into a live client is the caller's. Implementations of this port validate
//! the merged configuration and construct the client handle, raising
//! [`ConfigError::InvalidConfiguration`](crate::domain::errors::ConfigError)
//! when required fields are missing — the factory propagates such errors
//! unchanged.

use crate::domain::errors::Result;

/// Builds one client from a merged configuration.
///
/// Supplied once per factory. `scope` and `feature` identify the entry being
/// instantiated so that validation errors can name the misconfigured
/// registration. The factory calls `instantiate` at most once per feature
/// (single-flight) and caches the result.
///
/// A blanket implementation covers plain closures, so most callers pass a
/// `Fn(&str, &str, M) -> Result<C>` directly.
///
/// # Examples
///
/// ```
/// use featcfg::domain::{ConfigError, ConfigMap, Result};
/// use featcfg::ports::instantiator::ClientInstantiator;
///
/// struct QueueClient {
///     url: String,
/// }
///
/// fn build(scope: &str, feature: &str, merged: ConfigMap) -> Result<QueueClient> {
///     let missing = merged.missing_fields(&["url"]);
///     if !missing.is_empty() {
///         return Err(ConfigError::InvalidConfiguration {
///             scope: scope.to_string(),
///             feature: feature.to_string(),
///             missing,
///         });
///     }
///     Ok(QueueClient {
///         url: merged.get("url").unwrap().as_string(),
///     })
/// }
///
/// let instantiator: &dyn ClientInstantiator<ConfigMap, QueueClient> = &build;
/// let client = instantiator
///     .instantiate("queue", "orders", ConfigMap::new().with("url", "https://x"))
///     .unwrap();
/// assert_eq!(client.url, "https://x");
/// ```
pub trait ClientInstantiator<M, C>: Send + Sync {
    /// Validates `merged` and constructs the client for (`scope`, `feature`).
    fn instantiate(&self, scope: &str, feature: &str, merged: M) -> Result<C>;
}

impl<M, C, F> ClientInstantiator<M, C> for F
where
    F: Fn(&str, &str, M) -> Result<C> + Send + Sync,
{
    fn instantiate(&self, scope: &str, feature: &str, merged: M) -> Result<C> {
        self(scope, feature, merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigMap;

    #[test]
    fn test_closure_is_instantiator() {
        let instantiator =
            |_scope: &str, _feature: &str, merged: ConfigMap| -> Result<usize> { Ok(merged.len()) };

        let merged = ConfigMap::new().with("region", "us-east-1");
        let client = instantiator.instantiate("queue", "orders", merged).unwrap();
        assert_eq!(client, 1);
    }

    #[test]
    fn test_instantiator_receives_identity() {
        let instantiator = |scope: &str, feature: &str, _merged: ConfigMap| -> Result<String> {
            Ok(format!("{}/{}", scope, feature))
        };

        let client = instantiator
            .instantiate("queue", "orders", ConfigMap::new())
            .unwrap();
        assert_eq!(client, "queue/orders");
    }

    #[test]
    fn test_instantiator_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ClientInstantiator<ConfigMap, ()>>();
    }
}
