// SPDX-License-Identifier: MIT OR Apache-2.0

//! External dependency resolution seam for deferred factories.
//!
//! Deferred (async) registrations may declare a list of dependency
//! identifiers. Before the value factory runs, the factory's owner asks a
//! `DependencyResolver` for the live instance behind each identifier and
//! passes them to the user factory in declaration order. The hosting
//! application implements this port; the crate ships a map-backed adapter
//! and a null adapter in [`crate::adapters`].

use std::any::Any;
use std::sync::Arc;

/// A type-erased dependency instance handed to deferred value factories.
pub type Dependency = Arc<dyn Any + Send + Sync>;

/// Resolves declared dependency identifiers to live instances.
///
/// Returning `None` marks the dependency as missing; the resolution that
/// declared it fails with
/// [`ConfigError::MissingDependency`](crate::domain::errors::ConfigError)
/// without invoking the user factory.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single resolver is shared by
/// every resolution in a factory.
pub trait DependencyResolver: Send + Sync {
    /// Returns the current instance registered under `id`, if any.
    fn resolve(&self, id: &str) -> Option<Dependency>;
}

/// Recovers a concrete type from a type-erased dependency.
///
/// Returns `None` when the dependency holds a different type.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use featcfg::ports::resolver::{downcast, Dependency};
///
/// let dependency: Dependency = Arc::new(String::from("eu-west-1"));
/// let region = downcast::<String>(&dependency).unwrap();
/// assert_eq!(*region, "eu-west-1");
/// assert!(downcast::<u32>(&dependency).is_none());
/// ```
pub fn downcast<T: Any + Send + Sync>(dependency: &Dependency) -> Option<Arc<T>> {
    Arc::clone(dependency).downcast::<T>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_matching_type() {
        let dependency: Dependency = Arc::new(42u32);
        assert_eq!(*downcast::<u32>(&dependency).unwrap(), 42);
    }

    #[test]
    fn test_downcast_wrong_type() {
        let dependency: Dependency = Arc::new(42u32);
        assert!(downcast::<String>(&dependency).is_none());
    }

    #[test]
    fn test_resolver_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn DependencyResolver>();
    }
}
