// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalizes ready and deferred configuration sources into one resolution
//! contract.
//!
//! A registered value is either already known (sync registration) or
//! produced by a user-supplied factory with injected dependencies (async
//! registration). `ValueProvider` hides the difference behind a single
//! `resolve` method with single-flight caching: the factory runs at most
//! once per provider, concurrent first reads share the in-flight attempt,
//! and a failed attempt is terminal — later reads re-surface the same error
//! rather than retrying.

use crate::domain::errors::{BoxedError, ConfigError, Result};
use crate::domain::token::Token;
use crate::ports::resolver::{Dependency, DependencyResolver};
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Factory signature for deferred values.
///
/// The factory receives the resolved dependency instances in declaration
/// order and returns the configuration value, or any error, which the
/// provider wraps into
/// [`ConfigError::ResolutionFailed`](crate::domain::errors::ConfigError).
pub type DeferredFactory<T> =
    Box<dyn Fn(Vec<Dependency>) -> BoxFuture<'static, std::result::Result<T, BoxedError>> + Send + Sync>;

enum ValueSource<T> {
    Ready(T),
    Deferred {
        deps: Vec<String>,
        factory: DeferredFactory<T>,
    },
}

/// A lazily resolved configuration value under one registration token.
///
/// # Examples
///
/// ```
/// use featcfg::adapters::NullResolver;
/// use featcfg::domain::{ConfigMap, Token};
/// use featcfg::service::value_provider::ValueProvider;
///
/// let provider = ValueProvider::ready(
///     "queue",
///     Token::root("queue"),
///     ConfigMap::new().with("region", "us-east-1"),
/// );
///
/// let value = tokio_test::block_on(provider.resolve(&NullResolver)).unwrap();
/// assert_eq!(value.get("region").unwrap().as_str(), "us-east-1");
/// ```
pub struct ValueProvider<T> {
    /// Scope the value belongs to, for diagnostics
    scope: String,
    /// Token the value is registered under
    token: Token,
    source: ValueSource<T>,
    /// Single-flight cell; holds the result of the one resolution attempt
    cell: OnceCell<Result<T>>,
}

impl<T: Clone + Send + Sync + 'static> ValueProvider<T> {
    /// Creates a provider over an already-known value.
    pub fn ready(scope: impl Into<String>, token: Token, value: T) -> Self {
        Self {
            scope: scope.into(),
            token,
            source: ValueSource::Ready(value),
            cell: OnceCell::new(),
        }
    }

    /// Creates a provider over a deferred factory with declared dependencies.
    ///
    /// `deps` lists the dependency identifiers to resolve and pass to the
    /// factory, in order. The list may be empty.
    pub fn deferred<Fac, Fut>(
        scope: impl Into<String>,
        token: Token,
        deps: Vec<String>,
        factory: Fac,
    ) -> Self
    where
        Fac: Fn(Vec<Dependency>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, BoxedError>> + Send + 'static,
    {
        Self::deferred_boxed(
            scope,
            token,
            deps,
            Box::new(move |deps| Box::pin(factory(deps))),
        )
    }

    /// Creates a provider over an already-boxed deferred factory.
    pub fn deferred_boxed(
        scope: impl Into<String>,
        token: Token,
        deps: Vec<String>,
        factory: DeferredFactory<T>,
    ) -> Self {
        Self {
            scope: scope.into(),
            token,
            source: ValueSource::Deferred { deps, factory },
            cell: OnceCell::new(),
        }
    }

    /// Returns the token this value is registered under.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Checks whether a resolution attempt has completed, successfully or not.
    pub fn is_resolved(&self) -> bool {
        self.cell.initialized()
    }

    /// Resolves the value, running the underlying factory at most once.
    ///
    /// Concurrent callers during the first resolution share the in-flight
    /// attempt. Once the attempt completes, every later call returns a clone
    /// of the cached value — or of the cached error, which is terminal.
    pub async fn resolve(&self, resolver: &dyn DependencyResolver) -> Result<T> {
        self.cell
            .get_or_init(|| self.resolve_once(resolver))
            .await
            .clone()
    }

    async fn resolve_once(&self, resolver: &dyn DependencyResolver) -> Result<T> {
        match &self.source {
            ValueSource::Ready(value) => Ok(value.clone()),
            ValueSource::Deferred { deps, factory } => {
                tracing::debug!("resolving deferred configuration value '{}'", self.token);

                let mut resolved = Vec::with_capacity(deps.len());
                for id in deps {
                    match resolver.resolve(id) {
                        Some(dependency) => resolved.push(dependency),
                        None => {
                            return Err(ConfigError::MissingDependency {
                                token: self.token.clone(),
                                id: id.clone(),
                            })
                        }
                    }
                }

                factory(resolved)
                    .await
                    .map_err(|source| ConfigError::ResolutionFailed {
                        scope: self.scope.clone(),
                        token: self.token.clone(),
                        source: Arc::from(source),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{NullResolver, StaticResolver};
    use crate::domain::ConfigMap;
    use crate::ports::resolver::downcast;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_ready_value_resolves() {
        let provider = ValueProvider::ready(
            "queue",
            Token::root("queue"),
            ConfigMap::new().with("region", "us-east-1"),
        );

        let value = tokio_test::block_on(provider.resolve(&NullResolver)).unwrap();
        assert_eq!(value.get("region").unwrap().as_str(), "us-east-1");
        assert!(provider.is_resolved());
    }

    #[test]
    fn test_deferred_factory_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory_calls = Arc::clone(&calls);

        let provider = ValueProvider::deferred(
            "queue",
            Token::feature_options("queue", "orders"),
            vec![],
            move |_deps| {
                let calls = Arc::clone(&factory_calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, BoxedError>(ConfigMap::new().with("url", "https://x"))
                }
            },
        );

        tokio_test::block_on(async {
            let first = provider.resolve(&NullResolver).await.unwrap();
            let second = provider.resolve(&NullResolver).await.unwrap();
            assert_eq!(first, second);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_deferred_receives_dependencies_in_order() {
        let resolver = StaticResolver::new()
            .with("first", 1u32)
            .with("second", 2u32);

        let provider = ValueProvider::deferred(
            "queue",
            Token::root("queue"),
            vec!["first".to_string(), "second".to_string()],
            |deps| async move {
                let first = downcast::<u32>(&deps[0]).unwrap();
                let second = downcast::<u32>(&deps[1]).unwrap();
                Ok::<_, BoxedError>(vec![*first, *second])
            },
        );

        let value = tokio_test::block_on(provider.resolve(&resolver)).unwrap();
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn test_missing_dependency_fails_without_factory_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory_calls = Arc::clone(&calls);

        let provider = ValueProvider::deferred(
            "queue",
            Token::root("queue"),
            vec!["settings".to_string()],
            move |_deps| {
                let calls = Arc::clone(&factory_calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, BoxedError>(ConfigMap::new())
                }
            },
        );

        let error = tokio_test::block_on(provider.resolve(&NullResolver)).unwrap_err();
        assert!(matches!(error, ConfigError::MissingDependency { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failure_is_cached_and_terminal() {
        let calls = Arc::new(AtomicUsize::new(0));
        let factory_calls = Arc::clone(&calls);

        let provider: ValueProvider<ConfigMap> = ValueProvider::deferred(
            "queue",
            Token::feature_options("queue", "orders"),
            vec![],
            move |_deps| {
                let calls = Arc::clone(&factory_calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<ConfigMap, BoxedError>("bad url".into())
                }
            },
        );

        tokio_test::block_on(async {
            let first = provider.resolve(&NullResolver).await.unwrap_err();
            let second = provider.resolve(&NullResolver).await.unwrap_err();
            assert!(matches!(first, ConfigError::ResolutionFailed { .. }));
            assert_eq!(first.to_string(), second.to_string());
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
