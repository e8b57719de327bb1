// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-scope configuration factory: registration and lazy client
//! resolution.
//!
//! One `ClientFactory` owns everything registered for one configuration
//! scope: the optional root configuration, the per-feature option overrides,
//! and one lazily built client per feature. Registration happens at
//! application start through `&mut self`; resolution afterwards through
//! `&self`. That split keeps the write-once/read-many discipline checked by
//! the compiler — the only interior mutability is the single-flight cells.

use crate::adapters::NullResolver;
use crate::domain::errors::{BoxedError, ConfigError, Result};
use crate::domain::overlay::Overlay;
use crate::domain::token::Token;
use crate::ports::instantiator::ClientInstantiator;
use crate::ports::resolver::{Dependency, DependencyResolver};
use crate::service::options_holder::OptionsHolder;
use crate::service::value_provider::{DeferredFactory, ValueProvider};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A deferred feature registration.
///
/// Bundles the feature name, the declared dependency identifiers, and the
/// options factory. The name is an explicit field so that it is readable
/// without resolving the deferred value.
pub struct AsyncFeature<F> {
    name: String,
    deps: Vec<String>,
    factory: DeferredFactory<F>,
}

impl<F: Clone + Send + Sync + 'static> AsyncFeature<F> {
    /// Creates a deferred feature registration.
    ///
    /// `deps` lists the dependency identifiers passed to `factory` in order;
    /// it may be empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use featcfg::domain::{BoxedError, ConfigMap};
    /// use featcfg::service::factory::AsyncFeature;
    ///
    /// let feature = AsyncFeature::new("orders", vec![], |_deps| async {
    ///     Ok::<_, BoxedError>(ConfigMap::new().with("url", "https://queue/orders"))
    /// });
    /// assert_eq!(feature.name(), "orders");
    /// ```
    pub fn new<Fac, Fut>(name: impl Into<String>, deps: Vec<String>, factory: Fac) -> Self
    where
        Fac: Fn(Vec<Dependency>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<F, BoxedError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            deps,
            factory: Box::new(move |deps| Box::pin(factory(deps))),
        }
    }

    /// Returns the feature name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared dependency identifiers.
    pub fn dependencies(&self) -> &[String] {
        &self.deps
    }
}

/// Everything stored for one registered feature.
struct FeatureEntry<F, C> {
    options: Arc<ValueProvider<F>>,
    client_token: Token,
    /// Single-flight cell for the client; a stored error is terminal
    client: OnceCell<Result<Arc<C>>>,
}

/// The configuration factory for one scope.
///
/// Type parameters: `R` is the root configuration, `F` the feature options
/// (merging over `R` via [`Overlay`]), and `C` the client built by the
/// instantiator from `F::Merged`.
///
/// # Examples
///
/// ```
/// use featcfg::prelude::*;
///
/// fn main() -> featcfg::domain::Result<()> {
///     let mut factory: ClientFactory<ConfigMap, ConfigMap, String> =
///         ClientFactory::new("queue", |_: &str, _: &str, merged: ConfigMap| -> Result<String> {
///             Ok(merged.get("url").map(|v| v.as_string()).unwrap_or_default())
///         });
///
///     factory.register_root(ConfigMap::new().with("region", "us-east-1"))?;
///     factory.register_feature("orders", ConfigMap::new().with("url", "https://queue/orders"))?;
///
///     let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
///     let client = rt.block_on(factory.client("orders"))?;
///     assert_eq!(*client, "https://queue/orders");
///     Ok(())
/// }
/// ```
pub struct ClientFactory<R, F, C>
where
    R: Clone + Default + Send + Sync + 'static,
    F: Overlay<R>,
    C: Send + Sync + 'static,
{
    scope: String,
    instantiator: Box<dyn ClientInstantiator<F::Merged, C>>,
    resolver: Arc<dyn DependencyResolver>,
    root: Option<Arc<ValueProvider<R>>>,
    features: HashMap<String, FeatureEntry<F, C>>,
    /// Feature names in registration order, for stable diagnostics
    registration_order: Vec<String>,
}

impl<R, F, C> ClientFactory<R, F, C>
where
    R: Clone + Default + Send + Sync + 'static,
    F: Overlay<R>,
    C: Send + Sync + 'static,
{
    /// Creates a factory for `scope` with the given client instantiator.
    ///
    /// The factory starts with a [`NullResolver`]; use
    /// [`with_resolver`](Self::with_resolver) when deferred registrations
    /// declare dependencies.
    pub fn new(
        scope: impl Into<String>,
        instantiator: impl ClientInstantiator<F::Merged, C> + 'static,
    ) -> Self {
        Self {
            scope: scope.into(),
            instantiator: Box::new(instantiator),
            resolver: Arc::new(NullResolver),
            root: None,
            features: HashMap::new(),
            registration_order: Vec::new(),
        }
    }

    /// Replaces the dependency resolver, returning the factory for chaining.
    pub fn with_resolver(mut self, resolver: impl DependencyResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Returns the configuration scope this factory owns.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Registers the scope's root configuration from an already-known value.
    ///
    /// At most one root may be registered per scope; a second registration
    /// fails with `DuplicateRootRegistration` rather than overwriting.
    pub fn register_root(&mut self, value: R) -> Result<()> {
        self.ensure_no_root()?;
        let token = Token::root(&self.scope);
        self.root = Some(Arc::new(ValueProvider::ready(&self.scope, token, value)));
        tracing::debug!("registered root configuration for scope '{}'", self.scope);
        Ok(())
    }

    /// Registers the scope's root configuration from a deferred factory.
    ///
    /// `deps` lists dependency identifiers resolved through the factory's
    /// [`DependencyResolver`] and passed to `factory` in order. The factory
    /// runs at most once, on first resolution of the root or of any client
    /// that needs it; its value is shared by every feature in the scope.
    pub fn register_root_async<Fac, Fut>(&mut self, deps: Vec<String>, factory: Fac) -> Result<()>
    where
        Fac: Fn(Vec<Dependency>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<R, BoxedError>> + Send + 'static,
    {
        self.ensure_no_root()?;
        let token = Token::root(&self.scope);
        self.root = Some(Arc::new(ValueProvider::deferred(
            &self.scope,
            token,
            deps,
            factory,
        )));
        tracing::debug!(
            "registered deferred root configuration for scope '{}'",
            self.scope
        );
        Ok(())
    }

    /// Registers one feature from already-known options.
    pub fn register_feature(&mut self, name: impl Into<String>, options: F) -> Result<()> {
        self.register_features(vec![(name.into(), options)])
    }

    /// Registers a batch of features from already-known options.
    ///
    /// The whole batch is validated first: a feature name that collides
    /// within the batch or with an earlier registration fails the call with
    /// `DuplicateFeatureName` and registers nothing.
    pub fn register_features<S, I>(&mut self, features: I) -> Result<()>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, F)>,
    {
        let features: Vec<(String, F)> = features
            .into_iter()
            .map(|(name, options)| (name.into(), options))
            .collect();
        self.ensure_unique_names(features.iter().map(|(name, _)| name.as_str()))?;

        for (name, options) in features {
            let provider = ValueProvider::ready(
                &self.scope,
                Token::feature_options(&self.scope, &name),
                options,
            );
            self.insert_entry(name, provider);
        }
        Ok(())
    }

    /// Registers one feature whose options come from a deferred factory.
    pub fn register_feature_async(&mut self, feature: AsyncFeature<F>) -> Result<()> {
        self.register_features_async(vec![feature])
    }

    /// Registers a batch of deferred features.
    ///
    /// Validation matches [`register_features`](Self::register_features):
    /// name collisions fail the whole batch up front, before any options
    /// factory or instantiator can run.
    pub fn register_features_async(&mut self, features: Vec<AsyncFeature<F>>) -> Result<()> {
        self.ensure_unique_names(features.iter().map(|feature| feature.name.as_str()))?;

        for feature in features {
            let AsyncFeature {
                name,
                deps,
                factory,
            } = feature;
            let provider = ValueProvider::deferred_boxed(
                &self.scope,
                Token::feature_options(&self.scope, &name),
                deps,
                factory,
            );
            self.insert_entry(name, provider);
        }
        Ok(())
    }

    /// Resolves the scope's root configuration.
    ///
    /// Yields `R::default()` when no root was registered. The resolved value
    /// is stable: repeated calls observe the same configuration.
    pub async fn root(&self) -> Result<R> {
        self.options_holder().get().await
    }

    /// Resolves a feature's option overrides (without merging or
    /// instantiating).
    pub async fn options(&self, feature: &str) -> Result<F> {
        let entry = self.entry(feature)?;
        entry.options.resolve(self.resolver.as_ref()).await
    }

    /// Resolves a feature's client, building it on first access.
    ///
    /// Root configuration and feature options resolve concurrently; once
    /// both are available the options overlay the root and the merged
    /// configuration goes to the instantiator. The built client is cached,
    /// and so is a failure — a failed entry stays failed and re-surfaces the
    /// same error without retrying. Concurrent callers share one in-flight
    /// build.
    pub async fn client(&self, feature: &str) -> Result<Arc<C>> {
        let entry = self.entry(feature)?;
        entry
            .client
            .get_or_init(|| self.build_client(feature, entry))
            .await
            .clone()
    }

    /// Checks whether a feature is registered.
    pub fn contains_feature(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    /// Returns registered feature names in registration order.
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.registration_order.iter().map(String::as_str)
    }

    /// Returns every registration token in a stable order: the root token
    /// (when a root is registered), then options and client tokens per
    /// feature in registration order.
    pub fn tokens(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        if self.root.is_some() {
            tokens.push(Token::root(&self.scope));
        }
        for name in &self.registration_order {
            tokens.push(Token::feature_options(&self.scope, name));
            tokens.push(Token::feature(&self.scope, name));
        }
        tokens
    }

    async fn build_client(&self, feature: &str, entry: &FeatureEntry<F, C>) -> Result<Arc<C>> {
        let holder = self.options_holder();
        let (root, options) = tokio::join!(
            holder.get(),
            entry.options.resolve(self.resolver.as_ref())
        );

        let merged = options?.overlay(root?);
        let client = self.instantiator.instantiate(&self.scope, feature, merged)?;
        tracing::debug!(
            "instantiated client '{}' in scope '{}'",
            entry.client_token,
            self.scope
        );
        Ok(Arc::new(client))
    }

    fn options_holder(&self) -> OptionsHolder<R> {
        OptionsHolder::new(
            Token::root(&self.scope),
            self.root.clone(),
            Arc::clone(&self.resolver),
        )
    }

    fn ensure_no_root(&self) -> Result<()> {
        if self.root.is_some() {
            return Err(ConfigError::DuplicateRootRegistration {
                scope: self.scope.clone(),
            });
        }
        Ok(())
    }

    fn ensure_unique_names<'a>(&self, names: impl Iterator<Item = &'a str>) -> Result<()> {
        let mut seen = HashSet::new();
        for name in names {
            if self.features.contains_key(name) || !seen.insert(name) {
                return Err(ConfigError::DuplicateFeatureName {
                    scope: self.scope.clone(),
                    feature: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn insert_entry(&mut self, name: String, options: ValueProvider<F>) {
        let entry = FeatureEntry {
            options: Arc::new(options),
            client_token: Token::feature(&self.scope, &name),
            client: OnceCell::new(),
        };
        tracing::debug!("registered feature '{}' in scope '{}'", name, self.scope);
        self.features.insert(name.clone(), entry);
        self.registration_order.push(name);
    }

    fn entry(&self, feature: &str) -> Result<&FeatureEntry<F, C>> {
        self.features
            .get(feature)
            .ok_or_else(|| ConfigError::UnknownFeature {
                scope: self.scope.clone(),
                feature: feature.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigMap;

    fn map_factory() -> ClientFactory<ConfigMap, ConfigMap, ConfigMap> {
        ClientFactory::new(
            "queue",
            |_scope: &str, _feature: &str, merged: ConfigMap| -> Result<ConfigMap> { Ok(merged) },
        )
    }

    #[test]
    fn test_duplicate_root_fails_fast() {
        let mut factory = map_factory();
        factory.register_root(ConfigMap::new()).unwrap();

        let error = factory.register_root(ConfigMap::new()).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::DuplicateRootRegistration { .. }
        ));
    }

    #[test]
    fn test_duplicate_feature_across_calls_fails() {
        let mut factory = map_factory();
        factory.register_feature("orders", ConfigMap::new()).unwrap();

        let error = factory
            .register_feature("orders", ConfigMap::new())
            .unwrap_err();
        assert!(matches!(error, ConfigError::DuplicateFeatureName { .. }));
    }

    #[test]
    fn test_bulk_duplicate_registers_nothing() {
        let mut factory = map_factory();
        let error = factory
            .register_features(vec![
                ("a", ConfigMap::new()),
                ("b", ConfigMap::new()),
                ("a", ConfigMap::new()),
            ])
            .unwrap_err();

        assert!(matches!(error, ConfigError::DuplicateFeatureName { .. }));
        assert!(!factory.contains_feature("a"));
        assert!(!factory.contains_feature("b"));
        assert_eq!(factory.feature_names().count(), 0);
    }

    #[test]
    fn test_unknown_feature() {
        let factory = map_factory();
        let error = tokio_test::block_on(factory.client("missing")).unwrap_err();
        assert!(matches!(error, ConfigError::UnknownFeature { .. }));
    }

    #[test]
    fn test_tokens_in_registration_order() {
        let mut factory = map_factory();
        factory.register_root(ConfigMap::new()).unwrap();
        factory
            .register_features(vec![("b", ConfigMap::new()), ("a", ConfigMap::new())])
            .unwrap();

        let tokens: Vec<String> = factory
            .tokens()
            .into_iter()
            .map(Token::into_string)
            .collect();
        assert_eq!(
            tokens,
            vec![
                "queue",
                "queue_Feature_Options_b",
                "queue_Feature_b",
                "queue_Feature_Options_a",
                "queue_Feature_a",
            ]
        );
    }

    #[test]
    fn test_scope_accessor() {
        assert_eq!(map_factory().scope(), "queue");
    }
}
