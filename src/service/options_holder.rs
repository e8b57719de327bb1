// SPDX-License-Identifier: MIT OR Apache-2.0

//! Root configuration access with a default fallback.
//!
//! Root registration is optional: a feature can be registered and resolved
//! even if no root was ever registered in its scope, as long as the
//! feature's own options are self-sufficient. The `OptionsHolder` is the
//! read side of that rule — it yields the registered root value when one
//! exists and the type's default (an empty mapping for [`ConfigMap`]) when
//! none does, never an error.
//!
//! [`ConfigMap`]: crate::domain::config_map::ConfigMap

use crate::domain::errors::Result;
use crate::domain::token::Token;
use crate::ports::resolver::DependencyResolver;
use crate::service::value_provider::ValueProvider;
use std::sync::Arc;

/// Read access to a scope's root configuration.
///
/// Reads are idempotent: every call yields the same value, since the
/// underlying provider resolves at most once and the fallback is a fresh
/// default. A deferred root makes `get` suspend on first read.
pub struct OptionsHolder<R> {
    /// Root token of the scope this holder reads
    token: Token,
    /// The registered root provider, if any
    provider: Option<Arc<ValueProvider<R>>>,
    resolver: Arc<dyn DependencyResolver>,
}

impl<R: Clone + Default + Send + Sync + 'static> OptionsHolder<R> {
    /// Creates a holder over an optionally registered root provider.
    pub fn new(
        token: Token,
        provider: Option<Arc<ValueProvider<R>>>,
        resolver: Arc<dyn DependencyResolver>,
    ) -> Self {
        Self {
            token,
            provider,
            resolver,
        }
    }

    /// Returns the root token this holder reads.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Returns the registered root configuration, or `R::default()` when
    /// none was registered.
    pub async fn get(&self) -> Result<R> {
        match &self.provider {
            Some(provider) => provider.resolve(self.resolver.as_ref()).await,
            None => Ok(R::default()),
        }
    }
}
