// SPDX-License-Identifier: MIT OR Apache-2.0

//! Map-backed dependency resolver adapter.
//!
//! This module provides a resolver that holds dependency instances in a
//! plain map, keyed by identifier. It is the simplest way to wire real
//! dependencies into deferred registrations when no larger hosting container
//! is in play, and it is what the crate's own tests use.

use crate::ports::resolver::{Dependency, DependencyResolver};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Dependency resolver backed by an in-memory map.
///
/// Instances are registered up front, before the resolver is handed to a
/// factory; registration replaces any previous instance under the same
/// identifier.
///
/// # Examples
///
/// ```
/// use featcfg::adapters::StaticResolver;
/// use featcfg::ports::resolver::{downcast, DependencyResolver};
///
/// let resolver = StaticResolver::new().with("region_source", String::from("eu-west-1"));
///
/// let dependency = resolver.resolve("region_source").unwrap();
/// assert_eq!(*downcast::<String>(&dependency).unwrap(), "eu-west-1");
/// assert!(resolver.resolve("unknown").is_none());
/// ```
#[derive(Default)]
pub struct StaticResolver {
    /// Registered instances keyed by identifier
    entries: HashMap<String, Dependency>,
}

impl StaticResolver {
    /// Creates a new, empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `instance` under `id`, returning the resolver for chaining.
    pub fn with<T: Any + Send + Sync>(mut self, id: impl Into<String>, instance: T) -> Self {
        self.insert(id, instance);
        self
    }

    /// Registers `instance` under `id`, replacing any previous instance.
    pub fn insert<T: Any + Send + Sync>(&mut self, id: impl Into<String>, instance: T) {
        self.entries.insert(id.into(), Arc::new(instance));
    }

    /// Returns the number of registered instances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether no instances are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DependencyResolver for StaticResolver {
    fn resolve(&self, id: &str) -> Option<Dependency> {
        self.entries.get(id).cloned()
    }
}
