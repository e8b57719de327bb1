// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency resolver that knows no dependencies.

use crate::ports::resolver::{Dependency, DependencyResolver};

/// A resolver that resolves nothing.
///
/// This is the default resolver of a factory. Deferred registrations whose
/// dependency lists are empty never consult it; any declared dependency
/// fails resolution as missing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullResolver;

impl DependencyResolver for NullResolver {
    fn resolve(&self, _id: &str) -> Option<Dependency> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_resolver_resolves_nothing() {
        assert!(NullResolver.resolve("settings").is_none());
        assert!(NullResolver.resolve("").is_none());
    }
}
