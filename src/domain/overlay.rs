// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed overlay merge of feature options over root configuration.
//!
//! The merge contract of the whole crate lives in one trait: feature options
//! overlay a root configuration, the options win on conflicting fields, and
//! the result is the merged configuration handed to the client instantiator.
//! Implementing `Overlay` on concrete structs gets the precedence rule
//! checked at compile time; [`ConfigMap`] implements it for the dynamic
//! field-bag case.

use crate::domain::config_map::ConfigMap;

/// Merges a feature's option overrides over a base (root) configuration.
///
/// The implementor is the feature-options type; `Base` is the root
/// configuration type; `Merged` is what the client instantiator receives.
/// Precedence is fixed: every field of `self` wins over the corresponding
/// field of `base`, and fields absent from `self` fall back to `base`.
/// Anything absent from both is left to instantiator defaults.
///
/// # Examples
///
/// ```
/// use featcfg::domain::config_map::ConfigMap;
/// use featcfg::domain::overlay::Overlay;
///
/// let root = ConfigMap::new().with("region", "us-east-1").with("group_id", "default");
/// let options = ConfigMap::new().with("group_id", "priority");
///
/// let merged = options.overlay(root);
/// assert_eq!(merged.get("region").unwrap().as_str(), "us-east-1");
/// assert_eq!(merged.get("group_id").unwrap().as_str(), "priority");
/// ```
pub trait Overlay<Base = Self>: Clone + Send + Sync + 'static {
    /// The merged configuration type produced by the overlay.
    type Merged: Send + Sync + 'static;

    /// Overlays `self` on top of `base`; fields of `self` win.
    fn overlay(self, base: Base) -> Self::Merged;
}

impl Overlay for ConfigMap {
    type Merged = ConfigMap;

    fn overlay(self, base: ConfigMap) -> ConfigMap {
        let mut merged = base;
        for (field, value) in self {
            merged.insert(field, value);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_feature_wins_on_conflict() {
        let root = ConfigMap::new().with("region", "us-east-1").with("group_id", "default");
        let options = ConfigMap::new().with("group_id", "priority");

        let merged = options.overlay(root);
        assert_eq!(merged.get("region").unwrap().as_str(), "us-east-1");
        assert_eq!(merged.get("group_id").unwrap().as_str(), "priority");
    }

    #[test]
    fn test_overlay_empty_base() {
        let options = ConfigMap::new().with("url", "https://x");
        let merged = options.clone().overlay(ConfigMap::new());
        assert_eq!(merged, options);
    }

    #[test]
    fn test_overlay_empty_options() {
        let root = ConfigMap::new().with("region", "eu-west-1");
        let merged = ConfigMap::new().overlay(root.clone());
        assert_eq!(merged, root);
    }

    #[test]
    fn test_overlay_disjoint_fields_union() {
        let root = ConfigMap::new().with("region", "us-east-1");
        let options = ConfigMap::new().with("url", "https://x");

        let merged = options.overlay(root);
        assert_eq!(merged.len(), 2);
        assert!(merged.has("region"));
        assert!(merged.has("url"));
    }

    #[test]
    fn test_overlay_typed_structs() {
        #[derive(Clone, Default)]
        struct Root {
            region: String,
            group_id: String,
        }

        #[derive(Clone)]
        struct Overrides {
            group_id: Option<String>,
        }

        #[derive(Debug, PartialEq)]
        struct Merged {
            region: String,
            group_id: String,
        }

        impl Overlay<Root> for Overrides {
            type Merged = Merged;

            fn overlay(self, base: Root) -> Merged {
                Merged {
                    region: base.region,
                    group_id: self.group_id.unwrap_or(base.group_id),
                }
            }
        }

        let root = Root {
            region: "us-east-1".to_string(),
            group_id: "default".to_string(),
        };
        let merged = Overrides {
            group_id: Some("priority".to_string()),
        }
        .overlay(root);

        assert_eq!(
            merged,
            Merged {
                region: "us-east-1".to_string(),
                group_id: "priority".to_string(),
            }
        );
    }
}
