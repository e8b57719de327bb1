// SPDX-License-Identifier: MIT OR Apache-2.0

//! A feature-scoped configuration composition crate.
//!
//! This crate lets an application register a shared root configuration once
//! per scope (credentials, region, defaults) and then declare any number of
//! named features — individual queues, buckets, topics — that inherit the
//! root configuration but may override individual fields. Each feature's
//! client is built lazily from the merged configuration, exactly once.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and the merge contract (`Token`,
//!   `ConfigValue`, `ConfigMap`, `Overlay`, errors)
//! - **Ports**: Trait definitions at the external seams
//!   (`ClientInstantiator`, `DependencyResolver`)
//! - **Adapters**: Resolver implementations (`StaticResolver`,
//!   `NullResolver`)
//! - **Service**: The factory and resolution machinery (`ClientFactory`,
//!   `OptionsHolder`, `ValueProvider`)
//!
//! # Features
//!
//! - **Deterministic precedence**: feature options always win over root
//!   fields; anything absent from both is left to instantiator defaults
//! - **Optional root**: features resolve against an empty root when none
//!   was registered
//! - **Sync and async sources**: values may be supplied directly or by an
//!   async factory with injected dependencies
//! - **Single-flight resolution**: each value and each client is built at
//!   most once per process; concurrent first reads share the attempt, and a
//!   failure is cached and re-surfaced rather than retried
//! - **Fail-fast registration**: duplicate roots and duplicate feature
//!   names are rejected at registration time
//!
//! # Quick Start
//!
//! ```rust
//! use featcfg::prelude::*;
//!
//! fn main() -> featcfg::domain::Result<()> {
//!     let mut factory: ClientFactory<ConfigMap, ConfigMap, String> =
//!         ClientFactory::new("queue", |_: &str, _: &str, merged: ConfigMap| -> Result<String> {
//!             Ok(merged.get("url").map(|v| v.as_string()).unwrap_or_default())
//!         });
//!
//!     factory.register_root(ConfigMap::new().with("region", "us-east-1"))?;
//!     factory.register_feature("orders", ConfigMap::new().with("url", "https://queue/orders"))?;
//!
//!     let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//!     let client = rt.block_on(factory.client("orders"))?;
//!     assert_eq!(*client, "https://queue/orders");
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for
/// convenient access.
pub mod prelude {
    pub use crate::adapters::{NullResolver, StaticResolver};
    pub use crate::domain::{
        BoxedError, ConfigError, ConfigMap, ConfigValue, Overlay, Result, Token,
    };
    pub use crate::ports::{downcast, ClientInstantiator, Dependency, DependencyResolver};
    pub use crate::service::{AsyncFeature, ClientFactory, OptionsHolder, ValueProvider};
}
