// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration factory and its resolution
//! machinery.
//!
//! This module contains the orchestrating pieces: the per-scope
//! `ClientFactory`, the `OptionsHolder` that reads root configuration with a
//! default fallback, and the `ValueProvider` that normalizes sync and async
//! configuration sources.

pub mod factory;
pub mod options_holder;
pub mod value_provider;

// Re-export commonly used types
pub use factory::{AsyncFeature, ClientFactory};
pub use options_holder::OptionsHolder;
pub use value_provider::{DeferredFactory, ValueProvider};
