// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) at the crate's two
//! external seams: client instantiation and dependency resolution. Both are
//! implemented by the hosting application; the adapters layer ships simple
//! resolver implementations.

pub mod instantiator;
pub mod resolver;

// Re-export commonly used types
pub use instantiator::ClientInstantiator;
pub use resolver::{downcast, Dependency, DependencyResolver};
