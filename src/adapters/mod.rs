// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing dependency resolver implementations.
//!
//! This module contains concrete implementations of the
//! [`DependencyResolver`](crate::ports::resolver::DependencyResolver) port.
//! Hosting applications with their own container implement the port
//! directly; these adapters cover the standalone cases.

pub mod null_resolver;
pub mod static_resolver;

// Re-export adapters
pub use null_resolver::NullResolver;
pub use static_resolver::StaticResolver;
