// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and the merge contract.
//!
//! This module contains the core domain types for the configuration
//! composition crate. It is independent of any external concerns and defines
//! the fundamental concepts used throughout the library.

pub mod config_map;
pub mod config_value;
pub mod errors;
pub mod overlay;
pub mod token;

// Re-export commonly used types
pub use config_map::ConfigMap;
pub use config_value::ConfigValue;
pub use errors::{BoxedError, ConfigError, Result, SharedError};
pub use overlay::Overlay;
pub use token::Token;
