// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration token newtype and the naming scheme for scoped entries.
//!
//! Every value a factory stores lives under a string token derived from the
//! configuration scope and, for feature entries, the feature name. Because
//! the scope is always the token prefix, tokens from different scopes can
//! never collide.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Separator between a scope and a feature name in client tokens.
const FEATURE_SEPARATOR: &str = "_Feature_";

/// Separator between a scope and a feature name in feature-option tokens.
const FEATURE_OPTIONS_SEPARATOR: &str = "_Feature_Options_";

/// A registration token identifying one stored entry within a scope.
///
/// Tokens come in three categories, each derived by a pure constructor:
/// the root configuration token, the per-feature options token, and the
/// per-feature client token. The same inputs always produce the same token.
///
/// Feature names are joined to the scope with an underscore separator and
/// are not escaped. A feature name that itself contains the separator can
/// therefore produce an ambiguous token; callers are responsible for
/// choosing feature names that avoid this.
///
/// # Examples
///
/// ```
/// use featcfg::domain::token::Token;
///
/// let root = Token::root("queue");
/// let client = Token::feature("queue", "orders");
///
/// assert_eq!(root.as_str(), "queue");
/// assert_eq!(client.as_str(), "queue_Feature_orders");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Returns the token under which a scope's root configuration is stored.
    ///
    /// The root token is the scope name itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use featcfg::domain::token::Token;
    ///
    /// assert_eq!(Token::root("queue").as_str(), "queue");
    /// ```
    pub fn root(scope: &str) -> Self {
        Token(scope.to_string())
    }

    /// Returns the token under which a feature's option overrides are stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use featcfg::domain::token::Token;
    ///
    /// let token = Token::feature_options("queue", "orders");
    /// assert_eq!(token.as_str(), "queue_Feature_Options_orders");
    /// ```
    pub fn feature_options(scope: &str, feature: &str) -> Self {
        Token(format!("{}{}{}", scope, FEATURE_OPTIONS_SEPARATOR, feature))
    }

    /// Returns the token under which a feature's client entry is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use featcfg::domain::token::Token;
    ///
    /// let token = Token::feature("queue", "orders");
    /// assert_eq!(token.as_str(), "queue_Feature_orders");
    /// ```
    pub fn feature(scope: &str, feature: &str) -> Self {
        Token(format!("{}{}{}", scope, FEATURE_SEPARATOR, feature))
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `Token` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
