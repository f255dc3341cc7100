//! Configuration options for conversion.
//!
//! This module provides types to customize how native values become a
//! property-list tree:
//!
//! - [`ConvertOptions`]: Main configuration struct
//! - [`DuplicateKeyPolicy`]: What to do when two keys format to the same text
//!
//! Options are passed by reference to each conversion call and are never
//! mutated during it.
//!
//! ## Examples
//!
//! ```rust
//! use plist_protocols::{ConvertOptions, DuplicateKeyPolicy, KeyFormatter};
//!
//! let options = ConvertOptions::new()
//!     .with_key_formatter(KeyFormatter::lowercase())
//!     .with_duplicate_keys(DuplicateKeyPolicy::Reject)
//!     .with_max_depth(Some(64));
//!
//! assert_eq!(options.max_depth, Some(64));
//! ```

use crate::KeyFormatter;

/// Nesting depth allowed by [`ConvertOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Resolution for dictionary keys that collide after formatting.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::DuplicateKeyPolicy;
///
/// assert_eq!(DuplicateKeyPolicy::default(), DuplicateKeyPolicy::LastWriteWins);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateKeyPolicy {
    /// A later entry replaces an earlier one with the same key. The key keeps
    /// the position of its first occurrence.
    #[default]
    LastWriteWins,
    /// The conversion fails with [`Error::DuplicateKey`](crate::Error::DuplicateKey).
    Reject,
}

/// Configuration options for converting values into property-list trees.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::{ConvertOptions, DuplicateKeyPolicy, DEFAULT_MAX_DEPTH};
///
/// let options = ConvertOptions::new();
/// assert_eq!(options.duplicate_keys, DuplicateKeyPolicy::LastWriteWins);
/// assert_eq!(options.max_depth, Some(DEFAULT_MAX_DEPTH));
///
/// // Unlimited nesting
/// let options = ConvertOptions::new().with_max_depth(None);
/// assert!(options.max_depth.is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub key_formatter: KeyFormatter,
    pub duplicate_keys: DuplicateKeyPolicy,
    pub max_depth: Option<usize>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            key_formatter: KeyFormatter::default(),
            duplicate_keys: DuplicateKeyPolicy::default(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ConvertOptions {
    /// Creates default options: verbatim keys, last write wins, depth limit of
    /// [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that fail on any key collision.
    #[must_use]
    pub fn strict() -> Self {
        ConvertOptions {
            duplicate_keys: DuplicateKeyPolicy::Reject,
            ..Default::default()
        }
    }

    /// Sets the policy used to turn native map keys into dictionary keys.
    #[must_use]
    pub fn with_key_formatter(mut self, key_formatter: KeyFormatter) -> Self {
        self.key_formatter = key_formatter;
        self
    }

    /// Sets the policy for keys that collide after formatting.
    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Sets the maximum number of nested containers, or `None` for no limit.
    ///
    /// Without a limit a pathologically deep value can exhaust the stack.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
