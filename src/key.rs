//! Dictionary keys and the key-formatting policy.
//!
//! Property-list dictionary keys are always strings. Native map keys reach the
//! document in two steps:
//!
//! 1. The key type implements [`ToPlistKey`], which renders it as text. Native
//!    text types also report themselves through [`ToPlistKey::as_text`].
//! 2. A [`KeyFormatter`] turns the key into the final dictionary key. The
//!    default formatter uses native text verbatim and otherwise asks the key to
//!    render itself; other formatters can rewrite or reject keys.
//!
//! ## Examples
//!
//! ```rust
//! use plist_protocols::{KeyFormatter, ToPlistKey};
//!
//! struct Slot(u32);
//!
//! impl ToPlistKey for Slot {
//!     fn to_plist_key(&self) -> String {
//!         format!("slot-{}", self.0)
//!     }
//! }
//!
//! let formatter = KeyFormatter::text_only();
//! assert!(formatter.format(&"name").is_ok());
//! assert!(formatter.format(&Slot(1)).is_err());
//! ```

use crate::{Error, Result};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Anything that can be used as a property-list dictionary key.
///
/// Integers and other scalars deliberately do not implement this trait; wrap
/// them in a type that decides how they are spelled as keys.
pub trait ToPlistKey {
    /// Renders this key as dictionary key text.
    fn to_plist_key(&self) -> String;

    /// Returns the key unchanged when it already is native text.
    ///
    /// Key formatters use this to tell text keys apart from keys that had to be
    /// rendered. The default returns `None`.
    fn as_text(&self) -> Option<&str> {
        None
    }
}

impl ToPlistKey for str {
    fn to_plist_key(&self) -> String {
        self.to_string()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ToPlistKey for String {
    fn to_plist_key(&self) -> String {
        self.clone()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ToPlistKey for Cow<'_, str> {
    fn to_plist_key(&self) -> String {
        self.to_string()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ToPlistKey for Box<str> {
    fn to_plist_key(&self) -> String {
        self.to_string()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ToPlistKey for Rc<str> {
    fn to_plist_key(&self) -> String {
        self.to_string()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ToPlistKey for Arc<str> {
    fn to_plist_key(&self) -> String {
        self.to_string()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ToPlistKey for char {
    fn to_plist_key(&self) -> String {
        self.to_string()
    }
}

impl<K: ToPlistKey + ?Sized> ToPlistKey for &K {
    fn to_plist_key(&self) -> String {
        (**self).to_plist_key()
    }

    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }
}

type FormatFn = dyn Fn(&dyn ToPlistKey) -> Result<String> + Send + Sync;

/// A swappable policy turning native keys into dictionary keys.
///
/// Formatters are cheap to clone and safe to share between threads. They are
/// carried by [`ConvertOptions`](crate::ConvertOptions) and chosen per
/// conversion call; there is no process-wide default to mutate.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::KeyFormatter;
///
/// let lower = KeyFormatter::lowercase();
/// assert_eq!(lower.format(&"Content-Type").unwrap(), "content-type");
///
/// let ns = KeyFormatter::prefixed("com.example.");
/// assert_eq!(ns.format(&"timeout").unwrap(), "com.example.timeout");
///
/// let custom = KeyFormatter::new(|key| Ok(key.to_plist_key().replace(' ', "_")));
/// assert_eq!(custom.format(&"two words").unwrap(), "two_words");
/// ```
#[derive(Clone)]
pub struct KeyFormatter {
    name: &'static str,
    format: Arc<FormatFn>,
}

impl KeyFormatter {
    /// Wraps a custom formatting function.
    pub fn new<F>(format: F) -> Self
    where
        F: Fn(&dyn ToPlistKey) -> Result<String> + Send + Sync + 'static,
    {
        Self::named("custom", format)
    }

    fn named<F>(name: &'static str, format: F) -> Self
    where
        F: Fn(&dyn ToPlistKey) -> Result<String> + Send + Sync + 'static,
    {
        KeyFormatter {
            name,
            format: Arc::new(format),
        }
    }

    /// Native text keys are used verbatim, everything else renders itself.
    #[must_use]
    pub fn verbatim() -> Self {
        Self::named("verbatim", |key| Ok(default_key(key)))
    }

    /// Lower-cases every key after default rendering.
    #[must_use]
    pub fn lowercase() -> Self {
        Self::named("lowercase", |key| Ok(default_key(key).to_lowercase()))
    }

    /// Prepends `namespace` to every key after default rendering.
    #[must_use]
    pub fn prefixed(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self::named("prefixed", move |key| {
            Ok(format!("{}{}", namespace, default_key(key)))
        })
    }

    /// Accepts native text keys only and rejects any key that had to be rendered.
    #[must_use]
    pub fn text_only() -> Self {
        Self::named("text_only", |key| match key.as_text() {
            Some(text) => Ok(text.to_string()),
            None => Err(Error::key_rejected(
                &key.to_plist_key(),
                "only native text keys are allowed",
            )),
        })
    }

    /// Formats a single key.
    ///
    /// # Errors
    ///
    /// Returns whatever error the policy raises, typically [`Error::KeyRejected`].
    pub fn format(&self, key: &dyn ToPlistKey) -> Result<String> {
        (self.format)(key)
    }
}

impl Default for KeyFormatter {
    fn default() -> Self {
        Self::verbatim()
    }
}

impl fmt::Debug for KeyFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyFormatter").field(&self.name).finish()
    }
}

fn default_key(key: &dyn ToPlistKey) -> String {
    match key.as_text() {
        Some(text) => text.to_string(),
        None => key.to_plist_key(),
    }
}
