//! Named nodes.
//!
//! A [`Tag`] pairs a validated [`Name`] with one [`Value`]. Tags only ever live
//! inside a [`Class`](crate::Class) (or the document root, which is a class).

use crate::syntax;
use crate::{Error, Result, Value};
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// A tag identifier matching `[A-Za-z_][A-Za-z0-9_]*`.
///
/// The rule is checked once, at construction, so every `Name` in a tree is valid.
///
/// # Examples
///
/// ```rust
/// use serde_kff::Name;
///
/// let name = Name::new("Health").unwrap();
/// assert_eq!(name.as_str(), "Health");
/// assert!(Name::new("2nd").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    /// Validates `name` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Name`] if `name` is empty or breaks the identifier rule.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        syntax::check_name(&name).map_err(|reason| Error::name(&name, &reason))?;
        Ok(Name(name))
    }

    /// Wraps a string the caller has already matched against the identifier rule.
    pub(crate) fn new_unchecked(name: String) -> Self {
        debug_assert!(syntax::check_name(&name).is_ok());
        Name(name)
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Name::new(s)
    }
}

impl TryFrom<&str> for Name {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Name::new(value)
    }
}

impl TryFrom<String> for Name {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Name::new(value)
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// A named node holding one typed value.
///
/// # Examples
///
/// ```rust
/// use serde_kff::{Tag, Value, DataType};
///
/// let tag = Tag::new("Health", 50).unwrap();
/// assert_eq!(tag.name(), "Health");
/// assert_eq!(tag.data_type(), DataType::Integer);
///
/// assert!(Tag::new("bad name", true).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    name: Name,
    value: Value,
}

impl Tag {
    /// Creates a tag, validating `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Name`] if `name` breaks the identifier rule.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        Ok(Tag {
            name: Name::new(name)?,
            value: value.into(),
        })
    }

    /// Creates a tag from an already validated name.
    #[must_use]
    pub fn with_name(name: Name, value: impl Into<Value>) -> Self {
        Tag {
            name,
            value: value.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    #[inline]
    #[must_use]
    pub fn data_type(&self) -> crate::DataType {
        self.value.data_type()
    }

    #[must_use]
    pub fn into_parts(self) -> (Name, Value) {
        (self.name, self.value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.name,
            syntax::NAME_PAYLOAD_SEPARATOR,
            self.value,
            syntax::TAG_END
        )
    }
}
