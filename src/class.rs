//! Ordered container of uniquely named tags.
//!
//! [`Class`] wraps an [`IndexMap`] keyed by [`Name`], so tag order is the
//! order in which tags were first added and names are unique by construction.
//!
//! ## Examples
//!
//! ```rust
//! use serde_kff::{Class, Tag, Value};
//!
//! let mut class = Class::new();
//! class.set(Tag::new("Health", 50).unwrap());
//! class.set(Tag::new("Id", "abcd").unwrap());
//!
//! assert_eq!(class.len(), 2);
//! assert_eq!(class.try_get("Id").and_then(|v| v.as_str()), Some("abcd"));
//! ```

use crate::{Error, Name, Result, Tag, Value};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// An ordered set of tags with unique names.
///
/// Replacing a tag keeps its position; new tags go to the end. Two classes are
/// equal only if they hold equal tags in the same order.
///
/// # Examples
///
/// ```rust
/// use serde_kff::{Class, Tag};
///
/// let mut class = Class::new();
/// class.set(Tag::new("First", 1).unwrap());
/// class.set(Tag::new("Second", 2).unwrap());
/// class.set(Tag::new("First", 3).unwrap());
///
/// let names: Vec<_> = class.names().map(|n| n.as_str()).collect();
/// assert_eq!(names, vec!["First", "Second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Class(IndexMap<Name, Value>);

impl Class {
    #[must_use]
    pub fn new() -> Self {
        Class(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Class(IndexMap::with_capacity(capacity))
    }

    /// Returns `true` if a tag called `name` exists.
    #[inline]
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the value of the tag called `name`, if any.
    #[inline]
    #[must_use]
    pub fn try_get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the value of the tag called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Presence`] if there is no such tag.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.0
            .get(name)
            .ok_or_else(|| Error::presence(name, 0, &format!("no tag named '{}'", name)))
    }

    /// Returns the stored name and value of the tag called `name`.
    #[inline]
    #[must_use]
    pub fn get_key_value(&self, name: &str) -> Option<(&Name, &Value)> {
        self.0.get_key_value(name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.0.get_mut(name)
    }

    /// Returns the tag at `index` in tag order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&Name, &Value)> {
        self.0.get_index(index)
    }

    /// Returns every tag in order.
    pub fn get_all(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.0.iter()
    }

    /// Adds `tag`, replacing the value of an existing tag with the same name in place.
    ///
    /// Returns the replaced value, if any.
    pub fn set(&mut self, tag: Tag) -> Option<Value> {
        let (name, value) = tag.into_parts();
        self.0.insert(name, value)
    }

    /// Removes the tag called `name`, keeping the order of the others.
    ///
    /// Absent names are ignored.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.0.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Name, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, Name, Value> {
        self.0.iter_mut()
    }

    /// Converts the class into its tags, in order.
    #[must_use]
    pub fn into_tags(self) -> Vec<Tag> {
        self.0
            .into_iter()
            .map(|(name, value)| Tag::with_name(name, value))
            .collect()
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl<'a> IntoIterator for &'a Class {
    type Item = (&'a Name, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Name, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Class {
    type Item = (Name, Value);
    type IntoIter = indexmap::map::IntoIter<Name, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Tag> for Class {
    /// Later tags replace earlier ones with the same name.
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut class = Class::new();
        for tag in iter {
            class.set(tag);
        }
        class
    }
}

impl Extend<Tag> for Class {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        for tag in iter {
            self.set(tag);
        }
    }
}

impl Serialize for Class {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name.as_str(), value)?;
        }
        map.end()
    }
}
