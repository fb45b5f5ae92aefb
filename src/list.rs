//! Ordered container of same-typed payloads.

use crate::{DataType, Error, Result, Value};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// A homogeneous sequence of payloads.
///
/// The element type is fixed by the first element and reset to
/// [`DataType::EmptyList`] whenever the list becomes empty.
///
/// # Examples
///
/// ```rust
/// use serde_kff::{List, Value, DataType, Error};
///
/// let mut list = List::new();
/// assert_eq!(list.list_type(), DataType::EmptyList);
///
/// list.add([Value::from(1), Value::from(2)]).unwrap();
/// assert_eq!(list.list_type(), DataType::Integer);
///
/// let err = list.push(Value::from("three")).unwrap_err();
/// assert!(matches!(err, Error::TypeMismatch { .. }));
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    list_type: DataType,
    items: Vec<Value>,
}

impl Default for List {
    fn default() -> Self {
        List::new()
    }
}

impl List {
    #[must_use]
    pub fn new() -> Self {
        List {
            list_type: DataType::EmptyList,
            items: Vec::new(),
        }
    }

    /// Builds a list from `items`, checking that they share one type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] on the first element whose type differs from the first.
    pub fn from_values(items: impl IntoIterator<Item = Value>) -> Result<Self> {
        let items: Vec<Value> = items.into_iter().collect();
        let mut list = List::new();
        if !items.is_empty() {
            list.add(items)?;
        }
        Ok(list)
    }

    #[inline]
    #[must_use]
    pub fn list_type(&self) -> DataType {
        self.list_type
    }

    #[inline]
    #[must_use]
    pub fn has(&self, index: usize) -> bool {
        index < self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn try_get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Presence`] if `index` is out of range.
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.items
            .get(index)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Callers must not change the element's type.
    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Replaces the element at `index` with a value of the same type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Presence`] for an out-of-range index and
    /// [`Error::TypeMismatch`] for a value of another type.
    pub fn set(&mut self, index: usize, value: Value) -> Result<Value> {
        if !self.has(index) {
            return Err(self.out_of_range(index));
        }
        self.check(value.data_type())?;
        Ok(std::mem::replace(&mut self.items[index], value))
    }

    #[must_use]
    pub fn get_all(&self) -> &[Value] {
        &self.items
    }

    /// Appends every value of `values`.
    ///
    /// The whole batch is checked first, so a failed call leaves the list untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyAppend`] when `values` is empty and
    /// [`Error::TypeMismatch`] when any value disagrees with the list type.
    pub fn add(&mut self, values: impl IntoIterator<Item = Value>) -> Result<()> {
        let values: Vec<Value> = values.into_iter().collect();
        let first = values.first().ok_or(Error::EmptyAppend)?.data_type();
        let expected = if self.items.is_empty() {
            first
        } else {
            self.list_type
        };
        if let Some(bad) = values.iter().find(|v| v.data_type() != expected) {
            return Err(Error::type_mismatch(expected, bad.data_type(), None));
        }
        self.list_type = expected;
        self.items.extend(values);
        Ok(())
    }

    /// Appends one value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when `value` disagrees with the list type.
    pub fn push(&mut self, value: Value) -> Result<()> {
        self.check(value.data_type())?;
        self.list_type = value.data_type();
        self.items.push(value);
        Ok(())
    }

    /// Appends without checking. The parser has already checked the type.
    pub(crate) fn push_unchecked(&mut self, value: Value) {
        debug_assert!(self.items.is_empty() || value.data_type() == self.list_type);
        self.list_type = value.data_type();
        self.items.push(value);
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Presence`] if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        if !self.has(index) {
            return Err(self.out_of_range(index));
        }
        let value = self.items.remove(index);
        if self.items.is_empty() {
            self.list_type = DataType::EmptyList;
        }
        Ok(value)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.list_type = DataType::EmptyList;
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }

    fn check(&self, found: DataType) -> Result<()> {
        if self.items.is_empty() || found == self.list_type {
            Ok(())
        } else {
            Err(Error::type_mismatch(self.list_type, found, None))
        }
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::presence(
            &index.to_string(),
            0,
            &format!("index {} is out of range for a list of {}", index, self.items.len()),
        )
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl TryFrom<Vec<Value>> for List {
    type Error = Error;

    fn try_from(items: Vec<Value>) -> Result<Self> {
        List::from_values(items)
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}
