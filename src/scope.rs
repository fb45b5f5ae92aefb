//! Scoped reads and writes over a document.
//!
//! The [`Serializer`] owns a [`Document`] and a current [`Scope`]. Every path
//! it is given is resolved relative to that scope, so after entering a nested
//! class once, its members can be read and written by their short names.
//!
//! ## Examples
//!
//! ```rust
//! use serde_kff::{from_str, Serializer};
//!
//! let doc = from_str("player.kff", "Player = { Health = 50; Name = \"Ann\"; };").unwrap();
//! let mut ser = Serializer::new(doc);
//!
//! ser.enter("Player").unwrap();
//! assert_eq!(ser.read_integer("Health").unwrap(), 50);
//! ser.write_tag("", "Level", 3).unwrap();
//! ser.leave();
//!
//! assert_eq!(ser.read_integer("Player.Level").unwrap(), 3);
//! ```

use crate::path::IntoPath;
use crate::{
    Analysis, Class, DataType, Document, Error, List, Name, Node, Path, Result, Scope, Tag, Value,
};

/// Path-addressed access to a document.
#[derive(Clone, Debug)]
pub struct Serializer {
    document: Document,
    scope: Scope,
    saved: Vec<Scope>,
}

impl Serializer {
    /// Wraps `document`, starting at its root.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Serializer {
            document,
            scope: Scope::root(),
            saved: Vec::new(),
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// The location every path is currently resolved from.
    #[must_use]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Resolves `path` from the current scope; with `commit`, the result becomes the new scope.
    ///
    /// # Errors
    ///
    /// Returns the resolution error of [`Document::resolve`]. The scope is left
    /// unchanged on failure.
    pub fn move_scope(&mut self, path: impl IntoPath, commit: bool) -> Result<Node<'_>> {
        let scope = self.locate(path)?;
        if commit {
            tracing::debug!(from = %self.scope, to = %scope, "moving scope");
            self.scope = scope;
            self.node(&self.scope)
        } else {
            self.node(&scope)
        }
    }

    /// Returns to the document root. Saved scopes are kept.
    pub fn reset_scope(&mut self) {
        self.scope = Scope::root();
    }

    /// Saves the current scope and moves to `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::{from_str, Serializer};
    ///
    /// let doc = from_str("doc", "A = { B = { C = 1; }; };").unwrap();
    /// let mut ser = Serializer::new(doc);
    ///
    /// ser.enter("A").unwrap();
    /// ser.enter("B").unwrap();
    /// assert_eq!(ser.scope().to_string(), "A.B");
    /// ser.leave();
    /// assert_eq!(ser.scope().to_string(), "A");
    /// ```
    pub fn enter(&mut self, path: impl IntoPath) -> Result<()> {
        let scope = self.locate(path)?;
        tracing::debug!(from = %self.scope, to = %scope, "entering scope");
        let previous = std::mem::replace(&mut self.scope, scope);
        self.saved.push(previous);
        Ok(())
    }

    /// Restores the scope saved by the matching [`Serializer::enter`].
    ///
    /// Returns the scope being left, or `None` (and changes nothing) if no scope was saved.
    pub fn leave(&mut self) -> Option<Scope> {
        let previous = self.saved.pop()?;
        tracing::debug!(from = %self.scope, to = %previous, "leaving scope");
        Some(std::mem::replace(&mut self.scope, previous))
    }

    /// Probes `path` without failing; an invalid path counts as not found.
    #[must_use]
    pub fn analyze(&self, path: impl IntoPath) -> Analysis {
        match path.into_path() {
            Ok(path) => self.document.analyze(&self.scope, &path),
            Err(_) => Analysis::default(),
        }
    }

    /// Returns the node at `path`.
    pub fn read(&self, path: impl IntoPath) -> Result<Node<'_>> {
        let scope = self.locate(path)?;
        self.node(&scope)
    }

    pub fn read_boolean(&self, path: impl IntoPath) -> Result<bool> {
        self.read_with(path, DataType::Boolean, Value::as_bool)
    }

    /// Reads an integer. Decimals are not narrowed.
    pub fn read_integer(&self, path: impl IntoPath) -> Result<i64> {
        self.read_with(path, DataType::Integer, Value::as_i64)
    }

    /// Reads a decimal, widening an integer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::{from_str, Serializer};
    ///
    /// let ser = Serializer::new(from_str("doc", "A = 2; B = 0.5;").unwrap());
    /// assert_eq!(ser.read_decimal("A").unwrap(), 2.0);
    /// assert_eq!(ser.read_decimal("B").unwrap(), 0.5);
    /// assert!(ser.read_integer("B").is_err());
    /// ```
    pub fn read_decimal(&self, path: impl IntoPath) -> Result<f64> {
        self.read_with(path, DataType::Decimal, Value::as_f64)
    }

    pub fn read_string(&self, path: impl IntoPath) -> Result<&str> {
        self.read_with(path, DataType::String, Value::as_str)
    }

    /// Adds or replaces the tag `name` in the class at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Name`] for an invalid name and [`Error::ReadWrite`] if
    /// the node at `path` does not hold a class.
    pub fn write_tag(
        &mut self,
        path: impl IntoPath,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let name = Name::new(name)?;
        let (path, scope) = self.locate_with_text(path)?;
        let class = self.class_at(&path, &scope)?;
        class.set(Tag::with_name(name, value));
        Ok(())
    }

    /// Adds or replaces the tag `name` with an empty class.
    pub fn write_class(&mut self, path: impl IntoPath, name: &str) -> Result<()> {
        self.write_tag(path, name, Class::new())
    }

    /// Adds or replaces the tag `name` with an empty list.
    pub fn write_list(&mut self, path: impl IntoPath, name: &str) -> Result<()> {
        self.write_tag(path, name, List::new())
    }

    /// Removes the tag `name` from the class at `path`, returning its value.
    pub fn remove_tag(&mut self, path: impl IntoPath, name: &str) -> Result<Option<Value>> {
        let (path, scope) = self.locate_with_text(path)?;
        let class = self.class_at(&path, &scope)?;
        Ok(class.remove(name))
    }

    /// Appends `value` to the list at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadWrite`] if the node at `path` does not hold a list and
    /// [`Error::TypeMismatch`] if `value` disagrees with the list type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::{from_str, Serializer, Error};
    ///
    /// let mut ser = Serializer::new(from_str("doc", "L = [1];").unwrap());
    /// ser.append_payload("L", 2).unwrap();
    /// assert!(matches!(ser.append_payload("L", "x"), Err(Error::TypeMismatch { .. })));
    /// assert_eq!(ser.read_integer("L.1").unwrap(), 2);
    /// ```
    pub fn append_payload(&mut self, path: impl IntoPath, value: impl Into<Value>) -> Result<()> {
        let (path, scope) = self.locate_with_text(path)?;
        let found = self.node(&scope)?.data_type();
        let list = self.document.list_mut(&scope).ok_or_else(|| {
            Error::read_write(&path, &format!("expected a List, found {}", found))
        })?;
        list.push(value.into())
    }

    /// Appends an empty class to the list at `path`.
    pub fn append_class(&mut self, path: impl IntoPath) -> Result<()> {
        self.append_payload(path, Class::new())
    }

    /// Appends an empty list to the list at `path`.
    pub fn append_list(&mut self, path: impl IntoPath) -> Result<()> {
        self.append_payload(path, List::new())
    }

    fn locate(&self, path: impl IntoPath) -> Result<Scope> {
        let path = path.into_path()?;
        self.document.resolve(&self.scope, &path)
    }

    fn locate_with_text(&self, path: impl IntoPath) -> Result<(String, Scope)> {
        let path: Path = path.into_path()?;
        let scope = self.document.resolve(&self.scope, &path)?;
        Ok((path.to_string(), scope))
    }

    fn node(&self, scope: &Scope) -> Result<Node<'_>> {
        self.document
            .node(scope)
            .ok_or_else(|| Error::read_write(&scope.to_string(), "node no longer exists"))
    }

    fn class_at(&mut self, path: &str, scope: &Scope) -> Result<&mut Class> {
        let found = self.node(scope)?.data_type();
        self.document
            .class_mut(scope)
            .ok_or_else(|| Error::read_write(path, &format!("expected a Class, found {}", found)))
    }

    fn read_with<'a, T>(
        &'a self,
        path: impl IntoPath,
        expected: DataType,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T> {
        let (path, scope) = self.locate_with_text(path)?;
        let node = self.node(&scope)?;
        node.value().and_then(extract).ok_or_else(|| {
            Error::read_write(
                &path,
                &format!("expected {}, found {}", expected, node.data_type()),
            )
        })
    }
}

impl From<Document> for Serializer {
    fn from(document: Document) -> Self {
        Serializer::new(document)
    }
}
