//! Documents, locations and path resolution.
//!
//! A [`Document`] owns the root [`Class`] of a tree. Nodes inside it are
//! addressed by [`Scope`]: the chain of tag names and list indices leading
//! from the root to the node. Nodes keep no reference to their parent;
//! stepping back pops the last link of the chain.
//!
//! ## Examples
//!
//! ```rust
//! use serde_kff::{from_str, Path, Scope, Value};
//!
//! let doc = from_str("doc", "A = { B = { C = 5; }; }; L = [1,2,3];").unwrap();
//!
//! let c = doc.get(&Path::new("A.B.C").unwrap()).unwrap();
//! assert!(c.is_tag());
//! assert_eq!(c.value(), Some(&Value::Integer(5)));
//!
//! let b = doc.resolve(&Scope::root(), &Path::new("A.B.C.<").unwrap()).unwrap();
//! assert_eq!(b.to_string(), "A.B");
//! ```

use crate::{Class, DataType, Error, List, Name, Path, Result, Segment, Value};
use serde::{Serialize, Serializer};
use std::fmt;

/// One link of a [`Scope`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// A tag of a class.
    Name(Name),
    /// An element of a list.
    Index(usize),
}

/// The absolute location of a node: the document itself, a tag, or a list element.
///
/// Scopes are plain values; they stay valid as long as the nodes they pass
/// through are not removed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scope {
    steps: Vec<Step>,
}

impl Scope {
    /// The location of the document itself.
    #[must_use]
    pub fn root() -> Self {
        Scope::default()
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// The path leading from the document root to this location.
    #[must_use]
    pub fn to_path(&self) -> Path {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Name(name) => Segment::Named(name.clone()),
                Step::Index(index) => Segment::Indexed(*index),
            })
            .collect()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// A node reached by path resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node<'a> {
    /// The document, seen through its root class.
    Document(&'a Class),
    Tag { name: &'a Name, value: &'a Value },
    /// An element of a list.
    Payload { index: usize, value: &'a Value },
}

impl<'a> Node<'a> {
    #[inline]
    #[must_use]
    pub const fn is_document(&self) -> bool {
        matches!(self, Node::Document(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_tag(&self) -> bool {
        matches!(self, Node::Tag { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_payload(&self) -> bool {
        matches!(self, Node::Payload { .. })
    }

    #[must_use]
    pub fn name(&self) -> Option<&'a Name> {
        match self {
            Node::Tag { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The value held by a tag or payload; `None` for the document.
    #[must_use]
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Node::Document(_) => None,
            Node::Tag { value, .. } | Node::Payload { value, .. } => Some(value),
        }
    }

    /// The document's root class, or the held class.
    #[must_use]
    pub fn as_class(&self) -> Option<&'a Class> {
        match self {
            Node::Document(root) => Some(root),
            Node::Tag { value, .. } | Node::Payload { value, .. } => value.as_class(),
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&'a List> {
        self.value().and_then(Value::as_list)
    }

    /// The document counts as a class.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.value().map_or(DataType::Class, Value::data_type)
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        match self {
            Node::Document(root) => root.len(),
            Node::Tag { value, .. } | Node::Payload { value, .. } => value.child_count(),
        }
    }
}

/// Outcome of [`Document::analyze`]. A failed resolution gives the default,
/// with `found == false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    pub found: bool,
    pub is_tag: bool,
    pub is_payload: bool,
    pub child_count: usize,
}

impl From<Node<'_>> for Analysis {
    fn from(node: Node<'_>) -> Self {
        Analysis {
            found: true,
            is_tag: node.is_tag(),
            is_payload: node.is_payload(),
            child_count: node.child_count(),
        }
    }
}

/// A named KFF document.
///
/// The name is only used in diagnostics; two documents are equal when their
/// tags are.
///
/// # Examples
///
/// ```rust
/// use serde_kff::{Document, Tag};
///
/// let mut doc = Document::new("settings.kff");
/// doc.root_mut().set(Tag::new("Volume", 0.8).unwrap());
/// assert_eq!(doc.to_string(), "Volume=0.8;");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Document {
    name: String,
    root: Class,
}

impl Document {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Document::from_root(name, Class::new())
    }

    #[must_use]
    pub fn from_root(name: impl Into<String>, root: Class) -> Self {
        Document {
            name: name.into(),
            root,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn root(&self) -> &Class {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Class {
        &mut self.root
    }

    #[must_use]
    pub fn into_root(self) -> Class {
        self.root
    }

    /// Returns the node at `scope`, or `None` if the location no longer exists.
    #[must_use]
    pub fn node(&self, scope: &Scope) -> Option<Node<'_>> {
        let mut node = Node::Document(&self.root);
        for step in &scope.steps {
            node = match step {
                Step::Name(name) => {
                    let (name, value) = node.as_class()?.get_key_value(name)?;
                    Node::Tag { name, value }
                }
                Step::Index(index) => Node::Payload {
                    index: *index,
                    value: node.as_list()?.try_get(*index)?,
                },
            };
        }
        Some(node)
    }

    /// Resolves `path` starting at `scope`, returning the location reached.
    ///
    /// # Errors
    ///
    /// - [`Error::Presence`] if a named tag or index is absent
    /// - [`Error::ReadWrite`] if a segment does not apply to the node it meets
    ///   (an index into a class, a name into a list, anything past a scalar,
    ///   stepping back from the root) or if `scope` no longer exists
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::{from_str, Error, Path, Scope};
    ///
    /// let doc = from_str("doc", "A = { B = 1; }; L = [1, 2];").unwrap();
    /// let root = Scope::root();
    ///
    /// assert!(doc.resolve(&root, &"A.B".parse().unwrap()).is_ok());
    /// assert!(matches!(doc.resolve(&root, &"A.X".parse().unwrap()), Err(Error::Presence { .. })));
    /// assert!(matches!(doc.resolve(&root, &"A.0".parse().unwrap()), Err(Error::ReadWrite { .. })));
    /// assert!(matches!(doc.resolve(&root, &"L.B".parse().unwrap()), Err(Error::ReadWrite { .. })));
    /// ```
    pub fn resolve(&self, scope: &Scope, path: &Path) -> Result<Scope> {
        let text = || path.to_string();
        let mut steps = scope.steps.clone();
        let mut node = self.node(scope).ok_or_else(|| {
            Error::read_write(&text(), &format!("scope '{}' no longer exists", scope))
        })?;

        for (position, segment) in path.iter().enumerate() {
            node = match segment {
                Segment::Backward => {
                    if steps.pop().is_none() {
                        return Err(Error::read_write(
                            &text(),
                            &format!("segment {}: cannot step back from the document root", position),
                        ));
                    }
                    self.node(&Scope {
                        steps: steps.clone(),
                    })
                    .ok_or_else(|| Error::read_write(&text(), "enclosing node vanished"))?
                }
                Segment::Named(wanted) => {
                    let class = node.as_class().ok_or_else(|| {
                        Error::read_write(
                            &text(),
                            &format!(
                                "segment {}: cannot look up tag '{}' in a {}",
                                position,
                                wanted,
                                node.data_type()
                            ),
                        )
                    })?;
                    let (name, value) = class.get_key_value(wanted).ok_or_else(|| {
                        Error::presence(&text(), position, &format!("no tag named '{}'", wanted))
                    })?;
                    steps.push(Step::Name(name.clone()));
                    Node::Tag { name, value }
                }
                Segment::Indexed(index) => {
                    let list = node.as_list().ok_or_else(|| {
                        Error::read_write(
                            &text(),
                            &format!(
                                "segment {}: cannot index into a {}",
                                position,
                                node.data_type()
                            ),
                        )
                    })?;
                    let value = list.try_get(*index).ok_or_else(|| {
                        Error::presence(
                            &text(),
                            position,
                            &format!("index {} is out of range for a list of {}", index, list.len()),
                        )
                    })?;
                    steps.push(Step::Index(*index));
                    Node::Payload {
                        index: *index,
                        value,
                    }
                }
            };
        }
        Ok(Scope { steps })
    }

    /// Resolves `path` from the document root and returns the node reached.
    pub fn get(&self, path: &Path) -> Result<Node<'_>> {
        let scope = self.resolve(&Scope::root(), path)?;
        self.node(&scope)
            .ok_or_else(|| Error::read_write(&path.to_string(), "node vanished"))
    }

    /// Probes `path` from `scope` without failing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::{from_str, Path, Scope};
    ///
    /// let doc = from_str("doc", "Abc = true; A = { Health = 50; Id = \"abcd\"; };").unwrap();
    ///
    /// let a = doc.analyze(&Scope::root(), &Path::new("A").unwrap());
    /// assert!(a.found && a.is_tag);
    /// assert_eq!(a.child_count, 2);
    ///
    /// assert!(!doc.analyze(&Scope::root(), &Path::new("Z").unwrap()).found);
    /// ```
    #[must_use]
    pub fn analyze(&self, scope: &Scope, path: &Path) -> Analysis {
        self.resolve(scope, path)
            .ok()
            .and_then(|scope| self.node(&scope))
            .map(Analysis::from)
            .unwrap_or_default()
    }

    /// Mutable access to the class at `scope`: the root, or a class held by a tag or payload.
    pub fn class_mut(&mut self, scope: &Scope) -> Option<&mut Class> {
        match scope.steps.split_first() {
            None => Some(&mut self.root),
            Some(_) => self.value_mut(scope)?.as_class_mut(),
        }
    }

    /// Mutable access to the list held by the tag or payload at `scope`.
    pub fn list_mut(&mut self, scope: &Scope) -> Option<&mut List> {
        self.value_mut(scope)?.as_list_mut()
    }

    /// List elements must keep their type, so this stays internal.
    pub(crate) fn value_mut(&mut self, scope: &Scope) -> Option<&mut Value> {
        let (first, rest) = scope.steps.split_first()?;
        let mut value = match first {
            Step::Name(name) => self.root.get_mut(name)?,
            Step::Index(_) => return None,
        };
        for step in rest {
            value = match (step, value) {
                (Step::Name(name), Value::Class(class)) => class.get_mut(name)?,
                (Step::Index(index), Value::List(list)) => list.get_mut(*index)?,
                _ => return None,
            };
        }
        Some(value)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl fmt::Display for Document {
    /// Compact KFF text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::to_string(self))
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root.serialize(serializer)
    }
}
