//! Dotted addresses into a KFF tree.
//!
//! A [`Path`] is a sequence of [`Segment`]s written joined by `.`:
//!
//! - `Name`: descend into a class by tag name
//! - `3`: descend into a list by position
//! - `{0}`: placeholder, replaced by an index supplied at construction
//! - `<`: step back to the enclosing tag, list element or document
//!
//! The empty string is the identity path.
//!
//! ## Examples
//!
//! ```rust
//! use serde_kff::{Path, Segment};
//!
//! let path: Path = "Objects.3.Name".parse().unwrap();
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.segments()[1], Segment::Indexed(3));
//!
//! let templated = Path::with_args("Objects.{0}.Name", &[3]).unwrap();
//! assert_eq!(templated, path);
//! ```

use crate::syntax;
use crate::{Error, Name, Result};
use std::fmt;
use std::str::FromStr;

/// One step of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Named(Name),
    Indexed(usize),
    Backward,
}

impl Segment {
    #[inline]
    #[must_use]
    pub const fn is_backward(&self) -> bool {
        matches!(self, Segment::Backward)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Named(name) => f.write_str(name),
            Segment::Indexed(index) => write!(f, "{}", index),
            Segment::Backward => write!(f, "{}", syntax::PATH_BACKWARD),
        }
    }
}

impl From<Name> for Segment {
    fn from(name: Name) -> Self {
        Segment::Named(name)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Indexed(index)
    }
}

/// A parsed address.
///
/// # Examples
///
/// ```rust
/// use serde_kff::Path;
///
/// assert!(Path::new("").unwrap().is_empty());
/// assert_eq!(Path::new("A.B.C.<").unwrap().to_string(), "A.B.C.<");
///
/// assert!(Path::new("A..B").is_err());
/// assert!(Path::new("A.{0}").is_err());
/// assert!(Path::new("A.b-c").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The identity path.
    #[must_use]
    pub fn root() -> Self {
        Path::default()
    }

    /// Parses a path with no placeholder arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for a malformed path, or one containing a placeholder.
    pub fn new(path: &str) -> Result<Self> {
        Path::with_args(path, &[])
    }

    /// Parses a path, replacing each `{N}` with `Indexed(args[N])`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for a malformed segment or placeholder, or
    /// when `N` is out of range of `args`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::Path;
    ///
    /// let path = Path::with_args("Objects.{0}.Vertices.{1}", &[2, 7]).unwrap();
    /// assert_eq!(path.to_string(), "Objects.2.Vertices.7");
    ///
    /// assert!(Path::with_args("Objects.{1}", &[2]).is_err());
    /// ```
    pub fn with_args(path: &str, args: &[usize]) -> Result<Self> {
        if path.is_empty() {
            return Ok(Path::root());
        }
        let segments = path
            .split(syntax::PATH_SEGMENT_SEPARATOR)
            .map(|segment| parse_segment(path, segment, args))
            .collect::<Result<Vec<_>>>()?;
        Ok(Path { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Appends one segment.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.segments.push(segment.into());
    }

    /// Returns this path followed by `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::Path;
    ///
    /// let a = Path::new("A.B").unwrap();
    /// let b = Path::new("<.C").unwrap();
    /// assert_eq!(a.join(&b).to_string(), "A.B.<.C");
    /// ```
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }
}

fn parse_segment(path: &str, segment: &str, args: &[usize]) -> Result<Segment> {
    let invalid = |msg: String| Error::invalid_path(path, &msg);

    if segment.is_empty() {
        return Err(invalid("empty segment".to_string()));
    }
    if segment.starts_with(syntax::PATH_BACKWARD) {
        return if segment.len() == 1 {
            Ok(Segment::Backward)
        } else {
            Err(invalid(format!(
                "'{}' must stand alone, found '{}'",
                syntax::PATH_BACKWARD,
                segment
            )))
        };
    }
    if let Some(rest) = segment.strip_prefix(syntax::PLACEHOLDER_OPENING) {
        let inner = rest
            .strip_suffix(syntax::PLACEHOLDER_CLOSING)
            .ok_or_else(|| invalid(format!("unterminated placeholder '{}'", segment)))?;
        let n = parse_index(inner)
            .ok_or_else(|| invalid(format!("malformed placeholder '{}'", segment)))?;
        return args.get(n).map(|&index| Segment::Indexed(index)).ok_or_else(|| {
            invalid(format!(
                "placeholder '{}' needs argument {}, but {} were supplied",
                segment,
                n,
                args.len()
            ))
        });
    }
    if segment.starts_with(|c: char| syntax::is_digit(c)) {
        return parse_index(segment)
            .map(Segment::Indexed)
            .ok_or_else(|| invalid(format!("malformed index '{}'", segment)));
    }
    syntax::check_name(segment)
        .map(|()| Segment::Named(Name::new_unchecked(segment.to_string())))
        .map_err(|reason| invalid(format!("bad tag name '{}': {}", segment, reason)))
}

fn parse_index(s: &str) -> Option<usize> {
    if s.is_empty() || !s.chars().all(syntax::is_digit) {
        return None;
    }
    s.parse().ok()
}

/// Anything the scoped operations accept as a path.
///
/// Strings are parsed without placeholder arguments; use [`Path::with_args`]
/// for templated paths.
pub trait IntoPath {
    fn into_path(self) -> Result<Path>;
}

impl IntoPath for Path {
    fn into_path(self) -> Result<Path> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Result<Path> {
        Ok(self.clone())
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Result<Path> {
        Path::new(self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Result<Path> {
        Path::new(self)
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Path::new(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Path::new(value)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path { segments }
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Path {
            segments: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", syntax::PATH_SEGMENT_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
