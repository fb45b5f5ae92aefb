//! # serde_kff
//!
//! A parser, round-trip writer and path query engine for the KFF tagged text format.
//!
//! ## What is KFF?
//!
//! KFF is a self-describing text format made of named **tags** carrying typed
//! **payloads**: booleans, 64-bit integers, IEEE-754 doubles, strings, ordered
//! homogeneous lists, and nested classes.
//!
//! ```text
//! Abc = true;
//! A = { Health = 50; Id = "abcd"; };
//! L = [1, 2, 3];
//! ```
//!
//! ## Key Features
//!
//! - **Round-trip Faithful**: `parse(write(tree)) == tree` under every formatting
//!   configuration, with bit-identical decimals
//! - **Path Queries**: read and write deeply nested values by address, e.g. `A.Position.Z`
//! - **Precise Errors**: parse failures carry the document name, line and column
//! - **Validate Mode**: check text with the same grammar without building a tree
//! - **Serde Integration**: value trees serialize to (and deserialize from) any Serde format
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_kff = "0.1"
//! ```
//!
//! ### Parsing and Writing
//!
//! ```rust
//! use serde_kff::{from_str, to_string, to_string_pretty};
//!
//! let doc = from_str("save.kff", "Abc = true; A = { Health = 50; Id = \"abcd\"; };").unwrap();
//! assert_eq!(doc.root().len(), 2);
//!
//! assert_eq!(to_string(&doc), "Abc=true;A={Health=50;Id=\"abcd\";};");
//!
//! let pretty = to_string_pretty(&doc);
//! assert_eq!(from_str("save.kff", &pretty).unwrap(), doc);
//! ```
//!
//! ### Path Queries
//!
//! ```rust
//! use serde_kff::{from_str, Path, Serializer};
//!
//! let doc = from_str("scene.kff", "Objects = [{ Name = \"cube\"; }, { Name = \"cone\"; }];").unwrap();
//! let mut ser = Serializer::new(doc);
//!
//! let path = Path::with_args("Objects.{0}.Name", &[1]).unwrap();
//! assert_eq!(ser.read_string(&path).unwrap(), "cone");
//!
//! ser.write_tag("Objects.0", "Scale", 2.0).unwrap();
//! assert_eq!(ser.read_decimal("Objects.0.Scale").unwrap(), 2.0);
//!
//! assert!(ser.analyze("Objects.1").found);
//! assert!(!ser.analyze("Objects.2").found);
//! ```
//!
//! ### Building Values with the kff! Macro
//!
//! ```rust
//! use serde_kff::{kff, Document, Tag};
//!
//! let position = kff!({ "X": 0.5, "Y": 1.0 });
//!
//! let mut doc = Document::new("generated.kff");
//! doc.root_mut().set(Tag::new("Position", position).unwrap());
//! assert_eq!(doc.to_string(), "Position={X=0.5;Y=1.0;};");
//! ```
//!
//! ## Logging
//!
//! Parsing, writing and scope moves emit `tracing` events at debug level.
//! The library installs no subscriber.
//!
//! ## Format Specification
//!
//! See the [`format`] module for the complete grammar and writing rules.

pub mod class;
pub mod de;
pub mod document;
pub mod error;
pub mod format;
pub mod list;
pub mod macros;
pub mod options;
pub mod path;
pub mod scope;
pub mod ser;
pub mod syntax;
pub mod tag;
pub mod value;

pub use class::Class;
pub use de::{Build, Parser, Sink, Validate, MAX_DEPTH};
pub use document::{Analysis, Document, Node, Scope, Step};
pub use error::{Error, Result, SourcePosition};
pub use list::List;
pub use options::{Around, FormatConfig, Indent};
pub use path::{IntoPath, Path, Segment};
pub use scope::Serializer;
pub use ser::Writer;
pub use tag::{Name, Tag};
pub use value::{DataType, Value};

use std::io;

/// Parses KFF text into a [`Document`] called `name`.
///
/// The name only appears in error messages.
///
/// # Examples
///
/// ```rust
/// use serde_kff::{from_str, Value};
///
/// let doc = from_str("doc", "A = { B = 1; };").unwrap();
/// let a = doc.root().get("A").unwrap().as_class().unwrap();
/// assert_eq!(a.get("B").unwrap(), &Value::Integer(1));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] or [`Error::UnexpectedEof`] for malformed text, with
/// line and column, and [`Error::TypeMismatch`] for a mixed-type list.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(name: &str, text: &str) -> Result<Document> {
    Parser::new(name, text).parse()
}

/// Checks KFF text without building a tree.
///
/// Accepts exactly the inputs [`from_str`] accepts and fails with the same errors.
///
/// # Examples
///
/// ```rust
/// use serde_kff::validate;
///
/// assert!(validate("doc", "A = 1; B = { C = [\"x\"]; };").is_ok());
/// assert!(validate("doc", "A = 1; A = 2;").is_err());
/// ```
///
/// # Errors
///
/// See [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn validate(name: &str, text: &str) -> Result<()> {
    Parser::validator(name, text).validate()
}

/// Parses KFF from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not valid KFF.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(name: &str, bytes: &[u8]) -> Result<Document> {
    let text = std::str::from_utf8(bytes).map_err(|e| Error::custom(e.to_string()))?;
    from_str(name, text)
}

/// Reads all of `reader` and parses it as KFF.
///
/// # Examples
///
/// ```rust
/// use serde_kff::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader("doc", Cursor::new(b"A = 1;")).unwrap();
/// assert_eq!(doc.root().len(), 1);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(name: &str, mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(name, &text)
}

/// Writes `document` as compact KFF text, with no whitespace.
#[must_use]
pub fn to_string(document: &Document) -> String {
    to_string_with_config(document, &FormatConfig::compact())
}

/// Writes `document` one tag per line, with indented classes.
///
/// # Examples
///
/// ```rust
/// use serde_kff::{from_str, to_string_pretty};
///
/// let doc = from_str("doc", "A={B=1;};C=[1,2];").unwrap();
/// assert_eq!(to_string_pretty(&doc), "A = {\n\tB = 1;\n};\nC = [1, 2];\n");
/// ```
#[must_use]
pub fn to_string_pretty(document: &Document) -> String {
    to_string_with_config(document, &FormatConfig::pretty())
}

/// Writes `document` under a custom configuration.
#[must_use]
pub fn to_string_with_config(document: &Document, config: &FormatConfig) -> String {
    let mut writer = Writer::new(*config);
    writer.write_document(document);
    writer.into_inner()
}

/// Writes `document` to `writer` under `config`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, document: &Document, config: &FormatConfig) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_config(document, config);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Abc = true; A = { Health = 50; Id = \"abcd\"; }; L = [1.5, NaN];";

    #[test]
    fn test_round_trip_compact_and_pretty() {
        let doc = from_str("sample", SAMPLE).unwrap();
        assert_eq!(from_str("sample", &to_string(&doc)).unwrap(), doc);
        assert_eq!(from_str("sample", &to_string_pretty(&doc)).unwrap(), doc);
    }

    #[test]
    fn test_from_slice() {
        let doc = from_slice("sample", SAMPLE.as_bytes()).unwrap();
        assert_eq!(doc.root().len(), 3);
        assert!(from_slice("bad", &[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_to_writer() {
        let doc = from_str("sample", "A = 1;").unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &doc, &FormatConfig::compact()).unwrap();
        assert_eq!(buffer, b"A=1;");
    }

    #[test]
    fn test_document_name_in_errors() {
        let err = from_str("broken.kff", "A = 1;\nB = ;").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("broken.kff"));
        assert_eq!(err.position(), Some((2, 5)));
    }

    #[test]
    fn test_validate_matches_parse() {
        assert!(validate("sample", SAMPLE).is_ok());
        let a = from_str("x", "L = [1, 2.5];").unwrap_err().to_string();
        let b = validate("x", "L = [1, 2.5];").unwrap_err().to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_document() {
        let doc = from_str("empty", "  // nothing here\n").unwrap();
        assert!(doc.root().is_empty());
        assert_eq!(to_string(&doc), "");
    }
}
