//! KFF parsing.
//!
//! This module provides the [`Parser`], a single-pass recursive-descent reader
//! for the KFF text format.
//!
//! ## Overview
//!
//! - **One grammar, two modes**: the parser is generic over a [`Sink`] that either
//!   builds the value tree ([`Build`]) or only keeps what the checks need ([`Validate`])
//! - **No backtracking**: every construct is committed on its first character
//! - **Error reporting**: document name with 1-based line and column
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_kff::from_str;
//!
//! let doc = from_str("player.kff", "Health = 50; Name = \"Ann\";").unwrap();
//! assert_eq!(doc.root().len(), 2);
//! ```
//!
//! ## Validating without building
//!
//! ```rust
//! use serde_kff::validate;
//!
//! assert!(validate("ok.kff", "L = [1, 2, 3];").is_ok());
//! assert!(validate("bad.kff", "L = [1, \"two\"];").is_err());
//! ```

use crate::error::SourcePosition;
use crate::syntax;
use crate::{Class, DataType, Document, Error, List, Name, Result, Value};
use indexmap::IndexSet;

/// Receives the constructs recognized by the [`Parser`].
///
/// The parser owns the grammar and every check; a sink only decides what is
/// kept. [`Build`] keeps the whole tree, [`Validate`] keeps tag names and
/// payload types.
pub trait Sink {
    type Class;
    type List;
    type Payload;

    fn class(&mut self) -> Self::Class;
    fn has_tag(&self, class: &Self::Class, name: &str) -> bool;
    fn add_tag(&mut self, class: &mut Self::Class, name: Name, payload: Self::Payload);
    fn tag_count(&self, class: &Self::Class) -> usize;

    fn list(&mut self) -> Self::List;
    fn add_element(&mut self, list: &mut Self::List, payload: Self::Payload);

    fn data_type(&self, payload: &Self::Payload) -> DataType;

    fn boolean(&mut self, value: bool) -> Self::Payload;
    fn integer(&mut self, value: i64) -> Self::Payload;
    fn decimal(&mut self, value: f64) -> Self::Payload;
    fn string(&mut self, value: String) -> Self::Payload;
    fn class_payload(&mut self, class: Self::Class) -> Self::Payload;
    fn list_payload(&mut self, list: Self::List) -> Self::Payload;
}

/// Builds a [`Document`] tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct Build;

impl Sink for Build {
    type Class = Class;
    type List = List;
    type Payload = Value;

    fn class(&mut self) -> Class {
        Class::new()
    }

    fn has_tag(&self, class: &Class, name: &str) -> bool {
        class.has(name)
    }

    fn add_tag(&mut self, class: &mut Class, name: Name, payload: Value) {
        class.set(crate::Tag::with_name(name, payload));
    }

    fn tag_count(&self, class: &Class) -> usize {
        class.len()
    }

    fn list(&mut self) -> List {
        List::new()
    }

    fn add_element(&mut self, list: &mut List, payload: Value) {
        list.push_unchecked(payload);
    }

    fn data_type(&self, payload: &Value) -> DataType {
        payload.data_type()
    }

    fn boolean(&mut self, value: bool) -> Value {
        Value::Boolean(value)
    }

    fn integer(&mut self, value: i64) -> Value {
        Value::Integer(value)
    }

    fn decimal(&mut self, value: f64) -> Value {
        Value::Decimal(value)
    }

    fn string(&mut self, value: String) -> Value {
        Value::String(value)
    }

    fn class_payload(&mut self, class: Class) -> Value {
        Value::Class(class)
    }

    fn list_payload(&mut self, list: List) -> Value {
        Value::List(list)
    }
}

/// Discards the tree, keeping tag names per class and payload types.
#[derive(Debug, Default, Clone, Copy)]
pub struct Validate;

impl Sink for Validate {
    type Class = IndexSet<String>;
    type List = ();
    type Payload = DataType;

    fn class(&mut self) -> IndexSet<String> {
        IndexSet::new()
    }

    fn has_tag(&self, class: &IndexSet<String>, name: &str) -> bool {
        class.contains(name)
    }

    fn add_tag(&mut self, class: &mut IndexSet<String>, name: Name, _payload: DataType) {
        class.insert(name.into_string());
    }

    fn tag_count(&self, class: &IndexSet<String>) -> usize {
        class.len()
    }

    fn list(&mut self) {}

    fn add_element(&mut self, _list: &mut (), _payload: DataType) {}

    fn data_type(&self, payload: &DataType) -> DataType {
        *payload
    }

    fn boolean(&mut self, _value: bool) -> DataType {
        DataType::Boolean
    }

    fn integer(&mut self, _value: i64) -> DataType {
        DataType::Integer
    }

    fn decimal(&mut self, _value: f64) -> DataType {
        DataType::Decimal
    }

    fn string(&mut self, _value: String) -> DataType {
        DataType::String
    }

    fn class_payload(&mut self, _class: IndexSet<String>) -> DataType {
        DataType::Class
    }

    fn list_payload(&mut self, _list: ()) -> DataType {
        DataType::List
    }
}

/// Deepest class and list nesting the parser accepts.
///
/// Deeper input fails with [`Error::Parse`] at the opening bracket, which keeps
/// parsing, writing and dropping a parsed tree within a bounded stack.
pub const MAX_DEPTH: usize = 128;

/// The KFF parser.
///
/// Created via [`Parser::new`] (tree building) or [`Parser::validator`].
pub struct Parser<'a, S: Sink = Build> {
    document: &'a str,
    input: &'a str,
    position: usize,
    depth: usize,
    sink: S,
}

impl<'a> Parser<'a, Build> {
    /// Creates a parser that builds a [`Document`] called `document`.
    pub fn new(document: &'a str, input: &'a str) -> Self {
        Parser::with_sink(document, input, Build)
    }

    /// Parses the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`], [`Error::UnexpectedEof`] or [`Error::TypeMismatch`]
    /// for the first problem found.
    pub fn parse(mut self) -> Result<Document> {
        let root = self.run()?;
        Ok(Document::from_root(self.document, root))
    }
}

impl<'a> Parser<'a, Validate> {
    /// Creates a parser that checks `input` without building a tree.
    pub fn validator(document: &'a str, input: &'a str) -> Self {
        Parser::with_sink(document, input, Validate)
    }

    /// Checks the whole input, accepting exactly what [`Parser::parse`] accepts.
    pub fn validate(mut self) -> Result<()> {
        self.run().map(|_| ())
    }
}

impl<'a, S: Sink> Parser<'a, S> {
    pub fn with_sink(document: &'a str, input: &'a str, sink: S) -> Self {
        Parser {
            document,
            input,
            position: 0,
            depth: 0,
            sink,
        }
    }

    /// Runs the grammar over the whole input, returning the root class.
    pub fn run(&mut self) -> Result<S::Class> {
        tracing::debug!(
            document = self.document,
            len = self.input.len(),
            "parsing KFF document"
        );
        match self.parse_root() {
            Ok(root) => {
                tracing::debug!(
                    document = self.document,
                    tags = self.sink.tag_count(&root),
                    "parsed KFF document"
                );
                Ok(root)
            }
            Err(err) => {
                tracing::debug!(document = self.document, error = %err, "KFF parse failed");
                Err(err)
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn error_at(&self, offset: usize, msg: &str) -> Error {
        Error::parse(self.document, self.input, offset, msg)
    }

    fn eof(&self, expected: &str) -> Error {
        Error::unexpected_eof(self.document, self.input, self.position, expected)
    }

    fn unexpected(&self, found: char, expected: &str) -> Error {
        self.error_at(
            self.position,
            &format!("expected {}, found '{}'", expected, found),
        )
    }

    /// Skips whitespace and `//` comments.
    fn skip_ignored(&mut self) -> Result<()> {
        while let Some(ch) = self.peek_char() {
            if syntax::is_whitespace(ch) {
                self.position += 1;
            } else if self.input[self.position..].starts_with(syntax::COMMENT) {
                match self.input[self.position..].find('\n') {
                    Some(end) => self.position += end + 1,
                    None => self.position = self.input.len(),
                }
            } else if ch == '/' {
                return Err(self.error_at(self.position, "invalid token '/'"));
            } else {
                break;
            }
        }
        Ok(())
    }

    fn expect(&mut self, token: char, expected: &str) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == token => {
                self.position += ch.len_utf8();
                Ok(())
            }
            Some(ch) => Err(self.unexpected(ch, expected)),
            None => Err(self.eof(expected)),
        }
    }

    fn parse_root(&mut self) -> Result<S::Class> {
        let mut root = self.sink.class();
        loop {
            self.skip_ignored()?;
            if self.peek_char().is_none() {
                return Ok(root);
            }
            self.parse_tag(&mut root)?;
        }
    }

    fn parse_name(&mut self) -> Result<Name> {
        let start = self.position;
        match self.peek_char() {
            Some(ch) if syntax::is_name_start(ch) => self.position += 1,
            Some(ch) => return Err(self.unexpected(ch, "a tag name")),
            None => return Err(self.eof("a tag name")),
        }
        while matches!(self.peek_char(), Some(ch) if syntax::is_name_char(ch)) {
            self.position += 1;
        }
        Ok(Name::new_unchecked(
            self.input[start..self.position].to_string(),
        ))
    }

    fn parse_tag(&mut self, class: &mut S::Class) -> Result<()> {
        let start = self.position;
        let name = self.parse_name()?;
        if self.sink.has_tag(class, &name) {
            return Err(self.error_at(start, &format!("duplicated tag '{}'", name)));
        }
        self.skip_ignored()?;
        self.expect(syntax::NAME_PAYLOAD_SEPARATOR, "'='")?;
        self.skip_ignored()?;
        let payload = self.parse_payload()?;
        self.skip_ignored()?;
        self.expect(syntax::TAG_END, "';'")?;
        self.sink.add_tag(class, name, payload);
        Ok(())
    }

    fn parse_payload(&mut self) -> Result<S::Payload> {
        match self.peek_char() {
            None => Err(self.eof("a payload")),
            Some(syntax::CLASS_OPENING) => self.nested(Self::parse_class),
            Some(syntax::LIST_OPENING) => self.nested(Self::parse_list),
            Some(syntax::STRING_CONTAINER) => {
                let s = self.parse_string()?;
                Ok(self.sink.string(s))
            }
            Some('t') => {
                self.expect_word(syntax::TOKEN_TRUE)?;
                Ok(self.sink.boolean(true))
            }
            Some('f') => {
                self.expect_word(syntax::TOKEN_FALSE)?;
                Ok(self.sink.boolean(false))
            }
            Some('N') => {
                self.expect_word(syntax::TOKEN_NAN)?;
                Ok(self.sink.decimal(f64::NAN))
            }
            Some('I') => {
                self.expect_word(syntax::TOKEN_INFINITY)?;
                Ok(self.sink.decimal(f64::INFINITY))
            }
            Some(ch) if ch == syntax::NEGATIVE_SIGN || syntax::is_digit(ch) => {
                self.parse_number()
            }
            Some(ch) => Err(self.unexpected(ch, "a payload")),
        }
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Result<S::Payload>) -> Result<S::Payload> {
        if self.depth == MAX_DEPTH {
            return Err(self.error_at(self.position, "nesting too deep"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_class(&mut self) -> Result<S::Payload> {
        self.expect(syntax::CLASS_OPENING, "'{'")?;
        let mut class = self.sink.class();
        loop {
            self.skip_ignored()?;
            match self.peek_char() {
                Some(syntax::CLASS_CLOSING) => {
                    self.position += 1;
                    return Ok(self.sink.class_payload(class));
                }
                Some(_) => self.parse_tag(&mut class)?,
                None => return Err(self.eof("'}' or a tag")),
            }
        }
    }

    fn parse_list(&mut self) -> Result<S::Payload> {
        self.expect(syntax::LIST_OPENING, "'['")?;
        let mut list = self.sink.list();
        self.skip_ignored()?;
        if self.peek_char() == Some(syntax::LIST_CLOSING) {
            self.position += 1;
            return Ok(self.sink.list_payload(list));
        }

        let mut list_type = None;
        loop {
            self.skip_ignored()?;
            let start = self.position;
            let element = self.parse_payload()?;
            let found = self.sink.data_type(&element);
            match list_type {
                None => list_type = Some(found),
                Some(expected) if expected != found => {
                    let at = SourcePosition::locate(self.document, self.input, start);
                    return Err(Error::type_mismatch(expected, found, Some(at)));
                }
                Some(_) => {}
            }
            self.sink.add_element(&mut list, element);

            self.skip_ignored()?;
            match self.peek_char() {
                Some(syntax::LIST_ELEMENT_SEPARATOR) => self.position += 1,
                Some(syntax::LIST_CLOSING) => {
                    self.position += 1;
                    return Ok(self.sink.list_payload(list));
                }
                Some(ch) => return Err(self.unexpected(ch, "',' or ']'")),
                None => return Err(self.eof("',' or ']'")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        self.expect(syntax::STRING_CONTAINER, "'\"'")?;
        let mut result = String::new();
        loop {
            let escape_at = self.position;
            match self.next_char() {
                None => return Err(self.eof("closing '\"'")),
                Some(syntax::STRING_CONTAINER) => return Ok(result),
                Some(syntax::ESCAPE_CHAR) => match self.next_char() {
                    Some(ch) if syntax::is_escapable(ch) => result.push(ch),
                    Some(ch) => {
                        return Err(self.error_at(
                            escape_at,
                            &format!("invalid escape sequence '\\{}'", ch),
                        ))
                    }
                    None => return Err(self.eof("an escaped character")),
                },
                Some(ch) => result.push(ch),
            }
        }
    }

    /// Matches a reserved word, committed once its first character was seen.
    fn expect_word(&mut self, word: &str) -> Result<()> {
        let start = self.position;
        for expected in word.chars() {
            match self.peek_char() {
                Some(ch) if ch == expected => self.position += 1,
                Some(_) => {
                    return Err(self.error_at(start, &format!("invalid token, expected '{}'", word)))
                }
                None => return Err(self.eof(&format!("'{}'", word))),
            }
        }
        Ok(())
    }

    fn expect_digits(&mut self) -> Result<()> {
        match self.peek_char() {
            Some(ch) if syntax::is_digit(ch) => {}
            Some(ch) => return Err(self.unexpected(ch, "a digit")),
            None => return Err(self.eof("a digit")),
        }
        while matches!(self.peek_char(), Some(ch) if syntax::is_digit(ch)) {
            self.position += 1;
        }
        Ok(())
    }

    fn parse_number(&mut self) -> Result<S::Payload> {
        let start = self.position;
        if self.peek_char() == Some(syntax::NEGATIVE_SIGN) {
            self.position += 1;
            if self.peek_char() == Some('I') {
                self.expect_word(syntax::TOKEN_INFINITY)?;
                return Ok(self.sink.decimal(f64::NEG_INFINITY));
            }
        }
        self.expect_digits()?;

        let mut is_decimal = false;
        if self.peek_char() == Some(syntax::DECIMAL_SEPARATOR) {
            is_decimal = true;
            self.position += 1;
            self.expect_digits()?;
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_decimal = true;
            self.position += 1;
            if self.peek_char() == Some(syntax::NEGATIVE_SIGN) {
                self.position += 1;
            }
            self.expect_digits()?;
        }

        let text = &self.input[start..self.position];
        if is_decimal {
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(self.sink.decimal(value)),
                _ => Err(self.error_at(
                    start,
                    &format!("decimal literal '{}' is out of range", text),
                )),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Ok(self.sink.integer(value)),
                Err(_) => Err(self.error_at(
                    start,
                    &format!("integer literal '{}' is out of range", text),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Document> {
        Parser::new("test", text).parse()
    }

    fn single(text: &str) -> Value {
        let doc = parse(text).unwrap();
        doc.root().get_index(0).unwrap().1.clone()
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(single("A = true;"), Value::Boolean(true));
        assert_eq!(single("A=false;"), Value::Boolean(false));
        assert_eq!(single("A = -42;"), Value::Integer(-42));
        assert_eq!(single("A = 1.5;"), Value::Decimal(1.5));
        assert_eq!(single("A = 2e3;"), Value::Decimal(2000.0));
        assert_eq!(single("A = 25E-1;"), Value::Decimal(2.5));
        assert_eq!(single("A = \"hi\";"), Value::from("hi"));
        assert_eq!(single("A = -Infinity;"), Value::Decimal(f64::NEG_INFINITY));
        assert!(single("A = NaN;").as_f64().unwrap().is_nan());
    }

    fn nested_lists(depth: usize) -> String {
        format!("A = {}{};", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn test_nesting_limit() {
        let doc = parse(&nested_lists(MAX_DEPTH)).unwrap();
        assert_eq!(crate::to_string(&doc), nested_lists(MAX_DEPTH).replace(' ', ""));

        let err = parse(&nested_lists(MAX_DEPTH + 1)).unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.position(), Some((1, 5 + MAX_DEPTH)));

        let deep = nested_lists(100_000);
        assert!(parse(&deep).unwrap_err().to_string().contains("nesting too deep"));
        assert!(Parser::validator("test", &deep).validate().is_err());

        let classes = |depth: usize| format!("A = {}1;{}", "{ B = ".repeat(depth), " };".repeat(depth));
        assert!(parse(&classes(MAX_DEPTH)).is_ok());
        assert!(parse(&classes(MAX_DEPTH + 1))
            .unwrap_err()
            .to_string()
            .contains("nesting too deep"));
    }

    #[test]
    fn test_parse_nested() {
        let doc = parse("A = { B = { C = 5; }; }; L = [1,2,3];").unwrap();
        let a = doc.root().get("A").unwrap().as_class().unwrap();
        let b = a.get("B").unwrap().as_class().unwrap();
        assert_eq!(b.get("C").unwrap(), &Value::Integer(5));
        let l = doc.root().get("L").unwrap().as_list().unwrap();
        assert_eq!(l.list_type(), DataType::Integer);
        assert_eq!(l.len(), 3);
    }

    #[test]
    fn test_comments_and_whitespace() {
        let text = "// header\r\nA =\t1; // trailing\n  B = [ 1 , 2 ];//end";
        let doc = parse(text).unwrap();
        assert_eq!(doc.root().len(), 2);
    }

    #[test]
    fn test_lone_slash_is_invalid() {
        let err = parse("A = 1; / B = 2;").unwrap_err();
        assert!(matches!(err, Error::Parse { column: 8, .. }));
    }

    #[test]
    fn test_duplicate_tag_position() {
        let err = parse("A = 1;\nA = 2;").unwrap_err();
        match err {
            Error::Parse { line, column, msg, .. } => {
                assert_eq!((line, column), (2, 1));
                assert!(msg.contains("'A'"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_same_name_at_different_levels() {
        assert!(parse("A = { A = { A = 1; }; };").is_ok());
    }

    #[test]
    fn test_list_type_mismatch_position() {
        let err = parse("L = [1, \"a\"];").unwrap_err();
        match err {
            Error::TypeMismatch {
                expected,
                found,
                at: Some(at),
            } => {
                assert_eq!(expected, DataType::Integer);
                assert_eq!(found, DataType::String);
                assert_eq!((at.line, at.column), (1, 9));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_integer_and_decimal_do_not_mix() {
        assert!(matches!(
            parse("L = [1, 2.0];"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_containers() {
        let doc = parse("L = [ ]; C = { };").unwrap();
        let list = doc.root().get("L").unwrap().as_list().unwrap();
        assert_eq!(list.list_type(), DataType::EmptyList);
        assert!(doc.root().get("C").unwrap().as_class().unwrap().is_empty());
    }

    #[test]
    fn test_escapes() {
        assert_eq!(single(r#"S = "a\"b\\c";"#), Value::from("a\"b\\c"));
        let err = parse(r#"S = "a\nb";"#).unwrap_err();
        assert!(matches!(err, Error::Parse { column: 7, .. }));
    }

    #[test]
    fn test_unexpected_eof() {
        for text in ["A", "A =", "A = 1", "A = \"abc", "A = [1,", "A = {", "A = tr"] {
            let err = parse(text).unwrap_err();
            assert!(err.is_eof(), "{:?} gave {:?}", text, err);
        }
    }

    #[test]
    fn test_malformed_numbers() {
        for text in ["A = 1.;", "A = .5;", "A = 1e;", "A = 1e+5;", "A = -;", "A = 01x;"] {
            let err = parse(text).unwrap_err();
            assert!(err.is_parse(), "{:?} gave {:?}", text, err);
        }
    }

    #[test]
    fn test_out_of_range_numbers() {
        assert_eq!(single("A = -9223372036854775808;"), Value::Integer(i64::MIN));
        assert!(parse("A = 9223372036854775808;").is_err());
        assert!(parse("A = 1e400;").is_err());
        assert_eq!(single("A = 1e-400;"), Value::Decimal(0.0));
    }

    #[test]
    fn test_reserved_words_commit() {
        assert!(parse("A = trux;").is_err());
        assert!(parse("A = Nan;").is_err());
        assert!(parse("A = truex;").is_err());
        assert!(parse("A = null;").is_err());
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert!(parse("L = [1, 2,];").is_err());
        assert!(parse("L = [,];").is_err());
    }

    #[test]
    fn test_validator_agrees() {
        let cases = [
            "A = 1;",
            "A = { B = [[1], [2, 3]]; };",
            "A = 1; A = 2;",
            "L = [[1], [\"x\"]];",
            "L = [1, true];",
            "A = ",
        ];
        for text in cases {
            let parsed = parse(text);
            let validated = Parser::validator("test", text).validate();
            assert_eq!(parsed.is_ok(), validated.is_ok(), "{:?}", text);
            if let (Err(a), Err(b)) = (parsed, validated) {
                assert_eq!(a.to_string(), b.to_string());
            }
        }
    }
}
