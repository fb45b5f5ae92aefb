//! KFF writing.
//!
//! This module provides the [`Writer`], the dual of the [`Parser`](crate::Parser):
//! it renders a value tree as KFF text under a [`FormatConfig`].
//!
//! ## Overview
//!
//! - **Round-trip fidelity**: decimals use the shortest text that reads back to the
//!   same `f64`, and always contain `.` or an exponent
//! - **Minimal escaping**: only `"` and `\` are escaped inside strings
//! - **Lazy indentation**: indentation is written before the first token of a line,
//!   so no line ends in whitespace left by indentation
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_kff::{from_str, to_string, to_string_pretty};
//!
//! let doc = from_str("doc", "A = 1; B = [true, false];").unwrap();
//!
//! assert_eq!(to_string(&doc), "A=1;B=[true,false];");
//! assert_eq!(to_string_pretty(&doc), "A = 1;\nB = [true, false];\n");
//! ```
//!
//! ## Direct Writer Usage
//!
//! ```rust
//! use serde_kff::{FormatConfig, Value, Writer};
//!
//! let mut writer = Writer::new(FormatConfig::compact());
//! writer.write_value(&Value::from(1.0 / 3.0));
//! assert_eq!(writer.into_inner(), "0.3333333333333333");
//! ```

use crate::syntax;
use crate::{Class, Document, FormatConfig, List, Name, Value};

/// The KFF writer.
///
/// Created via [`Writer::new`] with a formatting configuration; output
/// accumulates until [`Writer::into_inner`].
pub struct Writer {
    output: String,
    config: FormatConfig,
    depth: usize,
    line_start: bool,
}

impl Writer {
    pub fn new(config: FormatConfig) -> Self {
        Writer {
            output: String::with_capacity(256),
            config,
            depth: 0,
            line_start: false,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes every top-level tag of `document`.
    pub fn write_document(&mut self, document: &Document) {
        let start = self.output.len();
        self.write_tags(document.root());
        tracing::debug!(
            document = document.name(),
            tags = document.root().len(),
            len = self.output.len() - start,
            "wrote KFF document"
        );
    }

    /// Writes one tag, `name=value;`, with its surrounding whitespace.
    pub fn write_tag(&mut self, name: &Name, value: &Value) {
        self.token(name.as_str());
        self.boundary(
            syntax::NAME_PAYLOAD_SEPARATOR,
            self.config.name_separator_newline,
            self.config.name_separator_space,
        );
        self.write_value(value);
        self.boundary(
            syntax::TAG_END,
            self.config.tag_end_newline,
            crate::Around::None,
        );
    }

    /// Writes a payload without a name.
    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::Boolean(b) => self.token(if *b {
                syntax::TOKEN_TRUE
            } else {
                syntax::TOKEN_FALSE
            }),
            Value::Integer(i) => self.token(&i.to_string()),
            Value::Decimal(f) => self.token(&syntax::format_decimal(*f)),
            Value::String(s) => {
                self.pending_indent();
                syntax::write_escaped(&mut self.output, s);
            }
            Value::Class(class) => self.write_class(class),
            Value::List(list) => self.write_list(list),
        }
    }

    fn write_tags(&mut self, class: &Class) {
        for (name, value) in class {
            self.write_tag(name, value);
        }
    }

    fn write_class(&mut self, class: &Class) {
        let nested = usize::from(self.config.indent_class);
        self.boundary(
            syntax::CLASS_OPENING,
            self.config.class_opening_newline,
            crate::Around::None,
        );
        self.depth += nested;
        self.write_tags(class);
        self.depth -= nested;
        self.boundary(
            syntax::CLASS_CLOSING,
            self.config.class_closing_newline,
            crate::Around::None,
        );
    }

    fn write_list(&mut self, list: &List) {
        let nested = usize::from(self.config.indent_list);
        self.boundary(
            syntax::LIST_OPENING,
            self.config.list_opening_newline,
            crate::Around::None,
        );
        self.depth += nested;
        for (i, item) in list.iter().enumerate() {
            if i > 0 {
                self.boundary(
                    syntax::LIST_ELEMENT_SEPARATOR,
                    self.config.list_separator_newline,
                    self.config.list_separator_space,
                );
            }
            self.write_value(item);
        }
        self.depth -= nested;
        self.boundary(
            syntax::LIST_CLOSING,
            self.config.list_closing_newline,
            crate::Around::None,
        );
    }

    fn pending_indent(&mut self) {
        if self.line_start {
            self.config.indent.write_to(&mut self.output, self.depth);
            self.line_start = false;
        }
    }

    fn token(&mut self, text: &str) {
        self.pending_indent();
        self.output.push_str(text);
    }

    fn newline(&mut self) {
        self.output.push('\n');
        self.line_start = true;
    }

    fn boundary(&mut self, token: char, newline: crate::Around, space: crate::Around) {
        if newline.before() {
            self.newline();
        } else if space.before() {
            self.token(" ");
        }
        self.pending_indent();
        self.output.push(token);
        if newline.after() {
            self.newline();
        } else if space.after() {
            self.output.push(' ');
        }
    }
}
