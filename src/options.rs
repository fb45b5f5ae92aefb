//! Formatting options for KFF output.
//!
//! This module provides types to customize where the writer puts newlines,
//! spaces and indentation:
//!
//! - [`FormatConfig`]: Main configuration struct
//! - [`Around`]: Which side(s) of a boundary token get a newline or space
//! - [`Indent`]: The indentation unit
//!
//! Every configuration produces text that parses back to the same tree; the
//! options only change whitespace.
//!
//! ## Examples
//!
//! ```rust
//! use serde_kff::{from_str, to_string_with_config, Around, FormatConfig};
//!
//! let doc = from_str("doc", "L = [1, 2, 3];").unwrap();
//!
//! let config = FormatConfig::compact().with_list_separator_space(Around::After);
//! assert_eq!(to_string_with_config(&doc, &config), "L=[1, 2, 3];");
//! ```

use serde::{Deserialize, Serialize};

/// Placement of a newline or space relative to a boundary token.
///
/// # Examples
///
/// ```rust
/// use serde_kff::Around;
///
/// assert!(Around::Both.before() && Around::Both.after());
/// assert!(!Around::None.before());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Around {
    #[default]
    None,
    Before,
    After,
    Both,
}

impl Around {
    #[inline]
    #[must_use]
    pub const fn before(&self) -> bool {
        matches!(self, Around::Before | Around::Both)
    }

    #[inline]
    #[must_use]
    pub const fn after(&self) -> bool {
        matches!(self, Around::After | Around::Both)
    }
}

/// One level of indentation.
///
/// `Spaces` holds at most 255 spaces per level; wider values fail to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(u8),
}

impl Indent {
    pub(crate) fn write_to(&self, output: &mut String, levels: usize) {
        match self {
            Indent::Tab => output.extend(std::iter::repeat('\t').take(levels)),
            Indent::Spaces(n) => {
                let width = levels.saturating_mul(usize::from(*n));
                output.extend(std::iter::repeat(' ').take(width));
            }
        }
    }
}

/// Configuration for the KFF writer.
///
/// Each `Around` field places newlines or spaces around one boundary token.
/// `indent_class` and `indent_list` add one [`Indent`] unit per enclosing class
/// or list to every line started inside it.
///
/// A space is dropped when a newline is also placed on the same side of a token.
///
/// # Examples
///
/// ```rust
/// use serde_kff::{from_str, to_string_with_config, FormatConfig};
///
/// let doc = from_str("doc", "A = { B = 1; };").unwrap();
///
/// assert_eq!(to_string_with_config(&doc, &FormatConfig::compact()), "A={B=1;};");
/// assert_eq!(
///     to_string_with_config(&doc, &FormatConfig::pretty()),
///     "A = {\n\tB = 1;\n};\n"
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub name_separator_newline: Around,
    pub name_separator_space: Around,
    pub tag_end_newline: Around,
    pub class_opening_newline: Around,
    pub class_closing_newline: Around,
    pub list_opening_newline: Around,
    pub list_closing_newline: Around,
    pub list_separator_newline: Around,
    pub list_separator_space: Around,
    pub indent_class: bool,
    pub indent_list: bool,
    pub indent: Indent,
}

impl FormatConfig {
    /// Creates the default configuration, identical to [`FormatConfig::compact`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No whitespace at all.
    #[must_use]
    pub fn compact() -> Self {
        Self::default()
    }

    /// One tag per line, classes indented with tabs, spaced lists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::{Around, FormatConfig};
    ///
    /// let config = FormatConfig::pretty();
    /// assert_eq!(config.tag_end_newline, Around::After);
    /// assert!(config.indent_class);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        FormatConfig {
            name_separator_space: Around::Both,
            tag_end_newline: Around::After,
            class_opening_newline: Around::After,
            list_separator_space: Around::After,
            indent_class: true,
            indent_list: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_name_separator_newline(mut self, around: Around) -> Self {
        self.name_separator_newline = around;
        self
    }

    #[must_use]
    pub fn with_name_separator_space(mut self, around: Around) -> Self {
        self.name_separator_space = around;
        self
    }

    #[must_use]
    pub fn with_tag_end_newline(mut self, around: Around) -> Self {
        self.tag_end_newline = around;
        self
    }

    #[must_use]
    pub fn with_class_newlines(mut self, opening: Around, closing: Around) -> Self {
        self.class_opening_newline = opening;
        self.class_closing_newline = closing;
        self
    }

    #[must_use]
    pub fn with_list_newlines(mut self, opening: Around, closing: Around) -> Self {
        self.list_opening_newline = opening;
        self.list_closing_newline = closing;
        self
    }

    #[must_use]
    pub fn with_list_separator_newline(mut self, around: Around) -> Self {
        self.list_separator_newline = around;
        self
    }

    #[must_use]
    pub fn with_list_separator_space(mut self, around: Around) -> Self {
        self.list_separator_space = around;
        self
    }

    /// Enables or disables indentation inside classes and lists.
    #[must_use]
    pub fn with_indentation(mut self, class: bool, list: bool) -> Self {
        self.indent_class = class;
        self.indent_list = list;
        self
    }

    /// Sets the indentation unit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::{from_str, to_string_with_config, FormatConfig, Indent};
    ///
    /// let doc = from_str("doc", "A = { B = 1; };").unwrap();
    /// let config = FormatConfig::pretty().with_indent(Indent::Spaces(2));
    /// assert_eq!(to_string_with_config(&doc, &config), "A = {\n  B = 1;\n};\n");
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}
