//! Lexical rules of the KFF text format.
//!
//! Token characters, reserved words, character classes and the escaping
//! rules shared by the parser, the writer and the path engine. Everything
//! here is a pure function of its input.

pub const NAME_PAYLOAD_SEPARATOR: char = '=';
pub const TAG_END: char = ';';
pub const NEGATIVE_SIGN: char = '-';
pub const DECIMAL_SEPARATOR: char = '.';
pub const STRING_CONTAINER: char = '"';
pub const ESCAPE_CHAR: char = '\\';
pub const COMMENT: &str = "//";
pub const CLASS_OPENING: char = '{';
pub const CLASS_CLOSING: char = '}';
pub const LIST_OPENING: char = '[';
pub const LIST_CLOSING: char = ']';
pub const LIST_ELEMENT_SEPARATOR: char = ',';

pub const PATH_SEGMENT_SEPARATOR: char = '.';
pub const PATH_BACKWARD: char = '<';
pub const PLACEHOLDER_OPENING: char = '{';
pub const PLACEHOLDER_CLOSING: char = '}';

pub const TOKEN_TRUE: &str = "true";
pub const TOKEN_FALSE: &str = "false";
pub const TOKEN_NAN: &str = "NaN";
pub const TOKEN_INFINITY: &str = "Infinity";

/// Whitespace is exactly tab, LF, CR and space.
#[inline]
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | ' ')
}

#[inline]
#[must_use]
pub const fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// First character of a tag name: `[A-Za-z_]`.
#[inline]
#[must_use]
pub const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Any later character of a tag name: `[A-Za-z0-9_]`.
#[inline]
#[must_use]
pub const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Characters that must be escaped inside a string literal.
#[inline]
#[must_use]
pub const fn is_escapable(c: char) -> bool {
    c == ESCAPE_CHAR || c == STRING_CONTAINER
}

/// Checks `s` against the identifier rule, returning the reason it fails.
pub fn check_name(s: &str) -> std::result::Result<(), String> {
    let mut chars = s.chars();
    match chars.next() {
        None => Err("name can't be empty".to_string()),
        Some(first) if !is_name_start(first) => Err(format!(
            "expected [A-Za-z_] at the start, found '{}'",
            first
        )),
        Some(_) => match chars.find(|c| !is_name_char(*c)) {
            Some(bad) => Err(format!("expected [A-Za-z0-9_], found '{}'", bad)),
            None => Ok(()),
        },
    }
}

/// Writes `s` as a quoted string literal, escaping only `"` and `\`.
pub fn write_escaped(output: &mut String, s: &str) {
    output.reserve(s.len() + 2);
    output.push(STRING_CONTAINER);
    for ch in s.chars() {
        if is_escapable(ch) {
            output.push(ESCAPE_CHAR);
        }
        output.push(ch);
    }
    output.push(STRING_CONTAINER);
}

/// Renders a decimal so that parsing it back yields the identical `f64`.
///
/// The text always contains a `.` or an exponent, so it never reads back
/// as an integer.
///
/// # Examples
///
/// ```rust
/// use serde_kff::syntax::format_decimal;
///
/// assert_eq!(format_decimal(2.0), "2.0");
/// assert_eq!(format_decimal(f64::NEG_INFINITY), "-Infinity");
/// assert_eq!(format_decimal(1e300), "1e300");
/// ```
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return TOKEN_NAN.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 {
            TOKEN_INFINITY.to_string()
        } else {
            format!("{}{}", NEGATIVE_SIGN, TOKEN_INFINITY)
        };
    }
    // Debug gives the shortest representation that round-trips.
    let mut s = format!("{:?}", value);
    if !s.contains([DECIMAL_SEPARATOR, 'e', 'E']) {
        s.push_str(".0");
    }
    s
}
