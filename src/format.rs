//! KFF Format Reference
//!
//! This module documents the KFF text format as implemented by this library.
//!
//! # Overview
//!
//! A KFF document is a sequence of **tags**. A tag is a name, `=`, a typed
//! **payload**, and a terminating `;`. Payloads are booleans, 64-bit integers,
//! IEEE-754 doubles, strings, classes (nested tags) and lists (unnamed payloads
//! of one type).
//!
//! ```text
//! // A player save file
//! Name = "Ann";
//! Health = 50;
//! Speed = 1.25;
//! Alive = true;
//! Position = { X = 0.5; Y = -3.0; Z = 1e-3; };
//! Inventory = [
//!     { Kind = "sword"; Damage = 12; },
//!     { Kind = "shield"; Damage = 0; }
//! ];
//! ```
//!
//! # Grammar
//!
//! ```text
//! Document := Tag* EOF
//! Tag      := Name WS? '=' WS? Payload WS? ';'
//! Payload  := Class | List | String | Bool | Number | NaN | Infinity
//! Class    := '{' WS? Tag* '}'
//! List     := '[' WS? (Payload (',' WS? Payload)*)? ']'
//! String   := '"' (EscapedChar | AnyCharExceptQuote)* '"'
//! Number   := '-'? Digits ('.' Digits)? (('e'|'E') '-'? Digits)?
//! ```
//!
//! Whitespace and comments may appear between any two tokens.
//!
//! ## Names
//!
//! Tag names match `[A-Za-z_][A-Za-z0-9_]*`. Names within one class (or at the
//! top level of a document) must be unique; the same name may be reused at a
//! different nesting level.
//!
//! ## Payloads
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Boolean | `true` or `false` | `Alive = true;` |
//! | Integer | Digits, optional leading `-`, fits in 64 signed bits | `Health = -5;` |
//! | Decimal | Digits with `.` or exponent | `Speed = 1.25;`, `Tiny = 1e-9;` |
//! | Special decimals | `NaN`, `Infinity`, `-Infinity` | `Limit = Infinity;` |
//! | String | Double-quoted | `Name = "Ann";` |
//! | Class | `{` tags `}` | `Pos = { X = 1; };` |
//! | List | `[` payloads separated by `,` `]` | `L = [1, 2, 3];` |
//!
//! **Numbers**:
//! - A literal with neither `.` nor exponent is an Integer; anything else is a Decimal
//! - `1.` and `.5` are rejected: both sides of `.` need digits
//! - The exponent takes an optional `-` only; `1e+5` is rejected
//! - Integers outside the 64-bit signed range and decimals that overflow to infinity are rejected
//!
//! **Strings**:
//! - Only `\"` and `\\` are escape sequences; any other `\x` is an error
//! - Every other character, including newlines, is taken literally
//!
//! **Lists**:
//! - All elements share one type, fixed by the first element
//! - Integers and decimals are different types: `[1, 2.0]` is rejected
//! - Nested lists are all of type List, whatever their contents
//! - A trailing `,` is rejected
//!
//! ## Whitespace and Comments
//!
//! Whitespace is exactly space, tab, CR and LF. `//` starts a comment that runs
//! to the end of the line. A single `/` is an invalid token.
//!
//! # Writing
//!
//! The writer places whitespace according to a [`FormatConfig`](crate::FormatConfig).
//! Whatever the configuration, the output parses back to the same tree:
//!
//! - decimals are written in the shortest form that reads back to the same bits,
//!   with `.0` appended when that form has neither `.` nor exponent
//! - `NaN`, `Infinity` and `-Infinity` are written as those words
//! - strings escape only `"` and `\`
//!
//! A newline on one side of a token takes the place of a configured space on that side.
//!
//! ```text
//! compact():  Pos={X=0.5;Y=-3.0;};L=[1,2];
//! pretty():   Pos = {
//!                 X = 0.5;
//!                 Y = -3.0;
//!             };
//!             L = [1, 2];
//! ```
//!
//! # Paths
//!
//! Paths address nodes inside a document. Segments are joined by `.`:
//!
//! | Segment | Meaning | Valid on |
//! |---------|---------|----------|
//! | `Name` | Tag called `Name` | Document, class |
//! | `3` | Element at index 3 | List |
//! | `{0}` | Index taken from the first construction argument | List |
//! | `<` | Enclosing tag, list element or document | Any node but the document |
//!
//! Examples: `A.Position.Z`, `A.4.2`, `Objects.{0}.Vertices.{1}`, `A.B.C.<`.
//!
//! The empty path addresses the starting node. Stepping back from a tag always
//! lands on the tag, list element or document that contains it, so for
//! `A = { B = { C = 5; }; };` the path `A.B.C.<` addresses tag `B`.
//!
//! # Errors
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | [`Parse`](crate::Error::Parse) | Malformed text, duplicate tag names, nesting deeper than [`MAX_DEPTH`](crate::MAX_DEPTH) |
//! | [`UnexpectedEof`](crate::Error::UnexpectedEof) | Text ends inside a construct |
//! | [`Name`](crate::Error::Name) | A name breaks the identifier rule |
//! | [`Presence`](crate::Error::Presence) | A path names a missing tag or index |
//! | [`ReadWrite`](crate::Error::ReadWrite) | A node does not support the operation |
//! | [`TypeMismatch`](crate::Error::TypeMismatch) | A list element has the wrong type |
//! | [`InvalidPath`](crate::Error::InvalidPath) | A path string is malformed |

// This module contains only documentation; no implementation code
