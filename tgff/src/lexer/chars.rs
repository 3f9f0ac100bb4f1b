/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Byte classes used to delimit tokens.
//!
//! The classes are chosen so the first byte of a token alone decides which
//! lexer state handles it:
//!
//! | First byte | State |
//! |---|---|
//! | `@` | control |
//! | `#` | comment |
//! | `{` / `}` | block open / close |
//! | `+`, `-`, `0-9` | number |
//! | `A-Z`, `_` | identifier |
//! | `a-z` | name |
//!
//! Digits and `_` may continue both identifiers and names, but never start
//! one: a leading digit always means a number.

pub const CONTROL: u8 = b'@';
pub const COMMENT: u8 = b'#';
pub const BLOCK_OPEN: u8 = b'{';
pub const BLOCK_CLOSE: u8 = b'}';
pub const DOT: u8 = b'.';
pub const NEWLINE: u8 = b'\n';

pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

/// Whitespace that does not end a comment line.
pub fn is_inline_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r')
}

pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

pub fn is_sign(c: u8) -> bool {
    matches!(c, b'+' | b'-')
}

pub fn is_number_start(c: u8) -> bool {
    is_sign(c) || is_digit(c)
}

pub fn is_exponent(c: u8) -> bool {
    matches!(c, b'e' | b'E')
}

/// Characters allowed inside an uppercase identifier (`HARD_DEADLINE`,
/// `TASK_GRAPH`, `AB_CD_42`).
pub fn is_ident(c: u8) -> bool {
    c.is_ascii_uppercase() || is_digit(c) || c == b'_'
}

pub fn is_ident_start(c: u8) -> bool {
    c.is_ascii_uppercase() || c == b'_'
}

/// Characters allowed inside a lowercase name (`t0_11`, `d1_0`).
pub fn is_name(c: u8) -> bool {
    c.is_ascii_lowercase() || is_digit(c) || c == b'_'
}

pub fn is_name_start(c: u8) -> bool {
    c.is_ascii_lowercase()
}

/// A comment whose first character after `#` is one of these is a
/// decorative separator (`#----`, `##`, `#====`) and yields no titles.
pub fn is_rule(c: u8) -> bool {
    matches!(c, b'#' | b'-' | b'=' | b'*')
}
