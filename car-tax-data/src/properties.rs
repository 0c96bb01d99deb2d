//! A reader for Java-style `.properties` files.
//!
//! Supported syntax:
//!
//! - `key=value`, `key:value` and `key value` entries
//! - whitespace around the separator
//! - comment lines starting with `#` or `!`
//! - blank lines
//! - logical lines continued with a trailing backslash
//! - escapes (`\t`, `\n`, `\r`, `\f`, `\uXXXX`, and `\` before any other character)
//!
//! When a key appears more than once the later entry wins.

use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Read};
use std::iter::Peekable;
use std::str::Chars;

/// Parsed key-value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Reads every entry from `reader`.
    pub fn parse<R: Read>(reader: R) -> io::Result<Self> {
        let mut entries = HashMap::new();
        let mut lines = BufReader::new(reader).lines();

        while let Some(line) = lines.next() {
            let line = line?;
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                continue;
            }

            let mut logical = trimmed.to_string();
            while has_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some(next) => logical.push_str(next?.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An odd number of trailing backslashes continues the line.
fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (String, String) {
    let mut chars = line.chars().peekable();
    let mut key = String::new();
    let mut separated_by_space = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => push_escaped(&mut key, &mut chars),
            '=' | ':' => break,
            c if c.is_whitespace() => {
                separated_by_space = true;
                break;
            }
            c => key.push(c),
        }
    }

    skip_whitespace(&mut chars);
    if separated_by_space && matches!(chars.peek(), Some('=' | ':')) {
        chars.next();
        skip_whitespace(&mut chars);
    }

    let mut value = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => push_escaped(&mut value, &mut chars),
            c => value.push(c),
        }
    }

    (key, value)
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn push_escaped(
    out: &mut String,
    chars: &mut Peekable<Chars<'_>>,
) {
    match chars.next() {
        Some('t') => out.push('\t'),
        Some('n') => out.push('\n'),
        Some('r') => out.push('\r'),
        Some('f') => out.push('\u{c}'),
        Some('u') => {
            let hex: String = chars.by_ref().take(4).collect();
            match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                Some(c) => out.push(c),
                // Malformed unicode escapes are kept literally.
                None => {
                    out.push('u');
                    out.push_str(&hex);
                }
            }
        }
        Some(other) => out.push(other),
        None => {}
    }
}
