// Parser for properties-file text
//
// - Comment lines start with '#' or '!' (after optional leading whitespace)
// - A line ending in an odd number of backslashes continues on the next line
// - Keys end at the first unescaped '=', ':' or whitespace
// - Escapes: \t \n \r \f \uXXXX, any other escaped character stands for itself
//
// Entries keep document order; a repeated key keeps its first position and
// takes the last value.

use crate::record::Properties;
use cm_core::error::{CmError, Result};

/// Parse properties text into an ordered map.
///
/// ```
/// # use cm_admin::properties::parse_properties;
/// let props = parse_properties("host=localhost\nport: 8080\n").unwrap();
/// assert_eq!(props["host"], "localhost");
/// assert_eq!(props["port"], "8080");
/// ```
pub fn parse_properties(text: &str) -> Result<Properties> {
    let mut properties = Properties::new();
    for line in logical_lines(text) {
        let (key, value) = split_entry(&line)?;
        properties.insert(key, value);
    }
    Ok(properties)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Joins continued lines and drops blank and comment lines. Escapes are left
/// in place for `split_entry`.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in text.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = raw.trim_start_matches(is_blank);

        let mut logical = match current.take() {
            Some(pending) => pending,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                String::new()
            }
        };

        if ends_with_continuation(trimmed) {
            logical.push_str(&trimmed[..trimmed.len() - 1]);
            current = Some(logical);
        } else {
            logical.push_str(trimmed);
            lines.push(logical);
        }
    }

    if let Some(pending) = current {
        lines.push(pending);
    }
    lines
}

fn split_entry(line: &str) -> Result<(String, String)> {
    let mut chars = line.chars().peekable();
    let mut key = String::new();

    while let Some(&c) = chars.peek() {
        match c {
            '=' | ':' => break,
            c if is_blank(c) => break,
            '\\' => {
                chars.next();
                key.push(unescape(&mut chars)?);
            }
            c => {
                key.push(c);
                chars.next();
            }
        }
    }

    while chars.peek().copied().is_some_and(is_blank) {
        chars.next();
    }
    if matches!(chars.peek(), Some('=' | ':')) {
        chars.next();
        while chars.peek().copied().is_some_and(is_blank) {
            chars.next();
        }
    }

    let mut value = String::new();
    while let Some(c) = chars.next() {
        if c == '\\' {
            value.push(unescape(&mut chars)?);
        } else {
            value.push(c);
        }
    }

    Ok((key, value))
}

fn unescape(chars: &mut impl Iterator<Item = char>) -> Result<char> {
    let Some(c) = chars.next() else {
        return Ok('\\');
    };
    Ok(match c {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        'f' => '\u{c}',
        'u' => {
            let hex: String = chars.take(4).collect();
            let code = u32::from_str_radix(&hex, 16)
                .ok()
                .filter(|_| hex.len() == 4)
                .ok_or_else(|| {
                    CmError::Serialization(format!("Malformed \\uXXXX escape: \\u{hex}"))
                })?;
            char::from_u32(code).ok_or_else(|| {
                CmError::Serialization(format!("Invalid unicode escape: \\u{hex}"))
            })?
        }
        other => other,
    })
}
