//! Line-oriented property file reader
//!
//! Splits property text into logical lines (joining backslash continuations,
//! dropping comments and blank lines) and then each logical line into a raw
//! key and value. Whitespace around the separator is kept so that stray spaces
//! stay visible to the whitespace hygiene check.

use crate::error::{AppError, Result};

/// One `key=value` entry, escapes already decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    /// Raw key text
    pub key: String,
    /// Raw value text
    pub value: String,
    /// 1-based natural line where the entry starts
    pub line: usize,
}

/// Whitespace that separates tokens in a property file
fn is_separator_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Split text into natural lines, treating `\n`, `\r` and `\r\n` as terminators
fn natural_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// True when the line ends in an odd number of backslashes
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Join natural lines into logical lines, returning each with its start line
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut logical = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, raw) in natural_lines(text).into_iter().enumerate() {
        let line_no = index + 1;
        let trimmed = raw.trim_start_matches(is_separator_whitespace);

        if pending.is_none() {
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
        }

        let (start, mut buffer) = pending.take().unwrap_or((line_no, String::new()));

        if continues(trimmed) {
            buffer.push_str(&trimmed[..trimmed.len() - 1]);
            pending = Some((start, buffer));
        } else {
            buffer.push_str(trimmed);
            logical.push((start, buffer));
        }
    }

    // A continuation at end of input just ends the line
    if let Some(last) = pending {
        logical.push(last);
    }

    logical
}

/// Byte offsets splitting a logical line into key and value
///
/// Returns `(key_end, value_start)`. The key ends at the first unescaped `=`
/// or `:`. An unescaped whitespace run also ends the key, unless the run is
/// directly followed by `=` or `:`, in which case the whitespace stays in the
/// key.
fn split_point(line: &str) -> (usize, usize) {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' {
            return (offset, offset + c.len_utf8());
        } else if is_separator_whitespace(c) {
            let mut j = i;
            while j < chars.len() && is_separator_whitespace(chars[j].1) {
                j += 1;
            }
            match chars.get(j) {
                Some(&(sep, '=')) | Some(&(sep, ':')) => return (sep, sep + 1),
                Some(&(next, _)) => return (offset, next),
                None => return (offset, line.len()),
            }
        }
        i += 1;
    }

    (line.len(), line.len())
}

/// Decode property escapes: `\t`, `\n`, `\r`, `\f`, `\uXXXX`, and `\x` for any other `x`
fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                let code = if digits.len() == 4 {
                    u32::from_str_radix(&digits, 16).ok()
                } else {
                    None
                };
                let decoded = code.and_then(char::from_u32).ok_or_else(|| {
                    AppError::parse(format!("Malformed \\uxxxx encoding on line {}", line))
                })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Parse property text into entries in file order
pub fn parse_entries(text: &str) -> Result<Vec<PropertyEntry>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = Vec::new();

    for (line, logical) in logical_lines(text) {
        let (key_end, value_start) = split_point(&logical);
        let key = unescape(&logical[..key_end], line)?;
        let value = unescape(&logical[value_start..], line)?;
        entries.push(PropertyEntry { key, value, line });
    }

    Ok(entries)
}
