//! Decoding of quoted and block scalar content.
//!
//! The tokenizer finds where a scalar starts and ends; these functions turn
//! the raw slice into the text the document actually means.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

/// Block scalar chomping indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chomping {
    /// `-`: drop the final line break and trailing empty lines.
    Strip,
    /// no indicator: keep a single final line break.
    #[default]
    Clip,
    /// `+`: keep the final line break and trailing empty lines.
    Keep,
}

/// Decode the content of a double-quoted scalar (without the quotes).
///
/// Resolves escapes and folds raw line breaks. Returns the offending escape
/// sequence on failure.
pub fn decode_double_quoted(content: &str) -> Result<Cow<'_, str>, String> {
    if !content.contains(['\\', '\n', '\r']) {
        return Ok(Cow::Borrowed(content));
    }

    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    // End of the last escape; whitespace it produced is content.
    let mut escaped = 0;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(escape) = chars.next() else {
                    return Err("\\".to_string());
                };
                match escape {
                    '0' => out.push('\0'),
                    'a' => out.push('\x07'),
                    'b' => out.push('\x08'),
                    't' | '\t' => out.push('\t'),
                    'n' => out.push('\n'),
                    'v' => out.push('\x0b'),
                    'f' => out.push('\x0c'),
                    'r' => out.push('\r'),
                    'e' => out.push('\x1b'),
                    ' ' => out.push(' '),
                    '"' => out.push('"'),
                    '/' => out.push('/'),
                    '\\' => out.push('\\'),
                    'N' => out.push('\u{85}'),
                    '_' => out.push('\u{a0}'),
                    'L' => out.push('\u{2028}'),
                    'P' => out.push('\u{2029}'),
                    'x' => push_hex_escape(&mut out, &mut chars, 'x', 2)?,
                    'u' => push_hex_escape(&mut out, &mut chars, 'u', 4)?,
                    'U' => push_hex_escape(&mut out, &mut chars, 'U', 8)?,
                    '\r' | '\n' => {
                        // Escaped line break joins the lines without a space.
                        if escape == '\r' && chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                        while matches!(chars.peek(), Some(' ' | '\t')) {
                            chars.next();
                        }
                    }
                    other => return Err(format!("\\{}", other)),
                }
                escaped = out.len();
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => fold_line_break(&mut out, &mut chars, escaped),
            c => out.push(c),
        }
    }

    Ok(Cow::Owned(out))
}

/// Decode the content of a single-quoted scalar (without the quotes).
///
/// Only `''` is special; raw line breaks are folded like any flow scalar.
pub fn decode_single_quoted(content: &str) -> Cow<'_, str> {
    if !content.contains(['\'', '\n', '\r']) {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                // The tokenizer only lets doubled quotes through.
                chars.next();
                out.push('\'');
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => fold_line_break(&mut out, &mut chars, 0),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn push_hex_escape(
    out: &mut String,
    chars: &mut Peekable<Chars<'_>>,
    prefix: char,
    digits: usize,
) -> Result<(), String> {
    let mut hex = String::with_capacity(digits);
    for _ in 0..digits {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                hex.push(*c);
                chars.next();
            }
            _ => break,
        }
    }
    let decoded = u32::from_str_radix(&hex, 16)
        .ok()
        .filter(|_| hex.len() == digits)
        .and_then(char::from_u32);
    match decoded {
        Some(c) => {
            out.push(c);
            Ok(())
        }
        None => Err(format!("\\{}{}", prefix, hex)),
    }
}

/// Fold a raw line break inside a flow scalar.
///
/// Trailing whitespace before the break and leading whitespace after it are
/// dropped, but nothing before `keep`. A single break becomes a space; `n`
/// empty lines become `n` newlines.
fn fold_line_break(out: &mut String, chars: &mut Peekable<Chars<'_>>, keep: usize) {
    let trimmed = out.trim_end_matches([' ', '\t']).len().max(keep);
    out.truncate(trimmed);

    let mut empty_lines = 0;
    loop {
        while matches!(chars.peek(), Some(' ' | '\t')) {
            chars.next();
        }
        match chars.peek() {
            Some('\n') => {
                chars.next();
                empty_lines += 1;
            }
            Some('\r') => {
                chars.next();
            }
            _ => break,
        }
    }

    if empty_lines == 0 {
        out.push(' ');
    } else {
        for _ in 0..empty_lines {
            out.push('\n');
        }
    }
}

/// Decode the body of a literal (`|`) or folded (`>`) block scalar.
///
/// `body` is everything after the header line up to the end of the block.
/// `indent` is the content indentation; that many leading spaces are removed
/// from every line.
pub fn decode_block(body: &str, indent: usize, folded: bool, chomping: Chomping) -> String {
    let lines: Vec<&str> = body
        .lines()
        .map(|line| line.get(indent..).unwrap_or(""))
        .collect();

    let Some(last) = lines.iter().rposition(|line| !line.is_empty()) else {
        return match chomping {
            Chomping::Keep => "\n".repeat(lines.len()),
            _ => String::new(),
        };
    };
    let content = &lines[..=last];

    let mut out = if folded {
        fold_block_lines(content)
    } else {
        content.join("\n")
    };

    let ends_with_break = last + 1 < lines.len() || body.ends_with('\n');
    match chomping {
        Chomping::Strip => {}
        Chomping::Clip => {
            if ends_with_break {
                out.push('\n');
            }
        }
        Chomping::Keep => {
            if ends_with_break {
                out.push('\n');
            }
            for _ in last + 1..lines.len() {
                out.push('\n');
            }
        }
    }
    out
}

fn fold_block_lines(lines: &[&str]) -> String {
    let mut out = String::new();
    let mut empty_lines = 0;
    let mut prev_more_indented = false;
    let mut first = true;

    for line in lines {
        if line.is_empty() {
            empty_lines += 1;
            continue;
        }
        // More-indented lines keep their line breaks.
        let more_indented = line.starts_with([' ', '\t']);
        if !first && (more_indented || prev_more_indented) {
            out.push('\n');
        } else if !first && empty_lines == 0 {
            out.push(' ');
        }
        for _ in 0..empty_lines {
            out.push('\n');
        }
        out.push_str(line);
        empty_lines = 0;
        prev_more_indented = more_indented;
        first = false;
    }
    out
}
