//! Shared utility helpers.

use crate::model::SourcePosition;

/// Byte offset of a tokenizer location (1-indexed line and column) in `text`.
///
/// The tokenizer counts columns in characters, so the column is walked to a
/// byte offset; multibyte characters earlier on the line must not shift it.
/// Clamped to the end of the addressed line (or of `text`) when the location
/// points past it.
pub fn offset_at(text: &str, line: u64, column: u64) -> usize {
    let mut line_start = 0usize;
    let mut current_line = 1u64;
    if line > 1 {
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                current_line += 1;
                if current_line == line {
                    line_start = i + 1;
                    break;
                }
            }
        }
        if current_line < line {
            return text.len();
        }
    }
    let line_text = match text[line_start..].find('\n') {
        Some(n) => &text[line_start..line_start + n],
        None => &text[line_start..],
    };
    match line_text.char_indices().nth(column.saturating_sub(1) as usize) {
        Some((i, _)) => line_start + i,
        None => line_start + line_text.len(),
    }
}

/// Position of the last non-whitespace character in `text`.
///
/// The column is the character index on that character's own line, so
/// multi-line statements report their terminator correctly.
pub fn final_char_position(text: &str) -> Option<SourcePosition> {
    let mut line = 1usize;
    let mut column = 0usize;
    let mut last = None;
    for ch in text.chars() {
        if ch == '\n' {
            line += 1;
            column = 0;
            continue;
        }
        if !ch.is_whitespace() {
            last = Some(SourcePosition::new(line, column));
        }
        column += 1;
    }
    last
}
