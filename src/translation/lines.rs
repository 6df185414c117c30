//! Line splitting and joining.
//!
//! Text is split on `\n` only. Empty lines survive as empty elements, so
//! `join_lines(&split_lines(text)) == text` for any input.

const LINE_DELIMITER: char = '\n';

/// Splits text into its lines, keeping empty ones.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split(LINE_DELIMITER).collect()
}

/// Joins lines back together with the delimiter used by [`split_lines`].
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let capacity = lines.iter().map(|l| l.as_ref().len() + 1).sum();
    let mut joined = String::with_capacity(capacity);

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            joined.push(LINE_DELIMITER);
        }
        joined.push_str(line.as_ref());
    }

    joined
}

/// Returns `true` for empty or whitespace-only lines.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
