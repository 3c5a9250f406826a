//! Normalizes raw source text into an ordered sequence of logical lines.
//!
//! No lexical validation happens here; malformed tokens surface later, in
//! the parser or during Pass 1/Pass 2. This stage only trims whitespace,
//! collapses internal whitespace runs, and strips `#` comments.

/// A single cleaned logical line, paired with its 1-based line number in
/// the original source. The line number travels with the text for the
/// rest of the pipeline so every diagnostic can point back at the source.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedLine {
    pub line_number: usize,
    pub text: String,
}

/// Cleans every raw source line: trim, collapse whitespace runs to a
/// single space, strip from the first `#` to end-of-line, then drop
/// lines that are empty after cleaning. Order is preserved.
pub fn clean_source(source: &str) -> Vec<CleanedLine> {
    let mut lines = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let without_comment = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };

        let cleaned = collapse_whitespace(without_comment.trim());

        if cleaned.is_empty() {
            continue;
        }

        lines.push(CleanedLine {
            line_number: idx + 1,
            text: cleaned,
        });
    }

    lines
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
            }
            prev_was_space = true;
        } else {
            out.push(c);
            prev_was_space = false;
        }
    }

    out
}
