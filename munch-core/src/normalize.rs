//! Whitespace normalization shared by every chunking path

/// Normalize line endings and horizontal whitespace
///
/// Blank lines survive (collapsed to exactly one) so paragraph structure
/// stays visible to the mixed-language path. Lines are trimmed and runs of
/// spaces, tabs and no-break spaces collapse to one space.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    let mut pending_newlines = 0usize;

    for line in unified.split('\n') {
        let collapsed = collapse_spaces(line);
        if collapsed.is_empty() {
            pending_newlines += 1;
            continue;
        }
        if !out.is_empty() {
            // one newline ends the previous line, any more make a blank line
            out.push_str(if pending_newlines > 0 { "\n\n" } else { "\n" });
        }
        out.push_str(&collapsed);
        pending_newlines = 0;
    }

    out
}

/// Collapse every whitespace run (newlines included) to a single space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collapse_spaces(line: &str) -> String {
    line.split(|c: char| c == ' ' || c == '\t' || c == '\u{00A0}' || c == '\u{3000}')
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Length in Unicode scalar values
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
