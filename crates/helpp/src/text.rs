// src/text.rs
//
// Small string helpers shared by the extractor and the post-processor.

/// Removes leading and trailing whitespace in place. An empty string is left alone.
pub fn trim(s: &mut String) {
    if s.is_empty() {
        return;
    }
    let end = s.trim_end().len();
    s.truncate(end);
    let start = s.len() - s.trim_start().len();
    s.replace_range(..start, "");
}

/// Replaces every maximal run of whitespace with a single space.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Removes every whitespace character.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Interprets `\n`, `\s`, `\t` and `\v` in macro replacement text.
///
/// `\\` yields a single backslash and takes the following character with it,
/// so `\\n` stays a backslash followed by `n`. Unknown escapes are kept as
/// written.
pub fn interpret_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let replacement = match chars.peek() {
            Some('n') => '\n',
            Some('s') => ' ',
            Some('t') => '\t',
            Some('v') => '\u{0B}',
            Some('\\') => '\\',
            _ => {
                out.push('\\');
                continue;
            }
        };
        chars.next();
        out.push(replacement);
    }
    out
}
