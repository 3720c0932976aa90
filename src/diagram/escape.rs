//! Quoting rules for user-supplied names and text in PlantUML output.
//!
//! One record must always produce exactly one output line, so raw line
//! breaks are folded into PlantUML's literal `\n` escape everywhere.

/// Folds CR, LF and CRLF into the two-character sequence `\n`.
pub fn text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                escaped.push_str("\\n");
            }
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wraps a structural name in double quotes. Embedded `"` become `'`.
pub fn quoted(name: &str) -> String {
    format!("\"{}\"", text(name).replace('"', "'"))
}

/// Component names use PlantUML's bracket form; brackets inside become parentheses.
pub fn bracketed(name: &str) -> String {
    let inner: String = text(name)
        .chars()
        .map(|c| match c {
            '[' => '(',
            ']' => ')',
            _ => c,
        })
        .collect();
    format!("[{}]", inner)
}

fn is_plain_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Sequence participants stay bare when they are plain identifiers and are quoted otherwise.
pub fn participant(name: &str) -> String {
    if is_plain_identifier(name) {
        name.to_string()
    } else {
        quoted(name)
    }
}
