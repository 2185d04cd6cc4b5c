//! Identifier and label escaping shared by the diagram syntaxes.

/// Turn a logical name into an identifier legal in every supported notation.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, and an underscore is
/// prepended when the result does not start with a letter or underscore.
/// Already-legal names are returned unchanged and applying it twice is the
/// same as applying it once.
pub fn sanitize_identifier(name: &str) -> String {
    let mut id: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    match id.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => id.insert(0, '_'),
    }
    id
}

/// Check if a name is already a legal identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Replace double quotes for notations whose strings cannot escape them.
///
/// Line breaks become spaces so the text stays on one line.
pub fn unquote(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '"' => '\'',
            '\n' | '\r' => ' ',
            c => c,
        })
        .collect()
}

/// Escape a Graphviz double-quoted string.
pub fn escape_dot_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Escape text placed inside a Graphviz record label field.
pub fn escape_record_field(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '"' | '{' | '}' | '|' | '<' | '>' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    escaped
}
