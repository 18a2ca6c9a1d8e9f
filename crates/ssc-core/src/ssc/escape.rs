/// Characters that end or split a tag value and must be backslash-escaped.
const ESCAPED_CHARS: [char; 3] = ['\\', ':', ';'];

/// Escape a value for embedding in a `#TAG:value;` line.
///
/// Each `//` pair becomes `\/\/` so readers don't take the rest of the line
/// for a comment.
pub fn sm_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '/' && chars.peek() == Some(&'/') {
            chars.next();
            out.push_str("\\/\\/");
            continue;
        }
        if ESCAPED_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Inverse of `sm_escape`. A trailing lone backslash is kept.
pub fn sm_unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
