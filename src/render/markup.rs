//! Conversion of raw command output into page markup.

use super::ansi;

/// Line break element emitted for every line terminator.
pub const LINE_BREAK: &str = "<br/>";

/// Convert captured command output into HTML markup.
///
/// Bytes are decoded lossily. With `color` enabled ANSI SGR sequences become
/// styled spans; otherwise the text is only escaped. `\r\n` and `\n` both
/// become a single [`LINE_BREAK`].
pub fn to_markup(bytes: &[u8], color: bool) -> String {
    let text = String::from_utf8_lossy(bytes);

    let html = if color {
        ansi::to_html(&text)
    } else {
        escape_html(&text)
    };

    html.replace("\r\n", LINE_BREAK).replace('\n', LINE_BREAK)
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut out, c);
    }
    out
}

pub(super) fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}
