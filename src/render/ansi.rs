//! ANSI escape sequence to HTML conversion.
//!
//! SGR sequences (`ESC [ ... m`) become inline-styled `<span>` elements.
//! Every other escape sequence is dropped. Text is HTML-escaped.

use std::fmt::Write as _;

use vte::{Params, Parser, Perform};

use super::markup::push_escaped;

/// The 16 base colors, xterm defaults.
const BASE_COLORS: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Palette(u8),
    Rgb(u8, u8, u8),
}

impl Color {
    fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Palette(n @ 0..=15) => BASE_COLORS[n as usize],
            Color::Palette(n @ 16..=231) => {
                let n = n - 16;
                (
                    CUBE_LEVELS[(n / 36) as usize],
                    CUBE_LEVELS[((n / 6) % 6) as usize],
                    CUBE_LEVELS[(n % 6) as usize],
                )
            }
            Color::Palette(n) => {
                let level = 8 + 10 * (n - 232);
                (level, level, level)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Style {
    bold: bool,
    dim: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    fg: Option<Color>,
    bg: Option<Color>,
}

impl Style {
    fn is_plain(&self) -> bool {
        *self == Style::default()
    }

    fn css(&self) -> String {
        let mut css = String::new();
        if let Some(fg) = self.fg {
            let (r, g, b) = fg.rgb();
            let _ = write!(css, "color:#{:02x}{:02x}{:02x};", r, g, b);
        }
        if let Some(bg) = self.bg {
            let (r, g, b) = bg.rgb();
            let _ = write!(css, "background-color:#{:02x}{:02x}{:02x};", r, g, b);
        }
        if self.bold {
            css.push_str("font-weight:bold;");
        }
        if self.dim {
            css.push_str("opacity:0.7;");
        }
        if self.italic {
            css.push_str("font-style:italic;");
        }
        match (self.underline, self.strike) {
            (true, true) => css.push_str("text-decoration:underline line-through;"),
            (true, false) => css.push_str("text-decoration:underline;"),
            (false, true) => css.push_str("text-decoration:line-through;"),
            (false, false) => {}
        }
        css
    }

    /// Apply SGR parameters in order.
    fn apply(&mut self, params: &[u16]) {
        let mut iter = params.iter().copied();
        while let Some(code) = iter.next() {
            match code {
                0 => *self = Style::default(),
                1 => self.bold = true,
                2 => self.dim = true,
                3 => self.italic = true,
                4 => self.underline = true,
                9 => self.strike = true,
                21 | 22 => {
                    self.bold = false;
                    self.dim = false;
                }
                23 => self.italic = false,
                24 => self.underline = false,
                29 => self.strike = false,
                30..=37 => self.fg = Some(Color::Palette((code - 30) as u8)),
                38 => self.fg = extended_color(&mut iter),
                39 => self.fg = None,
                40..=47 => self.bg = Some(Color::Palette((code - 40) as u8)),
                48 => self.bg = extended_color(&mut iter),
                49 => self.bg = None,
                90..=97 => self.fg = Some(Color::Palette((code - 90 + 8) as u8)),
                100..=107 => self.bg = Some(Color::Palette((code - 100 + 8) as u8)),
                _ => {}
            }
        }
    }
}

/// Parse the tail of a `38`/`48` parameter: `5;n` or `2;r;g;b`.
fn extended_color(iter: &mut impl Iterator<Item = u16>) -> Option<Color> {
    match iter.next()? {
        5 => iter.next().map(|n| Color::Palette(n.min(255) as u8)),
        2 => {
            let r = iter.next()?;
            let g = iter.next()?;
            let b = iter.next()?;
            Some(Color::Rgb(
                r.min(255) as u8,
                g.min(255) as u8,
                b.min(255) as u8,
            ))
        }
        _ => None,
    }
}

/// Convert text containing ANSI escape sequences to HTML.
pub fn to_html(input: &str) -> String {
    let mut writer = HtmlWriter::with_capacity(input.len());
    let mut parser: Parser = Parser::new();
    parser.advance(&mut writer, input.as_bytes());
    writer.finish()
}

/// Receives parsed text and sequences and writes styled markup.
struct HtmlWriter {
    out: String,
    style: Style,
    span_open: bool,
}

impl HtmlWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            style: Style::default(),
            span_open: false,
        }
    }

    fn set_style(&mut self, next: Style) {
        if next == self.style {
            return;
        }
        self.close_span();
        self.style = next;
        if !self.style.is_plain() {
            let _ = write!(self.out, "<span style=\"{}\">", self.style.css());
            self.span_open = true;
        }
    }

    fn close_span(&mut self) {
        if self.span_open {
            self.out.push_str("</span>");
            self.span_open = false;
        }
    }

    fn finish(mut self) -> String {
        self.close_span();
        self.out
    }
}

impl Perform for HtmlWriter {
    fn print(&mut self, c: char) {
        push_escaped(&mut self.out, c);
    }

    fn execute(&mut self, byte: u8) {
        // Line structure survives; other C0 controls are dropped.
        if matches!(byte, b'\t' | b'\n' | b'\r') {
            self.out.push(byte as char);
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if action != 'm' || ignore || !intermediates.is_empty() {
            return;
        }
        // Colon sub-parameters are flattened, so `38:5:n` reads like `38;5;n`.
        let mut codes: Vec<u16> = params.iter().flatten().copied().collect();
        if codes.is_empty() {
            codes.push(0);
        }
        let mut next = self.style;
        next.apply(&codes);
        self.set_style(next);
    }
}
