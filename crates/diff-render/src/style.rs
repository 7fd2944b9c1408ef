//! Text styles and the style-string syntax used by themes.
//!
//! A style string is a whitespace separated list of words, for example
//! `"bold #ffffff on #b3263a"`:
//!
//! ```text
//! bold dim italic underline blink reverse strike   enable an attribute
//! not <attribute>                                  explicitly disable one
//! red bright_cyan default #rrggbb rgb(r,g,b) color(n)   foreground colour
//! on <colour>                                      background colour
//! none                                             no styling at all
//! ```

use std::fmt;
use std::str::FromStr;

use owo_colors::{AnsiColors, DynColors, XtermColors};

use crate::error::{DiffError, Result};

/// A terminal colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// The terminal's default colour
    Default,

    /// One of the sixteen standard colours (0-15)
    Standard(u8),

    /// An entry of the 256-colour palette
    Indexed(u8),

    /// A 24-bit colour
    Rgb(u8, u8, u8),
}

const STANDARD_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// RGB values used when a standard colour has to be spelled out (HTML)
const STANDARD_RGB: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0x80, 0x00, 0x00),
    (0x00, 0x80, 0x00),
    (0x80, 0x80, 0x00),
    (0x00, 0x00, 0x80),
    (0x80, 0x00, 0x80),
    (0x00, 0x80, 0x80),
    (0xc0, 0xc0, 0xc0),
    (0x80, 0x80, 0x80),
    (0xff, 0x00, 0x00),
    (0x00, 0xff, 0x00),
    (0xff, 0xff, 0x00),
    (0x00, 0x00, 0xff),
    (0xff, 0x00, 0xff),
    (0x00, 0xff, 0xff),
    (0xff, 0xff, 0xff),
];

impl Color {
    /// Parse a single colour word
    pub fn parse(word: &str) -> Option<Self> {
        let word = word.to_ascii_lowercase();

        if word == "default" {
            return Some(Self::Default);
        }
        if let Some(hex) = word.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(args) = word.strip_prefix("rgb(").and_then(|w| w.strip_suffix(')')) {
            let parts: Vec<u8> = args
                .split(',')
                .map(|p| p.trim().parse::<u8>())
                .collect::<std::result::Result<_, _>>()
                .ok()?;
            return match parts.as_slice() {
                [r, g, b] => Some(Self::Rgb(*r, *g, *b)),
                _ => None,
            };
        }
        if let Some(index) = word.strip_prefix("color(").and_then(|w| w.strip_suffix(')')) {
            return index.trim().parse::<u8>().ok().map(Self::Indexed);
        }

        let (bright, name) = match word.strip_prefix("bright_") {
            Some(name) => (8, name),
            None => (0, word.as_str()),
        };
        STANDARD_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|idx| Self::Standard(idx as u8 + bright))
    }

    /// Resolve to 24-bit RGB, `None` for the terminal default
    pub fn to_rgb(self) -> Option<(u8, u8, u8)> {
        match self {
            Self::Default => None,
            Self::Standard(n) => Some(STANDARD_RGB[(n & 0x0f) as usize]),
            Self::Indexed(n) if n < 16 => Some(STANDARD_RGB[n as usize]),
            Self::Indexed(n) if n < 232 => {
                let n = n - 16;
                let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
                Some((level(n / 36), level((n / 6) % 6), level(n % 6)))
            }
            Self::Indexed(n) => {
                let gray = 8 + (n - 232) * 10;
                Some((gray, gray, gray))
            }
            Self::Rgb(r, g, b) => Some((r, g, b)),
        }
    }

    /// CSS colour value
    pub fn to_css(self) -> Option<String> {
        self.to_rgb()
            .map(|(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
    }

    fn to_owo(self) -> DynColors {
        match self {
            Self::Default => DynColors::Ansi(AnsiColors::Default),
            Self::Standard(n) => DynColors::Ansi(standard_ansi(n)),
            Self::Indexed(n) => DynColors::Xterm(XtermColors::from(n)),
            Self::Rgb(r, g, b) => DynColors::Rgb(r, g, b),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn standard_ansi(n: u8) -> AnsiColors {
    match n & 0x0f {
        0 => AnsiColors::Black,
        1 => AnsiColors::Red,
        2 => AnsiColors::Green,
        3 => AnsiColors::Yellow,
        4 => AnsiColors::Blue,
        5 => AnsiColors::Magenta,
        6 => AnsiColors::Cyan,
        7 => AnsiColors::White,
        8 => AnsiColors::BrightBlack,
        9 => AnsiColors::BrightRed,
        10 => AnsiColors::BrightGreen,
        11 => AnsiColors::BrightYellow,
        12 => AnsiColors::BrightBlue,
        13 => AnsiColors::BrightMagenta,
        14 => AnsiColors::BrightCyan,
        _ => AnsiColors::BrightWhite,
    }
}

/// A set of text attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Attributes(u8);

impl Attributes {
    pub const BOLD: Self = Self(1);
    pub const DIM: Self = Self(1 << 1);
    pub const ITALIC: Self = Self(1 << 2);
    pub const UNDERLINE: Self = Self(1 << 3);
    pub const BLINK: Self = Self(1 << 4);
    pub const REVERSE: Self = Self(1 << 5);
    pub const STRIKE: Self = Self(1 << 6);

    /// The empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    fn from_word(word: &str) -> Option<Self> {
        match word {
            "bold" | "b" => Some(Self::BOLD),
            "dim" | "d" => Some(Self::DIM),
            "italic" | "i" => Some(Self::ITALIC),
            "underline" | "u" => Some(Self::UNDERLINE),
            "blink" => Some(Self::BLINK),
            "reverse" | "r" => Some(Self::REVERSE),
            "strike" | "s" => Some(Self::STRIKE),
            _ => None,
        }
    }
}

/// Foreground, background and attributes applied to a run of text.
///
/// Unset colours fall through to whatever style lies underneath when
/// styles are [layered](Style::layer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground colour
    pub fg: Option<Color>,

    /// Background colour
    pub bg: Option<Color>,

    /// Attributes switched on
    pub attrs: Attributes,

    /// Attributes explicitly switched off
    pub unset: Attributes,
}

impl Style {
    /// The empty style
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: Attributes::empty(),
            unset: Attributes::empty(),
        }
    }

    /// Parse a style string such as `"bold #ffffff on #b3263a"`
    pub fn parse(spec: &str) -> Result<Self> {
        let words: Vec<String> = spec
            .split_whitespace()
            .map(|w| w.to_ascii_lowercase())
            .collect();

        if words.is_empty() || words == ["none"] {
            return Ok(Self::new());
        }

        let mut style = Self::new();
        let mut words = words.iter();
        while let Some(word) = words.next() {
            match word.as_str() {
                "on" => {
                    let color = words
                        .next()
                        .ok_or_else(|| DiffError::invalid_style(spec, "`on` must be followed by a colour"))?;
                    let color = Color::parse(color).ok_or_else(|| {
                        DiffError::invalid_style(spec, format!("unknown colour {color:?}"))
                    })?;
                    style.bg = Some(color);
                }
                "not" => {
                    let attr = words
                        .next()
                        .ok_or_else(|| DiffError::invalid_style(spec, "`not` must be followed by an attribute"))?;
                    let attr = Attributes::from_word(attr).ok_or_else(|| {
                        DiffError::invalid_style(spec, format!("unknown attribute {attr:?}"))
                    })?;
                    style.unset = style.unset.union(attr);
                    style.attrs = style.attrs.difference(attr);
                }
                other => {
                    if let Some(attr) = Attributes::from_word(other) {
                        style.attrs = style.attrs.union(attr);
                        style.unset = style.unset.difference(attr);
                    } else if let Some(color) = Color::parse(other) {
                        style.fg = Some(color);
                    } else {
                        return Err(DiffError::invalid_style(
                            spec,
                            format!("unknown word {other:?}"),
                        ));
                    }
                }
            }
        }

        Ok(style)
    }

    /// Set the foreground colour
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background colour
    pub const fn on(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Switch an attribute on
    pub const fn with(mut self, attrs: Attributes) -> Self {
        self.attrs = self.attrs.union(attrs);
        self.unset = self.unset.difference(attrs);
        self
    }

    pub const fn bold(self) -> Self {
        self.with(Attributes::BOLD)
    }

    pub const fn dim(self) -> Self {
        self.with(Attributes::DIM)
    }

    /// True when this style changes nothing
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty() && self.unset.is_empty()
    }

    /// Layer `over` on top of this style.
    ///
    /// Colours set in `over` win, attributes accumulate, and attributes
    /// `over` explicitly switches off are removed.
    pub fn layer(self, over: Style) -> Style {
        Style {
            fg: over.fg.or(self.fg),
            bg: over.bg.or(self.bg),
            attrs: self.attrs.difference(over.unset).union(over.attrs),
            unset: self.unset.difference(over.attrs).union(over.unset),
        }
    }

    /// Convert to an `owo-colors` style for ANSI output
    pub fn to_owo(self) -> owo_colors::Style {
        let mut style = owo_colors::Style::new();
        if let Some(fg) = self.fg {
            style = style.color(fg.to_owo());
        }
        if let Some(bg) = self.bg {
            style = style.on_color(bg.to_owo());
        }

        let attrs = self.attrs;
        if attrs.contains(Attributes::BOLD) {
            style = style.bold();
        }
        if attrs.contains(Attributes::DIM) {
            style = style.dimmed();
        }
        if attrs.contains(Attributes::ITALIC) {
            style = style.italic();
        }
        if attrs.contains(Attributes::UNDERLINE) {
            style = style.underline();
        }
        if attrs.contains(Attributes::BLINK) {
            style = style.blink();
        }
        if attrs.contains(Attributes::REVERSE) {
            style = style.reversed();
        }
        if attrs.contains(Attributes::STRIKE) {
            style = style.strikethrough();
        }
        style
    }

    /// Inline CSS declarations for this style, empty for a plain style
    pub fn to_css(self) -> String {
        let (mut fg, mut bg) = (self.fg, self.bg);
        if self.attrs.contains(Attributes::REVERSE) {
            std::mem::swap(&mut fg, &mut bg);
        }

        let mut decls = Vec::new();
        if let Some(color) = fg.and_then(Color::to_css) {
            decls.push(format!("color: {color}"));
        }
        if let Some(color) = bg.and_then(Color::to_css) {
            decls.push(format!("background-color: {color}"));
        }
        if self.attrs.contains(Attributes::BOLD) {
            decls.push("font-weight: bold".to_string());
        }
        if self.attrs.contains(Attributes::DIM) {
            decls.push("opacity: 0.6".to_string());
        }
        if self.attrs.contains(Attributes::ITALIC) {
            decls.push("font-style: italic".to_string());
        }

        let decorations: Vec<&str> = [
            (Attributes::UNDERLINE, "underline"),
            (Attributes::STRIKE, "line-through"),
            (Attributes::BLINK, "blink"),
        ]
        .into_iter()
        .filter(|(attr, _)| self.attrs.contains(*attr))
        .map(|(_, name)| name)
        .collect();
        if !decorations.is_empty() {
            decls.push(format!("text-decoration: {}", decorations.join(" ")));
        }

        decls.join("; ")
    }
}

impl FromStr for Style {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Default => f.write_str("default"),
            Self::Standard(n) if n < 8 => f.write_str(STANDARD_NAMES[n as usize]),
            Self::Standard(n) => write!(f, "bright_{}", STANDARD_NAMES[(n & 0x07) as usize]),
            Self::Indexed(n) => write!(f, "color({n})"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}
