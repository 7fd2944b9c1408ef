//! Theme definitions for diff rendering
//!
//! A theme names the seven styles a rendered diff uses. Themes can be built
//! from [`Style`] values directly or parsed from style strings through
//! [`ThemeSpec`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DiffError, Result};
use crate::reconcile::Sign;
use crate::style::{Color, Style};

/// Styles used when rendering a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Old/new line numbers
    pub gutter: Style,

    /// The separator glyph between gutter and content
    pub sep: Style,

    /// Unchanged lines
    pub equal: Style,

    /// Added lines
    pub add_line: Style,

    /// Deleted lines
    pub del_line: Style,

    /// Changed characters inside an added line
    pub add_inline: Style,

    /// Changed characters inside a deleted line
    pub del_inline: Style,
}

impl Theme {
    /// Cyan additions on deep teal, red deletions on deep red (default)
    pub const fn cyan() -> Self {
        Self {
            gutter: Style::new().dim(),
            sep: Style::new().dim(),
            equal: Style::new(),
            add_line: Style::new()
                .fg(Color::Rgb(0xc8, 0xf6, 0xff))
                .on(Color::Rgb(0x08, 0x32, 0x46)),
            del_line: Style::new()
                .fg(Color::Rgb(0xff, 0xd0, 0xd0))
                .on(Color::Rgb(0x3a, 0x14, 0x14)),
            add_inline: Style::new()
                .bold()
                .fg(Color::Rgb(0x00, 0x10, 0x18))
                .on(Color::Rgb(0x00, 0xd7, 0xff)),
            del_inline: Style::new()
                .bold()
                .fg(Color::Rgb(0xff, 0xff, 0xff))
                .on(Color::Rgb(0xb3, 0x26, 0x3a)),
        }
    }

    /// Green additions on deep green, red deletions on deep red
    pub const fn green() -> Self {
        Self {
            gutter: Style::new().dim(),
            sep: Style::new().dim(),
            equal: Style::new(),
            add_line: Style::new()
                .fg(Color::Rgb(0xb5, 0xf5, 0xc2))
                .on(Color::Rgb(0x16, 0x3a, 0x23)),
            del_line: Style::new()
                .fg(Color::Rgb(0xff, 0xb4, 0xb4))
                .on(Color::Rgb(0x3a, 0x1e, 0x1e)),
            add_inline: Style::new()
                .bold()
                .fg(Color::Rgb(0xff, 0xff, 0xff))
                .on(Color::Rgb(0x1f, 0x6f, 0x3a)),
            del_inline: Style::new()
                .bold()
                .fg(Color::Rgb(0xff, 0xff, 0xff))
                .on(Color::Rgb(0x8a, 0x2a, 0x2a)),
        }
    }

    /// Style used to extend a row's background to the target width
    pub fn fill_style(&self, sign: Sign) -> Style {
        match sign {
            Sign::Unchanged => self.equal,
            Sign::Delete => self.del_line,
            Sign::Insert => self.add_line,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::cyan()
    }
}

/// A theme written as style strings, e.g. `"bold #ffffff on #b3263a"`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThemeSpec {
    pub gutter: String,
    pub sep: String,
    pub equal: String,
    pub add_line: String,
    pub del_line: String,
    pub add_inline: String,
    pub del_inline: String,
}

impl Default for ThemeSpec {
    fn default() -> Self {
        Self {
            gutter: "dim".to_string(),
            sep: "dim".to_string(),
            equal: "none".to_string(),
            add_line: "#c8f6ff on #083246".to_string(),
            del_line: "#ffd0d0 on #3a1414".to_string(),
            add_inline: "bold #001018 on #00d7ff".to_string(),
            del_inline: "bold #ffffff on #b3263a".to_string(),
        }
    }
}

impl TryFrom<&ThemeSpec> for Theme {
    type Error = DiffError;

    fn try_from(spec: &ThemeSpec) -> Result<Self> {
        Ok(Self {
            gutter: Style::parse(&spec.gutter)?,
            sep: Style::parse(&spec.sep)?,
            equal: Style::parse(&spec.equal)?,
            add_line: Style::parse(&spec.add_line)?,
            del_line: Style::parse(&spec.del_line)?,
            add_inline: Style::parse(&spec.add_inline)?,
            del_inline: Style::parse(&spec.del_inline)?,
        })
    }
}

impl TryFrom<ThemeSpec> for Theme {
    type Error = DiffError;

    fn try_from(spec: ThemeSpec) -> Result<Self> {
        Self::try_from(&spec)
    }
}
