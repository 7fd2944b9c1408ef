//! Output backends for rendered diffs.
//!
//! Formatting produces styled rows; a backend decides how each styled run
//! is written out. Every backend is a pure transform of the same
//! [`RenderedDiff`].

use std::fmt::{self, Write};

use owo_colors::OwoColorize;

use crate::error::Result;
use crate::format::RenderedDiff;
use crate::style::Style;
use crate::styled_text::StyledText;

/// A backend that decides how styled text is written.
pub trait ColorBackend {
    /// Write one run of text in the given style.
    fn write_styled<W: Write>(&self, w: &mut W, text: &str, style: Style) -> fmt::Result;

    /// Written once before the first row.
    fn write_header<W: Write>(&self, _w: &mut W) -> fmt::Result {
        Ok(())
    }

    /// Written once after the last row.
    fn write_footer<W: Write>(&self, _w: &mut W) -> fmt::Result {
        Ok(())
    }

    /// Write a full row followed by a newline.
    fn write_row<W: Write>(&self, w: &mut W, row: &StyledText) -> fmt::Result {
        for run in row.runs() {
            self.write_styled(w, run.text, run.style)?;
        }
        w.write_char('\n')
    }
}

/// Plain backend - layout only, no styling.
///
/// Use this for log files and other non-terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBackend;

impl ColorBackend for PlainBackend {
    fn write_styled<W: Write>(&self, w: &mut W, text: &str, _style: Style) -> fmt::Result {
        w.write_str(text)
    }
}

/// ANSI backend - emits SGR escape sequences with 24-bit colours.
///
/// The output does not depend on whether the process is attached to a
/// terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiBackend;

impl ColorBackend for AnsiBackend {
    fn write_styled<W: Write>(&self, w: &mut W, text: &str, style: Style) -> fmt::Result {
        if style.is_plain() {
            return w.write_str(text);
        }
        write!(w, "{}", text.style(style.to_owo()))
    }
}

/// HTML backend - inline CSS on `<span>`s inside a scrollable `<pre>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBackend;

const HTML_PRE_STYLE: &str =
    "font-family: Menlo, 'DejaVu Sans Mono', Consolas, 'Courier New', monospace; line-height: 1.2; margin: 0";

impl ColorBackend for HtmlBackend {
    fn write_styled<W: Write>(&self, w: &mut W, text: &str, style: Style) -> fmt::Result {
        let css = style.to_css();
        if css.is_empty() {
            return write_escaped(w, text);
        }
        write!(w, "<span style=\"{css}\">")?;
        write_escaped(w, text)?;
        w.write_str("</span>")
    }

    fn write_header<W: Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "<div style=\"overflow-x:auto\"><pre style=\"{HTML_PRE_STYLE}\"><code>")
    }

    fn write_footer<W: Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("</code></pre></div>")
    }
}

fn write_escaped<W: Write>(w: &mut W, text: &str) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => w.write_str("&amp;")?,
            '<' => w.write_str("&lt;")?,
            '>' => w.write_str("&gt;")?,
            '"' => w.write_str("&quot;")?,
            '\'' => w.write_str("&#39;")?,
            _ => w.write_char(ch)?,
        }
    }
    Ok(())
}

/// Render a diff to a writer.
pub fn render<W: Write, B: ColorBackend>(diff: &RenderedDiff, w: &mut W, backend: &B) -> fmt::Result {
    backend.write_header(w)?;
    for row in diff {
        backend.write_row(w, row)?;
    }
    backend.write_footer(w)
}

/// Render a diff to a String.
pub fn render_to_string<B: ColorBackend>(diff: &RenderedDiff, backend: &B) -> Result<String> {
    let mut out = String::new();
    render(diff, &mut out, backend)?;
    Ok(out)
}
