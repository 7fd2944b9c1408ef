use std::fmt;
use std::io::{self, Write};

use log::{debug, warn};
use similar::Algorithm;

use crate::backend::{render_to_string, AnsiBackend, ColorBackend, HtmlBackend, PlainBackend};
use crate::display::{DisplayTarget, EvcxrDisplay, RichDisplay};
use crate::error::Result;
use crate::format::{GutterWidths, RenderedDiff, RowFormatter};
use crate::lines::split_lines;
use crate::options::{RenderOptions, EXPORT_WIDTH};
use crate::reconcile::{LineReconciler, Row};
use crate::theme::Theme;

/// An inline diff between two texts, with line numbers, +/- markers,
/// coloured backgrounds and character-level highlights on replaced lines.
///
/// Nothing is cached: every render call aligns and formats from scratch.
#[derive(Debug, Clone)]
pub struct InlineDiff {
    old: String,
    new: String,
    theme: Theme,
    show_unchanged: bool,
    algorithm: Algorithm,
}

impl InlineDiff {
    /// Diff `old` against `new` with the default theme, showing unchanged lines
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
            theme: Theme::default(),
            show_unchanged: true,
            algorithm: Algorithm::Myers,
        }
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Whether unchanged lines are rendered
    pub fn show_unchanged(mut self, show_unchanged: bool) -> Self {
        self.show_unchanged = show_unchanged;
        self
    }

    /// Alignment algorithm used for lines and characters
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn old_text(&self) -> &str {
        &self.old
    }

    pub fn new_text(&self) -> &str {
        &self.new
    }

    /// Gutter widths derived from the total line counts of both texts
    pub fn gutter_widths(&self) -> GutterWidths {
        GutterWidths::for_line_counts(split_lines(&self.old).len(), split_lines(&self.new).len())
    }

    /// The reconciled rows, before any layout
    pub fn rows(&self) -> Result<Vec<Row>> {
        let old_lines = split_lines(&self.old);
        let new_lines = split_lines(&self.new);

        LineReconciler::new(&self.theme)
            .show_unchanged(self.show_unchanged)
            .algorithm(self.algorithm)
            .reconcile(&old_lines, &new_lines)
    }

    /// The fully formatted rows, for direct display
    pub fn renderable(&self, options: &RenderOptions) -> Result<RenderedDiff> {
        let rows = self.rows()?;
        let target_width = options.target_width();
        debug!("formatting {} rows, target width {:?}", rows.len(), target_width);

        let rendered = RowFormatter::new(&self.theme, self.gutter_widths())
            .target_width(target_width)
            .format_rows(&rows);
        Ok(rendered)
    }

    /// Render through any backend at a fixed width
    pub fn render_with<B: ColorBackend>(&self, backend: &B, width: usize, pad_to_width: bool) -> Result<String> {
        let rendered = self.renderable(&RenderOptions::fixed(width, pad_to_width))?;
        render_to_string(&rendered, backend)
    }

    /// ANSI-coloured text, e.g. for a log stream that understands colours.
    ///
    /// Usual arguments: `EXPORT_WIDTH`, padded.
    pub fn to_ansi(&self, width: usize, pad_to_width: bool) -> Result<String> {
        self.render_with(&AnsiBackend, width, pad_to_width)
    }

    /// Unstyled text with the layout kept, e.g. for a log file.
    ///
    /// Usual arguments: `EXPORT_WIDTH`, unpadded.
    pub fn to_plain(&self, width: usize, pad_to_width: bool) -> Result<String> {
        self.render_with(&PlainBackend, width, pad_to_width)
    }

    /// An HTML fragment with inline styles in a horizontally scrollable `<div>`.
    ///
    /// Usual arguments: `EXPORT_WIDTH`, unpadded.
    pub fn to_html(&self, width: usize, pad_to_width: bool) -> Result<String> {
        self.render_with(&HtmlBackend, width, pad_to_width)
    }

    /// Write the styled rows to `out`
    pub fn print_to<W: Write>(&self, out: &mut W, options: &RenderOptions) -> Result<()> {
        let rendered = self.renderable(options)?;
        out.write_all(render_to_string(&rendered, &AnsiBackend)?.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Write the styled rows to stdout, sized to the terminal
    pub fn print(&self) -> Result<()> {
        self.print_to(&mut io::stdout().lock(), &RenderOptions::default())
    }

    /// Display the diff wherever this process is running: styled in a
    /// terminal, as HTML in a notebook, plain text otherwise
    pub fn show(&self, width: usize) -> Result<()> {
        self.show_on(
            DisplayTarget::detect(),
            &mut EvcxrDisplay::stdout(),
            &mut io::stdout().lock(),
            width,
        )
    }

    /// [`show`](Self::show) with the target and sinks supplied by the caller.
    ///
    /// `width` applies to the HTML and plain paths; the terminal path uses
    /// the terminal's own width.
    pub fn show_on<R: RichDisplay, W: Write>(
        &self,
        target: DisplayTarget,
        rich: &mut R,
        out: &mut W,
        width: usize,
    ) -> Result<()> {
        match target {
            DisplayTarget::Terminal => self.print_to(out, &RenderOptions::new().pad_to_width(true)),
            DisplayTarget::RichEmbedded => {
                let html = self.to_html(width, false)?;
                match rich.display_html(&html) {
                    Err(err) if err.is_recoverable() => {
                        warn!("{err}; falling back to plain text");
                        self.write_plain(out, width)
                    }
                    other => other,
                }
            }
            DisplayTarget::PlainFallback => self.write_plain(out, width),
        }
    }

    fn write_plain<W: Write>(&self, out: &mut W, width: usize) -> Result<()> {
        out.write_all(self.to_plain(width, false)?.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// The plain rendering at [`EXPORT_WIDTH`], so a diff can go straight into
/// a log message
impl fmt::Display for InlineDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = self.to_plain(EXPORT_WIDTH, false).map_err(|_| fmt::Error)?;
        f.write_str(&plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::NoRichDisplay;
    use pretty_assertions::assert_eq;

    const OLD: &str = "a\nb\nc\n";
    const NEW: &str = "a\nx\nc\n";

    #[test]
    fn test_plain_output() {
        let plain = InlineDiff::new(OLD, NEW).to_plain(EXPORT_WIDTH, false).unwrap();
        assert_eq!(
            plain,
            " 1  1   │ a\n 2    - │ b\n    2 + │ x\n 3  3   │ c\n"
        );
    }

    #[test]
    fn test_padded_plain_output_has_fixed_width() {
        let plain = InlineDiff::new(OLD, NEW).to_plain(30, true).unwrap();
        for line in plain.lines() {
            assert_eq!(line.chars().count(), 30, "{line:?}");
        }
    }

    #[test]
    fn test_display_matches_plain() {
        let diff = InlineDiff::new(OLD, NEW).show_unchanged(false);
        assert_eq!(diff.to_string(), diff.to_plain(EXPORT_WIDTH, false).unwrap());
    }

    #[test]
    fn test_show_on_terminal_prints_ansi() {
        let diff = InlineDiff::new(OLD, NEW);
        let mut out = Vec::new();
        diff.show_on(DisplayTarget::Terminal, &mut NoRichDisplay, &mut out, 40)
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("\x1b["));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn test_show_on_rich_display() {
        let diff = InlineDiff::new(OLD, NEW);
        let mut rich = EvcxrDisplay::new(Vec::new(), true);
        let mut out = Vec::new();
        diff.show_on(DisplayTarget::RichEmbedded, &mut rich, &mut out, 40)
            .unwrap();

        assert!(out.is_empty());
        let shown = String::from_utf8(rich.into_inner()).unwrap();
        assert!(shown.starts_with("EVCXR_BEGIN_CONTENT text/html\n<div style=\"overflow-x:auto\">"));
    }

    #[test]
    fn test_show_falls_back_to_plain_when_rich_display_is_missing() {
        let diff = InlineDiff::new(OLD, NEW);
        let mut out = Vec::new();
        diff.show_on(DisplayTarget::RichEmbedded, &mut NoRichDisplay, &mut out, 40)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            diff.to_plain(40, false).unwrap()
        );
    }

    #[test]
    fn test_show_plain_fallback() {
        let diff = InlineDiff::new(OLD, NEW);
        let mut out = Vec::new();
        diff.show_on(DisplayTarget::PlainFallback, &mut NoRichDisplay, &mut out, 40)
            .unwrap();
        assert!(!String::from_utf8(out).unwrap().contains('\x1b'));
    }
}
