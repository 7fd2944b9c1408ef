use std::ops::Range;

use crate::style::Style;

/// A style applied on top of a character range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    /// Character range (not bytes) the style covers
    pub range: Range<usize>,

    /// The style layered over that range
    pub style: Style,
}

/// A maximal run of characters sharing one effective style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRun<'a> {
    pub text: &'a str,
    pub style: Style,
}

/// A string with a base style and ordered per-range style overrides.
///
/// Restyling and concatenation only change how characters are styled,
/// never the characters themselves. Overrides added later win where they
/// overlap earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    char_len: usize,
    base: Style,
    spans: Vec<StyleSpan>,
}

impl StyledText {
    /// Create styled text with a single base style
    pub fn new(text: impl Into<String>, base: Style) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self {
            text,
            char_len,
            base,
            spans: Vec::new(),
        }
    }

    /// Create unstyled text
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::new())
    }

    /// Concatenate parts, keeping each part's own styling
    pub fn assemble(parts: impl IntoIterator<Item = StyledText>) -> Self {
        let mut out = Self::default();
        for part in parts {
            out.append_text(&part);
        }
        out
    }

    /// The characters, without styling
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    pub fn base_style(&self) -> Style {
        self.base
    }

    /// Style overrides in the order they were applied
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Override the style of a character range.
    ///
    /// The range is clamped to the text; an empty range is ignored.
    pub fn stylize(&mut self, style: Style, range: Range<usize>) {
        let end = range.end.min(self.char_len);
        if range.start >= end {
            return;
        }
        self.spans.push(StyleSpan {
            range: range.start..end,
            style,
        });
    }

    /// Append a string, styled with `style` on top of the base style
    pub fn append(&mut self, text: &str, style: Style) {
        let start = self.char_len;
        self.text.push_str(text);
        self.char_len += text.chars().count();
        if !style.is_plain() {
            self.stylize(style, start..self.char_len);
        }
    }

    /// Append another styled text, preserving its base style and overrides
    pub fn append_text(&mut self, other: &StyledText) {
        let offset = self.char_len;
        self.text.push_str(&other.text);
        self.char_len += other.char_len;

        if !other.base.is_plain() {
            self.stylize(other.base, offset..offset + other.char_len);
        }
        self.spans.extend(other.spans.iter().map(|span| StyleSpan {
            range: span.range.start + offset..span.range.end + offset,
            style: span.style,
        }));
    }

    /// Effective style of the character at `index`
    pub fn style_at(&self, index: usize) -> Style {
        self.spans
            .iter()
            .filter(|span| span.range.contains(&index))
            .fold(self.base, |style, span| style.layer(span.style))
    }

    /// Split into maximal runs of characters sharing one effective style
    pub fn runs(&self) -> Vec<StyledRun<'_>> {
        if self.text.is_empty() {
            return Vec::new();
        }

        let mut bounds: Vec<usize> = Vec::with_capacity(self.spans.len() * 2 + 2);
        bounds.push(0);
        bounds.push(self.char_len);
        for span in &self.spans {
            bounds.push(span.range.start);
            bounds.push(span.range.end);
        }
        bounds.sort_unstable();
        bounds.dedup();

        let byte_offsets = self.byte_offsets();
        let mut runs: Vec<StyledRun<'_>> = Vec::new();
        let mut run_start = 0;
        let mut run_style = self.style_at(0);

        // The last bound is the end of the text and starts no segment
        for &start in &bounds[1..bounds.len() - 1] {
            let style = self.style_at(start);
            if style != run_style {
                runs.push(StyledRun {
                    text: &self.text[byte_offsets[run_start]..byte_offsets[start]],
                    style: run_style,
                });
                run_start = start;
                run_style = style;
            }
        }
        runs.push(StyledRun {
            text: &self.text[byte_offsets[run_start]..],
            style: run_style,
        });

        runs
    }

    /// Byte offset of every character plus the end of the string
    fn byte_offsets(&self) -> Vec<usize> {
        self.text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(std::iter::once(self.text.len()))
            .collect()
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use pretty_assertions::assert_eq;

    fn red() -> Style {
        Style::new().fg(Color::Standard(1))
    }

    fn on_blue() -> Style {
        Style::new().on(Color::Standard(4))
    }

    #[test]
    fn test_single_run_with_base_style() {
        let text = StyledText::new("hello", red());
        assert_eq!(
            text.runs(),
            vec![StyledRun {
                text: "hello",
                style: red()
            }]
        );
    }

    #[test]
    fn test_stylize_splits_runs() {
        let mut text = StyledText::new("hello world", red());
        text.stylize(on_blue(), 6..11);

        let runs = text.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "hello ");
        assert_eq!(runs[0].style, red());
        assert_eq!(runs[1].text, "world");
        assert_eq!(runs[1].style, red().layer(on_blue()));
        assert_eq!(text.as_str(), "hello world");
    }

    #[test]
    fn test_later_overrides_win() {
        let mut text = StyledText::plain("abcdef");
        text.stylize(red(), 0..4);
        text.stylize(Style::new().fg(Color::Standard(2)), 2..6);

        assert_eq!(text.style_at(1).fg, Some(Color::Standard(1)));
        assert_eq!(text.style_at(3).fg, Some(Color::Standard(2)));
        assert_eq!(text.style_at(5).fg, Some(Color::Standard(2)));
    }

    #[test]
    fn test_stylize_clamps_and_ignores_empty_ranges() {
        let mut text = StyledText::plain("abc");
        text.stylize(red(), 1..10);
        text.stylize(red(), 2..2);
        text.stylize(red(), 5..8);

        assert_eq!(
            text.spans(),
            &[StyleSpan {
                range: 1..3,
                style: red()
            }]
        );
    }

    #[test]
    fn test_assemble_keeps_each_parts_styling() {
        let mut first = StyledText::new("ab", red());
        first.stylize(on_blue(), 1..2);
        let second = StyledText::new("cd", on_blue());

        let joined = StyledText::assemble([first, second, StyledText::plain("e")]);
        assert_eq!(joined.as_str(), "abcde");
        assert_eq!(joined.len(), 5);
        assert_eq!(joined.style_at(0), red());
        assert_eq!(joined.style_at(1), red().layer(on_blue()));
        assert_eq!(joined.style_at(2), on_blue());
        assert_eq!(joined.style_at(4), Style::new());
    }

    #[test]
    fn test_multibyte_characters() {
        let mut text = StyledText::plain("héllo│");
        assert_eq!(text.len(), 6);
        text.stylize(red(), 1..2);
        text.stylize(on_blue(), 5..6);

        let runs: Vec<&str> = text.runs().iter().map(|r| r.text).collect();
        assert_eq!(runs, vec!["h", "é", "llo", "│"]);
    }

    #[test]
    fn test_append_with_plain_style_adds_no_span() {
        let mut text = StyledText::new("a", red());
        text.append("b", Style::new());
        assert!(text.spans().is_empty());
        assert_eq!(text.style_at(1), red());
    }

    #[test]
    fn test_empty_text_has_no_runs() {
        assert!(StyledText::default().runs().is_empty());
        assert!(StyledText::new("", red()).runs().is_empty());
    }
}
