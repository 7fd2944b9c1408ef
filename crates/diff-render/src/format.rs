use crate::reconcile::{Row, Sign};
use crate::style::Style;
use crate::styled_text::StyledText;
use crate::theme::Theme;

/// Glyph drawn between the gutter and the line content
pub const SEPARATOR: char = '│';

/// Narrowest a line-number column is ever rendered
const MIN_GUTTER_WIDTH: usize = 2;

/// Widths of the old and new line-number columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterWidths {
    pub left: usize,
    pub right: usize,
}

impl GutterWidths {
    /// Widths wide enough for every line number of texts with the given
    /// line counts, and never narrower than two columns
    pub fn for_line_counts(old_lines: usize, new_lines: usize) -> Self {
        Self {
            left: gutter_width(old_lines),
            right: gutter_width(new_lines),
        }
    }

    /// Characters taken by the gutters, sign and separator
    pub fn prefix_len(&self) -> usize {
        // "{left} {right} {sign} {sep} "
        self.left + 1 + self.right + 1 + 2 + 2
    }
}

fn gutter_width(line_count: usize) -> usize {
    let digits = line_count.max(1).to_string().len();
    digits.max(MIN_GUTTER_WIDTH)
}

/// The formatted rows of a diff, ready for an output backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDiff {
    rows: Vec<StyledText>,
}

impl RenderedDiff {
    pub fn rows(&self) -> &[StyledText] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyledText> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<StyledText> {
        self.rows
    }
}

impl FromIterator<StyledText> for RenderedDiff {
    fn from_iter<I: IntoIterator<Item = StyledText>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RenderedDiff {
    type Item = &'a StyledText;
    type IntoIter = std::slice::Iter<'a, StyledText>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Lays rows out behind line-number gutters, a sign column and a separator
#[derive(Debug, Clone)]
pub struct RowFormatter<'a> {
    theme: &'a Theme,
    widths: GutterWidths,
    target_width: Option<usize>,
}

impl<'a> RowFormatter<'a> {
    pub fn new(theme: &'a Theme, widths: GutterWidths) -> Self {
        Self {
            theme,
            widths,
            target_width: None,
        }
    }

    /// Pad rows with their background style up to this many characters
    pub fn target_width(mut self, target_width: Option<usize>) -> Self {
        self.target_width = target_width;
        self
    }

    /// Format a single row
    pub fn format_row(&self, row: &Row) -> StyledText {
        let theme = self.theme;
        let number = |n: Option<usize>| n.map(|n| n.to_string()).unwrap_or_default();

        let mut prefix = StyledText::default();
        prefix.append(
            &format!("{:>width$} ", number(row.left()), width = self.widths.left),
            theme.gutter,
        );
        prefix.append(
            &format!("{:>width$} ", number(row.right()), width = self.widths.right),
            theme.gutter,
        );

        let sign_style = match row.sign() {
            Sign::Unchanged => theme.gutter,
            Sign::Delete | Sign::Insert => Style::new().bold(),
        };
        prefix.append(&format!("{} ", row.sign()), sign_style);
        prefix.append(&format!("{SEPARATOR} "), theme.sep);

        let mut content = row.content().clone();
        if let Some(width) = self.target_width {
            let available = width.saturating_sub(prefix.len());
            if content.len() < available {
                let fill = " ".repeat(available - content.len());
                content.append(&fill, theme.fill_style(row.sign()));
            }
        }

        StyledText::assemble([prefix, content])
    }

    /// Format every row, in order
    pub fn format_rows(&self, rows: &[Row]) -> RenderedDiff {
        rows.iter().map(|row| self.format_row(row)).collect()
    }
}
