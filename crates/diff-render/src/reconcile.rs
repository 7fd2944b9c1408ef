use derive_more::Display;
use log::{debug, trace};
use similar::{Algorithm, DiffTag};

use crate::aligner::align;
use crate::error::Result;
use crate::highlight::{highlight, HighlightMode};
use crate::styled_text::StyledText;
use crate::theme::Theme;

/// The change marker shown in a row's sign column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Sign {
    /// The line is present on both sides
    #[display(fmt = " ")]
    Unchanged,

    /// The line only exists in the old text
    #[display(fmt = "-")]
    Delete,

    /// The line only exists in the new text
    #[display(fmt = "+")]
    Insert,
}

impl Sign {
    pub fn as_char(self) -> char {
        match self {
            Self::Unchanged => ' ',
            Self::Delete => '-',
            Self::Insert => '+',
        }
    }
}

/// One output line of a reconciled diff
///
/// Line numbers are 1-based. Unchanged rows carry both numbers, deleted
/// rows only the old one and inserted rows only the new one; the
/// constructors are the only way to build a row, so this always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    left: Option<usize>,
    right: Option<usize>,
    sign: Sign,
    content: StyledText,
}

impl Row {
    /// A line present on both sides
    pub fn unchanged(left: usize, right: usize, content: StyledText) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            sign: Sign::Unchanged,
            content,
        }
    }

    /// A line only present in the old text
    pub fn deleted(left: usize, content: StyledText) -> Self {
        Self {
            left: Some(left),
            right: None,
            sign: Sign::Delete,
            content,
        }
    }

    /// A line only present in the new text
    pub fn inserted(right: usize, content: StyledText) -> Self {
        Self {
            left: None,
            right: Some(right),
            sign: Sign::Insert,
            content,
        }
    }

    /// Old line number
    pub fn left(&self) -> Option<usize> {
        self.left
    }

    /// New line number
    pub fn right(&self) -> Option<usize> {
        self.right
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn content(&self) -> &StyledText {
        &self.content
    }
}

/// Turns two sequences of lines into diff rows
#[derive(Debug, Clone)]
pub struct LineReconciler<'a> {
    theme: &'a Theme,
    show_unchanged: bool,
    algorithm: Algorithm,
}

impl<'a> LineReconciler<'a> {
    /// Create a reconciler that shows unchanged lines and aligns with Myers
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            show_unchanged: true,
            algorithm: Algorithm::Myers,
        }
    }

    /// Whether runs of equal lines produce rows
    pub fn show_unchanged(mut self, show_unchanged: bool) -> Self {
        self.show_unchanged = show_unchanged;
        self
    }

    /// Alignment algorithm for both line and character granularity
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Align `old_lines` with `new_lines` and emit one row per shown line
    pub fn reconcile(&self, old_lines: &[&str], new_lines: &[&str]) -> Result<Vec<Row>> {
        let opcodes = align(old_lines, new_lines, self.algorithm)?;
        let theme = self.theme;
        let mut rows = Vec::with_capacity(old_lines.len().max(new_lines.len()));

        for op in &opcodes {
            trace!("{:?} old {:?} new {:?}", op.tag, op.old, op.new);

            match op.tag {
                DiffTag::Equal => {
                    if !self.show_unchanged {
                        continue;
                    }
                    for (old_idx, new_idx) in op.old.clone().zip(op.new.clone()) {
                        let content = StyledText::new(old_lines[old_idx], theme.equal);
                        rows.push(Row::unchanged(old_idx + 1, new_idx + 1, content));
                    }
                }
                DiffTag::Delete => {
                    for old_idx in op.old.clone() {
                        let content = StyledText::new(old_lines[old_idx], theme.del_line);
                        rows.push(Row::deleted(old_idx + 1, content));
                    }
                }
                DiffTag::Insert => {
                    for new_idx in op.new.clone() {
                        let content = StyledText::new(new_lines[new_idx], theme.add_line);
                        rows.push(Row::inserted(new_idx + 1, content));
                    }
                }
                DiffTag::Replace => {
                    let old_chunk = &old_lines[op.old.clone()];
                    let new_chunk = &new_lines[op.new.clone()];
                    self.pair_replaced(old_chunk, op.old.start, new_chunk, op.new.start, &mut rows)?;
                }
            }
        }

        debug!(
            "reconciled {} old and {} new lines into {} rows",
            old_lines.len(),
            new_lines.len(),
            rows.len()
        );
        Ok(rows)
    }

    /// Pair the lines of a replaced block by position, deletion first
    fn pair_replaced(
        &self,
        old_chunk: &[&str],
        old_start: usize,
        new_chunk: &[&str],
        new_start: usize,
        rows: &mut Vec<Row>,
    ) -> Result<()> {
        let theme = self.theme;

        for k in 0..old_chunk.len().max(new_chunk.len()) {
            let old_line = old_chunk.get(k).copied();
            let new_line = new_chunk.get(k).copied();

            if let Some(old_line) = old_line {
                let content = highlight(
                    old_line,
                    new_line.unwrap_or(""),
                    theme.del_line,
                    theme.del_inline,
                    HighlightMode::Delete,
                    self.algorithm,
                )?;
                rows.push(Row::deleted(old_start + k + 1, content));
            }

            if let Some(new_line) = new_line {
                let content = highlight(
                    old_line.unwrap_or(""),
                    new_line,
                    theme.add_line,
                    theme.add_inline,
                    HighlightMode::Insert,
                    self.algorithm,
                )?;
                rows.push(Row::inserted(new_start + k + 1, content));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(rows: &[Row]) -> Vec<(Option<usize>, Option<usize>, char, String)> {
        rows.iter()
            .map(|r| (r.left(), r.right(), r.sign().as_char(), r.content().as_str().to_string()))
            .collect()
    }

    #[test]
    fn test_single_replaced_line() {
        let theme = Theme::default();
        let rows = LineReconciler::new(&theme)
            .reconcile(&["a", "b", "c"], &["a", "x", "c"])
            .unwrap();

        assert_eq!(
            summary(&rows),
            vec![
                (Some(1), Some(1), ' ', "a".to_string()),
                (Some(2), None, '-', "b".to_string()),
                (None, Some(2), '+', "x".to_string()),
                (Some(3), Some(3), ' ', "c".to_string()),
            ]
        );
        assert_eq!(rows[0].content().base_style(), theme.equal);
        assert!(rows[0].content().spans().is_empty());
    }

    #[test]
    fn test_hidden_unchanged_lines() {
        let theme = Theme::default();
        let rows = LineReconciler::new(&theme)
            .show_unchanged(false)
            .reconcile(&["a", "b", "c"], &["a", "x", "c"])
            .unwrap();

        assert_eq!(
            summary(&rows),
            vec![
                (Some(2), None, '-', "b".to_string()),
                (None, Some(2), '+', "x".to_string()),
            ]
        );
    }

    #[test]
    fn test_pure_deletion_and_insertion_are_not_highlighted() {
        let theme = Theme::default();
        let rows = LineReconciler::new(&theme)
            .reconcile(&["a", "gone", "b"], &["a", "b", "new"])
            .unwrap();

        assert_eq!(
            summary(&rows),
            vec![
                (Some(1), Some(1), ' ', "a".to_string()),
                (Some(2), None, '-', "gone".to_string()),
                (Some(3), Some(2), ' ', "b".to_string()),
                (None, Some(3), '+', "new".to_string()),
            ]
        );
        assert_eq!(rows[1].content().base_style(), theme.del_line);
        assert!(rows[1].content().spans().is_empty());
        assert_eq!(rows[3].content().base_style(), theme.add_line);
        assert!(rows[3].content().spans().is_empty());
    }

    #[test]
    fn test_uneven_replace_block_pairs_by_position() {
        let theme = Theme::default();
        let rows = LineReconciler::new(&theme)
            .reconcile(&["one", "two"], &["uno", "dos", "tres"])
            .unwrap();

        assert_eq!(
            summary(&rows),
            vec![
                (Some(1), None, '-', "one".to_string()),
                (None, Some(1), '+', "uno".to_string()),
                (Some(2), None, '-', "two".to_string()),
                (None, Some(2), '+', "dos".to_string()),
                (None, Some(3), '+', "tres".to_string()),
            ]
        );

        // "tres" has no counterpart, so every character is highlighted
        let tres = rows[4].content();
        assert!(tres
            .spans()
            .iter()
            .any(|s| s.range == (0..4) && s.style == theme.add_inline));
    }

    #[test]
    fn test_empty_inputs() {
        let theme = Theme::default();
        for show in [true, false] {
            let rows = LineReconciler::new(&theme)
                .show_unchanged(show)
                .reconcile(&[], &[])
                .unwrap();
            assert!(rows.is_empty());
        }
    }

    #[test]
    fn test_sign_display() {
        assert_eq!(Sign::Unchanged.to_string(), " ");
        assert_eq!(Sign::Delete.to_string(), "-");
        assert_eq!(Sign::Insert.to_string(), "+");
    }
}
