use derive_more::Display;
use similar::{Algorithm, DiffTag};

use crate::aligner::align_chars;
use crate::error::Result;
use crate::style::Style;
use crate::styled_text::StyledText;

/// Which side of a replaced line pair is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HighlightMode {
    /// Render the old line, marking characters that were removed
    #[display(fmt = "del")]
    Delete,

    /// Render the new line, marking characters that were added
    #[display(fmt = "add")]
    Insert,
}

/// Highlight the changed characters of one side of a line pair.
///
/// The rendered line (`old` in [`HighlightMode::Delete`], `new` in
/// [`HighlightMode::Insert`]) gets `base` everywhere and `change` layered
/// over every character range the character-level alignment marks as
/// removed or added. The characters themselves are returned unchanged.
pub fn highlight(
    old: &str,
    new: &str,
    base: Style,
    change: Style,
    mode: HighlightMode,
    algorithm: Algorithm,
) -> Result<StyledText> {
    let opcodes = align_chars(old, new, algorithm)?;

    let text = match mode {
        HighlightMode::Delete => {
            let mut text = StyledText::new(old, base);
            for op in &opcodes {
                if matches!(op.tag, DiffTag::Replace | DiffTag::Delete) && !op.old.is_empty() {
                    text.stylize(change, op.old.clone());
                }
            }
            text
        }
        HighlightMode::Insert => {
            let mut text = StyledText::new(new, base);
            for op in &opcodes {
                if matches!(op.tag, DiffTag::Replace | DiffTag::Insert) && !op.new.is_empty() {
                    text.stylize(change, op.new.clone());
                }
            }
            text
        }
    };

    Ok(text)
}
