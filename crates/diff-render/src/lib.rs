// Inline diff rendering
// Aligns two texts line by line, highlights changed characters inside
// replaced lines, and lays the result out for terminals, HTML and logs.

mod aligner;
mod backend;
mod display;
mod error;
mod format;
mod highlight;
mod inline_diff;
mod lines;
mod logger;
mod options;
mod reconcile;
mod style;
mod styled_text;
mod theme;

pub use aligner::{align, align_chars, Opcode};
pub use backend::{render, render_to_string, AnsiBackend, ColorBackend, HtmlBackend, PlainBackend};
pub use display::{DisplayTarget, EvcxrDisplay, NoRichDisplay, RichDisplay};
pub use error::{DiffError, Result};
pub use format::{GutterWidths, RenderedDiff, RowFormatter, SEPARATOR};
pub use highlight::{highlight, HighlightMode};
pub use inline_diff::InlineDiff;
pub use lines::split_lines;
pub use logger::DiffLogger;
pub use options::{terminal_width, RenderOptions, EXPORT_WIDTH, FALLBACK_WIDTH};
pub use reconcile::{LineReconciler, Row, Sign};
pub use similar::{Algorithm, DiffTag};
pub use style::{Attributes, Color, Style};
pub use styled_text::{StyleSpan, StyledRun, StyledText};
pub use theme::{Theme, ThemeSpec};
