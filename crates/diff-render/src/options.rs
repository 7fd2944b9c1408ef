use std::io::{self, IsTerminal};

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width assumed when the terminal size cannot be queried
pub const FALLBACK_WIDTH: usize = 80;

/// Width used by the string exporters (`to_ansi`, `to_plain`, `to_html`)
pub const EXPORT_WIDTH: usize = 120;

/// Per-call layout options.
///
/// Unset fields are resolved against the environment at render time: the
/// width defaults to the terminal width and padding defaults to whether
/// stdout is a terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Target column width for the full-bleed fill
    pub width: Option<usize>,

    /// Whether rows are padded with their background up to `width`
    pub pad_to_width: Option<bool>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with every field already decided, touching no environment
    pub fn fixed(width: usize, pad_to_width: bool) -> Self {
        Self {
            width: Some(width),
            pad_to_width: Some(pad_to_width),
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn pad_to_width(mut self, pad_to_width: bool) -> Self {
        self.pad_to_width = Some(pad_to_width);
        self
    }

    /// The width to render at
    pub fn resolved_width(&self) -> usize {
        self.width.unwrap_or_else(terminal_width)
    }

    /// Whether to pad rows
    pub fn resolved_pad_to_width(&self) -> bool {
        self.pad_to_width
            .unwrap_or_else(|| io::stdout().is_terminal())
    }

    /// The width rows are padded to, if padding is enabled
    pub fn target_width(&self) -> Option<usize> {
        self.resolved_pad_to_width()
            .then(|| self.resolved_width())
    }
}

/// Current terminal width, or [`FALLBACK_WIDTH`] when there is none
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _)) if columns > 0 => usize::from(columns),
        Ok(_) => FALLBACK_WIDTH,
        Err(err) => {
            debug!("terminal size unavailable ({err}), using {FALLBACK_WIDTH} columns");
            FALLBACK_WIDTH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_options_ignore_environment() {
        let options = RenderOptions::fixed(42, true);
        assert_eq!(options.resolved_width(), 42);
        assert!(options.resolved_pad_to_width());
        assert_eq!(options.target_width(), Some(42));

        assert_eq!(RenderOptions::fixed(42, false).target_width(), None);
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new().width(100).pad_to_width(false);
        assert_eq!(options, RenderOptions::fixed(100, false));
    }

    #[test]
    fn test_terminal_width_is_never_zero() {
        assert!(terminal_width() > 0);
    }
}
