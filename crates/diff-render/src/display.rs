//! Display target detection and rich (HTML) display.
//!
//! Environment sensing happens here and nowhere else; the render functions
//! only ever see an explicit [`DisplayTarget`] and
//! [`RenderOptions`](crate::RenderOptions).

use std::env;
use std::io::{self, IsTerminal, Write};

use log::debug;

use crate::error::{DiffError, Result};

/// Environment variable the evcxr Jupyter kernel sets in its child process
const EVCXR_RUNTIME_VAR: &str = "EVCXR_IS_RUNTIME";

/// Where auto-display output ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTarget {
    /// An interactive terminal: styled rows padded to the terminal width
    Terminal,

    /// A notebook-style frontend that can show HTML
    RichEmbedded,

    /// Anything else (pipes, files, CI logs): plain text
    PlainFallback,
}

impl DisplayTarget {
    /// Probe the current process once
    pub fn detect() -> Self {
        let target = if io::stdout().is_terminal() {
            Self::Terminal
        } else if evcxr_available() {
            Self::RichEmbedded
        } else {
            Self::PlainFallback
        };
        debug!("detected display target {target:?}");
        target
    }
}

fn evcxr_available() -> bool {
    env::var_os(EVCXR_RUNTIME_VAR).is_some()
}

/// A frontend able to show an HTML fragment
pub trait RichDisplay {
    /// Show `html`, or fail with [`DiffError::DisplayBackendUnavailable`]
    /// when this frontend cannot display rich content
    fn display_html(&mut self, html: &str) -> Result<()>;
}

/// Rich display through the evcxr Jupyter kernel's content protocol
#[derive(Debug)]
pub struct EvcxrDisplay<W> {
    out: W,
    available: bool,
}

impl EvcxrDisplay<io::Stdout> {
    /// Display on stdout when running inside evcxr
    pub fn stdout() -> Self {
        Self::new(io::stdout(), evcxr_available())
    }
}

impl<W: Write> EvcxrDisplay<W> {
    /// Display through `out`; `available` states whether the kernel is
    /// actually listening on the other end
    pub fn new(out: W, available: bool) -> Self {
        Self { out, available }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RichDisplay for EvcxrDisplay<W> {
    fn display_html(&mut self, html: &str) -> Result<()> {
        if !self.available {
            return Err(DiffError::DisplayBackendUnavailable { backend: "evcxr" });
        }
        writeln!(self.out, "EVCXR_BEGIN_CONTENT text/html")?;
        writeln!(self.out, "{html}")?;
        writeln!(self.out, "EVCXR_END_CONTENT")?;
        self.out.flush()?;
        Ok(())
    }
}

/// A display with no rich capability at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRichDisplay;

impl RichDisplay for NoRichDisplay {
    fn display_html(&mut self, _html: &str) -> Result<()> {
        Err(DiffError::DisplayBackendUnavailable { backend: "none" })
    }
}
