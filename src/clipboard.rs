//! Clipboard support
//!
//! Copying goes through the [`Clipboard`] trait so the session can run against
//! the system clipboard or an in-process buffer.

use std::fmt;
use std::str::FromStr;

use tracing::{error, info};

use crate::error::{Error, Result};
use crate::render::{RenderedOutput, NO_MATCH_PLACEHOLDER};

/// Something text can be copied into
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The operating system clipboard, via arboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

/// Keeps the last copied text in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Which part of the output to copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CopyTarget {
    /// Japanese display lines, one per line
    Display,
    /// YYYYMMDD tokens, one per line
    Tokens,
    /// YYYYMMDD tokens joined with commas
    Combined,
}

impl CopyTarget {
    /// Text to copy for this target
    pub fn text(&self, output: &RenderedOutput) -> String {
        match self {
            CopyTarget::Display => output.display_text(),
            CopyTarget::Tokens => output.token_text(),
            CopyTarget::Combined => output.combined.clone(),
        }
    }

    /// Notification shown after a successful copy
    pub fn success_message(&self) -> &'static str {
        match self {
            CopyTarget::Display => "日本語表記のリストをコピーしました！",
            CopyTarget::Tokens => "YYYYMMDD形式のリストをコピーしました！",
            CopyTarget::Combined => "クリップボードにコピーしました！",
        }
    }
}

impl fmt::Display for CopyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CopyTarget::Display => "display",
            CopyTarget::Tokens => "tokens",
            CopyTarget::Combined => "combined",
        })
    }
}

impl FromStr for CopyTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "display" => Ok(CopyTarget::Display),
            "tokens" | "yyyymmdd" => Ok(CopyTarget::Tokens),
            "combined" => Ok(CopyTarget::Combined),
            other => Err(Error::InvalidCopyTarget(other.to_string())),
        }
    }
}

/// Copy `text`, returning the notification to show
///
/// Refuses blank text and the no-match placeholder. A backend failure is logged
/// and returned; nothing else changes.
pub fn copy_text(clipboard: &mut dyn Clipboard, text: &str, target: CopyTarget) -> Result<&'static str> {
    if text.trim().is_empty() || text.contains(NO_MATCH_PLACEHOLDER) {
        return Err(Error::NothingToCopy);
    }

    match clipboard.set_text(text) {
        Ok(()) => {
            info!(copy_target = %target, bytes = text.len(), "copied to clipboard");
            Ok(target.success_message())
        }
        Err(err) => {
            error!(copy_target = %target, error = %err, "clipboard write failed");
            Err(err)
        }
    }
}

/// Copy one part of a rendered output
pub fn copy_output(clipboard: &mut dyn Clipboard, output: &RenderedOutput, target: CopyTarget) -> Result<&'static str> {
    copy_text(clipboard, &target.text(output), target)
}
