//! # Rendering
//!
//! The [`Renderer`] trait is the contract between the [`Book`](crate::Book)
//! and an output format. Each implementation accumulates text into a
//! [`Document`] buffer; only [`Renderer::write`] can fail.
//!
//! - **`tex`**: LaTeX document with sectioning commands and framed listings
//! - **`txt`**: plain-text transcript with banner-delimited listings
//! - **`escape`**: LaTeX escaping used by the typeset renderer

pub mod escape;
pub mod tex;
pub mod txt;

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::EngineError;

pub use tex::{Style, TexRenderer};
pub use txt::TxtRenderer;

/// Output format capability set.
pub trait Renderer {
    /// Clears the accumulated buffer.
    fn reset(&mut self);
    /// Emits the document prologue.
    fn beginning(&mut self);
    /// Emits the document epilogue.
    fn ending(&mut self);
    fn add_heading(&mut self, level: usize, heading: &str, file: &str, line: usize);
    fn add_comment(&mut self, comment: &str, file: &str, start_line: usize, end_line: usize);
    fn add_code(&mut self, code: &str, file: &str, start_line: usize, end_line: usize);
    /// The text accumulated so far.
    fn buffer(&self) -> &str;

    /// Writes the whole buffer to `w`. The buffer is left untouched, so a
    /// failed write can be retried.
    fn write(&self, w: &mut dyn Write) -> io::Result<usize> {
        let bytes = self.buffer().as_bytes();
        w.write_all(bytes)?;
        w.flush()?;
        Ok(bytes.len())
    }
}

/// Title, author and output buffer shared by every renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub author: String,
    buffer: String,
}

impl Document {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            buffer: String::new(),
        }
    }

    pub fn push_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

/// Options for building a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub title: String,
    pub author: String,
    pub style: Style,
    pub include_toc: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            style: Style::Article,
            include_toc: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tex,
    Txt,
}

impl OutputFormat {
    /// Infers the format from an output file's extension.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        ext.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Tex => "tex",
            OutputFormat::Txt => "txt",
        }
    }

    pub fn renderer(&self, options: &RenderOptions) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Tex => Box::new(TexRenderer::new(
                &options.title,
                &options.author,
                options.style,
                options.include_toc,
            )),
            OutputFormat::Txt => Box::new(TxtRenderer::new(&options.title, &options.author)),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "tex" => Ok(OutputFormat::Tex),
            "txt" => Ok(OutputFormat::Txt),
            _ => Err(EngineError::UnsupportedOutputType(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
