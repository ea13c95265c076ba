/// A contiguous span of classified source lines.
///
/// Line numbers are zero-based and inclusive, counted in the source text
/// after the language's removal pattern has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The lines of the block, each followed by a newline.
    pub text: String,
    pub file: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// One classified run produced by the segmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    /// A single line matching the heading pattern.
    Heading {
        /// Nesting level, zero for a single marker.
        level: usize,
        /// Text following the heading markers, whitespace collapsed.
        text: String,
        file: String,
        line: usize,
    },
    /// Consecutive lines matching the comment pattern.
    Comment(Block),
    /// Consecutive lines matching neither pattern.
    Code(Block),
}

impl Run {
    pub fn file(&self) -> &str {
        match self {
            Run::Heading { file, .. } => file,
            Run::Comment(block) | Run::Code(block) => &block.file,
        }
    }

    pub fn start_line(&self) -> usize {
        match self {
            Run::Heading { line, .. } => *line,
            Run::Comment(block) | Run::Code(block) => block.start_line,
        }
    }

    pub fn end_line(&self) -> usize {
        match self {
            Run::Heading { line, .. } => *line,
            Run::Comment(block) | Run::Code(block) => block.end_line,
        }
    }
}
