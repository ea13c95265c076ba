use crate::languages::LanguageRuleSet;

/// Classification of a single line, before any grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Whitespace only.
    Blank,
    Heading { level: usize, text: String },
    Comment,
    Code,
}

/// Classifies individual lines against a language's rules.
///
/// Headings take priority over comments, so a line matching both patterns is
/// always a heading.
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'r> {
    rules: &'r LanguageRuleSet,
}

impl<'r> LineClassifier<'r> {
    pub fn new(rules: &'r LanguageRuleSet) -> Self {
        Self { rules }
    }

    pub fn classify(&self, line: &str) -> LineClass {
        if line.trim().is_empty() {
            return LineClass::Blank;
        }

        if let Some(heading) = self.rules.match_heading(line) {
            return LineClass::Heading {
                level: heading.level,
                text: heading.text,
            };
        }

        if self.rules.is_comment(line) {
            LineClass::Comment
        } else {
            LineClass::Code
        }
    }

    /// Whether `line` continues an open comment block. A heading always
    /// closes the block, even when it also matches the comment pattern.
    pub fn continues_comment(&self, line: &str) -> bool {
        self.rules.is_comment(line) && !self.rules.is_heading(line)
    }

    /// Whether `line` closes an open code block.
    pub fn ends_code(&self, line: &str) -> bool {
        self.rules.is_comment(line) || self.rules.is_heading(line)
    }
}
