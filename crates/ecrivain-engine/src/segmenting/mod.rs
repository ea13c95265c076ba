//! # Segmentation
//!
//! Splits a source file into headings, comment blocks and code blocks using
//! a language's line patterns.
//!
//! ## Phases
//!
//! 1. **Removal**: matches of the language's removal pattern are deleted from
//!    the whole text before it is split into lines
//! 2. **Line Classification** (`classify`): each line is classified on its own
//!    as blank, heading, comment or code
//! 3. **Grouping** (`runs`): `Runs` walks the lines with a cursor and groups
//!    consecutive comment lines, or consecutive code lines, into blocks
//!
//! ## Key Invariants
//!
//! - Headings are checked before comments
//! - A comment block ends at the first line that is not a comment
//! - A code block ends before the next comment or heading line; blank lines
//!   inside it are kept, trailing ones are skipped
//! - Line numbers are zero-based and refer to the post-removal text

pub mod classify;
pub mod runs;
pub mod types;

pub use classify::{LineClass, LineClassifier};
pub use runs::Runs;
pub use types::{Block, Run};

use crate::languages::LanguageRuleSet;

/// Segments files with one language's rules.
#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'r> {
    rules: &'r LanguageRuleSet,
}

impl<'r> Segmenter<'r> {
    pub fn new(rules: &'r LanguageRuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'r LanguageRuleSet {
        self.rules
    }

    pub fn segment(&self, content: &str, file: &str) -> Runs<'r> {
        let text = self.rules.remove_from(content).into_owned();
        Runs::new(LineClassifier::new(self.rules), text, file)
    }
}

/// Convenience: segment `content` without keeping a [`Segmenter`] around.
pub fn segment<'r>(content: &str, rules: &'r LanguageRuleSet, file: &str) -> Runs<'r> {
    Segmenter::new(rules).segment(content, file)
}
