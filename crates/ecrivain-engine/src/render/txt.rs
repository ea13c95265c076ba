use std::path::Path;

use super::{Document, Renderer};
use crate::text::{collapse_whitespace, expand_tabs};

/// Width of the rule closing each code listing.
pub const RULE_WIDTH: usize = 57;

/// Renders runs as a plain-text transcript.
#[derive(Debug, Clone, Default)]
pub struct TxtRenderer {
    document: Document,
}

impl TxtRenderer {
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            document: Document::new(title, author),
        }
    }
}

impl Renderer for TxtRenderer {
    fn reset(&mut self) {
        self.document.reset();
    }

    fn beginning(&mut self) {}

    fn ending(&mut self) {}

    fn add_heading(&mut self, _level: usize, heading: &str, _file: &str, _line: usize) {
        self.document
            .push_str(&format!("++ {}\n", collapse_whitespace(heading)));
    }

    fn add_comment(&mut self, comment: &str, _file: &str, _start_line: usize, _end_line: usize) {
        self.document.push_str(comment);
    }

    fn add_code(&mut self, code: &str, file: &str, start_line: usize, _end_line: usize) {
        let code = expand_tabs(code.trim_end());
        let base = Path::new(file)
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| file.into());

        self.document.push_str(&format!(
            "\n== {base} ({file}:{start_line}) ================\n{code}\n"
        ));
        self.document.push_str(&"=".repeat(RULE_WIDTH));
        self.document.push_str("\n\n");
    }

    fn buffer(&self) -> &str {
        self.document.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_collapses_whitespace() {
        let mut txt = TxtRenderer::new("", "");
        txt.add_heading(3, "  A   spaced\theading ", "a.c", 0);

        assert_eq!(txt.buffer(), "++ A spaced heading\n");
    }

    #[test]
    fn test_comment_is_verbatim() {
        let mut txt = TxtRenderer::new("", "");
        txt.add_comment("// 100% {raw} $text$\n", "a.c", 0, 0);

        assert_eq!(txt.buffer(), "// 100% {raw} $text$\n");
    }

    #[test]
    fn test_code_banner_names_file_and_line() {
        let mut txt = TxtRenderer::new("", "");
        txt.add_code("int main() {\n\treturn 0;\n}\n\n", "src/main.c", 12, 14);

        assert_eq!(
            txt.buffer(),
            "\n== main.c (src/main.c:12) ================\n\
             int main() {\n   return 0;\n}\n\
             =========================================================\n\n"
        );
    }

    #[test]
    fn test_beginning_and_ending_emit_nothing() {
        let mut txt = TxtRenderer::new("Title", "Author");
        txt.beginning();
        txt.ending();

        assert_eq!(txt.buffer(), "");
    }
}
