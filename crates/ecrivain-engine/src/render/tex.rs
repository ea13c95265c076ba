use std::fmt;
use std::str::FromStr;

use super::{
    Document, Renderer,
    escape::{escape_tex, prettify_comment},
};
use crate::error::EngineError;
use crate::text::{collapse_whitespace, expand_tabs};

const VERBATIM_BEGIN: &str = "\\begin{Verbatim}[fontsize=\\small,frame=leftline,framerule=0.9mm,\
rulecolor=\\color{gray},framesep=5.1mm,xleftmargin=5mm,fontfamily=cmtt]\n";
const VERBATIM_END: &str = "\\end{Verbatim}";
/// Replacement for a literal `\end{Verbatim}` inside a listing.
const VERBATIM_END_NEUTRALIZED: &str = "\\\\_end{Verbatim}";

/// LaTeX document class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Article,
    Book,
}

impl Style {
    pub const ARTICLE_SECTIONING: &'static [&'static str] =
        &["section", "subsection", "subsubsection"];
    pub const BOOK_SECTIONING: &'static [&'static str] =
        &["chapter", "section", "subsection", "subsubsection"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Article => "article",
            Style::Book => "book",
        }
    }

    /// Sectioning commands from outermost to innermost.
    pub fn sectioning_commands(&self) -> &'static [&'static str] {
        match self {
            Style::Article => Self::ARTICLE_SECTIONING,
            Style::Book => Self::BOOK_SECTIONING,
        }
    }

    /// Command for a heading level; levels past the deepest command clamp to it.
    pub fn sectioning_command(&self, level: usize) -> &'static str {
        let commands = self.sectioning_commands();
        commands[level.min(commands.len() - 1)]
    }
}

impl FromStr for Style {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "article" => Ok(Style::Article),
            "book" => Ok(Style::Book),
            _ => Err(EngineError::UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders runs as a LaTeX document using `fancyvrb` listings.
#[derive(Debug, Clone)]
pub struct TexRenderer {
    document: Document,
    style: Style,
    include_toc: bool,
}

impl TexRenderer {
    pub fn new(title: &str, author: &str, style: Style, include_toc: bool) -> Self {
        Self {
            document: Document::new(title, author),
            style,
            include_toc,
        }
    }
}

impl Renderer for TexRenderer {
    fn reset(&mut self) {
        self.document.reset();
    }

    fn beginning(&mut self) {
        let mut preamble = format!(
            "\\documentclass[notitlepage,a4paper]{{{style}}}\n\
             \\usepackage{{fancyvrb,color,palatino}}\n\
             \\definecolor{{gray}}{{gray}}{{0.6}}\n\
             \\title{{{title}}}\n",
            style = self.style,
            title = escape_tex(&self.document.title),
        );
        if !self.document.author.is_empty() {
            preamble.push_str(&format!(
                "\\author{{{}}}\n",
                escape_tex(&self.document.author)
            ));
        }
        preamble.push_str("\\begin{document}\n\\maketitle\n");
        if self.include_toc {
            preamble.push_str("\\tableofcontents\n");
        }
        self.document.push_str(&preamble);
    }

    fn ending(&mut self) {
        self.document.push_str("\\end{document}\n");
    }

    fn add_heading(&mut self, level: usize, heading: &str, _file: &str, _line: usize) {
        let command = self.style.sectioning_command(level);
        let heading = escape_tex(&collapse_whitespace(heading));
        self.document.push_str(&format!("\\{command}{{{heading}}}\n"));
    }

    fn add_comment(&mut self, comment: &str, _file: &str, _start_line: usize, _end_line: usize) {
        self.document
            .push_str(&prettify_comment(&escape_tex(comment)));
    }

    fn add_code(&mut self, code: &str, _file: &str, _start_line: usize, _end_line: usize) {
        let code = code
            .trim_end()
            .replace(VERBATIM_END, VERBATIM_END_NEUTRALIZED);
        let code = expand_tabs(&code);

        self.document.push_str("\n");
        self.document.push_str(VERBATIM_BEGIN);
        self.document.push_str(&code);
        self.document.push_str("\n");
        self.document.push_str(VERBATIM_END);
        self.document.push_str("\n");
    }

    fn buffer(&self) -> &str {
        self.document.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const BEGIN: &str = "\\begin{Verbatim}[fontsize=\\small,frame=leftline,framerule=0.9mm,rulecolor=\\color{gray},framesep=5.1mm,xleftmargin=5mm,fontfamily=cmtt]\n";

    #[test]
    fn test_preamble_with_author_and_toc() {
        let mut tex = TexRenderer::new("My_Book", "A. Writer", Style::Book, true);
        tex.beginning();

        assert_eq!(
            tex.buffer(),
            "\\documentclass[notitlepage,a4paper]{book}\n\
             \\usepackage{fancyvrb,color,palatino}\n\
             \\definecolor{gray}{gray}{0.6}\n\
             \\title{My\\_Book}\n\
             \\author{A. Writer}\n\
             \\begin{document}\n\
             \\maketitle\n\
             \\tableofcontents\n"
        );
    }

    #[test]
    fn test_preamble_without_author_or_toc() {
        let mut tex = TexRenderer::new("Notes", "", Style::Article, false);
        tex.beginning();

        assert_eq!(
            tex.buffer(),
            "\\documentclass[notitlepage,a4paper]{article}\n\
             \\usepackage{fancyvrb,color,palatino}\n\
             \\definecolor{gray}{gray}{0.6}\n\
             \\title{Notes}\n\
             \\begin{document}\n\
             \\maketitle\n"
        );
    }

    #[rstest]
    #[case(Style::Article, 0, "section")]
    #[case(Style::Article, 2, "subsubsection")]
    #[case(Style::Article, 3, "subsubsection")]
    #[case(Style::Article, 42, "subsubsection")]
    #[case(Style::Book, 0, "chapter")]
    #[case(Style::Book, 3, "subsubsection")]
    #[case(Style::Book, 4, "subsubsection")]
    fn test_sectioning_command_clamps(
        #[case] style: Style,
        #[case] level: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(style.sectioning_command(level), expected);
    }

    #[test]
    fn test_heading_is_escaped_and_collapsed() {
        let mut tex = TexRenderer::new("", "", Style::Article, false);
        tex.add_heading(1, "  50%   of  #1 ", "a.c", 0);

        assert_eq!(tex.buffer(), "\\subsection{50\\% of \\#1}\n");
    }

    #[test]
    fn test_comment_is_escaped_then_prettified() {
        let mut tex = TexRenderer::new("", "", Style::Article, false);
        tex.add_comment("Call `add_one' on \"x\" & y\n", "a.c", 0, 0);

        assert_eq!(
            tex.buffer(),
            "Call {\\tt add\\_one} on ``x'' \\& y\n"
        );
    }

    #[test]
    fn test_code_is_trimmed_and_tabs_expanded() {
        let mut tex = TexRenderer::new("", "", Style::Article, false);
        tex.add_code("if (x) {\n\treturn;\n}\n\n\n", "a.c", 0, 2);

        assert_eq!(
            tex.buffer(),
            format!("\n{BEGIN}if (x) {{\n   return;\n}}\n\\end{{Verbatim}}\n")
        );
    }

    #[test]
    fn test_code_cannot_close_the_listing_early() {
        let mut tex = TexRenderer::new("", "", Style::Article, false);
        tex.add_code("puts(\"\\end{Verbatim}\");\n", "a.c", 0, 0);

        let body = tex.buffer().strip_prefix(&format!("\n{BEGIN}")).unwrap();
        assert_eq!(body, "puts(\"\\\\_end{Verbatim}\");\n\\end{Verbatim}\n");
    }

    #[test]
    fn test_reset_clears_buffer() {
        let mut tex = TexRenderer::new("T", "", Style::Article, true);
        tex.beginning();
        tex.reset();

        assert_eq!(tex.buffer(), "");
    }

    #[rstest]
    #[case("article", Style::Article)]
    #[case("Book", Style::Book)]
    fn test_parses_style(#[case] input: &str, #[case] expected: Style) {
        assert_eq!(input.parse::<Style>().unwrap(), expected);
    }

    #[test]
    fn test_rejects_unknown_style() {
        assert!(matches!(
            "report".parse::<Style>(),
            Err(EngineError::UnknownStyle(_))
        ));
    }
}
