use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::io::read_source;
use crate::languages::{LanguageRegistry, LanguageRuleSet};
use crate::render::Renderer;
use crate::segmenting::{Run, Segmenter};

/// What happened while formatting a book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSummary {
    /// Files that were read and segmented.
    pub files_read: usize,
    /// Files that could not be read and were left out.
    pub skipped: Vec<PathBuf>,
    /// Total runs handed to the renderer.
    pub runs: usize,
}

/// A batch of same-language source files woven into one document.
#[derive(Debug, Clone)]
pub struct Book<'r> {
    files: Vec<PathBuf>,
    segmenter: Segmenter<'r>,
}

impl<'r> Book<'r> {
    pub fn new(files: Vec<PathBuf>, rules: &'r LanguageRuleSet) -> Self {
        Self {
            files,
            segmenter: Segmenter::new(rules),
        }
    }

    /// Detects the batch's language and builds the book.
    ///
    /// Mixed or unknown languages are rejected here, before any file is read.
    pub fn from_registry(
        registry: &'r LanguageRegistry,
        files: Vec<PathBuf>,
    ) -> Result<Self, EngineError> {
        let rules = registry.detect_batch(&files)?;
        log::debug!("Detected language {} for {} file(s)", rules.name(), files.len());
        Ok(Self::new(files, rules))
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn rules(&self) -> &'r LanguageRuleSet {
        self.segmenter.rules()
    }

    /// Renders every file, in order, into `out`.
    ///
    /// Unreadable files are logged and skipped; the rest of the batch is
    /// still rendered.
    pub fn format(&self, out: &mut dyn Renderer) -> BookSummary {
        let mut summary = BookSummary::default();

        out.reset();
        out.beginning();

        for file in &self.files {
            let content = match read_source(file) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("{e}; skipping");
                    summary.skipped.push(file.clone());
                    continue;
                }
            };

            log::info!("Weaving {}", file.display());
            summary.runs += self.weave_source(out, file, &content);
            summary.files_read += 1;
        }

        out.ending();
        summary
    }

    /// Segments one in-memory source and pushes its runs into `out`,
    /// returning the number of runs.
    pub fn weave_source(&self, out: &mut dyn Renderer, file: &Path, content: &str) -> usize {
        let name = file.to_string_lossy();
        let mut count = 0;

        for run in self.segmenter.segment(content, &name) {
            log::debug!(
                "{}:{}-{} {}",
                run.file(),
                run.start_line(),
                run.end_line(),
                run_kind(&run)
            );
            self.emit(out, run);
            count += 1;
        }

        count
    }

    fn emit(&self, out: &mut dyn Renderer, run: Run) {
        match run {
            Run::Heading {
                level,
                text,
                file,
                line,
            } => out.add_heading(level, &text, &file, line),
            Run::Comment(block) => {
                let text = self.rules().strip_comment(&block.text);
                out.add_comment(&text, &block.file, block.start_line, block.end_line);
            }
            Run::Code(block) => {
                out.add_code(&block.text, &block.file, block.start_line, block.end_line)
            }
        }
    }
}

fn run_kind(run: &Run) -> &'static str {
    match run {
        Run::Heading { .. } => "heading",
        Run::Comment(_) => "comment",
        Run::Code(_) => "code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::RuleSpec;
    use crate::render::{Style, TexRenderer, TxtRenderer};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn hash_rules() -> LanguageRuleSet {
        let spec = RuleSpec {
            comment: Some("^//".to_string()),
            heading: Some("^#+ ".to_string()),
            extensions: vec![".c".to_string()],
            ..RuleSpec::default()
        };
        LanguageRuleSet::from_spec("test", &spec).unwrap()
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_title_and_code_as_text() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "f.c", "# Title\ncode();");
        let rules = hash_rules();
        let book = Book::new(vec![path.clone()], &rules);

        let mut txt = TxtRenderer::new("", "");
        let summary = book.format(&mut txt);

        assert_eq!(summary.runs, 2);
        assert_eq!(
            txt.buffer(),
            format!(
                "++ Title\n\n== f.c ({}:1) ================\ncode();\n\
                 =========================================================\n\n",
                path.display()
            )
        );
    }

    #[test]
    fn test_title_and_code_as_tex() {
        let rules = hash_rules();
        let book = Book::new(vec![], &rules);

        let mut tex = TexRenderer::new("", "", Style::Article, false);
        tex.beginning();
        book.weave_source(&mut tex, Path::new("f.c"), "# Title\ncode();");
        tex.ending();

        assert_eq!(
            tex.buffer(),
            "\\documentclass[notitlepage,a4paper]{article}\n\
             \\usepackage{fancyvrb,color,palatino}\n\
             \\definecolor{gray}{gray}{0.6}\n\
             \\title{}\n\
             \\begin{document}\n\
             \\maketitle\n\
             \\section{Title}\n\
             \n\
             \\begin{Verbatim}[fontsize=\\small,frame=leftline,framerule=0.9mm,\
             rulecolor=\\color{gray},framesep=5.1mm,xleftmargin=5mm,fontfamily=cmtt]\n\
             code();\n\
             \\end{Verbatim}\n\
             \\end{document}\n"
        );
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let first = write_file(&dir, "a.c", "// first\n");
        let missing = dir.path().join("missing.c");
        let last = write_file(&dir, "b.c", "// last\n");
        let rules = hash_rules();
        let book = Book::new(vec![first, missing.clone(), last], &rules);

        let mut txt = TxtRenderer::new("", "");
        let summary = book.format(&mut txt);

        assert_eq!(txt.buffer(), "// first\n// last\n");
        assert_eq!(summary.files_read, 2);
        assert_eq!(summary.skipped, vec![missing]);
    }

    #[test]
    fn test_prologue_and_epilogue_wrap_all_files_once() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.c", "# A\n");
        let b = write_file(&dir, "b.c", "# B\n");
        let rules = hash_rules();
        let book = Book::new(vec![a, b], &rules);

        let mut tex = TexRenderer::new("", "", Style::Book, false);
        book.format(&mut tex);
        let out = tex.buffer();

        assert_eq!(out.matches("\\begin{document}").count(), 1);
        assert_eq!(out.matches("\\end{document}").count(), 1);
        let a_at = out.find("\\chapter{A}").unwrap();
        let b_at = out.find("\\chapter{B}").unwrap();
        assert!(a_at < b_at);
    }

    #[test]
    fn test_format_resets_previous_output() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.c", "// once\n");
        let rules = hash_rules();
        let book = Book::new(vec![a], &rules);

        let mut txt = TxtRenderer::new("", "");
        book.format(&mut txt);
        book.format(&mut txt);

        assert_eq!(txt.buffer(), "// once\n");
    }

    #[test]
    fn test_comment_markers_are_stripped_before_rendering() {
        let spec = RuleSpec {
            comment: Some("^//".to_string()),
            strip: Some(r"^//\s?".to_string()),
            ..RuleSpec::default()
        };
        let rules = LanguageRuleSet::from_spec("test", &spec).unwrap();
        let book = Book::new(vec![], &rules);

        let mut txt = TxtRenderer::new("", "");
        book.weave_source(&mut txt, Path::new("a.c"), "// Hello\n//world\n");

        assert_eq!(txt.buffer(), "Hello\nworld\n");
    }

    #[test]
    fn test_mixed_batch_is_rejected_before_reading() {
        let registry = LanguageRegistry::builtin().unwrap();
        let files = vec![PathBuf::from("/missing/a.c"), PathBuf::from("/missing/b.py")];

        let result = Book::from_registry(&registry, files);

        assert!(matches!(
            result,
            Err(EngineError::MixedLanguageBatch { .. })
        ));
    }
}
