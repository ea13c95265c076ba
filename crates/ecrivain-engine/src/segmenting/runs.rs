use std::ops::Range;

use super::{
    classify::{LineClass, LineClassifier},
    types::{Block, Run},
};

/// Lazy, single-pass sequence of [`Run`]s over one file.
///
/// Owns the post-removal text; the cursor only moves forward and every line is
/// consumed exactly once, either into a run or as a skipped blank line.
#[derive(Debug)]
pub struct Runs<'r> {
    classifier: LineClassifier<'r>,
    file: String,
    text: String,
    lines: Vec<Range<usize>>,
    cursor: usize,
}

impl<'r> Runs<'r> {
    pub(crate) fn new(classifier: LineClassifier<'r>, text: String, file: &str) -> Self {
        let lines = line_spans(&text);
        Self {
            classifier,
            file: file.to_string(),
            text,
            lines,
            cursor: 0,
        }
    }

    /// Number of lines in the post-removal text.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, idx: usize) -> &str {
        let line = &self.text[self.lines[idx].clone()];
        line.strip_suffix('\r').unwrap_or(line)
    }

    /// First index at or after `from` where `stop` holds, or the line count.
    fn scan_until(&self, from: usize, stop: impl Fn(&str) -> bool) -> usize {
        (from..self.lines.len())
            .find(|&idx| stop(self.line(idx)))
            .unwrap_or(self.lines.len())
    }

    fn block(&self, start: usize, end: usize) -> Block {
        let mut text = String::new();
        for idx in start..end {
            text.push_str(self.line(idx));
            text.push('\n');
        }
        Block {
            text,
            file: self.file.clone(),
            start_line: start,
            end_line: end - 1,
        }
    }
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        while self.cursor < self.lines.len() {
            let start = self.cursor;
            let class = self.classifier.classify(self.line(start));

            match class {
                LineClass::Blank => self.cursor += 1,
                LineClass::Heading { level, text } => {
                    self.cursor += 1;
                    return Some(Run::Heading {
                        level,
                        text,
                        file: self.file.clone(),
                        line: start,
                    });
                }
                LineClass::Comment => {
                    let classifier = self.classifier;
                    let end = self.scan_until(start + 1, |line| !classifier.continues_comment(line));
                    self.cursor = end;
                    return Some(Run::Comment(self.block(start, end)));
                }
                LineClass::Code => {
                    let classifier = self.classifier;
                    let stop = self.scan_until(start + 1, |line| classifier.ends_code(line));
                    // Trailing blank lines are left for the scanner to skip.
                    let end = (start + 1..stop)
                        .rev()
                        .find(|&idx| !self.line(idx).trim().is_empty())
                        .map_or(start + 1, |idx| idx + 1);
                    self.cursor = end;
                    return Some(Run::Code(self.block(start, end)));
                }
            }
        }

        None
    }
}

/// Byte ranges of each line, excluding the `\n` terminator. A trailing newline
/// does not start an extra empty line.
fn line_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices('\n') {
        spans.push(start..idx);
        start = idx + 1;
    }
    if start < text.len() {
        spans.push(start..text.len());
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_spans_ignore_trailing_newline() {
        assert_eq!(line_spans("a\nbc\n"), vec![0..1, 2..4]);
        assert_eq!(line_spans("a\n\nb"), vec![0..1, 2..2, 3..4]);
        assert!(line_spans("").is_empty());
    }
}
