use std::borrow::Cow;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::text::collapse_whitespace;

/// Patterns for one language as written in a registry file.
///
/// An empty or missing pattern is treated as absent and never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub remove: Option<String>,
    #[serde(default)]
    pub strip: Option<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// A heading recognized on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    pub level: usize,
    pub text: String,
}

/// Compiled classification rules for one language.
#[derive(Debug, Clone)]
pub struct LanguageRuleSet {
    name: String,
    comment: Option<Regex>,
    heading: Option<Regex>,
    remove: Option<Regex>,
    strip: Option<Regex>,
    file_extensions: Vec<String>,
}

impl LanguageRuleSet {
    /// Compiles every pattern of `spec`, naming the offending field on failure.
    pub fn from_spec(name: &str, spec: &RuleSpec) -> Result<Self, EngineError> {
        let compile = |field: &'static str, pattern: &Option<String>| {
            pattern
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(Regex::new)
                .transpose()
                .map_err(|source| EngineError::InvalidPattern {
                    language: name.to_string(),
                    field,
                    source,
                })
        };

        Ok(Self {
            name: name.to_string(),
            comment: compile("comment", &spec.comment)?,
            heading: compile("heading", &spec.heading)?,
            remove: compile("remove", &spec.remove)?,
            strip: compile("strip", &spec.strip)?,
            file_extensions: spec.extensions.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_extensions(&self) -> &[String] {
        &self.file_extensions
    }

    pub fn is_comment(&self, line: &str) -> bool {
        self.comment.as_ref().is_some_and(|re| re.is_match(line))
    }

    pub fn is_heading(&self, line: &str) -> bool {
        self.heading.as_ref().is_some_and(|re| re.is_match(line))
    }

    /// Matches `line` against the heading pattern.
    ///
    /// The level is the length of the first capture group minus one. A pattern
    /// without a capture group uses the leading run of the match's first
    /// character instead, so `^#+ ` reads `## Intro` as level 1.
    pub fn match_heading(&self, line: &str) -> Option<HeadingMatch> {
        let caps = self.heading.as_ref()?.captures(line)?;
        let whole = caps.get(0)?;
        let markers = match caps.get(1) {
            Some(group) => group.as_str().chars().count(),
            None => leading_run(whole.as_str()),
        };

        Some(HeadingMatch {
            level: markers.saturating_sub(1),
            text: collapse_whitespace(&line[whole.end()..]),
        })
    }

    /// Deletes every match of the removal pattern from `content`.
    pub fn remove_from<'a>(&self, content: &'a str) -> Cow<'a, str> {
        match &self.remove {
            Some(re) => re.replace_all(content, ""),
            None => Cow::Borrowed(content),
        }
    }

    /// Deletes the strip pattern from each line of a comment block.
    pub fn strip_comment<'a>(&self, comment: &'a str) -> Cow<'a, str> {
        let Some(re) = &self.strip else {
            return Cow::Borrowed(comment);
        };

        let mut out = String::with_capacity(comment.len());
        for line in comment.split_inclusive('\n') {
            let (body, newline) = match line.strip_suffix('\n') {
                Some(body) => (body, "\n"),
                None => (line, ""),
            };
            out.push_str(&re.replace_all(body, ""));
            out.push_str(newline);
        }
        Cow::Owned(out)
    }

    /// Length of the longest configured extension suffix that `file_name` ends
    /// with, if any.
    pub fn suffix_match(&self, file_name: &str) -> Option<usize> {
        self.file_extensions
            .iter()
            .filter(|ext| !ext.is_empty() && file_name.ends_with(ext.as_str()))
            .map(String::len)
            .max()
    }
}

fn leading_run(s: &str) -> usize {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => 1 + chars.take_while(|c| *c == first).count(),
        None => 0,
    }
}
