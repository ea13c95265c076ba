//! # Language Registry
//!
//! Maps language names to compiled [`LanguageRuleSet`]s and detects the
//! language of a source file from its name.
//!
//! The built-in table lives in `languages.yaml` and is embedded at compile
//! time. A user file of the same shape can be merged on top of it; an entry
//! with an existing name replaces the built-in one.

pub mod rule_set;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::EngineError;

pub use rule_set::{HeadingMatch, LanguageRuleSet, RuleSpec};

const BUILTIN_LANGUAGES: &str = include_str!("languages.yaml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default)]
    languages: BTreeMap<String, RuleSpec>,
}

#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: BTreeMap<String, LanguageRuleSet>,
}

impl LanguageRegistry {
    /// Registry holding the embedded language table.
    pub fn builtin() -> Result<Self, EngineError> {
        Self::from_yaml(BUILTIN_LANGUAGES)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, EngineError> {
        let mut registry = Self::default();
        registry.merge_yaml(yaml)?;
        Ok(registry)
    }

    /// Adds or replaces languages from a YAML document, returning how many
    /// entries it held.
    pub fn merge_yaml(&mut self, yaml: &str) -> Result<usize, EngineError> {
        let file: RegistryFile = serde_yaml_ng::from_str(yaml)?;
        let count = file.languages.len();

        for (name, spec) in &file.languages {
            let rules = LanguageRuleSet::from_spec(name, spec)?;
            if self.languages.insert(name.clone(), rules).is_some() {
                log::debug!("Language {name} overridden");
            }
        }

        Ok(count)
    }

    /// Merges a YAML registry file from disk.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize, EngineError> {
        let yaml = crate::io::read_source(path)?;
        let count = self.merge_yaml(&yaml)?;
        log::debug!("Loaded {count} language(s) from {}", path.display());
        Ok(count)
    }

    pub fn rules(&self, name: &str) -> Option<&LanguageRuleSet> {
        self.languages.get(name)
    }

    /// Looks a language up by extension, with or without the leading dot.
    pub fn rules_for_extension(&self, extension: &str) -> Option<&LanguageRuleSet> {
        let wanted = extension.trim_start_matches('.');
        self.languages.values().find(|rules| {
            rules
                .file_extensions()
                .iter()
                .any(|ext| ext.trim_start_matches('.').eq_ignore_ascii_case(wanted))
        })
    }

    /// Detects the language of `path` by file-name suffix.
    ///
    /// The longest matching suffix wins; ties go to the alphabetically first
    /// language name.
    pub fn detect(&self, path: &Path) -> Result<&LanguageRuleSet, EngineError> {
        let file_name = path.to_string_lossy();
        let mut best: Option<(usize, &LanguageRuleSet)> = None;

        for rules in self.languages.values() {
            if let Some(len) = rules.suffix_match(&file_name)
                && best.is_none_or(|(best_len, _)| len > best_len)
            {
                best = Some((len, rules));
            }
        }

        best.map(|(_, rules)| rules)
            .ok_or_else(|| EngineError::LanguageNotFound(path.to_path_buf()))
    }

    /// Detects the single language shared by every path in a batch.
    ///
    /// Fails on the first file whose language differs from the first file's,
    /// without reading any of them.
    pub fn detect_batch<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<&LanguageRuleSet, EngineError> {
        let mut paths = paths.iter().map(|p| -> &Path { p.as_ref() });
        let first_file = paths.next().ok_or(EngineError::EmptyBatch)?;
        let first = self.detect(first_file)?;

        for path in paths {
            let rules = self.detect(path)?;
            if rules.name() != first.name() {
                return Err(EngineError::MixedLanguageBatch {
                    first: first.name().to_string(),
                    first_file: first_file.to_path_buf(),
                    second: rules.name().to_string(),
                    second_file: path.to_path_buf(),
                });
            }
        }

        Ok(first)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageRuleSet> {
        self.languages.values()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
