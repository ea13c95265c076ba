use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("No language found for file: {0}")]
    LanguageNotFound(PathBuf),
    #[error("Error reading file {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot mix languages: {first} ({first_file}) and {second} ({second_file})")]
    MixedLanguageBatch {
        first: String,
        first_file: PathBuf,
        second: String,
        second_file: PathBuf,
    },
    #[error("No source files given")]
    EmptyBatch,
    #[error("Unsupported output type: {0}")]
    UnsupportedOutputType(String),
    #[error("Unknown document style: {0} (expected article or book)")]
    UnknownStyle(String),
    #[error("Failed to write output: {0}")]
    WriteFailure(#[source] std::io::Error),
    #[error("Invalid {field} pattern for language {language}: {source}")]
    InvalidPattern {
        language: String,
        field: &'static str,
        source: regex::Error,
    },
    #[error("Invalid language registry: {0}")]
    InvalidRegistry(#[from] serde_yaml_ng::Error),
}
