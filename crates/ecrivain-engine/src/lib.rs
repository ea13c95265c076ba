pub mod book;
pub mod error;
pub mod io;
pub mod languages;
pub mod render;
pub mod segmenting;
pub mod text;

// Re-export key types for easier usage
pub use book::*;
pub use error::EngineError;
pub use languages::{LanguageRegistry, LanguageRuleSet, RuleSpec};
pub use render::{Document, OutputFormat, RenderOptions, Renderer, Style, TexRenderer, TxtRenderer};
pub use segmenting::{Block, Run, Runs, Segmenter, segment};
