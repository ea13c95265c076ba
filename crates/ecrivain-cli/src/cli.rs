use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ecrivain_engine::OutputFormat;

/// Weave annotated source files into a LaTeX or plain-text document
#[derive(Parser, Debug)]
#[command(name = "ecrivain")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (defaults to ~/.config/ecrivain/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log each run as it is segmented
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render source files into one document
    Render(RenderArgs),
    /// List the known languages and their file extensions
    Languages {
        /// Extra YAML language registry merged over the built-in one
        #[arg(long)]
        languages: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Output file, or `-` for standard output
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output type; inferred from the output extension when omitted
    #[arg(short = 't', long = "type")]
    pub format: Option<OutputFormat>,

    /// Document title
    #[arg(short = 'T', long)]
    pub title: Option<String>,

    /// Document author
    #[arg(short, long)]
    pub author: Option<String>,

    /// LaTeX document class: article or book
    #[arg(short, long)]
    pub style: Option<String>,

    /// Emit a table of contents (true or false)
    #[arg(short, long)]
    pub include_toc: Option<bool>,

    /// Extra YAML language registry merged over the built-in one
    #[arg(long)]
    pub languages: Option<PathBuf>,

    /// Source files or glob patterns, rendered in order
    #[arg(required = true)]
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_render_arguments() {
        let cli = Cli::try_parse_from([
            "ecrivain", "-v", "render", "-o", "-", "-t", "txt", "-T", "Sources", "-i", "false",
            "a.c", "src/*.c",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.output, PathBuf::from("-"));
        assert_eq!(args.format, Some(OutputFormat::Txt));
        assert_eq!(args.title.as_deref(), Some("Sources"));
        assert_eq!(args.include_toc, Some(false));
        assert_eq!(args.sources, vec!["a.c".to_string(), "src/*.c".to_string()]);
    }

    #[test]
    fn test_rejects_unknown_output_type() {
        let result = Cli::try_parse_from(["ecrivain", "render", "-o", "-", "-t", "pdf", "a.c"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_render_requires_sources() {
        let result = Cli::try_parse_from(["ecrivain", "render", "-o", "out.tex"]);

        assert!(result.is_err());
    }
}
