use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use ecrivain_config::Config;
use ecrivain_engine::{Book, LanguageRegistry, OutputFormat, RenderOptions, Style, io};

use crate::cli::RenderArgs;

const GLOB_CHARS: &[char] = &['*', '?', '['];

/// Expands source arguments in order. Arguments with glob metacharacters are
/// expanded and sorted; a pattern with no matches is an error.
pub fn expand_sources(sources: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for source in sources {
        if !source.contains(GLOB_CHARS) {
            files.push(PathBuf::from(source));
            continue;
        }

        let mut matched = glob::glob(source)
            .with_context(|| format!("Invalid source pattern {source}"))?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to expand {source}"))?;
        if matched.is_empty() {
            bail!("No files match {source}");
        }
        matched.sort();
        log::debug!("{source} matched {} file(s)", matched.len());
        files.extend(matched);
    }

    Ok(files)
}

/// Picks the output format: explicit type first, then the output extension.
pub fn resolve_format(output: &Path, explicit: Option<OutputFormat>) -> Result<OutputFormat> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    if is_stdout(output) {
        bail!("--type is required when writing to standard output");
    }
    Ok(OutputFormat::from_path(output)?)
}

/// Merges flags over config values over built-in defaults.
pub fn resolve_options(args: &RenderArgs, config: Option<&Config>) -> Result<RenderOptions> {
    let defaults = RenderOptions::default();

    let style = match args
        .style
        .clone()
        .or_else(|| config.and_then(|c| c.style.clone()))
    {
        Some(style) => style.parse::<Style>()?,
        None => defaults.style,
    };

    Ok(RenderOptions {
        title: args
            .title
            .clone()
            .or_else(|| config.and_then(|c| c.title.clone()))
            .unwrap_or(defaults.title),
        author: args
            .author
            .clone()
            .or_else(|| config.and_then(|c| c.author.clone()))
            .unwrap_or(defaults.author),
        style,
        include_toc: args
            .include_toc
            .or_else(|| config.and_then(|c| c.include_toc))
            .unwrap_or(defaults.include_toc),
    })
}

/// Built-in registry with the user's extra languages merged on top.
pub fn load_registry(extra: Option<&Path>) -> Result<LanguageRegistry> {
    let mut registry = LanguageRegistry::builtin().context("Built-in language registry")?;
    if let Some(path) = extra {
        let merged = registry
            .merge_file(path)
            .with_context(|| format!("Failed to load languages from {}", path.display()))?;
        log::info!("Loaded {merged} language(s) from {}", path.display());
    }
    Ok(registry)
}

pub fn render(args: &RenderArgs, config: Option<&Config>) -> Result<()> {
    let files = expand_sources(&args.sources)?;
    let format = resolve_format(&args.output, args.format)?;
    let options = resolve_options(args, config)?;

    let extra = args
        .languages
        .as_deref()
        .or_else(|| config.and_then(|c| c.languages.as_deref()));
    let registry = load_registry(extra)?;
    let book = Book::from_registry(&registry, files)?;

    let mut out = format.renderer(&options);
    let summary = book.format(out.as_mut());
    log::info!(
        "Rendered {} run(s) from {} file(s) as {format}",
        summary.runs,
        summary.files_read
    );
    if !summary.skipped.is_empty() {
        log::warn!("Skipped {} unreadable file(s)", summary.skipped.len());
    }

    if is_stdout(&args.output) {
        let stdout = std::io::stdout();
        out.write(&mut stdout.lock())
            .context("Failed to write to standard output")?;
    } else {
        let written = io::write_document(out.as_ref(), &args.output)?;
        log::info!("Wrote {written} bytes to {}", args.output.display());
    }

    Ok(())
}

pub fn languages(extra: Option<&Path>, w: &mut dyn Write) -> Result<()> {
    let registry = load_registry(extra)?;
    for rules in registry.iter() {
        writeln!(w, "{:<12} {}", rules.name(), rules.file_extensions().join(" "))?;
    }
    Ok(())
}

fn is_stdout(output: &Path) -> bool {
    output == Path::new("-")
}
