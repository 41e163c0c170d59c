use anyhow::{bail, Context, Result};
use cedict_core::{Config, DictionaryIndex, Segmenter, Token};
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Full token stream as JSON
    Json,
    /// One token per line: line:column, text, forms, pinyin, gloss
    Text,
    /// Completion words only
    Words,
}

/// Segment Chinese text against a CC-CEDICT dictionary.
#[derive(Parser)]
struct Args {
    /// Dictionary file (CC-CEDICT line format); overrides the config file
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Compiled index written by --save-compiled; used instead of --dictionary
    #[arg(long)]
    compiled: Option<PathBuf>,

    /// Write the loaded index in compiled form to this path
    #[arg(long)]
    save_compiled: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Log at debug level (otherwise RUST_LOG or warn)
    #[arg(short, long)]
    verbose: bool,

    /// Text file to segment; stdin when omitted
    input: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_index(args: &Args, config: &Config) -> Result<DictionaryIndex> {
    if let Some(path) = &args.compiled {
        return DictionaryIndex::load_compiled(path)
            .with_context(|| format!("loading compiled index {}", path.display()));
    }

    let Some(path) = args.dictionary.as_ref().or(config.dictionary.as_ref()) else {
        bail!("no dictionary given: pass --dictionary or set `dictionary` in the config");
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading dictionary {}", path.display()))?;
    let (index, report) = DictionaryIndex::build_with_report(&text);
    if report.skipped > 0 || report.invalid_tones > 0 {
        tracing::warn!(
            skipped = report.skipped,
            invalid_tones = report.invalid_tones,
            "dictionary had problems"
        );
    }
    Ok(index)
}

fn read_input(args: &Args) -> Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn write_text(out: &mut impl Write, tokens: &[Token]) -> io::Result<()> {
    for t in tokens {
        if t.is_whitespace() {
            continue;
        }
        let forms = if t.traditional == t.simplified {
            t.simplified.clone()
        } else {
            format!("{}/{}", t.traditional, t.simplified)
        };
        let pinyin: Vec<&str> = t.matches.iter().map(|m| m.pinyin_pretty.as_str()).collect();
        let gloss = t.matches.first().map(|m| m.gloss.as_str()).unwrap_or("");
        writeln!(
            out,
            "{}:{}\t{}\t{}\t{}\t{}",
            t.position.line,
            t.position.column,
            t.text,
            forms,
            pinyin.join(" | "),
            gloss
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load_toml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let index = load_index(&args, &config)?;
    if let Some(path) = &args.save_compiled {
        index
            .save_compiled(path)
            .with_context(|| format!("writing compiled index {}", path.display()))?;
        tracing::info!(path = %path.display(), entries = index.len(), "compiled index written");
    }

    let segmenter = Segmenter::with_config(Arc::new(index), &config);
    let text = read_input(&args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &segmenter.tokenize(&text))?;
            writeln!(out)?;
        }
        Format::Text => write_text(&mut out, &segmenter.tokenize(&text))?,
        Format::Words => {
            for word in segmenter.words(&text) {
                if cedict_core::should_ignore(&word)
                    || !cedict_core::meets_trigger(&word, config.trigger_threshold)
                {
                    continue;
                }
                writeln!(out, "{word}")?;
            }
        }
    }
    Ok(())
}
