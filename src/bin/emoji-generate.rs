//! emoji-generate - emit C lookup tables for emoji sequence prefixes
//!
//! Reads a local copy of
//! <https://www.unicode.org/Public/17.0.0/emoji/emoji-test.txt> (or newer)
//! and writes C code that quickly checks whether a string is a valid emoji
//! sequence or a prefix of one.
//!
//! Usage:
//!   emoji-generate emoji-test.txt                        # print to stdout
//!   emoji-generate emoji-test.txt -o emoji-table-incl.hh # write if changed

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use seqtrie::corpus::Corpus;
use seqtrie::emit::{render, EmitOptions};
use seqtrie::output::write_if_changed;
use seqtrie::trie::builder::DEFAULT_MAX_LEN;

#[derive(Parser)]
#[command(name = "emoji-generate")]
#[command(about = "Generate C jump tables recognizing emoji sequence prefixes")]
struct Args {
    /// emoji-test.txt from the Unicode emoji data files
    input: PathBuf,

    /// Output file; written only when its contents change. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prefix of the generated per-node function names
    #[arg(long, default_value = "emoji_lookup")]
    prefix: String,

    /// Longest supported sequence, in code points
    #[arg(long, default_value_t = DEFAULT_MAX_LEN)]
    max_length: usize,

    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let corpus = Corpus::from_path(&args.input)?;
    let automaton = corpus.build_automaton(args.max_length)?;
    info!(
        sequences = corpus.sequences().len(),
        nodes = automaton.node_count(),
        version = corpus.version().unwrap_or("unknown"),
        "built emoji prefix automaton"
    );

    let options = EmitOptions {
        prefix: args.prefix.clone(),
        ..EmitOptions::default()
    };
    let header = render(&options, &automaton, &corpus);

    match &args.output {
        Some(path) => {
            let written = write_if_changed(path, &header)
                .map_err(|err| format!("cannot write {}: {err}", path.display()))?;
            if written {
                info!(path = %path.display(), "wrote generated tables");
            } else {
                info!(path = %path.display(), "generated tables unchanged");
            }
        }
        None => io::stdout().lock().write_all(header.as_bytes())?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
