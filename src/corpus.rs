//! Reading emoji sequences from a Unicode `emoji-test.txt` file.
//!
//! Data lines look like
//!
//! ```text
//! 1F469 200D 1F4BB                ; fully-qualified     # 👩‍💻 E4.0 woman technologist
//! ```
//!
//! Only the first `;`-separated field matters. Malformed lines are skipped
//! without complaint: the file is reference data, not user input.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::Range;
use std::path::Path;

use tracing::{debug, trace};
use unicode_width::UnicodeWidthChar;

use crate::trie::{Automaton, BuildError, TrieBuilder};

/// CANCEL TAG, which terminates subdivision flag sequences.
pub const CANCEL_TAG: u32 = 0xE007F;

/// Regional indicator symbols A through Z. Any two of them form a flag.
pub const REGIONAL_INDICATORS: Range<u32> = 0x1F1E6..0x1F200;

const VERSION_MARKER: &str = "# Version:";

/// Emoji sequences and the symbol classes derived from them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    sequences: Vec<Vec<u32>>,
    version: Option<String>,
    combining: BTreeSet<u32>,
    single_width_combining: BTreeSet<u32>,
    skipped_lines: usize,
}

/// What a single input line contributed.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Comment,
    Version(String),
    Sequence(Vec<u32>),
    Malformed,
}

impl Corpus {
    /// Parses corpus text held in memory.
    ///
    /// ```
    /// use seqtrie::corpus::Corpus;
    ///
    /// let corpus = Corpus::parse_str(
    ///     "# Version: 17.0\n\
    ///      1F469 200D 1F4BB ; fully-qualified # woman technologist\n",
    /// );
    /// assert_eq!(corpus.version(), Some("17.0"));
    /// assert_eq!(corpus.sequences(), &[vec![0x1F469, 0x200D, 0x1F4BB]]);
    /// ```
    pub fn parse_str(text: &str) -> Self {
        let mut corpus = Corpus::default();
        for line in text.lines() {
            corpus.push_line(line);
        }
        corpus.log_summary();
        corpus
    }

    /// Reads a corpus line by line.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Io`] if reading fails or the input is not UTF-8.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, CorpusError> {
        let mut corpus = Corpus::default();
        // Reuse one buffer instead of allocating a String per line.
        let mut buf = String::with_capacity(128);
        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                break;
            }
            corpus.push_line(buf.trim_end_matches(['\n', '\r']));
        }
        corpus.log_summary();
        Ok(corpus)
    }

    /// Reads a corpus from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CorpusError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Kept sequences, in file order.
    pub fn sequences(&self) -> &[Vec<u32>] {
        &self.sequences
    }

    /// Text of the last `# Version:` comment, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Every symbol seen after the first position of a kept sequence.
    pub fn combining(&self) -> &BTreeSet<u32> {
        &self.combining
    }

    /// The subset of [`combining`](Corpus::combining) that occupies exactly one column.
    pub fn single_width_combining(&self) -> &BTreeSet<u32> {
        &self.single_width_combining
    }

    /// Number of data lines that could not be parsed.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Adds the corpus sequences and every regional indicator pair to `builder`.
    pub fn add_to(&self, builder: &mut TrieBuilder<u32>) -> Result<(), BuildError<u32>> {
        for sequence in &self.sequences {
            builder.add_sequence(sequence)?;
        }
        builder.add_pairs(REGIONAL_INDICATORS)
    }

    /// Builds the minimized emoji prefix automaton for this corpus.
    pub fn build_automaton(&self, max_len: usize) -> Result<Automaton<u32>, BuildError<u32>> {
        let mut builder = TrieBuilder::with_max_len(max_len);
        self.add_to(&mut builder)?;
        Ok(builder.build())
    }

    fn push_line(&mut self, line: &str) {
        match parse_line(line) {
            Line::Comment => {}
            Line::Version(version) => self.version = Some(version),
            Line::Malformed => {
                trace!(line, "skipping malformed line");
                self.skipped_lines += 1;
            }
            Line::Sequence(sequence) => {
                // Single code points need no prefix table.
                if sequence.len() < 2 {
                    return;
                }
                // Subdivision flags: many more exist than the file lists,
                // and they work without help anyway.
                if sequence.last() == Some(&CANCEL_TAG) {
                    return;
                }
                for &symbol in &sequence[1..] {
                    self.combining.insert(symbol);
                    if is_single_width(symbol) {
                        self.single_width_combining.insert(symbol);
                    }
                }
                self.sequences.push(sequence);
            }
        }
    }

    fn log_summary(&self) {
        debug!(
            sequences = self.sequences.len(),
            combining = self.combining.len(),
            single_width_combining = self.single_width_combining.len(),
            skipped = self.skipped_lines,
            version = self.version.as_deref().unwrap_or("unknown"),
            "read emoji corpus"
        );
    }
}

fn parse_line(line: &str) -> Line {
    if line.is_empty() || is_comment(line) {
        return match line.trim_start().strip_prefix(VERSION_MARKER) {
            Some(version) => Line::Version(version.trim().to_owned()),
            None => Line::Comment,
        };
    }
    let Some((field, _)) = line.split_once(';') else {
        return Line::Malformed;
    };
    let sequence: Option<Vec<u32>> = field.split_whitespace().map(parse_code_point).collect();
    match sequence {
        Some(sequence) if !sequence.is_empty() => Line::Sequence(sequence),
        _ => Line::Malformed,
    }
}

fn parse_code_point(hex: &str) -> Option<u32> {
    let value = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(value).map(u32::from)
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// True if `symbol` is neither zero-width nor wide.
fn is_single_width(symbol: u32) -> bool {
    char::from_u32(symbol).and_then(UnicodeWidthChar::width) == Some(1)
}

/// Errors that can occur while reading a corpus.
#[derive(Debug)]
pub enum CorpusError {
    /// The input file could not be opened.
    Open {
        /// Path as given.
        path: String,
        /// Underlying error.
        source: io::Error,
    },
    /// Reading failed part way through.
    Io(io::Error),
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Open { path, source } => write!(f, "cannot open {path}: {source}"),
            CorpusError::Io(source) => write!(f, "read error: {source}"),
        }
    }
}

impl Error for CorpusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CorpusError::Open { source, .. } | CorpusError::Io(source) => Some(source),
        }
    }
}

impl From<io::Error> for CorpusError {
    fn from(err: io::Error) -> Self {
        CorpusError::Io(err)
    }
}
