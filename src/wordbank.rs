use crate::alphabet::Alphabet;
use crate::debug_log;
use crate::error::WordbankError;
use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

const USER_WORDBANK_DIR: &str = "hangman";
const USER_WORDBANK_FILE: &str = "words.txt";

/// A validated, lower-cased word that can be played.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretWord(String);

impl SecretWord {
    /// Normalize `raw` and accept it if it consists only of alphabet letters.
    #[must_use]
    pub fn parse(raw: &str, alphabet: &Alphabet) -> Option<Self> {
        let word = Alphabet::normalize(raw);
        alphabet.is_valid_word(&word).then_some(Self(word))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    /// Length in characters, not bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A line rejected while loading a word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based.
    pub line_number: usize,
    pub content: String,
}

/// Result of reading one word source: accepted words in file order plus the
/// lines that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub words: Vec<SecretWord>,
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    fn push_line(&mut self, line_number: usize, line: &str, alphabet: &Alphabet) {
        let normalized = Alphabet::normalize(line);
        if normalized.is_empty() {
            return;
        }
        match SecretWord::parse(&normalized, alphabet) {
            Some(word) => self.words.push(word),
            None => {
                debug_log!("Skipping line {}: {:?}", line_number, normalized);
                self.skipped.push(SkippedLine {
                    line_number,
                    content: normalized,
                });
            }
        }
    }

    /// Split a `\n`-terminated chunk into lines, also breaking on lone `\r`.
    fn push_chunk(&mut self, line_number: &mut usize, chunk: &str, alphabet: &Alphabet) {
        let chunk = chunk.strip_suffix('\n').unwrap_or(chunk);
        let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
        for line in chunk.split('\r') {
            *line_number += 1;
            self.push_line(*line_number, line, alphabet);
        }
    }

    /// Fails with [`WordbankError::NoPlayableWords`] when nothing was accepted.
    pub fn into_repository(self) -> Result<WordRepository, WordbankError> {
        WordRepository::new(self.words)
    }
}

pub fn load_wordbank_from_str(data: &str, alphabet: &Alphabet) -> LoadReport {
    let mut report = LoadReport::default();
    let mut line_number = 0;
    for chunk in data.split_inclusive('\n') {
        report.push_chunk(&mut line_number, chunk, alphabet);
    }
    report
}

/// Read a word list from any buffered reader.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Bytes that are not valid UTF-8
/// are decoded lossily, so such a line is skipped rather than failing the
/// whole source. `origin` only labels the error if reading fails part way.
pub fn load_wordbank_from_reader<R: BufRead>(
    mut reader: R,
    alphabet: &Alphabet,
    origin: &Path,
) -> Result<LoadReport, WordbankError> {
    let mut report = LoadReport::default();
    let mut line_number = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| WordbankError::SourceUnavailable {
                path: origin.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        report.push_chunk(&mut line_number, &String::from_utf8_lossy(&buf), alphabet);
    }
    Ok(report)
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(
    path: P,
    alphabet: &Alphabet,
) -> Result<LoadReport, WordbankError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| WordbankError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let report = load_wordbank_from_reader(BufReader::new(file), alphabet, path)?;
    log::info!(
        "Loaded {} words from {} ({} lines skipped)",
        report.words.len(),
        path.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// `<config_dir>/hangman/words.txt`, if the platform has a config directory.
#[must_use]
pub fn get_user_wordbank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(USER_WORDBANK_DIR).join(USER_WORDBANK_FILE))
}

/// Where the words for each round come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    Embedded,
    File(PathBuf),
}

impl WordSource {
    /// Explicit path first, then the user word list if present, then the
    /// built-in list.
    #[must_use]
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        if let Some(path) = explicit {
            return Self::File(path);
        }
        match get_user_wordbank_path() {
            Some(path) if path.is_file() => {
                debug_log!("Using user word list at {}", path.display());
                Self::File(path)
            }
            _ => Self::Embedded,
        }
    }

    pub fn load(&self, alphabet: &Alphabet) -> Result<LoadReport, WordbankError> {
        match self {
            Self::Embedded => Ok(load_wordbank_from_str(EMBEDDED_WORDBANK, alphabet)),
            Self::File(path) => load_wordbank_from_file(path, alphabet),
        }
    }
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => f.write_str("built-in word list"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Non-empty set of playable words.
#[derive(Debug, Clone)]
pub struct WordRepository {
    words: Vec<SecretWord>,
}

impl WordRepository {
    pub fn new(words: Vec<SecretWord>) -> Result<Self, WordbankError> {
        if words.is_empty() {
            return Err(WordbankError::NoPlayableWords);
        }
        Ok(Self { words })
    }

    #[must_use]
    pub fn words(&self) -> &[SecretWord] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Uniformly random word; every call is independent.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> SecretWord {
        let index = rng.gen_range(0..self.words.len());
        self.words[index].clone()
    }
}
