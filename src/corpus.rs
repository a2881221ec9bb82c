use crate::error::KsResult;
use crate::metrics::NgramClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Characters that may appear in corpus n-grams. Everything else breaks
/// the counting window.
pub const VALID_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz,./;'";

/// Frequency tables for the four n-gram classes.
///
/// Tables are ordered maps, so iteration order (and therefore stat
/// tie-breaking) is identical across runs and platforms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub monograms: BTreeMap<String, u64>,
    pub bigrams: BTreeMap<String, u64>,
    pub skipgrams: BTreeMap<String, u64>,
    pub trigrams: BTreeMap<String, u64>,
}

impl Corpus {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let content = fs::read_to_string(&path)?;
        let corpus: Corpus = serde_json::from_str(&content)?;
        info!(
            "Loaded corpus from {}: {} bigrams, {} trigrams",
            path.as_ref().display(),
            corpus.bigrams.len(),
            corpus.trigrams.len()
        );
        Ok(corpus)
    }

    pub fn class(&self, class: NgramClass) -> &BTreeMap<String, u64> {
        match class {
            NgramClass::Monograms => &self.monograms,
            NgramClass::Bigrams => &self.bigrams,
            NgramClass::Skipgrams => &self.skipgrams,
            NgramClass::Trigrams => &self.trigrams,
        }
    }

    /// Counts n-grams in raw text. The text is lowercased and shifted
    /// symbols are folded back to their base keys first; any window
    /// containing an invalid character (including the skipped middle of a
    /// skipgram) is discarded whole.
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text
            .chars()
            .map(|c| unshift(c.to_ascii_lowercase()))
            .collect();
        let valid = |c: &char| VALID_LETTERS.contains(*c);

        let mut corpus = Corpus::default();

        for c in chars.iter().filter(|c| valid(c)) {
            *corpus.monograms.entry(c.to_string()).or_insert(0) += 1;
        }

        for w in chars.windows(2) {
            if w.iter().all(valid) {
                *corpus.bigrams.entry(w.iter().collect()).or_insert(0) += 1;
            }
        }

        for w in chars.windows(3) {
            if w.iter().all(valid) {
                let skip: String = [w[0], w[2]].iter().collect();
                *corpus.skipgrams.entry(skip).or_insert(0) += 1;
                *corpus.trigrams.entry(w.iter().collect()).or_insert(0) += 1;
            }
        }

        info!(
            "Ingested {} characters: {} distinct bigrams, {} distinct trigrams",
            chars.len(),
            corpus.bigrams.len(),
            corpus.trigrams.len()
        );
        corpus
    }
}

/// Folds a shifted symbol back onto the key that produces it.
fn unshift(c: char) -> char {
    match c {
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        '_' => '-',
        '+' => '=',
        ':' => ';',
        '{' => '[',
        '}' => ']',
        '<' => ',',
        '>' => '.',
        '?' => '/',
        '"' => '\'',
        _ => c,
    }
}
