#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static word-score sentiment lexicon.
//!
//! Loads a two-column CSV (`word,score`) once at startup and scores free
//! text against it. Scoring is pure and infallible; only the load phase
//! can error.

use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Unicode-aware word tokens: runs of letters, digits, and underscores.
/// Punctuation-only tokens never match and are dropped.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Errors that can occur while loading the lexicon.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The lexicon source could not be opened.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV stream could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Word-to-score mapping loaded once, read-only thereafter.
///
/// Safe for unsynchronized concurrent reads from multiple simultaneous
/// aggregation runs.
#[derive(Debug, Clone, Default)]
pub struct SentimentLexicon {
    scores: HashMap<String, f64>,
}

impl SentimentLexicon {
    /// Loads the lexicon from a CSV file with a `word,score` header row.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Io`] if the file cannot be opened and
    /// [`LexiconError::Csv`] if the stream cannot be read. Individual bad
    /// rows (fewer than two fields, unparseable score) are skipped with a
    /// warning, not fatal.
    pub fn from_csv_path(path: &Path) -> Result<Self, LexiconError> {
        let file = File::open(path)?;
        let lexicon = Self::from_csv_reader(file)?;
        log::info!(
            "Loaded {} lexicon entries from {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// Loads the lexicon from any CSV stream with a header row.
    ///
    /// Words are stored lower-cased; a duplicate word keeps the last row.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Csv`] if a record cannot be read from the
    /// stream.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, LexiconError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let mut scores = HashMap::new();
        let mut skipped = 0_usize;

        for record in csv_reader.records() {
            let record = record?;
            let (Some(word), Some(raw_score)) = (record.get(0), record.get(1)) else {
                skipped += 1;
                log::warn!("Skipping lexicon row with fewer than two fields");
                continue;
            };
            let Ok(score) = raw_score.trim().parse::<f64>() else {
                skipped += 1;
                log::warn!("Skipping lexicon row with unparseable score: {word}");
                continue;
            };
            scores.insert(word.trim().to_lowercase(), score);
        }

        if skipped > 0 {
            log::warn!("Skipped {skipped} malformed lexicon rows");
        }

        Ok(Self { scores })
    }

    /// Scores `text` as the arithmetic mean of the lexicon scores of its
    /// matching word tokens.
    ///
    /// Tokens are case-folded to lower case before lookup. Returns `None`
    /// when no token matched, including for empty text. Never errors.
    #[must_use]
    pub fn analyze(&self, text: &str) -> Option<f64> {
        let mut sum = 0.0;
        let mut matched = 0_usize;

        for token in WORD_RE.find_iter(text) {
            if let Some(score) = self.scores.get(&token.as_str().to_lowercase()) {
                sum += score;
                matched += 1;
            }
        }

        if matched == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = matched as f64;
        Some(sum / count)
    }

    /// Number of words in the lexicon.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the lexicon holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon(rows: &str) -> SentimentLexicon {
        let csv = format!("word,score\n{rows}");
        SentimentLexicon::from_csv_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn scores_mean_of_matched_tokens() {
        let lexicon = lexicon("great,1.0\nbad,-1.0\nokay,0.5");
        assert_eq!(lexicon.analyze("great but okay"), Some(0.75));
    }

    #[test]
    fn no_match_yields_none() {
        let lexicon = lexicon("great,1.0");
        assert_eq!(lexicon.analyze("nothing relevant here"), None);
    }

    #[test]
    fn empty_text_yields_none() {
        let lexicon = lexicon("great,1.0");
        assert_eq!(lexicon.analyze(""), None);
    }

    #[test]
    fn case_folds_tokens() {
        let lexicon = lexicon("great,1.0");
        assert_eq!(lexicon.analyze("GREAT Day"), Some(1.0));
    }

    #[test]
    fn punctuation_splits_tokens() {
        let lexicon = lexicon("great,1.0\nbad,-1.0");
        assert_eq!(lexicon.analyze("great,bad!"), Some(0.0));
    }

    #[test]
    fn punctuation_only_text_yields_none() {
        let lexicon = lexicon("great,1.0");
        assert_eq!(lexicon.analyze("!!! ... ???"), None);
    }

    #[test]
    fn skips_short_rows() {
        let lexicon = lexicon("great\nbad,-1.0");
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.analyze("bad"), Some(-1.0));
    }

    #[test]
    fn skips_unparseable_scores() {
        let lexicon = lexicon("great,excellent\nbad,-1.0");
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.analyze("great"), None);
    }

    #[test]
    fn duplicate_word_keeps_last_row() {
        let lexicon = lexicon("great,1.0\ngreat,0.5");
        assert_eq!(lexicon.analyze("great"), Some(0.5));
    }

    #[test]
    fn stores_words_lower_cased() {
        let lexicon = lexicon("GREAT,1.0");
        assert_eq!(lexicon.analyze("great"), Some(1.0));
    }

    #[test]
    fn empty_lexicon_never_matches() {
        let lexicon = SentimentLexicon::from_csv_reader("word,score\n".as_bytes()).unwrap();
        assert!(lexicon.is_empty());
        assert_eq!(lexicon.analyze("great"), None);
    }

    #[test]
    fn missing_file_is_fatal() {
        let result = SentimentLexicon::from_csv_path(Path::new("/nonexistent/sentiments.csv"));
        assert!(matches!(result, Err(LexiconError::Io(_))));
    }
}
