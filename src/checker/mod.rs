pub mod dictionary;
pub mod suggestions;
pub mod tokenizer;

use crate::Config;
use anyhow::Result;
use dictionary::Dictionary;
use serde::Serialize;
use suggestions::{close_matches, rank, Candidate, Metric};
use tracing::debug;

/// Letters Uzbek writers commonly swap; a miss on one retries with the other.
const CONFUSABLE: [(char, char); 2] = [('ҳ', 'х'), ('х', 'ҳ')];

/// Outcome of looking a single word up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lookup {
    /// The lower-cased word is in the dictionary verbatim.
    pub available: bool,
    /// Close dictionary words, best first. Exactly `[word]` when `available`.
    pub matches: Vec<String>,
}

/// Dictionary matcher: exact lookup plus fuzzy suggestions.
pub struct Matcher {
    dictionary: Dictionary,
    metric: Metric,
    cutoff: f64,
    max_suggestions: usize,
}

impl Matcher {
    pub fn new(dictionary: Dictionary, config: &Config) -> Self {
        Self {
            dictionary,
            metric: config.metric,
            cutoff: config.cutoff,
            max_suggestions: config.max_suggestions,
        }
    }

    /// Load the configured word list (or the embedded one) and build a matcher over it.
    pub fn from_config(config: &Config) -> Result<Self> {
        let dictionary = match &config.word_list {
            Some(path) => Dictionary::load_from_path(path)?,
            None => Dictionary::embedded()?,
        };
        debug!(words = dictionary.len(), "dictionary loaded");

        Ok(Self::new(dictionary, config))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Look `word` up and suggest corrections when it is not a known word.
    ///
    /// When the word misses, each confusable letter it contains ("ҳ" or "х")
    /// is swapped for its partner and the variant's close matches are merged
    /// in. Both directions are tried, so a word holding both letters gets both
    /// variants.
    pub fn check(&self, word: &str) -> Lookup {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Lookup::default();
        }

        if self.dictionary.contains(&word) {
            debug!(%word, "exact match");
            return Lookup {
                available: true,
                matches: vec![word],
            };
        }

        let mut candidates = self.close_matches(&word);

        for (from, to) in CONFUSABLE {
            if word.contains(from) {
                let variant = word.replace(from, &to.to_string());
                merge(&mut candidates, self.close_matches(&variant));
            }
        }

        candidates.sort_by(rank);
        let matches: Vec<String> = candidates.into_iter().map(|c| c.word).collect();

        debug!(%word, suggestions = matches.len(), "no exact match");
        Lookup {
            available: false,
            matches,
        }
    }

    fn close_matches(&self, word: &str) -> Vec<Candidate> {
        close_matches(
            word,
            &self.dictionary,
            self.metric,
            self.cutoff,
            self.max_suggestions,
        )
    }
}

/// Merge `extra` into `candidates`, keeping the best score per word.
fn merge(candidates: &mut Vec<Candidate>, extra: Vec<Candidate>) {
    for candidate in extra {
        match candidates.iter_mut().find(|c| c.word == candidate.word) {
            Some(existing) => existing.score = existing.score.max(candidate.score),
            None => candidates.push(candidate),
        }
    }
}
