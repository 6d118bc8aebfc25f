use crate::checker::dictionary::Dictionary;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Similarity ratio used to rank dictionary words against a query.
/// Every metric yields a score in `0.0..=1.0`, where `1.0` is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Levenshtein,
    JaroWinkler,
    SorensenDice,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown similarity metric '{0}', expected levenshtein, jaro_winkler or sorensen_dice")]
pub struct ParseMetricError(String);

impl Metric {
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            Metric::Levenshtein => strsim::normalized_levenshtein(a, b),
            Metric::JaroWinkler => strsim::jaro_winkler(a, b),
            Metric::SorensenDice => strsim::sorensen_dice(a, b),
        }
    }

    /// Upper bound of the score for strings of these lengths, if the metric has a cheap one.
    fn ceiling(self, a_len: usize, b_len: usize) -> Option<f64> {
        match self {
            Metric::Levenshtein => {
                let longest = a_len.max(b_len);
                if longest == 0 {
                    return Some(1.0);
                }
                Some(a_len.min(b_len) as f64 / longest as f64)
            }
            Metric::JaroWinkler | Metric::SorensenDice => None,
        }
    }
}

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "levenshtein" => Ok(Metric::Levenshtein),
            "jaro_winkler" => Ok(Metric::JaroWinkler),
            "sorensen_dice" => Ok(Metric::SorensenDice),
            _ => Err(ParseMetricError(s.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Levenshtein => write!(f, "levenshtein"),
            Metric::JaroWinkler => write!(f, "jaro_winkler"),
            Metric::SorensenDice => write!(f, "sorensen_dice"),
        }
    }
}

/// A dictionary word together with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub word: String,
    pub score: f64,
}

/// Best-first candidate order; equal scores fall back to alphabetical order.
pub fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.word.cmp(&b.word))
}

/// Find dictionary words whose similarity to `word` reaches `cutoff`,
/// best first, at most `max_suggestions` of them.
pub fn close_matches(
    word: &str,
    dictionary: &Dictionary,
    metric: Metric,
    cutoff: f64,
    max_suggestions: usize,
) -> Vec<Candidate> {
    if word.is_empty() || max_suggestions == 0 {
        return Vec::new();
    }

    let word_len = word.chars().count();
    let mut candidates = Vec::new();

    dictionary.for_each_word(|candidate| {
        // Skip words whose length alone rules them out
        if let Some(ceiling) = metric.ceiling(word_len, candidate.chars().count()) {
            if ceiling < cutoff {
                return;
            }
        }

        let score = metric.score(word, candidate);
        if score >= cutoff {
            candidates.push(Candidate {
                word: candidate.to_string(),
                score,
            });
        }
    });

    candidates.sort_by(rank);
    candidates.truncate(max_suggestions);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["машина", "машиналар", "мушук", "китоб", "китобхона"]).unwrap()
    }

    #[test]
    fn test_close_matches_ranked() {
        let matches = close_matches("мошина", &dictionary(), Metric::Levenshtein, 0.6, 3);
        assert_eq!(matches[0].word, "машина");
        assert!(matches.iter().all(|c| c.score >= 0.6));
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_exact_word_scores_one() {
        let matches = close_matches("китоб", &dictionary(), Metric::Levenshtein, 0.6, 3);
        assert_eq!(matches[0].word, "китоб");
        assert!((matches[0].score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_matches_below_cutoff() {
        assert!(close_matches("щщщщщщщ", &dictionary(), Metric::Levenshtein, 0.6, 3).is_empty());
        assert!(close_matches("", &dictionary(), Metric::Levenshtein, 0.6, 3).is_empty());
        assert!(close_matches("китоб", &dictionary(), Metric::Levenshtein, 0.6, 0).is_empty());
    }

    #[test]
    fn test_bounded_candidate_count() {
        let matches = close_matches("машина", &dictionary(), Metric::Levenshtein, 0.0, 2);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_other_metrics() {
        for metric in [Metric::JaroWinkler, Metric::SorensenDice] {
            let matches = close_matches("мошина", &dictionary(), metric, 0.5, 3);
            assert!(matches.iter().any(|c| c.word == "машина"), "{metric}");
        }
    }

    #[test]
    fn test_parse_metric() {
        assert_eq!("jaro-winkler".parse::<Metric>().unwrap(), Metric::JaroWinkler);
        assert_eq!("Levenshtein".parse::<Metric>().unwrap(), Metric::Levenshtein);
        assert!("hamming".parse::<Metric>().is_err());
    }
}
