// Message tokenization: whitespace split plus edge-punctuation trimming.

use crate::script::translit::APOSTROPHES;
use unicode_segmentation::UnicodeSegmentation;

/// Split a chat message into checkable words.
///
/// Tokens are separated by whitespace and stripped of surrounding punctuation.
/// A trailing apostrophe survives after `o`/`g` since it belongs to the Latin
/// letters `o'` and `g'`. Tokens left empty are dropped.
pub fn words(message: &str) -> Vec<&str> {
    message
        .split_whitespace()
        .map(trim_token)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Whether the token is made of digits only (e.g. "2024").
pub fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_numeric())
}

fn trim_token(token: &str) -> &str {
    let graphemes: Vec<(usize, &str)> = token.grapheme_indices(true).collect();

    let Some(start) = graphemes.iter().position(|(_, g)| starts_alphanumeric(g)) else {
        return "";
    };

    let mut end = start;
    for (i, (_, grapheme)) in graphemes.iter().enumerate().skip(start) {
        if starts_alphanumeric(grapheme) {
            end = i;
        } else if is_apostrophe(grapheme) && i == end + 1 && closes_latin_letter(graphemes[end].1) {
            end = i;
        }
    }

    let from = graphemes[start].0;
    let (last_offset, last) = graphemes[end];
    &token[from..last_offset + last.len()]
}

fn starts_alphanumeric(grapheme: &str) -> bool {
    grapheme.chars().next().is_some_and(char::is_alphanumeric) && !is_apostrophe(grapheme)
}

fn is_apostrophe(grapheme: &str) -> bool {
    grapheme.chars().next().is_some_and(|c| APOSTROPHES.contains(&c))
}

fn closes_latin_letter(grapheme: &str) -> bool {
    matches!(grapheme, "o" | "O" | "g" | "G")
}
