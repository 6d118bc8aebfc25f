pub mod translit;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use unicode_script::{Script as UScript, UnicodeScript};

/// Writing system used to render a piece of Uzbek text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Cyrillic,
    Latin,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown script '{0}', expected 'cyrillic' or 'latin'")]
pub struct ParseScriptError(String);

impl Script {
    /// Detect the script a whole message is written in.
    ///
    /// A message counts as Cyrillic when every whitespace-separated token that
    /// holds a letter carries at least one Cyrillic letter. Numbers and
    /// punctuation do not vote. A message without letters is treated as Latin.
    pub fn detect(text: &str) -> Self {
        let mut words = text
            .split_whitespace()
            .filter(|token| token.chars().any(char::is_alphabetic))
            .peekable();
        if words.peek().is_none() {
            return Script::Latin;
        }

        if words.all(is_cyrillic) {
            Script::Cyrillic
        } else {
            Script::Latin
        }
    }
}

impl FromStr for Script {
    type Err = ParseScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cyrillic" | "cyr" => Ok(Script::Cyrillic),
            "latin" | "lat" => Ok(Script::Latin),
            _ => Err(ParseScriptError(s.to_string())),
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Script::Cyrillic => write!(f, "cyrillic"),
            Script::Latin => write!(f, "latin"),
        }
    }
}

/// Whether the text contains at least one Cyrillic letter.
pub fn is_cyrillic(text: &str) -> bool {
    has_letter_of(text, UScript::Cyrillic)
}

/// Whether the text contains at least one Latin letter.
pub fn is_latin(text: &str) -> bool {
    has_letter_of(text, UScript::Latin)
}

fn has_letter_of(text: &str, script: UScript) -> bool {
    text.chars()
        .any(|c| c.is_alphabetic() && c.script() == script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier() {
        assert!(is_cyrillic("тест"));
        assert!(!is_latin("тест"));
        assert!(!is_cyrillic("test"));
        assert!(is_latin("test"));
        assert!(is_cyrillic("тестtest"));
        assert!(is_latin("тестtest"));
    }

    #[test]
    fn test_empty_and_punctuation() {
        assert!(!is_cyrillic(""));
        assert!(!is_latin(""));
        assert!(!is_cyrillic("!?., 123"));
        assert!(!is_latin("!?., 123"));
    }

    #[test]
    fn test_uzbek_specific_letters() {
        assert!(is_cyrillic("ўқғҳ"));
        assert!(is_cyrillic("Ҳ"));
        assert!(!is_latin("ўқғҳ"));
    }

    #[test]
    fn test_detect_message_script() {
        assert_eq!(Script::detect("салом дунё"), Script::Cyrillic);
        assert_eq!(Script::detect("salom dunyo"), Script::Latin);
        // one Latin token is enough to flip the message
        assert_eq!(Script::detect("салом dunyo"), Script::Latin);
        assert_eq!(Script::detect("   "), Script::Latin);
        assert_eq!(Script::detect("2024 !!"), Script::Latin);
    }

    #[test]
    fn test_detect_ignores_numbers_and_punctuation() {
        assert_eq!(Script::detect("2024 йил"), Script::Cyrillic);
        assert_eq!(Script::detect("Салом — дунё"), Script::Cyrillic);
        assert_eq!(Script::detect("Salom — dunyo 2024"), Script::Latin);
    }

    #[test]
    fn test_parse_script() {
        assert_eq!("Cyrillic".parse::<Script>().unwrap(), Script::Cyrillic);
        assert_eq!("lat".parse::<Script>().unwrap(), Script::Latin);
        assert!("greek".parse::<Script>().is_err());
        assert_eq!(Script::Latin.to_string(), "latin");
    }
}
