//! Turns an incoming chat message into a spelling reply.
//!
//! Words are looked up in Cyrillic. A Latin message is transliterated word by
//! word before the lookup and the finished reply is transliterated back, so the
//! user always reads the answer in the script they wrote in.

use crate::checker::{tokenizer, Lookup, Matcher};
use crate::script::translit::transliterate;
use crate::script::{is_cyrillic, Script};
use crate::Config;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

pub const CORRECT_MARK: &str = "✅";
pub const WRONG_MARK: &str = "❌";

/// Result of checking one word of a message.
#[derive(Debug, Clone, Serialize)]
pub struct WordReport {
    /// The token as it appeared in the message.
    pub original: String,
    /// The Cyrillic form that was looked up.
    pub word: String,
    #[serde(flatten)]
    pub lookup: Lookup,
}

/// Reply to a whole message, one report per checked word.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub script: Script,
    pub reports: Vec<WordReport>,
}

impl Reply {
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn misspelled(&self) -> usize {
        self.reports.iter().filter(|r| !r.lookup.available).count()
    }

    /// Reply lines in the message's own script.
    ///
    /// A known word is one `✅ Word` line. A misspelled word is a `❌ Word`
    /// line, a `✅ Suggestion` line per candidate and a blank separator line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for (i, report) in self.reports.iter().enumerate() {
            if report.lookup.available {
                lines.push(format!("{CORRECT_MARK} {}", capitalize(&report.word)));
                continue;
            }

            lines.push(format!("{WRONG_MARK} {}", capitalize(&report.word)));
            for suggestion in &report.lookup.matches {
                lines.push(format!("{CORRECT_MARK} {}", capitalize(suggestion)));
            }
            if i + 1 < self.reports.len() {
                lines.push(String::new());
            }
        }

        if self.script == Script::Latin {
            for line in &mut lines {
                if is_cyrillic(line) {
                    *line = transliterate(line, Script::Latin);
                }
            }
        }

        lines
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Coordinates tokenizing, transliteration and dictionary lookups for a message.
pub struct Orchestrator {
    matcher: Matcher,
    ignore_patterns: Vec<Regex>,
}

impl Orchestrator {
    pub fn new(matcher: Matcher, config: &Config) -> Self {
        // Compile ignore patterns
        let mut ignore_patterns = Vec::new();
        for pattern in &config.ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => ignore_patterns.push(re),
                Err(e) => warn!(%pattern, error = %e, "skipping invalid ignore pattern"),
            }
        }

        Self {
            matcher,
            ignore_patterns,
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Answer a message: a greeting for `/start`, a spelling reply otherwise.
    /// Returns `None` when there is nothing to say.
    pub fn respond(&self, message: &str, user_name: &str) -> Option<String> {
        let message = message.trim();
        if message == "/start" || message.starts_with("/start ") {
            info!(user = %user_name, "start command");
            return Some(greeting(user_name));
        }

        let reply = self.reply(message);
        if reply.is_empty() {
            None
        } else {
            Some(reply.to_string())
        }
    }

    /// Check every word of `message` and assemble the reply.
    pub fn reply(&self, message: &str) -> Reply {
        let script = Script::detect(message);

        let reports: Vec<WordReport> = tokenizer::words(message)
            .into_iter()
            .filter(|token| !self.should_ignore(token))
            .map(|token| {
                let word = match script {
                    Script::Cyrillic => token.to_string(),
                    Script::Latin => transliterate(token, Script::Cyrillic),
                };
                let lookup = self.matcher.check(&word);
                WordReport {
                    original: token.to_string(),
                    word,
                    lookup,
                }
            })
            .collect();

        let reply = Reply { script, reports };
        info!(
            %script,
            words = reply.reports.len(),
            misspelled = reply.misspelled(),
            "checked message"
        );
        reply
    }

    fn should_ignore(&self, token: &str) -> bool {
        if tokenizer::is_number(token) {
            return true;
        }

        let ignored = self.ignore_patterns.iter().any(|re| re.is_match(token));
        if ignored {
            debug!(%token, "ignored by pattern");
        }
        ignored
    }
}

/// Greeting for a user starting the conversation, in the script of their name.
pub fn greeting(user_name: &str) -> String {
    match Script::detect(user_name) {
        Script::Cyrillic => format!("Салом, {user_name}!"),
        Script::Latin => format!("Salom, {user_name}!"),
    }
}

/// Upper-case the first letter and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::Dictionary;

    fn orchestrator() -> Orchestrator {
        let config = Config::default();
        let matcher = Matcher::new(Dictionary::embedded().unwrap(), &config);
        Orchestrator::new(matcher, &config)
    }

    #[test]
    fn test_cyrillic_message() {
        let reply = orchestrator().reply("Салом, дунё!");
        assert_eq!(reply.script, Script::Cyrillic);
        assert_eq!(reply.to_string(), "✅ Салом\n✅ Дунё");
        assert_eq!(reply.misspelled(), 0);
    }

    #[test]
    fn test_misspelled_word_lists_suggestions() {
        let reply = orchestrator().reply("мошина");
        let lines = reply.lines();
        assert_eq!(lines[0], "❌ Мошина");
        assert!(lines.contains(&"✅ Машина".to_string()));
        assert_eq!(reply.misspelled(), 1);
    }

    #[test]
    fn test_blank_line_between_blocks() {
        let reply = orchestrator().reply("мошина китоб");
        let lines = reply.lines();
        assert!(lines.contains(&String::new()));
        assert_eq!(lines.last().map(String::as_str), Some("✅ Китоб"));
    }

    #[test]
    fn test_latin_message_answered_in_latin() {
        let reply = orchestrator().reply("o'zbek hayot mashina");
        assert_eq!(reply.script, Script::Latin);
        assert_eq!(reply.reports[0].word, "ўзбек");
        assert_eq!(reply.to_string(), "✅ O'zbek\n✅ Hayot\n✅ Mashina");
    }

    #[test]
    fn test_latin_misspelling() {
        let reply = orchestrator().reply("moshina");
        let text = reply.to_string();
        assert!(text.starts_with("❌ Moshina"));
        assert!(text.contains("✅ Mashina"));
        assert!(!is_cyrillic(&text));
    }

    #[test]
    fn test_ignored_tokens() {
        let reply = orchestrator().reply("2024 https://example.com китоб");
        assert_eq!(reply.reports.len(), 1);
        assert_eq!(reply.reports[0].word, "китоб");
    }

    #[test]
    fn test_respond() {
        let bot = orchestrator();
        assert_eq!(bot.respond("/start", "Aziz").as_deref(), Some("Salom, Aziz!"));
        assert_eq!(bot.respond("   ", "Aziz"), None);
        assert_eq!(bot.respond("?!", "Aziz"), None);
        assert_eq!(bot.respond("китоб", "Aziz").as_deref(), Some("✅ Китоб"));
    }

    #[test]
    fn test_greeting_follows_name_script() {
        assert_eq!(greeting("Aziz"), "Salom, Aziz!");
        assert_eq!(greeting("Азиз"), "Салом, Азиз!");
        assert_eq!(orchestrator().respond("/start", "Азиз").as_deref(), Some("Салом, Азиз!"));
    }

    #[test]
    fn test_latin_yo_apostrophe_word() {
        let reply = orchestrator().reply("yo'l yo'q");
        assert_eq!(reply.reports[0].word, "йўл");
        assert_eq!(reply.reports[1].word, "йўқ");
        assert_eq!(reply.to_string(), "✅ Yo'l\n✅ Yo'q");
    }

    #[test]
    fn test_cyrillic_message_with_number_and_dash() {
        let reply = orchestrator().reply("Салом — дунё");
        assert_eq!(reply.script, Script::Cyrillic);
        assert_eq!(reply.to_string(), "✅ Салом\n✅ Дунё");

        let reply = orchestrator().reply("2024 йил");
        assert_eq!(reply.script, Script::Cyrillic);
        assert_eq!(reply.to_string(), "✅ Йил");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("ўзбек"), "Ўзбек");
        assert_eq!(capitalize("КИТОБ"), "Китоб");
        assert_eq!(capitalize(""), "");
    }
}
