pub mod chat;
pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod script;

pub use chat::{Orchestrator, Reply, WordReport};
pub use checker::{Lookup, Matcher};
pub use config::Config;
pub use script::translit::transliterate;
pub use script::{is_cyrillic, is_latin, Script};
