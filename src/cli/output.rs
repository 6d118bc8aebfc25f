use crate::chat::{Reply, CORRECT_MARK, WRONG_MARK};
use crate::script::Script;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    total_words: usize,
    misspelled: usize,
    #[serde(flatten)]
    reply: &'a Reply,
}

pub fn print_reply(reply: &Reply, colored_output: bool, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print_text_reply(reply, colored_output);
            Ok(())
        }
        OutputFormat::Json => print_json_reply(reply),
    }
}

fn print_text_reply(reply: &Reply, colored_output: bool) {
    for line in reply.lines() {
        println!("{}", paint_line(&line, colored_output));
    }
}

fn print_json_reply(reply: &Reply) -> Result<()> {
    let output = JsonOutput {
        total_words: reply.reports.len(),
        misspelled: reply.misspelled(),
        reply,
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize reply")?;
    println!("{}", json);
    Ok(())
}

/// Color a reply line by its leading mark.
pub fn paint_line(line: &str, colored_output: bool) -> String {
    if !colored_output {
        return line.to_string();
    }

    if let Some(word) = line.strip_prefix(WRONG_MARK) {
        format!("{}{}", WRONG_MARK, word.red().bold())
    } else if let Some(word) = line.strip_prefix(CORRECT_MARK) {
        format!("{}{}", CORRECT_MARK, word.green())
    } else {
        line.to_string()
    }
}

pub fn print_check_summary(misspelled: usize, total_words: usize, script: Script, colored: bool) {
    println!();
    if misspelled == 0 {
        let message = format!("✓ No spelling errors found ({} {})", total_words, plural(total_words, "word"));
        if colored {
            println!("{}", message.green().bold());
        } else {
            println!("{}", message);
        }
        return;
    }

    let error_word = plural(misspelled, "misspelling");
    if colored {
        println!(
            "{} {} {} in {} {} ({})",
            "✗".red().bold(),
            misspelled.to_string().red().bold(),
            error_word,
            total_words,
            plural(total_words, "word"),
            script.to_string().dimmed()
        );
    } else {
        println!(
            "✗ {} {} in {} {} ({})",
            misspelled,
            error_word,
            total_words,
            plural(total_words, "word"),
            script
        );
    }
}

pub fn print_script_verdict(text: &str, cyrillic: bool, latin: bool, colored: bool) {
    let mark = |yes: bool| {
        match (yes, colored) {
            (true, true) => "yes".green().to_string(),
            (false, true) => "no".red().to_string(),
            (true, false) => "yes".to_string(),
            (false, false) => "no".to_string(),
        }
    };

    let detected = Script::detect(text);
    println!("cyrillic: {}", mark(cyrillic));
    println!("latin:    {}", mark(latin));
    if colored {
        println!("message:  {}", detected.to_string().cyan().bold());
    } else {
        println!("message:  {}", detected);
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}
