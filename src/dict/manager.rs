use crate::checker::dictionary::{parse_word_list, Dictionary};
use crate::Config;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Compile a plain word list into a prebuilt `.fst` dictionary.
/// Without an explicit output the result sits next to the input as `<name>.fst`.
pub fn build_dictionary(input: &Path, output: Option<&Path>, colored: bool) -> Result<PathBuf> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read word list: {}", input.display()))?;

    let words = parse_word_list(&content);
    if words.is_empty() {
        anyhow::bail!("Word list {} contains no words", input.display());
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("fst"));
    if output == input {
        anyhow::bail!("Refusing to overwrite the input word list: {}", input.display());
    }

    let written = Dictionary::build_from_words(&words, &output)?;
    info!(input = %input.display(), output = %output.display(), words = written, "dictionary built");

    if colored {
        println!(
            "{} Dictionary built: {} ({} words)",
            "✓".green().bold(),
            output.display().to_string().cyan(),
            written.to_string().yellow()
        );
    } else {
        println!("✓ Dictionary built: {} ({} words)", output.display(), written);
    }

    Ok(output)
}

pub fn show_info(config: &Config, dictionary: &Dictionary, colored: bool) {
    let source = config
        .word_list
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "embedded".to_string());

    let format = match config.word_list.as_ref().and_then(|p| p.extension()) {
        Some(ext) if ext == "fst" => "FST (Finite State Transducer)",
        Some(_) => "Plain word list",
        None => "Embedded word list",
    };

    if colored {
        println!("{}", "Dictionary".bold());
    } else {
        println!("Dictionary");
    }
    println!("  Source: {}", source);
    println!("  Format: {}", format);
    println!("  Words: {}", dictionary.len());
    println!("  Metric: {}", config.metric);
    println!("  Cutoff: {}", config.cutoff);
    println!("  Max suggestions: {}", config.max_suggestions);
    if let Some(path) = Config::global_config_path() {
        println!("  Global config: {}", path.display());
    }
}

/// Print dictionary words, optionally only those starting with `prefix`.
/// Returns how many were printed.
pub fn list_words(dictionary: &Dictionary, prefix: Option<&str>) -> usize {
    match prefix {
        Some(prefix) => {
            let words = dictionary.words_with_prefix(&prefix.to_lowercase());
            for word in &words {
                println!("{}", word);
            }
            words.len()
        }
        None => {
            let mut count = 0;
            dictionary.for_each_word(|word| {
                println!("{}", word);
                count += 1;
            });
            count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_dictionary_default_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("words.txt");
        fs::write(&input, "салом\nдунё\n").unwrap();

        let output = build_dictionary(&input, None, false).unwrap();
        assert_eq!(output, dir.path().join("words.fst"));

        let dict = Dictionary::load_from_path(&output).unwrap();
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_build_dictionary_rejects_empty_list() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        fs::write(&input, "# nothing here\n\n").unwrap();

        assert!(build_dictionary(&input, None, false).is_err());
    }

    #[test]
    fn test_list_words_with_prefix() {
        let dict = Dictionary::from_words(["китоб", "китобхона", "қалам"]).unwrap();
        assert_eq!(list_words(&dict, Some("КИТ")), 2);
        assert_eq!(list_words(&dict, None), 3);
    }
}
