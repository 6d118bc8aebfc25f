use anyhow::{Context, Result};
use fst::{IntoStreamer, Set, SetBuilder, Streamer};
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

const EMBEDDED_WORDS: &str = include_str!("../../data/uzwords.txt");

/// Bytes behind the FST: built in memory or mapped from a prebuilt file.
enum Backing {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl AsRef<[u8]> for Backing {
    fn as_ref(&self) -> &[u8] {
        match self {
            Backing::Owned(bytes) => bytes.as_slice(),
            Backing::Mapped(mmap) => &mmap[..],
        }
    }
}

/// Immutable set of known-correct words, lower-case Cyrillic.
pub struct Dictionary {
    set: Set<Backing>,
}

impl Dictionary {
    /// The Uzbek word list compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_words(parse_word_list(EMBEDDED_WORDS))
    }

    /// Build a dictionary from arbitrary words; they are trimmed, lower-cased
    /// and de-duplicated first.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted_words = normalize(words);

        let mut builder = SetBuilder::memory();
        for word in &sorted_words {
            builder
                .insert(word.as_bytes())
                .context("Failed to insert word into dictionary")?;
        }
        let bytes = builder.into_inner().context("Failed to finalize dictionary")?;
        let set = Set::new(Backing::Owned(bytes)).context("Failed to parse dictionary")?;

        debug!(words = set.len(), "built in-memory dictionary");
        Ok(Self { set })
    }

    /// Load a dictionary from disk.
    ///
    /// Files with an `.fst` extension are memory-mapped as prebuilt sets (see
    /// [`Dictionary::build_from_words`]); anything else is read as a plain word
    /// list, one word per line.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.extension().and_then(|e| e.to_str()) == Some("fst") {
            let file = File::open(path)
                .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
            // SAFETY: the mapping is read-only and the file is not modified while loaded.
            let mmap = unsafe { Mmap::map(&file) }
                .with_context(|| format!("Failed to map dictionary: {}", path.display()))?;
            let set = Set::new(Backing::Mapped(mmap))
                .with_context(|| format!("Failed to parse dictionary: {}", path.display()))?;

            debug!(path = %path.display(), words = set.len(), "mapped prebuilt dictionary");
            return Ok(Self { set });
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list: {}", path.display()))?;
        Self::from_words(parse_word_list(&content))
    }

    /// Check if word exists in dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Visit every word in lexicographic order.
    pub fn for_each_word<F>(&self, mut f: F)
    where
        F: FnMut(&str),
    {
        let mut stream = self.set.stream();
        while let Some(key) = stream.next() {
            if let Ok(word) = std::str::from_utf8(key) {
                f(word);
            }
        }
    }

    /// Get all words with a given prefix
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        use fst::Automaton;

        let mut results = Vec::new();
        let mut stream = self
            .set
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                results.push(word);
            }
        }

        results
    }

    /// Compile a word list into an `.fst` file loadable by [`Dictionary::load_from_path`].
    /// Returns the number of distinct words written.
    pub fn build_from_words(words: &[String], output_path: &Path) -> Result<usize> {
        let sorted_words = normalize(words);

        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;

        let writer = BufWriter::new(file);
        let mut builder = SetBuilder::new(writer).context("Failed to create FST builder")?;

        for word in &sorted_words {
            builder
                .insert(word.as_bytes())
                .context("Failed to insert word into dictionary")?;
        }

        builder.finish().context("Failed to finalize dictionary")?;

        Ok(sorted_words.len())
    }
}

/// Trim, lower-case, sort and de-duplicate words into FST insertion order.
fn normalize<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted_words: Vec<String> = words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();
    sorted_words.sort();
    sorted_words.dedup();
    sorted_words
}

/// Split a word file into entries, skipping blank lines and `#` comments.
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}
