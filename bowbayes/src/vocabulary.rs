use std::path::Path;

use bincode::{Decode, Encode};
use hashbrown::HashMap;

use crate::document;
use crate::errors::Result;

/// A sorted set of tokens tracked individually by a model.
///
/// Tokens that are not members of the vocabulary are counted as out-of-vocabulary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Decode, Encode)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Creates a vocabulary from arbitrary words.
    ///
    /// The words are sorted and duplicates are removed.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words.into_iter().map(Into::into).collect();
        words.sort_unstable();
        words.dedup();
        Self { words }
    }

    /// Gets the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Gets the position of the word in the vocabulary.
    pub fn id(&self, word: &str) -> Option<usize> {
        self.words
            .binary_search_by(|probe| probe.as_str().cmp(word))
            .ok()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.id(word).is_some()
    }

    pub fn get(&self, id: usize) -> Option<&str> {
        self.words.get(id).map(String::as_str)
    }

    /// Iterates the words in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    pub(crate) fn is_sorted_set(&self) -> bool {
        self.words.windows(2).all(|w| w[0] < w[1])
    }
}

/// Vocabulary builder.
///
/// Every occurrence of a token increments its counter, so a token repeated within one
/// document is counted more than once.
///
/// # Examples
///
/// ```
/// use bowbayes::VocabularyBuilder;
///
/// let mut builder = VocabularyBuilder::new();
/// builder.push_tokens(["vote", "senate", "vote"]);
/// builder.push_tokens(["ballot"]);
///
/// let vocab = builder.build(2);
/// assert_eq!(vec!["vote"], vocab.iter().collect::<Vec<_>>());
/// ```
#[derive(Default)]
pub struct VocabularyBuilder {
    counts: HashMap<String, usize>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts tokens of a document.
    ///
    /// Empty tokens are ignored.
    pub fn push_tokens<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                continue;
            }
            if let Some(count) = self.counts.get_mut(token) {
                *count += 1;
            } else {
                self.counts.insert(token.to_string(), 1);
            }
        }
    }

    /// Reads a document file and counts its tokens.
    ///
    /// # Errors
    ///
    /// When the file is unreadable or is not valid UTF-8, an error variant will be returned.
    pub fn push_document<P>(&mut self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let tokens = document::read_tokens_from_path(path)?;
        self.push_tokens(tokens);
        Ok(())
    }

    /// Gets the number of distinct tokens seen so far.
    pub fn n_distinct(&self) -> usize {
        self.counts.len()
    }

    /// Gets the occurrence count of a token.
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Builds a vocabulary of tokens occurring at least `cutoff` times.
    pub fn build(self, cutoff: usize) -> Vocabulary {
        let mut words: Vec<String> = self
            .counts
            .into_iter()
            .filter(|&(_, count)| count >= cutoff)
            .map(|(word, _)| word)
            .collect();
        words.sort_unstable();
        Vocabulary { words }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> VocabularyBuilder {
        let mut builder = VocabularyBuilder::new();
        builder.push_tokens(["tax", "vote", "wall", "vote", "", "vote"]);
        builder.push_tokens(["wall", "pandemic", "tax"]);
        builder.push_tokens(Vec::<String>::new());
        builder
    }

    #[test]
    fn test_vocabulary_new_sorts_and_dedups() {
        let vocab = Vocabulary::new(["b", "a", "c", "a"]);

        assert_eq!(vec!["a", "b", "c"], vocab.iter().collect::<Vec<_>>());
        assert_eq!(Some(1), vocab.id("b"));
        assert_eq!(None, vocab.id("d"));
        assert_eq!(Some("c"), vocab.get(2));
        assert!(vocab.is_sorted_set());
    }

    #[test]
    fn test_builder_counts_occurrences() {
        let builder = builder();

        assert_eq!(4, builder.n_distinct());
        assert_eq!(3, builder.count("vote"));
        assert_eq!(2, builder.count("tax"));
        assert_eq!(1, builder.count("pandemic"));
        assert_eq!(0, builder.count(""));
    }

    #[test]
    fn test_build_cutoff_one() {
        let vocab = builder().build(1);

        assert_eq!(
            vec!["pandemic", "tax", "vote", "wall"],
            vocab.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_build_cutoff_zero_keeps_everything() {
        assert_eq!(builder().build(1), builder().build(0));
    }

    #[test]
    fn test_build_cutoff_filters() {
        let vocab = builder().build(2);

        assert_eq!(vec!["tax", "vote", "wall"], vocab.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_build_cutoff_too_high() {
        let vocab = builder().build(4);

        assert!(vocab.is_empty());
        assert!(!vocab.contains("vote"));
    }

    #[test]
    fn test_build_monotonic() {
        let mut prev = builder().build(0);
        for cutoff in 1..5 {
            let vocab = builder().build(cutoff);
            assert!(vocab.is_sorted_set());
            assert!(vocab.iter().all(|w| prev.contains(w)));
            prev = vocab;
        }
    }

    #[test]
    fn test_push_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "vote\n\nvote\nballot\n").unwrap();

        let mut builder = VocabularyBuilder::new();
        builder.push_document(&path).unwrap();

        assert_eq!(2, builder.count("vote"));
        assert_eq!(1, builder.count("ballot"));
        assert_eq!(2, builder.n_distinct());
    }
}
