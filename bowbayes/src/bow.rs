use std::collections::btree_map::{self, BTreeMap};
use std::io::Read;
use std::path::Path;

use crate::document;
use crate::errors::Result;
use crate::vocabulary::Vocabulary;

/// Key of a bag-of-words.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// A member of the vocabulary.
    Word(String),

    /// The bucket of all tokens outside the vocabulary.
    OutOfVocabulary,
}

impl Term {
    pub fn word<S>(word: S) -> Self
    where
        S: Into<String>,
    {
        Self::Word(word.into())
    }
}

/// Token counts of a single document.
///
/// Keys are vocabulary words or [`Term::OutOfVocabulary`]. Zero counts are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BagOfWords {
    counts: BTreeMap<Term, usize>,
}

impl BagOfWords {
    /// Counts tokens against a vocabulary.
    ///
    /// Empty tokens are ignored; tokens outside `vocab` are counted as out-of-vocabulary.
    pub fn from_tokens<I, S>(vocab: &Vocabulary, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = BTreeMap::new();
        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                continue;
            }
            let term = if vocab.contains(token) {
                Term::word(token)
            } else {
                Term::OutOfVocabulary
            };
            *counts.entry(term).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Reads a pre-tokenized document and counts its tokens.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error or the document is not valid UTF-8, an error variant
    /// will be returned.
    pub fn from_reader<R>(vocab: &Vocabulary, rdr: R) -> Result<Self>
    where
        R: Read,
    {
        Ok(Self::from_tokens(vocab, document::read_tokens(rdr)?))
    }

    /// Reads a pre-tokenized document file and counts its tokens.
    ///
    /// # Errors
    ///
    /// When the file is unreadable or is not valid UTF-8, an error variant will be returned.
    pub fn from_path<P>(vocab: &Vocabulary, path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Ok(Self::from_tokens(
            vocab,
            document::read_tokens_from_path(path)?,
        ))
    }

    /// Gets the count of a term. Absent terms count zero.
    pub fn get(&self, term: &Term) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn oov_count(&self) -> usize {
        self.get(&Term::OutOfVocabulary)
    }

    /// Gets the number of counted tokens.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Gets the number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates terms in ascending order; words come before the out-of-vocabulary bucket.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.counts.iter(),
        }
    }
}

pub struct Iter<'a> {
    inner: btree_map::Iter<'a, Term, usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Term, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(term, &count)| (term, count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a BagOfWords {
    type Item = (&'a Term, usize);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
