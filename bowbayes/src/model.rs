use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::bow::Term;
use crate::dataset;
use crate::errors::{BowBayesError, Result};
use crate::vocabulary::Vocabulary;

const MODEL_MAGIC: &[u8] = b"BOWBAYES\x01";

/// Log class-conditional probabilities of one label.
///
/// Values are aligned with the vocabulary order; the out-of-vocabulary bucket is stored
/// separately.
#[derive(Clone, Debug, PartialEq, Decode, Encode)]
pub struct WordLogProbs {
    pub(crate) words: Vec<f64>,
    pub(crate) oov: f64,
}

impl WordLogProbs {
    /// Gets the log probability of the `id`-th vocabulary word.
    pub fn get(&self, id: usize) -> Option<f64> {
        self.words.get(id).copied()
    }

    /// Gets the log probability of the out-of-vocabulary bucket.
    pub fn oov(&self) -> f64 {
        self.oov
    }

    /// Iterates the log probabilities of the vocabulary words, in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.words.iter().copied()
    }
}

/// Model data.
#[derive(Clone, Debug, PartialEq, Decode, Encode)]
pub struct Model {
    pub(crate) vocabulary: Vocabulary,
    pub(crate) labels: Vec<String>,
    pub(crate) log_priors: Vec<f64>,
    pub(crate) word_log_probs: Vec<WordLogProbs>,
}

impl Model {
    /// Exports the model data.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        bincode::encode_into_std_write(self, wtr, bincode::config::standard())?;
        Ok(())
    }

    /// Creates a model from a reader.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Returns
    ///
    /// A model data read from `rdr`.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    /// [`BowBayesError::InvalidModel`] will be returned if the data is not a valid model.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0; MODEL_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if magic.as_slice() != MODEL_MAGIC {
            return Err(BowBayesError::invalid_model("unknown model format"));
        }
        let model: Self = bincode::decode_from_std_read(rdr, bincode::config::standard())?;
        model.verify()?;
        Ok(model)
    }

    fn verify(&self) -> Result<()> {
        if !self.vocabulary.is_sorted_set() {
            return Err(BowBayesError::invalid_model(
                "vocabulary is not sorted or contains duplicates",
            ));
        }
        dataset::check_labels(&self.labels)
            .map_err(|e| BowBayesError::invalid_model(e.to_string()))?;
        if self.log_priors.len() != self.labels.len()
            || self.word_log_probs.len() != self.labels.len()
        {
            return Err(BowBayesError::invalid_model(
                "the number of parameters does not match the number of labels",
            ));
        }
        if self
            .word_log_probs
            .iter()
            .any(|probs| probs.words.len() != self.vocabulary.len())
        {
            return Err(BowBayesError::invalid_model(
                "the number of word parameters does not match the vocabulary size",
            ));
        }
        Ok(())
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Gets the labels in model order. Exact ties are broken toward later labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_id(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn log_prior(&self, label: &str) -> Option<f64> {
        self.label_id(label).map(|id| self.log_priors[id])
    }

    /// Iterates `(label, log prior)` pairs in model order.
    pub fn log_priors(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.log_priors.iter().copied())
    }

    pub fn word_log_probs(&self, label: &str) -> Option<&WordLogProbs> {
        self.label_id(label).map(|id| &self.word_log_probs[id])
    }

    /// Gets the log probability of a term given the `label_id`-th label.
    ///
    /// Returns `None` for words outside the vocabulary.
    pub(crate) fn term_log_prob(&self, label_id: usize, term: &Term) -> Option<f64> {
        let probs = &self.word_log_probs[label_id];
        match term {
            Term::Word(word) => self.vocabulary.id(word).and_then(|id| probs.get(id)),
            Term::OutOfVocabulary => Some(probs.oov),
        }
    }
}
