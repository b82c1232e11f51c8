use std::io::Read;
use std::path::Path;

use crate::bow::BagOfWords;
use crate::errors::Result;
use crate::model::Model;

/// Result of a classification.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    labels: Vec<String>,
    log_posteriors: Vec<f64>,
    predicted: usize,
    bow: BagOfWords,
}

impl Classification {
    /// Gets the label with the greatest log posterior.
    pub fn predicted_label(&self) -> &str {
        &self.labels[self.predicted]
    }

    /// Gets the position of the predicted label in the model's label order.
    pub fn predicted_label_id(&self) -> usize {
        self.predicted
    }

    /// Gets the unnormalized log posterior of a label.
    pub fn log_posterior(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|id| self.log_posteriors[id])
    }

    /// Iterates `(label, log posterior)` pairs in model order.
    pub fn log_posteriors(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.log_posteriors.iter().copied())
    }

    /// Gets the bag-of-words of the classified document.
    pub fn bag_of_words(&self) -> &BagOfWords {
        &self.bow
    }

    pub fn into_bag_of_words(self) -> BagOfWords {
        self.bow
    }
}

/// Classifier.
///
/// The log posterior of each label is its log prior plus the count-weighted sum of the log
/// probabilities of the document's terms. Labels are compared in model order and a later label
/// wins an exact tie.
///
/// # Examples
///
/// ```no_run
/// use bowbayes::{Classifier, Trainer};
///
/// let model = Trainer::new(1).train_dir("corpus/train").unwrap();
/// let classifier = Classifier::new(model);
///
/// let result = classifier.classify_path("corpus/test/2016/0001.txt").unwrap();
/// println!("{}", result.predicted_label());
/// ```
pub struct Classifier {
    model: Model,
}

impl Classifier {
    /// Creates a new classifier.
    ///
    /// # Arguments
    ///
    /// * `model` - A trained model.
    ///
    /// # Returns
    ///
    /// A new classifier.
    pub fn new(model: Model) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Classifies a bag-of-words.
    ///
    /// Words outside the model's vocabulary contribute nothing.
    pub fn classify(&self, bow: BagOfWords) -> Classification {
        let mut log_posteriors = Vec::with_capacity(self.model.labels.len());
        let mut predicted = 0;
        for (label_id, &log_prior) in self.model.log_priors.iter().enumerate() {
            let mut score = log_prior;
            for (term, count) in &bow {
                if let Some(log_prob) = self.model.term_log_prob(label_id, term) {
                    score += log_prob * count as f64;
                }
            }
            if label_id == 0 || score >= log_posteriors[predicted] {
                predicted = label_id;
            }
            log_posteriors.push(score);
        }
        Classification {
            labels: self.model.labels.clone(),
            log_posteriors,
            predicted,
            bow,
        }
    }

    /// Classifies a tokenized document.
    pub fn classify_tokens<I, S>(&self, tokens: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.classify(BagOfWords::from_tokens(&self.model.vocabulary, tokens))
    }

    /// Reads a pre-tokenized document and classifies it.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error or the document is not valid UTF-8, an error variant
    /// will be returned.
    pub fn classify_reader<R>(&self, rdr: R) -> Result<Classification>
    where
        R: Read,
    {
        Ok(self.classify(BagOfWords::from_reader(&self.model.vocabulary, rdr)?))
    }

    /// Reads a pre-tokenized document file and classifies it.
    ///
    /// # Errors
    ///
    /// When the file is unreadable or is not valid UTF-8, an error variant will be returned.
    pub fn classify_path<P>(&self, path: P) -> Result<Classification>
    where
        P: AsRef<Path>,
    {
        Ok(self.classify(BagOfWords::from_path(&self.model.vocabulary, path)?))
    }
}
