use crate::bow::BagOfWords;
use crate::errors::{BowBayesError, Result};

/// Checks that a label set is non-empty and has no empty or duplicate labels.
pub(crate) fn check_labels(labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        return Err(BowBayesError::invalid_argument("labels", "is empty"));
    }
    for (i, label) in labels.iter().enumerate() {
        if label.is_empty() {
            return Err(BowBayesError::invalid_argument(
                "labels",
                "contains an empty label",
            ));
        }
        if labels[..i].contains(label) {
            return Err(BowBayesError::invalid_argument(
                "labels",
                format!("contains a duplicate label: {label}"),
            ));
        }
    }
    Ok(())
}

/// A labeled document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainingExample {
    label_id: usize,
    bow: BagOfWords,
}

impl TrainingExample {
    /// Gets the position of the label in the label set of the dataset.
    pub fn label_id(&self) -> usize {
        self.label_id
    }

    pub fn bag_of_words(&self) -> &BagOfWords {
        &self.bow
    }
}

/// Training examples over a fixed label set.
///
/// # Examples
///
/// ```
/// use bowbayes::{BagOfWords, Dataset, Vocabulary};
///
/// let vocab = Vocabulary::new(["vote"]);
/// let mut dataset = Dataset::new(["2016", "2020"]).unwrap();
/// dataset
///     .push_example("2016", BagOfWords::from_tokens(&vocab, ["vote"]))
///     .unwrap();
///
/// assert_eq!(vec![1, 0], dataset.label_counts());
/// assert!(dataset.push_example("2024", BagOfWords::default()).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Dataset {
    labels: Vec<String>,
    examples: Vec<TrainingExample>,
}

impl Dataset {
    /// Creates an empty dataset.
    ///
    /// # Errors
    ///
    /// [`BowBayesError::InvalidArgument`] will be returned if `labels` is empty, contains an
    /// empty label or contains duplicates.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        check_labels(&labels)?;
        Ok(Self {
            labels,
            examples: vec![],
        })
    }

    /// Adds a labeled bag-of-words.
    ///
    /// # Errors
    ///
    /// [`BowBayesError::InvalidArgument`] will be returned if `label` is not in the label set.
    pub fn push_example(&mut self, label: &str, bow: BagOfWords) -> Result<()> {
        let label_id = self.label_id(label).ok_or_else(|| {
            BowBayesError::invalid_argument("label", format!("unknown label: {label}"))
        })?;
        self.examples.push(TrainingExample { label_id, bow });
        Ok(())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_id(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn n_examples(&self) -> usize {
        self.examples.len()
    }

    /// Gets the number of examples of each label, in label order.
    pub fn label_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.labels.len()];
        for example in &self.examples {
            counts[example.label_id] += 1;
        }
        counts
    }

    pub(crate) fn into_labels(self) -> Vec<String> {
        self.labels
    }
}
