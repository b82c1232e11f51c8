//! Parameter estimation with add-one smoothing.

use crate::bow::Term;
use crate::dataset::Dataset;
use crate::model::WordLogProbs;
use crate::vocabulary::Vocabulary;

/// Computes the log prior of each label, in label order.
///
/// `ln((n_docs(label) + 1) / (n_docs + n_labels))`
pub fn log_priors(dataset: &Dataset) -> Vec<f64> {
    let denominator = (dataset.n_examples() + dataset.labels().len()) as f64;
    dataset
        .label_counts()
        .into_iter()
        .map(|count| (count as f64 + 1.0).ln() - denominator.ln())
        .collect()
}

/// Computes the log class-conditional probabilities of the `label_id`-th label.
///
/// For every vocabulary word and for the out-of-vocabulary bucket:
/// `ln((count(term, label) + 1) / (n_tokens(label) + vocab_size + 1))`.
///
/// Each label is normalized on its own; a label without documents gets the smoothing term
/// only. Words of the dataset missing from `vocab` are counted in the out-of-vocabulary
/// bucket.
pub fn word_log_probs(vocab: &Vocabulary, dataset: &Dataset, label_id: usize) -> WordLogProbs {
    let mut word_counts = vec![0usize; vocab.len()];
    let mut oov_count = 0;
    let mut n_tokens = 0;
    for example in dataset
        .examples()
        .iter()
        .filter(|example| example.label_id() == label_id)
    {
        for (term, count) in example.bag_of_words() {
            n_tokens += count;
            match term {
                Term::Word(word) => match vocab.id(word) {
                    Some(id) => word_counts[id] += count,
                    None => oov_count += count,
                },
                Term::OutOfVocabulary => oov_count += count,
            }
        }
    }
    let denominator = ((n_tokens + vocab.len() + 1) as f64).ln();
    WordLogProbs {
        words: word_counts
            .into_iter()
            .map(|count| (count as f64 + 1.0).ln() - denominator)
            .collect(),
        oov: (oov_count as f64 + 1.0).ln() - denominator,
    }
}
