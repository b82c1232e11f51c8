use std::path::Path;

use tracing::{debug, info};

use crate::bow::BagOfWords;
use crate::corpus::Corpus;
use crate::dataset::Dataset;
use crate::errors::Result;
use crate::estimator;
use crate::model::Model;
use crate::vocabulary::{Vocabulary, VocabularyBuilder};

/// Trainer.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
/// use std::io::BufWriter;
///
/// use bowbayes::Trainer;
///
/// let model = Trainer::new(2)
///     .labels(["2016", "2020"])
///     .train_dir("corpus/train")
///     .unwrap();
///
/// let mut f = BufWriter::new(File::create("model.bin").unwrap());
/// model.write(&mut f).unwrap();
/// ```
pub struct Trainer {
    cutoff: usize,
    labels: Option<Vec<String>>,
}

impl Trainer {
    /// Creates a new trainer.
    ///
    /// # Arguments
    ///
    /// * `cutoff` - Tokens occurring fewer times than this value in the whole corpus are
    ///              treated as out-of-vocabulary.
    pub fn new(cutoff: usize) -> Self {
        Self {
            cutoff,
            labels: None,
        }
    }

    /// Restricts training to the given labels.
    ///
    /// By default, every subdirectory of the corpus is a label.
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Trains a model from a corpus directory.
    ///
    /// # Errors
    ///
    /// When a directory or document cannot be read, or no label is found, an error variant
    /// will be returned.
    pub fn train_dir<P>(&self, root: P) -> Result<Model>
    where
        P: AsRef<Path>,
    {
        let corpus = match &self.labels {
            Some(labels) => Corpus::with_labels(root, labels.iter().cloned())?,
            None => Corpus::open(root)?,
        };
        self.train_corpus(&corpus)
    }

    /// Trains a model from a listed corpus.
    ///
    /// The corpus is read twice: once to build the vocabulary and once to count words.
    ///
    /// # Errors
    ///
    /// When a document cannot be read, or the corpus has no labels, an error variant will be
    /// returned.
    pub fn train_corpus(&self, corpus: &Corpus) -> Result<Model> {
        let mut dataset = Dataset::new(corpus.labels())?;

        let mut builder = VocabularyBuilder::new();
        for (_, path) in corpus.iter() {
            builder.push_document(path)?;
        }
        let n_distinct = builder.n_distinct();
        let vocabulary = builder.build(self.cutoff);
        info!(
            n_distinct,
            vocabulary_size = vocabulary.len(),
            cutoff = self.cutoff,
            "built vocabulary"
        );

        for (label, path) in corpus.iter() {
            let bow = BagOfWords::from_path(&vocabulary, path)?;
            debug!(%label, ?path, n_tokens = bow.total(), "extracted bag-of-words");
            dataset.push_example(label, bow)?;
        }
        info!(n_documents = dataset.n_examples(), "loaded training documents");

        Ok(Self::estimate(vocabulary, dataset))
    }

    /// Estimates a model from a vocabulary and a dataset built with it.
    pub fn estimate(vocabulary: Vocabulary, dataset: Dataset) -> Model {
        let log_priors = estimator::log_priors(&dataset);
        let word_log_probs = (0..dataset.labels().len())
            .map(|label_id| estimator::word_log_probs(&vocabulary, &dataset, label_id))
            .collect();
        Model {
            vocabulary,
            labels: dataset.into_labels(),
            log_priors,
            word_log_probs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use crate::classifier::Classifier;

    const EPSILON: f64 = 1e-12;

    fn write_doc(root: &Path, label: &str, name: &str, text: &str) {
        let dir = root.join(label);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), text).unwrap();
    }

    fn make_corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "2016", "0001.txt", "email\nserver\nemail\nwall\n");
        write_doc(dir.path(), "2016", "0002.txt", "wall\ndebate\n\nemail\n");
        write_doc(dir.path(), "2020", "0001.txt", "pandemic\nmask\nvote\n");
        write_doc(dir.path(), "2020", "0002.txt", "mail\nvote\npandemic\ndebate\n");
        dir
    }

    #[test]
    fn test_train_dir() {
        let dir = make_corpus();
        let model = Trainer::new(1).train_dir(dir.path()).unwrap();

        assert_eq!(vec!["2016", "2020"], model.labels());
        assert_eq!(
            vec!["debate", "email", "mail", "mask", "pandemic", "server", "vote", "wall"],
            model.vocabulary().iter().collect::<Vec<_>>()
        );
        assert!((model.log_prior("2016").unwrap() - 0.5f64.ln()).abs() < EPSILON);

        // 7 tokens + 8 words + 1 bucket
        let email = model.vocabulary().id("email").unwrap();
        let probs = model.word_log_probs("2016").unwrap();
        assert!((probs.get(email).unwrap() - (4f64 / 16f64).ln()).abs() < EPSILON);
        assert!((probs.oov() - (1f64 / 16f64).ln()).abs() < EPSILON);
    }

    #[test]
    fn test_train_dir_priors_form_distribution() {
        let dir = make_corpus();
        write_doc(dir.path(), "2020", "0003.txt", "vote\n");
        let model = Trainer::new(1).train_dir(dir.path()).unwrap();

        let total: f64 = model.log_priors().map(|(_, p)| p.exp()).sum();
        assert!((total - 1.0).abs() < EPSILON);
        assert!(model.log_prior("2020").unwrap() > model.log_prior("2016").unwrap());
    }

    #[test]
    fn test_train_dir_cutoff() {
        let dir = make_corpus();
        let model = Trainer::new(2).train_dir(dir.path()).unwrap();

        assert_eq!(
            vec!["debate", "email", "pandemic", "vote", "wall"],
            model.vocabulary().iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_train_dir_cutoff_excludes_everything() {
        let dir = make_corpus();
        let model = Trainer::new(100).train_dir(dir.path()).unwrap();

        assert!(model.vocabulary().is_empty());

        // 7 OOV tokens + 0 words + 1 bucket
        let probs = model.word_log_probs("2016").unwrap();
        assert!((probs.oov() - (8f64 / 8f64).ln()).abs() < EPSILON);

        let classifier = Classifier::new(model);
        let result = classifier.classify_tokens(["email", "zoom"]);
        let expected = classifier.model().log_prior("2016").unwrap()
            + 2.0 * classifier.model().word_log_probs("2016").unwrap().oov();
        assert!((result.log_posterior("2016").unwrap() - expected).abs() < EPSILON);
    }

    #[test]
    fn test_train_dir_is_deterministic() {
        let dir = make_corpus();
        let model1 = Trainer::new(1).train_dir(dir.path()).unwrap();
        let model2 = Trainer::new(1).train_dir(dir.path()).unwrap();

        let mut buf1 = vec![];
        let mut buf2 = vec![];
        model1.write(&mut buf1).unwrap();
        model2.write(&mut buf2).unwrap();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn test_train_dir_with_empty_label() {
        let dir = make_corpus();
        fs::create_dir(dir.path().join("2024")).unwrap();
        let model = Trainer::new(1)
            .labels(["2016", "2020", "2024"])
            .train_dir(dir.path())
            .unwrap();

        let vocab_size = model.vocabulary().len() as f64;
        let probs = model.word_log_probs("2024").unwrap();
        assert!((probs.oov() + (vocab_size + 1.0).ln()).abs() < EPSILON);
        assert!((model.log_prior("2024").unwrap() - (1f64 / 7f64).ln()).abs() < EPSILON);
    }

    #[test]
    fn test_train_dir_without_labels() {
        let dir = tempfile::tempdir().unwrap();
        let result = Trainer::new(1).train_dir(dir.path());

        assert_eq!(
            "InvalidArgumentError: labels: is empty",
            &result.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_classify_training_document() {
        let dir = make_corpus();
        let model = Trainer::new(1).train_dir(dir.path()).unwrap();
        let classifier = Classifier::new(model);

        let result = classifier
            .classify_path(dir.path().join("2016").join("0001.txt"))
            .unwrap();
        assert_eq!("2016", result.predicted_label());
        assert!(result.log_posterior("2016").unwrap() > result.log_posterior("2020").unwrap());

        let result = classifier
            .classify_path(dir.path().join("2020").join("0001.txt"))
            .unwrap();
        assert_eq!("2020", result.predicted_label());
    }

    #[test]
    fn test_classify_empty_document() {
        let dir = make_corpus();
        write_doc(dir.path(), "2020", "0003.txt", "vote\n");
        let model = Trainer::new(1).train_dir(dir.path()).unwrap();
        let classifier = Classifier::new(model);

        let result = classifier.classify_reader(&b""[..]).unwrap();
        assert!(result.bag_of_words().is_empty());
        assert_eq!("2020", result.predicted_label());
        assert_eq!(
            classifier.model().log_prior("2020"),
            result.log_posterior("2020")
        );
    }

    #[test]
    fn test_estimate_matches_train_dir() {
        let dir = make_corpus();
        let corpus = Corpus::open(dir.path()).unwrap();
        let model = Trainer::new(1).train_corpus(&corpus).unwrap();

        let mut builder = VocabularyBuilder::new();
        let mut docs = vec![];
        for (label, path) in corpus.iter() {
            let tokens = crate::document::read_tokens_from_path(path).unwrap();
            builder.push_tokens(&tokens);
            docs.push((label, tokens));
        }
        let vocabulary = builder.build(1);
        let mut dataset = Dataset::new(["2016", "2020"]).unwrap();
        for (label, tokens) in docs {
            dataset
                .push_example(label, BagOfWords::from_tokens(&vocabulary, tokens))
                .unwrap();
        }

        assert_eq!(model, Trainer::estimate(vocabulary, dataset));
    }
}
