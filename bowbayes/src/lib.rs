//! # bowbayes
//!
//! A bag-of-words Naive Bayes classifier for pre-tokenized documents.
//!
//! A training corpus is a directory with one subdirectory per label, each containing
//! documents with one token per line.
//!
//! ## Examples
//!
//! ```no_run
//! use bowbayes::{Classifier, Trainer};
//!
//! let model = Trainer::new(1).train_dir("corpus/train").unwrap();
//! let classifier = Classifier::new(model);
//!
//! let result = classifier.classify_path("document.txt").unwrap();
//! for (label, log_posterior) in result.log_posteriors() {
//!     println!("{}: {}", label, log_posterior);
//! }
//! println!("predicted: {}", result.predicted_label());
//! ```

mod bow;
mod classifier;
mod corpus;
mod dataset;
mod errors;
mod model;
mod trainer;
mod vocabulary;

pub mod document;
pub mod estimator;

pub use bow::{BagOfWords, Iter as BagOfWordsIter, Term};
pub use classifier::{Classification, Classifier};
pub use corpus::Corpus;
pub use dataset::{Dataset, TrainingExample};
pub use errors::{BowBayesError, InvalidArgumentError, InvalidModelError, Result};
pub use model::{Model, WordLogProbs};
pub use trainer::Trainer;
pub use vocabulary::{Vocabulary, VocabularyBuilder};
