//! Listing of labeled corpora on the file system.
//!
//! A corpus is a directory with one subdirectory per label. Every regular file in a label
//! directory is a document.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::dataset;
use crate::errors::Result;

struct LabelEntry {
    label: String,
    documents: Vec<PathBuf>,
}

/// A labeled corpus.
///
/// Symbolic links are followed, both for label directories and for documents.
pub struct Corpus {
    entries: Vec<LabelEntry>,
}

impl Corpus {
    /// Lists a corpus, using every subdirectory of `root` as a label.
    ///
    /// Labels and documents are sorted by name.
    ///
    /// # Errors
    ///
    /// [`BowBayesError::IOError`](crate::BowBayesError::IOError) will be returned if `root` or
    /// one of its subdirectories cannot be listed.
    pub fn open<P>(root: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let root = root.as_ref();
        let mut labels = vec![];
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                warn!(path = ?entry.path(), "skipping a non-directory entry of the corpus root");
                continue;
            }
            match entry.file_name().into_string() {
                Ok(label) => labels.push(label),
                Err(name) => {
                    warn!(?name, "skipping a label directory with a non UTF-8 name");
                }
            }
        }
        labels.sort_unstable();
        Self::list(root, labels)
    }

    /// Lists a corpus restricted to the given labels, kept in the given order.
    ///
    /// A label whose directory is empty has no documents.
    ///
    /// # Errors
    ///
    /// [`BowBayesError::InvalidArgument`](crate::BowBayesError::InvalidArgument) will be
    /// returned if `labels` is empty, contains an empty label or contains duplicates.
    /// [`BowBayesError::IOError`](crate::BowBayesError::IOError) will be returned if a label
    /// directory is missing.
    pub fn with_labels<P, I, S>(root: P, labels: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        dataset::check_labels(&labels)?;
        Self::list(root.as_ref(), labels)
    }

    fn list(root: &Path, labels: Vec<String>) -> Result<Self> {
        let mut entries = Vec::with_capacity(labels.len());
        for label in labels {
            let mut documents = vec![];
            for entry in fs::read_dir(root.join(&label))? {
                let entry = entry?;
                if !entry.path().is_file() {
                    warn!(path = ?entry.path(), "skipping a non-file entry of a label directory");
                    continue;
                }
                documents.push(entry.path());
            }
            documents.sort_unstable();
            debug!(%label, n_documents = documents.len(), "listed label directory");
            entries.push(LabelEntry { label, documents });
        }
        Ok(Self { entries })
    }

    /// Gets the labels in corpus order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Gets the documents of the `label_id`-th label.
    pub fn documents(&self, label_id: usize) -> &[PathBuf] {
        self.entries
            .get(label_id)
            .map_or(&[][..], |e| e.documents.as_slice())
    }

    /// Gets the total number of documents.
    pub fn n_documents(&self) -> usize {
        self.entries.iter().map(|e| e.documents.len()).sum()
    }

    /// Iterates `(label, document)` pairs in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> + '_ {
        self.entries.iter().flat_map(|e| {
            e.documents
                .iter()
                .map(move |path| (e.label.as_str(), path.as_path()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BowBayesError;

    fn make_corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (label, name, text) in [
            ("2020", "b.txt", "pandemic\n"),
            ("2020", "a.txt", "mask\n"),
            ("2016", "x.txt", "email\n"),
        ] {
            let label_dir = dir.path().join(label);
            fs::create_dir_all(&label_dir).unwrap();
            fs::write(label_dir.join(name), text).unwrap();
        }
        fs::create_dir(dir.path().join("2012")).unwrap();
        fs::write(dir.path().join("README"), "not a label").unwrap();
        fs::create_dir(dir.path().join("2020").join("nested")).unwrap();
        dir
    }

    #[test]
    fn test_corpus_open() {
        let dir = make_corpus();
        let corpus = Corpus::open(dir.path()).unwrap();

        assert_eq!(vec!["2012", "2016", "2020"], corpus.labels().collect::<Vec<_>>());
        assert_eq!(3, corpus.n_documents());
        assert!(corpus.documents(0).is_empty());
        assert_eq!(
            vec![
                dir.path().join("2020").join("a.txt"),
                dir.path().join("2020").join("b.txt")
            ],
            corpus.documents(2)
        );
        assert!(corpus.documents(3).is_empty());
    }

    #[test]
    fn test_corpus_iter() {
        let dir = make_corpus();
        let corpus = Corpus::open(dir.path()).unwrap();

        let labels: Vec<_> = corpus.iter().map(|(label, _)| label).collect();
        assert_eq!(vec!["2016", "2020", "2020"], labels);
    }

    #[test]
    fn test_corpus_with_labels() {
        let dir = make_corpus();
        let corpus = Corpus::with_labels(dir.path(), ["2020", "2016"]).unwrap();

        assert_eq!(vec!["2020", "2016"], corpus.labels().collect::<Vec<_>>());
        assert_eq!(3, corpus.n_documents());
    }

    #[test]
    fn test_corpus_with_missing_label() {
        let dir = make_corpus();
        let corpus = Corpus::with_labels(dir.path(), ["2016", "2024"]);

        assert!(matches!(corpus, Err(BowBayesError::IOError(_))));
    }

    #[test]
    fn test_corpus_with_duplicate_labels() {
        let dir = make_corpus();
        let corpus = Corpus::with_labels(dir.path(), ["2016", "2016"]);

        assert_eq!(
            "InvalidArgumentError: labels: contains a duplicate label: 2016",
            &corpus.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_corpus_with_empty_label() {
        let dir = make_corpus();
        let corpus = Corpus::with_labels(dir.path(), ["", "2016"]);

        assert_eq!(
            "InvalidArgumentError: labels: contains an empty label",
            &corpus.err().unwrap().to_string()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_corpus_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let src = tempfile::tempdir().unwrap();
        fs::create_dir(src.path().join("2020")).unwrap();
        fs::write(src.path().join("a.txt"), "email\n").unwrap();
        fs::write(src.path().join("2020").join("b.txt"), "mask\n").unwrap();

        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("2016")).unwrap();
        symlink(src.path().join("a.txt"), dir.path().join("2016").join("a.txt")).unwrap();
        symlink(src.path().join("2020"), dir.path().join("2020")).unwrap();
        symlink(dir.path().join("missing"), dir.path().join("2016").join("dangling")).unwrap();
        let corpus = Corpus::open(dir.path()).unwrap();

        assert_eq!(vec!["2016", "2020"], corpus.labels().collect::<Vec<_>>());
        assert_eq!(
            vec![
                ("2016", dir.path().join("2016").join("a.txt")),
                ("2020", dir.path().join("2020").join("b.txt")),
            ],
            corpus
                .iter()
                .map(|(label, path)| (label, path.to_path_buf()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_corpus_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = Corpus::open(dir.path().join("nothing"));

        assert!(matches!(corpus, Err(BowBayesError::IOError(_))));
    }
}
