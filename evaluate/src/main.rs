use std::fs::File;
use std::path::PathBuf;

use bowbayes::{Classifier, Corpus, Model};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the accuracy of bag-of-words Naive Bayes models.")]
struct Args {
    /// The model file to use when classifying documents
    #[arg(long)]
    model: PathBuf,

    /// A test corpus directory with one subdirectory of documents per label
    #[arg(long)]
    corpus: PathBuf,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.
    } else {
        numerator as f64 / denominator as f64
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    info!("loading model file");
    let mut f = zstd::Decoder::new(File::open(&args.model)?)?;
    let model = Model::read(&mut f)?;
    let classifier = Classifier::new(model);
    let labels = classifier.model().labels();

    let corpus = Corpus::open(&args.corpus)?;
    info!(n_documents = corpus.n_documents(), "start classification");

    // confusion[reference][hypothesis]
    let mut confusion = vec![vec![0usize; labels.len()]; labels.len()];
    for (label, path) in corpus.iter() {
        let Some(reference) = classifier.model().label_id(label) else {
            warn!(%label, ?path, "skipping a document with a label unknown to the model");
            continue;
        };
        let result = classifier.classify_path(path)?;
        confusion[reference][result.predicted_label_id()] += 1;
    }

    let n_total: usize = confusion.iter().flatten().sum();
    let n_correct: usize = (0..labels.len()).map(|i| confusion[i][i]).sum();
    println!("Accuracy: {}", ratio(n_correct, n_total));
    println!("Correct: {}, Total: {}", n_correct, n_total);
    for (i, label) in labels.iter().enumerate() {
        let n_tp = confusion[i][i];
        let n_sys: usize = confusion.iter().map(|row| row[i]).sum();
        let n_ref: usize = confusion[i].iter().sum();
        let precision = ratio(n_tp, n_sys);
        let recall = ratio(n_tp, n_ref);
        let f1 = if precision + recall == 0. {
            0.
        } else {
            2. * precision * recall / (precision + recall)
        };
        println!(
            "{}: Precision: {}, Recall: {}, F1: {}",
            label, precision, recall, f1
        );
    }
    println!("Confusion (rows: reference, columns: predicted):");
    println!("\t{}", labels.join("\t"));
    for (label, row) in labels.iter().zip(&confusion) {
        let row: Vec<String> = row.iter().map(|n| n.to_string()).collect();
        println!("{}\t{}", label, row.join("\t"));
    }

    Ok(())
}
