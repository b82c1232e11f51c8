use std::fs::File;
use std::io::{prelude::*, stdout, BufWriter};
use std::path::PathBuf;

use bowbayes::{Classifier, Model};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "A program to classify pre-tokenized documents.")]
struct Args {
    /// The model file to use when classifying documents
    #[arg(long)]
    model: PathBuf,

    /// Documents to classify, one token per line
    #[arg(required = true)]
    documents: Vec<PathBuf>,
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

    let out = stdout();
    let mut out = BufWriter::new(out.lock());
    for path in &args.documents {
        let result = classifier.classify_path(path)?;
        debug!(
            ?path,
            n_tokens = result.bag_of_words().total(),
            n_oov = result.bag_of_words().oov_count(),
            "classified document"
        );
        write!(out, "{}\t{}", path.display(), result.predicted_label())?;
        for (label, log_posterior) in result.log_posteriors() {
            write!(out, "\t{}:{}", label, log_posterior)?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}
