use std::fs::File;
use std::path::PathBuf;

use bowbayes::Trainer;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "A program to train bag-of-words Naive Bayes models.")]
struct Args {
    /// A training corpus directory with one subdirectory of documents per label
    #[arg(long)]
    corpus: PathBuf,

    /// The file to write the trained model to
    #[arg(long)]
    model: PathBuf,

    /// Tokens occurring fewer times than this value are treated as out-of-vocabulary
    #[arg(long, default_value = "1")]
    cutoff: usize,

    /// Labels to train. All subdirectories of the corpus are used if not specified.
    /// Exact ties are broken toward the label given last.
    #[arg(long)]
    label: Vec<String>,

    /// The number of workers for zstd (0 means multithreaded will be disabled)
    #[arg(long, default_value = "0")]
    zstd_workers: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    info!(corpus = ?args.corpus, "start training");
    let mut trainer = Trainer::new(args.cutoff);
    if !args.label.is_empty() {
        trainer = trainer.labels(args.label);
    }
    let model = trainer.train_dir(&args.corpus)?;
    for (label, log_prior) in model.log_priors() {
        info!(%label, log_prior, "estimated prior");
    }
    info!("finish training");

    let mut f = zstd::Encoder::new(File::create(&args.model)?, 19)?;
    f.multithread(args.zstd_workers)?;
    model.write(&mut f)?;
    f.finish()?;
    info!(model = ?args.model, "saved model");

    Ok(())
}
