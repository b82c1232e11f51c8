use std::fs;
use std::path::PathBuf;

use bowbayes::Model;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "A program to inspect trained models.")]
struct Args {
    /// Input path of the model file
    #[arg(long)]
    model: PathBuf,

    /// Output the vocabulary contained in the model.
    #[arg(long)]
    dump_vocab: Option<PathBuf>,

    /// Output the log prior of each label.
    #[arg(long)]
    dump_priors: Option<PathBuf>,

    /// Output the log probability of each word given each label. The out-of-vocabulary bucket
    /// is written last with an empty term.
    #[arg(long)]
    dump_word_probs: Option<PathBuf>,
}

#[derive(Serialize)]
struct VocabularyRecord<'a> {
    id: usize,
    word: &'a str,
}

#[derive(Serialize)]
struct PriorRecord<'a> {
    label: &'a str,
    log_prior: f64,
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
    let mut f = zstd::Decoder::new(fs::File::open(&args.model)?)?;
    let model = Model::read(&mut f)?;
    println!("Labels: {}", model.labels().join(", "));
    println!("Vocabulary size: {}", model.vocabulary().len());

    if let Some(path) = args.dump_vocab {
        info!(?path, "saving vocabulary file");
        let mut wtr = csv::Writer::from_path(path)?;
        for (id, word) in model.vocabulary().iter().enumerate() {
            wtr.serialize(VocabularyRecord { id, word })?;
        }
        wtr.flush()?;
    }

    if let Some(path) = args.dump_priors {
        info!(?path, "saving prior file");
        let mut wtr = csv::Writer::from_path(path)?;
        for (label, log_prior) in model.log_priors() {
            wtr.serialize(PriorRecord { label, log_prior })?;
        }
        wtr.flush()?;
    }

    if let Some(path) = args.dump_word_probs {
        info!(?path, "saving word probability file");
        let probs: Vec<_> = model
            .labels()
            .iter()
            .filter_map(|label| model.word_log_probs(label))
            .collect();
        let mut wtr = csv::Writer::from_path(path)?;
        let mut header = vec!["term".to_string()];
        header.extend(model.labels().iter().cloned());
        wtr.write_record(&header)?;
        for (id, word) in model.vocabulary().iter().enumerate() {
            let mut record = vec![word.to_string()];
            for p in &probs {
                record.push(p.get(id).unwrap_or(f64::NAN).to_string());
            }
            wtr.write_record(&record)?;
        }
        let mut record = vec![String::new()];
        record.extend(probs.iter().map(|p| p.oov().to_string()));
        wtr.write_record(&record)?;
        wtr.flush()?;
    }

    Ok(())
}
