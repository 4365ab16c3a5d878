use std::path::{Path, PathBuf};

use clap::Subcommand;
use moodharbor_core::{Config, Dataset};
use serde_json::json;

#[derive(Subcommand)]
pub enum DatasetAction {
    /// Summarize the active dataset
    Info {
        /// Inspect a dataset file instead of the configured one
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Check that a dataset file loads cleanly
    Validate { path: PathBuf },
}

fn load(path: Option<&Path>) -> Result<Dataset, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Dataset::from_path(path)?),
        None => {
            let config = Config::load_or_default();
            match &config.dataset.path {
                Some(configured) => Ok(Dataset::from_path(Path::new(configured))?),
                None => Ok(Dataset::builtin()),
            }
        }
    }
}

pub fn run(action: DatasetAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DatasetAction::Info { path } => {
            let dataset = load(path.as_deref())?;
            let keywords: Vec<_> = dataset
                .emotion_ids()
                .map(|id| {
                    json!({
                        "emotion": dataset.tag(id),
                        "keywords": dataset.keywords(id).len(),
                        "messages": dataset.messages(id).len(),
                    })
                })
                .collect();
            let summary = json!({
                "questions": dataset.questions().len(),
                "emotions": dataset.emotions(),
                "neutral": dataset.tag(dataset.neutral()),
                "perEmotion": keywords,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        DatasetAction::Validate { path } => {
            let dataset = Dataset::from_path(&path)?;
            println!(
                "dataset ok: {} questions, {} emotions",
                dataset.questions().len(),
                dataset.emotions().len()
            );
        }
    }
    Ok(())
}
