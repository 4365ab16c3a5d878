use std::path::Path;

use clap::Subcommand;
use moodharbor_core::{session_rng, Config, Dataset, Event, ProgressStore, QuizOutcome, SessionEngine};

#[derive(Subcommand)]
pub enum QuizAction {
    /// Start a session (resumes saved progress when present)
    Start {
        /// Fixed RNG seed for a reproducible question subset
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the current session state as JSON
    Status,
    /// Choose an option for the current question (numbered from 1)
    Answer { option: usize },
    /// Move to the next question
    Next,
    /// Move back to the previous question
    Prev,
    /// Set the free-form description offered on the final question
    Text { text: String },
    /// Submit the quiz and show the emotion analysis
    Submit,
    /// Discard all progress and reshuffle the questions
    Reset {
        /// Fixed RNG seed for a reproducible question subset
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn load_dataset(config: &Config) -> Result<Dataset, Box<dyn std::error::Error>> {
    match &config.dataset.path {
        Some(path) => Ok(Dataset::from_path(Path::new(path))?),
        None => Ok(Dataset::builtin()),
    }
}

fn print_outcome(outcome: &QuizOutcome, bar_width: u32) {
    println!("你的情绪分析结果");
    println!();
    println!("{}", outcome.result_text);
    println!();
    let width = bar_width.max(1) as usize;
    for share in &outcome.shares {
        let filled = ((share.percentage / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        let bar = "█".repeat(filled) + &"░".repeat(width - filled);
        println!(
            "{} {} {:.1}% ({})",
            share.emotion, bar, share.percentage, share.count
        );
    }
    println!();
    println!("主导情绪：{}", outcome.primary);
    println!("{}", outcome.message);
}

pub fn run(action: QuizAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let dataset = load_dataset(&config)?;
    let store = ProgressStore::open()?;

    let seed = match &action {
        QuizAction::Start { seed } | QuizAction::Reset { seed } => *seed,
        _ => None,
    };
    let mut rng = session_rng(seed);

    let mut engine = match store.load()? {
        Some(saved) => match SessionEngine::restore(&dataset, saved) {
            Some(engine) => engine,
            None => {
                eprintln!("warning: saved progress does not match the current dataset, starting fresh");
                SessionEngine::new(&dataset, &mut rng)
            }
        },
        None => SessionEngine::new(&dataset, &mut rng),
    };
    engine.set_auto_advance(config.quiz.auto_advance);

    // The selected subset is fixed for the session's lifetime, so a fresh
    // selection goes to the slot before it is ever shown.
    if !engine.resumed() {
        store.save(&engine.saved_progress())?;
    }

    match action {
        QuizAction::Start { .. } => {
            if engine.resumed() {
                eprintln!("resuming saved progress; run 'quiz reset' to start over");
            }
            println!("{}", serde_json::to_string_pretty(&engine.started_event())?);
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        QuizAction::Status => {
            if engine.resumed() {
                eprintln!("resuming saved progress; run 'quiz reset' to start over");
            }
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        QuizAction::Answer { option } => {
            if option == 0 {
                eprintln!("options are numbered from 1");
                std::process::exit(1);
            }
            if let Some(event) = engine.select_answer(option - 1) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
            store.save(&engine.saved_progress())?;
        }
        QuizAction::Next => {
            if let Some(event) = engine.advance() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
            store.save(&engine.saved_progress())?;
        }
        QuizAction::Prev => {
            if let Some(event) = engine.retreat() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
            store.save(&engine.saved_progress())?;
        }
        QuizAction::Text { text } => {
            if let Some(event) = engine.set_additional_text(&text) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
            store.save(&engine.saved_progress())?;
        }
        QuizAction::Submit => match engine.submit(&mut rng) {
            Some(Event::QuizSubmitted { outcome, .. }) => {
                store.save(&engine.saved_progress())?;
                print_outcome(&outcome, config.quiz.bar_width);
            }
            _ => {
                eprintln!("answer the final question before submitting");
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        },
        QuizAction::Reset { .. } => {
            if let Some(event) = engine.reset(&mut rng) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            store.save(&engine.saved_progress())?;
        }
    }

    Ok(())
}
