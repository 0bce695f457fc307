use moodrec::{init_tracing, AnalysisInput, Config, ExplicitPreference, Interaction, Mood, PreferenceAnalyzer, StrategyKind};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Offline preference analysis and recommendation parsing", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank preferences from a JSON snapshot of interactions and preferences
    Analyze {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        mood: Mood,

        #[arg(short, long, default_value = "weighted_recency")]
        strategy: StrategyKind,
    },
    /// Parse a raw webhook body (stdin when no file is given)
    Parse {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Extract display details from one recommendation sentence
    Details {
        #[arg(short, long)]
        text: String,
    },
}

#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    interactions: Vec<Interaction>,
    #[serde(default)]
    preferences: Vec<ExplicitPreference>,
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = if std::path::Path::new(&args.config).exists() {
        Config::from_file(&args.config)?
    } else {
        Config::default()
    };

    let output = match args.command {
        Command::Analyze { input, mood, strategy } => {
            let snapshot: Snapshot = serde_json::from_str(&read_input(Some(&input))?)
                .context("Snapshot must be JSON with `interactions` and `preferences` arrays")?;
            info!(
                "Analyzing {} interactions and {} preferences",
                snapshot.interactions.len(),
                snapshot.preferences.len()
            );

            let analyzer = PreferenceAnalyzer::new(&config.analyzer);
            let input = AnalysisInput::new(&snapshot.interactions, &snapshot.preferences, mood);
            serde_json::to_string_pretty(&analyzer.analyze(strategy, &input))?
        }
        Command::Parse { input } => {
            let raw = read_input(input.as_ref())?;
            let response = moodrec::parse_recommendation_response(&raw)?;
            serde_json::to_string_pretty(&response)?
        }
        Command::Details { text } => {
            serde_json::to_string_pretty(&moodrec::extract_recommendation_details(&text))?
        }
    };

    println!("{}", output);
    Ok(())
}
