use anyhow::{Context, Result};
use clap::Parser;
use heat_hurt::ui::{Presenter, TerminalPresenter};
use heat_hurt::{ForestConfig, HeatHurt, SampleInput};
use serde_json::json;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "heat-hurt")]
#[command(about = "Hair damage risk predictor", long_about = None)]
struct Cli {
    /// TOML file with forest settings
    #[arg(short, long, env = "HEAT_HURT_CONFIG")]
    config: Option<PathBuf>,

    /// Number of trees (overrides the config file)
    #[arg(short, long, env = "HEAT_HURT_TREES")]
    trees: Option<usize>,

    /// Bootstrap seed (overrides the config file)
    #[arg(short, long, env = "HEAT_HURT_SEED")]
    seed: Option<u64>,

    /// Columns sampled per split (overrides the config file)
    #[arg(short = 'm', long, env = "HEAT_HURT_MAX_FEATURES")]
    max_features: Option<usize>,

    /// Assess every row of a CSV file and print one JSON object per row
    #[arg(short, long, value_name = "CSV")]
    batch: Option<PathBuf>,

    /// How many of the most informative features to show after training
    #[arg(long, default_value = "3")]
    top_features: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heat_hurt=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ForestConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ForestConfig::default(),
    };
    if let Some(trees) = cli.trees {
        config.n_trees = trees;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(m) = cli.max_features {
        config.max_features = Some(m);
    }

    if let Some(path) = &cli.batch {
        let model = HeatHurt::train(&config).context("training model")?;
        return run_batch(&model, path);
    }

    println!("🧠 Training model ({} trees, seed {})...", config.n_trees, config.seed);
    let model = HeatHurt::train(&config).context("training model")?;
    println!("✅ Training accuracy: {:.2}%", model.training_accuracy()? * 100.0);

    if cli.top_features > 0 {
        println!("Most Informative Features:");
        for (name, importance) in model.top_features(cli.top_features)? {
            println!("{:>20} | {:.3}", name, importance);
        }
    }

    println!();
    println!("Enter your hair details (press Enter to accept a default, 'exit' to quit).");

    let stdin = io::stdin();
    let mut presenter = TerminalPresenter::new(stdin.lock(), io::stdout());
    while let Some(input) = presenter.read_input()? {
        match model.assess(&input) {
            Ok(assessment) => presenter.render(&assessment)?,
            Err(e) => presenter.render_error(&e)?,
        }
    }

    Ok(())
}

fn run_batch(model: &HeatHurt, path: &Path) -> Result<()> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (i, result) in rdr.deserialize::<SampleInput>().enumerate() {
        let row = i + 1;
        let line = match result {
            Ok(input) => match model.assess(&input) {
                Ok(assessment) => json!({ "row": row, "assessment": assessment }),
                Err(e) => json!({ "row": row, "error": e.to_string() }),
            },
            Err(e) => json!({ "row": row, "error": e.to_string() }),
        };
        writeln!(out, "{line}")?;
    }

    Ok(())
}
