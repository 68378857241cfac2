//! hiring-svm command line interface
//!
//! Generate candidate data, run the training pipeline, query a persisted
//! model, or start the HTTP API.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use hiring_svm::core::Result;
use hiring_svm::data::{save_dataset, CandidateGenerator, DatasetSummary};
use hiring_svm::evaluation::summary_table;
use hiring_svm::trainer::ModelInfo;
use hiring_svm::{load_bundle, predict, run_training, KernelKind, Settings};
use log::{error, info};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "hiring-svm")]
#[command(about = "Candidate screening with kernel SVMs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root for data and results (overrides PROJECT_ROOT)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic candidate dataset
    Generate(GenerateArgs),
    /// Run the full training pipeline
    Train(TrainArgs),
    /// Classify one candidate with the persisted model
    Predict(PredictArgs),
    /// Display model information
    Info(InfoArgs),
    /// Start the HTTP API
    Serve(ServeArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Number of candidates
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Year graduation bonuses are measured against
    #[arg(long)]
    reference_year: Option<i32>,

    /// Output CSV file (defaults to data/candidate_data.csv under the root)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct TrainArgs {
    /// Number of candidates to generate
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Random seed for generation and splitting
    #[arg(short, long)]
    seed: Option<u64>,

    /// Fraction of rows held out for evaluation
    #[arg(long)]
    test_fraction: Option<f64>,

    /// Kernels to train (repeatable)
    #[arg(short, long, value_enum)]
    kernel: Vec<CliKernel>,
}

#[derive(Args)]
struct PredictArgs {
    /// Model bundle (defaults to data/best_model.json under the root)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Years of experience (0-10)
    #[arg(short, long)]
    experience_years: f64,

    /// Technical score (0-100)
    #[arg(short, long)]
    technical_score: f64,
}

#[derive(Args)]
struct InfoArgs {
    /// Model bundle (defaults to data/best_model.json under the root)
    #[arg(short, long)]
    model: Option<PathBuf>,
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliKernel {
    Linear,
    Rbf,
    #[value(alias = "poly")]
    Polynomial,
    Sigmoid,
}

impl From<CliKernel> for KernelKind {
    fn from(kernel: CliKernel) -> Self {
        match kernel {
            CliKernel::Linear => KernelKind::Linear,
            CliKernel::Rbf => KernelKind::Rbf,
            CliKernel::Polynomial => KernelKind::Polynomial,
            CliKernel::Sigmoid => KernelKind::Sigmoid,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let mut settings = Settings::from_env();
    if let Some(root) = cli.root {
        settings.project_root = root;
    }

    let result = match cli.command {
        Commands::Generate(args) => generate_command(args, settings),
        Commands::Train(args) => train_command(args, settings),
        Commands::Predict(args) => predict_command(args, settings),
        Commands::Info(args) => info_command(args, settings),
        Commands::Serve(args) => serve_command(args, settings),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn generate_command(args: GenerateArgs, settings: Settings) -> Result<()> {
    let size = args.size.unwrap_or(settings.dataset_size);
    let seed = args.seed.unwrap_or(settings.random_seed);
    let output = args.output.unwrap_or_else(|| settings.dataset_path());

    let dataset = CandidateGenerator::new(seed)
        .with_reference_year(args.reference_year.unwrap_or(settings.reference_year))
        .generate(size)?;
    save_dataset(&dataset, &output)?;

    let summary = DatasetSummary::from_dataset(&dataset)?;
    println!("=== Generated Dataset ===");
    println!("File: {output:?}");
    println!("Candidates: {}", summary.count);
    println!(
        "Hired / Rejected: {} / {}",
        summary.labels.hired, summary.labels.rejected
    );
    println!("Rejection rate: {:.1}%", summary.rejection_rate * 100.0);
    println!(
        "Experience years: mean {:.2}, range [{}, {}]",
        summary.experience_years.mean, summary.experience_years.min, summary.experience_years.max
    );
    println!(
        "Technical score: mean {:.2}, range [{}, {}]",
        summary.technical_score.mean, summary.technical_score.min, summary.technical_score.max
    );
    Ok(())
}

fn train_command(args: TrainArgs, mut settings: Settings) -> Result<()> {
    if let Some(size) = args.size {
        settings.dataset_size = size;
    }
    if let Some(seed) = args.seed {
        settings.random_seed = seed;
    }
    if let Some(test_fraction) = args.test_fraction {
        settings.test_fraction = test_fraction;
    }
    if !args.kernel.is_empty() {
        settings.kernels = args.kernel.into_iter().map(KernelKind::from).collect();
    }

    info!("Training in {:?}", settings.project_root);
    let outcome = run_training(&settings)?;

    println!("=== Training Results ===");
    println!(
        "{:<12} {:>9} {:>10} {:>8} {:>8}",
        "kernel", "accuracy", "precision", "recall", "f1"
    );
    for row in summary_table(&outcome.reports) {
        println!(
            "{:<12} {:>9.4} {:>10.4} {:>8.4} {:>8.4}",
            row.kernel.as_str(),
            row.accuracy,
            row.precision,
            row.recall,
            row.f1_score
        );
    }
    println!();
    println!(
        "Best model: {} (accuracy {:.4}) saved to {:?}",
        outcome.bundle.kernel,
        outcome.bundle.accuracy,
        settings.model_path()
    );
    Ok(())
}

fn predict_command(args: PredictArgs, settings: Settings) -> Result<()> {
    let path = args.model.unwrap_or_else(|| settings.model_path());
    info!("Loading model from: {path:?}");
    let bundle = load_bundle(&path)?;

    let prediction = predict(
        &bundle.model,
        &bundle.scaler,
        args.experience_years,
        args.technical_score,
    )?;

    println!("Prediction: {} ({})", prediction.result, prediction.prediction);
    println!("Confidence: {:.4}", prediction.confidence);
    Ok(())
}

fn info_command(args: InfoArgs, settings: Settings) -> Result<()> {
    let path = args.model.unwrap_or_else(|| settings.model_path());
    info!("Loading model from: {path:?}");
    let bundle = load_bundle(&path)?;

    bundle.print_summary();

    let model_info = ModelInfo::of(&bundle.model);
    println!("\nKernel Parameters: {:?}", model_info.kernel);
    println!(
        "Support vector indices: {:?}",
        &model_info.support_vector_indices[..model_info.support_vector_indices.len().min(10)]
    );

    println!("\nScaler:");
    for (name, stats) in ["experience_years", "technical_score"]
        .iter()
        .zip(bundle.scaler.feature_stats())
    {
        println!("  {name}: mean {:.4}, std {:.4}", stats.mean, stats.scale);
    }

    println!("\nAlpha values:");
    let alphas = bundle.model.alpha_values();
    let n_show = alphas.len().min(10);
    for (i, (alpha, sv)) in alphas
        .iter()
        .zip(bundle.model.support_vectors())
        .enumerate()
        .take(n_show)
    {
        println!("  α{i}*y{i}: {:.6}", alpha * sv.label);
    }
    if alphas.len() > n_show {
        println!("  ... ({} more)", alphas.len() - n_show);
    }
    println!("  Support vectors: {}", model_info.n_support_vectors);

    Ok(())
}

fn serve_command(args: ServeArgs, mut settings: Settings) -> Result<()> {
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(hiring_svm::server::serve(settings))
}
