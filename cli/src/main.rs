//! diabrisk: diabetes risk prediction CLI
//!
//! Loads the three classifier artifacts named in a TOML config, scales the
//! patient attributes given on the command line, and reports the predicted
//! risk.
//!
//! Usage:
//!   cargo run -p diabrisk-cli -- models
//!   cargo run -p diabrisk-cli -- classify --model RandomForest --age 62 --hba1c 7.4
//!   cargo run -p diabrisk-cli -- compare --family-history --fasting-glucose 130
//!   cargo run -p diabrisk-cli -- scale --postprandial-glucose 200

mod present;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use diabrisk_contracts::{error::DiabriskResult, patient::PatientRecord};
use diabrisk_core::{validate_record, FeatureScaler, RiskClassifier};
use diabrisk_models::{ModelRegistry, RegistryConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// diabrisk: diabetes risk prediction from routine clinical measurements.
#[derive(Parser)]
#[command(
    name = "diabrisk",
    about = "Diabetes risk prediction from clinical measurements",
    long_about = "Scales six patient attributes and scores them with a logistic regression,\n\
                  random forest, or gradient boosted model loaded from disk."
)]
struct Cli {
    /// Model registry configuration file.
    #[arg(long, env = "DIABRISK_CONFIG", default_value = "models/diabrisk.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one patient with a single model.
    Classify {
        /// LogisticRegression, RandomForest, or GradientBoosted.
        #[arg(long, short, default_value = "LogisticRegression")]
        model: String,

        #[command(flatten)]
        patient: PatientArgs,

        /// Print the assessment as JSON instead of a text report.
        #[arg(long)]
        json: bool,
    },
    /// Classify one patient with every model.
    Compare {
        #[command(flatten)]
        patient: PatientArgs,

        /// Print the assessments as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the scaled feature vector without running a model.
    Scale {
        #[command(flatten)]
        patient: PatientArgs,
    },
    /// List the available models.
    Models,
}

/// Patient attributes; defaults match a fresh intake form.
#[derive(Args, Debug, Clone)]
struct PatientArgs {
    /// Age in years [19 - 90].
    #[arg(long, default_value_t = 50.0)]
    age: f64,

    /// Family history of diabetes.
    #[arg(long)]
    family_history: bool,

    /// Fasting glucose, mg/dL [75 - 147].
    #[arg(long, default_value_t = 111.0)]
    fasting_glucose: f64,

    /// Postprandial glucose, mg/dL [76 - 244].
    #[arg(long, default_value_t = 160.0)]
    postprandial_glucose: f64,

    /// Glycated hemoglobin (HbA1c), % [4.32 - 8.72].
    #[arg(long = "hba1c", default_value_t = 6.52)]
    glycated_hemoglobin: f64,

    /// Diabetes risk score [6.1 - 53.3].
    #[arg(long, default_value_t = 30.2)]
    risk_score: f64,
}

impl From<PatientArgs> for PatientRecord {
    fn from(args: PatientArgs) -> Self {
        PatientRecord {
            age: args.age,
            family_history_of_diabetes: args.family_history,
            fasting_glucose: args.fasting_glucose,
            postprandial_glucose: args.postprandial_glucose,
            glycated_hemoglobin: args.glycated_hemoglobin,
            diabetes_risk_score: args.risk_score,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see scaled features and artifact loading.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("diabrisk error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> DiabriskResult<()> {
    match cli.command {
        Command::Classify {
            model,
            patient,
            json,
        } => classify(&cli.config, &model, patient.into(), json),
        Command::Compare { patient, json } => compare(&cli.config, patient.into(), json),
        Command::Scale { patient } => scale(patient.into()),
        Command::Models => {
            print!("{}", present::model_list());
            Ok(())
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn load_registry(config_path: &Path) -> DiabriskResult<ModelRegistry> {
    let config = RegistryConfig::from_file(config_path)?;
    let registry = ModelRegistry::load(&config)?;
    info!(config = %config_path.display(), "models loaded");
    Ok(registry)
}

fn classify(config: &Path, model: &str, record: PatientRecord, json: bool) -> DiabriskResult<()> {
    let registry = load_registry(config)?;
    let classifier = RiskClassifier::with_standard_scaling(&registry);

    let assessment = classifier.assess(&record, model)?;

    if json {
        println!("{}", to_json(&assessment));
    } else {
        print!("{}", present::assessment(&assessment));
    }
    Ok(())
}

fn compare(config: &Path, record: PatientRecord, json: bool) -> DiabriskResult<()> {
    let registry = load_registry(config)?;
    let classifier = RiskClassifier::with_standard_scaling(&registry);

    let assessments = classifier.assess_all(&record)?;

    if json {
        println!("{}", to_json(&assessments));
    } else {
        print!("{}", present::comparison(&record));
        println!();
        print!("{}", present::model_comparison(&assessments));
    }
    Ok(())
}

fn scale(record: PatientRecord) -> DiabriskResult<()> {
    validate_record(&record)?;
    let scaler = FeatureScaler::standard();
    let scaled = scaler.apply(&record);
    print!("{}", present::scaled(&record, &scaled));
    Ok(())
}

/// # Panics
///
/// Panics if `value` cannot be serialized, which cannot happen for the
/// plain-data assessment types.
fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).expect("assessments must always be serializable to JSON")
}
