use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use thiserror::Error;

use kira_discrimqc::input::{InputError, InputSource, load_input};
use kira_discrimqc::model::DiscrError;
use kira_discrimqc::model::distance::DistanceMetric;
use kira_discrimqc::model::options::DiscrOptions;
use kira_discrimqc::pipeline::stage1_distance::run_stage1;
use kira_discrimqc::pipeline::stage2_rdf::run_stage2;
use kira_discrimqc::pipeline::stage3_discr::compute_discriminability;
use kira_discrimqc::pipeline::stage4_permutation::permutation_test;
use kira_discrimqc::pipeline::stage5_report::{Stage5Input, write_reports};
use kira_discrimqc::report::{InputSummary, SummaryData, ToolMeta, format_f64_6, rdf_stats};
use kira_discrimqc::tracing::init_logging;

#[derive(Debug, Parser)]
#[command(
    name = "kira-discrimqc",
    version,
    about = "Discriminability of repeated measurements across subjects"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score per-scan reliability and dataset discriminability.
    Run(RunArgs),
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["distances", "features"])))]
struct RunArgs {
    /// Precomputed N×N distance matrix (tsv/csv, optionally .gz).
    #[arg(long)]
    distances: Option<PathBuf>,

    /// One flattened feature vector per scan; distances are computed with --metric.
    #[arg(long)]
    features: Option<PathBuf>,

    /// Subject label per scan, one per line.
    #[arg(long)]
    labels: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// euclidean | cityblock | cosine | correlation
    #[arg(long, default_value = "euclidean")]
    metric: DistanceMetric,

    /// Scores at or below this value are treated as outliers.
    #[arg(long, default_value_t = 0.0)]
    threshold: f64,

    /// Average every defined score instead of dropping outliers.
    #[arg(long, default_value_t = false)]
    keep_outliers: bool,

    /// Report outlier and unique-id counts while aggregating.
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Label permutations for the significance test; 0 skips it.
    #[arg(long, default_value_t = 0)]
    permutations: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Clone)]
struct RunConfig {
    source: InputSource,
    labels_path: PathBuf,
    out_dir: PathBuf,
    options: DiscrOptions,
    permutations: Option<usize>,
    seed: u64,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        let source = match args.distances {
            Some(path) => InputSource::Distances(path),
            None => InputSource::Features {
                path: args.features.unwrap_or_default(),
                metric: args.metric,
            },
        };
        RunConfig {
            source,
            labels_path: args.labels,
            out_dir: args.out,
            options: DiscrOptions {
                remove_outliers: !args.keep_outliers,
                threshold: args.threshold,
                verbose: args.verbose,
            },
            permutations: (args.permutations > 0).then_some(args.permutations),
            seed: args.seed,
        }
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Discr(#[from] DiscrError),
    #[error("failed to write reports: {0}")]
    Report(#[from] std::io::Error),
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let config = match cli.command {
        Command::Run(args) => RunConfig::from(args),
    };
    if let Err(err) = run(&config) {
        kira_discrimqc::error!("{err}");
        std::process::exit(1);
    }
}

fn run(config: &RunConfig) -> Result<(), RunError> {
    let bundle = load_input(&config.source, &config.labels_path)?;
    let stage1 = run_stage1(&bundle)?;
    let stage2 = run_stage2(&stage1.distances, &bundle.labels)?;
    let discr = compute_discriminability(&stage2.scores.values(), &config.options);

    let permutation = match config.permutations {
        Some(n) => Some(permutation_test(
            &stage1.distances,
            &bundle.labels,
            &config.options,
            n,
            config.seed,
        )?),
        None => None,
    };

    let summary = SummaryData {
        tool: ToolMeta {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputSummary {
            source: config.source.kind().to_string(),
            path: bundle.table_path.display().to_string(),
            labels: bundle.labels_path.display().to_string(),
            metric: stage1.metric.map(|m| m.name().to_string()),
            n_features: stage1.n_features,
            n_scans: bundle.n_scans(),
            n_subjects: stage2.groups.n_groups(),
            n_repeated_subjects: stage2.groups.n_repeated_groups(),
        },
        options: config.options,
        discriminability: discr,
        rdf: rdf_stats(&stage2.scores.pair_values(), stage2.scores.n_no_repeat()),
        permutation,
    };

    write_reports(
        &Stage5Input {
            labels: &bundle.labels,
            scores: &stage2.scores,
            subjects: &stage2.subjects,
            summary: &summary,
        },
        &config.out_dir,
    )?;

    println!("discriminability\t{}", format_f64_6(discr.score));
    if let Some(perm) = &permutation {
        println!("p_value\t{}", format_f64_6(perm.p_value));
    }

    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
