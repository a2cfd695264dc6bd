//! SYMBIONT - CLI Entry Point
//!
//! Lineage analysis over recorded artificial-life experiment runs.

use clap::{Parser, Subcommand};
use rand::Rng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use symbiont::forest::{ForestError, LineageForest};
use symbiont::sampler::{NodeStatistic, PathSampler};
use symbiont::seed::SeedRecord;
use symbiont::selection::{classify, TreeSelection};
use symbiont::{report, storage, Config, RoleTables};

#[derive(Parser)]
#[command(name = "symbiont")]
#[command(version)]
#[command(about = "Lineage analysis for artificial-life symbiosis experiments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a descendants report for every fusion tree in every run
    Descendants {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "analysis.yaml")]
        config: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Also write each tree as JSON next to the text report
        #[arg(long)]
        json: bool,
    },

    /// Accumulate role tables over the prolific node of each fusion family
    Prolific {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "analysis.yaml")]
        config: PathBuf,

        /// Output TSV file
        #[arg(short, long, default_value = "fusion_tables_prolific.tsv")]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Accumulate role tables over singleton fusion roots
    Singleton {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "analysis.yaml")]
        config: PathBuf,

        /// Output TSV file
        #[arg(short, long, default_value = "fusion_tables_singleton.tsv")]
        output: PathBuf,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "analysis.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Descendants { config, seed, json } => run_descendants(config, seed, json),
        Commands::Prolific {
            config,
            output,
            seed,
        } => run_prolific(config, output, seed),
        Commands::Singleton { config, output } => run_singleton(config, output),
        Commands::Init { output } => generate_config(output),
    }
}

/// Load the config if the file exists, otherwise fall back to defaults
fn load_config(path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        println!("Loading config from: {:?}", path);
        Config::from_file(path)
    } else {
        println!("Using default configuration");
        Ok(Config::default())
    }
}

/// Resolve the base RNG seed: CLI flag, then config, then entropy
fn resolve_seed(cli_seed: Option<u64>, config: &Config) -> u64 {
    let seed = cli_seed
        .or(config.sampling.seed)
        .unwrap_or_else(|| rand::thread_rng().gen());
    println!("Using seed: {}", seed);
    seed
}

/// Analyze every fusion root of one run's forest, in parallel.
///
/// Per-root seeds are derived from the base seed, so output does not
/// depend on scheduling order.
fn analyze_roots(
    forest: &LineageForest,
    sample_exponent: u32,
    base_seed: u64,
) -> Vec<(u64, Result<Vec<NodeStatistic>, ForestError>)> {
    forest
        .fusion_roots()
        .par_iter()
        .map(|&root| {
            let mut sampler = PathSampler::with_seed(sample_exponent, base_seed.wrapping_add(root));
            (root, sampler.analyze(root, forest))
        })
        .collect()
}

fn run_descendants(
    config_path: PathBuf,
    seed: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config_path)?;
    let base_seed = resolve_seed(seed, &config);
    let exponent = config.sampling.sample_exponent;

    let mut trees = 0usize;
    for run in 1..=config.experiments.num_runs {
        log::info!("run {} ...", run);

        let seed_log = storage::load_run(&config.experiments.experiments_dir, run)?;
        let forest = LineageForest::build(&seed_log.records)?;

        let run_path = storage::run_dir(&config.experiments.experiments_dir, run);
        for (root, result) in analyze_roots(&forest, exponent, base_seed) {
            let stats = result?;
            let name = report::descendants_file_name(root, exponent);
            let mut writer = BufWriter::new(File::create(run_path.join(&name))?);
            report::write_descendants(&mut writer, &stats, exponent)?;
            if json {
                let json_name = name.replace(".txt", ".json");
                let mut writer = BufWriter::new(File::create(run_path.join(json_name))?);
                report::write_descendants_json(&mut writer, &stats)?;
            }
            trees += 1;
        }

        log::info!("run {} done", run);
    }

    println!();
    println!("=== Descendants Complete ===");
    println!("Runs: {}", config.experiments.num_runs);
    println!("Fusion trees reported: {}", trees);

    Ok(())
}

fn run_prolific(
    config_path: PathBuf,
    output: PathBuf,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config_path)?;
    let base_seed = resolve_seed(seed, &config);
    let exponent = config.sampling.sample_exponent;
    let max_parts = config.tables.max_parts;

    let mut tables = RoleTables::new(max_parts);
    for run in 1..=config.experiments.num_runs {
        log::info!("run {} ...", run);

        let seed_log = storage::load_run(&config.experiments.experiments_dir, run)?;
        let forest = LineageForest::build(&seed_log.records)?;
        let by_id = index_records(&seed_log.records);

        for &root in forest.fusion_roots() {
            // Families only
            if forest.children_of(root).is_empty() {
                continue;
            }
            // All seeds in one family share the root's part count
            if let Some(record) = by_id.get(&root) {
                if record.part_count as usize > max_parts {
                    continue;
                }
            }

            let mut sampler = PathSampler::with_seed(exponent, base_seed.wrapping_add(root));
            let stats = sampler.analyze(root, &forest)?;
            if let Some(TreeSelection::Prolific { id, .. }) = classify(&stats) {
                if let Some(record) = by_id.get(&id) {
                    tables.record(&record.roles);
                }
            }
        }

        log::info!("run {} done", run);
    }

    let mut writer = BufWriter::new(File::create(&output)?);
    report::write_role_tables(&mut writer, "Fusion Tables Prolific", &tables)?;

    println!();
    println!("=== Prolific Tables Complete ===");
    println!("Samples: {}", tables.samples());
    println!("Output: {:?}", output);

    Ok(())
}

fn run_singleton(config_path: PathBuf, output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config_path)?;
    let max_parts = config.tables.max_parts;

    let mut tables = RoleTables::new(max_parts);
    for run in 1..=config.experiments.num_runs {
        log::info!("run {} ...", run);

        let seed_log = storage::load_run(&config.experiments.experiments_dir, run)?;
        let forest = LineageForest::build(&seed_log.records)?;
        let by_id = index_records(&seed_log.records);

        for &root in forest.fusion_roots() {
            // Singletons only: fusions with no true children
            if !forest.children_of(root).is_empty() {
                continue;
            }
            if let Some(record) = by_id.get(&root) {
                if record.part_count as usize > max_parts {
                    continue;
                }
                tables.record(&record.roles);
            }
        }

        log::info!("run {} done", run);
    }

    let mut writer = BufWriter::new(File::create(&output)?);
    report::write_role_tables(&mut writer, "Fusion Tables Singleton", &tables)?;

    println!();
    println!("=== Singleton Tables Complete ===");
    println!("Samples: {}", tables.samples());
    println!("Output: {:?}", output);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}

/// Map seed IDs to their records for payload lookups
fn index_records(records: &[SeedRecord]) -> HashMap<u64, &SeedRecord> {
    records.iter().map(|r| (r.id, r)).collect()
}
