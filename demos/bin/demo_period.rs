//! Noisy Period Estimation Demo
//!
//! Encodes a period in the phases of a counting register, adds random
//! phase error, and shows how sharply the inverse QFT still recovers it.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use qpe_demos::config::RunConfig;
use qpe_demos::plot::Histogram;
use qpe_demos::runners::{PeriodRun, PeriodRunner};
use qpe_demos::{
    create_spinner, print_header, print_info, print_result, print_section, print_success,
};

/// Widest bar of the histogram, in blocks.
const BAR_WIDTH: usize = 50;

#[derive(Parser, Debug)]
#[command(name = "demo-period")]
#[command(about = "Estimate a period with a noisy phase estimation circuit")]
struct Args {
    /// Number of counting qubits
    #[arg(short = 'n', long)]
    qubits: Option<u32>,

    /// Period T to encode
    #[arg(short = 't', long, allow_negative_numbers = true)]
    period: Option<f64>,

    /// Relative phase error range
    #[arg(short, long)]
    error_range: Option<f64>,

    /// Number of shots
    #[arg(short, long)]
    shots: Option<u32>,

    /// Seed for phase noise and sampling
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with run settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write counts and estimate to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print the generated circuit
    #[arg(long)]
    show_circuit: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Resolve the run configuration: defaults, then file, then flags.
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => RunConfig::default(),
        };
        if let Some(n) = self.qubits {
            config.num_qubits = n;
        }
        if let Some(t) = self.period {
            config.period = t;
        }
        if let Some(r) = self.error_range {
            config.error_range = r;
        }
        if let Some(s) = self.shots {
            config.shots = s;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn write_json(path: &PathBuf, config: &RunConfig, run: &PeriodRun) -> Result<()> {
    let report = json!({
        "config": config,
        "counts": run.result.counts,
        "shots": run.result.shots,
        "execution_time_ms": run.result.execution_time_ms,
        "phase_errors": run.circuit.phase_errors,
        "estimate": run.estimate,
    });
    let text = serde_json::to_string_pretty(&report)?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

fn run(args: &Args) -> Result<()> {
    let config = args.run_config()?;
    let runner = PeriodRunner::new(config).context("invalid run configuration")?;
    let config = runner.config();

    print_header("Noisy Quantum Period Estimation");

    print_section("Problem Setup");
    print_result("Counting qubits", config.num_qubits);
    print_result("Period T", config.period);
    print_result(
        "Phase error",
        format!(
            "±{:.4} (±{:.1}% of T)",
            config.circuit_params().error_bound(),
            config.error_range * 100.0
        ),
    );
    print_result("Shots", config.shots);
    if let Some(seed) = config.seed {
        print_result("Seed", seed);
    }

    let spinner = create_spinner("Simulating...");
    let outcome = runner.run();
    spinner.finish_and_clear();
    let run = outcome.context("period estimation failed")?;

    print_section("Circuit");
    let circuit = &run.circuit.circuit;
    print_result("Depth", circuit.depth());
    print_result("Operations", circuit.num_ops());
    print_result(
        "Gate counts",
        circuit
            .count_ops()
            .iter()
            .map(|(name, n)| format!("{name}={n}"))
            .collect::<Vec<_>>()
            .join(", "),
    );
    if args.show_circuit {
        println!();
        print!("{circuit}");
    }

    print_section("Measurement Histogram");
    Histogram::from_counts(&run.result.counts).print(BAR_WIDTH);

    print_section("Estimate");
    let estimate = &run.estimate;
    print_result(
        "Most frequent",
        format!("|{}⟩ = {}", estimate.bitstring, estimate.value),
    );
    print_result("Frequency", format!("{:.1}%", estimate.probability * 100.0));
    print_result("Weighted mean", format!("{:.3}", estimate.mean));
    print_result(
        "Deviation from T",
        format!("{:.3}", estimate.deviation(config.period)),
    );
    if let Some(ms) = run.result.execution_time_ms {
        print_result("Execution time", format!("{} ms", style(ms).yellow()));
    }

    if let Some(path) = &args.json {
        write_json(path, config, &run)?;
        print_info(&format!("Results written to {}", path.display()));
    }

    println!();
    print_success("Period estimation demo complete!");
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("demo-period").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_uses_defaults() {
        let args = parse(&[]);
        assert_eq!(args.verbose, 0);
        assert!(!args.show_circuit);
        assert_eq!(args.run_config().unwrap(), RunConfig::default());
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&["-n", "4", "-t", "2.5", "-e", "0.0", "-s", "10", "-vv"]);
        let config = args.run_config().unwrap();
        assert_eq!(config.num_qubits, 4);
        assert_eq!(config.period, 2.5);
        assert_eq!(config.error_range, 0.0);
        assert_eq!(config.shots, 10);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_negative_period() {
        assert_eq!(parse(&["-t", "-2.5"]).run_config().unwrap().period, -2.5);
        assert_eq!(parse(&["--period", "-3"]).run_config().unwrap().period, -3.0);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(
            &path,
            r#"{"num_qubits": 5, "period": 2.0, "shots": 64, "seed": 1}"#,
        )
        .unwrap();
        let path_arg = path.to_str().unwrap();

        let config = parse(&["--config", path_arg, "--qubits", "6", "--seed", "9"])
            .run_config()
            .unwrap();

        // Flags win.
        assert_eq!(config.num_qubits, 6);
        assert_eq!(config.seed, Some(9));
        // The file fills what the flags leave out.
        assert_eq!(config.period, 2.0);
        assert_eq!(config.shots, 64);
        // Defaults fill the rest.
        assert_eq!(config.error_range, 0.1);
        assert_eq!(config.max_qubits, 20);
    }

    #[test]
    fn test_config_seed_kept_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{"seed": 42}"#).unwrap();

        let config = parse(&["--config", path.to_str().unwrap()])
            .run_config()
            .unwrap();
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_missing_config_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = parse(&["--config", path.to_str().unwrap()])
            .run_config()
            .unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }

    #[test]
    fn test_output_paths_and_switches() {
        let args = parse(&["--json", "out.json", "--show-circuit"]);
        assert_eq!(args.json, Some(PathBuf::from("out.json")));
        assert!(args.show_circuit);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Args::try_parse_from(["demo-period", "--qubits", "-1"]).is_err());
        assert!(Args::try_parse_from(["demo-period", "--shots", "many"]).is_err());
    }
}
