//! Noisy Quantum Period Estimation
//!
//! Builds a phase estimation circuit whose rotations encode a period `T`,
//! perturbs each rotation with uniform noise, simulates it on the local
//! statevector backend and charts the measured distribution.
//!
//! ```text
//!   build circuit ──→ simulate ──→ tally counts ──→ plot
//! ```
//!
//! ```
//! use qpe_demos::config::RunConfig;
//! use qpe_demos::plot::Histogram;
//! use qpe_demos::runners::PeriodRunner;
//!
//! let config = RunConfig { seed: Some(1), ..RunConfig::default() };
//! let run = PeriodRunner::new(config)?.run()?;
//!
//! assert_eq!(run.result.counts.total_shots(), 1024);
//! println!("{}", Histogram::from_counts(&run.result.counts).render(40));
//! # Ok::<(), qpe_demos::DemoError>(())
//! ```

pub mod circuits;
pub mod config;
pub mod error;
pub mod plot;
pub mod runners;

pub use error::{DemoError, DemoResult};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner shown while a simulation runs.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

const HEADER_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 40;

/// Print a boxed demo title.
pub fn print_header(title: &str) {
    let rule = style("═".repeat(HEADER_WIDTH)).cyan();
    println!("\n{rule}");
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{rule}\n");
}

/// Print a section heading with an underline.
pub fn print_section(title: &str) {
    println!("\n{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(SECTION_WIDTH)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}
