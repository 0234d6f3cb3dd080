//! Command-line interface for batch processing CSV datasets
//!
//! Runs the quadrat correlation (and optionally a cross pair-correlation
//! function) over one CSV file or every CSV in a directory, printing result
//! tables and optionally exporting JSON reports and scatter plots.

use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::analysis::pcf::{CrossPcfResult, PcfConfig, cross_pcf};
use crate::analysis::quadrat::{QuadratAnalysis, QuadratConfig, QuadratCorrelationResult};
use crate::io::configuration::{
    ANALYSIS_SUFFIX, COLUMN_CELL_TYPE, DEFAULT_ANNULUS_STEP, DEFAULT_ANNULUS_WIDTH,
    DEFAULT_MAX_RADIUS, DEFAULT_MIN_OBSERVATIONS, DEFAULT_PERMUTATIONS, DEFAULT_QUADRAT_SIDE,
    DEFAULT_SEED, PLOT_SUFFIX,
};
use crate::io::dataset::load_domain;
use crate::io::error::{AnalysisError, Result, data_format};
use crate::io::plot::{PlotConfig, export_scatter_png};
use crate::io::progress::ReplicateProgress;
use crate::spatial::labels::Domain;

#[derive(Parser)]
#[command(name = "pointcorr")]
#[command(
    author,
    version,
    about = "Correlation statistics for labelled 2D point patterns"
)]
/// Command-line arguments for the analysis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input CSV file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Categorical label column driving both statistics
    #[arg(short, long, default_value = COLUMN_CELL_TYPE)]
    pub label: String,

    /// Random seed for reproducible permutation nulls
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of permutation replicates
    #[arg(short = 'n', long, default_value_t = DEFAULT_PERMUTATIONS)]
    pub permutations: usize,

    /// Quadrat side length in coordinate units
    #[arg(short = 'Q', long, default_value_t = DEFAULT_QUADRAT_SIDE)]
    pub quadrat_size: f64,

    /// Minimum observations for a quadrat or label value to be retained
    #[arg(short = 'm', long, default_value_t = DEFAULT_MIN_OBSERVATIONS)]
    pub min_observations: usize,

    /// Source population for the pair-correlation function
    #[arg(long, value_name = "VALUE")]
    pub pcf_from: Option<String>,

    /// Target population for the pair-correlation function (defaults to the source)
    #[arg(long, value_name = "VALUE")]
    pub pcf_to: Option<String>,

    /// Maximum pair-correlation radius
    #[arg(long, default_value_t = DEFAULT_MAX_RADIUS)]
    pub max_radius: f64,

    /// Annulus width for the pair-correlation function
    #[arg(long, default_value_t = DEFAULT_ANNULUS_WIDTH)]
    pub annulus_width: f64,

    /// Step between successive annulus inner radii
    #[arg(long, default_value_t = DEFAULT_ANNULUS_STEP)]
    pub step: f64,

    /// Export a scatter plot PNG per processed file
    #[arg(short = 'p', long)]
    pub plot: bool,

    /// Export analysis results as JSON per processed file
    #[arg(short, long)]
    pub analysis: bool,

    /// Suppress progress output and result tables
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if a JSON export already exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }
}

/// Orchestrates batch processing of CSV datasets
pub struct BatchRunner {
    cli: Cli,
}

#[derive(Serialize)]
struct AnalysisReport<'result> {
    quadrat: &'result QuadratCorrelationResult,
    pcf: Option<&'result CrossPcfResult>,
}

impl BatchRunner {
    /// Create a runner from parsed CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, dataset loading, or any
    /// analysis fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        for file in &files {
            self.process_file(file)?;
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("csv") {
                Ok(vec![self.cli.target.clone()])
            } else {
                Err(data_format(&"target", &"target file must be a CSV dataset"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("csv")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(data_format(
                &"target",
                &"target must be a CSV file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::suffixed_path(input_path, ANALYSIS_SUFFIX, "json");
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&self, input_path: &Path) -> Result<()> {
        let domain = load_domain(input_path)?;

        let quadrat = self.run_quadrat(&domain, input_path)?;
        let pcf = self.run_pcf(&domain)?;

        if !self.cli.quiet {
            Self::print_quadrat(input_path, &quadrat);
            if let Some(ref result) = pcf {
                Self::print_pcf(result);
            }
        }

        if self.cli.plot {
            let plot_path = Self::suffixed_path(input_path, PLOT_SUFFIX, "png");
            export_scatter_png(&domain, &self.cli.label, &PlotConfig::default(), &plot_path)?;
        }

        if self.cli.analysis {
            let report = AnalysisReport {
                quadrat: &quadrat,
                pcf: pcf.as_ref(),
            };
            let json_path = Self::suffixed_path(input_path, ANALYSIS_SUFFIX, "json");
            Self::export_report(&report, &json_path)?;
        }

        Ok(())
    }

    fn run_quadrat(&self, domain: &Domain, input_path: &Path) -> Result<QuadratCorrelationResult> {
        let config = QuadratConfig {
            side: self.cli.quadrat_size,
            min_observations: self.cli.min_observations,
            permutations: self.cli.permutations,
            seed: self.cli.seed,
        };

        let mut analysis = QuadratAnalysis::new(domain, &self.cli.label, &config)?;
        let progress = ReplicateProgress::new(
            analysis.permutations(),
            &input_path.display().to_string(),
            self.cli.quiet,
        );

        for _ in 0..analysis.permutations() {
            analysis.run_replicate()?;
            progress.advance();
        }
        progress.finish();

        Ok(analysis.finish())
    }

    fn run_pcf(&self, domain: &Domain) -> Result<Option<CrossPcfResult>> {
        let Some(ref from_value) = self.cli.pcf_from else {
            return Ok(None);
        };
        let to_value = self.cli.pcf_to.as_ref().unwrap_or(from_value);

        let config = PcfConfig {
            max_radius: self.cli.max_radius,
            annulus_width: self.cli.annulus_width,
            step: self.cli.step,
        };

        cross_pcf(domain, &self.cli.label, from_value, to_value, &config).map(Some)
    }

    // Allow print for result tables on stdout
    #[allow(clippy::print_stdout)]
    fn print_quadrat(input_path: &Path, result: &QuadratCorrelationResult) {
        println!(
            "{}: quadrat correlation over {} regions, {} permutations",
            input_path.display(),
            result.regions_used,
            result.permutations
        );

        let name_width = result
            .levels
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(4);

        print!("{:>name_width$}", "SES");
        for level in &result.levels {
            print!(" {level:>10}");
        }
        println!();

        for (row, level) in result.levels.iter().enumerate() {
            print!("{level:>name_width$}");
            for column in 0..result.levels.len() {
                let value = result.ses.get([row, column]).copied().unwrap_or(0.0);
                print!(" {value:>10.3}");
            }
            println!();
        }
    }

    // Allow print for result tables on stdout
    #[allow(clippy::print_stdout)]
    fn print_pcf(result: &CrossPcfResult) {
        println!("cross-PCF '{}' vs '{}'", result.from, result.to);
        println!("{:>10} {:>10}", "r", "g(r)");
        for sample in &result.samples {
            println!("{:>10.2} {:>10.4}", sample.radius, sample.g);
        }
    }

    fn export_report(report: &AnalysisReport<'_>, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| AnalysisError::FileSystem {
            path: path.to_path_buf(),
            operation: "create JSON export",
            source: e,
        })?;

        serde_json::to_writer_pretty(file, report).map_err(|e| {
            crate::io::error::computation_error("JSON serialization", &e.to_string())
        })
    }

    fn suffixed_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        input_path.parent().map_or_else(
            || PathBuf::from(&output_name),
            |parent| parent.join(&output_name),
        )
    }
}
