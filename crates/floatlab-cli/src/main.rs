use std::io::{self, BufRead, IsTerminal};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use serde::Serialize;

use floatlab::prelude::{
    probe_with_trace, Comparison, ComparisonConfig, EpsilonReport, FloatLayout, Polynomial,
    PrecisionKind, ProbeConfig, ProbeConfigBuilder, Scalar, Scenario,
};

mod input;
mod report;

use report::TraceRow;

/// Machine epsilon and polynomial evaluation experiments
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Command {
    /// Print the IEEE 754 layout of each precision
    Layout {
        #[clap(flatten)]
        precision: PrecisionArg,
    },

    /// Measure machine epsilon by repeated halving
    Epsilon {
        #[clap(flatten)]
        precision: PrecisionArg,

        /// Print the sampled iterations of the halving loop
        #[clap(short, long)]
        trace: bool,

        #[clap(flatten)]
        sampling: TraceSampling,
    },

    /// Compare classical and Horner polynomial evaluation
    Compare {
        #[clap(flatten)]
        settings: CompareSettings,
    },

    /// Run every experiment with default settings
    Demo,
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
enum PrecisionChoice {
    Single,
    Double,
    All,
}

impl PrecisionChoice {
    fn kinds(self) -> Vec<PrecisionKind> {
        match self {
            Self::Single => vec![PrecisionKind::Single],
            Self::Double => vec![PrecisionKind::Double],
            Self::All => PrecisionKind::ALL.to_vec(),
        }
    }
}

#[derive(Parser)]
struct PrecisionArg {
    /// Precision to report on
    #[clap(short, long, value_enum, default_value_t = PrecisionChoice::All)]
    precision: PrecisionChoice,
}

#[derive(Parser)]
struct TraceSampling {
    /// Number of leading iterations always shown with --trace
    #[clap(long, default_value_t = ProbeConfig::default().head)]
    head: usize,

    /// Show every n-th iteration after the head with --trace
    #[clap(long, default_value_t = ProbeConfig::default().stride)]
    stride: usize,
}

impl TraceSampling {
    fn config(&self) -> Result<ProbeConfig> {
        ProbeConfigBuilder::new()
            .head(self.head)
            .stride(self.stride)
            .build()
            .context("invalid trace sampling")
    }
}

#[derive(Parser)]
struct CompareSettings {
    /// Working precision of the evaluation
    #[clap(short, long, value_enum, default_value_t = PrecisionChoice::Single)]
    precision: PrecisionChoice,

    /// Ascending coefficients a0,a1,...,an (defaults to (x-1)^3)
    #[clap(short, long, allow_hyphen_values = true)]
    coefficients: Option<String>,

    /// Evaluation point (defaults to 1.001)
    #[clap(long, allow_negative_numbers = true)]
    point: Option<f64>,

    /// Exact value at the point (defaults to the double-precision Horner
    /// value when the polynomial or point is customised)
    #[clap(long, allow_negative_numbers = true)]
    exact: Option<f64>,

    /// Read the coefficients from standard input
    #[clap(short, long, conflicts_with = "coefficients", requires = "degree")]
    interactive: bool,

    /// Degree of the polynomial read with --interactive
    #[clap(short, long)]
    degree: Option<usize>,

    /// Agreement tolerance, in multiples of the working precision's epsilon
    #[clap(long, default_value_t = ComparisonConfig::default().tolerance_factor)]
    tolerance_factor: f64,
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
struct EpsilonOutput {
    report: EpsilonReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Vec<TraceRow>>,
}

#[derive(Serialize)]
struct ComparisonOutput {
    scenario: Scenario,
    polynomial: String,
    comparisons: Vec<Comparison>,
}

#[derive(Serialize)]
struct DemoOutput {
    layouts: Vec<FloatLayout>,
    epsilon: Vec<EpsilonOutput>,
    comparison: ComparisonOutput,
}

fn run_epsilon(kind: PrecisionKind, sampling: &ProbeConfig, trace: bool) -> EpsilonOutput {
    fn traced<T: Scalar>(sampling: &ProbeConfig) -> (EpsilonReport, Vec<TraceRow>) {
        let (probe, steps) = probe_with_trace::<T>(sampling);
        (probe.report(), steps.iter().map(TraceRow::from).collect())
    }

    let start = Instant::now();
    let (report, rows) = match kind {
        PrecisionKind::Single => traced::<f32>(sampling),
        PrecisionKind::Double => traced::<f64>(sampling),
    };
    info!("Probed {kind} precision in {:?}", start.elapsed());

    if !report.matches_library_epsilon() {
        warn!(
            "measured {kind} epsilon {:e} differs from the library constant {:e}",
            report.epsilon,
            kind.epsilon()
        );
    }

    EpsilonOutput {
        report,
        trace: trace.then_some(rows),
    }
}

/// Turn the compare settings into a scenario, reading coefficients from
/// `reader` in interactive mode.
fn build_scenario<R: BufRead>(settings: &CompareSettings, reader: R) -> Result<Scenario> {
    let custom_coefficients = if settings.interactive {
        let Some(degree) = settings.degree else {
            bail!("--interactive requires --degree");
        };
        Some(
            input::read_coefficients(reader, io::stderr(), degree)
                .context("failed to read coefficients")?,
        )
    } else if let Some(text) = &settings.coefficients {
        Some(input::parse_coefficient_list(text).context("failed to parse --coefficients")?)
    } else {
        None
    };

    let default = Scenario::triple_root();
    let point = settings.point.unwrap_or(default.point);
    if custom_coefficients.is_none() && point == default.point {
        return Ok(match settings.exact {
            Some(exact) => Scenario { exact, ..default },
            None => default,
        });
    }

    let coefficients = custom_coefficients.unwrap_or(default.coefficients);
    let exact = match settings.exact {
        Some(exact) => exact,
        None => {
            let reference = Polynomial::new(coefficients.clone())?.evaluate_horner(point);
            info!("Using double-precision Horner value {reference:e} as exact reference");
            reference
        }
    };

    Ok(Scenario::new(
        "custom",
        report::format_polynomial(&coefficients),
        coefficients,
        point,
        exact,
    ))
}

fn run_compare(settings: &CompareSettings) -> Result<ComparisonOutput> {
    let stdin = io::stdin();
    if settings.interactive && stdin.is_terminal() {
        if let Some(degree) = settings.degree {
            eprintln!("Enter the coefficients a[0]..a[{degree}] in ascending order:");
        }
    }
    let scenario = build_scenario(settings, stdin.lock())?;
    evaluate_scenario(scenario, settings)
}

fn evaluate_scenario(scenario: Scenario, settings: &CompareSettings) -> Result<ComparisonOutput> {
    let config = ComparisonConfig::new().with_tolerance_factor(settings.tolerance_factor);

    let start = Instant::now();
    let comparisons = settings
        .precision
        .kinds()
        .into_iter()
        .map(|kind| scenario.compare_at(kind, &config))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to evaluate scenario `{}`", scenario.name))?;
    info!("Evaluated {} comparison(s) in {:?}", comparisons.len(), start.elapsed());

    Ok(ComparisonOutput {
        polynomial: report::format_polynomial(&scenario.coefficients),
        scenario,
        comparisons,
    })
}

fn print_comparison(output: &ComparisonOutput) {
    println!("Scenario: {} = {}", output.scenario.name, output.scenario.description);
    for comparison in &output.comparisons {
        println!();
        print!("{}", report::format_comparison(comparison, &output.polynomial));
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.cmd {
        Command::Layout { precision } => {
            let layouts: Vec<FloatLayout> =
                precision.precision.kinds().into_iter().map(FloatLayout::of).collect();
            match args.format {
                OutputFormat::Json => print_json(&layouts)?,
                OutputFormat::Text => {
                    print!("{}", report::heading("IEEE 754 REPRESENTATION"));
                    for layout in &layouts {
                        println!();
                        print!("{}", report::format_layout(layout));
                    }
                }
            }
        }
        Command::Epsilon {
            precision,
            trace,
            sampling,
        } => {
            let sampling = sampling.config()?;
            let outputs: Vec<EpsilonOutput> = precision
                .precision
                .kinds()
                .into_iter()
                .map(|kind| run_epsilon(kind, &sampling, trace))
                .collect();
            match args.format {
                OutputFormat::Json => print_json(&outputs)?,
                OutputFormat::Text => {
                    for output in &outputs {
                        println!();
                        print!(
                            "{}",
                            report::format_epsilon(&output.report, output.trace.as_deref())
                        );
                    }
                }
            }
        }
        Command::Compare { settings } => {
            let output = run_compare(&settings)?;
            match args.format {
                OutputFormat::Json => print_json(&output)?,
                OutputFormat::Text => {
                    print!("{}", report::heading("CLASSICAL vs HORNER"));
                    print_comparison(&output);
                }
            }
        }
        Command::Demo => {
            let start = Instant::now();
            let layouts: Vec<FloatLayout> =
                PrecisionKind::ALL.into_iter().map(FloatLayout::of).collect();
            let epsilon: Vec<EpsilonOutput> = PrecisionKind::ALL
                .into_iter()
                .map(|kind| run_epsilon(kind, &ProbeConfig::default(), true))
                .collect();
            let settings = CompareSettings {
                precision: PrecisionChoice::All,
                coefficients: None,
                point: None,
                exact: None,
                interactive: false,
                degree: None,
                tolerance_factor: ComparisonConfig::default().tolerance_factor,
            };
            let comparison = evaluate_scenario(Scenario::triple_root(), &settings)?;
            info!("Ran demonstration in {:?}", start.elapsed());

            let output = DemoOutput {
                layouts,
                epsilon,
                comparison,
            };
            match args.format {
                OutputFormat::Json => print_json(&output)?,
                OutputFormat::Text => {
                    print!("{}", report::heading("MACHINE PRECISION AND IEEE 754"));
                    for layout in &output.layouts {
                        println!();
                        print!("{}", report::format_layout(layout));
                    }
                    for run in &output.epsilon {
                        println!();
                        print!(
                            "{}",
                            report::format_epsilon(&run.report, run.trace.as_deref())
                        );
                    }
                    println!();
                    print!("{}", report::heading("CLASSICAL vs HORNER"));
                    print_comparison(&output.comparison);
                    println!();
                    print!("{}", report::conclusions());
                }
            }
        }
    }
    Ok(())
}
