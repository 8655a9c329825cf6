//! Text rendering of layouts, probe results and comparisons.

use std::fmt::Write;

use floatlab::prelude::*;
use serde::Serialize;

const RULE: &str = "====================================================================";

/// One row of a probe trace, widened to f64.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceRow {
    /// Iteration index.
    pub iteration: usize,
    /// Trial value.
    pub trial: f64,
    /// `1.0 + trial` in the working precision.
    pub sum: f64,
}

impl<T: Scalar> From<&ProbeStep<T>> for TraceRow {
    fn from(step: &ProbeStep<T>) -> Self {
        Self {
            iteration: step.iteration,
            trial: Scalar::to_f64(step.trial),
            sum: Scalar::to_f64(step.sum),
        }
    }
}

/// Significant digits printed for values of the given precision.
fn digits(kind: PrecisionKind) -> usize {
    match kind {
        PrecisionKind::Single => 7,
        PrecisionKind::Double => 16,
    }
}

/// Section heading framed by rules.
pub fn heading(title: &str) -> String {
    format!("{RULE}\n  {title}\n{RULE}\n")
}

/// Render ascending coefficients as a polynomial, highest degree first.
///
/// Terms other than the first are preceded by ` + ` when the coefficient is
/// non-negative and by a single space otherwise, so the coefficient's own
/// sign does the work.
pub fn format_polynomial(coefficients: &[f64]) -> String {
    let mut out = String::new();
    let Some(degree) = coefficients.len().checked_sub(1) else {
        return out;
    };

    for i in (0..=degree).rev() {
        let coeff = coefficients[i];
        if i != degree {
            out.push_str(if coeff >= 0.0 { " + " } else { " " });
        }
        if i == 0 {
            let _ = write!(out, "{coeff}");
        } else {
            let _ = write!(out, "{coeff}*x^{i}");
        }
    }
    out
}

/// IEEE 754 layout block for one precision.
pub fn format_layout(layout: &FloatLayout) -> String {
    let mut out = String::new();
    let p = digits(layout.precision);
    let _ = writeln!(
        out,
        "{} ({} bit, {}):",
        layout.precision.name().to_uppercase(),
        layout.total_bits,
        layout.precision.type_name()
    );
    let _ = writeln!(
        out,
        "  Mantissa bits:   {} (+ 1 implicit = {} total)",
        layout.mantissa_bits,
        layout.significand_bits()
    );
    let _ = writeln!(out, "  Exponent bits:   {}", layout.exponent_bits);
    let _ = writeln!(out, "  Sign bits:       {}", layout.sign_bits);
    let _ = writeln!(
        out,
        "  Range:           {:.2e} to {:.2e}",
        layout.min_positive, layout.max
    );
    let _ = writeln!(out, "  Decimal digits:  {}", layout.decimal_digits);
    let _ = writeln!(
        out,
        "  Machine epsilon: {:.*e} = 2^({})",
        p, layout.epsilon, layout.epsilon_exponent
    );
    out
}

/// Probe result, optionally preceded by the sampled iteration table.
pub fn format_epsilon(report: &EpsilonReport, trace: Option<&[TraceRow]>) -> String {
    let mut out = String::new();
    let p = digits(report.precision);

    let _ = writeln!(
        out,
        "Machine epsilon for {} precision",
        report.precision.name()
    );
    if let Some(rows) = trace {
        let _ = writeln!(out, "{:<10}  {:<24}  1.0 + epsilon", "Iteration", "Epsilon");
        for row in rows {
            let _ = writeln!(
                out,
                "{:<10}  {:<24}  {:.*}",
                row.iteration,
                format!("{:.*e}", p, row.trial),
                p,
                row.sum
            );
        }
    }
    let _ = writeln!(out, "  Computed epsilon: {:.*e}", p, report.epsilon);
    let _ = writeln!(out, "  Mantissa bits:    {}", report.mantissa_bits);
    let _ = writeln!(
        out,
        "  Library epsilon:  {}",
        if report.matches_library_epsilon() {
            "matches"
        } else {
            "differs"
        }
    );
    out
}

/// Side-by-side comparison of both strategies.
pub fn format_comparison(comparison: &Comparison, polynomial: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Polynomial:       {polynomial}");
    let _ = writeln!(
        out,
        "Point:            x0 = {} ({} precision)",
        comparison.point,
        comparison.precision.name()
    );
    let _ = writeln!(out, "Exact value:      {:.10e}", comparison.exact);

    for outcome in [&comparison.classical, &comparison.horner] {
        let relative = outcome
            .relative_error
            .map_or_else(|| "n/a".to_string(), |r| format!("{r:.3e}"));
        let _ = writeln!(
            out,
            "{:<17} {:.10e}  abs err {:.3e}  rel err {}  ({} mul, {} add){}",
            format!("{}:", capitalize(&outcome.method)),
            outcome.value,
            outcome.absolute_error,
            relative,
            outcome.operations.multiplications,
            outcome.operations.additions,
            if outcome.agrees { "" } else { "  outside tolerance" }
        );
    }

    let _ = writeln!(out, "Discrepancy:      {:.3e}", comparison.discrepancy);
    let verdict = match comparison.error_ratio() {
        Some(ratio) if comparison.horner_at_least_as_accurate() => {
            format!("Horner is at least as accurate ({ratio:.2}x smaller error)")
        }
        Some(_) => "Classical is more accurate here".to_string(),
        None => "Horner is exact".to_string(),
    };
    let _ = writeln!(out, "{verdict}");
    out
}

/// Closing remarks printed after the full demonstration.
pub fn conclusions() -> String {
    let mut out = heading("CONCLUSIONS");
    let single = FloatLayout::of(PrecisionKind::Single);
    let double = FloatLayout::of(PrecisionKind::Double);
    let _ = writeln!(
        out,
        "1. Machine epsilon is the smallest e such that 1.0 + e > 1.0"
    );
    let _ = writeln!(
        out,
        "2. Single: e = 2^({}) ~ {:.2e}",
        single.epsilon_exponent, single.epsilon
    );
    let _ = writeln!(
        out,
        "3. Double: e = 2^({}) ~ {:.2e}",
        double.epsilon_exponent, double.epsilon
    );
    let _ = writeln!(
        out,
        "4. The number of halvings equals the stored mantissa bits"
    );
    let _ = writeln!(
        out,
        "5. Horner's scheme needs n multiplications instead of O(n^2)"
    );
    let _ = writeln!(out, "   and loses fewer digits near a multiple root");
    let _ = writeln!(out, "6. Never compare floating-point results with ==");
    out.push_str(RULE);
    out.push('\n');
    out
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
