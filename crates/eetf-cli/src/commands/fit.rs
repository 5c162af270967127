//! Linear-region fit of a measured EETF.
//!
//! Reads a table of measured output code values and reports the outputs
//! at 18% gray and 100/250 cd/m2 together with the two line fits, then
//! how far the modelled curve is from the measurement. With `--sdr-gamma`
//! the outputs are SDR display codes and are moved to PQ first.

use anyhow::{Context, Result};
use eetf_curve::{EetfReport, MeasuredEetf};
use std::io::{self, Write};
use tracing::info;

use super::{build_curve, load_operator};
use crate::FitArgs;

/// Run the fit command.
pub fn run(args: FitArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read: {}", args.input.display()))?;
    let measured = load_measured(&text, args.sdr_gamma)
        .with_context(|| format!("Failed to parse: {}", args.input.display()))?;
    info!(
        samples = measured.points().len(),
        sdr_gamma = ?args.sdr_gamma,
        "loaded measured EETF"
    );

    let op = load_operator(&args.curve)?;
    let report = measured.reference_report(op.slope)?;
    let curve = build_curve(&op)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_report(&mut out, &report)?;
    writeln!(out, "Max |model - measured|: {:.6}", measured.max_error(&curve))?;
    Ok(())
}

/// Parse a measured table, converting SDR display outputs to PQ when a
/// display gamma is given.
pub fn load_measured(text: &str, sdr_gamma: Option<f64>) -> Result<MeasuredEetf> {
    let measured = MeasuredEetf::parse_csv(text)?;
    Ok(match sdr_gamma {
        Some(g) => measured.sdr_to_pq(g).context("Invalid --sdr-gamma")?,
        None => measured,
    })
}

pub fn print_report(out: &mut dyn Write, report: &EetfReport) -> Result<()> {
    for (name, p) in [
        ("18% gray", report.gray_18),
        ("100 white", report.white_100),
        ("250 white", report.white_250),
    ] {
        writeln!(out, "{:<10} in={:.8}  out={:.8}", name, p.x, p.y)?;
    }
    writeln!(
        out,
        "Two-point fit:   y = {:.6} * x + {:.6}",
        report.two_point.slope, report.two_point.intercept
    )?;
    writeln!(
        out,
        "Fixed-slope fit: y = {:.6} * x + {:.6}",
        report.fixed_slope.slope, report.fixed_slope.intercept
    )?;
    Ok(())
}
