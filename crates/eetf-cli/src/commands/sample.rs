//! Curve sampling command.
//!
//! Prints `x,y` rows (plus an optional SDR column) for plotting the curve
//! against measured data.

use anyhow::{Context, Result, bail};
use eetf_curve::ToneCurve;
use eetf_transfer::{gamma, pq};
use std::io::Write;
use tracing::info;

use super::{build_curve, load_operator, open_output};
use crate::SampleArgs;

/// Run the sample command.
pub fn run(args: SampleArgs) -> Result<()> {
    if args.samples < 2 {
        bail!("Need at least 2 samples, got {}", args.samples);
    }
    if let Some(g) = args.sdr_gamma {
        if !(g.is_finite() && g > 0.0) {
            bail!("SDR gamma must be positive, got {}", g);
        }
    }

    let op = load_operator(&args.curve)?;
    let curve = build_curve(&op)?;

    let mut out = open_output(args.output.as_deref())?;
    write_samples(&mut out, &curve, args.samples, args.luminance, args.sdr_gamma)
        .context("Failed to write samples")?;
    out.flush()?;

    if let Some(path) = &args.output {
        info!("Saved: {}", path.display());
    }
    Ok(())
}

/// Write the CSV header and one row per sample.
pub fn write_samples(
    out: &mut dyn Write,
    curve: &ToneCurve,
    samples: usize,
    luminance: bool,
    sdr_gamma: Option<f64>,
) -> Result<()> {
    let header = if luminance { "x_nits,y_nits" } else { "x,y" };
    match sdr_gamma {
        Some(_) => writeln!(out, "{header},sdr")?,
        None => writeln!(out, "{header}")?,
    }

    for (x, y) in curve.sample(samples) {
        let (cx, cy) = if luminance {
            (pq::code_to_luminance(x), pq::code_to_luminance(y))
        } else {
            (x, y)
        };
        match sdr_gamma {
            Some(g) => {
                let sdr = gamma::luminance_to_sdr_code(pq::code_to_luminance(y), g);
                writeln!(out, "{cx},{cy},{sdr}")?;
            }
            None => writeln!(out, "{cx},{cy}")?,
        }
    }
    Ok(())
}
