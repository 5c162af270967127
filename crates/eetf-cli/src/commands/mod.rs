//! CLI command implementations

pub mod config;
pub mod fit;
pub mod info;
pub mod sample;

use anyhow::{Context, Result};
use eetf_curve::{ReferenceOperator, ToneCurve};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::CurveArgs;

/// Resolve the operator: defaults, then the config file, then flags.
pub fn load_operator(args: &CurveArgs) -> Result<ReferenceOperator> {
    let mut op = match &args.config {
        Some(path) => ReferenceOperator::from_file(path)
            .with_context(|| format!("Failed to load operator: {}", path.display()))?,
        None => ReferenceOperator::default(),
    };

    if let Some(v) = args.knee_start {
        op.knee_start_nits = v;
    }
    if let Some(v) = args.knee_end {
        op.knee_end_nits = v;
    }
    if let Some(v) = args.slope {
        op.slope = v;
    }
    if let Some(v) = args.intercept {
        op.intercept = v;
    }
    if let Some(v) = args.mid_x {
        op.mid_x = v;
    }
    if let Some(v) = args.ceiling {
        op.ceiling_nits = v;
    }

    op.validate().context("Invalid operator parameters")?;
    debug!(?op, "resolved operator");
    Ok(op)
}

/// Build the tone curve for the resolved operator.
pub fn build_curve(op: &ReferenceOperator) -> Result<ToneCurve> {
    let curve = ToneCurve::from_operator(op).with_context(|| {
        format!(
            "Cannot build knee for {} / {} cd/m2",
            op.knee_start_nits, op.knee_end_nits
        )
    })?;
    info!(
        ks = curve.knee_start_x(),
        ke = curve.knee_end_x(),
        "tone curve ready"
    );
    Ok(curve)
}

/// Writer to a file, or stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Failed to create: {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "knee_start_nits: 300\nslope: 0.7").unwrap();

        let args = CurveArgs {
            config: Some(file.path().to_path_buf()),
            slope: Some(0.75),
            ..Default::default()
        };
        let op = load_operator(&args).unwrap();
        assert_eq!(op.knee_start_nits, 300.0);
        assert_eq!(op.slope, 0.75);
        assert_eq!(op.knee_end_nits, 1000.0);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = CurveArgs {
            ceiling: Some(-1.0),
            ..Default::default()
        };
        assert!(load_operator(&args).is_err());
    }

    #[test]
    fn test_bad_knee_has_context() {
        let op = ReferenceOperator {
            knee_start_nits: 2000.0,
            ..Default::default()
        };
        let err = build_curve(&op).unwrap_err();
        assert!(err.to_string().contains("2000"));
    }
}
