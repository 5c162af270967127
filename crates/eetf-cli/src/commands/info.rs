//! Curve info command

use anyhow::Result;
use eetf_curve::{Segment, ToneCurve};
use eetf_transfer::pq;
use std::io::{self, Write};

use super::{build_curve, load_operator};
use crate::InfoArgs;

/// Luminances always listed in the mapping table.
const KEY_NITS: &[f64] = &[18.0, 100.0, 250.0, 400.0, 1000.0, 4000.0, 10000.0];

pub fn run(args: InfoArgs) -> Result<()> {
    let op = load_operator(&args.curve)?;
    let curve = build_curve(&op)?;

    let mut nits: Vec<f64> = KEY_NITS.iter().copied().chain(args.nits).collect();
    nits.sort_by(f64::total_cmp);
    nits.dedup();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_info(&mut out, &curve, &nits)?;
    Ok(())
}

fn segment_name(segment: Segment) -> &'static str {
    match segment {
        Segment::Linear => "linear",
        Segment::Knee => "knee",
        Segment::Ceiling => "ceiling",
    }
}

pub fn print_info(out: &mut dyn Write, curve: &ToneCurve, nits: &[f64]) -> Result<()> {
    let spec = curve.spec();
    let line = curve.line();

    writeln!(out, "Line:     y = {} * x + {}", line.slope, line.intercept)?;
    writeln!(out, "Knee:")?;
    for (name, p) in [("start", spec.start()), ("mid", spec.mid()), ("end", spec.end())] {
        writeln!(
            out,
            "  {:<6} x={:.10}  y={:.10}  ({:.1} cd/m2)",
            name,
            p.x,
            p.y,
            pq::code_to_luminance(p.x)
        )?;
    }
    writeln!(
        out,
        "Segments: linear < {:.10} <= knee <= {:.10} < ceiling",
        curve.knee_start_x(),
        curve.knee_end_x()
    )?;
    writeln!(
        out,
        "Ceiling:  {:.10} ({:.2} cd/m2)",
        curve.ceiling(),
        pq::code_to_luminance(curve.ceiling())
    )?;
    writeln!(out, "Jump at knee start: {:.3e}", curve.discontinuity())?;

    writeln!(out)?;
    writeln!(out, "{:>10}  {:>12}  {:>12}  {:>10}  segment", "in nits", "in code", "out code", "out nits")?;
    for &l in nits {
        let x = pq::luminance_to_code(l);
        let y = curve.eval(x);
        writeln!(
            out,
            "{:>10.2}  {:>12.8}  {:>12.8}  {:>10.3}  {}",
            l,
            x,
            y,
            pq::code_to_luminance(y),
            segment_name(curve.segment(x))
        )?;
    }
    Ok(())
}
