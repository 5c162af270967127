//! Measured EETF samples and linear-region fitting.
//!
//! A measured operator is a table of PQ code value in to PQ code value
//! out, typically read off a ramp that went through the real operator.
//! The straight-line region is characterised from the outputs at 18%
//! gray and 100 cd/m2 white.
//!
//! The real operator emits SDR display codes rather than PQ. Those are
//! brought into the PQ domain with [`MeasuredEetf::from_sdr_codes`] or
//! [`MeasuredEetf::sdr_to_pq`] before fitting.

use eetf_transfer::{gamma, pq};

use crate::{ControlPoint, CurveError, CurveResult, LinearSegment, ToneCurve};

/// 18% gray, in cd/m2.
pub const GRAY_18_NITS: f64 = 18.0;
/// SDR reference white, in cd/m2.
pub const WHITE_100_NITS: f64 = 100.0;
/// HDR graphics white, in cd/m2.
pub const WHITE_250_NITS: f64 = 250.0;

/// Measured EETF samples sorted by input code value.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredEetf {
    points: Vec<ControlPoint>,
}

/// Outputs at the reference luminances and the lines fitted from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EetfReport {
    /// Input code of 18 cd/m2 and the measured output.
    pub gray_18: ControlPoint,
    /// Input code of 100 cd/m2 and the measured output.
    pub white_100: ControlPoint,
    /// Input code of 250 cd/m2 and the measured output.
    pub white_250: ControlPoint,
    /// Line through the gray and 100 cd/m2 measurements.
    pub two_point: LinearSegment,
    /// Line of the requested slope through the 100 cd/m2 measurement.
    pub fixed_slope: LinearSegment,
}

impl MeasuredEetf {
    /// Outputs sampled uniformly over [0, 1] inputs.
    ///
    /// # Errors
    ///
    /// [`CurveError::InvalidParameter`] for fewer than two samples or a
    /// non-finite value.
    pub fn from_uniform(values: &[f64]) -> CurveResult<Self> {
        if values.len() < 2 {
            return Err(CurveError::InvalidParameter(format!(
                "need at least 2 samples, got {}",
                values.len()
            )));
        }
        let step = (values.len() - 1) as f64;
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &y)| ControlPoint::new(i as f64 / step, y))
            .collect();
        Self::from_points(points)
    }

    /// SDR display codes sampled uniformly over [0, 1] PQ inputs.
    ///
    /// Equivalent to [`MeasuredEetf::from_uniform`] followed by
    /// [`MeasuredEetf::sdr_to_pq`].
    ///
    /// ```rust
    /// use eetf_curve::MeasuredEetf;
    ///
    /// // Full-scale SDR white is 100 cd/m2, i.e. PQ 0.508.
    /// let m = MeasuredEetf::from_sdr_codes(&[0.0, 1.0], 2.4)?;
    /// assert!((m.points()[1].y - 0.508078).abs() < 1e-6);
    /// # Ok::<(), eetf_curve::CurveError>(())
    /// ```
    pub fn from_sdr_codes(values: &[f64], display_gamma: f64) -> CurveResult<Self> {
        Self::from_uniform(values)?.sdr_to_pq(display_gamma)
    }

    /// Re-encodes outputs given as SDR display codes as PQ code values.
    ///
    /// Each output is decoded with `display_gamma` on a
    /// [`gamma::SDR_PEAK`] display, then the luminance goes through the
    /// PQ inverse EOTF. Inputs are left as they are.
    ///
    /// # Errors
    ///
    /// [`CurveError::InvalidParameter`] if `display_gamma` is not a
    /// positive finite number.
    pub fn sdr_to_pq(mut self, display_gamma: f64) -> CurveResult<Self> {
        if !(display_gamma.is_finite() && display_gamma > 0.0) {
            return Err(CurveError::InvalidParameter(format!(
                "display gamma must be positive, got {display_gamma}"
            )));
        }
        for p in &mut self.points {
            p.y = pq::luminance_to_code(gamma::sdr_code_to_luminance(p.y, display_gamma));
        }
        tracing::debug!(
            display_gamma,
            samples = self.points.len(),
            "converted SDR outputs to PQ"
        );
        Ok(self)
    }

    /// Arbitrary `(x, y)` samples; they are sorted by x.
    pub fn from_points(mut points: Vec<ControlPoint>) -> CurveResult<Self> {
        if points.len() < 2 {
            return Err(CurveError::InvalidParameter(format!(
                "need at least 2 samples, got {}",
                points.len()
            )));
        }
        if let Some(p) = points.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(CurveError::InvalidParameter(format!("non-finite sample {p:?}")));
        }
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Ok(Self { points })
    }

    /// Parses one sample per line: either `y` (uniform inputs) or `x,y`.
    ///
    /// Blank lines and lines starting with `#` are skipped, as is a first
    /// line that does not parse as numbers (a header).
    pub fn parse_csv(text: &str) -> CurveResult<Self> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parsed: Result<Vec<f64>, _> =
                line.split(',').map(|f| f.trim().parse::<f64>()).collect();
            match parsed {
                Ok(row) => rows.push(row),
                Err(_) if rows.is_empty() => {
                    tracing::debug!(line = lineno + 1, "skipping header");
                }
                Err(e) => {
                    return Err(CurveError::InvalidParameter(format!(
                        "line {}: {e}",
                        lineno + 1
                    )));
                }
            }
        }

        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != width) {
            return Err(CurveError::InvalidParameter(
                "rows have differing column counts".into(),
            ));
        }
        match width {
            1 => Self::from_uniform(&rows.iter().map(|r| r[0]).collect::<Vec<_>>()),
            2 => Self::from_points(
                rows.iter()
                    .map(|r| ControlPoint::from((r[0], r[1])))
                    .collect(),
            ),
            0 => Err(CurveError::InvalidParameter("no samples".into())),
            n => Err(CurveError::InvalidParameter(format!(
                "expected 1 or 2 columns, got {n}"
            ))),
        }
    }

    /// Samples in input order.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Output of the sample whose input is nearest to `x`.
    pub fn nearest(&self, x: f64) -> f64 {
        let idx = self.points.partition_point(|p| p.x < x);
        let nearest = match idx {
            0 => 0,
            i if i >= self.points.len() => self.points.len() - 1,
            i if (self.points[i].x - x) < (x - self.points[i - 1].x) => i,
            i => i - 1,
        };
        self.points[nearest].y
    }

    /// `(PQ(nits), measured output at that code)`.
    pub fn at_luminance(&self, nits: f64) -> ControlPoint {
        let x = pq::luminance_to_code(nits);
        ControlPoint::new(x, self.nearest(x))
    }

    /// Measured outputs at 18/100/250 cd/m2 plus the line fits.
    ///
    /// `slope` is the gain of the fixed-slope fit; the reference operator
    /// uses 0.74.
    pub fn reference_report(&self, slope: f64) -> CurveResult<EetfReport> {
        let gray_18 = self.at_luminance(GRAY_18_NITS);
        let white_100 = self.at_luminance(WHITE_100_NITS);
        let white_250 = self.at_luminance(WHITE_250_NITS);

        Ok(EetfReport {
            gray_18,
            white_100,
            white_250,
            two_point: LinearSegment::through(gray_18, white_100)?,
            fixed_slope: LinearSegment::with_slope(slope, white_100),
        })
    }

    /// Largest absolute difference between the samples and `curve`.
    pub fn max_error(&self, curve: &ToneCurve) -> f64 {
        self.points
            .iter()
            .map(|p| (curve.eval(p.x) - p.y).abs())
            .fold(0.0, f64::max)
    }
}
