//! Piecewise tone curve: line, Bezier knee, flat ceiling.
//!
//! ```text
//!   y
//!   |              knee   ceiling
//!   |            .-~~~~~~~~~~~~~~
//!   |          /
//!   |        /  line
//!   |______/_____________________ x
//!          ks.x       ke.x
//! ```
//!
//! Inputs are code values in [0, 1]. Anything outside is clamped into
//! that range first; NaN passes through unchanged.

use crate::{CurveResult, KneeBezier, KneeCurveSpec, LinearSegment, ReferenceOperator};

/// Which piece of the curve an input falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// `x < knee_start_x`
    Linear,
    /// `knee_start_x <= x <= knee_end_x`
    Knee,
    /// `x > knee_end_x`
    Ceiling,
}

/// Immutable tone curve mapping input code values to output code values.
///
/// Build once per knee configuration, evaluate as often as needed. The
/// type holds no interior mutability and is `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use eetf_curve::{ReferenceOperator, ToneCurve};
///
/// let curve = ToneCurve::from_luminance(&ReferenceOperator::default(), 400.0, 1000.0)?;
/// assert_eq!(curve.eval(0.0), 0.01175);
/// let ys = curve.eval_slice(&[0.1, 0.5, 0.9]);
/// assert_eq!(ys.len(), 3);
/// # Ok::<(), eetf_curve::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCurve {
    line: LinearSegment,
    knee: KneeBezier,
    ceiling: f64,
}

impl ToneCurve {
    /// Joins a line and a validated knee into one curve.
    ///
    /// Continuity is not enforced here; see [`ToneCurve::discontinuity`].
    pub fn new(spec: KneeCurveSpec, line: LinearSegment) -> Self {
        let knee = KneeBezier::new(spec);
        let ceiling = knee.eval(spec.end().x);

        tracing::debug!(
            ks = spec.start().x,
            mid = spec.mid().x,
            ke = spec.end().x,
            ceiling,
            "built tone curve"
        );

        Self { line, knee, ceiling }
    }

    /// Curve for explicit knee luminances (cd/m2) under `op`.
    pub fn from_luminance(
        op: &ReferenceOperator,
        knee_start_nits: f64,
        knee_end_nits: f64,
    ) -> CurveResult<Self> {
        let spec = op.knee_spec(knee_start_nits, knee_end_nits)?;
        Ok(Self::new(spec, op.line()))
    }

    /// Curve for the knee luminances stored in `op`.
    pub fn from_operator(op: &ReferenceOperator) -> CurveResult<Self> {
        Self::from_luminance(op, op.knee_start_nits, op.knee_end_nits)
    }

    /// Knee control points.
    #[inline]
    pub fn spec(&self) -> &KneeCurveSpec {
        self.knee.spec()
    }

    /// The straight-line region.
    #[inline]
    pub fn line(&self) -> LinearSegment {
        self.line
    }

    /// Boundary between the line and the knee.
    #[inline]
    pub fn knee_start_x(&self) -> f64 {
        self.spec().start().x
    }

    /// Boundary between the knee and the ceiling.
    #[inline]
    pub fn knee_end_x(&self) -> f64 {
        self.spec().end().x
    }

    /// Output for every input above the knee.
    #[inline]
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Segment selected by `x` after clamping into [0, 1].
    ///
    /// NaN is reported as [`Segment::Ceiling`].
    #[inline]
    pub fn segment(&self, x: f64) -> Segment {
        let x = x.clamp(0.0, 1.0);
        if x < self.knee_start_x() {
            Segment::Linear
        } else if x <= self.knee_end_x() {
            Segment::Knee
        } else {
            Segment::Ceiling
        }
    }

    /// Evaluates the curve at one input.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        if x.is_nan() {
            return x;
        }
        let x = x.clamp(0.0, 1.0);
        match self.segment(x) {
            Segment::Linear => self.line.eval(x),
            Segment::Knee => self.knee.eval(x),
            Segment::Ceiling => self.ceiling,
        }
    }

    /// Jump of the curve at the knee start.
    ///
    /// The knee end is continuous by construction since the ceiling is
    /// the knee's own value there. The start is continuous (up to
    /// rounding) when the knee starts on the line, which curves built
    /// through [`ToneCurve::from_luminance`] always do.
    pub fn discontinuity(&self) -> f64 {
        let start = self.spec().start();
        (self.line.eval(start.x) - start.y).abs()
    }

    /// Evaluates every element of `xs`.
    ///
    /// Element `i` of the result equals `self.eval(xs[i])`.
    pub fn eval_slice(&self, xs: &[f64]) -> Vec<f64> {
        #[cfg(feature = "parallel")]
        let ys = {
            use rayon::prelude::*;
            xs.par_iter().map(|&x| self.eval(x)).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let ys = xs.iter().map(|&x| self.eval(x)).collect();

        ys
    }

    /// Replaces every element of `values` with its mapped value.
    pub fn apply_in_place(&self, values: &mut [f64]) {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            values.par_iter_mut().for_each(|v| *v = self.eval(*v));
        }
        #[cfg(not(feature = "parallel"))]
        {
            values.iter_mut().for_each(|v| *v = self.eval(*v));
        }
    }

    /// Maps the RGB channels of an interleaved RGBA `f32` buffer.
    ///
    /// Alpha is passed through unchanged. A trailing partial pixel is
    /// left untouched.
    pub fn apply_rgba(&self, pixels: &mut [f32]) {
        let map_pixel = |chunk: &mut [f32]| {
            for c in &mut chunk[..3] {
                *c = self.eval(f64::from(*c)) as f32;
            }
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            pixels.par_chunks_exact_mut(4).for_each(map_pixel);
        }
        #[cfg(not(feature = "parallel"))]
        {
            pixels.chunks_exact_mut(4).for_each(map_pixel);
        }
    }

    /// `n` evenly spaced `(x, y)` samples over [0, 1].
    pub fn sample(&self, n: usize) -> Vec<(f64, f64)> {
        let xs = linspace(n);
        let ys = self.eval_slice(&xs);
        xs.into_iter().zip(ys).collect()
    }
}

/// `n` evenly spaced values from 0 to 1 inclusive.
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = (n - 1) as f64;
            (0..n).map(|i| i as f64 / step).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ControlPoint;
    use approx::assert_abs_diff_eq;

    fn default_curve() -> ToneCurve {
        ToneCurve::from_operator(&ReferenceOperator::default()).unwrap()
    }

    #[test]
    fn test_segments() {
        let curve = default_curve();
        assert_eq!(curve.segment(0.0), Segment::Linear);
        assert_eq!(curve.segment(curve.knee_start_x()), Segment::Knee);
        assert_eq!(curve.segment(curve.knee_end_x()), Segment::Knee);
        assert_eq!(curve.segment(1.0), Segment::Ceiling);
        assert_eq!(curve.segment(-3.0), Segment::Linear);
        assert_eq!(curve.segment(7.0), Segment::Ceiling);
    }

    #[test]
    fn test_out_of_domain_clamps() {
        let curve = default_curve();
        assert_eq!(curve.eval(-0.5), curve.eval(0.0));
        assert_eq!(curve.eval(1.5), curve.eval(1.0));
        assert!(curve.eval(f64::NAN).is_nan());
    }

    #[test]
    fn test_operator_curve_is_continuous() {
        assert!(default_curve().discontinuity() < 1e-12);
    }

    #[test]
    fn test_discontinuity_reported() {
        let spec = KneeCurveSpec::new(
            ControlPoint::new(0.6, 0.3),
            ControlPoint::new(0.7, 0.5),
            ControlPoint::new(0.8, 0.5),
        )
        .unwrap();
        let curve = ToneCurve::new(spec, LinearSegment::new(0.74, 0.01175));
        assert_abs_diff_eq!(curve.discontinuity(), 0.74 * 0.6 + 0.01175 - 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_rgba_keeps_alpha() {
        let curve = default_curve();
        let mut px = [0.2_f32, 0.7, 0.95, 0.25, 0.0, 1.0, 0.5, 0.8];
        curve.apply_rgba(&mut px);
        assert_eq!(px[3], 0.25);
        assert_eq!(px[7], 0.8);
        assert_abs_diff_eq!(px[0], curve.eval(0.2_f32 as f64) as f32);
        assert_abs_diff_eq!(px[2], curve.ceiling() as f32);
    }

    #[test]
    fn test_apply_rgba_partial_pixel_untouched() {
        let curve = default_curve();
        let mut px = [0.2_f32, 0.7, 0.95, 0.25, 0.3, 0.9];
        curve.apply_rgba(&mut px);
        assert_abs_diff_eq!(px[0], curve.eval(0.2_f32 as f64) as f32);
        assert_abs_diff_eq!(px[2], curve.ceiling() as f32);
        assert_eq!(px[3], 0.25);
        assert_eq!(&px[4..6], &[0.3_f32, 0.9]);
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0).is_empty());
        assert_eq!(linspace(1), vec![0.0]);
        assert_eq!(linspace(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ToneCurve>();
    }
}
