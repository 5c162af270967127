//! Control points of the knee.

use crate::{CurveError, CurveResult};

/// A point of the curve in normalized code values.
///
/// `x` is the input code value, `y` the code value it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Input code value.
    pub x: f64,
    /// Output code value.
    pub y: f64,
}

impl ControlPoint {
    /// Creates a control point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn in_unit_range(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// The three control points of the quadratic Bezier knee.
///
/// Only obtainable through [`KneeCurveSpec::new`], so a value of this type
/// always satisfies `start.x < mid.x < end.x` with all coordinates finite
/// and inside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KneeCurveSpec {
    start: ControlPoint,
    mid: ControlPoint,
    end: ControlPoint,
}

/// Narrowest knee (in code values) that is still solved.
pub const MIN_KNEE_SPAN: f64 = 1e-12;

impl KneeCurveSpec {
    /// Validates and stores the knee control points.
    ///
    /// # Errors
    ///
    /// - [`CurveError::DegenerateCurve`] for non-finite coordinates or a
    ///   knee narrower than [`MIN_KNEE_SPAN`]
    /// - [`CurveError::InvalidControlPoints`] when x is not strictly
    ///   increasing or a coordinate leaves [0, 1]
    ///
    /// # Example
    ///
    /// ```rust
    /// use eetf_curve::{ControlPoint, KneeCurveSpec};
    ///
    /// let ok = KneeCurveSpec::new(
    ///     ControlPoint::new(0.6, 0.45),
    ///     ControlPoint::new(0.7, 0.5),
    ///     ControlPoint::new(0.8, 0.5),
    /// );
    /// assert!(ok.is_ok());
    ///
    /// let swapped = KneeCurveSpec::new(
    ///     ControlPoint::new(0.7, 0.45),
    ///     ControlPoint::new(0.6, 0.5),
    ///     ControlPoint::new(0.8, 0.5),
    /// );
    /// assert!(swapped.is_err());
    /// ```
    pub fn new(start: ControlPoint, mid: ControlPoint, end: ControlPoint) -> CurveResult<Self> {
        if !(start.is_finite() && mid.is_finite() && end.is_finite()) {
            return Err(CurveError::DegenerateCurve(format!(
                "non-finite control point in {start:?}, {mid:?}, {end:?}"
            )));
        }
        if !(start.x < mid.x && mid.x < end.x) {
            return Err(CurveError::InvalidControlPoints {
                reason: format!(
                    "x must be strictly increasing, got {} / {} / {}",
                    start.x, mid.x, end.x
                ),
            });
        }
        if !(start.in_unit_range() && mid.in_unit_range() && end.in_unit_range()) {
            return Err(CurveError::InvalidControlPoints {
                reason: format!("coordinates must lie in [0, 1]: {start:?}, {mid:?}, {end:?}"),
            });
        }
        if end.x - start.x < MIN_KNEE_SPAN {
            return Err(CurveError::DegenerateCurve(format!(
                "knee span {} is below {MIN_KNEE_SPAN}",
                end.x - start.x
            )));
        }

        Ok(Self { start, mid, end })
    }

    /// Knee start, where the curve leaves the linear segment.
    #[inline]
    pub fn start(&self) -> ControlPoint {
        self.start
    }

    /// Middle (off-curve) control point.
    #[inline]
    pub fn mid(&self) -> ControlPoint {
        self.mid
    }

    /// Knee end, where the curve reaches the ceiling.
    #[inline]
    pub fn end(&self) -> ControlPoint {
        self.end
    }

    /// Bit pattern of all six coordinates, used as a memoization key.
    pub(crate) fn key_bits(&self) -> [u64; 6] {
        [
            self.start.x.to_bits(),
            self.start.y.to_bits(),
            self.mid.x.to_bits(),
            self.mid.y.to_bits(),
            self.end.x.to_bits(),
            self.end.y.to_bits(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(a: f64, b: f64, c: f64) -> CurveResult<KneeCurveSpec> {
        KneeCurveSpec::new(
            ControlPoint::new(a, 0.4),
            ControlPoint::new(b, 0.5),
            ControlPoint::new(c, 0.5),
        )
    }

    #[test]
    fn test_accepts_increasing() {
        let spec = pts(0.65, 0.67, 0.75).unwrap();
        assert_eq!(spec.start().x, 0.65);
        assert_eq!(spec.mid().x, 0.67);
        assert_eq!(spec.end().x, 0.75);
    }

    #[test]
    fn test_rejects_ordering() {
        for (a, b, c) in [(0.7, 0.6, 0.8), (0.6, 0.6, 0.8), (0.6, 0.8, 0.8), (0.8, 0.7, 0.6)] {
            let err = pts(a, b, c).unwrap_err();
            assert!(
                matches!(err, CurveError::InvalidControlPoints { .. }),
                "{a} {b} {c}: {err}"
            );
            assert!(err.to_string().starts_with("invalid knee curve control points"));
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            pts(0.6, 0.8, 1.2),
            Err(CurveError::InvalidControlPoints { .. })
        ));
    }

    #[test]
    fn test_non_finite_is_degenerate() {
        assert!(matches!(pts(f64::NAN, 0.7, 0.8), Err(CurveError::DegenerateCurve(_))));
        assert!(matches!(
            pts(0.6, f64::INFINITY, 0.8),
            Err(CurveError::DegenerateCurve(_))
        ));
    }

    #[test]
    fn test_too_narrow_is_degenerate() {
        assert!(matches!(
            pts(0.5, 0.5 + 1e-14, 0.5 + 2e-14),
            Err(CurveError::DegenerateCurve(_))
        ));
    }
}
