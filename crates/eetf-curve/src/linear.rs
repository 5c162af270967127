//! Straight-line region of the tone curve.

use crate::{ControlPoint, CurveError, CurveResult};

/// `y = slope * x + intercept` in code values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSegment {
    /// Gain applied to the input code value.
    pub slope: f64,
    /// Output at `x = 0`.
    pub intercept: f64,
}

impl LinearSegment {
    /// Creates a line from slope and intercept.
    pub const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Line through two measured points.
    ///
    /// # Errors
    ///
    /// [`CurveError::InvalidParameter`] if the points share an x value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eetf_curve::{ControlPoint, LinearSegment};
    ///
    /// let line = LinearSegment::through(
    ///     ControlPoint::new(0.0, 1.0),
    ///     ControlPoint::new(1.0, 3.0),
    /// ).unwrap();
    /// assert_eq!(line.slope, 2.0);
    /// assert_eq!(line.intercept, 1.0);
    /// ```
    pub fn through(p0: ControlPoint, p1: ControlPoint) -> CurveResult<Self> {
        let dx = p1.x - p0.x;
        if dx == 0.0 || !dx.is_finite() {
            return Err(CurveError::InvalidParameter(format!(
                "cannot fit a line through {p0:?} and {p1:?}"
            )));
        }
        let slope = (p1.y - p0.y) / dx;
        Ok(Self::with_slope(slope, p1))
    }

    /// Line of a fixed slope passing through `point`.
    pub fn with_slope(slope: f64, point: ControlPoint) -> Self {
        Self {
            slope,
            intercept: point.y - slope * point.x,
        }
    }

    /// Evaluates the line.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Input at which the line reaches `y`.
    #[inline]
    pub fn solve_x(&self, y: f64) -> f64 {
        (y - self.intercept) / self.slope
    }
}
