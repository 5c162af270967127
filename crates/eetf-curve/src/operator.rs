//! Reference operator parameters.
//!
//! The constants describing the HDR-to-SDR operator being approximated
//! live here rather than in the curve code, so another measured operator
//! can be dropped in through a YAML file:
//!
//! ```yaml
//! slope: 0.74
//! intercept: 0.01175
//! mid_x: 0.6707140831310812
//! ceiling_nits: 100.0
//! knee_start_nits: 400.0
//! knee_end_nits: 1000.0
//! ```
//!
//! Missing keys fall back to [`ReferenceOperator::default`].

use std::path::Path;

use eetf_transfer::pq;
use serde::{Deserialize, Serialize};

use crate::{ControlPoint, CurveError, CurveResult, KneeCurveSpec, LinearSegment};

/// Slope of the measured straight-line region.
pub const DEFAULT_SLOPE: f64 = 0.74;
/// Intercept of the measured straight-line region.
pub const DEFAULT_INTERCEPT: f64 = 0.01175;
/// Input code value where the line reaches the 100 cd/m2 ceiling.
pub const DEFAULT_MID_X: f64 = 0.6707140831310812;
/// SDR peak the curve flattens at, in cd/m2.
pub const DEFAULT_CEILING_NITS: f64 = 100.0;
/// Default knee start, in cd/m2.
pub const DEFAULT_KNEE_START_NITS: f64 = 400.0;
/// Default knee end, in cd/m2.
pub const DEFAULT_KNEE_END_NITS: f64 = 1000.0;

/// Parameters of one reference tone-mapping operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceOperator {
    /// Slope of the linear region.
    pub slope: f64,
    /// Intercept of the linear region.
    pub intercept: f64,
    /// x of the middle knee control point.
    pub mid_x: f64,
    /// Output ceiling in cd/m2 (encoded with PQ).
    pub ceiling_nits: f64,
    /// Knee start in cd/m2.
    pub knee_start_nits: f64,
    /// Knee end in cd/m2.
    pub knee_end_nits: f64,
}

impl Default for ReferenceOperator {
    fn default() -> Self {
        Self {
            slope: DEFAULT_SLOPE,
            intercept: DEFAULT_INTERCEPT,
            mid_x: DEFAULT_MID_X,
            ceiling_nits: DEFAULT_CEILING_NITS,
            knee_start_nits: DEFAULT_KNEE_START_NITS,
            knee_end_nits: DEFAULT_KNEE_END_NITS,
        }
    }
}

impl ReferenceOperator {
    /// Loads and validates an operator from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> CurveResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CurveError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading reference operator");
        Self::from_yaml_str(&content)
    }

    /// Parses and validates an operator from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> CurveResult<Self> {
        let op: Self = serde_yaml::from_str(yaml)?;
        op.validate()?;
        Ok(op)
    }

    /// Serializes the operator to YAML.
    pub fn to_yaml_string(&self) -> CurveResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> CurveResult<()> {
        let fields = [
            ("slope", self.slope),
            ("intercept", self.intercept),
            ("mid_x", self.mid_x),
            ("ceiling_nits", self.ceiling_nits),
            ("knee_start_nits", self.knee_start_nits),
            ("knee_end_nits", self.knee_end_nits),
        ];
        if let Some((name, v)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CurveError::InvalidParameter(format!("{name} is not finite: {v}")));
        }
        if self.slope <= 0.0 {
            return Err(CurveError::InvalidParameter(format!(
                "slope must be positive, got {}",
                self.slope
            )));
        }
        if self.ceiling_nits <= 0.0 || self.knee_start_nits <= 0.0 || self.knee_end_nits <= 0.0 {
            return Err(CurveError::InvalidParameter(
                "luminance values must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The straight-line region.
    #[inline]
    pub fn line(&self) -> LinearSegment {
        LinearSegment::new(self.slope, self.intercept)
    }

    /// PQ code value of the ceiling.
    #[inline]
    pub fn ceiling_code(&self) -> f64 {
        pq::luminance_to_code(self.ceiling_nits)
    }

    /// Knee control points for the given knee luminances.
    ///
    /// - start: `(PQ(ks), line(PQ(ks)))`, on the line
    /// - mid: `(mid_x, PQ(ceiling))`
    /// - end: `(PQ(ke), PQ(ceiling))`, on the ceiling
    ///
    /// # Errors
    ///
    /// Whatever [`KneeCurveSpec::new`] rejects, e.g. a knee start at or
    /// beyond `mid_x`.
    pub fn knee_spec(&self, knee_start_nits: f64, knee_end_nits: f64) -> CurveResult<KneeCurveSpec> {
        let ks_x = pq::luminance_to_code(knee_start_nits);
        let ke_x = pq::luminance_to_code(knee_end_nits);
        let ceiling = self.ceiling_code();

        KneeCurveSpec::new(
            ControlPoint::new(ks_x, self.line().eval(ks_x)),
            ControlPoint::new(self.mid_x, ceiling),
            ControlPoint::new(ke_x, ceiling),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_mid_x_meets_ceiling() {
        let op = ReferenceOperator::default();
        assert_abs_diff_eq!(op.line().solve_x(op.ceiling_code()), op.mid_x, epsilon = 1e-9);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let op = ReferenceOperator::from_yaml_str("knee_start_nits: 300.0\n").unwrap();
        assert_eq!(op.knee_start_nits, 300.0);
        assert_eq!(op.slope, DEFAULT_SLOPE);
        assert_eq!(op.mid_x, DEFAULT_MID_X);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let op = ReferenceOperator {
            slope: 0.8,
            ..Default::default()
        };
        let yaml = op.to_yaml_string().unwrap();
        assert_eq!(ReferenceOperator::from_yaml_str(&yaml).unwrap(), op);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ReferenceOperator::from_yaml_str("slope: -1.0\n"),
            Err(CurveError::InvalidParameter(_))
        ));
        assert!(matches!(
            ReferenceOperator::from_yaml_str("ceiling_nits: 0.0\n"),
            Err(CurveError::InvalidParameter(_))
        ));
        assert!(matches!(
            ReferenceOperator::from_yaml_str("slope: [1, 2]\n"),
            Err(CurveError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ReferenceOperator::from_file("/nonexistent/operator.yaml").unwrap_err();
        assert!(matches!(err, CurveError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_knee_spec_ordering() {
        let op = ReferenceOperator::default();
        let spec = op.knee_spec(400.0, 1000.0).unwrap();
        assert!(spec.start().x < spec.mid().x && spec.mid().x < spec.end().x);
        assert_eq!(spec.mid().y, spec.end().y);

        // 800 nits encodes above mid_x
        assert!(matches!(
            op.knee_spec(800.0, 1000.0),
            Err(CurveError::InvalidControlPoints { .. })
        ));
    }
}
