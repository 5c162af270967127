//! # eetf-curve
//!
//! Knee tone curve approximating an HDR-to-SDR EETF in the PQ code-value
//! domain.
//!
//! The curve is a straight line up to the knee start, a quadratic Bezier
//! knee, and a flat ceiling past the knee end. The knee is solved in
//! closed form when the curve is built, so evaluation is a handful of
//! flops and a square root per sample.
//!
//! # Modules
//!
//! - [`point`] - control points and the validated knee triple
//! - [`bezier`] - closed-form `y(x)` of the quadratic Bezier knee
//! - [`linear`] - the straight-line region and line fits
//! - [`operator`] - reference operator constants, loadable from YAML
//! - [`curve`] - the piecewise [`ToneCurve`]
//! - [`cache`] - memoized construction keyed by knee parameters
//! - [`measured`] - measured EETF tables and linear-region reports
//!
//! # Example
//!
//! ```rust
//! use eetf_curve::{ReferenceOperator, ToneCurve};
//!
//! let op = ReferenceOperator::default();
//! let curve = ToneCurve::from_luminance(&op, 400.0, 1000.0)?;
//!
//! let mut ramp: Vec<f64> = (0..1024).map(|i| i as f64 / 1023.0).collect();
//! curve.apply_in_place(&mut ramp);
//! assert!((ramp[1023] - curve.ceiling()).abs() < 1e-12);
//! # Ok::<(), eetf_curve::CurveError>(())
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - slice and buffer evaluation through rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod bezier;
pub mod cache;
pub mod curve;
pub mod linear;
pub mod measured;
pub mod operator;
pub mod point;

pub use bezier::KneeBezier;
pub use cache::CurveCache;
pub use curve::{linspace, Segment, ToneCurve};
pub use error::{CurveError, CurveResult};
pub use linear::LinearSegment;
pub use measured::{EetfReport, MeasuredEetf};
pub use operator::ReferenceOperator;
pub use point::{ControlPoint, KneeCurveSpec};
