//! Quadratic Bezier knee expressed as an explicit function `y(x)`.
//!
//! For control points `(a, p)`, `(b, q)`, `(c, r)` the x component is
//!
//! ```text
//! x(t) = (1-t)^2 a + 2(1-t)t b + t^2 c = a + beta t + alpha t^2
//! alpha = a - 2b + c,  beta = 2(b - a)
//! ```
//!
//! Solving `x(t) = x` gives two roots. With `a < b < c`, `dx/dt` is
//! positive on [0, 1] and the root running from `t = 0` at `x = a` to
//! `t = 1` at `x = c` is
//!
//! ```text
//! t(x) = (-beta + sqrt(D)) / (2 alpha),  D = beta^2 + 4 alpha (x - a)
//! ```
//!
//! The other root leaves [0, 1] and is never used. Multiplying through by
//! the conjugate gives the form evaluated here,
//!
//! ```text
//! t(x) = 2 (x - a) / (beta + sqrt(D))
//! ```
//!
//! which has no division by `alpha` (the knee with `b` at the x midpoint
//! collapses to a linear `t(x)`) and no cancellation near `x = a`.
//! `y(x)` is then the y component at `t(x)`.

use crate::point::KneeCurveSpec;

/// Pre-solved knee segment. Immutable and cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KneeBezier {
    spec: KneeCurveSpec,
    // x(t) = a + beta t + alpha t^2
    alpha: f64,
    beta: f64,
    // y(t) = p + qy t + ry t^2
    qy: f64,
    ry: f64,
}

impl KneeBezier {
    /// Solves the knee for a validated set of control points.
    pub fn new(spec: KneeCurveSpec) -> Self {
        let (a, b, c) = (spec.start().x, spec.mid().x, spec.end().x);
        let (p, q, r) = (spec.start().y, spec.mid().y, spec.end().y);

        Self {
            spec,
            alpha: a - 2.0 * b + c,
            beta: 2.0 * (b - a),
            qy: 2.0 * (q - p),
            ry: p - 2.0 * q + r,
        }
    }

    /// Control points this knee was solved from.
    #[inline]
    pub fn spec(&self) -> &KneeCurveSpec {
        &self.spec
    }

    /// Bezier parameter for input `x`; `x` is clamped to the knee span.
    #[inline]
    pub fn param(&self, x: f64) -> f64 {
        let start = self.spec.start().x;
        let dx = x.clamp(start, self.spec.end().x) - start;
        let disc = (self.beta * self.beta + 4.0 * self.alpha * dx).max(0.0);
        let t = 2.0 * dx / (self.beta + disc.sqrt());
        t.clamp(0.0, 1.0)
    }

    /// Output code value for input `x` inside the knee.
    ///
    /// Inputs outside `[start.x, end.x]` evaluate at the nearest end.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        let t = self.param(x);
        self.spec.start().y + (self.qy + self.ry * t) * t
    }

    /// Point on the curve at parameter `t`, straight from the Bezier form.
    #[inline]
    pub fn point_at(&self, t: f64) -> (f64, f64) {
        let s = 1.0 - t;
        let (st, md, en) = (self.spec.start(), self.spec.mid(), self.spec.end());
        (
            s * s * st.x + 2.0 * s * t * md.x + t * t * en.x,
            s * s * st.y + 2.0 * s * t * md.y + t * t * en.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::ControlPoint;
    use approx::assert_abs_diff_eq;

    fn knee(a: f64, b: f64, c: f64, p: f64, q: f64, r: f64) -> KneeBezier {
        KneeBezier::new(
            KneeCurveSpec::new(
                ControlPoint::new(a, p),
                ControlPoint::new(b, q),
                ControlPoint::new(c, r),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_endpoints() {
        let k = knee(0.5, 0.8, 1.0, 0.5, 1.0, 1.0);
        assert_abs_diff_eq!(k.eval(0.5), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(k.eval(1.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(k.param(0.5), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(k.param(1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverts_parametric_form() {
        // alpha < 0, alpha == 0 and alpha > 0
        for k in [
            knee(0.2, 0.7, 0.9, 0.1, 0.6, 0.7),
            knee(0.25, 0.5, 0.75, 0.1, 0.6, 0.7),
            knee(0.2, 0.3, 0.9, 0.1, 0.6, 0.7),
        ] {
            for i in 0..=64 {
                let t = i as f64 / 64.0;
                let (x, y) = k.point_at(t);
                assert_abs_diff_eq!(k.param(x), t, epsilon = 1e-9);
                assert_abs_diff_eq!(k.eval(x), y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_midpoint_knee_is_linear_in_t() {
        let k = knee(0.25, 0.5, 0.75, 0.1, 0.6, 0.7);
        assert_eq!(k.alpha, 0.0);
        assert_abs_diff_eq!(k.param(0.375), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_clamps_outside_span() {
        let k = knee(0.5, 0.8, 1.0, 0.5, 1.0, 1.0);
        assert_eq!(k.eval(0.1), k.eval(0.5));
        assert_eq!(k.param(0.1), 0.0);
    }
}
