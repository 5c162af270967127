//! SMPTE ST 2084 Perceptual Quantizer (PQ).
//!
//! Tone curves in this workspace live in the PQ code-value domain, so the
//! knee thresholds (given in cd/m2) are converted here before any curve
//! is built.
//!
//! # Range
//!
//! - Code value: [0, 1]
//! - Luminance: [0, 10000] cd/m2 (nits)
//!
//! # Reference
//!
//! SMPTE ST 2084:2014
//!
//! # Usage
//!
//! ```rust
//! use eetf_transfer::pq;
//!
//! let code = pq::luminance_to_code(100.0);
//! let nits = pq::code_to_luminance(code);
//! assert!((nits - 100.0).abs() < 1e-6);
//! ```

/// Peak luminance representable by PQ, in cd/m2.
pub const PEAK_LUMINANCE: f64 = 10000.0;

const M1: f64 = 2610.0 / 16384.0;
const M2: f64 = 2523.0 / 4096.0 * 128.0;
const C1: f64 = 3424.0 / 4096.0;
const C2: f64 = 2413.0 / 4096.0 * 32.0;
const C3: f64 = 2392.0 / 4096.0 * 32.0;

/// Inverse EOTF: absolute luminance (cd/m2) to PQ code value.
///
/// Luminance is clamped to `[0, PEAK_LUMINANCE]`.
///
/// # Example
///
/// ```rust
/// use eetf_transfer::pq::luminance_to_code;
///
/// // 100 nits reference white
/// assert!((luminance_to_code(100.0) - 0.508078).abs() < 1e-5);
/// ```
#[inline]
pub fn luminance_to_code(nits: f64) -> f64 {
    if nits <= 0.0 {
        return 0.0;
    }

    let y = (nits / PEAK_LUMINANCE).min(1.0);
    let yp = y.powf(M1);

    ((C1 + C2 * yp) / (1.0 + C3 * yp)).powf(M2)
}

/// EOTF: PQ code value to absolute luminance (cd/m2).
///
/// Code values outside [0, 1] are clamped.
#[inline]
pub fn code_to_luminance(code: f64) -> f64 {
    if code <= 0.0 {
        return 0.0;
    }

    let vp = code.min(1.0).powf(1.0 / M2);
    let num = (vp - C1).max(0.0);
    let den = C2 - C3 * vp;

    PEAK_LUMINANCE * (num / den).powf(1.0 / M1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_white() {
        // 0.508078421517 is the commonly quoted code value of 100 nits
        assert_abs_diff_eq!(luminance_to_code(100.0), 0.508078421517, epsilon = 1e-9);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(luminance_to_code(0.0), 0.0);
        assert_eq!(luminance_to_code(-5.0), 0.0);
        assert_abs_diff_eq!(luminance_to_code(PEAK_LUMINANCE), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(luminance_to_code(2.0 * PEAK_LUMINANCE), 1.0, epsilon = 1e-12);
        assert_eq!(code_to_luminance(0.0), 0.0);
        assert_abs_diff_eq!(code_to_luminance(1.0), PEAK_LUMINANCE, epsilon = 1e-6);
    }

    #[test]
    fn test_roundtrip() {
        for &nits in &[0.01, 0.5, 18.0, 100.0, 400.0, 1000.0, 4000.0] {
            let back = code_to_luminance(luminance_to_code(nits));
            assert!((back - nits).abs() < nits * 1e-9, "nits={nits}, back={back}");
        }
    }

    #[test]
    fn test_knee_thresholds_ordered() {
        let ks = luminance_to_code(400.0);
        let ke = luminance_to_code(1000.0);
        assert!(ks > 0.65 && ks < 0.66, "ks={ks}");
        assert!(ke > 0.75 && ke < 0.76, "ke={ke}");
    }
}
