//! Pure power-law display transfer.
//!
//! SDR output of the reference operator is assumed to be shown on a
//! BT.1886-like display, i.e. gamma 2.4 with a 100 cd/m2 peak.

/// BT.1886 reference exponent.
pub const BT1886: f64 = 2.4;

/// SDR display peak luminance in cd/m2.
pub const SDR_PEAK: f64 = 100.0;

/// Decodes a display code value: `v^gamma`.
#[inline]
pub fn decode(v: f64, gamma: f64) -> f64 {
    if v <= 0.0 { 0.0 } else { v.powf(gamma) }
}

/// Encodes relative linear light: `l^(1/gamma)`.
#[inline]
pub fn encode(l: f64, gamma: f64) -> f64 {
    if l <= 0.0 { 0.0 } else { l.powf(1.0 / gamma) }
}

/// SDR code value to absolute luminance on a `SDR_PEAK` display.
#[inline]
pub fn sdr_code_to_luminance(v: f64, gamma: f64) -> f64 {
    decode(v, gamma) * SDR_PEAK
}

/// Absolute luminance to SDR code value, clipping at `SDR_PEAK`.
#[inline]
pub fn luminance_to_sdr_code(nits: f64, gamma: f64) -> f64 {
    encode((nits / SDR_PEAK).min(1.0), gamma)
}
