//! # eetf-transfer
//!
//! Transfer functions needed to place tone curves in a code-value domain.
//!
//! | Module | Use |
//! |--------|-----|
//! | [`pq`] | HDR input/output, SMPTE ST 2084, [0, 10000] cd/m2 |
//! | [`gamma`] | SDR display decode, power law (BT.1886 2.4) |
//!
//! All functions work in `f64`: knee control points are compared against
//! tolerances far below what `f32` resolves.
//!
//! # Usage
//!
//! ```rust
//! use eetf_transfer::{gamma, pq};
//!
//! let knee_start = pq::luminance_to_code(400.0);
//! let sdr = gamma::luminance_to_sdr_code(50.0, gamma::BT1886);
//! assert!(knee_start > 0.0 && sdr < 1.0);
//! ```
//!
//! # Used By
//!
//! - `eetf-curve` - control point derivation from luminance, SDR
//!   measurements converted to PQ
//! - `eetf-cli` - luminance and SDR columns of sampled curves

#![warn(missing_docs)]

pub mod gamma;
pub mod pq;
