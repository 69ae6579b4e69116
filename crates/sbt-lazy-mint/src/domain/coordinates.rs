//! # Fixed-Point Coordinates
//!
//! Latitude/longitude are stored on-chain as signed integers of
//! degrees x 10^6, truncated toward zero.

use super::errors::VoucherError;

/// Scale factor between degrees and the on-chain representation.
pub const FIXED_POINT_SCALE: f64 = 1_000_000.0;

/// Which coordinate is being converted (sets the valid range).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Maximum absolute value in degrees.
    pub fn limit(&self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }
}

/// Convert degrees to fixed point, truncating toward zero.
///
/// The product is truncated as computed in binary floating point, so a
/// decimal input such as `-1.048574` can land one micro-degree short
/// (`-1_048_573`). Minted coordinates depend on this exact rounding; do not
/// round to nearest here.
pub fn degrees_to_fixed(degrees: f64, axis: Axis) -> Result<i64, VoucherError> {
    if !degrees.is_finite() {
        return Err(VoucherError::InvalidCoordinate(format!(
            "{} is not finite: {degrees}",
            axis.name()
        )));
    }
    if degrees.abs() > axis.limit() {
        return Err(VoucherError::InvalidCoordinate(format!(
            "{} out of range [-{limit}, {limit}]: {degrees}",
            axis.name(),
            limit = axis.limit()
        )));
    }

    // |value| <= 180e6, well inside i64
    Ok((degrees * FIXED_POINT_SCALE).trunc() as i64)
}
