//! Decibel conversions for PCM amplitudes
//!
//! Informational helpers. Stored readings are never converted.

/// Convert a linear PCM amplitude to dB relative to full scale.
///
/// # Returns
/// Value in dBFS. Returns `f64::NEG_INFINITY` for zero or negative input.
#[inline]
pub fn rms_to_dbfs(amplitude: f64) -> f64 {
    if amplitude <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * amplitude.log10()
    }
}

/// Convert dB relative to full scale back to a linear amplitude.
#[inline]
pub fn dbfs_to_rms(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}
