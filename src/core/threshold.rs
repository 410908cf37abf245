//! core/threshold.rs — Hearing threshold projected onto a frequency grid.
//!
//! Fits a natural cubic spline through the 29 (anchor Hz, SPL) pairs of a
//! contour, evaluates it at caller frequencies given on the auditory
//! scale, and converts each SPL to linear power. Targets outside the
//! 20 Hz..12.5 kHz anchor range ride the spline's extrapolation; callers
//! are expected to stay within the audible range.

use crate::core::db::db_to_power_ratio;
use crate::core::iso226::{N_ANCHORS, anchor_freqs_hz};
use crate::core::spline::CubicSpline;
use crate::core::transfer::AuditoryScale;

/// Interpolate `contour` at each auditory-scale frequency and return the
/// threshold as linear power, positionally aligned with the input.
pub fn threshold_at_freqs(
    contour: &[f32; N_ANCHORS],
    auditory_freqs: &[f32],
    scale: &impl AuditoryScale,
) -> Vec<f32> {
    let hertz = scale.to_hertz(auditory_freqs);
    assert_eq!(
        hertz.len(),
        auditory_freqs.len(),
        "auditory scale must map each frequency"
    );
    let anchors = anchor_freqs_hz();
    let spline = CubicSpline::fit(&anchors, contour);
    hertz
        .iter()
        .map(|&hz| {
            debug_assert!(hz > 0.0, "auditory scale produced non-positive Hz: {hz}");
            db_to_power_ratio(spline.eval(hz))
        })
        .collect()
}
