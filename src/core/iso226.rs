//! core/iso226.rs — Equal-loudness-contour model (ISO 226:2003 fit).
//!
//! Tabulated per-frequency constants of the standard's parametric fit,
//! 29 anchors from 20 Hz to 12.5 kHz. `equal_loudness_contour` evaluates
//! the sound pressure level of the contour at a given loudness level;
//! the contours are defined between 0 and 90 phon.

use crate::core::LoudnessError;

/// Number of anchor frequencies in the contour table.
pub const N_ANCHORS: usize = 29;

/// Per-frequency constants of the parametric contour fit.
#[derive(Clone, Copy, Debug)]
pub struct ContourEntry {
    /// Anchor frequency in Hz.
    pub freq_hz: f32,
    /// Exponent of loudness perception.
    pub af: f32,
    /// Magnitude of the linear transfer function, dB.
    pub lu: f32,
    /// Threshold-of-hearing offset, dB.
    pub tf: f32,
}

/// Fitted constants of ISO 226:2003, fixed for the process lifetime.
pub const CONTOUR_PARAMS: [ContourEntry; N_ANCHORS] = [
    ContourEntry { freq_hz: 20.0, af: 0.532, lu: -31.6, tf: 78.5 },
    ContourEntry { freq_hz: 25.0, af: 0.506, lu: -27.2, tf: 68.7 },
    ContourEntry { freq_hz: 31.5, af: 0.480, lu: -23.0, tf: 59.5 },
    ContourEntry { freq_hz: 40.0, af: 0.455, lu: -19.1, tf: 51.1 },
    ContourEntry { freq_hz: 50.0, af: 0.432, lu: -15.9, tf: 44.0 },
    ContourEntry { freq_hz: 63.0, af: 0.409, lu: -13.0, tf: 37.5 },
    ContourEntry { freq_hz: 80.0, af: 0.387, lu: -10.3, tf: 31.5 },
    ContourEntry { freq_hz: 100.0, af: 0.367, lu: -8.1, tf: 26.5 },
    ContourEntry { freq_hz: 125.0, af: 0.349, lu: -6.2, tf: 22.1 },
    ContourEntry { freq_hz: 160.0, af: 0.330, lu: -4.5, tf: 17.9 },
    ContourEntry { freq_hz: 200.0, af: 0.315, lu: -3.1, tf: 14.4 },
    ContourEntry { freq_hz: 250.0, af: 0.301, lu: -2.0, tf: 11.4 },
    ContourEntry { freq_hz: 315.0, af: 0.288, lu: -1.1, tf: 8.6 },
    ContourEntry { freq_hz: 400.0, af: 0.276, lu: -0.4, tf: 6.2 },
    ContourEntry { freq_hz: 500.0, af: 0.267, lu: 0.0, tf: 4.4 },
    ContourEntry { freq_hz: 630.0, af: 0.259, lu: 0.3, tf: 3.0 },
    ContourEntry { freq_hz: 800.0, af: 0.253, lu: 0.5, tf: 2.2 },
    ContourEntry { freq_hz: 1000.0, af: 0.250, lu: 0.0, tf: 2.4 },
    ContourEntry { freq_hz: 1250.0, af: 0.246, lu: -2.7, tf: 3.5 },
    ContourEntry { freq_hz: 1600.0, af: 0.244, lu: -4.1, tf: 1.7 },
    ContourEntry { freq_hz: 2000.0, af: 0.243, lu: -1.0, tf: -1.3 },
    ContourEntry { freq_hz: 2500.0, af: 0.243, lu: 1.7, tf: -4.2 },
    ContourEntry { freq_hz: 3150.0, af: 0.243, lu: 2.5, tf: -6.0 },
    ContourEntry { freq_hz: 4000.0, af: 0.242, lu: 1.2, tf: -5.4 },
    ContourEntry { freq_hz: 5000.0, af: 0.242, lu: -2.1, tf: -1.5 },
    ContourEntry { freq_hz: 6300.0, af: 0.245, lu: -7.1, tf: 6.0 },
    ContourEntry { freq_hz: 8000.0, af: 0.254, lu: -11.2, tf: 12.6 },
    ContourEntry { freq_hz: 10000.0, af: 0.271, lu: -10.7, tf: 13.9 },
    ContourEntry { freq_hz: 12500.0, af: 0.301, lu: -3.1, tf: 12.3 },
];

/// The anchor frequency grid in Hz, ascending.
pub fn anchor_freqs_hz() -> [f32; N_ANCHORS] {
    let mut freqs = [0.0f32; N_ANCHORS];
    for (f, p) in freqs.iter_mut().zip(&CONTOUR_PARAMS) {
        *f = p.freq_hz;
    }
    freqs
}

/// Verify the anchor table shape: frequencies strictly increasing and
/// positive. All downstream math assumes this ordering.
pub fn validate_table() -> Result<(), LoudnessError> {
    for (i, pair) in CONTOUR_PARAMS.windows(2).enumerate() {
        if pair[0].freq_hz <= 0.0 || pair[1].freq_hz <= pair[0].freq_hz {
            return Err(LoudnessError::TableNotMonotonic { index: i + 1 });
        }
    }
    Ok(())
}

/// Evaluate the equal-loudness contour at `loudness_phon`, returning one
/// SPL value (dB) per anchor frequency.
///
/// Fails with [`LoudnessError::PhonOutOfRange`] outside 0..=90 phon. A
/// degenerate excitation term is reported rather than propagated; it
/// cannot occur against the shipped table.
pub fn equal_loudness_contour(loudness_phon: f32) -> Result<[f32; N_ANCHORS], LoudnessError> {
    if !(0.0..=90.0).contains(&loudness_phon) {
        return Err(LoudnessError::PhonOutOfRange(loudness_phon));
    }
    let level_term = 0.00447 * (10.0_f32.powf(0.025 * loudness_phon) - 1.15);
    let mut spl = [0.0f32; N_ANCHORS];
    for (out, p) in spl.iter_mut().zip(&CONTOUR_PARAMS) {
        let af = level_term + (0.4 * 10.0_f32.powf((p.tf + p.lu) / 10.0 - 9.0)).powf(p.af);
        if !af.is_finite() || af <= 0.0 {
            return Err(LoudnessError::ContourDegenerate { freq_hz: p.freq_hz });
        }
        *out = (10.0 / p.af) * af.log10() - p.lu + 94.0;
    }
    Ok(spl)
}
