//! core/loudness.rs — Hearing threshold and compressive specific loudness.
//!
//! `LoudnessCompressor` caches the equal-loudness contour at the
//! hearing-threshold level once at construction, projects it onto caller
//! frequency grids, and maps excitation power to compressed loudness
//! above threshold (Beaton & Beerends 1995). All methods take `&self`;
//! a constructed instance is safe to share across threads.

use tracing::debug;

use crate::config::LoudnessConfig;
use crate::core::LoudnessError;
use crate::core::db::EPS_POWER;
use crate::core::iso226::{self, N_ANCHORS};
use crate::core::threshold::threshold_at_freqs;
use crate::core::transfer::{AuditoryScale, ExcitationTransfer};

/// Loudness level of the absolute hearing threshold (phon).
/// Calibration of the source model; deliberately not the textbook 0 phon.
pub const PHON_HEARING_THRESHOLD: f32 = 3.539;

/// Compressive loudness mapping relative to the absolute hearing
/// threshold.
#[derive(Clone, Debug)]
pub struct LoudnessCompressor {
    schwell_factor: f32,
    compression_level: f32,
    hearing_threshold_phon: f32,
    threshold_contour: [f32; N_ANCHORS],
}

impl LoudnessCompressor {
    /// Build a compressor with the given threshold sensitivity factor
    /// `s`, compression exponent `g`, and hearing-threshold loudness
    /// level. Fails if the level is outside 0..=90 phon or the anchor
    /// table is malformed.
    pub fn new(
        schwell_factor: f32,
        compression_level: f32,
        hearing_threshold_phon: f32,
    ) -> Result<Self, LoudnessError> {
        iso226::validate_table()?;
        let threshold_contour = iso226::equal_loudness_contour(hearing_threshold_phon)?;
        debug!(hearing_threshold_phon, "cached hearing threshold contour");
        Ok(Self {
            schwell_factor,
            compression_level,
            hearing_threshold_phon,
            threshold_contour,
        })
    }

    pub fn from_config(cfg: &LoudnessConfig) -> Result<Self, LoudnessError> {
        Self::new(
            cfg.schwell_factor,
            cfg.compression_level,
            cfg.hearing_threshold_phon,
        )
    }

    #[inline]
    pub fn schwell_factor(&self) -> f32 {
        self.schwell_factor
    }

    #[inline]
    pub fn compression_level(&self) -> f32 {
        self.compression_level
    }

    #[inline]
    pub fn hearing_threshold_phon(&self) -> f32 {
        self.hearing_threshold_phon
    }

    /// The cached contour: SPL (dB) per anchor frequency at the
    /// hearing-threshold level.
    #[inline]
    pub fn hearing_threshold_contour(&self) -> &[f32; N_ANCHORS] {
        &self.threshold_contour
    }

    /// Threshold power at each auditory-scale frequency.
    pub fn hearing_threshold_at_freqs(
        &self,
        auditory_freqs: &[f32],
        scale: &impl AuditoryScale,
    ) -> Vec<f32> {
        threshold_at_freqs(&self.threshold_contour, auditory_freqs, scale)
    }

    /// The hearing threshold expressed in excitation-band space: the
    /// per-frequency threshold power, reshaped to one single-frame row
    /// per frequency, pushed through the transfer collaborator.
    pub fn hearing_threshold_excitation(
        &self,
        auditory_freqs: &[f32],
        scale: &impl AuditoryScale,
        transfer: &impl ExcitationTransfer,
    ) -> Vec<Vec<f32>> {
        let threshold = self.hearing_threshold_at_freqs(auditory_freqs, scale);
        let signal: Vec<Vec<f32>> = threshold.into_iter().map(|p| vec![p]).collect();
        transfer.transfer_signal_with_freqs(&signal, auditory_freqs)
    }

    /// Map an excitation pattern to compressed loudness above threshold.
    ///
    /// Element-wise, with `e0` the threshold excitation, `s` the schwell
    /// factor and `g` the compression level:
    ///
    /// `L = (e0/s)^g * ((1 - s + s*(e/e0))^g - 1)`, floored at 0.
    ///
    /// `excitation` is `[band][frame]`; its band count must match the
    /// transfer collaborator's, and each threshold row broadcasts across
    /// frames when single-frame. A threshold element at or below the
    /// power floor fails with [`LoudnessError::ThresholdUnderflow`]
    /// instead of emitting non-finite values.
    pub fn compress(
        &self,
        excitation: &[Vec<f32>],
        auditory_freqs: &[f32],
        scale: &impl AuditoryScale,
        transfer: &impl ExcitationTransfer,
    ) -> Result<Vec<Vec<f32>>, LoudnessError> {
        let e0 = self.hearing_threshold_excitation(auditory_freqs, scale, transfer);
        assert_eq!(
            e0.len(),
            excitation.len(),
            "excitation band count must match the transfer output"
        );

        let s = self.schwell_factor;
        let g = self.compression_level;
        let mut out = Vec::with_capacity(excitation.len());
        for (band, (e_row, e0_row)) in excitation.iter().zip(&e0).enumerate() {
            assert!(
                e0_row.len() == 1 || e0_row.len() == e_row.len(),
                "threshold row {band} has {} frames, excitation has {}",
                e0_row.len(),
                e_row.len()
            );
            let mut row = Vec::with_capacity(e_row.len());
            for (t, &e) in e_row.iter().enumerate() {
                let e0v = if e0_row.len() == 1 { e0_row[0] } else { e0_row[t] };
                if e0v <= EPS_POWER {
                    return Err(LoudnessError::ThresholdUnderflow { band, value: e0v });
                }
                let l = (e0v / s).powf(g) * ((1.0 - s + s * (e / e0v)).powf(g) - 1.0);
                row.push(l.max(0.0));
            }
            out.push(row);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transfer::{AuditoryScale, ExcitationTransfer};

    struct IdentityScale;
    impl AuditoryScale for IdentityScale {
        fn to_hertz(&self, freqs: &[f32]) -> Vec<f32> {
            freqs.to_vec()
        }
    }

    struct PassthroughTransfer;
    impl ExcitationTransfer for PassthroughTransfer {
        fn transfer_signal_with_freqs(&self, signal: &[Vec<f32>], _freqs: &[f32]) -> Vec<Vec<f32>> {
            signal.to_vec()
        }
    }

    struct ZeroTransfer;
    impl ExcitationTransfer for ZeroTransfer {
        fn transfer_signal_with_freqs(&self, signal: &[Vec<f32>], _freqs: &[f32]) -> Vec<Vec<f32>> {
            signal.iter().map(|row| vec![0.0; row.len()]).collect()
        }
    }

    #[test]
    fn construction_rejects_out_of_range_threshold_level() {
        assert!(LoudnessCompressor::new(0.5, 0.04, -1.0).is_err());
        assert!(LoudnessCompressor::new(0.5, 0.04, 90.001).is_err());
        assert!(LoudnessCompressor::new(0.5, 0.04, PHON_HEARING_THRESHOLD).is_ok());
    }

    #[test]
    fn cached_contour_matches_direct_evaluation() {
        let comp = LoudnessCompressor::new(0.5, 0.04, 40.0).unwrap();
        let direct = iso226::equal_loudness_contour(40.0).unwrap();
        assert_eq!(comp.hearing_threshold_contour(), &direct);
    }

    #[test]
    fn at_threshold_excitation_compresses_to_zero() {
        let comp = LoudnessCompressor::new(0.5, 0.04, PHON_HEARING_THRESHOLD).unwrap();
        let freqs = [100.0, 1000.0, 4000.0];
        let e0 = comp.hearing_threshold_excitation(&freqs, &IdentityScale, &PassthroughTransfer);
        let out = comp
            .compress(&e0, &freqs, &IdentityScale, &PassthroughTransfer)
            .unwrap();
        for row in &out {
            for &v in row {
                assert_eq!(v, 0.0);
            }
        }
    }

    #[test]
    fn zero_threshold_excitation_fails_loudly() {
        let comp = LoudnessCompressor::new(0.5, 0.04, PHON_HEARING_THRESHOLD).unwrap();
        let freqs = [1000.0];
        let excitation = vec![vec![1.0]];
        let err = comp
            .compress(&excitation, &freqs, &IdentityScale, &ZeroTransfer)
            .unwrap_err();
        assert!(matches!(err, LoudnessError::ThresholdUnderflow { band: 0, .. }));
    }
}
