//! core/transfer.rs — Seams to the external auditory collaborators.
//!
//! The Bark↔Hz conversion and the outer/middle-ear plus excitation-band
//! spreading model live outside this crate; the loudness core only needs
//! the two operations below. Signals are band-major: `signal[row][frame]`.

/// Maps auditory-scale (Bark) frequencies to Hz, one strictly positive
/// output per input, positionally aligned.
pub trait AuditoryScale {
    fn to_hertz(&self, freqs: &[f32]) -> Vec<f32>;
}

/// Redistributes a power-per-frequency signal onto excitation bands.
///
/// `signal` is indexed `[frequency][frame]`; the output is
/// `[band][frame]` with an implementation-defined band count. The
/// loudness core forwards the output shape opaquely.
pub trait ExcitationTransfer {
    fn transfer_signal_with_freqs(&self, signal: &[Vec<f32>], freqs: &[f32]) -> Vec<Vec<f32>>;
}
