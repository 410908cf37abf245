//! dB conversion helpers with explicit power semantics.
//! Power uses 10*log10(·) and dB to ratio uses /10.
//! EPS_POWER is applied to avoid log10(0) and doubles as the smallest
//! power treated as nonzero by the loudness mapping.

/// Minimum power floor for log conversions.
pub const EPS_POWER: f32 = 1e-20;

/// Convert dB to a power ratio.
pub fn db_to_power_ratio(db: f32) -> f32 {
    10.0_f32.powf(db / 10.0)
}

/// Convert power ratio to dB (10*log10).
pub fn power_to_db(p: f32) -> f32 {
    10.0 * (p.max(EPS_POWER)).log10()
}
