//! Deterministic pseudo-waveform generation
//!
//! Visualizers render a bar waveform per track without decoding any
//! audio: amplitudes are derived purely from the track identifier, so
//! every surface (and every process) draws the identical shape for the
//! same track. The output is a cross-implementation contract - the
//! dashboard frontend computes the same bars from the same identifier.

/// Number of bars rendered by the stock visualizer
pub const DEFAULT_BAR_COUNT: usize = 40;

/// Lower bound of the default amplitude range
pub const DEFAULT_MIN_AMPLITUDE: u32 = 10;

/// Upper bound of the default amplitude range
pub const DEFAULT_MAX_AMPLITUDE: u32 = 100;

/// LCG multiplier (glibc rand constants)
const LCG_MULTIPLIER: u64 = 1_103_515_245;

/// LCG increment
const LCG_INCREMENT: u64 = 12_345;

/// LCG modulus (2^31)
const LCG_MODULUS: u64 = 2_147_483_648;

/// Generate the default waveform for a track identifier
///
/// 40 bars with amplitudes in [10, 100]. Pure function: identical input
/// yields byte-identical output, safe to call from any number of
/// concurrent callers.
pub fn waveform_bars(track_id: &str) -> Vec<u32> {
    waveform(
        track_id,
        DEFAULT_BAR_COUNT,
        DEFAULT_MIN_AMPLITUDE,
        DEFAULT_MAX_AMPLITUDE,
    )
}

/// Generate a waveform with explicit bar count and amplitude range
///
/// The seed is a rolling hash over the identifier's code points with
/// 32-bit wraparound (`hash = hash * 31 + code`), taken as an absolute
/// value. Each bar then steps a linear congruential generator
/// (`h = (h * 1103515245 + 12345) mod 2^31`) and maps the value into
/// `[min_amplitude, max_amplitude]` by modulo.
///
/// `max_amplitude < min_amplitude` is treated as a degenerate range and
/// collapses to `min_amplitude`.
pub fn waveform(
    track_id: &str,
    bars: usize,
    min_amplitude: u32,
    max_amplitude: u32,
) -> Vec<u32> {
    let span = u64::from(max_amplitude.saturating_sub(min_amplitude)) + 1;

    let mut state = u64::from(seed(track_id));
    let mut amplitudes = Vec::with_capacity(bars);
    for _ in 0..bars {
        state = (state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        amplitudes.push(min_amplitude + (state % span) as u32);
    }
    amplitudes
}

/// Rolling 31-hash over the identifier, 32-bit wraparound, absolute value
fn seed(track_id: &str) -> u32 {
    let mut hash: i32 = 0;
    for c in track_id.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(c as i32);
    }
    hash.unsigned_abs()
}
