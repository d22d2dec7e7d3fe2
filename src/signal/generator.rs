// Sample generator - one algorithm per waveform family
//
// Each algorithm is a pure step: (settings, sample index) -> (value, next index).
// Arithmetic is done in f64 and narrowed to f32 on output. Degenerate settings
// (zero frequencies) are not guarded: real divisions yield inf/NaN, truncations
// to u32 saturate, and counter increments wrap. Nothing here can panic.

use rand::Rng;
use rand::SeedableRng;
use rand::distributions::Standard;
use rand::rngs::SmallRng;
use std::f64::consts::PI;

use super::settings::SignalSettings;
use super::waveform::SignalType;

const TWO_PI: f64 = 2.0 * PI;

/// Compute one sample for the configured waveform
///
/// Returns the output value and the sample index to use on the next tick.
/// `rng` is only consulted by [`SignalType::Noise`], which leaves the index untouched.
pub fn generate<R: Rng + ?Sized>(
    settings: &SignalSettings,
    sample_index: u32,
    rng: &mut R,
) -> (f32, u32) {
    match settings.signal_type {
        SignalType::Triangle => triangle(settings, sample_index),
        SignalType::Sine => sine(settings, sample_index),
        SignalType::Square => square(settings, sample_index),
        SignalType::Noise => (noise(settings.amplitude, rng), sample_index),
    }
}

/// Rising ramp over the first half period, flat zero afterwards
///
/// The counter resets as soon as the ramp ends, so the falling half of the
/// period is never produced.
fn triangle(settings: &SignalSettings, sample_index: u32) -> (f32, u32) {
    let samples_per_period = settings.sample_frequency as f64 / settings.signal_frequency as f64;
    let rising_length = samples_per_period / 2.0;
    let slope = settings.amplitude as f64 / rising_length;
    let index = sample_index as f64;

    if index < rising_length {
        ((slope * index) as f32, sample_index.wrapping_add(1))
    } else {
        // Reset to 0, then the per-tick increment still applies
        (0.0, 1)
    }
}

fn sine(settings: &SignalSettings, sample_index: u32) -> (f32, u32) {
    let normalized_frequency = settings.signal_frequency as f64 / settings.sample_frequency as f64;
    let angle = TWO_PI * normalized_frequency * sample_index as f64 + settings.phase as f64 * TWO_PI;
    let value = settings.amplitude as f64 * angle.sin();

    // Truncated period: drifts when the ratio is not an integer
    let samples_per_period = (1.0 / normalized_frequency) as u32;
    let mut next = sample_index.wrapping_add(1);
    if next >= samples_per_period {
        next = 0;
    }

    (value as f32, next)
}

/// 50% duty cycle square wave
///
/// Rolls over only once the counter exceeds the period, so each cycle lasts
/// one tick longer than `sample_frequency / signal_frequency`.
fn square(settings: &SignalSettings, sample_index: u32) -> (f32, u32) {
    // x / 0 is +inf and 0 / 0 is NaN; truncated to u32 those become MAX and 0
    let samples_per_period = match settings
        .sample_frequency
        .checked_div(settings.signal_frequency)
    {
        Some(samples) => samples,
        None if settings.sample_frequency == 0 => 0,
        None => u32::MAX,
    };
    let positive_length = samples_per_period / 2;

    let sign = if sample_index < positive_length { 1.0 } else { -1.0 };
    let value = settings.amplitude as f64 * sign;

    let mut next = sample_index.wrapping_add(1);
    if next > samples_per_period {
        next = 0;
    }

    (value as f32, next)
}

/// Uniform noise in [0, amplitude) (or (amplitude, 0] for negative amplitudes)
fn noise<R: Rng + ?Sized>(amplitude: i32, rng: &mut R) -> f32 {
    let unit: f32 = rng.sample(Standard);
    amplitude as f32 * unit
}

/// Stateful wrapper around [`generate`]
///
/// Owns the progress counter and the pseudo-random source. The counter is
/// never reset by a settings change: new settings apply to the existing index.
pub struct SampleGenerator {
    sample_index: u32,
    rng: SmallRng,
}

impl SampleGenerator {
    pub fn new() -> Self {
        Self {
            sample_index: 0,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a generator with a reproducible noise sequence
    pub fn with_seed(seed: u64) -> Self {
        Self {
            sample_index: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn sample_index(&self) -> u32 {
        self.sample_index
    }

    /// Produce the next sample and advance the counter
    pub fn next_sample(&mut self, settings: &SignalSettings) -> f32 {
        let (value, next) = generate(settings, self.sample_index, &mut self.rng);
        self.sample_index = next;
        value
    }
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}
