// src/tone.rs
// Cycle-quantized sine bursts with linear fades

use std::f64::consts::TAU;

const AMPLITUDE: f64 = i16::MAX as f64;

/// Synthesize a sine burst of roughly `duration_secs`.
///
/// The sounded length is snapped to a whole number of cycles at
/// `frequency_hz` so the burst ends on a zero crossing. When that rounds to
/// zero cycles the burst is empty. `fade_secs` is clamped to half the nominal
/// duration; the first and last `floor(fade_secs * sample_rate)` samples are
/// ramped linearly, and if the snapped burst is shorter than both ramps
/// together, the overlapping samples receive both.
pub fn synthesize(frequency_hz: f64, sample_rate: u32, duration_secs: f64, fade_secs: f64) -> Vec<i16> {
    debug_assert!(frequency_hz > 0.0, "frequency must be positive");
    debug_assert!(sample_rate > 0, "sample rate must be positive");

    let duration_secs = duration_secs.max(0.0);
    let cycles = (frequency_hz * duration_secs).round();
    if cycles <= 0.0 {
        return Vec::new();
    }

    let rate = sample_rate as f64;
    let sounded_secs = cycles / frequency_hz;
    let sample_count = (rate * sounded_secs).round() as usize;

    let mut wave: Vec<f64> = (0..sample_count)
        .map(|i| AMPLITUDE * (TAU * frequency_hz * i as f64 / rate).sin())
        .collect();

    let fade_secs = fade_secs.clamp(0.0, duration_secs / 2.0);
    let fade_samples = (fade_secs * rate).floor() as usize;
    apply_fades(&mut wave, fade_samples);

    wave.into_iter().map(|s| s.round() as i16).collect()
}

fn apply_fades(wave: &mut [f64], fade_samples: usize) {
    if fade_samples == 0 {
        return;
    }
    let len = wave.len();
    let fade = fade_samples as f64;

    for (i, sample) in wave.iter_mut().take(fade_samples).enumerate() {
        *sample *= i as f64 / fade;
    }

    for i in 0..fade_samples {
        // Ramps longer than the burst start before sample 0.
        let Some(idx) = (len + i).checked_sub(fade_samples) else {
            continue;
        };
        wave[idx] *= (fade_samples - i - 1) as f64 / fade;
    }
}
