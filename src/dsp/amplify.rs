//! Decibel-to-linear gain application.

/*
Gain Application
================

The last stage turns "how much to cut" into an actual multiplier and scales
every sample of the frame by it.

Vocabulary
----------

  gain          A multiplier applied to amplitude.
                  gain > 1.0  →  louder (amplification)
                  gain = 1.0  →  unchanged (unity gain)
                  gain < 1.0  →  quieter (attenuation)

  makeup gain   A static boost (or cut) in dB added on top of the dynamic
                reduction, to win back level lost to compression.

  decibels      Level changes are expressed in dB because hearing is
                logarithmic:

                    linear = 10 ^ (dB / 20)

                    ×1.0   =   0 dB  (unity)
                    ×0.5   ≈  -6 dB
                    ×0.1   = -20 dB
                    ×2.0   ≈  +6 dB


The Math
--------

    multiplier = 10 ^ ((gain_reduction + makeup_db) / 20)
    output[i]  = frame[i] × multiplier


Sign Convention
---------------

The detector and smoother both work with a POSITIVE reduction ("cut by this
much"). The caller negates it right here, at the boundary:

    apply_makeup_gain(frame, -smoothed, makeup_db)

Passing the positive value by mistake does not fail; it silently BOOSTS the
loud passages instead of taming them. The engine tests pin this down.


Non-finite Input
----------------

NaN or infinite inputs are not trapped. They propagate into the output,
where the WAV writer rejects them.
*/

/// Convert a dB-like value to a linear multiplier.
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

/// The multiplier for an already-negated `gain_reduction` plus makeup `gain_db`.
#[inline]
pub fn makeup_multiplier(gain_reduction: f32, gain_db: f32) -> f32 {
    db_to_linear(gain_reduction + gain_db)
}

/// Multiply a signal by a constant gain factor (in-place).
///
/// # Arguments
/// * `signal` - The signal buffer to modify in-place
/// * `gain` - The gain factor (0.0 = silence, 1.0 = unchanged, 2.0 = double)
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Scale a copy of `frame` by `10 ^ ((gain_reduction + gain_db) / 20)`.
///
/// `gain_reduction` must already carry its sign: negative attenuates.
pub fn apply_makeup_gain(frame: &[f32], gain_reduction: f32, gain_db: f32) -> Vec<f32> {
    let multiplier = makeup_multiplier(gain_reduction, gain_db);
    frame.iter().map(|&s| s * multiplier).collect()
}
