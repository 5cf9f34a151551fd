//! Attack/release smoothing of the per-frame gain reduction.

/*
Attack / Release Smoothing
==========================

If each frame's raw reduction were applied directly, the gain would jump
from frame to frame and the result would "pump" with audible steps. The
smoother blends every new target with the value it produced for the
previous frame, so the reduction glides instead of jumping.

Vocabulary
----------

  previous      The smoothed reduction of the previous frame. Starts at 0 for
                the first frame of a buffer and is carried forward one frame
                at a time. This is the ONLY state in the whole engine.

  raw           This frame's target reduction, straight from the detector.

  attack        Blend coefficient used while the reduction is GROWING
                (the signal got louder, we need to clamp down).

  release       Blend coefficient used while the reduction is SHRINKING or
                holding (the signal got quieter, we let go).


The Math: One-Pole Blend
------------------------

    coeff = attack   if raw > previous
            release  otherwise

    smoothed = previous + coeff × (raw - previous)

This is linear interpolation from `previous` toward `raw`:

    coeff = 0.0   →  stay at previous (never moves)
    coeff = 0.5   →  halfway there
    coeff = 1.0   →  snap to raw immediately

    reduction
        │            raw ─────────────────
        │           ╱ ·  ·  ·  ·  ·  ·  ·
        │         ╱·       ← attack 0.5: half the gap each frame
        │       ╱·
        │     ·
      0 └─────┴──┴──┴──┴──┴──┴──→ frame

Despite the names, attack and release are NOT times in seconds. They are
used exactly as given, with no time-constant conversion and no clamping.
Values outside [0, 1] overshoot or oscillate and that is passed through.


Why This Forces Sequential Processing
-------------------------------------

Frame i's smoothed value is an input to frame i+1. The frame loop is a fold
with `previous` as the accumulator; running frames out of order, or in
parallel, produces a different (wrong) result.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Blend `raw` toward `previous` using the attack or release coefficient.
#[inline]
pub fn smooth(raw: f32, attack: f32, release: f32, previous: f32) -> f32 {
    let coeff = if raw > previous { attack } else { release };
    previous + coeff * (raw - previous)
}

/// The attack/release coefficient pair.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistics {
    pub attack: f32,
    pub release: f32,
}

impl Ballistics {
    pub fn new(attack: f32, release: f32) -> Self {
        Self { attack, release }
    }

    /// One step of the fold: returns the value that becomes `previous` for
    /// the next frame.
    #[inline]
    pub fn step(&self, previous: f32, raw: f32) -> f32 {
        smooth(raw, self.attack, self.release, previous)
    }

    /// Smooth a whole sequence of raw reductions, starting from zero.
    pub fn run(&self, raw: &[f32]) -> Vec<f32> {
        raw.iter()
            .scan(0.0, |previous, &r| {
                *previous = self.step(*previous, r);
                Some(*previous)
            })
            .collect()
    }
}
