//! Splitting a sample buffer into fixed-size frames.

/*
Framing
=======

The compressor does not look at individual samples. It looks at FRAMES:
consecutive, non-overlapping windows of `frame_size` samples.

    samples:  [s0 s1 s2 s3 | s4 s5 s6 s7 | s8 s9]
    frames:    └─ frame 0 ┘  └─ frame 1 ┘  └ dropped ┘
                                            (2 < frame_size)

Frames come out in their original order and must be consumed in that order,
because the smoother carries state from one frame to the next.

Trailing samples that do not fill a whole frame are DROPPED. They are not
processed, not padded, and not appended to the output. The output length is
therefore always:

    (len / frame_size) * frame_size
*/

use std::slice::ChunksExact;

use crate::error::{CompressorError, Result};

/// Split `samples` into consecutive frames of exactly `frame_size` samples.
///
/// The returned iterator is lazy and borrows the input. An empty input
/// yields zero frames; the unfilled tail is available through
/// [`ChunksExact::remainder`] but is never emitted as a frame.
pub fn frames(samples: &[f32], frame_size: usize) -> Result<ChunksExact<'_, f32>> {
    if frame_size == 0 {
        return Err(CompressorError::invalid_config(
            "frame_size must be greater than zero",
        ));
    }
    Ok(samples.chunks_exact(frame_size))
}

/// Number of samples that survive framing.
#[inline]
pub fn processed_len(len: usize, frame_size: usize) -> usize {
    if frame_size == 0 {
        return 0;
    }
    (len / frame_size) * frame_size
}
