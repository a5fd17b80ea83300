//! UV and attribute map restoration.

use crate::error::{DecodeError, DecodeResult};

/// Restore a zigzag-delta-coded per-vertex map.
///
/// `map` holds `channels` interleaved values per vertex (2 for UV maps,
/// 4 for attribute maps). Each channel is delta-decoded independently
/// down the vertex sequence: even codes map to `code / 2`, odd codes to
/// `-(code + 1) / 2`, accumulated as a running sum and scaled by
/// `precision`.
///
/// # Errors
///
/// Returns an error if the code and output lengths disagree or the
/// length is not a whole number of vertices.
pub fn restore_map(
    codes: &[u32],
    channels: usize,
    precision: f32,
    map: &mut [f32],
) -> DecodeResult<()> {
    if codes.len() != map.len() {
        return Err(DecodeError::LengthMismatch {
            context: "map codes",
            expected: map.len(),
            actual: codes.len(),
        });
    }
    if channels == 0 || !map.len().is_multiple_of(channels) {
        return Err(DecodeError::InvalidFormat {
            context: "map",
            detail: format!(
                "length {} is not a multiple of {channels} channels",
                map.len()
            ),
        });
    }

    for channel in 0..channels {
        let mut delta = 0i32;
        for j in (channel..map.len()).step_by(channels) {
            delta = delta.wrapping_add(zigzag_decode(codes[j]));
            map[j] = delta as f32 * precision;
        }
    }

    Ok(())
}

/// Map an unsigned zigzag code back to its signed value.
const fn zigzag_decode(code: u32) -> i32 {
    // Wrapping casts mirror the 32-bit arithmetic of the wire format.
    let half = (code >> 1) as i32;
    if code & 1 == 1 { -half - 1 } else { half }
}
