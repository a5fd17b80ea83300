//! Triangle index delta restoration.

use crate::error::{DecodeError, DecodeResult};

/// Restore delta-coded triangle indices in place.
///
/// Each triangle's first index is stored as a delta from the previous
/// triangle's first index. The second index is a delta from the previous
/// triangle's second index when both triangles share a first index, and
/// from this triangle's own restored first index otherwise. The third
/// index is always a delta from this triangle's restored first index.
///
/// The shared-first-index branch is the encoder's tie-break for meshes
/// with fans of triangles around one vertex and must be reproduced
/// exactly.
///
/// # Errors
///
/// Returns an error if the slice length is not divisible by 3.
pub fn restore_indices(indices: &mut [u32]) -> DecodeResult<()> {
    if !indices.len().is_multiple_of(3) {
        return Err(DecodeError::InvalidFormat {
            context: "indices",
            detail: format!("length {} is not divisible by 3", indices.len()),
        });
    }

    if !indices.is_empty() {
        indices[2] = indices[2].wrapping_add(indices[0]);
    }

    for i in (3..indices.len()).step_by(3) {
        indices[i] = indices[i].wrapping_add(indices[i - 3]);

        if indices[i] == indices[i - 3] {
            indices[i + 1] = indices[i + 1].wrapping_add(indices[i - 2]);
        } else {
            indices[i + 1] = indices[i + 1].wrapping_add(indices[i]);
        }

        indices[i + 2] = indices[i + 2].wrapping_add(indices[i]);
    }

    Ok(())
}
