//! Normal reconstruction for grid-compressed meshes.
//!
//! Detailed normals are stored in spherical coordinates relative to a
//! per-vertex reference frame built from smooth normals, which the
//! decoder recomputes from the restored indices and vertices.

use std::f32::consts::PI;

use glam::Vec3;

use crate::error::{DecodeError, DecodeResult};

/// Vectors at or below this length are left unnormalized.
const DEGENERATE_LENGTH: f32 = 1e-10;

/// Accumulate per-triangle face normals into per-vertex smooth normals.
///
/// For every triangle the cross product of its two edge vectors is
/// normalized (skipped near zero length) and added to each corner's
/// running normal; the accumulated normals are renormalized at the end.
///
/// # Errors
///
/// Returns an error if a slice length is not divisible by 3 or a triangle
/// index points past the vertex array.
pub fn smooth_normals(indices: &[u32], vertices: &[f32]) -> DecodeResult<Vec<f32>> {
    if !indices.len().is_multiple_of(3) {
        return Err(DecodeError::InvalidFormat {
            context: "indices",
            detail: format!("length {} is not divisible by 3", indices.len()),
        });
    }
    if !vertices.len().is_multiple_of(3) {
        return Err(DecodeError::InvalidFormat {
            context: "vertices",
            detail: format!("length {} is not divisible by 3", vertices.len()),
        });
    }

    let vertex_count = vertices.len() / 3;
    let mut smooth = vec![0.0f32; vertices.len()];

    for tri in indices.chunks_exact(3) {
        for &corner in tri {
            if corner as usize >= vertex_count {
                return Err(DecodeError::IndexOutOfBounds {
                    index: corner as usize,
                    len: vertex_count,
                });
            }
        }

        let position = |k: usize| Vec3::from_slice(&vertices[tri[k] as usize * 3..]);
        let (a, b, c) = (position(0), position(1), position(2));

        let mut normal = (b - a).cross(c - a);
        let len = normal.length();
        if len > DEGENERATE_LENGTH {
            normal /= len;
        }

        for &corner in tri {
            let j = corner as usize * 3;
            smooth[j] += normal.x;
            smooth[j + 1] += normal.y;
            smooth[j + 2] += normal.z;
        }
    }

    for accumulated in smooth.chunks_exact_mut(3) {
        let len = Vec3::from_slice(accumulated).length();
        if len > DEGENERATE_LENGTH {
            for component in accumulated {
                *component /= len;
            }
        }
    }

    Ok(smooth)
}

/// Build the orthonormal frame used to decode a normal against its smooth
/// reference normal.
///
/// The rows are the world-space images of the local axes: row 2 is the
/// reference normal itself, row 0 derives from `(-n.y, n.x - n.z, n.y)`
/// normalized, and row 1 is their cross product. The fixed construction
/// leaves no per-vertex orientation ambiguity beyond the reference
/// normal's own sign.
#[must_use]
pub fn normal_basis(reference: Vec3) -> [Vec3; 3] {
    let mut tangent = Vec3::new(-reference.y, reference.x - reference.z, reference.y);

    // tangent.z equals -tangent.x, so the squared length folds to
    // 2x^2 + y^2.
    let len = (2.0 * tangent.x * tangent.x + tangent.y * tangent.y).sqrt();
    if len > DEGENERATE_LENGTH {
        tangent /= len;
    }

    let bitangent = reference.cross(tangent);

    [tangent, bitangent, reference]
}

/// Decode spherical-coded normals against per-vertex smooth-normal frames.
///
/// Each encoded triple is (magnitude, altitude code, azimuth code): the
/// magnitude scales by `precision`, the altitude angle is
/// `code * 0.5 * PI * precision`, and the azimuth angle folds
/// `code * scale - 1` into `[-PI, PI)` with `scale = 0.5` for altitude
/// codes up to 4 and `2 / code` above. Altitude code 0 pins the azimuth
/// to `-PI`. The local-frame vector is rotated into world space by the
/// basis rows of [`normal_basis`].
///
/// # Errors
///
/// Returns an error if the slice lengths disagree or are not divisible
/// by 3.
pub fn restore_normals(
    encoded: &[u32],
    smooth: &[f32],
    precision: f32,
    normals: &mut [f32],
) -> DecodeResult<()> {
    if encoded.len() != normals.len() {
        return Err(DecodeError::LengthMismatch {
            context: "encoded normals",
            expected: normals.len(),
            actual: encoded.len(),
        });
    }
    if smooth.len() != normals.len() {
        return Err(DecodeError::LengthMismatch {
            context: "smooth normals",
            expected: normals.len(),
            actual: smooth.len(),
        });
    }
    if !normals.len().is_multiple_of(3) {
        return Err(DecodeError::InvalidFormat {
            context: "normals",
            detail: format!("length {} is not divisible by 3", normals.len()),
        });
    }

    for i in (0..normals.len()).step_by(3) {
        let magnitude = encoded[i] as f32 * precision;
        let altitude_code = encoded[i + 1];

        let theta = if altitude_code == 0 {
            -PI
        } else {
            let theta_scale = if altitude_code <= 4 {
                0.5
            } else {
                2.0 / altitude_code as f32
            };
            (encoded[i + 2] as f32 * theta_scale - 1.0) * PI
        };

        let phi = altitude_code as f32 * 0.5 * PI * precision;

        let (sin_phi, cos_phi) = phi.sin_cos();
        let local = Vec3::new(
            sin_phi * theta.cos() * magnitude,
            sin_phi * theta.sin() * magnitude,
            cos_phi * magnitude,
        );

        let basis = normal_basis(Vec3::from_slice(&smooth[i..i + 3]));
        let world = basis[0] * local.x + basis[1] * local.y + basis[2] * local.z;
        world.write_to_slice(&mut normals[i..i + 3]);
    }

    Ok(())
}
