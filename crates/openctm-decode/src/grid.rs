//! Uniform quantization grid and vertex dequantization.

use glam::{UVec3, Vec3};

use crate::error::{DecodeError, DecodeResult};

/// Uniform 3D quantization grid from a grid-compressed file header.
///
/// The bounding box is partitioned into `divisions` cells per axis; a
/// vertex is stored as a flat cell index plus a small integer offset
/// inside its cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    lower_bound: Vec3,
    divisions: UVec3,
    cell_size: Vec3,
}

impl Grid {
    /// Build a grid from its bounding box and per-axis division counts.
    ///
    /// # Errors
    ///
    /// Returns an error if any division count is zero.
    pub fn from_bounds(
        lower_bound: Vec3,
        higher_bound: Vec3,
        divisions: UVec3,
    ) -> DecodeResult<Self> {
        if divisions.min_element() == 0 {
            return Err(DecodeError::InvalidFormat {
                context: "grid",
                detail: format!("division counts must be positive, got {divisions}"),
            });
        }

        let cell_size = (higher_bound - lower_bound) / divisions.as_vec3();

        Ok(Self {
            lower_bound,
            divisions,
            cell_size,
        })
    }

    /// Total number of grid cells.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.divisions.x) * u64::from(self.divisions.y) * u64::from(self.divisions.z)
    }

    /// Size of one cell per axis.
    #[must_use]
    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }

    /// World-space origin of the cell with the given flat index.
    ///
    /// Flat indices run x-fastest: `index = (z * divy + y) * divx + x`.
    #[must_use]
    pub fn cell_origin(&self, index: u32) -> Vec3 {
        let zdiv = u64::from(self.divisions.x) * u64::from(self.divisions.y);
        let ydiv = u64::from(self.divisions.x);

        let mut rest = u64::from(index);
        let z = rest / zdiv;
        rest -= z * zdiv;
        let y = rest / ydiv;
        let x = rest - y * ydiv;

        // Cell coordinates are bounded by the division counts, so the
        // casts stay well inside f32 integer range.
        self.lower_bound + Vec3::new(x as f32, y as f32, z as f32) * self.cell_size
    }
}

/// Restore delta-coded grid cell indices by running sum, in place.
///
/// The first index is stored absolute; every later index is a
/// non-negative delta from its predecessor.
pub fn restore_grid_indices(grid_indices: &mut [u32]) {
    for i in 1..grid_indices.len() {
        grid_indices[i] = grid_indices[i].wrapping_add(grid_indices[i - 1]);
    }
}

/// Dequantize vertex positions.
///
/// `quantized` holds one u32 triple per vertex and `grid_indices` that
/// vertex's restored cell index. The x component is delta-coded against
/// the previous vertex's x delta when both vertices fall in the same grid
/// cell; y and z are always absolute offsets within the cell. Only x is
/// chained this way - the asymmetry matches the encoder bit for bit.
/// Each final component is `cell_origin + precision * offset`.
///
/// # Errors
///
/// Returns an error if the slice lengths disagree or a grid index falls
/// outside the grid.
pub fn restore_vertices(
    quantized: &[u32],
    grid_indices: &[u32],
    grid: &Grid,
    precision: f32,
    vertices: &mut [f32],
) -> DecodeResult<()> {
    if quantized.len() != vertices.len() {
        return Err(DecodeError::LengthMismatch {
            context: "quantized vertices",
            expected: vertices.len(),
            actual: quantized.len(),
        });
    }
    if grid_indices.len() * 3 != vertices.len() {
        return Err(DecodeError::LengthMismatch {
            context: "grid indices",
            expected: vertices.len() / 3,
            actual: grid_indices.len(),
        });
    }

    let cells = grid.cell_count();
    let mut prev_grid_index = None;
    let mut prev_delta = 0u32;

    for (i, &grid_index) in grid_indices.iter().enumerate() {
        if u64::from(grid_index) >= cells {
            return Err(DecodeError::IndexOutOfBounds {
                index: grid_index as usize,
                len: cells as usize,
            });
        }

        let origin = grid.cell_origin(grid_index);
        let j = i * 3;

        let mut delta = quantized[j];
        if prev_grid_index == Some(grid_index) {
            delta = delta.wrapping_add(prev_delta);
        }

        vertices[j] = origin.x + precision * delta as f32;
        vertices[j + 1] = origin.y + precision * quantized[j + 1] as f32;
        vertices[j + 2] = origin.z + precision * quantized[j + 2] as f32;

        prev_grid_index = Some(grid_index);
        prev_delta = delta;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid(divisions: UVec3) -> Grid {
        Grid::from_bounds(Vec3::ZERO, divisions.as_vec3(), divisions).unwrap()
    }

    #[test]
    fn test_grid_rejects_zero_divisions() {
        let result = Grid::from_bounds(Vec3::ZERO, Vec3::ONE, UVec3::new(2, 0, 2));
        assert!(matches!(result, Err(DecodeError::InvalidFormat { .. })));
    }

    #[test]
    fn test_cell_origin_unit_cells() {
        // 2x2x2 grid with unit cells: flat index 5 decomposes to
        // (x, y, z) = (1, 0, 1).
        let grid = unit_grid(UVec3::splat(2));
        assert_eq!(grid.cell_origin(5), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(grid.cell_origin(0), Vec3::ZERO);
        assert_eq!(grid.cell_origin(7), Vec3::splat(1.0));
    }

    #[test]
    fn test_cell_origin_scaled_cells() {
        let grid = Grid::from_bounds(
            Vec3::new(-4.0, 0.0, 2.0),
            Vec3::new(4.0, 8.0, 4.0),
            UVec3::new(4, 2, 1),
        )
        .unwrap();
        assert_eq!(grid.cell_size(), Vec3::new(2.0, 4.0, 2.0));
        // index 6 = x 2, y 1, z 0
        assert_eq!(grid.cell_origin(6), Vec3::new(0.0, 4.0, 2.0));
    }

    #[test]
    fn test_restore_grid_indices_prefix_sum() {
        let mut indices = [0, 2, 1, 5];
        restore_grid_indices(&mut indices);
        assert_eq!(indices, [0, 2, 3, 8]);
    }

    #[test]
    fn test_restore_vertices_absolute_within_cell() {
        // Two vertices in different cells: no delta chaining anywhere.
        let grid = unit_grid(UVec3::splat(2));
        let quantized = [1, 2, 3, 1, 0, 0];
        let grid_indices = [0, 5];
        let mut vertices = [0.0f32; 6];

        restore_vertices(&quantized, &grid_indices, &grid, 0.25, &mut vertices).unwrap();

        assert_eq!(&vertices[0..3], &[0.25, 0.5, 0.75]);
        // cell 5 origin is (1, 0, 1)
        assert_eq!(&vertices[3..6], &[1.25, 0.0, 1.0]);
    }

    #[test]
    fn test_restore_vertices_chains_x_within_same_cell() {
        // Three vertices in the same cell: the x offsets accumulate while
        // y and z stay absolute.
        let grid = unit_grid(UVec3::ONE);
        let quantized = [1, 2, 0, 1, 2, 0, 2, 1, 1];
        let grid_indices = [0, 0, 0];
        let mut vertices = [0.0f32; 9];

        restore_vertices(&quantized, &grid_indices, &grid, 0.125, &mut vertices).unwrap();

        assert_eq!(&vertices[0..3], &[0.125, 0.25, 0.0]);
        // x delta 1 chains on the previous delta 1
        assert_eq!(&vertices[3..6], &[0.25, 0.25, 0.0]);
        // x delta 2 chains on the previous delta 2
        assert_eq!(&vertices[6..9], &[0.5, 0.125, 0.125]);
    }

    #[test]
    fn test_restore_vertices_chain_restarts_on_new_cell() {
        let grid = unit_grid(UVec3::splat(2));
        let quantized = [3, 0, 0, 1, 0, 0];
        let grid_indices = [0, 1];
        let mut vertices = [0.0f32; 6];

        restore_vertices(&quantized, &grid_indices, &grid, 0.25, &mut vertices).unwrap();

        assert_eq!(&vertices[0..3], &[0.75, 0.0, 0.0]);
        // New cell: the raw value is absolute again.
        assert_eq!(&vertices[3..6], &[1.25, 0.0, 0.0]);
    }

    #[test]
    fn test_restore_vertices_rejects_out_of_grid_index() {
        let grid = unit_grid(UVec3::splat(2));
        let quantized = [0, 0, 0];
        let grid_indices = [8];
        let mut vertices = [0.0f32; 3];

        assert!(matches!(
            restore_vertices(&quantized, &grid_indices, &grid, 1.0, &mut vertices),
            Err(DecodeError::IndexOutOfBounds { index: 8, len: 8 })
        ));
    }

    #[test]
    fn test_restore_vertices_rejects_length_mismatch() {
        let grid = unit_grid(UVec3::ONE);
        let mut vertices = [0.0f32; 6];

        assert!(matches!(
            restore_vertices(&[0, 0, 0], &[0, 0], &grid, 1.0, &mut vertices),
            Err(DecodeError::LengthMismatch { .. })
        ));
    }
}
