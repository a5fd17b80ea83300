//! Lossy grid-compressed tier.
//!
//! Vertex positions are quantized to a uniform grid, normals to spherical
//! coordinates around recomputed smooth normals, and map values to
//! per-map fixed-point deltas. The tier's grid header supplies the
//! precision scalars and grid geometry; restoration runs section by
//! section as the stream is consumed.

use glam::{UVec3, Vec3};
use openctm_decode::{
    Grid, restore_grid_indices, restore_indices, restore_map, restore_normals, restore_vertices,
    smooth_normals,
};

use crate::compression::read_packed;
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::stream::Reader;

/// Grid header of the quantized tier.
#[derive(Debug, Clone, PartialEq)]
struct Mg2Header {
    vertex_precision: f32,
    normal_precision: f32,
    grid: Grid,
}

impl Mg2Header {
    /// Parse the grid header: precision scalars, bounding box, and
    /// per-axis division counts.
    fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let _ = reader.read_u32()?; // "MG2H"
        let vertex_precision = reader.read_f32()?;
        let normal_precision = reader.read_f32()?;

        let lower_bound = read_vec3(reader)?;
        let higher_bound = read_vec3(reader)?;
        let divisions = read_divisions(reader)?;

        let grid = Grid::from_bounds(lower_bound, higher_bound, divisions)?;

        Ok(Self {
            vertex_precision,
            normal_precision,
            grid,
        })
    }
}

fn read_vec3(reader: &mut Reader<'_>) -> Result<Vec3> {
    Ok(Vec3::new(
        reader.read_f32()?,
        reader.read_f32()?,
        reader.read_f32()?,
    ))
}

fn read_divisions(reader: &mut Reader<'_>) -> Result<UVec3> {
    let mut divisions = [0u32; 3];
    for (slot, axis) in divisions.iter_mut().zip(["x", "y", "z"]) {
        let value = reader.read_i32()?;
        if value < 1 {
            return Err(Error::MalformedGeometry {
                context: "grid divisions",
                detail: format!("axis {axis} has {value} divisions"),
            });
        }
        // Positive after the check above.
        *slot = value as u32;
    }
    Ok(UVec3::from_array(divisions))
}

pub(crate) fn read(reader: &mut Reader<'_>, mesh: &mut Mesh) -> Result<()> {
    let header = Mg2Header::read(reader)?;
    tracing::debug!(
        vertex_precision = header.vertex_precision,
        normal_precision = header.normal_precision,
        "parsed grid header"
    );

    read_vertices(reader, &header, mesh)?;
    read_triangle_indices(reader, mesh)?;

    if mesh.has_normals() {
        read_normals(reader, &header, mesh)?;
    }

    read_uv_maps(reader, mesh)?;
    read_attr_maps(reader, mesh)
}

fn read_vertices(reader: &mut Reader<'_>, header: &Mg2Header, mesh: &mut Mesh) -> Result<()> {
    let _ = reader.read_u32()?; // "VERT"
    let quantized = read_packed(reader, mesh.vertices().len(), 3, "vertices")?;

    let _ = reader.read_u32()?; // "GIDX"
    let mut grid_indices = read_packed(reader, mesh.vertex_count(), 1, "grid indices")?;
    restore_grid_indices(&mut grid_indices);

    restore_vertices(
        &quantized,
        &grid_indices,
        &header.grid,
        header.vertex_precision,
        mesh.vertices_mut(),
    )?;
    Ok(())
}

fn read_triangle_indices(reader: &mut Reader<'_>, mesh: &mut Mesh) -> Result<()> {
    let _ = reader.read_u32()?; // "INDX"
    let words = read_packed(reader, mesh.indices().len(), 3, "indices")?;
    mesh.indices_mut().copy_from_slice(&words);
    restore_indices(mesh.indices_mut())?;
    Ok(())
}

fn read_normals(reader: &mut Reader<'_>, header: &Mg2Header, mesh: &mut Mesh) -> Result<()> {
    let _ = reader.read_u32()?; // "NORM"
    let encoded = read_packed(reader, mesh.vertices().len(), 3, "normals")?;

    // The reference frames come from smooth normals over the restored
    // geometry, so indices and vertices must already be in place.
    let smooth = smooth_normals(mesh.indices(), mesh.vertices())?;
    if let Some(normals) = mesh.normals_mut() {
        restore_normals(&encoded, &smooth, header.normal_precision, normals)?;
    }
    Ok(())
}

fn read_uv_maps(reader: &mut Reader<'_>, mesh: &mut Mesh) -> Result<()> {
    for i in 0..mesh.uv_map_count() {
        let _ = reader.read_u32()?; // "TEXC"
        let name = reader.read_string()?;
        let file_name = reader.read_string()?;
        let precision = reader.read_f32()?;
        mesh.set_uv_names(i, name, file_name);

        let codes = read_packed(reader, mesh.vertex_count() * 2, 2, "uv map")?;
        restore_map(&codes, 2, precision, mesh.uv_mut(i))?;
    }
    Ok(())
}

fn read_attr_maps(reader: &mut Reader<'_>, mesh: &mut Mesh) -> Result<()> {
    for i in 0..mesh.attr_map_count() {
        let _ = reader.read_u32()?; // "ATTR"
        let name = reader.read_string()?;
        let precision = reader.read_f32()?;
        mesh.set_attr_name(i, name);

        let codes = read_packed(reader, mesh.vertex_count() * 4, 4, "attribute map")?;
        restore_map(&codes, 4, precision, mesh.attr_mut(i))?;
    }
    Ok(())
}
