//! Uncompressed tier.

use crate::error::Result;
use crate::mesh::Mesh;
use crate::stream::Reader;

/// Read every body section as plain scalar arrays.
///
/// Section magic tags are consumed but deliberately not validated,
/// matching the reference decoder.
pub(crate) fn read(reader: &mut Reader<'_>, mesh: &mut Mesh) -> Result<()> {
    let _ = reader.read_u32()?; // "INDX"
    reader.read_u32_into(mesh.indices_mut())?;

    let _ = reader.read_u32()?; // "VERT"
    reader.read_f32_into(mesh.vertices_mut())?;

    if mesh.has_normals() {
        let _ = reader.read_u32()?; // "NORM"
        if let Some(normals) = mesh.normals_mut() {
            reader.read_f32_into(normals)?;
        }
    }

    for i in 0..mesh.uv_map_count() {
        let _ = reader.read_u32()?; // "TEXC"
        let name = reader.read_string()?;
        let file_name = reader.read_string()?;
        mesh.set_uv_names(i, name, file_name);
        reader.read_f32_into(mesh.uv_mut(i))?;
    }

    for i in 0..mesh.attr_map_count() {
        let _ = reader.read_u32()?; // "ATTR"
        let name = reader.read_string()?;
        mesh.set_attr_name(i, name);
        reader.read_f32_into(mesh.attr_mut(i))?;
    }

    Ok(())
}
