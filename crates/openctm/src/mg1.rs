//! Lossless compressed tier.
//!
//! Every section sits behind the generic compressor with a byte-plane
//! interleave. Indices additionally carry delta coding; vertex, normal,
//! and map floats are stored as absolute bit patterns.

use openctm_decode::restore_indices;

use crate::compression::read_packed;
use crate::error::Result;
use crate::mesh::Mesh;
use crate::stream::Reader;

pub(crate) fn read(reader: &mut Reader<'_>, mesh: &mut Mesh) -> Result<()> {
    let _ = reader.read_u32()?; // "INDX"
    let words = read_packed(reader, mesh.indices().len(), 3, "indices")?;
    mesh.indices_mut().copy_from_slice(&words);
    restore_indices(mesh.indices_mut())?;

    let _ = reader.read_u32()?; // "VERT"
    let words = read_packed(reader, mesh.vertices().len(), 1, "vertices")?;
    copy_float_bits(&words, mesh.vertices_mut());

    if mesh.has_normals() {
        let _ = reader.read_u32()?; // "NORM"
        let words = read_packed(reader, mesh.vertices().len(), 3, "normals")?;
        if let Some(normals) = mesh.normals_mut() {
            copy_float_bits(&words, normals);
        }
    }

    for i in 0..mesh.uv_map_count() {
        let _ = reader.read_u32()?; // "TEXC"
        let name = reader.read_string()?;
        let file_name = reader.read_string()?;
        mesh.set_uv_names(i, name, file_name);

        let words = read_packed(reader, mesh.vertex_count() * 2, 2, "uv map")?;
        copy_float_bits(&words, mesh.uv_mut(i));
    }

    for i in 0..mesh.attr_map_count() {
        let _ = reader.read_u32()?; // "ATTR"
        let name = reader.read_string()?;
        mesh.set_attr_name(i, name);

        let words = read_packed(reader, mesh.vertex_count() * 4, 4, "attribute map")?;
        copy_float_bits(&words, mesh.attr_mut(i));
    }

    Ok(())
}

/// Reinterpret decompressed words as the floats they encode.
fn copy_float_bits(words: &[u32], out: &mut [f32]) {
    for (slot, &word) in out.iter_mut().zip(words) {
        *slot = f32::from_bits(word);
    }
}
