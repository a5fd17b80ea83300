//! Decoder for the OpenCTM compressed 3D mesh interchange format.
//!
//! OpenCTM packs a triangle mesh - indices, vertex positions, optional
//! normals, and any number of named per-vertex UV and attribute channels -
//! into a single binary container with three compression tiers:
//!
//! - **RAW**: plain little-endian scalar arrays
//! - **MG1**: lossless; delta-coded integers behind LZMA
//! - **MG2**: lossy; grid-quantized positions, spherical-coded normals,
//!   and fixed-point map deltas behind LZMA
//!
//! [`decode`] turns a byte buffer into a [`Mesh`] in one synchronous
//! pass. Decoding is pure computation over memory already resident: no
//! I/O, no suspension points, no shared state. Concurrent decodes of
//! independent buffers need no coordination.
//!
//! # Example
//!
//! ```ignore
//! let bytes = std::fs::read("model.ctm")?;
//! let mesh = openctm::decode(&bytes)?;
//!
//! println!(
//!     "{} triangles over {} vertices",
//!     mesh.triangle_count(),
//!     mesh.vertex_count()
//! );
//! for uv in mesh.uv_maps() {
//!     println!("uv channel {:?}", uv.name);
//! }
//! ```

mod compression;
mod error;
mod header;
mod interleaved;
mod mesh;
mod mg1;
mod mg2;
mod raw;
mod stream;

pub use error::{Error, Result};
pub use header::{CompressionMethod, FORMAT_VERSION, FileHeader};
pub use mesh::{AttrMap, Mesh, UvMap};
pub use stream::Reader;

// Re-export the restoration error type for matching on [`Error::Decode`].
pub use openctm_decode::DecodeError;

/// Decode an OpenCTM file from a byte buffer.
///
/// # Errors
///
/// - [`Error::OutOfData`] if the buffer ends before the layout implied by
///   the header
/// - [`Error::UnsupportedFormat`] for an unknown format version or
///   compression method tag
/// - [`Error::MalformedGeometry`] if header fields describe impossible
///   geometry
/// - [`Error::Compression`] if an embedded LZMA payload is corrupt
/// - [`Error::Decode`] if a restoration pass rejects its input
pub fn decode(data: &[u8]) -> Result<Mesh> {
    let mut reader = Reader::new(data);
    let header = FileHeader::read(&mut reader)?;
    tracing::debug!(
        method = ?header.compression_method,
        vertices = header.vertex_count,
        triangles = header.triangle_count,
        uv_maps = header.uv_map_count,
        attr_maps = header.attr_map_count,
        normals = header.has_normals(),
        "parsed file header"
    );

    let mut mesh = Mesh::allocate(&header);
    match header.compression_method {
        CompressionMethod::Raw => raw::read(&mut reader, &mut mesh)?,
        CompressionMethod::Mg1 => mg1::read(&mut reader, &mut mesh)?,
        CompressionMethod::Mg2 => mg2::read(&mut reader, &mut mesh)?,
    }

    Ok(mesh)
}
