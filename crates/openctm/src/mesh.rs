//! Decoded mesh storage.

use std::ops::Range;

use crate::header::FileHeader;

/// A fully decoded mesh.
///
/// All sections live in one contiguous 32-bit allocation; the typed views
/// are disjoint slices over it that exactly tile the buffer. Float
/// sections are bit-reinterpreted in place, never copied.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    data: Vec<u32>,
    indices: Range<usize>,
    vertices: Range<usize>,
    normals: Option<Range<usize>>,
    uv_maps: Vec<MapChannel>,
    attr_maps: Vec<MapChannel>,
}

#[derive(Debug, Clone, PartialEq)]
struct MapChannel {
    name: String,
    file_name: String,
    range: Range<usize>,
}

/// Borrowed view of one UV channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvMap<'a> {
    /// Display name of the channel.
    pub name: &'a str,
    /// Source file the map came from; empty when the encoder recorded
    /// none.
    pub file_name: &'a str,
    /// Two floats per vertex.
    pub uv: &'a [f32],
}

/// Borrowed view of one custom attribute channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttrMap<'a> {
    /// Display name of the channel.
    pub name: &'a str,
    /// Four floats per vertex.
    pub attr: &'a [f32],
}

impl Mesh {
    /// Allocate a zeroed mesh sized from the header counts.
    ///
    /// Section order within the allocation is fixed: indices, vertices,
    /// normals, UV maps in declared order, attribute maps in declared
    /// order. The tier readers rely on these offsets.
    pub(crate) fn allocate(header: &FileHeader) -> Self {
        let index_len = header.triangle_count * 3;
        let vertex_len = header.vertex_count * 3;
        let uv_len = header.vertex_count * 2;
        let attr_len = header.vertex_count * 4;

        let mut next = 0usize;
        let mut section = |len: usize| -> Range<usize> {
            let start = next;
            next += len;
            start..next
        };

        let indices = section(index_len);
        let vertices = section(vertex_len);
        let normals = header.has_normals().then(|| section(vertex_len));
        let uv_maps = (0..header.uv_map_count)
            .map(|_| MapChannel {
                name: String::new(),
                file_name: String::new(),
                range: section(uv_len),
            })
            .collect();
        let attr_maps = (0..header.attr_map_count)
            .map(|_| MapChannel {
                name: String::new(),
                file_name: String::new(),
                range: section(attr_len),
            })
            .collect();

        Self {
            data: vec![0; next],
            indices,
            vertices,
            normals,
            uv_maps,
            attr_maps,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether a normal section is present.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Triangle indices, three per triangle.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.data[self.indices.clone()]
    }

    /// Vertex positions, three floats per vertex.
    #[must_use]
    pub fn vertices(&self) -> &[f32] {
        bytemuck::cast_slice(&self.data[self.vertices.clone()])
    }

    /// Per-vertex normals, three floats per vertex, if present.
    #[must_use]
    pub fn normals(&self) -> Option<&[f32]> {
        self.normals
            .clone()
            .map(|range| bytemuck::cast_slice(&self.data[range]))
    }

    /// Number of UV channels.
    #[must_use]
    pub fn uv_map_count(&self) -> usize {
        self.uv_maps.len()
    }

    /// Number of attribute channels.
    #[must_use]
    pub fn attr_map_count(&self) -> usize {
        self.attr_maps.len()
    }

    /// Iterate over the UV channels in declared order.
    pub fn uv_maps(&self) -> impl Iterator<Item = UvMap<'_>> {
        self.uv_maps.iter().map(|map| UvMap {
            name: &map.name,
            file_name: &map.file_name,
            uv: bytemuck::cast_slice(&self.data[map.range.clone()]),
        })
    }

    /// Iterate over the attribute channels in declared order.
    pub fn attr_maps(&self) -> impl Iterator<Item = AttrMap<'_>> {
        self.attr_maps.iter().map(|map| AttrMap {
            name: &map.name,
            attr: bytemuck::cast_slice(&self.data[map.range.clone()]),
        })
    }

    pub(crate) fn indices_mut(&mut self) -> &mut [u32] {
        let range = self.indices.clone();
        &mut self.data[range]
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [f32] {
        let range = self.vertices.clone();
        bytemuck::cast_slice_mut(&mut self.data[range])
    }

    pub(crate) fn normals_mut(&mut self) -> Option<&mut [f32]> {
        let range = self.normals.clone()?;
        Some(bytemuck::cast_slice_mut(&mut self.data[range]))
    }

    pub(crate) fn uv_mut(&mut self, index: usize) -> &mut [f32] {
        let range = self.uv_maps[index].range.clone();
        bytemuck::cast_slice_mut(&mut self.data[range])
    }

    pub(crate) fn attr_mut(&mut self, index: usize) -> &mut [f32] {
        let range = self.attr_maps[index].range.clone();
        bytemuck::cast_slice_mut(&mut self.data[range])
    }

    pub(crate) fn set_uv_names(&mut self, index: usize, name: String, file_name: String) {
        self.uv_maps[index].name = name;
        self.uv_maps[index].file_name = file_name;
    }

    pub(crate) fn set_attr_name(&mut self, index: usize, name: String) {
        self.attr_maps[index].name = name;
    }
}
