//! File header parsing.

use crate::error::{Error, Result};
use crate::stream::Reader;

/// Supported container format version.
pub const FORMAT_VERSION: i32 = 5;

/// Flag bit: the file carries a normal section.
const FLAG_NORMALS: u32 = 0x0000_0001;

/// Compression method selected by the header tag.
///
/// The tag values are the ASCII section markers `"RAW\0"`, `"MG1\0"`,
/// and `"MG2\0"` read as little-endian integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Sections stored as plain scalar arrays.
    Raw,
    /// Lossless: delta-coded sections behind the generic compressor.
    Mg1,
    /// Lossy: grid-quantized vertices and spherical-coded normals behind
    /// the generic compressor.
    Mg2,
}

impl CompressionMethod {
    const RAW_TAG: u32 = 0x0057_4152;
    const MG1_TAG: u32 = 0x0031_474d;
    const MG2_TAG: u32 = 0x0032_474d;

    fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            Self::RAW_TAG => Some(Self::Raw),
            Self::MG1_TAG => Some(Self::Mg1),
            Self::MG2_TAG => Some(Self::Mg2),
            _ => None,
        }
    }
}

/// Parsed file metadata. Immutable once read.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHeader {
    pub format_version: i32,
    pub compression_method: CompressionMethod,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub uv_map_count: usize,
    pub attr_map_count: usize,
    pub flags: u32,
    pub comment: String,
}

impl FileHeader {
    /// Parse the fixed-order header fields.
    ///
    /// The file magic is consumed without validation, matching the
    /// reference decoder; the format version and compression method tag
    /// are checked, and counts that imply impossible geometry are
    /// rejected before anything is allocated.
    pub fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let _magic = reader.read_u32()?; // "OCTM"

        let format_version = reader.read_i32()?;
        if format_version != FORMAT_VERSION {
            return Err(Error::UnsupportedFormat {
                context: "format version",
                value: format_version as u32,
            });
        }

        let method_tag = reader.read_u32()?;
        let compression_method =
            CompressionMethod::from_tag(method_tag).ok_or(Error::UnsupportedFormat {
                context: "compression method",
                value: method_tag,
            })?;

        let vertex_count = read_count(reader, "vertex count", 1)?;
        let triangle_count = read_count(reader, "triangle count", 1)?;
        let uv_map_count = read_count(reader, "uv map count", 0)?;
        let attr_map_count = read_count(reader, "attribute map count", 0)?;
        let flags = reader.read_u32()?;
        let comment = reader.read_string()?;

        Ok(Self {
            format_version,
            compression_method,
            vertex_count,
            triangle_count,
            uv_map_count,
            attr_map_count,
            flags,
            comment,
        })
    }

    /// Whether the file carries a normal section.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        self.flags & FLAG_NORMALS != 0
    }
}

fn read_count(reader: &mut Reader<'_>, context: &'static str, min: i32) -> Result<usize> {
    let value = reader.read_i32()?;
    if value < min {
        return Err(Error::MalformedGeometry {
            context,
            detail: format!("{value} is below the minimum of {min}"),
        });
    }
    // Non-negative after the check above.
    Ok(value as usize)
}
