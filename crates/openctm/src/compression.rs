//! LZMA payload handling for the compressed tiers.
//!
//! Each compressed section stores a packed byte count, five LZMA
//! properties bytes, and the size-bounded LZMA stream itself. The
//! decompressor writes through the byte-plane interleave cursor and is
//! bounded by the destination's byte length; the stream cursor always
//! ends up exactly past the payload.

use lzma_rs::decompress::{Options, UnpackedSize};

use crate::error::{Error, Result};
use crate::interleaved::InterleavedWriter;
use crate::stream::Reader;

/// Length of the LZMA properties prefix preceding each packed stream.
const LZMA_PROPS_LEN: usize = 5;

/// Read one compressed section into 32-bit words.
///
/// `element_count` is the number of u32 elements the section decodes to;
/// `channels` is the interleave width in elements per vertex or triangle.
pub(crate) fn read_packed(
    reader: &mut Reader<'_>,
    element_count: usize,
    channels: usize,
    context: &'static str,
) -> Result<Vec<u32>> {
    let packed_size = reader.read_i32()?;
    if packed_size < 0 {
        return Err(Error::Compression {
            context,
            message: format!("negative packed size {packed_size}"),
        });
    }
    let mut payload = reader.take(LZMA_PROPS_LEN + packed_size as usize, context)?;

    let byte_len = element_count * 4;
    let mut bytes = vec![0u8; byte_len];
    let mut sink = InterleavedWriter::new(&mut bytes, channels);

    let options = Options {
        unpacked_size: UnpackedSize::UseProvided(Some(byte_len as u64)),
        ..Options::default()
    };
    lzma_rs::lzma_decompress_with_options(&mut payload, &mut sink, &options).map_err(|e| {
        Error::Compression {
            context,
            message: e.to_string(),
        }
    })?;

    Ok(bytes
        .chunks_exact(4)
        .map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}
