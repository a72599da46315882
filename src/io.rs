//! Adapters between the code core and the outside world: byte streams,
//! images and human-readable bit strings.

pub mod format;
pub mod raster;
pub mod vectors;

pub use format::{
    error_markers, format_matrix, format_vector, parse_free_block, parse_matrix, parse_vector,
};
pub use raster::RawImage;
pub use vectors::{pack_bytes, pack_str, unpack_bytes, unpack_string, PackedVectors};
