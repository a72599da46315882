//! Conversion between byte streams and fixed-width message vectors.
//!
//! Bytes are read most significant bit first and cut into `width`-bit
//! vectors. When the stream does not divide evenly, the last vector is padded
//! with zeros on the right and the number of padding bits is recorded so that
//! unpacking can drop them again.

use crate::error::{Error, Result};
use crate::math::{Vector, MAX_DIM};
use bitvec::prelude::*;

/// Vectors cut from a byte stream, plus the padding of the last vector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedVectors {
    /// Message vectors, each `width` bits wide
    pub vectors: Vec<Vector>,
    /// Bits per vector
    pub width: usize,
    /// Zero bits appended to the last vector
    pub padding: usize,
}

impl PackedVectors {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Replaces the vectors, keeping width and padding.
    pub fn with_vectors(&self, vectors: Vec<Vector>) -> Self {
        Self {
            vectors,
            width: self.width,
            padding: self.padding,
        }
    }

    /// Reassembles the original bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        unpack_bytes(&self.vectors, self.width, self.padding)
    }
}

fn check_width(width: usize) -> Result<()> {
    if width == 0 || width > MAX_DIM {
        return Err(Error::invalid_input(format!(
            "vector width {} must be in [1, {}]",
            width, MAX_DIM
        )));
    }
    Ok(())
}

/// Splits `data` into `width`-bit vectors.
pub fn pack_bytes(data: &[u8], width: usize) -> Result<PackedVectors> {
    check_width(width)?;

    let bits = data.view_bits::<Msb0>();
    let mut padding = 0;
    let vectors = bits
        .chunks(width)
        .map(|chunk| {
            let value = chunk
                .iter()
                .by_vals()
                .fold(0, |acc: Vector, bit| (acc << 1) | Vector::from(bit));
            if chunk.len() < width {
                padding = width - chunk.len();
            }
            value << (width - chunk.len())
        })
        .collect();

    Ok(PackedVectors {
        vectors,
        width,
        padding,
    })
}

/// Splits the UTF-8 bytes of `text` into `width`-bit vectors.
pub fn pack_str(text: &str, width: usize) -> Result<PackedVectors> {
    pack_bytes(text.as_bytes(), width)
}

/// Joins `width`-bit vectors back into bytes, dropping `padding` bits from the
/// end of the last vector. A trailing partial byte is discarded.
pub fn unpack_bytes(vectors: &[Vector], width: usize, padding: usize) -> Vec<u8> {
    let width = width.min(MAX_DIM);
    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(vectors.len() * width);
    for (i, &v) in vectors.iter().enumerate() {
        let used = if i + 1 == vectors.len() {
            width.saturating_sub(padding)
        } else {
            width
        };
        let word = v.view_bits::<Msb0>();
        let start = MAX_DIM - width;
        bits.extend_from_bitslice(&word[start..start + used]);
    }

    bits.truncate(bits.len() / 8 * 8);
    bits.as_raw_slice().to_vec()
}

/// Joins vectors back into text; invalid UTF-8 is replaced.
pub fn unpack_string(vectors: &[Vector], width: usize, padding: usize) -> String {
    String::from_utf8_lossy(&unpack_bytes(vectors, width, padding)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_even_split() {
        let packed = pack_bytes(&[0b1011_0010, 0b0111_1110], 4).unwrap();
        assert_eq!(packed.vectors, vec![0b1011, 0b0010, 0b0111, 0b1110]);
        assert_eq!(packed.padding, 0);
        assert_eq!(packed.width, 4);
    }

    #[test]
    fn test_pack_with_padding() {
        let packed = pack_bytes(&[0b1011_0010], 3).unwrap();
        assert_eq!(packed.vectors, vec![0b101, 0b100, 0b100]);
        assert_eq!(packed.padding, 1);
        assert_eq!(packed.to_bytes(), vec![0b1011_0010]);
    }

    #[test]
    fn test_round_trip_all_widths() {
        let data: Vec<u8> = (0..=255u8).rev().chain(0..37).collect();
        for width in 1..=64 {
            let packed = pack_bytes(&data, width).unwrap();
            assert_eq!(packed.len(), (data.len() * 8).div_ceil(width));
            assert!(packed.padding < width);
            assert_eq!(packed.to_bytes(), data, "width {}", width);
        }
    }

    #[test]
    fn test_full_word_vectors() {
        let data = [0xFFu8; 8];
        let packed = pack_bytes(&data, 64).unwrap();
        assert_eq!(packed.vectors, vec![u64::MAX]);
        assert_eq!(packed.to_bytes(), data.to_vec());
    }

    #[test]
    fn test_text_round_trip() {
        let text = "Sveiki, pasauli! \u{0105}\u{010d}";
        let packed = pack_str(text, 7).unwrap();
        assert_eq!(
            unpack_string(&packed.vectors, packed.width, packed.padding),
            text
        );
    }

    #[test]
    fn test_empty_input() {
        let packed = pack_bytes(&[], 5).unwrap();
        assert!(packed.is_empty());
        assert_eq!(packed.padding, 0);
        assert!(packed.to_bytes().is_empty());
    }

    #[test]
    fn test_invalid_width() {
        assert!(matches!(pack_bytes(&[1], 0), Err(Error::InvalidInput(_))));
        assert!(matches!(pack_bytes(&[1], 65), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_with_vectors_keeps_layout() {
        let packed = pack_bytes(&[0xAB, 0xCD], 5).unwrap();
        let flipped: Vec<Vector> = packed.vectors.iter().map(|v| v ^ 0b11111).collect();
        let other = packed.with_vectors(flipped);
        assert_eq!(other.padding, packed.padding);
        assert_eq!(other.to_bytes(), vec![!0xABu8, !0xCDu8]);
    }
}
