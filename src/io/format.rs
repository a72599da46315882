//! Bit-string presentation of vectors and matrices.
//!
//! Vectors print most significant bit first, e.g. the 4-bit vector `0b0101`
//! prints as `"0101"`. Matrices print one row per line.

use crate::error::{Error, Result};
use crate::math::{BitMatrix, Vector, MAX_DIM};

/// Renders the low `bits` bits of `v` as `0`/`1` characters.
pub fn format_vector(v: Vector, bits: usize) -> String {
    (0..bits.min(MAX_DIM))
        .rev()
        .map(|i| if (v >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Parses exactly `bits` characters of `0`/`1` into a vector.
pub fn parse_vector(text: &str, bits: usize) -> Result<Vector> {
    let text = text.trim();
    if bits > MAX_DIM {
        return Err(Error::invalid_input(format!(
            "vector length {} exceeds {} bits",
            bits, MAX_DIM
        )));
    }
    if text.chars().count() != bits {
        return Err(Error::invalid_input(format!(
            "expected {} bits, got {:?}",
            bits, text
        )));
    }
    text.chars().try_fold(0, |acc: Vector, c| match c {
        '0' => Ok(acc << 1),
        '1' => Ok((acc << 1) | 1),
        other => Err(Error::invalid_input(format!(
            "unexpected character {:?}; only 0 and 1 are allowed",
            other
        ))),
    })
}

/// Renders a matrix, one row per line.
pub fn format_matrix(m: &BitMatrix) -> String {
    m.to_string()
}

/// Parses `rows` lines of `cols` bits each into a matrix.
pub fn parse_matrix<S: AsRef<str>>(lines: &[S], rows: usize, cols: usize) -> Result<BitMatrix> {
    if lines.len() != rows {
        return Err(Error::invalid_input(format!(
            "expected {} rows, got {}",
            rows,
            lines.len()
        )));
    }
    let packed = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            parse_vector(line.as_ref(), cols).map_err(|e| match e {
                Error::InvalidInput(msg) => Error::InvalidInput(format!("row {}: {}", i + 1, msg)),
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    BitMatrix::from_rows(cols, &packed)
}

/// Parses a generator free block given as comma separated rows, e.g.
/// `"110,101,011,111"`, for a `(n, k)` code: `k` rows of `n - k` bits.
pub fn parse_free_block(text: &str, n: usize, k: usize) -> Result<BitMatrix> {
    let lines: Vec<&str> = if text.trim().is_empty() {
        Vec::new()
    } else {
        text.split([',', ';', '\n']).map(str::trim).collect()
    };
    parse_matrix(&lines, k, n.saturating_sub(k))
}

/// Marks positions where two `bits`-wide vectors differ with `^`, others
/// with `-`, and counts the differences.
pub fn error_markers(sent: Vector, received: Vector, bits: usize) -> (String, u32) {
    let diff = sent ^ received;
    let markers: String = (0..bits.min(MAX_DIM))
        .rev()
        .map(|i| if (diff >> i) & 1 == 1 { '^' } else { '-' })
        .collect();
    let count = (diff & crate::math::low_mask(bits)).count_ones();
    (markers, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(0b0101, 4), "0101");
        assert_eq!(format_vector(0b1011_010, 7), "1011010");
        assert_eq!(format_vector(0xFF, 3), "111");
        assert_eq!(format_vector(0, 0), "");
        assert_eq!(format_vector(u64::MAX, 64), "1".repeat(64));
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector("1011", 4).unwrap(), 0b1011);
        assert_eq!(parse_vector(" 0001\n", 4).unwrap(), 1);
        assert_eq!(parse_vector(&"1".repeat(64), 64).unwrap(), u64::MAX);
        assert!(matches!(parse_vector("101", 4), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_vector("10a1", 4), Err(Error::InvalidInput(_))));
        assert!(parse_vector("", 65).is_err());
    }

    #[test]
    fn test_vector_text_round_trip() {
        for v in [0u64, 1, 0b1001_0110, 0x1234_5678] {
            assert_eq!(parse_vector(&format_vector(v, 40), 40).unwrap(), v);
        }
    }

    #[test]
    fn test_parse_matrix() {
        let m = parse_matrix(&["110", "011"], 2, 3).unwrap();
        assert_eq!(m.iter_rows().collect::<Vec<_>>(), vec![0b110, 0b011]);
        assert_eq!(format_matrix(&m), "110\n011");

        assert!(parse_matrix(&["110"], 2, 3).is_err());
        let err = parse_matrix(&["110", "0x1"], 2, 3).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_parse_free_block() {
        let a = parse_free_block("110, 101,011,111", 7, 4).unwrap();
        assert_eq!(a.rows(), 4);
        assert_eq!(a.cols(), 3);
        assert_eq!(a.row(3).unwrap(), 0b111);

        assert!(parse_free_block("110,101", 7, 4).is_err());
        assert!(parse_free_block("11,10,01,11", 7, 4).is_err());
    }

    #[test]
    fn test_error_markers() {
        let (markers, count) = error_markers(0b1011_010, 0b1001_011, 7);
        assert_eq!(markers, "--^---^");
        assert_eq!(count, 2);

        let (markers, count) = error_markers(5, 5, 3);
        assert_eq!(markers, "---");
        assert_eq!(count, 0);
    }
}
