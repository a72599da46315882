//! Raw 8-bit pixel buffers for sending images through a channel.
//!
//! Images are flattened to their interleaved 8-bit samples so the pixel bytes
//! can be packed into message vectors like any other byte stream. Deeper
//! sample formats are reduced to 8 bits per channel on load, because the
//! results are written back as BMP.

use crate::error::{Error, Result};
use image::{ColorType, DynamicImage, ImageFormat};
use std::path::Path;

/// Interleaved 8-bit pixel samples with the geometry needed to save them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    /// One of `L8`, `La8`, `Rgb8` or `Rgba8`
    pub color: ColorType,
    pub pixels: Vec<u8>,
}

impl RawImage {
    /// Decodes the image at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_dynamic(image::open(path)?))
    }

    /// Flattens a decoded image, keeping its channel layout.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (color, pixels) = match img.color() {
            ColorType::L8 | ColorType::L16 => (ColorType::L8, img.into_luma8().into_raw()),
            ColorType::La8 | ColorType::La16 => {
                (ColorType::La8, img.into_luma_alpha8().into_raw())
            }
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => {
                (ColorType::Rgb8, img.into_rgb8().into_raw())
            }
            _ => (ColorType::Rgba8, img.into_rgba8().into_raw()),
        };
        Self {
            width,
            height,
            color,
            pixels,
        }
    }

    /// Number of samples for the image's geometry.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * usize::from(self.color.bytes_per_pixel())
    }

    /// Same geometry with different pixel samples.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when `pixels` does not fit the geometry.
    pub fn with_pixels(&self, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != self.expected_len() {
            return Err(Error::invalid_input(format!(
                "{} pixel bytes do not fit a {}x{} {:?} image",
                pixels.len(),
                self.width,
                self.height,
                self.color
            )));
        }
        Ok(Self {
            width: self.width,
            height: self.height,
            color: self.color,
            pixels,
        })
    }

    /// Writes the image as BMP.
    pub fn save_bmp<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            self.color,
            ImageFormat::Bmp,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::LinearCode;
    use crate::io::pack_bytes;
    use crate::math::BitMatrix;
    use image::{ImageBuffer, Luma, Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x * 40) as u8, (y * 60) as u8, ((x + y) * 20) as u8])
        })
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lincode-{}-{}.bmp", std::process::id(), name))
    }

    #[test]
    fn test_from_rgb_image() {
        let raw = RawImage::from_dynamic(DynamicImage::ImageRgb8(gradient(5, 3)));
        assert_eq!((raw.width, raw.height), (5, 3));
        assert_eq!(raw.color, ColorType::Rgb8);
        assert_eq!(raw.pixels.len(), 5 * 3 * 3);
        assert_eq!(raw.expected_len(), raw.pixels.len());
        assert_eq!(&raw.pixels[3..6], &[40, 0, 20]);
    }

    #[test]
    fn test_deep_samples_reduced_to_bytes() {
        let deep = ImageBuffer::from_pixel(2, 2, Luma([0xFFFFu16]));
        let raw = RawImage::from_dynamic(DynamicImage::ImageLuma16(deep));
        assert_eq!(raw.color, ColorType::L8);
        assert_eq!(raw.pixels, vec![0xFF; 4]);
    }

    #[test]
    fn test_with_pixels_checks_length() {
        let raw = RawImage::from_dynamic(DynamicImage::ImageRgb8(gradient(2, 2)));
        let inverted: Vec<u8> = raw.pixels.iter().map(|b| !b).collect();
        let other = raw.with_pixels(inverted.clone()).unwrap();
        assert_eq!(other.pixels, inverted);
        assert_eq!(other.color, raw.color);

        assert!(matches!(
            raw.with_pixels(vec![0; 11]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bmp_keeps_geometry_and_pixels() {
        let raw = RawImage::from_dynamic(DynamicImage::ImageRgb8(gradient(6, 4)));
        let path = temp_path("geometry");
        raw.save_bmp(&path).unwrap();
        let loaded = RawImage::open(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, raw);
    }

    #[test]
    fn test_noiseless_transfer_restores_pixels() {
        let free = BitMatrix::from_rows(3, &[0b110, 0b101, 0b011, 0b111]).unwrap();
        let code = LinearCode::from_free_block(&free).unwrap();
        let raw = RawImage::from_dynamic(DynamicImage::ImageRgb8(gradient(7, 5)));

        let packed = pack_bytes(&raw.pixels, code.k()).unwrap();
        let decoded = code.decode_all(&code.encode_all(&packed.vectors));
        let restored = raw.with_pixels(packed.with_vectors(decoded).to_bytes()).unwrap();
        assert_eq!(restored, raw);
    }

    #[test]
    fn test_open_missing_file() {
        assert!(matches!(
            RawImage::open(temp_path("missing")),
            Err(Error::Image(_))
        ));
    }
}
