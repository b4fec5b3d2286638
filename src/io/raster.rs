//! Raster codecs backed by the `image` crate.
//!
//! Only 8-bit single-channel rasters are accepted. `image` silently expands
//! low bit depths and rescales small PGM maxvals, which would rewrite cell
//! bitmasks, so the stored format is checked from the header first.

use image::codecs::png::PngEncoder;
use image::codecs::pnm::{PnmDecoder, PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, DynamicImage, ImageEncoder, ImageFormat};

use crate::error::PersistError;
use crate::grid::GridBuffer;

use super::codec::RasterCodec;

/// 8-bit grayscale PNG (`occupancy_grid.png`).
#[derive(Clone, Copy, Debug, Default)]
pub struct PngRaster;

/// Binary 8-bit PGM (P5), as used by ROS map_server.
#[derive(Clone, Copy, Debug, Default)]
pub struct PgmRaster;

impl RasterCodec for PngRaster {
    fn name(&self) -> &'static str {
        "png"
    }

    fn decode(&self, bytes: &[u8]) -> Result<GridBuffer, PersistError> {
        let mut header = png::Decoder::new(bytes);
        let info = header
            .read_header_info()
            .map_err(|e| PersistError::RasterDecode(e.to_string()))?;
        if info.color_type != png::ColorType::Grayscale || info.bit_depth != png::BitDepth::Eight {
            return Err(PersistError::RasterDecode(format!(
                "expected 8-bit grayscale PNG, found {:?} at {:?}",
                info.color_type, info.bit_depth
            )));
        }
        decode_luma8(bytes, ImageFormat::Png)
    }

    fn encode(&self, buffer: &GridBuffer) -> Result<Vec<u8>, PersistError> {
        let (width, height) = raster_dimensions(buffer)?;
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(buffer.as_slice(), width, height, ColorType::L8)
            .map_err(|e| PersistError::RasterEncode(e.to_string()))?;
        Ok(out)
    }
}

impl RasterCodec for PgmRaster {
    fn name(&self) -> &'static str {
        "pgm"
    }

    fn decode(&self, bytes: &[u8]) -> Result<GridBuffer, PersistError> {
        let (_, header) = PnmDecoder::new(bytes)
            .map_err(|e| PersistError::RasterDecode(e.to_string()))?
            .into_inner();
        if header.as_graymap().is_none() || header.maximal_sample() != 255 {
            return Err(PersistError::RasterDecode(format!(
                "expected graymap with maxval 255, found {:?} with maxval {}",
                header.subtype(),
                header.maximal_sample()
            )));
        }
        decode_luma8(bytes, ImageFormat::Pnm)
    }

    fn encode(&self, buffer: &GridBuffer) -> Result<Vec<u8>, PersistError> {
        let (width, height) = raster_dimensions(buffer)?;
        let mut out = Vec::new();
        PnmEncoder::new(&mut out)
            .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
            .write_image(buffer.as_slice(), width, height, ColorType::L8)
            .map_err(|e| PersistError::RasterEncode(e.to_string()))?;
        Ok(out)
    }
}

/// Decode and insist on 8-bit single channel; no color conversion.
fn decode_luma8(bytes: &[u8], format: ImageFormat) -> Result<GridBuffer, PersistError> {
    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| PersistError::RasterDecode(e.to_string()))?;

    let gray = match image {
        DynamicImage::ImageLuma8(gray) => gray,
        other => {
            return Err(PersistError::RasterDecode(format!(
                "expected 8-bit single channel, found {:?}",
                other.color()
            )));
        }
    };

    let (width, height) = gray.dimensions();
    log::debug!("Decoded {:?} raster {}x{}", format, width, height);
    Ok(GridBuffer::from_raw(
        width as usize,
        height as usize,
        gray.into_raw(),
    )?)
}

fn raster_dimensions(buffer: &GridBuffer) -> Result<(u32, u32), PersistError> {
    let width = u32::try_from(buffer.width())
        .map_err(|_| PersistError::RasterEncode(format!("width {} too large", buffer.width())))?;
    let height = u32::try_from(buffer.height())
        .map_err(|_| PersistError::RasterEncode(format!("height {} too large", buffer.height())))?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridCoord;

    fn every_value() -> GridBuffer {
        GridBuffer::from_raw(16, 16, (0..=255u8).collect()).unwrap()
    }

    #[test]
    fn test_png_preserves_every_value() {
        let buffer = every_value();
        let bytes = PngRaster.encode(&buffer).unwrap();
        let decoded = PngRaster.decode(&bytes).unwrap();
        assert_eq!(decoded, buffer);
    }

    #[test]
    fn test_pgm_preserves_every_value() {
        let buffer = every_value();
        let bytes = PgmRaster.encode(&buffer).unwrap();
        assert!(bytes.starts_with(b"P5"));
        assert_eq!(PgmRaster.decode(&bytes).unwrap(), buffer);
    }

    #[test]
    fn test_non_square_dimensions() {
        let mut buffer = GridBuffer::new(7, 3).unwrap();
        buffer.set(GridCoord::new(6, 2), 4).unwrap();
        let decoded = PngRaster.decode(&PngRaster.encode(&buffer).unwrap()).unwrap();
        assert_eq!(decoded.width(), 7);
        assert_eq!(decoded.height(), 3);
        assert_eq!(decoded.get(GridCoord::new(6, 2)), Ok(4));
    }

    #[test]
    fn test_corrupt_bytes_rejected() {
        let result = PngRaster.decode(b"definitely not a png");
        assert!(matches!(result, Err(PersistError::RasterDecode(_))));

        let mut truncated = PngRaster.encode(&every_value()).unwrap();
        truncated.truncate(truncated.len() / 2);
        assert!(matches!(
            PngRaster.decode(&truncated),
            Err(PersistError::RasterDecode(_))
        ));
    }

    #[test]
    fn test_rgb_png_rejected() {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(&[10u8; 2 * 2 * 3], 2, 2, ColorType::Rgb8)
            .unwrap();
        let result = PngRaster.decode(&out);
        assert!(matches!(result, Err(PersistError::RasterDecode(_))));
    }

    fn gray_png(width: u32, height: u32, depth: png::BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_plain_8bit_png_accepted() {
        let bytes = gray_png(2, 1, png::BitDepth::Eight, &[1, 4]);
        assert_eq!(PngRaster.decode(&bytes).unwrap().as_slice(), &[1, 4]);
    }

    #[test]
    fn test_low_bit_depth_png_rejected() {
        // Floor then Obstacle at 4 bits per pixel
        let four_bit = gray_png(2, 1, png::BitDepth::Four, &[0x14]);
        assert!(matches!(
            PngRaster.decode(&four_bit),
            Err(PersistError::RasterDecode(_))
        ));

        let one_bit = gray_png(8, 1, png::BitDepth::One, &[0b1010_1010]);
        assert!(matches!(
            PngRaster.decode(&one_bit),
            Err(PersistError::RasterDecode(_))
        ));
    }

    #[test]
    fn test_16bit_png_rejected() {
        let bytes = gray_png(2, 1, png::BitDepth::Sixteen, &[0, 1, 0, 4]);
        assert!(matches!(
            PngRaster.decode(&bytes),
            Err(PersistError::RasterDecode(_))
        ));
    }

    #[test]
    fn test_pgm_small_maxval_rejected() {
        let bytes = b"P5\n2 1\n15\n\x01\x04";
        assert!(matches!(
            PgmRaster.decode(bytes),
            Err(PersistError::RasterDecode(_))
        ));

        let full = b"P5\n2 1\n255\n\x01\x04";
        assert_eq!(PgmRaster.decode(full).unwrap().as_slice(), &[1, 4]);
    }

    #[test]
    fn test_luma_alpha_png_rejected() {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(&[10u8; 2 * 2 * 2], 2, 2, ColorType::La8)
            .unwrap();
        assert!(matches!(
            PngRaster.decode(&out),
            Err(PersistError::RasterDecode(_))
        ));
    }
}
