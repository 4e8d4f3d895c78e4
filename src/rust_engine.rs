//! Production image engine — pure Rust, everything statically linked.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode + container identification | `image::ImageReader::with_guessed_format` |
//! | Orientation tag | `kamadak-exif` (`exif::Reader`) |
//! | Crop | `DynamicImage::crop_imm` |
//! | Resize | `resize` / `resize_exact` / `resize_to_fill`, Lanczos3 |
//! | Rotate / flip | `rotate90/180/270`, `flipv`, `fliph` |
//! | Encode | `JpegEncoder` (quality), `write_to` defaults for gif/png/tiff |
//!
//! The decoders never auto-rotate, so the orientation tag captured at decode
//! time is applied exactly once by the pipeline's lookup table.

use crate::engine::{
    CropRect, Dimensions, EngineError, FlipAxis, ImageEngine, ResizeRequest, Rotation,
};
use crate::format::{EncodeParams, OutputFormat};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

/// Working image: decoded pixels plus the container facts captured at
/// decode time.
pub struct RustImage {
    image: DynamicImage,
    format: ImageFormat,
    orientation: u32,
}

/// Engine built on the `image` crate ecosystem.
pub struct RustEngine {
    /// Maximum distance into the byte stream the EXIF reader will look.
    /// Streams longer than this are truncated before the orientation scan;
    /// a tag beyond the cap reads as 1/normal.
    exif_scan_limit: usize,
}

impl RustEngine {
    /// Engine with the default 1 MiB EXIF scan cap.
    pub fn new() -> Self {
        Self {
            exif_scan_limit: 1 << 20,
        }
    }

    pub fn with_exif_scan_limit(exif_scan_limit: usize) -> Self {
        Self { exif_scan_limit }
    }
}

impl Default for RustEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Gif => "gif",
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::Tiff => "tiff",
        ImageFormat::WebP => "webp",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Avif => "avif",
        _ => "unknown",
    }
}

/// Read the EXIF orientation tag, defaulting to 1/normal when the stream
/// has no readable EXIF block.
fn read_orientation(bytes: &[u8]) -> u32 {
    let reader = exif::Reader::new();
    match reader.read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1),
        Err(_) => 1,
    }
}

fn proportional(reference: u32, other: u32, target: u32) -> u32 {
    ((other as f64 * target as f64 / reference as f64).round() as u32).max(1)
}

impl ImageEngine for RustEngine {
    type Image = RustImage;

    fn decode(&self, bytes: &[u8]) -> Result<RustImage, EngineError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| EngineError::DecodeFailed(e.to_string()))?;
        let format = reader
            .format()
            .ok_or_else(|| EngineError::DecodeFailed("unrecognized container".to_string()))?;
        let image = reader
            .decode()
            .map_err(|e| EngineError::DecodeFailed(e.to_string()))?;
        let scan = &bytes[..bytes.len().min(self.exif_scan_limit)];
        Ok(RustImage {
            image,
            format,
            orientation: read_orientation(scan),
        })
    }

    fn dimensions(&self, image: &RustImage) -> Dimensions {
        Dimensions {
            width: image.image.width(),
            height: image.image.height(),
        }
    }

    fn source_format(&self, image: &RustImage) -> String {
        format_name(image.format).to_string()
    }

    fn orientation(&self, image: &RustImage) -> u32 {
        image.orientation
    }

    fn crop(&self, image: &mut RustImage, rect: CropRect) -> Result<(), EngineError> {
        let Dimensions { width, height } = self.dimensions(image);
        if rect.width == 0 || rect.height == 0 {
            return Err(EngineError::OperationFailed(
                "empty crop rectangle".to_string(),
            ));
        }
        if rect.x as u64 + rect.width as u64 > width as u64
            || rect.y as u64 + rect.height as u64 > height as u64
        {
            return Err(EngineError::OperationFailed(format!(
                "crop rectangle {}x{}+{}+{} outside {}x{} bounds",
                rect.width, rect.height, rect.x, rect.y, width, height
            )));
        }
        image.image = image.image.crop_imm(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn smart_crop(
        &self,
        image: &mut RustImage,
        width: u32,
        height: u32,
    ) -> Result<(), EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::OperationFailed(
                "smart crop target has a zero dimension".to_string(),
            ));
        }
        image.image = image.image.resize_to_fill(width, height, FilterType::Lanczos3);
        Ok(())
    }

    fn resize(&self, image: &mut RustImage, request: ResizeRequest) -> Result<(), EngineError> {
        let Dimensions { width, height } = self.dimensions(image);
        let zero_target = match request {
            ResizeRequest::Width(w) => w == 0,
            ResizeRequest::Height(h) => h == 0,
            ResizeRequest::Contain { width, height } | ResizeRequest::Fill { width, height } => {
                width == 0 || height == 0
            }
        };
        if zero_target {
            return Err(EngineError::OperationFailed(
                "resize target has a zero dimension".to_string(),
            ));
        }
        image.image = match request {
            ResizeRequest::Width(w) => {
                let h = proportional(width, height, w);
                image.image.resize_exact(w, h, FilterType::Lanczos3)
            }
            ResizeRequest::Height(h) => {
                let w = proportional(height, width, h);
                image.image.resize_exact(w, h, FilterType::Lanczos3)
            }
            ResizeRequest::Contain { width, height } => {
                image.image.resize(width, height, FilterType::Lanczos3)
            }
            ResizeRequest::Fill { width, height } => {
                image.image.resize_to_fill(width, height, FilterType::Lanczos3)
            }
        };
        Ok(())
    }

    fn rotate(&self, image: &mut RustImage, rotation: Rotation) -> Result<(), EngineError> {
        image.image = match rotation {
            Rotation::D90 => image.image.rotate90(),
            Rotation::D180 => image.image.rotate180(),
            Rotation::D270 => image.image.rotate270(),
        };
        Ok(())
    }

    fn flip(&self, image: &mut RustImage, axis: FlipAxis) -> Result<(), EngineError> {
        image.image = match axis {
            FlipAxis::Vertical => image.image.flipv(),
            FlipAxis::Horizontal => image.image.fliph(),
        };
        Ok(())
    }

    fn encode(&self, image: &RustImage, params: &EncodeParams) -> Result<Vec<u8>, EngineError> {
        let mut buffer = Cursor::new(Vec::new());
        match params.format {
            OutputFormat::Jpeg => {
                // The jpeg codec takes RGB; flatten whatever the decoder
                // produced. This encoder emits baseline scans, so the
                // interlace request only takes effect on engines whose
                // codec supports progressive output.
                let rgb = image.image.to_rgb8();
                let result = match params.quality {
                    Some(quality) => {
                        let encoder =
                            JpegEncoder::new_with_quality(&mut buffer, quality.min(100) as u8);
                        rgb.write_with_encoder(encoder)
                    }
                    None => rgb.write_with_encoder(JpegEncoder::new(&mut buffer)),
                };
                result.map_err(|e| EngineError::EncodeFailed(e.to_string()))?;
            }
            OutputFormat::Gif => {
                image
                    .image
                    .write_to(&mut buffer, ImageFormat::Gif)
                    .map_err(|e| EngineError::EncodeFailed(e.to_string()))?;
            }
            OutputFormat::Png => {
                image
                    .image
                    .write_to(&mut buffer, ImageFormat::Png)
                    .map_err(|e| EngineError::EncodeFailed(e.to_string()))?;
            }
            OutputFormat::Tiff => {
                image
                    .image
                    .write_to(&mut buffer, ImageFormat::Tiff)
                    .map_err(|e| EngineError::EncodeFailed(e.to_string()))?;
            }
        }
        Ok(buffer.into_inner())
    }
}
