//! Image engine trait and the operation value types it consumes.
//!
//! The [`ImageEngine`] trait is the boundary between the planning layer
//! (which decides *what* geometric operations to request and in what order)
//! and the pixel work. The production implementation is
//! [`RustEngine`](crate::rust_engine::RustEngine); tests use the recording
//! mock from [`tests`].
//!
//! Every operation mutates the engine's working image in place and must
//! leave its reported dimensions up to date, since later pipeline steps plan
//! against the current size.

use crate::format::EncodeParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    #[error("operation failed: {0}")]
    OperationFailed(String),
    #[error("encode failed: {0}")]
    EncodeFailed(String),
}

/// Current pixel size of a working image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Crop rectangle in pixels, origin at the top-left of the current image.
///
/// Planners guarantee the rectangle lies inside the current bounds; a
/// zero-area rectangle is invalid and rejected by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Planned resize operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeRequest {
    /// Aspect-preserving scale so the result fits within the box. Never
    /// forces exact dimensions.
    Contain { width: u32, height: u32 },
    /// Proportional scale driven by the target width.
    Width(u32),
    /// Proportional scale driven by the target height.
    Height(u32),
    /// Scale to cover the box, then center-crop to exactly these dimensions.
    Fill { width: u32, height: u32 },
}

/// Quarter-turn rotation, clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    D90,
    D180,
    D270,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Top-to-bottom mirror.
    Vertical,
    /// Left-to-right mirror.
    Horizontal,
}

/// Pixel-work capability used by the transform pipeline.
///
/// `Image` is the engine's working value: created by [`decode`](Self::decode),
/// mutated in place by the geometric operations, consumed by
/// [`encode`](Self::encode). It is owned exclusively by one transform call
/// and never shared.
///
/// Implementations must not apply any automatic orientation correction of
/// their own; the pipeline applies the orientation table exactly once, based
/// on the tag reported by [`orientation`](Self::orientation).
pub trait ImageEngine: Sync {
    type Image;

    /// Decode encoded bytes, identifying the container format.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, EngineError>;

    /// Current pixel dimensions.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Lowercase container name identified at decode time ("jpeg", "png", ...).
    fn source_format(&self, image: &Self::Image) -> String;

    /// Embedded EXIF orientation tag (1-8), or 1 when absent.
    fn orientation(&self, image: &Self::Image) -> u32;

    /// Crop to the given rectangle.
    fn crop(&self, image: &mut Self::Image, rect: CropRect) -> Result<(), EngineError>;

    /// Content-aware centered crop to the given size.
    fn smart_crop(&self, image: &mut Self::Image, width: u32, height: u32)
    -> Result<(), EngineError>;

    /// Resize per the planned request.
    fn resize(&self, image: &mut Self::Image, request: ResizeRequest) -> Result<(), EngineError>;

    /// Rotate clockwise by a quarter-turn multiple.
    fn rotate(&self, image: &mut Self::Image, rotation: Rotation) -> Result<(), EngineError>;

    /// Mirror along the given axis.
    fn flip(&self, image: &mut Self::Image, axis: FlipAxis) -> Result<(), EngineError>;

    /// Encode the current image per the given parameters.
    fn encode(&self, image: &Self::Image, params: &EncodeParams) -> Result<Vec<u8>, EngineError>;
}
