//! Transform options: the flat, declarative record describing what to do to
//! an image.
//!
//! All numeric geometry fields are *dual-mode*: a value strictly between 0
//! and 1 is a fraction of the relevant image dimension, anything else is an
//! absolute pixel count (see [`evaluate_dimension`](crate::calculations::evaluate_dimension)).
//! Zero means "unspecified" throughout, so `Options::default()` is the
//! identity request.

use serde::{Deserialize, Serialize};

/// Declarative transform request.
///
/// Immutable for the duration of one transform call. Deserializes from a
/// flat record with every field optional; omitted fields keep their identity
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Target width. 0 = unconstrained; dual-mode.
    pub width: f64,
    /// Target height. 0 = unconstrained; dual-mode.
    pub height: f64,
    /// Permit enlarging beyond the source size. Off by default: requested
    /// dimensions larger than the source are clamped down.
    pub scale_up: bool,
    /// Letterbox/contain resize instead of fill/crop.
    pub fit: bool,
    /// Crop origin. Dual-mode; negative values measure from the opposite
    /// edge (right for x, bottom for y).
    pub crop_x: f64,
    /// See `crop_x`.
    pub crop_y: f64,
    /// Crop extent. Dual-mode; 0 = remaining dimension to the image edge.
    pub crop_width: f64,
    /// See `crop_width`.
    pub crop_height: f64,
    /// Content-aware centered crop to the target width/height instead of
    /// explicit coordinates. When set, the explicit crop fields are ignored.
    pub smart_crop: bool,
    /// Rotation in degrees, normalized modulo 360 before dispatch. Only 90,
    /// 180 and 270 perform a rotation; every other normalized value is a
    /// no-op.
    pub rotate: f64,
    /// Flip top-to-bottom (after rotation).
    pub flip_vertical: bool,
    /// Flip left-to-right (after rotation and vertical flip).
    pub flip_horizontal: bool,
    /// Output container override ("gif", "jpeg", "png", "tiff"). Empty =
    /// derive from the source format.
    pub format: String,
    /// JPEG encode quality, 1-100. 0 = the configured default (95).
    pub quality: u32,
}

impl Options {
    /// Reports whether any field requests a non-identity operation.
    ///
    /// Used as the fast no-op gate: when false, the input bytes pass through
    /// untouched and no decode is attempted. `scale_up` and `fit` are
    /// modifiers of a resize, not operations, so they do not count on their
    /// own.
    pub fn requests_transform(&self) -> bool {
        self.width != 0.0
            || self.height != 0.0
            || self.crop_x != 0.0
            || self.crop_y != 0.0
            || self.crop_width != 0.0
            || self.crop_height != 0.0
            || self.smart_crop
            || self.rotate != 0.0
            || self.flip_vertical
            || self.flip_horizontal
            || !self.format.is_empty()
            || self.quality != 0
    }
}
