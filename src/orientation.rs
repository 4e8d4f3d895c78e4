//! EXIF orientation normalization.
//!
//! Cameras record the sensor's physical rotation/mirroring as an orientation
//! tag (1-8) instead of rotating the pixels. [`orientation_transform`] maps a
//! tag to the equivalent rotate/flip transform so the pipeline can bake the
//! correction into the pixel data, after which the tag in the output bytes
//! must be reset to 1 (see the metadata rewriter).
//!
//! Tag semantics: <http://sylvana.net/jpegcrop/exif_orientation.html>

use crate::options::Options;

/// Rotate/flip transform equivalent to an orientation tag.
///
/// `rotate` is in degrees and may be negative (tags 7 and 8 map to −90,
/// which normalizes to 270).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationTransform {
    pub rotate: f64,
    pub flip_vertical: bool,
    pub flip_horizontal: bool,
}

impl OrientationTransform {
    /// True for tag 1 (and unknown tags): nothing to correct.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Express the correction as transform options so it runs through the
    /// same fixed-order pipeline as a user request.
    pub fn to_options(self) -> Options {
        Options {
            rotate: self.rotate,
            flip_vertical: self.flip_vertical,
            flip_horizontal: self.flip_horizontal,
            ..Options::default()
        }
    }
}

/// Map an EXIF orientation tag (1-8) to its correcting transform.
///
/// Unknown values behave like tag 1: identity.
pub fn orientation_transform(tag: u32) -> OrientationTransform {
    match tag {
        // 2: mirrored along the vertical axis
        2 => OrientationTransform {
            rotate: 180.0,
            flip_vertical: true,
            flip_horizontal: false,
        },
        // 3: upside down
        3 => OrientationTransform {
            rotate: 180.0,
            flip_vertical: false,
            flip_horizontal: false,
        },
        // 4: mirrored along the horizontal axis
        4 => OrientationTransform {
            rotate: 180.0,
            flip_vertical: true,
            flip_horizontal: false,
        },
        // 5: mirrored and rotated, left side on top
        5 => OrientationTransform {
            rotate: 90.0,
            flip_vertical: true,
            flip_horizontal: true,
        },
        // 6: right side on top
        6 => OrientationTransform {
            rotate: 90.0,
            flip_vertical: false,
            flip_horizontal: false,
        },
        // 7: mirrored and rotated, right side on bottom
        7 => OrientationTransform {
            rotate: -90.0,
            flip_vertical: true,
            flip_horizontal: true,
        },
        // 8: left side on bottom
        8 => OrientationTransform {
            rotate: -90.0,
            flip_vertical: false,
            flip_horizontal: false,
        },
        // 1 and anything out of range: already upright
        _ => OrientationTransform::default(),
    }
}
