//! Output format resolution and encode parameter policy.
//!
//! The output container is derived from the source format (tiff and webp
//! sources re-encode as jpeg by default), overridden by an explicit request,
//! and validated against the fixed allow-list. The validation runs even when
//! the only requested change is a reformat.

use crate::error::TransformError;

/// Output container formats this core will encode to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Gif,
    Jpeg,
    Png,
    Tiff,
}

impl OutputFormat {
    /// Parse a lowercase format name. Anything off the allow-list is `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "gif" => Some(Self::Gif),
            "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Tiff => "tiff",
        }
    }
}

/// Source formats that embed an orientation tag the pipeline must correct.
pub fn carries_orientation(source_format: &str) -> bool {
    matches!(source_format, "jpeg" | "tiff")
}

/// Resolve the output container for a source format and an optional
/// explicit override (empty = none).
///
/// Fails with [`TransformError::UnsupportedFormat`] when the resolved name is
/// not on the allow-list, whether it came from the override or from an
/// unconvertible source format.
pub fn resolve_output_format(
    source_format: &str,
    requested: &str,
) -> Result<OutputFormat, TransformError> {
    // tiff and webp sources re-encode as jpeg unless overridden
    let derived = match source_format {
        "tiff" | "webp" => "jpeg",
        other => other,
    };
    let name = if requested.is_empty() { derived } else { requested };
    OutputFormat::parse(name).ok_or_else(|| TransformError::UnsupportedFormat(name.to_string()))
}

/// Parameters for one encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    pub format: OutputFormat,
    /// Lossy quality, 1-100. `None` = the engine's own default settings.
    pub quality: Option<u32>,
    /// Request progressive/interlaced encoding where the codec supports it.
    pub interlace: bool,
}

/// Encode policy per format: jpeg carries a quality (the configured default
/// when the request left it at 0, clamped to 1-100) and requests interlaced
/// output; gif, png and tiff use the engine's default settings.
pub fn encode_params(
    format: OutputFormat,
    requested_quality: u32,
    default_quality: u32,
) -> EncodeParams {
    match format {
        OutputFormat::Jpeg => {
            let quality = if requested_quality == 0 {
                default_quality
            } else {
                requested_quality
            };
            EncodeParams {
                format,
                quality: Some(quality.clamp(1, 100)),
                interlace: true,
            }
        }
        _ => EncodeParams {
            format,
            quality: None,
            interlace: false,
        },
    }
}
