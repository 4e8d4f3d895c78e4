//! Top-level transform entry point.
//!
//! [`Transformer`] composes the engine, the metadata rewriter and the
//! numeric defaults into the full sequence: no-op gate → decode →
//! orientation normalization → format resolution → pipeline → encode.
//! The [`transform`] free function is the batteries-included version on the
//! production collaborators.

use crate::engine::ImageEngine;
use crate::error::TransformError;
use crate::format;
use crate::options::Options;
use crate::orientation::orientation_transform;
use crate::pipeline;
use crate::rewriter::{ExiftoolRewriter, MetadataRewriter};
use crate::rust_engine::RustEngine;

/// Numeric defaults, overridable per transformer instead of living in
/// global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformConfig {
    /// JPEG quality used when the request leaves `quality` at 0.
    pub default_quality: u32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            default_quality: 95,
        }
    }
}

/// Transform orchestrator over an engine and a metadata rewriter.
///
/// One call owns one working image exclusively; the transformer itself holds
/// no per-call state, so independent concurrent calls are safe as long as
/// the collaborators are reentrant.
pub struct Transformer<E, R> {
    engine: E,
    rewriter: R,
    config: TransformConfig,
}

impl<E: ImageEngine, R: MetadataRewriter> Transformer<E, R> {
    pub fn new(engine: E, rewriter: R) -> Self {
        Self::with_config(engine, rewriter, TransformConfig::default())
    }

    pub fn with_config(engine: E, rewriter: R, config: TransformConfig) -> Self {
        Self {
            engine,
            rewriter,
            config,
        }
    }

    /// Transform the encoded image per `options`, returning the re-encoded
    /// bytes.
    ///
    /// When no field requests an operation the input passes through
    /// byte-identical, without a decode. Every failure is fatal and returns
    /// the first error encountered; the one recoverable condition, a failed
    /// orientation-tag rewrite, is logged and processing continues.
    pub fn transform(&self, image: &[u8], options: &Options) -> Result<Vec<u8>, TransformError> {
        if !options.requests_transform() {
            return Ok(image.to_vec());
        }

        let mut working = self.engine.decode(image).map_err(TransformError::Decode)?;
        let source_format = self.engine.source_format(&working);

        if format::carries_orientation(&source_format) {
            self.normalize_orientation(&mut working, &source_format)?;
        }

        // Resolve and validate the target before any user-requested work, so
        // an off-list format fails fast even for a pure reformat.
        let target = format::resolve_output_format(&source_format, &options.format)?;

        pipeline::apply(&self.engine, &mut working, options)?;

        let params = format::encode_params(target, options.quality, self.config.default_quality);
        self.engine
            .encode(&working, &params)
            .map_err(TransformError::Encode)
    }

    /// Bake the embedded orientation into the pixels and reset the stale tag
    /// through the rewriter.
    ///
    /// The geometric correction itself is fatal on failure, like any other
    /// pipeline operation. The tag rewrite is not: on any failure in the
    /// re-encode → rewrite → re-decode chain the call keeps the
    /// already-rotated working image, and the output may carry a stale
    /// orientation tag.
    fn normalize_orientation(
        &self,
        working: &mut E::Image,
        source_format: &str,
    ) -> Result<(), TransformError> {
        let tag = self.engine.orientation(working);
        let transform = orientation_transform(tag);
        if transform.is_identity() {
            return Ok(());
        }

        pipeline::apply(&self.engine, working, &transform.to_options())?;

        // Only jpeg and tiff carry orientation; both are on the allow-list.
        let Some(intermediate) = format::OutputFormat::parse(source_format) else {
            return Ok(());
        };
        let params = format::encode_params(intermediate, 0, self.config.default_quality);
        match self.engine.encode(working, &params) {
            Ok(bytes) => match self.rewriter.rewrite(&bytes) {
                Ok(rewritten) => match self.engine.decode(&rewritten) {
                    Ok(image) => *working = image,
                    Err(err) => tracing::warn!(
                        error = %err,
                        "orientation tag rewrite produced undecodable bytes; \
                         output may carry a stale orientation tag"
                    ),
                },
                Err(err) => tracing::warn!(
                    error = %err,
                    "orientation tag rewrite failed; output may carry a stale orientation tag"
                ),
            },
            Err(err) => tracing::warn!(
                error = %err,
                "re-encode for orientation tag rewrite failed; \
                 output may carry a stale orientation tag"
            ),
        }
        Ok(())
    }
}

/// Transform with the production collaborators: the pure-Rust engine and the
/// exiftool rewriter.
pub fn transform(image: &[u8], options: &Options) -> Result<Vec<u8>, TransformError> {
    Transformer::new(RustEngine::default(), ExiftoolRewriter::default()).transform(image, options)
}
