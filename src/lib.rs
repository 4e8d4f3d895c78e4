//! # Imagemill
//!
//! An image-transform planner and orchestrator: give it the raw bytes of an
//! encoded image and a flat record of transform options, and it normalizes
//! the source orientation, computes crop/resize geometry, applies a
//! fixed-order sequence of geometric operations, and re-encodes to the
//! target format.
//!
//! The pixel work itself is deliberately not the interesting part — it is
//! delegated to an [`ImageEngine`] capability with one bundled pure-Rust
//! implementation. What this crate owns is the *policy* around it:
//!
//! ```text
//! bytes → decode → normalize orientation → crop → resize → rotate → flip
//!       → resolve output format → encode → bytes
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`options`] | The flat transform request record and its no-op gate |
//! | [`calculations`] | Pure geometry planning: dual-mode numbers, crop boxes, resize targets, rotation normalization |
//! | [`orientation`] | EXIF orientation tag → rotate/flip lookup table |
//! | [`format`] | Output format resolution, allow-list, encode parameter policy |
//! | [`engine`] | The `ImageEngine` trait and its operation value types |
//! | [`rust_engine`] | Production engine on the `image` crate + `kamadak-exif` |
//! | [`rewriter`] | Orientation-tag rewriting; production implementation shells out to exiftool |
//! | [`pipeline`] | Fixed-order dispatch of the geometric operations |
//! | [`transform`] | Top-level `Transformer` composing everything |
//! | [`error`] | The `TransformError` taxonomy |
//!
//! # Design Decisions
//!
//! ## Dual-Mode Numbers
//!
//! Every geometric option is a float interpreted one way everywhere: a value
//! strictly between 0 and 1 is a fraction of the relevant image dimension,
//! anything else is an absolute pixel count, negatives clamp to 0, and 0
//! means "unspecified". One function,
//! [`calculations::evaluate_dimension`], owns that rule so it cannot drift
//! between width, height, and the four crop fields.
//!
//! ## Planning Is Pure, Execution Is a Trait
//!
//! The planners in [`calculations`] are pure functions from options and
//! current bounds to operation values; they touch no pixels and are tested
//! without any. Execution goes through the [`ImageEngine`] trait, so the
//! whole pipeline runs against a recording mock in tests and an alternate
//! backend can be swapped in without touching planner logic.
//!
//! ## Fixed Operation Order
//!
//! Crop and resize coordinates are specified against the pre-rotation frame
//! and flip axes against the post-rotation frame, so the pipeline order
//! crop → resize → rotate → flips is a contract, not an implementation
//! detail. Each step plans against the dimensions the image has when that
//! step runs.
//!
//! ## Degraded Metadata Beats No Output
//!
//! Baking an orientation correction into the pixels leaves a stale tag in
//! the re-encoded bytes. Resetting it requires an external tool, and that
//! tool failing is the one error this crate recovers from: the call
//! succeeds with correctly-rotated pixels and a warning that downstream
//! consumers may see an inconsistent tag. Every other failure is fatal and
//! returns no partial output.
//!
//! # Example
//!
//! ```no_run
//! use imagemill::{Options, transform};
//!
//! let input = std::fs::read("photo.jpg")?;
//! let options = Options {
//!     width: 0.5, // half the source width
//!     ..Options::default()
//! };
//! let output = transform(&input, &options)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod calculations;
pub mod engine;
pub mod error;
pub mod format;
pub mod options;
pub mod orientation;
pub mod pipeline;
pub mod rewriter;
pub mod rust_engine;
pub mod transform;

pub use engine::{
    CropRect, Dimensions, EngineError, FlipAxis, ImageEngine, ResizeRequest, Rotation,
};
pub use error::TransformError;
pub use format::{EncodeParams, OutputFormat};
pub use options::Options;
pub use orientation::{OrientationTransform, orientation_transform};
pub use rewriter::{ExiftoolRewriter, MetadataRewriter, RewriteError};
pub use rust_engine::RustEngine;
pub use transform::{TransformConfig, Transformer, transform};
