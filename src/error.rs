//! Error taxonomy for the transform entry point.
//!
//! Every fatal error short-circuits the call: the caller gets exactly one
//! error describing the first failure and no partial output. The one
//! recoverable condition, a failed orientation-tag rewrite, is logged at
//! warn level instead of surfacing here.

use crate::engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    /// The input bytes were not recognized as a supported container.
    #[error("could not parse image")]
    Decode(#[source] EngineError),

    /// The resolved output format is not on the allow-list.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A crop/resize/rotate/flip request was rejected by the engine.
    #[error("{operation} failed")]
    Geometry {
        operation: &'static str,
        #[source]
        source: EngineError,
    },

    /// The final encode failed.
    #[error("encode failed")]
    Encode(#[source] EngineError),
}
