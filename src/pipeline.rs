//! Fixed-order transform pipeline.
//!
//! Operations run as crop → resize → rotate → flip-vertical →
//! flip-horizontal, and the order is not negotiable: crop and resize
//! coordinates are specified by the caller against the pre-rotation frame,
//! so geometry must run before the orienting operations, and the flip axes
//! are defined relative to the already-rotated frame, so rotation must run
//! before the flips.
//!
//! Each step re-queries the image's current dimensions, plans against them,
//! and issues at most one engine call; percentage values therefore bind to
//! the size the image has when that step runs (resize sees the post-crop
//! bounds).

use crate::calculations::{CropPlan, plan_crop, plan_resize, plan_rotation};
use crate::engine::{FlipAxis, ImageEngine};
use crate::error::TransformError;
use crate::options::Options;

#[derive(Debug, Clone, Copy)]
enum Step {
    Crop,
    Resize,
    Rotate,
    FlipVertical,
    FlipHorizontal,
}

const STEP_ORDER: [Step; 5] = [
    Step::Crop,
    Step::Resize,
    Step::Rotate,
    Step::FlipVertical,
    Step::FlipHorizontal,
];

/// Apply the requested operations to the working image, in pipeline order.
///
/// Any engine rejection aborts the remaining steps and surfaces as a
/// [`TransformError::Geometry`] naming the failed operation.
pub fn apply<E: ImageEngine>(
    engine: &E,
    image: &mut E::Image,
    options: &Options,
) -> Result<(), TransformError> {
    for step in STEP_ORDER {
        apply_step(engine, image, options, step)?;
    }
    Ok(())
}

fn apply_step<E: ImageEngine>(
    engine: &E,
    image: &mut E::Image,
    options: &Options,
    step: Step,
) -> Result<(), TransformError> {
    match step {
        Step::Crop => match plan_crop(options, engine.dimensions(image)) {
            CropPlan::None => Ok(()),
            CropPlan::Smart { width, height } => {
                tracing::debug!(width, height, "smart crop target");
                engine
                    .smart_crop(image, width, height)
                    .map_err(|source| geometry("crop", source))?;
                let result = engine.dimensions(image);
                tracing::debug!(width = result.width, height = result.height, "smart crop result");
                Ok(())
            }
            CropPlan::Explicit(rect) => {
                engine.crop(image, rect).map_err(|source| geometry("crop", source))
            }
        },
        Step::Resize => match plan_resize(options, engine.dimensions(image)) {
            None => Ok(()),
            Some(request) => engine
                .resize(image, request)
                .map_err(|source| geometry("resize", source)),
        },
        Step::Rotate => match plan_rotation(options.rotate) {
            None => Ok(()),
            Some(rotation) => engine
                .rotate(image, rotation)
                .map_err(|source| geometry("rotate", source)),
        },
        Step::FlipVertical => {
            if options.flip_vertical {
                engine
                    .flip(image, FlipAxis::Vertical)
                    .map_err(|source| geometry("flip", source))
            } else {
                Ok(())
            }
        }
        Step::FlipHorizontal => {
            if options.flip_horizontal {
                engine
                    .flip(image, FlipAxis::Horizontal)
                    .map_err(|source| geometry("flip", source))
            } else {
                Ok(())
            }
        }
    }
}

fn geometry(operation: &'static str, source: crate::engine::EngineError) -> TransformError {
    TransformError::Geometry { operation, source }
}
