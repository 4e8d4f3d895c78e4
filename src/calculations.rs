//! Pure planning functions for transform geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//! They turn the dual-mode numeric options into concrete pixel requests
//! against the image's *current* dimensions; the pipeline re-queries the
//! size before each step, so resize percentages are evaluated against the
//! post-crop bounds.

use crate::engine::{CropRect, Dimensions, ResizeRequest, Rotation};
use crate::options::Options;

/// Interpret a dual-mode option value against a reference dimension.
///
/// A value strictly between 0 and 1 is a fraction of `reference`; a negative
/// value clamps to 0; anything else is an absolute pixel count. The result is
/// truncated to whole pixels. The `value == 0` case also returns 0 — callers
/// treat that as "unspecified", never as "zero pixels".
///
/// # Examples
/// ```
/// # use imagemill::calculations::evaluate_dimension;
/// assert_eq!(evaluate_dimension(0.5, 200), 100);
/// assert_eq!(evaluate_dimension(150.0, 200), 150);
/// assert_eq!(evaluate_dimension(-10.0, 200), 0);
/// assert_eq!(evaluate_dimension(0.0, 200), 0);
/// ```
pub fn evaluate_dimension(value: f64, reference: u32) -> u32 {
    if 0.0 < value && value < 1.0 {
        return (reference as f64 * value) as u32;
    }
    if value < 0.0 {
        return 0;
    }
    value as u32
}

/// Planned crop operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPlan {
    /// Nothing to crop: no crop fields set, or the computed box covers the
    /// whole image.
    None,
    /// Content-aware centered crop to this size.
    Smart { width: u32, height: u32 },
    /// Explicit rectangle, already clamped inside the current bounds.
    Explicit(CropRect),
}

/// Compute the crop operation, if any, for the current bounds.
///
/// Explicit mode resolves negative origins from the right/bottom edge, treats
/// zero extents as "to the image edge", and clamps the box so it never
/// extends past `[0, width) x [0, height)`. A degenerate box (origin at or
/// beyond an edge) is still returned so the engine can reject it; silently
/// dropping bad coordinates would hide caller errors.
pub fn plan_crop(options: &Options, bounds: Dimensions) -> CropPlan {
    if !options.smart_crop
        && options.crop_x == 0.0
        && options.crop_y == 0.0
        && options.crop_width == 0.0
        && options.crop_height == 0.0
    {
        return CropPlan::None;
    }

    let Dimensions {
        width: img_w,
        height: img_h,
    } = bounds;

    if options.smart_crop {
        // Target size comes from width/height; an unspecified axis keeps the
        // current dimension so only the constrained axis tightens.
        let mut width = evaluate_dimension(options.width, img_w);
        let mut height = evaluate_dimension(options.height, img_h);
        if width == 0 {
            width = img_w;
        }
        if height == 0 {
            height = img_h;
        }
        return CropPlan::Smart { width, height };
    }

    // Top-left corner, measured from the far edge when the option is negative.
    let mut x0 = evaluate_dimension(options.crop_x.abs(), img_w) as i64;
    if options.crop_x < 0.0 {
        x0 = img_w as i64 - x0;
    }
    let mut y0 = evaluate_dimension(options.crop_y.abs(), img_h) as i64;
    if options.crop_y < 0.0 {
        y0 = img_h as i64 - y0;
    }
    let x0 = x0.clamp(0, img_w as i64) as u64;
    let y0 = y0.clamp(0, img_h as i64) as u64;

    // Extent; zero means the remaining dimension to the image edge.
    let mut w = evaluate_dimension(options.crop_width, img_w) as u64;
    if w == 0 {
        w = img_w as u64;
    }
    let mut h = evaluate_dimension(options.crop_height, img_h) as u64;
    if h == 0 {
        h = img_h as u64;
    }

    // Bottom-right corner clamped to the image bounds; never extend past
    // the source edges, no wraparound.
    let x1 = (x0 + w).min(img_w as u64);
    let y1 = (y0 + h).min(img_h as u64);

    let rect = CropRect {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    };
    if rect.width == img_w && rect.height == img_h {
        CropPlan::None
    } else {
        CropPlan::Explicit(rect)
    }
}

/// Compute the resize operation, if any, for the current bounds.
///
/// Requested dimensions are clamped down to the source size unless
/// `scale_up` is set. Returns `None` when both axes are either unconstrained
/// or already match.
pub fn plan_resize(options: &Options, bounds: Dimensions) -> Option<ResizeRequest> {
    let Dimensions {
        width: img_w,
        height: img_h,
    } = bounds;

    let mut w = evaluate_dimension(options.width, img_w);
    let mut h = evaluate_dimension(options.height, img_h);

    // Never resize larger than the current image unless specifically allowed.
    if !options.scale_up {
        w = w.min(img_w);
        h = h.min(img_h);
    }

    if (w == img_w || w == 0) && (h == img_h || h == 0) {
        return None;
    }

    Some(if w == 0 {
        ResizeRequest::Height(h)
    } else if h == 0 {
        ResizeRequest::Width(w)
    } else if options.fit {
        ResizeRequest::Contain {
            width: w,
            height: h,
        }
    } else {
        ResizeRequest::Fill {
            width: w,
            height: h,
        }
    })
}

/// Normalize a rotation in degrees and map it to a quarter-turn, if any.
///
/// The angle is reduced to `[0, 360)`, so negative inputs work (−90 becomes
/// 270). Only exactly 90, 180 and 270 dispatch a rotation; every other
/// normalized value, fractional angles included, is a no-op.
pub fn plan_rotation(degrees: f64) -> Option<Rotation> {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 90.0 {
        Some(Rotation::D90)
    } else if normalized == 180.0 {
        Some(Rotation::D180)
    } else if normalized == 270.0 {
        Some(Rotation::D270)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    // =========================================================================
    // evaluate_dimension tests
    // =========================================================================

    #[test]
    fn evaluate_fraction_of_reference() {
        assert_eq!(evaluate_dimension(0.5, 200), 100);
        assert_eq!(evaluate_dimension(0.25, 400), 100);
    }

    #[test]
    fn evaluate_fraction_truncates() {
        assert_eq!(evaluate_dimension(0.333, 100), 33);
    }

    #[test]
    fn evaluate_absolute_value() {
        assert_eq!(evaluate_dimension(150.0, 200), 150);
        // 1.0 is the first absolute value, not a 100% fraction
        assert_eq!(evaluate_dimension(1.0, 200), 1);
    }

    #[test]
    fn evaluate_negative_clamps_to_zero() {
        assert_eq!(evaluate_dimension(-10.0, 200), 0);
        assert_eq!(evaluate_dimension(-0.5, 200), 0);
    }

    #[test]
    fn evaluate_zero_is_zero() {
        assert_eq!(evaluate_dimension(0.0, 200), 0);
    }

    // =========================================================================
    // plan_crop tests
    // =========================================================================

    #[test]
    fn crop_skipped_when_no_fields_set() {
        assert_eq!(
            plan_crop(&Options::default(), bounds(400, 300)),
            CropPlan::None
        );
    }

    #[test]
    fn crop_absolute_rectangle() {
        let opt = Options {
            crop_x: 10.0,
            crop_y: 20.0,
            crop_width: 100.0,
            crop_height: 50.0,
            ..Options::default()
        };
        assert_eq!(
            plan_crop(&opt, bounds(400, 300)),
            CropPlan::Explicit(CropRect {
                x: 10,
                y: 20,
                width: 100,
                height: 50
            })
        );
    }

    #[test]
    fn crop_percentage_rectangle() {
        let opt = Options {
            crop_x: 0.25,
            crop_y: 0.25,
            crop_width: 0.5,
            crop_height: 0.5,
            ..Options::default()
        };
        assert_eq!(
            plan_crop(&opt, bounds(400, 400)),
            CropPlan::Explicit(CropRect {
                x: 100,
                y: 100,
                width: 200,
                height: 200
            })
        );
    }

    #[test]
    fn crop_negative_origin_measures_from_far_edge() {
        // x0 = imgW - evaluate(10, imgW)
        let opt = Options {
            crop_x: -10.0,
            crop_width: 10.0,
            ..Options::default()
        };
        let plan = plan_crop(&opt, bounds(400, 300));
        assert_eq!(
            plan,
            CropPlan::Explicit(CropRect {
                x: 390,
                y: 0,
                width: 10,
                height: 300
            })
        );
    }

    #[test]
    fn crop_negative_percentage_origin_clamps_to_bounds() {
        // On 400x400: x0 = 400 - evaluate(0.25, 400) = 300, w = 200 clamps
        // the bottom-right corner to the edge, leaving a 100x100 box.
        let opt = Options {
            crop_x: -0.25,
            crop_y: -0.25,
            crop_width: 0.5,
            crop_height: 0.5,
            ..Options::default()
        };
        assert_eq!(
            plan_crop(&opt, bounds(400, 400)),
            CropPlan::Explicit(CropRect {
                x: 300,
                y: 300,
                width: 100,
                height: 100
            })
        );
    }

    #[test]
    fn crop_zero_extent_reaches_the_image_edge() {
        let opt = Options {
            crop_x: 50.0,
            ..Options::default()
        };
        assert_eq!(
            plan_crop(&opt, bounds(400, 300)),
            CropPlan::Explicit(CropRect {
                x: 50,
                y: 0,
                width: 350,
                height: 300
            })
        );
    }

    #[test]
    fn crop_covering_full_bounds_is_a_noop() {
        let opt = Options {
            crop_width: 400.0,
            crop_height: 300.0,
            ..Options::default()
        };
        assert_eq!(plan_crop(&opt, bounds(400, 300)), CropPlan::None);
    }

    #[test]
    fn crop_never_extends_past_bounds() {
        let cases = [
            Options {
                crop_x: 350.0,
                crop_width: 200.0,
                ..Options::default()
            },
            Options {
                crop_x: -500.0,
                crop_width: 100.0,
                ..Options::default()
            },
            Options {
                crop_y: 0.9,
                crop_height: 0.9,
                ..Options::default()
            },
        ];
        for opt in cases {
            if let CropPlan::Explicit(rect) = plan_crop(&opt, bounds(400, 300)) {
                assert!(rect.x + rect.width <= 400, "x overflow: {rect:?}");
                assert!(rect.y + rect.height <= 300, "y overflow: {rect:?}");
            }
        }
    }

    #[test]
    fn crop_origin_past_edge_yields_degenerate_box() {
        // The engine rejects the empty box; the planner does not hide it.
        let opt = Options {
            crop_x: 500.0,
            crop_width: 100.0,
            ..Options::default()
        };
        assert_eq!(
            plan_crop(&opt, bounds(400, 300)),
            CropPlan::Explicit(CropRect {
                x: 400,
                y: 0,
                width: 0,
                height: 300
            })
        );
    }

    #[test]
    fn smart_crop_uses_target_width_and_height() {
        let opt = Options {
            smart_crop: true,
            width: 0.5,
            height: 100.0,
            ..Options::default()
        };
        assert_eq!(
            plan_crop(&opt, bounds(400, 300)),
            CropPlan::Smart {
                width: 200,
                height: 100
            }
        );
    }

    #[test]
    fn smart_crop_unspecified_axis_keeps_current_dimension() {
        let opt = Options {
            smart_crop: true,
            width: 200.0,
            ..Options::default()
        };
        assert_eq!(
            plan_crop(&opt, bounds(400, 300)),
            CropPlan::Smart {
                width: 200,
                height: 300
            }
        );
    }

    #[test]
    fn smart_crop_ignores_explicit_crop_fields() {
        let opt = Options {
            smart_crop: true,
            width: 100.0,
            height: 100.0,
            crop_x: 10.0,
            crop_width: 50.0,
            ..Options::default()
        };
        assert_eq!(
            plan_crop(&opt, bounds(400, 300)),
            CropPlan::Smart {
                width: 100,
                height: 100
            }
        );
    }

    // =========================================================================
    // plan_resize tests
    // =========================================================================

    #[test]
    fn resize_skipped_when_unconstrained() {
        assert_eq!(plan_resize(&Options::default(), bounds(400, 300)), None);
    }

    #[test]
    fn resize_skipped_when_dimensions_already_match() {
        let opt = Options {
            width: 400.0,
            height: 300.0,
            ..Options::default()
        };
        assert_eq!(plan_resize(&opt, bounds(400, 300)), None);
    }

    #[test]
    fn resize_width_only_is_proportional() {
        let opt = Options {
            width: 200.0,
            ..Options::default()
        };
        assert_eq!(
            plan_resize(&opt, bounds(400, 300)),
            Some(ResizeRequest::Width(200))
        );
    }

    #[test]
    fn resize_height_only_is_proportional() {
        let opt = Options {
            height: 0.5,
            ..Options::default()
        };
        assert_eq!(
            plan_resize(&opt, bounds(400, 300)),
            Some(ResizeRequest::Height(150))
        );
    }

    #[test]
    fn resize_both_axes_fills_and_crops() {
        let opt = Options {
            width: 200.0,
            height: 200.0,
            ..Options::default()
        };
        assert_eq!(
            plan_resize(&opt, bounds(400, 300)),
            Some(ResizeRequest::Fill {
                width: 200,
                height: 200
            })
        );
    }

    #[test]
    fn resize_fit_requests_contain() {
        let opt = Options {
            width: 200.0,
            height: 200.0,
            fit: true,
            ..Options::default()
        };
        assert_eq!(
            plan_resize(&opt, bounds(400, 300)),
            Some(ResizeRequest::Contain {
                width: 200,
                height: 200
            })
        );
    }

    #[test]
    fn resize_fit_with_one_axis_degrades_to_proportional() {
        let opt = Options {
            width: 200.0,
            fit: true,
            ..Options::default()
        };
        assert_eq!(
            plan_resize(&opt, bounds(400, 300)),
            Some(ResizeRequest::Width(200))
        );
    }

    #[test]
    fn resize_never_enlarges_by_default() {
        for (w, h) in [(800.0, 0.0), (400.0, 600.0), (4000.0, 3000.0)] {
            let opt = Options {
                width: w,
                height: h,
                ..Options::default()
            };
            match plan_resize(&opt, bounds(400, 300)) {
                None => {}
                Some(ResizeRequest::Width(w)) => assert!(w <= 400),
                Some(ResizeRequest::Height(h)) => assert!(h <= 300),
                Some(ResizeRequest::Fill { width, height })
                | Some(ResizeRequest::Contain { width, height }) => {
                    assert!(width <= 400 && height <= 300);
                }
            }
        }
    }

    #[test]
    fn resize_scale_up_allows_enlarging() {
        let opt = Options {
            width: 800.0,
            scale_up: true,
            ..Options::default()
        };
        assert_eq!(
            plan_resize(&opt, bounds(400, 300)),
            Some(ResizeRequest::Width(800))
        );
    }

    #[test]
    fn resize_upscale_clamp_can_turn_into_noop() {
        // Requested larger than source on both axes: clamped back to the
        // source size, which then matches and skips the resize.
        let opt = Options {
            width: 800.0,
            height: 600.0,
            ..Options::default()
        };
        assert_eq!(plan_resize(&opt, bounds(400, 300)), None);
    }

    #[test]
    fn resize_percentages_use_given_bounds() {
        let opt = Options {
            width: 0.5,
            ..Options::default()
        };
        // Same options, different current bounds (e.g. after a crop).
        assert_eq!(
            plan_resize(&opt, bounds(400, 300)),
            Some(ResizeRequest::Width(200))
        );
        assert_eq!(
            plan_resize(&opt, bounds(200, 150)),
            Some(ResizeRequest::Width(100))
        );
    }

    // =========================================================================
    // plan_rotation tests
    // =========================================================================

    #[test]
    fn rotation_quarter_turns() {
        assert_eq!(plan_rotation(90.0), Some(Rotation::D90));
        assert_eq!(plan_rotation(180.0), Some(Rotation::D180));
        assert_eq!(plan_rotation(270.0), Some(Rotation::D270));
    }

    #[test]
    fn rotation_normalizes_negative_and_wrapped_angles() {
        assert_eq!(plan_rotation(-90.0), Some(Rotation::D270));
        assert_eq!(plan_rotation(450.0), Some(Rotation::D90));
        assert_eq!(plan_rotation(-450.0), Some(Rotation::D270));
        assert_eq!(plan_rotation(360.0), None);
    }

    #[test]
    fn rotation_ignores_non_quarter_angles() {
        assert_eq!(plan_rotation(0.0), None);
        assert_eq!(plan_rotation(45.0), None);
        assert_eq!(plan_rotation(90.5), None);
    }
}
