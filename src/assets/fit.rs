//! Aspect-preserving fit of an image into a bounding box.

/// Drawn size of an image. Placement is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedImage {
    pub width: f32,
    pub height: f32,
}

/// Fit a `src_w × src_h` image inside `max_w × max_h`.
///
/// Width is tried first; if the resulting height exceeds `max_h` the width
/// is re-derived from `max_h`.
pub fn fit_within(src_w: u32, src_h: u32, max_w: f32, max_h: f32) -> FittedImage {
    if src_w == 0 || src_h == 0 || max_w <= 0.0 || max_h <= 0.0 {
        return FittedImage {
            width: 0.0,
            height: 0.0,
        };
    }

    let aspect = src_h as f32 / src_w as f32;
    let mut width = max_w;
    let mut height = width * aspect;
    if height > max_h {
        height = max_h;
        width = height / aspect;
    }
    FittedImage { width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_wide_image_limited_by_width() {
        let fit = fit_within(400, 100, 2.0, 1.0);
        assert!(close(fit.width, 2.0));
        assert!(close(fit.height, 0.5));
    }

    #[test]
    fn test_tall_image_limited_by_height() {
        let fit = fit_within(100, 400, 2.0, 1.0);
        assert!(close(fit.height, 1.0));
        assert!(close(fit.width, 0.25));
    }

    #[test]
    fn test_square_in_wide_box() {
        let fit = fit_within(100, 100, 3.0, 1.0);
        assert!(close(fit.width, 1.0));
        assert!(close(fit.height, 1.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(fit_within(0, 10, 1.0, 1.0).width, 0.0);
        assert_eq!(fit_within(10, 10, 0.0, 1.0).height, 0.0);
    }
}
