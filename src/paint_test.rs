use super::*;

// =============================================================
// pixel_scale
// =============================================================

#[test]
fn unscaled_backing_store_maps_one_to_one() {
    assert_eq!(pixel_scale((800.0, 600.0), (800, 600)), (1.0, 1.0));
}

#[test]
fn device_pixel_ratio_backing_store_scales_up() {
    assert_eq!(pixel_scale((800.0, 600.0), (1600, 1200)), (2.0, 2.0));
    assert_eq!(pixel_scale((400.0, 300.0), (600, 450)), (1.5, 1.5));
}

#[test]
fn clearing_css_extent_covers_every_backing_pixel() {
    let css = (320.0, 240.0);
    let pixels = (960, 720);
    let (sx, sy) = pixel_scale(css, pixels);
    assert_eq!(css.0 * sx, f64::from(pixels.0));
    assert_eq!(css.1 * sy, f64::from(pixels.1));
}

#[test]
fn unsized_surface_or_canvas_falls_back_to_identity() {
    assert_eq!(pixel_scale((0.0, 0.0), (800, 600)), (1.0, 1.0));
    assert_eq!(pixel_scale((800.0, 600.0), (0, 0)), (1.0, 1.0));
    assert_eq!(pixel_scale((800.0, 0.0), (1600, 600)), (2.0, 1.0));
}
