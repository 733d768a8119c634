//! Painting: draws the render list to a 2D context, and the export seam.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads a finished [`SceneItem`] list and produces pixels; it never
//! mutates engine state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! [`CanvasRasterizer`] converts them to [`AnnotateError::Rasterize`] at the
//! boundary.

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::AnnotateError;
use crate::scene::{Primitive, SceneItem};

#[cfg(test)]
#[path = "paint_test.rs"]
mod paint_test;

/// Turns the current render list into an exported image.
pub trait Rasterizer {
    type Image;

    /// Rasterize `items` over the background and name the result `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotateError::Rasterize`] if the target cannot be drawn or encoded.
    fn rasterize(&self, items: &[SceneItem], file_name: &str) -> Result<Self::Image, AnnotateError>;
}

/// A PNG export: suggested file name plus `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngExport {
    pub file_name: String,
    pub data_url: String,
}

/// Rasterizes onto an offscreen canvas sized like the drawing surface.
pub struct CanvasRasterizer {
    canvas: HtmlCanvasElement,
    background: Option<HtmlImageElement>,
}

impl CanvasRasterizer {
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, background: Option<HtmlImageElement>) -> Self {
        Self { canvas, background }
    }

    /// Create a detached canvas of the given size in the current document.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotateError::Rasterize`] outside a browser document.
    pub fn offscreen(width: u32, height: u32, background: Option<HtmlImageElement>) -> Result<Self, AnnotateError> {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Err(AnnotateError::Rasterize("no document".into()));
        };
        let canvas = document
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AnnotateError::Rasterize("created element is not a canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(Self::new(canvas, background))
    }
}

impl Rasterizer for CanvasRasterizer {
    type Image = PngExport;

    fn rasterize(&self, items: &[SceneItem], file_name: &str) -> Result<PngExport, AnnotateError> {
        let ctx = context_2d(&self.canvas)?;
        let w = f64::from(self.canvas.width());
        let h = f64::from(self.canvas.height());
        ctx.clear_rect(0.0, 0.0, w, h);
        if let Some(ref img) = self.background {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h)
                .map_err(js_err)?;
        }
        draw(&ctx, items).map_err(js_err)?;
        let data_url = self.canvas.to_data_url_with_type("image/png").map_err(js_err)?;
        Ok(PngExport { file_name: file_name.to_string(), data_url })
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, AnnotateError> {
    let Some(ctx) = canvas.get_context("2d").map_err(js_err)? else {
        return Err(AnnotateError::Rasterize("2d context unavailable".into()));
    };
    ctx.dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| AnnotateError::Rasterize("context is not 2d".into()))
}

fn js_err(e: JsValue) -> AnnotateError {
    AnnotateError::Rasterize(format!("{e:?}"))
}

/// Backing-store pixels per CSS pixel on each axis.
///
/// A canvas whose backing store is scaled by the device pixel ratio needs this
/// transform so CSS-space drawing and clearing cover the whole store. Unsized
/// surfaces map 1:1.
#[must_use]
pub fn pixel_scale(css: (f64, f64), pixels: (u32, u32)) -> (f64, f64) {
    let axis = |css: f64, px: u32| if css > 0.0 && px > 0 { f64::from(px) / css } else { 1.0 };
    (axis(css.0, pixels.0), axis(css.1, pixels.1))
}

/// Draw every item in order, bottom first.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, items: &[SceneItem]) -> Result<(), JsValue> {
    for item in items {
        draw_item(ctx, item)?;
    }
    Ok(())
}

fn draw_item(ctx: &CanvasRenderingContext2d, item: &SceneItem) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(&item.color);
    ctx.set_line_width(item.stroke_width);

    match &item.primitive {
        Primitive::Line { from, to } => {
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke();
        }
        Primitive::Arrow { from, to, wings } => {
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            for wing in wings {
                ctx.move_to(to.x, to.y);
                ctx.line_to(wing.x, wing.y);
            }
            ctx.stroke();
        }
        Primitive::Rect { bounds } => {
            ctx.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height);
        }
        Primitive::Ellipse { center, rx, ry } => {
            // Zero-extent ellipses are skipped.
            if *rx > 0.0 && *ry > 0.0 {
                ctx.begin_path();
                ctx.ellipse(center.x, center.y, *rx, *ry, 0.0, 0.0, 2.0 * PI)?;
                ctx.stroke();
            }
        }
        Primitive::Text { at, content, font_size } => {
            ctx.set_fill_style_str(&item.color);
            ctx.set_font(&format!("{font_size}px sans-serif"));
            ctx.set_text_baseline("alphabetic");
            ctx.fill_text(content, at.x, at.y)?;
        }
    }

    ctx.restore();
    Ok(())
}
