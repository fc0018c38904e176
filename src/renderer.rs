// Renderer struct that draws the field onto a 2d canvas: soft radial-gradient
// flakes and faint ripple outlines. Owns the canvas so it can keep the
// backing store matched to the viewport.

use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Color;
use crate::error::SnowError;
use crate::surface::Surface;

pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    // Grabs the 2d context from the canvas element
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SnowError> {
        let context = canvas
            .get_context("2d")?
            .ok_or(SnowError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SnowError::NoContext)?;

        Ok(CanvasRenderer { canvas, context })
    }

    // Resizes the backing store. Returns true when the size changed.
    pub fn fit(&self, width: f64, height: f64) -> bool {
        let (width, height) = (width.max(0.0) as u32, height.max(0.0) as u32);
        if self.canvas.width() == width && self.canvas.height() == height {
            return false;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        true
    }
}

impl Surface for CanvasRenderer {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) -> Result<(), SnowError> {
        let (width, height) = self.size();
        self.context.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn soft_disc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        opacity: f64,
    ) -> Result<(), SnowError> {
        // arc() throws on negative radii and a zero radius draws nothing
        if !(radius > 0.0) {
            return Ok(());
        }
        let gradient = self.context.create_radial_gradient(x, y, 0.0, x, y, radius)?;
        gradient.add_color_stop(0.0, &color.rgba(opacity))?;
        gradient.add_color_stop(1.0, &color.rgba(0.0))?;

        self.context.begin_path();
        #[allow(deprecated)]
        self.context.set_fill_style(&gradient);
        self.context.arc(x, y, radius, 0.0, PI * 2.0)?;
        self.context.fill();
        Ok(())
    }

    fn ring(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        alpha: f64,
        line_width: f64,
    ) -> Result<(), SnowError> {
        if !(radius > 0.0) {
            return Ok(());
        }
        self.context.begin_path();
        #[allow(deprecated)]
        self.context.set_stroke_style(&JsValue::from_str(&color.rgba(alpha)));
        self.context.set_line_width(line_width);
        self.context.arc(x, y, radius, 0.0, PI * 2.0)?;
        self.context.stroke();
        Ok(())
    }
}
