// Drawing target abstraction. The field only needs three primitives. The
// browser implementation lives in `renderer`; tests draw into a `Recording`.

use crate::color::Color;
use crate::error::SnowError;

pub trait Surface {
    // Current size in pixels.
    fn size(&self) -> (f64, f64);

    fn clear(&mut self) -> Result<(), SnowError>;

    // Soft disc: `color` at `opacity` in the center fading to transparent at
    // `radius`.
    fn soft_disc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        opacity: f64,
    ) -> Result<(), SnowError>;

    // Circle outline.
    fn ring(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        alpha: f64,
        line_width: f64,
    ) -> Result<(), SnowError>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Disc {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        opacity: f64,
    },
    Ring {
        x: f64,
        y: f64,
        radius: f64,
        alpha: f64,
        line_width: f64,
    },
}

// Surface that remembers what was drawn on it.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    pub width: f64,
    pub height: f64,
    pub calls: Vec<DrawCall>,
}

impl Recording {
    pub fn new(width: f64, height: f64) -> Self {
        Recording {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn discs(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Disc { .. }))
    }

    pub fn rings(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Ring { .. }))
    }
}

impl Surface for Recording {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<(), SnowError> {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
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
        self.calls.push(DrawCall::Disc {
            x,
            y,
            radius,
            color,
            opacity,
        });
        Ok(())
    }

    fn ring(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        _color: Color,
        alpha: f64,
        line_width: f64,
    ) -> Result<(), SnowError> {
        self.calls.push(DrawCall::Ring {
            x,
            y,
            radius,
            alpha,
            line_width,
        });
        Ok(())
    }
}
