// Simple RGB color. Alpha is supplied per draw, since every flake carries its
// own opacity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const SNOW: Color = Color { r: 255, g: 255, b: 255 };
    pub const HOVER: Color = Color { r: 255, g: 200, b: 220 };

    // CSS color string usable as a canvas fill or stroke style
    pub fn rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.max(0.0).min(1.0))
    }
}
