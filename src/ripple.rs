// Expanding shockwave left behind by a click. Keeps track of its origin and
// age, and can tell whether a point lies on its ring or inside its core

use nalgebra_glm as glm;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ripple {
    pub origin: [f64; 2],
    pub age: u32,
}

impl Ripple {
    pub fn new(origin: [f64; 2]) -> Self {
        Ripple { origin, age: 0 }
    }

    pub fn ring_radius(&self, speed: f64) -> f64 {
        self.age as f64 * speed
    }

    // Vector from the origin to the point, and its length
    pub fn offset_to(&self, x: f64, y: f64) -> (glm::DVec2, f64) {
        let offset = glm::vec2(x - self.origin[0], y - self.origin[1]);
        let distance = glm::length(&offset);
        (offset, distance)
    }

    // Strictly inside the band of half-width `band` around the ring
    pub fn on_ring(&self, distance: f64, speed: f64, band: f64) -> bool {
        let ring = self.ring_radius(speed);
        distance < ring + band && distance > ring - band
    }

    // A ripple in its first live frame swallows flakes near the click.
    pub fn is_fresh(&self) -> bool {
        self.age == 1
    }

    pub fn is_expired(&self, lifetime: u32) -> bool {
        self.age >= lifetime
    }
}
