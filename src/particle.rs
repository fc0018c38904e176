// A single snowflake: position changes every frame, the rest is fixed at spawn

use rand::Rng;
use std::f64::consts::PI;

use crate::config::FieldConfig;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub radius: f64,
    pub speed: f64,
    pub wind: f64,
    pub opacity: f64,
    pub wobble: f64,
    pub hovered: bool,
}

impl Particle {
    // Rolls a new flake for the current intensity. Flakes created while the
    // field is still being seeded are scattered over the whole height so the
    // screen is not empty on the first frames; later ones fall in from above.
    pub fn spawn<R: Rng>(
        rng: &mut R,
        config: &FieldConfig,
        intensity: f64,
        width: f64,
        height: f64,
        seeding: bool,
    ) -> Particle {
        let x = uniform(rng, 0.0, width);
        let y = if seeding {
            uniform(rng, 0.0, height)
        } else {
            config.spawn_y
        };
        Particle {
            pos: [x, y],
            radius: uniform(rng, config.radius_min, config.radius_max)
                + intensity * config.radius_per_intensity,
            speed: uniform(rng, config.speed_min, config.speed_max)
                + intensity * config.speed_per_intensity,
            wind: uniform(rng, -config.wind_max, config.wind_max),
            opacity: uniform(rng, config.opacity_min, config.opacity_max),
            wobble: uniform(rng, 0.0, 2.0 * PI),
            hovered: false,
        }
    }

    // Falling and swaying, no interaction
    pub fn drift(&mut self, config: &FieldConfig) {
        self.wobble += config.wobble_step;
        self.pos[1] += self.speed;
        self.pos[0] += self.wobble.sin() * config.sway + self.wind * config.wind_scale;
    }

    // Sends the flake back above the top edge at a random column.
    pub fn recycle<R: Rng>(&mut self, rng: &mut R, width: f64, y: f64) {
        self.pos = [uniform(rng, 0.0, width), y];
    }

    // Wraps the flake around the viewport edges. Returns true when it fell
    // past the bottom and was recycled.
    pub fn wrap<R: Rng>(&mut self, rng: &mut R, width: f64, height: f64, margin: f64) -> bool {
        let mut recycled = false;
        if self.pos[1] > height + margin {
            self.recycle(rng, width, -margin);
            recycled = true;
        }
        if self.pos[0] > width + margin {
            self.pos[0] = -margin;
        }
        if self.pos[0] < -margin {
            self.pos[0] = width + margin;
        }
        recycled
    }
}

// gen_range panics on an empty range, which a zero-sized canvas would produce
fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low, high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(x: f64, y: f64) -> Particle {
        Particle {
            pos: [x, y],
            radius: 2.0,
            speed: 0.0,
            wind: 0.0,
            opacity: 0.5,
            wobble: 0.0,
            hovered: false,
        }
    }

    #[test]
    fn spawn_respects_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, &config, 0.0, 800.0, 600.0, true);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 600.0);
            assert!(p.radius >= 1.0 && p.radius < 3.0);
            assert!(p.speed >= 0.5 && p.speed < 1.5);
            assert!(p.wind >= -1.0 && p.wind < 1.0);
            assert!(p.opacity >= 0.3 && p.opacity < 0.8);
            assert!(p.wobble >= 0.0 && p.wobble < 2.0 * PI);
            assert!(!p.hovered);
        }
    }

    #[test]
    fn spawn_scales_with_intensity() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, &config, 1.0, 800.0, 600.0, false);
            assert!(p.radius >= 3.5 && p.radius <= 5.5);
            assert!(p.speed >= 2.5 && p.speed <= 3.5);
            assert_eq!(p.pos[1], -20.0);
        }
    }

    #[test]
    fn spawn_on_empty_canvas_does_not_panic() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::spawn(&mut rng, &config, 0.0, 0.0, 0.0, true);
        assert_eq!(p.pos, [0.0, 0.0]);
    }

    #[test]
    fn drift_moves_down_and_sways() {
        let config = FieldConfig::default();
        let mut p = still(100.0, 100.0);
        p.speed = 1.25;
        p.wind = 1.0;
        p.drift(&config);
        assert_eq!(p.pos[1], 101.25);
        let expected_x = 100.0 + 0.05f64.sin() * 0.5 + 0.5;
        assert!((p.pos[0] - expected_x).abs() < 1e-12);
        assert_eq!(p.wobble, 0.05);
    }

    #[test]
    fn wrap_recycles_past_bottom() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = still(400.0, 611.0);
        assert!(p.wrap(&mut rng, 800.0, 600.0, 10.0));
        assert_eq!(p.pos[1], -10.0);
        assert!(p.pos[0] >= 0.0 && p.pos[0] < 800.0);

        let mut p = still(400.0, 610.0);
        assert!(!p.wrap(&mut rng, 800.0, 600.0, 10.0));
        assert_eq!(p.pos, [400.0, 610.0]);
    }

    #[test]
    fn wrap_moves_across_sides() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = still(811.0, 50.0);
        p.wrap(&mut rng, 800.0, 600.0, 10.0);
        assert_eq!(p.pos[0], -10.0);

        let mut p = still(-10.5, 50.0);
        p.wrap(&mut rng, 800.0, 600.0, 10.0);
        assert_eq!(p.pos[0], 810.0);
    }
}
