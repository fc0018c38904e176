// The snow field: particle population, pointer and click interaction, and
// the per-frame update/draw routine. Nothing here touches the DOM; `canvas`
// forwards events in and calls `frame` once per animation frame.

use nalgebra_glm as glm;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::Color;
use crate::config::FieldConfig;
use crate::error::SnowError;
use crate::particle::Particle;
use crate::ripple::Ripple;
use crate::surface::Surface;

pub struct ParticleField<R: Rng = StdRng> {
    config: FieldConfig,
    rng: R,
    particles: Vec<Particle>,
    ripples: Vec<Ripple>,
    // Last pointer position. `None` until the pointer first moves.
    cursor: Option<[f64; 2]>,
    intensity: f64,
    width: f64,
    height: f64,
    frames: u64,
}

impl ParticleField<StdRng> {
    pub fn new(config: FieldConfig) -> Self {
        ParticleField::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> ParticleField<R> {
    pub fn with_rng(config: FieldConfig, rng: R) -> Self {
        ParticleField {
            config,
            rng,
            particles: Vec::new(),
            ripples: Vec::new(),
            cursor: None,
            intensity: 0.0,
            width: 0.0,
            height: 0.0,
            frames: 0,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn cursor(&self) -> Option<[f64; 2]> {
        self.cursor
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    // Frames simulated so far. Skipped frames are not counted.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    // Particle count the population converges to at the current intensity.
    pub fn target_count(&self) -> usize {
        self.config.target_count(self.intensity)
    }

    // Sets the intensity read by the next frame. Values outside `[0, 1]` are
    // clamped and NaN counts as zero.
    pub fn set_intensity(&mut self, value: f64) {
        let clamped = if value.is_nan() {
            0.0
        } else {
            value.max(0.0).min(1.0)
        };
        if clamped != value {
            log::warn!("intensity {} out of range, using {}", value, clamped);
        }
        self.intensity = clamped;
    }

    // New surface size. Particles stay where they are and wrap back into
    // view on their own.
    pub fn resize(&mut self, width: f64, height: f64) {
        if width != self.width || height != self.height {
            log::debug!("snow field resized to {}x{}", width, height);
        }
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some([x, y]);
    }

    // Ripples only age on simulated frames, so clicks before the surface has
    // a size are dropped instead of queued.
    pub fn click(&mut self, x: f64, y: f64) {
        if !self.is_ready() {
            log::debug!("click at ({}, {}) ignored, field has no size yet", x, y);
            return;
        }
        self.ripples.push(Ripple::new([x, y]));
    }

    // Frames are skipped until the surface has a size.
    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    // Runs one animation frame: update, then draw onto `surface`. Returns
    // false when the frame was skipped because the field has no size yet.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> Result<bool, SnowError> {
        if !self.is_ready() {
            return Ok(false);
        }
        self.update();
        self.draw(surface)?;
        Ok(true)
    }

    // Advances the simulation by one frame without drawing.
    pub fn update(&mut self) {
        self.control_population();
        self.age_ripples();
        self.move_particles();
        self.frames += 1;
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), SnowError> {
        surface.clear()?;
        for p in &self.particles {
            let color = if p.hovered { Color::HOVER } else { Color::SNOW };
            surface.soft_disc(p.pos[0], p.pos[1], p.radius, color, p.opacity)?;
        }
        for ripple in &self.ripples {
            surface.ring(
                ripple.origin[0],
                ripple.origin[1],
                ripple.ring_radius(self.config.ripple_speed),
                Color::SNOW,
                self.config.ripple_stroke_alpha,
                self.config.ripple_line_width,
            )?;
        }
        Ok(())
    }

    // The initial seeding fills up to `base_count` at once; growth past that
    // is rate limited, shrinking drops the whole excess from the tail.
    fn control_population(&mut self) {
        let target = self.target_count();
        if self.particles.len() > target {
            self.particles.truncate(target);
            return;
        }

        let mut spawned = 0;
        while self.particles.len() < target {
            let seeding = self.particles.len() < self.config.base_count;
            if !seeding && spawned >= self.config.max_spawn_per_frame {
                break;
            }
            let particle = Particle::spawn(
                &mut self.rng,
                &self.config,
                self.intensity,
                self.width,
                self.height,
                seeding,
            );
            self.particles.push(particle);
            if !seeding {
                spawned += 1;
            }
        }
    }

    fn age_ripples(&mut self) {
        let lifetime = self.config.ripple_lifetime;
        for ripple in self.ripples.iter_mut() {
            ripple.age += 1;
        }
        self.ripples.retain(|ripple| !ripple.is_expired(lifetime));
    }

    fn move_particles(&mut self) {
        let ParticleField {
            config,
            rng,
            particles,
            ripples,
            cursor,
            width,
            height,
            ..
        } = self;

        for p in particles.iter_mut() {
            p.drift(config);

            p.hovered = false;
            if let Some(cursor) = cursor {
                let offset = glm::vec2(p.pos[0] - cursor[0], p.pos[1] - cursor[1]);
                let distance = glm::length(&offset);
                if distance < config.hover_radius {
                    p.hovered = true;
                    let strength =
                        (config.hover_radius - distance) / config.hover_radius * config.hover_force;
                    push(p, &offset, distance, strength);
                }
            }

            for ripple in ripples.iter() {
                let (offset, distance) = ripple.offset_to(p.pos[0], p.pos[1]);
                if ripple.on_ring(distance, config.ripple_speed, config.ripple_band) {
                    push(p, &offset, distance, config.ripple_force);
                }
                if ripple.is_fresh() && distance < config.absorb_radius {
                    p.recycle(rng, *width, config.spawn_y);
                }
            }

            p.wrap(rng, *width, *height, config.wrap_margin);
        }
    }
}

// Moves the particle along `offset` by `strength` pixels. A zero-length offset
// has no direction, so nothing happens.
fn push(p: &mut Particle, offset: &glm::DVec2, distance: f64, strength: f64) {
    if distance <= 0.0 {
        return;
    }
    let delta = offset / distance * strength;
    p.pos[0] += delta.x;
    p.pos[1] += delta.y;
}
