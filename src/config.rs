// Tuning constants for the snow field, loadable from a plain JS object.
//
// Every field has a default, so the host may pass `{}`, `undefined`, or only
// the handful of values it wants to change.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::SnowError;

// Upper bound for `baseCount` and `countPerIntensity`.
pub const MAX_PARTICLES: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    // Particle count at intensity 0; also the size of the initial seeding.
    pub base_count: usize,
    // Extra particles added at intensity 1.
    pub count_per_intensity: f64,
    // How many particles may be appended in one frame while growing.
    pub max_spawn_per_frame: usize,

    pub radius_min: f64,
    pub radius_max: f64,
    pub radius_per_intensity: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    pub speed_per_intensity: f64,
    pub wind_max: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,

    // Phase advance per frame, radians.
    pub wobble_step: f64,
    pub sway: f64,
    pub wind_scale: f64,

    pub hover_radius: f64,
    pub hover_force: f64,

    // Ring growth in pixels per frame of age.
    pub ripple_speed: f64,
    // Half-width of the band around the ring that gets pushed.
    pub ripple_band: f64,
    pub ripple_force: f64,
    // Frames a ripple stays alive.
    pub ripple_lifetime: u32,
    // Particles this close to a fresh ripple are sent back to the top.
    pub absorb_radius: f64,

    // y for particles that fall in from above.
    pub spawn_y: f64,
    // Distance past each edge before a particle wraps.
    pub wrap_margin: f64,

    pub ripple_stroke_alpha: f64,
    pub ripple_line_width: f64,

    // Wrap every frame in a `console.time` span.
    pub profile_frames: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            base_count: 50,
            count_per_intensity: 400.0,
            max_spawn_per_frame: 1,
            radius_min: 1.0,
            radius_max: 3.0,
            radius_per_intensity: 2.5,
            speed_min: 0.5,
            speed_max: 1.5,
            speed_per_intensity: 2.0,
            wind_max: 1.0,
            opacity_min: 0.3,
            opacity_max: 0.8,
            wobble_step: 0.05,
            sway: 0.5,
            wind_scale: 0.5,
            hover_radius: 100.0,
            hover_force: 3.0,
            ripple_speed: 15.0,
            ripple_band: 20.0,
            ripple_force: 5.0,
            ripple_lifetime: 30,
            absorb_radius: 50.0,
            spawn_y: -20.0,
            wrap_margin: 10.0,
            ripple_stroke_alpha: 0.1,
            ripple_line_width: 2.0,
            profile_frames: false,
        }
    }
}

impl FieldConfig {
    // Reads a config from a JS value. `undefined` and `null` give the defaults.
    pub fn from_js(value: JsValue) -> Result<FieldConfig, SnowError> {
        if value.is_undefined() || value.is_null() {
            return Ok(FieldConfig::default());
        }
        let config: FieldConfig = serde_wasm_bindgen::from_value(value)
            .map_err(|err| SnowError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SnowError> {
        let values = [
            ("countPerIntensity", self.count_per_intensity),
            ("radiusMin", self.radius_min),
            ("radiusMax", self.radius_max),
            ("radiusPerIntensity", self.radius_per_intensity),
            ("speedMin", self.speed_min),
            ("speedMax", self.speed_max),
            ("speedPerIntensity", self.speed_per_intensity),
            ("windMax", self.wind_max),
            ("opacityMin", self.opacity_min),
            ("opacityMax", self.opacity_max),
            ("wobbleStep", self.wobble_step),
            ("sway", self.sway),
            ("windScale", self.wind_scale),
            ("hoverRadius", self.hover_radius),
            ("hoverForce", self.hover_force),
            ("rippleSpeed", self.ripple_speed),
            ("rippleBand", self.ripple_band),
            ("rippleForce", self.ripple_force),
            ("absorbRadius", self.absorb_radius),
            ("wrapMargin", self.wrap_margin),
            ("rippleStrokeAlpha", self.ripple_stroke_alpha),
            ("rippleLineWidth", self.ripple_line_width),
        ];
        for (name, value) in values.iter() {
            if !value.is_finite() || *value < 0.0 {
                return Err(SnowError::Config(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        if !self.spawn_y.is_finite() {
            return Err(SnowError::Config("spawnY must be finite".to_owned()));
        }
        if self.radius_min > self.radius_max
            || self.speed_min > self.speed_max
            || self.opacity_min > self.opacity_max
        {
            return Err(SnowError::Config(
                "range minimums must not exceed their maximums".to_owned(),
            ));
        }
        if self.opacity_max > 1.0 {
            return Err(SnowError::Config("opacityMax must be at most 1".to_owned()));
        }
        if self.ripple_lifetime == 0 {
            return Err(SnowError::Config("rippleLifetime must be at least 1".to_owned()));
        }
        if self.base_count > MAX_PARTICLES || self.count_per_intensity > MAX_PARTICLES as f64 {
            return Err(SnowError::Config(format!(
                "baseCount and countPerIntensity must be at most {}",
                MAX_PARTICLES
            )));
        }
        if self.max_spawn_per_frame == 0 {
            return Err(SnowError::Config("maxSpawnPerFrame must be at least 1".to_owned()));
        }
        Ok(())
    }

    // Particle count the field converges to at the given intensity. Never
    // more than two full populations, even for a config that skipped
    // validation.
    pub fn target_count(&self, intensity: f64) -> usize {
        let extra = (intensity * self.count_per_intensity).floor().max(0.0) as usize;
        self.base_count.saturating_add(extra).min(2 * MAX_PARTICLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn target_count_follows_intensity() {
        let config = FieldConfig::default();
        assert_eq!(config.target_count(0.0), 50);
        assert_eq!(config.target_count(0.5), 250);
        assert_eq!(config.target_count(1.0), 450);
        assert_eq!(config.target_count(0.0024), 50);
    }

    #[test]
    fn rejects_inverted_ranges() {
        let config = FieldConfig {
            speed_min: 2.0,
            speed_max: 1.0,
            ..FieldConfig::default()
        };
        assert!(matches!(config.validate(), Err(SnowError::Config(_))));
    }

    #[test]
    fn rejects_non_finite_values() {
        let config = FieldConfig {
            hover_radius: f64::NAN,
            ..FieldConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hoverRadius"));
    }

    #[test]
    fn rejects_oversized_populations() {
        let config = FieldConfig {
            count_per_intensity: 1e18,
            ..FieldConfig::default()
        };
        assert!(matches!(config.validate(), Err(SnowError::Config(_))));

        let config = FieldConfig {
            base_count: usize::MAX - 10,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FieldConfig {
            base_count: MAX_PARTICLES,
            count_per_intensity: MAX_PARTICLES as f64,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn target_count_is_bounded() {
        let config = FieldConfig {
            base_count: usize::MAX - 10,
            count_per_intensity: 1e18,
            ..FieldConfig::default()
        };
        assert_eq!(config.target_count(0.0), 2 * MAX_PARTICLES);
        assert_eq!(config.target_count(1.0), 2 * MAX_PARTICLES);
    }

    #[test]
    fn rejects_zero_lifetime() {
        let config = FieldConfig {
            ripple_lifetime: 0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
