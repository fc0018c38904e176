// Controller that slowly builds the snowfall up after the experience starts.
//
// The host ticks it on a fixed interval (100 ms in the page) and feeds
// `value()` into the field. Once the user moves the slider the ramp stops for
// good and the user's value is reported instead.

use wasm_bindgen::prelude::*;

const START: f64 = 0.1;
const STEP: f64 = 0.003;
const MAX: f64 = 1.0;

#[wasm_bindgen]
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityRamp {
    value: f64,
    started: bool,
    overridden: bool,
}

impl Default for IntensityRamp {
    fn default() -> Self {
        IntensityRamp::new()
    }
}

#[wasm_bindgen]
impl IntensityRamp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> IntensityRamp {
        IntensityRamp {
            value: 0.0,
            started: false,
            overridden: false,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden
    }

    // True while ticks still change the value.
    pub fn is_ramping(&self) -> bool {
        self.started && !self.overridden && self.value < MAX
    }

    pub fn start(&mut self) {
        if self.started || self.overridden {
            return;
        }
        self.started = true;
        self.value = START;
        log::info!("snow intensity ramp started");
    }

    // Advances the ramp by one interval and returns the new value.
    pub fn tick(&mut self) -> f64 {
        if self.is_ramping() {
            self.value = (self.value + STEP).min(MAX);
        }
        self.value
    }

    // Hands control to the user. Further ticks leave `value` alone.
    pub fn override_with(&mut self, value: f64) {
        if !self.overridden {
            log::debug!("snow intensity ramp overridden by user");
        }
        self.overridden = true;
        self.value = if value.is_nan() {
            0.0
        } else {
            value.max(0.0).min(MAX)
        };
    }
}
