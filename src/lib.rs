mod utils;

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod intensity;
pub mod particle;
pub mod renderer;
pub mod ripple;
pub mod surface;

use wasm_bindgen::prelude::*;

pub use canvas::SnowCanvas;
pub use color::Color;
pub use config::FieldConfig;
pub use error::SnowError;
pub use field::ParticleField;
pub use intensity::IntensityRamp;
pub use particle::Particle;
pub use ripple::Ripple;
pub use surface::Surface;
pub use utils::Timer;

#[wasm_bindgen(start)]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging();
    log::info!("snowfield {} loaded", env!("CARGO_PKG_VERSION"));
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}
