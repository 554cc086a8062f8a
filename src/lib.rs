use wasm_bindgen::prelude::*;

// ============================================================================
// RIPPLE WORLD - Spring-chain liquid surface with falling bodies
// ============================================================================

pub mod config;
pub mod error;
pub mod render;
pub mod sim;

pub use config::{Boundary, PondConfig, SurfaceConfig};
pub use error::SurfaceError;
pub use sim::{BodyHandle, BodyState, ImpactTracker, Pond, SpringNode, SurfaceField, VolumeFeedback};

#[wasm_bindgen]
pub struct RippleWorld {
    pond: Pond,
}

#[wasm_bindgen]
impl RippleWorld {
    /// Pond with default tuning, top-left at (x, y), y down.
    #[wasm_bindgen(constructor)]
    pub fn new(x: f32, y: f32, width: f32, depth: f32) -> std::result::Result<RippleWorld, JsError> {
        let config = PondConfig {
            surface: SurfaceConfig { width, ..SurfaceConfig::default() },
            depth,
            ..PondConfig::default()
        };
        Ok(Self { pond: Pond::new(x, y, &config)? })
    }

    /// Pond from a partial JSON `PondConfig`; missing fields take defaults.
    pub fn with_config(x: f32, y: f32, config: &str) -> std::result::Result<RippleWorld, JsError> {
        let config = PondConfig::from_json(config)?;
        Ok(Self { pond: Pond::new(x, y, &config)? })
    }

    /// Returns the number of splashes this tick.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.pond.tick(dt) as u32
    }

    pub fn drop_body(&mut self, x: f32, y: f32, radius: f32) -> bool {
        self.pond.drop_body(x, y, radius).is_some()
    }

    pub fn splash_at(&mut self, x: f32, velocity: f32) {
        self.pond.splash_at(x, velocity);
    }

    pub fn add_volume(&mut self, volume: f32) { self.pond.add_volume(volume); }
    pub fn remove_volume(&mut self, volume: f32) { self.pond.remove_volume(volume); }
    pub fn reset(&mut self) { self.pond.reset(); }
    pub fn move_to(&mut self, x: f32, y: f32) { self.pond.move_to(x, y); }

    /// Copy of the node heights, left to right.
    pub fn surface_heights(&self) -> js_sys::Float32Array {
        let heights: Vec<f32> = self.pond.field().nodes().iter().map(|n| n.height).collect();
        js_sys::Float32Array::from(&heights[..])
    }

    // Accessors for WASM
    pub fn surface_ptr(&self) -> *const f32 { self.pond.encoder().surface_ptr() }
    pub fn surface_len(&self) -> usize { self.pond.encoder().surface_len() }
    pub fn bodies_ptr(&self) -> *const f32 { self.pond.encoder().bodies_ptr() }
    pub fn bodies_len(&self) -> usize { self.pond.encoder().bodies_len() }
    pub fn baseline_y(&self) -> f32 { self.pond.baseline_y() }
    pub fn node_count(&self) -> usize { self.pond.field().len() }
}
