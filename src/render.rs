// render.rs - Encode simulation state to output buffers
//
// Output layout (for canvas rendering):
//   surface = [x0, y0, x1, y1, ...]      one point per node, world space
//   bodies  = [x, y, radius, ...]         one triple per body
// Shape generation is left to the host.

use crate::sim::{Bodies, SurfaceField};

pub struct Encoder {
    surface: Vec<f32>,
    bodies: Vec<f32>,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            surface: Vec::new(),
            bodies: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.surface.clear();
        self.bodies.clear();
    }

    /// Encode surface points, displaced from the rest line at `baseline_y`
    pub fn encode_surface(&mut self, field: &SurfaceField, baseline_y: f32) {
        let (left, spacing) = (field.left(), field.section_width());
        for (i, node) in field.nodes().iter().enumerate() {
            self.surface.push(left + i as f32 * spacing);
            self.surface.push(baseline_y + node.height);
        }
    }

    /// Encode bodies to output buffer
    pub fn encode_bodies(&mut self, bodies: &Bodies) {
        for i in 0..bodies.n {
            self.bodies.push(bodies.x[i]);
            self.bodies.push(bodies.y[i]);
            self.bodies.push(bodies.radius[i]);
        }
    }

    pub fn surface(&self) -> &[f32] { &self.surface }
    pub fn bodies(&self) -> &[f32] { &self.bodies }

    pub fn surface_ptr(&self) -> *const f32 { self.surface.as_ptr() }
    pub fn surface_len(&self) -> usize { self.surface.len() }
    pub fn bodies_ptr(&self) -> *const f32 { self.bodies.as_ptr() }
    pub fn bodies_len(&self) -> usize { self.bodies.len() }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
