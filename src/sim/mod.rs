// sim/ - Liquid surface simulation
//
// One surface field per pond, the bodies falling into it, and the
// tracker turning their overlaps into splashes. Entity stores use
// Structure-of-Arrays with fixed capacities.

mod body;
mod impact;
mod spring;
mod surface;
mod volume;

pub use body::Bodies;
pub use impact::{BodyHandle, BodyState, ImpactTracker};
pub use spring::SpringNode;
pub use surface::SurfaceField;
pub use volume::VolumeFeedback;

use log::{debug, warn};

use crate::config::PondConfig;
use crate::error::Result;
use crate::render::Encoder;

// Capacity limits
pub const MAX_NODES: usize = 4096;
pub const MAX_BODIES: usize = 256;

/// A rectangular body of liquid placed in the world
pub struct Pond {
    // Top-left corner and extent (world space, y down)
    x: f32,
    y: f32,
    width: f32,
    depth: f32,

    gravity: f32,

    // Entities
    field: SurfaceField,
    impacts: ImpactTracker,
    bodies: Bodies,

    // Output
    encoder: Encoder,
}

impl Pond {
    pub fn new(x: f32, y: f32, config: &PondConfig) -> Result<Self> {
        config.validate()?;
        let field = SurfaceField::from_config(&config.surface)?.with_left(x);
        debug!(
            "pond: {}x{} at ({}, {}), {} nodes",
            config.surface.width,
            config.depth,
            x,
            y,
            field.len()
        );

        Ok(Self {
            x,
            y,
            width: config.surface.width,
            depth: config.depth,
            gravity: config.gravity,
            field,
            impacts: ImpactTracker::new(),
            bodies: Bodies::new(),
            encoder: Encoder::new(),
        })
    }

    /// Advance one tick. Returns the number of splashes caused by bodies.
    pub fn tick(&mut self, dt: f32) -> usize {
        self.encoder.clear();

        self.bodies.update(dt, self.gravity);

        // Contacts are resolved before the field steps, so this tick's
        // impulses are spread this tick.
        let baseline = self.baseline_y();
        let mut splashes = 0;
        for i in 0..self.bodies.n {
            let handle = self.bodies.handle[i];
            if self.overlaps(i) {
                let state = self.bodies.state(i, dt);
                if self.impacts.notify_overlap(handle, &state, baseline, &mut self.field) {
                    splashes += 1;
                }
            } else {
                self.impacts.notify_exit(handle);
            }
        }

        // Sunk past the bottom
        let floor = self.y + self.depth;
        let impacts = &mut self.impacts;
        self.bodies.retain(|handle, _, y, r| {
            let sunk = y - r > floor;
            if sunk {
                impacts.notify_exit(handle);
            }
            !sunk
        });

        self.field.step(dt);

        self.encoder.encode_surface(&self.field, self.baseline_y());
        self.encoder.encode_bodies(&self.bodies);

        splashes
    }

    fn overlaps(&self, i: usize) -> bool {
        let (bx, by, r) = (self.bodies.x[i], self.bodies.y[i], self.bodies.radius[i]);
        bx + r >= self.x
            && bx - r <= self.x + self.width
            && by + r >= self.y
            && by - r <= self.y + self.depth
    }

    /// World y of the displayed rest line.
    pub fn baseline_y(&self) -> f32 {
        self.y + self.depth * self.field.baseline_fraction() - self.field.baseline_offset()
    }

    /// Drop a ball at rest. Returns None when the body store is full.
    pub fn drop_body(&mut self, x: f32, y: f32, radius: f32) -> Option<BodyHandle> {
        let handle = self.bodies.spawn(x, y, radius);
        if handle.is_none() {
            warn!("pond: body capacity ({}) reached", MAX_BODIES);
        }
        handle
    }

    /// Queue a splash at world x for the next tick.
    pub fn splash_at(&mut self, x: f32, velocity: f32) {
        let location = self.field.location_of(x);
        self.field.queue_splash(location, velocity);
    }

    pub fn add_volume(&mut self, volume: f32) {
        self.field.add_volume(volume);
    }

    pub fn remove_volume(&mut self, volume: f32) {
        self.field.remove_volume(volume);
    }

    /// Move the pond's top-left corner. The surface keeps its shape.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.field.set_left(x);
    }

    /// Flatten the surface and remove all bodies.
    pub fn reset(&mut self) {
        self.field.reset();
        self.impacts.clear();
        self.bodies.clear();
        self.encoder.clear();
    }

    pub fn field(&self) -> &SurfaceField { &self.field }
    pub fn bodies(&self) -> &Bodies { &self.bodies }
    pub fn impacts(&self) -> &ImpactTracker { &self.impacts }
    pub fn encoder(&self) -> &Encoder { &self.encoder }
}
