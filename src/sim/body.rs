// body.rs - Falling balls
//
// Structure-of-Arrays layout, same as the other entity stores.
// World space, y grows downward. Velocities are per second.

use super::{BodyHandle, BodyState, MAX_BODIES};

pub struct Bodies {
    // Center
    pub x: [f32; MAX_BODIES],
    pub y: [f32; MAX_BODIES],

    // Vertical velocity only, balls drop straight
    pub vy: [f32; MAX_BODIES],

    pub radius: [f32; MAX_BODIES],
    pub handle: [BodyHandle; MAX_BODIES],

    // Count
    pub n: usize,

    next_handle: u32,
}

impl Bodies {
    pub fn new() -> Self {
        Self {
            x: [0.0; MAX_BODIES],
            y: [0.0; MAX_BODIES],
            vy: [0.0; MAX_BODIES],
            radius: [0.0; MAX_BODIES],
            handle: [BodyHandle(0); MAX_BODIES],
            n: 0,
            next_handle: 0,
        }
    }

    pub fn clear(&mut self) {
        self.n = 0;
    }

    /// Spawn a ball at rest. Returns None when full.
    pub fn spawn(&mut self, x: f32, y: f32, radius: f32) -> Option<BodyHandle> {
        if self.n >= MAX_BODIES { return None; }

        let i = self.n;
        let handle = BodyHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);

        self.x[i] = x;
        self.y[i] = y;
        self.vy[i] = 0.0;
        self.radius[i] = radius;
        self.handle[i] = handle;
        self.n += 1;

        Some(handle)
    }

    /// Apply gravity and move
    pub fn update(&mut self, dt: f32, gravity: f32) {
        for i in 0..self.n {
            self.vy[i] += gravity * dt;
            self.y[i] += self.vy[i] * dt;
        }
    }

    /// Collision view of body `i`. Velocity is the distance covered this
    /// tick, the unit the surface field integrates in.
    pub fn state(&self, i: usize, dt: f32) -> BodyState {
        BodyState {
            x: self.x[i],
            bottom: self.y[i] + self.radius[i],
            vertical_velocity: self.vy[i] * dt,
        }
    }

    /// Drop every body for which `keep` returns false, preserving order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(BodyHandle, f32, f32, f32) -> bool,
    {
        let mut write = 0;

        for read in 0..self.n {
            if !keep(self.handle[read], self.x[read], self.y[read], self.radius[read]) {
                continue;
            }

            self.x[write] = self.x[read];
            self.y[write] = self.y[read];
            self.vy[write] = self.vy[read];
            self.radius[write] = self.radius[read];
            self.handle[write] = self.handle[read];
            write += 1;
        }

        self.n = write;
    }
}

impl Default for Bodies {
    fn default() -> Self {
        Self::new()
    }
}
