// spring.rs - Single surface sample
//
// A damped spring holding one height sample relative to the rest level.
// Heights are displacements, never world positions.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringNode {
    pub height: f32,
    pub velocity: f32,
    pub damping: f32,
    pub tension: f32,
}

impl SpringNode {
    pub fn new(damping: f32, tension: f32) -> Self {
        Self {
            height: 0.0,
            velocity: 0.0,
            damping,
            tension,
        }
    }

    /// Integrate one tick.
    ///
    /// Damping is applied twice: once with the restoring force and once on
    /// the result. The effective per-tick decay is `damping²`.
    #[inline]
    pub fn update(&mut self) {
        self.velocity = self.velocity * self.damping + self.tension * -self.height;
        self.velocity *= self.damping;
        self.height += self.velocity;
    }

    /// Return to rest.
    pub fn reset(&mut self) {
        self.height = 0.0;
        self.velocity = 0.0;
    }
}
