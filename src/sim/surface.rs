// surface.rs - 1-D liquid surface
//
// A left-to-right chain of spring nodes at fixed spacing. Each tick:
//   1. queued splashes are applied
//   2. height differences spread into neighbour velocities
//   3. every node integrates
//   4. the summed height feeds the volume offset
// Spreading must finish before any height changes, so every node reads
// the same snapshot of its neighbours.

use log::{debug, trace};

use super::{MAX_NODES, SpringNode, VolumeFeedback};
use crate::config::{Boundary, SurfaceConfig};
use crate::error::{Result, SurfaceError};

pub struct SurfaceField {
    nodes: Vec<SpringNode>,
    pending: Vec<(i32, f32)>,

    width: f32,
    section_width: f32,
    spread: f32,
    boundary: Boundary,

    // World x of node 0
    left: f32,

    // Rest level, as a fraction of the body's depth measured from the top
    nominal_fraction: f32,
    added_volume: f64,

    volume: VolumeFeedback,
}

impl SurfaceField {
    pub fn new(
        width: f32,
        resolution: f32,
        damping: f32,
        tension: f32,
        spread: f32,
        height_fraction: f32,
    ) -> Result<Self> {
        Self::from_config(&SurfaceConfig {
            width,
            resolution,
            damping,
            tension,
            spread,
            height: height_fraction,
            ..SurfaceConfig::default()
        })
    }

    pub fn from_config(config: &SurfaceConfig) -> Result<Self> {
        config.validate()?;

        let count = config.node_count();
        if count < 2 {
            return Err(SurfaceError::config(format!(
                "surface needs at least 2 nodes, got {}",
                count
            )));
        }
        if count > MAX_NODES {
            return Err(SurfaceError::config(format!(
                "surface needs {} nodes, limit is {}",
                count, MAX_NODES
            )));
        }

        let section_width = config.section_width();
        debug!(
            "surface: {} nodes, {:.2} apart, {:?} boundary",
            count, section_width, config.boundary
        );

        Ok(Self {
            nodes: vec![SpringNode::new(config.damping, config.tension); count],
            pending: Vec::new(),
            width: config.width,
            section_width,
            spread: config.spread,
            boundary: config.boundary,
            left: 0.0,
            nominal_fraction: 1.0 - config.height,
            added_volume: 0.0,
            volume: VolumeFeedback::new(section_width, config.width),
        })
    }

    /// Place node 0 at world x `left`.
    pub fn with_left(mut self, left: f32) -> Self {
        self.left = left;
        self
    }

    pub fn set_left(&mut self, left: f32) {
        self.left = left;
    }

    pub fn set_boundary(&mut self, boundary: Boundary) {
        self.boundary = boundary;
    }

    /// Advance one tick.
    ///
    /// `dt` is accepted for the caller's fixed-step loop; the spring law is
    /// per tick and does not scale with it.
    pub fn step(&mut self, _dt: f32) {
        self.apply_pending();
        self.spread_wave();

        for node in &mut self.nodes {
            node.update();
        }
        self.settle_ends();

        self.volume.accumulate(self.nodes.iter().map(|n| n.height));
    }

    /// Convert neighbour height differences into velocity.
    ///
    /// Heights are read-only here, so sequential iteration is equivalent
    /// to a simultaneous update.
    pub fn spread_wave(&mut self) {
        let n = self.nodes.len();
        let s = self.spread;
        let pinned_ends = matches!(self.boundary, Boundary::Fixed | Boundary::Absorbing);

        if !pinned_ends {
            let dh = self.nodes[1].height - self.nodes[0].height;
            self.nodes[0].velocity += s * dh;
        }

        for i in 1..n - 1 {
            let h = self.nodes[i].height;
            let right = s * (self.nodes[i + 1].height - h);
            let left = s * (self.nodes[i - 1].height - h);
            self.nodes[i].velocity += right + left;
        }

        if self.boundary == Boundary::Reflective {
            let dh = self.nodes[n - 2].height - self.nodes[n - 1].height;
            self.nodes[n - 1].velocity += s * dh;
        }
    }

    fn settle_ends(&mut self) {
        let n = self.nodes.len();
        match self.boundary {
            Boundary::OneSided | Boundary::Reflective => {}
            Boundary::Fixed => {
                self.nodes[0].reset();
                self.nodes[n - 1].reset();
            }
            Boundary::Absorbing => {
                let (first, last) = (self.nodes[1], self.nodes[n - 2]);
                self.nodes[0].height = first.height;
                self.nodes[0].velocity = first.velocity;
                self.nodes[n - 1].height = last.height;
                self.nodes[n - 1].velocity = last.velocity;
            }
        }
    }

    /// Add `velocity` to node `index`. Indices outside the chain are ignored.
    pub fn splash(&mut self, index: i32, velocity: f32) {
        match self.index(index) {
            Some(i) => {
                self.nodes[i].velocity += velocity;
                trace!("splash: node {} += {:.3}", i, velocity);
            }
            None => trace!("splash: ignored index {}", index),
        }
    }

    /// Defer a splash to the start of the next step.
    pub fn queue_splash(&mut self, index: i32, velocity: f32) {
        self.pending.push((index, velocity));
    }

    pub fn pending_splashes(&self) -> usize {
        self.pending.len()
    }

    fn apply_pending(&mut self) {
        let mut pending = std::mem::take(&mut self.pending);
        for &(index, velocity) in &pending {
            self.splash(index, velocity);
        }
        // Keep the allocation for the next tick
        pending.clear();
        self.pending = pending;
    }

    fn index(&self, index: i32) -> Option<usize> {
        usize::try_from(index).ok().filter(|&i| i < self.nodes.len())
    }

    /// Node index nearest to world x. Not clamped.
    pub fn location_of(&self, x: f32) -> i32 {
        ((x - self.left) / self.width * self.nodes.len() as f32).round() as i32
    }

    pub fn height_at(&self, index: usize) -> Result<f32> {
        self.node(index).map(|n| n.height)
    }

    pub fn velocity_at(&self, index: usize) -> Result<f32> {
        self.node(index).map(|n| n.velocity)
    }

    fn node(&self, index: usize) -> Result<&SpringNode> {
        self.nodes.get(index).ok_or(SurfaceError::IndexOutOfRange {
            index,
            len: self.nodes.len(),
        })
    }

    pub fn nodes(&self) -> &[SpringNode] {
        &self.nodes
    }

    /// `(world x, height)` for every node, left to right.
    pub fn samples(&self) -> Vec<(f32, f32)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (self.left + i as f32 * self.section_width, n.height))
            .collect()
    }

    pub fn add_volume(&mut self, volume: f32) {
        self.added_volume += volume as f64;
        debug!(
            "surface: volume {:+.2}, baseline fraction now {:.4}",
            volume,
            self.baseline_fraction()
        );
    }

    pub fn remove_volume(&mut self, volume: f32) {
        self.add_volume(-volume);
    }

    /// Fraction of the depth above the rest line. Shrinks as volume is added.
    pub fn baseline_fraction(&self) -> f32 {
        (self.nominal_fraction as f64 - self.added_volume / self.width as f64) as f32
    }

    pub fn baseline_offset(&self) -> f32 {
        self.volume.baseline_offset()
    }

    pub fn volume(&self) -> &VolumeFeedback {
        &self.volume
    }

    /// Back to a flat surface. Added volume is kept.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
        self.pending.clear();
        self.volume.reset();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn section_width(&self) -> f32 {
        self.section_width
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }
}
