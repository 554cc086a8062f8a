// impact.rs - Splash deduplication
//
// A body overlapping the liquid for many frames splashes once. It is
// tracked from the frame its bottom first dips below the surface line
// until it stops overlapping.

use std::collections::HashSet;

use log::trace;

use super::SurfaceField;

/// Opaque identity of a colliding body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

/// What the tracker needs to know about a body on an overlap frame.
/// World space, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub x: f32,
    /// Lowest point of the body.
    pub bottom: f32,
    /// Downward speed, in surface velocity units (per tick).
    pub vertical_velocity: f32,
}

#[derive(Debug, Default)]
pub struct ImpactTracker {
    active: HashSet<BodyHandle>,
}

impl ImpactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report that `handle` overlaps the liquid this frame.
    ///
    /// On the first frame the body is below `baseline_y` since it last
    /// entered, splashes the field at the body's x and returns true.
    pub fn notify_overlap(
        &mut self,
        handle: BodyHandle,
        body: &BodyState,
        baseline_y: f32,
        field: &mut SurfaceField,
    ) -> bool {
        if self.active.contains(&handle) || body.bottom <= baseline_y {
            return false;
        }

        let location = field.location_of(body.x);
        field.splash(location, body.vertical_velocity);
        self.active.insert(handle);
        trace!(
            "impact: body {} entered at node {} ({:.3})",
            handle.0, location, body.vertical_velocity
        );
        true
    }

    /// Report that `handle` no longer overlaps. Unknown handles are ignored.
    pub fn notify_exit(&mut self, handle: BodyHandle) -> bool {
        self.active.remove(&handle)
    }

    pub fn is_tracked(&self, handle: BodyHandle) -> bool {
        self.active.contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASELINE: f32 = 225.0;

    fn field() -> SurfaceField {
        SurfaceField::new(300.0, 3.0, 0.7, 0.01, 0.7, 0.5)
            .unwrap()
            .with_left(50.0)
    }

    fn below(x: f32) -> BodyState {
        BodyState { x, bottom: BASELINE + 4.0, vertical_velocity: 6.0 }
    }

    fn total_velocity(field: &SurfaceField) -> f32 {
        field.nodes().iter().map(|n| n.velocity).sum()
    }

    #[test]
    fn test_one_splash_per_episode() {
        let mut field = field();
        let mut tracker = ImpactTracker::new();
        let ball = BodyHandle(7);
        let state = below(200.0);

        let mut splashes = 0;
        splashes += tracker.notify_overlap(ball, &state, BASELINE, &mut field) as u32;
        splashes += tracker.notify_overlap(ball, &state, BASELINE, &mut field) as u32;
        splashes += tracker.notify_overlap(ball, &state, BASELINE, &mut field) as u32;
        assert!(tracker.notify_exit(ball));
        splashes += tracker.notify_overlap(ball, &state, BASELINE, &mut field) as u32;

        assert_eq!(splashes, 2);
        assert_eq!(total_velocity(&field), 12.0);
        assert!(tracker.is_tracked(ball));
    }

    #[test]
    fn test_splash_lands_at_body_location() {
        let mut field = field();
        let mut tracker = ImpactTracker::new();
        let state = below(200.0);

        assert!(tracker.notify_overlap(BodyHandle(1), &state, BASELINE, &mut field));
        let index = field.location_of(200.0) as usize;
        assert_eq!(field.velocity_at(index).unwrap(), 6.0);
    }

    #[test]
    fn test_overlap_above_baseline_waits() {
        let mut field = field();
        let mut tracker = ImpactTracker::new();
        let ball = BodyHandle(3);
        let skimming = BodyState { bottom: BASELINE - 1.0, ..below(120.0) };

        assert!(!tracker.notify_overlap(ball, &skimming, BASELINE, &mut field));
        assert!(!tracker.is_tracked(ball));
        assert_eq!(total_velocity(&field), 0.0);

        assert!(tracker.notify_overlap(ball, &below(120.0), BASELINE, &mut field));
        assert!(tracker.is_tracked(ball));
    }

    #[test]
    fn test_exit_unknown_handle_is_noop() {
        let mut tracker = ImpactTracker::new();
        assert!(!tracker.notify_exit(BodyHandle(42)));
        assert!(!tracker.notify_exit(BodyHandle(42)));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_bodies_tracked_independently() {
        let mut field = field();
        let mut tracker = ImpactTracker::new();
        let (a, b) = (BodyHandle(1), BodyHandle(2));

        assert!(tracker.notify_overlap(a, &below(100.0), BASELINE, &mut field));
        assert!(tracker.notify_overlap(b, &below(250.0), BASELINE, &mut field));
        assert_eq!(tracker.len(), 2);

        tracker.notify_exit(a);
        assert!(!tracker.is_tracked(a));
        assert!(!tracker.notify_overlap(b, &below(250.0), BASELINE, &mut field));
    }

    #[test]
    fn test_offscreen_body_is_tracked_without_splash() {
        let mut field = field();
        let mut tracker = ImpactTracker::new();

        // Far right of the field: index is out of range, splash is dropped
        assert!(tracker.notify_overlap(BodyHandle(9), &below(1000.0), BASELINE, &mut field));
        assert_eq!(total_velocity(&field), 0.0);
        assert!(tracker.is_tracked(BodyHandle(9)));
    }
}
