// volume.rs - Displaced volume feedback
//
// Sums node heights after integration and turns the sum into an offset of
// the rest level. Display and overlap queries use the offset; the spring
// dynamics never see it.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeFeedback {
    accumulated_height: f32,
    volume_scale: f32,
}

impl VolumeFeedback {
    pub fn new(section_width: f32, width: f32) -> Self {
        Self {
            accumulated_height: 0.0,
            volume_scale: section_width / width,
        }
    }

    /// Replace the running sum with this tick's total.
    pub fn accumulate<I>(&mut self, heights: I)
    where
        I: IntoIterator<Item = f32>,
    {
        self.accumulated_height = heights.into_iter().sum();
    }

    pub fn accumulated_height(&self) -> f32 {
        self.accumulated_height
    }

    pub fn volume_scale(&self) -> f32 {
        self.volume_scale
    }

    /// Correction subtracted from the nominal rest line.
    pub fn baseline_offset(&self) -> f32 {
        self.accumulated_height * self.volume_scale
    }

    pub fn reset(&mut self) {
        self.accumulated_height = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_scales_sum() {
        let mut volume = VolumeFeedback::new(10.0, 100.0);
        volume.accumulate([1.0, 2.0, 3.0, -1.0]);
        assert_eq!(volume.accumulated_height(), 5.0);
        assert!((volume.baseline_offset() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_accumulate_does_not_carry_over() {
        let mut volume = VolumeFeedback::new(10.0, 100.0);
        volume.accumulate([4.0, 4.0]);
        volume.accumulate([1.0]);
        assert_eq!(volume.accumulated_height(), 1.0);

        volume.reset();
        assert_eq!(volume.baseline_offset(), 0.0);
    }
}
