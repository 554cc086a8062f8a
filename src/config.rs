// config.rs - Surface and pond configuration
//
// Validated once at construction. Defaults match the tuned values
// of the original water demo (300px wide, 50px deep).

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurfaceError};
use crate::sim::MAX_NODES;

/// How the spread pass treats the two end nodes of the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Node 0 couples to its right neighbour, the last node is left alone.
    #[default]
    OneSided,
    /// Both ends couple to their single inner neighbour.
    Reflective,
    /// Both ends are pinned at rest.
    Fixed,
    /// Both ends follow their inner neighbour (zero gradient).
    Absorbing,
}

/// Parameters of one surface field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Width of the liquid body in world units.
    pub width: f32,
    /// The width is split into `100 / resolution` sections.
    pub resolution: f32,
    /// Per-step velocity decay, in (0, 1].
    pub damping: f32,
    /// Restoring force toward rest height.
    pub tension: f32,
    /// Neighbour coupling (wave propagation speed).
    pub spread: f32,
    /// Fraction of the body filled with liquid, in [0, 1].
    pub height: f32,
    pub boundary: Boundary,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            resolution: 3.0,
            damping: 0.7,
            tension: 0.01,
            spread: 0.7,
            height: 0.5,
            boundary: Boundary::OneSided,
        }
    }
}

impl SurfaceConfig {
    /// Distance between neighbouring nodes.
    ///
    /// Equal to `width / (100 / resolution)`, evaluated without the
    /// intermediate division so round resolutions give round spacings.
    pub fn section_width(&self) -> f32 {
        self.width * self.resolution / 100.0
    }

    /// Number of nodes needed to span the width, both edges included.
    /// Saturates for configurations `validate` rejects.
    pub fn node_count(&self) -> usize {
        let spans = (self.width / self.section_width()).ceil();
        (spans as usize).saturating_add(1)
    }

    pub fn validate(&self) -> Result<()> {
        positive("width", self.width)?;
        positive("resolution", self.resolution)?;
        positive("tension", self.tension)?;
        positive("spread", self.spread)?;

        if !self.damping.is_finite() || self.damping <= 0.0 || self.damping > 1.0 {
            return Err(SurfaceError::config(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if !self.height.is_finite() || !(0.0..=1.0).contains(&self.height) {
            return Err(SurfaceError::config(format!(
                "height must be in [0, 1], got {}",
                self.height
            )));
        }

        let section = self.section_width();
        if !section.is_finite() || section <= 0.0 {
            return Err(SurfaceError::config(format!(
                "section width must be positive, got {}",
                section
            )));
        }

        // Bounded as a float, the usize cast saturates
        let spans = (self.width / section).ceil();
        if !spans.is_finite() || spans + 1.0 > MAX_NODES as f32 {
            return Err(SurfaceError::config(format!(
                "surface needs {} nodes, limit is {}",
                spans + 1.0,
                MAX_NODES
            )));
        }
        Ok(())
    }

    /// Decode a partial JSON config; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SurfaceError::config(format!("invalid surface config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Parameters of a pond: a surface field with a physical depth and the
/// gravity applied to bodies dropped into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PondConfig {
    pub surface: SurfaceConfig,
    /// Height of the pond rectangle in world units.
    pub depth: f32,
    /// Downward acceleration of bodies, world units / s².
    pub gravity: f32,
}

impl Default for PondConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            depth: 50.0,
            gravity: 400.0,
        }
    }
}

impl PondConfig {
    pub fn validate(&self) -> Result<()> {
        self.surface.validate()?;
        positive("depth", self.depth)?;
        if !self.gravity.is_finite() {
            return Err(SurfaceError::config("gravity must be finite"));
        }
        Ok(())
    }

    /// Decode a partial JSON config; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SurfaceError::config(format!("invalid pond config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SurfaceError::config(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SurfaceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.section_width(), 9.0);
        assert_eq!(config.node_count(), 35);
    }

    #[test]
    fn test_rejects_non_positive_coefficients() {
        for config in [
            SurfaceConfig { width: 0.0, ..Default::default() },
            SurfaceConfig { resolution: -1.0, ..Default::default() },
            SurfaceConfig { tension: 0.0, ..Default::default() },
            SurfaceConfig { spread: -0.5, ..Default::default() },
            SurfaceConfig { damping: 0.0, ..Default::default() },
            SurfaceConfig { damping: 1.5, ..Default::default() },
            SurfaceConfig { height: 2.0, ..Default::default() },
            SurfaceConfig { width: f32::NAN, ..Default::default() },
        ] {
            assert!(
                matches!(config.validate(), Err(SurfaceError::Configuration(_))),
                "accepted {:?}",
                config
            );
        }
    }

    #[test]
    fn test_damping_of_one_is_allowed() {
        let config = SurfaceConfig { damping: 1.0, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SurfaceConfig =
            serde_json::from_str(r#"{ "width": 120.0, "boundary": "reflective" }"#).unwrap();
        assert_eq!(config.width, 120.0);
        assert_eq!(config.boundary, Boundary::Reflective);
        assert_eq!(config.damping, 0.7);
        assert_eq!(config.spread, 0.7);
    }

    #[test]
    fn test_tiny_resolution_is_a_config_error() {
        let config = SurfaceConfig { resolution: 1.0e-20, ..Default::default() };
        assert!(matches!(config.validate(), Err(SurfaceError::Configuration(_))));
        assert_eq!(config.node_count(), usize::MAX);
    }

    #[test]
    fn test_node_count_is_bounded() {
        // 1000 sections
        let fine = SurfaceConfig { resolution: 0.1, ..Default::default() };
        assert!(fine.validate().is_ok());
        assert_eq!(fine.node_count(), 1001);

        let too_fine = SurfaceConfig { resolution: 0.01, ..Default::default() };
        assert!(matches!(too_fine.validate(), Err(SurfaceError::Configuration(_))));
    }

    #[test]
    fn test_pond_config_from_json() {
        let config = PondConfig::from_json(
            r#"{ "depth": 80.0, "surface": { "resolution": 5.0, "boundary": "fixed" } }"#,
        )
        .unwrap();
        assert_eq!(config.depth, 80.0);
        assert_eq!(config.gravity, 400.0);
        assert_eq!(config.surface.resolution, 5.0);
        assert_eq!(config.surface.boundary, Boundary::Fixed);
        assert_eq!(config.surface.width, 300.0);
    }

    #[test]
    fn test_bad_json_is_a_config_error() {
        assert!(matches!(
            PondConfig::from_json("{ depth: "),
            Err(SurfaceError::Configuration(_))
        ));
        assert!(matches!(
            SurfaceConfig::from_json(r#"{ "damping": 3.0 }"#),
            Err(SurfaceError::Configuration(_))
        ));
    }

    #[test]
    fn test_pond_rejects_zero_depth() {
        let config = PondConfig { depth: 0.0, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
