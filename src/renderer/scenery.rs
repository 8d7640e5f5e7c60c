//! Decorative scene layout (clouds, bushes, street lamps)
//!
//! Generated once per session from a seed so the same seed always yields the
//! same skyline.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Drawn decoration sizes and offsets above the ground line (scale units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorSizes {
    pub cloud: Vec2,
    pub bush: f32,
    pub bush_rise: f32,
    pub lamp: Vec2,
    pub lamp_rise: f32,
}

impl Default for DecorSizes {
    fn default() -> Self {
        Self {
            cloud: Vec2::new(180.0, 150.0),
            bush: 175.0,
            bush_rise: 115.0,
            lamp: Vec2::new(160.0, 150.0),
            lamp_rise: 139.0,
        }
    }
}

impl DecorSizes {
    pub fn classic() -> Self {
        Self {
            cloud: Vec2::new(100.0, 40.0),
            bush_rise: 112.0,
            lamp_rise: 141.0,
            ..Self::default()
        }
    }
}

/// Placement rules for decorative sprites (world units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneryConfig {
    pub cloud_count: usize,
    pub cloud_start_x: f32,
    pub cloud_spacing: f32,
    /// Clouds get a random y in `cloud_min_y .. cloud_min_y + cloud_y_range`
    pub cloud_min_y: f32,
    pub cloud_y_range: f32,
    pub bush_count: usize,
    pub bush_start_x: f32,
    pub bush_spacing: f32,
    pub lamps: Vec<f32>,
    /// Fraction of the camera scroll applied to each far layer (1.0 = ground)
    pub background_parallax: f32,
    pub cloud_parallax: f32,
    pub sizes: DecorSizes,
}

impl Default for SceneryConfig {
    fn default() -> Self {
        Self {
            cloud_count: 50,
            cloud_start_x: 181.0,
            cloud_spacing: 310.0,
            cloud_min_y: -80.0,
            cloud_y_range: 200.0,
            bush_count: 20,
            bush_start_x: 100.0,
            bush_spacing: 270.0,
            lamps: vec![600.0, 1400.0, 2000.0, 2800.0],
            background_parallax: 0.1,
            cloud_parallax: 0.15,
            sizes: DecorSizes::default(),
        }
    }
}

impl SceneryConfig {
    /// Sparser sky of the classic variant
    pub fn classic() -> Self {
        Self {
            cloud_count: 20,
            cloud_start_x: 300.0,
            cloud_spacing: 400.0,
            cloud_min_y: 50.0,
            cloud_y_range: 100.0,
            bush_start_x: 400.0,
            bush_spacing: 250.0,
            cloud_parallax: 0.1,
            sizes: DecorSizes::classic(),
            ..Self::default()
        }
    }
}

/// Concrete decorative layout
#[derive(Debug, Clone, PartialEq)]
pub struct Scenery {
    pub clouds: Vec<Vec2>,
    pub bushes: Vec<f32>,
    pub lamps: Vec<f32>,
    pub background_parallax: f32,
    pub cloud_parallax: f32,
    pub sizes: DecorSizes,
}

impl Scenery {
    pub fn generate(config: &SceneryConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = (0..config.cloud_count)
            .map(|i| {
                let jitter = if config.cloud_y_range > 0.0 {
                    rng.random_range(0.0..config.cloud_y_range)
                } else {
                    0.0
                };
                Vec2::new(
                    config.cloud_start_x + i as f32 * config.cloud_spacing,
                    config.cloud_min_y + jitter,
                )
            })
            .collect();
        let bushes = (0..config.bush_count)
            .map(|i| config.bush_start_x + i as f32 * config.bush_spacing)
            .collect();

        Self {
            clouds,
            bushes,
            lamps: config.lamps.clone(),
            background_parallax: config.background_parallax,
            cloud_parallax: config.cloud_parallax,
            sizes: config.sizes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sky() {
        let config = SceneryConfig::default();
        assert_eq!(Scenery::generate(&config, 7), Scenery::generate(&config, 7));
        assert_ne!(
            Scenery::generate(&config, 7).clouds,
            Scenery::generate(&config, 8).clouds
        );
    }

    #[test]
    fn test_placement() {
        let config = SceneryConfig::default();
        let scenery = Scenery::generate(&config, 1);
        assert_eq!(scenery.clouds.len(), 50);
        assert_eq!(scenery.clouds[2].x, 181.0 + 620.0);
        assert!(scenery
            .clouds
            .iter()
            .all(|c| c.y >= -80.0 && c.y < 120.0));
        assert_eq!(scenery.bushes[1], 370.0);
        assert_eq!(scenery.lamps.len(), 4);
        assert_eq!(scenery.sizes.cloud, Vec2::new(180.0, 150.0));
    }

    #[test]
    fn test_classic_decor_sizes() {
        let scenery = Scenery::generate(&SceneryConfig::classic(), 1);
        assert_eq!(scenery.sizes.cloud, Vec2::new(100.0, 40.0));
        assert_eq!(scenery.sizes.bush_rise, 112.0);
        assert_eq!(scenery.sizes.lamp_rise, 141.0);
        assert_eq!(scenery.sizes.bush, SceneryConfig::default().sizes.bush);
    }

    #[test]
    fn test_flat_cloud_band() {
        let config = SceneryConfig {
            cloud_y_range: 0.0,
            ..SceneryConfig::classic()
        };
        let scenery = Scenery::generate(&config, 3);
        assert!(scenery.clouds.iter().all(|c| c.y == 50.0));
    }
}
