//! Tunables for the node-field simulation, fixed at construction.
//!
//! The host picks a device class once (mobile/desktop) and the rest of the
//! crate reads whichever [`PerfTier`] that selects. Everything here is plain
//! data; [`NodesConfig::validate`] is the only fallible operation in the
//! crate and runs before any simulation state is built.

use thiserror::Error;

/// Rejections produced by [`NodesConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("spring_damping must be in [0, 1), got {0}")]
    DampingOutOfRange(f32),
    #[error("{0} weights must sum to 1, got {1}")]
    BadWeights(&'static str, f32),
    #[error("size tier {0} has min {1} greater than max {2}")]
    InvertedSizeRange(usize, f32, f32),
    #[error("connection opacity must be in (0, 1], got {0}")]
    OpacityOutOfRange(f32),
    #[error("fade_in + fade_out must not exceed 1, got {0}")]
    FadeOverlap(f32),
}

/// Node/particle budget and feature switches for one device class.
#[derive(Clone, Copy, Debug)]
pub struct PerfTier {
    pub node_count: usize,
    pub particle_count: usize,
    pub glow: bool,
    pub particles: bool,
    pub resolution_scale: f32,
}

/// Spring/repulsion integration constants.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsParams {
    pub repulsion_radius: f32,
    pub repulsion_strength: f32,
    pub spring_strength: f32,
    /// Per-tick velocity retention is `1 - spring_damping`.
    pub spring_damping: f32,
    pub max_velocity: f32,
}

/// One of the three node size bands. `weight` is the draw probability and
/// the size is uniform in `[min, max]`.
#[derive(Clone, Copy, Debug)]
pub struct SizeTier {
    pub weight: f32,
    pub min: f32,
    pub max: f32,
}

/// Linear-RGB color swatches shared by nodes, connections and particles.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub primary: [f32; 3],
    pub secondary: [f32; 3],
    pub tertiary: [f32; 3],
    pub glow: [f32; 3],
    /// Draw weights over primary/secondary/tertiary for node colors.
    pub color_weights: [f32; 3],
}

#[derive(Clone, Copy, Debug)]
pub struct ConnectionParams {
    pub max_distance: f32,
    pub max_per_node: usize,
    pub opacity: f32,
    /// Dash/gap lengths for the render layer's stroked curves.
    pub dash: [f32; 2],
}

#[derive(Clone, Copy, Debug)]
pub struct ParticleParams {
    pub size: f32,
    /// Curve progress per second; a particle traverses its connection in
    /// `1 / speed` seconds.
    pub speed: f32,
    /// Fraction of progress spent ramping life 0 -> 1.
    pub fade_in: f32,
    /// Fraction of progress spent ramping life 1 -> 0.
    pub fade_out: f32,
}

#[derive(Clone, Debug)]
pub struct NodesConfig {
    pub mobile: PerfTier,
    pub desktop: PerfTier,
    pub physics: PhysicsParams,
    pub size_tiers: [SizeTier; 3],
    pub palette: Palette,
    pub connections: ConnectionParams,
    pub particles: ParticleParams,
}

impl Default for NodesConfig {
    fn default() -> Self {
        Self {
            mobile: PerfTier {
                node_count: 24,
                particle_count: 20,
                glow: false,
                particles: true,
                resolution_scale: 0.75,
            },
            desktop: PerfTier {
                node_count: 50,
                particle_count: 60,
                glow: true,
                particles: true,
                resolution_scale: 1.0,
            },
            physics: PhysicsParams {
                repulsion_radius: 150.0,
                repulsion_strength: 200.0,
                spring_strength: 2.0,
                spring_damping: 0.08,
                max_velocity: 120.0,
            },
            size_tiers: [
                SizeTier {
                    weight: 0.5,
                    min: 2.0,
                    max: 3.5,
                },
                SizeTier {
                    weight: 0.33,
                    min: 3.5,
                    max: 5.0,
                },
                SizeTier {
                    weight: 0.17,
                    min: 5.0,
                    max: 7.0,
                },
            ],
            palette: Palette {
                primary: [0.29, 0.62, 1.0],
                secondary: [0.55, 0.36, 0.96],
                tertiary: [0.13, 0.83, 0.93],
                glow: [0.62, 0.78, 1.0],
                color_weights: [0.5, 0.3, 0.2],
            },
            connections: ConnectionParams {
                max_distance: 250.0,
                max_per_node: 3,
                opacity: 0.35,
                dash: [4.0, 8.0],
            },
            particles: ParticleParams {
                size: 2.0,
                speed: 0.25,
                fade_in: 0.2,
                fade_out: 0.3,
            },
        }
    }
}

impl NodesConfig {
    /// The [`PerfTier`] for the host's device class.
    pub fn tier(&self, is_mobile: bool) -> &PerfTier {
        if is_mobile {
            &self.mobile
        } else {
            &self.desktop
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for tier in [&self.mobile, &self.desktop] {
            if tier.node_count == 0 {
                return Err(ConfigError::NonPositive("node_count"));
            }
            if tier.resolution_scale <= 0.0 {
                return Err(ConfigError::NonPositive("resolution_scale"));
            }
        }

        let phys = &self.physics;
        if phys.repulsion_radius <= 0.0 {
            return Err(ConfigError::NonPositive("repulsion_radius"));
        }
        if phys.repulsion_strength <= 0.0 {
            return Err(ConfigError::NonPositive("repulsion_strength"));
        }
        if phys.spring_strength <= 0.0 {
            return Err(ConfigError::NonPositive("spring_strength"));
        }
        if !(0.0..1.0).contains(&phys.spring_damping) {
            return Err(ConfigError::DampingOutOfRange(phys.spring_damping));
        }
        if phys.max_velocity <= 0.0 {
            return Err(ConfigError::NonPositive("max_velocity"));
        }

        let size_weights: f32 = self.size_tiers.iter().map(|t| t.weight).sum();
        if (size_weights - 1.0).abs() > 1e-3 {
            return Err(ConfigError::BadWeights("size tier", size_weights));
        }
        for (i, tier) in self.size_tiers.iter().enumerate() {
            if tier.min <= 0.0 {
                return Err(ConfigError::NonPositive("size tier min"));
            }
            if tier.min > tier.max {
                return Err(ConfigError::InvertedSizeRange(i, tier.min, tier.max));
            }
        }

        let color_weights: f32 = self.palette.color_weights.iter().sum();
        if (color_weights - 1.0).abs() > 1e-3 {
            return Err(ConfigError::BadWeights("color", color_weights));
        }

        if self.connections.max_distance <= 0.0 {
            return Err(ConfigError::NonPositive("max_distance"));
        }
        if self.connections.max_per_node == 0 {
            return Err(ConfigError::NonPositive("max_per_node"));
        }
        if !(0.0..=1.0).contains(&self.connections.opacity) || self.connections.opacity == 0.0 {
            return Err(ConfigError::OpacityOutOfRange(self.connections.opacity));
        }

        let particles = &self.particles;
        if particles.size <= 0.0 {
            return Err(ConfigError::NonPositive("particle size"));
        }
        if particles.speed <= 0.0 {
            return Err(ConfigError::NonPositive("particle speed"));
        }
        if particles.fade_in <= 0.0 {
            return Err(ConfigError::NonPositive("fade_in"));
        }
        if particles.fade_out <= 0.0 {
            return Err(ConfigError::NonPositive("fade_out"));
        }
        if particles.fade_in + particles.fade_out > 1.0 {
            return Err(ConfigError::FadeOverlap(particles.fade_in + particles.fade_out));
        }

        Ok(())
    }
}
