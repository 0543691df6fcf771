//! Pooled particle flow along the connection curves.
//!
//! A fixed pool of particle structs is allocated up front and shuttles
//! between the free list and the active set; once warmed up nothing is
//! allocated per frame. Spawning, advancement and recycling all run inside
//! [`ParticleFlow::update`], driven by the host's frame tick.

use fnv::FnvHashMap;
use glam::Vec3;
use rand::prelude::*;

use crate::config::{ConfigError, NodesConfig};
use crate::connection::Connection;
use crate::constants::{
    FLOAT_AMPLITUDE, FLOAT_FREQUENCY, MAX_PARTICLES_PER_CONNECTION, SPAWN_PROBABILITY,
};

/// A transient marker travelling along one connection's curve.
///
/// Position is curve-parametric (`progress` in [0, 1)), not integrated;
/// `velocity` rides along for the render layer. `life` is the derived
/// fade-in/fade-out opacity scalar.
#[derive(Clone, Debug, Default)]
pub struct Particle {
    pub id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub target: Vec3,
    pub progress: f32,
    pub connection_id: String,
    pub life: f32,
    pub size: f32,
    pub color: [f32; 3],
}

pub struct ParticleFlow {
    config: NodesConfig,
    capacity: usize,
    pool: Vec<Particle>,
    active: Vec<Particle>,
    rng: StdRng,
    time: f32,
    next_id: u64,
}

impl ParticleFlow {
    /// Pre-allocate the pool for the device class' particle budget. A tier
    /// with particles disabled gets an empty pool, which suppresses all
    /// spawning through the normal exhaustion policy.
    pub fn new(config: NodesConfig, is_mobile: bool, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let tier = config.tier(is_mobile);
        let capacity = if tier.particles { tier.particle_count } else { 0 };
        Ok(Self {
            config,
            capacity,
            pool: vec![Particle::default(); capacity],
            active: Vec::with_capacity(capacity),
            rng: StdRng::seed_from_u64(seed),
            time: 0.0,
            next_id: 0,
        })
    }

    /// Advance every active particle along its curve, recycle finished and
    /// orphaned ones back into the pool, then backfill eligible
    /// connections with fresh spawns.
    pub fn update(&mut self, dt: f32, connections: &[Connection]) {
        self.time += dt;
        let by_id: FnvHashMap<&str, &Connection> =
            connections.iter().map(|c| (c.id.as_str(), c)).collect();
        let speed = self.config.particles.speed;
        let fade_in = self.config.particles.fade_in;
        let fade_out = self.config.particles.fade_out;

        let mut i = 0;
        while i < self.active.len() {
            let particle = &mut self.active[i];
            let retire = match by_id.get(particle.connection_id.as_str()) {
                // Connection lost to a regeneration: drop mid-flight, no
                // teleport to the target
                None => true,
                Some(connection) => {
                    particle.progress += dt * speed;
                    if particle.progress >= 1.0 {
                        true
                    } else {
                        let mut position = connection.point_at(particle.progress);
                        // Cosmetic vertical drift keyed off the id length
                        position.y += (self.time * FLOAT_FREQUENCY + particle.id.len() as f32)
                            .sin()
                            * FLOAT_AMPLITUDE;
                        particle.position = position;
                        particle.target = connection.to;
                        particle.life = life_at(particle.progress, fade_in, fade_out);
                        false
                    }
                }
            };
            if retire {
                let particle = self.active.swap_remove(i);
                if self.pool.len() + self.active.len() < self.capacity {
                    self.pool.push(particle);
                }
            } else {
                i += 1;
            }
        }

        self.spawn(connections);
    }

    /// With a fixed per-tick probability, start one pooled particle on
    /// each connection hosting fewer than the per-connection cap. An empty
    /// pool makes this a no-op.
    fn spawn(&mut self, connections: &[Connection]) {
        let mut hosted: FnvHashMap<&str, usize> =
            connections.iter().map(|c| (c.id.as_str(), 0)).collect();
        for particle in &self.active {
            if let Some(count) = hosted.get_mut(particle.connection_id.as_str()) {
                *count += 1;
            }
        }

        let base_size = self.config.particles.size;
        let palette = self.config.palette;
        let swatches = [palette.primary, palette.secondary, palette.tertiary];

        for connection in connections {
            let count = hosted.get(connection.id.as_str()).copied().unwrap_or(0);
            if count >= MAX_PARTICLES_PER_CONNECTION {
                continue;
            }
            if self.rng.gen::<f32>() >= SPAWN_PROBABILITY {
                continue;
            }
            let Some(mut particle) = self.pool.pop() else {
                // Pool dry: suppress spawning for the rest of the tick
                break;
            };

            particle.id = format!("particle_{}", self.next_id);
            self.next_id += 1;
            particle.connection_id = connection.id.clone();
            particle.position = connection.from;
            particle.velocity = Vec3::ZERO;
            particle.target = connection.to;
            particle.progress = 0.0;
            particle.life = 0.0;
            particle.size = base_size * (0.7 + self.rng.gen::<f32>() * 0.6);
            particle.color = swatches.choose(&mut self.rng).copied().unwrap_or(palette.primary);
            self.active.push(particle);
        }
    }

    /// Grow the free list with empty particles or truncate it. Particles
    /// already in flight are unaffected; surplus ones are dropped instead
    /// of refunded when they retire.
    pub fn set_particle_count(&mut self, count: usize) {
        self.capacity = count;
        let target_free = count.saturating_sub(self.active.len());
        if self.pool.len() > target_free {
            self.pool.truncate(target_free);
        } else {
            self.pool.resize_with(target_free, Particle::default);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.pool.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Piecewise-linear fade: 0 -> 1 across `[0, fade_in]`, hold at 1, then
/// 1 -> 0 across `[1 - fade_out, 1]`.
fn life_at(progress: f32, fade_in: f32, fade_out: f32) -> f32 {
    if progress < fade_in {
        progress / fade_in
    } else if progress > 1.0 - fade_out {
        (1.0 - progress) / fade_out
    } else {
        1.0
    }
}
