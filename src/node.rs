use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

use crate::config::NodesConfig;
use crate::constants::HEXAGON_WEIGHT;

/// Outline the render layer draws for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
    Hexagon,
    Circle,
}

/// A point entity in the field: the anchor it springs back to, its live
/// kinematic state, and the attributes the render layer needs.
///
/// `connections` is the adjacency list of connected node ids; it is kept
/// consistent with the connection set by the graph builder and is symmetric
/// across endpoints.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub position: Vec3,
    pub original: Vec3,
    pub velocity: Vec3,
    pub shape: NodeShape,
    pub size: f32,
    pub color: [f32; 3],
    pub connections: SmallVec<[String; 4]>,
    /// Recomputed from pointer distance every physics tick.
    pub glow: f32,
    /// Fixed at creation; consumed by the render layer only.
    pub pulse_phase: f32,
}

impl Node {
    /// Attribute a sampled position: weighted shape, size-tier and color
    /// draws, random glow seed and pulse phase, zero velocity, anchor at
    /// the initial position.
    pub fn at_position(id: String, position: Vec3, config: &NodesConfig, rng: &mut StdRng) -> Self {
        let shape = if rng.gen::<f32>() < HEXAGON_WEIGHT {
            NodeShape::Hexagon
        } else {
            NodeShape::Circle
        };
        Node {
            id,
            position,
            original: position,
            velocity: Vec3::ZERO,
            shape,
            size: draw_size(config, rng),
            color: draw_color(config, rng),
            connections: SmallVec::new(),
            glow: rng.gen::<f32>(),
            pulse_phase: rng.gen::<f32>() * std::f32::consts::TAU,
        }
    }
}

fn draw_size(config: &NodesConfig, rng: &mut StdRng) -> f32 {
    let roll = rng.gen::<f32>();
    let mut acc = 0.0;
    for tier in &config.size_tiers {
        acc += tier.weight;
        if roll < acc {
            return rng.gen_range(tier.min..=tier.max);
        }
    }
    // Weight rounding can leave a sliver above the last threshold
    let last = &config.size_tiers[config.size_tiers.len() - 1];
    rng.gen_range(last.min..=last.max)
}

fn draw_color(config: &NodesConfig, rng: &mut StdRng) -> [f32; 3] {
    let palette = &config.palette;
    let roll = rng.gen::<f32>();
    if roll < palette.color_weights[0] {
        palette.primary
    } else if roll < palette.color_weights[0] + palette.color_weights[1] {
        palette.secondary
    } else {
        palette.tertiary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodesConfig;

    #[test]
    fn node_starts_at_rest_on_its_anchor() {
        let config = NodesConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let node = Node::at_position("node_0".into(), Vec3::new(3.0, -2.0, 0.0), &config, &mut rng);
        assert_eq!(node.position, node.original);
        assert_eq!(node.velocity, Vec3::ZERO);
        assert!(node.connections.is_empty());
    }

    #[test]
    fn drawn_sizes_stay_inside_the_configured_tiers() {
        let config = NodesConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let lo = config.size_tiers[0].min;
        let hi = config.size_tiers[2].max;
        for i in 0..200 {
            let node = Node::at_position(format!("node_{i}"), Vec3::ZERO, &config, &mut rng);
            assert!(node.size >= lo && node.size <= hi, "size {} out of range", node.size);
        }
    }

    #[test]
    fn drawn_colors_come_from_the_palette() {
        let config = NodesConfig::default();
        let palette = config.palette;
        let mut rng = StdRng::seed_from_u64(13);
        for i in 0..100 {
            let node = Node::at_position(format!("node_{i}"), Vec3::ZERO, &config, &mut rng);
            assert!(
                node.color == palette.primary
                    || node.color == palette.secondary
                    || node.color == palette.tertiary
            );
        }
    }
}
