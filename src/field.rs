//! The node-field orchestrator: generation, graph construction and the
//! per-tick physics step.
//!
//! `NodeField` owns the node and connection stores as dense arrays with
//! id -> index lookups, the pointer world-position and the accumulated sim
//! time. The driver mutates it once per frame (`update_pointer`,
//! `update_physics`) and the render layer reads the slices back between
//! ticks; there is never a concurrent writer.

use fnv::FnvHashMap;
use glam::Vec3;
use rand::prelude::*;

use crate::camera::{screen_to_node_plane, Camera, Viewport};
use crate::config::{ConfigError, NodesConfig};
use crate::connection::Connection;
use crate::constants::{GLOW_BASE, GLOW_RANGE, MIN_NODE_DISTANCE};
use crate::node::Node;
use crate::sampler::scatter_positions;

pub struct NodeField {
    config: NodesConfig,
    nodes: Vec<Node>,
    node_index: FnvHashMap<String, usize>,
    connections: Vec<Connection>,
    connection_index: FnvHashMap<String, usize>,
    pointer: Option<Vec3>,
    time: f32,
    rng: StdRng,
}

impl NodeField {
    /// Build an empty field; call [`generate`](Self::generate) once the
    /// viewport extents are known. The seed makes layouts reproducible.
    pub fn new(config: NodesConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            nodes: Vec::new(),
            node_index: FnvHashMap::default(),
            connections: Vec::new(),
            connection_index: FnvHashMap::default(),
            pointer: None,
            time: 0.0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Destructively regenerate the whole node set and its connection
    /// graph for the given viewport extents. Crowding can leave the final
    /// count below the tier's target.
    pub fn generate(&mut self, width: f32, height: f32, is_mobile: bool) {
        let tier = *self.config.tier(is_mobile);
        self.nodes.clear();
        self.node_index.clear();
        self.connections.clear();
        self.connection_index.clear();

        let positions =
            scatter_positions(tier.node_count, width, height, MIN_NODE_DISTANCE, &mut self.rng);
        for (i, position) in positions.into_iter().enumerate() {
            let node = Node::at_position(format!("node_{i}"), position, &self.config, &mut self.rng);
            self.node_index.insert(node.id.clone(), self.nodes.len());
            self.nodes.push(node);
        }

        self.build_connections();
        log::debug!(
            "generated {} nodes and {} connections for {}x{}",
            self.nodes.len(),
            self.connections.len(),
            width,
            height
        );
    }

    /// Connect every node to up to `max_per_node` of its nearest neighbors
    /// within `max_distance`, closest first, skipping pairs already
    /// connected in either direction. Both endpoints' degree caps bind.
    fn build_connections(&mut self) {
        let max_distance = self.config.connections.max_distance;
        let max_per_node = self.config.connections.max_per_node;
        let opacity = self.config.connections.opacity;

        for i in 0..self.nodes.len() {
            let origin = self.nodes[i].position;
            let mut nearby: Vec<(usize, f32)> = self
                .nodes
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(j, other)| (j, origin.distance(other.position)))
                .filter(|(_, d)| *d <= max_distance)
                .collect();
            // Stable sort keeps encounter order on distance ties
            nearby.sort_by(|a, b| a.1.total_cmp(&b.1));

            for (j, _) in nearby {
                if self.nodes[i].connections.len() >= max_per_node {
                    break;
                }
                if self.nodes[j].connections.len() >= max_per_node {
                    continue;
                }
                let already_connected = self.nodes[i]
                    .connections
                    .iter()
                    .any(|id| *id == self.nodes[j].id)
                    || self.nodes[j]
                        .connections
                        .iter()
                        .any(|id| *id == self.nodes[i].id);
                if already_connected {
                    continue;
                }

                let pulse_phase = self.rng.gen::<f32>() * std::f32::consts::TAU;
                let connection = Connection::between(
                    self.nodes[i].id.clone(),
                    self.nodes[j].id.clone(),
                    self.nodes[i].position,
                    self.nodes[j].position,
                    opacity,
                    pulse_phase,
                );
                self.connection_index
                    .insert(connection.id.clone(), self.connections.len());
                self.connections.push(connection);

                let other_id = self.nodes[j].id.clone();
                let own_id = self.nodes[i].id.clone();
                self.nodes[i].connections.push(other_id);
                self.nodes[j].connections.push(own_id);
            }
        }
    }

    /// Convert pointer screen coordinates to a world position on the node
    /// plane and store it for subsequent physics ticks. A ray that misses
    /// the plane leaves the previous pointer in place.
    pub fn update_pointer(&mut self, sx: f32, sy: f32, camera: &Camera, viewport: Viewport) {
        if let Some(world) = screen_to_node_plane(camera, viewport, sx, sy) {
            self.pointer = Some(world);
        }
    }

    /// Store a pointer position already expressed in world space. Seam for
    /// drivers that do their own projection.
    pub fn set_pointer(&mut self, world: Vec3) {
        self.pointer = Some(world);
    }

    /// Advance every node by one forward-Euler step and refresh the
    /// connection curves from the moved endpoints.
    pub fn update_physics(&mut self, dt: f32) {
        self.time += dt;
        let phys = self.config.physics;

        for node in &mut self.nodes {
            let mut force = Vec3::ZERO;

            // Quadratic-falloff repulsion away from the pointer
            let pointer_distance = match self.pointer {
                Some(pointer) => {
                    let offset = node.position - pointer;
                    let distance = offset.length();
                    if distance < phys.repulsion_radius && distance > f32::EPSILON {
                        let falloff =
                            (phys.repulsion_radius - distance) / phys.repulsion_radius;
                        force += offset / distance * (phys.repulsion_strength * falloff * falloff);
                    }
                    distance
                }
                None => f32::INFINITY,
            };

            // Linear spring back toward the anchor
            force += (node.original - node.position) * phys.spring_strength;

            node.velocity += force * dt;
            node.velocity *= 1.0 - phys.spring_damping;
            node.velocity = node.velocity.clamp_length_max(phys.max_velocity);
            node.position += node.velocity * dt;

            // Glow tracks pointer proximity whether or not repulsion fired
            let proximity = (pointer_distance / phys.repulsion_radius).min(1.0);
            node.glow = GLOW_BASE + (1.0 - proximity) * GLOW_RANGE;
        }

        // Curves must mirror the moved endpoints before anything reads them
        for connection in &mut self.connections {
            let (Some(&from), Some(&to)) = (
                self.node_index.get(&connection.from_id),
                self.node_index.get(&connection.to_id),
            ) else {
                continue;
            };
            connection.track_endpoints(self.nodes[from].position, self.nodes[to].position);
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connection_index.get(id).map(|&i| &self.connections[i])
    }

    /// Accumulated simulation time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Current pointer world-position, if a pointer event has arrived.
    pub fn pointer(&self) -> Option<Vec3> {
        self.pointer
    }

    pub fn config(&self) -> &NodesConfig {
        &self.config
    }
}
