// Host-side tests for config validation and the fixed tuning constants.

use knowledge_nodes::{
    ConfigError, NodesConfig, CONTROL_POINT_OFFSET, GLOW_BASE, GLOW_RANGE, HEXAGON_WEIGHT,
    MAX_PARTICLES_PER_CONNECTION, MIN_NODE_DISTANCE, PLACEMENT_ATTEMPTS, SPAWN_PROBABILITY,
};

#[test]
fn default_config_validates() {
    assert_eq!(NodesConfig::default().validate(), Ok(()));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(MIN_NODE_DISTANCE > 0.0);
    assert!(PLACEMENT_ATTEMPTS >= 1);

    // Probabilities and fractions
    assert!(HEXAGON_WEIGHT > 0.0 && HEXAGON_WEIGHT < 1.0);
    assert!(SPAWN_PROBABILITY > 0.0 && SPAWN_PROBABILITY <= 1.0);
    assert!(CONTROL_POINT_OFFSET > 0.0 && CONTROL_POINT_OFFSET <= 0.5);

    // Glow stays a sane opacity
    assert!(GLOW_BASE >= 0.0);
    assert!(GLOW_BASE + GLOW_RANGE <= 1.0);

    assert!(MAX_PARTICLES_PER_CONNECTION >= 1);
}

#[test]
fn default_tuning_relationships_hold() {
    let config = NodesConfig::default();

    // Connections must be reachable past the placement spacing
    assert!(config.connections.max_distance > MIN_NODE_DISTANCE);

    // Size tiers ascend without gaps
    assert!(config.size_tiers[0].max <= config.size_tiers[1].min + 1e-6);
    assert!(config.size_tiers[1].max <= config.size_tiers[2].min + 1e-6);

    // Mobile budget never exceeds desktop
    assert!(config.mobile.node_count <= config.desktop.node_count);
    assert!(config.mobile.particle_count <= config.desktop.particle_count);

    // Fades leave room for the hold phase
    assert!(config.particles.fade_in + config.particles.fade_out < 1.0);
}

#[test]
fn zero_node_count_is_rejected() {
    let mut config = NodesConfig::default();
    config.mobile.node_count = 0;
    assert_eq!(config.validate(), Err(ConfigError::NonPositive("node_count")));
}

#[test]
fn damping_of_one_or_more_is_rejected() {
    let mut config = NodesConfig::default();
    config.physics.spring_damping = 1.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::DampingOutOfRange(_))
    ));
}

#[test]
fn size_tier_weights_must_sum_to_one() {
    let mut config = NodesConfig::default();
    config.size_tiers[0].weight = 0.9;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::BadWeights("size tier", _))
    ));
}

#[test]
fn inverted_size_range_is_rejected() {
    let mut config = NodesConfig::default();
    config.size_tiers[1].min = 10.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvertedSizeRange(1, _, _))
    ));
}

#[test]
fn zero_opacity_is_rejected() {
    let mut config = NodesConfig::default();
    config.connections.opacity = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OpacityOutOfRange(_))
    ));
}

#[test]
fn overlapping_fade_windows_are_rejected() {
    let mut config = NodesConfig::default();
    config.particles.fade_in = 0.6;
    config.particles.fade_out = 0.6;
    assert!(matches!(config.validate(), Err(ConfigError::FadeOverlap(_))));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let mut config = NodesConfig::default();
    config.physics.max_velocity = 0.0;
    assert!(knowledge_nodes::NodeField::new(config.clone(), 1).is_err());
    assert!(knowledge_nodes::ParticleFlow::new(config, false, 1).is_err());
}
