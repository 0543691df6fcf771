/// Fixed simulation tuning constants.
///
/// These express intended behavior (placement budgets, curve shape, glow
/// response) and keep magic numbers out of the code. Per-device tunables
/// live in `config`.
// Node placement
pub const MIN_NODE_DISTANCE: f32 = 80.0; // world units between any two accepted nodes
pub const PLACEMENT_ATTEMPTS: u32 = 50; // random draws before a node is skipped

// Node attribute draws
pub const HEXAGON_WEIGHT: f32 = 0.6; // remainder of the coin flip is circles

// Connection curve shape
pub const CONTROL_POINT_OFFSET: f32 = 0.3; // perpendicular offset as a fraction of segment length

// Glow response to pointer proximity
pub const GLOW_BASE: f32 = 0.2; // idle glow far from the pointer
pub const GLOW_RANGE: f32 = 0.3; // extra glow with the pointer on top of a node

// Particle flow
pub const MAX_PARTICLES_PER_CONNECTION: usize = 2;
pub const SPAWN_PROBABILITY: f32 = 0.1; // per eligible connection, per tick
pub const FLOAT_FREQUENCY: f32 = 2.0; // multiplier on sim time for the vertical drift
pub const FLOAT_AMPLITUDE: f32 = 0.5; // world units of vertical drift
