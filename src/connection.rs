use glam::Vec3;

use crate::constants::CONTROL_POINT_OFFSET;

/// An edge between two nodes, drawn by the render layer as a cubic curve.
///
/// Endpoints and control points are live copies refreshed from the owning
/// nodes' positions after every physics tick, so they are never stale
/// relative to node motion within a tick.
#[derive(Clone, Debug)]
pub struct Connection {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub from: Vec3,
    pub to: Vec3,
    pub cp1: Vec3,
    pub cp2: Vec3,
    /// Static stroke opacity from config.
    pub opacity: f32,
    /// Random, fixed at creation; consumed by the render layer only.
    pub pulse_phase: f32,
}

impl Connection {
    /// The registry key for an edge, combining both endpoint ids.
    pub fn connection_id(from_id: &str, to_id: &str) -> String {
        format!("{from_id}-{to_id}")
    }

    pub fn between(
        from_id: String,
        to_id: String,
        from: Vec3,
        to: Vec3,
        opacity: f32,
        pulse_phase: f32,
    ) -> Self {
        let id = Self::connection_id(&from_id, &to_id);
        let (cp1, cp2) = control_points(from, to);
        Connection {
            id,
            from_id,
            to_id,
            from,
            to,
            cp1,
            cp2,
            opacity,
            pulse_phase,
        }
    }

    /// Refresh endpoints and control points from the owning nodes' current
    /// positions.
    pub fn track_endpoints(&mut self, from: Vec3, to: Vec3) {
        self.from = from;
        self.to = to;
        let (cp1, cp2) = control_points(from, to);
        self.cp1 = cp1;
        self.cp2 = cp2;
    }

    /// Evaluate the cubic bezier through the live control points at `t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        self.from * (u * u * u)
            + self.cp1 * (3.0 * u * u * t)
            + self.cp2 * (3.0 * u * t * t)
            + self.to * (t * t * t)
    }
}

/// Offset both control points perpendicular to the endpoint segment, in
/// opposite directions at each end, producing a gentle symmetric S-curve
/// instead of a straight line.
fn control_points(from: Vec3, to: Vec3) -> (Vec3, Vec3) {
    let dir = to - from;
    let len = dir.length();
    let perp = Vec3::new(-dir.y, dir.x, 0.0).normalize_or_zero();
    let offset = perp * (len * CONTROL_POINT_OFFSET);
    (from + offset, to - offset)
}
