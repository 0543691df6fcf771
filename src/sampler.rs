use glam::Vec3;
use rand::prelude::*;

use crate::constants::PLACEMENT_ATTEMPTS;

/// Rejection-sample up to `count` positions inside the centered
/// `width x height` rectangle, keeping every accepted pair at least
/// `min_distance` apart.
///
/// Each candidate gets a bounded number of placement attempts; on
/// exhaustion the node is skipped, so a crowded layout comes back with
/// fewer positions than requested. That shortfall is policy, not an error.
pub fn scatter_positions(
    count: usize,
    width: f32,
    height: f32,
    min_distance: f32,
    rng: &mut StdRng,
) -> Vec<Vec3> {
    let mut accepted: Vec<Vec3> = Vec::with_capacity(count);
    for _ in 0..count {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let candidate = Vec3::new(
                rng.gen_range(-width / 2.0..width / 2.0),
                rng.gen_range(-height / 2.0..height / 2.0),
                0.0,
            );
            if accepted
                .iter()
                .all(|p| p.distance(candidate) >= min_distance)
            {
                accepted.push(candidate);
                break;
            }
        }
    }
    if accepted.len() < count {
        log::debug!(
            "placed {} of {} nodes before the attempt budget ran out",
            accepted.len(),
            count
        );
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_positions_respect_minimum_separation() {
        let mut rng = StdRng::seed_from_u64(1);
        let positions = scatter_positions(50, 1000.0, 1000.0, 80.0, &mut rng);
        assert!(positions.len() <= 50);
        for (i, a) in positions.iter().enumerate() {
            for b in positions.iter().skip(i + 1) {
                assert!(a.distance(*b) >= 80.0, "pair closer than min distance");
            }
        }
    }

    #[test]
    fn positions_stay_inside_the_rectangle() {
        let mut rng = StdRng::seed_from_u64(2);
        for p in scatter_positions(30, 600.0, 400.0, 20.0, &mut rng) {
            assert!(p.x >= -300.0 && p.x < 300.0);
            assert!(p.y >= -200.0 && p.y < 200.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn crowded_layout_under_fills_instead_of_spinning() {
        let mut rng = StdRng::seed_from_u64(3);
        // 200 nodes at 80 units separation cannot fit in 200x200
        let positions = scatter_positions(200, 200.0, 200.0, 80.0, &mut rng);
        assert!(positions.len() < 200);
        assert!(!positions.is_empty());
    }
}
