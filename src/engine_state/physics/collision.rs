//! # Collision Detection and Resolution
//!
//! Player-versus-block collision in three passes:
//!
//! 1. **Broad phase**: every solid block inside the integer bounding box of the
//!    player cylinder is a candidate.
//! 2. **Narrow phase**: for each candidate, the point of the block closest to the
//!    cylinder center is tested against the cylinder. Blocks are unit cubes
//!    centered on their integer coordinates. A contact is pushed out along the
//!    axis of least overlap: vertically, or horizontally away from the point.
//!    A center buried inside a block is always pushed up through its top face.
//! 3. **Resolution**: contacts are resolved smallest overlap first. Each one is
//!    re-tested before being applied, since earlier pushes can clear later ones.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::{player::Player, voxels::world::BlockLookup};

/// One contact between the player and a block, valid for a single physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Integer coordinates of the block
    pub block: Point3<i32>,
    /// Point of the block closest to the cylinder center
    pub contact_point: Point3<f32>,
    /// Unit push direction, pointing away from the block
    pub normal: Vector3<f32>,
    /// Penetration depth along `normal`
    pub overlap: f32,
}

/// What the last physics step looked at, for a debug overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionDebug {
    /// Broad-phase candidates
    pub candidates: Vec<Point3<i32>>,
    /// Narrow-phase contact points
    pub contacts: Vec<Point3<f32>>,
}

/// Solid blocks overlapping the player's integer bounding box.
pub fn broad_phase(player: &Player, world: &impl BlockLookup) -> Vec<Point3<i32>> {
    let min_x = (player.position.x - player.radius).floor() as i32;
    let max_x = (player.position.x + player.radius).ceil() as i32;
    let min_y = (player.position.y - player.height).floor() as i32;
    let max_y = player.position.y.ceil() as i32;
    let min_z = (player.position.z - player.radius).floor() as i32;
    let max_z = (player.position.z + player.radius).ceil() as i32;

    let mut candidates = Vec::new();
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            for z in min_z..=max_z {
                if world.is_solid(x, y, z) {
                    candidates.push(Point3::new(x, y, z));
                }
            }
        }
    }
    candidates
}

/// Contacts between the player cylinder and the candidate blocks.
pub fn narrow_phase(candidates: &[Point3<i32>], player: &Player) -> Vec<Collision> {
    let center = player.center();
    let half_height = player.height / 2.0;

    candidates
        .iter()
        .filter_map(|&block| {
            let (bx, by, bz) = (block.x as f32, block.y as f32, block.z as f32);
            let contact_point = Point3::new(
                center.x.clamp(bx - 0.5, bx + 0.5),
                center.y.clamp(by - 0.5, by + 0.5),
                center.z.clamp(bz - 0.5, bz + 0.5),
            );
            if !player.contains_point(contact_point) {
                return None;
            }

            let delta = contact_point - center;
            let overlap_y = half_height - delta.y.abs();
            let horizontal = Vector3::new(delta.x, 0.0, delta.z);
            let overlap_xz = player.radius - horizontal.magnitude();

            let (normal, overlap) = if delta.magnitude2() == 0.0 {
                // Center inside the block: lift the feet onto its top face.
                let feet = center.y - half_height;
                (Vector3::new(0.0, 1.0, 0.0), (by + 0.5) - feet)
            } else if overlap_y < overlap_xz || horizontal.magnitude2() == 0.0 {
                // Straight below or above the center there is no horizontal direction.
                (Vector3::new(0.0, -delta.y.signum(), 0.0), overlap_y)
            } else {
                (-horizontal.normalize(), overlap_xz)
            };

            Some(Collision {
                block,
                contact_point,
                normal,
                overlap,
            })
        })
        .collect()
}

/// Pushes the player out of each contact and removes the velocity along its normal.
///
/// Contacts are applied smallest overlap first; a contact whose point is no
/// longer inside the cylinder is skipped.
pub fn resolve_collisions(mut collisions: Vec<Collision>, player: &mut Player) {
    collisions.sort_by(|a, b| a.overlap.total_cmp(&b.overlap));

    for collision in collisions {
        if !player.contains_point(collision.contact_point) {
            continue;
        }

        player.position += collision.normal * collision.overlap;

        let magnitude = player.world_velocity().dot(collision.normal);
        player.apply_world_delta_velocity(-(collision.normal * magnitude));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerParams;
    use crate::engine_state::voxels::block::{block_type::BlockType, Voxel};
    use std::collections::HashSet;

    struct Blocks(HashSet<(i32, i32, i32)>);

    impl BlockLookup for Blocks {
        fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
            self.0.contains(&(x, y, z)).then(|| Voxel {
                id: BlockType::STONE.id(),
                instance: None,
            })
        }
    }

    fn player_at(x: f32, y: f32, z: f32) -> Player {
        let mut player = Player::new(&PlayerParams::default());
        player.position = Point3::new(x, y, z);
        player
    }

    #[test]
    fn broad_phase_scans_the_bounding_box() {
        let world = Blocks(HashSet::from([(0, 0, 0), (1, 2, -1), (3, 0, 0), (0, -1, 0)]));
        let player = player_at(0.0, 2.0, 0.0);
        let mut found = broad_phase(&player, &world);
        found.sort_by_key(|p| (p.x, p.y, p.z));
        assert_eq!(found, vec![Point3::new(0, 0, 0), Point3::new(1, 2, -1)]);
    }

    #[test]
    fn block_below_pushes_up() {
        let player = player_at(0.0, 0.5 + 1.75 - 0.05, 0.0);
        let collisions = narrow_phase(&[Point3::new(0, 0, 0)], &player);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].normal, Vector3::new(0.0, 1.0, 0.0));
        assert!((collisions[0].overlap - 0.05).abs() < 1e-5);
    }

    #[test]
    fn block_beside_pushes_sideways() {
        let player = player_at(0.15, 2.0, 0.0);
        let collisions = narrow_phase(&[Point3::new(1, 1, 0)], &player);
        assert_eq!(collisions.len(), 1);
        assert!((collisions[0].normal - Vector3::new(-1.0, 0.0, 0.0)).magnitude() < 1e-5);
        assert!((collisions[0].overlap - 0.05).abs() < 1e-5);
    }

    #[test]
    fn deep_contact_straight_below_or_above_stays_vertical() {
        let low = player_at(0.0, 1.75, 0.0);
        let below = narrow_phase(&[Point3::new(0, 0, 0)], &low);
        assert_eq!(below.len(), 1);
        assert_eq!(below[0].normal, Vector3::new(0.0, 1.0, 0.0));
        assert!((below[0].overlap - 0.5).abs() < 1e-5);

        let high = player_at(0.0, 2.0, 0.0);
        let above = narrow_phase(&[Point3::new(0, 2, 0)], &high);
        assert_eq!(above.len(), 1);
        assert_eq!(above[0].normal, Vector3::new(0.0, -1.0, 0.0));
        assert!((above[0].overlap - 0.5).abs() < 1e-5);
    }

    #[test]
    fn center_inside_a_block_pushes_up_through_its_top() {
        let player = player_at(0.0, 4.0, 0.0);
        let collisions = narrow_phase(&[Point3::new(0, 3, 0)], &player);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].contact_point, player.center());
        assert_eq!(collisions[0].normal, Vector3::new(0.0, 1.0, 0.0));
        assert!((collisions[0].overlap - 1.25).abs() < 1e-5);
    }

    #[test]
    fn distant_candidates_produce_no_contact() {
        let player = player_at(0.0, 2.25, 0.0);
        assert!(narrow_phase(&[Point3::new(1, 0, 1), Point3::new(0, 3, 0)], &player).is_empty());
    }

    #[test]
    fn smallest_overlap_is_resolved_first_and_cleared_contacts_skipped() {
        let mut player = player_at(0.0, 1.75, 0.0);
        let up = Vector3::new(0.0, 1.0, 0.0);
        let shallow = Collision {
            block: Point3::new(0, 0, 0),
            contact_point: Point3::new(0.0, 0.1, 0.0),
            normal: up,
            overlap: 0.1,
        };
        let deep = Collision {
            block: Point3::new(1, 0, 0),
            contact_point: Point3::new(0.0, 0.05, 0.0),
            normal: up,
            overlap: 0.3,
        };
        assert!(player.contains_point(deep.contact_point));

        resolve_collisions(vec![deep, shallow], &mut player);

        // Only the shallow contact applies; it lifts the deep point out of the cylinder.
        assert!((player.position.y - 1.85).abs() < 1e-5);
    }

    #[test]
    fn resolution_zeroes_velocity_into_the_block() {
        let mut player = player_at(0.0, 2.0, 0.0);
        player.velocity = Vector3::new(0.0, -3.0, 2.0);
        let collision = Collision {
            block: Point3::new(0, 0, 0),
            contact_point: Point3::new(0.0, 0.5, 0.0),
            normal: Vector3::new(0.0, 1.0, 0.0),
            overlap: 0.25,
        };
        resolve_collisions(vec![collision], &mut player);
        assert!((player.position.y - 2.25).abs() < 1e-5);
        assert!(player.velocity.y.abs() < 1e-5);
        assert!((player.velocity.z - 2.0).abs() < 1e-5);
    }
}
