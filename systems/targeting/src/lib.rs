#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that selects the player's next target from world snapshots.

use cube_survivor_core::{EnemyView, EntityId, PlayerSnapshot, PlayerTarget};
use glam::Vec3;

/// Finds the candidate closest to `origin` whose distance does not exceed `radius`.
///
/// Candidates exactly on the boundary are in range. When several candidates
/// share the minimum distance the first one yielded wins.
pub fn find_nearest_in_radius<I>(origin: Vec3, radius: f32, candidates: I) -> Option<PlayerTarget>
where
    I: IntoIterator<Item = (EntityId, Vec3)>,
{
    let mut best: Option<PlayerTarget> = None;

    for (enemy, position) in candidates {
        let distance = origin.distance(position);
        if distance > radius {
            continue;
        }

        if best.map_or(true, |existing| distance < existing.distance) {
            best = Some(PlayerTarget { enemy, distance });
        }
    }

    best
}

/// Player targeting system that reuses a scratch buffer between frames.
#[derive(Debug, Default)]
pub struct Targeting {
    workspace: Vec<(EntityId, Vec3)>,
}

impl Targeting {
    /// Creates a new targeting system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the player's target for the provided world snapshot.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignment.
    pub fn handle(
        &mut self,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        out: &mut Vec<PlayerTarget>,
    ) {
        out.clear();

        if enemies.is_empty() {
            return;
        }

        self.workspace.clear();
        self.workspace.reserve(enemies.len());
        self.workspace
            .extend(enemies.iter().map(|enemy| (enemy.id, enemy.position)));

        if let Some(target) = find_nearest_in_radius(
            player.position,
            player.shooting_radius,
            self.workspace.iter().copied(),
        ) {
            out.push(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_survivor_core::{EnemySnapshot, EnemyTier};
    use std::time::Duration;

    fn candidate(id: u32, x: f32, z: f32) -> (EntityId, Vec3) {
        (EntityId::new(id), Vec3::new(x, 0.0, z))
    }

    fn enemy(id: u32, position: Vec3) -> EnemySnapshot {
        EnemySnapshot {
            id: EntityId::new(id),
            tier: EnemyTier::Easy,
            position,
            health: 50.0,
            frozen: false,
            freeze_remaining: Duration::ZERO,
        }
    }

    fn player_at(position: Vec3) -> PlayerSnapshot {
        PlayerSnapshot {
            id: EntityId::new(0),
            position,
            health: 100.0,
            max_health: 100.0,
            move_speed: 6.0,
            fire_rate: 1.0,
            shooting_radius: 10.0,
            projectile_damage: 10.0,
            freeze_on_hit: false,
        }
    }

    #[test]
    fn none_when_every_candidate_is_outside() {
        let candidates = [candidate(1, 11.0, 0.0), candidate(2, 0.0, -30.0)];
        assert_eq!(find_nearest_in_radius(Vec3::ZERO, 10.0, candidates), None);
    }

    #[test]
    fn boundary_is_inclusive() {
        let target = find_nearest_in_radius(Vec3::ZERO, 10.0, [candidate(4, 0.0, 10.0)]);
        assert_eq!(
            target,
            Some(PlayerTarget {
                enemy: EntityId::new(4),
                distance: 10.0,
            })
        );
    }

    #[test]
    fn nearest_candidate_wins() {
        let candidates = [
            candidate(1, 8.0, 0.0),
            candidate(2, 3.0, 4.0),
            candidate(3, -6.0, 0.0),
        ];
        let target = find_nearest_in_radius(Vec3::ZERO, 10.0, candidates);
        assert_eq!(target.map(|target| target.enemy), Some(EntityId::new(2)));
    }

    #[test]
    fn ties_resolve_to_iteration_order() {
        let candidates = [candidate(9, -5.0, 0.0), candidate(3, 5.0, 0.0)];
        let target = find_nearest_in_radius(Vec3::ZERO, 10.0, candidates);
        assert_eq!(target.map(|target| target.enemy), Some(EntityId::new(9)));
    }

    #[test]
    fn handle_uses_player_radius_and_clears_output() {
        let mut system = Targeting::new();
        let enemies = EnemyView::from_snapshots(vec![
            enemy(5, Vec3::new(2.0, 0.0, 7.0)),
            enemy(6, Vec3::new(2.0, 0.0, 1.0)),
        ]);
        let mut out = vec![PlayerTarget {
            enemy: EntityId::new(99),
            distance: 0.0,
        }];

        system.handle(&player_at(Vec3::new(2.0, 0.0, 0.0)), &enemies, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy, EntityId::new(6));

        system.handle(
            &player_at(Vec3::new(40.0, 0.0, 0.0)),
            &enemies,
            &mut out,
        );
        assert!(out.is_empty());
    }
}
