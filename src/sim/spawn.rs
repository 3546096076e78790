//! Enemy and collectible spawning
//!
//! Two independent repeating triggers, both due on the first frame:
//! - Enemies enter just past the right edge at a random height inside the
//!   playable band and cross to just past the left edge, then retire.
//! - Collectibles appear anywhere in the playable rectangle, sit still and
//!   retire after their lifetime unless captured first.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Actor, ActorId, ActorKind, GameState, MotionState};
use super::vector;

/// Countdown timers for the two spawn triggers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Seconds until the next enemy (0 = due now)
    pub enemy_timer: f32,
    /// Seconds until the next collectible (0 = due now)
    pub collectible_timer: f32,
}

impl SpawnScheduler {
    /// Count both triggers down by `dt`; returns whether (enemy, collectible)
    /// is due this frame
    pub fn advance(&mut self, dt: f32, enemy_period: f32, collectible_period: f32) -> (bool, bool) {
        (
            fire(&mut self.enemy_timer, dt, enemy_period),
            fire(&mut self.collectible_timer, dt, collectible_period),
        )
    }
}

/// At most one firing per frame; periods skipped by a long frame are dropped
/// and the timer stays phase-aligned in (0, period]
fn fire(timer: &mut f32, dt: f32, period: f32) -> bool {
    *timer -= dt;
    if *timer > 0.0 {
        return false;
    }
    *timer = period - (-*timer % period);
    true
}

/// Enemy entry point: box fully off the right edge, vertically inside the
/// playable band
pub fn enemy_spawn_point(world: Vec2, playable: &Rect, size: Vec2, rng: &mut impl Rng) -> Vec2 {
    let half = size / 2.0;
    let y = rng.random_range((playable.min.y + half.y)..=(playable.max.y - half.y));
    Vec2::new(world.x + half.x, y)
}

/// Uniform point in the playable rectangle
pub fn collectible_spawn_point(playable: &Rect, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.random_range(playable.min.x..=playable.max.x),
        rng.random_range(playable.min.y..=playable.max.y),
    )
}

/// Spawn one enemy on its leftward traversal
pub fn spawn_enemy(state: &mut GameState) -> ActorId {
    let settings = &state.settings;
    let size = settings.enemy_size;
    let duration = settings.enemy_traversal_duration;
    let world = settings.world_size;
    let pos = enemy_spawn_point(world, &state.playable, size, &mut state.rng);

    // Ends with the box fully off the left edge
    let distance = world.x + size.x;

    let id = state.next_entity_id();
    let mut enemy = Actor::new(id, ActorKind::Enemy, pos, size, distance / duration);
    enemy.vel = Vec2::new(-enemy.speed, 0.0);
    enemy.state = MotionState::Moving;
    enemy.lifetime = Some(duration);

    log::debug!("Spawned enemy {} at {:?}", id, pos);
    state.insert_actor(enemy)
}

/// Spawn one stationary collectible
pub fn spawn_collectible(state: &mut GameState) -> ActorId {
    let size = state.settings.collectible_size;
    let lifetime = state.settings.collectible_lifetime;
    let pos = collectible_spawn_point(&state.playable, &mut state.rng);

    let id = state.next_entity_id();
    let mut cat = Actor::new(id, ActorKind::Collectible, pos, size, 0.0);
    cat.lifetime = Some(lifetime);

    log::debug!("Spawned cat {} at {:?}", id, pos);
    state.insert_actor(cat)
}

/// Fire due spawn triggers
pub fn update(state: &mut GameState, dt: f32) {
    let (enemy_due, cat_due) = state.spawner.advance(
        dt,
        state.settings.enemy_spawn_period,
        state.settings.collectible_spawn_period,
    );
    if enemy_due {
        spawn_enemy(state);
    }
    if cat_due {
        spawn_collectible(state);
    }
}

/// Move enemies along their traversal and retire anything whose lifetime ran
/// out. Followers are driven by the train instead.
pub fn advance_actors(state: &mut GameState, dt: f32) {
    let mut expired = Vec::new();

    for actor in state.actors.values_mut() {
        if actor.kind == ActorKind::Enemy {
            actor.pos = vector::integrate(actor.pos, actor.vel, dt);
        }
        if let Some(lifetime) = actor.lifetime.as_mut() {
            *lifetime -= dt;
            if *lifetime <= 0.0 {
                expired.push(actor.id);
            }
        }
    }

    for id in expired {
        state.retire_actor(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::GameEvent;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn new_state() -> GameState {
        GameState::new(Settings::default(), 777).unwrap()
    }

    #[test]
    fn test_triggers_fire_immediately_then_periodically() {
        let mut spawner = SpawnScheduler::default();
        assert_eq!(spawner.advance(0.25, 2.0, 1.0), (true, true));
        assert_eq!(spawner.advance(0.5, 2.0, 1.0), (false, false));
        // t = 1.0
        assert_eq!(spawner.advance(0.25, 2.0, 1.0), (false, true));
        // t = 2.0
        assert_eq!(spawner.advance(1.0, 2.0, 1.0), (true, true));
    }

    #[test]
    fn test_long_frame_fires_once_and_keeps_phase() {
        let mut spawner = SpawnScheduler::default();
        assert_eq!(spawner.advance(3.5, 2.0, 1.0), (true, true));
        assert_eq!(spawner.enemy_timer, 0.5);
        assert_eq!(spawner.collectible_timer, 0.5);
        // t = 4.0 lands on both schedules
        assert_eq!(spawner.advance(0.5, 2.0, 1.0), (true, true));
    }

    #[test]
    fn test_huge_frame_returns_with_timers_in_range() {
        let mut spawner = SpawnScheduler::default();
        assert_eq!(spawner.advance(1.0e9, 2.0, 1.0), (true, true));
        assert!(spawner.enemy_timer > 0.0 && spawner.enemy_timer <= 2.0);
        assert!(spawner.collectible_timer > 0.0 && spawner.collectible_timer <= 1.0);
    }

    #[test]
    fn test_enemy_spawn_point_is_off_screen_in_band() {
        let settings = Settings::default();
        let playable = settings.playable_rect();
        let size = settings.enemy_size;
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let p = enemy_spawn_point(settings.world_size, &playable, size, &mut rng);
            assert_eq!(p.x - size.x / 2.0, settings.world_size.x);
            assert!(p.y - size.y / 2.0 >= playable.min.y);
            assert!(p.y + size.y / 2.0 <= playable.max.y);
        }
    }

    #[test]
    fn test_collectible_spawn_point_in_playable_rect() {
        let playable = Settings::default().playable_rect();
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..200 {
            assert!(playable.contains_point(collectible_spawn_point(&playable, &mut rng)));
        }
    }

    #[test]
    fn test_enemy_crosses_and_retires() {
        let mut state = new_state();
        let id = spawn_enemy(&mut state);
        let start_x = state.actors[&id].pos.x;
        let width = state.settings.enemy_size.x;
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::SpawnActor { kind: ActorKind::Enemy, .. }]
        ));

        // Halfway: crossed half the world plus half its own width
        advance_actors(&mut state, 1.0);
        let expected = start_x - (state.settings.world_size.x + width) / 2.0;
        assert!((state.actors[&id].pos.x - expected).abs() < 1e-2);

        advance_actors(&mut state, 1.0);
        assert!(!state.actors.contains_key(&id));
        assert_eq!(state.drain_events(), vec![GameEvent::RetireActor { id }]);
    }

    #[test]
    fn test_collectible_sits_still_then_expires() {
        let mut state = new_state();
        let id = spawn_collectible(&mut state);
        let pos = state.actors[&id].pos;

        advance_actors(&mut state, 5.0);
        assert_eq!(state.actors[&id].pos, pos);

        advance_actors(&mut state, 5.0);
        assert!(!state.actors.contains_key(&id));
    }

    #[test]
    fn test_followers_do_not_expire() {
        let mut state = new_state();
        let id = spawn_collectible(&mut state);
        state.capture(id);
        advance_actors(&mut state, 60.0);
        assert!(state.actors.contains_key(&id));
    }

    #[test]
    fn test_update_spawns_both_kinds_on_first_frame() {
        let mut state = new_state();
        update(&mut state, 1.0 / 60.0);
        let kinds: Vec<_> = state.actors.values().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![ActorKind::Enemy, ActorKind::Collectible]);
    }
}
