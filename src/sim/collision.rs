//! Player-vs-actor collision detection and resolution
//!
//! Runs once per frame on post-movement positions. Detection is plain AABB
//! overlap; enemy boxes are shrunk by a fixed inset so grazing passes don't
//! count. Resolution picks up every touched collectible first, then applies
//! at most one enemy hit (the hit itself starts the invulnerability window).

use std::collections::BTreeMap;

use super::rect::Rect;
use super::state::{Actor, ActorId, ActorKind, EffectKind, GameEvent, GameState};

/// What the player touched this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collisions {
    /// Collectibles overlapping the player, in id order
    pub collectibles: Vec<ActorId>,
    /// First enemy overlapping the player (None while invulnerable)
    pub enemy: Option<ActorId>,
}

impl Collisions {
    pub fn is_empty(&self) -> bool {
        self.collectibles.is_empty() && self.enemy.is_none()
    }
}

/// Enemy hit test: the enemy's box inset by `inset` against the player's
/// full box
#[inline]
pub fn enemy_hits_player(player_box: &Rect, enemy_box: &Rect, inset: f32) -> bool {
    enemy_box.inset(inset).intersects(player_box)
}

/// Collectible hit test: no inset
#[inline]
pub fn collectible_hits_player(player_box: &Rect, collectible_box: &Rect) -> bool {
    collectible_box.intersects(player_box)
}

/// Find everything the player overlaps. Enemies are skipped entirely while
/// the player is invulnerable.
pub fn detect(player: &Actor, actors: &BTreeMap<ActorId, Actor>, enemy_inset: f32) -> Collisions {
    let player_box = player.bounding_box();
    let check_enemies = !player.is_invulnerable();

    let mut collisions = Collisions::default();
    for actor in actors.values() {
        match actor.kind {
            ActorKind::Collectible => {
                if collectible_hits_player(&player_box, &actor.bounding_box()) {
                    collisions.collectibles.push(actor.id);
                }
            }
            ActorKind::Enemy if check_enemies && collisions.enemy.is_none() => {
                if enemy_hits_player(&player_box, &actor.bounding_box(), enemy_inset) {
                    collisions.enemy = Some(actor.id);
                }
            }
            _ => {}
        }
    }
    collisions
}

/// Apply detected collisions: capture collectibles, then take the enemy hit
pub fn resolve(state: &mut GameState, collisions: &Collisions) {
    for &id in &collisions.collectibles {
        if state.capture(id) {
            state.emit(GameEvent::PlayEffect(EffectKind::CollectibleHit));
        }
    }

    if state.player.is_invulnerable() {
        return;
    }
    let Some(enemy) = collisions.enemy else {
        return;
    };
    if !state.retire_actor(enemy) {
        return;
    }

    state.player.invulnerable = state.settings.invulnerable_duration;
    state.lives = state.lives.saturating_sub(1);
    state.emit(GameEvent::PlayEffect(EffectKind::EnemyHit));
    log::info!("Hit by enemy {} ({} lives left)", enemy, state.lives);
}

/// Detect and resolve for the current frame
pub fn update(state: &mut GameState) {
    let collisions = detect(&state.player, &state.actors, state.settings.enemy_hit_inset);
    if !collisions.is_empty() {
        resolve(state, &collisions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(Settings::default(), 4242).unwrap()
    }

    fn add(state: &mut GameState, kind: ActorKind, pos: Vec2, size: Vec2) -> ActorId {
        let id = state.next_entity_id();
        state.insert_actor(Actor::new(id, kind, pos, size, 0.0))
    }

    #[test]
    fn test_enemy_inset_forgives_near_miss() {
        let player = Rect::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        // Boxes overlap by 10 along x
        let enemy = Rect::from_center_size(Vec2::new(90.0, 0.0), Vec2::new(100.0, 100.0));
        assert!(collectible_hits_player(&player, &enemy));
        assert!(!enemy_hits_player(&player, &enemy, 20.0));
        assert!(enemy_hits_player(&player, &enemy, 0.0));
    }

    #[test]
    fn test_collectible_becomes_follower_same_frame() {
        let mut state = new_state();
        let pos = state.player.pos;
        let cat_pos = pos + Vec2::new(30.0, 0.0);
        let cat = add(&mut state, ActorKind::Collectible, cat_pos, Vec2::splat(100.0));
        state.drain_events();

        update(&mut state);

        assert_eq!(state.train, vec![cat]);
        assert_eq!(state.actors[&cat].kind, ActorKind::Follower);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Captured { id: cat },
                GameEvent::PlayEffect(EffectKind::CollectibleHit),
            ]
        );
    }

    #[test]
    fn test_all_touching_collectibles_captured() {
        let mut state = new_state();
        let pos = state.player.pos;
        let a = add(&mut state, ActorKind::Collectible, pos, Vec2::splat(50.0));
        let size = Vec2::splat(50.0);
        let b = add(&mut state, ActorKind::Collectible, pos + Vec2::new(40.0, 20.0), size);
        let far = add(&mut state, ActorKind::Collectible, pos + Vec2::new(900.0, 0.0), size);

        update(&mut state);

        assert_eq!(state.train, vec![a, b]);
        assert_eq!(state.actors[&far].kind, ActorKind::Collectible);
    }

    #[test]
    fn test_captures_while_invulnerable() {
        let mut state = new_state();
        state.player.invulnerable = 2.0;
        let pos = state.player.pos;
        add(&mut state, ActorKind::Collectible, pos, Vec2::splat(50.0));
        update(&mut state);
        assert_eq!(state.train_len(), 1);
    }

    #[test]
    fn test_enemy_hit_starts_invulnerability() {
        let mut state = new_state();
        let pos = state.player.pos;
        let enemy = add(&mut state, ActorKind::Enemy, pos, Vec2::splat(100.0));
        state.drain_events();

        update(&mut state);

        assert!(!state.actors.contains_key(&enemy));
        assert_eq!(state.player.invulnerable, state.settings.invulnerable_duration);
        assert_eq!(state.lives, state.settings.lives - 1);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::RetireActor { id: enemy },
                GameEvent::PlayEffect(EffectKind::EnemyHit),
            ]
        );
    }

    #[test]
    fn test_only_first_enemy_hit_counts() {
        let mut state = new_state();
        let pos = state.player.pos;
        let first = add(&mut state, ActorKind::Enemy, pos, Vec2::splat(100.0));
        let second_pos = pos + Vec2::new(10.0, 0.0);
        let second = add(&mut state, ActorKind::Enemy, second_pos, Vec2::splat(100.0));

        update(&mut state);

        assert!(!state.actors.contains_key(&first));
        assert!(state.actors.contains_key(&second));
        assert_eq!(state.lives, state.settings.lives - 1);

        // Still overlapping next frame, but invulnerable now
        update(&mut state);
        assert!(state.actors.contains_key(&second));
        assert_eq!(state.lives, state.settings.lives - 1);
    }

    #[test]
    fn test_detect_skips_enemies_while_invulnerable() {
        let mut state = new_state();
        let pos = state.player.pos;
        add(&mut state, ActorKind::Enemy, pos, Vec2::splat(100.0));
        state.player.invulnerable = 0.5;
        let collisions = detect(&state.player, &state.actors, 20.0);
        assert!(collisions.is_empty());
    }

    #[test]
    fn test_retired_enemy_is_not_detected() {
        let mut state = new_state();
        let pos = state.player.pos;
        let enemy = add(&mut state, ActorKind::Enemy, pos, Vec2::splat(100.0));
        assert_eq!(detect(&state.player, &state.actors, 20.0).enemy, Some(enemy));

        state.retire_actor(enemy);
        update(&mut state);
        assert_eq!(state.lives, state.settings.lives);
        assert!(!state.player.is_invulnerable());
    }

    #[test]
    fn test_followers_are_ignored() {
        let mut state = new_state();
        let pos = state.player.pos;
        let cat = add(&mut state, ActorKind::Collectible, pos, Vec2::splat(50.0));
        update(&mut state);
        let collisions = detect(&state.player, &state.actors, 20.0);
        assert!(collisions.is_empty());
        assert_eq!(state.train, vec![cat]);
    }
}
