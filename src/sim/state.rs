//! Game state and core simulation types
//!
//! Actors live in a flat id-keyed arena; the renderer only ever sees
//! [`ActorSnapshot`]s and the [`GameEvent`] intents drained each frame.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawn::SpawnScheduler;
use super::steering::SteeringController;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Stable actor identifier (never reused within a run)
pub type ActorId = u32;

/// The player always has this id
pub const PLAYER_ID: ActorId = 0;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (train long enough, or out of lives)
    GameOver { won: bool },
}

/// What an actor is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    /// The zombie
    Player,
    /// Crosses the screen; hurts the player
    Enemy,
    /// Stray cat waiting to be picked up
    Collectible,
    /// Captured cat, part of the train
    Follower,
}

/// Motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    /// At rest (player snapped onto its target)
    #[default]
    Idle,
    /// Travelling with a non-zero velocity
    Moving,
}

/// A single actor record. An actor is alive exactly as long as it is in
/// [`GameState::actors`]; retiring removes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians, 0 = +x)
    pub orientation: f32,
    /// Hitbox size, centered on `pos`
    pub size: Vec2,
    /// Cruise speed (points/sec)
    pub speed: f32,
    pub state: MotionState,
    /// Seconds until the actor retires itself (enemies, uncaptured cats)
    #[serde(default)]
    pub lifetime: Option<f32>,
    /// Seconds of invulnerability left (player only)
    #[serde(default)]
    pub invulnerable: f32,
    /// Seconds left on the current train move (followers only)
    #[serde(default)]
    pub move_remaining: f32,
    /// Where the current train move ends (followers only)
    #[serde(default)]
    pub destination: Option<Vec2>,
}

impl Actor {
    pub fn new(id: ActorId, kind: ActorKind, pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            orientation: 0.0,
            size,
            speed,
            state: MotionState::Idle,
            lifetime: None,
            invulnerable: 0.0,
            move_remaining: 0.0,
            destination: None,
        }
    }

    /// World-space hitbox
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }
}

/// Effect cues for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    CollectibleHit,
    EnemyHit,
    Win,
    Lose,
}

/// Intents emitted by the simulation, consumed by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new actor entered the world
    SpawnActor {
        id: ActorId,
        kind: ActorKind,
        position: Vec2,
    },
    /// An actor left the world; drop its sprite
    RetireActor { id: ActorId },
    /// A collectible joined the train and is now a follower
    Captured { id: ActorId },
    PlayEffect(EffectKind),
    GameEnded { won: bool },
}

/// Read-only view of an actor for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub kind: ActorKind,
    pub position: Vec2,
    pub orientation: f32,
    pub size: Vec2,
    pub visible: bool,
}

impl From<&Actor> for ActorSnapshot {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            kind: actor.kind,
            position: actor.pos,
            orientation: actor.orientation,
            size: actor.size,
            visible: true,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG used for spawn positions
    pub rng: Pcg32,
    /// Validated world configuration
    pub settings: Settings,
    /// Region used for bounds reflection and spawn placement
    pub playable: Rect,
    pub phase: GamePhase,
    pub lives: u8,
    /// Simulated seconds since start
    pub elapsed: f32,
    /// Frames simulated
    pub time_ticks: u64,
    pub player: Actor,
    /// Pursuit target and steering state
    pub steering: SteeringController,
    /// Enemy and collectible spawn timers
    pub spawner: SpawnScheduler,
    /// Enemies, collectibles and followers keyed by id
    pub actors: BTreeMap<ActorId, Actor>,
    /// Follower ids in capture order (head first)
    pub train: Vec<ActorId>,
    /// Intents produced since the last drain
    #[serde(skip)]
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: ActorId,
}

impl GameState {
    /// Create a new game state; fails if the settings don't validate
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;

        let player = Actor::new(
            PLAYER_ID,
            ActorKind::Player,
            settings.player_start,
            settings.player_size,
            settings.player_speed,
        );

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            playable: settings.playable_rect(),
            phase: GamePhase::Playing,
            lives: settings.lives,
            elapsed: 0.0,
            time_ticks: 0,
            player,
            steering: SteeringController::default(),
            spawner: SpawnScheduler::default(),
            actors: BTreeMap::new(),
            train: Vec::new(),
            events: Vec::new(),
            next_id: PLAYER_ID + 1,
            settings,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue an intent for the host
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every intent produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Intents produced since the last drain, without consuming them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Add an actor to the arena and announce it
    pub fn insert_actor(&mut self, actor: Actor) -> ActorId {
        let id = actor.id;
        self.emit(GameEvent::SpawnActor {
            id,
            kind: actor.kind,
            position: actor.pos,
        });
        self.actors.insert(id, actor);
        id
    }

    /// Remove an enemy or collectible. Unknown ids (already removed) and
    /// followers are left alone; returns whether anything was retired.
    pub fn retire_actor(&mut self, id: ActorId) -> bool {
        let retirable = self
            .actors
            .get(&id)
            .is_some_and(|a| matches!(a.kind, ActorKind::Enemy | ActorKind::Collectible));
        if !retirable {
            return false;
        }

        if let Some(actor) = self.actors.remove(&id) {
            log::debug!("Retired {:?} {} at {:?}", actor.kind, id, actor.pos);
        }
        self.emit(GameEvent::RetireActor { id });
        true
    }

    /// Turn a collectible into a follower at the tail of the train.
    /// No-op for unknown ids or anything that isn't a collectible.
    pub fn capture(&mut self, id: ActorId) -> bool {
        let train_speed = self.settings.train_speed;
        let Some(actor) = self
            .actors
            .get_mut(&id)
            .filter(|a| a.kind == ActorKind::Collectible)
        else {
            return false;
        };

        actor.kind = ActorKind::Follower;
        actor.speed = train_speed;
        actor.vel = Vec2::ZERO;
        actor.orientation = 0.0;
        actor.lifetime = None;
        actor.move_remaining = 0.0;
        actor.destination = None;
        actor.state = MotionState::Idle;

        self.train.push(id);
        self.emit(GameEvent::Captured { id });
        log::info!("Captured cat {} (train length {})", id, self.train.len());
        true
    }

    /// Followers in train order
    pub fn followers(&self) -> impl Iterator<Item = &Actor> {
        self.train.iter().filter_map(|id| self.actors.get(id))
    }

    #[inline]
    pub fn train_len(&self) -> usize {
        self.train.len()
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// Blink cue while invulnerable: the window is split into
    /// `invulnerable_blinks` slices, hidden for the second half of each
    pub fn player_visible(&self) -> bool {
        let duration = self.settings.invulnerable_duration;
        let blinks = self.settings.invulnerable_blinks;
        if !self.player.is_invulnerable() || blinks == 0 || duration <= 0.0 {
            return true;
        }
        let slice = duration / blinks as f32;
        let elapsed = (duration - self.player.invulnerable).max(0.0);
        elapsed % slice <= slice / 2.0
    }

    /// Everything the renderer needs, player first, then by id
    pub fn snapshot(&self) -> Vec<ActorSnapshot> {
        let mut player = ActorSnapshot::from(&self.player);
        player.visible = self.player_visible();

        std::iter::once(player)
            .chain(self.actors.values().map(ActorSnapshot::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(Settings::default(), 12345).unwrap()
    }

    fn add(state: &mut GameState, kind: ActorKind, pos: Vec2) -> ActorId {
        let id = state.next_entity_id();
        state.insert_actor(Actor::new(id, kind, pos, Vec2::splat(50.0), 0.0))
    }

    #[test]
    fn test_new_state() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(400.0, 400.0));
        assert_eq!(state.player.kind, ActorKind::Player);
        assert_eq!(state.lives, 5);
        assert!(state.actors.is_empty());
        assert!(state.steering.target.is_none());
    }

    #[test]
    fn test_invalid_settings_never_start() {
        let settings = Settings {
            train_speed: -1.0,
            ..Default::default()
        };
        assert!(GameState::new(settings, 1).is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = new_state();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
        assert_ne!(a, PLAYER_ID);
    }

    #[test]
    fn test_retire_is_idempotent() {
        let mut state = new_state();
        let id = add(&mut state, ActorKind::Enemy, Vec2::new(100.0, 300.0));
        state.drain_events();

        assert!(state.retire_actor(id));
        assert!(!state.actors.contains_key(&id));
        assert!(!state.retire_actor(id));
        assert!(!state.retire_actor(9999));
        assert_eq!(state.pending_events(), &[GameEvent::RetireActor { id }]);
        assert_eq!(state.drain_events(), vec![GameEvent::RetireActor { id }]);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_capture_appends_to_train() {
        let mut state = new_state();
        let first = add(&mut state, ActorKind::Collectible, Vec2::new(100.0, 300.0));
        let second = add(&mut state, ActorKind::Collectible, Vec2::new(200.0, 300.0));
        let enemy = add(&mut state, ActorKind::Enemy, Vec2::new(300.0, 300.0));

        assert!(state.capture(second));
        assert!(state.capture(first));
        assert!(!state.capture(first));
        assert!(!state.capture(enemy));
        assert!(!state.capture(4242));

        assert_eq!(state.train, vec![second, first]);
        assert!(state.followers().all(|f| f.kind == ActorKind::Follower));
        assert_eq!(state.actors[&first].speed, state.settings.train_speed);
    }

    #[test]
    fn test_followers_cannot_be_retired() {
        let mut state = new_state();
        let id = add(&mut state, ActorKind::Collectible, Vec2::new(100.0, 300.0));
        state.capture(id);
        assert!(!state.retire_actor(id));
        assert_eq!(state.train_len(), 1);
    }

    #[test]
    fn test_player_blinks_while_invulnerable() {
        let mut state = new_state();
        assert!(state.player_visible());

        // 3s / 10 blinks = 0.3s slices; hidden for the back half of each
        state.player.invulnerable = 3.0 - 0.1;
        assert!(state.player_visible());
        state.player.invulnerable = 3.0 - 0.2;
        assert!(!state.player_visible());
        state.player.invulnerable = 3.0 - 0.35;
        assert!(state.player_visible());
    }

    #[test]
    fn test_snapshot_lists_player_first() {
        let mut state = new_state();
        let id = add(&mut state, ActorKind::Enemy, Vec2::new(100.0, 300.0));
        let snapshot = state.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, PLAYER_ID);
        assert_eq!(snapshot[1].id, id);
    }

    #[test]
    fn test_state_serializes() {
        let state = new_state();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed, state.seed);
        assert_eq!(restored.player.pos, state.player.pos);
    }
}
