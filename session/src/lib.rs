#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative bot-side state for a Border Sentry round.
//!
//! The session is the single mutable owner of everything the bot knows about
//! the battlefield: the opponent tracker, the latest own-state snapshot, the
//! arena and the round configuration. Host events are folded in through the
//! free [`apply`] entry point; systems read the result exclusively through
//! the [`query`] module, which hands out owned copies.

use border_sentry_core::{
    ArenaSize, BotId, ContactSnapshot, EngagementConfig, Event, OwnSnapshot, Position, Tick,
};

const DEFAULT_ARENA_WIDTH: f64 = 800.0;
const DEFAULT_ARENA_HEIGHT: f64 = 600.0;

/// Per-round session state owned by a single bot.
#[derive(Debug)]
pub struct Session {
    config: EngagementConfig,
    arena: ArenaSize,
    tick: Tick,
    own: OwnSnapshot,
    tracker: TargetTracker,
    enemies_alive: u32,
    last_wall_collision: Option<Tick>,
    last_bullet_impact: Option<Tick>,
}

impl Session {
    /// Creates a fresh session for a new round.
    ///
    /// The arena falls back to the engine default until the host announces
    /// the real dimensions through [`Event::RoundStarted`].
    #[must_use]
    pub fn new(config: EngagementConfig) -> Self {
        Self {
            config,
            arena: ArenaSize::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT),
            tick: Tick::new(0),
            own: OwnSnapshot::default(),
            tracker: TargetTracker::new(),
            enemies_alive: 0,
            last_wall_collision: None,
            last_bullet_impact: None,
        }
    }

    /// Read-only access to the opponent tracker.
    #[must_use]
    pub fn tracker(&self) -> &TargetTracker {
        &self.tracker
    }
}

/// Folds a host event into the session state.
pub fn apply(session: &mut Session, event: &Event) {
    match event {
        Event::RoundStarted { arena, enemy_count } => {
            session.arena = *arena;
            session.enemies_alive = *enemy_count;
            session.tick = Tick::new(0);
            session.own = OwnSnapshot::default();
            session.tracker.clear();
            session.last_wall_collision = None;
            session.last_bullet_impact = None;
        }
        Event::TickStarted { tick, own } => {
            session.tick = *tick;
            session.own = *own;
            session.enemies_alive = own.enemies_alive;
        }
        Event::BotSighted {
            id,
            tick,
            position,
            heading,
            speed,
        } => {
            session
                .tracker
                .update(*id, *position, *heading, *speed, *tick);
        }
        Event::BotPerished { id } => {
            session.tracker.remove(*id);
            session.enemies_alive = session.enemies_alive.saturating_sub(1);
        }
        Event::WallCollision { tick } => {
            session.last_wall_collision = Some(*tick);
        }
        Event::BulletImpact { tick, .. } => {
            session.last_bullet_impact = Some(*tick);
        }
    }
}

/// Mapping from opponent identifiers to their last observed state.
///
/// Every sighting overwrites all fields for its identifier. No smoothing or
/// filtering happens between observations: the last one wins.
#[derive(Debug, Default)]
pub struct TargetTracker {
    contacts: Vec<ContactSnapshot>,
}

impl TargetTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the tracked state for `id`.
    pub fn update(&mut self, id: BotId, position: Position, heading: f64, speed: f64, tick: Tick) {
        let snapshot = ContactSnapshot {
            id,
            position,
            heading,
            speed,
            last_seen: tick,
        };
        match self
            .contacts
            .binary_search_by_key(&id, |contact| contact.id)
        {
            Ok(index) => self.contacts[index] = snapshot,
            Err(index) => self.contacts.insert(index, snapshot),
        }
    }

    /// Removes the tracked state for `id`, if present.
    pub fn remove(&mut self, id: BotId) {
        if let Ok(index) = self
            .contacts
            .binary_search_by_key(&id, |contact| contact.id)
        {
            let _ = self.contacts.remove(index);
        }
    }

    /// Looks up the tracked state for `id`.
    #[must_use]
    pub fn get(&self, id: BotId) -> Option<&ContactSnapshot> {
        self.contacts
            .binary_search_by_key(&id, |contact| contact.id)
            .ok()
            .map(|index| &self.contacts[index])
    }

    /// Number of opponents currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Reports whether the tracker holds no opponents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Iterator over tracked opponents in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ContactSnapshot> {
        self.contacts.iter()
    }

    fn clear(&mut self) {
        self.contacts.clear();
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use super::Session;
    use border_sentry_core::{
        ArenaSize, BotId, ContactSnapshot, ContactView, EngagementConfig, OwnSnapshot, Tick,
        WELCOME_BANNER,
    };

    /// Retrieves the banner adapters may display when the round begins.
    #[must_use]
    pub fn welcome_banner(_session: &Session) -> &'static str {
        WELCOME_BANNER
    }

    /// Dimensions of the arena for the current round.
    #[must_use]
    pub fn arena(session: &Session) -> ArenaSize {
        session.arena
    }

    /// Engagement configuration fixed at round start.
    #[must_use]
    pub fn config(session: &Session) -> EngagementConfig {
        session.config
    }

    /// Latest turn number reported by the host.
    #[must_use]
    pub fn tick(session: &Session) -> Tick {
        session.tick
    }

    /// Latest own-state snapshot reported by the host.
    #[must_use]
    pub fn own(session: &Session) -> OwnSnapshot {
        session.own
    }

    /// Number of opponents still alive in the round.
    #[must_use]
    pub fn enemies_alive(session: &Session) -> u32 {
        session.enemies_alive
    }

    /// Captures a read-only view over every tracked opponent.
    #[must_use]
    pub fn contacts(session: &Session) -> ContactView {
        ContactView::from_snapshots(session.tracker.iter().copied().collect())
    }

    /// Looks up the tracked state for a single opponent.
    #[must_use]
    pub fn contact(session: &Session, id: BotId) -> Option<ContactSnapshot> {
        session.tracker.get(id).copied()
    }

    /// Turn of the most recent wall collision, if any happened this round.
    #[must_use]
    pub fn last_wall_collision(session: &Session) -> Option<Tick> {
        session.last_wall_collision
    }

    /// Turn of the most recent enemy projectile impact, if any.
    #[must_use]
    pub fn last_bullet_impact(session: &Session) -> Option<Tick> {
        session.last_bullet_impact
    }
}
