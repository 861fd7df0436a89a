#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Border Sentry combat stack.
//!
//! This crate defines the message surface that connects the host runtime,
//! the authoritative bot session, and pure systems. The host delivers
//! [`Event`] values describing what happened on the battlefield, the session
//! folds those events into its tracked state, and systems respond with
//! [`Command`] batches for the host to execute on the next turn.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when a round begins.
pub const WELCOME_BANNER: &str = "Border Sentry online.";

/// Side length of a bot's bounding square in arena units.
pub const BOT_SIZE: f64 = 36.0;

/// Half of [`BOT_SIZE`], the margin kept between aim points and arena walls.
pub const HALF_BOT_SIZE: f64 = 18.0;

/// Largest fire power the engine accepts.
pub const MAX_FIREPOWER: f64 = 3.0;

/// Smallest fire power the engine accepts.
pub const MIN_FIREPOWER: f64 = 0.1;

/// Top speed of a bot in arena units per tick.
pub const MAX_SPEED: f64 = 8.0;

/// Fastest the radar can rotate in degrees per tick.
pub const MAX_RADAR_TURN_RATE: f64 = 45.0;

/// Fastest the gun can rotate in degrees per tick.
pub const MAX_GUN_TURN_RATE: f64 = 20.0;

/// Fastest the body can rotate in degrees per tick.
pub const MAX_BODY_TURN_RATE: f64 = 10.0;

/// Unique identifier assigned to a bot for the duration of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BotId(u32);

impl BotId {
    /// Creates a new bot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Discrete simulation step counter maintained by the host engine.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Tick(u64);

impl Tick {
    /// Creates a tick counter with the provided value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the underlying tick number.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Number of ticks elapsed since `earlier`, saturating at zero.
    #[must_use]
    pub const fn since(&self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Location in the arena expressed in world units.
///
/// The coordinate system follows the engine convention: the origin sits in
/// the lower-left corner, `x` grows to the right and `y` grows upward.
/// Headings are measured in degrees with 0 pointing up (+y) and positive
/// angles turning clockwise, so a heading `h` displaces by
/// `(sin h, cos h)` per unit of distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate in arena units.
    pub x: f64,
    /// Vertical coordinate in arena units.
    pub y: f64,
}

impl Position {
    /// Creates a new position from explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.hypot(dy)
    }

    /// Absolute bearing from this position to `other` in degrees.
    ///
    /// Returned angles lie in `(-180, 180]` with 0 pointing up and positive
    /// values clockwise, matching the heading convention.
    #[must_use]
    pub fn bearing_to(self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy).to_degrees()
    }

    /// Position reached by travelling `distance` along `heading` degrees.
    #[must_use]
    pub fn offset_along(self, heading: f64, distance: f64) -> Self {
        let radians = heading.to_radians();
        Self {
            x: self.x + radians.sin() * distance,
            y: self.y + radians.cos() * distance,
        }
    }
}

/// Dimensions of the rectangular battle arena.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaSize {
    width: f64,
    height: f64,
}

impl ArenaSize {
    /// Creates a new arena description from explicit dimensions.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Horizontal extent of the arena in world units.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Vertical extent of the arena in world units.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Clamps `position` into the arena interior, keeping `margin` units of
    /// clearance from every wall.
    #[must_use]
    pub fn clamp_to_interior(&self, position: Position, margin: f64) -> Position {
        Position {
            x: limit(position.x, margin, self.width - margin),
            y: limit(position.y, margin, self.height - margin),
        }
    }
}

/// Limits a value to the inclusive `[min, max]` range.
fn limit(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Normalizes a relative angle into `(-180, 180]` degrees.
///
/// Adjustment happens by repeated ±360 steps rather than a modulo so the
/// sign convention at the boundary stays explicit: exactly -180 maps to
/// +180.
#[must_use]
pub fn normalize_relative_angle(angle: f64) -> f64 {
    let mut normalized = angle;
    while normalized > 180.0 {
        normalized -= 360.0;
    }
    while normalized <= -180.0 {
        normalized += 360.0;
    }
    normalized
}

/// Projectile power accepted by the engine's fire command.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FirePower(f64);

impl FirePower {
    /// Creates a fire power, rejecting values outside the engine range.
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if !value.is_finite() || value < MIN_FIREPOWER || value > MAX_FIREPOWER {
            return Err(ConfigError::PowerOutOfRange { power: value });
        }
        Ok(Self(value))
    }

    /// Creates a fire power by clamping `value` into the provided range.
    ///
    /// Both bounds are themselves limited to the engine range first.
    #[must_use]
    pub fn clamped(value: f64, min: f64, max: f64) -> Self {
        let min = limit(min, MIN_FIREPOWER, MAX_FIREPOWER);
        let max = limit(max, MIN_FIREPOWER, MAX_FIREPOWER);
        Self(limit(value, min, max))
    }

    /// Largest power the engine accepts.
    #[must_use]
    pub const fn maximum() -> Self {
        Self(MAX_FIREPOWER)
    }

    /// Retrieves the raw power value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Speed of a projectile fired at this power, in units per tick.
    #[must_use]
    pub fn projectile_speed(&self) -> f64 {
        20.0 - 3.0 * self.0
    }
}

/// Strategy used to pick the power of an outgoing shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirepowerPolicy {
    /// Always fire at the configured power.
    Fixed,
    /// Scale power down with target distance and speed, trading damage for
    /// rate of fire against fast or distant targets.
    RangeScaled,
}

/// Tunable parameters fixed at round start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngagementConfig {
    firepower: FirePower,
    policy: FirepowerPolicy,
    border_depth: f64,
}

impl EngagementConfig {
    /// Creates a new engagement configuration.
    #[must_use]
    pub const fn new(firepower: FirePower, policy: FirepowerPolicy, border_depth: f64) -> Self {
        Self {
            firepower,
            policy,
            border_depth,
        }
    }

    /// Configured base fire power.
    #[must_use]
    pub const fn firepower(&self) -> FirePower {
        self.firepower
    }

    /// Configured fire power strategy.
    #[must_use]
    pub const fn policy(&self) -> FirepowerPolicy {
        self.policy
    }

    /// Depth of the patrolled border band in arena units.
    #[must_use]
    pub const fn border_depth(&self) -> f64 {
        self.border_depth
    }

    /// Speed of projectiles fired at the configured base power.
    #[must_use]
    pub fn projectile_speed(&self) -> f64 {
        self.firepower.projectile_speed()
    }

    /// Resolves the power for a shot at the given target distance and speed.
    #[must_use]
    pub fn power_for_shot(&self, distance: f64, target_speed: f64) -> FirePower {
        match self.policy {
            FirepowerPolicy::Fixed => self.firepower,
            FirepowerPolicy::RangeScaled => {
                let scaled = MAX_FIREPOWER - distance / 150.0 - target_speed.abs() / 16.0;
                FirePower::clamped(scaled, 1.0, self.firepower.get())
            }
        }
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            firepower: FirePower::maximum(),
            policy: FirepowerPolicy::Fixed,
            border_depth: 100.0,
        }
    }
}

/// Errors surfaced when validating an [`EngagementConfig`] at start-up.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The requested fire power falls outside the engine's accepted range.
    #[error("fire power {power} is outside the accepted range {MIN_FIREPOWER}..={MAX_FIREPOWER}")]
    PowerOutOfRange {
        /// Power value that was rejected.
        power: f64,
    },
    /// The derived projectile speed is not a positive number.
    #[error("projectile speed {speed} must be positive")]
    NonPositiveProjectileSpeed {
        /// Projectile speed that was rejected.
        speed: f64,
    },
    /// The border band depth is not a positive number.
    #[error("border depth {depth} must be positive")]
    NonPositiveBorderDepth {
        /// Border depth that was rejected.
        depth: f64,
    },
    /// The border band does not fit inside the configured arena.
    #[error("border depth {depth} does not fit a {width}x{height} arena")]
    BorderExceedsArena {
        /// Border depth that was rejected.
        depth: f64,
        /// Arena width the band was checked against.
        width: f64,
        /// Arena height the band was checked against.
        height: f64,
    },
}

/// Events delivered by the host runtime, consumed by the session and systems.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces a new round and the fixed battlefield parameters.
    RoundStarted {
        /// Dimensions of the arena for the round.
        arena: ArenaSize,
        /// Number of living opponents at round start.
        enemy_count: u32,
    },
    /// Marks the beginning of a simulation turn.
    TickStarted {
        /// Turn number assigned by the host.
        tick: Tick,
        /// Fresh snapshot of the bot's own state.
        own: OwnSnapshot,
    },
    /// Reports that the radar swept over an opponent.
    BotSighted {
        /// Identifier of the sighted opponent.
        id: BotId,
        /// Turn on which the sighting happened.
        tick: Tick,
        /// Observed position of the opponent.
        position: Position,
        /// Observed heading of the opponent in degrees.
        heading: f64,
        /// Observed speed of the opponent in units per tick.
        speed: f64,
    },
    /// Reports that an opponent was eliminated from the round.
    BotPerished {
        /// Identifier of the eliminated opponent.
        id: BotId,
    },
    /// Reports that the bot collided with an arena wall.
    WallCollision {
        /// Turn on which the collision happened.
        tick: Tick,
    },
    /// Reports that the bot was struck by an enemy projectile.
    BulletImpact {
        /// Turn on which the impact happened.
        tick: Tick,
        /// Bearing from the bot to the projectile's origin, in degrees.
        bearing: f64,
    },
}

/// Commands handed back to the host runtime for execution next turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Rotate the radar at the given rate in degrees per tick.
    SweepRadar {
        /// Signed turn rate; positive sweeps clockwise.
        turn_rate: f64,
    },
    /// Rotate the gun at the given rate in degrees per tick.
    AimGun {
        /// Signed turn rate; positive turns clockwise.
        turn_rate: f64,
    },
    /// Fire a projectile at the given power.
    Fire {
        /// Power of the shot.
        power: FirePower,
    },
    /// Rotate the body at the given rate in degrees per tick.
    Steer {
        /// Signed turn rate; positive turns clockwise.
        turn_rate: f64,
    },
    /// Accelerate or brake toward the given speed in units per tick.
    Throttle {
        /// Desired signed speed; negative drives in reverse.
        target_speed: f64,
    },
}

/// Fresh host-reported state of the bot itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OwnSnapshot {
    /// Current position in the arena.
    pub position: Position,
    /// Body heading in degrees.
    pub heading: f64,
    /// Current signed speed in units per tick.
    pub speed: f64,
    /// Gun heading in degrees.
    pub gun_heading: f64,
    /// Radar heading in degrees.
    pub radar_heading: f64,
    /// Whether the gun cooldown has elapsed.
    pub gun_ready: bool,
    /// Number of opponents still alive in the round.
    pub enemies_alive: u32,
}

impl Default for OwnSnapshot {
    fn default() -> Self {
        Self {
            position: Position::default(),
            heading: 0.0,
            speed: 0.0,
            gun_heading: 0.0,
            radar_heading: 0.0,
            gun_ready: false,
            enemies_alive: 0,
        }
    }
}

/// Last-known kinematic state of a tracked opponent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactSnapshot {
    /// Identifier of the tracked opponent.
    pub id: BotId,
    /// Last observed position.
    pub position: Position,
    /// Last observed heading in degrees.
    pub heading: f64,
    /// Last observed signed speed in units per tick.
    pub speed: f64,
    /// Turn on which the opponent was last sighted.
    pub last_seen: Tick,
}

/// Read-only view over every tracked opponent, ordered by identifier.
#[derive(Clone, Debug, Default)]
pub struct ContactView {
    snapshots: Vec<ContactSnapshot>,
}

impl ContactView {
    /// Creates a new contact view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ContactSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ContactSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot for a specific opponent, if tracked.
    #[must_use]
    pub fn get(&self, id: BotId) -> Option<&ContactSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of tracked opponents in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no opponents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ContactSnapshot> {
        self.snapshots
    }
}

/// Engagement decision produced by target selection for a single turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiringSolution {
    /// Opponent chosen as the target.
    pub target: BotId,
    /// Aim point the gun should converge on, clamped to the arena interior.
    pub aim_point: Position,
    /// Distance from own position to the aim point.
    pub distance: f64,
    /// Last observed speed of the target, consumed by fire power policies.
    pub target_speed: f64,
    /// Whether the aim point is a solved intercept rather than the
    /// last-seen fallback.
    pub intercept: bool,
}

/// Deterministic counters accumulated over a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngagementReport {
    /// Turns observed.
    pub ticks: u64,
    /// Sighting events received.
    pub sightings: u64,
    /// Opponents eliminated.
    pub eliminations: u64,
    /// Fire commands issued.
    pub shots: u64,
    /// Wall collisions suffered.
    pub wall_collisions: u64,
    /// Enemy projectile impacts suffered.
    pub bullet_impacts: u64,
}
