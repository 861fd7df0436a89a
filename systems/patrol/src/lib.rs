#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Border patrol movement system.
//!
//! The sentry travels along the arena borders, never through the interior.
//! With a target in hand it closes the gap along whichever axis its current
//! border band allows, shifting between forward and reverse instead of ever
//! standing still; collisions and incoming fire reverse the travel
//! direction immediately.

use border_sentry_core::{
    normalize_relative_angle, ArenaSize, Command, EngagementConfig, Event, FiringSolution,
    OwnSnapshot, Tick, MAX_SPEED,
};

/// Clearance subtracted from the border depth when testing band membership.
const BORDER_RANGE_SLACK: f64 = 20.0;

/// Minimum ticks between voluntary travel-direction reversals.
const DIRECTION_SHIFT_COOLDOWN: u64 = 10;

/// Body turns smaller than this count as aligned with the travel axis.
const ALIGNMENT_TOLERANCE: f64 = 1.0;

/// Speeds below this count as standing still.
const STALL_SPEED: f64 = 0.01;

/// Patrol system owning the travel direction between turns.
#[derive(Debug)]
pub struct Patrol {
    direction: f64,
    last_direction_shift: Tick,
}

impl Default for Patrol {
    fn default() -> Self {
        Self {
            direction: 1.0,
            last_direction_shift: Tick::new(0),
        }
    }
}

impl Patrol {
    /// Creates a new patrol system travelling forward.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes this turn's events and appends steering commands.
    ///
    /// A [`Command::Throttle`] is appended every call; a [`Command::Steer`]
    /// only while a firing solution gives the patrol somewhere to go.
    pub fn handle(
        &mut self,
        events: &[Event],
        own: &OwnSnapshot,
        solution: Option<&FiringSolution>,
        arena: ArenaSize,
        config: &EngagementConfig,
        tick: Tick,
        out: &mut Vec<Command>,
    ) {
        let collided = events.iter().any(|event| {
            matches!(
                event,
                Event::WallCollision { .. } | Event::BulletImpact { .. }
            )
        });
        if collided {
            self.direction = -self.direction;
            self.last_direction_shift = tick;
        }

        if let Some(solution) = solution {
            self.close_on_target(own, solution, arena, config, tick, out);
        }

        out.push(Command::Throttle {
            target_speed: MAX_SPEED * self.direction,
        });
    }

    fn close_on_target(
        &mut self,
        own: &OwnSnapshot,
        solution: &FiringSolution,
        arena: ArenaSize,
        config: &EngagementConfig,
        tick: Tick,
        out: &mut Vec<Command>,
    ) {
        let border_range = (config.border_depth() - BORDER_RANGE_SLACK).max(0.0);

        let mut horizontal = own.position.y < border_range
            || own.position.y > arena.height() - border_range;
        let vertical =
            own.position.x < border_range || own.position.x > arena.width() - border_range;

        // In a corner either axis works; take the one with more ground to
        // cover toward the aim point.
        if horizontal && vertical {
            let dx = (solution.aim_point.x - own.position.x).abs();
            let dy = (solution.aim_point.y - own.position.y).abs();
            if dx <= dy {
                horizontal = false;
            }
        }

        let travel_heading = if horizontal { 90.0 } else { 0.0 };
        let turn_rate = normalize_relative_angle(travel_heading - own.heading);
        out.push(Command::Steer { turn_rate });

        // Direction changes only once the body points along the travel axis
        // or the bot has effectively stopped.
        if turn_rate.abs() >= ALIGNMENT_TOLERANCE && own.speed.abs() >= STALL_SPEED {
            return;
        }

        let delta = if horizontal {
            solution.aim_point.x - own.position.x
        } else {
            solution.aim_point.y - own.position.y
        };
        let mut new_direction = if delta > 0.0 { 1.0 } else { -1.0 };

        // Reversals are rate-limited: commit a new direction only once the
        // cooldown has passed, and prefer breaking free over chasing when
        // the bot has ground to a halt.
        if tick.since(self.last_direction_shift) > DIRECTION_SHIFT_COOLDOWN {
            if own.speed.abs() < 1.0 {
                new_direction = -self.direction;
            }
            if new_direction != self.direction {
                self.direction = new_direction;
                self.last_direction_shift = tick;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Patrol;
    use border_sentry_core::{
        ArenaSize, BotId, Command, EngagementConfig, Event, FiringSolution, OwnSnapshot, Position,
        Tick, MAX_SPEED,
    };

    fn arena() -> ArenaSize {
        ArenaSize::new(800.0, 600.0)
    }

    fn own(x: f64, y: f64, heading: f64, speed: f64) -> OwnSnapshot {
        OwnSnapshot {
            position: Position::new(x, y),
            heading,
            speed,
            ..OwnSnapshot::default()
        }
    }

    fn solution_at(x: f64, y: f64) -> FiringSolution {
        FiringSolution {
            target: BotId::new(1),
            aim_point: Position::new(x, y),
            distance: 0.0,
            target_speed: 0.0,
            intercept: true,
        }
    }

    fn throttle(commands: &[Command]) -> f64 {
        match commands.last() {
            Some(Command::Throttle { target_speed }) => *target_speed,
            other => panic!("expected throttle command, got {other:?}"),
        }
    }

    fn steer(commands: &[Command]) -> Option<f64> {
        commands.iter().find_map(|command| match command {
            Command::Steer { turn_rate } => Some(*turn_rate),
            _ => None,
        })
    }

    #[test]
    fn always_keeps_moving() {
        let mut patrol = Patrol::new();
        let mut out = Vec::new();

        patrol.handle(
            &[],
            &own(100.0, 50.0, 0.0, 8.0),
            None,
            arena(),
            &EngagementConfig::default(),
            Tick::new(1),
            &mut out,
        );

        assert_eq!(out.len(), 1);
        assert_eq!(throttle(&out), MAX_SPEED);
    }

    #[test]
    fn collision_reverses_travel_direction() {
        let mut patrol = Patrol::new();
        let mut out = Vec::new();

        patrol.handle(
            &[Event::WallCollision { tick: Tick::new(4) }],
            &own(100.0, 50.0, 0.0, 8.0),
            None,
            arena(),
            &EngagementConfig::default(),
            Tick::new(4),
            &mut out,
        );

        assert_eq!(throttle(&out), -MAX_SPEED);
    }

    #[test]
    fn bullet_impact_also_reverses() {
        let mut patrol = Patrol::new();
        let mut out = Vec::new();

        patrol.handle(
            &[Event::BulletImpact {
                tick: Tick::new(9),
                bearing: 120.0,
            }],
            &own(100.0, 50.0, 0.0, 8.0),
            None,
            arena(),
            &EngagementConfig::default(),
            Tick::new(9),
            &mut out,
        );

        assert_eq!(throttle(&out), -MAX_SPEED);
    }

    #[test]
    fn bottom_band_travels_horizontally_toward_the_target() {
        let mut patrol = Patrol::new();
        let mut out = Vec::new();

        // On the south border, target far to the east: steer onto the
        // horizontal axis and drive forward.
        patrol.handle(
            &[],
            &own(200.0, 50.0, 90.0, 8.0),
            Some(&solution_at(700.0, 50.0)),
            arena(),
            &EngagementConfig::default(),
            Tick::new(1),
            &mut out,
        );

        let turn = steer(&out).expect("steer command while engaged");
        assert!(turn.abs() < 1e-9, "already aligned east, got {turn}");
        assert_eq!(throttle(&out), MAX_SPEED);
    }

    #[test]
    fn west_band_travels_vertically_and_reverses_for_southern_targets() {
        let mut patrol = Patrol::new();
        let mut out = Vec::new();

        // On the west border heading north, target below us: keep the
        // vertical axis but drive in reverse once the shift cooldown allows.
        patrol.handle(
            &[],
            &own(50.0, 400.0, 0.0, 8.0),
            Some(&solution_at(50.0, 100.0)),
            arena(),
            &EngagementConfig::default(),
            Tick::new(20),
            &mut out,
        );

        let turn = steer(&out).expect("steer command while engaged");
        assert!(turn.abs() < 1e-9, "already aligned north, got {turn}");
        assert_eq!(throttle(&out), -MAX_SPEED);
    }

    #[test]
    fn corner_prefers_the_axis_with_more_ground_to_cover() {
        let mut patrol = Patrol::new();
        let mut out = Vec::new();

        // South-west corner, target mostly east: the horizontal axis covers
        // more distance, so the body steers toward east (90 degrees).
        patrol.handle(
            &[],
            &own(50.0, 50.0, 0.0, 8.0),
            Some(&solution_at(600.0, 100.0)),
            arena(),
            &EngagementConfig::default(),
            Tick::new(1),
            &mut out,
        );

        let turn = steer(&out).expect("steer command while engaged");
        assert!((turn - 90.0).abs() < 1e-9, "expected turn east, got {turn}");
    }

    #[test]
    fn stall_reversal_respects_the_cooldown() {
        let mut patrol = Patrol::new();
        let config = EngagementConfig::default();

        // Aligned, stopped, target ahead: direction would stay forward, but
        // after the cooldown a stalled bot reverses to break free.
        let stopped = own(200.0, 50.0, 90.0, 0.0);
        let solution = solution_at(700.0, 50.0);

        let mut early = Vec::new();
        patrol.handle(
            &[],
            &stopped,
            Some(&solution),
            arena(),
            &config,
            Tick::new(5),
            &mut early,
        );
        assert_eq!(throttle(&early), MAX_SPEED, "cooldown still running");

        let mut late = Vec::new();
        patrol.handle(
            &[],
            &stopped,
            Some(&solution),
            arena(),
            &config,
            Tick::new(20),
            &mut late,
        );
        assert_eq!(throttle(&late), -MAX_SPEED, "stalled bot reverses");
    }
}
