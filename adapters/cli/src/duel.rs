//! Scripted-duel harness standing in for the host game engine.
//!
//! The harness owns the ground truth: scripted opponents, own-bot
//! kinematics, projectiles in flight and the radar beam. Every tick it
//! delivers events to the session, asks the systems for commands and then
//! executes those commands with the engine's turn-rate and speed limits
//! applied. Nothing in here is part of the combat core; it exists so the
//! core can be exercised end to end without the real engine.

use border_sentry_core::{
    ArenaSize, BotId, Command, EngagementConfig, EngagementReport, Event, FiringSolution,
    OwnSnapshot, Position, Tick, HALF_BOT_SIZE, MAX_BODY_TURN_RATE, MAX_GUN_TURN_RATE,
    MAX_RADAR_TURN_RATE, MAX_SPEED,
};
use border_sentry_session::{self as session, query, Session};
use border_sentry_system_analytics::Analytics;
use border_sentry_system_gunnery::Gunnery;
use border_sentry_system_patrol::Patrol;
use border_sentry_system_radar_sweep::RadarSweep;
use border_sentry_system_target_selection::TargetSelection;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::scenario_transfer::{DuelScenario, ScriptedOpponent};

/// Gun heat applied per shot on top of the power-dependent share.
const GUN_HEAT_BASE: f64 = 1.0;
/// Heat removed from the gun every tick.
const GUN_COOLING_RATE: f64 = 0.1;
/// Largest speed change the drivetrain applies per tick.
const SPEED_STEP: f64 = 2.0;

/// Generates a reproducible scenario from a seed.
pub(crate) fn generate_scenario(
    seed: u64,
    width: u32,
    height: u32,
    opponent_count: u32,
) -> DuelScenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut opponents = Vec::with_capacity(opponent_count as usize);

    for index in 0..opponent_count {
        opponents.push(ScriptedOpponent {
            id: index + 1,
            x: rng.gen_range(HALF_BOT_SIZE..f64::from(width) - HALF_BOT_SIZE),
            y: rng.gen_range(HALF_BOT_SIZE..f64::from(height) - HALF_BOT_SIZE),
            heading: rng.gen_range(0.0..360.0),
            speed: rng.gen_range(2.0..=MAX_SPEED),
        });
    }

    DuelScenario {
        width,
        height,
        opponents,
    }
}

/// Result of a finished duel run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DuelOutcome {
    /// Analytics counters accumulated over the run.
    pub(crate) report: EngagementReport,
    /// Opponents still alive when the run ended.
    pub(crate) survivors: usize,
    /// Every command the core issued, in order.
    pub(crate) command_log: Vec<Command>,
}

#[derive(Clone, Copy, Debug)]
struct Opponent {
    id: BotId,
    position: Position,
    heading: f64,
    speed: f64,
}

#[derive(Clone, Copy, Debug)]
struct Projectile {
    position: Position,
    heading: f64,
    speed: f64,
}

#[derive(Clone, Copy, Debug)]
struct OwnState {
    position: Position,
    heading: f64,
    speed: f64,
    gun_heading: f64,
    radar_heading: f64,
    gun_heat: f64,
}

/// One scripted duel between the sentry and its opponents.
pub(crate) struct Duel {
    arena: ArenaSize,
    session: Session,
    selection: TargetSelection,
    gunnery: Gunnery,
    radar: RadarSweep,
    patrol: Patrol,
    analytics: Analytics,
    own: OwnState,
    opponents: Vec<Opponent>,
    projectiles: Vec<Projectile>,
    solutions: Vec<FiringSolution>,
    pending_deaths: Vec<BotId>,
    pending_wall_hit: bool,
    radar_arc_start: f64,
    radar_arc_sweep: f64,
}

impl Duel {
    /// Builds a duel from a scenario and the sentry's configuration.
    pub(crate) fn new(scenario: &DuelScenario, config: EngagementConfig) -> Self {
        let arena = ArenaSize::new(f64::from(scenario.width), f64::from(scenario.height));
        let opponents: Vec<Opponent> = scenario
            .opponents
            .iter()
            .map(|script| Opponent {
                id: BotId::new(script.id),
                position: Position::new(script.x, script.y),
                heading: script.heading,
                speed: script.speed,
            })
            .collect();

        Self {
            arena,
            session: Session::new(config),
            selection: TargetSelection::new(),
            gunnery: Gunnery::new(),
            radar: RadarSweep::new(),
            patrol: Patrol::new(),
            analytics: Analytics::new(),
            own: OwnState {
                position: Position::new(f64::from(scenario.width) / 2.0, HALF_BOT_SIZE),
                heading: 0.0,
                speed: 0.0,
                gun_heading: 0.0,
                radar_heading: 0.0,
                gun_heat: 0.0,
            },
            opponents,
            projectiles: Vec::new(),
            solutions: Vec::new(),
            pending_deaths: Vec::new(),
            pending_wall_hit: false,
            radar_arc_start: 0.0,
            radar_arc_sweep: 0.0,
        }
    }

    /// Read-only access to the bot session driving the duel.
    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the duel for at most `ticks` turns.
    pub(crate) fn run(&mut self, ticks: u64) -> DuelOutcome {
        let mut command_log = Vec::new();

        let round_start = vec![Event::RoundStarted {
            arena: self.arena,
            enemy_count: self.opponents.len() as u32,
        }];
        for event in &round_start {
            session::apply(&mut self.session, event);
        }
        self.analytics.handle(&round_start, &[]);

        for tick in 1..=ticks {
            let events = self.collect_events(Tick::new(tick));
            for event in &events {
                session::apply(&mut self.session, event);
            }

            let commands = self.decide(&events);
            self.analytics.handle(&events, &commands);
            debug!(
                "tick {tick}: {} events in, {} commands out",
                events.len(),
                commands.len()
            );

            self.execute(&commands);
            command_log.extend(commands);

            if self.opponents.is_empty() {
                info!("all opponents eliminated after {tick} ticks");
                break;
            }
        }

        DuelOutcome {
            report: self.analytics.report(),
            survivors: self.opponents.len(),
            command_log,
        }
    }

    fn collect_events(&mut self, tick: Tick) -> Vec<Event> {
        let mut events = vec![Event::TickStarted {
            tick,
            own: OwnSnapshot {
                position: self.own.position,
                heading: self.own.heading,
                speed: self.own.speed,
                gun_heading: self.own.gun_heading,
                radar_heading: self.own.radar_heading,
                gun_ready: self.own.gun_heat <= 0.0,
                enemies_alive: self.opponents.len() as u32,
            },
        }];

        if self.pending_wall_hit {
            self.pending_wall_hit = false;
            events.push(Event::WallCollision { tick });
        }

        for id in self.pending_deaths.drain(..) {
            events.push(Event::BotPerished { id });
        }

        for opponent in &self.opponents {
            let bearing = self.own.position.bearing_to(opponent.position);
            if arc_contains(self.radar_arc_start, self.radar_arc_sweep, bearing) {
                events.push(Event::BotSighted {
                    id: opponent.id,
                    tick,
                    position: opponent.position,
                    heading: opponent.heading,
                    speed: opponent.speed,
                });
            }
        }

        events
    }

    fn decide(&mut self, events: &[Event]) -> Vec<Command> {
        let own = query::own(&self.session);
        let contacts = query::contacts(&self.session);
        let arena = query::arena(&self.session);
        let config = query::config(&self.session);
        let tick = query::tick(&self.session);

        let mut commands = Vec::new();
        self.radar.handle(
            events,
            &own,
            &contacts,
            query::enemies_alive(&self.session),
            &mut commands,
        );
        self.selection
            .handle(&own, &contacts, arena, &config, &mut self.solutions);
        self.gunnery
            .handle(&own, self.solutions.first(), &config, &mut commands);
        self.patrol.handle(
            events,
            &own,
            self.solutions.first(),
            arena,
            &config,
            tick,
            &mut commands,
        );
        commands
    }

    fn execute(&mut self, commands: &[Command]) {
        for command in commands {
            match command {
                Command::SweepRadar { turn_rate } => {
                    self.radar_arc_sweep =
                        turn_rate.clamp(-MAX_RADAR_TURN_RATE, MAX_RADAR_TURN_RATE);
                }
                Command::AimGun { turn_rate } => {
                    let rate = turn_rate.clamp(-MAX_GUN_TURN_RATE, MAX_GUN_TURN_RATE);
                    self.own.gun_heading = (self.own.gun_heading + rate).rem_euclid(360.0);
                }
                Command::Fire { power } => {
                    if self.own.gun_heat <= 0.0 {
                        self.projectiles.push(Projectile {
                            position: self.own.position,
                            heading: self.own.gun_heading,
                            speed: power.projectile_speed(),
                        });
                        self.own.gun_heat = GUN_HEAT_BASE + power.get() / 5.0;
                        info!("shot fired at power {:.2}", power.get());
                    }
                }
                Command::Steer { turn_rate } => {
                    let rate = turn_rate.clamp(-MAX_BODY_TURN_RATE, MAX_BODY_TURN_RATE);
                    self.own.heading = (self.own.heading + rate).rem_euclid(360.0);
                }
                Command::Throttle { target_speed } => {
                    let target = target_speed.clamp(-MAX_SPEED, MAX_SPEED);
                    let step = (target - self.own.speed).clamp(-SPEED_STEP, SPEED_STEP);
                    self.own.speed += step;
                }
            }
        }

        // Advance the radar beam; the swept arc feeds next tick's sightings.
        self.radar_arc_start = self.own.radar_heading;
        self.own.radar_heading =
            (self.own.radar_heading + self.radar_arc_sweep).rem_euclid(360.0);

        // Move the sentry, stopping hard at walls.
        let raw = self
            .own
            .position
            .offset_along(self.own.heading, self.own.speed);
        let clamped = self.arena.clamp_to_interior(raw, HALF_BOT_SIZE);
        if clamped != raw {
            self.pending_wall_hit = true;
            self.own.speed = 0.0;
        }
        self.own.position = clamped;

        self.own.gun_heat = (self.own.gun_heat - GUN_COOLING_RATE).max(0.0);

        self.advance_projectiles();
        self.advance_opponents();
    }

    fn advance_projectiles(&mut self) {
        let projectiles = std::mem::take(&mut self.projectiles);
        let mut surviving = Vec::with_capacity(projectiles.len());

        for mut projectile in projectiles {
            projectile.position = projectile
                .position
                .offset_along(projectile.heading, projectile.speed);

            let out_of_bounds = projectile.position.x < 0.0
                || projectile.position.y < 0.0
                || projectile.position.x > self.arena.width()
                || projectile.position.y > self.arena.height();
            if out_of_bounds {
                continue;
            }

            if let Some(index) = self.opponents.iter().position(|opponent| {
                opponent.position.distance_to(projectile.position) <= HALF_BOT_SIZE
            }) {
                let victim = self.opponents.remove(index);
                self.pending_deaths.push(victim.id);
                info!("opponent {} destroyed", victim.id.get());
                continue;
            }

            surviving.push(projectile);
        }

        self.projectiles = surviving;
    }

    fn advance_opponents(&mut self) {
        for opponent in &mut self.opponents {
            let raw = opponent
                .position
                .offset_along(opponent.heading, opponent.speed);

            let mut heading = opponent.heading;
            if raw.x < HALF_BOT_SIZE || raw.x > self.arena.width() - HALF_BOT_SIZE {
                heading = -heading;
            }
            if raw.y < HALF_BOT_SIZE || raw.y > self.arena.height() - HALF_BOT_SIZE {
                heading = 180.0 - heading;
            }

            if heading != opponent.heading {
                // Bounce: hold position for a tick, travel on the mirrored
                // heading from the next one.
                opponent.heading = heading.rem_euclid(360.0);
            } else {
                opponent.position = raw;
            }
        }
    }
}

/// Reports whether a radar beam sweeping from `start` by `sweep` degrees
/// passed over `bearing`.
fn arc_contains(start: f64, sweep: f64, bearing: f64) -> bool {
    if sweep == 0.0 {
        return false;
    }
    let relative = (bearing - start).rem_euclid(360.0);
    if sweep > 0.0 {
        relative <= sweep
    } else {
        relative - 360.0 >= sweep
    }
}
