#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that tallies a round's engagements.

use border_sentry_core::{Command, EngagementReport, Event};

/// Pure analytics system accumulating counters from the event stream.
#[derive(Debug, Default)]
pub struct Analytics {
    report: EngagementReport,
}

impl Analytics {
    /// Creates a new analytics system with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one turn's events and issued commands into the counters.
    ///
    /// A `RoundStarted` event resets every counter so reports never leak
    /// across rounds.
    pub fn handle(&mut self, events: &[Event], commands: &[Command]) {
        for event in events {
            match event {
                Event::RoundStarted { .. } => self.report = EngagementReport::default(),
                Event::TickStarted { .. } => self.report.ticks += 1,
                Event::BotSighted { .. } => self.report.sightings += 1,
                Event::BotPerished { .. } => self.report.eliminations += 1,
                Event::WallCollision { .. } => self.report.wall_collisions += 1,
                Event::BulletImpact { .. } => self.report.bullet_impacts += 1,
            }
        }

        for command in commands {
            if matches!(command, Command::Fire { .. }) {
                self.report.shots += 1;
            }
        }
    }

    /// Counters accumulated since the last round start.
    #[must_use]
    pub fn report(&self) -> EngagementReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::Analytics;
    use border_sentry_core::{
        ArenaSize, BotId, Command, EngagementReport, Event, FirePower, OwnSnapshot, Position,
        Tick,
    };

    fn sample_events() -> Vec<Event> {
        vec![
            Event::TickStarted {
                tick: Tick::new(1),
                own: OwnSnapshot::default(),
            },
            Event::BotSighted {
                id: BotId::new(1),
                tick: Tick::new(1),
                position: Position::new(10.0, 10.0),
                heading: 0.0,
                speed: 0.0,
            },
            Event::BulletImpact {
                tick: Tick::new(1),
                bearing: 45.0,
            },
        ]
    }

    #[test]
    fn counters_accumulate_across_turns() {
        let mut analytics = Analytics::new();

        analytics.handle(
            &sample_events(),
            &[Command::Fire {
                power: FirePower::maximum(),
            }],
        );
        analytics.handle(
            &[Event::BotPerished { id: BotId::new(1) }],
            &[Command::SweepRadar { turn_rate: 45.0 }],
        );

        assert_eq!(
            analytics.report(),
            EngagementReport {
                ticks: 1,
                sightings: 1,
                eliminations: 1,
                shots: 1,
                wall_collisions: 0,
                bullet_impacts: 1,
            },
        );
    }

    #[test]
    fn round_start_resets_counters() {
        let mut analytics = Analytics::new();
        analytics.handle(
            &sample_events(),
            &[Command::Fire {
                power: FirePower::maximum(),
            }],
        );

        analytics.handle(
            &[Event::RoundStarted {
                arena: ArenaSize::new(800.0, 600.0),
                enemy_count: 2,
            }],
            &[],
        );

        assert_eq!(analytics.report(), EngagementReport::default());
    }

    #[test]
    fn identical_streams_produce_identical_reports() {
        let mut first = Analytics::new();
        let mut second = Analytics::new();

        for analytics in [&mut first, &mut second] {
            analytics.handle(&sample_events(), &[]);
            analytics.handle(
                &[Event::WallCollision { tick: Tick::new(2) }],
                &[Command::Fire {
                    power: FirePower::maximum(),
                }],
            );
        }

        assert_eq!(first.report(), second.report());
    }
}
