#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Radar control system that keeps scan data fresh with minimal sweep.
//!
//! The radar rotates at full rate in a single direction. Once the tracker
//! holds an entry for every living opponent, the sweep direction flips
//! toward whichever contact has gone longest without a sighting, so the
//! radar oscillates across the arc that covers the whole field instead of
//! spinning through empty sky.

use border_sentry_core::{
    normalize_relative_angle, BotId, Command, ContactSnapshot, ContactView, Event, OwnSnapshot,
    MAX_RADAR_TURN_RATE,
};

/// Radar sweep system owning the scan direction between turns.
#[derive(Debug)]
pub struct RadarSweep {
    sweep_direction: f64,
    stalest_scanned: Option<BotId>,
}

impl Default for RadarSweep {
    fn default() -> Self {
        Self {
            sweep_direction: 1.0,
            stalest_scanned: None,
        }
    }
}

impl RadarSweep {
    /// Creates a new radar sweep system starting with a clockwise sweep.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes this turn's events and emits the radar command.
    ///
    /// Exactly one [`Command::SweepRadar`] is appended per call; the
    /// direction only changes when the tracker covers every living opponent
    /// and the sweep has come back around to the stalest contact.
    pub fn handle(
        &mut self,
        events: &[Event],
        own: &OwnSnapshot,
        contacts: &ContactView,
        enemies_alive: u32,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::BotSighted { id, .. } => {
                    self.consider_flip(*id, own, contacts, enemies_alive);
                }
                Event::BotPerished { id } => {
                    if self.stalest_scanned == Some(*id) {
                        self.stalest_scanned = None;
                    }
                }
                _ => {}
            }
        }

        out.push(Command::SweepRadar {
            turn_rate: self.sweep_direction * MAX_RADAR_TURN_RATE,
        });
    }

    fn consider_flip(
        &mut self,
        sighted: BotId,
        own: &OwnSnapshot,
        contacts: &ContactView,
        enemies_alive: u32,
    ) {
        // Only flip when every living opponent is tracked and the sweep has
        // reached the contact we were chasing freshness for (or no contact
        // is latched yet).
        let full_coverage = contacts.len() == enemies_alive as usize;
        let reached_stalest = match self.stalest_scanned {
            None => true,
            Some(id) => id == sighted,
        };
        if !full_coverage || !reached_stalest {
            return;
        }

        let Some(stalest) = stalest_contact(contacts) else {
            return;
        };

        let bearing = normalize_relative_angle(
            own.position.bearing_to(stalest.position) - own.heading,
        );
        self.sweep_direction = if bearing > 0.0 { 1.0 } else { -1.0 };
        self.stalest_scanned = Some(stalest.id);
    }
}

/// Contact with the oldest sighting, ties broken toward the smaller id.
fn stalest_contact(contacts: &ContactView) -> Option<&ContactSnapshot> {
    let mut stalest: Option<&ContactSnapshot> = None;
    for contact in contacts.iter() {
        match stalest {
            Some(current) if current.last_seen <= contact.last_seen => {}
            _ => stalest = Some(contact),
        }
    }
    stalest
}

#[cfg(test)]
mod tests {
    use super::RadarSweep;
    use border_sentry_core::{
        BotId, Command, ContactSnapshot, ContactView, Event, OwnSnapshot, Position, Tick,
        MAX_RADAR_TURN_RATE,
    };

    fn own_at(x: f64, y: f64) -> OwnSnapshot {
        OwnSnapshot {
            position: Position::new(x, y),
            ..OwnSnapshot::default()
        }
    }

    fn contact(id: u32, x: f64, y: f64, last_seen: u64) -> ContactSnapshot {
        ContactSnapshot {
            id: BotId::new(id),
            position: Position::new(x, y),
            heading: 0.0,
            speed: 0.0,
            last_seen: Tick::new(last_seen),
        }
    }

    fn sighting(id: u32, tick: u64) -> Event {
        Event::BotSighted {
            id: BotId::new(id),
            tick: Tick::new(tick),
            position: Position::new(0.0, 0.0),
            heading: 0.0,
            speed: 0.0,
        }
    }

    fn sweep_rate(commands: &[Command]) -> f64 {
        match commands.last() {
            Some(Command::SweepRadar { turn_rate }) => *turn_rate,
            other => panic!("expected sweep command, got {other:?}"),
        }
    }

    #[test]
    fn sweeps_clockwise_at_full_rate_by_default() {
        let mut system = RadarSweep::new();
        let mut out = Vec::new();

        system.handle(&[], &own_at(100.0, 100.0), &ContactView::default(), 2, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(sweep_rate(&out), MAX_RADAR_TURN_RATE);
    }

    #[test]
    fn flips_toward_stalest_contact_once_coverage_is_complete() {
        let mut system = RadarSweep::new();
        // Stalest contact sits to the west of us: negative bearing.
        let contacts = ContactView::from_snapshots(vec![
            contact(1, 50.0, 100.0, 1),
            contact(2, 300.0, 100.0, 5),
        ]);
        let mut out = Vec::new();

        system.handle(
            &[sighting(2, 5)],
            &own_at(100.0, 100.0),
            &contacts,
            2,
            &mut out,
        );

        assert_eq!(sweep_rate(&out), -MAX_RADAR_TURN_RATE);
    }

    #[test]
    fn incomplete_coverage_keeps_the_current_direction() {
        let mut system = RadarSweep::new();
        let contacts = ContactView::from_snapshots(vec![contact(1, 50.0, 100.0, 1)]);
        let mut out = Vec::new();

        system.handle(
            &[sighting(1, 1)],
            &own_at(100.0, 100.0),
            &contacts,
            3,
            &mut out,
        );

        assert_eq!(sweep_rate(&out), MAX_RADAR_TURN_RATE);
    }

    #[test]
    fn flip_waits_until_the_latched_contact_is_seen_again() {
        let mut system = RadarSweep::new();
        let contacts = ContactView::from_snapshots(vec![
            contact(1, 50.0, 100.0, 1),
            contact(2, 300.0, 100.0, 5),
        ]);

        // First sighting latches contact 1 (the stalest) and flips west.
        let mut out = Vec::new();
        system.handle(
            &[sighting(2, 5)],
            &own_at(100.0, 100.0),
            &contacts,
            2,
            &mut out,
        );
        assert_eq!(sweep_rate(&out), -MAX_RADAR_TURN_RATE);

        // A sighting of some other contact must not flip again.
        let refreshed = ContactView::from_snapshots(vec![
            contact(1, 50.0, 100.0, 1),
            contact(2, 300.0, 100.0, 6),
        ]);
        let mut out = Vec::new();
        system.handle(
            &[sighting(2, 6)],
            &own_at(100.0, 100.0),
            &refreshed,
            2,
            &mut out,
        );
        assert_eq!(sweep_rate(&out), -MAX_RADAR_TURN_RATE);

        // Sweeping over the latched contact re-evaluates: contact 2 east of
        // us is now the stalest, so the sweep flips back clockwise.
        let swept = ContactView::from_snapshots(vec![
            contact(1, 50.0, 100.0, 9),
            contact(2, 300.0, 100.0, 6),
        ]);
        let mut out = Vec::new();
        system.handle(
            &[sighting(1, 9)],
            &own_at(100.0, 100.0),
            &swept,
            2,
            &mut out,
        );
        assert_eq!(sweep_rate(&out), MAX_RADAR_TURN_RATE);
    }

    #[test]
    fn perished_latch_clears_and_allows_the_next_flip() {
        let mut system = RadarSweep::new();
        let contacts = ContactView::from_snapshots(vec![
            contact(1, 50.0, 100.0, 1),
            contact(2, 300.0, 100.0, 5),
        ]);
        let mut out = Vec::new();
        system.handle(
            &[sighting(2, 5)],
            &own_at(100.0, 100.0),
            &contacts,
            2,
            &mut out,
        );
        assert_eq!(sweep_rate(&out), -MAX_RADAR_TURN_RATE);

        // Contact 1 dies; the next sighting may flip again even though the
        // latched contact was never re-scanned.
        let survivors = ContactView::from_snapshots(vec![contact(2, 300.0, 100.0, 7)]);
        let mut out = Vec::new();
        system.handle(
            &[
                Event::BotPerished { id: BotId::new(1) },
                sighting(2, 7),
            ],
            &own_at(100.0, 100.0),
            &survivors,
            1,
            &mut out,
        );
        assert_eq!(sweep_rate(&out), MAX_RADAR_TURN_RATE);
    }
}
