#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks the engagement target for the current turn.
//!
//! Every tracked opponent is run through the interception predictor; aim
//! points the sentry cannot reach from its border band are discarded and the
//! nearest remaining point wins. The output is at most one firing solution
//! per turn, recomputed from scratch every time.

use border_sentry_core::{
    ArenaSize, BotId, ContactView, EngagementConfig, FiringSolution, OwnSnapshot, Position,
};
use border_sentry_system_prediction as prediction;

/// Target selection system that reuses a scratch buffer between turns.
#[derive(Debug, Default)]
pub struct TargetSelection {
    candidates: Vec<Candidate>,
}

impl TargetSelection {
    /// Creates a new target selection system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the firing solution for the provided battlefield view.
    ///
    /// The output buffer is cleared before the winning solution, if any, is
    /// pushed.
    pub fn handle(
        &mut self,
        own: &OwnSnapshot,
        contacts: &ContactView,
        arena: ArenaSize,
        config: &EngagementConfig,
        out: &mut Vec<FiringSolution>,
    ) {
        out.clear();

        if contacts.is_empty() {
            return;
        }

        self.candidates.clear();
        self.candidates.reserve(contacts.len());

        let projectile_speed = config.projectile_speed();
        for contact in contacts.iter() {
            let aim = prediction::predict(own.position, contact, projectile_speed, arena);
            if !reachable(aim.position, arena, config.border_depth()) {
                continue;
            }

            self.candidates.push(Candidate {
                target: contact.id,
                aim_point: aim.position,
                distance: own.position.distance_to(aim.position),
                target_speed: contact.speed,
                intercept: aim.intercept,
            });
        }

        let mut best: Option<Candidate> = None;
        for candidate in &self.candidates {
            match &mut best {
                Some(existing) => {
                    if candidate.precedes(existing) {
                        *existing = *candidate;
                    }
                }
                None => best = Some(*candidate),
            }
        }

        if let Some(winner) = best {
            out.push(FiringSolution {
                target: winner.target,
                aim_point: winner.aim_point,
                distance: winner.distance,
                target_speed: winner.target_speed,
                intercept: winner.intercept,
            });
        }
    }
}

/// Reports whether an aim point lies within reach of the border band.
///
/// Points deeper into the arena than `border_depth` from every wall sit in
/// the interior the sentry never enters, so shots at them are wasted.
fn reachable(point: Position, arena: ArenaSize, border_depth: f64) -> bool {
    let inside_interior = point.x > border_depth
        && point.y > border_depth
        && point.x < arena.width() - border_depth
        && point.y < arena.height() - border_depth;
    !inside_interior
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    target: BotId,
    aim_point: Position,
    distance: f64,
    target_speed: f64,
    intercept: bool,
}

impl Candidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance != other.distance {
            return self.distance < other.distance;
        }
        self.target < other.target
    }
}
