#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that converts a firing solution into gun commands.
//!
//! The gun is steered toward the aim point with a full-deflection turn
//! command (the engine clamps it to the per-tick maximum) and the trigger is
//! pulled only when the cooldown has elapsed and the residual misalignment
//! fits inside the angle subtended by the target at its distance. A wide
//! target at close range therefore tolerates a larger turn-rate mismatch
//! than a narrow, distant one.

use border_sentry_core::{
    normalize_relative_angle, Command, EngagementConfig, FiringSolution, OwnSnapshot,
    HALF_BOT_SIZE,
};

/// Distances below this count as point-blank and are always aligned.
const POINT_BLANK: f64 = 1e-9;

/// Gunnery system emitting aim and fire commands for ready guns.
#[derive(Debug, Default)]
pub struct Gunnery;

impl Gunnery {
    /// Creates a new gunnery system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Appends gun commands for the provided firing solution.
    ///
    /// Without a solution the gun holds its heading and stays silent: no
    /// commands are appended at all.
    pub fn handle(
        &self,
        own: &OwnSnapshot,
        solution: Option<&FiringSolution>,
        config: &EngagementConfig,
        out: &mut Vec<Command>,
    ) {
        let Some(solution) = solution else {
            return;
        };

        let bearing = own.position.bearing_to(solution.aim_point);
        let turn_rate = normalize_relative_angle(bearing - own.gun_heading);
        out.push(Command::AimGun { turn_rate });

        if !own.gun_ready {
            return;
        }

        if aligned(turn_rate, solution.distance) {
            out.push(Command::Fire {
                power: config.power_for_shot(solution.distance, solution.target_speed),
            });
        }
    }
}

/// Reports whether a residual gun turn still hits at the given distance.
fn aligned(turn_rate: f64, distance: f64) -> bool {
    if distance < POINT_BLANK {
        return true;
    }
    let tolerance = (HALF_BOT_SIZE / distance).atan().to_degrees();
    turn_rate.abs() < tolerance
}
